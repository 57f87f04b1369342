//! Fixed-size RGB raster the renderer paints into.
//!
//! Shapes are rasterized into `pixels`; text and emoji glyphs go to a
//! separate label layer that the presenter overlays, since the crate ships
//! no font.  Coordinates are logical units, `(0, 0)` top-left, and anything
//! outside the surface is clipped.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);

    /// `#RRGGBB` literal, evaluated at compile time.
    pub const fn hex(value: u32) -> Rgb {
        Rgb((value >> 16) as u8, (value >> 8) as u8, value as u8)
    }

    /// Mix `over` onto `self` with the given opacity in `[0, 1]`.
    pub fn blend(self, over: Rgb, alpha: f32) -> Rgb {
        let a = alpha.clamp(0.0, 1.0);
        let mix = |base: u8, top: u8| -> u8 {
            (f32::from(base) * (1.0 - a) + f32::from(top) * a).round() as u8
        };
        Rgb(mix(self.0, over.0), mix(self.1, over.1), mix(self.2, over.2))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Label {
    pub x: f32,
    pub y: f32,
    pub text: String,
    pub color: Rgb,
}

#[derive(Clone, Debug)]
pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
    labels: Vec<Label>,
}

impl Surface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgb::BLACK; width as usize * height as usize],
            labels: Vec::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x < self.width && y < self.height {
            Some(self.pixels[(y * self.width + x) as usize])
        } else {
            None
        }
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Wipe the label layer and paint a top-to-bottom gradient.
    pub fn clear_gradient(&mut self, top: Rgb, bottom: Rgb) {
        self.labels.clear();
        let span = self.height.saturating_sub(1).max(1) as f32;
        for y in 0..self.height {
            let color = top.blend(bottom, y as f32 / span);
            let row = (y * self.width) as usize;
            self.pixels[row..row + self.width as usize].fill(color);
        }
    }

    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgb) {
        self.blend_rect(x, y, w, h, color, 1.0);
    }

    pub fn blend_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgb, alpha: f32) {
        let Some((x0, y0, x1, y1)) = self.clip(x, y, x + w, y + h) else {
            return;
        };
        for py in y0..y1 {
            for px in x0..x1 {
                self.put(px, py, color, alpha);
            }
        }
    }

    /// One-unit outline just inside the rectangle's bounds.
    pub fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgb, alpha: f32) {
        self.blend_rect(x, y, w, 1.0, color, alpha);
        self.blend_rect(x, y + h - 1.0, w, 1.0, color, alpha);
        self.blend_rect(x, y + 1.0, 1.0, h - 2.0, color, alpha);
        self.blend_rect(x + w - 1.0, y + 1.0, 1.0, h - 2.0, color, alpha);
    }

    pub fn blend_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgb, alpha: f32) {
        let Some((x0, y0, x1, y1)) =
            self.clip(cx - radius, cy - radius, cx + radius, cy + radius)
        else {
            return;
        };
        let r2 = radius * radius;
        for py in y0..y1 {
            for px in x0..x1 {
                let dx = px as f32 + 0.5 - cx;
                let dy = py as f32 + 0.5 - cy;
                if dx * dx + dy * dy <= r2 {
                    self.put(px, py, color, alpha);
                }
            }
        }
    }

    /// Filled triangle, sampled at pixel centres.
    pub fn fill_triangle(&mut self, a: (f32, f32), b: (f32, f32), c: (f32, f32), color: Rgb) {
        let min_x = a.0.min(b.0).min(c.0);
        let max_x = a.0.max(b.0).max(c.0);
        let min_y = a.1.min(b.1).min(c.1);
        let max_y = a.1.max(b.1).max(c.1);
        let Some((x0, y0, x1, y1)) = self.clip(min_x, min_y, max_x, max_y) else {
            return;
        };

        let edge = |p: (f32, f32), q: (f32, f32), x: f32, y: f32| {
            (q.0 - p.0) * (y - p.1) - (q.1 - p.1) * (x - p.0)
        };
        for py in y0..y1 {
            for px in x0..x1 {
                let (x, y) = (px as f32 + 0.5, py as f32 + 0.5);
                let e0 = edge(a, b, x, y);
                let e1 = edge(b, c, x, y);
                let e2 = edge(c, a, x, y);
                let inside = (e0 >= 0.0 && e1 >= 0.0 && e2 >= 0.0)
                    || (e0 <= 0.0 && e1 <= 0.0 && e2 <= 0.0);
                if inside {
                    self.put(px, py, color, 1.0);
                }
            }
        }
    }

    pub fn text(&mut self, x: f32, y: f32, text: impl Into<String>, color: Rgb) {
        self.labels.push(Label {
            x,
            y,
            text: text.into(),
            color,
        });
    }

    fn put(&mut self, x: u32, y: u32, color: Rgb, alpha: f32) {
        let idx = (y * self.width + x) as usize;
        self.pixels[idx] = if alpha >= 1.0 {
            color
        } else {
            self.pixels[idx].blend(color, alpha)
        };
    }

    /// Intersect a float box with the surface; `None` when nothing is visible.
    fn clip(&self, x0: f32, y0: f32, x1: f32, y1: f32) -> Option<(u32, u32, u32, u32)> {
        let cx0 = x0.max(0.0).floor() as u32;
        let cy0 = y0.max(0.0).floor() as u32;
        let cx1 = x1.min(self.width as f32).ceil().max(0.0) as u32;
        let cy1 = y1.min(self.height as f32).ceil().max(0.0) as u32;
        if cx0 >= cx1 || cy0 >= cy1 {
            None
        } else {
            Some((cx0, cy0, cx1.min(self.width), cy1.min(self.height)))
        }
    }
}
