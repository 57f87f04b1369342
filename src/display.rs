//! Terminal presentation layer. All terminal I/O lives here.
//!
//! The engine paints into a logical `Surface`; this module scales that
//! raster onto terminal cells (two raster rows per cell via half blocks),
//! overlays the label layer and adds the HUD, checkpoint modal and the
//! end-of-run screens.  No game logic is performed here.

use std::io::Write;
use std::sync::mpsc;

use crossterm::{
    cursor,
    event::{Event, KeyCode, KeyEvent, KeyEventKind},
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use summit_climb::content::{Guidebook, Habit};
use summit_climb::entities::{Avatar, ClimbState, Snapshot, CHECKPOINT_COUNT, MOUNTAIN_HEIGHT};
use summit_climb::raster::{Rgb, Surface};
use summit_climb::run_state::RunPhase;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_TITLE: Color = Color::Cyan;
const C_HUD_ALTITUDE: Color = Color::White;
const C_HUD_CHECKPOINTS: Color = Color::Green;
const C_HUD_HEALTH: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;
const C_MODAL_BORDER: Color = Color::Green;
const C_MODAL_TEXT: Color = Color::White;
const C_VICTORY: Color = Color::Yellow;
const C_GAME_OVER: Color = Color::Red;

const MODAL_WIDTH: usize = 64;

fn term_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.0,
        g: rgb.1,
        b: rgb.2,
    }
}

// ── Menu ──────────────────────────────────────────────────────────────────────

pub enum MenuResult {
    Start(Avatar),
    Quit,
}

pub fn show_menu<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<MenuResult> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (width, height) = terminal::size()?;
    let cx = width / 2;
    let cy = height / 2;

    let title = "🏔️  7 Habits Mountain Climb  🏔️";
    print_centered(out, cx, cy.saturating_sub(8), title, C_TITLE)?;
    print_centered(
        out,
        cx,
        cy.saturating_sub(6),
        "Climb the mountain and learn the 7 Habits of Highly Effective People!",
        Color::White,
    )?;

    let left = cx.saturating_sub(22);
    out.queue(cursor::MoveTo(left, cy.saturating_sub(4)))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print("Choose your character:"))?;

    for (i, avatar) in Avatar::ALL.iter().enumerate() {
        let row = cy.saturating_sub(3) + i as u16;
        out.queue(cursor::MoveTo(left, row))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(format!("[{}] ", i + 1)))?;
        out.queue(style::SetForegroundColor(Color::Yellow))?;
        out.queue(Print(format!("{}  {}", avatar.glyph(), avatar.name())))?;
    }

    let how_to: &[&str] = &[
        "How to Play:",
        "• ← → / A D : Move across the mountain",
        "• ↑ / W     : Climb up steadily",
        "• Hold SPACE: Defeat monsters",
        "• Reach 7 checkpoint flags to learn each habit",
        "• Reach 3500m to complete your journey!",
    ];
    for (i, line) in how_to.iter().enumerate() {
        out.queue(cursor::MoveTo(left, cy + 1 + i as u16))?;
        out.queue(style::SetForegroundColor(C_HINT))?;
        out.queue(Print(*line))?;
    }

    out.queue(cursor::MoveTo(left, cy + 8))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("Q : Quit"))?;

    out.queue(style::ResetColor)?;
    out.flush()?;

    // Block until the user makes a choice
    loop {
        let code = match rx.recv() {
            Ok(Event::Key(KeyEvent { code, kind: KeyEventKind::Press, .. })) => code,
            Ok(_) => continue,
            // Input thread is gone; nothing more can be chosen.
            Err(_) => return Ok(MenuResult::Quit),
        };
        match code {
            KeyCode::Char('1') => return Ok(MenuResult::Start(Avatar::Man)),
            KeyCode::Char('2') => return Ok(MenuResult::Start(Avatar::Girl)),
            KeyCode::Char('3') => return Ok(MenuResult::Start(Avatar::Dog)),
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                return Ok(MenuResult::Quit);
            }
            _ => {}
        }
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Present one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    surface: &Surface,
    state: &ClimbState,
    guide: &Guidebook,
) -> std::io::Result<()> {
    let (cols, rows) = terminal::size()?;
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    match state.phase {
        RunPhase::Won => draw_victory(out, guide, cols, rows)?,
        RunPhase::Lost => draw_game_over(out, &state.snapshot, cols, rows)?,
        _ => {
            let scene_rows = rows.saturating_sub(2);
            draw_scene(out, surface, cols, scene_rows)?;
            draw_hud(out, &state.snapshot, cols)?;
            draw_controls_hint(out, rows)?;
            if let Some(habit) = state.phase.open_checkpoint().and_then(|i| guide.get(i)) {
                draw_checkpoint_modal(out, habit, cols, rows)?;
            }
        }
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Scene (rows 1 .. rows-1) ──────────────────────────────────────────────────

/// Pixel under the centre of a half-cell.
fn sample(surface: &Surface, col: u16, sub_row: u16, cols: u16, sub_rows: u16) -> Rgb {
    let x = (f32::from(col) + 0.5) * surface.width() as f32 / f32::from(cols.max(1));
    let y = (f32::from(sub_row) + 0.5) * surface.height() as f32 / f32::from(sub_rows.max(1));
    surface.pixel(x as u32, y as u32).unwrap_or(Rgb::BLACK)
}

fn draw_scene<W: Write>(
    out: &mut W,
    surface: &Surface,
    cols: u16,
    scene_rows: u16,
) -> std::io::Result<()> {
    let sub_rows = scene_rows * 2;

    for row in 0..scene_rows {
        out.queue(cursor::MoveTo(0, row + 1))?;
        let mut last: Option<(Rgb, Rgb)> = None;
        for col in 0..cols {
            let top = sample(surface, col, row * 2, cols, sub_rows);
            let bottom = sample(surface, col, row * 2 + 1, cols, sub_rows);
            if last != Some((top, bottom)) {
                out.queue(style::SetForegroundColor(term_color(top)))?;
                out.queue(style::SetBackgroundColor(term_color(bottom)))?;
                last = Some((top, bottom));
            }
            out.queue(Print('▀'))?;
        }
    }

    for label in surface.labels() {
        if label.x < 0.0 || label.y < 0.0 {
            continue;
        }
        let col = (label.x / surface.width() as f32 * f32::from(cols)) as u16;
        let row = (label.y / surface.height() as f32 * f32::from(scene_rows)) as u16;
        if col >= cols || row >= scene_rows {
            continue;
        }
        let bg = sample(surface, col, row * 2 + 1, cols, sub_rows);
        out.queue(cursor::MoveTo(col, row + 1))?;
        out.queue(style::SetBackgroundColor(term_color(bg)))?;
        out.queue(style::SetForegroundColor(term_color(label.color)))?;
        out.queue(Print(&label.text))?;
    }

    out.queue(style::SetBackgroundColor(Color::Reset))?;
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, snapshot: &Snapshot, cols: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_ALTITUDE))?;
    out.queue(Print(format!(
        "Altitude: {}m / {}m",
        snapshot.altitude, MOUNTAIN_HEIGHT as u32
    )))?;

    let checkpoints = format!(
        "Checkpoints: {}/{}",
        snapshot.checkpoints_reached, CHECKPOINT_COUNT
    );
    let cx = (cols / 2).saturating_sub(checkpoints.len() as u16 / 2);
    out.queue(cursor::MoveTo(cx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_CHECKPOINTS))?;
    out.queue(Print(&checkpoints))?;

    let hearts = "♥".repeat(snapshot.health.max(0) as usize);
    let health = format!("Health:{}", hearts);
    let rx = cols.saturating_sub(health.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_HEALTH))?;
    out.queue(Print(&health))?;

    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, rows: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(
        "← → / A D : Move   ↑ / W : Climb   Hold SPACE : Defeat Monsters   Q : Quit",
    ))?;
    Ok(())
}

// ── Overlays ──────────────────────────────────────────────────────────────────

fn print_centered<W: Write>(
    out: &mut W,
    cx: u16,
    row: u16,
    text: &str,
    color: Color,
) -> std::io::Result<()> {
    let col = cx.saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

/// Greedy word wrap at `width` characters.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if !line.is_empty() && line.chars().count() + 1 + word.chars().count() > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

fn draw_checkpoint_modal<W: Write>(
    out: &mut W,
    habit: &Habit,
    cols: u16,
    rows: u16,
) -> std::io::Result<()> {
    let inner = MODAL_WIDTH - 4;
    let mut body = vec![format!("({}) {}", habit.number, habit.title), String::new()];
    body.extend(wrap(&habit.description, inner));
    body.push(String::new());
    body.push("ENTER : Continue Climbing! ⛰️".to_string());

    let cx = cols / 2;
    let left = cx.saturating_sub(MODAL_WIDTH as u16 / 2);
    let top = (rows / 2).saturating_sub(body.len() as u16 / 2 + 1);

    out.queue(style::SetBackgroundColor(Color::Black))?;
    out.queue(style::SetForegroundColor(C_MODAL_BORDER))?;
    out.queue(cursor::MoveTo(left, top))?;
    out.queue(Print(format!("╔{}╗", "═".repeat(MODAL_WIDTH - 2))))?;

    for (i, line) in body.iter().enumerate() {
        let row = top + 1 + i as u16;
        out.queue(cursor::MoveTo(left, row))?;
        out.queue(style::SetForegroundColor(C_MODAL_BORDER))?;
        out.queue(Print("║ "))?;
        out.queue(style::SetForegroundColor(if i == 0 {
            C_MODAL_BORDER
        } else {
            C_MODAL_TEXT
        }))?;
        let pad = inner.saturating_sub(line.chars().count());
        out.queue(Print(format!("{}{}", line, " ".repeat(pad))))?;
        out.queue(style::SetForegroundColor(C_MODAL_BORDER))?;
        out.queue(Print(" ║"))?;
    }

    out.queue(cursor::MoveTo(left, top + 1 + body.len() as u16))?;
    out.queue(Print(format!("╚{}╝", "═".repeat(MODAL_WIDTH - 2))))?;
    out.queue(style::SetBackgroundColor(Color::Reset))?;
    Ok(())
}

fn draw_victory<W: Write>(
    out: &mut W,
    guide: &Guidebook,
    cols: u16,
    rows: u16,
) -> std::io::Result<()> {
    let cx = cols / 2;
    let total_rows = guide.habits().len() as u16 + 5;
    let start_row = (rows / 2).saturating_sub(total_rows / 2);

    print_centered(out, cx, start_row, "🎉 You reached the summit! 🎉", C_VICTORY)?;
    print_centered(
        out,
        cx,
        start_row + 1,
        "You have learned all 7 Habits of Highly Effective People!",
        Color::White,
    )?;

    let left = cx.saturating_sub(24);
    for (i, habit) in guide.habits().iter().enumerate() {
        out.queue(cursor::MoveTo(left, start_row + 3 + i as u16))?;
        out.queue(style::SetForegroundColor(Color::Green))?;
        out.queue(Print(format!("{}. {}", habit.number, habit.short_title())))?;
    }

    let hint_row = start_row + 4 + guide.habits().len() as u16;
    print_centered(
        out,
        cx,
        hint_row,
        "R - Climb Again! 🏔️   M - Menu   Q - Quit",
        Color::White,
    )?;
    Ok(())
}

fn draw_game_over<W: Write>(
    out: &mut W,
    snapshot: &Snapshot,
    cols: u16,
    rows: u16,
) -> std::io::Result<()> {
    let lines: &[(&str, Color)] = &[
        ("╔════════════════════════╗", C_GAME_OVER),
        ("║  Game Over! Try again! ║", C_GAME_OVER),
        ("╚════════════════════════╝", C_GAME_OVER),
    ];

    let cx = cols / 2;
    let start_row = (rows / 2).saturating_sub(3);
    for (i, (msg, color)) in lines.iter().enumerate() {
        print_centered(out, cx, start_row + i as u16, msg, *color)?;
    }

    let summary = format!(
        "Altitude: {}m   Checkpoints: {}/{}",
        snapshot.altitude, snapshot.checkpoints_reached, CHECKPOINT_COUNT
    );
    print_centered(out, cx, start_row + 3, &summary, Color::Yellow)?;
    print_centered(
        out,
        cx,
        start_row + 4,
        "R - Restart   M - Menu   Q - Quit",
        Color::White,
    )?;
    Ok(())
}
