pub mod compute;
pub mod config;
pub mod content;
pub mod driver;
pub mod entities;
pub mod error;
pub mod headless;
pub mod input;
pub mod raster;
pub mod render;
pub mod run_state;
pub mod worldgen;
