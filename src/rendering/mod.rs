//! Rendering module - sprite facing, hit flashes and visual config.

mod plugin;
pub mod visual_config;

pub use plugin::{Flash, RenderingPlugin};
pub use visual_config::VisualConfig;
