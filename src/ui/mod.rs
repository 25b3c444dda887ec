//! UI module - HUD and menu screens.

mod hud;
mod menus;
mod plugin;

pub use hud::{HealthBar, HudCounter, HudRoot};
pub use menus::{press_button, MenuButton, MenuEffect, MenuScreen};
pub use plugin::UiPlugin;
