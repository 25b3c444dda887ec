//! UI plugin - menus and the HUD.

use bevy::prelude::*;

use super::{hud, menus};
use crate::core::left_level;

/// UI plugin - handles all user interface.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        hud::setup_hud_systems(app);
        menus::setup_menu_systems(app);

        app.add_systems(Update, hud::cleanup_hud.run_if(left_level));
    }
}
