//! Item plugin - pickup collection.

use bevy::prelude::*;

use super::pickup::collect_pickups;
use crate::core::SimSet;

pub struct ItemPlugin;

impl Plugin for ItemPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(FixedUpdate, collect_pickups.in_set(SimSet::Interact));
    }
}
