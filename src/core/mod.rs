//! Core game module - states, events, shared progress and the tick schedule.
//!
//! This module provides the foundation that all other game systems build upon.

mod events;
mod meta;
mod plugin;
mod schedule;
mod states;

pub use events::*;
pub use meta::{MetaState, Notifier, DEFAULT_LIVES, DEFAULT_PLAYER_NAME};
pub use plugin::CorePlugin;
pub use schedule::{FrameSet, SimSet};
pub use states::*;
