//! Audio module - sound effects for simulation cues and background music.

mod plugin;

pub use plugin::{cue_path, GameAudioPlugin, MusicChannel, MUSIC_PATH};
