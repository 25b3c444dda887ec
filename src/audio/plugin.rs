//! Audio plugin - plays [`AudioCue`]s through kira at the saved volumes.

use bevy::prelude::*;
use bevy_kira_audio::prelude::{AudioApp, AudioChannel, AudioControl, AudioPlugin as KiraAudioPlugin};

use crate::core::{AudioCue, GameState, MetaState};

/// Looping background track.
pub const MUSIC_PATH: &str = "audio/music.ogg";

/// Channel carrying the music, so its volume is set apart from effects.
#[derive(Resource)]
pub struct MusicChannel;

/// Channel carrying sound effects.
#[derive(Resource)]
pub struct SfxChannel;

pub struct GameAudioPlugin;

impl Plugin for GameAudioPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(KiraAudioPlugin)
            .add_audio_channel::<MusicChannel>()
            .add_audio_channel::<SfxChannel>()
            .add_systems(OnExit(GameState::Loading), start_music)
            .add_systems(Update, (sync_volumes, play_cues).chain());
    }
}

/// Asset path for a cue.
pub fn cue_path(cue: AudioCue) -> &'static str {
    match cue {
        AudioCue::PlayerAttack => "audio/player_attack.ogg",
        AudioCue::EnemyAttack => "audio/enemy_attack.ogg",
        AudioCue::BossSpecial => "audio/boss_special.ogg",
        AudioCue::Hurt => "audio/hurt.ogg",
        AudioCue::EnemyDeath => "audio/enemy_death.ogg",
        AudioCue::PlayerDeath => "audio/player_death.ogg",
        AudioCue::Jump => "audio/jump.ogg",
        AudioCue::Pickup => "audio/pickup.ogg",
    }
}

fn start_music(
    asset_server: Res<AssetServer>,
    music: Res<AudioChannel<MusicChannel>>,
    meta: Res<MetaState>,
) {
    music.set_volume(meta.music_volume.clamp(0.0, 1.0) as f64);
    music.play(asset_server.load(MUSIC_PATH)).looped();
}

/// Apply volume changes from loaded or cleared progress.
fn sync_volumes(
    meta: Res<MetaState>,
    music: Res<AudioChannel<MusicChannel>>,
    sfx: Res<AudioChannel<SfxChannel>>,
) {
    if !meta.is_changed() {
        return;
    }
    music.set_volume(meta.music_volume.clamp(0.0, 1.0) as f64);
    sfx.set_volume(meta.sfx_volume.clamp(0.0, 1.0) as f64);
}

fn play_cues(
    asset_server: Res<AssetServer>,
    sfx: Res<AudioChannel<SfxChannel>>,
    mut cues: EventReader<AudioCue>,
) {
    for cue in cues.read() {
        sfx.play(asset_server.load(cue_path(*cue)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_cue_has_a_distinct_sound() {
        let cues = [
            AudioCue::PlayerAttack,
            AudioCue::EnemyAttack,
            AudioCue::BossSpecial,
            AudioCue::Hurt,
            AudioCue::EnemyDeath,
            AudioCue::PlayerDeath,
            AudioCue::Jump,
            AudioCue::Pickup,
        ];
        let mut paths: Vec<&str> = cues.iter().map(|cue| cue_path(*cue)).collect();
        paths.sort();
        paths.dedup();
        assert_eq!(paths.len(), cues.len());
    }
}
