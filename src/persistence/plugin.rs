//! Persistence plugin - load at startup, save at save points.

use bevy::prelude::*;

use super::store::{MetaStore, RonFileStore};
use crate::core::{LevelCompleteEvent, MetaState, Notifier, SaveRequest, UiNotification};

/// Where the save file lives.
#[derive(Resource, Debug, Clone)]
pub struct SaveConfig {
    pub path: String,
}

impl Default for SaveConfig {
    fn default() -> Self {
        Self {
            path: "saves/game_data.ron".to_string(),
        }
    }
}

/// The active save store.
#[derive(Resource)]
pub struct SaveSlot(pub Box<dyn MetaStore>);

impl SaveSlot {
    pub fn new(store: impl MetaStore + 'static) -> Self {
        Self(Box::new(store))
    }
}

pub struct PersistencePlugin;

impl Plugin for PersistencePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SaveConfig>()
            .add_systems(Startup, (open_save_slot, load_progress).chain())
            .add_systems(
                Update,
                (record_level_completion, handle_save_requests).chain(),
            );
    }
}

/// Open the file store unless a slot was provided up front.
pub fn open_save_slot(mut commands: Commands, config: Res<SaveConfig>, slot: Option<Res<SaveSlot>>) {
    if slot.is_none() {
        commands.insert_resource(SaveSlot::new(RonFileStore::new(&config.path)));
    }
}

/// Replace the default progress with the saved one, if any.
pub fn load_progress(
    slot: Option<Res<SaveSlot>>,
    mut meta: ResMut<MetaState>,
    mut notifications: EventWriter<UiNotification>,
) {
    let Some(slot) = slot else {
        return;
    };

    match slot.0.load() {
        Ok(Some(saved)) => {
            *meta = saved;
            notifications.send(UiNotification::HighScoreChanged(meta.high_score));
        }
        Ok(None) => info!("No save found, starting fresh"),
        Err(e) => warn!("Could not load save, starting fresh: {}", e),
    }
}

/// Save progress, logging rather than failing the frame.
pub fn save_progress(store: &dyn MetaStore, meta: &MetaState) -> bool {
    match store.save(meta) {
        Ok(()) => true,
        Err(e) => {
            error!("Failed to save progress: {}", e);
            false
        }
    }
}

/// Forget all progress, in memory and in the store.
pub fn clear_progress<N: Notifier>(store: &dyn MetaStore, meta: &mut MetaState, notifier: &mut N) {
    if let Err(e) = store.clear() {
        error!("Failed to clear save: {}", e);
    }
    *meta = MetaState::default();
    notifier.notify(UiNotification::ScoreChanged(meta.score));
    notifier.notify(UiNotification::LivesChanged(meta.lives));
    notifier.notify(UiNotification::HighScoreChanged(meta.high_score));
}

/// A finished level raises the high score and saves.
fn record_level_completion(
    mut completed: EventReader<LevelCompleteEvent>,
    mut meta: ResMut<MetaState>,
    slot: Option<Res<SaveSlot>>,
    mut notifications: EventWriter<UiNotification>,
) {
    if completed.read().count() == 0 {
        return;
    }

    if meta.complete_level() {
        info!("New high score: {}", meta.high_score);
        notifications.send(UiNotification::HighScoreChanged(meta.high_score));
    }
    if let Some(slot) = slot {
        save_progress(slot.0.as_ref(), &meta);
    }
}

/// Manual saves and save clearing.
fn handle_save_requests(
    mut requests: EventReader<SaveRequest>,
    mut meta: ResMut<MetaState>,
    slot: Option<Res<SaveSlot>>,
    mut notifications: EventWriter<UiNotification>,
) {
    for request in requests.read() {
        let Some(slot) = slot.as_ref() else {
            warn!("No save slot available, ignoring {:?}", request);
            continue;
        };
        match request {
            SaveRequest::Save => {
                if save_progress(slot.0.as_ref(), &meta) {
                    info!("Progress saved");
                }
            }
            SaveRequest::Clear => clear_progress(slot.0.as_ref(), &mut meta, &mut notifications),
        }
    }
}
