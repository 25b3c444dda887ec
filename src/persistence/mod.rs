//! Persistence module - saving and loading [`MetaState`](crate::core::MetaState).

mod error;
mod plugin;
mod store;

pub use error::PersistenceError;
pub use plugin::{clear_progress, save_progress, PersistencePlugin, SaveConfig, SaveSlot};
pub use store::{MemoryStore, MetaStore, RonFileStore};
