//! Error types and helpers for RON data loading.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors that can occur when loading level or enemy data.
#[derive(Debug, Error)]
pub enum DataLoadError {
    /// Directory could not be found.
    #[error("Directory not found: {0}")]
    DirectoryNotFound(String),

    /// File could not be read.
    #[error("Failed to read file '{path}': {details}")]
    ReadError { path: String, details: String },

    /// RON parsing failed.
    #[error("Parse error in '{path}': {details}")]
    ParseError { path: String, details: String },

    /// A grid cell uses a character the palette doesn't define.
    #[error("Unknown palette entry '{character}' at position ({x}, {y})")]
    UnknownPaletteEntry { character: char, x: usize, y: usize },

    /// The level grid has no player start.
    #[error("Level '{0}' has no player start")]
    MissingPlayerStart(String),

    /// The data parsed but describes something unusable.
    #[error("Invalid data in '{path}': {details}")]
    Invalid { path: String, details: String },
}

/// Read and parse a single RON file.
pub fn read_ron_file<T: DeserializeOwned>(path: &Path) -> Result<T, DataLoadError> {
    let contents = fs::read_to_string(path).map_err(|e| DataLoadError::ReadError {
        path: path.display().to_string(),
        details: e.to_string(),
    })?;
    ron::from_str(&contents).map_err(|e| DataLoadError::ParseError {
        path: path.display().to_string(),
        details: e.to_string(),
    })
}

/// All `.ron` files directly inside `dir`, sorted by path.
pub fn ron_files_in(dir: &Path) -> Result<Vec<PathBuf>, DataLoadError> {
    if !dir.exists() {
        return Err(DataLoadError::DirectoryNotFound(dir.display().to_string()));
    }
    let entries = fs::read_dir(dir).map_err(|e| DataLoadError::ReadError {
        path: dir.display().to_string(),
        details: e.to_string(),
    })?;

    let mut files: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "ron"))
        .collect();
    files.sort();
    Ok(files)
}

/// Registry key for a data file: its stem without a `.level`/`.enemy` suffix.
pub fn data_key(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    stem.strip_suffix(".level")
        .or_else(|| stem.strip_suffix(".enemy"))
        .unwrap_or(&stem)
        .to_string()
}
