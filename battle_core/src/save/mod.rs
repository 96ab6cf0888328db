//! Save store - Saved games as versioned JSON files, one per game name

mod record;

pub use record::{PlayerRecord, SavedGame, SCHEMA_VERSION};

use crate::combatant::Combatant;
use crate::stat_block::StatError;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

const EXTENSION: &str = "json";

#[derive(Error, Debug)]
pub enum SaveError {
    #[error("Failed to access save file: {0}")]
    IoError(#[from] io::Error),
    #[error("Failed to encode or decode save: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Save schema version {found} is not supported (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
    #[error("Saved player is invalid: {0}")]
    InvalidPlayer(#[from] StatError),
    #[error("Invalid game name: {0:?}")]
    InvalidName(String),
    #[error("No saved game named {0:?}")]
    NotFound(String),
}

/// Directory of saved games
#[derive(Debug, Clone)]
pub struct SaveStore {
    dir: PathBuf,
}

impl SaveStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        SaveStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Names of all saved games, sorted; empty if the directory does not exist yet
    pub fn list_games(&self) -> Result<Vec<String>, SaveError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    pub fn exists(&self, game_name: &str) -> Result<bool, SaveError> {
        Ok(self.path_for(game_name)?.is_file())
    }

    /// Load a saved game and check that its player is usable
    pub fn load(&self, game_name: &str) -> Result<(SavedGame, Combatant), SaveError> {
        let path = self.path_for(game_name)?;
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(SaveError::NotFound(game_name.to_string()))
            }
            Err(e) => return Err(e.into()),
        };

        let saved: SavedGame = serde_json::from_str(&content)?;
        if saved.schema_version != SCHEMA_VERSION {
            return Err(SaveError::UnsupportedVersion {
                found: saved.schema_version,
                expected: SCHEMA_VERSION,
            });
        }
        let player = Combatant::try_from(saved.player.clone())?;
        Ok((saved, player))
    }

    /// Write a saved game, replacing any previous save with the same name
    pub fn save(&self, saved: &SavedGame) -> Result<PathBuf, SaveError> {
        let path = self.path_for(&saved.game_name)?;
        fs::create_dir_all(&self.dir)?;
        fs::write(&path, serde_json::to_string_pretty(saved)?)?;
        info!(game = %saved.game_name, path = %path.display(), "game saved");
        Ok(path)
    }

    fn path_for(&self, game_name: &str) -> Result<PathBuf, SaveError> {
        let valid = !game_name.trim().is_empty()
            && !game_name.starts_with('.')
            && !game_name.contains(['/', '\\']);
        if !valid {
            return Err(SaveError::InvalidName(game_name.to_string()));
        }
        Ok(self.dir.join(format!("{game_name}.{EXTENSION}")))
    }
}
