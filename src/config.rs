use std::{
    fs::{create_dir_all, File},
    io::{BufReader, Write},
    path::PathBuf,
};

use home::home_dir;
use serde::{Deserialize, Serialize};

use crate::AppError;

/// Local defaults applied when the matching flags are absent.
#[derive(Default, Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    beats_per_bar: Option<u32>,
    max_level: Option<u8>,
    voice: Option<String>,
}

impl Config {
    // folder placed in $HOME directory
    const FOLDER: &'static str = ".tabseq";

    pub fn get_beats_per_bar(&self) -> Option<u32> {
        self.beats_per_bar
    }

    pub fn get_max_level(&self) -> Option<u8> {
        self.max_level
    }

    pub fn get_voice(&self) -> Option<String> {
        self.voice.clone()
    }

    fn get_base_path() -> Result<PathBuf, AppError> {
        let home = home_dir()
            .ok_or_else(|| AppError::ConfigError("Could not find home directory".to_string()))?;
        let path = home.join(Self::FOLDER);
        Ok(path)
    }

    fn get_path() -> Result<PathBuf, AppError> {
        let base = Self::get_base_path()?;
        Ok(base.join("config.json"))
    }

    /// Creates config if it does not exist
    pub fn read_config() -> Result<Self, AppError> {
        let base_path = Self::get_base_path()?;
        if !base_path.exists() {
            create_dir_all(base_path)?;
        }
        let config_path = Self::get_path()?;
        if !config_path.exists() {
            // create empty config
            Config::default().save_config()?;
        }
        let file = File::open(config_path)?;
        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader).map_err(|err| {
            AppError::ConfigError(format!("Could not read local configuration {err:}"))
        })?;
        Ok(config)
    }

    /// Assumes the config folder exists
    pub fn save_config(&self) -> Result<(), AppError> {
        let config_path = Self::get_path()?;
        let json = serde_json::to_string_pretty(self).map_err(|err| {
            AppError::ConfigError(format!("Could not save local configuration {err:}"))
        })?;
        let mut file = File::create(config_path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }
}
