use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

const APP_DIR: &str = "multitool";
const CREDENTIAL_FILE: &str = "password.txt";
const HISTORY_FILE: &str = "game_history.json";
const LOG_FILE: &str = "multitool.log";

#[derive(Debug, Clone)]
pub struct DataPaths {
    pub credential: PathBuf,
    pub history: PathBuf,
    pub log: PathBuf,
}

impl DataPaths {
    pub fn resolve() -> Result<Self> {
        let base = dirs::data_dir().context("unable to resolve data directory")?;
        Ok(Self::in_dir(&base.join(APP_DIR)))
    }

    pub fn in_dir(dir: &Path) -> Self {
        Self {
            credential: dir.join(CREDENTIAL_FILE),
            history: dir.join(HISTORY_FILE),
            log: dir.join(LOG_FILE),
        }
    }
}
