//! Configuration and paths

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Default backing file name, relative to the working directory
pub const DEFAULT_CONTACTS_FILE: &str = "contacts.json";

/// Environment variable that overrides the backing file location
pub const CONTACTS_FILE_ENV: &str = "CONTACT_BOOK_FILE";

#[derive(Debug, Clone)]
pub struct Config {
    pub contacts_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            contacts_file: PathBuf::from(DEFAULT_CONTACTS_FILE),
        }
    }
}

impl Config {
    /// Config pointing at an explicit backing file
    pub fn with_file(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            contacts_file: expand_home(path.as_ref())?,
        })
    }

    /// Default config, with `CONTACT_BOOK_FILE` taking precedence when set
    pub fn from_env() -> Result<Self> {
        match std::env::var_os(CONTACTS_FILE_ENV) {
            Some(path) if !path.is_empty() => Self::with_file(PathBuf::from(path)),
            _ => Ok(Self::default()),
        }
    }

    /// Create config for testing with custom paths
    pub fn for_test(temp_dir: &Path) -> Self {
        Self {
            contacts_file: temp_dir.join(DEFAULT_CONTACTS_FILE),
        }
    }
}

/// Expand a leading `~/` to the user's home directory
fn expand_home(path: &Path) -> Result<PathBuf> {
    match path.strip_prefix("~") {
        Ok(rest) => {
            let home = dirs::home_dir()
                .ok_or_else(|| Error::Config("Could not find home directory".to_string()))?;
            Ok(home.join(rest))
        }
        Err(_) => Ok(path.to_path_buf()),
    }
}
