//! Token pair and its on-disk representation.
//!
//! The pair is stored as JSON in `~/.erpsync/tokens.json` unless a different
//! path is configured.

use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// The token directory name.
const TOKEN_DIR: &str = ".erpsync";

/// The token file name.
const TOKEN_FILE: &str = "tokens.json";

/// Access and refresh token issued by the ERP sync API.
///
/// Serialized with the camelCase names the API uses on the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    /// Short-lived bearer credential.
    pub access_token: String,
    /// Longer-lived credential exchanged for a new pair. Rotated on every use.
    #[serde(default)]
    pub refresh_token: String,
}

impl TokenPair {
    /// Create a pair from its two tokens.
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
        }
    }

    /// The access token, or `None` if it is empty.
    pub fn access(&self) -> Option<&str> {
        non_empty(&self.access_token)
    }

    /// The refresh token, or `None` if it is empty.
    pub fn refresh(&self) -> Option<&str> {
        non_empty(&self.refresh_token)
    }

    /// Check if a refresh exchange is possible with this pair.
    pub fn has_refresh_token(&self) -> bool {
        self.refresh().is_some()
    }
}

fn non_empty(token: &str) -> Option<&str> {
    let trimmed = token.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

/// Reads and writes the token file.
#[derive(Debug, Clone)]
pub struct TokenFileManager {
    /// Path to the token file.
    token_path: PathBuf,
}

impl TokenFileManager {
    /// Create a manager for the default location under the home directory.
    ///
    /// Returns `None` if the home directory cannot be determined.
    pub fn new() -> Option<Self> {
        let home = dirs::home_dir()?;
        Some(Self {
            token_path: home.join(TOKEN_DIR).join(TOKEN_FILE),
        })
    }

    /// Create a manager for an explicit file path.
    pub fn with_path(token_path: impl Into<PathBuf>) -> Self {
        Self {
            token_path: token_path.into(),
        }
    }

    /// Get the path to the token file.
    pub fn token_path(&self) -> &Path {
        &self.token_path
    }

    /// Load the pair from disk.
    ///
    /// A missing file is `Ok(None)`. A file that does not parse is also
    /// treated as no session rather than a hard failure.
    pub fn load(&self) -> io::Result<Option<TokenPair>> {
        let file = match File::open(&self.token_path) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e),
        };

        let reader = BufReader::new(file);
        match serde_json::from_reader::<_, TokenPair>(reader) {
            Ok(pair) if pair.access().is_some() || pair.refresh().is_some() => Ok(Some(pair)),
            Ok(_) => Ok(None),
            Err(e) => {
                tracing::warn!(path = %self.token_path.display(), "Ignoring unreadable token file: {}", e);
                Ok(None)
            }
        }
    }

    /// Write the pair to disk, creating the parent directory if needed.
    pub fn save(&self, pair: &TokenPair) -> io::Result<()> {
        if let Some(parent) = self.token_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = File::create(&self.token_path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, pair)?;
        writer.flush()
    }

    /// Remove the token file. Succeeds if it does not exist.
    pub fn clear(&self) -> io::Result<()> {
        match fs::remove_file(&self.token_path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}
