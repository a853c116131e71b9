//! `.env` discovery
//!
//! Priority order (highest to lowest):
//! 1. Variables already set in the process environment
//! 2. Current directory .env
//! 3. ~/.albumctl/.env
//!
//! dotenvy never overwrites a variable that is already set, so loading in
//! this order gives the priority above.
//!
//! Loading runs before tracing is initialised (so `RUST_LOG` from a `.env`
//! applies); the outcome is logged afterwards via [`DotenvSources::log`].

use std::path::PathBuf;

use tracing::{debug, info};

/// Which .env files were read, and which failed to parse
#[derive(Debug, Default)]
pub struct DotenvSources {
    pub loaded: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, String)>,
}

impl DotenvSources {
    pub fn log(&self) {
        for (path, err) in &self.failed {
            debug!("Failed to load {}: {}", path.display(), err);
        }
        for path in &self.loaded {
            debug!("Loaded .env from {}", path.display());
        }

        if self.loaded.is_empty() {
            info!("Using environment variables only (no .env file found)");
        } else {
            let paths: Vec<String> = self.loaded.iter().map(|p| p.display().to_string()).collect();
            info!("Loaded configuration from: {}", paths.join(", "));
        }
    }
}

/// Load environment variables from .env files.
///
/// A missing or unreadable file is not an error; the required DB_* keys
/// are checked afterwards by `DbConfig::from_env`.
pub fn load_dotenv() -> DotenvSources {
    let mut sources = DotenvSources::default();

    match dotenvy::dotenv() {
        Ok(path) => sources.loaded.push(path),
        Err(e) if e.not_found() => {}
        Err(e) => sources.failed.push((PathBuf::from(".env"), e.to_string())),
    }

    if let Some(env_file) = config_dir().map(|dir| dir.join(".env")) {
        if env_file.exists() {
            match dotenvy::from_path(&env_file) {
                Ok(()) => sources.loaded.push(env_file),
                Err(e) => sources.failed.push((env_file, e.to_string())),
            }
        }
    }

    sources
}

/// The albumctl config directory (~/.albumctl)
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".albumctl"))
}
