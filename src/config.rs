//! Environment-driven configuration
//!
//! All knobs come from environment variables (a local `.env` file is loaded
//! by the binary before this runs):
//!
//! | Variable       | Default     | Meaning                                   |
//! |----------------|-------------|-------------------------------------------|
//! | `STORAGE_MODE` | `mongo`     | `mongo` or `file`                         |
//! | `MONGODB_URI`  | —           | connection string; required in mongo mode |
//! | `MONGODB_DB`   | `darzi`     | database name                             |
//! | `DATA_FILE`    | `data.json` | flat-file path (file mode)                |
//! | `PORT`         | `3000`      | listen port                               |
//! | `PUBLIC_DIR`   | `public`    | dashboard asset directory                 |
//!
//! A missing `MONGODB_URI` in mongo mode is fatal at startup — there is no
//! degraded mode to fall back to.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result, bail};

/// Which persistence backend the process runs against. The two modes are
/// mutually exclusive deployment variants, never layered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageMode {
    Mongo,
    File,
}

impl FromStr for StorageMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "mongo" | "mongodb" => Ok(StorageMode::Mongo),
            "file" | "json" => Ok(StorageMode::File),
            other => bail!("Unknown STORAGE_MODE '{}', expected 'mongo' or 'file'", other),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub storage_mode: StorageMode,
    pub mongodb_uri: Option<String>,
    pub mongodb_db: String,
    pub data_file: PathBuf,
    pub port: u16,
    pub public_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let storage_mode = match env::var("STORAGE_MODE") {
            Ok(raw) => raw.parse()?,
            Err(_) => StorageMode::Mongo,
        };

        let mongodb_uri = env::var("MONGODB_URI").ok();
        if storage_mode == StorageMode::Mongo && mongodb_uri.is_none() {
            bail!("MONGODB_URI is not defined; set it in the environment or .env");
        }

        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("Invalid PORT value '{}'", raw))?,
            Err(_) => 3000,
        };

        Ok(Self {
            storage_mode,
            mongodb_uri,
            mongodb_db: env::var("MONGODB_DB").unwrap_or_else(|_| "darzi".to_string()),
            data_file: env::var("DATA_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data.json")),
            port,
            public_dir: env::var("PUBLIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("public")),
        })
    }
}
