use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub listen: String,
    pub seed: i64,
    pub roster_path: PathBuf,
    /// Unix timestamp after which registration is rejected. Absent means
    /// registration never closes.
    #[serde(default)]
    pub close_epoch: Option<i64>,
}

impl Config {
    pub fn registration_open(&self) -> bool {
        match self.close_epoch {
            Some(close) => unix_now() < close,
            None => true,
        }
    }
}

pub fn load_config<P: AsRef<Path>>(path: P) -> io::Result<Config> {
    let text = fs::read_to_string(path)?;
    toml::from_str(&text)
        .map_err(|err| io::Error::new(io::ErrorKind::Other, format!("decode config: {err}")))
}

fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs() as i64)
        .unwrap_or(0)
}
