use serde::Deserialize;
use std::path::PathBuf;

use crate::geometry::CENTROID_THRESHOLD_DEG;

fn default_verbose() -> bool {
    false
}

#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub editor: EditorConfig,
    #[serde(default)]
    pub output: Option<PathBuf>,
    #[serde(default = "default_verbose")]
    pub verbose: bool,
}

fn default_base_url() -> String {
    "http://localhost:8080/api".to_string()
}

fn default_plantations_path() -> String {
    "plantacoes".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_backoff_secs() -> u64 {
    2
}

#[derive(Debug, Deserialize, Clone)]
pub struct BackendConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_plantations_path")]
    pub plantations_path: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_retry_backoff_secs")]
    pub retry_backoff_secs: u64,
    /// Bearer token issued by the app's login flow
    #[serde(default)]
    pub auth_token: Option<String>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            plantations_path: default_plantations_path(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            retry_backoff_secs: default_retry_backoff_secs(),
            auth_token: None,
        }
    }
}

fn default_centroid_threshold() -> f64 {
    CENTROID_THRESHOLD_DEG
}

#[derive(Debug, Deserialize, Clone)]
pub struct EditorConfig {
    /// Distance in degrees under which a pin counts as a centroid duplicate
    #[serde(default = "default_centroid_threshold")]
    pub centroid_threshold_deg: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            centroid_threshold_deg: default_centroid_threshold(),
        }
    }
}

/// Outcome of searching for a config file
#[derive(Debug, Default)]
pub struct ConfigLookup {
    pub config: Option<FileConfig>,
    /// Files that exist but could not be read or parsed
    pub errors: Vec<String>,
}

impl FileConfig {
    /// Load the first parseable config found on the search path
    ///
    /// Nothing is logged here; the caller reports `errors` once logging is up.
    pub fn load() -> ConfigLookup {
        Self::load_from(&get_config_paths())
    }

    pub fn load_from(paths: &[PathBuf]) -> ConfigLookup {
        let mut lookup = ConfigLookup::default();

        for path in paths {
            if !path.exists() {
                continue;
            }
            let parsed = std::fs::read_to_string(path)
                .map_err(|e| e.to_string())
                .and_then(|contents| {
                    toml::from_str::<FileConfig>(&contents).map_err(|e| e.to_string())
                });
            match parsed {
                Ok(config) => {
                    lookup.config = Some(config);
                    break;
                }
                Err(e) => lookup
                    .errors
                    .push(format!("Failed to parse config file {:?}: {}", path, e)),
            }
        }

        lookup
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("fieldfence.toml"));
    paths.push(PathBuf::from(".fieldfence.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("fieldfence").join("config.toml"));
        paths.push(config_dir.join("fieldfence.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".fieldfence.toml"));
    }

    paths
}
