use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub mod validator;

/// Environment variable naming the config file (without it `daybook.*` in
/// the working directory is used when present)
pub const CONFIG_PATH_ENV: &str = "DAYBOOK_CONFIG";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub server: ServerSettings,
    #[serde(default)]
    pub storage: StorageSettings,
    /// Default tracing filter, overridden by `RUST_LOG`
    pub log_level: String,
    /// Collection schema overrides read from `storage.schemas_dir`
    #[serde(skip)]
    pub schemas: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StorageSettings {
    /// One JSON file per collection; unset keeps documents in memory
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    /// `<collection>.json|yaml|yml` files replacing built-in schemas
    #[serde(default)]
    pub schemas_dir: Option<PathBuf>,
}

impl Settings {
    pub fn new() -> Result<Self, anyhow::Error> {
        let path = std::env::var(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("daybook"));
        Self::from_file(&path)
    }

    /// Load from `path` (optional file) layered under `DAYBOOK__*` variables
    pub fn from_file(path: &Path) -> Result<Self, anyhow::Error> {
        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("log_level", "info")?
            .add_source(File::from(path).required(false))
            .add_source(
                Environment::with_prefix("DAYBOOK")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut settings: Settings = s.try_deserialize()?;

        if let Some(dir) = settings.storage.schemas_dir.clone() {
            settings.load_schemas_from_dir(&dir)?;
        }

        // Validate configuration
        validator::ConfigValidator::validate(&settings).map_err(|errors| {
            let error_messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            anyhow::anyhow!(
                "Configuration validation failed:\n{}",
                error_messages.join("\n")
            )
        })?;

        Ok(settings)
    }

    /// `host:port` for the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    fn load_schemas_from_dir(&mut self, dir: &Path) -> Result<(), anyhow::Error> {
        let pattern = format!("{}/*", dir.display());
        for entry in glob::glob(&pattern)? {
            match entry {
                Ok(path) => {
                    let ext = path.extension().and_then(|e| e.to_str());
                    let stem = path.file_stem().and_then(|s| s.to_str());
                    if let (Some(ext @ ("json" | "yaml" | "yml")), Some(name)) = (ext, stem) {
                        let content = std::fs::read_to_string(&path)?;
                        let schema: Value = if ext == "json" {
                            serde_json::from_str(&content)?
                        } else {
                            serde_yaml::from_str(&content)?
                        };
                        tracing::debug!("Loaded schema override {}", path.display());
                        self.schemas.insert(name.to_string(), schema);
                    }
                }
                Err(e) => tracing::warn!("Failed to read glob entry: {}", e),
            }
        }
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings {
                host: "127.0.0.1".to_string(),
                port: 3000,
            },
            storage: StorageSettings::default(),
            log_level: "info".to_string(),
            schemas: BTreeMap::new(),
        }
    }
}
