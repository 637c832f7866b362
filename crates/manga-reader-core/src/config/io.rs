use super::models::UiConfig;
use super::tables::ConfigTables;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Parse configuration from TOML text.
pub fn parse_config(contents: &str) -> Result<UiConfig, toml::de::Error> {
    toml::from_str::<ConfigTables>(contents).map(UiConfig::from)
}

/// Render configuration back into the sectioned TOML layout.
pub fn serialize_config(config: &UiConfig) -> Result<String, toml::ser::Error> {
    toml::to_string(&ConfigTables::from(config))
}

/// Load configuration from the given path, falling back to defaults on error.
pub fn load_config(path: &Path) -> UiConfig {
    let contents = match fs::read_to_string(path) {
        Ok(data) => {
            info!(path = %path.display(), "Loaded UI config");
            data
        }
        Err(err) => {
            warn!(
                path = %path.display(),
                "Falling back to default config: {err}"
            );
            return UiConfig::default();
        }
    };

    match parse_config(&contents) {
        Ok(cfg) => {
            debug!("Parsed configuration from disk");
            cfg
        }
        Err(err) => {
            warn!(path = %path.display(), "Invalid config TOML: {err}");
            UiConfig::default()
        }
    }
}
