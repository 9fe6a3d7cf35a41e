use crate::common::*;

use crate::model::configs::{server_config::*, storage_config::*, upload_config::*};

use crate::utils_modules::io_utils::*;

#[doc = r#"
    Whole server configuration, loaded once at startup and handed to each service
    constructor. Every table is optional in the TOML file.
"#]
#[derive(Debug, Clone, Default, Deserialize, Serialize, Getters)]
#[getset(get = "pub")]
pub struct TotalConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub upload: UploadConfig,
}

impl TotalConfig {
    #[doc = "Loads the configuration file. A missing file means all defaults; a malformed one is an error."]
    pub fn load(config_path: &str) -> anyhow::Result<Self> {
        if !Path::new(config_path).exists() {
            warn!(
                "[TotalConfig->load] '{}' does not exist. Using the default configuration.",
                config_path
            );
            return Ok(TotalConfig::default());
        }

        let config: TotalConfig = read_toml_from_file::<TotalConfig>(config_path)?;
        info!("[TotalConfig->load] Loaded configuration from '{}'", config_path);

        Ok(config)
    }
}
