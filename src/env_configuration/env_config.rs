use crate::common::*;

#[doc = r#"
    Reads an environment variable and falls back to `default` when it is not set.

    1. Looks the variable `key` up with `env::var()`
    2. Returns the value when present
    3. Otherwise logs the fallback at info level and returns `default`

    # Arguments
    * `key` - environment variable name
    * `default` - value used when the variable is absent or not valid unicode

    # Returns
    * `String` - resolved value
"#]
fn get_env_or_default(key: &str, default: &str) -> String {
    match env::var(key) {
        Ok(val) => val,
        Err(_) => {
            info!(
                "[ENV] '{}' is not set. Falling back to the default value '{}'",
                key, default
            );
            default.to_string()
        }
    }
}

#[doc = r#"
    Path of the TOML server configuration file, read from `SERVER_CONFIG_PATH`.

    The file holds the listen address, the upload/output directories, the name of the
    source CSV and the upload policy. once_lazy initializes it on first access only.

    # Default
    `./config/server_config.toml`
"#]
pub static SERVER_CONFIG_PATH: once_lazy<String> =
    once_lazy::new(|| get_env_or_default("SERVER_CONFIG_PATH", "./config/server_config.toml"));

#[doc = "Log file directory, read from `LOG_DIRECTORY`."]
pub static LOG_DIRECTORY: once_lazy<String> =
    once_lazy::new(|| get_env_or_default("LOG_DIRECTORY", "./logs"));
