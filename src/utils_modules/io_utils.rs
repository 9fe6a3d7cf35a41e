use crate::common::*;

#[doc = r#"
    Reads a TOML file and deserializes it into `T`.

    1. Reads the file at `file_path` into a string
    2. Parses it with `toml::from_str()` into the generic type `T`
    3. Any read or parse failure is returned with the file path attached

    # Type Parameters
    * `T` - a struct implementing `DeserializeOwned`

    # Arguments
    * `file_path` - absolute or relative path of the TOML file

    # Returns
    * `Result<T, anyhow::Error>`

    # Examples
    ```rust
    let config: TotalConfig = read_toml_from_file("config/server_config.toml")?;
    ```
"#]
pub fn read_toml_from_file<T: DeserializeOwned>(file_path: &str) -> Result<T, anyhow::Error> {
    let toml_content: String = std::fs::read_to_string(file_path)
        .with_context(|| format!("[read_toml_from_file] Failed to read '{}'", file_path))?;
    let toml: T = toml::from_str(&toml_content)
        .with_context(|| format!("[read_toml_from_file] Failed to parse '{}'", file_path))?;

    Ok(toml)
}

#[doc = "Removes a leading UTF-8 byte order mark, if any."]
pub fn strip_utf8_bom(bytes: &[u8]) -> &[u8] {
    bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes)
}
