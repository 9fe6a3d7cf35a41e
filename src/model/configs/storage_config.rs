use crate::common::*;

#[doc = r#"
    Filesystem layout of the server.

    Both directories default to siblings in the parent of the working directory
    (`../uploads`, `../output`). `source_file_name` is the CSV inside `upload_dir`
    that chart generation reads.
"#]
#[derive(Debug, Clone, Deserialize, Serialize, Getters)]
#[getset(get = "pub")]
pub struct StorageConfig {
    #[serde(default = "default_upload_dir")]
    pub upload_dir: PathBuf,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default = "default_source_file_name")]
    pub source_file_name: String,
}

fn parent_of_working_dir() -> PathBuf {
    env::current_dir()
        .ok()
        .and_then(|cwd| cwd.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from(".."))
}

fn default_upload_dir() -> PathBuf {
    parent_of_working_dir().join("uploads")
}

fn default_output_dir() -> PathBuf {
    parent_of_working_dir().join("output")
}

fn default_source_file_name() -> String {
    "5_years_financial_data.csv".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            upload_dir: default_upload_dir(),
            output_dir: default_output_dir(),
            source_file_name: default_source_file_name(),
        }
    }
}
