use crate::common::*;

#[derive(Debug, Clone, Deserialize, Serialize, Getters)]
#[getset(get = "pub")]
pub struct UploadConfig {
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,
    #[serde(default = "default_allowed_mime_types")]
    pub allowed_mime_types: Vec<String>,
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

fn default_allowed_extensions() -> Vec<String> {
    vec!["csv".to_string()]
}

fn default_allowed_mime_types() -> Vec<String> {
    vec![
        "text/csv".to_string(),
        "application/vnd.ms-excel".to_string(),
    ]
}

fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            allowed_extensions: default_allowed_extensions(),
            allowed_mime_types: default_allowed_mime_types(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

impl UploadConfig {
    #[doc = "True when the file name has an extension and that extension (case-insensitive) is allowed"]
    pub fn is_allowed_extension(&self, file_name: &str) -> bool {
        match file_name.rsplit_once('.') {
            Some((_, ext)) => {
                let ext: String = ext.to_lowercase();
                self.allowed_extensions.iter().any(|allowed| *allowed == ext)
            }
            None => false,
        }
    }

    #[doc = "Exact match of the declared content type against the allowed MIME types"]
    pub fn is_allowed_mime_type(&self, content_type: Option<&str>) -> bool {
        content_type
            .map(|ct| self.allowed_mime_types.iter().any(|allowed| allowed == ct))
            .unwrap_or(false)
    }
}
