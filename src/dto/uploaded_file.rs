use crate::common::*;

#[doc = "The `file` part of an upload request, fully buffered"]
#[derive(Debug, Clone, Getters, new)]
#[getset(get = "pub")]
pub struct UploadedFile {
    file_name: String,
    content_type: Option<String>,
    bytes: Vec<u8>,
}
