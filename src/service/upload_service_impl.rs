use crate::common::*;

use crate::dto::uploaded_file::*;
use crate::enums::api_error::*;
use crate::model::configs::upload_config::*;
use crate::traits::repository_traits::file_repository::*;
use crate::traits::service_traits::upload_service::*;
use crate::utils_modules::{csv_utils::*, file_utils::*};

#[derive(Debug, new)]
pub struct UploadServiceImpl<R: FileRepository> {
    upload_repository: R,
    upload_config: UploadConfig,
}

#[async_trait]
impl<R: FileRepository> UploadService for UploadServiceImpl<R> {
    #[doc = r#"
        Accepts or rejects one uploaded file.

        1. An empty file name means nothing was selected
        2. The extension and the declared MIME type must both be allowed
        3. The header is checked in memory, so a rejected file never reaches the disk
        4. The sanitized name is written to the upload directory

        # Returns
        * `Ok(PathBuf)` - where the file was stored
        * `Err(ApiError)` - the rejection reason, or `Internal` when reading/writing failed
    "#]
    async fn store_upload(&self, upload: UploadedFile) -> Result<PathBuf, ApiError> {
        let file_name: &str = upload.file_name();

        if file_name.is_empty() {
            return Err(ApiError::NoSelectedFile);
        }

        if !self.upload_config.is_allowed_extension(file_name)
            || !self
                .upload_config
                .is_allowed_mime_type(upload.content_type().as_deref())
        {
            warn!(
                "[UploadServiceImpl->store_upload] Rejected '{}' ({:?})",
                file_name,
                upload.content_type()
            );
            return Err(ApiError::FileNotAllowed);
        }

        let safe_name: String = secure_filename(file_name);
        if safe_name.is_empty() || !self.upload_config.is_allowed_extension(&safe_name) {
            warn!(
                "[UploadServiceImpl->store_upload] '{}' has no usable name after sanitizing",
                file_name
            );
            return Err(ApiError::FileNotAllowed);
        }

        let header: Option<Vec<String>> = read_csv_header(upload.bytes()).map_err(|e| {
            error!("[UploadServiceImpl->store_upload] {:?}", e);
            ApiError::Internal(e.to_string())
        })?;

        if !validate_csv_structure(header.as_deref()) {
            warn!(
                "[UploadServiceImpl->store_upload] Invalid CSV structure in '{}': {:?}",
                safe_name, header
            );
            return Err(ApiError::InvalidCsvStructure);
        }

        let stored_path: PathBuf = self
            .upload_repository
            .write_file(&safe_name, upload.bytes())
            .await
            .map_err(|e| {
                error!("[UploadServiceImpl->store_upload] {:?}", e);
                ApiError::from(e)
            })?;

        info!(
            "Stored upload '{}' ({} bytes) at {:?}",
            safe_name,
            upload.bytes().len(),
            stored_path
        );

        Ok(stored_path)
    }
}
