use crate::common::*;

use crate::dto::uploaded_file::*;
use crate::enums::api_error::*;

#[async_trait]
pub trait UploadService: Send + Sync {
    #[doc = "Checks an uploaded file and, when it is acceptable, stores it in the upload directory"]
    async fn store_upload(&self, upload: UploadedFile) -> Result<PathBuf, ApiError>;
}
