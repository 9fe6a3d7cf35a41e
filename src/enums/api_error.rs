use crate::common::*;

#[doc = r#"
    Every failure an HTTP route can report.

    Client mistakes answer 400 with an `error` body, absent resources answer 404 with a
    `message` body, and anything that broke while reading, aggregating or drawing answers
    500 with the raw error text.
"#]
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("No file uploaded")]
    NoFilePart,
    #[error("No selected file")]
    NoSelectedFile,
    #[error("File not allowed. Please upload csv file.")]
    FileNotAllowed,
    #[error("Invalid CSV structure")]
    InvalidCsvStructure,
    #[error("Malformed upload: {0}")]
    MalformedUpload(String),
    #[error("Unknown chart name: {0}")]
    UnknownChart(String),
    #[error("CSV file not found")]
    SourceCsvNotFound,
    #[error("Chart not found")]
    ChartNotFound,
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NoFilePart
            | ApiError::NoSelectedFile
            | ApiError::FileNotAllowed
            | ApiError::InvalidCsvStructure
            | ApiError::MalformedUpload(_)
            | ApiError::UnknownChart(_) => StatusCode::BAD_REQUEST,
            ApiError::SourceCsvNotFound | ApiError::ChartNotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    #[doc = "Body of the JSON response for this error"]
    pub fn to_body(&self) -> Value {
        match self {
            ApiError::SourceCsvNotFound | ApiError::ChartNotFound => {
                json!({ "message": self.to_string() })
            }
            _ => json!({ "error": self.to_string() }),
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal(format!("{:#}", err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.to_body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_errors_use_message_key() {
        assert_eq!(
            ApiError::ChartNotFound.to_body(),
            json!({ "message": "Chart not found" })
        );
        assert_eq!(
            ApiError::SourceCsvNotFound.to_body(),
            json!({ "message": "CSV file not found" })
        );
        assert_eq!(ApiError::ChartNotFound.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn client_and_server_errors_use_error_key() {
        assert_eq!(
            ApiError::InvalidCsvStructure.to_body(),
            json!({ "error": "Invalid CSV structure" })
        );
        assert_eq!(ApiError::FileNotAllowed.status_code(), StatusCode::BAD_REQUEST);

        let internal: ApiError = anyhow!("disk full").context("write failed").into();
        assert_eq!(internal.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(internal.to_body(), json!({ "error": "write failed: disk full" }));
    }
}
