use crate::common::*;

use crate::dto::uploaded_file::*;
use crate::enums::{api_error::*, chart_kind::*};
use crate::traits::service_traits::{report_service::*, upload_service::*};
use crate::utils_modules::file_utils::*;

#[doc = "Multipart field that carries the uploaded CSV"]
const UPLOAD_FIELD_NAME: &str = "file";

#[derive(Debug, new)]
pub struct MainController<U: UploadService, R: ReportService> {
    upload_service: U,
    report_service: R,
}

impl<U, R> MainController<U, R>
where
    U: UploadService + 'static,
    R: ReportService + 'static,
{
    #[doc = r#"
        Builds the HTTP router.

        - `POST /upload` - multipart upload of a transactions CSV
        - `GET  /process-and-chart` - renders every chart from the source CSV
        - `GET  /process-and-chart/{chart_name}` - renders one chart
        - `GET  /charts/{chart_name}` - serves a rendered chart image
        - `GET  /health` - liveness probe

        CORS is open to every origin. Request bodies are capped at `max_upload_bytes`.
    "#]
    pub fn router(self, max_upload_bytes: usize) -> Router {
        Router::new()
            .route("/upload", post(upload_file::<U, R>))
            .route("/process-and-chart", get(process_all_charts::<U, R>))
            .route(
                "/process-and-chart/{chart_name}",
                get(process_and_chart::<U, R>),
            )
            .route("/charts/{chart_name}", get(serve_chart::<U, R>))
            .route("/health", get(health_check))
            .layer(DefaultBodyLimit::max(max_upload_bytes))
            .layer(CorsLayer::permissive())
            .with_state(Arc::new(self))
    }

    #[doc = "Pulls the `file` part out of the request, buffering its bytes"]
    async fn extract_upload(&self, mut multipart: Multipart) -> Result<UploadedFile, ApiError> {
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::MalformedUpload(e.body_text()))?
        {
            if field.name() != Some(UPLOAD_FIELD_NAME) {
                continue;
            }

            let file_name: String = field.file_name().unwrap_or_default().to_string();
            let content_type: Option<String> = field.content_type().map(str::to_string);
            let bytes: Vec<u8> = field
                .bytes()
                .await
                .map_err(|e| ApiError::MalformedUpload(e.body_text()))?
                .to_vec();

            return Ok(UploadedFile::new(file_name, content_type, bytes));
        }

        Err(ApiError::NoFilePart)
    }

    #[doc = "Runs aggregation and rendering for `kinds`, failing with 404 when the source CSV is absent"]
    async fn process_charts(&self, kinds: &[ChartKind]) -> Result<Json<Value>, ApiError> {
        if !self.report_service.source_csv_exists().await {
            warn!("[MainController->process_charts] Source CSV is not uploaded yet");
            return Err(ApiError::SourceCsvNotFound);
        }

        let chart_paths: Vec<PathBuf> = self
            .report_service
            .generate_charts(kinds)
            .await
            .map_err(|e| {
                error!("[MainController->process_charts] {:?}", e);
                ApiError::from(e)
            })?;

        info!("Generated {} chart(s): {:?}", chart_paths.len(), chart_paths);

        Ok(Json(json!({ "message": "Graphs are processed and saved" })))
    }
}

type SharedController<U, R> = State<Arc<MainController<U, R>>>;

async fn upload_file<U, R>(
    State(controller): SharedController<U, R>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<Value>, ApiError>
where
    U: UploadService + 'static,
    R: ReportService + 'static,
{
    info!("Endpoint /upload called");

    /* A request that is not multipart at all carries no file part */
    let multipart: Multipart = multipart.map_err(|e| {
        warn!("[upload_file] Not a multipart request: {}", e);
        ApiError::NoFilePart
    })?;

    let upload: UploadedFile = controller.extract_upload(multipart).await?;
    controller.upload_service.store_upload(upload).await?;

    Ok(Json(
        json!({ "message": "File uploaded and validated successfully" }),
    ))
}

async fn process_and_chart<U, R>(
    State(controller): SharedController<U, R>,
    AxumPath(chart_name): AxumPath<String>,
) -> Result<Json<Value>, ApiError>
where
    U: UploadService + 'static,
    R: ReportService + 'static,
{
    info!("Endpoint /process-and-chart/{} called", chart_name);

    let kind: ChartKind = chart_name
        .parse::<ChartKind>()
        .map_err(|_| ApiError::UnknownChart(chart_name.clone()))?;

    controller.process_charts(&[kind]).await
}

async fn process_all_charts<U, R>(
    State(controller): SharedController<U, R>,
) -> Result<Json<Value>, ApiError>
where
    U: UploadService + 'static,
    R: ReportService + 'static,
{
    info!("Endpoint /process-and-chart called");

    controller.process_charts(&ChartKind::ALL).await
}

async fn serve_chart<U, R>(
    State(controller): SharedController<U, R>,
    AxumPath(chart_name): AxumPath<String>,
) -> Result<Response, ApiError>
where
    U: UploadService + 'static,
    R: ReportService + 'static,
{
    info!("Endpoint /charts/{} called", chart_name);

    match controller.report_service.load_chart_image(&chart_name).await {
        Ok(Some(bytes)) => Ok((
            [(header::CONTENT_TYPE, content_type_for(&chart_name))],
            bytes,
        )
            .into_response()),
        Ok(None) => Err(ApiError::ChartNotFound),
        Err(e) => {
            error!("[serve_chart] {:?}", e);
            Err(ApiError::from(e))
        }
    }
}

async fn health_check() -> Json<Value> {
    Json(json!({ "message": "ok" }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::configs::upload_config::*;
    use crate::repository::file_repository_impl::*;
    use crate::service::{
        aggregation_service_impl::*, chart_service_impl::*, report_service_impl::*,
        upload_service_impl::*,
    };
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use pretty_assertions::assert_eq;
    use tower::ServiceExt;

    const BOUNDARY: &str = "X-FINANCE-CHART-BOUNDARY";
    const VALID_CSV: &str = "Date,Category,Amount\n\
                             01/01/2020,A,10\n\
                             02/01/2020,A,20\n\
                             03/01/2020,B,30\n";

    fn app(root: &Path) -> Router {
        let upload_dir = root.join("uploads");
        let output_dir = root.join("output");

        let upload_service = UploadServiceImpl::new(
            FileRepositoryImpl::new(upload_dir.clone()),
            UploadConfig::default(),
        );
        let report_service = ReportServiceImpl::new(
            AggregationServiceImpl::new(),
            ChartServiceImpl::new(),
            FileRepositoryImpl::new(upload_dir),
            FileRepositoryImpl::new(output_dir),
            "5_years_financial_data.csv".to_string(),
        );

        MainController::new(upload_service, report_service).router(1024 * 1024)
    }

    fn multipart_request(field: &str, file_name: &str, content_type: &str, body: &str) -> Request<Body> {
        let payload = format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n{body}\r\n--{b}--\r\n",
            b = BOUNDARY,
        );

        Request::builder()
            .method("POST")
            .uri("/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(payload))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes().to_vec();
        (status, bytes)
    }

    async fn send_json(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let (status, bytes) = send(app, request).await;
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn unknown_chart_image_is_not_found() {
        let dir = tempfile::tempdir().unwrap();

        let (status, body) = send_json(app(dir.path()), get("/charts/doesnotexist.jpg")).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "message": "Chart not found" }));
    }

    #[tokio::test]
    async fn stored_chart_is_served_as_jpeg() {
        let dir = tempfile::tempdir().unwrap();
        let output_dir = dir.path().join("output");
        std::fs::create_dir_all(&output_dir).unwrap();
        std::fs::write(output_dir.join("average_spend_by_category.jpg"), b"\xFF\xD8img").unwrap();

        let response = app(dir.path())
            .oneshot(get("/charts/average_spend_by_category.jpg"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "image/jpeg"
        );
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"\xFF\xD8img");
    }

    #[tokio::test]
    async fn process_without_source_csv_is_not_found() {
        let dir = tempfile::tempdir().unwrap();

        let (status, body) = send_json(
            app(dir.path()),
            get("/process-and-chart/monthly_expenditure_over_time.jpg"),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "message": "CSV file not found" }));

        let (status, _) = send_json(app(dir.path()), get("/process-and-chart")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn process_rejects_unknown_chart_names() {
        let dir = tempfile::tempdir().unwrap();

        let (status, body) =
            send_json(app(dir.path()), get("/process-and-chart/pie_chart.jpg")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Unknown chart name: pie_chart.jpg" }));
    }

    #[tokio::test]
    async fn process_reports_broken_source_csv_as_server_error() {
        let dir = tempfile::tempdir().unwrap();
        let upload_dir = dir.path().join("uploads");
        std::fs::create_dir_all(&upload_dir).unwrap();
        std::fs::write(
            upload_dir.join("5_years_financial_data.csv"),
            "Date,Category,Amount\nnot-a-date,A,1\n",
        )
        .unwrap();

        let (status, body) = send_json(
            app(dir.path()),
            get("/process-and-chart/total_spend_by_category_over_5_years.jpg"),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].as_str().unwrap().contains("not-a-date"));
    }

    #[tokio::test]
    async fn upload_accepts_a_valid_csv() {
        let dir = tempfile::tempdir().unwrap();

        let (status, body) = send_json(
            app(dir.path()),
            multipart_request("file", "5_years_financial_data.csv", "text/csv", VALID_CSV),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({ "message": "File uploaded and validated successfully" })
        );
        assert_eq!(
            std::fs::read_to_string(dir.path().join("uploads").join("5_years_financial_data.csv"))
                .unwrap(),
            VALID_CSV
        );
    }

    #[tokio::test]
    async fn upload_rejects_non_csv_extension_without_writing() {
        let dir = tempfile::tempdir().unwrap();

        let (status, body) = send_json(
            app(dir.path()),
            multipart_request("file", "data.xlsx", "text/csv", VALID_CSV),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({ "error": "File not allowed. Please upload csv file." })
        );
        assert!(!dir.path().join("uploads").join("data.xlsx").exists());
    }

    #[tokio::test]
    async fn upload_rejects_missing_columns_and_cleans_up() {
        let dir = tempfile::tempdir().unwrap();

        let (status, body) = send_json(
            app(dir.path()),
            multipart_request("file", "data.csv", "text/csv", "Date,Amount\n01/01/2020,5\n"),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Invalid CSV structure" }));
        assert!(!dir.path().join("uploads").join("data.csv").exists());
    }

    #[tokio::test]
    async fn upload_without_file_part_or_name_is_rejected() {
        let dir = tempfile::tempdir().unwrap();

        let (status, body) = send_json(
            app(dir.path()),
            multipart_request("attachment", "data.csv", "text/csv", VALID_CSV),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "No file uploaded" }));

        let (status, body) = send_json(
            app(dir.path()),
            multipart_request("file", "", "text/csv", VALID_CSV),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "No selected file" }));

        let plain = Request::builder()
            .method("POST")
            .uri("/upload")
            .body(Body::from("Date,Category,Amount\n"))
            .unwrap();
        let (status, body) = send_json(app(dir.path()), plain).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "No file uploaded" }));
    }

    #[tokio::test]
    async fn cors_allows_any_origin() {
        let dir = tempfile::tempdir().unwrap();
        let request = Request::builder()
            .uri("/health")
            .header(header::ORIGIN, "http://localhost:3000")
            .body(Body::empty())
            .unwrap();

        let response = app(dir.path()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .unwrap(),
            "*"
        );
    }

    #[tokio::test]
    #[ignore = "draws text, needs system fonts"]
    async fn upload_then_process_then_fetch_every_chart() {
        let dir = tempfile::tempdir().unwrap();

        let (status, _) = send_json(
            app(dir.path()),
            multipart_request("file", "5_years_financial_data.csv", "text/csv", VALID_CSV),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send_json(app(dir.path()), get("/process-and-chart")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "message": "Graphs are processed and saved" }));

        for kind in ChartKind::ALL {
            let (status, bytes) =
                send(app(dir.path()), get(&format!("/charts/{}", kind.file_name()))).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
        }
    }
}
