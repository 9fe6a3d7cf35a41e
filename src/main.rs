/*
Description : Accepts a transactions CSV upload, aggregates it by month and by category,
              and serves the resulting charts over HTTP.

History     : [v.1.0.0] first create
*/

mod common;
mod external_deps;
mod prelude;
use common::*;

mod repository;
use repository::file_repository_impl::*;

mod env_configuration;
use env_configuration::env_config::*;

mod traits;
use traits::repository_traits::file_repository::*;

mod model;
use model::configs::total_config::*;

mod dto;
mod enums;

mod utils_modules;
use utils_modules::logger_utils::*;

mod service;
use service::{
    aggregation_service_impl::*, chart_service_impl::*, report_service_impl::*,
    upload_service_impl::*,
};

mod controller;
use controller::main_controller::*;

#[tokio::main]
async fn main() {
    /* Global logger and initial setup */
    dotenv().ok();
    let _logger_handle: LoggerHandle = set_global_logger();

    info!("Finance chart server start!");

    let total_config: TotalConfig =
        TotalConfig::load(&SERVER_CONFIG_PATH).unwrap_or_else(|e| {
            let err_msg: &str = "[main] Failed to load the server configuration.";
            error!("{} {:?}", err_msg, e);
            panic!("{} {:?}", err_msg, e)
        });

    /* Filesystem storage */
    let upload_repository: FileRepositoryImpl =
        FileRepositoryImpl::new(total_config.storage().upload_dir().clone());
    let output_repository: FileRepositoryImpl =
        FileRepositoryImpl::new(total_config.storage().output_dir().clone());

    for repository in [&upload_repository, &output_repository] {
        repository.ensure_root_dir().await.unwrap_or_else(|e| {
            let err_msg: &str = "[main] Failed to prepare a storage directory.";
            error!("{} {:?}", err_msg, e);
            panic!("{} {:?}", err_msg, e)
        });
    }

    info!(
        "Uploads: {:?}, charts: {:?}",
        upload_repository.root_dir(),
        output_repository.root_dir()
    );

    /* Dependency injection */
    let upload_service: UploadServiceImpl<FileRepositoryImpl> =
        UploadServiceImpl::new(upload_repository.clone(), total_config.upload().clone());

    let report_service: ReportServiceImpl<
        AggregationServiceImpl,
        ChartServiceImpl,
        FileRepositoryImpl,
    > = ReportServiceImpl::new(
        AggregationServiceImpl::new(),
        ChartServiceImpl::new(),
        upload_repository,
        output_repository,
        total_config.storage().source_file_name().clone(),
    );

    let main_controller: MainController<
        UploadServiceImpl<FileRepositoryImpl>,
        ReportServiceImpl<AggregationServiceImpl, ChartServiceImpl, FileRepositoryImpl>,
    > = MainController::new(upload_service, report_service);

    let app: Router = main_controller.router(*total_config.upload().max_upload_bytes());

    let bind_addr: String = total_config.server().bind_addr();
    let listener: TcpListener = TcpListener::bind(&bind_addr).await.unwrap_or_else(|e| {
        let err_msg: String = format!("[main] Failed to bind {}.", bind_addr);
        error!("{} {:?}", err_msg, e);
        panic!("{} {:?}", err_msg, e)
    });

    info!("Listening on {}", bind_addr);

    axum::serve(listener, app).await.unwrap_or_else(|e| {
        error!("{:?}", e);
        panic!("{:?}", e)
    });
}
