pub mod server_config;
pub mod storage_config;
pub mod total_config;
pub mod upload_config;
