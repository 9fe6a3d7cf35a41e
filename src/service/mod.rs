pub mod aggregation_service_impl;
pub mod chart_service_impl;
pub mod report_service_impl;
pub mod upload_service_impl;
