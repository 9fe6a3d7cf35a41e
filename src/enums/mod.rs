pub mod api_error;
pub mod chart_kind;
