pub mod aggregated_table;
pub mod chart_series;
pub mod uploaded_file;
