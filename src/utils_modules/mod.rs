pub mod csv_utils;
pub mod file_utils;
pub mod io_utils;
pub mod logger_utils;
pub mod time_utils;
