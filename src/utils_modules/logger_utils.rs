use crate::common::*;

use crate::env_configuration::env_config::*;

#[doc = "Line format shared by the log files and stderr"]
fn log_line_format(
    w: &mut dyn Write,
    now: &mut DeferredNow,
    record: &Record,
) -> Result<(), std::io::Error> {
    write!(
        w,
        "[{}] [{}] T[{}] [{}:{}] {}",
        now.format("%Y-%m-%d %H:%M:%S%.3f"),
        record.level(),
        std::thread::current().name().unwrap_or("<unnamed>"),
        record.module_path().unwrap_or("<unnamed>"),
        record.line().unwrap_or(0),
        record.args()
    )
}

#[doc = r#"
    Installs the global logger.

    1. Log level comes from `RUST_LOG`, `info` when unset
    2. Files are written under `LOG_DIRECTORY` and rotated daily, keeping the last 30 files
    3. Records at info level and above are duplicated to stderr

    The returned handle must stay alive for as long as the process logs.

    # Panics
    When the logger specification is invalid or the log directory cannot be created
"#]
pub fn set_global_logger() -> LoggerHandle {
    Logger::try_with_env_or_str("info")
        .unwrap_or_else(|e| panic!("[set_global_logger] Invalid log specification: {:?}", e))
        .log_to_file(
            FileSpec::default()
                .directory(LOG_DIRECTORY.as_str())
                .basename("finance_chart_server"),
        )
        .rotate(
            Criterion::Age(Age::Day),
            Naming::Timestamps,
            Cleanup::KeepLogFiles(30),
        )
        .format_for_files(log_line_format)
        .format_for_stderr(log_line_format)
        .duplicate_to_stderr(Duplicate::Info)
        .start()
        .unwrap_or_else(|e| panic!("[set_global_logger] Failed to start the logger: {:?}", e))
}
