use crate::common::*;

const WINDOWS_DEVICE_FILES: [&str; 22] = [
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

#[doc = r#"
    Turns a client supplied file name into one that is safe to join onto a directory.

    1. Non-ASCII characters are dropped
    2. Path separators become spaces, then whitespace runs collapse into `_`
    3. Anything outside `[A-Za-z0-9_.-]` is removed
    4. Leading and trailing `.` / `_` are stripped
    5. Windows device names get a `_` prefix

    The result may be empty, which callers must treat as an unusable name.
"#]
pub fn secure_filename(file_name: &str) -> String {
    let ascii: String = file_name
        .chars()
        .filter(char::is_ascii)
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();

    let joined: String = ascii.split_whitespace().collect::<Vec<&str>>().join("_");

    let filtered: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect();

    let trimmed: &str = filtered.trim_matches(|c| c == '.' || c == '_');

    let stem: &str = trimmed.split('.').next().unwrap_or_default();
    if WINDOWS_DEVICE_FILES.contains(&stem.to_uppercase().as_str()) {
        return format!("_{}", trimmed);
    }

    trimmed.to_string()
}

#[doc = "True when `file_name` names a single entry directly inside a directory"]
pub fn is_plain_file_name(file_name: &str) -> bool {
    !file_name.is_empty()
        && file_name != "."
        && file_name != ".."
        && !file_name.contains(['/', '\\', '\0'])
}

#[doc = "HTTP content type served for a stored file, picked by extension"]
pub fn content_type_for(file_name: &str) -> &'static str {
    let ext: String = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "svg" => "image/svg+xml",
        "csv" => "text/csv",
        _ => "application/octet-stream",
    }
}
