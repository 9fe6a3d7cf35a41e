use crate::common::*;

use crate::utils_modules::io_utils::*;

#[doc = "Columns every uploaded transaction CSV must carry"]
pub const REQUIRED_COLUMNS: [&str; 3] = ["Date", "Category", "Amount"];

#[doc = r#"
    Checks the header of an uploaded CSV.

    True iff every name in `REQUIRED_COLUMNS` appears in `header`. Extra columns and
    any ordering are accepted. Matching is exact: no case folding, no trimming.
    A missing header (`None`) never validates.
"#]
pub fn validate_csv_structure(header: Option<&[String]>) -> bool {
    match header {
        Some(columns) => REQUIRED_COLUMNS
            .iter()
            .all(|required| columns.iter().any(|column| column == required)),
        None => false,
    }
}

#[doc = r#"
    Reads the header row of CSV bytes without touching the disk.

    A leading UTF-8 BOM is dropped. Returns `Ok(None)` when the content holds no record
    at all. Content that is not UTF-8 or a malformed first record is an error.
"#]
pub fn read_csv_header(bytes: &[u8]) -> anyhow::Result<Option<Vec<String>>> {
    let content: &str = std::str::from_utf8(strip_utf8_bom(bytes))
        .map_err(|e| anyhow!("'utf-8' codec can't decode the uploaded file: {}", e))?;

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut record: StringRecord = StringRecord::new();
    if !reader.read_record(&mut record)? {
        return Ok(None);
    }

    Ok(Some(record.iter().map(str::to_string).collect()))
}
