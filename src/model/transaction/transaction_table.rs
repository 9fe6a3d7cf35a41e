use crate::common::*;

use crate::model::transaction::transaction_row::*;

use crate::utils_modules::{io_utils::*, time_utils::*};

pub const DATE_COLUMN: &str = "Date";
pub const CATEGORY_COLUMN: &str = "Category";
pub const AMOUNT_COLUMN: &str = "Amount";

#[doc = r#"
    Transactions parsed out of the uploaded CSV.

    Every column besides `Date` and `Category` whose non-empty cells all parse as
    numbers is kept as a numeric column (`Amount` always among them); other columns
    are dropped.
"#]
#[derive(Debug, Clone, PartialEq, Getters)]
#[getset(get = "pub")]
pub struct TransactionTable {
    numeric_columns: Vec<String>,
    rows: Vec<TransactionRow>,
}

#[doc = "Parses a numeric cell. Empty cells and NaN spellings are missing values."]
fn parse_numeric_cell(cell: &str) -> Result<Option<f64>, std::num::ParseFloatError> {
    let trimmed: &str = cell.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let value: f64 = trimmed.parse::<f64>()?;
    Ok(if value.is_nan() { None } else { Some(value) })
}

impl TransactionTable {
    #[doc = r#"
        Builds the table from raw CSV bytes.

        1. Strips a UTF-8 BOM and reads the header
        2. Locates `Date`, `Category` and `Amount` (first occurrence of each)
        3. Parses every `Date` with `%d/%m/%Y`; one bad value fails the whole parse
        4. Detects numeric columns and converts their cells

        # Errors
        - a required column is missing
        - a record cannot be read, or has more fields than the header
        - a `Date` value does not match the format
        - `Amount` holds a non-numeric value
    "#]
    pub fn from_csv_bytes(bytes: &[u8]) -> anyhow::Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(strip_utf8_bom(bytes));

        let headers: Vec<String> = reader
            .headers()
            .context("[TransactionTable->from_csv_bytes] Failed to read the CSV header")?
            .iter()
            .map(str::to_string)
            .collect();

        let column_index = |name: &str| -> anyhow::Result<usize> {
            headers.iter().position(|h| h == name).ok_or_else(|| {
                anyhow!(
                    "[TransactionTable->from_csv_bytes] Missing required column '{}'",
                    name
                )
            })
        };

        let date_idx: usize = column_index(DATE_COLUMN)?;
        let category_idx: usize = column_index(CATEGORY_COLUMN)?;
        let amount_idx: usize = column_index(AMOUNT_COLUMN)?;

        let mut records: Vec<StringRecord> = Vec::new();
        for (line_no, record) in reader.records().enumerate() {
            let record: StringRecord = record.with_context(|| {
                format!(
                    "[TransactionTable->from_csv_bytes] Failed to read data row {}",
                    line_no + 1
                )
            })?;

            if record.len() > headers.len() {
                return Err(anyhow!(
                    "[TransactionTable->from_csv_bytes] Expected {} fields in data row {}, saw {}",
                    headers.len(),
                    line_no + 1,
                    record.len()
                ));
            }

            records.push(record);
        }

        /* Numeric column detection: all non-empty cells must parse */
        let numeric_indices: Vec<usize> = (0..headers.len())
            .filter(|idx| *idx != date_idx && *idx != category_idx)
            .filter(|idx| {
                records
                    .iter()
                    .all(|record| parse_numeric_cell(record.get(*idx).unwrap_or_default()).is_ok())
            })
            .collect();

        if !numeric_indices.contains(&amount_idx) {
            let bad_value: &str = records
                .iter()
                .filter_map(|record| record.get(amount_idx))
                .find(|cell| parse_numeric_cell(cell).is_err())
                .unwrap_or_default();

            return Err(anyhow!(
                "[TransactionTable->from_csv_bytes] Column '{}' is not numeric (value '{}')",
                AMOUNT_COLUMN,
                bad_value
            ));
        }

        let mut rows: Vec<TransactionRow> = Vec::with_capacity(records.len());

        for (line_no, record) in records.iter().enumerate() {
            let date_cell: &str = record.get(date_idx).unwrap_or_default();
            let date: Option<NaiveDate> = if date_cell.is_empty() {
                None
            } else {
                Some(parse_transaction_date(date_cell).with_context(|| {
                    format!(
                        "[TransactionTable->from_csv_bytes] Invalid Date in data row {}",
                        line_no + 1
                    )
                })?)
            };

            let category: Option<String> = record
                .get(category_idx)
                .filter(|cell| !cell.is_empty())
                .map(str::to_string);

            let mut values: Vec<Option<f64>> = Vec::with_capacity(numeric_indices.len());
            for idx in &numeric_indices {
                values.push(parse_numeric_cell(record.get(*idx).unwrap_or_default())?);
            }

            rows.push(TransactionRow::new(date, category, values));
        }

        let numeric_columns: Vec<String> = numeric_indices
            .iter()
            .map(|idx| headers[*idx].clone())
            .collect();

        Ok(TransactionTable {
            numeric_columns,
            rows,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_rows_and_detects_numeric_columns() {
        let csv = "\u{feff}Date,Category,Amount,Note,Tax\n\
                   01/01/2020,Food,10.5,lunch,1\n\
                   15/01/2020,Rent,-200,,\n";

        let table = TransactionTable::from_csv_bytes(csv.as_bytes()).unwrap();

        assert_eq!(
            table.numeric_columns(),
            &vec!["Amount".to_string(), "Tax".to_string()]
        );
        assert_eq!(table.rows().len(), 2);
        assert_eq!(
            table.rows()[0],
            TransactionRow::new(
                NaiveDate::from_ymd_opt(2020, 1, 1),
                Some("Food".to_string()),
                vec![Some(10.5), Some(1.0)]
            )
        );
        assert_eq!(table.rows()[1].values(), &vec![Some(-200.0), None]);
    }

    #[test]
    fn unparseable_date_fails_the_whole_table() {
        let csv = "Date,Category,Amount\n01/01/2020,Food,10\n2020-01-02,Food,20\n";

        let err = TransactionTable::from_csv_bytes(csv.as_bytes()).unwrap_err();

        assert!(format!("{:#}", err).contains("2020-01-02"));
    }

    #[test]
    fn empty_date_and_category_cells_are_missing_values() {
        let csv = "Date,Category,Amount\n,Food,10\n02/01/2020,,20\n";

        let table = TransactionTable::from_csv_bytes(csv.as_bytes()).unwrap();

        assert_eq!(table.rows()[0].date(), &None);
        assert_eq!(table.rows()[1].category(), &None);
    }

    #[test]
    fn non_numeric_amount_is_an_error() {
        let csv = "Date,Category,Amount\n01/01/2020,Food,ten\n";
        assert!(TransactionTable::from_csv_bytes(csv.as_bytes()).is_err());
    }

    #[test]
    fn missing_required_column_is_an_error() {
        let csv = "Date,Amount\n01/01/2020,10\n";
        assert!(TransactionTable::from_csv_bytes(csv.as_bytes()).is_err());
    }

    #[test]
    fn header_only_file_is_an_empty_table() {
        let table = TransactionTable::from_csv_bytes(b"Date,Category,Amount\n").unwrap();
        assert!(table.is_empty());
        assert_eq!(table.numeric_columns(), &vec!["Amount".to_string()]);
    }
}
