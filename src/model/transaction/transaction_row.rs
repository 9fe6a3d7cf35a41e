use crate::common::*;

#[doc = r#"
    One parsed CSV line.

    `date` and `category` are `None` for empty cells; such rows are left out of the
    groupings keyed on that column. `values` lines up with the owning table's
    `numeric_columns`, `None` marking an empty cell.
"#]
#[derive(Debug, Clone, PartialEq, Getters, new)]
#[getset(get = "pub")]
pub struct TransactionRow {
    date: Option<NaiveDate>,
    category: Option<String>,
    values: Vec<Option<f64>>,
}
