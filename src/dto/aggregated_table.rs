use crate::common::*;

#[derive(Debug, Clone, PartialEq, Getters, new)]
#[getset(get = "pub")]
pub struct AggregatedRow<K> {
    key: K,
    values: Vec<Option<f64>>,
}

#[doc = r#"
    One derived view of the transactions: a key column (`Date` month-ends or `Category`)
    plus one reduced value per numeric column. `values` of every row line up with
    `value_columns`; `None` is a reduction with no input (mean of nothing).
"#]
#[derive(Debug, Clone, PartialEq, Getters, new)]
#[getset(get = "pub")]
pub struct AggregatedTable<K> {
    key_column: String,
    value_columns: Vec<String>,
    rows: Vec<AggregatedRow<K>>,
}

impl<K: PartialEq> AggregatedTable<K> {
    #[doc = "`(key, value)` pairs of one value column, in row order"]
    pub fn column(&self, column: &str) -> Option<Vec<(&K, Option<f64>)>> {
        let idx: usize = self.value_columns.iter().position(|c| c == column)?;

        Some(
            self.rows
                .iter()
                .map(|row| (&row.key, row.values.get(idx).copied().flatten()))
                .collect(),
        )
    }

    #[doc = "Value of `column` for the row keyed `key`"]
    #[allow(dead_code)]
    pub fn value_of(&self, key: &K, column: &str) -> Option<f64> {
        let idx: usize = self.value_columns.iter().position(|c| c == column)?;

        self.rows
            .iter()
            .find(|row| row.key == *key)
            .and_then(|row| row.values.get(idx).copied().flatten())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
