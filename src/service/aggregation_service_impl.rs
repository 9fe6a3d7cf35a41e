use crate::common::*;

use crate::dto::{aggregated_table::*, chart_series::*};
use crate::enums::chart_kind::*;
use crate::model::transaction::{transaction_row::*, transaction_table::*};
use crate::traits::service_traits::aggregation_service::*;
use crate::utils_modules::time_utils::*;

#[doc = "Label format of the month-end x values on the monthly chart"]
const MONTH_LABEL_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reduction {
    Sum,
    Mean,
}

#[derive(Debug, Clone, Default)]
struct ColumnAccumulator {
    sums: Vec<f64>,
    counts: Vec<usize>,
}

impl ColumnAccumulator {
    fn with_columns(n: usize) -> Self {
        ColumnAccumulator {
            sums: vec![0.0; n],
            counts: vec![0; n],
        }
    }

    fn add(&mut self, values: &[Option<f64>]) {
        for (idx, value) in values.iter().enumerate() {
            if let Some(v) = value {
                self.sums[idx] += v;
                self.counts[idx] += 1;
            }
        }
    }

    #[doc = "Sum of nothing is 0, mean of nothing is missing"]
    fn reduce(&self, reduction: Reduction) -> Vec<Option<f64>> {
        self.sums
            .iter()
            .zip(&self.counts)
            .map(|(sum, count)| match reduction {
                Reduction::Sum => Some(*sum),
                Reduction::Mean if *count == 0 => None,
                Reduction::Mean => Some(sum / *count as f64),
            })
            .collect()
    }
}

#[derive(Debug, Clone, Default, new)]
pub struct AggregationServiceImpl;

impl AggregationServiceImpl {
    #[doc = "Group-by-Category reduction. Rows without a category are skipped, keys come out sorted."]
    fn group_by_category(
        &self,
        table: &TransactionTable,
        reduction: Reduction,
    ) -> AggregatedTable<String> {
        let column_cnt: usize = table.numeric_columns().len();
        let mut groups: BTreeMap<&str, ColumnAccumulator> = BTreeMap::new();

        for row in table.rows() {
            let category: &str = match row.category() {
                Some(category) => category.as_str(),
                None => continue,
            };

            groups
                .entry(category)
                .or_insert_with(|| ColumnAccumulator::with_columns(column_cnt))
                .add(row.values());
        }

        let rows: Vec<AggregatedRow<String>> = groups
            .into_iter()
            .map(|(category, acc)| AggregatedRow::new(category.to_string(), acc.reduce(reduction)))
            .collect();

        AggregatedTable::new(
            CATEGORY_COLUMN.to_string(),
            table.numeric_columns().clone(),
            rows,
        )
    }

    fn amount_series<K, F>(
        &self,
        table: &AggregatedTable<K>,
        kind: ChartKind,
        label_of: F,
    ) -> anyhow::Result<ChartSeries>
    where
        K: PartialEq,
        F: Fn(&K) -> String,
    {
        let amounts: Vec<(&K, Option<f64>)> = table.column(AMOUNT_COLUMN).ok_or_else(|| {
            anyhow!(
                "[AggregationServiceImpl->amount_series] Column '{}' is missing from the {} aggregation",
                AMOUNT_COLUMN,
                kind
            )
        })?;

        info!("{} aggregation produced {} rows", kind, table.len());

        let (x_labels, y_values): (Vec<String>, Vec<Option<f64>>) = amounts
            .into_iter()
            .map(|(key, amount)| (label_of(key), amount))
            .unzip();

        Ok(ChartSeries::new(kind, x_labels, y_values))
    }
}

#[async_trait]
impl AggregationService for AggregationServiceImpl {
    async fn load_transactions(&self, csv_path: &Path) -> anyhow::Result<TransactionTable> {
        let bytes: Vec<u8> = tokio::fs::read(csv_path).await.with_context(|| {
            format!(
                "[AggregationServiceImpl->load_transactions] Failed to read {:?}",
                csv_path
            )
        })?;

        let table: TransactionTable = TransactionTable::from_csv_bytes(&bytes)?;

        if table.is_empty() {
            warn!("{:?} holds a header but no transactions", csv_path);
        }

        info!(
            "Loaded {} transactions ({} numeric columns) from {:?}",
            table.rows().len(),
            table.numeric_columns().len(),
            csv_path
        );

        Ok(table)
    }

    #[doc = r#"
        Monthly sums of every numeric column, keyed by month-end.

        Covers every month between the first and the last dated transaction; months
        without any transaction hold zeros. Rows without a date are skipped.
    "#]
    fn monthly_totals(&self, table: &TransactionTable) -> AggregatedTable<NaiveDate> {
        let column_cnt: usize = table.numeric_columns().len();
        let mut groups: BTreeMap<NaiveDate, ColumnAccumulator> = BTreeMap::new();

        let dated_rows = table
            .rows()
            .iter()
            .filter_map(|row: &TransactionRow| (*row.date()).map(|date| (date, row)));

        for (date, row) in dated_rows {
            groups
                .entry(month_end(date))
                .or_insert_with(|| ColumnAccumulator::with_columns(column_cnt))
                .add(row.values());
        }

        let rows: Vec<AggregatedRow<NaiveDate>> =
            match (groups.keys().next(), groups.keys().next_back()) {
                (Some(first), Some(last)) => month_ends_between(*first, *last)
                    .into_iter()
                    .map(|month| {
                        let values: Vec<Option<f64>> = groups
                            .get(&month)
                            .map(|acc| acc.reduce(Reduction::Sum))
                            .unwrap_or_else(|| vec![Some(0.0); column_cnt]);
                        AggregatedRow::new(month, values)
                    })
                    .collect(),
                _ => Vec::new(),
            };

        AggregatedTable::new(
            DATE_COLUMN.to_string(),
            table.numeric_columns().clone(),
            rows,
        )
    }

    fn category_averages(&self, table: &TransactionTable) -> AggregatedTable<String> {
        self.group_by_category(table, Reduction::Mean)
    }

    fn category_totals(&self, table: &TransactionTable) -> AggregatedTable<String> {
        self.group_by_category(table, Reduction::Sum)
    }

    fn chart_series(&self, table: &TransactionTable, kind: ChartKind) -> anyhow::Result<ChartSeries> {
        match kind {
            ChartKind::MonthlyExpenditure => self.amount_series(
                &self.monthly_totals(table),
                kind,
                |month: &NaiveDate| month.format(MONTH_LABEL_FORMAT).to_string(),
            ),
            ChartKind::AverageByCategory => {
                self.amount_series(&self.category_averages(table), kind, String::clone)
            }
            ChartKind::TotalByCategory => {
                self.amount_series(&self.category_totals(table), kind, String::clone)
            }
        }
    }
}
