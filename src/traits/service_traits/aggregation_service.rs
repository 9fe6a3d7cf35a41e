use crate::common::*;

use crate::dto::{aggregated_table::*, chart_series::*};
use crate::enums::chart_kind::*;
use crate::model::transaction::transaction_table::*;

#[async_trait]
pub trait AggregationService: Send + Sync {
    async fn load_transactions(&self, csv_path: &Path) -> anyhow::Result<TransactionTable>;
    fn monthly_totals(&self, table: &TransactionTable) -> AggregatedTable<NaiveDate>;
    fn category_averages(&self, table: &TransactionTable) -> AggregatedTable<String>;
    fn category_totals(&self, table: &TransactionTable) -> AggregatedTable<String>;
    #[doc = "
        Aggregates `table` the way `kind` needs and projects the result onto the
        `(label, Amount)` series the chart is drawn from
    "]
    fn chart_series(&self, table: &TransactionTable, kind: ChartKind) -> anyhow::Result<ChartSeries>;
}
