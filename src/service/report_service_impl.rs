use crate::common::*;

use crate::dto::chart_series::*;
use crate::enums::chart_kind::*;
use crate::model::transaction::transaction_table::*;
use crate::traits::repository_traits::file_repository::*;
use crate::traits::service_traits::{
    aggregation_service::*, chart_service::*, report_service::*,
};

#[derive(Debug, new)]
pub struct ReportServiceImpl<A: AggregationService, C: ChartService, R: FileRepository> {
    aggregation_service: A,
    chart_service: C,
    upload_repository: R,
    output_repository: R,
    source_file_name: String,
}

impl<A, C, R> ReportServiceImpl<A, C, R>
where
    A: AggregationService,
    C: ChartService,
    R: FileRepository,
{
    #[doc = "Draws one aggregated series in the style its chart kind calls for"]
    async fn render_chart(&self, series: ChartSeries) -> anyhow::Result<PathBuf> {
        let (kind, x_labels, y_values) = series.into_parts();

        let output_path: PathBuf = self.output_repository.resolve(kind.file_name()).ok_or_else(|| {
            anyhow!(
                "[ReportServiceImpl->render_chart] Cannot place '{}' in {:?}",
                kind.file_name(),
                self.output_repository.root_dir()
            )
        })?;

        match kind.style() {
            ChartStyle::Line { color } => {
                self.chart_service
                    .generate_line_chart(
                        kind.title(),
                        x_labels,
                        y_values,
                        color,
                        &output_path,
                        kind.x_desc(),
                        kind.y_desc(),
                    )
                    .await?
            }
            ChartStyle::Bar { color } => {
                self.chart_service
                    .generate_bar_chart(
                        kind.title(),
                        x_labels,
                        y_values,
                        color,
                        &output_path,
                        kind.x_desc(),
                        kind.y_desc(),
                    )
                    .await?
            }
        }

        Ok(output_path)
    }
}

#[async_trait]
impl<A, C, R> ReportService for ReportServiceImpl<A, C, R>
where
    A: AggregationService,
    C: ChartService,
    R: FileRepository,
{
    async fn source_csv_exists(&self) -> bool {
        self.upload_repository.exists(&self.source_file_name).await
    }

    async fn generate_charts(&self, kinds: &[ChartKind]) -> anyhow::Result<Vec<PathBuf>> {
        let csv_path: PathBuf = self
            .upload_repository
            .resolve(&self.source_file_name)
            .ok_or_else(|| {
                anyhow!(
                    "[ReportServiceImpl->generate_charts] Invalid source file name '{}'",
                    self.source_file_name
                )
            })?;

        let table: TransactionTable = self.aggregation_service.load_transactions(&csv_path).await?;

        let mut chart_paths: Vec<PathBuf> = Vec::with_capacity(kinds.len());

        for kind in kinds {
            let series: ChartSeries = self.aggregation_service.chart_series(&table, *kind)?;
            if series.is_empty() {
                return Err(anyhow!(
                    "[ReportServiceImpl->generate_charts] No rows to draw {} from",
                    kind
                ));
            }

            let chart_path: PathBuf = self
                .render_chart(series)
                .await
                .with_context(|| format!("[ReportServiceImpl->generate_charts] Failed to render {}", kind))?;

            chart_paths.push(chart_path);
        }

        Ok(chart_paths)
    }

    async fn load_chart_image(&self, chart_name: &str) -> anyhow::Result<Option<Vec<u8>>> {
        self.output_repository.read_file(chart_name).await
    }
}
