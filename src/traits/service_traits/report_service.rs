use crate::common::*;

use crate::enums::chart_kind::*;

#[async_trait]
pub trait ReportService: Send + Sync {
    #[doc = "True when the source transactions CSV is present in the upload directory"]
    async fn source_csv_exists(&self) -> bool;
    #[doc = "Aggregates the source CSV once and renders every requested chart, returning the image paths"]
    async fn generate_charts(&self, kinds: &[ChartKind]) -> anyhow::Result<Vec<PathBuf>>;
    #[doc = "Bytes of a stored chart image, `None` when no such file exists"]
    async fn load_chart_image(&self, chart_name: &str) -> anyhow::Result<Option<Vec<u8>>>;
}
