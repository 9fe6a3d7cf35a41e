use crate::common::*;

#[async_trait]
pub trait ChartService: Send + Sync {
    #[doc = "
        Generate a line chart from time-series data and save it as an image file
        # Arguments
        * `title` - Chart title
        * `x_labels` - Labels for X-axis (e.g., month-end dates)
        * `y_data` - Data points for Y-axis; `None` points are not drawn
        * `line_color` - RGB color of the line and its markers
        * `output_path` - Path where the chart image will be saved
        * `x_label` - Label for X-axis
        * `y_label` - Label for Y-axis
    "]
    #[allow(clippy::too_many_arguments)]
    async fn generate_line_chart(
        &self,
        title: &str,
        x_labels: Vec<String>,
        y_data: Vec<Option<f64>>,
        line_color: (u8, u8, u8),
        output_path: &Path,
        x_label: &str,
        y_label: &str,
    ) -> anyhow::Result<()>;

    #[doc = "
        Generate a bar chart with one bar per label and save it as an image file
        # Arguments
        * `title` - Chart title
        * `x_labels` - One label per bar (e.g., categories)
        * `y_data` - Bar heights; `None` leaves the slot empty
        * `bar_color` - RGB fill color of the bars
        * `output_path` - Path where the chart image will be saved
        * `x_label` - Label for X-axis
        * `y_label` - Label for Y-axis
    "]
    #[allow(clippy::too_many_arguments)]
    async fn generate_bar_chart(
        &self,
        title: &str,
        x_labels: Vec<String>,
        y_data: Vec<Option<f64>>,
        bar_color: (u8, u8, u8),
        output_path: &Path,
        x_label: &str,
        y_label: &str,
    ) -> anyhow::Result<()>;
}
