use crate::common::*;
use crate::traits::service_traits::chart_service::*;
use plotters::prelude::*;

#[doc = "15 x 10 inch figure at 100 dpi"]
const CHART_CANVAS_SIZE: (u32, u32) = (1500, 1000);

#[doc = "Formats an axis value with thousands separators and at most two decimals"]
fn format_amount(value: f64) -> String {
    let rounded: f64 = (value * 100.0).round() / 100.0;
    let abs: f64 = rounded.abs();

    let mut int_part: u64 = abs.trunc() as u64;
    let mut cents: u64 = ((abs - abs.trunc()) * 100.0).round() as u64;
    if cents >= 100 {
        int_part += 1;
        cents = 0;
    }

    let digits: String = int_part.to_string();
    let mut result: String = String::new();
    if rounded < 0.0 && (int_part > 0 || cents > 0) {
        result.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    if cents > 0 {
        result.push_str(&format!(".{:02}", cents));
    }

    result
}

#[derive(Debug, Clone, new)]
pub struct ChartServiceImpl;

impl ChartServiceImpl {
    #[doc = "Helper function to determine Y-axis range with padding"]
    fn calculate_y_range(&self, values: &[f64], from_zero: bool) -> (f64, f64) {
        if values.is_empty() {
            return (0.0, 100.0);
        }

        let min_val: f64 = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max_val: f64 = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let padding: f64 = ((max_val - min_val) * 0.1).max(1.0);

        if from_zero {
            /* Bars grow from zero, so zero always stays on the axis */
            let y_min: f64 = if min_val < 0.0 { min_val - padding } else { 0.0 };
            let y_max: f64 = if max_val > 0.0 {
                max_val + padding
            } else if min_val < 0.0 {
                0.0
            } else {
                padding
            };
            (y_min, y_max)
        } else {
            let y_min: f64 = if min_val >= 0.0 {
                (min_val - padding).max(0.0)
            } else {
                min_val - padding
            };
            (y_min, max_val + padding)
        }
    }

    fn check_series(
        &self,
        caller: &str,
        x_labels: &[String],
        y_data: &[Option<f64>],
    ) -> anyhow::Result<()> {
        if x_labels.len() != y_data.len() {
            return Err(anyhow!(
                "[ChartServiceImpl->{}] X labels and Y data must have the same length: {} vs {}",
                caller,
                x_labels.len(),
                y_data.len()
            ));
        }

        if x_labels.is_empty() {
            return Err(anyhow!(
                "[ChartServiceImpl->{}] Cannot generate chart with empty data",
                caller
            ));
        }

        Ok(())
    }
}

#[async_trait]
impl ChartService for ChartServiceImpl {
    async fn generate_line_chart(
        &self,
        title: &str,
        x_labels: Vec<String>,
        y_data: Vec<Option<f64>>,
        line_color: (u8, u8, u8),
        output_path: &Path,
        x_label: &str,
        y_label: &str,
    ) -> anyhow::Result<()> {
        self.check_series("generate_line_chart", &x_labels, &y_data)?;

        /* Create parent directory if it doesn't exist */
        if let Some(parent) = output_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let output_path_str: String = output_path.to_string_lossy().to_string();
        let title: String = title.to_string();
        let x_label: String = x_label.to_string();
        let y_label: String = y_label.to_string();

        let points: Vec<(usize, f64)> = y_data
            .iter()
            .enumerate()
            .filter_map(|(i, y)| y.map(|y| (i, y)))
            .collect();

        /* Calculate y_range before moving into closure */
        let y_values: Vec<f64> = points.iter().map(|(_, y)| *y).collect();
        let (y_min, y_max) = self.calculate_y_range(&y_values, false);

        let handle: tokio::task::JoinHandle<Result<(), anyhow::Error>> =
            tokio::task::spawn_blocking(move || {
                let root = BitMapBackend::new(&output_path_str, CHART_CANVAS_SIZE).into_drawing_area();
                root.fill(&WHITE)?;

                let mut chart = ChartBuilder::on(&root)
                    .caption(&title, ("sans-serif", 36).into_font())
                    .margin(30)
                    .x_label_area_size(90)
                    .y_label_area_size(110)
                    .build_cartesian_2d(0..x_labels.len() - 1, y_min..y_max)?;

                let (r, g, b) = line_color;
                let line_color: RGBColor = RGBColor(r, g, b);
                let grid_color: RGBColor = RGBColor(220, 220, 220);

                chart
                    .configure_mesh()
                    .x_desc(&x_label)
                    .y_desc(&y_label)
                    .x_labels(x_labels.len().min(12))
                    .y_labels(10)
                    .axis_style(ShapeStyle::from(&BLACK).stroke_width(1))
                    .light_line_style(ShapeStyle::from(&grid_color).stroke_width(1))
                    .bold_line_style(ShapeStyle::from(&grid_color).stroke_width(1))
                    .x_label_style(("sans-serif", 16).into_font())
                    .y_label_style(("sans-serif", 18).into_font())
                    .x_label_formatter(&|x| x_labels.get(*x).cloned().unwrap_or_default())
                    .y_label_formatter(&|y| format_amount(*y))
                    .draw()?;

                chart.draw_series(LineSeries::new(
                    points.iter().copied(),
                    ShapeStyle::from(&line_color).stroke_width(2),
                ))?;

                chart.draw_series(
                    points
                        .iter()
                        .map(|&(x, y)| Circle::new((x, y), 5, line_color.filled())),
                )?;

                root.present()?;
                Ok(())
            });

        let drawing_result: Result<(), anyhow::Error> = handle.await.context(
            "[ChartServiceImpl->generate_line_chart] blocking task join failed (panic/cancelled)",
        )?;

        drawing_result.context("[ChartServiceImpl->generate_line_chart] drawing/present failed")?;

        info!("Line chart generated successfully: {:?}", output_path);

        Ok(())
    }

    async fn generate_bar_chart(
        &self,
        title: &str,
        x_labels: Vec<String>,
        y_data: Vec<Option<f64>>,
        bar_color: (u8, u8, u8),
        output_path: &Path,
        x_label: &str,
        y_label: &str,
    ) -> anyhow::Result<()> {
        self.check_series("generate_bar_chart", &x_labels, &y_data)?;

        if let Some(parent) = output_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let output_path_str: String = output_path.to_string_lossy().to_string();
        let title: String = title.to_string();
        let x_label: String = x_label.to_string();
        let y_label: String = y_label.to_string();

        let bars: Vec<(usize, f64)> = y_data
            .iter()
            .enumerate()
            .filter_map(|(i, y)| y.map(|y| (i, y)))
            .collect();

        let y_values: Vec<f64> = bars.iter().map(|(_, y)| *y).collect();
        let (y_min, y_max) = self.calculate_y_range(&y_values, true);

        let handle: tokio::task::JoinHandle<Result<(), anyhow::Error>> =
            tokio::task::spawn_blocking(move || {
                let root = BitMapBackend::new(&output_path_str, CHART_CANVAS_SIZE).into_drawing_area();
                root.fill(&WHITE)?;

                /* Rotated category labels need a tall label area */
                let mut chart = ChartBuilder::on(&root)
                    .caption(&title, ("sans-serif", 36).into_font())
                    .margin(30)
                    .x_label_area_size(220)
                    .y_label_area_size(110)
                    .build_cartesian_2d((0..x_labels.len() - 1).into_segmented(), y_min..y_max)?;

                let (r, g, b) = bar_color;
                let bar_color: RGBColor = RGBColor(r, g, b);
                let grid_color: RGBColor = RGBColor(220, 220, 220);

                chart
                    .configure_mesh()
                    .disable_x_mesh()
                    .x_desc(&x_label)
                    .y_desc(&y_label)
                    .x_labels(x_labels.len())
                    .y_labels(10)
                    .axis_style(ShapeStyle::from(&BLACK).stroke_width(1))
                    .light_line_style(ShapeStyle::from(&grid_color).stroke_width(1))
                    .bold_line_style(ShapeStyle::from(&grid_color).stroke_width(1))
                    .x_label_style(
                        ("sans-serif", 16)
                            .into_font()
                            .transform(FontTransform::Rotate90),
                    )
                    .y_label_style(("sans-serif", 18).into_font())
                    .x_label_formatter(&|x| match x {
                        SegmentValue::CenterOf(i) => x_labels.get(*i).cloned().unwrap_or_default(),
                        _ => String::new(),
                    })
                    .y_label_formatter(&|y| format_amount(*y))
                    .draw()?;

                chart.draw_series(
                    Histogram::vertical(&chart)
                        .style(bar_color.filled())
                        .margin(8)
                        .data(bars.iter().copied()),
                )?;

                root.present()?;
                Ok(())
            });

        let drawing_result: Result<(), anyhow::Error> = handle.await.context(
            "[ChartServiceImpl->generate_bar_chart] blocking task join failed (panic/cancelled)",
        )?;

        drawing_result.context("[ChartServiceImpl->generate_bar_chart] drawing/present failed")?;

        info!("Bar chart generated successfully: {:?}", output_path);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amounts_get_thousands_separators() {
        assert_eq!(format_amount(0.0), "0");
        assert_eq!(format_amount(999.0), "999");
        assert_eq!(format_amount(1234567.0), "1,234,567");
        assert_eq!(format_amount(-1500.5), "-1,500.50");
        assert_eq!(format_amount(12.3456), "12.35");
        assert_eq!(format_amount(-0.001), "0");
    }

    #[test]
    fn line_range_pads_and_clamps_at_zero() {
        let service = ChartServiceImpl::new();

        assert_eq!(service.calculate_y_range(&[], false), (0.0, 100.0));
        assert_eq!(service.calculate_y_range(&[10.0, 110.0], false), (0.0, 120.0));
        assert_eq!(service.calculate_y_range(&[500.0, 600.0], false), (490.0, 610.0));
        assert_eq!(service.calculate_y_range(&[-50.0, 50.0], false), (-60.0, 60.0));
    }

    #[test]
    fn bar_range_always_contains_zero() {
        let service = ChartServiceImpl::new();

        assert_eq!(service.calculate_y_range(&[500.0, 600.0], true), (0.0, 610.0));
        assert_eq!(service.calculate_y_range(&[-20.0, -10.0], true), (-21.0, 0.0));
        assert_eq!(service.calculate_y_range(&[0.0, 0.0], true), (0.0, 1.0));
    }

    #[tokio::test]
    async fn empty_or_ragged_series_are_rejected_before_drawing() {
        let dir = tempfile::tempdir().unwrap();
        let output_path = dir.path().join("charts").join("empty.jpg");
        let service = ChartServiceImpl::new();

        let empty = service
            .generate_bar_chart("t", vec![], vec![], (0, 0, 0), &output_path, "x", "y")
            .await;
        assert!(empty.is_err());

        let ragged = service
            .generate_line_chart(
                "t",
                vec!["a".to_string(), "b".to_string()],
                vec![Some(1.0)],
                (0, 0, 0),
                &output_path,
                "x",
                "y",
            )
            .await;
        assert!(ragged.is_err());
        assert!(!output_path.exists());
    }

    #[tokio::test]
    #[ignore = "draws text, needs system fonts"]
    async fn renders_both_chart_styles_as_jpeg() {
        let dir = tempfile::tempdir().unwrap();
        let service = ChartServiceImpl::new();
        let line_path = dir.path().join("line.jpg");
        let bar_path = dir.path().join("bar.jpg");

        service
            .generate_line_chart(
                "Monthly",
                vec!["2020-01-31".to_string(), "2020-02-29".to_string()],
                vec![Some(10.0), Some(20.0)],
                (31, 119, 180),
                &line_path,
                "Date",
                "Total",
            )
            .await
            .unwrap();
        service
            .generate_bar_chart(
                "Categories",
                vec!["A".to_string(), "B".to_string()],
                vec![Some(15.0), None],
                (135, 206, 235),
                &bar_path,
                "Category",
                "Average",
            )
            .await
            .unwrap();

        for path in [line_path, bar_path] {
            let bytes = std::fs::read(&path).unwrap();
            assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
        }
    }
}
