use crate::common::*;

use crate::enums::chart_kind::*;

#[doc = "The `(label, Amount)` series one chart is drawn from"]
#[derive(Debug, Clone, PartialEq, Getters, new)]
#[getset(get = "pub")]
pub struct ChartSeries {
    kind: ChartKind,
    x_labels: Vec<String>,
    y_values: Vec<Option<f64>>,
}

impl ChartSeries {
    pub fn into_parts(self) -> (ChartKind, Vec<String>, Vec<Option<f64>>) {
        (self.kind, self.x_labels, self.y_values)
    }

    pub fn is_empty(&self) -> bool {
        self.x_labels.is_empty()
    }
}
