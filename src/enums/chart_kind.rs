use crate::common::*;

#[doc = "How a chart kind is drawn"]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartStyle {
    #[doc = "Connected line with circle markers and a full grid"]
    Line { color: (u8, u8, u8) },
    #[doc = "Vertical bars with a horizontal-only grid"]
    Bar { color: (u8, u8, u8) },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChartKind {
    MonthlyExpenditure,
    AverageByCategory,
    TotalByCategory,
}

impl ChartKind {
    pub const ALL: [ChartKind; 3] = [
        ChartKind::MonthlyExpenditure,
        ChartKind::AverageByCategory,
        ChartKind::TotalByCategory,
    ];

    #[doc = "Canonical image file name inside the output directory"]
    pub fn file_name(&self) -> &'static str {
        match self {
            ChartKind::MonthlyExpenditure => "monthly_expenditure_over_time.jpg",
            ChartKind::AverageByCategory => "average_spend_by_category.jpg",
            ChartKind::TotalByCategory => "total_spend_by_category_over_5_years.jpg",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ChartKind::MonthlyExpenditure => "Monthly Expenditure Over Time",
            ChartKind::AverageByCategory => "Average Spend by Category",
            ChartKind::TotalByCategory => "Total Spend by Category Over the 5 Years",
        }
    }

    pub fn x_desc(&self) -> &'static str {
        match self {
            ChartKind::MonthlyExpenditure => "Date",
            ChartKind::AverageByCategory | ChartKind::TotalByCategory => "Category",
        }
    }

    pub fn y_desc(&self) -> &'static str {
        match self {
            ChartKind::MonthlyExpenditure | ChartKind::TotalByCategory => "Total Expenditure ($)",
            ChartKind::AverageByCategory => "Average Expenditure ($)",
        }
    }

    pub fn style(&self) -> ChartStyle {
        match self {
            /* matplotlib default blue, skyblue, lightgreen */
            ChartKind::MonthlyExpenditure => ChartStyle::Line {
                color: (31, 119, 180),
            },
            ChartKind::AverageByCategory => ChartStyle::Bar {
                color: (135, 206, 235),
            },
            ChartKind::TotalByCategory => ChartStyle::Bar {
                color: (144, 238, 144),
            },
        }
    }
}

impl FromStr for ChartKind {
    type Err = anyhow::Error;

    fn from_str(chart_name: &str) -> Result<Self, Self::Err> {
        ChartKind::ALL
            .into_iter()
            .find(|kind| kind.file_name() == chart_name)
            .ok_or_else(|| anyhow!("[ChartKind->from_str] Unknown chart name: {}", chart_name))
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}
