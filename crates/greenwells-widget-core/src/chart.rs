use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetPoint {
    pub label: String,
    pub value: u32,
}

impl DatasetPoint {
    pub fn new(label: impl Into<String>, value: u32) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

pub const WEEKLY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
pub const WEEKLY_VALUES: [u32; 7] = [45, 52, 48, 61, 55, 67, 72];

#[must_use]
pub fn weekly_dataset() -> Vec<DatasetPoint> {
    WEEKLY_LABELS
        .iter()
        .zip(WEEKLY_VALUES)
        .map(|(label, value)| DatasetPoint::new(*label, value))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartBar {
    pub label: String,
    pub value: u32,
    pub height_percent: f64,
    pub title: String,
}

impl ChartBar {
    /// Inline `height` style value for the bar element.
    #[must_use]
    pub fn height_style(&self) -> String {
        format!("{}%", self.height_percent)
    }
}

/// One bar per point, scaled against the largest value. An all-zero series
/// renders flat bars.
#[must_use]
pub fn render_chart(dataset: &[DatasetPoint]) -> Vec<ChartBar> {
    let max = dataset.iter().map(|point| point.value).max().unwrap_or(0);
    dataset
        .iter()
        .map(|point| ChartBar {
            label: point.label.clone(),
            value: point.value,
            height_percent: if max == 0 {
                0.0
            } else {
                f64::from(point.value) / f64::from(max) * 100.0
            },
            title: format!("{}: {} feedback", point.label, point.value),
        })
        .collect()
}
