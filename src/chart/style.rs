//! Line chart appearance
//!
//! The values here end up in the Chart.js configuration object; text
//! backends use the label and the y-axis maximum.

use serde_json::{json, Value};

use super::data::ChartData;
use crate::config::ChartConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct LineChartStyle {
    pub dataset_label: String,
    pub border_color: String,
    pub background_color: String,
    pub border_width: f64,
    pub tension: f64,
    pub responsive: bool,
    pub begin_at_zero: bool,
    pub y_max: Option<f64>,
}

impl Default for LineChartStyle {
    fn default() -> Self {
        Self {
            dataset_label: "Server load (%)".to_string(),
            border_color: "rgba(75, 192, 192, 1)".to_string(),
            background_color: "rgba(75, 192, 192, 0.2)".to_string(),
            border_width: 2.0,
            tension: 0.1,
            responsive: true,
            begin_at_zero: true,
            y_max: Some(100.0),
        }
    }
}

impl LineChartStyle {
    pub fn from_config(config: &ChartConfig) -> Self {
        Self {
            dataset_label: config.dataset_label.clone(),
            y_max: (config.y_max > 0.0).then_some(config.y_max),
            ..Self::default()
        }
    }

    /// Chart.js configuration for a single-dataset line chart
    pub fn chartjs_config(&self, data: &ChartData) -> Value {
        let mut y_scale = json!({ "beginAtZero": self.begin_at_zero });
        if let Some(max) = self.y_max {
            y_scale["max"] = json!(max);
        }

        json!({
            "type": "line",
            "data": {
                "labels": data.labels,
                "datasets": [{
                    "label": self.dataset_label,
                    "data": data.data,
                    "borderColor": self.border_color,
                    "backgroundColor": self.background_color,
                    "borderWidth": self.border_width,
                    "tension": self.tension,
                }]
            },
            "options": {
                "responsive": self.responsive,
                "scales": { "y": y_scale }
            }
        })
    }
}
