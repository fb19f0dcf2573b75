//! Plain-text chart backend
//!
//! Renders the series as a labelled bar table. Used by the command-line
//! host where no charting library is available.

use super::data::ChartData;
use super::error::ChartResult;
use super::session::ChartBackend;
use super::style::LineChartStyle;

/// Bar width used when the style has no y maximum and the data is empty
const DEFAULT_SCALE: f64 = 100.0;

#[derive(Debug, Clone)]
pub struct TextBackend {
    bar_width: usize,
}

impl Default for TextBackend {
    fn default() -> Self {
        Self { bar_width: 40 }
    }
}

impl TextBackend {
    pub fn new(bar_width: usize) -> Self {
        Self { bar_width }
    }
}

/// A chart held as text-renderable state
#[derive(Debug, Clone, PartialEq)]
pub struct TextChart {
    title: String,
    y_max: Option<f64>,
    bar_width: usize,
    data: ChartData,
    revision: u32,
}

impl TextChart {
    pub fn data(&self) -> &ChartData {
        &self.data
    }

    /// Times the chart has been redrawn with new data
    pub fn revision(&self) -> u32 {
        self.revision
    }

    pub fn render(&self) -> String {
        let mut out = format!("{}\n", self.title);
        if self.data.is_empty() {
            out.push_str("  (no data)\n");
            return out;
        }

        let scale = self.y_max.unwrap_or_else(|| {
            let max = self.data.data.iter().copied().fold(0.0, f64::max);
            if max > 0.0 {
                max
            } else {
                DEFAULT_SCALE
            }
        });
        let label_width = self
            .data
            .labels
            .iter()
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0);

        for (label, value) in self.data.points() {
            let filled = ((value / scale).clamp(0.0, 1.0) * self.bar_width as f64).round() as usize;
            out.push_str(&format!(
                "  {:>width$} |{}{}| {:>6.1}\n",
                label,
                "#".repeat(filled),
                " ".repeat(self.bar_width - filled),
                value,
                width = label_width
            ));
        }
        out
    }
}

impl ChartBackend for TextBackend {
    type Chart = TextChart;

    fn create(&mut self, style: &LineChartStyle, data: &ChartData) -> ChartResult<TextChart> {
        Ok(TextChart {
            title: style.dataset_label.clone(),
            y_max: style.y_max,
            bar_width: self.bar_width,
            data: data.clone(),
            revision: 0,
        })
    }

    fn update(&mut self, chart: &mut TextChart, data: &ChartData) -> ChartResult<()> {
        chart.data = data.clone();
        chart.revision += 1;
        Ok(())
    }
}
