//! Chart session
//!
//! A [`ChartSession`] owns the charting backend and, once the first data set
//! arrives, the chart it created. Later data replaces that chart's labels and
//! values in place. Rendering is entirely the backend's business.

use super::data::{ChartData, ServerId};
use super::error::ChartResult;
use super::source::ChartDataSource;
use super::style::LineChartStyle;

/// A charting library that can create a line chart and mutate it
pub trait ChartBackend {
    /// Handle to a created chart
    type Chart;

    /// Build a new chart showing `data`
    fn create(&mut self, style: &LineChartStyle, data: &ChartData) -> ChartResult<Self::Chart>;

    /// Replace the chart's labels and series with `data` and redraw
    fn update(&mut self, chart: &mut Self::Chart, data: &ChartData) -> ChartResult<()>;
}

/// What [`ChartSession::apply`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartOutcome {
    Created,
    Updated,
}

pub struct ChartSession<B: ChartBackend> {
    backend: B,
    style: LineChartStyle,
    chart: Option<B::Chart>,
    applied: u64,
}

impl<B: ChartBackend> ChartSession<B> {
    pub fn new(backend: B, style: LineChartStyle) -> Self {
        Self {
            backend,
            style,
            chart: None,
            applied: 0,
        }
    }

    /// Create the chart on first use, otherwise update it in place
    pub fn apply(&mut self, data: &ChartData) -> ChartResult<ChartOutcome> {
        let outcome = match self.chart.as_mut() {
            Some(chart) => {
                self.backend.update(chart, data)?;
                ChartOutcome::Updated
            }
            None => {
                self.chart = Some(self.backend.create(&self.style, data)?);
                ChartOutcome::Created
            }
        };
        self.applied += 1;

        tracing::debug!(
            outcome = ?outcome,
            points = data.len(),
            "chart data applied"
        );
        Ok(outcome)
    }

    pub fn chart(&self) -> Option<&B::Chart> {
        self.chart.as_ref()
    }

    pub fn is_initialized(&self) -> bool {
        self.chart.is_some()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn style(&self) -> &LineChartStyle {
        &self.style
    }

    /// Successful applications so far
    pub fn applied(&self) -> u64 {
        self.applied
    }
}

/// Fetch the series for `server_id` and apply it to `session`.
///
/// A failed fetch leaves the session untouched.
pub async fn update_chart<B, S>(
    session: &mut ChartSession<B>,
    source: &S,
    server_id: ServerId,
) -> ChartResult<ChartOutcome>
where
    B: ChartBackend,
    S: ChartDataSource + ?Sized,
{
    let data = source.fetch(server_id).await?;
    session.apply(&data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::error::ChartError;
    use async_trait::async_trait;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    /// Chart handle that remembers what it shows
    #[derive(Debug)]
    struct FakeChart {
        id: usize,
        labels: Vec<String>,
        series: Vec<f64>,
        redraws: usize,
    }

    #[derive(Default)]
    struct FakeBackend {
        created: usize,
        fail_update: bool,
    }

    impl ChartBackend for FakeBackend {
        type Chart = FakeChart;

        fn create(&mut self, style: &LineChartStyle, data: &ChartData) -> ChartResult<FakeChart> {
            assert_eq!(style.dataset_label, "Server load (%)");
            self.created += 1;
            Ok(FakeChart {
                id: self.created,
                labels: data.labels.clone(),
                series: data.data.clone(),
                redraws: 0,
            })
        }

        fn update(&mut self, chart: &mut FakeChart, data: &ChartData) -> ChartResult<()> {
            if self.fail_update {
                return Err(ChartError::Backend("canvas detached".into()));
            }
            chart.labels = data.labels.clone();
            chart.series = data.data.clone();
            chart.redraws += 1;
            Ok(())
        }
    }

    /// Source that replays canned responses
    struct ScriptedSource {
        responses: RefCell<VecDeque<ChartResult<ChartData>>>,
        requested: RefCell<Vec<ServerId>>,
    }

    impl ScriptedSource {
        fn new(responses: Vec<ChartResult<ChartData>>) -> Self {
            Self {
                responses: RefCell::new(responses.into()),
                requested: RefCell::new(Vec::new()),
            }
        }
    }

    #[async_trait(?Send)]
    impl ChartDataSource for ScriptedSource {
        async fn fetch(&self, server_id: ServerId) -> ChartResult<ChartData> {
            self.requested.borrow_mut().push(server_id);
            self.responses
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(ChartError::Network("no more responses".into())))
        }
    }

    fn data(labels: &[&str], values: &[f64]) -> ChartData {
        ChartData::new(labels.iter().map(|l| l.to_string()).collect(), values.to_vec())
    }

    #[test]
    fn test_first_apply_creates_chart() {
        let mut session = ChartSession::new(FakeBackend::default(), LineChartStyle::default());
        assert!(!session.is_initialized());

        let outcome = session.apply(&data(&["a", "b"], &[1.0, 2.0])).unwrap();
        assert_eq!(outcome, ChartOutcome::Created);

        let chart = session.chart().unwrap();
        assert_eq!(chart.labels, vec!["a", "b"]);
        assert_eq!(chart.series, vec![1.0, 2.0]);
        assert_eq!(session.backend().created, 1);
    }

    #[test]
    fn test_second_apply_mutates_same_chart() {
        let mut session = ChartSession::new(FakeBackend::default(), LineChartStyle::default());
        session.apply(&data(&["a", "b"], &[1.0, 2.0])).unwrap();

        let outcome = session.apply(&data(&["c", "d", "e"], &[3.0, 4.0, 5.0])).unwrap();
        assert_eq!(outcome, ChartOutcome::Updated);

        let chart = session.chart().unwrap();
        assert_eq!(chart.id, 1);
        assert_eq!(chart.labels, vec!["c", "d", "e"]);
        assert_eq!(chart.series, vec![3.0, 4.0, 5.0]);
        assert_eq!(chart.redraws, 1);
        assert_eq!(session.backend().created, 1);
        assert_eq!(session.applied(), 2);
    }

    #[test]
    fn test_backend_failure_keeps_chart() {
        let mut session = ChartSession::new(FakeBackend::default(), LineChartStyle::default());
        session.apply(&data(&["a"], &[1.0])).unwrap();
        session.backend.fail_update = true;

        assert!(matches!(
            session.apply(&data(&["b"], &[2.0])),
            Err(ChartError::Backend(_))
        ));
        assert_eq!(session.chart().unwrap().series, vec![1.0]);
        assert_eq!(session.applied(), 1);
    }

    #[tokio::test]
    async fn test_update_chart_fetches_then_applies() {
        let source = ScriptedSource::new(vec![
            Ok(data(&["a", "b"], &[1.0, 2.0])),
            Ok(data(&["b", "c"], &[2.0, 7.0])),
        ]);
        let mut session = ChartSession::new(FakeBackend::default(), LineChartStyle::default());

        let first = update_chart(&mut session, &source, ServerId::new(4)).await.unwrap();
        let second = update_chart(&mut session, &source, ServerId::new(4)).await.unwrap();

        assert_eq!(first, ChartOutcome::Created);
        assert_eq!(second, ChartOutcome::Updated);
        assert_eq!(session.chart().unwrap().series, vec![2.0, 7.0]);
        assert_eq!(*source.requested.borrow(), vec![ServerId::new(4), ServerId::new(4)]);
    }

    #[tokio::test]
    async fn test_failed_fetch_leaves_session_untouched() {
        let source = ScriptedSource::new(vec![
            Err(ChartError::Status(500)),
            Ok(data(&["a"], &[10.0])),
            Err(ChartError::Decode("truncated".into())),
        ]);
        let mut session = ChartSession::new(FakeBackend::default(), LineChartStyle::default());

        let err = update_chart(&mut session, &source, ServerId::new(1)).await.unwrap_err();
        assert!(matches!(err, ChartError::Status(500)));
        assert!(!session.is_initialized());

        update_chart(&mut session, &source, ServerId::new(1)).await.unwrap();
        assert!(update_chart(&mut session, &source, ServerId::new(1)).await.is_err());
        assert_eq!(session.chart().unwrap().series, vec![10.0]);
        assert_eq!(session.backend().created, 1);
    }
}
