//! Chart instance ownership.
//!
//! A [`ChartInstance`] owns at most one rendered chart for one canvas. Each
//! render tears down the previous chart before creating the next one, so
//! repeated refreshes never leak renderer resources.
//!
//! ```text
//! Uninitialized --render--> Rendered --render--> (Destroyed) --> Rendered ...
//!                               \--destroy / drop--> Destroyed
//! ```

use std::fmt;

use crate::error::CoreError;
use crate::series::ChartData;

/// The charting backend. Implementations own whatever the handle refers to.
pub trait ChartRenderer {
    type Handle;

    /// Create a chart on `canvas` from `data`.
    fn create(&mut self, canvas: &str, data: &ChartData) -> Result<Self::Handle, CoreError>;

    /// Release a chart previously returned by [`ChartRenderer::create`].
    fn destroy(&mut self, handle: Self::Handle);
}

/// Lifecycle of a chart instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartState<H> {
    Uninitialized,
    Rendered(H),
    Destroyed,
}

/// Status indicator shown next to the chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartStatus {
    Idle,
    Ready { series: usize, labels: usize },
    /// The last successful fetch returned nothing to plot.
    Empty,
    /// The last refresh failed; any previous chart is still displayed.
    Failed(String),
}

impl fmt::Display for ChartStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "waiting for data"),
            Self::Ready { series, labels } => write!(f, "{series} series x {labels} buckets"),
            Self::Empty => write!(f, "no data"),
            Self::Failed(reason) => write!(f, "failed to load: {reason}"),
        }
    }
}

/// Owner of the chart drawn on one canvas.
pub struct ChartInstance<R: ChartRenderer> {
    canvas: String,
    renderer: R,
    state: ChartState<R::Handle>,
    status: ChartStatus,
}

impl<R: ChartRenderer> ChartInstance<R> {
    pub fn new(canvas: impl Into<String>, renderer: R) -> Self {
        Self {
            canvas: canvas.into(),
            renderer,
            state: ChartState::Uninitialized,
            status: ChartStatus::Idle,
        }
    }

    pub fn canvas(&self) -> &str {
        &self.canvas
    }

    pub fn state(&self) -> &ChartState<R::Handle> {
        &self.state
    }

    pub fn status(&self) -> &ChartStatus {
        &self.status
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn is_rendered(&self) -> bool {
        matches!(self.state, ChartState::Rendered(_))
    }

    /// Replace the current chart with one built from `data`.
    ///
    /// Empty data destroys the current chart and reports [`ChartStatus::Empty`].
    /// A renderer failure leaves the instance destroyed with a failed status.
    pub fn render(&mut self, data: &ChartData) -> Result<(), CoreError> {
        self.destroy();

        if data.is_empty() {
            self.status = ChartStatus::Empty;
            return Ok(());
        }

        match self.renderer.create(&self.canvas, data) {
            Ok(handle) => {
                self.state = ChartState::Rendered(handle);
                self.status = ChartStatus::Ready {
                    series: data.series.len(),
                    labels: data.labels.len(),
                };
                Ok(())
            }
            Err(err) => {
                self.status = ChartStatus::Failed(err.to_string());
                Err(err)
            }
        }
    }

    /// Tear down the current chart, if any.
    pub fn destroy(&mut self) {
        match std::mem::replace(&mut self.state, ChartState::Destroyed) {
            ChartState::Rendered(handle) => self.renderer.destroy(handle),
            ChartState::Uninitialized => self.state = ChartState::Uninitialized,
            ChartState::Destroyed => {}
        }
    }

    /// Record a failed refresh without touching the displayed chart.
    pub fn mark_failed(&mut self, reason: impl Into<String>) {
        self.status = ChartStatus::Failed(reason.into());
    }
}

impl<R: ChartRenderer> Drop for ChartInstance<R> {
    fn drop(&mut self) {
        self.destroy();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::color_for;
    use crate::series::Series;
    use assert_matches::assert_matches;

    #[derive(Default)]
    struct RecordingRenderer {
        next_id: u32,
        live: Vec<u32>,
        events: Vec<String>,
        fail_next: bool,
    }

    impl ChartRenderer for RecordingRenderer {
        type Handle = u32;

        fn create(&mut self, canvas: &str, _data: &ChartData) -> Result<u32, CoreError> {
            if self.fail_next {
                self.fail_next = false;
                return Err(CoreError::Render("canvas missing".into()));
            }
            self.next_id += 1;
            self.live.push(self.next_id);
            self.events.push(format!("create {canvas} #{}", self.next_id));
            Ok(self.next_id)
        }

        fn destroy(&mut self, handle: u32) {
            self.live.retain(|id| *id != handle);
            self.events.push(format!("destroy #{handle}"));
        }
    }

    fn data() -> ChartData {
        ChartData {
            labels: vec!["2025-05-13 10:00".into()],
            series: vec![Series {
                name: "A".into(),
                values: vec![Some(1.0)],
                color: color_for("A"),
            }],
        }
    }

    #[test]
    fn starts_uninitialized() {
        let chart = ChartInstance::new("population", RecordingRenderer::default());
        assert_eq!(chart.state(), &ChartState::Uninitialized);
        assert_eq!(chart.status(), &ChartStatus::Idle);
    }

    #[test]
    fn destroy_before_first_render_stays_uninitialized() {
        let mut chart = ChartInstance::new("population", RecordingRenderer::default());
        chart.destroy();
        assert_eq!(chart.state(), &ChartState::Uninitialized);
        assert!(chart.renderer().events.is_empty());
    }

    #[test]
    fn rerender_destroys_previous_chart_first() {
        let mut chart = ChartInstance::new("population", RecordingRenderer::default());
        chart.render(&data()).unwrap();
        chart.render(&data()).unwrap();

        assert_eq!(
            chart.renderer().events,
            vec!["create population #1", "destroy #1", "create population #2"]
        );
        assert_eq!(chart.renderer().live, vec![2]);
        assert_eq!(chart.state(), &ChartState::Rendered(2));
        assert_eq!(chart.status(), &ChartStatus::Ready { series: 1, labels: 1 });
    }

    #[test]
    fn explicit_destroy_releases_handle() {
        let mut chart = ChartInstance::new("population", RecordingRenderer::default());
        chart.render(&data()).unwrap();
        chart.destroy();
        assert_eq!(chart.state(), &ChartState::Destroyed);
        assert!(chart.renderer().live.is_empty());
    }

    #[test]
    fn failed_fetch_keeps_previous_render() {
        let mut chart = ChartInstance::new("population", RecordingRenderer::default());
        chart.render(&data()).unwrap();
        chart.mark_failed("connection refused");

        assert!(chart.is_rendered());
        assert_eq!(chart.renderer().live, vec![1]);
        assert_eq!(chart.status().to_string(), "failed to load: connection refused");
    }

    #[test]
    fn empty_data_clears_chart_and_reports_empty() {
        let mut chart = ChartInstance::new("population", RecordingRenderer::default());
        chart.render(&data()).unwrap();
        chart.render(&ChartData::default()).unwrap();

        assert_eq!(chart.state(), &ChartState::Destroyed);
        assert_eq!(chart.status(), &ChartStatus::Empty);
        assert!(chart.renderer().live.is_empty());
    }

    #[test]
    fn renderer_failure_is_reported() {
        let mut renderer_fails = RecordingRenderer::default();
        renderer_fails.fail_next = true;
        let mut broken = ChartInstance::new("payments", renderer_fails);
        assert_matches!(broken.render(&data()), Err(CoreError::Render(_)));
        assert_matches!(broken.status(), ChartStatus::Failed(_));
        assert!(!broken.is_rendered());
    }
}
