use greenprompt_client::{types::CarbonHistorySeries, FetchOutcome};
use serde::Serialize;
use tracing::warn;

/// Input for the intensity history chart: parallel label and value arrays.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ChartInput {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl ChartInput {
    /// Maps a history series to chart input, keeping point order.
    pub fn from_series(series: &CarbonHistorySeries) -> Self {
        let (labels, values) = series
            .points()
            .iter()
            .map(|point| (point.timestamp.clone(), point.intensity))
            .unzip();
        Self { labels, values }
    }

    /// The chart is decorative: a failed fetch yields an empty, still renderable input.
    pub fn from_outcome(outcome: &FetchOutcome<CarbonHistorySeries>) -> Self {
        match outcome {
            Ok(series) => Self::from_series(series),
            Err(e) => {
                warn!(
                    target = "greenprompt-view",
                    event = "chart-fallback",
                    error = %e,
                    "Carbon history unavailable, rendering an empty chart"
                );
                Self::default()
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }
}
