use greenprompt_client::{types::CarbonSnapshot, FetchOutcome};
use serde::Serialize;

/// Display-ready form of a [`CarbonSnapshot`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CarbonReading {
    /// Intensity formatted for display, e.g. `"123"`.
    pub intensity: String,
    /// Zone identifier followed by its name, e.g. `"FR France"`.
    pub zone_label: String,
    /// Time of the reading, when the provider reported one.
    pub as_of: Option<String>,
}

impl From<&CarbonSnapshot> for CarbonReading {
    fn from(snapshot: &CarbonSnapshot) -> Self {
        Self {
            intensity: format_intensity(snapshot.carbon_intensity),
            zone_label: format!("{} {}", snapshot.zone, snapshot.zone_name),
            as_of: snapshot.timestamp.clone(),
        }
    }
}

/// State of the current-intensity region.
///
/// A failed fetch never replaces the last good reading. It only sets `error`,
/// which the renderer shows in place of the value.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct CarbonStatusView {
    pub current: Option<CarbonReading>,
    pub error: Option<String>,
}

impl CarbonStatusView {
    /// Computes the next state of the region from the previous one and a fetch outcome.
    pub fn next(previous: Option<&Self>, outcome: &FetchOutcome<CarbonSnapshot>) -> Self {
        match outcome {
            Ok(snapshot) => Self {
                current: Some(CarbonReading::from(snapshot)),
                error: None,
            },
            Err(e) => Self {
                current: previous.and_then(|p| p.current.clone()),
                error: Some(e.to_string()),
            },
        }
    }
}

/// Formats an intensity without a trailing `.0` for whole numbers.
pub fn format_intensity(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use greenprompt_client::FetchError;

    fn snapshot(intensity: f64) -> CarbonSnapshot {
        CarbonSnapshot {
            carbon_intensity: intensity,
            zone: "FR".into(),
            zone_name: "France".into(),
            timestamp: None,
        }
    }

    #[test]
    fn test_success_shows_value_and_zone() {
        let view = CarbonStatusView::next(None, &Ok(snapshot(123.0)));
        let current = view.current.unwrap();
        assert_eq!(current.intensity, "123");
        assert_eq!(current.zone_label, "FR France");
        assert!(view.error.is_none());
    }

    #[test]
    fn test_failure_keeps_previous_reading() {
        let first = CarbonStatusView::next(None, &Ok(snapshot(123.0)));
        let second = CarbonStatusView::next(Some(&first), &Err(FetchError::InvalidJson));
        assert_eq!(second.current, first.current);
        assert_eq!(second.error.as_deref(), Some("Invalid JSON from server"));
    }

    #[test]
    fn test_success_after_failure_clears_error() {
        let failed = CarbonStatusView::next(
            None,
            &Err(FetchError::Transport("connection refused".into())),
        );
        assert!(failed.current.is_none());
        let recovered = CarbonStatusView::next(Some(&failed), &Ok(snapshot(88.5)));
        assert!(recovered.error.is_none());
        assert_eq!(recovered.current.unwrap().intensity, "88.5");
    }
}
