use serde::{Deserialize, Serialize};
use tracing::warn;

/// Reserved schedule value meaning "no schedule selected".
pub const SCHEDULE_NONE: &str = "None";

/// Schedule windows understood by the GreenPrompt scheduler.
///
/// The client never validates against this list; it is offered as help text only.
pub const SCHEDULE_PRESETS: [&str; 4] = ["6 hr", "12 hr", "24 hr", "48 hr"];

/// Body of `GET /api/carbon-intensity`.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct CarbonIntensityResponse {
    /// Current grid carbon intensity, in gCO2eq/kWh.
    #[serde(rename = "carbonIntensity")]
    pub carbon_intensity: f64,

    /// Grid zone identifier, e.g. `"FR"`.
    pub zone: String,

    /// Human readable zone name, e.g. `"France"`.
    pub zone_name: String,

    /// Time of the reading as reported by the provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// The most recent carbon intensity reading for the configured zone.
#[derive(Clone, Debug, PartialEq)]
pub struct CarbonSnapshot {
    pub carbon_intensity: f64,
    pub zone: String,
    pub zone_name: String,
    pub timestamp: Option<String>,
}

impl From<CarbonIntensityResponse> for CarbonSnapshot {
    fn from(response: CarbonIntensityResponse) -> Self {
        Self {
            carbon_intensity: response.carbon_intensity,
            zone: response.zone,
            zone_name: response.zone_name,
            timestamp: response.timestamp,
        }
    }
}

/// Body of `GET /api/carbon-intensity-past`: two parallel arrays.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct CarbonHistoryResponse {
    pub stamps: Vec<String>,
    pub intensities: Vec<f64>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CarbonHistoryPoint {
    pub timestamp: String,
    pub intensity: f64,
}

/// Past carbon intensity readings, ordered by timestamp ascending.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CarbonHistorySeries(pub Vec<CarbonHistoryPoint>);

impl CarbonHistorySeries {
    pub fn points(&self) -> &[CarbonHistoryPoint] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl From<CarbonHistoryResponse> for CarbonHistorySeries {
    fn from(response: CarbonHistoryResponse) -> Self {
        if response.stamps.len() != response.intensities.len() {
            warn!(
                target = "greenprompt-client",
                event = "carbon-history-length-mismatch",
                stamps = response.stamps.len(),
                intensities = response.intensities.len(),
                "Carbon history arrays differ in length, dropping the unmatched tail"
            );
        }
        Self(
            response
                .stamps
                .into_iter()
                .zip(response.intensities)
                .map(|(timestamp, intensity)| CarbonHistoryPoint {
                    timestamp,
                    intensity,
                })
                .collect(),
        )
    }
}

/// Lifecycle state of a prompt, as reported by the prompt store.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PromptStatus {
    Pending,
    Completed,
}

impl PromptStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
        }
    }
}

/// A prompt record owned by the prompt store.
///
/// The client never mutates these; it only re-fetches the full set.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Prompt {
    /// Creation time, assigned by the store.
    pub timestamp: String,

    pub prompt: String,

    /// Target model. The server picks one when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    pub status: PromptStatus,

    /// Human readable target time, only present for scheduled prompts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<String>,

    /// Intensity recorded when the prompt was scheduled.
    #[serde(rename = "carbonIntensity_S", default)]
    pub carbon_intensity_scheduled: f64,

    /// Intensity recorded at execution time. `0` until the prompt completes.
    #[serde(rename = "carbonIntensity_C", default)]
    pub carbon_intensity_completed: f64,

    #[serde(rename = "outTokens", default, skip_serializing_if = "Option::is_none")]
    pub out_tokens: Option<u64>,

    #[serde(rename = "completedAt", default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
}

/// Body of `POST /api/send`.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct SendRequest {
    pub prompt: String,
    pub model: String,
}

/// Successful response of `POST /api/send`.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct SendResponse {
    pub message: String,
    #[serde(default)]
    pub out_tokens: Option<u64>,
}

/// Body of `POST /api/schedule`.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct ScheduleRequest {
    pub prompt: String,
    pub model: String,
    pub schedule: String,
}

/// Successful response of `POST /api/schedule`.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct ScheduleResponse {
    pub message: String,
}

/// Error body returned alongside non-2xx statuses.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}
