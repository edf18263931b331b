use greenprompt_client::{
    types::{ScheduleResponse, SendResponse},
    FetchOutcome,
};
use serde::Serialize;

/// What the submission result region shows after a send or schedule attempt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SubmissionView {
    /// An immediate send succeeded.
    Sent {
        message: String,
        out_tokens: Option<u64>,
    },
    /// A scheduled send was accepted.
    Scheduled { message: String },
    /// The attempt failed or was rejected; only the error text is shown.
    Failed { error: String },
}

impl SubmissionView {
    pub fn from_send(outcome: &FetchOutcome<SendResponse>) -> Self {
        match outcome {
            Ok(response) => Self::Sent {
                message: response.message.clone(),
                out_tokens: response.out_tokens,
            },
            Err(e) => Self::Failed {
                error: e.to_string(),
            },
        }
    }

    pub fn from_schedule(outcome: &FetchOutcome<ScheduleResponse>) -> Self {
        match outcome {
            Ok(response) => Self::Scheduled {
                message: response.message.clone(),
            },
            Err(e) => Self::Failed {
                error: e.to_string(),
            },
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use greenprompt_client::{error::SELECT_SCHEDULE_MESSAGE, FetchError};

    #[test]
    fn test_send_failure_shows_only_error_text() {
        let view = SubmissionView::from_send(&Err(FetchError::Status {
            status: 429,
            message: Some("rate limited".into()),
        }));
        assert_eq!(
            view,
            SubmissionView::Failed {
                error: "rate limited".into()
            }
        );
    }

    #[test]
    fn test_send_success_keeps_tokens() {
        let view = SubmissionView::from_send(&Ok(SendResponse {
            message: "<p>hi</p>".into(),
            out_tokens: Some(17),
        }));
        assert_eq!(
            view,
            SubmissionView::Sent {
                message: "<p>hi</p>".into(),
                out_tokens: Some(17)
            }
        );
        assert!(!view.is_failure());
    }

    #[test]
    fn test_schedule_validation_failure() {
        let view = SubmissionView::from_schedule(&Err(FetchError::Validation(
            SELECT_SCHEDULE_MESSAGE.into(),
        )));
        assert!(view.is_failure());
        assert_eq!(
            view,
            SubmissionView::Failed {
                error: "Please select a schedule".into()
            }
        );
    }
}
