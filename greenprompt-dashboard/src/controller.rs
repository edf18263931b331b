use greenprompt_client::{
    error::SELECT_SCHEDULE_MESSAGE,
    types::{ScheduleRequest, ScheduleResponse, SendRequest, SendResponse, SCHEDULE_NONE},
    FetchError, FetchOutcome, GreenPromptClient,
};
use tracing::{info, instrument, warn};

/// Dispatches immediate and scheduled submissions.
///
/// The controller only performs the request and reports its outcome. Deciding what
/// to refresh afterwards is left to the caller.
#[derive(Clone, Debug)]
pub struct SubmissionController {
    client: GreenPromptClient,
}

impl SubmissionController {
    pub fn new(client: GreenPromptClient) -> Self {
        Self { client }
    }

    /// Sends `prompt` for immediate execution on `model`.
    #[instrument(level = "info", skip_all, fields(model = %model))]
    pub async fn submit_now(&self, prompt: &str, model: &str) -> FetchOutcome<SendResponse> {
        let request = SendRequest {
            prompt: prompt.to_string(),
            model: model.to_string(),
        };
        let outcome = self.client.send(&request).await;
        log_outcome("send", &outcome);
        outcome
    }

    /// Schedules `prompt` on `model` for `schedule`.
    ///
    /// A `"None"` schedule is rejected before any network call.
    #[instrument(level = "info", skip_all, fields(model = %model, schedule = %schedule))]
    pub async fn submit_scheduled(
        &self,
        prompt: &str,
        model: &str,
        schedule: &str,
    ) -> FetchOutcome<ScheduleResponse> {
        if schedule == SCHEDULE_NONE {
            info!(
                target = "greenprompt-dashboard",
                event = "schedule-rejected",
                "No schedule selected, not submitting"
            );
            return Err(FetchError::Validation(SELECT_SCHEDULE_MESSAGE.to_string()));
        }
        let request = ScheduleRequest {
            prompt: prompt.to_string(),
            model: model.to_string(),
            schedule: schedule.to_string(),
        };
        let outcome = self.client.schedule(&request).await;
        log_outcome("schedule", &outcome);
        outcome
    }
}

fn log_outcome<T>(operation: &'static str, outcome: &FetchOutcome<T>) {
    match outcome {
        Ok(_) => info!(
            target = "greenprompt-dashboard",
            event = "submission-succeeded",
            operation,
        ),
        Err(e) => warn!(
            target = "greenprompt-dashboard",
            event = "submission-failed",
            operation,
            code = e.code(),
            error = %e,
        ),
    }
}
