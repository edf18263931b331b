use std::sync::Arc;

use greenprompt_client::GreenPromptClient;
use greenprompt_view::{CarbonStatusView, ChartInput, ListView, SubmissionView};
use tokio::{
    sync::{watch, RwLock},
    task::JoinHandle,
};
use tracing::{error, info, instrument};

use crate::{
    controller::SubmissionController,
    form::PromptForm,
    region::Region,
    snapshot::DashboardSnapshot,
};

/// One of the three data sources the dashboard reads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Source {
    Carbon,
    History,
    Prompts,
}

impl Source {
    pub const ALL: [Self; 3] = [Self::Carbon, Self::History, Self::Prompts];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Carbon => "carbon",
            Self::History => "history",
            Self::Prompts => "prompts",
        }
    }
}

/// The GreenPrompt dashboard: every display region, the submission form and the
/// workflows that tie fetches to regions.
///
/// Each refresh touches exactly one data source and only the region(s) fed by it,
/// so refreshes can run concurrently in any order. Every applied update bumps a
/// revision counter that front ends can subscribe to with [`Dashboard::subscribe`].
#[derive(Debug)]
pub struct Dashboard {
    client: GreenPromptClient,
    controller: SubmissionController,
    carbon: Region<CarbonStatusView>,
    chart: Region<ChartInput>,
    pending: Region<ListView>,
    completed: Region<ListView>,
    submission: Region<SubmissionView>,
    form: RwLock<PromptForm>,
    revision: watch::Sender<u64>,
}

impl Dashboard {
    pub fn new(client: GreenPromptClient, default_model: impl Into<String>) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            controller: SubmissionController::new(client.clone()),
            client,
            carbon: Region::new("carbon"),
            chart: Region::new("chart"),
            pending: Region::new("pending"),
            completed: Region::new("completed"),
            submission: Region::new("submission"),
            form: RwLock::new(PromptForm::new(default_model)),
            revision,
        }
    }

    /// Receiver that changes every time any region is updated.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    fn mark_changed(&self, applied: bool) -> bool {
        if applied {
            self.revision.send_modify(|revision| *revision += 1);
        }
        applied
    }

    /// Re-reads the current carbon intensity into the carbon region.
    ///
    /// Returns `false` if a newer refresh superseded this one.
    #[instrument(level = "debug", skip_all)]
    pub async fn refresh_carbon(&self) -> bool {
        let ticket = self.carbon.begin();
        let outcome = self.client.carbon_intensity().await;
        if let Err(e) = &outcome {
            error!(
                target = "greenprompt-dashboard",
                event = "carbon-fetch-failed",
                code = e.code(),
                error = %e,
            );
        }
        let applied = self
            .carbon
            .apply(ticket, |previous| CarbonStatusView::next(previous, &outcome))
            .await;
        self.mark_changed(applied)
    }

    /// Re-reads the carbon history into the chart region. Never leaves the chart uninitialized.
    #[instrument(level = "debug", skip_all)]
    pub async fn refresh_history(&self) -> bool {
        let ticket = self.chart.begin();
        let outcome = self.client.carbon_history().await;
        let applied = self
            .chart
            .apply(ticket, |_| ChartInput::from_outcome(&outcome))
            .await;
        self.mark_changed(applied)
    }

    /// Re-reads the whole prompt store and rebuilds both lists from it.
    ///
    /// The pending and completed regions are sequenced and written independently.
    #[instrument(level = "debug", skip_all)]
    pub async fn refresh_prompts(&self) -> bool {
        let pending_ticket = self.pending.begin();
        let completed_ticket = self.completed.begin();
        let outcome = self.client.prompts().await;
        match &outcome {
            Ok(prompts) => info!(
                target = "greenprompt-dashboard",
                event = "prompts-fetched",
                count = prompts.len(),
            ),
            Err(e) => error!(
                target = "greenprompt-dashboard",
                event = "prompts-fetch-failed",
                code = e.code(),
                error = %e,
            ),
        }
        let pending_applied = self
            .pending
            .apply(pending_ticket, |_| greenprompt_view::prompts::pending_view(&outcome))
            .await;
        let completed_applied = self
            .completed
            .apply(completed_ticket, |_| {
                greenprompt_view::prompts::completed_view(&outcome)
            })
            .await;
        self.mark_changed(pending_applied | completed_applied)
    }

    /// Initial load: the three sources are fetched concurrently, with no ordering between them.
    #[instrument(level = "info", skip_all)]
    pub async fn bootstrap(&self) {
        info!(
            target = "greenprompt-dashboard",
            event = "bootstrap",
            base_url = %self.client.base_url(),
            "Loading carbon intensity, carbon history and prompts"
        );
        tokio::join!(
            self.refresh_carbon(),
            self.refresh_history(),
            self.refresh_prompts()
        );
    }

    /// Starts the refresh of one source as its own task, so a stuck source never
    /// holds back the others.
    pub fn spawn_refresh(self: &Arc<Self>, source: Source) -> JoinHandle<bool> {
        let dashboard = Arc::clone(self);
        tokio::spawn(async move {
            match source {
                Source::Carbon => dashboard.refresh_carbon().await,
                Source::History => dashboard.refresh_history().await,
                Source::Prompts => dashboard.refresh_prompts().await,
            }
        })
    }

    pub async fn form(&self) -> PromptForm {
        self.form.read().await.clone()
    }

    pub async fn set_prompt(&self, prompt: impl Into<String>) {
        self.form.write().await.prompt = prompt.into();
    }

    pub async fn set_model(&self, model: impl Into<String>) {
        self.form.write().await.model = model.into();
    }

    pub async fn set_schedule(&self, schedule: impl Into<String>) {
        self.form.write().await.schedule = schedule.into();
    }

    /// Sends the form's prompt immediately and shows the outcome in the submission region.
    pub async fn submit_now(&self) -> SubmissionView {
        let form = self.form().await;
        let ticket = self.submission.begin();
        let outcome = self.controller.submit_now(&form.prompt, &form.model).await;
        let view = SubmissionView::from_send(&outcome);
        let applied = self.submission.apply(ticket, |_| view.clone()).await;
        self.mark_changed(applied);
        view
    }

    /// Schedules the form's prompt and shows the outcome in the submission region.
    ///
    /// On success the prompt field is cleared and the prompt store is fetched again,
    /// once, so the new prompt shows up in the pending list.
    pub async fn submit_scheduled(&self) -> SubmissionView {
        let form = self.form().await;
        let ticket = self.submission.begin();
        let outcome = self
            .controller
            .submit_scheduled(&form.prompt, &form.model, &form.schedule)
            .await;
        let view = SubmissionView::from_schedule(&outcome);
        let applied = self.submission.apply(ticket, |_| view.clone()).await;
        self.mark_changed(applied);

        if outcome.is_ok() {
            self.form.write().await.prompt.clear();
            self.refresh_prompts().await;
        }
        view
    }

    /// Point-in-time copy of every region and the form.
    pub async fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            carbon: self.carbon.current().await,
            chart: self.chart.current().await,
            pending: self.pending.current().await,
            completed: self.completed.current().await,
            submission: self.submission.current().await,
            form: self.form().await,
        }
    }
}
