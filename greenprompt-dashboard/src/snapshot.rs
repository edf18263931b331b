use std::fmt::{self, Display, Formatter};

use greenprompt_view::{CarbonStatusView, ChartInput, ListView, SubmissionView};
use serde::Serialize;

use crate::form::PromptForm;

const LOADING: &str = "Loading...";
const PENDING_TITLE: &str = "Pending prompts";

/// Copy of every dashboard region at one point in time.
///
/// A `None` region has not received its first response yet.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub carbon: Option<CarbonStatusView>,
    pub chart: Option<ChartInput>,
    pub pending: Option<ListView>,
    pub completed: Option<ListView>,
    pub submission: Option<SubmissionView>,
    pub form: PromptForm,
}

fn section<W: fmt::Write, T: Display>(
    f: &mut W,
    title: &str,
    region: Option<&T>,
) -> fmt::Result {
    writeln!(f, "== {title} ==")?;
    match region {
        Some(view) => {
            let text = view.to_string();
            write!(f, "{text}")?;
            if !text.ends_with('\n') {
                writeln!(f)?;
            }
        }
        None => writeln!(f, "{LOADING}")?,
    }
    writeln!(f)
}

impl DashboardSnapshot {
    /// The pending list section alone, as shown after a scheduled submission.
    pub fn pending_section(&self) -> String {
        let mut text = String::new();
        // Writing into a String cannot fail.
        let _ = section(&mut text, PENDING_TITLE, self.pending.as_ref());
        text
    }
}

impl Display for DashboardSnapshot {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        section(f, "Carbon intensity", self.carbon.as_ref())?;
        section(f, "Carbon intensity history", self.chart.as_ref())?;
        section(f, PENDING_TITLE, self.pending.as_ref())?;
        section(f, "Completed prompts", self.completed.as_ref())?;
        if let Some(submission) = &self.submission {
            section(f, "Last submission", Some(submission))?;
        }
        Ok(())
    }
}
