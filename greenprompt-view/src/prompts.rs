//! Partitioning of the prompt store into the pending and completed lists, and the
//! derived per-row fields the lists display.
//!
//! Everything here is a pure function of one fetch outcome. The two list views are
//! built independently from it and share no state, so an error in one never prevents
//! the other from rendering.

use greenprompt_client::{
    types::{Prompt, PromptStatus},
    FetchOutcome,
};
use serde::Serialize;

use crate::carbon::format_intensity;

/// Text of the single row shown for an empty list.
pub const EMPTY_LIST_PLACEHOLDER: &str = "Nothing here yet";

/// Prefix of the per-row disclosure identifier in the completed list.
pub const COLLAPSE_ID_PREFIX: &str = "collapse-completed-";

/// Status badge derived from a prompt's status.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub label: &'static str,
    pub class: &'static str,
}

impl From<PromptStatus> for Badge {
    fn from(status: PromptStatus) -> Self {
        let class = match status {
            PromptStatus::Pending => "badge bg-warning text-dark",
            PromptStatus::Completed => "badge bg-success",
        };
        Self {
            label: status.as_str(),
            class,
        }
    }
}

/// Fields only a completed prompt has.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CompletedDetail {
    /// Identifier tying the row's disclosure control to this row only.
    ///
    /// Unique within one render pass, not stable across fetches.
    pub collapse_id: String,
    pub carbon_intensity_completed: String,
    pub out_tokens: u64,
    pub completed_at: String,
    pub response: String,
}

/// One row of either list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PromptRow {
    pub timestamp: String,
    pub prompt: String,
    pub model: Option<String>,
    pub schedule: Option<String>,
    pub badge: Badge,
    pub carbon_intensity_scheduled: String,
    /// Always `None` for pending rows: execution-time intensity is unknown until completion.
    pub detail: Option<CompletedDetail>,
}

impl PromptRow {
    fn pending(prompt: &Prompt) -> Self {
        Self {
            timestamp: prompt.timestamp.clone(),
            prompt: prompt.prompt.clone(),
            model: prompt.model.clone(),
            schedule: prompt.schedule.clone(),
            badge: Badge::from(prompt.status),
            carbon_intensity_scheduled: format_intensity(prompt.carbon_intensity_scheduled),
            detail: None,
        }
    }

    fn completed(prompt: &Prompt, position: usize) -> Self {
        Self {
            detail: Some(CompletedDetail {
                collapse_id: collapse_id(position),
                carbon_intensity_completed: format_intensity(prompt.carbon_intensity_completed),
                out_tokens: prompt.out_tokens.unwrap_or_default(),
                completed_at: prompt.completed_at.clone().unwrap_or_default(),
                response: prompt.response.clone().unwrap_or_default(),
            }),
            ..Self::pending(prompt)
        }
    }
}

/// Disclosure identifier for the row at `position` in the completed list.
pub fn collapse_id(position: usize) -> String {
    format!("{COLLAPSE_ID_PREFIX}{position}")
}

/// What one list region shows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "content", rename_all = "snake_case")]
pub enum ListView {
    /// At least one row, in store order.
    Rows(Vec<PromptRow>),
    /// The list is empty; a single placeholder row is shown.
    Placeholder,
    /// The fetch failed; the error text replaces the list content.
    Error(String),
}

impl ListView {
    fn from_rows(rows: Vec<PromptRow>) -> Self {
        if rows.is_empty() {
            Self::Placeholder
        } else {
            Self::Rows(rows)
        }
    }

    pub fn rows(&self) -> &[PromptRow] {
        match self {
            Self::Rows(rows) => rows,
            Self::Placeholder | Self::Error(_) => &[],
        }
    }
}

/// The pending and completed lists for one fetch of the prompt store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PromptListsView {
    pub pending: ListView,
    pub completed: ListView,
}

impl PromptListsView {
    pub fn from_outcome(outcome: &FetchOutcome<Vec<Prompt>>) -> Self {
        Self {
            pending: pending_view(outcome),
            completed: completed_view(outcome),
        }
    }

    pub fn from_prompts(prompts: &[Prompt]) -> Self {
        Self {
            pending: ListView::from_rows(pending_rows(prompts)),
            completed: ListView::from_rows(completed_rows(prompts)),
        }
    }
}

/// View of the pending list for a fetch outcome.
pub fn pending_view(outcome: &FetchOutcome<Vec<Prompt>>) -> ListView {
    match outcome {
        Ok(prompts) => ListView::from_rows(pending_rows(prompts)),
        Err(e) => ListView::Error(e.to_string()),
    }
}

/// View of the completed list for a fetch outcome.
pub fn completed_view(outcome: &FetchOutcome<Vec<Prompt>>) -> ListView {
    match outcome {
        Ok(prompts) => ListView::from_rows(completed_rows(prompts)),
        Err(e) => ListView::Error(e.to_string()),
    }
}

pub fn pending_rows(prompts: &[Prompt]) -> Vec<PromptRow> {
    prompts
        .iter()
        .filter(|p| p.status == PromptStatus::Pending)
        .map(PromptRow::pending)
        .collect()
}

pub fn completed_rows(prompts: &[Prompt]) -> Vec<PromptRow> {
    prompts
        .iter()
        .filter(|p| p.status == PromptStatus::Completed)
        .enumerate()
        .map(|(position, p)| PromptRow::completed(p, position))
        .collect()
}
