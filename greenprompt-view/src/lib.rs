#![allow(clippy::module_name_repetitions)]

//! Pure transformations from fetched GreenPrompt records to the view models each
//! display region renders, plus their plain-text rendering.

pub mod carbon;
pub mod chart;
pub mod prompts;
pub mod render;
pub mod submission;

pub use crate::{
    carbon::{CarbonReading, CarbonStatusView},
    chart::ChartInput,
    prompts::{Badge, CompletedDetail, ListView, PromptListsView, PromptRow},
    submission::SubmissionView,
};
