#![allow(clippy::module_name_repetitions)]
#![allow(clippy::doc_markdown)]

pub mod config;
pub mod controller;
pub mod dashboard;
pub mod form;
pub mod poll;
pub mod region;
pub mod snapshot;
pub mod telemetry;


pub use crate::{
    config::GreenPromptDashboardConfig, controller::SubmissionController, dashboard::Dashboard,
    form::PromptForm, snapshot::DashboardSnapshot,
};
