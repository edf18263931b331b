#![allow(clippy::module_name_repetitions)]
#![allow(clippy::doc_markdown)]

//! HTTP client for the GreenPrompt API: carbon intensity readings, the prompt
//! store and the two submission endpoints.

pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use crate::{
    client::GreenPromptClient,
    config::GreenPromptClientConfig,
    error::{FetchError, FetchOutcome, GreenPromptClientError},
};
