use greenprompt_client::types::{SCHEDULE_NONE, SCHEDULE_PRESETS};
use serde::Serialize;

/// The user-editable submission fields.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PromptForm {
    pub prompt: String,
    pub model: String,
    /// Either a target time or the `"None"` sentinel.
    pub schedule: String,
}

impl PromptForm {
    pub fn new(default_model: impl Into<String>) -> Self {
        Self {
            prompt: String::new(),
            model: default_model.into(),
            schedule: SCHEDULE_NONE.to_string(),
        }
    }
}

/// Help text for the schedule field, listing the scheduler's preset windows.
pub fn schedule_help() -> String {
    format!(
        "When to run the prompt: a target time or one of {}. `{SCHEDULE_NONE}` is rejected",
        SCHEDULE_PRESETS
            .iter()
            .map(|preset| format!("\"{preset}\""))
            .collect::<Vec<_>>()
            .join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_form_has_no_schedule() {
        let form = PromptForm::new("gpt-4o-mini");
        assert_eq!(form.schedule, "None");
        assert_eq!(form.model, "gpt-4o-mini");
        assert!(form.prompt.is_empty());
    }

    #[test]
    fn test_schedule_help_lists_every_preset() {
        let help = schedule_help();
        for preset in SCHEDULE_PRESETS {
            assert!(help.contains(&format!("\"{preset}\"")), "missing {preset}");
        }
        assert!(help.contains("`None` is rejected"));
    }
}
