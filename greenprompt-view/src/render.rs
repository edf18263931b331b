//! Plain-text rendering of the view models, used by the terminal front end.

use std::fmt::{self, Display, Formatter};

use crate::{
    carbon::{format_intensity, CarbonReading, CarbonStatusView},
    chart::ChartInput,
    prompts::{ListView, PromptRow, EMPTY_LIST_PLACEHOLDER},
    submission::SubmissionView,
};

const INTENSITY_UNIT: &str = "gCO2eq/kWh";
const CHART_WIDTH: usize = 40;

impl Display for CarbonReading {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.intensity, INTENSITY_UNIT, self.zone_label)?;
        if let Some(as_of) = &self.as_of {
            write!(f, " as of {as_of}")?;
        }
        Ok(())
    }
}

impl Display for CarbonStatusView {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match (&self.current, &self.error) {
            (_, Some(error)) => {
                write!(f, "{error}")?;
                if let Some(last) = &self.current {
                    write!(f, " (last reading: {last})")?;
                }
                Ok(())
            }
            (Some(current), None) => write!(f, "Current carbon intensity: {current}"),
            (None, None) => write!(f, "No reading yet"),
        }
    }
}

impl Display for ChartInput {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "No history available");
        }
        let max = self.values.iter().copied().fold(0.0_f64, f64::max);
        let label_width = self.labels.iter().map(String::len).max().unwrap_or(0);
        for (label, value) in self.labels.iter().zip(&self.values) {
            let bar = if max > 0.0 {
                // Bar length is bounded by CHART_WIDTH, so the cast cannot truncate.
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let len = ((value / max) * CHART_WIDTH as f64).round().max(0.0) as usize;
                "#".repeat(len)
            } else {
                String::new()
            };
            writeln!(
                f,
                "{label:<label_width$}  {bar:<CHART_WIDTH$}  {}",
                format_intensity(*value)
            )?;
        }
        Ok(())
    }
}

impl Display for PromptRow {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.badge.label, self.timestamp)?;
        if let Some(model) = &self.model {
            write!(f, " | {model}")?;
        }
        if let Some(schedule) = &self.schedule {
            write!(f, " | schedule: {schedule}")?;
        }
        write!(
            f,
            " | scheduled at {} {INTENSITY_UNIT}",
            self.carbon_intensity_scheduled
        )?;
        if let Some(detail) = &self.detail {
            write!(
                f,
                " | ran at {} {INTENSITY_UNIT} | {} tokens | completed {}",
                detail.carbon_intensity_completed, detail.out_tokens, detail.completed_at
            )?;
        }
        writeln!(f)?;
        writeln!(f, "    {}", self.prompt)?;
        if let Some(detail) = &self.detail {
            writeln!(f, "    [{}]", detail.collapse_id)?;
            for line in detail.response.lines() {
                writeln!(f, "    > {line}")?;
            }
        }
        Ok(())
    }
}

impl Display for ListView {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rows(rows) => rows.iter().try_for_each(|row| write!(f, "{row}")),
            Self::Placeholder => writeln!(f, "{EMPTY_LIST_PLACEHOLDER}"),
            Self::Error(error) => writeln!(f, "{error}"),
        }
    }
}

impl Display for SubmissionView {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sent {
                message,
                out_tokens,
            } => {
                writeln!(f, "{message}")?;
                match out_tokens {
                    Some(tokens) => write!(f, "Tokens: {tokens}"),
                    None => write!(f, "Tokens: n/a"),
                }
            }
            Self::Scheduled { message } => write!(f, "{message}"),
            Self::Failed { error } => write!(f, "{error}"),
        }
    }
}
