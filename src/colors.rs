use crate::reconcile::Outcome;

/// ANSI color codes for status labels in the text report
#[derive(Debug, Clone)]
pub struct ColorScheme {
    pub success: &'static str,       // Bright green
    pub failed: &'static str,        // Bright red
    pub not_processed: &'static str, // Bright yellow
    pub heading: &'static str,       // Bold
    pub reset: &'static str,
}

impl ColorScheme {
    pub fn new(use_colors: bool) -> Self {
        if use_colors {
            Self {
                success: "\x1b[92m",
                failed: "\x1b[91m",
                not_processed: "\x1b[93m",
                heading: "\x1b[1m",
                reset: "\x1b[0m",
            }
        } else {
            Self::plain()
        }
    }

    pub fn plain() -> Self {
        Self {
            success: "",
            failed: "",
            not_processed: "",
            heading: "",
            reset: "",
        }
    }

    pub fn for_outcome(&self, outcome: &Outcome) -> &'static str {
        match outcome {
            Outcome::Success { .. } => self.success,
            Outcome::Failed { .. } => self.failed,
            Outcome::NotProcessed => self.not_processed,
        }
    }

    /// Wrap `text` in the color for `outcome`
    pub fn paint_status(&self, outcome: &Outcome, text: &str) -> String {
        let color = self.for_outcome(outcome);
        if color.is_empty() {
            text.to_string()
        } else {
            format!("{}{}{}", color, text, self.reset)
        }
    }
}
