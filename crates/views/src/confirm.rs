//! Confirmation prompts for destructive operations.

/// Asks the user to confirm before something is deleted.
pub trait ConfirmPrompt {
    /// `true` when the user agreed.
    fn confirm(&self, question: &str) -> bool;
}

impl<F> ConfirmPrompt for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, question: &str) -> bool {
        self(question)
    }
}

/// Agrees to everything. For callers that confirmed up front (`--yes`).
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeYes;

impl ConfirmPrompt for AssumeYes {
    fn confirm(&self, _question: &str) -> bool {
        true
    }
}
