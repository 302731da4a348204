//! Operation summaries and confirmation prompts

use colored::Colorize;
use dialoguer::Confirm;

use crate::CamshError;

/// Counts reported after a save or delete
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OperationSummary {
    pub success: usize,
    pub skipped: usize,
    /// One line per skipped item
    pub skip_messages: Vec<String>,
    /// Set when the operation stopped early
    pub error: Option<String>,
}

impl OperationSummary {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_skip(&mut self, msg: String) {
        self.skipped += 1;
        self.skip_messages.push(msg);
    }

    pub fn print(&self, operation: &str) {
        println!("\n{}", format!("=== {operation} Summary ===").bold());
        println!("  {} {}", "✓ Success:".green(), self.success);
        if self.skipped > 0 {
            println!("  {} {}", "⊘ Skipped:".yellow(), self.skipped);
            for msg in &self.skip_messages {
                println!("    - {msg}");
            }
        }
        if let Some(error) = &self.error {
            println!("  {} {error}", "✗ Stopped:".red());
        }
    }
}

/// Ask for confirmation unless `skip` is set
///
/// # Errors
///
/// Returns `CamshError::InvalidInput` if the prompt cannot be shown.
pub fn confirm(prompt: &str, skip: bool) -> Result<bool, CamshError> {
    if skip {
        return Ok(true);
    }
    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| CamshError::InvalidInput(format!("Failed to get confirmation: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_skip_counts() {
        let mut summary = OperationSummary::new();
        summary.success = 2;
        summary.add_skip("/DCIM/a.jpg: read-only".to_string());
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.skip_messages.len(), 1);
        assert!(summary.error.is_none());
    }

    #[test]
    fn test_confirm_skipped() {
        assert!(confirm("Delete?", true).unwrap());
    }
}
