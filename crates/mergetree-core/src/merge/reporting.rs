//! Merge summary reporting

use super::MergeResult;

/// Merge summary reporter
pub struct SummaryReporter;

impl SummaryReporter {
    /// Generate the processing summary
    #[must_use]
    pub fn generate_summary(result: &MergeResult) -> String {
        let mut output = String::new();

        let operations = [
            ("Moved", result.moved),
            ("Removed files", result.removed_files),
            ("Removed directories", result.removed_dirs),
        ];
        let categories = [
            ("Identical files", result.identical),
            ("Overridden files", result.overridden),
            ("Backed-up files", result.backed_up),
            ("Special files", result.special),
            ("Only in lower-tree", result.only_in_lower),
            ("Only in upper-tree", result.only_in_upper),
            ("Older files", result.older),
            ("Newer files", result.newer),
            ("Seems same content", result.same_content),
        ];

        output.push_str("\nProcessing Summary:\n");
        for (label, count) in operations {
            output.push_str(&format!(" {label}: {count}\n"));
        }
        output.push('\n');
        for (label, count) in categories {
            output.push_str(&format!(" {label}: {count}\n"));
        }

        if !result.errors.is_empty() {
            output.push_str(&format!("\n Failed operations: {}\n", result.errors.len()));
            for error in &result.errors {
                output.push_str(&format!("  - {error}\n"));
            }
        }

        output
    }
}
