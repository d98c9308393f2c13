use crate::app::models::ScanError;
use std::path::PathBuf;

pub struct OutputGenerator;

impl OutputGenerator {
    /// Joins paths with `separator`, ending with one more separator.
    /// Empty when there is nothing to list.
    pub fn format_matches(matches: &[PathBuf], separator: char) -> String {
        let mut output = String::new();

        for path in matches {
            output.push_str(&path.to_string_lossy());
            output.push(separator);
        }

        output
    }

    pub fn format_errors(errors: &[ScanError]) -> String {
        errors
            .iter()
            .map(|err| Self::format_error(err))
            .collect()
    }

    pub fn format_error(message: impl std::fmt::Display) -> String {
        format!("Error: {}\n", message)
    }
}
