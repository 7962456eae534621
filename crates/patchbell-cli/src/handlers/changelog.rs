//! Changelog command handler.

use std::path::Path;

use patchbell_core::changelog_to_html;

use super::read_input;
use crate::error::CliError;

/// Print the HTML fragment for a changelog file (or stdin).
pub fn execute(input: &Path) -> Result<(), CliError> {
    let text = read_input(input)?;
    let html = changelog_to_html(&text);
    if html.is_empty() {
        eprintln!("Changelog is empty.");
        return Ok(());
    }
    println!("{html}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let result = execute(&dir.path().join("missing.md"));
        assert!(matches!(result, Err(CliError::Io(ref m)) if m.contains("missing.md")));
    }

    #[test]
    fn test_existing_file_prints() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("CHANGELOG.md");
        std::fs::write(&path, "## 1.0.0\n- first").unwrap();
        assert!(execute(&path).is_ok());
    }
}
