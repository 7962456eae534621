//! Preview command handler.
//!
//! Renders a standalone HTML page containing the update notification, as a
//! freshly loaded dashboard would show it.

use std::path::{Path, PathBuf};

use patchbell_core::{
    Element, NOTIFICATION_ELEMENT_ID, NOTIFICATION_STYLESHEET, NotificationSurface,
    NotificationView, PageDocument, STYLESHEET_MARKER_ID, UpdateInfo,
};
use tracing::info;

use super::read_input;
use crate::error::CliError;

/// Arguments for the preview command.
#[derive(Debug, Clone)]
pub struct PreviewArgs {
    pub current: String,
    pub latest: String,
    pub changelog: Option<PathBuf>,
    pub admin: bool,
    pub out: Option<PathBuf>,
}

/// Build the preview page for an update candidate.
pub fn render_preview(info: &UpdateInfo, is_admin: bool) -> String {
    let document = PageDocument::new(format!("Update {} preview", info.latest_version));
    document.append(Element::raw(
        "app",
        "<main id=\"app\"><h1>Dashboard</h1><p>Page content.</p></main>",
    ));

    let view = NotificationView::build(info, is_admin);
    document.insert_at_top(&view);
    if !document.has_stylesheet(STYLESHEET_MARKER_ID) {
        document.inject_stylesheet(STYLESHEET_MARKER_ID, NOTIFICATION_STYLESHEET);
    }
    document.set_visible(NOTIFICATION_ELEMENT_ID, true);
    document.to_html()
}

/// Execute the preview command.
pub fn execute(args: PreviewArgs) -> Result<(), CliError> {
    let mut info = UpdateInfo::new(args.current, args.latest);
    if let Some(path) = &args.changelog {
        info = info.with_changelog(read_input(path)?);
    }

    let html = render_preview(&info, args.admin);
    match &args.out {
        Some(path) => write_page(path, &html),
        None => {
            print!("{html}");
            Ok(())
        }
    }
}

fn write_page(path: &Path, html: &str) -> Result<(), CliError> {
    std::fs::write(path, html).map_err(|e| CliError::Io(format!("{}: {e}", path.display())))?;
    info!(path = %path.display(), "Preview written");
    println!("Preview written to {}", path.display());
    Ok(())
}
