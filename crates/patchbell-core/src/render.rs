//! HTML rendering of the notification view.

use std::fmt::Write as _;

use crate::changelog::blocks_to_html;
use crate::domain::NotificationView;

/// Shared stylesheet for the notification, injected once per page.
pub const NOTIFICATION_STYLESHEET: &str = r".update-notification-top {
  position: fixed; top: 0; left: 0; right: 0; z-index: 10000;
  transform: translateY(-100%); opacity: 0;
  transition: transform 0.3s ease, opacity 0.3s ease;
}
.update-notification-top.show { transform: translateY(0); opacity: 1; }
.update-notification-content {
  max-width: 960px; margin: 0 auto; padding: 16px 20px;
  background: #1f6feb; color: #fff; border-radius: 0 0 8px 8px;
  box-shadow: 0 4px 12px rgba(0, 0, 0, 0.2);
}
.update-notification-header { display: flex; justify-content: space-between; align-items: center; }
.update-notification-title { font-weight: 600; font-size: 1.05rem; }
.update-notification-close { background: none; border: none; color: inherit; cursor: pointer; font-size: 1.2rem; }
.update-changelog details { margin-top: 8px; }
.changelog-content { max-height: 240px; overflow-y: auto; padding: 8px 0; }
.update-notification-actions { display: flex; gap: 8px; margin-top: 12px; }
.update-notification-actions button[disabled] { opacity: 0.6; cursor: not-allowed; }
";

/// Render a notification view as an HTML element.
///
/// `visible` adds the `show` class that drives the slide-in transition.
pub fn render_view_html(view: &NotificationView, visible: bool) -> String {
    let show = if visible { " show" } else { "" };
    let control = view.update_control;
    let disabled = if control.enabled { "" } else { " disabled" };

    let mut html = String::new();
    let _ = write!(
        html,
        "<div id=\"{id}\" class=\"update-notification-top{show}\">\
         <div class=\"update-notification-content\">\
         <div class=\"update-notification-header\">\
         <div class=\"update-notification-title\"><span>{title}</span></div>\
         <button class=\"update-notification-close\" data-action=\"dismiss\" data-version=\"{latest}\">&times;</button>\
         </div>\
         <div class=\"update-notification-body\">\
         <p class=\"current-version\">Current version: <strong>{current}</strong> \
         → New version: <strong>{latest}</strong></p>",
        id = view.element_id,
        title = view.title(),
        current = view.current_version,
        latest = view.latest_version,
    );

    if view.has_changelog() {
        let _ = write!(
            html,
            "<div class=\"update-changelog\"><details>\
             <summary>What's new?</summary>\
             <div class=\"changelog-content\">{}</div>\
             </details></div>",
            blocks_to_html(&view.changelog)
        );
    }

    let _ = write!(
        html,
        "</div>\
         <div class=\"update-notification-actions\">\
         <button class=\"btn btn-primary btn-sm update-btn-now\" data-action=\"update\"{disabled}>{label}</button>\
         <button class=\"btn btn-secondary btn-sm update-btn-later\" data-action=\"dismiss\" data-version=\"{latest}\">Remind me later</button>\
         </div></div></div>",
        label = control.label(),
        latest = view.latest_version,
    );
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{UpdateControl, UpdateInfo};

    #[test]
    fn test_render_contains_versions_and_actions() {
        let info = UpdateInfo::new("1.0.0", "1.1.0");
        let html = render_view_html(&NotificationView::build(&info, true), false);

        assert!(html.contains("id=\"update-notification-container\""));
        assert!(html.contains("Update 1.1.0 available"));
        assert!(html.contains("<strong>1.0.0</strong>"));
        assert!(html.contains("Remind me later"));
        assert!(!html.contains(" show\""));
        assert!(!html.contains("update-changelog"));
    }

    #[test]
    fn test_update_button_disabled_without_admin() {
        let info = UpdateInfo::new("1.0.0", "1.1.0");
        let html = render_view_html(&NotificationView::build(&info, false), true);

        assert!(html.contains("data-action=\"update\" disabled>Update now"));
        assert!(html.contains("update-notification-top show"));
    }

    #[test]
    fn test_changelog_section_rendered() {
        let info = UpdateInfo::new("1.0.0", "1.1.0").with_changelog("## 1.1.0\n- **fast**");
        let html = render_view_html(&NotificationView::build(&info, true), true);

        assert!(html.contains("<details>"));
        assert!(html.contains("<h5>1.1.0</h5><ul><li><strong>fast</strong></li></ul>"));
    }

    #[test]
    fn test_busy_control_label() {
        let info = UpdateInfo::new("1.0.0", "1.1.0");
        let mut view = NotificationView::build(&info, true);
        view.update_control = UpdateControl::busy();

        let html = render_view_html(&view, true);
        assert!(html.contains("disabled>Updating…"));
    }
}
