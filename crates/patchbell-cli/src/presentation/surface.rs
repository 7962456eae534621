//! Notification surface that draws on a terminal.

use std::io::Write;
use std::sync::{Mutex, PoisonError};

use console::{Term, style};
use patchbell_core::{NotificationSurface, NotificationView, UpdateControl};

use super::banner::{banner_lines, control_line};

struct SurfaceState<W> {
    view: Option<NotificationView>,
    visible: bool,
    stylesheets: Vec<String>,
    out: W,
}

/// Draws the notification banner when it becomes visible.
///
/// A terminal has no stylesheets; markers are still tracked so injection
/// stays idempotent. Write errors are ignored, as a lost banner line is
/// not worth failing a notifier operation over.
pub struct TerminalSurface<W: Write + Send> {
    state: Mutex<SurfaceState<W>>,
}

impl TerminalSurface<Term> {
    pub fn stdout() -> Self {
        Self::new(Term::stdout())
    }
}

impl TerminalSurface<Vec<u8>> {
    /// A surface writing into memory.
    pub fn captured() -> Self {
        Self::new(Vec::new())
    }

    pub fn output(&self) -> String {
        String::from_utf8_lossy(&self.lock().out).into_owned()
    }
}

impl<W: Write + Send> TerminalSurface<W> {
    pub fn new(out: W) -> Self {
        Self {
            state: Mutex::new(SurfaceState {
                view: None,
                visible: false,
                stylesheets: Vec::new(),
                out,
            }),
        }
    }

    /// Whether the notification is currently drawn.
    pub fn is_visible(&self) -> bool {
        self.lock().visible
    }

    /// Forget the current view without printing anything.
    pub fn clear(&self) {
        let mut state = self.lock();
        state.view = None;
        state.visible = false;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SurfaceState<W>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn matches_id(view: Option<&NotificationView>, element_id: &str) -> bool {
    view.is_some_and(|v| v.element_id == element_id)
}

impl<W: Write + Send> NotificationSurface for TerminalSurface<W> {
    fn insert_at_top(&self, view: &NotificationView) {
        let mut state = self.lock();
        state.view = Some(view.clone());
        state.visible = false;
    }

    fn remove(&self, element_id: &str) -> bool {
        let mut state = self.lock();
        if !matches_id(state.view.as_ref(), element_id) {
            return false;
        }
        let was_visible = state.visible;
        state.view = None;
        state.visible = false;
        if was_visible {
            let _ = writeln!(state.out, "{}", style("Update notification closed").dim());
        }
        true
    }

    fn contains(&self, element_id: &str) -> bool {
        matches_id(self.lock().view.as_ref(), element_id)
    }

    fn set_visible(&self, element_id: &str, visible: bool) {
        let mut state = self.lock();
        if !matches_id(state.view.as_ref(), element_id) || state.visible == visible {
            return;
        }
        state.visible = visible;
        if !visible {
            return;
        }
        let lines = state.view.as_ref().map(banner_lines).unwrap_or_default();
        let _ = writeln!(state.out);
        for line in lines {
            let _ = writeln!(state.out, "{line}");
        }
        let _ = state.out.flush();
    }

    fn set_update_control(&self, element_id: &str, control: UpdateControl) {
        let mut state = self.lock();
        if !matches_id(state.view.as_ref(), element_id) {
            return;
        }
        if let Some(view) = state.view.as_mut() {
            view.update_control = control;
        }
        if state.visible {
            let _ = writeln!(state.out, "  {}", control_line(control));
            let _ = state.out.flush();
        }
    }

    fn has_stylesheet(&self, marker_id: &str) -> bool {
        self.lock().stylesheets.iter().any(|m| m == marker_id)
    }

    fn inject_stylesheet(&self, marker_id: &str, _css: &str) {
        let mut state = self.lock();
        if !state.stylesheets.iter().any(|m| m == marker_id) {
            state.stylesheets.push(marker_id.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use patchbell_core::{NOTIFICATION_ELEMENT_ID, UpdateInfo};

    fn view(latest: &str) -> NotificationView {
        NotificationView::build(&UpdateInfo::new("1.0.0", latest), true)
    }

    #[test]
    fn test_banner_printed_on_show() {
        let surface = TerminalSurface::captured();
        surface.insert_at_top(&view("1.1.0"));
        assert!(surface.output().is_empty());

        surface.set_visible(NOTIFICATION_ELEMENT_ID, true);
        let output = console::strip_ansi_codes(&surface.output()).into_owned();
        assert!(output.contains("Update 1.1.0 available"));
        assert!(surface.is_visible());
    }

    #[test]
    fn test_showing_twice_prints_once() {
        let surface = TerminalSurface::captured();
        surface.insert_at_top(&view("1.1.0"));
        surface.set_visible(NOTIFICATION_ELEMENT_ID, true);
        surface.set_visible(NOTIFICATION_ELEMENT_ID, true);

        assert_eq!(surface.output().matches("available").count(), 1);
    }

    #[test]
    fn test_replace_holds_single_view() {
        let surface = TerminalSurface::captured();
        surface.insert_at_top(&view("1.1.0"));
        assert!(surface.remove(NOTIFICATION_ELEMENT_ID));
        surface.insert_at_top(&view("1.2.0"));

        assert!(surface.contains(NOTIFICATION_ELEMENT_ID));
        assert!(!surface.remove("other-element"));
    }

    #[test]
    fn test_busy_control_printed_while_visible() {
        let surface = TerminalSurface::captured();
        surface.insert_at_top(&view("1.1.0"));
        surface.set_visible(NOTIFICATION_ELEMENT_ID, true);
        surface.set_update_control(NOTIFICATION_ELEMENT_ID, UpdateControl::busy());

        assert!(surface.output().contains("Updating…"));
    }

    #[test]
    fn test_stylesheet_marker_tracked() {
        let surface = TerminalSurface::captured();
        assert!(!surface.has_stylesheet("styles"));
        surface.inject_stylesheet("styles", "a{}");
        surface.inject_stylesheet("styles", "a{}");
        assert!(surface.has_stylesheet("styles"));
    }
}
