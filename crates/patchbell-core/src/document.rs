//! In-memory HTML page document.
//!
//! A minimal stand-in for a browser page: an ordered list of body elements
//! addressed by id, plus stylesheet blocks addressed by marker id. It
//! implements [`NotificationSurface`] by rendering views to HTML, and can be
//! serialised to a complete page.

use std::fmt::Write as _;
use std::sync::{Mutex, PoisonError};

use crate::domain::{NotificationView, UpdateControl};
use crate::ports::NotificationSurface;
use crate::render::render_view_html;

/// A body element of the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub id: String,
    pub html: String,
    pub visible: bool,
    /// Kept so the element can be re-rendered when its control changes.
    view: Option<NotificationView>,
}

impl Element {
    /// A static element that is not a notification.
    pub fn raw(id: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            html: html.into(),
            visible: true,
            view: None,
        }
    }
}

#[derive(Debug, Default)]
struct DocumentState {
    title: String,
    body: Vec<Element>,
    stylesheets: Vec<(String, String)>,
}

/// Thread-safe in-memory page.
#[derive(Debug, Default)]
pub struct PageDocument {
    state: Mutex<DocumentState>,
}

impl PageDocument {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            state: Mutex::new(DocumentState {
                title: title.into(),
                ..DocumentState::default()
            }),
        }
    }

    /// Append a static element to the end of the body.
    pub fn append(&self, element: Element) {
        self.lock().body.push(element);
    }

    /// Snapshot of body elements in document order.
    pub fn elements(&self) -> Vec<Element> {
        self.lock().body.clone()
    }

    /// Number of body elements carrying this id.
    pub fn count(&self, element_id: &str) -> usize {
        self.lock()
            .body
            .iter()
            .filter(|e| e.id == element_id)
            .count()
    }

    pub fn element(&self, element_id: &str) -> Option<Element> {
        self.lock()
            .body
            .iter()
            .find(|e| e.id == element_id)
            .cloned()
    }

    pub fn stylesheet_count(&self) -> usize {
        self.lock().stylesheets.len()
    }

    /// Serialise the whole page.
    pub fn to_html(&self) -> String {
        let state = self.lock();
        let mut html = String::from("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
        let _ = writeln!(html, "<title>{}</title>", state.title);
        for (marker, css) in &state.stylesheets {
            let _ = writeln!(html, "<style id=\"{marker}\">{css}</style>");
        }
        html.push_str("</head>\n<body>\n");
        for element in &state.body {
            html.push_str(&element.html);
            html.push('\n');
        }
        html.push_str("</body>\n</html>\n");
        html
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, DocumentState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl NotificationSurface for PageDocument {
    fn insert_at_top(&self, view: &NotificationView) {
        let element = Element {
            id: view.element_id.clone(),
            html: render_view_html(view, false),
            visible: false,
            view: Some(view.clone()),
        };
        self.lock().body.insert(0, element);
    }

    fn remove(&self, element_id: &str) -> bool {
        let mut state = self.lock();
        match state.body.iter().position(|e| e.id == element_id) {
            Some(index) => {
                state.body.remove(index);
                true
            }
            None => false,
        }
    }

    fn contains(&self, element_id: &str) -> bool {
        self.lock().body.iter().any(|e| e.id == element_id)
    }

    fn set_visible(&self, element_id: &str, visible: bool) {
        let mut state = self.lock();
        if let Some(element) = state.body.iter_mut().find(|e| e.id == element_id) {
            element.visible = visible;
            if let Some(view) = &element.view {
                element.html = render_view_html(view, visible);
            }
        }
    }

    fn set_update_control(&self, element_id: &str, control: UpdateControl) {
        let mut state = self.lock();
        if let Some(element) = state.body.iter_mut().find(|e| e.id == element_id) {
            if let Some(view) = element.view.as_mut() {
                view.update_control = control;
                element.html = render_view_html(view, element.visible);
            }
        }
    }

    fn has_stylesheet(&self, marker_id: &str) -> bool {
        self.lock().stylesheets.iter().any(|(m, _)| m == marker_id)
    }

    fn inject_stylesheet(&self, marker_id: &str, css: &str) {
        let mut state = self.lock();
        if !state.stylesheets.iter().any(|(m, _)| m == marker_id) {
            state
                .stylesheets
                .push((marker_id.to_string(), css.to_string()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NOTIFICATION_ELEMENT_ID, STYLESHEET_MARKER_ID, UpdateInfo};

    fn view() -> NotificationView {
        NotificationView::build(&UpdateInfo::new("1.0.0", "1.1.0"), true)
    }

    #[test]
    fn test_insert_goes_to_top_hidden() {
        let doc = PageDocument::new("Dashboard");
        doc.append(Element::raw("main", "<main>content</main>"));
        doc.insert_at_top(&view());

        let elements = doc.elements();
        assert_eq!(elements[0].id, NOTIFICATION_ELEMENT_ID);
        assert!(!elements[0].visible);
        assert_eq!(elements[1].id, "main");
    }

    #[test]
    fn test_set_visible_rerenders_with_show_class() {
        let doc = PageDocument::new("Dashboard");
        doc.insert_at_top(&view());
        doc.set_visible(NOTIFICATION_ELEMENT_ID, true);

        let element = doc.element(NOTIFICATION_ELEMENT_ID).unwrap();
        assert!(element.visible);
        assert!(element.html.contains("update-notification-top show"));
    }

    #[test]
    fn test_remove_missing_returns_false() {
        let doc = PageDocument::new("Dashboard");
        assert!(!doc.remove(NOTIFICATION_ELEMENT_ID));
    }

    #[test]
    fn test_update_control_rerenders_button() {
        let doc = PageDocument::new("Dashboard");
        doc.insert_at_top(&view());
        doc.set_update_control(NOTIFICATION_ELEMENT_ID, UpdateControl::busy());

        let html = doc.element(NOTIFICATION_ELEMENT_ID).unwrap().html;
        assert!(html.contains("Updating…"));
        assert!(html.contains("disabled"));
    }

    #[test]
    fn test_stylesheet_injection_is_idempotent() {
        let doc = PageDocument::new("Dashboard");
        doc.inject_stylesheet(STYLESHEET_MARKER_ID, "a{}");
        doc.inject_stylesheet(STYLESHEET_MARKER_ID, "b{}");

        assert_eq!(doc.stylesheet_count(), 1);
        assert!(doc.to_html().contains("<style id=\"update-notification-styles\">a{}</style>"));
    }
}
