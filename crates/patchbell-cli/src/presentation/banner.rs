//! Text rendering of the notification for terminals.

use console::style;
use patchbell_core::{ChangelogBlock, HeadingLevel, Inline, NotificationView, UpdateControl};

/// Lines of the notification banner, top to bottom.
pub fn banner_lines(view: &NotificationView) -> Vec<String> {
    let mut lines = vec![
        format!("┌ {}", style(view.title()).bold().cyan()),
        format!(
            "│ Current version: {} → New version: {}",
            style(&view.current_version).bold(),
            style(&view.latest_version).bold().green()
        ),
    ];

    if view.has_changelog() {
        lines.push(format!("│ {}", style("What's new?").underlined()));
        lines.extend(
            changelog_lines(&view.changelog)
                .into_iter()
                .map(|line| format!("│   {line}")),
        );
    }

    lines.push(format!("└ {}", control_line(view.update_control)));
    lines
}

/// The action hint line for the current update control state.
pub fn control_line(control: UpdateControl) -> String {
    let update = if control.busy {
        format!("{}", style(control.label()).yellow())
    } else if control.enabled {
        format!("[u] {}", control.label())
    } else {
        format!("{}", style(format!("[u] {} (requires --admin)", control.label())).dim())
    };
    format!("{update}   [d] Remind me later   [r] Re-check   [q] Quit")
}

/// Changelog blocks as plain terminal lines.
pub fn changelog_lines(blocks: &[ChangelogBlock]) -> Vec<String> {
    let mut lines = Vec::new();
    for block in blocks {
        match block {
            ChangelogBlock::Heading { level, content } => {
                let text = inlines_to_terminal(content);
                lines.push(match level {
                    HeadingLevel::Section => format!("{}", style(text).bold()),
                    HeadingLevel::Subsection => format!("{}", style(text).underlined()),
                });
            }
            ChangelogBlock::List { items } => {
                lines.extend(items.iter().map(|item| format!("• {}", inlines_to_terminal(item))));
            }
            ChangelogBlock::Line { content } => lines.push(inlines_to_terminal(content)),
            ChangelogBlock::Blank => lines.push(String::new()),
        }
    }
    lines
}

fn inlines_to_terminal(inlines: &[Inline]) -> String {
    inlines
        .iter()
        .map(|inline| match inline {
            Inline::Text(text) => text.clone(),
            Inline::Strong(inner) => format!("{}", style(inlines_to_terminal(inner)).bold()),
            Inline::Emphasis(inner) => format!("{}", style(inlines_to_terminal(inner)).italic()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use patchbell_core::{UpdateInfo, format_changelog};

    fn plain(line: &str) -> String {
        console::strip_ansi_codes(line).into_owned()
    }

    #[test]
    fn test_banner_without_changelog() {
        let view = NotificationView::build(&UpdateInfo::new("1.0.0", "1.1.0"), true);
        let lines: Vec<String> = banner_lines(&view).iter().map(|l| plain(l)).collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "┌ Update 1.1.0 available");
        assert_eq!(lines[1], "│ Current version: 1.0.0 → New version: 1.1.0");
        assert!(lines[2].starts_with("└ [u] Update now"));
    }

    #[test]
    fn test_banner_with_changelog() {
        let info = UpdateInfo::new("1.0.0", "1.1.0").with_changelog("## 1.1.0\n- a\n- b");
        let view = NotificationView::build(&info, false);
        let lines: Vec<String> = banner_lines(&view).iter().map(|l| plain(l)).collect();

        assert!(lines.contains(&"│ What's new?".to_string()));
        assert!(lines.contains(&"│   1.1.0".to_string()));
        assert!(lines.contains(&"│   • a".to_string()));
        assert!(lines.contains(&"│   • b".to_string()));
        assert!(lines.last().unwrap().contains("(requires --admin)"));
    }

    #[test]
    fn test_busy_control_line() {
        let line = plain(&control_line(UpdateControl::busy()));
        assert!(line.starts_with("Updating…"));
    }

    #[test]
    fn test_changelog_lines_flatten_markup() {
        let lines: Vec<String> = changelog_lines(&format_changelog("**Bold** and *soft*\n\n### Fixes"))
            .iter()
            .map(|l| plain(l))
            .collect();
        assert_eq!(lines, vec!["Bold and soft", "", "Fixes"]);
    }
}
