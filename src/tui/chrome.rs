// SPDX-FileCopyrightText: 2026 chapternav contributors
// SPDX-License-Identifier: MIT

// Included by tui/mod.rs. Stateless footer, popup, and label helpers shared
// by the draw functions.

fn footer_help_line(app: &App, toast_suffix: &str) -> Line<'static> {
    let hints: &[(&str, &str)] = if !matches!(app.edit, EditState::Inactive) {
        match app.edit {
            EditState::Menu { .. } => &[("↑↓", "select"), ("Enter", "choose"), ("Esc", "close")],
            _ => &[("Enter", "accept"), ("Esc", "cancel")],
        }
    } else {
        match app.view {
            View::Browsing => &[
                ("↑↓", "move"),
                ("Enter", "open"),
                ("Backspace", "up"),
                ("f", "search"),
                ("q", "quit"),
            ],
            View::Document => &[
                ("↑↓", "scroll"),
                ("e", "edit"),
                ("i", "editor"),
                ("f", "search"),
                ("Esc", "back"),
                ("q", "quit"),
            ],
            View::SearchResults => {
                &[("↑↓", "move"), ("Enter", "goto"), ("Esc", "back"), ("q", "quit")]
            }
            View::RawEditor => {
                if app.editor_insert {
                    &[("Esc", "stop editing")]
                } else {
                    &[("i", "insert"), ("s", "save"), ("q", "close")]
                }
            }
            View::SearchPrompt => &[],
        }
    };

    let mut spans = Vec::with_capacity(hints.len() * 2 + 1);
    for (key, label) in hints {
        spans.push(Span::styled(format!(" {key}"), Style::default().fg(FOOTER_KEY_COLOR)));
        spans.push(Span::styled(
            format!(":{label} "),
            Style::default().fg(FOOTER_LABEL_COLOR),
        ));
    }
    if !toast_suffix.is_empty() {
        spans.push(Span::styled(
            toast_suffix.to_owned(),
            Style::default().fg(FOCUS_COLOR).add_modifier(Modifier::BOLD),
        ));
    }
    Line::from(spans)
}

fn search_footer_line(query: &str, toast_suffix: &str) -> Line<'static> {
    let mut spans = vec![
        Span::styled("Search locations: ", Style::default().fg(FOOTER_LABEL_COLOR)),
        Span::styled(query.to_owned(), Style::default().fg(FOCUS_COLOR)),
    ];
    if !toast_suffix.is_empty() {
        spans.push(Span::styled(
            toast_suffix.to_owned(),
            Style::default().fg(FOOTER_LABEL_COLOR),
        ));
    }
    Line::from(spans)
}

/// Centered popup rectangle sized as a percentage of `area`.
fn popup_area(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);
    horizontal[1]
}

fn pick_options(values: Vec<String>) -> Vec<PickOption> {
    values
        .into_iter()
        .map(|value| PickOption { display: value.clone(), value })
        .collect()
}

/// Compact single-line rendering of a JSON value for menus and prompts.
fn value_preview(value: &serde_json::Value) -> String {
    let text = value.to_string();
    if text.chars().count() > 40 {
        let truncated: String = text.chars().take(37).collect();
        format!("{truncated}...")
    } else {
        text
    }
}

/// One result row: the group key followed by its update directories.
fn group_line(group: &SearchGroup, width: usize) -> String {
    let line = format!("{}  [{}]", group.key, group.updates.join(", "));
    if width > 3 && line.chars().count() > width {
        let truncated: String = line.chars().take(width - 3).collect();
        format!("{truncated}...")
    } else {
        line
    }
}
