// SPDX-FileCopyrightText: 2026 chapternav contributors
// SPDX-License-Identifier: MIT

//! Terminal UI.
//!
//! The `App` struct is the navigation state machine: it decides what is shown
//! (directory listing, document, search prompt/results, raw editor, edit
//! prompts) and how key presses move between those views. Drawing is ratatui +
//! crossterm; the terminal lifecycle is managed by an RAII guard.

use std::error::Error;
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::catalog::{Catalog, CatalogError, EntryAction, PARENT_ENTRY};
use crate::editor::EditBuffer;
use crate::search::{search_locations, SearchGroup};
use crate::store::DocumentStore;

const FOCUS_COLOR: Color = Color::LightGreen;
const FOOTER_LABEL_COLOR: Color = Color::Gray;
const FOOTER_KEY_COLOR: Color = Color::Cyan;
const TOAST_TTL: Duration = Duration::from_secs(3);

/// Runs the interactive terminal UI over the tree rooted at `root`.
pub fn run(root: impl Into<PathBuf>) -> Result<(), Box<dyn Error>> {
    let mut terminal = TerminalSession::new()?;
    let mut app = App::new(Catalog::new(root))?;

    while !app.should_quit {
        terminal.draw(|frame| draw(frame, &mut app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                _ => {}
            }
        }
    }

    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum View {
    Browsing,
    Document,
    SearchPrompt,
    SearchResults,
    RawEditor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EditAction {
    AddLocation,
    EditLocation,
    RemoveLocation,
    SetCategory,
    RemoveCategory,
}

const EDIT_MENU: [(&str, Option<EditAction>); 6] = [
    ("Add a new location", Some(EditAction::AddLocation)),
    ("Edit existing location", Some(EditAction::EditLocation)),
    ("Remove a location", Some(EditAction::RemoveLocation)),
    ("Add/edit a category", Some(EditAction::SetCategory)),
    ("Remove a category", Some(EditAction::RemoveCategory)),
    ("Cancel", None),
];

/// One entry of a pick step: what is shown versus what is recorded.
#[derive(Debug, Clone)]
struct PickOption {
    display: String,
    value: String,
}

#[derive(Debug, Clone)]
enum PromptStep {
    /// Free text input; `value` accumulates and may be prefilled.
    Text { label: String, value: String },
    /// Selection from a list.
    Pick { label: String, options: Vec<PickOption>, selected: usize },
    /// `y` proceeds, anything else cancels the whole flow.
    Confirm { label: String },
    /// `y`/`n` recorded as `true`/`false`.
    YesNo { label: String },
}

/// A guided multi-step edit prompt.
///
/// One parameterized flow replaces per-action input loops: each step gathers
/// one answer, escape cancels the whole flow without mutating the document,
/// and the collected answers are applied in a single store call at the end.
#[derive(Debug, Clone)]
struct PromptFlow {
    action: EditAction,
    steps: Vec<PromptStep>,
    current: usize,
    answers: Vec<String>,
}

#[derive(Debug, Clone)]
enum EditState {
    Inactive,
    Menu { selected: usize },
    Flow(PromptFlow),
}

#[derive(Debug, Clone)]
struct Toast {
    message: String,
    expires_at: Instant,
}

struct App {
    catalog: Catalog,
    store: DocumentStore,
    current_path: PathBuf,
    entries: Vec<String>,
    browse_state: ListState,
    view: View,
    doc_scroll: usize,
    doc_rows: usize,
    search_query: String,
    search_results: Vec<SearchGroup>,
    results_state: ListState,
    last_search: Option<String>,
    edit: EditState,
    editor: Option<EditBuffer>,
    editor_insert: bool,
    editor_rows: usize,
    toast: Option<Toast>,
    should_quit: bool,
}

impl App {
    fn new(catalog: Catalog) -> Result<Self, CatalogError> {
        let current_path = catalog.root().to_path_buf();
        let entries = catalog.list_entries(&current_path)?;
        let mut browse_state = ListState::default();
        if !entries.is_empty() {
            browse_state.select(Some(0));
        }
        Ok(Self {
            catalog,
            store: DocumentStore::new(),
            current_path,
            entries,
            browse_state,
            view: View::Browsing,
            doc_scroll: 0,
            doc_rows: 0,
            search_query: String::new(),
            search_results: Vec::new(),
            results_state: ListState::default(),
            last_search: None,
            edit: EditState::Inactive,
            editor: None,
            editor_insert: false,
            editor_rows: 0,
            toast: None,
            should_quit: false,
        })
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if self.handle_key_code(key.code) {
            self.should_quit = true;
        }
    }

    /// Dispatches one key press; returns true to quit.
    fn handle_key_code(&mut self, code: KeyCode) -> bool {
        if !matches!(self.edit, EditState::Inactive) {
            self.handle_edit_key(code);
            return false;
        }

        match self.view {
            View::Browsing => self.handle_browsing_key(code),
            View::Document => self.handle_document_key(code),
            View::SearchPrompt => {
                self.handle_search_prompt_key(code);
                false
            }
            View::SearchResults => self.handle_search_results_key(code),
            View::RawEditor => {
                self.handle_editor_key(code);
                false
            }
        }
    }

    fn handle_browsing_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Up => move_selection(&mut self.browse_state, self.entries.len(), -1),
            KeyCode::Down => move_selection(&mut self.browse_state, self.entries.len(), 1),
            KeyCode::Enter => self.select_entry(),
            KeyCode::Backspace => self.go_up(),
            KeyCode::Char('f') => {
                self.search_query.clear();
                self.view = View::SearchPrompt;
            }
            _ => {}
        }
        false
    }

    fn handle_document_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Up => self.scroll_document(-1),
            KeyCode::Down => self.scroll_document(1),
            KeyCode::PageUp => self.scroll_document(-(self.doc_rows.max(1) as isize)),
            KeyCode::PageDown => self.scroll_document(self.doc_rows.max(1) as isize),
            KeyCode::Home => self.doc_scroll = 0,
            KeyCode::End => self.doc_scroll = self.max_doc_scroll(),
            KeyCode::Char('e') => self.open_edit_menu(),
            KeyCode::Char('i') => self.open_raw_editor(),
            KeyCode::Char('f') => {
                self.search_query.clear();
                self.view = View::SearchPrompt;
            }
            KeyCode::Backspace | KeyCode::Esc => {
                self.store.close();
                self.view = View::Browsing;
            }
            _ => {}
        }
        false
    }

    fn handle_search_prompt_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.search_query.clear();
                self.view = View::Browsing;
            }
            KeyCode::Enter => self.execute_search(),
            KeyCode::Backspace => {
                self.search_query.pop();
            }
            KeyCode::Char(ch) => self.search_query.push(ch),
            _ => {}
        }
    }

    fn handle_search_results_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Up => move_selection(&mut self.results_state, self.search_results.len(), -1),
            KeyCode::Down => move_selection(&mut self.results_state, self.search_results.len(), 1),
            KeyCode::Enter => self.open_search_result(),
            KeyCode::Esc | KeyCode::Backspace => self.discard_search_results(),
            _ => {}
        }
        false
    }

    /// Raw editor keys. Navigation mode mirrors the document viewer (`i` to
    /// start inserting, `s` to save, `q`/escape closes); insert mode edits the
    /// buffer and escape drops back to navigation mode, one level at a time.
    fn handle_editor_key(&mut self, code: KeyCode) {
        let Some(editor) = self.editor.as_mut() else {
            self.view = View::Document;
            return;
        };

        if self.editor_insert {
            match code {
                KeyCode::Esc => self.editor_insert = false,
                KeyCode::Enter => editor.insert_newline(),
                KeyCode::Backspace => editor.backspace(),
                KeyCode::Delete => editor.delete(),
                KeyCode::Up => editor.move_up(),
                KeyCode::Down => editor.move_down(),
                KeyCode::Left => editor.move_left(),
                KeyCode::Right => editor.move_right(),
                KeyCode::Home => editor.move_line_start(),
                KeyCode::End => editor.move_line_end(),
                KeyCode::Char(ch) => editor.insert_char(ch),
                _ => {}
            }
            return;
        }

        match code {
            KeyCode::Char('i') => self.editor_insert = true,
            KeyCode::Char('s') => self.save_raw_editor(),
            KeyCode::Char('q') | KeyCode::Esc => {
                self.editor = None;
                self.view = View::Document;
            }
            KeyCode::Up => editor.move_up(),
            KeyCode::Down => editor.move_down(),
            KeyCode::Left => editor.move_left(),
            KeyCode::Right => editor.move_right(),
            KeyCode::Home => editor.move_line_start(),
            KeyCode::End => editor.move_line_end(),
            _ => {}
        }
    }

    fn select_entry(&mut self) {
        let index = self.browse_state.selected().unwrap_or(0);
        match self.catalog.resolve_entry(&self.current_path, &self.entries, index) {
            EntryAction::Invalid | EntryAction::Ignore => {}
            EntryAction::NavigateUp => self.go_up(),
            EntryAction::NavigateInto(path) => {
                self.current_path = path;
                self.refresh_entries();
            }
            EntryAction::OpenDocument(path) => {
                self.store.open(&path);
                self.doc_scroll = 0;
                self.view = View::Document;
            }
        }
    }

    fn go_up(&mut self) {
        let parent = self.catalog.go_up(&self.current_path);
        if parent != self.current_path {
            self.current_path = parent;
            self.refresh_entries();
        }
    }

    /// Recomputes the listing for the current directory and resets the cursor.
    fn refresh_entries(&mut self) {
        match self.catalog.list_entries(&self.current_path) {
            Ok(entries) => self.entries = entries,
            Err(err) => {
                self.entries = Vec::new();
                self.set_toast(err.to_string());
            }
        }
        self.browse_state =
            ListState::default().with_selected(if self.entries.is_empty() { None } else { Some(0) });
    }

    fn execute_search(&mut self) {
        if self.search_query.trim().is_empty() {
            // Caller-side contract: never walk the tree for a blank query.
            self.search_query.clear();
            self.view = View::Browsing;
            return;
        }

        // The query is matched verbatim; surrounding whitespace narrows it.
        let query = self.search_query.clone();
        self.search_results = search_locations(self.catalog.root(), &query);
        self.last_search = Some(query.clone());
        if self.search_results.is_empty() {
            self.set_toast(format!("No matches for '{query}'"));
            self.view = View::Browsing;
            self.results_state = ListState::default();
        } else {
            self.results_state = ListState::default().with_selected(Some(0));
            self.view = View::SearchResults;
        }
    }

    /// Jumps to the directory behind the highlighted group key, if it still
    /// exists; otherwise stays on the results.
    fn open_search_result(&mut self) {
        let Some(group) = self.results_state.selected().and_then(|idx| self.search_results.get(idx))
        else {
            return;
        };

        let mut path = self.catalog.root().to_path_buf();
        for segment in group.key.split('/') {
            path.push(segment);
        }
        if !path.is_dir() {
            self.set_toast(format!("'{}' is no longer a directory", group.key));
            return;
        }

        self.current_path = path;
        self.refresh_entries();
        self.discard_search_results();
    }

    fn discard_search_results(&mut self) {
        self.search_results = Vec::new();
        self.results_state = ListState::default();
        self.view = View::Browsing;
    }

    fn open_edit_menu(&mut self) {
        match self.store.document() {
            Some(doc) if doc.is_structured() => self.edit = EditState::Menu { selected: 0 },
            Some(_) => self.set_toast("Not a JSON object; structured edits are disabled"),
            None => {}
        }
    }

    fn open_raw_editor(&mut self) {
        let Some(doc) = self.store.document() else {
            return;
        };
        self.editor = Some(EditBuffer::from_lines(doc.lines()));
        self.editor_insert = false;
        self.view = View::RawEditor;
    }

    fn save_raw_editor(&mut self) {
        let Some(editor) = self.editor.as_ref() else {
            return;
        };
        match self.store.save_raw(&editor.text()) {
            Ok(()) => {
                self.set_toast("Saved");
                self.editor = None;
                self.doc_scroll = 0;
                self.view = View::Document;
            }
            Err(err) => self.set_toast(err.to_string()),
        }
    }

    fn handle_edit_key(&mut self, code: KeyCode) {
        let edit = std::mem::replace(&mut self.edit, EditState::Inactive);
        match edit {
            EditState::Inactive => {}
            EditState::Menu { selected } => self.handle_menu_key(code, selected),
            EditState::Flow(flow) => self.handle_flow_key(code, flow),
        }
    }

    fn handle_menu_key(&mut self, code: KeyCode, mut selected: usize) {
        match code {
            KeyCode::Up => {
                selected = selected.saturating_sub(1);
                self.edit = EditState::Menu { selected };
            }
            KeyCode::Down => {
                selected = (selected + 1).min(EDIT_MENU.len() - 1);
                self.edit = EditState::Menu { selected };
            }
            KeyCode::Enter => match EDIT_MENU[selected].1 {
                Some(action) => self.begin_edit_action(action),
                None => {}
            },
            KeyCode::Esc => {}
            _ => self.edit = EditState::Menu { selected },
        }
    }

    fn begin_edit_action(&mut self, action: EditAction) {
        let Some(doc) = self.store.document() else {
            return;
        };

        let steps = match action {
            EditAction::AddLocation => {
                vec![PromptStep::Text { label: "New location name".to_owned(), value: String::new() }]
            }
            EditAction::EditLocation => {
                let locations = doc.locations();
                if locations.is_empty() {
                    self.set_toast("No locations to edit");
                    return;
                }
                vec![
                    PromptStep::Pick {
                        label: "Select a location to edit".to_owned(),
                        options: pick_options(locations),
                        selected: 0,
                    },
                    PromptStep::Text { label: String::new(), value: String::new() },
                ]
            }
            EditAction::RemoveLocation => {
                let locations = doc.locations();
                if locations.is_empty() {
                    self.set_toast("No locations to remove");
                    return;
                }
                vec![
                    PromptStep::Pick {
                        label: "Select a location to remove".to_owned(),
                        options: pick_options(locations),
                        selected: 0,
                    },
                    PromptStep::Confirm { label: String::new() },
                ]
            }
            EditAction::SetCategory => vec![
                PromptStep::Text { label: "Category name".to_owned(), value: String::new() },
                PromptStep::YesNo {
                    label: "Store as a comma-separated list? (y/n)".to_owned(),
                },
                PromptStep::Text { label: String::new(), value: String::new() },
            ],
            EditAction::RemoveCategory => {
                let keys = doc.category_keys();
                if keys.is_empty() {
                    self.set_toast("No categories to remove");
                    return;
                }
                let options = keys
                    .into_iter()
                    .map(|key| {
                        let preview = doc
                            .data()
                            .and_then(|data| data.get(&key))
                            .map(value_preview)
                            .unwrap_or_default();
                        PickOption { display: format!("{key}: {preview}"), value: key }
                    })
                    .collect();
                vec![
                    PromptStep::Pick {
                        label: "Select a category to remove".to_owned(),
                        options,
                        selected: 0,
                    },
                    PromptStep::Confirm { label: String::new() },
                ]
            }
        };

        self.edit =
            EditState::Flow(PromptFlow { action, steps, current: 0, answers: Vec::new() });
    }

    fn handle_flow_key(&mut self, code: KeyCode, mut flow: PromptFlow) {
        let step = &mut flow.steps[flow.current];
        match step {
            PromptStep::Text { value, .. } => match code {
                KeyCode::Esc => return, // cancel: edit stays Inactive
                KeyCode::Enter => {
                    flow.answers.push(value.clone());
                    self.advance_flow(flow);
                    return;
                }
                KeyCode::Backspace => {
                    value.pop();
                }
                KeyCode::Char(ch) => value.push(ch),
                _ => {}
            },
            PromptStep::Pick { options, selected, .. } => match code {
                KeyCode::Esc => return,
                KeyCode::Up => *selected = selected.saturating_sub(1),
                KeyCode::Down => *selected = (*selected + 1).min(options.len() - 1),
                KeyCode::Enter => {
                    flow.answers.push(options[*selected].value.clone());
                    self.advance_flow(flow);
                    return;
                }
                _ => {}
            },
            PromptStep::Confirm { .. } => match code {
                KeyCode::Char('y') | KeyCode::Char('Y') => {
                    flow.answers.push("y".to_owned());
                    self.advance_flow(flow);
                    return;
                }
                // Anything else declines; partial input is discarded.
                _ => {
                    self.set_toast("Cancelled");
                    return;
                }
            },
            PromptStep::YesNo { .. } => match code {
                KeyCode::Char('y') | KeyCode::Char('Y') => {
                    flow.answers.push("true".to_owned());
                    self.advance_flow(flow);
                    return;
                }
                KeyCode::Char('n') | KeyCode::Char('N') => {
                    flow.answers.push("false".to_owned());
                    self.advance_flow(flow);
                    return;
                }
                KeyCode::Esc => return,
                _ => {}
            },
        }
        self.edit = EditState::Flow(flow);
    }

    fn advance_flow(&mut self, mut flow: PromptFlow) {
        flow.current += 1;
        if flow.current >= flow.steps.len() {
            self.finish_flow(flow);
            return;
        }
        self.prepare_flow_step(&mut flow);
        self.edit = EditState::Flow(flow);
    }

    /// Fills in labels and prefills that depend on earlier answers.
    fn prepare_flow_step(&self, flow: &mut PromptFlow) {
        let step = &mut flow.steps[flow.current];
        match (flow.action, flow.current) {
            (EditAction::EditLocation, 1) => {
                if let PromptStep::Text { label, value } = step {
                    *label = format!("New name for '{}'", flow.answers[0]);
                    *value = flow.answers[0].clone();
                }
            }
            (EditAction::RemoveLocation, 1) => {
                if let PromptStep::Confirm { label } = step {
                    *label = format!("Remove location '{}'? (y/n)", flow.answers[0]);
                }
            }
            (EditAction::SetCategory, 2) => {
                if let PromptStep::Text { label, .. } = step {
                    let key = flow.answers[0].trim();
                    let as_list = flow.answers[1] == "true";
                    let mut text = if as_list {
                        format!("Comma-separated values for '{key}'")
                    } else {
                        format!("Value for '{key}'")
                    };
                    if let Some(current) = self
                        .store
                        .document()
                        .and_then(|doc| doc.data())
                        .and_then(|data| data.get(key))
                    {
                        text.push_str(&format!(" (current: {})", value_preview(current)));
                    }
                    *label = text;
                }
            }
            (EditAction::RemoveCategory, 1) => {
                if let PromptStep::Confirm { label } = step {
                    *label = format!("Remove category '{}'? (y/n)", flow.answers[0]);
                }
            }
            _ => {}
        }
    }

    fn finish_flow(&mut self, flow: PromptFlow) {
        let answers = flow.answers;
        let outcome = match flow.action {
            EditAction::AddLocation => self
                .store
                .add_location(&answers[0])
                .map(|()| format!("Added '{}' to locations", answers[0].trim())),
            EditAction::EditLocation => self
                .store
                .edit_location(&answers[0], &answers[1])
                .map(|()| format!("Updated '{}' to '{}'", answers[0], answers[1].trim())),
            EditAction::RemoveLocation => self
                .store
                .remove_location(&answers[0])
                .map(|()| format!("Removed '{}'", answers[0])),
            EditAction::SetCategory => self
                .store
                .set_category(&answers[0], &answers[2], answers[1] == "true")
                .map(|()| format!("Set category '{}'", answers[0].trim())),
            EditAction::RemoveCategory => self
                .store
                .remove_category(&answers[0])
                .map(|()| format!("Removed category '{}'", answers[0])),
        };

        match outcome {
            Ok(message) => {
                self.doc_scroll = 0;
                self.set_toast(message);
            }
            Err(err) => self.set_toast(err.to_string()),
        }
    }

    fn scroll_document(&mut self, delta: isize) {
        let max = self.max_doc_scroll();
        let next = self.doc_scroll.saturating_add_signed(delta);
        self.doc_scroll = next.min(max);
    }

    fn max_doc_scroll(&self) -> usize {
        let lines = self.store.document().map(|doc| doc.lines().len()).unwrap_or(0);
        lines.saturating_sub(self.doc_rows.max(1))
    }

    fn set_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast { message: message.into(), expires_at: Instant::now() + TOAST_TTL });
    }
}

/// Clamped vertical cursor movement; a no-op on empty collections.
fn move_selection(state: &mut ListState, len: usize, delta: isize) {
    if len == 0 {
        state.select(None);
        return;
    }
    let current = state.selected().unwrap_or(0);
    let next = current.saturating_add_signed(delta).min(len - 1);
    state.select(Some(next));
}

fn draw(frame: &mut Frame<'_>, app: &mut App) {
    let area = frame.size();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);
    let main_area = layout[0];
    let status_area = layout[1];

    match app.view {
        View::Browsing | View::SearchPrompt => draw_browse(frame, app, main_area),
        View::Document => draw_document(frame, app, main_area),
        View::SearchResults => draw_search_results(frame, app, main_area),
        View::RawEditor => draw_editor(frame, app, main_area),
    }

    if !matches!(app.edit, EditState::Inactive) {
        draw_edit_overlay(frame, app, main_area);
    }

    let toast_snapshot = app.toast.as_ref().map(|toast| (toast.message.clone(), toast.expires_at));
    let toast_suffix = match toast_snapshot {
        Some((message, expires_at)) if expires_at > Instant::now() => format!(" | {message}"),
        Some(_) => {
            app.toast = None;
            String::new()
        }
        None => String::new(),
    };

    if app.view == View::SearchPrompt {
        let status = Paragraph::new(search_footer_line(&app.search_query, &toast_suffix));
        frame.render_widget(status, status_area);
        let prefix_width = "Search locations: ".chars().count() as u16;
        let cursor_x = status_area
            .x
            .saturating_add(prefix_width)
            .saturating_add(app.search_query.chars().count() as u16)
            .min(status_area.x.saturating_add(status_area.width.saturating_sub(1)));
        frame.set_cursor(cursor_x, status_area.y);
        return;
    }

    let status = Paragraph::new(footer_help_line(app, &toast_suffix));
    frame.render_widget(status, status_area);
}

fn draw_browse(frame: &mut Frame<'_>, app: &mut App, area: Rect) {
    let items = app
        .entries
        .iter()
        .map(|entry| {
            let is_dir = entry == PARENT_ENTRY || app.current_path.join(entry).is_dir();
            let label = if is_dir { format!("{entry}/") } else { entry.clone() };
            ListItem::new(label)
        })
        .collect::<Vec<_>>();
    let title = format!(" {} ", app.current_path.display());
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().fg(FOCUS_COLOR).add_modifier(Modifier::REVERSED));
    frame.render_stateful_widget(list, area, &mut app.browse_state);
}

fn draw_document(frame: &mut Frame<'_>, app: &mut App, area: Rect) {
    app.doc_rows = area.height.saturating_sub(2) as usize;
    let (title, text) = match app.store.document() {
        Some(doc) => {
            let mut title = format!(" {} ", doc.path().display());
            if !doc.is_structured() {
                title.push_str("[raw] ");
            }
            (title, doc.lines().join("\n"))
        }
        None => (" no document ".to_owned(), String::new()),
    };
    let paragraph = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title(title))
        .scroll((app.doc_scroll as u16, 0));
    frame.render_widget(paragraph, area);
}

fn draw_search_results(frame: &mut Frame<'_>, app: &mut App, area: Rect) {
    let width = area.width.saturating_sub(4) as usize;
    let items = app
        .search_results
        .iter()
        .map(|group| ListItem::new(group_line(group, width)))
        .collect::<Vec<_>>();
    let title = match app.last_search.as_deref() {
        Some(query) => format!(" Search results for '{query}' "),
        None => " Search results ".to_owned(),
    };
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().fg(FOCUS_COLOR).add_modifier(Modifier::REVERSED));
    frame.render_stateful_widget(list, area, &mut app.results_state);
}

fn draw_editor(frame: &mut Frame<'_>, app: &mut App, area: Rect) {
    app.editor_rows = area.height.saturating_sub(2) as usize;
    let Some(editor) = app.editor.as_mut() else {
        return;
    };
    editor.scroll_to_cursor(app.editor_rows);

    let title = match app.store.document() {
        Some(doc) => format!(
            " Editing {} {} ",
            doc.path().display(),
            if app.editor_insert { "[insert]" } else { "[view]" }
        ),
        None => " Editing ".to_owned(),
    };
    let text = editor.lines().join("\n");
    let paragraph = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title(title))
        .scroll((editor.scroll() as u16, 0));
    frame.render_widget(paragraph, area);

    let (row, col) = editor.cursor();
    let cursor_y =
        area.y.saturating_add(1).saturating_add(row.saturating_sub(editor.scroll()) as u16);
    let cursor_x = area
        .x
        .saturating_add(1)
        .saturating_add(col as u16)
        .min(area.x.saturating_add(area.width.saturating_sub(2)));
    frame.set_cursor(cursor_x, cursor_y);
}

fn draw_edit_overlay(frame: &mut Frame<'_>, app: &mut App, area: Rect) {
    let popup = popup_area(area, 60, 60);
    frame.render_widget(Clear, popup);

    match &mut app.edit {
        EditState::Inactive => {}
        EditState::Menu { selected } => {
            let items =
                EDIT_MENU.iter().map(|(label, _)| ListItem::new(*label)).collect::<Vec<_>>();
            let mut state = ListState::default().with_selected(Some(*selected));
            let list = List::new(items)
                .block(Block::default().borders(Borders::ALL).title(" Edit options "))
                .highlight_symbol("▶ ")
                .highlight_style(Style::default().fg(FOCUS_COLOR).add_modifier(Modifier::REVERSED));
            frame.render_stateful_widget(list, popup, &mut state);
        }
        EditState::Flow(flow) => {
            let step = &mut flow.steps[flow.current];
            match step {
                PromptStep::Text { label, value } => {
                    let text = format!("{label}\n\n> {value}");
                    let paragraph = Paragraph::new(text)
                        .wrap(Wrap { trim: false })
                        .block(Block::default().borders(Borders::ALL).title(" Input "));
                    frame.render_widget(paragraph, popup);
                }
                PromptStep::Pick { label, options, selected } => {
                    let items = options
                        .iter()
                        .map(|option| ListItem::new(option.display.clone()))
                        .collect::<Vec<_>>();
                    let mut state = ListState::default().with_selected(Some(*selected));
                    let list = List::new(items)
                        .block(
                            Block::default().borders(Borders::ALL).title(format!(" {label} ")),
                        )
                        .highlight_symbol("▶ ")
                        .highlight_style(
                            Style::default().fg(FOCUS_COLOR).add_modifier(Modifier::REVERSED),
                        );
                    frame.render_stateful_widget(list, popup, &mut state);
                }
                PromptStep::Confirm { label } | PromptStep::YesNo { label } => {
                    let paragraph = Paragraph::new(label.clone())
                        .wrap(Wrap { trim: false })
                        .block(Block::default().borders(Borders::ALL).title(" Confirm "));
                    frame.render_widget(paragraph, popup);
                }
            }
        }
    }
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).map_err(|err| {
            teardown_terminal();
            err
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = execute!(stdout, LeaveAlternateScreen);
}

// Extracted footer/popup/formatting helpers.
include!("chrome.rs");
