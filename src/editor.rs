// SPDX-FileCopyrightText: 2026 chapternav contributors
// SPDX-License-Identifier: MIT

//! Raw text edit buffer backing the in-TUI editor view.
//!
//! Pure line/cursor bookkeeping; persistence and JSON validation live in the
//! document store. Columns are measured in characters, not bytes.

/// Editable line buffer with a clamped cursor and a vertical viewport offset.
#[derive(Debug, Clone)]
pub struct EditBuffer {
    lines: Vec<String>,
    cursor_row: usize,
    cursor_col: usize,
    scroll: usize,
}

impl EditBuffer {
    pub fn from_lines(lines: &[String]) -> Self {
        let lines = if lines.is_empty() { vec![String::new()] } else { lines.to_vec() };
        Self { lines, cursor_row: 0, cursor_col: 0, scroll: 0 }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn cursor(&self) -> (usize, usize) {
        (self.cursor_row, self.cursor_col)
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    fn current_line_len(&self) -> usize {
        char_len(&self.lines[self.cursor_row])
    }

    pub fn move_up(&mut self) {
        if self.cursor_row > 0 {
            self.cursor_row -= 1;
            self.cursor_col = self.cursor_col.min(self.current_line_len());
        }
    }

    pub fn move_down(&mut self) {
        if self.cursor_row + 1 < self.lines.len() {
            self.cursor_row += 1;
            self.cursor_col = self.cursor_col.min(self.current_line_len());
        }
    }

    pub fn move_left(&mut self) {
        if self.cursor_col > 0 {
            self.cursor_col -= 1;
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor_col < self.current_line_len() {
            self.cursor_col += 1;
        }
    }

    pub fn move_line_start(&mut self) {
        self.cursor_col = 0;
    }

    pub fn move_line_end(&mut self) {
        self.cursor_col = self.current_line_len();
    }

    pub fn insert_char(&mut self, ch: char) {
        let line = &mut self.lines[self.cursor_row];
        let at = byte_index(line, self.cursor_col);
        line.insert(at, ch);
        self.cursor_col += 1;
    }

    /// Splits the current line at the cursor and moves to the start of the
    /// newly created line.
    pub fn insert_newline(&mut self) {
        let line = &mut self.lines[self.cursor_row];
        let at = byte_index(line, self.cursor_col);
        let tail = line.split_off(at);
        self.lines.insert(self.cursor_row + 1, tail);
        self.cursor_row += 1;
        self.cursor_col = 0;
    }

    /// Deletes the character before the cursor; at column 0 joins the current
    /// line onto the previous one, leaving the cursor at the join point.
    pub fn backspace(&mut self) {
        if self.cursor_col > 0 {
            let line = &mut self.lines[self.cursor_row];
            let at = byte_index(line, self.cursor_col - 1);
            line.remove(at);
            self.cursor_col -= 1;
        } else if self.cursor_row > 0 {
            let current = self.lines.remove(self.cursor_row);
            self.cursor_row -= 1;
            self.cursor_col = self.current_line_len();
            self.lines[self.cursor_row].push_str(&current);
        }
    }

    /// Deletes the character under the cursor; at end of line joins the next
    /// line onto the current one.
    pub fn delete(&mut self) {
        if self.cursor_col < self.current_line_len() {
            let line = &mut self.lines[self.cursor_row];
            let at = byte_index(line, self.cursor_col);
            line.remove(at);
        } else if self.cursor_row + 1 < self.lines.len() {
            let next = self.lines.remove(self.cursor_row + 1);
            self.lines[self.cursor_row].push_str(&next);
        }
    }

    /// Keeps the cursor row inside a viewport of `rows` visible lines. A
    /// collapsed viewport pins the scroll to the cursor row so the offset
    /// never ends up above the cursor.
    pub fn scroll_to_cursor(&mut self, rows: usize) {
        if rows == 0 {
            self.scroll = self.cursor_row;
            return;
        }
        if self.cursor_row < self.scroll {
            self.scroll = self.cursor_row;
        } else if self.cursor_row >= self.scroll + rows {
            self.scroll = self.cursor_row + 1 - rows;
        }
    }
}

fn char_len(line: &str) -> usize {
    line.chars().count()
}

fn byte_index(line: &str, col: usize) -> usize {
    line.char_indices().nth(col).map(|(index, _)| index).unwrap_or(line.len())
}

#[cfg(test)]
mod tests;
