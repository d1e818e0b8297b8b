// SPDX-FileCopyrightText: 2026 chapternav contributors
// SPDX-License-Identifier: MIT

use super::EditBuffer;

fn buffer(lines: &[&str]) -> EditBuffer {
    let owned = lines.iter().map(|line| (*line).to_owned()).collect::<Vec<_>>();
    EditBuffer::from_lines(&owned)
}

#[test]
fn empty_input_yields_a_single_blank_line() {
    let buf = buffer(&[]);
    assert_eq!(buf.lines(), ["".to_owned()]);
    assert_eq!(buf.cursor(), (0, 0));
}

#[test]
fn text_joins_lines_with_newlines() {
    let buf = buffer(&["{", "}"]);
    assert_eq!(buf.text(), "{\n}");
}

#[test]
fn insert_char_advances_the_cursor() {
    let mut buf = buffer(&["ab"]);
    buf.move_right();
    buf.insert_char('x');
    assert_eq!(buf.lines(), ["axb".to_owned()]);
    assert_eq!(buf.cursor(), (0, 2));
}

#[test]
fn newline_splits_the_line_at_the_cursor() {
    let mut buf = buffer(&["abcd"]);
    buf.move_right();
    buf.move_right();
    buf.insert_newline();
    assert_eq!(buf.lines(), ["ab".to_owned(), "cd".to_owned()]);
    assert_eq!(buf.cursor(), (1, 0));
}

#[test]
fn backspace_at_column_zero_joins_onto_the_previous_line() {
    let mut buf = buffer(&["ab", "cd"]);
    buf.move_down();
    buf.backspace();
    assert_eq!(buf.lines(), ["abcd".to_owned()]);
    // Cursor sits at the join point.
    assert_eq!(buf.cursor(), (0, 2));
}

#[test]
fn delete_at_end_of_line_joins_the_next_line() {
    let mut buf = buffer(&["ab", "cd"]);
    buf.move_line_end();
    buf.delete();
    assert_eq!(buf.lines(), ["abcd".to_owned()]);
    assert_eq!(buf.cursor(), (0, 2));
}

#[test]
fn vertical_moves_clamp_the_column_to_the_target_line() {
    let mut buf = buffer(&["long line", "ab", "another long"]);
    buf.move_line_end();
    assert_eq!(buf.cursor(), (0, 9));

    buf.move_down();
    assert_eq!(buf.cursor(), (1, 2));

    buf.move_down();
    // The shorter line clamped the column; it does not spring back.
    assert_eq!(buf.cursor(), (2, 2));
}

#[test]
fn moves_stop_at_the_buffer_edges() {
    let mut buf = buffer(&["ab"]);
    buf.move_up();
    buf.move_left();
    assert_eq!(buf.cursor(), (0, 0));

    buf.move_line_end();
    buf.move_right();
    buf.move_down();
    assert_eq!(buf.cursor(), (0, 2));
}

#[test]
fn columns_count_characters_not_bytes() {
    let mut buf = buffer(&["aé"]);
    buf.move_line_end();
    assert_eq!(buf.cursor(), (0, 2));

    buf.backspace();
    assert_eq!(buf.lines(), ["a".to_owned()]);

    buf.insert_char('ü');
    buf.insert_char('!');
    assert_eq!(buf.lines(), ["aü!".to_owned()]);
    assert_eq!(buf.cursor(), (0, 3));
}

#[test]
fn collapsed_viewport_pins_scroll_to_the_cursor_row() {
    let lines = (0..10).map(|n| n.to_string()).collect::<Vec<_>>();
    let mut buf = EditBuffer::from_lines(&lines);

    for _ in 0..9 {
        buf.move_down();
    }
    buf.scroll_to_cursor(4);
    assert_eq!(buf.scroll(), 6);

    // A stale offset above the cursor must not survive a zero-row viewport.
    for _ in 0..9 {
        buf.move_up();
    }
    buf.scroll_to_cursor(0);
    assert_eq!(buf.scroll(), 0);

    buf.move_down();
    buf.move_down();
    buf.scroll_to_cursor(0);
    assert_eq!(buf.scroll(), 2);
}

#[test]
fn scroll_follows_the_cursor_in_both_directions() {
    let lines = (0..10).map(|n| n.to_string()).collect::<Vec<_>>();
    let mut buf = EditBuffer::from_lines(&lines);

    for _ in 0..9 {
        buf.move_down();
    }
    buf.scroll_to_cursor(4);
    assert_eq!(buf.scroll(), 6);

    for _ in 0..9 {
        buf.move_up();
    }
    buf.scroll_to_cursor(4);
    assert_eq!(buf.scroll(), 0);
}
