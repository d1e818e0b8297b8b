// SPDX-FileCopyrightText: 2026 chapternav contributors
// SPDX-License-Identifier: MIT

//! chapternav: terminal browser and structured editor for chapter/season/update JSON trees.
//!
//! The library exposes the navigation catalog, the location search index, the
//! document store, the raw edit buffer, and the TUI shell; the binary in
//! `main.rs` is a thin argument-parsing wrapper around `tui::run`.

pub mod catalog;
pub mod editor;
pub mod search;
pub mod store;
#[cfg(test)]
mod test_utils;
pub mod tui;
