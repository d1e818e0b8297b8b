// SPDX-FileCopyrightText: 2026 chapternav contributors
// SPDX-License-Identifier: MIT

use std::fs;
use std::path::Path;

use rstest::{fixture, rstest};
use serde_json::json;

use super::{search_locations, SearchGroup};
use crate::test_utils::TempDir;

fn write_doc(root: &Path, relative: &str, locations: &[&str]) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let body = json!({ "locations": locations });
    fs::write(&path, serde_json::to_string_pretty(&body).unwrap()).unwrap();
}

#[fixture]
fn tmp() -> TempDir {
    TempDir::new("search")
}

#[rstest]
fn blank_query_short_circuits_without_touching_the_tree(tmp: TempDir) {
    // A path that does not exist: proves the walk never starts.
    let gone = tmp.path().join("nowhere");
    assert!(search_locations(&gone, "").is_empty());
    assert!(search_locations(&gone, "   ").is_empty());
}

#[rstest]
fn matches_group_by_chapter_and_season(tmp: TempDir) {
    write_doc(tmp.path(), "chapter_1/season_1/update_1/a.json", &["Old Town"]);
    write_doc(tmp.path(), "chapter_1/season_1/update_2/b.json", &["OLD town square"]);
    write_doc(tmp.path(), "chapter_1/season_2/update_1/c.json", &["Harbor"]);

    let groups = search_locations(tmp.path(), "old town");
    assert_eq!(
        groups,
        vec![SearchGroup {
            key: "chapter_1/season_1".to_owned(),
            updates: vec!["update_1".to_owned(), "update_2".to_owned()],
        }]
    );
}

#[rstest]
fn one_update_entry_per_matching_document(tmp: TempDir) {
    write_doc(tmp.path(), "chapter_1/season_1/update_1/a.json", &["Harbor"]);
    write_doc(tmp.path(), "chapter_1/season_1/update_1/b.json", &["Harbor Street"]);

    let groups = search_locations(tmp.path(), "harbor");
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].updates, vec!["update_1", "update_1"]);
}

#[rstest]
fn whitespace_inside_the_query_is_significant(tmp: TempDir) {
    write_doc(tmp.path(), "chapter_1/season_1/update_1/a.json", &["Old Town Square"]);
    write_doc(tmp.path(), "chapter_1/season_2/update_1/b.json", &["Downtown"]);

    let groups = search_locations(tmp.path(), " town ");
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].key, "chapter_1/season_1");
}

#[rstest]
fn groups_are_sorted_by_key(tmp: TempDir) {
    write_doc(tmp.path(), "chapter_2/season_1/update_1/a.json", &["Harbor"]);
    write_doc(tmp.path(), "chapter_1/season_3/update_1/b.json", &["Harbor"]);
    write_doc(tmp.path(), "chapter_1/season_1/update_1/c.json", &["Harbor"]);

    let keys = search_locations(tmp.path(), "Harbor")
        .into_iter()
        .map(|group| group.key)
        .collect::<Vec<_>>();
    assert_eq!(keys, vec!["chapter_1/season_1", "chapter_1/season_3", "chapter_2/season_1"]);
}

#[rstest]
fn broken_and_foreign_files_are_skipped(tmp: TempDir) {
    write_doc(tmp.path(), "chapter_1/season_1/update_1/good.json", &["Harbor"]);
    let dir = tmp.path().join("chapter_1/season_1/update_1");
    fs::write(dir.join("broken.json"), "{ not json").unwrap();
    fs::write(dir.join("scalar.json"), "{\"locations\": \"Harbor\"}").unwrap();
    fs::write(dir.join("notes.txt"), "Harbor").unwrap();

    let groups = search_locations(tmp.path(), "harbor");
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].updates, vec!["update_1"]);
}

#[rstest]
fn shallow_documents_cannot_be_keyed_and_are_skipped(tmp: TempDir) {
    write_doc(tmp.path(), "chapter_1/stray.json", &["Harbor"]);
    write_doc(tmp.path(), "chapter_1/season_1/update_1/kept.json", &["Harbor"]);

    let groups = search_locations(tmp.path(), "harbor");
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].key, "chapter_1/season_1");
}

#[rstest]
fn non_string_location_elements_are_ignored(tmp: TempDir) {
    let dir = tmp.path().join("chapter_1/season_1/update_1");
    fs::create_dir_all(&dir).unwrap();
    let body = json!({ "locations": [42, "Harbor", null] });
    fs::write(dir.join("mixed.json"), serde_json::to_string_pretty(&body).unwrap()).unwrap();

    assert_eq!(search_locations(tmp.path(), "harbor").len(), 1);
    assert!(search_locations(tmp.path(), "42").is_empty());
}
