// SPDX-FileCopyrightText: 2026 chapternav contributors
// SPDX-License-Identifier: MIT

use std::fs;

use rstest::{fixture, rstest};

use super::{Catalog, EntryAction, PARENT_ENTRY};
use crate::test_utils::TempDir;

struct CatalogTestCtx {
    tmp: TempDir,
    catalog: Catalog,
}

impl CatalogTestCtx {
    fn new() -> Self {
        let tmp = TempDir::new("catalog");
        let catalog = Catalog::new(tmp.path());
        Self { tmp, catalog }
    }

    fn mkdir(&self, relative: &str) -> std::path::PathBuf {
        let path = self.tmp.path().join(relative);
        fs::create_dir_all(&path).unwrap();
        path
    }

    fn touch(&self, relative: &str) -> std::path::PathBuf {
        let path = self.tmp.path().join(relative);
        fs::write(&path, "{}\n").unwrap();
        path
    }
}

#[fixture]
fn ctx() -> CatalogTestCtx {
    CatalogTestCtx::new()
}

#[rstest]
fn root_lists_only_chapter_directories(ctx: CatalogTestCtx) {
    ctx.mkdir("chapter_2");
    ctx.mkdir("chapter_1");
    ctx.mkdir("notes");
    ctx.touch("chapter_9"); // a file, despite the name
    ctx.touch("readme.json");

    let entries = ctx.catalog.list_entries(ctx.tmp.path()).unwrap();
    assert_eq!(entries, vec!["chapter_1", "chapter_2"]);
}

#[rstest]
fn nested_listing_puts_parent_first_then_dirs_then_files(ctx: CatalogTestCtx) {
    let chapter = ctx.mkdir("chapter_1");
    ctx.mkdir("chapter_1/season_2");
    ctx.mkdir("chapter_1/Season_10");
    ctx.touch("chapter_1/b.json");
    ctx.touch("chapter_1/A.json");

    let entries = ctx.catalog.list_entries(&chapter).unwrap();
    assert_eq!(entries, vec![PARENT_ENTRY, "Season_10", "season_2", "A.json", "b.json"]);
}

#[cfg(unix)]
#[rstest]
fn denied_directory_lists_as_empty(ctx: CatalogTestCtx) {
    use std::os::unix::fs::PermissionsExt;

    let sealed = ctx.mkdir("chapter_1/season_1");
    ctx.mkdir("chapter_1/season_1/update_1");
    fs::set_permissions(&sealed, fs::Permissions::from_mode(0o000)).unwrap();

    // Mode bits do not bind a euid-0 run; only assert when the OS denies us.
    if fs::read_dir(&sealed).is_err() {
        assert_eq!(ctx.catalog.list_entries(&sealed).unwrap(), Vec::<String>::new());
    }

    fs::set_permissions(&sealed, fs::Permissions::from_mode(0o755)).unwrap();
}

#[rstest]
fn missing_directory_is_a_listing_error(ctx: CatalogTestCtx) {
    let gone = ctx.tmp.path().join("chapter_1/season_1");
    assert!(ctx.catalog.list_entries(&gone).is_err());
}

#[rstest]
fn go_up_stops_at_the_root(ctx: CatalogTestCtx) {
    let chapter = ctx.mkdir("chapter_1");
    let season = ctx.mkdir("chapter_1/season_1");

    assert_eq!(ctx.catalog.go_up(&season), chapter);
    assert_eq!(ctx.catalog.go_up(&chapter), ctx.tmp.path());
    assert_eq!(ctx.catalog.go_up(ctx.tmp.path()), ctx.tmp.path());
}

#[rstest]
fn resolve_entry_classifies_each_entry_kind(ctx: CatalogTestCtx) {
    let chapter = ctx.mkdir("chapter_1");
    let season = ctx.mkdir("chapter_1/season_1");
    let doc = ctx.touch("chapter_1/story.json");
    ctx.touch("chapter_1/notes.txt");

    let entries = ctx.catalog.list_entries(&chapter).unwrap();
    assert_eq!(entries, vec![PARENT_ENTRY, "season_1", "notes.txt", "story.json"]);

    assert_eq!(ctx.catalog.resolve_entry(&chapter, &entries, 0), EntryAction::NavigateUp);
    assert_eq!(
        ctx.catalog.resolve_entry(&chapter, &entries, 1),
        EntryAction::NavigateInto(season)
    );
    assert_eq!(ctx.catalog.resolve_entry(&chapter, &entries, 2), EntryAction::Ignore);
    assert_eq!(ctx.catalog.resolve_entry(&chapter, &entries, 3), EntryAction::OpenDocument(doc));
    assert_eq!(ctx.catalog.resolve_entry(&chapter, &entries, 4), EntryAction::Invalid);
}

#[rstest]
fn is_root_compares_against_the_fixed_root(ctx: CatalogTestCtx) {
    let chapter = ctx.mkdir("chapter_1");
    assert!(ctx.catalog.is_root(ctx.tmp.path()));
    assert!(!ctx.catalog.is_root(&chapter));
}
