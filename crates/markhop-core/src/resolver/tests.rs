use crate::index::{SearchOptions, flatten, search};
use crate::models::{BookmarkRecord, LeafNode};

use super::*;

fn folder_children<'a>(folder: &'a FolderNode, name: &str) -> Vec<&'a FolderNode> {
    folder
        .children()
        .iter()
        .filter_map(|child| match child {
            BookmarkNode::Folder(f) if f.name == name => Some(f),
            _ => None,
        })
        .collect()
}

fn root_folder<'a>(forest: &'a BookmarkForest, name: &str) -> &'a FolderNode {
    match forest.root(name) {
        Some(RootEntry::Node(BookmarkNode::Folder(folder))) => folder,
        other => panic!("expected folder root `{name}`, got {other:?}"),
    }
}

fn leaves(folder: &FolderNode) -> Vec<&LeafNode> {
    folder
        .children()
        .iter()
        .filter_map(|child| match child {
            BookmarkNode::Leaf(leaf) => Some(leaf),
            BookmarkNode::Folder(_) => None,
        })
        .collect()
}

fn chrome_like_forest() -> BookmarkForest {
    let mut forest = BookmarkForest::new();
    forest.insert_root("bookmark_bar", BookmarkNode::folder("Bookmarks bar"));
    forest.insert_root("other", BookmarkNode::folder("Other bookmarks"));
    forest
}

#[test]
fn empty_forest_gets_default_root_and_full_chain() {
    let mut forest = BookmarkForest::new();
    FolderResolver::new()
        .resolve_and_append(&mut forest, "https://ex.com", "Work/Docs", "Guide")
        .expect("resolve");

    let bar = root_folder(&forest, "bookmark_bar");
    assert_eq!(bar.name, "bookmark_bar");
    let work = folder_children(bar, "Work");
    assert_eq!(work.len(), 1);
    let docs = folder_children(work[0], "Docs");
    assert_eq!(docs.len(), 1);
    let guide = leaves(docs[0]);
    assert_eq!(guide.len(), 1);
    assert_eq!(guide[0].title(), "Guide");
    assert_eq!(guide[0].url, "https://ex.com");

    let hits = search(&forest, "guide", &SearchOptions::default());
    assert_eq!(hits, vec![BookmarkRecord::bookmark("Guide", "https://ex.com")]);
}

#[test]
fn repeated_resolution_reuses_folders_and_duplicates_leaves() {
    let mut forest = chrome_like_forest();
    let resolver = FolderResolver::new();
    for _ in 0..3 {
        resolver
            .resolve_and_append(&mut forest, "https://ex.com", "Work/Docs", "Guide")
            .expect("resolve");
    }

    let bar = root_folder(&forest, "bookmark_bar");
    let work = folder_children(bar, "Work");
    assert_eq!(work.len(), 1);
    let docs = folder_children(work[0], "Docs");
    assert_eq!(docs.len(), 1);
    assert_eq!(leaves(docs[0]).len(), 3);
    assert_eq!(flatten(&forest).len(), 3);
}

#[test]
fn new_folders_and_leaves_are_appended_after_existing_children() {
    let mut forest = chrome_like_forest();
    let resolver = FolderResolver::new();
    resolver
        .resolve_and_append(&mut forest, "https://a.com", "", "First")
        .expect("append to root");
    resolver
        .resolve_and_append(&mut forest, "https://b.com", "Later", "Second")
        .expect("append to folder");
    resolver
        .resolve_and_append(&mut forest, "https://c.com", "/", "Third")
        .expect("append to root again");

    let bar = root_folder(&forest, "bookmark_bar");
    let names = bar
        .children()
        .iter()
        .filter_map(BookmarkNode::name)
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["First", "Later", "Third"]);
}

#[test]
fn folder_names_match_exactly_and_first_duplicate_wins() {
    let mut forest = chrome_like_forest();
    if let Some(RootEntry::Node(BookmarkNode::Folder(bar))) = forest.root_mut("bookmark_bar") {
        bar.children_mut().push(BookmarkNode::folder("Work"));
        bar.children_mut().push(BookmarkNode::folder("Work"));
    }

    FolderResolver::new()
        .resolve_and_append(&mut forest, "https://ex.com", "work", "Lower")
        .expect("case-sensitive new folder");
    FolderResolver::new()
        .resolve_and_append(&mut forest, "https://ex.com", "Work", "Upper")
        .expect("existing folder");

    let bar = root_folder(&forest, "bookmark_bar");
    let work = folder_children(bar, "Work");
    assert_eq!(work.len(), 2);
    assert_eq!(leaves(work[0]).len(), 1);
    assert!(leaves(work[1]).is_empty());
    assert_eq!(folder_children(bar, "work").len(), 1);
}

#[test]
fn custom_root_is_targeted() {
    let mut forest = chrome_like_forest();
    FolderResolver::new()
        .with_root("other")
        .resolve_and_append(&mut forest, "https://ex.com", "Reading", "Article")
        .expect("resolve under other");

    assert!(root_folder(&forest, "bookmark_bar").children().is_empty());
    assert_eq!(
        folder_children(root_folder(&forest, "other"), "Reading").len(),
        1
    );
}

#[test]
fn missing_root_in_populated_forest_fails_without_mutation() {
    let mut forest = chrome_like_forest();
    let before = forest.clone();
    let err = FolderResolver::new()
        .with_root("synced")
        .resolve_and_append(&mut forest, "https://ex.com", "Work", "Guide")
        .expect_err("missing root");
    assert!(matches!(err, MarkhopError::Structure(_)));
    assert_eq!(forest, before);
}

#[test]
fn opaque_root_is_not_a_folder() {
    let mut forest = BookmarkForest::from_parts(
        vec![(
            "bookmark_bar".to_string(),
            RootEntry::Opaque(serde_json::Value::from("12")),
        )],
        serde_json::Map::new(),
    );
    let err = FolderResolver::new()
        .resolve_and_append(&mut forest, "https://ex.com", "Work", "Guide")
        .expect_err("opaque root");
    assert!(matches!(err, MarkhopError::Structure(_)));
}

#[test]
fn leaf_collision_is_rejected_by_default() {
    let mut forest = chrome_like_forest();
    if let Some(RootEntry::Node(BookmarkNode::Folder(bar))) = forest.root_mut("bookmark_bar") {
        bar.children_mut()
            .push(BookmarkNode::leaf("Work", "https://work.example.com"));
    }
    let before = forest.clone();

    let err = FolderResolver::new()
        .resolve_and_append(&mut forest, "https://ex.com", "Work/Docs", "Guide")
        .expect_err("collision");
    assert!(matches!(err, MarkhopError::Structure(_)));
    assert_eq!(forest, before);
}

#[test]
fn leaf_collision_can_create_sibling_folder() {
    let mut forest = chrome_like_forest();
    if let Some(RootEntry::Node(BookmarkNode::Folder(bar))) = forest.root_mut("bookmark_bar") {
        bar.children_mut()
            .push(BookmarkNode::leaf("Work", "https://work.example.com"));
    }

    FolderResolver::new()
        .with_leaf_collision(LeafCollision::CreateSibling)
        .resolve_and_append(&mut forest, "https://ex.com", "Work", "Guide")
        .expect("sibling folder");

    let bar = root_folder(&forest, "bookmark_bar");
    assert_eq!(leaves(bar).len(), 1);
    let work = folder_children(bar, "Work");
    assert_eq!(work.len(), 1);
    assert_eq!(leaves(work[0])[0].title(), "Guide");
}

#[test]
fn existing_folder_wins_over_same_named_leaf() {
    let mut forest = chrome_like_forest();
    if let Some(RootEntry::Node(BookmarkNode::Folder(bar))) = forest.root_mut("bookmark_bar") {
        bar.children_mut()
            .push(BookmarkNode::leaf("Work", "https://work.example.com"));
        bar.children_mut().push(BookmarkNode::folder("Work"));
    }

    FolderResolver::new()
        .resolve_and_append(&mut forest, "https://ex.com", "Work", "Guide")
        .expect("existing folder is reused");
    let bar = root_folder(&forest, "bookmark_bar");
    assert_eq!(leaves(folder_children(bar, "Work")[0]).len(), 1);
}
