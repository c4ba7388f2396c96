use url::Url;

use crate::models::{BookmarkForest, BookmarkNode, BookmarkRecord};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// Caps the listing returned for an empty query; `None` returns everything.
    pub empty_query_limit: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchQuery<'a> {
    All,
    Term { term: String, suffix: &'a str },
}

impl<'a> SearchQuery<'a> {
    /// `"gh /issues"` becomes term `gh` with suffix `/issues`. Only a blank
    /// query lists everything; `" gh"` is an empty term with suffix `gh`.
    #[must_use]
    pub fn parse(raw: &'a str) -> Self {
        if raw.trim().is_empty() {
            return Self::All;
        }
        let (term, suffix) = raw.split_once(' ').unwrap_or((raw, ""));
        Self::Term {
            term: term.to_lowercase(),
            suffix,
        }
    }
}

/// Every leaf of the forest, depth-first, then stably sorted by title.
#[must_use]
pub fn flatten(forest: &BookmarkForest) -> Vec<BookmarkRecord> {
    let mut records = Vec::new();
    for node in forest.nodes() {
        collect_leaves(node, &mut records);
    }
    records.sort_by(|a, b| a.title.cmp(&b.title));
    records
}

fn collect_leaves(node: &BookmarkNode, out: &mut Vec<BookmarkRecord>) {
    match node {
        BookmarkNode::Folder(folder) => {
            for child in folder.children() {
                collect_leaves(child, out);
            }
        }
        BookmarkNode::Leaf(leaf) => out.push(BookmarkRecord::bookmark(leaf.title(), &leaf.url)),
    }
}

#[must_use]
pub fn search(
    forest: &BookmarkForest,
    raw_query: &str,
    options: &SearchOptions,
) -> Vec<BookmarkRecord> {
    let records = flatten(forest);
    match SearchQuery::parse(raw_query) {
        SearchQuery::All => match options.empty_query_limit {
            Some(limit) => records.into_iter().take(limit).collect(),
            None => records,
        },
        SearchQuery::Term { term, suffix } => records
            .into_iter()
            .filter(|record| matches_term(record, &term))
            .map(|record| {
                if suffix.is_empty() {
                    record
                } else {
                    let url = augment_url(&record.url, suffix);
                    record.with_url(url)
                }
            })
            .collect(),
    }
}

fn matches_term(record: &BookmarkRecord, term: &str) -> bool {
    record.title.to_lowercase().contains(term) || record.url.to_lowercase().contains(term)
}

/// Resolves `suffix` against `base` as a relative reference, leading slashes
/// stripped first. Non-base URLs (`javascript:`, `data:`) only accept an
/// absolute suffix.
#[must_use]
pub fn augment_url(base: &str, suffix: &str) -> String {
    let relative = suffix.trim_start_matches('/');
    let resolved = match Url::parse(base) {
        Ok(base_url) => base_url.join(relative),
        Err(_) => Url::parse(relative),
    };
    resolved.map_or_else(|_| base.to_string(), String::from)
}
