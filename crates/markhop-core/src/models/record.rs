use serde::{Deserialize, Serialize};

pub const SOURCE_CHROME: &str = "chrome";
pub const SOURCE_CHROME_TAB: &str = "chrome_tab";

/// Read-only projection of a bookmark leaf or a history tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkRecord {
    pub title: String,
    pub url: String,
    pub source: String,
}

impl BookmarkRecord {
    #[must_use]
    pub fn bookmark(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            source: SOURCE_CHROME.to_string(),
        }
    }

    #[must_use]
    pub fn tab(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            source: SOURCE_CHROME_TAB.to_string(),
        }
    }

    #[must_use]
    pub fn with_url(&self, url: impl Into<String>) -> Self {
        Self {
            title: self.title.clone(),
            url: url.into(),
            source: self.source.clone(),
        }
    }
}
