use markhop_core::models::BookmarkRecord;
use serde::Serialize;

/// Alfred script-filter document: `{"items": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub(crate) struct ScriptFilterOutput {
    pub items: Vec<ScriptFilterItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub(crate) struct ScriptFilterItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autocomplete: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<ItemText>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct ItemText {
    pub copy: String,
    pub largetype: String,
}

impl ScriptFilterItem {
    pub fn bookmark(record: &BookmarkRecord) -> Self {
        Self {
            uid: None,
            title: record.title.clone(),
            subtitle: Some(record.url.clone()),
            arg: Some(record.url.clone()),
            autocomplete: None,
            text: Some(ItemText {
                copy: record.url.clone(),
                largetype: record.title.clone(),
            }),
        }
    }

    pub fn tab(record: &BookmarkRecord) -> Self {
        Self {
            uid: Some(record.url.clone()),
            autocomplete: Some(record.title.clone()),
            ..Self::bookmark(record)
        }
    }
}

impl ScriptFilterOutput {
    pub fn bookmarks(records: &[BookmarkRecord]) -> Self {
        Self {
            items: records.iter().map(ScriptFilterItem::bookmark).collect(),
        }
    }

    pub fn tabs(records: &[BookmarkRecord]) -> Self {
        Self {
            items: records.iter().map(ScriptFilterItem::tab).collect(),
        }
    }

    pub fn created(url: &str, folder_path: &str, title: &str) -> Self {
        Self::single(ScriptFilterItem {
            title: "Bookmark Created Successfully".to_string(),
            subtitle: Some(format!("{title} in {folder_path}")),
            arg: Some(url.to_string()),
            ..ScriptFilterItem::default()
        })
    }

    pub fn create_failed(folder_path: &str, title: &str) -> Self {
        Self::single(ScriptFilterItem {
            title: "Failed to Create Bookmark".to_string(),
            subtitle: Some(format!("Could not create {title} in {folder_path}")),
            ..ScriptFilterItem::default()
        })
    }

    pub fn error(message: &str) -> Self {
        Self::single(ScriptFilterItem {
            title: format!("Error: {message}"),
            subtitle: Some("Please check the logs for details".to_string()),
            ..ScriptFilterItem::default()
        })
    }

    fn single(item: ScriptFilterItem) -> Self {
        Self { items: vec![item] }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn bookmark_item_carries_url_as_arg_and_copy_text() {
        let output = ScriptFilterOutput::bookmarks(&[BookmarkRecord::bookmark(
            "Docs",
            "https://docs.rs/",
        )]);
        assert_eq!(
            serde_json::to_value(&output).expect("serialize"),
            json!({
                "items": [{
                    "title": "Docs",
                    "subtitle": "https://docs.rs/",
                    "arg": "https://docs.rs/",
                    "text": {"copy": "https://docs.rs/", "largetype": "Docs"},
                }]
            })
        );
    }

    #[test]
    fn tab_item_adds_uid_and_autocomplete() {
        let output = ScriptFilterOutput::tabs(&[BookmarkRecord::tab("News", "https://news.ex/")]);
        let value = serde_json::to_value(&output).expect("serialize");
        assert_eq!(value["items"][0]["uid"], "https://news.ex/");
        assert_eq!(value["items"][0]["autocomplete"], "News");
        assert_eq!(value["items"][0]["text"]["largetype"], "News");
    }

    #[test]
    fn create_results_describe_title_and_folder() {
        let created = serde_json::to_value(ScriptFilterOutput::created(
            "https://ex.com",
            "Work/Docs",
            "Guide",
        ))
        .expect("serialize");
        assert_eq!(
            created,
            json!({"items": [{
                "title": "Bookmark Created Successfully",
                "subtitle": "Guide in Work/Docs",
                "arg": "https://ex.com",
            }]})
        );

        let failed = serde_json::to_value(ScriptFilterOutput::create_failed("Work/Docs", "Guide"))
            .expect("serialize");
        assert_eq!(
            failed,
            json!({"items": [{
                "title": "Failed to Create Bookmark",
                "subtitle": "Could not create Guide in Work/Docs",
            }]})
        );
    }

    #[test]
    fn empty_results_serialize_as_empty_items() {
        let value = serde_json::to_value(ScriptFilterOutput::bookmarks(&[])).expect("serialize");
        assert_eq!(value, json!({"items": []}));
    }
}
