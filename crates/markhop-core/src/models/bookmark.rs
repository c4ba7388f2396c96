use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

pub const UNTITLED: &str = "Untitled";

/// One node of a stored bookmark tree, tagged by the `type` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BookmarkNode {
    #[serde(rename = "folder")]
    Folder(FolderNode),
    #[serde(rename = "url")]
    Leaf(LeafNode),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FolderNode {
    #[serde(default)]
    pub name: String,
    /// `None` while the stored folder has no `children` key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<BookmarkNode>>,
    /// Browser-owned keys (`id`, `guid`, `date_added`, ...) kept for write-back.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeafNode {
    /// Outer `None`: no `name` key. `Some(None)`: an explicit `null`.
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<Option<String>>,
    #[serde(default)]
    pub url: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

impl FolderNode {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: None,
            extra: Map::new(),
        }
    }

    #[must_use]
    pub fn children(&self) -> &[BookmarkNode] {
        self.children.as_deref().unwrap_or_default()
    }

    /// Creates the child list on first use.
    pub fn children_mut(&mut self) -> &mut Vec<BookmarkNode> {
        self.children.get_or_insert_with(Vec::new)
    }
}

impl LeafNode {
    #[must_use]
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: Some(Some(name.into())),
            url: url.into(),
            extra: Map::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_ref().and_then(Option::as_deref)
    }

    #[must_use]
    pub fn title(&self) -> &str {
        self.name().unwrap_or(UNTITLED)
    }
}

impl BookmarkNode {
    #[must_use]
    pub fn folder(name: impl Into<String>) -> Self {
        Self::Folder(FolderNode::new(name))
    }

    #[must_use]
    pub fn leaf(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self::Leaf(LeafNode::new(name, url))
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Folder(folder) => Some(&folder.name),
            Self::Leaf(leaf) => leaf.name(),
        }
    }
}

/// A named entry under the document's `roots` object.
///
/// Chrome has shipped non-node values there (`sync_transaction_version`), so
/// anything that is not a JSON object is carried through untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum RootEntry {
    Node(BookmarkNode),
    Opaque(Value),
}

/// Every named root of one bookmark document, in stored order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookmarkForest {
    roots: Vec<(String, RootEntry)>,
    document: Map<String, Value>,
}

impl BookmarkForest {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_parts(roots: Vec<(String, RootEntry)>, document: Map<String, Value>) -> Self {
        Self { roots, document }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn roots(&self) -> impl Iterator<Item = (&str, &RootEntry)> {
        self.roots.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    /// Root nodes in stored order, skipping opaque entries.
    pub fn nodes(&self) -> impl Iterator<Item = &BookmarkNode> {
        self.roots.iter().filter_map(|(_, entry)| match entry {
            RootEntry::Node(node) => Some(node),
            RootEntry::Opaque(_) => None,
        })
    }

    #[must_use]
    pub fn root(&self, name: &str) -> Option<&RootEntry> {
        self.roots
            .iter()
            .find(|(root_name, _)| root_name == name)
            .map(|(_, entry)| entry)
    }

    pub fn root_mut(&mut self, name: &str) -> Option<&mut RootEntry> {
        self.roots
            .iter_mut()
            .find(|(root_name, _)| root_name == name)
            .map(|(_, entry)| entry)
    }

    /// Appends a root; an existing root of the same name is replaced in place.
    pub fn insert_root(&mut self, name: impl Into<String>, node: BookmarkNode) {
        let name = name.into();
        match self.root_mut(&name) {
            Some(entry) => *entry = RootEntry::Node(node),
            None => self.roots.push((name, RootEntry::Node(node))),
        }
    }

    /// Top-level document keys other than `roots` (`checksum`, `version`, ...).
    #[must_use]
    pub fn document(&self) -> &Map<String, Value> {
        &self.document
    }
}
