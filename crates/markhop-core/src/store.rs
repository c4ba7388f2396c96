use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::error::{MarkhopError, Result};
use crate::models::{BookmarkForest, RootEntry};

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];
const ROOTS_KEY: &str = "roots";

/// Chrome `Bookmarks` document on disk.
#[derive(Debug, Clone)]
pub struct BookmarkStore {
    path: PathBuf,
}

impl BookmarkStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    pub fn load(&self) -> Result<BookmarkForest> {
        let raw = match fs::read(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(MarkhopError::NotFound(self.path.display().to_string()));
            }
            Err(err) => return Err(MarkhopError::from(err)),
        };
        parse_document(&raw)
    }

    /// Replaces the whole document. The browser may overwrite it afterwards;
    /// last writer wins.
    pub fn save(&self, forest: &BookmarkForest) -> Result<()> {
        let document = render_document(forest)?;
        let mut content = serde_json::to_string_pretty(&document)?;
        content.push('\n');
        write_atomic(&self.path, content.as_bytes())
    }
}

pub fn parse_document(raw: &[u8]) -> Result<BookmarkForest> {
    let raw = raw.strip_prefix(UTF8_BOM).unwrap_or(raw);
    let value = serde_json::from_slice::<Value>(raw)
        .map_err(|err| MarkhopError::CorruptStore(format!("invalid JSON: {err}")))?;
    let Value::Object(object) = value else {
        return Err(MarkhopError::CorruptStore(
            "document is not a JSON object".to_string(),
        ));
    };

    let mut roots = None::<Value>;
    let mut document = Map::new();
    for (key, value) in object {
        if key == ROOTS_KEY {
            roots = Some(value);
        } else {
            document.insert(key, value);
        }
    }

    let roots = match roots {
        Some(Value::Object(roots)) => roots,
        Some(_) => {
            return Err(MarkhopError::CorruptStore(
                "`roots` is not an object".to_string(),
            ));
        }
        None => return Err(MarkhopError::CorruptStore("missing `roots`".to_string())),
    };

    let mut entries = Vec::with_capacity(roots.len());
    for (name, value) in roots {
        let entry = if value.is_object() {
            let node = serde_json::from_value(value)
                .map_err(|err| MarkhopError::CorruptStore(format!("root `{name}`: {err}")))?;
            RootEntry::Node(node)
        } else {
            RootEntry::Opaque(value)
        };
        entries.push((name, entry));
    }

    Ok(BookmarkForest::from_parts(entries, document))
}

pub fn render_document(forest: &BookmarkForest) -> Result<Value> {
    let mut roots = Map::new();
    for (name, entry) in forest.roots() {
        let value = match entry {
            RootEntry::Node(node) => serde_json::to_value(node)?,
            RootEntry::Opaque(value) => value.clone(),
        };
        roots.insert(name.to_string(), value);
    }

    let mut document = forest.document().clone();
    document.insert(ROOTS_KEY.to_string(), Value::Object(roots));
    Ok(Value::Object(document))
}

fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let parent = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path.file_name().and_then(|x| x.to_str()).ok_or_else(|| {
        MarkhopError::Validation(format!("invalid store filename: {}", path.display()))
    })?;
    let tmp_path = parent.join(format!(
        ".{file_name}.markhop.tmp.{}",
        uuid::Uuid::new_v4().simple()
    ));

    let written = write_new_file(&tmp_path, content).and_then(|()| fs::rename(&tmp_path, path));
    if let Err(err) = written {
        let _ = fs::remove_file(&tmp_path);
        return Err(MarkhopError::from(err));
    }

    if let Ok(dir) = fs::File::open(parent) {
        let _ = dir.sync_all();
    }
    Ok(())
}

fn write_new_file(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let mut file = fs::OpenOptions::new()
        .create_new(true)
        .write(true)
        .open(path)?;
    file.write_all(content)?;
    file.sync_all()
}
