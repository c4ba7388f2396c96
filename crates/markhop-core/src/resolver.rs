use crate::error::{MarkhopError, Result};
use crate::models::{BookmarkForest, BookmarkNode, FolderNode, RootEntry};

pub const DEFAULT_TARGET_ROOT: &str = "bookmark_bar";

/// What to do when a path segment names an existing leaf and no folder of
/// that name exists beside it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LeafCollision {
    #[default]
    Reject,
    /// Create the folder next to the leaf.
    CreateSibling,
}

#[derive(Debug, Clone)]
pub struct FolderResolver {
    root: String,
    leaf_collision: LeafCollision,
}

impl Default for FolderResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl FolderResolver {
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: DEFAULT_TARGET_ROOT.to_string(),
            leaf_collision: LeafCollision::default(),
        }
    }

    #[must_use]
    pub fn with_root(mut self, root: impl Into<String>) -> Self {
        self.root = root.into();
        self
    }

    #[must_use]
    pub const fn with_leaf_collision(mut self, policy: LeafCollision) -> Self {
        self.leaf_collision = policy;
        self
    }

    #[must_use]
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Walks `folder_path` below the target root, creating missing folders,
    /// and appends a new leaf to the last one.
    ///
    /// Every check runs before the first mutation, so an error leaves the
    /// forest untouched. Empty segments (`"a//b"`, `""`) are skipped.
    pub fn resolve_and_append(
        &self,
        forest: &mut BookmarkForest,
        url: &str,
        folder_path: &str,
        title: &str,
    ) -> Result<()> {
        let mut current = self.target_root(forest)?;
        for segment in folder_path.split('/').filter(|segment| !segment.is_empty()) {
            current = descend_or_create(current, segment, self.leaf_collision)?;
        }
        current.children_mut().push(BookmarkNode::leaf(title, url));
        Ok(())
    }

    fn target_root<'a>(&self, forest: &'a mut BookmarkForest) -> Result<&'a mut FolderNode> {
        if forest.is_empty() {
            forest.insert_root(self.root.clone(), BookmarkNode::folder(self.root.clone()));
        }
        match forest.root_mut(&self.root) {
            Some(RootEntry::Node(BookmarkNode::Folder(folder))) => Ok(folder),
            Some(_) => Err(MarkhopError::Structure(format!(
                "root `{}` is not a folder",
                self.root
            ))),
            None => Err(MarkhopError::Structure(format!(
                "root `{}` does not exist",
                self.root
            ))),
        }
    }
}

fn descend_or_create<'a>(
    folder: &'a mut FolderNode,
    segment: &str,
    leaf_collision: LeafCollision,
) -> Result<&'a mut FolderNode> {
    let existing = folder
        .children()
        .iter()
        .position(|child| matches!(child, BookmarkNode::Folder(f) if f.name == segment));

    let index = match existing {
        Some(index) => index,
        None => {
            let collides = folder.children().iter().any(|child| {
                matches!(child, BookmarkNode::Leaf(leaf) if leaf.name() == Some(segment))
            });
            if collides && leaf_collision == LeafCollision::Reject {
                return Err(MarkhopError::Structure(format!(
                    "path segment `{segment}` names a bookmark, not a folder"
                )));
            }
            let children = folder.children_mut();
            children.push(BookmarkNode::folder(segment));
            children.len() - 1
        }
    };

    match &mut folder.children_mut()[index] {
        BookmarkNode::Folder(child) => Ok(child),
        BookmarkNode::Leaf(_) => Err(MarkhopError::Internal(format!(
            "resolved segment `{segment}` is not a folder"
        ))),
    }
}

#[cfg(test)]
mod tests;
