use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FolderEntry {
    pub name: String,
    pub url: String,
    pub created: Option<DateTime<Utc>>,
    pub modified: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileEntry {
    pub name: String,
    pub url: String,
    pub size: u64,
    pub created: Option<DateTime<Utc>>,
    pub modified: Option<DateTime<Utc>>,
}

/// Properties of a single folder, loaded before its children are listed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FolderMetadata {
    pub name: String,
    pub url: String,
    pub created: Option<DateTime<Utc>>,
    pub modified: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Folder,
    File,
}

/// One node of a materialized folder tree.
///
/// A folder carrying `error` is degraded: its children could not be
/// listed and traversal stopped there.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TreeNode {
    Folder(FolderNode),
    File(FileNode),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FolderNode {
    pub name: String,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<DateTime<Utc>>,
    #[serde(default)]
    pub children: Vec<TreeNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileNode {
    pub name: String,
    pub path: String,
    pub size: u64,
    pub created: Option<DateTime<Utc>>,
    pub modified: Option<DateTime<Utc>>,
}

impl TreeNode {
    pub fn degraded(name: impl Into<String>, path: impl Into<String>, error: String) -> Self {
        TreeNode::Folder(FolderNode {
            name: name.into(),
            path: path.into(),
            created: None,
            modified: None,
            children: Vec::new(),
            error: Some(error),
        })
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            TreeNode::Folder(_) => NodeKind::Folder,
            TreeNode::File(_) => NodeKind::File,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            TreeNode::Folder(folder) => &folder.name,
            TreeNode::File(file) => &file.name,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            TreeNode::Folder(folder) => &folder.path,
            TreeNode::File(file) => &file.path,
        }
    }

    /// Children of a folder; always empty for files.
    pub fn children(&self) -> &[TreeNode] {
        match self {
            TreeNode::Folder(folder) => &folder.children,
            TreeNode::File(_) => &[],
        }
    }

    pub fn size(&self) -> Option<u64> {
        match self {
            TreeNode::Folder(_) => None,
            TreeNode::File(file) => Some(file.size),
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            TreeNode::Folder(folder) => folder.error.as_deref(),
            TreeNode::File(_) => None,
        }
    }

    /// Counts this node and every descendant.
    pub fn node_count(&self) -> usize {
        1 + self
            .children()
            .iter()
            .map(TreeNode::node_count)
            .sum::<usize>()
    }
}

impl From<FileEntry> for TreeNode {
    fn from(entry: FileEntry) -> Self {
        TreeNode::File(FileNode {
            name: entry.name,
            path: entry.url,
            size: entry.size,
            created: entry.created,
            modified: entry.modified,
        })
    }
}

/// Downloaded bytes reduced to one of the uniform result shapes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "content_type", rename_all = "lowercase")]
pub enum NormalizedContent {
    Text {
        content: String,
        size: u64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        original_type: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        page_count: Option<u32>,
    },
    Binary {
        content_base64: String,
        size: u64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        original_type: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
}

impl NormalizedContent {
    /// Byte length of the content as downloaded.
    pub fn size(&self) -> u64 {
        match self {
            NormalizedContent::Text { size, .. } | NormalizedContent::Binary { size, .. } => *size,
        }
    }

    pub fn original_type(&self) -> Option<&str> {
        match self {
            NormalizedContent::Text { original_type, .. }
            | NormalizedContent::Binary { original_type, .. } => original_type.as_deref(),
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, NormalizedContent::Text { .. })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocumentContent {
    pub name: String,
    #[serde(flatten)]
    pub content: NormalizedContent,
}
