pub mod backends;
pub mod config;
pub mod content;
pub mod error;
pub mod extractor;
pub mod library;
pub mod listing;
pub mod models;
pub mod paths;
pub mod traits;
pub mod tree;

#[cfg(test)]
mod testing;

pub use backends::{LocalDirectoryClient, SharePointClient};
pub use config::{LibraryConfig, SharePointConfig, DEFAULT_LIBRARY_PATH, DEFAULT_MAX_DEPTH};
pub use content::{classify, ContentKind, ContentNormalizer};
pub use error::{ConfigError, ContentError, RemoteAccessError};
pub use extractor::{LopdfExtractor, PdfExtractor, PdfText};
pub use library::DocumentLibrary;
pub use listing::RemoteListing;
pub use models::{
    DocumentContent, FileEntry, FileNode, FolderEntry, FolderMetadata, FolderNode, NodeKind,
    NormalizedContent, TreeNode,
};
pub use paths::{strip_root_prefix, PathResolver};
pub use traits::RemoteDirectoryClient;
pub use tree::{TreeBuilder, TreeOptions};
