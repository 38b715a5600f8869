use crate::content::ContentNormalizer;
use crate::listing::RemoteListing;
use crate::paths::PathResolver;
use crate::traits::RemoteDirectoryClient;
use crate::tree::{TreeBuilder, TreeOptions};
use crate::{DocumentContent, FileEntry, FolderEntry, LibraryConfig, RemoteAccessError, TreeNode};
use tracing::info;

/// The four read operations offered to callers, bound to one client.
///
/// The client is borrowed by every call; calls are not meant to overlap on
/// the same client.
pub struct DocumentLibrary<C: RemoteDirectoryClient> {
    client: C,
    resolver: PathResolver,
    normalizer: ContentNormalizer,
    tree_options: TreeOptions,
}

impl<C: RemoteDirectoryClient> DocumentLibrary<C> {
    pub fn new(client: C, config: &LibraryConfig) -> Self {
        Self {
            client,
            resolver: PathResolver::new(config),
            normalizer: ContentNormalizer::default(),
            tree_options: TreeOptions::default(),
        }
    }

    pub fn with_tree_options(mut self, tree_options: TreeOptions) -> Self {
        self.tree_options = tree_options;
        self
    }

    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    fn listing(&self) -> RemoteListing<'_, C> {
        RemoteListing::new(&self.client, &self.resolver)
    }

    pub fn list_folders(&self, parent_folder: Option<&str>) -> Result<Vec<FolderEntry>, RemoteAccessError> {
        self.listing().list_folders(parent_folder)
    }

    pub fn list_documents(&self, folder_name: &str) -> Result<Vec<FileEntry>, RemoteAccessError> {
        self.listing().list_files(Some(folder_name))
    }

    /// Never fails: unreachable folders come back as degraded nodes.
    pub fn get_folder_tree(&self, parent_folder: Option<&str>) -> TreeNode {
        TreeBuilder::new(self.listing(), self.tree_options).build_tree(parent_folder)
    }

    /// Downloads a file and normalizes it. Only a failed download is an error.
    pub fn get_document_content(
        &self,
        folder_name: &str,
        file_name: &str,
    ) -> Result<DocumentContent, RemoteAccessError> {
        let file_path = format!("{folder_name}/{file_name}");
        let path = self.resolver.resolve(Some(file_path.as_str()));
        let raw = self.client.download_file(&path)?;
        info!(path = %path, size = raw.len(), "downloaded document");

        Ok(DocumentContent {
            name: file_name.to_string(),
            content: self.normalizer.normalize(file_name, &raw),
        })
    }
}
