use crate::paths::PathResolver;
use crate::traits::RemoteDirectoryClient;
use crate::{FileEntry, FolderEntry, FolderMetadata, RemoteAccessError};
use tracing::info;

/// One-level listings of the library, addressed by root-relative path.
///
/// Entry order is the remote's order and is not sorted here.
pub struct RemoteListing<'a, C: RemoteDirectoryClient + ?Sized> {
    client: &'a C,
    resolver: &'a PathResolver,
}

impl<'a, C: RemoteDirectoryClient + ?Sized> RemoteListing<'a, C> {
    pub fn new(client: &'a C, resolver: &'a PathResolver) -> Self {
        Self { client, resolver }
    }

    pub fn resolver(&self) -> &PathResolver {
        self.resolver
    }

    pub fn list_folders(&self, parent: Option<&str>) -> Result<Vec<FolderEntry>, RemoteAccessError> {
        let path = self.resolver.resolve(parent);
        info!(location = parent.unwrap_or("root directory"), path = %path, "listing folders");
        self.client.list_folders(&path)
    }

    pub fn list_files(&self, parent: Option<&str>) -> Result<Vec<FileEntry>, RemoteAccessError> {
        let path = self.resolver.resolve(parent);
        info!(location = parent.unwrap_or("root directory"), path = %path, "listing documents");
        self.client.list_files(&path)
    }

    pub fn folder_metadata(&self, parent: Option<&str>) -> Result<FolderMetadata, RemoteAccessError> {
        self.client.folder_metadata(&self.resolver.resolve(parent))
    }

    pub fn site_title(&self) -> Result<String, RemoteAccessError> {
        self.client.site_title()
    }
}
