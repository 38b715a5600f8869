use crate::{FileEntry, FolderEntry, FolderMetadata, RemoteAccessError};

/// Read-only view of a remote document library.
///
/// Paths are site-relative (`Shared Documents/mcp_server/Projects`); the
/// entries returned carry absolute server-relative URLs
/// (`/sites/Team/Shared Documents/mcp_server/Projects/A`). Listings come back
/// in whatever order the remote produces them.
pub trait RemoteDirectoryClient {
    fn folder_metadata(&self, path: &str) -> Result<FolderMetadata, RemoteAccessError>;

    fn list_folders(&self, path: &str) -> Result<Vec<FolderEntry>, RemoteAccessError>;

    fn list_files(&self, path: &str) -> Result<Vec<FileEntry>, RemoteAccessError>;

    fn download_file(&self, path: &str) -> Result<Vec<u8>, RemoteAccessError>;

    fn site_title(&self) -> Result<String, RemoteAccessError>;
}

impl<T: RemoteDirectoryClient + ?Sized> RemoteDirectoryClient for Box<T> {
    fn folder_metadata(&self, path: &str) -> Result<FolderMetadata, RemoteAccessError> {
        (**self).folder_metadata(path)
    }

    fn list_folders(&self, path: &str) -> Result<Vec<FolderEntry>, RemoteAccessError> {
        (**self).list_folders(path)
    }

    fn list_files(&self, path: &str) -> Result<Vec<FileEntry>, RemoteAccessError> {
        (**self).list_files(path)
    }

    fn download_file(&self, path: &str) -> Result<Vec<u8>, RemoteAccessError> {
        (**self).download_file(path)
    }

    fn site_title(&self) -> Result<String, RemoteAccessError> {
        (**self).site_title()
    }
}
