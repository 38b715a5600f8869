use crate::paths::last_segment;
use crate::traits::RemoteDirectoryClient;
use crate::{FileEntry, FolderEntry, FolderMetadata, RemoteAccessError};
use chrono::{DateTime, Utc};
use std::fs::{self, Metadata};
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// Serves a library mirrored on the local filesystem.
///
/// Site-relative paths map onto `base`, so `Shared Documents/mcp_server/A`
/// is read from `{base}/Shared Documents/mcp_server/A`. URLs are reported
/// the way the remote reports them: `/sites/{site_title}/...`.
pub struct LocalDirectoryClient {
    base: PathBuf,
    site_title: String,
}

impl LocalDirectoryClient {
    pub fn new(base: impl Into<PathBuf>, site_title: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            site_title: site_title.into(),
        }
    }

    fn locate(&self, path: &str) -> Result<(String, PathBuf), RemoteAccessError> {
        let site_path = path.trim_matches('/').to_string();
        let relative = Path::new(&site_path);

        if relative
            .components()
            .any(|component| !matches!(component, Component::Normal(_)))
        {
            return Err(RemoteAccessError::NotFound { path: site_path });
        }

        let local = self.base.join(relative);
        Ok((site_path, local))
    }

    fn url(&self, site_path: &str) -> String {
        format!("/sites/{}/{}", self.site_title, site_path)
    }

    fn child_path(parent: &str, name: &str) -> String {
        if parent.is_empty() {
            name.to_string()
        } else {
            format!("{parent}/{name}")
        }
    }

    fn directory(&self, path: &str) -> Result<(String, PathBuf), RemoteAccessError> {
        let (site_path, local) = self.locate(path)?;
        let metadata = read_metadata(&site_path, &local)?;
        if !metadata.is_dir() {
            return Err(RemoteAccessError::NotFound { path: site_path });
        }
        Ok((site_path, local))
    }

    fn entries(&self, local: &Path) -> Result<Vec<(String, Metadata)>, RemoteAccessError> {
        let mut entries = Vec::new();
        for entry in WalkDir::new(local)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry?;
            let metadata = entry.metadata()?;
            entries.push((entry.file_name().to_string_lossy().to_string(), metadata));
        }
        Ok(entries)
    }
}

impl RemoteDirectoryClient for LocalDirectoryClient {
    fn folder_metadata(&self, path: &str) -> Result<FolderMetadata, RemoteAccessError> {
        let (site_path, local) = self.directory(path)?;
        let metadata = read_metadata(&site_path, &local)?;

        Ok(FolderMetadata {
            name: last_segment(&site_path).to_string(),
            url: self.url(&site_path),
            created: created(&metadata),
            modified: modified(&metadata),
        })
    }

    fn list_folders(&self, path: &str) -> Result<Vec<FolderEntry>, RemoteAccessError> {
        let (site_path, local) = self.directory(path)?;

        Ok(self
            .entries(&local)?
            .into_iter()
            .filter(|(_, metadata)| metadata.is_dir())
            .map(|(name, metadata)| FolderEntry {
                url: self.url(&Self::child_path(&site_path, &name)),
                name,
                created: created(&metadata),
                modified: modified(&metadata),
            })
            .collect())
    }

    fn list_files(&self, path: &str) -> Result<Vec<FileEntry>, RemoteAccessError> {
        let (site_path, local) = self.directory(path)?;

        Ok(self
            .entries(&local)?
            .into_iter()
            .filter(|(_, metadata)| metadata.is_file())
            .map(|(name, metadata)| FileEntry {
                url: self.url(&Self::child_path(&site_path, &name)),
                name,
                size: metadata.len(),
                created: created(&metadata),
                modified: modified(&metadata),
            })
            .collect())
    }

    fn download_file(&self, path: &str) -> Result<Vec<u8>, RemoteAccessError> {
        let (site_path, local) = self.locate(path)?;
        if !read_metadata(&site_path, &local)?.is_file() {
            return Err(RemoteAccessError::NotFound { path: site_path });
        }
        Ok(fs::read(local)?)
    }

    fn site_title(&self) -> Result<String, RemoteAccessError> {
        Ok(self.site_title.clone())
    }
}

fn read_metadata(site_path: &str, local: &Path) -> Result<Metadata, RemoteAccessError> {
    fs::metadata(local).map_err(|error| match error.kind() {
        ErrorKind::NotFound => RemoteAccessError::NotFound {
            path: site_path.to_string(),
        },
        _ => RemoteAccessError::Io(error),
    })
}

fn created(metadata: &Metadata) -> Option<DateTime<Utc>> {
    metadata.created().ok().map(DateTime::<Utc>::from)
}

fn modified(metadata: &Metadata) -> Option<DateTime<Utc>> {
    metadata.modified().ok().map(DateTime::<Utc>::from)
}
