//! In-memory client used by unit tests to script listings and inject failures.

use crate::config::DEFAULT_LIBRARY_PATH;
use crate::paths::last_segment;
use crate::traits::RemoteDirectoryClient;
use crate::{FileEntry, FolderEntry, FolderMetadata, RemoteAccessError};
use std::cell::Cell;
use std::collections::{BTreeMap, HashSet};

#[derive(Default)]
struct ScriptedFolder {
    folders: Vec<FolderEntry>,
    files: Vec<FileEntry>,
}

pub struct ScriptedClient {
    site_title: String,
    folders: BTreeMap<String, ScriptedFolder>,
    downloads: BTreeMap<String, Vec<u8>>,
    broken_metadata: HashSet<String>,
    broken_folder_listings: HashSet<String>,
    broken_file_listings: HashSet<String>,
    broken_title: bool,
    title_lookups: Cell<usize>,
}

impl ScriptedClient {
    pub fn new(site_title: &str) -> Self {
        let mut folders = BTreeMap::new();
        folders.insert(DEFAULT_LIBRARY_PATH.to_string(), ScriptedFolder::default());

        Self {
            site_title: site_title.to_string(),
            folders,
            downloads: BTreeMap::new(),
            broken_metadata: HashSet::new(),
            broken_folder_listings: HashSet::new(),
            broken_file_listings: HashSet::new(),
            broken_title: false,
            title_lookups: Cell::new(0),
        }
    }

    fn site_path(relative: &str) -> String {
        format!("{DEFAULT_LIBRARY_PATH}/{relative}")
            .trim_end_matches('/')
            .to_string()
    }

    fn parent_of(site_path: &str) -> String {
        match site_path.rsplit_once('/') {
            Some((parent, _)) => parent.to_string(),
            None => String::new(),
        }
    }

    fn url(&self, site_path: &str) -> String {
        format!("/sites/{}/{}", self.site_title, site_path)
    }

    /// Registers a folder at a root-relative path; its parent must exist.
    pub fn with_folder(mut self, relative: &str) -> Self {
        let site_path = Self::site_path(relative);
        let entry = FolderEntry {
            name: last_segment(&site_path).to_string(),
            url: self.url(&site_path),
            created: None,
            modified: None,
        };
        self.folders
            .entry(Self::parent_of(&site_path))
            .or_default()
            .folders
            .push(entry);
        self.folders.entry(site_path).or_default();
        self
    }

    /// Adds a folder entry whose URL points somewhere else entirely.
    pub fn with_foreign_folder(mut self, parent_relative: &str, url: &str) -> Self {
        let entry = FolderEntry {
            name: last_segment(url).to_string(),
            url: url.to_string(),
            created: None,
            modified: None,
        };
        self.folders
            .entry(Self::site_path(parent_relative))
            .or_default()
            .folders
            .push(entry);
        self
    }

    pub fn with_file(mut self, parent_relative: &str, name: &str, size: u64) -> Self {
        let parent = Self::site_path(parent_relative);
        let entry = FileEntry {
            name: name.to_string(),
            url: self.url(&format!("{parent}/{name}")),
            size,
            created: None,
            modified: None,
        };
        self.folders.entry(parent).or_default().files.push(entry);
        self
    }

    pub fn with_download(mut self, relative: &str, bytes: &[u8]) -> Self {
        self.downloads
            .insert(Self::site_path(relative), bytes.to_vec());
        self
    }

    pub fn with_broken_metadata(mut self, relative: &str) -> Self {
        self.broken_metadata.insert(Self::site_path(relative));
        self
    }

    pub fn with_broken_folder_listing(mut self, relative: &str) -> Self {
        self.broken_folder_listings.insert(Self::site_path(relative));
        self
    }

    pub fn with_broken_file_listing(mut self, relative: &str) -> Self {
        self.broken_file_listings.insert(Self::site_path(relative));
        self
    }

    pub fn with_broken_title(mut self) -> Self {
        self.broken_title = true;
        self
    }

    pub fn title_lookups(&self) -> usize {
        self.title_lookups.get()
    }

    fn folder(&self, path: &str) -> Result<&ScriptedFolder, RemoteAccessError> {
        self.folders.get(path).ok_or_else(|| RemoteAccessError::NotFound {
            path: path.to_string(),
        })
    }

    fn injected(path: &str) -> RemoteAccessError {
        RemoteAccessError::BackendResponse {
            path: path.to_string(),
            details: "injected failure".to_string(),
        }
    }
}

impl RemoteDirectoryClient for ScriptedClient {
    fn folder_metadata(&self, path: &str) -> Result<FolderMetadata, RemoteAccessError> {
        if self.broken_metadata.contains(path) {
            return Err(Self::injected(path));
        }
        self.folder(path)?;
        Ok(FolderMetadata {
            name: last_segment(path).to_string(),
            url: self.url(path),
            created: None,
            modified: None,
        })
    }

    fn list_folders(&self, path: &str) -> Result<Vec<FolderEntry>, RemoteAccessError> {
        if self.broken_folder_listings.contains(path) {
            return Err(Self::injected(path));
        }
        Ok(self.folder(path)?.folders.clone())
    }

    fn list_files(&self, path: &str) -> Result<Vec<FileEntry>, RemoteAccessError> {
        if self.broken_file_listings.contains(path) {
            return Err(Self::injected(path));
        }
        Ok(self.folder(path)?.files.clone())
    }

    fn download_file(&self, path: &str) -> Result<Vec<u8>, RemoteAccessError> {
        self.downloads
            .get(path)
            .cloned()
            .ok_or_else(|| RemoteAccessError::NotFound {
                path: path.to_string(),
            })
    }

    fn site_title(&self) -> Result<String, RemoteAccessError> {
        self.title_lookups.set(self.title_lookups.get() + 1);
        if self.broken_title {
            return Err(Self::injected("_api/web"));
        }
        Ok(self.site_title.clone())
    }
}
