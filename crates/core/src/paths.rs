use crate::config::LibraryConfig;

/// Translates between root-relative paths and the server-relative paths the
/// remote understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathResolver {
    library_root: String,
}

impl PathResolver {
    pub fn new(config: &LibraryConfig) -> Self {
        Self {
            library_root: config.library_path.clone(),
        }
    }

    pub fn library_root(&self) -> &str {
        &self.library_root
    }

    /// Joins `sub_path` under the library root, dropping trailing separators.
    pub fn resolve(&self, sub_path: Option<&str>) -> String {
        format!("{}/{}", self.library_root, sub_path.unwrap_or_default())
            .trim_end_matches('/')
            .to_string()
    }

    /// Absolute prefix the remote puts in front of every URL under the library.
    pub fn library_root_prefix(&self, site_title: &str) -> String {
        format!("/sites/{}/{}", site_title, self.library_root)
    }
}

/// Returns the root-relative remainder of `absolute_url`, or `None` when the
/// URL is not under `prefix`.
pub fn strip_root_prefix(absolute_url: &str, prefix: &str) -> Option<String> {
    absolute_url
        .strip_prefix(prefix)
        .map(|relative| relative.trim_start_matches('/').to_string())
}

/// Last non-empty segment of a slash separated path.
pub fn last_segment(path: &str) -> &str {
    path.trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default()
}
