use crate::config::DEFAULT_MAX_DEPTH;
use crate::listing::RemoteListing;
use crate::paths::{last_segment, strip_root_prefix};
use crate::traits::RemoteDirectoryClient;
use crate::{FolderNode, TreeNode};
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy)]
pub struct TreeOptions {
    /// Folders this many levels below the starting folder are returned
    /// degraded instead of being expanded.
    pub max_depth: usize,
}

impl Default for TreeOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Materializes a folder and everything below it.
///
/// Failures are contained per folder: an unreadable folder turns into a
/// degraded node and its siblings are still collected.
pub struct TreeBuilder<'a, C: RemoteDirectoryClient + ?Sized> {
    listing: RemoteListing<'a, C>,
    options: TreeOptions,
}

impl<'a, C: RemoteDirectoryClient + ?Sized> TreeBuilder<'a, C> {
    pub fn new(listing: RemoteListing<'a, C>, options: TreeOptions) -> Self {
        Self { listing, options }
    }

    pub fn build_tree(&self, parent: Option<&str>) -> TreeNode {
        // Looked up once per build; a title change between builds is not reconciled.
        let root_prefix = match self.listing.site_title() {
            Ok(title) => Some(self.listing.resolver().library_root_prefix(&title)),
            Err(title_error) => {
                error!(error = %title_error, "could not load site title, subfolders will not be expanded");
                None
            }
        };

        self.build_node(parent, root_prefix.as_deref(), 0)
    }

    fn build_node(&self, parent: Option<&str>, root_prefix: Option<&str>, depth: usize) -> TreeNode {
        let path = self.listing.resolver().resolve(parent);
        info!(location = parent.unwrap_or("root directory"), path = %path, depth, "building tree");

        let metadata = match self.listing.folder_metadata(parent) {
            Ok(metadata) => metadata,
            Err(access_error) => {
                error!(path = %path, error = %access_error, "could not retrieve folder");
                return TreeNode::degraded(
                    last_segment(&path),
                    path.clone(),
                    format!("Could not access folder: {access_error}"),
                );
            }
        };

        let mut node = FolderNode {
            name: metadata.name,
            path: metadata.url,
            created: metadata.created,
            modified: metadata.modified,
            children: Vec::new(),
            error: None,
        };

        if depth >= self.options.max_depth {
            warn!(path = %path, max_depth = self.options.max_depth, "depth limit reached");
            node.error = Some(format!(
                "Folder not expanded: depth limit of {} reached",
                self.options.max_depth
            ));
            return TreeNode::Folder(node);
        }

        match self.listing.list_folders(parent) {
            Ok(subfolders) => match root_prefix {
                Some(prefix) => {
                    for subfolder in subfolders {
                        match strip_root_prefix(&subfolder.url, prefix) {
                            Some(relative) => node.children.push(self.build_node(
                                Some(relative.as_str()),
                                root_prefix,
                                depth + 1,
                            )),
                            None => {
                                warn!(url = %subfolder.url, prefix, "could not determine relative path for folder");
                            }
                        }
                    }
                }
                None if !subfolders.is_empty() => {
                    warn!(path = %path, count = subfolders.len(), "skipping subfolders without library root prefix");
                }
                None => {}
            },
            Err(list_error) => {
                error!(path = %path, error = %list_error, "could not list subfolders");
            }
        }

        match self.listing.list_files(parent) {
            Ok(files) => node.children.extend(files.into_iter().map(TreeNode::from)),
            Err(list_error) => {
                error!(path = %path, error = %list_error, "could not list files");
            }
        }

        TreeNode::Folder(node)
    }
}

#[cfg(test)]
mod tests {
    use super::{TreeBuilder, TreeOptions};
    use crate::listing::RemoteListing;
    use crate::testing::ScriptedClient;
    use crate::{LibraryConfig, NodeKind, PathResolver, TreeNode};

    fn build(client: &ScriptedClient, parent: Option<&str>, options: TreeOptions) -> TreeNode {
        let resolver = PathResolver::new(&LibraryConfig::default());
        let builder = TreeBuilder::new(RemoteListing::new(client, &resolver), options);
        builder.build_tree(parent)
    }

    fn sample_library() -> ScriptedClient {
        ScriptedClient::new("Team")
            .with_folder("Projects")
            .with_folder("Projects/A")
            .with_folder("Archive")
            .with_file("", "readme.md", 12)
            .with_file("Projects", "plan.txt", 40)
            .with_file("Projects/A", "spec.pdf", 2048)
    }

    fn assert_shapes(node: &TreeNode) {
        match node.kind() {
            NodeKind::File => assert!(node.children().is_empty()),
            NodeKind::Folder => assert_eq!(node.size(), None),
        }
        node.children().iter().for_each(assert_shapes);
    }

    #[test]
    fn builds_full_tree_in_listing_order() {
        let client = sample_library();

        let root = build(&client, None, TreeOptions::default());

        assert_eq!(root.error(), None);
        assert_eq!(root.path(), "/sites/Team/Shared Documents/mcp_server");
        let names: Vec<_> = root.children().iter().map(TreeNode::name).collect();
        assert_eq!(names, vec!["Projects", "Archive", "readme.md"]);

        let projects = &root.children()[0];
        assert_eq!(projects.children().len(), 2);
        assert_eq!(projects.children()[0].name(), "A");
        assert_eq!(projects.children()[0].children()[0].size(), Some(2048));
        assert_eq!(root.node_count(), 7);
        assert_shapes(&root);
    }

    #[test]
    fn child_count_matches_listings() -> Result<(), Box<dyn std::error::Error>> {
        let client = sample_library();
        let resolver = PathResolver::new(&LibraryConfig::default());
        let listing = RemoteListing::new(&client, &resolver);
        let expected = listing.list_folders(Some("Projects"))?.len()
            + listing.list_files(Some("Projects"))?.len();

        let node = build(&client, Some("Projects"), TreeOptions::default());

        assert_eq!(node.children().len(), expected);
        Ok(())
    }

    #[test]
    fn repeated_builds_are_equal() {
        let client = sample_library();

        let first = build(&client, Some(""), TreeOptions::default());
        let second = build(&client, Some(""), TreeOptions::default());

        assert_eq!(first, second);
    }

    #[test]
    fn site_title_is_loaded_once_per_build() {
        let client = sample_library();

        build(&client, None, TreeOptions::default());
        assert_eq!(client.title_lookups(), 1);

        build(&client, None, TreeOptions::default());
        assert_eq!(client.title_lookups(), 2);
    }

    #[test]
    fn unreachable_root_is_degraded() {
        let client = ScriptedClient::new("Team");

        let root = build(&client, Some("DoesNotExist"), TreeOptions::default());

        assert_eq!(root.kind(), NodeKind::Folder);
        assert_eq!(root.name(), "DoesNotExist");
        assert_eq!(root.path(), "Shared Documents/mcp_server/DoesNotExist");
        assert!(root.children().is_empty());
        assert!(root
            .error()
            .is_some_and(|message| message.starts_with("Could not access folder")));
    }

    #[test]
    fn broken_subfolder_does_not_hide_siblings() {
        let client = sample_library().with_broken_metadata("Projects");

        let root = build(&client, None, TreeOptions::default());

        assert_eq!(root.error(), None);
        assert_eq!(root.children().len(), 3);
        let projects = &root.children()[0];
        assert!(projects.error().is_some());
        assert!(projects.children().is_empty());
        assert_eq!(root.children()[1].name(), "Archive");
        assert_eq!(root.children()[1].error(), None);
    }

    #[test]
    fn folder_listing_failure_keeps_files() {
        let client = sample_library().with_broken_folder_listing("");

        let root = build(&client, None, TreeOptions::default());

        assert_eq!(root.error(), None);
        let names: Vec<_> = root.children().iter().map(TreeNode::name).collect();
        assert_eq!(names, vec!["readme.md"]);
    }

    #[test]
    fn file_listing_failure_keeps_folders() {
        let client = sample_library().with_broken_file_listing("");

        let root = build(&client, None, TreeOptions::default());

        let names: Vec<_> = root.children().iter().map(TreeNode::name).collect();
        assert_eq!(names, vec!["Projects", "Archive"]);
    }

    #[test]
    fn folders_outside_root_are_skipped() {
        let client = ScriptedClient::new("Team")
            .with_folder("Projects")
            .with_foreign_folder("", "/sites/Elsewhere/Shared Documents/Stray")
            .with_file("", "readme.md", 1);

        let root = build(&client, None, TreeOptions::default());

        let names: Vec<_> = root.children().iter().map(TreeNode::name).collect();
        assert_eq!(names, vec!["Projects", "readme.md"]);
    }

    #[test]
    fn missing_site_title_lists_files_only() {
        let client = sample_library().with_broken_title();

        let root = build(&client, None, TreeOptions::default());

        assert_eq!(root.error(), None);
        let names: Vec<_> = root.children().iter().map(TreeNode::name).collect();
        assert_eq!(names, vec!["readme.md"]);
    }

    #[test]
    fn depth_limit_degrades_deep_folders() {
        let client = sample_library();

        let root = build(&client, None, TreeOptions { max_depth: 1 });

        let projects = &root.children()[0];
        assert!(projects.error().is_some());
        assert!(projects.children().is_empty());
        assert_eq!(root.children()[2].name(), "readme.md");
    }
}
