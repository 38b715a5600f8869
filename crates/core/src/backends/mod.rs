pub mod local;
pub mod sharepoint;

pub use local::LocalDirectoryClient;
pub use sharepoint::SharePointClient;
