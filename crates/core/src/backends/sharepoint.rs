use crate::config::SharePointConfig;
use crate::traits::RemoteDirectoryClient;
use crate::{FileEntry, FolderEntry, FolderMetadata, RemoteAccessError};
use chrono::{DateTime, Utc};
use reqwest::blocking::{Client, Response};
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_with::{serde_as, DisplayFromStr, PickFirst};
use url::Url;

const ODATA_JSON: &str = "application/json;odata=nometadata";
const FOLDER_FIELDS: &str = "Name,ServerRelativeUrl,TimeCreated,TimeLastModified";
const FILE_FIELDS: &str = "Name,ServerRelativeUrl,Length,TimeCreated,TimeLastModified";

/// SharePoint REST client for one site, authenticated with a bearer token.
pub struct SharePointClient {
    client: Client,
    site_url: Url,
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct ODataCollection<T> {
    value: Vec<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SpFolder {
    name: String,
    server_relative_url: String,
    #[serde(default)]
    time_created: Option<DateTime<Utc>>,
    #[serde(default)]
    time_last_modified: Option<DateTime<Utc>>,
}

#[serde_as]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SpFile {
    name: String,
    server_relative_url: String,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    length: u64,
    #[serde(default)]
    time_created: Option<DateTime<Utc>>,
    #[serde(default)]
    time_last_modified: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SpWeb {
    title: String,
}

impl From<SpFolder> for FolderEntry {
    fn from(folder: SpFolder) -> Self {
        Self {
            name: folder.name,
            url: folder.server_relative_url,
            created: folder.time_created,
            modified: folder.time_last_modified,
        }
    }
}

impl From<SpFolder> for FolderMetadata {
    fn from(folder: SpFolder) -> Self {
        Self {
            name: folder.name,
            url: folder.server_relative_url,
            created: folder.time_created,
            modified: folder.time_last_modified,
        }
    }
}

impl From<SpFile> for FileEntry {
    fn from(file: SpFile) -> Self {
        Self {
            name: file.name,
            url: file.server_relative_url,
            size: file.length,
            created: file.time_created,
            modified: file.time_last_modified,
        }
    }
}

impl SharePointClient {
    pub fn new(config: &SharePointConfig) -> Result<Self, RemoteAccessError> {
        let client = Client::builder()
            .user_agent(concat!("doclib/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            site_url: config.site_url.clone(),
            access_token: config.access_token.clone(),
        })
    }

    fn api_url(&self, resource: &str) -> Result<Url, RemoteAccessError> {
        Ok(Url::parse(&format!(
            "{}/_api/web{}",
            self.site_url.as_str().trim_end_matches('/'),
            resource
        ))?)
    }

    fn folder_resource(path: &str, tail: &str, fields: &str) -> String {
        format!(
            "/GetFolderByServerRelativeUrl('{}'){}?$select={}",
            escape_path(path),
            tail,
            fields
        )
    }

    fn get(&self, path: &str, url: Url) -> Result<Response, RemoteAccessError> {
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.access_token)
            .header(ACCEPT, ODATA_JSON)
            .send()?;

        check_status(path, response.status())?;
        Ok(response)
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str, resource: &str) -> Result<T, RemoteAccessError> {
        let url = self.api_url(resource)?;
        let body = self.get(path, url)?.text()?;
        Ok(serde_json::from_str(&body)?)
    }
}

impl RemoteDirectoryClient for SharePointClient {
    fn folder_metadata(&self, path: &str) -> Result<FolderMetadata, RemoteAccessError> {
        let folder: SpFolder =
            self.get_json(path, &Self::folder_resource(path, "", FOLDER_FIELDS))?;
        Ok(folder.into())
    }

    fn list_folders(&self, path: &str) -> Result<Vec<FolderEntry>, RemoteAccessError> {
        let folders: ODataCollection<SpFolder> =
            self.get_json(path, &Self::folder_resource(path, "/Folders", FOLDER_FIELDS))?;
        Ok(folders.value.into_iter().map(FolderEntry::from).collect())
    }

    fn list_files(&self, path: &str) -> Result<Vec<FileEntry>, RemoteAccessError> {
        let files: ODataCollection<SpFile> =
            self.get_json(path, &Self::folder_resource(path, "/Files", FILE_FIELDS))?;
        Ok(files.value.into_iter().map(FileEntry::from).collect())
    }

    fn download_file(&self, path: &str) -> Result<Vec<u8>, RemoteAccessError> {
        let url = self.api_url(&format!(
            "/GetFileByServerRelativeUrl('{}')/$value",
            escape_path(path)
        ))?;
        Ok(self.get(path, url)?.bytes()?.to_vec())
    }

    fn site_title(&self) -> Result<String, RemoteAccessError> {
        let web: SpWeb = self.get_json("_api/web", "?$select=Title")?;
        Ok(web.title)
    }
}

/// Escapes a path for use inside a quoted OData string literal in a URL.
fn escape_path(path: &str) -> String {
    path.replace('%', "%25")
        .replace('#', "%23")
        .replace('?', "%3F")
        .replace('\'', "''")
}

fn check_status(path: &str, status: StatusCode) -> Result<(), RemoteAccessError> {
    if status.is_success() {
        return Ok(());
    }

    Err(match status {
        StatusCode::NOT_FOUND => RemoteAccessError::NotFound {
            path: path.to_string(),
        },
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => RemoteAccessError::Unauthorized {
            path: path.to_string(),
            status: status.as_u16(),
        },
        other => RemoteAccessError::BackendResponse {
            path: path.to_string(),
            details: other.to_string(),
        },
    })
}
