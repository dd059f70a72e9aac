use std::sync::Arc;

use serde::Deserialize;

use crate::config::Config;
use crate::error::Error;

pub const USER_AGENT: &str = "DiscogsTrmnlRandom/0.1";
pub const PER_PAGE: u32 = 100;
/// Hard stop for a remote that keeps inflating its reported page count.
pub const MAX_PAGES: u32 = 1000;

/// Releases are always pulled from the default "collection" folder.
const FOLDER_ID: u32 = 0;

#[derive(Debug, Clone)]
pub struct DiscogsClient {
    http: reqwest::Client,
    config: Arc<Config>,
}

impl DiscogsClient {
    pub fn new(config: Config) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    pub fn with_client(http: reqwest::Client, config: Config) -> Self {
        Self {
            http,
            config: Arc::new(config),
        }
    }

    fn credentials(&self) -> Result<(&str, &str), Error> {
        match (self.config.username.as_deref(), self.config.token.as_deref()) {
            (Some(username), Some(token)) => Ok((username, token)),
            _ => Err(Error::MissingConfig),
        }
    }

    async fn fetch_page(&self, page: u32, format: Option<&str>) -> Result<CollectionPage, Error> {
        let (username, token) = self.credentials()?;
        let url = format!(
            "{}/users/{}/collection/folders/{}/releases",
            self.config.api_host, username, FOLDER_ID
        );

        let mut request = self
            .http
            .get(&url)
            .header("Authorization", format!("Discogs token={token}"))
            .header("User-Agent", USER_AGENT)
            .query(&[("page", page.to_string()), ("per_page", PER_PAGE.to_string())]);
        if let Some(format) = format {
            // Advisory hint; the client-side filter in fetch_collection is
            // what actually guarantees the format.
            request = request.query(&[("format", format), ("sort", "format")]);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let reason = status.canonical_reason().unwrap_or_else(|| status.as_str());
            return Err(Error::DiscogsApi(reason.to_string()));
        }

        let body: serde_json::Value = response.json().await?;
        Ok(serde_json::from_value(body)?)
    }

    /// Walks the collection page by page and returns every release, filtered
    /// by format name when one was requested. Pages are fetched strictly one
    /// after another because the total page count only arrives with each
    /// response. A failed page aborts the whole walk; no partial results.
    pub async fn fetch_collection(
        &self,
        format: Option<&str>,
    ) -> Result<Vec<CollectionRelease>, Error> {
        let mut releases = Vec::new();
        let mut page_number = 1;

        loop {
            if page_number > MAX_PAGES {
                return Err(Error::PageLimit(MAX_PAGES));
            }

            let page = self.fetch_page(page_number, format).await?;
            match format {
                Some(format) => releases.extend(
                    page.releases
                        .into_iter()
                        .filter(|release| release.matches_format(format)),
                ),
                None => releases.extend(page.releases),
            }

            if page.pagination.page >= page.pagination.pages {
                break;
            }
            page_number += 1;
        }

        Ok(releases)
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct CollectionPage {
    pub pagination: Pagination,
    pub releases: Vec<CollectionRelease>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Pagination {
    pub page: u32,
    pub pages: u32,
    pub per_page: u32,
    pub items: u64,
}

#[derive(Deserialize, Debug, Clone)]
pub struct CollectionRelease {
    pub id: u64,
    pub basic_information: BasicInformation,
}

#[derive(Deserialize, Debug, Clone)]
pub struct BasicInformation {
    pub title: String,
    pub year: i32,
    #[serde(default)]
    pub artists: Vec<NameRef>,
    #[serde(default)]
    pub labels: Vec<NameRef>,
    #[serde(default)]
    pub formats: Vec<ReleaseFormat>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct NameRef {
    pub name: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ReleaseFormat {
    pub name: String,
    #[serde(default)]
    pub descriptions: Vec<String>,
}

impl CollectionRelease {
    pub fn matches_format(&self, format: &str) -> bool {
        self.basic_information
            .formats
            .iter()
            .any(|f| f.name.eq_ignore_ascii_case(format))
    }
}
