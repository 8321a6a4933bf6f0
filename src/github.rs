use crate::{
    release::{Asset, Release},
    source::ReleaseSource,
};
use anyhow::{anyhow, Context as _, Result};
use async_trait::async_trait;
use reqwest::{
    header::{HeaderValue, ACCEPT, AUTHORIZATION},
    Client,
};
use serde::Deserialize;
use std::env;
use url::Url;

const DEFAULT_API_BASE: &str = "https://api.github.com";
const PER_PAGE: usize = 100;

/// A [`ReleaseSource`] listing every release of one GitHub repository
/// through the REST API, paginating as needed.
///
/// Requests are authenticated with the `GITHUB_TOKEN` environment variable
/// when it is set, or with an explicit [`GitHubReleases::with_token`]. The
/// API base URL can be overridden for GitHub Enterprise installations.
#[derive(Debug)]
pub struct GitHubReleases {
    owner: String,
    repo: String,
    api_base: Url,
    token: Option<String>,
}

// What the REST API returns. Entries missing required fields are dropped
// here so the core never sees an unusable release or asset.
#[derive(Debug, Deserialize)]
struct RawRelease {
    tag_name: Option<String>,
    #[serde(default)]
    assets: Vec<RawAsset>,
}

#[derive(Debug, Deserialize)]
struct RawAsset {
    name: Option<String>,
    browser_download_url: Option<String>,
}

impl GitHubReleases {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        GitHubReleases {
            owner: owner.into(),
            repo: repo.into(),
            api_base: Url::parse(DEFAULT_API_BASE).expect("default API base URL is valid"),
            token: env::var("GITHUB_TOKEN").ok(),
        }
    }

    /// Overrides the API base URL, e.g. for a GitHub Enterprise host.
    #[must_use]
    pub fn with_api_base(mut self, api_base: Url) -> Self {
        self.api_base = api_base;
        self
    }

    /// Overrides the token taken from the `GITHUB_TOKEN` environment
    /// variable.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn page_url(&self, page: usize) -> Result<Url> {
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|()| anyhow!("API base URL cannot be a base"))?
            .push("repos")
            .push(&self.owner)
            .push(&self.repo)
            .push("releases");
        url.query_pairs_mut()
            .append_pair("per_page", &PER_PAGE.to_string())
            .append_pair("page", &page.to_string());
        Ok(url)
    }
}

#[async_trait]
impl ReleaseSource for GitHubReleases {
    async fn get_releases(&self, client: &Client) -> Result<Vec<Release>> {
        let mut all = vec![];
        for page in 1.. {
            let url = self.page_url(page)?;
            let mut req_builder = client
                .get(url.clone())
                .header(ACCEPT, HeaderValue::from_static("application/json"));
            if let Some(token) = self.token.as_deref() {
                let mut auth_val = HeaderValue::from_str(&format!("Bearer {token}"))?;
                auth_val.set_sensitive(true);
                req_builder = req_builder.header(AUTHORIZATION, auth_val);
            }

            let resp = client
                .execute(req_builder.build()?)
                .await
                .with_context(|| format!("list releases from {url}"))?;
            resp.error_for_status_ref()
                .with_context(|| format!("list releases from {url}"))?;

            let raw: Vec<RawRelease> = resp
                .json()
                .await
                .with_context(|| format!("decode releases from {url}"))?;
            let page_len = raw.len();
            all.extend(raw.into_iter().filter_map(convert));
            if page_len < PER_PAGE {
                break;
            }
        }
        Ok(all)
    }
}

fn convert(raw: RawRelease) -> Option<Release> {
    let tag_name = raw.tag_name?;
    let assets = raw
        .assets
        .into_iter()
        .filter_map(|a| {
            Some(Asset {
                name: a.name?,
                download_url: a.browser_download_url?,
            })
        })
        .collect();
    Some(Release { tag_name, assets })
}
