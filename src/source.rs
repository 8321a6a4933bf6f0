use crate::release::Release;
use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use std::fmt::Debug;

/// The release-listing collaborator.
///
/// [`GitHubReleases`](crate::GitHubReleases) is the stock implementation;
/// projects hosted elsewhere can implement this trait instead of
/// reimplementing the whole upgrade flow. An implementation must return every
/// release, paginating internally if needed, and must drop assets missing a
/// name or a download URL. An empty list is valid and means no releases are
/// available.
#[async_trait]
pub trait ReleaseSource: Debug + Send + Sync {
    async fn get_releases(&self, client: &Client) -> Result<Vec<Release>>;
}
