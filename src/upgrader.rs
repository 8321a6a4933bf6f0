//! Drives one upgrade attempt from release listing to installed binary.

use crate::{
    assets,
    error::Error,
    fetcher::{self, Fetch},
    fs,
    logger::Logger,
    options::ReleaseOptions,
    picker, platform,
    source::ReleaseSource,
    template::{self, TemplateData},
};
use reqwest::Client;
use std::{
    env,
    path::{Path, PathBuf},
};

/// What one [`Upgrader::run`] call did. Having nothing to do is an outcome,
/// not an error.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// The selected release was downloaded and installed.
    Installed { tag: String },
    /// The selected release is the current version and its binary is already
    /// in place, so nothing was downloaded.
    AlreadyInstalled { tag: String },
    /// No release satisfies the version selection options.
    NoMatchingRelease,
}

/// A fully configured upgrade, created by
/// [`UpgraderBuilder::build`](crate::UpgraderBuilder::build).
#[derive(Debug)]
pub struct Upgrader {
    project_name: String,
    current_version: String,
    source: Box<dyn ReleaseSource>,
    options: ReleaseOptions,
    asset_template: String,
    target_template: String,
    destdir: PathBuf,
    client: Client,
    fetcher: Box<dyn Fetch>,
    logger: Box<dyn Logger>,
}

impl Upgrader {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        project_name: String,
        current_version: String,
        source: Box<dyn ReleaseSource>,
        options: ReleaseOptions,
        asset_template: String,
        target_template: String,
        destdir: PathBuf,
        client: Client,
        fetcher: Box<dyn Fetch>,
        logger: Box<dyn Logger>,
    ) -> Self {
        Upgrader {
            project_name,
            current_version,
            source,
            options,
            asset_template,
            target_template,
            destdir,
            client,
            fetcher,
            logger,
        }
    }

    /// Runs the upgrade: list releases, select the best matching version,
    /// resolve and download its asset, and install the binary.
    ///
    /// The selected release's asset and installed binary names come from the
    /// configured templates. When the selected release is the current version
    /// and the binary already exists at the destination, nothing is
    /// downloaded. The destination is only ever changed by an atomic rename,
    /// so a failure at any point leaves a previous installation untouched.
    /// Dropping the returned future cancels the upgrade with the same
    /// guarantee.
    ///
    /// # Errors
    ///
    /// Fails when the release listing, name rendering, asset resolution,
    /// download, or installation fails. See [`Error`] for the cases.
    pub async fn run(&self) -> Result<Outcome, Error> {
        self.logger
            .debug(&format!("listing releases for {}", self.project_name));
        let releases = self
            .source
            .get_releases(&self.client)
            .await
            .map_err(Error::GetReleases)?;

        let Some(release) = picker::find_release(&releases, &self.options) else {
            self.logger.info(&format!(
                "no release of {} matches the version options",
                self.project_name,
            ));
            return Ok(Outcome::NoMatchingRelease);
        };
        let tag = release.tag_name.clone();
        self.logger
            .debug(&format!("selected {} {tag}", self.project_name));

        let data = TemplateData::new(&self.project_name, &tag, &self.options);
        let target_name =
            template::render(&self.target_template, &data).map_err(Error::TargetTemplate)?;
        let asset_name =
            template::render(&self.asset_template, &data).map_err(Error::AssetTemplate)?;

        let dest = self.destdir.join(&target_name);
        if tag == self.current_version && fs::exists(&dest) {
            self.logger
                .info(&format!("{} {tag} is already installed", self.project_name));
            return Ok(Outcome::AlreadyInstalled { tag });
        }

        let url = assets::resolve_download_url(release, &asset_name)?;
        let (bare_url, _) = fetcher::split_checksum_directive(&url);
        let primary = fetcher::file_name_of(bare_url).unwrap_or_else(|_| asset_name.clone());
        let fallback = format!("{}{}", self.project_name, platform::bin_ext());

        let tmp = env::temp_dir().join(&self.project_name).join(&tag);
        self.logger
            .debug(&format!("downloading '{url}' into '{}'", tmp.display()));
        self.fetcher
            .fetch(&url, &tmp)
            .await
            .map_err(|source| Error::Download { url, source })?;

        let binary = locate_binary(&tmp, &primary, &fallback).ok_or_else(|| {
            Error::NoBinaryFound {
                primary,
                fallback,
                dir: tmp.clone(),
            }
        })?;
        fs::safe_move(&binary, &dest).map_err(Error::SafeMove)?;

        if let Err(e) = std::fs::remove_dir_all(&tmp) {
            self.logger.warn(&format!(
                "could not remove download directory {}: {e}",
                tmp.display(),
            ));
        }
        self.logger.info(&format!(
            "installed {} {tag} to {}",
            self.project_name,
            dest.display(),
        ));
        Ok(Outcome::Installed { tag })
    }
}

/// Finds the downloaded binary in the fetch directory: first under the
/// downloaded file's own name, then under the project name.
fn locate_binary(dir: &Path, primary: &str, fallback: &str) -> Option<PathBuf> {
    [primary, fallback]
        .into_iter()
        .map(|name| dir.join(name))
        .find(|candidate| candidate.is_file())
}
