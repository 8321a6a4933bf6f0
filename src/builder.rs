use crate::{
    error::Error,
    fetcher::{Fetch, HttpFetcher},
    logger::{Logger, NopLogger},
    options::ReleaseOptions,
    source::ReleaseSource,
    template::{DEFAULT_ASSET_TEMPLATE, DEFAULT_TARGET_TEMPLATE},
    upgrader::Upgrader,
};
use anyhow::Context as _;
use reqwest::{
    header::{HeaderMap, HeaderValue, USER_AGENT},
    Client,
};
use std::path::{Path, PathBuf};

/// `UpgraderBuilder` collects the configuration for one upgrade attempt and
/// validates it as a whole: every invalid option is reported, not just the
/// first, and no I/O happens before [`UpgraderBuilder::build`] succeeds.
#[derive(Debug, Default)]
pub struct UpgraderBuilder {
    project_name: Option<String>,
    current_version: Option<String>,
    source: Option<Box<dyn ReleaseSource>>,
    major: Option<String>,
    minor: Option<String>,
    prereleases: bool,
    asset_template: Option<String>,
    target_template: Option<String>,
    destdir: Option<PathBuf>,
    http_client: Option<Client>,
    logger: Option<Box<dyn Logger>>,
    fetcher: Option<Box<dyn Fetch>>,
}

impl UpgraderBuilder {
    /// Returns a new empty `UpgraderBuilder`.
    #[must_use]
    pub fn new() -> Self {
        UpgraderBuilder::default()
    }

    /// Set the project (repository) name. Used as the `repo` template
    /// variable and as the fallback binary name inside downloaded archives.
    /// Required.
    #[must_use]
    pub fn project_name(mut self, name: impl Into<String>) -> Self {
        self.project_name = Some(name.into());
        self
    }

    /// Set the version currently installed, e.g. `v1.2.3`. When the selected
    /// release carries this exact tag and the destination binary already
    /// exists, `run` short-circuits without downloading anything.
    #[must_use]
    pub fn current_version(mut self, version: impl Into<String>) -> Self {
        self.current_version = Some(version.into());
        self
    }

    /// Set the release-listing collaborator. Required. Use
    /// [`GitHubReleases`](crate::GitHubReleases) for projects released on
    /// GitHub.
    #[must_use]
    pub fn release_source(mut self, source: impl ReleaseSource + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Pin selection to one major line, e.g. `v2`. Mutually exclusive with
    /// `minor`.
    #[must_use]
    pub fn major(mut self, major: impl Into<String>) -> Self {
        self.major = Some(major.into());
        self
    }

    /// Pin selection to one minor line, e.g. `v2.5`. Mutually exclusive with
    /// `major`.
    #[must_use]
    pub fn minor(mut self, minor: impl Into<String>) -> Self {
        self.minor = Some(minor.into());
        self
    }

    /// Consider prerelease versions during selection. When set, the highest
    /// version of any kind wins, even a prerelease of a version with no
    /// stable release yet.
    #[must_use]
    pub fn prereleases(mut self, prereleases: bool) -> Self {
        self.prereleases = prereleases;
        self
    }

    /// Override the asset name template. The default is
    /// `{{ repo }}_{{ goos }}_{{ goarch }}{{ archive_ext }}`, which matches
    /// goreleaser-style pipelines.
    #[must_use]
    pub fn asset_template(mut self, template: impl Into<String>) -> Self {
        self.asset_template = Some(template.into());
        self
    }

    /// Override the installed binary name template. The default appends the
    /// major or minor pin and the prerelease tag to the project name, giving
    /// names like `repo`, `repo-v1`, `repo-v1.5-beta`, or `repo.exe`.
    ///
    /// A badly chosen template can make a prerelease or an old pinned line
    /// overwrite the latest stable installation; make sure overrides keep
    /// distinct names for whatever you run side by side.
    #[must_use]
    pub fn target_template(mut self, template: impl Into<String>) -> Self {
        self.target_template = Some(template.into());
        self
    }

    /// Set the directory the binary is installed in. Defaults to
    /// `${HOME}/.local/bin`.
    #[must_use]
    pub fn destination(mut self, destdir: impl AsRef<Path>) -> Self {
        self.destdir = Some(destdir.as_ref().to_path_buf());
        self
    }

    /// Set the HTTP client used for listing releases and downloading assets.
    #[must_use]
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Set the logging capability. Defaults to a no-op;
    /// [`StdLogger`](crate::StdLogger) forwards to the `log` facade.
    #[must_use]
    pub fn logger(mut self, logger: impl Logger + 'static) -> Self {
        self.logger = Some(Box::new(logger));
        self
    }

    /// Override the fetch-to-directory collaborator. The default downloads
    /// over HTTP(S), verifies the checksum directive, and extracts archives.
    #[must_use]
    pub fn fetcher(mut self, fetcher: impl Fetch + 'static) -> Self {
        self.fetcher = Some(Box::new(fetcher));
        self
    }

    /// Validates the configuration and returns the [`Upgrader`].
    ///
    /// # Errors
    ///
    /// Fails when no project name or release source was set, or when the
    /// major/minor options are malformed or set together; option errors are
    /// aggregated into a single [`Error::InvalidOptions`].
    pub fn build(self) -> Result<Upgrader, Error> {
        let project_name = self.project_name.unwrap_or_default();
        if project_name.is_empty() {
            return Err(Error::MissingProjectName);
        }
        let Some(source) = self.source else {
            return Err(Error::MissingReleaseSource);
        };

        let options = ReleaseOptions {
            major: self.major.filter(|m| !m.is_empty()),
            minor: self.minor.filter(|m| !m.is_empty()),
            prereleases: self.prereleases,
        };
        let errors = options.validate();
        if !errors.is_empty() {
            return Err(Error::InvalidOptions(errors));
        }

        let client = match self.http_client {
            Some(client) => client,
            None => default_client().map_err(Error::HttpClient)?,
        };
        let fetcher = self
            .fetcher
            .unwrap_or_else(|| Box::new(HttpFetcher::new(client.clone())));

        Ok(Upgrader::new(
            project_name,
            self.current_version.unwrap_or_default(),
            source,
            options,
            self.asset_template
                .unwrap_or_else(|| DEFAULT_ASSET_TEMPLATE.to_string()),
            self.target_template
                .unwrap_or_else(|| DEFAULT_TARGET_TEMPLATE.to_string()),
            self.destdir.unwrap_or_else(default_destdir),
            client,
            fetcher,
            self.logger.unwrap_or_else(|| Box::new(NopLogger)),
        ))
    }
}

fn default_destdir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".local")
        .join("bin")
}

fn default_client() -> anyhow::Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(
        USER_AGENT,
        HeaderValue::from_str(&format!("selfup version {}", crate::VERSION))
            .context("build User-Agent header")?,
    );
    Client::builder()
        .gzip(true)
        .default_headers(headers)
        .build()
        .context("build reqwest client")
}
