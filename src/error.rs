use crate::options::OptionError;
use std::path::PathBuf;
use thiserror::Error;

/// The error type returned by [`UpgraderBuilder::build`](crate::UpgraderBuilder::build)
/// and [`Upgrader::run`](crate::Upgrader::run).
///
/// Configuration errors are produced before any I/O is performed.
/// Collaborator failures are wrapped with the stage that failed and keep the
/// underlying cause. Note that "no matching release" and "already installed"
/// are not errors; they are [`Outcome`](crate::Outcome) variants.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// No project name was set on the builder.
    #[error("project name must not be empty")]
    MissingProjectName,

    /// No release source was set on the builder.
    #[error("release source must be set")]
    MissingReleaseSource,

    /// One or more options were invalid. Every failing option is reported,
    /// not just the first.
    #[error("invalid options: {}", join(.0))]
    InvalidOptions(Vec<OptionError>),

    /// Building the default HTTP client failed.
    #[error("build http client")]
    HttpClient(#[source] anyhow::Error),

    /// The release source failed to list releases.
    #[error("get releases")]
    GetReleases(#[source] anyhow::Error),

    /// The target (installed binary) name template failed to render.
    #[error("render target name template")]
    TargetTemplate(#[source] tera::Error),

    /// The asset name template failed to render.
    #[error("render asset name template")]
    AssetTemplate(#[source] tera::Error),

    /// The selected release has no asset with the rendered name.
    #[error("no release asset named '{expected}'")]
    NoMatchingAsset { expected: String },

    /// Downloading the asset (or its checksum file) failed.
    #[error("download asset(s) from '{url}'")]
    Download {
        url: String,
        #[source]
        source: anyhow::Error,
    },

    /// No installable binary was found in the fetched directory.
    #[error("cannot determine binary to install: neither '{primary}' nor '{fallback}' exists in '{}'", dir.display())]
    NoBinaryFound {
        primary: String,
        fallback: String,
        dir: PathBuf,
    },

    /// Replacing the destination binary failed. The destination is left in
    /// its pre-attempt state.
    #[error("safe move")]
    SafeMove(#[source] std::io::Error),
}

fn join(errors: &[OptionError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
