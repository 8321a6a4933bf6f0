//! A library for keeping CLI tools up to date from their published releases.
//!
//! `selfup` downloads and installs released binaries from a release-hosting
//! service (GitHub by default). Given the list of releases for a project it
//! selects the best matching version (optionally pinned to a major or minor
//! line, and optionally including prereleases), computes the asset and
//! installed binary names from small templates, downloads the chosen
//! artifact, and
//! atomically replaces the destination binary. The binary being replaced may
//! be the one currently running: replacement is always done by writing a
//! sibling temporary file and renaming it over the destination.
//!
//! The main entry point is the [`UpgraderBuilder`] struct:
//!
//! ```ignore
//! use selfup::{GitHubReleases, Outcome, UpgraderBuilder};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let upgrader = UpgraderBuilder::new()
//!         .project_name("precious")
//!         .current_version("v1.2.3")
//!         .release_source(GitHubReleases::new("houseabsolute", "precious"))
//!         .build()?;
//!
//!     match upgrader.run().await? {
//!         Outcome::Installed { tag } => println!("installed {tag}"),
//!         Outcome::AlreadyInstalled { tag } => println!("{tag} already installed"),
//!         Outcome::NoMatchingRelease => println!("nothing to do"),
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## How the release is chosen
//!
//! Release tags are expected to be semver strings prefixed with `v`. Tags
//! that do not parse are never considered. With no options set, the highest
//! stable version wins. With [`UpgraderBuilder::major`] or
//! [`UpgraderBuilder::minor`] (mutually exclusive), only that version line is
//! considered. With [`UpgraderBuilder::prereleases`], the highest version of
//! any kind wins, even a prerelease of a version whose stable release does
//! not exist yet.
//!
//! ## How asset and binary names are computed
//!
//! Both names are rendered from [tera](https://keats.github.io/tera/)
//! templates with the variables `repo`, `tag`, `goos`, `goarch`,
//! `archive_ext`, `bin_ext`, `prerelease`, and `opts` (the `major`, `minor`,
//! and `prereleases` options). The `lower`, `upper`, and `title` filters are
//! available. The defaults match goreleaser-style release pipelines, for
//! example `myrepo_linux_amd64.tar.gz` installed as `myrepo`.

mod assets;
mod builder;
mod error;
mod fetcher;
mod fs;
mod github;
mod logger;
mod options;
mod picker;
mod platform;
mod release;
mod source;
mod template;
mod upgrader;

pub use crate::{
    builder::UpgraderBuilder,
    error::Error,
    fetcher::{Fetch, HttpFetcher},
    fs::{exists, safe_move},
    github::GitHubReleases,
    logger::{Logger, NopLogger, StdLogger},
    options::{OptionError, ReleaseOptions},
    release::{Asset, Release},
    source::ReleaseSource,
    upgrader::{Outcome, Upgrader},
};

/// The version of the `selfup` crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
