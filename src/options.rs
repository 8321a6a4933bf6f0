use lazy_regex::{lazy_regex, Lazy};
use regex::Regex;
use serde::Serialize;
use thiserror::Error;

static MAJOR_RE: Lazy<Regex> = lazy_regex!("^v[0-9]+$");
static MINOR_RE: Lazy<Regex> = lazy_regex!(r"^v[0-9]+\.[0-9]+$");

/// Version filters applied when selecting a release.
///
/// `major` and `minor` are mutually exclusive; setting both is a
/// configuration error detected by
/// [`UpgraderBuilder::build`](crate::UpgraderBuilder::build) before any
/// network call.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ReleaseOptions {
    /// Pin selection to one major line, e.g. `v2`.
    pub major: Option<String>,
    /// Pin selection to one minor line, e.g. `v2.5`.
    pub minor: Option<String>,
    /// Consider prerelease versions during selection.
    pub prereleases: bool,
}

/// A single invalid option, as reported inside
/// [`Error::InvalidOptions`](crate::Error::InvalidOptions).
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum OptionError {
    #[error("invalid major version '{0}', expected the form 'v1'")]
    InvalidMajor(String),

    #[error("invalid minor version '{0}', expected the form 'v1.2'")]
    InvalidMinor(String),

    #[error("major and minor options are mutually exclusive")]
    MajorMinorExclusive,
}

impl ReleaseOptions {
    /// Checks option syntax and mutual exclusion, accumulating every failure
    /// instead of stopping at the first.
    pub(crate) fn validate(&self) -> Vec<OptionError> {
        let mut errors = vec![];
        if let Some(major) = self.major.as_deref() {
            if !MAJOR_RE.is_match(major) {
                errors.push(OptionError::InvalidMajor(major.to_string()));
            }
        }
        if let Some(minor) = self.minor.as_deref() {
            if !MINOR_RE.is_match(minor) {
                errors.push(OptionError::InvalidMinor(minor.to_string()));
            }
        }
        if self.major.is_some() && self.minor.is_some() {
            errors.push(OptionError::MajorMinorExclusive);
        }
        errors
    }
}
