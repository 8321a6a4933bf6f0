//! Renders asset and target name templates.
//!
//! Naming differs per release pipeline, so both names are user-overridable
//! [tera](https://keats.github.io/tera/) templates rendered against a fixed
//! variable set. Tera is non-Turing-complete and does not reach the
//! filesystem or network from a one-off template, which keeps user-supplied
//! templates safe to evaluate.

use crate::{options::ReleaseOptions, picker, platform};
use lazy_regex::{lazy_regex, Lazy};
use regex::Regex;
use serde::Serialize;
use tera::{Context, Tera};

pub(crate) const DEFAULT_ASSET_TEMPLATE: &str =
    "{{ repo }}_{{ goos }}_{{ goarch }}{{ archive_ext }}";

pub(crate) const DEFAULT_TARGET_TEMPLATE: &str = "{{ repo }}\
{% if opts.major %}-{{ opts.major }}\
{% elif opts.minor %}-{{ opts.minor }}\
{% endif %}\
{% if opts.prereleases and prerelease %}-{{ prerelease }}{% endif %}\
{{ bin_ext }}";

static WORD_RE: Lazy<Regex> = lazy_regex!("[a-zA-Z]+");

/// The variables a name template is rendered against. Built once per run and
/// discarded after rendering.
#[derive(Debug, Serialize)]
pub(crate) struct TemplateData<'a> {
    pub(crate) archive_ext: &'static str,
    pub(crate) bin_ext: &'static str,
    pub(crate) goarch: &'static str,
    pub(crate) goos: &'static str,
    pub(crate) opts: &'a ReleaseOptions,
    pub(crate) prerelease: String,
    pub(crate) repo: &'a str,
    pub(crate) tag: &'a str,
}

impl<'a> TemplateData<'a> {
    pub(crate) fn new(repo: &'a str, tag: &'a str, opts: &'a ReleaseOptions) -> Self {
        TemplateData {
            archive_ext: platform::archive_ext(),
            bin_ext: platform::bin_ext(),
            goarch: platform::goarch(),
            goos: platform::goos(),
            opts,
            prerelease: prerelease_token(tag),
            repo,
            tag,
        }
    }
}

/// Renders a single template. Fails on syntax errors and on references to
/// variables or filters outside the documented set; the caller attaches the
/// asset-name vs target-name context.
pub(crate) fn render(template: &str, data: &TemplateData) -> Result<String, tera::Error> {
    let context = Context::from_serialize(data)?;
    Tera::one_off(template, &context, false)
}

/// The leading alphabetic run of a tag's semver prerelease component, so
/// `beta` for `v1.2.3-beta.1`. Empty for stable tags and unparseable tags.
fn prerelease_token(tag: &str) -> String {
    let Some(version) = picker::parse_tag(tag) else {
        return String::new();
    };
    WORD_RE
        .find(version.pre.as_str())
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}
