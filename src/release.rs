use serde::Deserialize;

/// One tagged publication of a project, with its downloadable assets.
///
/// Releases are produced by a [`ReleaseSource`](crate::ReleaseSource) and are
/// read-only afterwards. The tag is expected, but not guaranteed, to be a
/// semver string prefixed with `v`; releases whose tags do not parse are
/// ignored during selection.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct Release {
    pub tag_name: String,
    #[serde(default)]
    pub assets: Vec<Asset>,
}

/// One downloadable file attached to a release.
///
/// Both fields are required for an asset to be usable. A release source must
/// drop assets for which either is missing.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Asset {
    pub name: String,
    pub download_url: String,
}
