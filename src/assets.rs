//! Resolves the download URL for a selected release.

use crate::{error::Error, release::Release};

/// The conventional name of the asset carrying checksums for every other
/// asset in the release.
pub(crate) const CHECKSUMS_ASSET: &str = "checksums.txt";

/// Finds the asset named exactly `asset_name` and returns its download URL.
///
/// The match is exact, not a suffix match: `foo.tar.gz` must never be
/// satisfied by `foo.tar.gz.sig`. When the release also carries a
/// [`CHECKSUMS_ASSET`], the returned URL embeds a checksum directive so the
/// fetch step can verify the download.
pub(crate) fn resolve_download_url(release: &Release, asset_name: &str) -> Result<String, Error> {
    let mut matched = None;
    let mut checksums = None;
    for asset in &release.assets {
        if asset.name == asset_name {
            matched = Some(asset);
        } else if asset.name == CHECKSUMS_ASSET {
            checksums = Some(asset);
        }
    }

    let asset = matched.ok_or_else(|| Error::NoMatchingAsset {
        expected: asset_name.to_string(),
    })?;

    Ok(match checksums {
        Some(checksums) => format!(
            "{}?checksum=file:{}",
            asset.download_url, checksums.download_url,
        ),
        None => asset.download_url.clone(),
    })
}
