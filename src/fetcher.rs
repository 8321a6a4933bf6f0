//! The fetch-to-directory collaborator.

use anyhow::{anyhow, bail, Context as _, Result};
use async_trait::async_trait;
use flate2::read::GzDecoder;
use reqwest::{Client, StatusCode};
use sha2::{Digest, Sha256};
use std::{
    fmt::Debug,
    fs::File,
    io::Write,
    path::Path,
};
use tar::Archive;
use zip::ZipArchive;

/// Marks a fetch URL as carrying the URL of a checksum file to verify the
/// download against.
const CHECKSUM_DIRECTIVE: &str = "?checksum=file:";

/// Downloads a URL into a directory.
///
/// Implementations must support `http`/`https`, honor the
/// `?checksum=file:<url>` directive appended by asset resolution, and leave
/// either the fetched file or, for `.tar.gz`/`.tgz`/`.zip` archives, its
/// extracted contents in the destination directory. Symlinks from archive
/// contents must never be created.
#[async_trait]
pub trait Fetch: Debug + Send + Sync {
    async fn fetch(&self, url: &str, dest: &Path) -> Result<()>;
}

/// The stock [`Fetch`] implementation, backed by the same HTTP client the
/// rest of the upgrade uses.
#[derive(Debug)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(client: Client) -> Self {
        HttpFetcher { client }
    }

    async fn download(&self, url: &str, path: &Path) -> Result<()> {
        let mut resp = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("request {url}"))?;
        if resp.status() != StatusCode::OK {
            bail!("error requesting {url}: {}", resp.status());
        }

        let mut file = File::create(path)
            .with_context(|| format!("create download file at {}", path.display()))?;
        while let Some(chunk) = resp
            .chunk()
            .await
            .with_context(|| format!("read from {url}"))?
        {
            file.write_all(&chunk)
                .with_context(|| format!("write to {}", path.display()))?;
        }
        Ok(())
    }

    async fn fetch_text(&self, url: &str) -> Result<String> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("request {url}"))?;
        if resp.status() != StatusCode::OK {
            bail!("error requesting {url}: {}", resp.status());
        }
        resp.text()
            .await
            .with_context(|| format!("read body from {url}"))
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &str, dest: &Path) -> Result<()> {
        let (asset_url, checksum_url) = split_checksum_directive(url);
        let file_name = file_name_of(asset_url)?;

        std::fs::create_dir_all(dest)
            .with_context(|| format!("create download directory {}", dest.display()))?;
        let path = dest.join(&file_name);
        self.download(asset_url, &path).await?;

        if let Some(checksum_url) = checksum_url {
            let checksums = self.fetch_text(checksum_url).await?;
            verify_checksum(&path, &file_name, &checksums)?;
        }

        unpack(&path, dest)
    }
}

pub(crate) fn split_checksum_directive(url: &str) -> (&str, Option<&str>) {
    match url.split_once(CHECKSUM_DIRECTIVE) {
        Some((asset_url, checksum_url)) => (asset_url, Some(checksum_url)),
        None => (url, None),
    }
}

pub(crate) fn file_name_of(url: &str) -> Result<String> {
    url.rsplit('/')
        .next()
        .filter(|name| !name.is_empty())
        .map(String::from)
        .ok_or_else(|| anyhow!("cannot determine a file name from '{url}'"))
}

/// Looks `file_name` up in the checksum file content and compares its sha256
/// digest against the downloaded file.
fn verify_checksum(path: &Path, file_name: &str, checksums: &str) -> Result<()> {
    let expected = expected_checksum(file_name, checksums)?;
    if expected.len() != Sha256::output_size() * 2 {
        bail!("checksum for '{file_name}' is not a sha256 digest: {expected}");
    }

    let mut hasher = Sha256::new();
    let mut file =
        File::open(path).with_context(|| format!("open {} for checksumming", path.display()))?;
    std::io::copy(&mut file, &mut hasher)?;
    let actual = hex::encode(hasher.finalize());

    if actual != expected.to_lowercase() {
        bail!("checksum mismatch for '{file_name}': expected {expected}, got {actual}");
    }
    Ok(())
}

fn expected_checksum(file_name: &str, checksums: &str) -> Result<String> {
    let relevant: Vec<&str> = checksums
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#') && !l.starts_with("//"))
        .collect();

    for line in &relevant {
        let fields: Vec<&str> = line.split_whitespace().collect();
        // A file holding a single bare digest covers a single-asset release.
        if relevant.len() == 1 && fields.len() == 1 {
            return Ok(fields[0].to_string());
        }
        if fields.len() == 2 && fields[1].trim_start_matches('*') == file_name {
            return Ok(fields[0].to_string());
        }
    }

    Err(anyhow!("no checksum found for '{file_name}'"))
}

fn unpack(path: &Path, dest: &Path) -> Result<()> {
    let name = path.to_string_lossy();
    if name.ends_with(".tar.gz") || name.ends_with(".tgz") {
        extract_tarball(path, dest)?;
    } else if name.ends_with(".zip") {
        extract_zip(path, dest)?;
    } else {
        // A bare file (binary, script, ...) stays where it landed.
        return Ok(());
    }
    std::fs::remove_file(path).with_context(|| format!("remove archive {}", path.display()))
}

fn extract_tarball(path: &Path, dest: &Path) -> Result<()> {
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let mut archive = Archive::new(GzDecoder::new(file));
    for entry in archive.entries()? {
        let mut entry = entry?;
        // Only regular files come out; this drops symlinks, devices, etc.
        if !entry.header().entry_type().is_file() {
            continue;
        }
        entry
            .unpack_in(dest)
            .with_context(|| format!("unpack into {}", dest.display()))?;
    }
    Ok(())
}

fn extract_zip(path: &Path, dest: &Path) -> Result<()> {
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let mut archive = ZipArchive::new(file)?;
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        if entry.is_dir() || is_zip_symlink(entry.unix_mode()) {
            continue;
        }
        let Some(rel) = entry.enclosed_name() else {
            // Entry path escapes the destination; never extract it.
            continue;
        };
        let out = dest.join(rel);
        if let Some(parent) = out.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut file =
            File::create(&out).with_context(|| format!("create {}", out.display()))?;
        std::io::copy(&mut entry, &mut file)?;
    }
    Ok(())
}

fn is_zip_symlink(unix_mode: Option<u32>) -> bool {
    unix_mode.is_some_and(|mode| mode & 0o170_000 == 0o120_000)
}
