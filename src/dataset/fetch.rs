//! Checksum-verified download of MTGJSON dataset files.
//!
//! Every dataset on the CDN has a sibling `.sha256` file. A local copy whose
//! digest already matches is left alone unless a refetch is forced.

use crate::config;
use crate::error::{AnalyzerError, Result};
use reqwest::blocking::Client;
use sha2::{Digest, Sha256};
use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

// ---------------------------------------------------------------------------
// DatasetKind
// ---------------------------------------------------------------------------

/// The MTGJSON files that can be fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetKind {
    Atomic,
    AllPrintings,
}

impl DatasetKind {
    pub fn file_name(self) -> &'static str {
        match self {
            DatasetKind::Atomic => "AtomicCards.json",
            DatasetKind::AllPrintings => "AllPrintings.json",
        }
    }

    pub fn url(self) -> String {
        format!("{}/{}", config::CDN_BASE, self.file_name())
    }

    pub fn sha256_url(self) -> String {
        format!("{}.sha256", self.url())
    }
}

impl FromStr for DatasetKind {
    type Err = AnalyzerError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "atomic" => Ok(DatasetKind::Atomic),
            "all-printings" => Ok(DatasetKind::AllPrintings),
            other => Err(AnalyzerError::InvalidArgument(format!(
                "Invalid dataset \"{}\". Use one of: atomic, all-printings",
                other
            ))),
        }
    }
}

/// Result of a [`Fetcher::fetch`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The local file already matched the published checksum.
    UpToDate(PathBuf),
    /// The file was downloaded and verified.
    Downloaded(PathBuf),
}

impl FetchOutcome {
    pub fn path(&self) -> &Path {
        match self {
            FetchOutcome::UpToDate(p) | FetchOutcome::Downloaded(p) => p,
        }
    }
}

// ---------------------------------------------------------------------------
// Fetcher
// ---------------------------------------------------------------------------

/// Downloads MTGJSON datasets into a local directory.
pub struct Fetcher {
    timeout: Duration,
    client: Option<Client>,
}

impl Default for Fetcher {
    fn default() -> Self {
        Self::new(Duration::from_secs(600))
    }
}

impl Fetcher {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            client: None,
        }
    }

    /// Lazy HTTP client, created on first use.
    fn client(&mut self) -> Result<Client> {
        if let Some(client) = &self.client {
            return Ok(client.clone());
        }
        let client = Client::builder()
            .timeout(self.timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        self.client = Some(client.clone());
        Ok(client)
    }

    /// Fetch `kind` into `dir`.
    ///
    /// An existing file is kept when `force` is false and its digest matches
    /// the published one. Otherwise the file is downloaded and verified.
    pub fn fetch(&mut self, kind: DatasetKind, dir: &Path, force: bool) -> Result<FetchOutcome> {
        let client = self.client()?;
        let expected = fetch_sha256(&client, &kind.sha256_url())?;

        fs::create_dir_all(dir)?;
        let destination = dir.join(kind.file_name());

        if destination.exists() && !force && verify_checksum(&destination, &expected)? {
            tracing::info!(path = %destination.display(), "dataset already up to date (sha256 match)");
            return Ok(FetchOutcome::UpToDate(destination));
        }

        tracing::info!(url = %kind.url(), path = %destination.display(), "downloading dataset");
        download_file(&client, &kind.url(), &destination)?;

        let actual = sha256_file(&destination)?;
        if !actual.eq_ignore_ascii_case(&expected) {
            return Err(AnalyzerError::ChecksumMismatch {
                path: destination.display().to_string(),
                expected,
                actual,
            });
        }

        tracing::info!(path = %destination.display(), "downloaded and verified dataset");
        Ok(FetchOutcome::Downloaded(destination))
    }
}

/// Fetch a published SHA-256 digest.
pub fn fetch_sha256(client: &Client, url: &str) -> Result<String> {
    let body = client.get(url).send()?.error_for_status()?.text()?;
    parse_sha256(&body).ok_or_else(|| {
        AnalyzerError::InvalidArgument(format!(
            "Unexpected sha256 format from {}: {}",
            url,
            body.trim()
        ))
    })
}

/// Validate a digest file body: exactly 64 hex characters once trimmed.
pub fn parse_sha256(body: &str) -> Option<String> {
    let digest = body.trim();
    if digest.len() == 64 && digest.chars().all(|c| c.is_ascii_hexdigit()) {
        Some(digest.to_string())
    } else {
        None
    }
}

/// Hex-encoded SHA-256 of a file, streamed.
pub fn sha256_file(path: &Path) -> Result<String> {
    let mut reader = BufReader::new(fs::File::open(path)?);
    let mut hasher = Sha256::new();
    let mut buf = [0u8; 64 * 1024];
    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(format!("{:x}", hasher.finalize()))
}

/// Compare a file's digest against `expected`, ignoring hex case.
pub fn verify_checksum(path: &Path, expected: &str) -> Result<bool> {
    Ok(sha256_file(path)?.eq_ignore_ascii_case(expected))
}

/// Download to a temp sibling and rename into place, so an interrupted
/// download never leaves a partial file at `dest`.
fn download_file(client: &Client, url: &str, dest: &Path) -> Result<()> {
    let tmp_dest = dest.with_extension(format!(
        "{}.tmp",
        dest.extension().and_then(|e| e.to_str()).unwrap_or("")
    ));

    let result = (|| -> Result<()> {
        let mut resp = client.get(url).send()?.error_for_status()?;
        {
            let mut file = fs::File::create(&tmp_dest)?;
            resp.copy_to(&mut file)?;
        }
        fs::rename(&tmp_dest, dest)?;
        Ok(())
    })();

    if result.is_err() {
        let _ = fs::remove_file(&tmp_dest);
    }

    result
}
