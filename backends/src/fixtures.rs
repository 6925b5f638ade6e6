//! Circuit artifact retrieval
//!
//! Benchmark fixtures (the compiled witness-generator WASM, the R1CS
//! constraint file, the proving key, and optional canned inputs) resolve
//! by name against either a base URL or a local directory. Retrieval is a
//! one-time setup step before timed trials; a failure here is fatal to the
//! run and is never retried.

use std::path::PathBuf;

use serde_json::Value;
use thiserror::Error;

/// Failure to retrieve a fixture artifact.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The server answered with a non-success status.
    #[error("fetching {url} failed with status {status}")]
    Status {
        /// The artifact URL.
        url: String,
        /// The response status code.
        status: reqwest::StatusCode,
    },

    /// The request itself failed.
    #[error("request for {url} failed: {source}")]
    Request {
        /// The artifact URL.
        url: String,
        /// The underlying client error.
        source: reqwest::Error,
    },

    /// A local artifact could not be read or cached.
    #[error("reading {path} failed: {source}")]
    Io {
        /// The artifact path.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// An input fixture was not valid JSON.
    #[error("artifact {name} is not valid JSON: {source}")]
    Json {
        /// The artifact name.
        name: String,
        /// The parse error.
        source: serde_json::Error,
    },
}

enum ArtifactSource {
    /// Fetch over HTTP, caching downloads so the circuit runtime can open
    /// them by path. The cache lives as long as the store.
    BaseUrl {
        base: String,
        cache: tempfile::TempDir,
    },
    Dir(PathBuf),
}

/// Resolves artifact names to bytes or on-disk paths.
pub struct ArtifactStore {
    source: ArtifactSource,
    client: reqwest::Client,
}

impl ArtifactStore {
    /// Resolve artifacts against a base URL.
    pub fn from_url(base_url: impl Into<String>) -> Result<Self, FetchError> {
        let cache = tempfile::tempdir().map_err(|source| FetchError::Io {
            path: std::env::temp_dir(),
            source,
        })?;
        Ok(Self {
            source: ArtifactSource::BaseUrl {
                base: base_url.into().trim_end_matches('/').to_string(),
                cache,
            },
            client: reqwest::Client::new(),
        })
    }

    /// Resolve artifacts against a local directory.
    pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            source: ArtifactSource::Dir(dir.into()),
            client: reqwest::Client::new(),
        }
    }

    /// Retrieve an artifact's bytes.
    pub async fn fetch(&self, name: &str) -> Result<Vec<u8>, FetchError> {
        match &self.source {
            ArtifactSource::BaseUrl { base, .. } => self.download(&join_url(base, name)).await,
            ArtifactSource::Dir(dir) => {
                let path = dir.join(name);
                tokio::fs::read(&path)
                    .await
                    .map_err(|source| FetchError::Io { path, source })
            }
        }
    }

    /// Retrieve an artifact and hand back an on-disk path for it.
    ///
    /// Directory-sourced artifacts resolve in place; URL-sourced artifacts
    /// are downloaded into the store's cache once and reused afterwards.
    pub async fn materialize(&self, name: &str) -> Result<PathBuf, FetchError> {
        match &self.source {
            ArtifactSource::Dir(dir) => {
                let path = dir.join(name);
                if !path.exists() {
                    return Err(FetchError::Io {
                        path,
                        source: std::io::Error::from(std::io::ErrorKind::NotFound),
                    });
                }
                Ok(path)
            }
            ArtifactSource::BaseUrl { base, cache } => {
                let path = cache.path().join(name);
                if !path.exists() {
                    let bytes = self.download(&join_url(base, name)).await?;
                    tokio::fs::write(&path, bytes)
                        .await
                        .map_err(|source| FetchError::Io {
                            path: path.clone(),
                            source,
                        })?;
                }
                Ok(path)
            }
        }
    }

    /// Retrieve and parse a JSON input fixture.
    pub async fn fetch_json(&self, name: &str) -> Result<Value, FetchError> {
        let bytes = self.fetch(name).await?;
        serde_json::from_slice(&bytes).map_err(|source| FetchError::Json {
            name: name.to_string(),
            source,
        })
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        log::debug!("fetching {url}");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Request {
                url: url.to_string(),
                source,
            })?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }
        let bytes = response.bytes().await.map_err(|source| FetchError::Request {
            url: url.to_string(),
            source,
        })?;
        Ok(bytes.to_vec())
    }
}

fn join_url(base: &str, name: &str) -> String {
    format!("{base}/{name}")
}
