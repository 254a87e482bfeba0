//! Chapter catalog sources.
//!
//! The store depends only on [`ChapterSource::load`]. Two sources exist:
//!
//! - [`EmbeddedCatalog`]: the chapter list compiled into the binary, returned
//!   after a fixed delay that stands in for network latency
//! - [`FileCatalog`]: a JSON file on disk with the same record layout
//!
//! Neither caches: every `load` call resolves the data again.

use futures::future::BoxFuture;
use futures::FutureExt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::app_data::embedded_chapters;
use crate::chapter::Chapter;
use crate::config::Config;

/// Default simulated fetch latency
pub const DEFAULT_FETCH_DELAY: Duration = Duration::from_millis(1000);

/// Errors that can occur while loading the catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("{0}")]
    LoadFailed(String),

    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid catalog {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Result of a catalog load
pub type LoadResult = Result<Vec<Chapter>, CatalogError>;

/// Anything that can produce the full chapter list asynchronously
pub trait ChapterSource: Send + Sync {
    /// Resolve the full chapter list.
    ///
    /// The returned future owns everything it needs so it can be spawned.
    fn load(&self) -> BoxFuture<'static, LoadResult>;

    /// Short human-readable description for logs and diagnostics
    fn describe(&self) -> String;
}

/// The static catalog compiled into the binary
#[derive(Debug, Clone)]
pub struct EmbeddedCatalog {
    delay: Duration,
}

impl Default for EmbeddedCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_FETCH_DELAY)
    }
}

impl EmbeddedCatalog {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl ChapterSource for EmbeddedCatalog {
    fn load(&self) -> BoxFuture<'static, LoadResult> {
        let delay = self.delay;
        async move {
            tokio::time::sleep(delay).await;
            Ok(embedded_chapters().to_vec())
        }
        .boxed()
    }

    fn describe(&self) -> String {
        format!("embedded catalog ({} ms delay)", self.delay.as_millis())
    }
}

/// A catalog read from a JSON file on every load
#[derive(Debug, Clone)]
pub struct FileCatalog {
    path: PathBuf,
    delay: Duration,
}

impl FileCatalog {
    pub fn new(path: impl Into<PathBuf>, delay: Duration) -> Self {
        Self {
            path: path.into(),
            delay,
        }
    }
}

impl ChapterSource for FileCatalog {
    fn load(&self) -> BoxFuture<'static, LoadResult> {
        let path = self.path.clone();
        let delay = self.delay;
        async move {
            tokio::time::sleep(delay).await;
            let content = tokio::fs::read_to_string(&path)
                .await
                .map_err(|source| CatalogError::Io {
                    path: path.clone(),
                    source,
                })?;
            serde_json::from_str(&content).map_err(|source| CatalogError::Parse { path, source })
        }
        .boxed()
    }

    fn describe(&self) -> String {
        format!("catalog file {}", self.path.display())
    }
}

/// Build the source selected by the user's configuration
pub fn source_from_config(config: &Config) -> Arc<dyn ChapterSource> {
    let delay = Duration::from_millis(config.catalog.fetch_delay_ms);
    match &config.catalog.file {
        Some(path) => Arc::new(FileCatalog::new(path, delay)),
        None => Arc::new(EmbeddedCatalog::new(delay)),
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::Mutex;

    /// A source that replays scripted outcomes, one per load call.
    /// Once the script runs out it keeps returning the last outcome.
    pub struct ScriptedSource {
        outcomes: Mutex<Vec<(Duration, Result<Vec<Chapter>, String>)>>,
    }

    impl ScriptedSource {
        pub fn new(outcomes: Vec<(Duration, Result<Vec<Chapter>, String>)>) -> Self {
            Self {
                outcomes: Mutex::new(outcomes),
            }
        }

        pub fn ok(chapters: Vec<Chapter>) -> Self {
            Self::new(vec![(Duration::ZERO, Ok(chapters))])
        }
    }

    impl ChapterSource for ScriptedSource {
        fn load(&self) -> BoxFuture<'static, LoadResult> {
            let mut outcomes = self.outcomes.lock().unwrap();
            let (delay, outcome) = if outcomes.len() > 1 {
                outcomes.remove(0)
            } else {
                outcomes[0].clone()
            };
            async move {
                tokio::time::sleep(delay).await;
                outcome.map_err(CatalogError::LoadFailed)
            }
            .boxed()
        }

        fn describe(&self) -> String {
            "scripted source".to_string()
        }
    }

    /// A source whose load future panics when polled
    pub struct PanickingSource;

    fn explode() -> LoadResult {
        panic!("catalog exploded")
    }

    impl ChapterSource for PanickingSource {
        fn load(&self) -> BoxFuture<'static, LoadResult> {
            async move { explode() }.boxed()
        }

        fn describe(&self) -> String {
            "panicking source".to_string()
        }
    }
}
