//! Source loaders: where `#include` and `inherit` targets come from.

use crate::config::ProjectConfig;
use dashmap::DashMap;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("file not found: {0}")]
    NotFound(String),
    #[error("cannot access {name}: {source}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },
    #[error("timed out after {timeout:?} waiting for {name}")]
    Timeout { name: String, timeout: Duration },
    #[error("loader disconnected while requesting {0}")]
    Disconnected(String),
    #[error("remote error for {name}: {message}")]
    Remote { name: String, message: String },
    #[error("{0} is not supported by this loader")]
    Unsupported(&'static str),
}

/// Supplies source text for logical file names.
pub trait SourceLoader: Send + Sync {
    fn load(&self, name: &str) -> Result<String, LoadError>;

    fn save(&self, name: &str, text: &str) -> Result<(), LoadError>;

    fn can_compile(&self) -> bool {
        false
    }

    /// Ask the host to compile a file; returns its output.
    fn compile(&self, _name: &str) -> Result<String, LoadError> {
        Err(LoadError::Unsupported("compile"))
    }
}

// =============================================================================
// File system
// =============================================================================

/// Resolves logical names against a list of search roots. A name without an
/// extension also matches `name.c`.
#[derive(Clone, Debug, Default)]
pub struct FsLoader {
    roots: Vec<PathBuf>,
}

impl FsLoader {
    pub fn new(roots: Vec<PathBuf>) -> FsLoader {
        FsLoader { roots }
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    fn relative(name: &str) -> &Path {
        Path::new(name.trim_start_matches('/'))
    }

    /// First existing file for `name` under the search roots.
    pub fn find(&self, name: &str) -> Option<PathBuf> {
        let relative = Self::relative(name);
        for root in &self.roots {
            let candidate = root.join(relative);
            if candidate.is_file() {
                return Some(candidate);
            }
            if relative.extension().is_none() {
                let with_extension = candidate.with_extension("c");
                if with_extension.is_file() {
                    return Some(with_extension);
                }
            }
        }
        None
    }
}

impl SourceLoader for FsLoader {
    fn load(&self, name: &str) -> Result<String, LoadError> {
        let path = self
            .find(name)
            .ok_or_else(|| LoadError::NotFound(name.to_string()))?;
        debug!(name, path = %path.display(), "loading source");
        std::fs::read_to_string(&path).map_err(|source| LoadError::Io {
            name: name.to_string(),
            source,
        })
    }

    /// Overwrites the existing file, or creates it under the first root.
    fn save(&self, name: &str, text: &str) -> Result<(), LoadError> {
        let path = match self.find(name) {
            Some(path) => path,
            None => self
                .roots
                .first()
                .map(|root| root.join(Self::relative(name)))
                .ok_or(LoadError::Unsupported("save without a search root"))?,
        };
        std::fs::write(&path, text).map_err(|source| LoadError::Io {
            name: name.to_string(),
            source,
        })
    }
}

// =============================================================================
// Memory
// =============================================================================

/// In-memory file map, for tests and unsaved editor buffers.
#[derive(Debug, Default)]
pub struct MemoryLoader {
    files: DashMap<String, String>,
}

impl MemoryLoader {
    pub fn new() -> MemoryLoader {
        MemoryLoader::default()
    }

    pub fn insert(&self, name: impl Into<String>, text: impl Into<String>) {
        self.files.insert(name.into(), text.into());
    }

    pub fn remove(&self, name: &str) -> Option<String> {
        self.files.remove(name).map(|(_, text)| text)
    }
}

impl<N: Into<String>, T: Into<String>> FromIterator<(N, T)> for MemoryLoader {
    fn from_iter<I: IntoIterator<Item = (N, T)>>(iter: I) -> Self {
        let loader = MemoryLoader::new();
        for (name, text) in iter {
            loader.insert(name, text);
        }
        loader
    }
}

impl SourceLoader for MemoryLoader {
    fn load(&self, name: &str) -> Result<String, LoadError> {
        self.files
            .get(name)
            .map(|text| text.clone())
            .ok_or_else(|| LoadError::NotFound(name.to_string()))
    }

    fn save(&self, name: &str, text: &str) -> Result<(), LoadError> {
        self.insert(name, text);
        Ok(())
    }
}

// =============================================================================
// Channel bridge
// =============================================================================

/// A request forwarded to whoever answers for a `ChannelLoader`, typically a
/// task talking to a remote host. Each request carries its own reply channel.
#[derive(Debug)]
pub enum LoaderRequest {
    Load {
        name: String,
        reply: Sender<Result<String, String>>,
    },
    Save {
        name: String,
        text: String,
        reply: Sender<Result<(), String>>,
    },
    Compile {
        name: String,
        reply: Sender<Result<String, String>>,
    },
}

/// Blocking loader backed by an asynchronous responder. Each call sends a
/// request and waits on its reply channel for at most `timeout`.
#[derive(Debug)]
pub struct ChannelLoader {
    requests: Sender<LoaderRequest>,
    timeout: Duration,
    can_compile: bool,
}

impl ChannelLoader {
    /// Create a loader and the receiving end the responder serves.
    pub fn new(timeout: Duration) -> (ChannelLoader, Receiver<LoaderRequest>) {
        let (requests, receiver) = mpsc::channel();
        let loader = ChannelLoader {
            requests,
            timeout,
            can_compile: false,
        };
        (loader, receiver)
    }

    /// Create a loader that waits as long as the project's
    /// `loaderTimeoutMs` allows.
    pub fn from_config(config: &ProjectConfig) -> (ChannelLoader, Receiver<LoaderRequest>) {
        ChannelLoader::new(config.loader_timeout())
    }

    /// Declare that the responder answers `Compile` requests.
    #[must_use]
    pub fn with_compile(mut self) -> ChannelLoader {
        self.can_compile = true;
        self
    }

    fn round_trip<T>(
        &self,
        name: &str,
        request: impl FnOnce(Sender<Result<T, String>>) -> LoaderRequest,
    ) -> Result<T, LoadError> {
        let (reply, response) = mpsc::channel();
        self.requests
            .send(request(reply))
            .map_err(|_| LoadError::Disconnected(name.to_string()))?;
        match response.recv_timeout(self.timeout) {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(message)) => Err(LoadError::Remote {
                name: name.to_string(),
                message,
            }),
            Err(RecvTimeoutError::Timeout) => {
                warn!(name, timeout = ?self.timeout, "loader request timed out");
                Err(LoadError::Timeout {
                    name: name.to_string(),
                    timeout: self.timeout,
                })
            }
            Err(RecvTimeoutError::Disconnected) => {
                Err(LoadError::Disconnected(name.to_string()))
            }
        }
    }
}

impl SourceLoader for ChannelLoader {
    fn load(&self, name: &str) -> Result<String, LoadError> {
        self.round_trip(name, |reply| LoaderRequest::Load {
            name: name.to_string(),
            reply,
        })
    }

    fn save(&self, name: &str, text: &str) -> Result<(), LoadError> {
        self.round_trip(name, |reply| LoaderRequest::Save {
            name: name.to_string(),
            text: text.to_string(),
            reply,
        })
    }

    fn can_compile(&self) -> bool {
        self.can_compile
    }

    fn compile(&self, name: &str) -> Result<String, LoadError> {
        if !self.can_compile {
            return Err(LoadError::Unsupported("compile"));
        }
        self.round_trip(name, |reply| LoaderRequest::Compile {
            name: name.to_string(),
            reply,
        })
    }
}
