//! Interface data source trait, raw snapshots, and error types.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;

/// Layout of the text carried by a [`RawSnapshot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    /// `ip addr show` output, either one-line (`-o`) or block layout.
    IpAddr,
    /// Whitespace-separated addresses without interface attribution (`hostname -I`).
    AddressList,
}

/// Raw interface/address data as produced by the operating system.
///
/// The snapshot is not interpreted here; parsing happens in the resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSnapshot {
    /// How `text` is laid out.
    pub format: SnapshotFormat,
    /// Captured output.
    pub text: String,
    /// Name of the source that produced the snapshot (for logging).
    pub origin: String,
}

impl RawSnapshot {
    /// Creates a new raw snapshot.
    #[must_use]
    pub fn new(format: SnapshotFormat, text: impl Into<String>, origin: impl Into<String>) -> Self {
        Self {
            format,
            text: text.into(),
            origin: origin.into(),
        }
    }

    /// Returns true if the source reported nothing at all.
    ///
    /// An empty snapshot is a successful read of zero interfaces.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Error type for interface data source operations.
///
/// Every variant means "the data source is unavailable for this read";
/// an empty but successful read is not an error.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The command could not be started (not installed, not executable, ...).
    #[error("Failed to run '{program}': {source}")]
    Spawn {
        /// Program that failed to start
        program: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The command ran but reported failure.
    #[error("'{program}' exited with {status}: {stderr}")]
    ExitStatus {
        /// Program that failed
        program: String,
        /// Rendered exit status
        status: String,
        /// Trimmed standard error output
        stderr: String,
    },

    /// The command did not finish within the allowed time and was killed.
    #[error("'{program}' timed out after {}ms", timeout.as_millis())]
    Timeout {
        /// Program that timed out
        program: String,
        /// The configured timeout
        timeout: Duration,
    },

    /// A source chain was consulted with no sources configured.
    #[error("No interface sources configured")]
    NoSources,

    /// Every source in a chain failed.
    #[error("All {count} interface sources failed (last: {last})")]
    Exhausted {
        /// Number of sources that were tried
        count: usize,
        /// Error from the last source tried
        #[source]
        last: Box<SourceError>,
    },
}

/// Trait for obtaining raw interface and address data from the OS.
///
/// # Design
///
/// - Implementations only read; they never filter or interpret the data
/// - Enables dependency injection for testing with mock implementations
/// - Multiple providers compose through [`SourceChain`]
pub trait InterfaceSource: Send + Sync {
    /// Short name used in logs (e.g., "ip", "hostname").
    fn name(&self) -> &str;

    /// Reads the current interface/address state.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] when the OS query cannot be executed,
    /// reports failure, or does not finish in time.
    fn fetch(&self) -> impl Future<Output = Result<RawSnapshot, SourceError>> + Send;
}

/// An ordered list of sources consulted until one succeeds.
///
/// Later sources are only tried when every earlier one failed.
/// A successful but empty read stops the chain.
#[derive(Debug, Clone)]
pub struct SourceChain<S> {
    sources: Vec<S>,
}

impl<S> SourceChain<S> {
    /// Creates a chain from sources in priority order.
    #[must_use]
    pub const fn new(sources: Vec<S>) -> Self {
        Self { sources }
    }

    /// Returns the sources in priority order.
    #[must_use]
    pub fn sources(&self) -> &[S] {
        &self.sources
    }

    /// Returns the number of sources.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Returns true if no sources are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl<S: InterfaceSource> InterfaceSource for SourceChain<S> {
    fn name(&self) -> &str {
        "chain"
    }

    async fn fetch(&self) -> Result<RawSnapshot, SourceError> {
        let mut last = None;

        for source in &self.sources {
            match source.fetch().await {
                Ok(snapshot) => return Ok(snapshot),
                Err(e) => {
                    tracing::debug!("Interface source '{}' failed: {e}", source.name());
                    last = Some(e);
                }
            }
        }

        match last {
            Some(last) => Err(SourceError::Exhausted {
                count: self.sources.len(),
                last: Box::new(last),
            }),
            None => Err(SourceError::NoSources),
        }
    }
}
