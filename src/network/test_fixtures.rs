//! Shared test fixtures for interface sources.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{InterfaceSource, RawSnapshot, SnapshotFormat, SourceError};

/// Builds an `ip addr` snapshot from text.
pub fn ip_snapshot(text: &str) -> RawSnapshot {
    RawSnapshot::new(SnapshotFormat::IpAddr, text, "ip")
}

/// A non-zero exit failure, as reported by a broken `ip` command.
pub fn exit_failure() -> SourceError {
    SourceError::ExitStatus {
        program: "ip".to_string(),
        status: "exit status: 1".to_string(),
        stderr: "Cannot open netlink socket".to_string(),
    }
}

/// A source that returns predefined results in order.
///
/// Uses `Mutex<VecDeque>` to avoid requiring `Clone` on `SourceError`.
/// Once the script is exhausted, the last successful text is repeated.
pub struct ScriptedSource {
    results: Mutex<VecDeque<Result<RawSnapshot, SourceError>>>,
    fallback: Mutex<RawSnapshot>,
    calls: AtomicUsize,
}

impl ScriptedSource {
    pub fn new(results: Vec<Result<RawSnapshot, SourceError>>) -> Self {
        Self {
            results: Mutex::new(results.into()),
            fallback: Mutex::new(ip_snapshot("")),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn returning(texts: &[&str]) -> Self {
        Self::new(texts.iter().map(|t| Ok(ip_snapshot(t))).collect())
    }

    pub fn failing() -> Self {
        Self::new(vec![Err(exit_failure())])
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl InterfaceSource for ScriptedSource {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn fetch(&self) -> Result<RawSnapshot, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self.results.lock().unwrap().pop_front();
        match next {
            Some(Ok(snapshot)) => {
                *self.fallback.lock().unwrap() = snapshot.clone();
                Ok(snapshot)
            }
            Some(Err(e)) => Err(e),
            None => Ok(self.fallback.lock().unwrap().clone()),
        }
    }
}
