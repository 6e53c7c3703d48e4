//! Test doubles and common utilities for the refresh-cache behavior tests
//!
//! The scripted source plays back a fixed sequence of fetch outcomes and
//! counts calls, so tests can drive every refresh-loop branch without a
//! network.

use async_trait::async_trait;
use iprange_core::{RangeSource, Result};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// One scripted fetch outcome
#[derive(Debug, Clone)]
pub enum ScriptStep {
    /// Return these raw range expressions
    Ranges(Vec<String>),
    /// Fail with a transport error
    Fail(String),
    /// Never return (pending forever); used for timeout and shutdown tests
    Hang,
}

impl ScriptStep {
    pub fn ranges(exprs: &[&str]) -> Self {
        Self::Ranges(exprs.iter().map(|s| s.to_string()).collect())
    }
}

/// A range source that plays back a script of fetch outcomes
///
/// The last step repeats once the script is exhausted. Clones share the
/// script cursor and call counter, so a test can keep a clone and hand a
/// boxed clone to the cache.
#[derive(Clone)]
pub struct ScriptedRangeSource {
    steps: Arc<Vec<ScriptStep>>,
    cursor: Arc<AtomicUsize>,
}

impl ScriptedRangeSource {
    pub fn new(steps: Vec<ScriptStep>) -> Self {
        assert!(!steps.is_empty(), "script needs at least one step");
        Self {
            steps: Arc::new(steps),
            cursor: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// A source that returns the same expressions on every fetch
    pub fn always(exprs: &[&str]) -> Self {
        Self::new(vec![ScriptStep::ranges(exprs)])
    }

    /// Number of fetches attempted so far
    pub fn fetch_call_count(&self) -> usize {
        self.cursor.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RangeSource for ScriptedRangeSource {
    async fn fetch_ranges(&self) -> Result<Vec<String>> {
        let call = self.cursor.fetch_add(1, Ordering::SeqCst);
        let step = &self.steps[call.min(self.steps.len() - 1)];
        match step {
            ScriptStep::Ranges(exprs) => Ok(exprs.clone()),
            ScriptStep::Fail(msg) => Err(iprange_core::Error::source(msg.clone())),
            ScriptStep::Hang => std::future::pending().await,
        }
    }

    fn source_name(&self) -> &'static str {
        "scripted"
    }
}

/// Render a snapshot as expression strings for easy assertions
pub fn snapshot_strings(snapshot: &iprange_core::Snapshot) -> Vec<String> {
    snapshot.iter().map(|p| p.to_string()).collect()
}
