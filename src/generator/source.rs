//! Restartable case sequences.

use std::fmt;
use std::sync::Arc;

use crate::value::Case;

/// A lazily produced sequence of cases.
pub type Cases = Box<dyn Iterator<Item = Case>>;

type Build = dyn Fn(u64) -> Cases + Send + Sync;

/// Factory for a problem's case sequence.
///
/// Every call to [`cases`](Self::cases) starts the sequence over, so the same
/// source can feed the reference and the submission independently.
#[derive(Clone)]
pub struct CaseSource {
    build: Arc<Build>,
}

impl CaseSource {
    /// A sequence driven by the run's seed.
    pub fn seeded<F, I>(build: F) -> Self
    where
        F: Fn(u64) -> I + Send + Sync + 'static,
        I: Iterator<Item = Case> + 'static,
    {
        Self {
            build: Arc::new(move |seed| Box::new(build(seed)) as Cases),
        }
    }

    /// A sequence that does not depend on the seed.
    pub fn fixed<F, I>(build: F) -> Self
    where
        F: Fn() -> I + Send + Sync + 'static,
        I: Iterator<Item = Case> + 'static,
    {
        Self::seeded(move |_| build())
    }

    /// A sequence over an explicit list of cases.
    pub fn from_cases(cases: Vec<Case>) -> Self {
        let cases = Arc::new(cases);
        Self::fixed(move || {
            let cases = Arc::clone(&cases);
            (0..cases.len()).filter_map(move |i| cases.get(i).cloned())
        })
    }

    /// Start the sequence for a seed.
    pub fn cases(&self, seed: u64) -> Cases {
        (self.build)(seed)
    }
}

impl fmt::Debug for CaseSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CaseSource")
    }
}
