//! Registration contract between the host, the problems and the submissions.
//!
//! Problems are registered in an ordered table. A submission is an explicit
//! table from problem name to [`Implementation`]; a name it does not provide
//! is simply [`Implementation::NotImplemented`].

use std::cell::Cell;
use std::collections::BTreeMap;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use crate::generator::CaseSource;
use crate::value::{CallOutcome, Case, Failure, Value};

/// A function under test or a reference implementation.
///
/// The callable receives its own copy of the arguments and may do anything
/// with them. Returning `Err` and panicking are both treated as a failure
/// result.
pub trait Callable: Send + Sync {
    /// Invoke on one case's arguments.
    fn call(&self, args: Vec<Value>) -> CallOutcome;
}

impl<F> Callable for F
where
    F: Fn(Vec<Value>) -> CallOutcome + Send + Sync,
{
    fn call(&self, args: Vec<Value>) -> CallOutcome {
        self(args)
    }
}

thread_local! {
    static INVOKE_DEPTH: Cell<usize> = const { Cell::new(0) };
}

struct InvokeGuard;

impl InvokeGuard {
    fn enter() -> Self {
        INVOKE_DEPTH.with(|d| d.set(d.get() + 1));
        InvokeGuard
    }
}

impl Drop for InvokeGuard {
    fn drop(&mut self) {
        INVOKE_DEPTH.with(|d| d.set(d.get().saturating_sub(1)));
    }
}

/// Whether the current thread is inside [`invoke`], where a panic becomes a
/// failure result instead of taking the process down.
pub fn invoking() -> bool {
    INVOKE_DEPTH.with(|d| d.get() > 0)
}

/// Invoke a callable on a copy of the case, turning a panic into a failure.
pub fn invoke(callable: &dyn Callable, case: &Case) -> CallOutcome {
    let args = case.args().to_vec();
    let _guard = InvokeGuard::enter();
    match catch_unwind(AssertUnwindSafe(|| callable.call(args))) {
        Ok(outcome) => outcome,
        Err(payload) => Err(Failure::new(panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "panic".to_string()
    }
}

/// What a submission provides for one problem.
#[derive(Clone)]
pub enum Implementation {
    /// The submission implements the problem.
    Implemented(Arc<dyn Callable>),
    /// The submission does not provide this problem.
    NotImplemented,
}

impl Implementation {
    /// Wrap a callable.
    pub fn new<C: Callable + 'static>(callable: C) -> Self {
        Self::Implemented(Arc::new(callable))
    }

    /// The callable, if implemented.
    pub fn callable(&self) -> Option<&dyn Callable> {
        match self {
            Self::Implemented(c) => Some(c.as_ref()),
            Self::NotImplemented => None,
        }
    }

    /// Returns true if implemented.
    pub fn is_implemented(&self) -> bool {
        matches!(self, Self::Implemented(_))
    }
}

impl fmt::Debug for Implementation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Implemented(_) => f.write_str("Implemented"),
            Self::NotImplemented => f.write_str("NotImplemented"),
        }
    }
}

/// A named set of implementations under test.
#[derive(Debug, Clone, Default)]
pub struct Submission {
    name: String,
    functions: BTreeMap<String, Implementation>,
}

impl Submission {
    /// Create an empty submission.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            functions: BTreeMap::new(),
        }
    }

    /// Add (or replace) a function.
    pub fn with<C: Callable + 'static>(mut self, function: &str, callable: C) -> Self {
        self.insert(function, Implementation::new(callable));
        self
    }

    /// Insert an implementation under a name.
    pub fn insert(&mut self, function: &str, implementation: Implementation) {
        self.functions.insert(function.to_string(), implementation);
    }

    /// Drop a function, leaving it unimplemented.
    pub fn without(mut self, function: &str) -> Self {
        self.functions.remove(function);
        self
    }

    /// The submission's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up a function; absent names are `NotImplemented`.
    pub fn get(&self, function: &str) -> Implementation {
        self.functions
            .get(function)
            .cloned()
            .unwrap_or(Implementation::NotImplemented)
    }

    /// Number of functions provided.
    pub fn implemented_count(&self) -> usize {
        self.functions.values().filter(|i| i.is_implemented()).count()
    }

    /// Names of the provided functions, sorted.
    pub fn function_names(&self) -> impl Iterator<Item = &str> {
        self.functions.keys().map(String::as_str)
    }
}

/// One entry of the registration table.
#[derive(Debug, Clone)]
pub struct Problem {
    /// Function name shared by the reference and the submission.
    pub name: String,
    /// The problem's case sequence.
    pub cases: CaseSource,
    /// Expected fingerprint (possibly shortened). `None` means the computed
    /// fingerprint is printed instead of judged.
    pub expected: Option<String>,
}

impl Problem {
    /// Register a problem.
    pub fn new(name: impl Into<String>, cases: CaseSource, expected: Option<&str>) -> Self {
        Self {
            name: name.into(),
            cases,
            expected: expected.map(str::to_string),
        }
    }
}
