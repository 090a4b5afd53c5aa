//! Result and argument value types.
//!
//! A closed set of variants covering everything a graded callable may take or
//! return: scalars, ordered sequences, sets and mappings. Sets and maps keep
//! their insertion order so that two runs producing the same elements in a
//! different order are structurally different until canonicalized.

use std::cmp::Ordering;
use std::fmt;

use super::render;

/// A value passed to or returned from a graded callable.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Absence of a value
    #[default]
    None,
    /// Boolean
    Bool(bool),
    /// Signed integer
    Int(i64),
    /// Floating point number
    Float(f64),
    /// Text
    Str(String),
    /// Ordered, mutable-style sequence
    List(Vec<Value>),
    /// Ordered, fixed sequence
    Tuple(Vec<Value>),
    /// Unordered collection of distinct elements (insertion ordered)
    Set(Vec<Value>),
    /// Key to value mapping (insertion ordered)
    Map(Vec<(Value, Value)>),
}

impl Value {
    /// Build a list from anything convertible to values.
    pub fn list<T: Into<Value>>(items: impl IntoIterator<Item = T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    /// Build a tuple from anything convertible to values.
    pub fn tuple<T: Into<Value>>(items: impl IntoIterator<Item = T>) -> Self {
        Value::Tuple(items.into_iter().map(Into::into).collect())
    }

    /// Build a set, dropping elements equal to one already present.
    pub fn set<T: Into<Value>>(items: impl IntoIterator<Item = T>) -> Self {
        let mut out: Vec<Value> = Vec::new();
        for item in items {
            let item = item.into();
            if !out.iter().any(|v| v.natural_cmp(&item) == Ordering::Equal) {
                out.push(item);
            }
        }
        Value::Set(out)
    }

    /// Build a map; a repeated key overwrites the earlier value in place.
    pub fn map<K: Into<Value>, V: Into<Value>>(pairs: impl IntoIterator<Item = (K, V)>) -> Self {
        let mut out: Vec<(Value, Value)> = Vec::new();
        for (k, v) in pairs {
            let (k, v) = (k.into(), v.into());
            match out.iter_mut().find(|(ek, _)| ek.natural_cmp(&k) == Ordering::Equal) {
                Some(slot) => slot.1 = v,
                None => out.push((k, v)),
            }
        }
        Value::Map(out)
    }

    /// Integer payload, if this is an Int.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Float payload, widening integers.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Boolean payload, if this is a Bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// String payload, if this is a Str.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Elements of a List or Tuple.
    pub fn as_seq(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) | Value::Tuple(items) => Some(items),
            _ => None,
        }
    }

    /// Number of elements for collections and strings, None for other scalars.
    pub fn len(&self) -> Option<usize> {
        match self {
            Value::Str(s) => Some(s.chars().count()),
            Value::List(items) | Value::Tuple(items) | Value::Set(items) => Some(items.len()),
            Value::Map(pairs) => Some(pairs.len()),
            _ => None,
        }
    }

    /// Returns true if this is a List or Tuple.
    pub fn is_seq(&self) -> bool {
        matches!(self, Value::List(_) | Value::Tuple(_))
    }

    fn rank(&self) -> u8 {
        match self {
            Value::None => 0,
            Value::Bool(_) | Value::Int(_) | Value::Float(_) => 1,
            Value::Str(_) => 2,
            Value::Tuple(_) => 3,
            Value::List(_) => 4,
            Value::Set(_) => 5,
            Value::Map(_) => 6,
        }
    }

    /// Total natural order used when sorting set elements and map keys.
    ///
    /// Numbers compare numerically across Bool, Int and Float. Different kinds
    /// order as None < numbers < Str < Tuple < List < Set < Map; containers
    /// compare element-wise, then by length.
    pub fn natural_cmp(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::None, Value::None) => Ordering::Equal,
            (Value::Str(a), Value::Str(b)) => a.cmp(b),
            (Value::Tuple(a), Value::Tuple(b))
            | (Value::List(a), Value::List(b))
            | (Value::Set(a), Value::Set(b)) => cmp_slices(a, b),
            (Value::Map(a), Value::Map(b)) => {
                for ((ak, av), (bk, bv)) in a.iter().zip(b.iter()) {
                    let ord = ak.natural_cmp(bk).then_with(|| av.natural_cmp(bv));
                    if ord != Ordering::Equal {
                        return ord;
                    }
                }
                a.len().cmp(&b.len())
            }
            _ if self.rank() == 1 && other.rank() == 1 => cmp_numbers(self, other),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

fn cmp_slices(a: &[Value], b: &[Value]) -> Ordering {
    for (x, y) in a.iter().zip(b.iter()) {
        let ord = x.natural_cmp(y);
        if ord != Ordering::Equal {
            return ord;
        }
    }
    a.len().cmp(&b.len())
}

fn cmp_numbers(a: &Value, b: &Value) -> Ordering {
    fn as_i64(v: &Value) -> Option<i64> {
        match v {
            Value::Bool(b) => Some(i64::from(*b)),
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }
    match (as_i64(a), as_i64(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        _ => {
            let x = as_i64(a).map(|i| i as f64).or_else(|| a.as_float()).unwrap_or(0.0);
            let y = as_i64(b).map(|i| i as f64).or_else(|| b.as_float()).unwrap_or(0.0);
            x.total_cmp(&y)
        }
    }
}

impl fmt::Display for Value {
    /// Formats with the same text used for hashing and storage.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render::render(self))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<usize> for Value {
    fn from(i: usize) -> Self {
        Value::Int(i64::try_from(i).unwrap_or(i64::MAX))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::None, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::list(items)
    }
}

impl<A: Into<Value>, B: Into<Value>> From<(A, B)> for Value {
    fn from((a, b): (A, B)) -> Self {
        Value::Tuple(vec![a.into(), b.into()])
    }
}

/// A callable failure carried as data.
///
/// Both an `Err` returned by the callable and a caught panic end up here, so
/// that two implementations failing the same way compare equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    description: String,
}

impl Failure {
    /// Marker prefixed to every rendered failure.
    pub const MARKER: &'static str = "CRASH!";

    /// Create a failure from its description.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }

    /// The failure's description without the marker.
    pub fn description(&self) -> &str {
        &self.description
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", Self::MARKER, self.description)
    }
}

impl std::error::Error for Failure {}

/// What one invocation of a graded callable produced.
pub type CallOutcome = Result<Value, Failure>;

/// One argument tuple for a graded callable.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Case(Vec<Value>);

impl Case {
    /// Create a case from its arguments.
    pub fn new(args: Vec<Value>) -> Self {
        Self(args)
    }

    /// The arguments in order.
    pub fn args(&self) -> &[Value] {
        &self.0
    }

    /// Number of arguments.
    pub fn arity(&self) -> usize {
        self.0.len()
    }

    /// Consume the case, returning its arguments.
    pub fn into_args(self) -> Vec<Value> {
        self.0
    }

    /// Render the case as a tuple, e.g. `(7,)`.
    pub fn render(&self) -> String {
        render::repr_seq(&self.0, '(', ')', true)
    }
}

impl From<Vec<Value>> for Case {
    fn from(args: Vec<Value>) -> Self {
        Self(args)
    }
}

impl fmt::Display for Case {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
