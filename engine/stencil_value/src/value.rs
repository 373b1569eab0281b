//! Tagged runtime values.
//!
//! The value set is a closed enum dispatched with `match`, so adding a kind
//! means the compiler points at every site that needs to handle it.
//! Ownership follows from the payload: `Str` owns its
//! buffer and `Clone` duplicates it (deep copy), everything else is plain
//! data. Release is `Drop`, exactly once, wherever the value ends up —
//! operand stack, emitted code, or environment.

use crate::errors::EvalResult;
use crate::sink::OutputSink;
use crate::sloc::Sloc;
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds since the Unix epoch.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Create from a raw millisecond count.
    #[inline]
    pub const fn from_millis(ms: u64) -> Self {
        Timestamp(ms)
    }

    /// The current wall-clock time.
    pub fn now() -> Self {
        let ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX));
        Timestamp(ms)
    }

    /// Raw millisecond count.
    #[inline]
    pub const fn millis(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A host routine exposed to the DSL as a callable value.
///
/// Invoked by the `Call` instruction with the engine as context and the
/// call's source location. Natives may push and pop the operand stack and
/// read the environment; they must not hold onto engine state past their
/// own invocation.
pub type NativeFn = fn(&mut dyn Engine, Sloc) -> EvalResult;

/// Engine context handed to native functions.
///
/// Implemented by the VM; kept as a trait so this leaf crate can name the
/// engine without depending on it.
pub trait Engine {
    /// Push a value onto the operand stack.
    fn push(&mut self, value: Value);
    /// Pop the top of the operand stack.
    fn pop(&mut self) -> EvalResult<Value>;
    /// Mutable access to the top of the operand stack.
    fn peek_mut(&mut self) -> EvalResult<&mut Value>;
    /// Read a binding from the environment.
    fn lookup(&self, name: &str) -> Option<&Value>;
    /// The engine's output sink.
    fn sink(&self) -> &OutputSink;
}

/// A tagged, runtime-typed unit of data.
#[derive(Clone, Debug)]
pub enum Value {
    /// Boolean.
    Bool(bool),
    /// Decimal fixed-point number.
    Fix(crate::fix::Fix),
    /// Signed integer.
    Int(i64),
    /// Owned string; `Clone` duplicates the buffer.
    Str(String),
    /// Point in time.
    Time(Timestamp),
    /// Native function plus its display name.
    Native(NativeFn, &'static str),
}

impl Value {
    /// Create a string value.
    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(s.into())
    }

    /// Create a native-function value.
    #[inline]
    pub fn native(name: &'static str, f: NativeFn) -> Self {
        Value::Native(f, name)
    }

    /// Stable human name for this value's kind.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "Bool",
            Value::Fix(_) => "Fix",
            Value::Int(_) => "Int",
            Value::Str(_) => "String",
            Value::Time(_) => "Time",
            Value::Native(..) => "Native",
        }
    }

    /// The native function, if this value is one.
    pub fn as_native(&self) -> Option<NativeFn> {
        match self {
            Value::Native(f, _) => Some(*f),
            _ => None,
        }
    }

    /// The string contents, if this value is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Render the human-readable form to `out`.
    ///
    /// Strings render raw; every other kind uses the literal form.
    pub fn print_to(&self, out: &OutputSink) {
        match self {
            Value::Str(s) => out.write_str(s),
            other => out.write_str(&other.to_string()),
        }
    }

    /// Render the literal form to `out` (strings quoted).
    pub fn write_to(&self, out: &OutputSink) {
        out.write_str(&self.to_string());
    }
}

/// Literal form: what the reader would accept back, strings quoted.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            Value::Fix(x) => write!(f, "{x}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Str(s) => write!(f, "\"{s}\""),
            Value::Time(t) => write!(f, "{t}"),
            Value::Native(_, name) => write!(f, "Native({name})"),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Fix(a), Value::Fix(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Time(a), Value::Time(b)) => a == b,
            // Natives compare by display name; function addresses are not
            // a stable identity across codegen units.
            (Value::Native(_, a), Value::Native(_, b)) => a == b,
            _ => false,
        }
    }
}
