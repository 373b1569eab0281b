//! Error types for compilation and evaluation.
//!
//! A single [`EvalError`] carries a structured [`EvalErrorKind`], the
//! rendered message, and an optional source location. Factory functions are
//! the public constructors; they populate both `kind` and `message` so
//! callers can match programmatically or display directly.
//!
//! Failures propagate as ordinary `Result`s with `?`; there is no local
//! recovery inside the compiler or the engine.

use crate::sloc::Sloc;
use std::fmt;

/// Result of compilation or evaluation.
pub type EvalResult<T = ()> = Result<T, EvalError>;

/// Structured error category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    /// An identifier was not found in the environment (compile time).
    UnknownIdentifier { name: String },
    /// A call's target form resolved to no value (compile time).
    MissingCallTarget,
    /// A call's target resolved to a value that is not a native function.
    NotCallable { kind: &'static str },
    /// `pop`/`peek` on an empty operand stack.
    StackUnderflow,
    /// A value was asked to perform an operation its kind does not support.
    InvalidKind {
        expected: &'static str,
        got: &'static str,
    },
    /// The reader hit malformed source text.
    Syntax { message: String },
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownIdentifier { name } => write!(f, "Unknown identifier '{name}'"),
            Self::MissingCallTarget => write!(f, "Missing call target"),
            Self::NotCallable { kind } => write!(f, "'{kind}' isn't callable"),
            Self::StackUnderflow => write!(f, "Stack underflow"),
            Self::InvalidKind { expected, got } => write!(f, "Expected {expected} ({got})"),
            Self::Syntax { message } => write!(f, "{message}"),
        }
    }
}

/// Compilation or evaluation failure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalError {
    /// Structured category, for programmatic matching.
    pub kind: EvalErrorKind,
    /// Rendered message; equals `kind.to_string()`.
    pub message: String,
    /// Where in the source the failure originated, when known.
    pub sloc: Option<Sloc>,
}

impl EvalError {
    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        EvalError {
            kind,
            message,
            sloc: None,
        }
    }

    /// Attach a source location.
    #[must_use]
    pub fn with_sloc(mut self, sloc: Sloc) -> Self {
        self.sloc = Some(sloc);
        self
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.sloc {
            Some(sloc) => write!(f, "Error in {sloc}: {}", self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for EvalError {}

/// Identifier absent from the environment.
#[cold]
pub fn unknown_identifier(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnknownIdentifier {
        name: name.to_string(),
    })
}

/// Call target form produced no value.
#[cold]
pub fn missing_call_target() -> EvalError {
    EvalError::from_kind(EvalErrorKind::MissingCallTarget)
}

/// Call target is not a native function.
#[cold]
pub fn not_callable(kind: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotCallable { kind })
}

/// Operand stack was empty.
#[cold]
pub fn stack_underflow() -> EvalError {
    EvalError::from_kind(EvalErrorKind::StackUnderflow)
}

/// A value's kind does not support the requested operation.
#[cold]
pub fn invalid_kind(expected: &'static str, got: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidKind { expected, got })
}

/// Malformed source text.
#[cold]
pub fn syntax_error(message: impl Into<String>) -> EvalError {
    let message = message.into();
    EvalError {
        message: message.clone(),
        kind: EvalErrorKind::Syntax { message },
        sloc: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn unknown_identifier_has_correct_kind() {
        let err = unknown_identifier("foo");
        assert_eq!(
            err.kind,
            EvalErrorKind::UnknownIdentifier {
                name: "foo".to_string()
            }
        );
        assert_eq!(err.message, "Unknown identifier 'foo'");
    }

    #[test]
    fn not_callable_names_the_kind() {
        let err = not_callable("String");
        assert_eq!(err.message, "'String' isn't callable");
    }

    #[test]
    fn invalid_kind_names_expected_and_got() {
        let err = invalid_kind("string", "Int");
        assert_eq!(err.message, "Expected string (Int)");
    }

    #[test]
    fn display_includes_sloc_when_present() {
        let err = missing_call_target().with_sloc(Sloc::new("eval", 1, 4));
        assert_eq!(
            err.to_string(),
            "Error in 'eval'; row 1, column 4: Missing call target"
        );
    }

    #[test]
    fn display_without_sloc_is_bare_message() {
        assert_eq!(stack_underflow().to_string(), "Stack underflow");
    }

    #[test]
    fn kind_display_matches_message() {
        let errors = [
            unknown_identifier("x"),
            missing_call_target(),
            not_callable("Int"),
            stack_underflow(),
            invalid_kind("string", "Bool"),
            syntax_error("Open call form"),
        ];
        for err in &errors {
            assert_eq!(err.message, err.kind.to_string());
        }
    }
}
