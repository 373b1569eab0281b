//! Stencil bytecode engine.
//!
//! An append-only instruction vector, an operand stack of values, and a
//! sorted name→value environment, owned together by one [`Vm`]. Positions
//! are plain indices; instructions are never edited or removed, so a
//! position handed out by [`Vm::emit`] stays valid for the life of the VM.

mod environment;
mod instruction;
mod vm;

pub use environment::Environment;
pub use instruction::{Instruction, Pc};
pub use vm::Vm;

// Re-export the value layer for downstream convenience.
pub use stencil_value::{
    Engine, EvalError, EvalErrorKind, EvalResult, Fix, NativeFn, OutputSink, SharedSink, Sloc,
    Timestamp, Value,
};
