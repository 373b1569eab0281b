//! Stencil value system.
//!
//! The leaf crate of the engine: tagged runtime values, decimal fixed-point
//! numbers, source locations, output sinks, and the shared error machinery.
//! Everything above (the VM, the reader/compiler, the host facade) builds on
//! the types exported here.
//!
//! Native functions receive the VM through the [`Engine`] trait, which is the
//! seam that lets this crate name the engine without depending on it.

pub mod errors;
mod fix;
mod sink;
mod sloc;
mod value;

pub use errors::{EvalError, EvalErrorKind, EvalResult};
pub use fix::Fix;
pub use sink::{buffer_sink, silent_sink, stdout_sink, OutputSink, SharedSink};
pub use sloc::Sloc;
pub use value::{Engine, NativeFn, Timestamp, Value};
