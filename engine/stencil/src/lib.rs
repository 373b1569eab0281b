//! Embeddable template and expression engine.
//!
//! A [`Dsl`] wraps a VM with the standard builtins bound and exposes
//! [`Dsl::evaluate`] for template text: literal runs are printed verbatim
//! and `$(call)` segments are compiled and run against the shared
//! environment. State persists across calls, so bindings and compiled code
//! accumulate in one engine instance.
//!
//! ```
//! use stencil::Dsl;
//!
//! let mut dsl = Dsl::with_sink(stencil::buffer_sink());
//! dsl.bind_string("name", "world");
//! dsl.evaluate("hello $(print (upcase name))!").unwrap();
//! assert_eq!(dsl.output(), "hello WORLD!");
//! ```

mod builtins;

pub use builtins::{native_print, native_upcase};
pub use stencil_parse::{compile, eval_str, Args, Form, Reader};
pub use stencil_value::{
    buffer_sink, silent_sink, stdout_sink, Engine, EvalError, EvalErrorKind, EvalResult, Fix,
    NativeFn, OutputSink, SharedSink, Sloc, Timestamp, Value,
};
pub use stencil_vm::{Environment, Instruction, Pc, Vm};

use tracing::debug;

/// A VM with the standard builtins bound.
pub struct Dsl {
    vm: Vm,
}

impl Dsl {
    /// Engine writing to stdout.
    pub fn new() -> Self {
        Self::with_sink(stdout_sink())
    }

    /// Engine writing through `out`.
    pub fn with_sink(out: SharedSink) -> Self {
        let mut vm = Vm::with_sink(out);
        vm.bind_native("print", native_print);
        vm.bind_native("upcase", native_upcase);
        Dsl { vm }
    }

    /// The underlying VM.
    pub fn vm(&self) -> &Vm {
        &self.vm
    }

    /// Mutable access to the underlying VM.
    pub fn vm_mut(&mut self) -> &mut Vm {
        &mut self.vm
    }

    /// Register a host routine under `name`.
    pub fn bind_native(&mut self, name: &'static str, f: NativeFn) {
        self.vm.bind_native(name, f);
    }

    /// Bind a string value under `name`.
    pub fn bind_string(&mut self, name: &str, value: impl Into<String>) {
        self.vm.bind_string(name, value);
    }

    /// Compile and run one template string.
    ///
    /// Compilation is per top-level form: a failing form emits nothing,
    /// but forms before it may already sit in the code buffer. Nothing
    /// runs on failure, and later calls evaluate only their own appended
    /// range, so any orphaned code is never executed.
    pub fn evaluate(&mut self, text: &str) -> EvalResult {
        debug!(len = text.len(), "evaluate");
        eval_str(&mut self.vm, "eval", text)
    }

    /// Buffered output so far; empty for sinks that don't capture.
    pub fn output(&self) -> String {
        self.vm.sink().contents()
    }
}

impl Default for Dsl {
    fn default() -> Self {
        Self::new()
    }
}
