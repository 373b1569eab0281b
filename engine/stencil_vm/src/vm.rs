//! The virtual machine.
//!
//! One `Vm` owns the code buffer, the operand stack, the environment, and
//! the output sink. Compilation appends instructions; evaluation walks a
//! half-open range of positions. Single-threaded and non-reentrant: the
//! `&mut` receivers make concurrent mutation unrepresentable.

use stencil_value::errors::stack_underflow;
use stencil_value::{stdout_sink, Engine, EvalResult, NativeFn, OutputSink, SharedSink, Value};
use tracing::trace;

use crate::environment::Environment;
use crate::instruction::{Instruction, Pc};

/// Code buffer + operand stack + environment + sink.
pub struct Vm {
    env: Environment,
    stack: Vec<Value>,
    code: Vec<Instruction>,
    out: SharedSink,
}

impl Vm {
    /// VM writing to stdout.
    pub fn new() -> Self {
        Self::with_sink(stdout_sink())
    }

    /// VM writing through `out`.
    pub fn with_sink(out: SharedSink) -> Self {
        Vm {
            env: Environment::new(),
            stack: Vec::new(),
            code: Vec::new(),
            out,
        }
    }

    /// The environment, for identifier resolution.
    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// Mutable access to the environment.
    pub fn env_mut(&mut self) -> &mut Environment {
        &mut self.env
    }

    /// The output sink.
    pub fn sink(&self) -> &OutputSink {
        &self.out
    }

    /// Register a host routine under `name`.
    pub fn bind_native(&mut self, name: &'static str, f: NativeFn) {
        self.env.set(name, Value::Native(f, name));
    }

    /// Bind a string value under `name`.
    pub fn bind_string(&mut self, name: &str, value: impl Into<String>) {
        self.env.set(name, Value::Str(value.into()));
    }

    /// Append one instruction, returning the position at which emission
    /// began. Positions are relocatable program-counter references: code is
    /// append-only, so they never go stale.
    pub fn emit(&mut self, inst: Instruction) -> Pc {
        let pc = self.code.len();
        trace!(pc, op = inst.name(), "emit");
        self.code.push(inst);
        pc
    }

    /// Current length of the code buffer.
    pub fn code_len(&self) -> usize {
        self.code.len()
    }

    /// The operand stack, bottom to top.
    pub fn stack(&self) -> &[Value] {
        &self.stack
    }

    /// Push a value onto the operand stack.
    pub fn push(&mut self, value: Value) {
        self.stack.push(value);
    }

    /// Pop the top of the operand stack.
    pub fn pop(&mut self) -> EvalResult<Value> {
        self.stack.pop().ok_or_else(stack_underflow)
    }

    /// Mutable access to the top of the operand stack.
    pub fn peek_mut(&mut self) -> EvalResult<&mut Value> {
        self.stack.last_mut().ok_or_else(stack_underflow)
    }

    /// Execute the instructions in `[start, end)`.
    ///
    /// `None` is the "to end of buffer" sentinel, resolved once on entry;
    /// an `end` past the buffer is clamped to its length. Code a native
    /// appends during the run is not executed by this call.
    pub fn eval(&mut self, start: Pc, end: Option<Pc>) -> EvalResult {
        let end = end.map_or(self.code.len(), |e| e.min(self.code.len()));
        trace!(start, end, "eval");
        let mut pc = start;
        while pc < end {
            // Payloads are copied out before dispatch; a native may emit,
            // which can reallocate the code buffer under us.
            match &self.code[pc] {
                Instruction::Push(value) => {
                    let value = value.clone();
                    self.stack.push(value);
                }
                Instruction::Call { target, sloc } => {
                    let (target, sloc) = (*target, *sloc);
                    trace!(pc, %sloc, "call");
                    target(self, sloc)?;
                }
            }
            pc += 1;
        }
        Ok(())
    }
}

impl Default for Vm {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for Vm {
    fn push(&mut self, value: Value) {
        Vm::push(self, value);
    }

    fn pop(&mut self) -> EvalResult<Value> {
        Vm::pop(self)
    }

    fn peek_mut(&mut self) -> EvalResult<&mut Value> {
        Vm::peek_mut(self)
    }

    fn lookup(&self, name: &str) -> Option<&Value> {
        self.env.get(name)
    }

    fn sink(&self) -> &OutputSink {
        &self.out
    }
}
