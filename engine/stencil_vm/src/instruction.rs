//! Bytecode instructions.
//!
//! An instruction is one variant of a tagged enum in a plain vector: the
//! payload travels with its opcode, emission is append-only, and a position
//! is just an index. Teardown is `Drop` of the vector, so owned `Push`
//! payloads are released exactly once without being executed.

use stencil_value::{NativeFn, Sloc, Value};

/// A position in the code buffer, as returned by `Vm::emit`.
pub type Pc = usize;

/// One dispatch unit in the instruction stream.
#[derive(Clone, Debug)]
pub enum Instruction {
    /// Copy the held value onto the operand stack.
    Push(Value),
    /// Invoke a native function with the engine and the call's location.
    Call { target: NativeFn, sloc: Sloc },
}

impl Instruction {
    /// Mnemonic, for trace output.
    pub const fn name(&self) -> &'static str {
        match self {
            Instruction::Push(_) => "push",
            Instruction::Call { .. } => "call",
        }
    }
}
