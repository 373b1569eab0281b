//! Compiler AST.
//!
//! The reader produces a list of forms; compiling a form emits instructions
//! into the VM's code buffer. Three variants cover the whole grammar:
//! literals, identifiers, and calls.

use smallvec::SmallVec;
use std::fmt;

use stencil_value::errors::{missing_call_target, not_callable, unknown_identifier};
use stencil_value::{EvalResult, Sloc, Value};
use stencil_vm::{Instruction, Vm};

/// Argument list of a call form.
///
/// Elements are boxed: `Form` is recursive, so the inline array holds thin
/// pointers rather than forms themselves.
pub type Args = SmallVec<[Box<Form>; 4]>;

/// One node of the compiler AST.
#[derive(Clone, Debug)]
pub enum Form {
    /// A value read directly from source (or synthesized for literal text).
    Literal { value: Value, sloc: Sloc },
    /// A name, resolved against the environment at emit time.
    Id { name: String, sloc: Sloc },
    /// `(target arg*)`.
    Call {
        target: Box<Form>,
        args: Args,
        sloc: Sloc,
    },
}

impl Form {
    /// Literal form.
    pub fn literal(value: Value, sloc: Sloc) -> Self {
        Form::Literal { value, sloc }
    }

    /// Identifier form.
    pub fn id(name: impl Into<String>, sloc: Sloc) -> Self {
        Form::Id {
            name: name.into(),
            sloc,
        }
    }

    /// Call form.
    pub fn call(target: Form, args: Args, sloc: Sloc) -> Self {
        Form::Call {
            target: Box::new(target),
            args,
            sloc,
        }
    }

    /// Where this form was read.
    pub fn sloc(&self) -> Sloc {
        match self {
            Form::Literal { sloc, .. } | Form::Id { sloc, .. } | Form::Call { sloc, .. } => *sloc,
        }
    }

    /// Resolve this form to a value without emitting code.
    ///
    /// Literals resolve to themselves, identifiers through the
    /// environment; calls produce no value. This is the target-position
    /// path: an identifier used as a call target is resolved here and
    /// never pushed.
    pub fn value<'a>(&'a self, vm: &'a Vm) -> Option<&'a Value> {
        match self {
            Form::Literal { value, .. } => Some(value),
            Form::Id { name, .. } => vm.env().get(name),
            Form::Call { .. } => None,
        }
    }

    /// Emit instructions for this form.
    ///
    /// A call validates its target before emitting anything, so a failed
    /// call leaves the code buffer length untouched.
    pub fn emit(&self, vm: &mut Vm) -> EvalResult {
        match self {
            Form::Literal { value, .. } => {
                vm.emit(Instruction::Push(value.clone()));
                Ok(())
            }
            // Value position: push a copy of the binding.
            Form::Id { name, sloc } => {
                let value = vm
                    .env()
                    .get(name)
                    .ok_or_else(|| unknown_identifier(name).with_sloc(*sloc))?
                    .clone();
                vm.emit(Instruction::Push(value));
                Ok(())
            }
            Form::Call { target, args, sloc } => {
                let resolved = match target.as_ref() {
                    Form::Id { name, sloc: tloc } => vm
                        .env()
                        .get(name)
                        .ok_or_else(|| unknown_identifier(name).with_sloc(*tloc))?,
                    other => other
                        .value(vm)
                        .ok_or_else(|| missing_call_target().with_sloc(*sloc))?,
                };
                let target_fn = resolved
                    .as_native()
                    .ok_or_else(|| not_callable(resolved.kind_name()).with_sloc(*sloc))?;
                // Arguments left to right, so pushes land in source order.
                for arg in args {
                    arg.emit(vm)?;
                }
                vm.emit(Instruction::Call {
                    target: target_fn,
                    sloc: *sloc,
                });
                Ok(())
            }
        }
    }
}

impl fmt::Display for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Form::Literal { value, .. } => write!(f, "{value}"),
            Form::Id { name, .. } => f.write_str(name),
            Form::Call { target, args, .. } => {
                write!(f, "({target}")?;
                for arg in args {
                    write!(f, " {arg}")?;
                }
                f.write_str(")")
            }
        }
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "tests use unwrap for brevity")]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use smallvec::smallvec;
    use stencil_value::{buffer_sink, Engine, EvalErrorKind};

    fn nop(_engine: &mut dyn Engine, _sloc: Sloc) -> EvalResult {
        Ok(())
    }

    #[test]
    fn literal_emits_one_push() {
        let mut vm = Vm::with_sink(buffer_sink());
        Form::literal(Value::Int(7), Sloc::DUMMY).emit(&mut vm).unwrap();
        assert_eq!(vm.code_len(), 1);
        vm.eval(0, None).unwrap();
        assert_eq!(vm.stack(), &[Value::Int(7)]);
    }

    #[test]
    fn id_in_value_position_pushes_a_copy() {
        let mut vm = Vm::with_sink(buffer_sink());
        vm.bind_string("foo", "ghi");
        Form::id("foo", Sloc::DUMMY).emit(&mut vm).unwrap();
        vm.eval(0, None).unwrap();
        assert_eq!(vm.stack(), &[Value::string("ghi")]);
    }

    #[test]
    fn unknown_id_fails_without_emitting() {
        let mut vm = Vm::with_sink(buffer_sink());
        let err = Form::id("missing", Sloc::DUMMY).emit(&mut vm).unwrap_err();
        assert_eq!(
            err.kind,
            EvalErrorKind::UnknownIdentifier {
                name: "missing".to_string()
            }
        );
        assert_eq!(vm.code_len(), 0);
    }

    #[test]
    fn uncallable_target_fails_before_any_argument_is_emitted() {
        let mut vm = Vm::with_sink(buffer_sink());
        vm.bind_string("foo", "ghi");
        let call = Form::call(
            Form::id("foo", Sloc::DUMMY),
            smallvec![Box::new(Form::literal(Value::Int(1), Sloc::DUMMY))],
            Sloc::DUMMY,
        );
        let err = call.emit(&mut vm).unwrap_err();
        assert_eq!(err.kind, EvalErrorKind::NotCallable { kind: "String" });
        assert_eq!(vm.code_len(), 0);
    }

    #[test]
    fn unbound_target_reports_the_identifier() {
        let mut vm = Vm::with_sink(buffer_sink());
        let call = Form::call(Form::id("missing", Sloc::DUMMY), Args::new(), Sloc::DUMMY);
        let err = call.emit(&mut vm).unwrap_err();
        assert!(matches!(err.kind, EvalErrorKind::UnknownIdentifier { .. }));
        assert_eq!(vm.code_len(), 0);
    }

    #[test]
    fn nested_call_target_has_no_value() {
        let mut vm = Vm::with_sink(buffer_sink());
        vm.bind_native("f", nop);
        let inner = Form::call(Form::id("f", Sloc::DUMMY), Args::new(), Sloc::DUMMY);
        let outer = Form::call(inner, Args::new(), Sloc::DUMMY);
        let err = outer.emit(&mut vm).unwrap_err();
        assert_eq!(err.kind, EvalErrorKind::MissingCallTarget);
    }

    #[test]
    fn call_emits_args_then_the_call() {
        let mut vm = Vm::with_sink(buffer_sink());
        vm.bind_native("f", nop);
        let call = Form::call(
            Form::id("f", Sloc::DUMMY),
            smallvec![
                Box::new(Form::literal(Value::Int(1), Sloc::DUMMY)),
                Box::new(Form::literal(Value::Int(2), Sloc::DUMMY))
            ],
            Sloc::DUMMY,
        );
        call.emit(&mut vm).unwrap();
        // Two pushes plus the call itself.
        assert_eq!(vm.code_len(), 3);
    }

    #[test]
    fn nested_argument_calls_emit_depth_first() {
        let mut vm = Vm::with_sink(buffer_sink());
        vm.bind_native("f", nop);
        vm.bind_string("foo", "ghi");
        let inner = Form::call(
            Form::id("f", Sloc::DUMMY),
            smallvec![Box::new(Form::id("foo", Sloc::DUMMY))],
            Sloc::DUMMY,
        );
        let outer = Form::call(
            Form::id("f", Sloc::DUMMY),
            smallvec![Box::new(inner)],
            Sloc::DUMMY,
        );
        outer.emit(&mut vm).unwrap();
        // Inner push and call land before the outer call.
        assert_eq!(vm.code_len(), 3);
    }

    #[test]
    fn display_renders_the_call_shape() {
        let call = Form::call(
            Form::id("print", Sloc::DUMMY),
            smallvec![
                Box::new(Form::id("foo", Sloc::DUMMY)),
                Box::new(Form::literal(Value::string("x"), Sloc::DUMMY))
            ],
            Sloc::DUMMY,
        );
        assert_eq!(call.to_string(), "(print foo \"x\")");
    }
}
