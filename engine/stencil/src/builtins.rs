//! The standard host routines.
//!
//! Every template gets `print` and `upcase`; hosts add their own with
//! [`crate::Dsl::bind_native`]. Builtins operate on the operand stack
//! through the [`Engine`] trait and report failures against the call's
//! source location.

use stencil_value::errors::invalid_kind;
use stencil_value::{Engine, EvalResult, Sloc, Value};

/// Pop the top of the stack and write it to the output sink.
///
/// Strings are written raw; every other kind uses its display form.
pub fn native_print(engine: &mut dyn Engine, _sloc: Sloc) -> EvalResult {
    let value = engine.pop()?;
    value.print_to(engine.sink());
    Ok(())
}

/// Uppercase the string on top of the stack in place.
pub fn native_upcase(engine: &mut dyn Engine, sloc: Sloc) -> EvalResult {
    let value = engine.peek_mut()?;
    match value {
        Value::Str(s) => {
            *s = s.to_uppercase();
            Ok(())
        }
        other => Err(invalid_kind("string", other.kind_name()).with_sloc(sloc)),
    }
}
