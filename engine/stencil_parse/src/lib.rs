//! Reader and form compiler for the Stencil engine.
//!
//! Source text goes through two steps: the [`Reader`] turns it into an
//! ordered list of [`Form`]s, and [`compile`] walks that list emitting
//! instructions into a VM. [`eval_str`] glues the two to the engine for
//! incremental compile-and-run.

mod form;
mod reader;

pub use form::{Args, Form};
pub use reader::Reader;

use stencil_value::EvalResult;
use stencil_vm::Vm;
use tracing::debug;

/// Emit a list of top-level forms in order.
pub fn compile(forms: &[Form], vm: &mut Vm) -> EvalResult {
    for form in forms {
        form.emit(vm)?;
    }
    Ok(())
}

/// Compile and run one source string incrementally against `vm`.
///
/// New code is appended to the persistent buffer and exactly the appended
/// range is evaluated, so repeated calls share one growing code buffer and
/// one environment across calls.
pub fn eval_str(vm: &mut Vm, source: &'static str, text: &str) -> EvalResult {
    let mut reader = Reader::new(source, text);
    let forms = reader.read_all()?;
    debug!(source, forms = forms.len(), "compiling");
    let start = vm.code_len();
    compile(&forms, vm)?;
    vm.eval(start, None)
}
