//! The name→value environment.
//!
//! An ordered table backed by a vector kept sorted by name: lookup is a
//! binary search, insertion shifts the tail. Environments are small and
//! built once before many evaluations, so the O(n) insert is the right
//! trade. Used both at compile time (identifier resolution) and at run
//! time (native-function lookup).

use stencil_value::Value;

#[derive(Clone, Debug)]
struct Binding {
    name: String,
    value: Value,
}

/// Sorted string-keyed table of values.
#[derive(Clone, Debug, Default)]
pub struct Environment {
    entries: Vec<Binding>,
}

impl Environment {
    /// Empty environment.
    pub fn new() -> Self {
        Environment {
            entries: Vec::new(),
        }
    }

    /// Look up a binding by name, O(log n).
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .binary_search_by(|b| b.name.as_str().cmp(name))
            .ok()
            .map(|i| &self.entries[i].value)
    }

    /// Insert or overwrite a binding, keeping entries sorted by name.
    ///
    /// Names are unique: re-binding an existing name replaces its value in
    /// place (the old value is released) and does not grow the table.
    /// Returns the slot, so callers can finish initialization in place.
    pub fn set(&mut self, name: &str, value: Value) -> &mut Value {
        match self
            .entries
            .binary_search_by(|b| b.name.as_str().cmp(name))
        {
            Ok(i) => {
                self.entries[i].value = value;
                &mut self.entries[i].value
            }
            Err(i) => {
                self.entries.insert(
                    i,
                    Binding {
                        name: name.to_string(),
                        value,
                    },
                );
                &mut self.entries[i].value
            }
        }
    }

    /// Number of bindings.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the environment holds no bindings.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
