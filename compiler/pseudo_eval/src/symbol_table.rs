//! Symbol table: the only mutable execution state.
//!
//! One flat scope spans the whole program, including loop, conditional and
//! function bodies. Declaring an existing name overwrites it in place, so a
//! loop counter stays visible after its loop ends.

use rustc_hash::FxHashMap;

use crate::errors::{undeclared_variable, TraceResult};
use crate::value::{Value, ValueType};

/// A declared variable.
#[derive(Clone, Debug, PartialEq)]
pub struct Entry {
    pub ty: ValueType,
    pub value: Value,
}

#[derive(Clone, Debug, Default)]
pub struct SymbolTable {
    entries: FxHashMap<String, Entry>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare or overwrite `name`. The stored type follows the value.
    #[inline]
    pub fn declare(&mut self, name: &str, value: Value) {
        let entry = Entry {
            ty: value.value_type(),
            value,
        };
        if let Some(slot) = self.entries.get_mut(name) {
            *slot = entry;
        } else {
            self.entries.insert(name.to_string(), entry);
        }
    }

    /// Look up `name`, failing with `UndeclaredVariable` if absent.
    #[inline]
    pub fn get(&self, name: &str) -> TraceResult<&Entry> {
        self.entries.get(name).ok_or_else(|| undeclared_variable(name))
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests;
