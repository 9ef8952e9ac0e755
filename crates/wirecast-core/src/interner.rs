//! Name table for one compilation session.
//!
//! Declared names, member names and mangled names all live here. A `Symbol`
//! is the name's position in the table, so equal names share one symbol and
//! the mangler can detect a collision by comparing symbols.

use indexmap::IndexSet;

/// Handle to a name in an [`Interner`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Symbol(u32);

impl Symbol {
    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Default)]
pub struct Interner {
    names: IndexSet<Box<str>>,
}

impl Interner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern(&mut self, name: &str) -> Symbol {
        match self.names.get_index_of(name) {
            Some(index) => Symbol(index as u32),
            None => self.insert(name.into()),
        }
    }

    /// Like [`intern`](Self::intern), reusing the allocation of a freshly mangled name.
    pub fn intern_owned(&mut self, name: String) -> Symbol {
        match self.names.get_index_of(name.as_str()) {
            Some(index) => Symbol(index as u32),
            None => self.insert(name.into_boxed_str()),
        }
    }

    fn insert(&mut self, name: Box<str>) -> Symbol {
        let (index, _) = self.names.insert_full(name);
        Symbol(index as u32)
    }

    /// Symbol of an already interned name.
    pub fn lookup(&self, name: &str) -> Option<Symbol> {
        self.names.get_index_of(name).map(|i| Symbol(i as u32))
    }

    /// # Panics
    /// Panics if the symbol comes from another interner.
    pub fn resolve(&self, sym: Symbol) -> &str {
        &self.names[sym.index()]
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
