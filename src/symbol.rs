//! Interned variable names.
//!
//! Variable identity is by name, not by object: two `Symbol`s created from
//! the same string compare equal. Names are interned in a global registry so
//! equality during differentiation is a key comparison, not a string compare.

use std::fmt;
use std::sync::{Arc, LazyLock, RwLock};

use rustc_hash::FxHashMap;
use slotmap::{DefaultKey, SlotMap};

/// An interned variable name.
///
/// Cheap to copy and compare; the backing string lives in the global
/// registry for the lifetime of the process.
///
/// # Example
/// ```ignore
/// use symgrad::sym;
/// let x = sym("x");
/// assert_eq!(x, sym("x"));
/// assert_eq!(x.name().as_ref(), "x");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Symbol(DefaultKey);

struct Registry {
    names: SlotMap<DefaultKey, Arc<str>>,
    index: FxHashMap<Arc<str>, DefaultKey>,
}

impl Registry {
    fn new() -> Self {
        Registry {
            names: SlotMap::new(),
            index: FxHashMap::default(),
        }
    }
}

static REGISTRY: LazyLock<RwLock<Registry>> = LazyLock::new(|| RwLock::new(Registry::new()));

/// Get or create the symbol for `name`.
///
/// # Panics
///
/// Panics if the global registry lock is poisoned.
pub fn sym(name: &str) -> Symbol {
    // Fast path: read lock only.
    {
        let registry = REGISTRY.read().expect("symbol registry poisoned");
        if let Some(&key) = registry.index.get(name) {
            return Symbol(key);
        }
    }

    let mut registry = REGISTRY.write().expect("symbol registry poisoned");
    // Re-check: another thread may have interned between the two locks.
    if let Some(&key) = registry.index.get(name) {
        return Symbol(key);
    }
    let interned: Arc<str> = Arc::from(name);
    let key = registry.names.insert(Arc::clone(&interned));
    registry.index.insert(interned, key);
    Symbol(key)
}

impl Symbol {
    /// The interned name backing this symbol.
    ///
    /// # Panics
    ///
    /// Panics if the global registry lock is poisoned.
    pub fn name(&self) -> Arc<str> {
        let registry = REGISTRY.read().expect("symbol registry poisoned");
        registry
            .names
            .get(self.0)
            .cloned()
            .expect("symbol key always resolves: the registry is append-only")
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Number of names currently interned.
pub fn symbol_count() -> usize {
    REGISTRY
        .read()
        .expect("symbol registry poisoned")
        .names
        .len()
}
