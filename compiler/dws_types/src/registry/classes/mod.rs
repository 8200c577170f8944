//! Class registry: hierarchy index over declared classes.
//!
//! Parent links are stored as names and resolved at query time, so a subclass
//! may be registered before its base. Hierarchy walks stop silently at a
//! parent name that is not (yet) registered.
//!
//! # Cycle Handling
//!
//! A malformed program may name a class as its own ancestor. Every walk keeps
//! a visited set; on a repeat it logs a warning and fails closed (no chain,
//! not a descendant, no depth).

use dws_ir::{same_ident, IdentMap, IdentSet};

use crate::TypeId;

/// Capability a class payload offers the registry.
pub trait ClassLike {
    /// Declared class name.
    fn class_name(&self) -> &str;

    /// Declared parent name, if any.
    fn parent_name(&self) -> Option<&str> {
        None
    }
}

/// Engine-side class payload: the pool handle plus the declared names.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassRef {
    pub ty: TypeId,
    pub name: String,
    pub parent: Option<String>,
}

impl ClassLike for ClassRef {
    fn class_name(&self) -> &str {
        &self.name
    }

    fn parent_name(&self) -> Option<&str> {
        self.parent.as_deref()
    }
}

/// A registered class.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassEntry<C> {
    /// The name as registered.
    pub name: String,
    /// Parent class name, unvalidated.
    pub parent: Option<String>,
    pub info: C,
}

/// Registry of classes keyed by case-insensitive name.
#[derive(Clone, Debug)]
pub struct ClassRegistry<C> {
    classes: IdentMap<ClassEntry<C>>,
}

impl<C> ClassRegistry<C> {
    /// Create an empty registry.
    pub fn new() -> Self {
        ClassRegistry {
            classes: IdentMap::new(),
        }
    }

    /// Register a root class, overwriting any entry of the same name.
    pub fn register(&mut self, name: &str, info: C) {
        self.insert(name, info, None);
    }

    /// Register a class under `parent`, overwriting any entry of the same name.
    ///
    /// The parent need not be registered yet.
    pub fn register_with_parent(&mut self, name: &str, info: C, parent: &str) {
        self.insert(name, info, Some(parent.to_owned()));
    }

    fn insert(&mut self, name: &str, info: C, parent: Option<String>) {
        let entry = ClassEntry {
            name: name.to_owned(),
            parent,
            info,
        };
        if self.classes.insert(name, entry).is_some() {
            tracing::debug!(class = name, "class re-registered");
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&C> {
        self.classes.get(name).map(|e| &e.info)
    }

    pub fn entry(&self, name: &str) -> Option<&ClassEntry<C>> {
        self.classes.get(name)
    }

    pub fn exists(&self, name: &str) -> bool {
        self.classes.contains(name)
    }

    /// Declared parent name of `name`.
    pub fn parent_name(&self, name: &str) -> Option<&str> {
        self.classes.get(name).and_then(|e| e.parent.as_deref())
    }

    /// Entries from `name` up to the root, most specific first.
    ///
    /// Returns `None` if `name` is unknown or the chain is cyclic.
    fn chain(&self, name: &str) -> Option<Vec<&ClassEntry<C>>> {
        let mut visited = IdentSet::new();
        let mut chain = Vec::new();
        let mut current = self.classes.get(name)?;

        loop {
            if !visited.insert(&current.name) {
                tracing::warn!(
                    class = name,
                    repeated = %current.name,
                    "cyclic class hierarchy"
                );
                return None;
            }
            chain.push(current);
            match current.parent.as_deref().and_then(|p| self.classes.get(p)) {
                Some(parent) => current = parent,
                None => return Some(chain),
            }
        }
    }

    /// Class payloads from `name` to its root, most specific first.
    pub fn lookup_hierarchy(&self, name: &str) -> Option<Vec<&C>> {
        self.chain(name)
            .map(|chain| chain.into_iter().map(|e| &e.info).collect())
    }

    /// Check whether `descendant` is `ancestor` or inherits from it.
    pub fn is_descendant_of(&self, descendant: &str, ancestor: &str) -> bool {
        self.chain(descendant)
            .is_some_and(|chain| chain.iter().any(|e| same_ident(&e.name, ancestor)))
    }

    /// Number of inheritance hops from `name` to its root (root is 0).
    pub fn depth(&self, name: &str) -> Option<usize> {
        self.chain(name).map(|chain| chain.len() - 1)
    }

    /// Every registered class that inherits from `ancestor`, excluding it.
    pub fn find_descendants(&self, ancestor: &str) -> Vec<&str> {
        self.classes
            .iter()
            .filter(|(name, _)| !same_ident(name, ancestor))
            .filter(|(name, _)| self.is_descendant_of(name, ancestor))
            .map(|(name, _)| name)
            .collect()
    }

    pub fn count(&self) -> usize {
        self.classes.len()
    }

    /// Registered names, ordered case-insensitively.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.classes.names()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClassEntry<C>> {
        self.classes.values()
    }

    pub fn clear(&mut self) {
        self.classes.clear();
    }
}

impl<C: ClassLike> ClassRegistry<C> {
    /// Register a payload under the names it declares.
    pub fn register_class(&mut self, info: C) {
        let name = info.class_name().to_owned();
        let parent = info.parent_name().map(str::to_owned);
        self.insert(&name, info, parent);
    }
}

impl<C> Default for ClassRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}
