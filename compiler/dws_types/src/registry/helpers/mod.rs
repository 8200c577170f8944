//! Helper registry: `helper for T` extensions.
//!
//! A helper adds methods, properties and class variables to an existing type
//! without changing it. Several helpers may extend the same type; the most
//! recently registered one wins on a name clash. A helper may inherit from
//! another helper by name.

use dws_ir::{IdentMap, IdentSet};
use rustc_hash::FxHashMap;

use crate::{MethodInfo, PropertyInfo, RegistryError, TypeId};

/// A helper declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HelperType {
    pub name: String,
    /// Extended type (alias-unwrapped by the caller).
    pub target: TypeId,
    /// Parent helper name.
    pub parent: Option<String>,
    pub methods: IdentMap<MethodInfo>,
    pub properties: IdentMap<PropertyInfo>,
    pub class_vars: IdentMap<TypeId>,
    pub is_record_helper: bool,
}

impl HelperType {
    pub fn new(name: impl Into<String>, target: TypeId) -> Self {
        HelperType {
            name: name.into(),
            target,
            parent: None,
            methods: IdentMap::new(),
            properties: IdentMap::new(),
            class_vars: IdentMap::new(),
            is_record_helper: false,
        }
    }

    #[must_use]
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    #[must_use]
    pub fn with_method(mut self, name: &str, method: MethodInfo) -> Self {
        self.methods.insert(name, method);
        self
    }

    #[must_use]
    pub fn with_property(mut self, name: &str, property: PropertyInfo) -> Self {
        self.properties.insert(name, property);
        self
    }

    #[must_use]
    pub fn with_class_var(mut self, name: &str, ty: TypeId) -> Self {
        self.class_vars.insert(name, ty);
        self
    }
}

/// Registry of helpers, indexed by name and by extended type.
#[derive(Clone, Debug, Default)]
pub struct HelperRegistry {
    helpers: Vec<HelperType>,
    by_name: IdentMap<usize>,
    by_target: FxHashMap<TypeId, Vec<usize>>,
}

impl HelperRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a helper; helper names are unique.
    pub fn register(&mut self, helper: HelperType) -> Result<(), RegistryError> {
        if helper.name.is_empty() {
            return Err(RegistryError::EmptyName);
        }
        if self.by_name.contains(&helper.name) {
            return Err(RegistryError::DuplicateHelper { name: helper.name });
        }

        let index = self.helpers.len();
        self.by_name.insert(&helper.name, index);
        self.by_target.entry(helper.target).or_default().push(index);
        tracing::debug!(helper = %helper.name, target = %helper.target, "helper registered");
        self.helpers.push(helper);
        Ok(())
    }

    pub fn by_name(&self, name: &str) -> Option<&HelperType> {
        self.by_name.get(name).map(|&i| &self.helpers[i])
    }

    /// Helpers extending `target`, in registration order.
    pub fn helpers_for(&self, target: TypeId) -> impl DoubleEndedIterator<Item = &HelperType> {
        self.by_target
            .get(&target)
            .into_iter()
            .flatten()
            .map(|&i| &self.helpers[i])
    }

    /// Walk a helper and its parents, most specific first.
    fn lineage<'a>(&'a self, helper: &'a HelperType) -> impl Iterator<Item = &'a HelperType> {
        let mut visited = IdentSet::new();
        std::iter::successors(Some(helper), |h| {
            h.parent.as_deref().and_then(|p| self.by_name(p))
        })
        .take_while(move |h| visited.insert(&h.name))
    }

    /// Find a member across every helper of `target`, newest helper first.
    fn find_member<'a, T>(
        &'a self,
        target: TypeId,
        pick: impl Fn(&'a HelperType) -> Option<&'a T>,
    ) -> Option<(&'a T, &'a HelperType)> {
        self.helpers_for(target)
            .rev()
            .flat_map(|h| self.lineage(h))
            .find_map(|h| pick(h).map(|m| (m, h)))
    }

    pub fn find_method(&self, target: TypeId, name: &str) -> Option<(&MethodInfo, &HelperType)> {
        self.find_member(target, |h| h.methods.get(name))
    }

    pub fn find_property(&self, target: TypeId, name: &str) -> Option<(&PropertyInfo, &HelperType)> {
        self.find_member(target, |h| h.properties.get(name))
    }

    pub fn find_class_var(&self, target: TypeId, name: &str) -> Option<(TypeId, &HelperType)> {
        self.find_member(target, |h| h.class_vars.get(name))
            .map(|(&ty, h)| (ty, h))
    }

    /// Number of registered helpers.
    pub fn helper_count(&self) -> usize {
        self.helpers.len()
    }

    /// Number of distinct extended types.
    pub fn type_count(&self) -> usize {
        self.by_target.len()
    }

    pub fn clear(&mut self) {
        self.helpers.clear();
        self.by_name.clear();
        self.by_target.clear();
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
mod tests;
