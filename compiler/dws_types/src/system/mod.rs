//! The type system of one analysis unit.
//!
//! `TypeSystem` owns the pool and every registry. Declarations are collected
//! through the `declare_*` methods; after [`TypeSystem::seal`] the registries
//! are only queried, by the semantic analyzer and by runtime dispatch alike.

use dws_ir::{same_ident, IdentSet, Position, TypeVisibility};

use crate::{
    ClassFlags, ClassRef, ClassRegistry, ClassType, ConversionRegistry, EngineConfig, EnumType,
    FieldInfo, FunctionRegistry, HelperRegistry, InterfaceType, MethodInfo, OperatorRegistry,
    PropertyInfo, RecordType, RegistryError, RttiRegistry, TypeData, TypeId, TypeKind, TypePool,
    TypeRegistry,
};

/// Name of the root interface every interface may extend.
pub const ROOT_INTERFACE: &str = "IInterface";

/// Types, registries and RTTI identifiers of one analysis unit.
#[derive(Clone, Debug)]
pub struct TypeSystem {
    config: EngineConfig,
    pool: TypePool,
    types: TypeRegistry,
    classes: ClassRegistry<ClassRef>,
    functions: FunctionRegistry,
    operators: OperatorRegistry,
    conversions: ConversionRegistry,
    helpers: HelperRegistry,
    rtti: RttiRegistry,
}

impl TypeSystem {
    /// Create a type system, seeding the built-in types unless disabled.
    pub fn new(config: EngineConfig) -> Self {
        let mut system = TypeSystem {
            config,
            pool: TypePool::new(),
            types: TypeRegistry::new(),
            classes: ClassRegistry::new(),
            functions: FunctionRegistry::new(),
            operators: OperatorRegistry::new(),
            conversions: ConversionRegistry::new(),
            helpers: HelperRegistry::new(),
            rtti: RttiRegistry::new(config.rtti),
        };
        if config.register_builtins {
            system.register_builtins();
        }
        system
    }

    /// (Re)register the built-in types. Safe to call repeatedly.
    pub fn register_builtins(&mut self) {
        for (name, ty) in [
            ("Integer", TypeId::INTEGER),
            ("Float", TypeId::FLOAT),
            ("String", TypeId::STRING),
            ("Boolean", TypeId::BOOLEAN),
            ("Variant", TypeId::VARIANT),
        ] {
            self.types.register_builtin(name, ty);
        }

        let root = match self.types.resolve(ROOT_INTERFACE) {
            Some(existing) if self.pool.kind(existing) == TypeKind::Interface => existing,
            _ => self.pool.add_interface(InterfaceType::new(ROOT_INTERFACE)),
        };
        self.types.register_builtin(ROOT_INTERFACE, root);
        tracing::debug!(types = self.types.count(), "built-in types registered");
    }

    // === Accessors ===

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn pool(&self) -> &TypePool {
        &self.pool
    }

    /// Pool access for building anonymous types (arrays, pointers, metaclasses).
    pub fn pool_mut(&mut self) -> &mut TypePool {
        &mut self.pool
    }

    pub fn types(&self) -> &TypeRegistry {
        &self.types
    }

    pub fn classes(&self) -> &ClassRegistry<ClassRef> {
        &self.classes
    }

    pub fn functions(&self) -> &FunctionRegistry {
        &self.functions
    }

    pub fn functions_mut(&mut self) -> &mut FunctionRegistry {
        &mut self.functions
    }

    pub fn operators(&self) -> &OperatorRegistry {
        &self.operators
    }

    pub fn operators_mut(&mut self) -> &mut OperatorRegistry {
        &mut self.operators
    }

    pub fn conversions(&self) -> &ConversionRegistry {
        &self.conversions
    }

    pub fn conversions_mut(&mut self) -> &mut ConversionRegistry {
        &mut self.conversions
    }

    pub fn helpers(&self) -> &HelperRegistry {
        &self.helpers
    }

    pub fn helpers_mut(&mut self) -> &mut HelperRegistry {
        &mut self.helpers
    }

    pub fn rtti(&self) -> &RttiRegistry {
        &self.rtti
    }

    pub fn rtti_mut(&mut self) -> &mut RttiRegistry {
        &mut self.rtti
    }

    // === Declaration collection ===

    /// Declare a named type.
    ///
    /// Classes are indexed in the class registry; classes, records and enums
    /// receive their RTTI identifier.
    pub fn declare_type(
        &mut self,
        name: &str,
        data: TypeData,
        position: Position,
        visibility: TypeVisibility,
    ) -> Result<TypeId, RegistryError> {
        self.types.check_available(name)?;
        if data.kind().is_nominal() {
            if let Some(declared) = data.declared_name().filter(|d| !same_ident(d, name)) {
                return Err(RegistryError::NameMismatch {
                    name: name.to_owned(),
                    declared: declared.to_owned(),
                });
            }
        }

        let parent = match &data {
            TypeData::Class(class) => Some(class.parent.clone()),
            _ => None,
        };
        let kind = data.kind();
        match kind {
            TypeKind::Class => {
                self.rtti.get_or_allocate_class(name)?;
            }
            TypeKind::Record => {
                self.rtti.get_or_allocate_record(name)?;
            }
            TypeKind::Enum => {
                self.rtti.get_or_allocate_enum(name)?;
            }
            _ => {}
        }

        let id = self.pool.push(data);
        self.types.register(name, id, position, visibility)?;
        if kind == TypeKind::Class {
            self.classes.register_class(ClassRef {
                ty: id,
                name: name.to_owned(),
                parent: parent.flatten(),
            });
        }
        tracing::debug!(name, ?kind, id = %id, "type declared");
        Ok(id)
    }

    pub fn declare_class(&mut self, class: ClassType, position: Position) -> Result<TypeId, RegistryError> {
        let name = class.name.clone();
        self.declare_type(&name, TypeData::Class(class), position, TypeVisibility::Public)
    }

    pub fn declare_interface(
        &mut self,
        interface: InterfaceType,
        position: Position,
    ) -> Result<TypeId, RegistryError> {
        let name = interface.name.clone();
        self.declare_type(&name, TypeData::Interface(interface), position, TypeVisibility::Public)
    }

    pub fn declare_record(&mut self, record: RecordType, position: Position) -> Result<TypeId, RegistryError> {
        let name = record.name.clone();
        self.declare_type(&name, TypeData::Record(record), position, TypeVisibility::Public)
    }

    pub fn declare_enum(&mut self, enumeration: EnumType, position: Position) -> Result<TypeId, RegistryError> {
        let name = enumeration.name.clone();
        self.declare_type(&name, TypeData::Enum(enumeration), position, TypeVisibility::Public)
    }

    pub fn declare_alias(
        &mut self,
        name: &str,
        target: TypeId,
        position: Position,
    ) -> Result<TypeId, RegistryError> {
        self.declare_type(
            name,
            TypeData::Alias(crate::AliasType {
                name: name.to_owned(),
                target,
            }),
            position,
            TypeVisibility::Public,
        )
    }

    /// Supply the body of a forward-declared class.
    ///
    /// The class keeps its handle and RTTI identifier; its parent link is
    /// updated in the class registry. A class that is already complete is
    /// left untouched.
    pub fn complete_class(&mut self, body: ClassType) -> Result<TypeId, RegistryError> {
        let Some(id) = self.types.resolve(&body.name) else {
            return Err(RegistryError::NotAClass { name: body.name });
        };
        let class = self.pool.class_mut(id)?;
        if !class.is_forward() {
            return Err(RegistryError::NotForward {
                name: class.name.clone(),
            });
        }
        let name = class.name.clone();
        *class = ClassType {
            name: name.clone(),
            flags: body.flags.difference(ClassFlags::FORWARD),
            ..body
        };
        let parent = class.parent.clone();

        self.classes.register_class(ClassRef {
            ty: self.pool.underlying(id),
            name,
            parent,
        });
        Ok(id)
    }

    /// Classes still marked forward, for end-of-unit validation.
    pub fn unresolved_forwards(&self) -> Vec<&str> {
        self.classes
            .iter()
            .filter(|e| self.pool.class(e.info.ty).is_some_and(ClassType::is_forward))
            .map(|e| e.name.as_str())
            .collect()
    }

    /// End declaration collection.
    pub fn seal(&mut self) {
        self.pool.seal();
    }

    /// Resolve a type name.
    pub fn resolve(&self, name: &str) -> Option<TypeId> {
        self.types.resolve(name)
    }

    /// Declared name of a class, record, interface or enum after unwrapping aliases.
    pub fn nominal_name(&self, ty: TypeId) -> Option<&str> {
        match self.pool.resolved(ty) {
            data @ (TypeData::Class(_)
            | TypeData::Record(_)
            | TypeData::Interface(_)
            | TypeData::Enum(_)) => data.declared_name(),
            _ => None,
        }
    }

    /// Chained implicit conversion within the configured depth.
    pub fn conversion_path(&self, from: TypeId, to: TypeId) -> Option<Vec<String>> {
        self.conversions.find_conversion_path(
            &self.pool.display_name(from),
            &self.pool.display_name(to),
            self.config.conversion_depth,
        )
    }

    // === Hierarchy queries ===

    pub fn is_descendant_of(&self, descendant: &str, ancestor: &str) -> bool {
        self.classes.is_descendant_of(descendant, ancestor)
    }

    /// Class-level descendant check on pool handles.
    pub fn class_descends_from(&self, descendant: TypeId, ancestor: TypeId) -> bool {
        match (self.pool.class(descendant), self.pool.class(ancestor)) {
            (Some(d), Some(a)) => {
                same_ident(&d.name, &a.name) || self.classes.is_descendant_of(&d.name, &a.name)
            }
            _ => false,
        }
    }

    /// Walk the class chain of `class`, most specific first.
    fn class_chain(&self, class: &str) -> Vec<(&str, &ClassType)> {
        self.classes
            .lookup_hierarchy(class)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|r| self.pool.class(r.ty).map(|c| (r.name.as_str(), c)))
            .collect()
    }

    /// Find a method on `class` or its nearest ancestor declaring it.
    ///
    /// Returns the method with the name of the declaring class.
    pub fn find_method(&self, class: &str, method: &str) -> Option<(&MethodInfo, &str)> {
        self.class_chain(class)
            .into_iter()
            .find_map(|(owner, c)| c.methods.get(method).map(|m| (m, owner)))
    }

    pub fn find_field(&self, class: &str, field: &str) -> Option<(&FieldInfo, &str)> {
        self.class_chain(class)
            .into_iter()
            .find_map(|(owner, c)| c.fields.get(field).map(|f| (f, owner)))
    }

    pub fn find_property(&self, class: &str, property: &str) -> Option<(&PropertyInfo, &str)> {
        self.class_chain(class)
            .into_iter()
            .find_map(|(owner, c)| c.properties.get(property).map(|p| (p, owner)))
    }

    /// The inherited virtual method an `override` in `class` replaces.
    pub fn overridden_method(&self, class: &str, method: &str) -> Option<(&MethodInfo, &str)> {
        self.class_chain(class)
            .into_iter()
            .skip(1)
            .find_map(|(owner, c)| {
                c.methods
                    .get(method)
                    .filter(|m| m.flags.is_dynamic())
                    .map(|m| (m, owner))
            })
    }

    // === Interfaces ===

    /// Interface names from `interface` up its parent chain, cycle-guarded.
    fn interface_chain<'a>(&'a self, interface: &'a str) -> Vec<&'a str> {
        let mut visited = IdentSet::new();
        let mut chain = Vec::new();
        let mut current = Some(interface);
        while let Some(name) = current {
            if !visited.insert(name) {
                tracing::warn!(interface, repeated = name, "cyclic interface hierarchy");
                break;
            }
            chain.push(name);
            current = self
                .types
                .resolve(name)
                .and_then(|id| self.pool.interface(id))
                .and_then(|i| i.parent.as_deref());
        }
        chain
    }

    /// Check whether interface `from` is `to` or extends it.
    pub fn interface_extends(&self, from: &str, to: &str) -> bool {
        self.interface_chain(from).iter().any(|n| same_ident(n, to))
    }

    /// Check whether `class` declares `interface`, directly, through an
    /// ancestor, or through an interface that extends it.
    pub fn implements_interface(&self, class: &str, interface: &str) -> bool {
        self.class_chain(class).iter().any(|(_, c)| {
            c.interfaces
                .iter()
                .any(|declared| self.interface_extends(declared, interface))
        })
    }

    /// Interface methods `class` fails to provide with a matching signature.
    ///
    /// Methods inherited by the interface are included.
    pub fn missing_interface_methods(&self, class: &str, interface: &str) -> Vec<String> {
        let mut missing = Vec::new();
        for iface in self.interface_chain(interface) {
            let Some(decl) = self.types.resolve(iface).and_then(|id| self.pool.interface(id)) else {
                continue;
            };
            for (name, required) in decl.methods.iter() {
                let provided = self.find_method(class, name).is_some_and(|(m, _)| {
                    self.pool.equals(m.signature, required.signature)
                });
                if !provided {
                    missing.push(name.to_owned());
                }
            }
        }
        missing
    }
}

impl Default for TypeSystem {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
mod tests;
