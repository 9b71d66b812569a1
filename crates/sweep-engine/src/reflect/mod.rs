//! Field reflection over the type registry.
//!
//! Produces the flattened instance fields of a type and its ancestors, stopping
//! at an ignore boundary. A field re-declared on a derived type shadows the
//! base declaration, so every name appears at most once.

use std::rc::Rc;

use sweep_core::types::{FxHashMap, FxHashSet};

use crate::model::{Object, TypeKey, TypeRegistry, Value};

/// One flattened field of a type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldDescriptor {
    pub declaring_type: TypeKey,
    pub name: String,
    pub field_type: TypeKey,
}

impl FieldDescriptor {
    /// Read the field from `object`. Missing slots read as `None`.
    pub fn get<'v>(&self, object: &'v Object) -> Option<&'v Value> {
        object.get(&self.name)
    }

    pub fn get_mut<'v>(&self, object: &'v mut Object) -> Option<&'v mut Value> {
        object.get_mut(&self.name)
    }

    pub fn set(&self, object: &mut Object, value: Value) {
        object.set(self.name.clone(), value);
    }
}

/// Collect the fields of `ty` and its ancestors.
///
/// Returns nothing when `ty` itself is ignored. Otherwise walks up the base
/// chain and stops before the first ignored ancestor (or at the root). Fields
/// come most-derived first, in declaration order within each type; callers
/// must not rely on that order.
pub fn fields_including_bases(
    registry: &TypeRegistry,
    ty: TypeKey,
    ignored_types: &FxHashSet<TypeKey>,
) -> Vec<FieldDescriptor> {
    if ignored_types.contains(&ty) {
        return Vec::new();
    }

    let mut seen: FxHashSet<&str> = FxHashSet::default();
    let mut fields = Vec::new();
    let mut current = Some(ty);

    while let Some(declaring_type) = current {
        for field in registry.declared_fields(declaring_type) {
            if seen.insert(field.name.as_str()) {
                fields.push(FieldDescriptor {
                    declaring_type,
                    name: field.name.clone(),
                    field_type: field.field_type,
                });
            }
        }

        current = registry
            .base_of(declaring_type)
            .filter(|base| !ignored_types.contains(base));
    }

    fields
}

/// Per-run cache over [`fields_including_bases`].
#[derive(Debug, Default)]
pub struct FieldReflector {
    ignored_types: FxHashSet<TypeKey>,
    cache: FxHashMap<TypeKey, Rc<[FieldDescriptor]>>,
}

impl FieldReflector {
    pub fn new(ignored_types: FxHashSet<TypeKey>) -> Self {
        Self {
            ignored_types,
            cache: FxHashMap::default(),
        }
    }

    /// Flattened fields of `ty`, computed once per type.
    pub fn fields(&mut self, registry: &TypeRegistry, ty: TypeKey) -> Rc<[FieldDescriptor]> {
        if let Some(fields) = self.cache.get(&ty) {
            return Rc::clone(fields);
        }
        let fields: Rc<[FieldDescriptor]> =
            fields_including_bases(registry, ty, &self.ignored_types).into();
        self.cache.insert(ty, Rc::clone(&fields));
        fields
    }

    pub fn cached_types(&self) -> usize {
        self.cache.len()
    }
}
