//! Explicit type registry used in place of runtime reflection.
//!
//! Every type the walker can meet is registered up front with its base type
//! and its declared fields. Builtin keys cover the root `object` type,
//! primitives, the opaque platform-object hierarchy and the heterogeneous list.

use serde::{Deserialize, Serialize};
use sweep_core::errors::ModelError;
use sweep_core::types::FxHashMap;

/// Identifier of a registered type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypeKey(u32);

impl TypeKey {
    /// Root of every class hierarchy.
    pub const OBJECT: TypeKey = TypeKey(0);
    pub const BOOL: TypeKey = TypeKey(1);
    pub const INT: TypeKey = TypeKey(2);
    pub const FLOAT: TypeKey = TypeKey(3);
    pub const STRING: TypeKey = TypeKey(4);
    /// Base of all platform objects (assets, nodes, components).
    pub const ENGINE_OBJECT: TypeKey = TypeKey(5);
    pub const NODE: TypeKey = TypeKey(6);
    pub const COMPONENT: TypeKey = TypeKey(7);
    pub const BEHAVIOUR: TypeKey = TypeKey(8);
    pub const DATA_OBJECT: TypeKey = TypeKey(9);
    /// `List<object>`: a list whose elements may be of any type.
    pub const ANY_LIST: TypeKey = TypeKey(10);

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Shape of a registered type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeKind {
    /// Scalar value with no fields.
    Primitive,
    /// Class with declared fields and an optional base.
    Class,
    /// Ordered collection with a declared element type.
    List { element: TypeKey },
}

/// A field declared directly on a type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    pub field_type: TypeKey,
}

/// A registered type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeDef {
    pub key: TypeKey,
    pub name: String,
    pub kind: TypeKind,
    pub base: Option<TypeKey>,
    pub fields: Vec<FieldDef>,
}

/// Registry of every type known to a traversal run.
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    types: Vec<TypeDef>,
    by_name: FxHashMap<String, TypeKey>,
}

impl TypeRegistry {
    /// Create a registry holding only the builtin types.
    pub fn new() -> Self {
        let mut registry = Self {
            types: Vec::new(),
            by_name: FxHashMap::default(),
        };

        // Insertion order must match the `TypeKey` constants.
        registry.insert("object", TypeKind::Class, None);
        registry.insert("bool", TypeKind::Primitive, Some(TypeKey::OBJECT));
        registry.insert("int", TypeKind::Primitive, Some(TypeKey::OBJECT));
        registry.insert("float", TypeKind::Primitive, Some(TypeKey::OBJECT));
        registry.insert("string", TypeKind::Primitive, Some(TypeKey::OBJECT));
        registry.insert("EngineObject", TypeKind::Class, Some(TypeKey::OBJECT));
        registry.insert("Node", TypeKind::Class, Some(TypeKey::ENGINE_OBJECT));
        registry.insert("Component", TypeKind::Class, Some(TypeKey::ENGINE_OBJECT));
        registry.insert("Behaviour", TypeKind::Class, Some(TypeKey::COMPONENT));
        registry.insert("DataObject", TypeKind::Class, Some(TypeKey::ENGINE_OBJECT));
        registry.insert(
            "List<object>",
            TypeKind::List {
                element: TypeKey::OBJECT,
            },
            Some(TypeKey::OBJECT),
        );

        registry
    }

    fn insert(&mut self, name: &str, kind: TypeKind, base: Option<TypeKey>) -> TypeKey {
        let key = TypeKey(self.types.len() as u32);
        self.types.push(TypeDef {
            key,
            name: name.to_string(),
            kind,
            base,
            fields: Vec::new(),
        });
        self.by_name.insert(name.to_string(), key);
        key
    }

    /// Start declaring a class. Defaults to extending `object`.
    pub fn class(&mut self, name: impl Into<String>) -> ClassBuilder<'_> {
        ClassBuilder {
            registry: self,
            name: name.into(),
            base: TypeKey::OBJECT,
            fields: Vec::new(),
        }
    }

    /// Get (or register) the list type with the given element type.
    pub fn list_of(&mut self, element: TypeKey) -> TypeKey {
        let name = format!("List<{}>", self.name(element));
        if let Some(&key) = self.by_name.get(&name) {
            return key;
        }
        self.insert(&name, TypeKind::List { element }, Some(TypeKey::OBJECT))
    }

    pub fn get(&self, key: TypeKey) -> Option<&TypeDef> {
        self.types.get(key.index())
    }

    /// Look up a type by name.
    pub fn lookup(&self, name: &str) -> Option<TypeKey> {
        self.by_name.get(name).copied()
    }

    /// Look up a type by name, failing with `ModelError::UnknownType`.
    pub fn resolve(&self, name: &str) -> Result<TypeKey, ModelError> {
        self.lookup(name).ok_or_else(|| ModelError::UnknownType {
            name: name.to_string(),
        })
    }

    /// Name of a type, or `<unknown>` for keys from another registry.
    pub fn name(&self, key: TypeKey) -> &str {
        self.get(key).map(|t| t.name.as_str()).unwrap_or("<unknown>")
    }

    pub fn base_of(&self, key: TypeKey) -> Option<TypeKey> {
        self.get(key).and_then(|t| t.base)
    }

    /// Fields declared directly on `key`, excluding inherited ones.
    pub fn declared_fields(&self, key: TypeKey) -> &[FieldDef] {
        self.get(key).map(|t| t.fields.as_slice()).unwrap_or(&[])
    }

    /// Element type when `key` is a list type.
    pub fn list_element(&self, key: TypeKey) -> Option<TypeKey> {
        match self.get(key)?.kind {
            TypeKind::List { element } => Some(element),
            _ => None,
        }
    }

    /// True when `key` derives (directly or transitively) from `ancestor`.
    pub fn is_subclass_of(&self, key: TypeKey, ancestor: TypeKey) -> bool {
        let mut current = self.base_of(key);
        while let Some(base) = current {
            if base == ancestor {
                return true;
            }
            current = self.base_of(base);
        }
        false
    }

    /// True when a value of runtime type `key` can be used as `target`.
    pub fn is_assignable(&self, key: TypeKey, target: TypeKey) -> bool {
        key == target || self.is_subclass_of(key, target)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder returned by [`TypeRegistry::class`].
pub struct ClassBuilder<'r> {
    registry: &'r mut TypeRegistry,
    name: String,
    base: TypeKey,
    fields: Vec<FieldDef>,
}

impl ClassBuilder<'_> {
    pub fn extends(mut self, base: TypeKey) -> Self {
        self.base = base;
        self
    }

    pub fn field(mut self, name: impl Into<String>, field_type: TypeKey) -> Self {
        self.fields.push(FieldDef {
            name: name.into(),
            field_type,
        });
        self
    }

    /// Register the class.
    pub fn build(self) -> Result<TypeKey, ModelError> {
        if self.registry.by_name.contains_key(&self.name) {
            return Err(ModelError::DuplicateType { name: self.name });
        }
        for (i, field) in self.fields.iter().enumerate() {
            if self.fields[..i].iter().any(|f| f.name == field.name) {
                return Err(ModelError::DuplicateField {
                    type_name: self.name.clone(),
                    field: field.name.clone(),
                });
            }
        }

        let key = self
            .registry
            .insert(&self.name, TypeKind::Class, Some(self.base));
        self.registry.types[key.index()].fields = self.fields;
        Ok(key)
    }
}
