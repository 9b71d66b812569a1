//! Runtime value tree walked by the traversal engine.

use std::fmt;

use serde::{Deserialize, Serialize};
use sweep_core::types::FxHashMap;

use super::registry::{TypeKey, TypeRegistry};

/// A runtime value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
    Object(Object),
    /// Handle to a platform object living elsewhere (another asset or node).
    Ref(ObjectRef),
}

impl Value {
    /// Runtime type of the value; `None` for null.
    pub fn runtime_type(&self) -> Option<TypeKey> {
        match self {
            Value::Null => None,
            Value::Bool(_) => Some(TypeKey::BOOL),
            Value::Int(_) => Some(TypeKey::INT),
            Value::Float(_) => Some(TypeKey::FLOAT),
            Value::Str(_) => Some(TypeKey::STRING),
            Value::List(_) => Some(TypeKey::ANY_LIST),
            Value::Object(o) => Some(o.type_key),
            Value::Ref(r) => Some(r.type_key),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut Object> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Display adapter that resolves type names through `registry`.
    pub fn display<'a>(&'a self, registry: &'a TypeRegistry) -> ValueDisplay<'a> {
        ValueDisplay {
            value: self,
            registry,
        }
    }
}

impl From<Object> for Value {
    fn from(object: Object) -> Self {
        Value::Object(object)
    }
}

impl From<ObjectRef> for Value {
    fn from(r: ObjectRef) -> Self {
        Value::Ref(r)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

/// Instance of a registered class: its runtime type plus named field slots.
///
/// Slots are keyed by field name; a derived field shadows the base slot of the
/// same name. Missing slots read as null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Object {
    type_key: TypeKey,
    fields: FxHashMap<String, Value>,
}

impl Object {
    pub fn new(type_key: TypeKey) -> Self {
        Self {
            type_key,
            fields: FxHashMap::default(),
        }
    }

    /// Builder-style setter.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn type_key(&self) -> TypeKey {
        self.type_key
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.fields.get_mut(name)
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }
}

/// Reference to a platform object stored outside the current value tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectRef {
    pub type_key: TypeKey,
    /// Asset holding the referenced object.
    pub asset_path: Option<String>,
    /// Hierarchy path of the node carrying the object, when it lives on a node.
    pub node_path: Option<String>,
}

impl ObjectRef {
    pub fn new(type_key: TypeKey) -> Self {
        Self {
            type_key,
            asset_path: None,
            node_path: None,
        }
    }

    pub fn in_asset(mut self, path: impl Into<String>) -> Self {
        self.asset_path = Some(path.into());
        self
    }

    pub fn on_node(mut self, hierarchy: impl Into<String>) -> Self {
        self.node_path = Some(hierarchy.into());
        self
    }
}

/// See [`Value::display`].
pub struct ValueDisplay<'a> {
    value: &'a Value,
    registry: &'a TypeRegistry,
}

impl fmt::Display for ValueDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Value::Null => f.write_str("null"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Str(s) => write!(f, "{s:?}"),
            Value::List(items) => write!(f, "[{} items]", items.len()),
            Value::Object(o) => write!(f, "{}", self.registry.name(o.type_key)),
            Value::Ref(r) => {
                write!(f, "&{}", self.registry.name(r.type_key))?;
                match (&r.asset_path, &r.node_path) {
                    (Some(asset), Some(node)) => write!(f, " ({asset}: {node})"),
                    (Some(asset), None) => write!(f, " ({asset})"),
                    (None, Some(node)) => write!(f, " ({node})"),
                    (None, None) => Ok(()),
                }
            }
        }
    }
}
