use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

/// Implemented by struct types stored in object-typed collections
///
/// The trait reports the type metadata the container needs for its
/// runtime checks: a diagnostic name, the supertypes the type descends
/// from, and the interfaces (`dyn Trait` types) it implements. All of
/// it is captured once when a value enters a collection.
///
/// # Examples
///
/// ```
/// use sovran_collection::{Interface, ObjectElement};
/// use std::any::TypeId;
///
/// trait Speaks: Send + Sync {
///     fn speak(&self) -> String;
/// }
///
/// impl Interface for dyn Speaks {
///     const NAME: &'static str = "Speaks";
/// }
///
/// struct Dog {
///     name: String,
/// }
///
/// impl Speaks for Dog {
///     fn speak(&self) -> String {
///         format!("{} says: Woof!", self.name)
///     }
/// }
///
/// impl ObjectElement for Dog {
///     const NAME: &'static str = "Dog";
///
///     fn interfaces() -> Vec<TypeId> {
///         vec![TypeId::of::<dyn Speaks>()]
///     }
/// }
/// ```
pub trait ObjectElement: Any + Send + Sync {
    /// Type name reported in diagnostics
    const NAME: &'static str;

    /// `TypeId`s of the supertypes this type descends from, nearest first
    fn supertypes() -> Vec<TypeId> {
        Vec::new()
    }

    /// `TypeId`s of the interfaces (`dyn Trait`) this type implements
    fn interfaces() -> Vec<TypeId> {
        Vec::new()
    }
}

/// Implemented on `dyn Trait` types used as a declared element interface
///
/// Gives the interface a stable diagnostic name; the interface itself is
/// identified by `TypeId::of::<dyn Trait>()`.
pub trait Interface: 'static {
    /// Interface name reported in diagnostics
    const NAME: &'static str;
}

/// A type-erased object element with its captured type metadata
///
/// The payload lives behind an `Arc`, so cloning a stored object (during
/// `merge`, `replace`, or `filter`) shares the same instance rather than
/// duplicating it, and strict equality is an identity test.
#[derive(Clone)]
pub struct ObjectValue {
    name: &'static str,
    type_id: TypeId,
    supertypes: Arc<[TypeId]>,
    interfaces: Arc<[TypeId]>,
    object: Arc<dyn Any + Send + Sync>,
}

impl ObjectValue {
    /// Wraps a value, capturing its type metadata
    pub fn new<T: ObjectElement>(value: T) -> Self {
        Self {
            name: T::NAME,
            type_id: TypeId::of::<T>(),
            supertypes: T::supertypes().into(),
            interfaces: T::interfaces().into(),
            object: Arc::new(value),
        }
    }

    /// The name of the contained value's type
    pub fn type_name(&self) -> &'static str {
        self.name
    }

    /// Checks whether the contained value is of type `T`
    pub fn is<T: 'static>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    /// Gets a reference to the contained value if it is of type `T`
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.object.downcast_ref::<T>()
    }

    /// True when both wrappers point at the same instance
    pub fn same_instance(&self, other: &ObjectValue) -> bool {
        Arc::ptr_eq(&self.object, &other.object)
    }

    /// Runtime type equals `id`, or descends from it
    pub(crate) fn is_instance_of(&self, id: TypeId) -> bool {
        self.type_id == id || self.supertypes.contains(&id)
    }

    /// Runtime type implements the interface identified by `id`
    pub(crate) fn implements(&self, id: TypeId) -> bool {
        self.interfaces.contains(&id)
    }
}

impl PartialEq for ObjectValue {
    fn eq(&self, other: &Self) -> bool {
        self.same_instance(other)
    }
}

impl fmt::Debug for ObjectValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ObjectValue({})", self.name)
    }
}

/// An element stored in a [`TypedCollection`](crate::TypedCollection)
///
/// Elements are dynamically typed: five scalar kinds plus wrapped object
/// instances. Equality is strict — scalars compare by kind and value,
/// objects compare by instance identity.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A boolean scalar
    Bool(bool),
    /// An integer scalar
    Int(i64),
    /// A float scalar
    Float(f64),
    /// A string scalar
    Str(String),
    /// An array of elements
    Array(Vec<Value>),
    /// An object instance with captured type metadata
    Object(ObjectValue),
}

impl Value {
    /// Wraps an object instance as an element
    pub fn object<T: ObjectElement>(value: T) -> Self {
        Value::Object(ObjectValue::new(value))
    }

    /// The name of this element's type, as used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "boolean",
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Array(_) => "array",
            Value::Object(object) => object.type_name(),
        }
    }

    /// The boolean payload, if this is a boolean scalar
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// The integer payload, if this is an integer scalar
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// The float payload, if this is a float scalar
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(value) => Some(*value),
            _ => None,
        }
    }

    /// The string payload, if this is a string scalar
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(value) => Some(value),
            _ => None,
        }
    }

    /// The array payload, if this is an array
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(values) => Some(values),
            _ => None,
        }
    }

    /// The object wrapper, if this is an object element
    pub fn as_object(&self) -> Option<&ObjectValue> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }

    /// The `TypeId` of the scalar tag this element matches, if any
    pub(crate) fn scalar_type_id(&self) -> Option<TypeId> {
        match self {
            Value::Bool(_) => Some(TypeId::of::<bool>()),
            Value::Int(_) => Some(TypeId::of::<i64>()),
            Value::Float(_) => Some(TypeId::of::<f64>()),
            Value::Str(_) => Some(TypeId::of::<String>()),
            Value::Array(_) => Some(TypeId::of::<Vec<Value>>()),
            Value::Object(_) => None,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(values: Vec<Value>) -> Self {
        Value::Array(values)
    }
}
