use crate::value::{Interface, ObjectElement, Value};
use std::any::TypeId;
use std::marker::PhantomData;

/// The broad kind of a declared element type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    /// One of the scalar kinds: boolean, integer, float, string, array
    Scalar,
    /// A concrete object type
    Object,
    /// An interface (`dyn Trait`) type
    Interface,
    /// The unchecked variant: every element is admitted
    Any,
}

/// Descriptor of a collection's declared element type
///
/// Built once per collection from its [`ElementType`] tag and cached for
/// the collection's lifetime. Drives both the per-element membership
/// check ([`admits`](TypeInfo::admits)) and the merge-compatibility test
/// ([`subsumes`](TypeInfo::subsumes)).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeInfo {
    name: &'static str,
    id: TypeId,
    kind: TypeKind,
    supertypes: Vec<TypeId>,
    interfaces: Vec<TypeId>,
}

impl TypeInfo {
    pub(crate) fn scalar(name: &'static str, id: TypeId) -> Self {
        Self {
            name,
            id,
            kind: TypeKind::Scalar,
            supertypes: Vec::new(),
            interfaces: Vec::new(),
        }
    }

    pub(crate) fn any() -> Self {
        Self {
            name: "any",
            id: TypeId::of::<Untyped>(),
            kind: TypeKind::Any,
            supertypes: Vec::new(),
            interfaces: Vec::new(),
        }
    }

    pub(crate) fn object<T: ObjectElement>() -> Self {
        Self {
            name: T::NAME,
            id: TypeId::of::<T>(),
            kind: TypeKind::Object,
            supertypes: T::supertypes(),
            interfaces: T::interfaces(),
        }
    }

    pub(crate) fn interface<I: Interface + ?Sized>() -> Self {
        Self {
            name: I::NAME,
            id: TypeId::of::<I>(),
            kind: TypeKind::Interface,
            supertypes: Vec::new(),
            interfaces: Vec::new(),
        }
    }

    /// Name of the declared element type
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Kind of the declared element type
    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    /// True for object and interface declarations
    pub fn is_object_kind(&self) -> bool {
        matches!(self.kind, TypeKind::Object | TypeKind::Interface)
    }

    /// True when the declared element type is an interface
    pub fn is_interface(&self) -> bool {
        self.kind == TypeKind::Interface
    }

    /// The membership predicate applied to every inserted element
    ///
    /// Scalar candidates must match the declared scalar kind. Object
    /// candidates must be an instance of the declared type (equal or a
    /// declared subtype) or implement the declared interface. A scalar
    /// candidate against an object/interface declaration never matches,
    /// and neither does an object candidate against a scalar declaration.
    pub fn admits(&self, value: &Value) -> bool {
        match self.kind {
            TypeKind::Any => true,
            TypeKind::Scalar => value.scalar_type_id() == Some(self.id),
            TypeKind::Object => {
                matches!(value, Value::Object(object) if object.is_instance_of(self.id))
            }
            TypeKind::Interface => {
                matches!(value, Value::Object(object) if object.implements(self.id))
            }
        }
    }

    /// The merge-compatibility test: can elements declared as `other`
    /// flow into a collection declared as `self`?
    ///
    /// An unchecked destination accepts anything. Two object/interface
    /// declarations are compatible when either side's interface is
    /// implemented by the other, or when the source type equals or
    /// descends from the destination type. Everything else requires the
    /// two declared types to be identical.
    ///
    /// The test compares declared types only; it never looks at the
    /// elements a collection actually holds.
    pub fn subsumes(&self, other: &TypeInfo) -> bool {
        if self.kind == TypeKind::Any {
            return true;
        }
        if self.is_object_kind() && other.is_object_kind() {
            if self.kind == TypeKind::Interface && other.interfaces.contains(&self.id) {
                return true;
            }
            if other.kind == TypeKind::Interface && self.interfaces.contains(&other.id) {
                return true;
            }
            return other.id == self.id || other.supertypes.contains(&self.id);
        }
        self.id == other.id
    }
}

/// Type-level tag naming a collection's declared element type
///
/// The scalar tags are the plain Rust types `bool`, `i64`, `f64`,
/// `String`, and `Vec<Value>`; object types are declared with
/// [`Of<T>`], interfaces with [`Implements<I>`], and the unchecked
/// variant with [`Untyped`].
pub trait ElementType: 'static {
    /// Builds the descriptor for this declared type
    ///
    /// Called once per collection; the result is cached for the
    /// collection's lifetime.
    fn type_info() -> TypeInfo;
}

/// Declared-type tag for the unchecked collection variant
///
/// A `TypedCollection<Untyped>` bypasses every element check and accepts
/// any source collection in `merge`/`replace`.
pub struct Untyped;

impl ElementType for Untyped {
    fn type_info() -> TypeInfo {
        TypeInfo::any()
    }
}

/// Declared-type tag for collections of a concrete object type
///
/// Admits instances of `T` and of any type declaring `T` among its
/// supertypes.
pub struct Of<T: ObjectElement>(PhantomData<fn() -> T>);

impl<T: ObjectElement> ElementType for Of<T> {
    fn type_info() -> TypeInfo {
        TypeInfo::object::<T>()
    }
}

/// Declared-type tag for collections of an interface type
///
/// Admits instances of any type declaring `I` among its interfaces.
pub struct Implements<I: Interface + ?Sized>(PhantomData<fn() -> Box<I>>);

impl<I: Interface + ?Sized> ElementType for Implements<I> {
    fn type_info() -> TypeInfo {
        TypeInfo::interface::<I>()
    }
}

impl ElementType for bool {
    fn type_info() -> TypeInfo {
        TypeInfo::scalar("boolean", TypeId::of::<bool>())
    }
}

impl ElementType for i64 {
    fn type_info() -> TypeInfo {
        TypeInfo::scalar("integer", TypeId::of::<i64>())
    }
}

impl ElementType for f64 {
    fn type_info() -> TypeInfo {
        TypeInfo::scalar("float", TypeId::of::<f64>())
    }
}

impl ElementType for String {
    fn type_info() -> TypeInfo {
        TypeInfo::scalar("string", TypeId::of::<String>())
    }
}

impl ElementType for Vec<Value> {
    fn type_info() -> TypeInfo {
        TypeInfo::scalar("array", TypeId::of::<Vec<Value>>())
    }
}
