use std::fmt;

/// Errors raised by [`TypedCollection`](crate::TypedCollection)
///
/// These are the only two failure modes the container has. Everything
/// else (missing keys, unmatched elements) is reported through
/// `Option`/`bool` results rather than errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionError {
    /// A value failed the declared-element-type check on `add`, `set`,
    /// or seeded construction
    InvalidElement {
        /// Concrete type of the owning collection, e.g. `TypedCollection<integer>`
        collection: String,
        /// Name of the declared element type
        expected: &'static str,
        /// Name of the actual type of the rejected value
        actual: &'static str,
    },
    /// `merge` or `replace` was attempted across two collections whose
    /// declared element types do not satisfy the subsumption rules
    IncompatibleCollectionTypes {
        /// Concrete type of the destination collection
        collection: String,
        /// Concrete type of the source collection
        other_collection: String,
        /// Declared element type of the destination
        declared: &'static str,
        /// Declared element type of the source
        other_declared: &'static str,
    },
}

impl fmt::Display for CollectionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CollectionError::InvalidElement {
                collection,
                expected,
                actual,
            } => write!(
                f,
                "{} only accepts elements of type {}, got {}",
                collection, expected, actual
            ),
            CollectionError::IncompatibleCollectionTypes {
                collection,
                other_collection,
                declared,
                other_declared,
            } => write!(
                f,
                "cannot merge {} (element type {}) into {} (element type {})",
                other_collection, other_declared, collection, declared
            ),
        }
    }
}

impl std::error::Error for CollectionError {}
