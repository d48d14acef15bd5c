use crate::element::{ElementType, TypeInfo, Untyped};
use crate::error::CollectionError;
use crate::key::Key;
use crate::value::Value;
use log::{debug, trace};
use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;

/// An ordered container that enforces a declared element type
///
/// `TypedCollection` behaves like an associative array/list hybrid:
/// entries are keyed by an explicit string name or an auto-assigned
/// integer index, and insertion order is preserved for iteration. Every
/// mutation validates the incoming element against the declared type
/// `D`, and two collections can only be merged when their declared
/// types are compatible under the subsumption rules of
/// [`TypeInfo::subsumes`].
///
/// # Examples
///
/// ```
/// use sovran_collection::{CollectionError, TypedCollection};
///
/// fn main() -> Result<(), CollectionError> {
///     let mut numbers = TypedCollection::<i64>::new();
///     numbers.add(1)?.add(2)?.add(3)?;
///
///     assert_eq!(numbers.len(), 3);
///     assert_eq!(numbers.get(0u64).and_then(|v| v.as_int()), Some(1));
///
///     // The declared type is enforced on every mutation.
///     assert!(numbers.add("four").is_err());
///     Ok(())
/// }
/// ```
///
/// Object elements are declared with [`Of<T>`](crate::Of), interfaces
/// with [`Implements<I>`](crate::Implements), and the unchecked variant
/// with [`Untyped`] (see [`UntypedCollection`]).
pub struct TypedCollection<D: ElementType = Untyped> {
    info: TypeInfo,
    entries: Vec<(Key, Value)>,
    next_index: u64,
    marker: PhantomData<fn() -> D>,
}

/// The explicitly unchecked collection variant
///
/// Element validation and merge-compatibility checks always pass.
pub type UntypedCollection = TypedCollection<Untyped>;

impl<D: ElementType> TypedCollection<D> {
    /// Creates a new, empty collection
    ///
    /// The declared-type descriptor is computed here, once, and cached
    /// for the collection's lifetime.
    pub fn new() -> Self {
        Self {
            info: D::type_info(),
            entries: Vec::new(),
            next_index: 0,
            marker: PhantomData,
        }
    }

    /// Creates a collection seeded from a sequence of values
    ///
    /// Each value is appended through the same validated [`add`] path
    /// used for later mutation, so a construction-time violation fails
    /// exactly like a runtime one.
    ///
    /// [`add`]: TypedCollection::add
    ///
    /// # Errors
    ///
    /// Returns `CollectionError::InvalidElement` for the first value
    /// failing the declared-type check.
    pub fn from_values<I, V>(values: I) -> Result<Self, CollectionError>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let mut collection = Self::new();
        for value in values {
            collection.add(value)?;
        }
        Ok(collection)
    }

    /// Creates a collection seeded from a sequence of key-value pairs
    ///
    /// Each pair is inserted through the same validated [`set`] path
    /// used for later mutation.
    ///
    /// [`set`]: TypedCollection::set
    ///
    /// # Errors
    ///
    /// Returns `CollectionError::InvalidElement` for the first value
    /// failing the declared-type check.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, CollectionError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Key>,
        V: Into<Value>,
    {
        let mut collection = Self::new();
        for (key, value) in pairs {
            collection.set(key, value)?;
        }
        Ok(collection)
    }

    /// Validates and appends a value at the next auto-assigned index
    ///
    /// Auto-assigned indexes are monotonically increasing and never
    /// reused, even after removal.
    ///
    /// # Errors
    ///
    /// Returns `CollectionError::InvalidElement` when the value fails
    /// the declared-type check.
    pub fn add(&mut self, value: impl Into<Value>) -> Result<&mut Self, CollectionError> {
        let value = value.into();
        self.check_element(&value)?;
        let key = Key::Index(self.next_index);
        self.next_index += 1;
        self.entries.push((key, value));
        Ok(self)
    }

    /// Validates and inserts or overwrites the value at `key`
    ///
    /// Setting an integer key at or above the next auto-index advances
    /// auto-indexing past it, so later [`add`](TypedCollection::add)
    /// calls continue upward unaffected by gaps.
    ///
    /// # Errors
    ///
    /// Returns `CollectionError::InvalidElement` when the value fails
    /// the declared-type check.
    pub fn set(
        &mut self,
        key: impl Into<Key>,
        value: impl Into<Value>,
    ) -> Result<&mut Self, CollectionError> {
        let key = key.into();
        let value = value.into();
        self.check_element(&value)?;
        if let Key::Index(index) = key {
            if index >= self.next_index {
                self.next_index = index + 1;
            }
        }
        match self.position(&key) {
            Some(position) => self.entries[position].1 = value,
            None => self.entries.push((key, value)),
        }
        Ok(self)
    }

    /// Removes and returns the value at `key`
    ///
    /// An absent key is a no-op and returns `None`; removal never
    /// affects the indexes handed out to later appends.
    pub fn remove(&mut self, key: impl Into<Key>) -> Option<Value> {
        let key = key.into();
        let position = self.position(&key)?;
        Some(self.entries.remove(position).1)
    }

    /// Removes the first entry whose value is strictly equal to `value`
    ///
    /// Strict equality means same scalar kind and value, or the same
    /// object instance. Returns `true` when an entry was removed,
    /// `false` when nothing matched; at most one entry is ever removed.
    pub fn remove_element(&mut self, value: &Value) -> bool {
        let key = self
            .entries
            .iter()
            .find(|(_, stored)| stored == value)
            .map(|(key, _)| key.clone());
        match key {
            Some(key) => {
                self.remove(key);
                true
            }
            None => false,
        }
    }

    /// Returns the value at `key`, or `None` when absent
    pub fn get(&self, key: impl Into<Key>) -> Option<&Value> {
        let key = key.into();
        self.position(&key).map(|position| &self.entries[position].1)
    }

    /// True when `key` is present
    pub fn contains_key(&self, key: impl Into<Key>) -> bool {
        let key = key.into();
        self.position(&key).is_some()
    }

    /// True when some entry is strictly equal to `value`
    pub fn contains(&self, value: &Value) -> bool {
        self.entries.iter().any(|(_, stored)| stored == value)
    }

    /// Number of entries in the collection
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the collection holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates key-value pairs in insertion order
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            entries: self.entries.iter(),
        }
    }

    /// Returns all keys in insertion order
    pub fn keys(&self) -> Vec<Key> {
        self.entries.iter().map(|(key, _)| key.clone()).collect()
    }

    /// Returns all values in insertion order
    pub fn values(&self) -> Vec<Value> {
        self.entries.iter().map(|(_, value)| value.clone()).collect()
    }

    /// Appends every element of `other`, re-keyed at this collection's
    /// auto-indexes
    ///
    /// The merge is gated by the declared-type subsumption test:
    /// `other`'s declared element type must be compatible with this
    /// collection's. The gate compares declared types only — it never
    /// inspects `other`'s elements, so a merge direction that fails the
    /// gate is rejected even when every individual element would
    /// validate. Elements of a gated-in merge still pass through the
    /// normal [`add`](TypedCollection::add) validation, so a source
    /// declared with a broader interface can surface `InvalidElement`
    /// mid-merge; elements appended before that point remain.
    ///
    /// # Errors
    ///
    /// Returns `CollectionError::IncompatibleCollectionTypes` when the
    /// declared types are incompatible (nothing is mutated), or
    /// `CollectionError::InvalidElement` from the add path.
    pub fn merge<E: ElementType>(
        &mut self,
        other: &TypedCollection<E>,
    ) -> Result<&mut Self, CollectionError> {
        self.check_compatible(other)?;
        for (_, value) in other.iter() {
            self.add(value.clone())?;
        }
        trace!(
            "merged {} elements into {}",
            other.len(),
            self.type_label()
        );
        Ok(self)
    }

    /// Overlays every element of `other` onto this collection
    ///
    /// Named keys from `other` overwrite matching keys here via
    /// [`set`](TypedCollection::set); integer-indexed elements are
    /// appended via [`add`](TypedCollection::add). The same
    /// declared-type gate as [`merge`](TypedCollection::merge) applies.
    ///
    /// # Errors
    ///
    /// Returns `CollectionError::IncompatibleCollectionTypes` when the
    /// declared types are incompatible (nothing is mutated), or
    /// `CollectionError::InvalidElement` from the set/add path.
    pub fn replace<E: ElementType>(
        &mut self,
        other: &TypedCollection<E>,
    ) -> Result<&mut Self, CollectionError> {
        self.check_compatible(other)?;
        for (key, value) in other.iter() {
            match key {
                Key::Name(name) => self.set(name.clone(), value.clone())?,
                Key::Index(_) => self.add(value.clone())?,
            };
        }
        Ok(self)
    }

    /// Returns a new collection holding only the entries for which
    /// `predicate(value, key)` holds
    ///
    /// Original keys are preserved and the source collection is left
    /// untouched.
    pub fn filter<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&Value, &Key) -> bool,
    {
        let entries = self
            .entries
            .iter()
            .filter(|(key, value)| predicate(value, key))
            .cloned()
            .collect();
        Self {
            info: self.info.clone(),
            entries,
            next_index: self.next_index,
            marker: PhantomData,
        }
    }

    /// Reorders the entries in place with the given comparator
    ///
    /// Keys travel with their values, the sort is stable, and the same
    /// collection is returned for chaining.
    pub fn sort<F>(&mut self, mut comparator: F) -> &mut Self
    where
        F: FnMut(&Value, &Value) -> Ordering,
    {
        self.entries.sort_by(|a, b| comparator(&a.1, &b.1));
        self
    }

    /// Applies `transform` to every element in order, collecting the
    /// results into a plain sequence
    ///
    /// The result is untyped on purpose: the transform may change the
    /// element's shape.
    pub fn map<R, F>(&self, transform: F) -> Vec<R>
    where
        F: FnMut(&Value) -> R,
    {
        self.entries
            .iter()
            .map(|(_, value)| value)
            .map(transform)
            .collect()
    }

    /// Returns the first element in iteration order, or `None` when empty
    pub fn first(&self) -> Option<&Value> {
        self.entries.first().map(|(_, value)| value)
    }

    /// Returns the first element for which `predicate(value, key)`
    /// holds, or `None` when nothing matches
    pub fn find_first<F>(&self, mut predicate: F) -> Option<&Value>
    where
        F: FnMut(&Value, &Key) -> bool,
    {
        self.entries
            .iter()
            .find(|(key, value)| predicate(value, key))
            .map(|(_, value)| value)
    }

    /// Descriptor of the declared element type
    pub fn element_type(&self) -> &TypeInfo {
        &self.info
    }

    /// True when the declared element type is an object or interface
    pub fn is_object_type(&self) -> bool {
        self.info.is_object_kind()
    }

    /// True when the declared element type is an interface
    pub fn type_is_interface(&self) -> bool {
        self.info.is_interface()
    }

    fn position(&self, key: &Key) -> Option<usize> {
        self.entries.iter().position(|(stored, _)| stored == key)
    }

    fn type_label(&self) -> String {
        format!("TypedCollection<{}>", self.info.name())
    }

    fn check_element(&self, value: &Value) -> Result<(), CollectionError> {
        if self.info.admits(value) {
            return Ok(());
        }
        Err(CollectionError::InvalidElement {
            collection: self.type_label(),
            expected: self.info.name(),
            actual: value.type_name(),
        })
    }

    fn check_compatible<E: ElementType>(
        &self,
        other: &TypedCollection<E>,
    ) -> Result<(), CollectionError> {
        if self.info.subsumes(&other.info) {
            return Ok(());
        }
        debug!(
            "rejected merge of {} into {}",
            other.type_label(),
            self.type_label()
        );
        Err(CollectionError::IncompatibleCollectionTypes {
            collection: self.type_label(),
            other_collection: other.type_label(),
            declared: self.info.name(),
            other_declared: other.info.name(),
        })
    }
}

impl<D: ElementType> Default for TypedCollection<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: ElementType> Clone for TypedCollection<D> {
    fn clone(&self) -> Self {
        Self {
            info: self.info.clone(),
            entries: self.entries.clone(),
            next_index: self.next_index,
            marker: PhantomData,
        }
    }
}

impl<D: ElementType> fmt::Debug for TypedCollection<D> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("TypedCollection")
            .field("element_type", &self.info.name())
            .field("entries", &self.entries)
            .finish()
    }
}

/// Insertion-order iterator over a collection's key-value pairs
pub struct Iter<'a> {
    entries: std::slice::Iter<'a, (Key, Value)>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a Key, &'a Value);

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next().map(|(key, value)| (key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl<'a, D: ElementType> IntoIterator for &'a TypedCollection<D> {
    type Item = (&'a Key, &'a Value);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
