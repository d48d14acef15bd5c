//! # sovran-collection
//!
//! A type-enforced, insertion-ordered collection library.
//!
//! `sovran-collection` provides an associative array/list hybrid that
//! rejects elements not matching a declared element type, and defines
//! compatibility rules for merging two collections whose declared types
//! are related by subtyping or interface implementation.
//!
//! ## Key Features
//!
//! - **Type-enforced**: every `add`/`set` validates the element against
//!   the collection's declared type
//! - **Ordered**: insertion order is preserved for keys and iteration
//! - **Hybrid keys**: auto-assigned integer indexes or explicit string
//!   names, freely mixed
//! - **Merge compatibility**: collections merge only when their declared
//!   element types are compatible (same type, subtype, or shared
//!   interface)
//! - **Unchecked escape hatch**: [`UntypedCollection`] bypasses every
//!   check, tagged at the type level rather than by a runtime sentinel
//!
//! ## Usage Examples
//!
//! ### Basic Usage
//!
//! ```rust
//! use sovran_collection::{CollectionError, TypedCollection};
//!
//! fn main() -> Result<(), CollectionError> {
//!     let mut numbers = TypedCollection::<i64>::new();
//!     numbers.add(1)?.add(2)?.add(3)?;
//!     numbers.set("answer", 42)?;
//!
//!     assert_eq!(numbers.len(), 4);
//!     assert!(numbers.contains_key("answer"));
//!     assert_eq!(numbers.get("answer").and_then(|v| v.as_int()), Some(42));
//!
//!     // The wrong element type is rejected, naming both types.
//!     match numbers.add("five") {
//!         Err(CollectionError::InvalidElement { expected, actual, .. }) => {
//!             assert_eq!(expected, "integer");
//!             assert_eq!(actual, "string");
//!         }
//!         Ok(_) => unreachable!(),
//!         Err(e) => panic!("unexpected error: {}", e),
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ### Object Collections
//!
//! Object element types declare their supertypes and interfaces by
//! `TypeId`, and collections declare them with [`Of`] or [`Implements`]:
//!
//! ```rust
//! use sovran_collection::{
//!     CollectionError, Implements, Interface, ObjectElement, TypedCollection, TypeId, Value,
//! };
//!
//! trait Greeter: Send + Sync {
//!     fn greet(&self) -> String;
//! }
//!
//! impl Interface for dyn Greeter {
//!     const NAME: &'static str = "Greeter";
//! }
//!
//! struct EnglishGreeter {
//!     name: String,
//! }
//!
//! impl Greeter for EnglishGreeter {
//!     fn greet(&self) -> String {
//!         format!("Hello, {}!", self.name)
//!     }
//! }
//!
//! impl ObjectElement for EnglishGreeter {
//!     const NAME: &'static str = "EnglishGreeter";
//!
//!     fn interfaces() -> Vec<TypeId> {
//!         vec![TypeId::of::<dyn Greeter>()]
//!     }
//! }
//!
//! fn main() -> Result<(), CollectionError> {
//!     let mut greeters = TypedCollection::<Implements<dyn Greeter>>::new();
//!     greeters.add(Value::object(EnglishGreeter {
//!         name: "World".to_string(),
//!     }))?;
//!
//!     let greeting = greeters
//!         .first()
//!         .and_then(|v| v.as_object())
//!         .and_then(|o| o.downcast_ref::<EnglishGreeter>())
//!         .map(|g| g.greet());
//!     assert_eq!(greeting.as_deref(), Some("Hello, World!"));
//!
//!     Ok(())
//! }
//! ```
//!
//! ### Merge Compatibility
//!
//! Merging is gated on the *declared* types of the two collections,
//! never on the elements they happen to hold:
//!
//! ```rust
//! use sovran_collection::{CollectionError, ObjectElement, Of, TypedCollection, TypeId, Value};
//!
//! struct Animal;
//!
//! impl ObjectElement for Animal {
//!     const NAME: &'static str = "Animal";
//! }
//!
//! struct Dog;
//!
//! impl ObjectElement for Dog {
//!     const NAME: &'static str = "Dog";
//!
//!     fn supertypes() -> Vec<TypeId> {
//!         vec![TypeId::of::<Animal>()]
//!     }
//! }
//!
//! fn main() -> Result<(), CollectionError> {
//!     let mut animals = TypedCollection::<Of<Animal>>::new();
//!     animals.add(Value::object(Animal))?;
//!
//!     let mut dogs = TypedCollection::<Of<Dog>>::new();
//!     dogs.add(Value::object(Dog))?;
//!
//!     // Dogs are animals: this direction succeeds.
//!     animals.merge(&dogs)?;
//!     assert_eq!(animals.len(), 2);
//!
//!     // Animals are not necessarily dogs: rejected at the
//!     // collection-type level, regardless of contents.
//!     assert!(matches!(
//!         dogs.merge(&animals),
//!         Err(CollectionError::IncompatibleCollectionTypes { .. })
//!     ));
//!
//!     Ok(())
//! }
//! ```
//!
//! ### The Unchecked Variant
//!
//! ```rust
//! use sovran_collection::{CollectionError, UntypedCollection};
//!
//! fn main() -> Result<(), CollectionError> {
//!     let mut anything = UntypedCollection::new();
//!     anything.add(1)?.add("two")?.add(true)?;
//!     assert_eq!(anything.len(), 3);
//!     Ok(())
//! }
//! ```

mod collection;
mod element;
mod error;
mod key;
pub mod strings;
mod value;

pub use collection::{Iter, TypedCollection, UntypedCollection};
pub use element::{ElementType, Implements, Of, TypeInfo, TypeKind, Untyped};
pub use error::CollectionError;
pub use key::Key;
pub use value::{Interface, ObjectElement, ObjectValue, Value};

// Re-export std::any::TypeId for convenience when declaring
// supertypes and interfaces
pub use std::any::TypeId;
