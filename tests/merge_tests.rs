use sovran_collection::{
    CollectionError, Implements, Interface, Key, ObjectElement, Of, TypeId, TypedCollection,
    UntypedCollection, Value,
};

trait Noisy: Send + Sync {
    fn make_sound(&self) -> String;
}

impl Interface for dyn Noisy {
    const NAME: &'static str = "Noisy";
}

#[derive(Debug)]
struct Animal {
    name: String,
}

impl ObjectElement for Animal {
    const NAME: &'static str = "Animal";
}

#[derive(Debug)]
struct Dog {
    name: String,
}

impl Noisy for Dog {
    fn make_sound(&self) -> String {
        format!("{} says: Woof!", self.name)
    }
}

impl ObjectElement for Dog {
    const NAME: &'static str = "Dog";

    fn supertypes() -> Vec<TypeId> {
        vec![TypeId::of::<Animal>()]
    }

    fn interfaces() -> Vec<TypeId> {
        vec![TypeId::of::<dyn Noisy>()]
    }
}

#[derive(Debug)]
struct Cat {
    name: String,
}

impl Noisy for Cat {
    fn make_sound(&self) -> String {
        format!("{} says: Meow!", self.name)
    }
}

impl ObjectElement for Cat {
    const NAME: &'static str = "Cat";

    fn interfaces() -> Vec<TypeId> {
        vec![TypeId::of::<dyn Noisy>()]
    }
}

fn dog(name: &str) -> Value {
    Value::object(Dog {
        name: name.to_string(),
    })
}

fn cat(name: &str) -> Value {
    Value::object(Cat {
        name: name.to_string(),
    })
}

fn animal(name: &str) -> Value {
    Value::object(Animal {
        name: name.to_string(),
    })
}

#[test]
fn test_same_type_merge_appends_everything() {
    let mut a = TypedCollection::<i64>::from_values([1, 2]).unwrap();
    let b = TypedCollection::<i64>::from_values([3, 4, 5]).unwrap();

    a.merge(&b).unwrap();

    assert_eq!(a.len(), 5);
    assert_eq!(b.len(), 3);
    for value in b.values() {
        assert!(a.contains(&value));
    }
}

#[test]
fn test_merge_ignores_source_keys() {
    let mut a = TypedCollection::<String>::from_values(["x"]).unwrap();
    let b = TypedCollection::<String>::from_pairs([("named", "y")]).unwrap();

    a.merge(&b).unwrap();

    // The named entry arrived under a fresh auto-index.
    assert_eq!(a.keys(), vec![Key::Index(0), Key::Index(1)]);
    assert!(!a.contains_key("named"));
}

#[test]
fn test_merged_objects_keep_identity() {
    let mut kennel = TypedCollection::<Of<Dog>>::new();
    let mut strays = TypedCollection::<Of<Dog>>::new();
    strays.add(dog("Rover")).unwrap();

    kennel.merge(&strays).unwrap();

    // The merged element is the same instance, not a copy.
    let original = strays.first().unwrap();
    assert!(kennel.contains(original));
    let (a, b) = (
        kennel.first().and_then(|v| v.as_object()).unwrap(),
        original.as_object().unwrap(),
    );
    assert!(a.same_instance(b));
}

#[test]
fn test_subtype_collection_merges_into_supertype_collection() {
    let mut animals = TypedCollection::<Of<Animal>>::new();
    animals.add(animal("Generic")).unwrap();

    let mut dogs = TypedCollection::<Of<Dog>>::new();
    dogs.add(dog("Rover")).unwrap().add(dog("Fido")).unwrap();

    animals.merge(&dogs).unwrap();
    assert_eq!(animals.len(), 3);

    // The supertype-typed collection hands back its elements by
    // concrete type.
    let first = animals.first().and_then(|v| v.as_object()).unwrap();
    assert_eq!(first.downcast_ref::<Animal>().unwrap().name, "Generic");
    let second = animals.get(1u64).and_then(|v| v.as_object()).unwrap();
    assert_eq!(second.type_name(), "Dog");
    assert!(second.downcast_ref::<Animal>().is_none());
}

#[test]
fn test_supertype_collection_never_merges_into_subtype_collection() {
    let mut animals = TypedCollection::<Of<Animal>>::new();
    let mut dogs = TypedCollection::<Of<Dog>>::new();
    dogs.add(dog("Rover")).unwrap();

    // The check is on declared collection types, not elements: even an
    // empty Animal collection is rejected here.
    match dogs.merge(&animals) {
        Err(CollectionError::IncompatibleCollectionTypes {
            collection,
            other_collection,
            declared,
            other_declared,
        }) => {
            assert_eq!(collection, "TypedCollection<Dog>");
            assert_eq!(other_collection, "TypedCollection<Animal>");
            assert_eq!(declared, "Dog");
            assert_eq!(other_declared, "Animal");
        }
        _ => panic!("expected IncompatibleCollectionTypes"),
    }
    assert_eq!(dogs.len(), 1);
    assert!(animals.is_empty());
}

#[test]
fn test_interface_collection_accepts_implementors() {
    let mut noisy = TypedCollection::<Implements<dyn Noisy>>::new();
    assert!(noisy.type_is_interface());

    let mut dogs = TypedCollection::<Of<Dog>>::new();
    dogs.add(dog("Rover")).unwrap();
    let mut cats = TypedCollection::<Of<Cat>>::new();
    cats.add(cat("Whiskers")).unwrap();

    noisy.merge(&dogs).unwrap();
    noisy.merge(&cats).unwrap();
    assert_eq!(noisy.len(), 2);

    let sounds: Vec<String> = noisy.map(|v| {
        let object = v.as_object().unwrap();
        if let Some(dog) = object.downcast_ref::<Dog>() {
            dog.make_sound()
        } else if let Some(cat) = object.downcast_ref::<Cat>() {
            cat.make_sound()
        } else {
            unreachable!()
        }
    });
    assert_eq!(
        sounds,
        vec!["Rover says: Woof!".to_string(), "Whiskers says: Meow!".to_string()]
    );
}

#[test]
fn test_interface_collection_merges_into_implementing_collection() {
    let mut noisy = TypedCollection::<Implements<dyn Noisy>>::new();
    noisy.add(dog("Rover")).unwrap();

    // Dog implements Noisy, so the interface-typed source is accepted.
    let mut dogs = TypedCollection::<Of<Dog>>::new();
    dogs.merge(&noisy).unwrap();
    assert_eq!(dogs.len(), 1);
}

#[test]
fn test_gated_in_merge_still_validates_elements() {
    // A Noisy collection holding a cat passes the declared-type gate
    // for a Dog destination (Dog implements Noisy), but the cat itself
    // fails the add-path check once reached.
    let mut noisy = TypedCollection::<Implements<dyn Noisy>>::new();
    noisy.add(dog("Rover")).unwrap().add(cat("Whiskers")).unwrap();

    let mut dogs = TypedCollection::<Of<Dog>>::new();
    let result = dogs.merge(&noisy);

    assert!(matches!(
        result,
        Err(CollectionError::InvalidElement { expected: "Dog", actual: "Cat", .. })
    ));
    // Elements appended before the failure remain.
    assert_eq!(dogs.len(), 1);
}

#[test]
fn test_unrelated_types_never_merge() {
    let mut numbers = TypedCollection::<i64>::from_values([1]).unwrap();
    let strings = TypedCollection::<String>::from_values(["one"]).unwrap();

    assert!(matches!(
        numbers.merge(&strings),
        Err(CollectionError::IncompatibleCollectionTypes { .. })
    ));
    assert_eq!(numbers.len(), 1);
    assert_eq!(strings.len(), 1);

    let mut cats = TypedCollection::<Of<Cat>>::new();
    let dogs = TypedCollection::<Of<Dog>>::from_values([dog("Rover")]).unwrap();
    assert!(cats.merge(&dogs).is_err());
    assert!(cats.is_empty());
}

#[test]
fn test_untyped_destination_accepts_any_source() {
    let mut anything = UntypedCollection::new();

    let numbers = TypedCollection::<i64>::from_values([1, 2]).unwrap();
    let dogs = TypedCollection::<Of<Dog>>::from_values([dog("Rover")]).unwrap();

    anything.merge(&numbers).unwrap();
    anything.merge(&dogs).unwrap();
    assert_eq!(anything.len(), 3);

    // The reverse is not true: a typed destination rejects an untyped
    // source even when its contents would fit.
    let mut numbers = numbers;
    let mut fitting = UntypedCollection::new();
    fitting.add(3).unwrap();
    assert!(matches!(
        numbers.merge(&fitting),
        Err(CollectionError::IncompatibleCollectionTypes { .. })
    ));
}

#[test]
fn test_replace_overwrites_named_keys_and_appends_indexed() {
    let mut base = TypedCollection::<String>::from_pairs([
        ("color", "red"),
        ("size", "small"),
    ])
    .unwrap();
    base.add("positional").unwrap();

    let mut overlay = TypedCollection::<String>::new();
    overlay.set("color", "blue").unwrap();
    overlay.add("appended").unwrap();

    base.replace(&overlay).unwrap();

    assert_eq!(base.len(), 4);
    assert_eq!(base.get("color").and_then(|v| v.as_str()), Some("blue"));
    assert_eq!(base.get("size").and_then(|v| v.as_str()), Some("small"));

    let values: Vec<_> = base.map(|v| v.as_str().unwrap().to_string());
    assert_eq!(values, vec!["blue", "small", "positional", "appended"]);
}

#[test]
fn test_replace_applies_the_same_compatibility_gate() {
    let mut dogs = TypedCollection::<Of<Dog>>::new();
    let animals = TypedCollection::<Of<Animal>>::new();

    assert!(matches!(
        dogs.replace(&animals),
        Err(CollectionError::IncompatibleCollectionTypes { .. })
    ));
}

#[test]
fn test_incompatible_merge_error_display() {
    let mut dogs = TypedCollection::<Of<Dog>>::new();
    let animals = TypedCollection::<Of<Animal>>::new();

    let error = dogs.merge(&animals).unwrap_err();
    assert_eq!(
        error.to_string(),
        "cannot merge TypedCollection<Animal> (element type Animal) into \
         TypedCollection<Dog> (element type Dog)"
    );
}
