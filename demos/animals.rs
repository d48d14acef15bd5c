use sovran_collection::{
    CollectionError, Implements, Interface, ObjectElement, Of, TypeId, TypedCollection, Value,
};

// Example interface: Noisy
trait Noisy: Send + Sync {
    fn make_sound(&self) -> String;
}

impl Interface for dyn Noisy {
    const NAME: &'static str = "Noisy";
}

struct Animal {
    name: String,
}

impl ObjectElement for Animal {
    const NAME: &'static str = "Animal";
}

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

fn main() -> Result<(), CollectionError> {
    env_logger::init();

    // A collection for every animal, and one just for dogs.
    let mut animals = TypedCollection::<Of<Animal>>::new();
    animals.add(Value::object(Animal {
        name: "Generic".to_string(),
    }))?;

    let mut dogs = TypedCollection::<Of<Dog>>::new();
    dogs.add(Value::object(Dog {
        name: "Rover".to_string(),
    }))?
    .add(Value::object(Dog {
        name: "Fido".to_string(),
    }))?;

    // Dogs are animals, so this merge direction succeeds.
    animals.merge(&dogs)?;
    println!("Animals after merging dogs in: {}", animals.len());

    if let Some(resident) = animals
        .first()
        .and_then(|v| v.as_object())
        .and_then(|o| o.downcast_ref::<Animal>())
    {
        println!("First resident: {}", resident.name);
    }

    // The reverse direction is rejected at the collection-type level.
    match dogs.merge(&animals) {
        Ok(_) => println!("This shouldn't happen"),
        Err(e) => println!("Correctly rejected: {}", e),
    }

    // Interface-typed collections accept any implementor.
    let mut noisy = TypedCollection::<Implements<dyn Noisy>>::new();
    noisy.add(Value::object(Cat {
        name: "Whiskers".to_string(),
    }))?;
    noisy.merge(&dogs)?;

    for (key, value) in &noisy {
        let object = value.as_object().expect("interface collections hold objects");
        let sound = if let Some(dog) = object.downcast_ref::<Dog>() {
            dog.make_sound()
        } else if let Some(cat) = object.downcast_ref::<Cat>() {
            cat.make_sound()
        } else {
            continue;
        };
        println!("[{}] {} -> {}", key, object.type_name(), sound);
    }

    // A rock is not noisy.
    struct Rock;
    impl ObjectElement for Rock {
        const NAME: &'static str = "Rock";
    }

    match noisy.add(Value::object(Rock)) {
        Ok(_) => println!("This shouldn't happen"),
        Err(e) => println!("Correctly rejected: {}", e),
    }

    Ok(())
}
