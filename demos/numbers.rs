use sovran_collection::{CollectionError, TypedCollection, UntypedCollection};

fn main() -> Result<(), CollectionError> {
    env_logger::init();

    // An integer-typed collection rejects everything else.
    let mut numbers = TypedCollection::<i64>::new();
    numbers.add(3)?.add(1)?.add(2)?;
    numbers.set("answer", 42)?;

    match numbers.add("five") {
        Ok(_) => println!("This shouldn't happen"),
        Err(e) => println!("Correctly rejected: {}", e),
    }

    println!("Keys in order: {:?}", numbers.keys());

    // Sort in place, keys travel with values.
    numbers.sort(|a, b| a.as_int().cmp(&b.as_int()));
    let sorted: Vec<_> = numbers.map(|v| v.as_int().unwrap());
    println!("Sorted values: {:?}", sorted);

    // Filter to a new collection, source untouched.
    let small = numbers.filter(|value, _| value.as_int().is_some_and(|n| n < 10));
    println!("Small values: {} of {}", small.len(), numbers.len());

    if let Some(first) = numbers.find_first(|value, _| value.as_int().is_some_and(|n| n > 2)) {
        println!("First value above 2: {:?}", first);
    }

    // The untyped variant takes anything.
    let mut grab_bag = UntypedCollection::new();
    grab_bag.add(1)?.add("two")?.add(true)?;
    println!("Grab bag holds {} elements", grab_bag.len());

    // Untyped collections absorb typed ones wholesale.
    grab_bag.merge(&numbers)?;
    println!("After merge: {} elements", grab_bag.len());

    Ok(())
}
