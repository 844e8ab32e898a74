//! Sampling and checking demonstration
//!
//! Prints values drawn from a few generators, then the report of a failing
//! property and how its counterexample shrinks.

use forall::*;

fn main() -> Result<()> {
    println!("=== Sampling ===\n");

    let seed = Seed::from_u64(2024);

    println!("integer(-10, 10): {:?}", sample(&Gen::<i64>::integer(-10, 10), 8, seed)?);
    println!("string(6):        {:?}", sample(&Gen::<String>::string(6), 4, seed)?);

    let person = Gen::record_of(vec![
        ("firstname", Gen::<String>::string(6).map(Value::Str)),
        ("surname", Gen::<String>::string(6).map(Value::Str)),
        ("age", Gen::<i64>::integer(0, 120).map(Value::Number)),
    ]);
    for record in sample(&person, 3, seed)? {
        println!("record:           {record}");
    }

    for value in sample(&Gen::anything(2), 5, seed)? {
        println!("anything(2):      {value}");
    }

    println!("\n=== Shrinking ===\n");

    let tree = Gen::array_of(Gen::<i64>::integer(0, 9), 4).generate(seed)?;
    println!("{}", tree.render(2));

    println!("\n=== A failing property ===\n");

    let result = for_all(Gen::array_of(Gen::<i64>::integer(0, 100), 20), |xs| xs.len() < 3)
        .named("short arrays")
        .check(&Config::default().with_seed(7));
    println!("{result}");

    Ok(())
}
