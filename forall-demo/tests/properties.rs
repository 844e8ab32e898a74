//! Properties of the demo functions, checked the way a test suite would.

use forall::*;
use forall_demo::*;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Arrays of arbitrary values.
fn arbitrary_array() -> Gen<Vec<Value>> {
    Gen::array_of(Gen::anything(2), DEFAULT_ARRAY_LEN)
}

#[test]
fn test_arbitrary_values_are_arrays() {
    let samples = sample(&arbitrary_array().map(Value::Array), 25, Seed::from_u64(1)).unwrap();
    assert_eq!(samples.len(), 25);
    assert!(samples.iter().all(Value::is_array));
}

#[test]
fn prop_reversed_list_has_same_length() {
    init_logging();
    assert_forall(arbitrary_array(), |xs| reverse_list(xs).len() == xs.len());
}

#[test]
fn prop_reversing_twice_is_identity() {
    init_logging();
    assert_forall(arbitrary_array(), |xs| reverse_list(&reverse_list(xs)) == *xs);
}

#[test]
fn test_reverse_concrete_cases() {
    assert_eq!(reverse_list(&[1, 2, 3]), vec![3, 2, 1]);
    assert!(reverse_list::<Value>(&[]).is_empty());
    assert_eq!(reverse_list(&[7]), vec![7]);
}

#[test]
fn prop_username_is_eight_characters() {
    init_logging();
    assert_forall(User::generate(), |user| {
        let username = create_username(user);
        if username.chars().count() == USERNAME_LEN {
            Ok(())
        } else {
            Err(format!("{username:?} has the wrong length"))
        }
    });
}

#[test]
fn test_username_of_empty_user() {
    assert_eq!(create_username(&User::new("", "", 0)), "------00");
}

#[test]
fn prop_username_survives_uri_round_trip() {
    init_logging();
    assert_forall(User::generate(), |user| {
        let username = create_username(user);
        decode_uri(&encode_uri(&username)) == Ok(username)
    });
}

#[test]
fn test_padded_username_uri_round_trip() {
    assert_eq!(decode_uri(&encode_uri("A-----01")).unwrap(), "A-----01");
}

/// The unpadded variant really is broken; this documents the failure.
#[test]
#[ignore = "create_username_unpadded does not pad short usernames"]
fn prop_unpadded_username_is_eight_characters() {
    assert_forall(User::generate(), |user| {
        create_username_unpadded(user).chars().count() == USERNAME_LEN
    });
}

#[test]
fn test_unpadded_username_shrinks_to_empty_user() {
    init_logging();
    let result = check(
        User::generate(),
        |user| create_username_unpadded(user).chars().count() == USERNAME_LEN,
        &Config::default().with_seed(42),
    );

    let counterexample = result.counterexample().expect("short usernames exist");
    assert_eq!(counterexample.minimal, User::new("", "", 0));
    assert_eq!(create_username_unpadded(&counterexample.minimal), "0");
    assert!(counterexample.shrink_steps <= 3);
}

#[test]
fn test_injected_length_failure_shrinks_to_minimal_array() {
    init_logging();
    let result = check(
        Gen::array_of(Gen::<i64>::integer(0, 100), 20),
        |xs| xs.len() < 3,
        &Config::default().with_seed(7),
    );

    let counterexample = result.counterexample().expect("long arrays exist");
    assert_eq!(counterexample.minimal, vec![0, 0, 0]);
    assert!(counterexample.original.len() >= 3);
}

#[test]
fn test_parallel_run_matches_sequential() {
    let gen = Gen::array_of(Gen::<i64>::integer(0, 100), 20);
    let config = Config::default().with_seed(7).with_threads(4);

    let sequential = check(gen.clone(), |xs| xs.len() < 3, &config);
    let parallel = check_parallel(gen, |xs| xs.len() < 3, &config);
    assert_eq!(parallel.counterexample(), sequential.counterexample());
}

#[test]
fn test_user_samples_are_reproducible() {
    let seed = Seed::from_u64(2024);
    let first = sample(&User::generate(), 10, seed).unwrap();
    let second = sample(&User::generate(), 10, seed).unwrap();
    assert_eq!(first, second);
}
