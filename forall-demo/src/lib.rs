//! Small pure functions whose invariants are checked with forall.
//!
//! - [`reverse_list`]: length-preserving and its own inverse.
//! - [`create_username`]: always exactly eight characters.
//! - [`create_username_unpadded`]: the same without padding, which breaks
//!   the eight-character invariant.
//! - [`uri`]: `encodeURI`/`decodeURI`-style coding that round-trips usernames.

pub mod uri;

pub use uri::{decode_uri, encode_uri, UriError};

use forall::Generate;

/// Reverse a slice into a new vector.
pub fn reverse_list<A: Clone>(items: &[A]) -> Vec<A> {
    items.iter().rev().cloned().collect()
}

/// A user record. Names are arbitrary printable strings, the age any `i32`.
#[derive(Generate, Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub firstname: String,
    pub surname: String,
    pub age: i32,
}

impl User {
    pub fn new(firstname: &str, surname: &str, age: i32) -> Self {
        User {
            firstname: firstname.to_string(),
            surname: surname.to_string(),
            age,
        }
    }
}

/// Width of the firstname part of a username.
const FIRSTNAME_WIDTH: usize = 1;
/// Width of the surname part of a username.
const SURNAME_WIDTH: usize = 5;
/// Width of the age part of a username.
const AGE_WIDTH: usize = 2;

/// Total username length produced by [`create_username`].
pub const USERNAME_LEN: usize = FIRSTNAME_WIDTH + SURNAME_WIDTH + AGE_WIDTH;

/// Build an eight-character username.
///
/// One character of the firstname and five of the surname, right-padded
/// with `-`, then the first two characters of the age, left-padded with `0`.
pub fn create_username(user: &User) -> String {
    let first = pad_end(prefix(&user.firstname, FIRSTNAME_WIDTH), FIRSTNAME_WIDTH, '-');
    let sur = pad_end(prefix(&user.surname, SURNAME_WIDTH), SURNAME_WIDTH, '-');
    let age = pad_start(prefix(&user.age.to_string(), AGE_WIDTH), AGE_WIDTH, '0');
    format!("{first}{sur}{age}")
}

/// Build a username without padding.
///
/// Deliberately broken: short names and single-digit ages give usernames
/// shorter than [`USERNAME_LEN`].
pub fn create_username_unpadded(user: &User) -> String {
    let first = prefix(&user.firstname, FIRSTNAME_WIDTH);
    let sur = prefix(&user.surname, SURNAME_WIDTH);
    let age = prefix(&user.age.to_string(), AGE_WIDTH);
    format!("{first}{sur}{age}")
}

/// The first `len` characters of `s`.
fn prefix(s: &str, len: usize) -> String {
    s.chars().take(len).collect()
}

fn pad_end(mut s: String, width: usize, fill: char) -> String {
    let missing = width.saturating_sub(s.chars().count());
    s.extend(std::iter::repeat(fill).take(missing));
    s
}

fn pad_start(s: String, width: usize, fill: char) -> String {
    let missing = width.saturating_sub(s.chars().count());
    let mut padded: String = std::iter::repeat(fill).take(missing).collect();
    padded.push_str(&s);
    padded
}
