//! Dynamically shaped values: named-field records and the "anything"
//! generator.

use crate::{error::*, gen::Gen, tree::Tree};
use std::collections::HashSet;
use std::fmt;

/// Longest array or record drawn by [`Gen::anything`].
const ANY_MAX_LEN: usize = 5;

/// Longest string drawn by [`Gen::anything`].
const ANY_STRING_LEN: usize = 10;

/// Longest record key drawn by [`Gen::anything`].
const ANY_KEY_LEN: usize = 4;

/// A value from a small closed set of shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(i64),
    Str(String),
    Array(Vec<Value>),
    Record(Record),
}

impl Value {
    /// Whether this is an array.
    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// The elements, if this is an array.
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// The record, if this is one.
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Nesting depth: scalars are 0, containers one more than their deepest
    /// child.
    pub fn depth(&self) -> usize {
        match self {
            Value::Array(items) => 1 + items.iter().map(Value::depth).max().unwrap_or(0),
            Value::Record(record) => {
                1 + record.values().map(Value::depth).max().unwrap_or(0)
            }
            _ => 0,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::Str(s) => write!(f, "{s:?}"),
            Value::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Record(record) => write!(f, "{record}"),
        }
    }
}

/// Named fields in declaration order. Names are unique.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Record {
    fields: Vec<(String, Value)>,
}

impl Record {
    /// Build a record, keeping the first occurrence of each name.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        let mut seen = HashSet::new();
        let fields = pairs
            .into_iter()
            .filter(|(name, _)| seen.insert(name.clone()))
            .collect();
        Record { fields }
    }

    /// Look up a field by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    /// Field names in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// Field values in declaration order.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.fields.iter().map(|(_, value)| value)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (name, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name}: {value}")?;
        }
        write!(f, "}}")
    }
}

impl Gen<Record> {
    /// Generate a record with exactly the given fields.
    ///
    /// Fields are drawn in the order given; shrinking simplifies exactly one
    /// field per step while holding the others fixed. Duplicate names fail
    /// the draw.
    pub fn record_of<N>(fields: Vec<(N, Gen<Value>)>) -> Self
    where
        N: Into<String>,
    {
        let (names, generators): (Vec<String>, Vec<Gen<Value>>) = fields
            .into_iter()
            .map(|(name, gen)| (name.into(), gen))
            .unzip();

        let mut seen = HashSet::new();
        let duplicate = names.iter().find(|name| !seen.insert(name.as_str())).cloned();

        Gen::new(move |seed| {
            if let Some(name) = &duplicate {
                return Err(Error::InvalidGenerator {
                    message: format!("record field {name:?} declared twice"),
                });
            }

            let mut seed = seed;
            let mut trees = Vec::with_capacity(generators.len());
            for gen in &generators {
                let (tree, next) = gen.draw(seed)?;
                trees.push(tree);
                seed = next;
            }

            let names = names.clone();
            let tree = Tree::sequence(trees).map(move |values| Record {
                fields: names.iter().cloned().zip(values).collect(),
            });
            Ok((tree, seed))
        })
    }
}

impl Gen<Value> {
    /// Generate `Value::Null`.
    pub fn null() -> Self {
        Gen::constant(Value::Null)
    }

    /// Generate values of any shape, nested at most `depth` levels.
    ///
    /// Shrinks toward the simpler shapes first, `Null` being simplest.
    pub fn anything(depth: usize) -> Self {
        let mut shapes = vec![
            Gen::null(),
            Gen::boolean().map(Value::Bool),
            Gen::<i64>::integer(i32::MIN as i64, i32::MAX as i64).map(Value::Number),
            Gen::<String>::string(ANY_STRING_LEN).map(Value::Str),
        ];

        if depth > 0 {
            let inner = Gen::anything(depth - 1);
            shapes.push(Gen::array_of(inner.clone(), ANY_MAX_LEN).map(Value::Array));
            shapes.push(
                Gen::array_of(Gen::zip(Gen::<String>::string(ANY_KEY_LEN), inner), ANY_MAX_LEN)
                    .map(|pairs| Value::Record(Record::from_pairs(pairs))),
            );
        }

        Gen::one_of(shapes)
    }
}
