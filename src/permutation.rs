//! # Permutations
//!
//! This module provides a `Permutation` struct for representing bijections of a
//! small finite key set, together with the display labels used when the
//! permutation is written out in cycle notation.
//!
//! ## Key Features:
//!
//! - **Representation**: A `Permutation` stores its mapping as an insertion-ordered
//!   map from [`Key`] to [`Key`]. Keys are either indices (`0..n`) or names.
//! - **Construction** (all forms normalize to the same representation):
//!   - Identity permutation: `Permutation::identity(n)`.
//!   - From an image array: `Permutation::from_array(&[...])`.
//!   - From a compact digit string: `Permutation::parse("213")`.
//!   - From explicit pairs: `Permutation::from_mapping([...])`.
//!   - From a dynamically typed value: `Permutation::from_value(&json)`.
//!   - A single swap: `Permutation::transposition(a, b)`.
//! - **Basic Operations**:
//!   - Image and preimage of one key: `p.map(&k)`, `p.inverse(&k)`. Both act as the
//!     identity outside the declared domain.
//!   - Composition: `p.compose(&q)` applies `p` first, then `q`.
//!   - Whole inverse: `p.inverted()`.
//!   - Sign, identity and transposition checks.
//! - **Cycle Utilities**:
//!   - Raw cycles: `p.cycles()`.
//!   - Cached labelled cycle notation: `p.cycle_notation()`.
//!
//! Permutations are never mutated in place except by [`Permutation::set_labels`], which
//! only replaces display labels and refreshes the cached notation.

use std::{borrow::Cow, fmt, str::FromStr};

use ahash::AHashSet;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// An element of a permutation's domain.
///
/// Numeric keys are shown 1-based by default, named keys verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Key {
    Index(usize),
    Name(String),
}

impl Key {
    pub fn index(&self) -> Option<usize> {
        match self {
            Key::Index(i) => Some(*i),
            Key::Name(_) => None,
        }
    }

    /// Reads a key from text: anything that parses as an unsigned integer is an index.
    pub fn from_text(text: &str) -> Self {
        match text.parse::<usize>() {
            Ok(i) => Key::Index(i),
            Err(_) => Key::Name(text.to_string()),
        }
    }

    /// The label used when no explicit label was supplied.
    pub fn default_label(&self) -> String {
        match self {
            Key::Index(i) => (i + 1).to_string(),
            Key::Name(name) => name.clone(),
        }
    }
}

impl From<usize> for Key {
    fn from(i: usize) -> Self {
        Key::Index(i)
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Key::Name(name.to_string())
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Key::Name(name)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Index(i) => write!(f, "{i}"),
            Key::Name(name) => write!(f, "{name}"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PermutationError {
    #[error("cannot build a permutation from a {found}")]
    InvalidArgument { found: &'static str },

    #[error("mapping is not a bijection: {image} is not the image of exactly one key")]
    NotABijection { image: Key },

    #[error("key {key} is mapped more than once")]
    DuplicateKey { key: Key },

    #[error("character {ch:?} at position {position} is not a 1-based digit")]
    InvalidDigit { ch: char, position: usize },
}

/// A bijection of a finite key set, with display labels.
///
/// Equality compares the mappings as functions; key order and labels are ignored.
///
/// # Examples
///
/// ```
/// use pentad::permutation::{Key, Permutation};
///
/// let p = Permutation::from_array(&[1, 0, 2]).unwrap();
/// assert_eq!(p.map(&Key::Index(0)), &Key::Index(1));
/// assert_eq!(p.cycle_notation(), "(1 2)");
/// ```
#[derive(Debug, Clone)]
pub struct Permutation {
    mapping: IndexMap<Key, Key>,
    labels: IndexMap<Key, String>,
    cycle_notation: String,
}

impl PartialEq for Permutation {
    fn eq(&self, other: &Self) -> bool {
        self.mapping == other.mapping
    }
}

impl Eq for Permutation {}

impl Permutation {
    // --------------------------------------------------------------------------------------------
    // Constructors
    // --------------------------------------------------------------------------------------------

    /// Assembles a permutation whose mapping is already known to be a bijection.
    fn from_parts(mapping: IndexMap<Key, Key>, labels: IndexMap<Key, String>) -> Self {
        let mut p = Permutation {
            mapping,
            labels,
            cycle_notation: String::new(),
        };
        p.cycle_notation = p.render_cycles();
        p
    }

    /// Creates the identity permutation on `0..n`.
    ///
    /// ```
    /// # use pentad::permutation::Permutation;
    /// let p = Permutation::identity(4);
    /// assert!(p.is_identity());
    /// assert_eq!(p.len(), 4);
    /// ```
    pub fn identity(n: usize) -> Self {
        Self::from_parts(
            (0..n).map(|i| (Key::Index(i), Key::Index(i))).collect(),
            IndexMap::new(),
        )
    }

    /// Creates a permutation from explicit `(key, image)` pairs, rejecting anything
    /// that is not a bijection of the declared keys.
    pub fn from_mapping<I, K, V>(pairs: I) -> Result<Self, PermutationError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Key>,
        V: Into<Key>,
    {
        let mut mapping = IndexMap::new();
        for (k, v) in pairs {
            let k = k.into();
            if mapping.insert(k.clone(), v.into()).is_some() {
                return Err(PermutationError::DuplicateKey { key: k });
            }
        }

        let mut seen = AHashSet::with_capacity(mapping.len());
        for image in mapping.values() {
            if !mapping.contains_key(image) || !seen.insert(image) {
                return Err(PermutationError::NotABijection {
                    image: image.clone(),
                });
            }
        }

        Ok(Self::from_parts(mapping, IndexMap::new()))
    }

    /// Creates a permutation where position `i` maps to `images[i]`.
    ///
    /// ```
    /// # use pentad::permutation::Permutation;
    /// let p = Permutation::from_array(&[2, 0, 1]).unwrap();
    /// assert_eq!(p.cycle_notation(), "(1 3 2)");
    /// assert!(Permutation::from_array(&[0, 0, 1]).is_err());
    /// ```
    pub fn from_array(images: &[usize]) -> Result<Self, PermutationError> {
        Self::from_mapping(images.iter().copied().enumerate())
    }

    /// Parses the compact form where the character at position `i` is the 1-based
    /// image of `i`. Characters are read as base-36 digits, so `a` stands for 10.
    ///
    /// ```
    /// # use pentad::permutation::Permutation;
    /// let p = Permutation::parse("213").unwrap();
    /// assert_eq!(p, Permutation::from_array(&[1, 0, 2]).unwrap());
    /// ```
    pub fn parse(text: &str) -> Result<Self, PermutationError> {
        let images = text
            .chars()
            .enumerate()
            .map(|(position, ch)| match ch.to_digit(36) {
                Some(d) if d > 0 => Ok(d as usize - 1),
                _ => Err(PermutationError::InvalidDigit { ch, position }),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_array(&images)
    }

    /// Builds a permutation from a dynamically typed value, dispatching on its type:
    /// objects are mappings, arrays are image arrays, strings use the compact form
    /// and non-negative integers give the identity.
    ///
    /// ```
    /// # use pentad::permutation::{Permutation, PermutationError};
    /// use serde_json::json;
    ///
    /// let p = Permutation::from_value(&json!({"0": 1, "1": 0})).unwrap();
    /// assert_eq!(p.cycle_notation(), "(1 2)");
    /// assert_eq!(
    ///     Permutation::from_value(&json!(true)),
    ///     Err(PermutationError::InvalidArgument { found: "boolean" })
    /// );
    /// ```
    pub fn from_value(value: &Value) -> Result<Self, PermutationError> {
        match value {
            Value::Object(map) => Self::from_mapping(
                map.iter()
                    .map(|(k, v)| Ok((Key::from_text(k), key_from_value(v)?)))
                    .collect::<Result<Vec<_>, PermutationError>>()?,
            ),
            Value::Array(items) => {
                let images = items
                    .iter()
                    .map(|v| {
                        v.as_u64()
                            .map(|i| i as usize)
                            .ok_or(PermutationError::InvalidArgument {
                                found: value_type_name(v),
                            })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Self::from_array(&images)
            }
            Value::String(text) => Self::parse(text),
            Value::Number(n) => n
                .as_u64()
                .map(|n| Self::identity(n as usize))
                .ok_or(PermutationError::InvalidArgument {
                    found: value_type_name(value),
                }),
            Value::Bool(_) | Value::Null => Err(PermutationError::InvalidArgument {
                found: value_type_name(value),
            }),
        }
    }

    /// The permutation swapping indices `a` and `b`, declared on `{a, b}` only.
    pub fn transposition(a: usize, b: usize) -> Self {
        Self::swapping(Key::Index(a), Key::Index(b))
    }

    /// The permutation swapping two arbitrary keys, declared on `{a, b}` only.
    pub fn swapping(a: Key, b: Key) -> Self {
        let mut mapping = IndexMap::new();
        mapping.insert(a.clone(), b.clone());
        mapping.insert(b, a);
        Self::from_parts(mapping, IndexMap::new())
    }

    /// A copy with the same mapping and default labels.
    pub fn copy(&self) -> Self {
        Self::from_parts(self.mapping.clone(), IndexMap::new())
    }

    /// Replaces the display labels, leaving the mapping untouched.
    pub fn set_labels<I, K, S>(&mut self, labels: I)
    where
        I: IntoIterator<Item = (K, S)>,
        K: Into<Key>,
        S: Into<String>,
    {
        self.labels = labels
            .into_iter()
            .map(|(k, s)| (k.into(), s.into()))
            .collect();
        self.cycle_notation = self.render_cycles();
    }

    pub fn with_labels<I, K, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = (K, S)>,
        K: Into<Key>,
        S: Into<String>,
    {
        self.set_labels(labels);
        self
    }

    // --------------------------------------------------------------------------------------------
    // Accessors
    // --------------------------------------------------------------------------------------------

    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }

    /// Declared keys, in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.mapping.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Key, &Key)> {
        self.mapping.iter()
    }

    pub fn contains(&self, key: &Key) -> bool {
        self.mapping.contains_key(key)
    }

    /// Display label of `key`, falling back to [`Key::default_label`].
    pub fn label(&self, key: &Key) -> Cow<'_, str> {
        match self.labels.get(key) {
            Some(label) => Cow::Borrowed(label.as_str()),
            None => Cow::Owned(key.default_label()),
        }
    }

    pub fn labels(&self) -> &IndexMap<Key, String> {
        &self.labels
    }

    // --------------------------------------------------------------------------------------------
    // Basic Operations
    // --------------------------------------------------------------------------------------------

    /// Image of `value`, or `value` itself when it is not a declared key.
    pub fn map<'a>(&'a self, value: &'a Key) -> &'a Key {
        self.mapping.get(value).unwrap_or(value)
    }

    /// Preimage of `value` by linear search, or `value` itself when nothing maps to it.
    pub fn inverse<'a>(&'a self, value: &'a Key) -> &'a Key {
        self.mapping
            .iter()
            .find(|(_, image)| *image == value)
            .map(|(k, _)| k)
            .unwrap_or(value)
    }

    /// Index form of [`Permutation::map`]. Named images leave the index fixed.
    pub fn map_index(&self, i: usize) -> usize {
        self.map(&Key::Index(i)).index().unwrap_or(i)
    }

    /// Index form of [`Permutation::inverse`]. Named preimages leave the index fixed.
    pub fn inverse_index(&self, i: usize) -> usize {
        self.inverse(&Key::Index(i)).index().unwrap_or(i)
    }

    /// Composes `self` with `other`, applying `self` first: the result sends `k` to
    /// `other.map(self.map(k))`.
    ///
    /// Keys declared only by `other` keep their image under `other`, so the result is
    /// total on the union of both domains. Labels are taken from `other`.
    ///
    /// ```
    /// # use pentad::permutation::Permutation;
    /// let p = Permutation::identity(3).compose(&Permutation::transposition(0, 1));
    /// assert_eq!(p, Permutation::from_array(&[1, 0, 2]).unwrap());
    /// ```
    pub fn compose(&self, other: &Self) -> Self {
        let mut mapping = IndexMap::with_capacity(self.mapping.len().max(other.mapping.len()));
        for (k, v) in &self.mapping {
            mapping.insert(k.clone(), other.map(v).clone());
        }
        for (k, v) in &other.mapping {
            if !self.mapping.contains_key(k) {
                mapping.insert(k.clone(), v.clone());
            }
        }
        Self::from_parts(mapping, other.labels.clone())
    }

    /// The inverse permutation, keeping labels.
    pub fn inverted(&self) -> Self {
        Self::from_parts(
            self.mapping
                .iter()
                .map(|(k, v)| (v.clone(), k.clone()))
                .collect(),
            self.labels.clone(),
        )
    }

    pub fn is_identity(&self) -> bool {
        self.mapping.iter().all(|(k, v)| k == v)
    }

    /// The swapped pair if `self` is exactly one 2-cycle.
    pub fn as_transposition(&self) -> Option<(&Key, &Key)> {
        let moved: Vec<_> = self.mapping.iter().filter(|(k, v)| k != v).collect();
        match moved.as_slice() {
            [(a, b), (c, d)] if a == d && b == c => Some((*a, *b)),
            _ => None,
        }
    }

    /// Returns `1` for even permutations and `-1` for odd ones.
    pub fn sign(&self) -> i8 {
        let swaps: usize = self.cycles().iter().map(|c| c.len() - 1).sum();
        if swaps % 2 == 0 {
            1
        } else {
            -1
        }
    }

    // --------------------------------------------------------------------------------------------
    // Cycles
    // --------------------------------------------------------------------------------------------

    /// Disjoint cycles of length at least two.
    ///
    /// Keys are scanned in insertion order; each cycle starts at the first key of it
    /// met during the scan.
    ///
    /// ```
    /// # use pentad::permutation::{Key, Permutation};
    /// let p = Permutation::from_array(&[2, 0, 1, 3]).unwrap();
    /// assert_eq!(p.cycles(), vec![vec![Key::Index(0), Key::Index(2), Key::Index(1)]]);
    /// ```
    pub fn cycles(&self) -> Vec<Vec<Key>> {
        let mut visited = AHashSet::with_capacity(self.mapping.len());
        let mut cycles = Vec::new();
        for start in self.mapping.keys() {
            let mut cycle = Vec::new();
            let mut current = start;
            while visited.insert(current) {
                cycle.push(current.clone());
                current = self.map(current);
            }
            if cycle.len() > 1 {
                cycles.push(cycle);
            }
        }
        cycles
    }

    /// Cached cycle notation over labels; the identity renders as the empty string.
    pub fn cycle_notation(&self) -> &str {
        &self.cycle_notation
    }

    fn render_cycles(&self) -> String {
        let mut out = String::new();
        for cycle in self.cycles() {
            out.push('(');
            for (i, key) in cycle.iter().enumerate() {
                if i > 0 {
                    out.push(' ');
                }
                out.push_str(&self.label(key));
            }
            out.push(')');
        }
        out
    }
}

fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "fractional number",
        Value::Number(n) if n.is_i64() && !n.is_u64() => "negative number",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn key_from_value(value: &Value) -> Result<Key, PermutationError> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .map(|i| Key::Index(i as usize))
            .ok_or(PermutationError::InvalidArgument {
                found: value_type_name(value),
            }),
        Value::String(text) => Ok(Key::from_text(text)),
        other => Err(PermutationError::InvalidArgument {
            found: value_type_name(other),
        }),
    }
}

impl FromStr for Permutation {
    type Err = PermutationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&Value> for Permutation {
    type Error = PermutationError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

impl fmt::Display for Permutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // First show cycle notation
        if self.cycle_notation.is_empty() {
            write!(f, "()")?;
        } else {
            write!(f, "{}", self.cycle_notation)?;
        }

        // Then show one-line notation
        write!(f, " [")?;
        for (i, image) in self.mapping.values().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", self.label(image))?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn mapping_of(p: &Permutation) -> Vec<(Key, Key)> {
        p.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }

    #[test]
    fn array_form() {
        let p = Permutation::from_array(&[1, 0, 2]).unwrap();
        assert_eq!(
            mapping_of(&p),
            vec![
                (Key::Index(0), Key::Index(1)),
                (Key::Index(1), Key::Index(0)),
                (Key::Index(2), Key::Index(2)),
            ]
        );
        assert_eq!(p.cycle_notation(), "(1 2)");
    }

    #[test]
    fn string_form_matches_array_form() {
        let p = Permutation::parse("213").unwrap();
        assert_eq!(p, Permutation::from_array(&[1, 0, 2]).unwrap());
        assert_eq!("213".parse::<Permutation>().unwrap(), p);
    }

    #[test]
    fn identity_composed_with_partial_swap() {
        let swap = Permutation::from_mapping([(0usize, 1usize), (1, 0)]).unwrap();
        let p = Permutation::identity(3).compose(&swap);
        assert_eq!(p, Permutation::from_array(&[1, 0, 2]).unwrap());
        assert_eq!(p.len(), 3);
    }

    #[test]
    fn compose_fills_keys_only_other_declares() {
        let p = Permutation::transposition(0, 1);
        let q = Permutation::from_array(&[0, 2, 3, 1]).unwrap();
        let pq = p.compose(&q);
        // 0 -> 1 -> 2, 1 -> 0 -> 0, then q's own keys 2 -> 3, 3 -> 1
        assert_eq!(pq, Permutation::from_array(&[2, 0, 3, 1]).unwrap());
        assert_eq!(
            pq.keys().cloned().collect::<Vec<_>>(),
            vec![Key::Index(0), Key::Index(1), Key::Index(2), Key::Index(3)]
        );
    }

    #[test]
    fn compose_takes_labels_from_right_operand() {
        let p = Permutation::identity(2).with_labels([(0usize, "x"), (1, "y")]);
        let q = Permutation::transposition(0, 1).with_labels([(0usize, "a"), (1, "b")]);
        assert_eq!(p.compose(&q).cycle_notation(), "(a b)");
        assert_eq!(q.compose(&p).cycle_notation(), "(x y)");
    }

    #[test]
    fn object_form_and_named_keys() {
        let p = Permutation::from_value(&json!({"a": "b", "b": "c", "c": "a"})).unwrap();
        assert_eq!(p.cycle_notation(), "(a b c)");
        assert_eq!(p.map(&Key::from("a")), &Key::from("b"));
        assert_eq!(p.inverse(&Key::from("a")), &Key::from("c"));
    }

    #[test]
    fn value_forms_normalize() {
        let expected = Permutation::from_array(&[1, 0, 2]).unwrap();
        assert_eq!(Permutation::from_value(&json!([1, 0, 2])).unwrap(), expected);
        assert_eq!(Permutation::from_value(&json!("213")).unwrap(), expected);
        assert_eq!(
            Permutation::from_value(&json!({"0": 1, "1": 0, "2": 2})).unwrap(),
            expected
        );
        assert_eq!(
            Permutation::from_value(&json!(3)).unwrap(),
            Permutation::identity(3)
        );
    }

    #[test]
    fn unsupported_value_types_are_rejected() {
        assert_eq!(
            Permutation::from_value(&json!(null)),
            Err(PermutationError::InvalidArgument { found: "null" })
        );
        assert_eq!(
            Permutation::from_value(&json!(false)),
            Err(PermutationError::InvalidArgument { found: "boolean" })
        );
        assert_eq!(
            Permutation::from_value(&json!(-2)),
            Err(PermutationError::InvalidArgument {
                found: "negative number"
            })
        );
        assert_eq!(
            Permutation::from_value(&json!([0, true])),
            Err(PermutationError::InvalidArgument { found: "boolean" })
        );
    }

    #[test]
    fn non_bijections_are_rejected() {
        assert_eq!(
            Permutation::from_array(&[0, 0]),
            Err(PermutationError::NotABijection {
                image: Key::Index(0)
            })
        );
        assert_eq!(
            Permutation::from_array(&[0, 2]),
            Err(PermutationError::NotABijection {
                image: Key::Index(2)
            })
        );
        assert_eq!(
            Permutation::parse("1x"),
            Err(PermutationError::NotABijection {
                image: Key::Index(32)
            })
        );
        assert_eq!(
            Permutation::from_mapping([("a", "b"), ("a", "a"), ("b", "a")]),
            Err(PermutationError::DuplicateKey { key: Key::from("a") })
        );
        assert_eq!(
            Permutation::parse("1-"),
            Err(PermutationError::InvalidDigit {
                ch: '-',
                position: 1
            })
        );
    }

    #[test]
    fn out_of_domain_lookups_are_identity() {
        let p = Permutation::from_array(&[1, 0]).unwrap();
        assert_eq!(p.map(&Key::Index(7)), &Key::Index(7));
        assert_eq!(p.inverse(&Key::Index(7)), &Key::Index(7));
        assert_eq!(p.map(&Key::from("z")), &Key::from("z"));
        assert_eq!(p.map_index(5), 5);
        assert_eq!(p.inverse_index(5), 5);
    }

    #[test]
    fn cycle_notation_scan_order() {
        let p = Permutation::from_array(&[3, 2, 1, 4, 0, 5]).unwrap();
        // 0 -> 3 -> 4 -> 0, then 1 -> 2 -> 1, 5 fixed
        assert_eq!(p.cycle_notation(), "(1 4 5)(2 3)");
        insta::assert_snapshot!(p.to_string(), @"(1 4 5)(2 3) [4 3 2 5 1 6]");
        assert_eq!(Permutation::identity(4).cycle_notation(), "");
        assert_eq!(Permutation::identity(4).to_string(), "() [1 2 3 4]");
    }

    #[test]
    fn set_labels_refreshes_notation() {
        let mut p = Permutation::from_array(&[1, 2, 0]).unwrap();
        assert_eq!(p.cycle_notation(), "(1 2 3)");
        p.set_labels([(0usize, "a"), (1, "b"), (2, "c")]);
        assert_eq!(p.cycle_notation(), "(a b c)");
        assert_eq!(p.copy().cycle_notation(), "(1 2 3)");
        assert_eq!(p.copy(), p);
    }

    #[test]
    fn transposition_queries() {
        let t = Permutation::transposition(2, 4);
        assert_eq!(t.as_transposition(), Some((&Key::Index(2), &Key::Index(4))));
        assert_eq!(t.sign(), -1);
        let c = Permutation::from_array(&[1, 2, 0]).unwrap();
        assert_eq!(c.as_transposition(), None);
        assert_eq!(c.sign(), 1);
        assert!(c.compose(&c.inverted()).is_identity());
    }

    fn arb_permutation(n: usize) -> impl Strategy<Value = Permutation> {
        Just((0..n).collect::<Vec<usize>>())
            .prop_shuffle()
            .prop_map(|images| Permutation::from_array(&images).unwrap())
    }

    /// Rebuilds a permutation of `0..n` from a notation string over default labels.
    fn from_notation(n: usize, notation: &str) -> Permutation {
        let mut images: Vec<usize> = (0..n).collect();
        for cycle in notation
            .split(')')
            .map(|c| c.trim_start_matches('('))
            .filter(|c| !c.is_empty())
        {
            let members: Vec<usize> = cycle
                .split(' ')
                .map(|label| label.parse::<usize>().unwrap() - 1)
                .collect();
            for (i, &m) in members.iter().enumerate() {
                images[m] = members[(i + 1) % members.len()];
            }
        }
        Permutation::from_array(&images).unwrap()
    }

    proptest! {
        #[test]
        fn identity_is_neutral(p in arb_permutation(6)) {
            let id = Permutation::identity(6);
            prop_assert_eq!(p.compose(&id), p.clone());
            prop_assert_eq!(id.compose(&p), p);
        }

        #[test]
        fn composition_is_associative(
            p in arb_permutation(6),
            q in arb_permutation(6),
            r in arb_permutation(6),
        ) {
            prop_assert_eq!(p.compose(&q).compose(&r), p.compose(&q.compose(&r)));
        }

        #[test]
        fn associativity_over_mixed_domains(
            p in arb_permutation(6),
            a in 0usize..6,
            b in 0usize..6,
        ) {
            let t = Permutation::transposition(a, b);
            prop_assert_eq!(t.compose(&p).compose(&t), t.compose(&p.compose(&t)));
        }

        #[test]
        fn map_and_inverse_are_mutual_inverses(p in arb_permutation(6)) {
            for k in p.keys() {
                prop_assert_eq!(p.inverse(p.map(k)), k);
            }
        }

        #[test]
        fn notation_round_trips(p in arb_permutation(6)) {
            prop_assert_eq!(from_notation(6, p.cycle_notation()), p);
        }
    }
}
