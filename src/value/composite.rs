//! Sequence and mapping fields, split on fixed delimiters.
//!
//! Entries are separated by `,` and mapping keys from values by the first `=`.
//! There is no escaping and no whitespace trimming: `"a, b"` yields the
//! elements `"a"` and `" b"`.

use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

use super::{CoerceError, FieldKind, Scalar};

const ENTRY_DELIMITER: char = ',';
const PAIR_DELIMITER: char = '=';

/// Splits `text` into elements and coerces each one.
///
/// Empty text is one empty element, not an empty sequence, so an integer
/// sequence bound to empty text fails.
pub fn parse_sequence<T: Scalar>(text: &str) -> Result<Vec<T>, CoerceError> {
    text.split(ENTRY_DELIMITER).map(T::coerce).collect()
}

/// Splits `text` into `key=value` entries and coerces both halves.
///
/// Only the first `=` separates: in `a=1=2` the value literal is `1=2`.
/// A repeated key keeps the last value.
pub fn parse_mapping<K, V, M>(text: &str) -> Result<M, CoerceError>
where
    K: Scalar,
    V: Scalar,
    M: FromIterator<(K, V)>,
{
    text.split(ENTRY_DELIMITER)
        .map(|entry| {
            let (key, value) = entry
                .split_once(PAIR_DELIMITER)
                .ok_or_else(|| CoerceError::MalformedEntry(entry.to_string()))?;
            Ok((K::coerce(key)?, V::coerce(value)?))
        })
        .collect()
}

/// A type a destination field may be declared with.
///
/// Implemented for every [`Scalar`], for `Vec` of scalars, and for `HashMap`
/// and `BTreeMap` from scalar to scalar. Other types can opt in with
/// [`FieldKind::Other`] to be accepted but left untouched by binding.
pub trait FieldValue: Sized {
    const KIND: FieldKind;

    fn from_text(_text: &str) -> Result<Self, CoerceError> {
        Err(CoerceError::UnsupportedKind(Self::KIND.to_string()))
    }
}

macro_rules! impl_scalar_field {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FieldValue for $ty {
                const KIND: FieldKind = FieldKind::Scalar(<$ty as Scalar>::KIND);

                fn from_text(text: &str) -> Result<Self, CoerceError> {
                    <$ty as Scalar>::coerce(text)
                }
            }
        )*
    };
}

impl_scalar_field!(
    String, bool, isize, i8, i16, i32, i64, usize, u8, u16, u32, u64, f32, f64,
);

impl<T: Scalar> FieldValue for Vec<T> {
    const KIND: FieldKind = FieldKind::Sequence(T::KIND);

    fn from_text(text: &str) -> Result<Self, CoerceError> {
        parse_sequence(text)
    }
}

impl<K, V, S> FieldValue for HashMap<K, V, S>
where
    K: Scalar + Eq + Hash,
    V: Scalar,
    S: BuildHasher + Default,
{
    const KIND: FieldKind = FieldKind::Mapping {
        key: K::KIND,
        value: V::KIND,
    };

    fn from_text(text: &str) -> Result<Self, CoerceError> {
        parse_mapping(text)
    }
}

impl<K, V> FieldValue for BTreeMap<K, V>
where
    K: Scalar + Ord,
    V: Scalar,
{
    const KIND: FieldKind = FieldKind::Mapping {
        key: K::KIND,
        value: V::KIND,
    };

    fn from_text(text: &str) -> Result<Self, CoerceError> {
        parse_mapping(text)
    }
}
