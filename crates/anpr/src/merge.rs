//! Field-by-field struct decoding with last-wins semantics.
//!
//! Derived `Deserialize` impls reject a repeated element as a duplicate field
//! and expect list items to be adjacent. Firmware does neither reliably, so
//! the schema structs decode through [`Merge`] instead: every child element is
//! folded into the value already built.
//!
//! - a repeated leaf overwrites the earlier one
//! - a repeated nested element merges into the existing struct
//! - list items are appended wherever they appear among their siblings
//! - unknown children are skipped
use std::fmt;

use serde::de::{DeserializeSeed, IgnoredAny, MapAccess, Visitor};

use crate::lenient;

/// A struct whose children can be folded in one element at a time.
pub(crate) trait MergeFields: Default {
    const NAME: &'static str;
    const FIELDS: &'static [&'static str];

    /// Fold the value of `key` into `self`. Unknown keys consume and drop
    /// their value.
    fn merge_field<'de, A>(&mut self, key: &str, map: &mut A) -> Result<(), A::Error>
    where
        A: MapAccess<'de>;
}

/// How a single field absorbs the next value for its element.
pub(crate) trait Leaf {
    fn absorb<'de, A>(&mut self, map: &mut A) -> Result<(), A::Error>
    where
        A: MapAccess<'de>;
}

impl Leaf for String {
    fn absorb<'de, A>(&mut self, map: &mut A) -> Result<(), A::Error>
    where
        A: MapAccess<'de>,
    {
        *self = map.next_value()?;
        Ok(())
    }
}

impl Leaf for i32 {
    fn absorb<'de, A>(&mut self, map: &mut A) -> Result<(), A::Error>
    where
        A: MapAccess<'de>,
    {
        *self = map.next_value::<lenient::Int<i32>>()?.0;
        Ok(())
    }
}

impl Leaf for bool {
    fn absorb<'de, A>(&mut self, map: &mut A) -> Result<(), A::Error>
    where
        A: MapAccess<'de>,
    {
        *self = map.next_value::<lenient::Flag>()?.0;
        Ok(())
    }
}

impl<T: MergeFields> Leaf for Option<T> {
    fn absorb<'de, A>(&mut self, map: &mut A) -> Result<(), A::Error>
    where
        A: MapAccess<'de>,
    {
        map.next_value_seed(Merge(self.get_or_insert_with(T::default)))
    }
}

impl<T: MergeFields> Leaf for Vec<T> {
    fn absorb<'de, A>(&mut self, map: &mut A) -> Result<(), A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut item = T::default();
        map.next_value_seed(Merge(&mut item))?;
        self.push(item);
        Ok(())
    }
}

/// Seed that decodes an element into an existing value.
pub(crate) struct Merge<'a, T>(pub(crate) &'a mut T);

impl<'de, T: MergeFields> DeserializeSeed<'de> for Merge<'_, T> {
    type Value = ();

    fn deserialize<D>(self, deserializer: D) -> Result<(), D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_struct(T::NAME, T::FIELDS, MergeVisitor(self.0))
    }
}

struct MergeVisitor<'a, T>(&'a mut T);

impl<'de, T: MergeFields> Visitor<'de> for MergeVisitor<'_, T> {
    type Value = ();

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "element <{}>", T::NAME)
    }

    fn visit_map<A>(self, mut map: A) -> Result<(), A::Error>
    where
        A: MapAccess<'de>,
    {
        while let Some(key) = map.next_key::<String>()? {
            self.0.merge_field(&key, &mut map)?;
        }
        Ok(())
    }

    // `<vehicleInfo></vehicleInfo>` and friends arrive as empty text
    fn visit_str<E>(self, _value: &str) -> Result<(), E>
    where
        E: serde::de::Error,
    {
        Ok(())
    }

    fn visit_unit<E>(self) -> Result<(), E>
    where
        E: serde::de::Error,
    {
        Ok(())
    }
}

/// Skip the value of a key nobody asked for.
pub(crate) fn skip<'de, A>(map: &mut A) -> Result<(), A::Error>
where
    A: MapAccess<'de>,
{
    map.next_value::<IgnoredAny>()?;
    Ok(())
}

/// Implement [`MergeFields`], [`Leaf`] and `Deserialize` for a schema struct
/// from its element-name to field table.
macro_rules! xml_fields {
    ($ty:ident, $name:literal { $($element:literal => $field:ident),* $(,)? }) => {
        impl $crate::merge::MergeFields for $ty {
            const NAME: &'static str = $name;
            const FIELDS: &'static [&'static str] = &[$($element),*];

            fn merge_field<'de, A>(&mut self, key: &str, map: &mut A) -> Result<(), A::Error>
            where
                A: serde::de::MapAccess<'de>,
            {
                match key {
                    $($element => $crate::merge::Leaf::absorb(&mut self.$field, map),)*
                    _ => $crate::merge::skip(map),
                }
            }
        }

        impl $crate::merge::Leaf for $ty {
            fn absorb<'de, A>(&mut self, map: &mut A) -> Result<(), A::Error>
            where
                A: serde::de::MapAccess<'de>,
            {
                map.next_value_seed($crate::merge::Merge(self))
            }
        }

        impl<'de> serde::Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let mut value = Self::default();
                serde::de::DeserializeSeed::deserialize(
                    $crate::merge::Merge(&mut value),
                    deserializer,
                )?;
                Ok(value)
            }
        }
    };
}

pub(crate) use xml_fields;
