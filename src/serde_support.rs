//! Shared deserialization plumbing for the sequence-shaped containers.
//!
//! Sets, multisets and the linear containers all serialize as a plain
//! sequence and rebuild themselves through `Extend`, so they share a single
//! visitor.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{SeqAccess, Visitor};

/// Collects a serialized sequence into any `Default + Extend` container.
pub(crate) struct ExtendVisitor<C, T> {
    expecting: &'static str,
    marker: PhantomData<(C, T)>,
}

impl<C, T> ExtendVisitor<C, T> {
    pub(crate) const fn new(expecting: &'static str) -> Self {
        Self {
            expecting,
            marker: PhantomData,
        }
    }
}

impl<'de, C, T> Visitor<'de> for ExtendVisitor<C, T>
where
    C: Default + Extend<T>,
    T: serde::Deserialize<'de>,
{
    type Value = C;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str(self.expecting)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut container = C::default();
        while let Some(element) = seq.next_element()? {
            container.extend(std::iter::once(element));
        }
        Ok(container)
    }
}

/// Serializes `elements` as a sequence of known length.
pub(crate) fn serialize_elements<'a, S, T, I>(serializer: S, elements: I) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
    T: serde::Serialize + 'a,
    I: ExactSizeIterator<Item = &'a T>,
{
    use serde::ser::SerializeSeq;
    let mut seq = serializer.serialize_seq(Some(elements.len()))?;
    for element in elements {
        seq.serialize_element(element)?;
    }
    seq.end()
}
