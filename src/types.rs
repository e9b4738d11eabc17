//! Field descriptors shared by the derive macro and the binder.
//!
//! Every `#[derive(Bind)]` record carries a `'static` table of [`FieldSpec`]s
//! in declaration order. Leaf entries name their source key and a function
//! that resolves the field's [`FieldKind`]; nested entries name their key
//! prefix and point at the nested record's own table.

use std::any::{Any, TypeId};

use chrono::{DateTime, TimeDelta, Utc};

/// The semantic kind of a leaf field, keyed by its exact Rust type.
///
/// Each kind maps to exactly one getter on [`ValueSource`](crate::ValueSource).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Text,
    Int32,
    Int64,
    Uint32,
    Uint64,
    Bool,
    Float64,
    Duration,
    /// A value-shaped `DateTime<Utc>`.
    Timestamp,
    /// An `Option<DateTime<Utc>>`; stays `None` when the source has no value.
    OptionalTimestamp,
    TextSeq,
    Int32Seq,
    Int64Seq,
    Uint32Seq,
    Uint64Seq,
    Float64Seq,
}

impl FieldKind {
    /// Resolve the kind of `T`, or `None` if `T` is not a supported leaf type.
    pub fn of<T: Any>() -> Option<Self> {
        Self::from_type_id(TypeId::of::<T>())
    }

    pub fn from_type_id(id: TypeId) -> Option<Self> {
        let table = [
            (TypeId::of::<String>(), FieldKind::Text),
            (TypeId::of::<i32>(), FieldKind::Int32),
            (TypeId::of::<i64>(), FieldKind::Int64),
            (TypeId::of::<u32>(), FieldKind::Uint32),
            (TypeId::of::<u64>(), FieldKind::Uint64),
            (TypeId::of::<bool>(), FieldKind::Bool),
            (TypeId::of::<f64>(), FieldKind::Float64),
            (TypeId::of::<TimeDelta>(), FieldKind::Duration),
            (TypeId::of::<DateTime<Utc>>(), FieldKind::Timestamp),
            (
                TypeId::of::<Option<DateTime<Utc>>>(),
                FieldKind::OptionalTimestamp,
            ),
            (TypeId::of::<Vec<String>>(), FieldKind::TextSeq),
            (TypeId::of::<Vec<i32>>(), FieldKind::Int32Seq),
            (TypeId::of::<Vec<i64>>(), FieldKind::Int64Seq),
            (TypeId::of::<Vec<u32>>(), FieldKind::Uint32Seq),
            (TypeId::of::<Vec<u64>>(), FieldKind::Uint64Seq),
            (TypeId::of::<Vec<f64>>(), FieldKind::Float64Seq),
        ];
        table
            .into_iter()
            .find(|(type_id, _)| *type_id == id)
            .map(|(_, kind)| kind)
    }

    /// Whether this kind binds a homogeneous sequence.
    pub fn is_seq(self) -> bool {
        matches!(
            self,
            FieldKind::TextSeq
                | FieldKind::Int32Seq
                | FieldKind::Int64Seq
                | FieldKind::Uint32Seq
                | FieldKind::Uint64Seq
                | FieldKind::Float64Seq
        )
    }
}

/// One field of a record shape, as declared.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// The Rust field name.
    pub name: &'static str,
    pub binding: Binding,
}

/// How a field is resolved: a leaf bound to a source key, or a nested record.
#[derive(Debug, Clone, Copy)]
pub enum Binding {
    Key {
        key: &'static str,
        kind: fn() -> Option<FieldKind>,
    },
    Nested {
        prefix: &'static str,
        fields: fn() -> &'static [FieldSpec],
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_kinds_resolve() {
        assert_eq!(FieldKind::of::<String>(), Some(FieldKind::Text));
        assert_eq!(FieldKind::of::<i32>(), Some(FieldKind::Int32));
        assert_eq!(FieldKind::of::<u64>(), Some(FieldKind::Uint64));
        assert_eq!(FieldKind::of::<f64>(), Some(FieldKind::Float64));
        assert_eq!(FieldKind::of::<TimeDelta>(), Some(FieldKind::Duration));
    }

    #[test]
    fn timestamp_shapes_are_distinct() {
        assert_eq!(FieldKind::of::<DateTime<Utc>>(), Some(FieldKind::Timestamp));
        assert_eq!(
            FieldKind::of::<Option<DateTime<Utc>>>(),
            Some(FieldKind::OptionalTimestamp)
        );
    }

    #[test]
    fn sequence_kinds_match_exact_element_type() {
        assert_eq!(FieldKind::of::<Vec<i64>>(), Some(FieldKind::Int64Seq));
        assert!(FieldKind::of::<Vec<i64>>().unwrap().is_seq());
        assert_eq!(FieldKind::of::<Vec<u8>>(), None);
        assert_eq!(FieldKind::of::<Vec<bool>>(), None);
    }

    #[test]
    fn unsupported_types_have_no_kind() {
        assert_eq!(FieldKind::of::<u8>(), None);
        assert_eq!(FieldKind::of::<f32>(), None);
        assert_eq!(FieldKind::of::<Option<String>>(), None);
        assert_eq!(FieldKind::of::<std::time::Duration>(), None);
    }
}
