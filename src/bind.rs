//! The field binder: walks a record's declared shape and fills each field
//! from a [`ValueSource`].
//!
//! `#[derive(Bind)]` generates a [`Bind::bind`] body that hands every
//! annotated field to [`leaf`] or [`nested`]. Those two helpers hold all of
//! the resolution rules, so a hand-written `Bind` impl behaves exactly like a
//! derived one as long as it calls them.
//!
//! Unannotated `pub` fields are recursed into with no extra prefix when their
//! type implements [`Bind`], and left alone otherwise. The derive picks
//! between the two through method resolution on [`Unannotated`] and
//! [`Shape`], since a macro cannot see whether a type is a record.

use std::any::Any;
use std::marker::PhantomData;

use tracing::trace;

use crate::source::ValueSource;
use crate::types::{Binding, FieldKind, FieldSpec};

/// A record shape that can be populated from a [`ValueSource`].
///
/// Usually derived:
///
/// ```ignore
/// #[derive(Bind, Default)]
/// pub struct Config {
///     #[cli("name")]
///     pub name: String,
///     #[cli(prefix = "db-")]
///     pub database: Database,
/// }
/// ```
pub trait Bind {
    /// Field descriptors in declaration order. Fields that are not `pub` are
    /// not listed.
    fn fields() -> &'static [FieldSpec]
    where
        Self: Sized;

    /// Fill `self` in place, prepending `prefix` to every source key.
    fn bind(&mut self, prefix: &str, source: &dyn ValueSource);
}

/// Build a `T` from `source`.
///
/// Starts from `T::default()`; every field whose key is missing or whose type
/// is unsupported keeps its default. Never fails.
pub fn parse<T: Bind + Default>(source: &dyn ValueSource) -> T {
    let mut value = T::default();
    value.bind("", source);
    value
}

/// Bind one leaf field to `prefix + key`.
#[doc(hidden)]
pub fn leaf<T: Any>(field: &mut T, prefix: &str, key: &str, source: &dyn ValueSource) {
    let full_key = format!("{prefix}{key}");
    match FieldKind::of::<T>() {
        Some(kind) => {
            trace!(key = %full_key, ?kind, "binding field");
            assign(kind, field, &full_key, source);
        }
        None => trace!(
            key = %full_key,
            ty = std::any::type_name::<T>(),
            "unsupported field type, left untouched"
        ),
    }
}

/// Recurse into a nested record with `prefix + nested_prefix`.
#[doc(hidden)]
pub fn nested<T: Bind>(field: &mut T, prefix: &str, nested_prefix: &str, source: &dyn ValueSource) {
    let prefix = format!("{prefix}{nested_prefix}");
    trace!(prefix = %prefix, "entering nested record");
    field.bind(&prefix, source);
}

/// An unannotated `pub` field, handed to the derive's method-resolution
/// dispatch: `(&mut Unannotated(&mut self.f)).bind_unannotated(..)` recurses
/// when the field's type implements [`Bind`] and is a no-op otherwise.
#[doc(hidden)]
pub struct Unannotated<'a, T>(pub &'a mut T);

#[doc(hidden)]
pub trait BindRecord {
    fn bind_unannotated(&mut self, prefix: &str, source: &dyn ValueSource);
}

impl<T: Bind> BindRecord for Unannotated<'_, T> {
    fn bind_unannotated(&mut self, prefix: &str, source: &dyn ValueSource) {
        nested(&mut *self.0, prefix, "", source);
    }
}

#[doc(hidden)]
pub trait SkipRecord {
    fn bind_unannotated(&mut self, prefix: &str, source: &dyn ValueSource);
}

impl<T> SkipRecord for &mut Unannotated<'_, T> {
    fn bind_unannotated(&mut self, _prefix: &str, _source: &dyn ValueSource) {}
}

/// The shape-side twin of [`Unannotated`]: `(&Shape::<F>::new()).record_fields()`
/// is `F::fields()` for a record type and empty for anything else.
#[doc(hidden)]
pub struct Shape<T>(PhantomData<fn() -> T>);

impl<T> Shape<T> {
    pub const fn new() -> Self {
        Shape(PhantomData)
    }
}

#[doc(hidden)]
pub trait RecordFields {
    fn record_fields(&self) -> &'static [FieldSpec];
}

impl<T: Bind> RecordFields for Shape<T> {
    fn record_fields(&self) -> &'static [FieldSpec] {
        T::fields()
    }
}

#[doc(hidden)]
pub trait NoRecordFields {
    fn record_fields(&self) -> &'static [FieldSpec];
}

impl<T> NoRecordFields for &Shape<T> {
    fn record_fields(&self) -> &'static [FieldSpec] {
        &[]
    }
}

fn assign(kind: FieldKind, slot: &mut dyn Any, key: &str, source: &dyn ValueSource) {
    match kind {
        FieldKind::Text => store(slot, source.text(key)),
        FieldKind::Int32 => store(slot, source.int32(key)),
        FieldKind::Int64 => store(slot, source.int64(key)),
        FieldKind::Uint32 => store(slot, source.uint32(key)),
        FieldKind::Uint64 => store(slot, source.uint64(key)),
        FieldKind::Bool => store(slot, source.bool(key)),
        FieldKind::Float64 => store(slot, source.float64(key)),
        FieldKind::Duration => store(slot, source.duration(key)),
        // Absent timestamps leave the field as it was.
        FieldKind::Timestamp => {
            if let Some(ts) = source.timestamp(key) {
                store(slot, ts);
            }
        }
        FieldKind::OptionalTimestamp => {
            if let Some(ts) = source.timestamp(key) {
                store(slot, Some(ts));
            }
        }
        FieldKind::TextSeq => store(slot, source.text_seq(key)),
        FieldKind::Int32Seq => store(slot, source.int32_seq(key)),
        FieldKind::Int64Seq => store(slot, source.int64_seq(key)),
        FieldKind::Uint32Seq => store(slot, source.uint32_seq(key)),
        FieldKind::Uint64Seq => store(slot, source.uint64_seq(key)),
        FieldKind::Float64Seq => store(slot, source.float64_seq(key)),
    }
}

fn store<V: 'static>(slot: &mut dyn Any, value: V) {
    if let Some(slot) = slot.downcast_mut::<V>() {
        *slot = value;
    }
}

/// List every leaf of `T` as `(full_key, kind)`, in declaration order.
///
/// `kind` is `None` for fields whose type the binder does not support.
pub fn describe<T: Bind>() -> Vec<(String, Option<FieldKind>)> {
    let mut out = Vec::new();
    collect(T::fields(), "", &mut out);
    out
}

/// The fully prefixed source keys `T` reads, in declaration order.
pub fn keys<T: Bind>() -> Vec<String> {
    describe::<T>().into_iter().map(|(key, _)| key).collect()
}

fn collect(fields: &[FieldSpec], prefix: &str, out: &mut Vec<(String, Option<FieldKind>)>) {
    for field in fields {
        match field.binding {
            Binding::Key { key, kind } => out.push((format!("{prefix}{key}"), kind())),
            Binding::Nested {
                prefix: own,
                fields,
            } => collect(fields(), &format!("{prefix}{own}"), out),
        }
    }
}
