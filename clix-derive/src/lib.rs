//! Derive macro for `clix::Bind`.

use proc_macro::TokenStream;
use syn::{DeriveInput, Error, parse_macro_input};

mod bind;

/// Implement `clix::Bind` for a struct with named fields.
///
/// Field attributes:
///
/// - `#[cli("key")]` or `#[cli(key = "key")]`: read this field from `key`.
/// - `#[cli(nested)]`: recurse into a nested `Bind` struct.
/// - `#[cli(prefix = "db-")]`: recurse, prepending `db-` to every key inside.
///
/// An unannotated `pub` field is recursed into with no prefix when its type
/// implements `clix::Bind`, and ignored otherwise. Fields that are not `pub`
/// are always ignored.
#[proc_macro_derive(Bind, attributes(cli))]
pub fn derive_bind(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    bind::derive_bind(&input)
        .unwrap_or_else(Error::into_compile_error)
        .into()
}
