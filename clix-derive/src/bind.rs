use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::ext::IdentExt;
use syn::{Attribute, Data, DeriveInput, Error, Field, Fields, LitStr, Result, Visibility};

/// What a `#[cli(...)]` attribute asks for.
enum FieldAttr {
    Key(LitStr),
    Nested(Option<LitStr>),
}

pub fn derive_bind(input: &DeriveInput) -> Result<TokenStream> {
    let name = &input.ident;
    if !input.generics.params.is_empty() {
        return Err(Error::new_spanned(
            &input.generics,
            "#[derive(Bind)] does not support generic structs",
        ));
    }

    let fields = match &input.data {
        Data::Struct(s) => match &s.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(Error::new_spanned(
                    name,
                    "#[derive(Bind)] needs a struct with named fields",
                ));
            }
        },
        Data::Enum(_) | Data::Union(_) => {
            return Err(Error::new_spanned(name, "#[derive(Bind)] only supports structs"));
        }
    };

    let mut specs = Vec::new();
    let mut binds = Vec::new();
    let mut helpers = Vec::new();
    for field in fields {
        let attr = field_attr(field)?;
        // Only the public surface is bound.
        if !matches!(field.vis, Visibility::Public(_)) {
            continue;
        }
        let Some(ident) = &field.ident else {
            continue;
        };
        let field_name = ident.unraw().to_string();
        let ty = &field.ty;

        match attr {
            Some(FieldAttr::Key(key)) => {
                specs.push(quote! {
                    ::clix::FieldSpec {
                        name: #field_name,
                        binding: ::clix::Binding::Key {
                            key: #key,
                            kind: ::clix::FieldKind::of::<#ty>,
                        },
                    }
                });
                binds.push(quote! {
                    ::clix::bind::leaf(&mut self.#ident, prefix, #key, source);
                });
            }
            Some(FieldAttr::Nested(own_prefix)) => {
                let own_prefix = own_prefix.map(|p| p.value()).unwrap_or_default();
                specs.push(quote! {
                    ::clix::FieldSpec {
                        name: #field_name,
                        binding: ::clix::Binding::Nested {
                            prefix: #own_prefix,
                            fields: <#ty as ::clix::Bind>::fields,
                        },
                    }
                });
                binds.push(quote! {
                    ::clix::bind::nested(&mut self.#ident, prefix, #own_prefix, source);
                });
            }
            // Unannotated: a record type is recursed into with no prefix,
            // anything else is left alone.
            None => {
                let helper = format_ident!("__clix_fields_{}", field_name);
                helpers.push(quote! {
                    fn #helper() -> &'static [::clix::FieldSpec] {
                        #[allow(unused_imports)]
                        use ::clix::bind::{NoRecordFields as _, RecordFields as _};
                        (&::clix::bind::Shape::<#ty>::new()).record_fields()
                    }
                });
                specs.push(quote! {
                    ::clix::FieldSpec {
                        name: #field_name,
                        binding: ::clix::Binding::Nested {
                            prefix: "",
                            fields: #helper,
                        },
                    }
                });
                binds.push(quote! {
                    {
                        #[allow(unused_imports)]
                        use ::clix::bind::{BindRecord as _, SkipRecord as _};
                        (&mut ::clix::bind::Unannotated(&mut self.#ident))
                            .bind_unannotated(prefix, source);
                    }
                });
            }
        }
    }

    Ok(quote! {
        impl ::clix::Bind for #name {
            fn fields() -> &'static [::clix::FieldSpec] {
                #(#helpers)*
                const FIELDS: &[::clix::FieldSpec] = &[#(#specs),*];
                FIELDS
            }

            #[allow(unused_variables)]
            fn bind(&mut self, prefix: &str, source: &dyn ::clix::ValueSource) {
                #(#binds)*
            }
        }
    })
}

fn field_attr(field: &Field) -> Result<Option<FieldAttr>> {
    let mut found = None;
    for attr in field.attrs.iter().filter(|a| a.path().is_ident("cli")) {
        if found.is_some() {
            return Err(Error::new_spanned(attr, "duplicate #[cli] attribute"));
        }
        found = Some(parse_cli_attr(attr)?);
    }
    Ok(found)
}

fn parse_cli_attr(attr: &Attribute) -> Result<FieldAttr> {
    // Shorthand: #[cli("key")]
    if let Ok(key) = attr.parse_args::<LitStr>() {
        return Ok(FieldAttr::Key(key));
    }

    let mut key = None;
    let mut nested = false;
    let mut prefix = None;
    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("key") {
            key = Some(meta.value()?.parse::<LitStr>()?);
        } else if meta.path.is_ident("nested") {
            nested = true;
        } else if meta.path.is_ident("prefix") {
            prefix = Some(meta.value()?.parse::<LitStr>()?);
        } else {
            return Err(meta.error("expected `key = \"...\"`, `nested` or `prefix = \"...\"`"));
        }
        Ok(())
    })?;

    match (key, nested || prefix.is_some()) {
        (Some(key), false) => Ok(FieldAttr::Key(key)),
        (None, true) => Ok(FieldAttr::Nested(prefix)),
        (Some(_), true) => Err(Error::new_spanned(
            attr,
            "a field binds either a key or a nested struct, not both",
        )),
        (None, false) => Err(Error::new_spanned(attr, "empty #[cli] attribute")),
    }
}
