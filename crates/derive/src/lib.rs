//! Derive macro for envconf records
//!
//! `#[derive(Configure)]` compiles the `#[env(...)]` field attributes into an
//! explicit visit function: one `visitor.leaf(..)` call per tagged scalar and
//! one `visitor.record(..)` call per nested record, in declaration order.
//!
//! ## Field attributes
//!
//! * `#[env(from = "KEY")]` - override the field from environment variable `KEY`.
//! * `#[env(from)]` - same, with the key being the field name in upper case.
//! * `#[env(nested)]` - the field is a record (`R`, `Option<R>`, `Box<R>`) to recurse into.
//! * `#[env(skip)]` - the field is left to the document decoder, without a warning.
//! * Fields without an `env` attribute are left to the document decoder.
//!
//! A record-typed field without an `env` attribute is almost always a missing
//! `#[env(nested)]`: its own `from` keys would never be read. The generated
//! code calls a deprecated item for such fields, so the build warns at the
//! field type. Silence it with `#[env(skip)]`.
//!
//! The generated impl names `::envconf`, so the consuming crate must depend
//! on `envconf` under that name.

use proc_macro::TokenStream;
use quote::{quote, quote_spanned};
use syn::{
    ext::IdentExt, meta::ParseNestedMeta, parse_macro_input, spanned::Spanned, Data, DeriveInput,
    Error, Field, Ident, Index, LitStr, Member,
};

#[proc_macro_derive(Configure, attributes(env))]
pub fn derive_configure(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_configure(input)
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}

enum FieldRole {
    Leaf(String),
    Nested,
    Skip,
}

fn expand_configure(input: DeriveInput) -> Result<proc_macro2::TokenStream, Error> {
    let fields = match &input.data {
        Data::Struct(data) => &data.fields,
        _ => {
            return Err(Error::new(
                input.ident.span(),
                "#[derive(Configure)] only supports structs",
            ))
        }
    };

    let mut calls = Vec::new();
    for (index, field) in fields.iter().enumerate() {
        let (member, label) = match &field.ident {
            Some(ident) => (Member::Named(ident.clone()), ident.unraw().to_string()),
            None => (Member::Unnamed(Index::from(index)), index.to_string()),
        };

        match field_role(field)? {
            Some(FieldRole::Nested) => calls.push(quote! {
                __visitor.record(#label, &mut self.#member)?;
            }),
            Some(FieldRole::Leaf(key)) => calls.push(quote! {
                __visitor.leaf(#label, #key, &mut self.#member)?;
            }),
            Some(FieldRole::Skip) => {}
            None => {
                let ty = &field.ty;
                calls.push(quote_spanned! {ty.span()=>
                    {
                        use ::envconf::__private::{IsRecord as _, NotRecord as _};
                        let _ = (&::envconf::__private::Untagged::<#ty>::new()).check();
                    }
                });
            }
        }
    }

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::envconf::Configure for #name #ty_generics #where_clause {
            fn walk<__V: ::envconf::Visitor>(
                &mut self,
                __visitor: &mut __V,
            ) -> ::core::result::Result<(), <__V as ::envconf::Visitor>::Error> {
                #(#calls)*
                ::core::result::Result::Ok(())
            }
        }
    })
}

fn field_role(field: &Field) -> Result<Option<FieldRole>, Error> {
    let mut role = None;

    for attr in field.attrs.iter().filter(|attr| attr.path().is_ident("env")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("nested") {
                set_role(&mut role, FieldRole::Nested, &meta)
            } else if meta.path.is_ident("skip") {
                set_role(&mut role, FieldRole::Skip, &meta)
            } else if meta.path.is_ident("from") {
                let key = if meta.input.peek(syn::Token![=]) {
                    let lit: LitStr = meta.value()?.parse()?;
                    if lit.value().is_empty() {
                        return Err(Error::new(lit.span(), "environment key cannot be empty"));
                    }
                    lit.value()
                } else {
                    default_key(field.ident.as_ref(), &meta)?
                };
                set_role(&mut role, FieldRole::Leaf(key), &meta)
            } else {
                Err(meta.error("unsupported env attribute, expected `from`, `nested` or `skip`"))
            }
        })?;
    }

    Ok(role)
}

fn default_key(ident: Option<&Ident>, meta: &ParseNestedMeta<'_>) -> Result<String, Error> {
    match ident {
        Some(ident) => Ok(ident.unraw().to_string().to_uppercase()),
        None => Err(meta.error("tuple fields need an explicit key: #[env(from = \"KEY\")]")),
    }
}

fn set_role(
    slot: &mut Option<FieldRole>,
    role: FieldRole,
    meta: &ParseNestedMeta<'_>,
) -> Result<(), Error> {
    if slot.is_some() {
        return Err(meta.error("a field takes only one of `from`, `nested` or `skip`"));
    }
    *slot = Some(role);
    Ok(())
}
