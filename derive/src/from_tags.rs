use std::collections::HashSet;

use proc_macro::TokenStream;
use quote::quote;
use syn::{Attribute, Data, DeriveInput, Error, Field, Fields, Ident, Result, Type};

pub(crate) fn expand_from_tags(input: &DeriveInput) -> Result<TokenStream> {
    let Data::Struct(data) = &input.data else {
        Err(Error::new_spanned(
            input,
            "`FromTags` may only be derived on structs.",
        ))?
    };

    let Fields::Named(fields) = &data.fields else {
        Err(Error::new_spanned(
            input,
            "`FromTags` may only be derived on structs with named fields.",
        ))?
    };

    let fields = fields
        .named
        .iter()
        .map(FieldMetadata::parse)
        .map(Result::transpose)
        .flatten() // Skip fields without an attribute.
        .collect::<Result<Vec<_>>>()?;

    let mut header_assignment = None;
    let mut variants = HashSet::new();
    let mut cases = Vec::new();

    for FieldMetadata { name, target, is_vec } in fields {
        let assignment = if is_vec {
            quote! { self.#name.push(value); }
        } else {
            quote! { self.#name = Some(value); }
        };

        match target {
            Target::Header(attribute) => {
                if header_assignment.replace(assignment).is_some() {
                    Err(Error::new_spanned(
                        &attribute,
                        "Only one field may receive the header.",
                    ))?
                }
            }
            Target::Tag(variant) => {
                if !variants.insert(variant.clone()) {
                    Err(Error::new_spanned(&variant, "Tag variants must be unique."))?
                }

                cases.push(quote! {
                    ::flicker::sans::tag::Tag::#variant(value) => { #assignment }
                });
            }
        }
    }

    let add_header = header_assignment.map(|assignment| {
        quote! {
            fn add_header(&mut self, value: ::flicker::sans::header::Header) {
                #assignment
            }
        }
    });

    let name = &input.ident;
    let (impl_generics, type_generics, where_clause) = input.generics.split_for_impl();

    let expanded = quote! {
        impl #impl_generics ::flicker::avec::FromTags for #name #type_generics #where_clause {
            #add_header

            fn add_tag(&mut self, tag: ::flicker::sans::tag::Tag) {
                match tag {
                    #(#cases)*
                    _ => {}
                }
            }
        }
    };

    Ok(expanded.into())
}

#[derive(Debug)]
enum Target {
    Header(Ident),
    Tag(Ident),
}

#[derive(Debug)]
struct FieldMetadata {
    name: Ident,
    target: Target,
    is_vec: bool,
}

impl FieldMetadata {
    fn parse(field: &Field) -> Result<Option<Self>> {
        let name = field.ident.clone().unwrap();

        let Some(target) = Self::target(&field.attrs)? else {
            return Ok(None);
        };

        let Type::Path(path) = &field.ty else {
            Err(Error::new_spanned(
                &field.ty,
                "Field must have a type annotation.",
            ))?
        };

        let Some(segment) = path.path.segments.last() else {
            Err(Error::new_spanned(
                &path.path.segments,
                "Field must have an `Option<T>` or `Vec<T>` type.",
            ))?
        };

        let is_vec = if segment.ident == "Option" {
            false
        } else if segment.ident == "Vec" {
            true
        } else {
            Err(Error::new_spanned(
                &segment.ident,
                "Field must have an `Option<T>` or `Vec<T>` type.",
            ))?
        };

        Ok(Some(Self {
            name,
            target,
            is_vec,
        }))
    }

    fn target(attrs: &[Attribute]) -> Result<Option<Target>> {
        let mut target = None;

        for attr in attrs {
            let found = if attr.path().is_ident("header") {
                attr.meta.require_path_only()?;
                Target::Header(attr.path().segments[0].ident.clone())
            } else if attr.path().is_ident("tag") {
                Target::Tag(attr.meta.require_list()?.parse_args::<Ident>()?)
            } else {
                continue;
            };

            if target.replace(found).is_some() {
                Err(Error::new_spanned(
                    attr,
                    "Field may only have one `header` or `tag` attribute.",
                ))?
            }
        }

        Ok(target)
    }
}
