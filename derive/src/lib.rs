use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod from_tags;

#[proc_macro_derive(FromTags, attributes(header, tag))]
pub fn derive_from_tags(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match from_tags::expand_from_tags(&input) {
        Ok(tokens) => tokens,
        Err(err) => err.to_compile_error().into(),
    }
}
