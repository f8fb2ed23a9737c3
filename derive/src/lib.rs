use proc_macro::TokenStream;

mod attr;
mod describe;
mod util;

/// Implements `index_mapper::Describe` from the struct definition.
///
/// Field names follow serde: `#[serde(rename = "...")]`, `rename_all` on the
/// container, `skip` and `skip_serializing`. Overrides use `#[index(...)]` on a
/// field: `exclude`, `disabled`, `kind = "keyword"` or the compact
/// `tag = "..."`. `#[index(custom)]` on the container defers to the type's
/// `CustomSchema` impl.
#[proc_macro_derive(Describe, attributes(index))]
pub fn derive_describe(input: TokenStream) -> TokenStream {
    describe::derive_describe(input.into()).into()
}
