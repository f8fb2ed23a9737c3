use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{ Data, DeriveInput, Error, Field, Fields, GenericParam, Type };

use crate::attr::{ ContainerAttrs, FieldAttrs, SchemaAttr };
use crate::util::where_clause_with_bounds;

// derive_describe
pub fn derive_describe(input: TokenStream) -> TokenStream {
    let input: DeriveInput = match syn::parse2(input) {
        Ok(input) => input,
        Err(err) => return err.to_compile_error(),
    };

    match expand(&input) {
        Ok(tokens) => tokens,
        Err(err) => err.to_compile_error(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let container = ContainerAttrs::from_attrs(&input.attrs)?;
    let ident = &input.ident;

    let body = if container.custom {
        quote!(::index_mapper::TypeDesc::custom::<Self>())
    } else {
        match &input.data {
            Data::Struct(data) => struct_body(&container, &data.fields)?,
            Data::Enum(_) => quote!(::index_mapper::TypeDesc::unsupported::<Self>("enum")),
            Data::Union(_) => quote!(::index_mapper::TypeDesc::unsupported::<Self>("union")),
        }
    };

    // record descriptions key on TypeId, so every parameter must be 'static
    let bounds = input.generics.params
        .iter()
        .filter_map(|param| {
            match param {
                GenericParam::Type(ty) => {
                    let ty = &ty.ident;
                    Some(quote!(#ty: ::index_mapper::Describe + 'static))
                }
                GenericParam::Lifetime(lt) => {
                    let lt = &lt.lifetime;
                    Some(quote!(#lt: 'static))
                }
                GenericParam::Const(_) => None,
            }
        })
        .collect::<Vec<_>>();

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let where_clause = where_clause_with_bounds(where_clause, &bounds);

    Ok(quote! {
        impl #impl_generics ::index_mapper::Describe for #ident #ty_generics #where_clause {
            fn describe() -> ::index_mapper::TypeDesc {
                #body
            }
        }
    })
}

fn struct_body(container: &ContainerAttrs, fields: &Fields) -> syn::Result<TokenStream> {
    match fields {
        Fields::Named(named) if container.transparent => {
            let mut serialized = Vec::new();
            for field in &named.named {
                if !FieldAttrs::from_attrs(&field.attrs)?.skip {
                    serialized.push(field);
                }
            }
            match serialized.as_slice() {
                [field] => Ok(reference_body(&field.ty)),
                _ =>
                    Err(
                        Error::new_spanned(
                            &named.named,
                            "#[serde(transparent)] needs exactly one serialized field"
                        )
                    ),
            }
        }
        Fields::Named(named) => {
            let descs = named.named
                .iter()
                .map(|field| field_desc(container, field))
                .collect::<syn::Result<Vec<_>>>()?;
            Ok(quote!(::index_mapper::TypeDesc::record::<Self>(::std::vec![#(#descs),*])))
        }
        // newtypes serialize as their payload
        Fields::Unnamed(unnamed) if unnamed.unnamed.len() == 1 => {
            Ok(reference_body(&unnamed.unnamed[0].ty))
        }
        Fields::Unnamed(_) => Ok(quote!(::index_mapper::TypeDesc::unsupported::<Self>("tuple"))),
        Fields::Unit => Ok(quote!(::index_mapper::TypeDesc::record::<Self>(::std::vec::Vec::new()))),
    }
}

fn reference_body(ty: &Type) -> TokenStream {
    let describe = describe_fn(ty);
    quote! {
        ::index_mapper::TypeDesc::new::<Self>(::index_mapper::describe::Shape::Reference(#describe))
    }
}

fn field_desc(container: &ContainerAttrs, field: &Field) -> syn::Result<TokenStream> {
    let attrs = FieldAttrs::from_attrs(&field.attrs)?;
    let ident = field.ident
        .as_ref()
        .ok_or_else(|| Error::new_spanned(field, "expected a named field"))?;

    if attrs.flatten && !attrs.skip && attrs.schema != Some(SchemaAttr::Exclude) {
        return Err(
            Error::new_spanned(
                field,
                "#[serde(flatten)] fields cannot be described; add #[index(exclude)] to leave the field out"
            )
        );
    }

    let ident_str = ident.unraw().to_string();
    let describe = describe_fn(&field.ty);

    let naming = if attrs.skip {
        quote!(.skip())
    } else {
        let name = attrs.rename.clone().unwrap_or_else(|| container.field_name(&ident_str));
        quote!(.rename(#name))
    };

    let schema = match &attrs.schema {
        None => quote!(),
        Some(SchemaAttr::Exclude) => quote!(.exclude()),
        Some(SchemaAttr::Disabled) => quote!(.disabled()),
        Some(SchemaAttr::Kind(kind)) => quote!(.literal(#kind)),
        Some(SchemaAttr::Tag(tag)) => quote!(.schema_tag(#tag)),
    };

    Ok(quote!(::index_mapper::FieldDesc::with_describe(#ident_str, #describe) #naming #schema))
}

/// Expression of type `DescribeFn` for a field type.
///
/// Types that can never implement `Describe` (fn pointers of any arity or
/// lifetime, trait objects, tuples, raw pointers) get an inline description
/// reporting them as unsupported at generation time.
fn describe_fn(ty: &Type) -> TokenStream {
    match unsupported_kind(ty) {
        Some(kind) => {
            let name = quote!(#ty).to_string();
            quote!({
                fn describe() -> ::index_mapper::TypeDesc {
                    ::index_mapper::TypeDesc {
                        name: #name,
                        shape: ::index_mapper::describe::Shape::Unsupported(#kind),
                        provider: ::core::option::Option::None,
                    }
                }
                describe as ::index_mapper::describe::DescribeFn
            })
        }
        None => quote!(<#ty as ::index_mapper::Describe>::describe as ::index_mapper::describe::DescribeFn),
    }
}

fn unsupported_kind(ty: &Type) -> Option<&'static str> {
    match ty {
        Type::BareFn(_) => Some("func"),
        Type::TraitObject(_) | Type::ImplTrait(_) => Some("interface"),
        Type::Tuple(tuple) if !tuple.elems.is_empty() => Some("tuple"),
        Type::Ptr(_) => Some("pointer"),
        Type::Never(_) => Some("never"),
        Type::Paren(inner) => unsupported_kind(&inner.elem),
        Type::Group(inner) => unsupported_kind(&inner.elem),
        _ => None,
    }
}
