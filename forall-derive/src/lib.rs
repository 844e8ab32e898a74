//! Derive macros for forall property-based testing.
//!
//! `#[derive(Generate)]` builds a record generator for a type: fields are
//! drawn in declaration order and shrink one field at a time.

use proc_macro::TokenStream;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::quote;
use syn::{
    parse_macro_input, Data, DeriveInput, Expr, Field, Fields, GenericArgument, PathArguments,
    Type,
};

/// Derive macro generating a `generate()` constructor returning `Gen<Self>`.
///
/// Every field type must be `Clone + 'static`. A field's generator defaults
/// from its type and can be overridden with `#[generate(expr)]`.
///
/// # Example
///
/// ```rust,ignore
/// use forall::*;
///
/// #[derive(Generate, Debug, Clone, PartialEq)]
/// struct User {
///     firstname: String,
///     surname: String,
///     #[generate(Gen::<i32>::integer(0, 120))]
///     age: i32,
/// }
///
/// let user_gen = User::generate();
/// ```
#[proc_macro_derive(Generate, attributes(generate))]
pub fn derive_generate(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match generate_impl(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

/// Generate the `generate()` implementation.
fn generate_impl(input: &DeriveInput) -> Result<TokenStream2, syn::Error> {
    let name = &input.ident;
    let generics = &input.generics;
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let generator_impl = match &input.data {
        Data::Struct(data) => fields_generator(&data.fields, quote! { Self })?,
        Data::Enum(data) => {
            if data.variants.is_empty() {
                return Err(syn::Error::new_spanned(
                    input,
                    "Generate cannot be derived for an enum without variants",
                ));
            }

            let variants = data
                .variants
                .iter()
                .map(|variant| {
                    let variant_name = &variant.ident;
                    fields_generator(&variant.fields, quote! { Self::#variant_name })
                })
                .collect::<Result<Vec<_>, syn::Error>>()?;

            quote! {
                ::forall::Gen::one_of(vec![
                    #(#variants),*
                ])
            }
        }
        Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                input,
                "Generate derive macro does not support unions",
            ));
        }
    };

    let expanded = quote! {
        impl #impl_generics #name #ty_generics #where_clause {
            /// Generator drawing each field in declaration order.
            pub fn generate() -> ::forall::Gen<Self> {
                #generator_impl
            }
        }
    };

    Ok(expanded)
}

/// Chain field generators into nested pairs ending in `()`, then rebuild
/// the value with `constructor`.
fn fields_generator(fields: &Fields, constructor: TokenStream2) -> Result<TokenStream2, syn::Error> {
    let field_data = fields
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let var = syn::Ident::new(&format!("field_{i}"), Span::call_site());
            Ok((field, var, field_generator(field)?))
        })
        .collect::<Result<Vec<_>, syn::Error>>()?;

    let mut chain = quote! { ::forall::Gen::constant(()) };
    let mut pattern = quote! { () };
    for (_, var, gen) in field_data.iter().rev() {
        chain = quote! { ::forall::Gen::zip(#gen, #chain) };
        pattern = quote! { (#var, #pattern) };
    }

    let build = match fields {
        Fields::Named(_) => {
            let assignments = field_data.iter().map(|(field, var, _)| {
                let name = &field.ident;
                quote! { #name: #var }
            });
            quote! { #constructor { #(#assignments),* } }
        }
        Fields::Unnamed(_) => {
            let vars = field_data.iter().map(|(_, var, _)| var);
            quote! { #constructor(#(#vars),*) }
        }
        Fields::Unit => constructor,
    };

    Ok(quote! {
        #chain.map(|#pattern| #build)
    })
}

/// The generator for one field: its `#[generate(..)]` override or a default.
fn field_generator(field: &Field) -> Result<TokenStream2, syn::Error> {
    for attr in &field.attrs {
        if attr.path().is_ident("generate") {
            let expr: Expr = attr.parse_args()?;
            return Ok(quote! { #expr });
        }
    }
    type_generator(&field.ty)
}

/// Default generator for a type.
fn type_generator(field_type: &Type) -> Result<TokenStream2, syn::Error> {
    let Type::Path(type_path) = field_type else {
        return Ok(quote! { <#field_type>::generate() });
    };

    let Some(segment) = type_path.path.segments.last() else {
        return Err(syn::Error::new_spanned(
            field_type,
            "Unable to generate generator for this type",
        ));
    };

    let tokens = match segment.ident.to_string().as_str() {
        "String" => quote! { ::forall::Gen::<String>::string(::forall::DEFAULT_STRING_LEN) },
        "bool" => quote! { ::forall::Gen::boolean() },
        "char" => quote! { ::forall::Gen::printable() },
        "i8" | "i16" | "i32" | "i64" | "u8" | "u16" | "u32" => {
            let ty = &segment.ident;
            quote! { ::forall::Gen::<#ty>::integer(#ty::MIN, #ty::MAX) }
        }
        "usize" => quote! { ::forall::Gen::<usize>::integer(0, usize::MAX) },
        "u64" => quote! { ::forall::Gen::<i64>::integer(0, i64::MAX).map(|v| v as u64) },
        "Vec" => {
            let element = match &segment.arguments {
                PathArguments::AngleBracketed(args) => args.args.iter().find_map(|arg| match arg {
                    GenericArgument::Type(ty) => Some(ty),
                    _ => None,
                }),
                _ => None,
            };
            let Some(element) = element else {
                return Err(syn::Error::new_spanned(
                    field_type,
                    "Vec field needs an element type",
                ));
            };
            let element_gen = type_generator(element)?;
            quote! { ::forall::Gen::array_of(#element_gen, ::forall::DEFAULT_ARRAY_LEN) }
        }
        // Custom types are assumed to derive Generate themselves.
        _ => quote! { <#field_type>::generate() },
    };

    Ok(tokens)
}
