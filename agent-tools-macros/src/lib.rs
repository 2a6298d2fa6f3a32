//! Procedural macros for agent tool definitions.
//!
//! `#[tool]` leaves the annotated function untouched and emits a sibling
//! `<name>_signature()` function returning an `agent_tools::ToolSignature`
//! built from the function's doc comments and parameter types.

use std::collections::HashSet;

use proc_macro::TokenStream;
use proc_macro_crate::{FoundCrate, crate_name};
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::{ToTokens, format_ident, quote};
use syn::ext::IdentExt;
use syn::{
    Expr, ExprLit, FnArg, GenericArgument, Ident, ItemFn, Lit, LitStr, Meta, Pat,
    PathArguments, ReturnType, Type, parse_macro_input,
};

/// Mirrors `agent_tools::RETURN_MARKER`.
const RETURN_MARKER: &str = "return";

/// Marks a function as a tool and derives its signature.
///
/// ```ignore
/// /// Multiply two numbers together
/// ///
/// /// # Arguments
/// ///
/// /// * `a` - first number
/// /// * `b` - second number
/// #[tool]
/// fn multiply_numbers(a: f64, b: f64) -> f64 {
///     a * b
/// }
///
/// let signature = multiply_numbers_signature();
/// ```
///
/// The exported name defaults to the function name and can be overridden with
/// `#[tool(name = "...")]`.
///
/// Generated code reaches the runtime through `agent_tools`, or through
/// `fastagents::tools` when only the facade is a dependency. Other re-exports
/// pass the path explicitly with `#[tool(crate = "my_facade::tools")]`.
#[proc_macro_attribute]
pub fn tool(attr: TokenStream, item: TokenStream) -> TokenStream {
    let mut name: Option<LitStr> = None;
    let mut krate: Option<syn::Path> = None;
    let parser = syn::meta::parser(|meta| {
        if meta.path.is_ident("name") {
            name = Some(meta.value()?.parse()?);
            Ok(())
        } else if meta.path.is_ident("crate") {
            let path: LitStr = meta.value()?.parse()?;
            krate = Some(path.parse()?);
            Ok(())
        } else {
            Err(meta.error(
                "unsupported tool attribute, expected `name = \"...\"` or `crate = \"...\"`",
            ))
        }
    });
    parse_macro_input!(attr with parser);

    let function = parse_macro_input!(item as ItemFn);
    let krate = krate.map_or_else(runtime_path, ToTokens::into_token_stream);
    expand(name, &krate, function)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// Path of the runtime crate as the calling crate sees it.
fn runtime_path() -> TokenStream2 {
    if let Ok(found) = crate_name("agent-tools") {
        return match found {
            // the library re-exports itself as `agent_tools`
            FoundCrate::Itself => quote!(::agent_tools),
            FoundCrate::Name(name) => {
                let ident = Ident::new(&name, Span::call_site());
                quote!(::#ident)
            }
        };
    }
    match crate_name("fastagents") {
        Ok(FoundCrate::Name(name)) => {
            let ident = Ident::new(&name, Span::call_site());
            quote!(::#ident::tools)
        }
        Ok(FoundCrate::Itself) => quote!(crate::tools),
        Err(_) => quote!(::agent_tools),
    }
}

fn expand(
    name: Option<LitStr>,
    krate: &TokenStream2,
    function: ItemFn,
) -> syn::Result<TokenStream2> {
    let ident = function.sig.ident.unraw();
    let tool_name = match name {
        Some(name) if name.value().trim().is_empty() => {
            return Err(syn::Error::new(name.span(), "tool name cannot be empty"));
        }
        Some(name) => name.value(),
        None => ident.to_string(),
    };

    let doc = match doc_text(&function) {
        Some(text) => quote!(::core::option::Option::Some(#text)),
        None => quote!(::core::option::Option::None),
    };

    let mut entries = Vec::new();
    let mut seen = HashSet::new();
    for (index, input) in function.sig.inputs.iter().enumerate() {
        let FnArg::Typed(typed) = input else {
            return Err(syn::Error::new_spanned(
                input,
                "#[tool] cannot be applied to methods taking `self`",
            ));
        };
        let param = match typed.pat.as_ref() {
            Pat::Ident(pat) => pat.ident.unraw().to_string(),
            _ => format!("arg{index}"),
        };
        if param == RETURN_MARKER {
            return Err(syn::Error::new_spanned(
                &typed.pat,
                "tool parameters cannot be named `return`",
            ));
        }
        if !seen.insert(param.clone()) {
            return Err(syn::Error::new_spanned(
                &typed.pat,
                format!("tool parameter name `{param}` is used twice; rename the parameter"),
            ));
        }
        let annotation = annotation_tokens(krate, &typed.ty);
        entries.push(quote!((#param, #annotation)));
    }
    if let ReturnType::Type(_, ty) = &function.sig.output {
        let annotation = annotation_tokens(krate, ty);
        entries.push(quote!((#krate::RETURN_MARKER, #annotation)));
    }

    let vis = &function.vis;
    let constructor = format_ident!("{}_signature", ident);
    let summary = format!("Tool signature of [`{ident}`].");

    Ok(quote! {
        #function

        #[doc = #summary]
        #[must_use]
        #vis fn #constructor() -> #krate::ToolSignature {
            #krate::ToolSignature::from_macro(
                #tool_name,
                #doc,
                ::std::vec![#(#entries),*],
            )
        }
    })
}

fn doc_text(function: &ItemFn) -> Option<String> {
    let lines: Vec<String> = function
        .attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .filter_map(|attr| match &attr.meta {
            Meta::NameValue(pair) => match &pair.value {
                Expr::Lit(ExprLit {
                    lit: Lit::Str(text),
                    ..
                }) => Some(text.value()),
                _ => None,
            },
            _ => None,
        })
        .collect();

    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

fn annotation_tokens(krate: &TokenStream2, ty: &Type) -> TokenStream2 {
    match display_name(ty) {
        Some(label) => quote!(#krate::TypeAnnotation::Named(
            ::std::string::String::from(#label)
        )),
        None => {
            let raw = ty.to_token_stream().to_string();
            quote!(#krate::TypeAnnotation::Unresolved(
                ::std::string::String::from(#raw)
            ))
        }
    }
}

/// Short display name of a type: the last path segment with its generic
/// arguments, references and lifetimes removed.
fn display_name(ty: &Type) -> Option<String> {
    match ty {
        Type::Reference(reference) => display_name(&reference.elem),
        Type::Paren(inner) => display_name(&inner.elem),
        Type::Group(inner) => display_name(&inner.elem),
        Type::Slice(slice) => Some(format!("[{}]", display_name(&slice.elem)?)),
        Type::Array(array) => {
            let len = array.len.to_token_stream().to_string();
            Some(format!("[{}; {len}]", display_name(&array.elem)?))
        }
        Type::Tuple(tuple) => {
            let parts = tuple
                .elems
                .iter()
                .map(display_name)
                .collect::<Option<Vec<_>>>()?;
            Some(format!("({})", parts.join(", ")))
        }
        Type::Path(path) if path.qself.is_none() => {
            let segment = path.path.segments.last()?;
            let mut label = segment.ident.unraw().to_string();
            if let PathArguments::AngleBracketed(generics) = &segment.arguments {
                let args = generics
                    .args
                    .iter()
                    .filter_map(|arg| match arg {
                        GenericArgument::Type(ty) => Some(display_name(ty)),
                        _ => None,
                    })
                    .collect::<Option<Vec<_>>>()?;
                if !args.is_empty() {
                    label.push('<');
                    label.push_str(&args.join(", "));
                    label.push('>');
                }
            }
            Some(label)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(source: &str) -> Option<String> {
        display_name(&syn::parse_str::<Type>(source).unwrap())
    }

    #[test]
    fn display_names_drop_paths_and_references() {
        assert_eq!(label("f64").as_deref(), Some("f64"));
        assert_eq!(label("&'a str").as_deref(), Some("str"));
        assert_eq!(label("std::string::String").as_deref(), Some("String"));
        assert_eq!(
            label("Option<Vec<&str>>").as_deref(),
            Some("Option<Vec<str>>")
        );
        assert_eq!(label("Cow<'static, str>").as_deref(), Some("Cow<str>"));
        assert_eq!(label("(i32, bool)").as_deref(), Some("(i32, bool)"));
        assert_eq!(label("&[u8]").as_deref(), Some("[u8]"));
    }

    #[test]
    fn inexpressible_types_have_no_display_name() {
        assert_eq!(label("impl Into<String>"), None);
        assert_eq!(label("Box<dyn Fn()>"), None);
        assert_eq!(label("<T as Trait>::Output"), None);
    }

    fn expand_default(function: ItemFn) -> syn::Result<String> {
        expand(None, &quote!(::agent_tools), function).map(|tokens| tokens.to_string())
    }

    #[test]
    fn expansion_rejects_methods() {
        let function: ItemFn = syn::parse_quote! {
            fn method(&self, a: i32) -> i32 { a }
        };
        let err = expand_default(function).unwrap_err();
        assert!(err.to_string().contains("self"));
    }

    #[test]
    fn expansion_collects_docs_and_parameters() {
        let function: ItemFn = syn::parse_quote! {
            /// Adds numbers.
            pub fn add((a, b): (i32, i32), r#type: &str) -> i32 { a + b }
        };
        let expanded = expand_default(function).unwrap();

        assert!(expanded.contains("add_signature"));
        assert!(expanded.contains("\" Adds numbers.\""));
        assert!(expanded.contains("\"arg0\""));
        assert!(expanded.contains("\"type\""));
        assert!(expanded.contains("RETURN_MARKER"));
    }

    #[test]
    fn generated_name_colliding_with_parameter_is_rejected() {
        let function: ItemFn = syn::parse_quote! {
            fn pair((a, b): (i32, i32), arg0: i32) -> i32 { a + b + arg0 }
        };
        let err = expand_default(function).unwrap_err();
        assert!(err.to_string().contains("`arg0` is used twice"));
    }

    #[test]
    fn raw_return_parameter_is_rejected() {
        let function: ItemFn = syn::parse_quote! {
            fn raw(r#return: i32, x: i32) -> i32 { r#return + x }
        };
        let err = expand_default(function).unwrap_err();
        assert!(err.to_string().contains("`return`"));
    }

    #[test]
    fn expansion_uses_supplied_crate_path() {
        let function: ItemFn = syn::parse_quote! {
            fn ping() {}
        };
        let expanded = expand(None, &quote!(::fastagents::tools), function)
            .unwrap()
            .to_string();

        assert!(expanded.contains(":: fastagents :: tools :: ToolSignature"));
        assert!(!expanded.contains("agent_tools"));
    }
}
