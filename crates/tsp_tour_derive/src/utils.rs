use quote::quote;
use syn::{Attribute, Expr, ExprLit, Lit, Meta, Path, Type};

pub fn to_kebab_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for (idx, ch) in s.chars().enumerate() {
        if ch == '_' {
            out.push('-');
        } else if ch.is_ascii_uppercase() {
            if idx != 0 {
                out.push('-');
            }
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// Joins the `///` lines of a field into one trimmed sentence.
pub fn doc_summary(attrs: &[Attribute]) -> String {
    let mut parts = Vec::new();
    for attr in attrs {
        if !attr.path().is_ident("doc") {
            continue;
        }
        if let Meta::NameValue(nv) = &attr.meta
            && let Expr::Lit(ExprLit {
                lit: Lit::Str(s), ..
            }) = &nv.value
        {
            let line = s.value();
            let line = line.trim();
            if !line.is_empty() {
                parts.push(line.to_string());
            }
        }
    }
    parts.join(" ")
}

/// Placeholder shown in help output, e.g. `<usize>` for a `usize` field.
pub fn value_hint(ty: &Type) -> String {
    let rendered = quote!(#ty).to_string().replace(' ', "");
    format!("<{}>", to_kebab_case(&rendered))
}

/// `a={} b={}` style format string for the given keys.
pub fn kv_format(keys: &[String]) -> String {
    keys.iter()
        .map(|key| format!("{key}={{}}"))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn build_cli_parse_expr(ty: &Type, parse_with: Option<&Path>) -> proc_macro2::TokenStream {
    if let Some(parse_with) = parse_with {
        quote! { #parse_with(&raw)? }
    } else {
        quote! {
            raw.parse::<#ty>()
                .map_err(|e| crate::Error::invalid_input(format!(
                    "Invalid value for --{name}: {raw} ({e})"
                )))?
        }
    }
}
