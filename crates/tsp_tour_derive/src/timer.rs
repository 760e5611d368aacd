use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{ItemFn, LitStr, parse_macro_input};

/// Wraps the function body with a drop guard that logs `"{label}: elapsed_ms=..."`
/// once the body finishes, including early returns through `?`.
/// An empty attribute falls back to the function name as the label.
pub fn timer_inner(attr: TokenStream, item: TokenStream) -> TokenStream {
    let label: Option<LitStr> = if attr.is_empty() {
        None
    } else {
        Some(parse_macro_input!(attr as LitStr))
    };
    let mut func = parse_macro_input!(item as ItemFn);

    if func.sig.asyncness.is_some() || func.sig.constness.is_some() {
        return syn::Error::new_spanned(&func.sig, "timer only supports plain synchronous fns")
            .to_compile_error()
            .into();
    }

    let label = label.unwrap_or_else(|| LitStr::new(&func.sig.ident.to_string(), Span::call_site()));
    let body = &func.block;

    let wrapped: syn::Block = syn::parse_quote!({
        struct __TimerGuard(&'static str, ::std::time::Instant);

        impl ::core::ops::Drop for __TimerGuard {
            fn drop(&mut self) {
                ::log::debug!(
                    "{}: elapsed_ms={:.3}",
                    self.0,
                    self.1.elapsed().as_secs_f64() * 1_000.0
                );
            }
        }

        let __timer_guard = __TimerGuard(#label, ::std::time::Instant::now());
        #body
    });
    func.block = Box::new(wrapped);

    TokenStream::from(quote! { #func })
}
