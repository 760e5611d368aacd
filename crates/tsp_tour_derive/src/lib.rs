//! Procedural macros shared by the tsp-tour crates.
//!
//! - `#[timer("label")]` logs how long a function took at debug level.
//! - `CliValue` gives unit enums a case-insensitive `parse` and a kebab-case `Display`.
//! - `CliOptions` turns `#[cli(long = "...")]` fields into `--long[=value]` handlers
//!   plus a help table built from the field docs.
//! - `KvDisplay` renders a struct as `key=value` pairs for log lines.

mod cli_options;
mod cli_value;
mod kv_display;
mod timer;
mod utils;

use proc_macro::TokenStream;

#[proc_macro_attribute]
pub fn timer(attr: TokenStream, item: TokenStream) -> TokenStream {
    timer::timer_inner(attr, item)
}

#[proc_macro_derive(CliValue, attributes(cli_value, cli))]
pub fn derive_cli_value(item: TokenStream) -> TokenStream {
    cli_value::derive_cli_value_inner(item)
}

#[proc_macro_derive(CliOptions, attributes(cli))]
pub fn derive_cli_options(item: TokenStream) -> TokenStream {
    cli_options::derive_cli_options_inner(item)
}

#[proc_macro_derive(KvDisplay)]
pub fn derive_kv_display(item: TokenStream) -> TokenStream {
    kv_display::derive_kv_display_inner(item)
}
