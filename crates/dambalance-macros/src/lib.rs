use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{parse_macro_input, Data, DeriveInput, Fields, Lit, Meta};

/// Derive macro for per-day record structs whose fields are all `f64` or `usize`.
///
/// Generates:
/// - a companion `{StructName}Timeseries` struct holding one `Vec` per field,
///   with `with_capacity`, `push`, `len`, and `is_empty`;
/// - `N_COLUMNS`, `column_names()` and `to_row()` on the source struct, where
///   `to_row()` returns every field as `f64` in declaration order.
///
/// Use `#[columns(timeseries_name = "CustomName")]` to override the default
/// timeseries struct name.
#[proc_macro_derive(Columns, attributes(columns))]
pub fn derive_columns(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let name = &input.ident;

    let ts_name = extract_timeseries_name(&input)
        .unwrap_or_else(|| format_ident!("{}Timeseries", name));

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return syn::Error::new_spanned(
                    name,
                    "Columns can only be derived for structs with named fields",
                )
                .to_compile_error()
                .into();
            }
        },
        _ => {
            return syn::Error::new_spanned(name, "Columns can only be derived for structs")
                .to_compile_error()
                .into();
        }
    };

    if fields.is_empty() {
        return syn::Error::new_spanned(name, "Columns struct must have at least one field")
            .to_compile_error()
            .into();
    }

    let mut column_names = Vec::new();
    let mut idents = Vec::new();
    let mut types = Vec::new();
    for field in fields {
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        if column_kind(&field.ty).is_none() {
            return syn::Error::new_spanned(
                &field.ty,
                "Columns derive: fields must be f64 or usize",
            )
            .to_compile_error()
            .into();
        }
        column_names.push(ident.to_string());
        idents.push(ident);
        types.push(&field.ty);
    }

    let n_columns = idents.len();
    let first_field = &idents[0];

    let ts_fields = idents.iter().zip(&types).map(|(f, ty)| {
        quote! { pub #f: Vec<#ty> }
    });

    let with_cap_fields = idents.iter().map(|f| {
        quote! { #f: Vec::with_capacity(n) }
    });

    let push_fields = idents.iter().map(|f| {
        quote! { self.#f.push(r.#f); }
    });

    let row_values = idents.iter().zip(&types).map(|(f, ty)| {
        match column_kind(ty) {
            Some(ColumnKind::Index) => quote! { self.#f as f64 },
            _ => quote! { self.#f },
        }
    });

    let expanded = quote! {
        /// Columnar companion collecting one `Vec` per record field.
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct #ts_name {
            #(#ts_fields,)*
        }

        impl #ts_name {
            /// Pre-allocate all columns for `n` days.
            pub fn with_capacity(n: usize) -> Self {
                Self {
                    #(#with_cap_fields,)*
                }
            }

            /// Append one record to every column.
            pub fn push(&mut self, r: &#name) {
                #(#push_fields)*
            }

            /// Number of records stored.
            pub fn len(&self) -> usize {
                self.#first_field.len()
            }

            /// Returns `true` if no records have been stored.
            pub fn is_empty(&self) -> bool {
                self.#first_field.is_empty()
            }
        }

        impl #name {
            /// Number of columns in the row representation.
            pub const N_COLUMNS: usize = #n_columns;

            /// Column names in row order.
            pub fn column_names() -> &'static [&'static str] {
                &[#(#column_names),*]
            }

            /// All fields as plain numbers, in declaration order.
            pub fn to_row(&self) -> [f64; #n_columns] {
                [#(#row_values),*]
            }
        }
    };

    expanded.into()
}

enum ColumnKind {
    Value,
    Index,
}

fn extract_timeseries_name(input: &DeriveInput) -> Option<proc_macro2::Ident> {
    for attr in &input.attrs {
        if !attr.path().is_ident("columns") {
            continue;
        }
        let nested = attr
            .parse_args_with(
                syn::punctuated::Punctuated::<syn::Meta, syn::Token![,]>::parse_terminated,
            )
            .ok()?;
        for meta in nested {
            if let Meta::NameValue(nv) = meta {
                if nv.path.is_ident("timeseries_name") {
                    if let syn::Expr::Lit(expr_lit) = &nv.value {
                        if let Lit::Str(lit_str) = &expr_lit.lit {
                            return Some(format_ident!("{}", lit_str.value()));
                        }
                    }
                }
            }
        }
    }
    None
}

fn column_kind(ty: &syn::Type) -> Option<ColumnKind> {
    let syn::Type::Path(type_path) = ty else {
        return None;
    };
    if type_path.path.is_ident("f64") {
        Some(ColumnKind::Value)
    } else if type_path.path.is_ident("usize") {
        Some(ColumnKind::Index)
    } else {
        None
    }
}
