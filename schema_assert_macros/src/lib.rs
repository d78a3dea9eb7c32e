//! Procedural macros for schema_assert
//!
//! This crate provides the `SchemaModel` derive macro, which turns a struct
//! with named fields into a model exposing column metadata to matchers.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{quote, ToTokens};
use syn::meta::ParseNestedMeta;
use syn::{parse_macro_input, Data, DeriveInput, Fields, Lit, LitBool, LitInt, LitStr, Token};

/// Derive `schema_assert::models::SchemaModel`
///
/// ```ignore
/// #[derive(SchemaModel)]
/// #[schema_model(table = "people")]
/// struct Person {
///     #[column(primary)]
///     id: i64,
///     #[column(sql_type = "varchar(40)", default = "anonymous")]
///     name: String,
///     nickname: Option<String>,
///     #[column(skip)]
///     cached_age: u8,
/// }
/// ```
#[proc_macro_derive(SchemaModel, attributes(schema_model, column))]
pub fn derive_schema_model(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    expand_schema_model(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// Attributes accepted by `#[column(...)]`
#[derive(Default)]
struct ColumnAttrs {
    name: Option<LitStr>,
    column_type: Option<LitStr>,
    sql_type: Option<LitStr>,
    null: Option<bool>,
    default: Option<String>,
    limit: Option<u32>,
    precision: Option<u32>,
    scale: Option<u32>,
    primary: Option<bool>,
    skip: bool,
}

fn expand_schema_model(input: DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let model_name = name.to_string();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    name,
                    "SchemaModel only supports structs with named fields",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                "SchemaModel only supports structs",
            ))
        }
    };

    let table_name = match parse_table_name(&input)? {
        Some(table) => quote! { ::std::string::String::from(#table) },
        None => quote! { ::schema_assert::utils::naming::table_name_for(#model_name) },
    };

    let mut columns = Vec::new();
    for field in fields {
        let attrs = parse_column_attrs(field)?;
        if attrs.skip {
            continue;
        }

        let column_name = match (&attrs.name, &field.ident) {
            (Some(name), _) => name.value(),
            (None, Some(ident)) => ident.to_string(),
            (None, None) => continue,
        };
        let rust_type = field.ty.to_token_stream().to_string();
        let overrides = column_overrides(&attrs);

        columns.push(quote! {
            {
                #[allow(unused_mut)]
                let mut column = ::schema_assert::models::column_for_rust_type(#column_name, #rust_type);
                #(#overrides)*
                column
            }
        });
    }

    Ok(quote! {
        #[automatically_derived]
        impl #impl_generics ::schema_assert::models::SchemaModel for #name #ty_generics #where_clause {
            fn model_name() -> &'static str {
                #model_name
            }

            fn table_name() -> ::std::string::String {
                #table_name
            }

            fn column_definitions() -> ::std::vec::Vec<::schema_assert::schema::ColumnMetadata> {
                ::std::vec![#(#columns),*]
            }
        }
    })
}

/// Read `#[schema_model(table = "...")]`
fn parse_table_name(input: &DeriveInput) -> syn::Result<Option<LitStr>> {
    let mut table = None;

    for attr in &input.attrs {
        if !attr.path().is_ident("schema_model") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("table") {
                table = Some(meta.value()?.parse::<LitStr>()?);
                Ok(())
            } else {
                Err(meta.error("unsupported schema_model attribute"))
            }
        })?;
    }

    Ok(table)
}

fn parse_column_attrs(field: &syn::Field) -> syn::Result<ColumnAttrs> {
    let mut attrs = ColumnAttrs::default();

    for attr in &field.attrs {
        if !attr.path().is_ident("column") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                attrs.name = Some(meta.value()?.parse()?);
            } else if meta.path.is_ident("type") {
                attrs.column_type = Some(meta.value()?.parse()?);
            } else if meta.path.is_ident("sql_type") {
                attrs.sql_type = Some(meta.value()?.parse()?);
            } else if meta.path.is_ident("null") {
                attrs.null = Some(parse_flag(&meta)?);
            } else if meta.path.is_ident("primary") {
                attrs.primary = Some(parse_flag(&meta)?);
            } else if meta.path.is_ident("default") {
                attrs.default = Some(parse_literal_text(&meta)?);
            } else if meta.path.is_ident("limit") {
                attrs.limit = Some(parse_size(&meta)?);
            } else if meta.path.is_ident("precision") {
                attrs.precision = Some(parse_size(&meta)?);
            } else if meta.path.is_ident("scale") {
                attrs.scale = Some(parse_size(&meta)?);
            } else if meta.path.is_ident("skip") {
                attrs.skip = true;
            } else {
                return Err(meta.error("unsupported column attribute"));
            }
            Ok(())
        })?;
    }

    Ok(attrs)
}

/// `flag` alone means true; `flag = false` is explicit
fn parse_flag(meta: &ParseNestedMeta) -> syn::Result<bool> {
    if meta.input.peek(Token![=]) {
        let value: LitBool = meta.value()?.parse()?;
        Ok(value.value)
    } else {
        Ok(true)
    }
}

fn parse_size(meta: &ParseNestedMeta) -> syn::Result<u32> {
    let value: LitInt = meta.value()?.parse()?;
    value.base10_parse()
}

/// Defaults may be written as any literal; they are stored as text
fn parse_literal_text(meta: &ParseNestedMeta) -> syn::Result<String> {
    let lit: Lit = meta.value()?.parse()?;
    match lit {
        Lit::Str(s) => Ok(s.value()),
        Lit::Int(i) => Ok(i.base10_digits().to_string()),
        Lit::Float(f) => Ok(f.base10_digits().to_string()),
        Lit::Bool(b) => Ok(b.value.to_string()),
        other => Err(syn::Error::new_spanned(other, "unsupported default literal")),
    }
}

/// Statements applied to the inferred column, in a fixed order so that an
/// explicit `type` wins over the one derived from `sql_type`
fn column_overrides(attrs: &ColumnAttrs) -> Vec<TokenStream2> {
    let mut overrides = Vec::new();

    if let Some(sql_type) = &attrs.sql_type {
        overrides.push(quote! {
            column = ::schema_assert::schema::ColumnMetadata::from_sql_type(
                &column.name,
                #sql_type,
                ::std::option::Option::None,
                column.null,
            );
        });
    }
    if let Some(column_type) = &attrs.column_type {
        overrides.push(quote! { column.column_type = ::std::string::String::from(#column_type); });
    }
    if let Some(null) = attrs.null {
        overrides.push(quote! { column.null = #null; });
    }
    if let Some(default) = &attrs.default {
        overrides.push(quote! {
            column.default = ::std::option::Option::Some(::std::string::String::from(#default));
        });
    }
    if let Some(limit) = attrs.limit {
        overrides.push(quote! { column.limit = ::std::option::Option::Some(#limit); });
    }
    if let Some(precision) = attrs.precision {
        overrides.push(quote! { column.precision = ::std::option::Option::Some(#precision); });
    }
    if let Some(scale) = attrs.scale {
        overrides.push(quote! { column.scale = ::std::option::Option::Some(#scale); });
    }
    if let Some(primary) = attrs.primary {
        overrides.push(quote! { column.primary = #primary; });
    }

    overrides
}
