//! Code generation for `#[derive(Record)]`.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{
    spanned::Spanned, Data, DeriveInput, Error, Fields, GenericArgument, PathArguments, Result,
    Type,
};

use super::attrs::{parse_record_attrs, FieldKind};

/// Expands the derive into field constants and a `Record` impl.
pub fn record_derive_impl(input: DeriveInput) -> Result<TokenStream> {
    let struct_name = &input.ident;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(Error::new(
                    input.span(),
                    "Record can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(Error::new(
                input.span(),
                "Record can only be derived for structs",
            ))
        }
    };

    let mut arms = Vec::new();
    let mut constants = Vec::new();
    let mut names = Vec::new();

    for field in fields {
        let ident = field
            .ident
            .as_ref()
            .ok_or_else(|| Error::new(field.span(), "expected named field"))?;
        let attr = parse_record_attrs(&field.attrs)?;
        if attr.skip {
            continue;
        }

        let (optional, inner_ty) = match option_inner(&field.ty) {
            Some(inner) => (true, inner),
            None => (false, &field.ty),
        };

        let kind = match attr.kind.or_else(|| infer_kind(inner_ty)) {
            Some(kind) => kind,
            // Unannotated fields of other types stay private to the struct.
            None => continue,
        };

        let name = attr.rename.unwrap_or_else(|| ident.to_string());
        if names.contains(&name) {
            return Err(Error::new(
                field.span(),
                format!("duplicate record field name '{}'", name),
            ));
        }

        let const_name = format_ident!("{}", to_screaming_snake_case(&name));
        constants.push(quote! {
            /// Field name for filters and sorting.
            pub const #const_name: &'static str = #name;
        });

        let value = if optional {
            let present = value_expr(kind, quote!(value));
            quote! {
                match &self.#ident {
                    ::core::option::Option::Some(value) => #present,
                    ::core::option::Option::None => ::ems_filter::Value::None,
                }
            }
        } else {
            value_expr(kind, quote!(&self.#ident))
        };

        arms.push(quote! { #name => #value, });
        names.push(name);
    }

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics #struct_name #ty_generics #where_clause {
            #(#constants)*

            /// Every field name the accessor answers for, in declaration order.
            pub const FIELDS: &'static [&'static str] = &[#(#names),*];
        }

        impl #impl_generics ::ems_filter::Record for #struct_name #ty_generics #where_clause {
            fn field_value(&self, field: &str) -> ::ems_filter::Value<'_> {
                match field {
                    #(#arms)*
                    _ => ::ems_filter::Value::None,
                }
            }

            fn field_names() -> &'static [&'static str] {
                Self::FIELDS
            }
        }
    })
}

/// Builds the `Value` for a field, given an expression borrowing it.
fn value_expr(kind: FieldKind, field: TokenStream) -> TokenStream {
    match kind {
        FieldKind::String => quote! {
            ::ems_filter::Value::String(::core::convert::AsRef::<str>::as_ref(#field))
        },
        FieldKind::Number => quote! {
            ::ems_filter::Value::Number(::ems_filter::Number::from(*#field))
        },
        FieldKind::Date => quote! {
            ::ems_filter::RecordDate::record_date(#field)
        },
        FieldKind::Bool => quote! {
            ::ems_filter::Value::Bool(*#field)
        },
        FieldKind::Enum => quote! {
            ::ems_filter::Value::String(::ems_filter::RecordEnum::as_field_str(#field))
        },
    }
}

/// Returns `T` for a field typed `Option<T>`.
fn option_inner(ty: &Type) -> Option<&Type> {
    let segment = last_segment(ty)?;
    if segment.ident != "Option" {
        return None;
    }
    match &segment.arguments {
        PathArguments::AngleBracketed(args) => match args.args.first() {
            Some(GenericArgument::Type(inner)) if args.args.len() == 1 => Some(inner),
            _ => None,
        },
        _ => None,
    }
}

/// Guesses the kind of an unannotated field from its type name.
fn infer_kind(ty: &Type) -> Option<FieldKind> {
    if let Type::Reference(reference) = ty {
        return match &*reference.elem {
            Type::Path(path) if path.path.is_ident("str") => Some(FieldKind::String),
            _ => None,
        };
    }

    let segment = last_segment(ty)?;
    match segment.ident.to_string().as_str() {
        "String" => Some(FieldKind::String),
        "bool" => Some(FieldKind::Bool),
        "NaiveDate" | "NaiveDateTime" => Some(FieldKind::Date),
        "i8" | "i16" | "i32" | "i64" | "isize" | "u8" | "u16" | "u32" | "u64" | "usize"
        | "f32" | "f64" => Some(FieldKind::Number),
        _ => None,
    }
}

fn last_segment(ty: &Type) -> Option<&syn::PathSegment> {
    match ty {
        Type::Path(path) if path.qself.is_none() => path.path.segments.last(),
        _ => None,
    }
}

/// Converts a field name to SCREAMING_SNAKE_CASE.
fn to_screaming_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    let mut prev_was_lower = false;

    for c in s.chars() {
        if c.is_uppercase() {
            if prev_was_lower {
                result.push('_');
            }
            result.push(c);
            prev_was_lower = false;
        } else if c == '_' || c == '-' || c == ' ' || c == '.' {
            result.push('_');
            prev_was_lower = false;
        } else {
            result.push(c.to_ascii_uppercase());
            prev_was_lower = c.is_alphanumeric();
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ty(src: &str) -> Type {
        syn::parse_str(src).unwrap()
    }

    #[test]
    fn screaming_snake_case() {
        assert_eq!(to_screaming_snake_case("name"), "NAME");
        assert_eq!(to_screaming_snake_case("hire_date"), "HIRE_DATE");
        assert_eq!(to_screaming_snake_case("leaveType"), "LEAVE_TYPE");
        assert_eq!(to_screaming_snake_case("start-date"), "START_DATE");
    }

    #[test]
    fn infers_kinds_from_types() {
        assert_eq!(infer_kind(&ty("String")), Some(FieldKind::String));
        assert_eq!(infer_kind(&ty("&'static str")), Some(FieldKind::String));
        assert_eq!(infer_kind(&ty("u32")), Some(FieldKind::Number));
        assert_eq!(infer_kind(&ty("f64")), Some(FieldKind::Number));
        assert_eq!(infer_kind(&ty("bool")), Some(FieldKind::Bool));
        assert_eq!(infer_kind(&ty("chrono::NaiveDate")), Some(FieldKind::Date));
        assert_eq!(infer_kind(&ty("Vec<String>")), None);
        assert_eq!(infer_kind(&ty("LeaveStatus")), None);
    }

    #[test]
    fn unwraps_option() {
        let field = ty("Option<NaiveDate>");
        let inner = option_inner(&field).unwrap();
        assert_eq!(infer_kind(inner), Some(FieldKind::Date));
        assert!(option_inner(&ty("Vec<u8>")).is_none());
    }

    #[test]
    fn expands_record_impl() {
        let input: DeriveInput = syn::parse_str(
            r#"
            struct Leave {
                #[record(Enum)]
                status: LeaveStatus,
                #[record(rename = "date")]
                start_date: NaiveDate,
                days: u32,
                #[record(skip)]
                notes: String,
                attachments: Vec<String>,
            }
            "#,
        )
        .unwrap();

        let code = record_derive_impl(input).unwrap().to_string();
        assert!(code.contains("pub const STATUS"));
        assert!(code.contains("pub const DATE"));
        assert!(code.contains("pub const DAYS"));
        assert!(!code.contains("NOTES"));
        assert!(!code.contains("ATTACHMENTS"));
        assert!(code.contains("as_field_str"));
    }

    #[test]
    fn rejects_tuple_structs_and_enums() {
        let tuple: DeriveInput = syn::parse_str("struct Id(u32);").unwrap();
        assert!(record_derive_impl(tuple).is_err());

        let enumeration: DeriveInput = syn::parse_str("enum Status { Active }").unwrap();
        assert!(record_derive_impl(enumeration).is_err());
    }

    #[test]
    fn rejects_duplicate_names() {
        let input: DeriveInput = syn::parse_str(
            r#"
            struct Audit {
                #[record(rename = "date")]
                logged: NaiveDate,
                date: NaiveDate,
            }
            "#,
        )
        .unwrap();
        assert!(record_derive_impl(input).is_err());
    }
}
