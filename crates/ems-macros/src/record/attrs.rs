//! Parsing of `#[record(...)]` field attributes.

use proc_macro2::Span;
use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    spanned::Spanned,
    Attribute, Error, Expr, ExprLit, Ident, Lit, LitStr, Meta, Result, Token,
};

const EXPECTED_KINDS: &str = "String, Number, Date, Bool, Enum";

/// How a field is exposed to the filter engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Searchable text: `#[record(String)]`
    String,
    /// Numeric: `#[record(Number)]`
    Number,
    /// `NaiveDate` / `NaiveDateTime`, or any `RecordDate`: `#[record(Date)]`
    Date,
    /// Boolean: `#[record(Bool)]`
    Bool,
    /// Enum-like string via `RecordEnum`: `#[record(Enum)]`
    Enum,
}

impl FieldKind {
    /// Parses a kind name, as an identifier or a `ty = "..."` string.
    pub fn parse_name(name: &str, span: Span) -> Result<Self> {
        match name {
            "String" | "string" | "str" => Ok(FieldKind::String),
            "Number" | "number" => Ok(FieldKind::Number),
            "Date" | "date" | "DateTime" | "datetime" => Ok(FieldKind::Date),
            "Bool" | "bool" | "boolean" => Ok(FieldKind::Bool),
            "Enum" | "enum" => Ok(FieldKind::Enum),
            other => Err(Error::new(
                span,
                format!("unknown record field kind '{}'. Expected one of: {}", other, EXPECTED_KINDS),
            )),
        }
    }

    fn from_ident(ident: &Ident) -> Result<Self> {
        FieldKind::parse_name(&ident.to_string(), ident.span())
    }
}

/// Field-level attributes from `#[record(...)]`.
#[derive(Debug, Clone, Default)]
pub struct RecordAttr {
    /// Explicit kind. `None` means "infer from the field type".
    pub kind: Option<FieldKind>,
    /// Leave the field out of the accessor.
    pub skip: bool,
    /// Field name used in filters (default: the Rust field name).
    pub rename: Option<String>,
}

impl Parse for RecordAttr {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut attr = RecordAttr::default();
        let items: Punctuated<Meta, Token![,]> = Punctuated::parse_terminated(input)?;

        for meta in items {
            match &meta {
                Meta::Path(path) if path.is_ident("skip") => attr.skip = true,
                Meta::Path(path) => {
                    let ident = path.get_ident().ok_or_else(|| {
                        Error::new(path.span(), format!("expected {}, or skip", EXPECTED_KINDS))
                    })?;
                    attr.set_kind(FieldKind::from_ident(ident)?, ident.span())?;
                }
                Meta::NameValue(nv) if nv.path.is_ident("rename") => {
                    attr.rename = Some(string_value(&nv.value, "rename")?.value());
                }
                Meta::NameValue(nv) if nv.path.is_ident("ty") => {
                    let lit = string_value(&nv.value, "ty")?;
                    attr.set_kind(FieldKind::parse_name(&lit.value(), lit.span())?, lit.span())?;
                }
                Meta::NameValue(nv) => {
                    return Err(Error::new(
                        nv.path.span(),
                        "unknown record attribute. Expected: rename or ty",
                    ));
                }
                Meta::List(list) => {
                    return Err(Error::new(
                        list.span(),
                        "unexpected nested list in #[record(...)]",
                    ));
                }
            }
        }

        if attr.skip && (attr.kind.is_some() || attr.rename.is_some()) {
            return Err(Error::new(
                input.span(),
                "skip cannot be combined with a kind or rename",
            ));
        }

        Ok(attr)
    }
}

impl RecordAttr {
    fn set_kind(&mut self, kind: FieldKind, span: Span) -> Result<()> {
        if self.kind.replace(kind).is_some() {
            return Err(Error::new(span, "field kind given more than once"));
        }
        Ok(())
    }
}

fn string_value<'e>(value: &'e Expr, name: &str) -> Result<&'e LitStr> {
    match value {
        Expr::Lit(ExprLit {
            lit: Lit::Str(s), ..
        }) => Ok(s),
        other => Err(Error::new(
            other.span(),
            format!("{} must be a string literal", name),
        )),
    }
}

/// Extracts `#[record(...)]` from a field's attributes.
pub fn parse_record_attrs(attrs: &[Attribute]) -> Result<RecordAttr> {
    let mut found = None;
    for attr in attrs.iter().filter(|a| a.path().is_ident("record")) {
        if found.is_some() {
            return Err(Error::new(attr.span(), "duplicate #[record(...)] attribute"));
        }
        found = Some(attr.parse_args::<RecordAttr>()?);
    }
    Ok(found.unwrap_or_default())
}
