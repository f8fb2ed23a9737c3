use convert_case::{ Case, Casing };
use syn::meta::ParseNestedMeta;
use syn::{ parenthesized, token, Attribute, Error, Expr, LitStr, Token };

///
/// RenameRule
///
/// serde's `rename_all` values, applied to snake_case field identifiers.
///

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenameRule {
    Lower,
    Upper,
    Pascal,
    Camel,
    Snake,
    ScreamingSnake,
    Kebab,
    ScreamingKebab,
}

impl RenameRule {
    pub fn parse(rule: &str) -> Option<Self> {
        let rule = match rule {
            "lowercase" => Self::Lower,
            "UPPERCASE" => Self::Upper,
            "PascalCase" => Self::Pascal,
            "camelCase" => Self::Camel,
            "snake_case" => Self::Snake,
            "SCREAMING_SNAKE_CASE" => Self::ScreamingSnake,
            "kebab-case" => Self::Kebab,
            "SCREAMING-KEBAB-CASE" => Self::ScreamingKebab,
            _ => return None,
        };
        Some(rule)
    }

    pub fn apply(self, field: &str) -> String {
        match self {
            Self::Lower | Self::Snake => field.to_string(),
            Self::Upper | Self::ScreamingSnake => field.to_ascii_uppercase(),
            Self::Pascal => field.to_case(Case::Pascal),
            Self::Camel => field.to_case(Case::Camel),
            Self::Kebab => field.replace('_', "-"),
            Self::ScreamingKebab => field.replace('_', "-").to_ascii_uppercase(),
        }
    }
}

///
/// ContainerAttrs
///

#[derive(Debug, Default)]
pub struct ContainerAttrs {
    pub rename_all: Option<RenameRule>,
    pub transparent: bool,
    pub custom: bool,
}

impl ContainerAttrs {
    pub fn from_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut out = Self::default();

        for attr in attrs {
            if attr.path().is_ident("serde") {
                attr.parse_nested_meta(|meta| {
                    if meta.path.is_ident("rename_all") {
                        if let Some(lit) = serialize_value(&meta)? {
                            let rule = RenameRule::parse(&lit.value()).ok_or_else(|| {
                                Error::new_spanned(&lit, "unknown rename_all rule")
                            })?;
                            out.rename_all = Some(rule);
                        }
                    } else if meta.path.is_ident("transparent") {
                        out.transparent = true;
                    } else {
                        skip_value(&meta)?;
                    }
                    Ok(())
                })?;
            } else if attr.path().is_ident("index") {
                attr.parse_nested_meta(|meta| {
                    if meta.path.is_ident("custom") {
                        out.custom = true;
                        Ok(())
                    } else {
                        Err(meta.error("unknown container index attribute, expected `custom`"))
                    }
                })?;
            }
        }

        Ok(out)
    }

    pub fn field_name(&self, ident: &str) -> String {
        match self.rename_all {
            Some(rule) => rule.apply(ident),
            None => ident.to_string(),
        }
    }
}

///
/// SchemaAttr
///

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SchemaAttr {
    Exclude,
    Disabled,
    Kind(String),
    Tag(String),
}

///
/// FieldAttrs
///

#[derive(Debug, Default)]
pub struct FieldAttrs {
    pub rename: Option<String>,
    pub skip: bool,
    pub flatten: bool,
    pub schema: Option<SchemaAttr>,
}

impl FieldAttrs {
    pub fn from_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut out = Self::default();

        for attr in attrs {
            if attr.path().is_ident("serde") {
                attr.parse_nested_meta(|meta| {
                    if meta.path.is_ident("rename") {
                        if let Some(lit) = serialize_value(&meta)? {
                            out.rename = Some(lit.value());
                        }
                    } else if meta.path.is_ident("skip") || meta.path.is_ident("skip_serializing") {
                        out.skip = true;
                    } else if meta.path.is_ident("flatten") {
                        out.flatten = true;
                    } else {
                        skip_value(&meta)?;
                    }
                    Ok(())
                })?;
            } else if attr.path().is_ident("index") {
                attr.parse_nested_meta(|meta| {
                    let schema = if meta.path.is_ident("exclude") {
                        SchemaAttr::Exclude
                    } else if meta.path.is_ident("disabled") {
                        SchemaAttr::Disabled
                    } else if meta.path.is_ident("kind") {
                        let lit: LitStr = meta.value()?.parse()?;
                        if lit.value().is_empty() {
                            return Err(Error::new_spanned(&lit, "index kind must not be empty"));
                        }
                        SchemaAttr::Kind(lit.value())
                    } else if meta.path.is_ident("tag") {
                        let lit: LitStr = meta.value()?.parse()?;
                        SchemaAttr::Tag(lit.value())
                    } else {
                        return Err(
                            meta.error(
                                "unknown index attribute, expected `exclude`, `disabled`, `kind = \"...\"` or `tag = \"...\"`"
                            )
                        );
                    };

                    if out.schema.is_some() {
                        return Err(meta.error("only one index override is allowed per field"));
                    }
                    out.schema = Some(schema);
                    Ok(())
                })?;
            }
        }

        Ok(out)
    }
}

/// Reads `key = "value"` or the serialize half of `key(serialize = "value", ...)`.
fn serialize_value(meta: &ParseNestedMeta) -> syn::Result<Option<LitStr>> {
    if meta.input.peek(Token![=]) {
        return Ok(Some(meta.value()?.parse()?));
    }

    let mut value = None;
    meta.parse_nested_meta(|inner| {
        if inner.path.is_ident("serialize") {
            value = Some(inner.value()?.parse()?);
        } else {
            skip_value(&inner)?;
        }
        Ok(())
    })?;
    Ok(value)
}

/// Consumes the value of a serde option this derive does not care about.
fn skip_value(meta: &ParseNestedMeta) -> syn::Result<()> {
    if meta.input.peek(Token![=]) {
        let _: Expr = meta.value()?.parse()?;
    } else if meta.input.peek(token::Paren) {
        let content;
        parenthesized!(content in meta.input);
        let _: proc_macro2::TokenStream = content.parse()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn test_rename_rules() {
        assert_eq!(RenameRule::parse("camelCase").map(|r| r.apply("created_at")), Some("createdAt".to_string()));
        assert_eq!(RenameRule::Pascal.apply("created_at"), "CreatedAt");
        assert_eq!(RenameRule::Kebab.apply("created_at"), "created-at");
        assert_eq!(RenameRule::ScreamingSnake.apply("created_at"), "CREATED_AT");
        assert_eq!(RenameRule::ScreamingKebab.apply("created_at"), "CREATED-AT");
        assert_eq!(RenameRule::Lower.apply("created_at"), "created_at");
        assert!(RenameRule::parse("Title Case").is_none());
    }

    #[test]
    fn test_field_attrs() {
        let attrs: Vec<Attribute> = vec![
            parse_quote!(#[serde(rename = "full_name", default, skip_serializing_if = "Option::is_none")]),
            parse_quote!(#[index(kind = "keyword")])
        ];
        let parsed = FieldAttrs::from_attrs(&attrs).unwrap();
        assert_eq!(parsed.rename.as_deref(), Some("full_name"));
        assert!(!parsed.skip);
        assert_eq!(parsed.schema, Some(SchemaAttr::Kind("keyword".to_string())));
    }

    #[test]
    fn test_serialize_rename() {
        let attrs: Vec<Attribute> = vec![
            parse_quote!(#[serde(rename(serialize = "out", deserialize = "in"), skip_serializing)])
        ];
        let parsed = FieldAttrs::from_attrs(&attrs).unwrap();
        assert_eq!(parsed.rename.as_deref(), Some("out"));
        assert!(parsed.skip);
    }

    #[test]
    fn test_field_attr_errors() {
        let empty: Vec<Attribute> = vec![parse_quote!(#[index(kind = "")])];
        assert!(FieldAttrs::from_attrs(&empty).is_err());
        let twice: Vec<Attribute> = vec![parse_quote!(#[index(exclude, disabled)])];
        assert!(FieldAttrs::from_attrs(&twice).is_err());
        let unknown: Vec<Attribute> = vec![parse_quote!(#[index(analyzer = "english")])];
        assert!(FieldAttrs::from_attrs(&unknown).is_err());
    }

    #[test]
    fn test_container_attrs() {
        let attrs: Vec<Attribute> = vec![
            parse_quote!(#[serde(rename_all = "camelCase", deny_unknown_fields)]),
            parse_quote!(#[index(custom)])
        ];
        let parsed = ContainerAttrs::from_attrs(&attrs).unwrap();
        assert_eq!(parsed.rename_all, Some(RenameRule::Camel));
        assert!(parsed.custom);
        assert_eq!(parsed.field_name("user_id"), "userId");
    }
}
