//! Query parameters
//!
//! NCM APIv3 filters collections with bracketed parameter names:
//! `filter[email]=...`, `filter[last_login][gte]=...`, `search[first_name]=...`,
//! `filter[fields]=a,b` and `sort=-name`. [`QueryParams`] renders them and
//! remembers which resource fields were referenced so a call can be checked
//! against an endpoint's allowlist before anything goes on the wire.

use crate::error::{Error, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Display;
use std::str::FromStr;

/// Comparison operators accepted in `filter[field][op]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterOp {
    Lt,
    Lte,
    Gt,
    Gte,
    Ne,
    Not,
}

impl FilterOp {
    /// Wire name of the operator
    pub fn as_str(self) -> &'static str {
        match self {
            FilterOp::Lt => "lt",
            FilterOp::Lte => "lte",
            FilterOp::Gt => "gt",
            FilterOp::Gte => "gte",
            FilterOp::Ne => "ne",
            FilterOp::Not => "not",
        }
    }
}

impl FromStr for FilterOp {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "lt" => Ok(FilterOp::Lt),
            "lte" => Ok(FilterOp::Lte),
            "gt" => Ok(FilterOp::Gt),
            "gte" => Ok(FilterOp::Gte),
            "ne" => Ok(FilterOp::Ne),
            "not" => Ok(FilterOp::Not),
            other => Err(Error::invalid_params([format!("unknown filter operator '{other}'")])),
        }
    }
}

/// Query parameters for a collection request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    params: BTreeMap<String, String>,
    referenced: BTreeSet<String>,
}

impl QueryParams {
    /// Create empty parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Exact-match filter: `filter[field]=value`
    ///
    /// A comma-separated value matches any of the listed values.
    #[must_use]
    pub fn filter(mut self, field: impl Into<String>, value: impl Display) -> Self {
        let field = field.into();
        self.params
            .insert(format!("filter[{field}]"), value.to_string());
        self.referenced.insert(field);
        self
    }

    /// Comparison filter: `filter[field][op]=value`
    #[must_use]
    pub fn filter_op(mut self, field: impl Into<String>, op: FilterOp, value: impl Display) -> Self {
        let field = field.into();
        self.params.insert(
            format!("filter[{field}][{}]", op.as_str()),
            value.to_string(),
        );
        self.referenced.insert(field);
        self
    }

    /// Filter written as `field` or `field__op`
    pub fn filter_expr(self, expr: &str, value: impl Display) -> Result<Self> {
        match expr.split_once("__") {
            Some((field, op)) => Ok(self.filter_op(field, op.parse()?, value)),
            None => Ok(self.filter(expr, value)),
        }
    }

    /// Partial, case-insensitive match: `search[field]=value`
    #[must_use]
    pub fn search(mut self, field: impl Into<String>, value: impl Display) -> Self {
        let field = field.into();
        self.params
            .insert(format!("search[{field}]"), value.to_string());
        self.referenced.insert(field);
        self
    }

    /// Restrict returned attributes: `filter[fields]=a,b`
    #[must_use]
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = fields
            .into_iter()
            .map(|f| f.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(",");
        self.params.insert("filter[fields]".to_string(), joined);
        self
    }

    /// Sort order, e.g. `-first_name`
    #[must_use]
    pub fn sort(mut self, expr: impl Into<String>) -> Self {
        self.params.insert("sort".to_string(), expr.into());
        self
    }

    /// Raw parameter, not checked against any allowlist
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Display) -> Self {
        self.params.insert(key.into(), value.to_string());
        self
    }

    /// Look up a rendered parameter
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Check if no parameters are set
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Number of rendered parameters
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Rendered parameters in key order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.params.iter()
    }

    /// Resource fields referenced by filters and searches
    pub fn referenced_fields(&self) -> impl Iterator<Item = &str> {
        self.referenced.iter().map(String::as_str)
    }

    /// Reject fields outside `allowed`
    pub fn validate(&self, allowed: &[&str]) -> Result<()> {
        let bad: Vec<&str> = self
            .referenced_fields()
            .filter(|field| !allowed.contains(field))
            .collect();
        if bad.is_empty() {
            Ok(())
        } else {
            Err(Error::invalid_params(bad))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test]
    fn test_render_parameters() {
        let query = QueryParams::new()
            .filter("email", "a@example.com,b@example.com")
            .filter_op("last_login", FilterOp::Gte, "2024-01-01")
            .search("first_name", "nat")
            .fields(["first_name", "last_name"])
            .sort("-first_name")
            .param("page[after]", "abc");

        let rendered: Vec<(&str, &str)> = query
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        assert_eq!(
            rendered,
            vec![
                ("filter[email]", "a@example.com,b@example.com"),
                ("filter[fields]", "first_name,last_name"),
                ("filter[last_login][gte]", "2024-01-01"),
                ("page[after]", "abc"),
                ("search[first_name]", "nat"),
                ("sort", "-first_name"),
            ]
        );
        assert_eq!(
            query.referenced_fields().collect::<Vec<_>>(),
            vec!["email", "first_name", "last_login"]
        );
    }

    #[test_case("email", "filter[email]" ; "plain field")]
    #[test_case("last_login__lt", "filter[last_login][lt]" ; "less than")]
    #[test_case("email__not", "filter[email][not]" ; "negation")]
    #[test_case("is_active__ne", "filter[is_active][ne]" ; "not equal")]
    fn test_filter_expr(expr: &str, key: &str) {
        let query = QueryParams::new().filter_expr(expr, true).unwrap();
        assert_eq!(query.get(key), Some("true"));
    }

    #[test]
    fn test_filter_expr_unknown_operator() {
        let err = QueryParams::new().filter_expr("name__like", "x").unwrap_err();
        assert!(matches!(err, Error::InvalidParameters { .. }));
    }

    #[test]
    fn test_validate_against_allowlist() {
        let allowed = ["email", "first_name"];
        let ok = QueryParams::new()
            .filter("email", "a@b.c")
            .fields(["anything"])
            .sort("-whatever");
        assert!(ok.validate(&allowed).is_ok());

        let bad = QueryParams::new()
            .filter("colour", "red")
            .search("size", "xl")
            .filter("email", "a@b.c");
        match bad.validate(&allowed) {
            Err(Error::InvalidParameters { params }) => {
                assert_eq!(params, vec!["colour".to_string(), "size".to_string()]);
            }
            other => panic!("expected InvalidParameters, got {other:?}"),
        }
    }

    #[test]
    fn test_raw_params_are_not_validated() {
        let query = QueryParams::new().param("filter[colour]", "red");
        assert!(query.validate(&[]).is_ok());
        assert_eq!(query.len(), 1);
        assert!(!query.is_empty());
    }
}
