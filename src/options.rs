//! Query-string encoding of list options.
//!
//! List endpoints accept paging parameters and resource-specific filters as
//! query parameters. Options are plain `Serialize` structs whose serde field
//! names are the wire names; [`add_options`] encodes every field that is not
//! at its zero value and appends the result to a path.

use serde::Serialize;
use serde_json::Value;
use url::form_urlencoded;

use crate::error::{ArgError, Error, Result};

/// Generic paging parameters. The zero value requests no paging.
///
/// Resource-specific option structs embed this with `#[serde(flatten)]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ListOptions {
    /// 1-based page number.
    pub page: u32,
    /// Number of items per page.
    pub page_size: u32,
}

impl ListOptions {
    /// Options requesting page `page` with `page_size` items.
    pub fn page(page: u32, page_size: u32) -> Self {
        ListOptions { page, page_size }
    }
}

/// Appends the non-zero fields of `opts` to `path` as query parameters.
///
/// - `None` returns `path` unchanged.
/// - `null`, `false`, `0`, `""` and empty lists are skipped.
/// - Lists are encoded as repeated keys (`tag=1&tag=2`).
/// - Parameters are emitted in wire-name order, so equal options always
///   produce the same string.
/// - `?` or `&` is used depending on whether `path` already has a query.
///
/// # Errors
///
/// `Error::Encode` if `opts` fails to serialize, `Error::Arg` if it does not
/// serialize to a flat struct.
pub fn add_options<O: Serialize + ?Sized>(path: &str, opts: Option<&O>) -> Result<String> {
    let Some(opts) = opts else {
        return Ok(path.to_string());
    };

    let fields = match serde_json::to_value(opts).map_err(Error::Encode)? {
        Value::Object(fields) => fields,
        Value::Null => return Ok(path.to_string()),
        _ => return Err(ArgError::new("opts", "must serialize to a struct").into()),
    };

    let mut entries: Vec<(&String, &Value)> = fields.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));

    let mut query = form_urlencoded::Serializer::new(String::new());
    let mut appended = false;
    for (name, value) in entries {
        match value {
            Value::Array(items) => {
                for item in items {
                    appended |= append_scalar(&mut query, name, item)?;
                }
            }
            other => appended |= append_scalar(&mut query, name, other)?,
        }
    }
    if !appended {
        return Ok(path.to_string());
    }

    let separator = if path.contains('?') { '&' } else { '?' };
    Ok(format!("{path}{separator}{}", query.finish()))
}

/// Appends one scalar parameter unless it is a zero value. Returns whether
/// anything was written.
fn append_scalar(
    query: &mut form_urlencoded::Serializer<'_, String>,
    name: &str,
    value: &Value,
) -> Result<bool> {
    let encoded = match value {
        Value::Null | Value::Bool(false) => return Ok(false),
        Value::Bool(true) => "true".to_string(),
        Value::Number(n) => {
            if n.as_f64() == Some(0.0) {
                return Ok(false);
            }
            n.to_string()
        }
        Value::String(s) if s.is_empty() => return Ok(false),
        Value::String(s) => s.clone(),
        Value::Array(_) | Value::Object(_) => {
            return Err(ArgError::new(name, "nested values cannot be encoded as a query").into());
        }
    };
    query.append_pair(name, &encoded);
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize, Default)]
    struct TagFilter {
        #[serde(flatten)]
        paging: ListOptions,
        name: String,
        taxonomy_id: Option<i64>,
        #[serde(rename = "tag_id")]
        tag_ids: Vec<i64>,
        active: bool,
    }

    #[test]
    fn none_returns_path_unchanged() {
        let out = add_options::<ListOptions>("inventory/tags/", None).unwrap();
        assert_eq!(out, "inventory/tags/");
    }

    #[test]
    fn zero_options_return_path_unchanged() {
        let out = add_options("inventory/tags/", Some(&TagFilter::default())).unwrap();
        assert_eq!(out, "inventory/tags/");
    }

    #[test]
    fn only_non_zero_fields_are_encoded() {
        let opts = TagFilter {
            paging: ListOptions::page(2, 0),
            name: "VIP".to_string(),
            ..Default::default()
        };
        let out = add_options("inventory/tags/", Some(&opts)).unwrap();
        assert_eq!(out, "inventory/tags/?name=VIP&page=2");
    }

    #[test]
    fn lists_become_repeated_keys() {
        let opts = TagFilter {
            tag_ids: vec![3, 7],
            active: true,
            taxonomy_id: Some(5),
            ..Default::default()
        };
        let out = add_options("inventory/tags/", Some(&opts)).unwrap();
        assert_eq!(
            out,
            "inventory/tags/?active=true&tag_id=3&tag_id=7&taxonomy_id=5"
        );
    }

    #[test]
    fn existing_query_is_extended() {
        let opts = ListOptions::page(1, 50);
        let out = add_options("santa/rules/?configuration_id=4", Some(&opts)).unwrap();
        assert_eq!(out, "santa/rules/?configuration_id=4&page=1&page_size=50");
    }

    #[test]
    fn values_are_percent_encoded() {
        let opts = TagFilter {
            name: "a b&c".to_string(),
            ..Default::default()
        };
        let out = add_options("inventory/tags/", Some(&opts)).unwrap();
        assert_eq!(out, "inventory/tags/?name=a+b%26c");
    }

    #[test]
    fn encoding_is_stable() {
        let opts = TagFilter {
            paging: ListOptions::page(3, 25),
            name: "x".to_string(),
            ..Default::default()
        };
        let first = add_options("p/", Some(&opts)).unwrap();
        let second = add_options("p/", Some(&opts)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn non_struct_options_are_rejected() {
        let err = add_options("p/", Some(&42)).unwrap_err();
        assert!(matches!(err, Error::Arg(_)), "got {err:?}");
    }

    #[test]
    fn nested_objects_are_rejected() {
        let opts = serde_json::json!({"filter": {"name": "x"}});
        let err = add_options("p/", Some(&opts)).unwrap_err();
        assert!(matches!(err, Error::Arg(_)), "got {err:?}");
    }
}
