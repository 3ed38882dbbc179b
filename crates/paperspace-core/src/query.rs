//! Query-string encoding for optional request filters.
//!
//! Options structs implement [`QueryOptions`] to declare the query parameter
//! name of each field. [`add_options`] appends the populated ones to an
//! endpoint path.

use crate::error::{Error, Result};
use std::fmt::Display;
use url::{form_urlencoded, ParseError, Url};

/// Builder for assembling query parameter pairs.
#[derive(Debug, Default, Clone)]
pub struct QueryParams {
    pairs: Vec<(&'static str, String)>,
}

impl QueryParams {
    /// Create a new, empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Append a string value unless it is absent or empty.
    pub fn push_non_empty<S>(&mut self, key: &'static str, value: Option<S>)
    where
        S: AsRef<str>,
    {
        if let Some(value) = value {
            let value = value.as_ref();
            if !value.is_empty() {
                self.pairs.push((key, value.to_string()));
            }
        }
    }

    /// Append a required key/value pair.
    pub fn push<T>(&mut self, key: &'static str, value: T)
    where
        T: Display,
    {
        self.pairs.push((key, value.to_string()));
    }

    /// Return the collected key/value pairs.
    #[must_use]
    pub fn into_pairs(self) -> Vec<(&'static str, String)> {
        self.pairs
    }

    /// Returns true if no parameters have been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// A set of optional query filters for a read operation.
pub trait QueryOptions {
    /// Collect the populated fields under their query parameter names.
    fn query_params(&self) -> QueryParams;
}

/// Append the populated fields of `options` to `path` as a query string.
///
/// `None` returns the path untouched. Otherwise any query already on the
/// path is replaced and everything else (scheme, host, path segments,
/// fragment) is kept as written. When no field is populated no `?` is added.
///
/// # Errors
///
/// Returns an error if `path` is not a valid URL reference.
pub fn add_options<O>(path: &str, options: Option<&O>) -> Result<String>
where
    O: QueryOptions + ?Sized,
{
    let Some(options) = options else {
        return Ok(path.to_string());
    };

    match Url::parse(path) {
        Ok(_) | Err(ParseError::RelativeUrlWithoutBase) => {}
        Err(err) => {
            return Err(Error::InvalidUrl(format!(
                "Invalid endpoint path `{path}`: {err}"
            )))
        }
    }

    let (rest, fragment) = match path.split_once('#') {
        Some((rest, fragment)) => (rest, Some(fragment)),
        None => (path, None),
    };
    let base = rest.split_once('?').map_or(rest, |(base, _)| base);

    let pairs = options.query_params().into_pairs();
    let mut encoded = base.to_string();
    if !pairs.is_empty() {
        let query = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(pairs.iter().map(|(key, value)| (*key, value.as_str())))
            .finish();
        encoded.push('?');
        encoded.push_str(&query);
    }
    if let Some(fragment) = fragment {
        encoded.push('#');
        encoded.push_str(fragment);
    }
    Ok(encoded)
}
