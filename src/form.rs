//! Decoded `application/x-www-form-urlencoded` submissions.

use std::collections::HashMap;

use url::form_urlencoded;

/// Field name → value pairs from a submitted HTML form.
///
/// When a field is repeated the last occurrence wins.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Form {
    fields: HashMap<String, String>,
}

impl Form {
    /// Decodes a URL-encoded body. Invalid UTF-8 is replaced, never rejected.
    pub fn parse(body: &[u8]) -> Self {
        form_urlencoded::parse(body)
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    /// The submitted value, if the field was present.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// The submitted value, with an absent field read as `""`.
    pub fn value(&self, field: &str) -> &str {
        self.get(field).unwrap_or_default()
    }

    /// A copy holding only `fields`; everything else the client sent is dropped.
    pub fn only(&self, fields: &[&str]) -> Self {
        fields
            .iter()
            .filter_map(|name| self.fields.get_key_value(*name))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

impl FromIterator<(String, String)> for Form {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self { fields: iter.into_iter().collect() }
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for Form {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        iter.into_iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect()
    }
}
