//! Path parameter bindings.

use std::ops::Index;

use serde::Serialize;

/// One bound path parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Param {
    pub key: String,
    pub value: String,
}

/// Parameters bound by a match, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Params(Vec<Param>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// First value bound to `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|p| p.key == key)
            .map(|p| p.value.as_str())
    }

    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    /// Update the first binding of `key`, or append a new one.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|p| p.key == key) {
            Some(param) => param.value = value,
            None => self.0.push(Param { key, value }),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Param> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Zip `keys` with raw `values`. Keys without a value bind to `""`;
    /// surplus values are dropped.
    pub(crate) fn bind(keys: &[String], values: &[&str], unescape_values: bool) -> Self {
        let params = keys
            .iter()
            .enumerate()
            .map(|(i, key)| {
                let raw = values.get(i).copied().unwrap_or_default();
                let value = if unescape_values {
                    unescape(raw)
                } else {
                    raw.to_owned()
                };
                Param {
                    key: key.clone(),
                    value,
                }
            })
            .collect();
        Self(params)
    }
}

impl Index<usize> for Params {
    type Output = Param;

    fn index(&self, index: usize) -> &Param {
        &self.0[index]
    }
}

impl<'a> IntoIterator for &'a Params {
    type Item = &'a Param;
    type IntoIter = std::slice::Iter<'a, Param>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Query-style unescape: `+` becomes a space and `%XX` is decoded.
/// Malformed escapes or invalid UTF-8 leave the value untouched.
pub fn unescape(raw: &str) -> String {
    if !raw.contains(['%', '+']) {
        return raw.to_owned();
    }

    let bytes = raw.as_bytes();
    let well_formed = bytes.iter().enumerate().all(|(i, &b)| {
        b != b'%'
            || matches!(
                (bytes.get(i + 1), bytes.get(i + 2)),
                (Some(h), Some(l)) if h.is_ascii_hexdigit() && l.is_ascii_hexdigit()
            )
    });
    if !well_formed {
        return raw.to_owned();
    }

    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => raw.to_owned(),
    }
}
