//! Shared utilities for integration tests.

use std::io::Write;

use tempfile::NamedTempFile;
use trie_router::RouteMatch;

/// Handler chain of a match, dereferenced.
#[allow(dead_code)]
pub fn names<'t>(found: &RouteMatch<'t, &'static str>) -> Vec<&'static str> {
    found.handlers().iter().map(|h| **h).collect()
}

/// Handler chain of a match over handler names loaded from a config file.
#[allow(dead_code)]
pub fn string_names(found: &RouteMatch<'_, String>) -> Vec<String> {
    found.handlers().iter().map(|h| h.to_string()).collect()
}

/// Write `contents` to a temporary `.toml` file that lives as long as the handle.
#[allow(dead_code)]
pub fn write_config(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}
