// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Browser catalog: image definitions keyed by browser name and version.
//!
//! ```json
//! {
//!   "chrome": {
//!     "default": "100.0",
//!     "versions": {
//!       "100.0": { "image": "browsers/chrome:100", "port": "4444", "path": "/" }
//!     }
//!   }
//! }
//! ```

use crate::Browser;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("read catalog {path}: {source}")]
    Read { path: String, source: std::io::Error },
    #[error("parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

/// All versions of one browser.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowserVersions {
    #[serde(default)]
    pub default: String,
    pub versions: BTreeMap<String, Browser>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    browsers: BTreeMap<String, BrowserVersions>,
}

impl Catalog {
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)
            .map_err(|source| CatalogError::Read { path: path.display().to_string(), source })?;
        Self::from_json(&json)
    }

    /// Look up a browser image.
    ///
    /// An empty `version` selects the browser's default. Otherwise an exact
    /// match wins, then the first version (in sorted order) that starts with
    /// `version`, so `"100"` finds `"100.0"`. Returns the resolved version
    /// alongside the definition.
    pub fn find(&self, name: &str, version: &str) -> Option<(&str, &Browser)> {
        let entry = self.browsers.get(name)?;
        let wanted = if version.is_empty() { entry.default.as_str() } else { version };
        if let Some((v, browser)) = entry.versions.get_key_value(wanted) {
            return Some((v.as_str(), browser));
        }
        entry
            .versions
            .iter()
            .find(|(v, _)| v.starts_with(wanted))
            .map(|(v, browser)| (v.as_str(), browser))
    }

    /// Every `(name, version, definition)` in the catalog.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str, &Browser)> {
        self.browsers.iter().flat_map(|(name, entry)| {
            entry.versions.iter().map(move |(v, browser)| (name.as_str(), v.as_str(), browser))
        })
    }

    /// Browser names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.browsers.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.browsers.is_empty()
    }
}

#[cfg(test)]
#[path = "catalog_tests.rs"]
mod tests;
