// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::io::Write;

const CATALOG: &str = r#"{
    "chrome": {
        "default": "100.0",
        "versions": {
            "100.0": {
                "image": "browsers/chrome:100",
                "port": "4444",
                "vnc": "5900",
                "path": "/",
                "shmSize": 1073741824,
                "tmpfs": { "/tmp": "size=512m" },
                "hosts": ["c:3"]
            },
            "99.0": { "image": "browsers/chrome:99", "port": "4444" }
        }
    },
    "firefox": {
        "default": "120.0",
        "versions": {
            "120.0": { "image": "browsers/firefox:120", "port": "4444", "path": "/wd/hub" }
        }
    }
}"#;

#[test]
fn empty_version_selects_default() {
    let catalog = Catalog::from_json(CATALOG).unwrap();
    let (version, browser) = catalog.find("chrome", "").unwrap();
    assert_eq!(version, "100.0");
    assert_eq!(browser.image, "browsers/chrome:100");
    assert_eq!(browser.shm_size, 1_073_741_824);
    assert_eq!(browser.tmpfs.get("/tmp").map(String::as_str), Some("size=512m"));
    assert_eq!(browser.hosts, vec!["c:3"]);
}

#[test]
fn exact_version_match() {
    let catalog = Catalog::from_json(CATALOG).unwrap();
    let (version, browser) = catalog.find("chrome", "99.0").unwrap();
    assert_eq!(version, "99.0");
    assert_eq!(browser.image, "browsers/chrome:99");
    assert!(browser.vnc.is_empty());
}

#[test]
fn version_prefix_match() {
    let catalog = Catalog::from_json(CATALOG).unwrap();
    let (version, _) = catalog.find("firefox", "120").unwrap();
    assert_eq!(version, "120.0");
}

#[yare::parameterized(
    unknown_browser = { "opera", "" },
    unknown_version = { "chrome", "42" },
)]
fn find_misses(name: &str, version: &str) {
    let catalog = Catalog::from_json(CATALOG).unwrap();
    assert!(catalog.find(name, version).is_none());
}

#[test]
fn entries_lists_every_version() {
    let catalog = Catalog::from_json(CATALOG).unwrap();
    let entries: Vec<_> = catalog.entries().map(|(n, v, _)| format!("{n}:{v}")).collect();
    assert_eq!(entries, vec!["chrome:100.0", "chrome:99.0", "firefox:120.0"]);
}

#[test]
fn names_are_sorted() {
    let catalog = Catalog::from_json(CATALOG).unwrap();
    assert_eq!(catalog.names().collect::<Vec<_>>(), vec!["chrome", "firefox"]);
}

#[test]
fn load_reads_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(CATALOG.as_bytes()).unwrap();
    let catalog = Catalog::load(file.path()).unwrap();
    assert!(!catalog.is_empty());
}

#[test]
fn load_reports_missing_file() {
    let err = Catalog::load(Path::new("/nonexistent/browsers.json")).unwrap_err();
    assert!(matches!(err, CatalogError::Read { .. }));
}

#[test]
fn malformed_json_is_a_parse_error() {
    assert!(matches!(Catalog::from_json("{"), Err(CatalogError::Parse(_))));
}
