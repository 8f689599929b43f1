// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `drover check`: validate a browser catalog without touching the runtime.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use drover_core::{Browser, Caps, Catalog, Environment, PortPlan};
use serde::Serialize;

use crate::output::{self, OutputFormat};

#[derive(Args)]
pub struct CheckArgs {
    /// Catalog JSON file
    pub catalog: PathBuf,
}

#[derive(Debug, Serialize)]
pub struct Problem {
    pub browser: String,
    pub version: String,
    pub reason: String,
}

#[derive(Debug, Serialize)]
pub struct Report {
    pub checked: usize,
    pub problems: Vec<Problem>,
}

/// Problems with one definition: both ports must parse and an image is required.
fn problems(name: &str, version: &str, browser: &Browser) -> Vec<Problem> {
    let problem = |reason: String| Problem {
        browser: name.to_string(),
        version: version.to_string(),
        reason,
    };
    let mut found = Vec::new();
    if browser.image.is_empty() {
        found.push(problem("no image".to_string()));
    }
    let with_vnc = Caps { vnc: "true".to_string(), ..Caps::default() };
    if let Err(e) = PortPlan::resolve(browser, &with_vnc, &Environment::default()) {
        found.push(problem(e.to_string()));
    }
    found
}

pub fn check(catalog: &Catalog) -> Report {
    let mut report = Report { checked: 0, problems: Vec::new() };
    for (name, version, browser) in catalog.entries() {
        report.checked += 1;
        report.problems.extend(problems(name, version, browser));
    }
    for name in catalog.names() {
        if catalog.find(name, "").is_none() {
            report.problems.push(Problem {
                browser: name.to_string(),
                version: String::new(),
                reason: "default version not found".to_string(),
            });
        }
    }
    report
}

fn render(report: &Report) -> String {
    let mut lines: Vec<String> = report
        .problems
        .iter()
        .map(|p| {
            if p.version.is_empty() {
                format!("{}: {}", p.browser, p.reason)
            } else {
                format!("{} {}: {}", p.browser, p.version, p.reason)
            }
        })
        .collect();
    lines.push(format!("{} definitions checked, {} problems", report.checked, report.problems.len()));
    lines.join("\n")
}

pub fn handle(args: CheckArgs, format: OutputFormat) -> Result<()> {
    let catalog = Catalog::load(&args.catalog)
        .with_context(|| format!("loading {}", args.catalog.display()))?;
    if catalog.is_empty() {
        bail!("catalog {} defines no browsers", args.catalog.display());
    }
    let report = check(&catalog);
    output::print(format, &report, render)?;
    if !report.problems.is_empty() {
        bail!("{} invalid definitions", report.problems.len());
    }
    Ok(())
}

#[cfg(test)]
#[path = "check_tests.rs"]
mod tests;
