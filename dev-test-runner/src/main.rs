//! Runs the JSON case manifest against the library:
//!
//! dev-test-runner <manifest.json> [name-regex]
//!
//! Every case checks the `with_children(children)` round trip on every
//! subtree, edge-node placement, `to_json` determinism, and the expected
//! projection/rendering when the case provides one.
mod manifest;

use anyhow::{Context, Result, bail};
use regex::Regex;

use repr_tree::{Repr, ToRepr, pretty, to_json, walk};

use manifest::Case;

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let manifest_path = args.next().unwrap_or_else(|| "dev-test-runner/cases.json".to_string());
    let filter = args.next().map(|s| Regex::new(&s)).transpose().context("invalid name filter")?;

    let source = std::fs::read_to_string(&manifest_path)
        .with_context(|| format!("failed to read {manifest_path}"))?;
    let manifest = manifest::from_str_with_path(&source)
        .with_context(|| format!("failed to parse {manifest_path}"))?;

    let mut failed = 0usize;
    let mut ran = 0usize;
    for case in &manifest.cases {
        if filter.as_ref().is_some_and(|re| !re.is_match(&case.name)) {
            continue;
        }
        ran += 1;
        match run_case(case) {
            Ok(()) => eprintln!("✅ {}", case.name),
            Err(error) => {
                failed += 1;
                eprintln!("❌ {}: {error:#}", case.name);
            }
        }
    }

    eprintln!("—— {ran} case(s), {failed} failed ——");
    if failed > 0 {
        bail!("{failed} case(s) failed");
    }
    Ok(())
}

fn build(case: &Case) -> Result<Repr> {
    let mut repr = case.input.to_repr();
    if let Some(pattern) = case.redact.as_deref() {
        repr = walk::redact(&repr, &Regex::new(pattern)?)?;
    }
    if let Some(max_depth) = case.max_depth {
        repr = walk::prune_depth(&repr, max_depth)?;
    }
    Ok(repr)
}

fn run_case(case: &Case) -> Result<()> {
    let repr = build(case)?;
    check_round_trip(&repr)?;
    walk::validate(&repr)?;

    // an independently built tree must project to the same text
    let first = to_json(&repr);
    let second = to_json(&build(case)?);
    if serde_json::to_string(&first)? != serde_json::to_string(&second)? {
        bail!("to_json is not deterministic: {first} vs {second}");
    }

    if let Some(expect) = case.expect.as_ref() {
        if &first != expect {
            bail!("projection mismatch\n  expected: {expect}\n  actual:   {first}");
        }
    }
    if let Some(expect_text) = case.expect_text.as_deref() {
        let text = pretty::render_flat(&repr);
        if text != expect_text {
            bail!("rendering mismatch\n  expected: {expect_text}\n  actual:   {text}");
        }
    }
    Ok(())
}

/// `with_children(children)` must give back an equal node, at every depth.
fn check_round_trip(root: &Repr) -> Result<()> {
    let mut failure = None;
    walk::visit(root, &mut |path, node| {
        if failure.is_some() {
            return;
        }
        match node.with_children(node.children()) {
            Ok(rebuilt) if &rebuilt == node => {}
            Ok(rebuilt) => failure = Some(format!("{path}: rebuilt {rebuilt} differs from {node}")),
            Err(error) => failure = Some(format!("{path}: {error}")),
        }
    });
    match failure {
        Some(message) => bail!("round trip failed at {message}"),
        None => Ok(()),
    }
}
