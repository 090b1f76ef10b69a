//! Minimal CLI: JSON documents → Repr → (pretty text | JSON | structural diff)
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use regex::Regex;
use serde_json::Value;

use repr_tree::pretty::PrettyOptions;
use repr_tree::{Repr, ToRepr, diff, pretty, to_json, walk};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// view JSON documents through the structural debug representation
#[derive(Parser, Debug)]
pub struct CommandLineInterface {
    /// print diagnostics to stderr
    #[arg(long, short, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// pretty-print each document
    Show(ShowOut),
    /// re-emit each document through the JSON projection
    Json(JsonOut),
    /// list structural changes between two documents
    Diff(DiffOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// treat input as newline-delimited JSON (NDJSON)
    #[arg(long, default_value_t = false)]
    ndjson: bool,

    /// JSON Pointer to select a subnode in each document (e.g. /data/items/0/payload)
    #[arg(long)]
    json_pointer: Option<String>,

    /// JQ pre-process filter for each document.
    #[arg(long)]
    jq_expr: Option<String>,

    /// One or more inputs. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(Args, Debug, Clone)]
struct TransformSettings {
    /// hide the values of fields whose name matches this regex
    #[arg(long)]
    redact: Option<String>,

    /// elide subtrees nested deeper than this
    #[arg(long)]
    max_depth: Option<usize>,
}

#[derive(clap::Parser, Debug)]
struct ShowOut {
    #[command(flatten)]
    input_settings: InputSettings,

    #[command(flatten)]
    transform: TransformSettings,

    /// target line width
    #[arg(long, default_value_t = 80)]
    width: usize,

    /// spaces per nesting level
    #[arg(long, default_value_t = 2)]
    indent: usize,

    /// ANSI colors
    #[arg(long, default_value_t = false)]
    color: bool,
}

#[derive(clap::Parser, Debug)]
struct JsonOut {
    #[command(flatten)]
    input_settings: InputSettings,

    #[command(flatten)]
    transform: TransformSettings,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[derive(clap::Parser, Debug)]
struct DiffOut {
    /// the document before
    #[arg(long)]
    left: PathBuf,

    /// the document after
    #[arg(long)]
    right: PathBuf,

    /// JSON Pointer applied to both documents
    #[arg(long)]
    json_pointer: Option<String>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn load_process(&self, verbose: bool, mut apply: impl FnMut(Value) -> Result<()>) -> Result<()> {
        let source_paths = resolve_file_path_patterns(&self.input)
            .context("failed to resolve input file paths")?;
        for source_path in source_paths {
            if verbose {
                eprintln!("reading {}", source_path.display());
            }
            for document in read_documents(&source_path, self.ndjson)? {
                let document = select(document, self.json_pointer.as_deref(), &source_path)?;
                match self.jq_expr.as_ref() {
                    None => apply(document)?,
                    Some(jq_expr) => {
                        let outputs = crate::filter::apply(jq_expr, &document).with_context(|| {
                            format!("failed to apply jq expression to {}", source_path.display())
                        })?;
                        for output in outputs {
                            apply(output)?;
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

impl TransformSettings {
    fn apply(&self, repr: Repr) -> Result<Repr> {
        let mut repr = repr;
        if let Some(pattern) = self.redact.as_deref() {
            let names = Regex::new(pattern).with_context(|| format!("invalid --redact regex: {pattern}"))?;
            repr = walk::redact(&repr, &names)?;
        }
        if let Some(max_depth) = self.max_depth {
            repr = walk::prune_depth(&repr, max_depth)?;
        }
        Ok(repr)
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }
    pub fn run(&self) -> Result<()> {
        if self.verbose {
            eprintln!("{self:#?}");
        }
        match &self.cmd {
            Command::Show(target) => {
                if target.color {
                    colored::control::set_override(true);
                }
                let options = PrettyOptions {
                    width: target.width,
                    indent: target.indent,
                    color: target.color,
                };
                target.input_settings.load_process(self.verbose, |value| {
                    let repr = target.transform.apply(value.to_repr())?;
                    println!("{}", pretty::render(&repr, &options));
                    Ok(())
                })
            }
            Command::Json(target) => {
                let mut documents = Vec::new();
                target.input_settings.load_process(self.verbose, |value| {
                    let repr = target.transform.apply(value.to_repr())?;
                    documents.push(to_json(&repr));
                    Ok(())
                })?;
                let output = match documents.len() {
                    1 => documents.remove(0),
                    _ => Value::Array(documents),
                };
                let output_src = serde_json::to_string_pretty(&output)?;
                if let Some(out) = target.out.as_ref() {
                    if let Some(parent) = out.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(out, &output_src)
                        .with_context(|| format!("failed to write {}", out.display()))?;
                } else {
                    println!("{output_src}");
                }
                Ok(())
            }
            Command::Diff(target) => {
                let pointer = target.json_pointer.as_deref();
                let left = load_single(&target.left, pointer)?.to_repr();
                let right = load_single(&target.right, pointer)?.to_repr();
                let changes = diff::diff(&left, &right);
                if self.verbose {
                    eprintln!("{} change(s)", changes.len());
                }
                for change in &changes {
                    println!("{change}");
                }
                Ok(())
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn read_documents(source_path: &Path, ndjson: bool) -> Result<Vec<Value>> {
    let source = std::fs::read_to_string(source_path)
        .with_context(|| format!("failed to read source file {}", source_path.display()))?;
    let parse = |text: &str| {
        serde_json::from_str::<Value>(text)
            .with_context(|| format!("failed to parse JSON source file ({})", source_path.display()))
    };
    if ndjson {
        source.lines().filter(|line| !line.trim().is_empty()).map(parse).collect()
    } else {
        Ok(vec![parse(&source)?])
    }
}

fn select(document: Value, json_pointer: Option<&str>, source_path: &Path) -> Result<Value> {
    let Some(pointer) = json_pointer else {
        return Ok(document);
    };
    match document.pointer(pointer) {
        Some(node) => Ok(node.clone()),
        None => bail!("JSON pointer {pointer} matches nothing in {}", source_path.display()),
    }
}

fn load_single(source_path: &Path, json_pointer: Option<&str>) -> Result<Value> {
    let mut documents = read_documents(source_path, false)?;
    select(documents.remove(0), json_pointer, source_path)
}

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'['))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern)? {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn scratch_file(name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("repr-tree-cli-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn ndjson_yields_one_document_per_line() {
        let path = scratch_file("docs.ndjson", "{\"a\": 1}\n\n[2]\n");
        let docs = read_documents(&path, true).unwrap();
        assert_eq!(docs, vec![json!({"a": 1}), json!([2])]);
    }

    #[test]
    fn json_pointer_selects_subnode() {
        let doc = json!({"data": {"items": [10, 20]}});
        let out = select(doc.clone(), Some("/data/items/1"), Path::new("x.json")).unwrap();
        assert_eq!(out, json!(20));
        assert!(select(doc, Some("/missing"), Path::new("x.json")).is_err());
    }

    #[test]
    fn transform_redacts_then_prunes() {
        let settings = TransformSettings { redact: Some("^secret$".into()), max_depth: Some(1) };
        let repr = json!({"secret": "x", "deep": {"a": {"b": 1}}}).to_repr();
        let out = settings.apply(repr).unwrap();
        assert_eq!(
            to_json(&out),
            json!({"secret": walk::REDACTED, "deep": walk::ELIDED})
        );
    }

    #[test]
    fn literal_paths_pass_through() {
        let out = resolve_file_path_patterns(["a.json", "b/c.json"]).unwrap();
        assert_eq!(out, vec![PathBuf::from("a.json"), PathBuf::from("b/c.json")]);
    }
}
