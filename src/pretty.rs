//! Debug-style text rendering of [`Repr`] trees.
//!
//! ```text
//! (1, "x")            Some(1)               { user: "alice", age: 30 }
//! Point(x: 1, y: 2)   BTreeMap { 1 => "a" }  <fn closure@3>
//! ```
//!
//! A node goes on one line when it fits in the configured width; otherwise
//! its children go one per line with trailing commas.
use colored::Colorize;

use crate::repr::{Label, Node, Repr};

#[derive(Debug, Clone)]
pub struct PrettyOptions {
    pub width: usize,
    pub indent: usize,
    /// ANSI colors for literals and tags.
    pub color: bool,
}

impl Default for PrettyOptions {
    fn default() -> Self {
        Self { width: 80, indent: 2, color: false }
    }
}

pub fn render(repr: &Repr, options: &PrettyOptions) -> String {
    let mut printer = Printer { options, out: String::new(), column: 0 };
    printer.node(repr, 0, 0);
    printer.out
}

/// Everything on one line, no colors.
pub fn render_flat(repr: &Repr) -> String {
    flat(repr, false)
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

struct Printer<'a> {
    options: &'a PrettyOptions,
    out: String,
    column: usize,
}

/// Opening and closing text around a sequence node's children.
fn delimiters(repr: &Repr, paint: bool) -> Option<(String, &'static str)> {
    match repr.node() {
        Node::Tuple(_) => Some(("(".to_string(), ")")),
        Node::Record(_) => Some(("{".to_string(), "}")),
        Node::Ctor { tag, .. } => Some((format!("{}(", tag_text(tag, paint)), ")")),
        Node::Assoc { tag, .. } => Some((format!("{} {{", tag_text(tag, paint)), "}")),
        _ => None,
    }
}

/// Text placed before an edge node's value (or between key and value).
fn edge_prefix(repr: &Repr) -> Option<String> {
    match repr.label() {
        Label::Name(name) | Label::Arg(Some(name)) => Some(format!("{name}: ")),
        Label::Arg(None) => Some(String::new()),
        _ => None,
    }
}

fn tag_text(tag: &str, paint: bool) -> String {
    if paint { tag.bold().to_string() } else { tag.to_string() }
}

fn leaf(repr: &Repr, paint: bool) -> String {
    let (text, painted) = match repr.node() {
        Node::Bool(b) => (b.to_string(), b.to_string().yellow()),
        Node::Int(i) => (i.to_string(), i.to_string().cyan()),
        Node::UInt(u) => (u.to_string(), u.to_string().cyan()),
        Node::Float(f) => (format!("{:?}", f.get()), format!("{:?}", f.get()).cyan()),
        Node::Char(c) => (format!("{c:?}"), format!("{c:?}").green()),
        Node::Str(s) => (format!("{s:?}"), format!("{s:?}").green()),
        Node::Opaque { label, text } => {
            let t = if text.is_empty() { format!("<{label}>") } else { format!("<{label} {text}>") };
            (t.clone(), t.dimmed())
        }
        _ => return String::new(),
    };
    if paint { painted.to_string() } else { text }
}

fn flat(repr: &Repr, paint: bool) -> String {
    let children = repr.children();
    if let Some((open, close)) = delimiters(repr, paint) {
        let items: Vec<String> = children.iter().map(|c| flat(c, paint)).collect();
        return match repr.node() {
            Node::Ctor { .. } if items.is_empty() => open.trim_end_matches('(').to_string(),
            Node::Tuple(_) if items.len() == 1 => format!("({},)", items[0]),
            Node::Record(_) | Node::Assoc { .. } if items.is_empty() => format!("{open}{close}"),
            Node::Record(_) | Node::Assoc { .. } => format!("{open} {} {close}", items.join(", ")),
            _ => format!("{open}{}{close}", items.join(", ")),
        };
    }
    if let Some(prefix) = edge_prefix(repr) {
        return format!("{prefix}{}", flat(&children[0], paint));
    }
    if let [key, value] = children.as_slice() {
        return format!("{} => {}", flat(key, paint), flat(value, paint));
    }
    leaf(repr, paint)
}

impl Printer<'_> {
    fn push(&mut self, plain_width: usize, text: &str) {
        self.out.push_str(text);
        self.column += plain_width;
    }

    fn push_str(&mut self, text: &str) {
        self.push(text.chars().count(), text);
    }

    fn newline(&mut self, level: usize) {
        self.out.push('\n');
        let pad = " ".repeat(level * self.options.indent);
        self.out.push_str(&pad);
        self.column = pad.len();
    }

    /// `trailing` is the width of text that will follow on the same line.
    fn node(&mut self, repr: &Repr, level: usize, trailing: usize) {
        let plain = flat(repr, false);
        let width = plain.chars().count();
        let children = repr.children();
        if children.is_empty() || self.column + width + trailing <= self.options.width {
            let text = if self.options.color { flat(repr, true) } else { plain };
            self.push(width, &text);
            return;
        }

        if let Some((open, close)) = delimiters(repr, self.options.color) {
            let (plain_open, _) = delimiters(repr, false).unwrap_or_default();
            self.push(plain_open.chars().count(), &open);
            for child in &children {
                self.newline(level + 1);
                self.node(child, level + 1, 1);
                self.push_str(",");
            }
            self.newline(level);
            self.push_str(close);
        } else if let Some(prefix) = edge_prefix(repr) {
            self.push_str(&prefix);
            self.node(&children[0], level, trailing);
        } else if let [key, value] = children.as_slice() {
            self.node(key, level, 0);
            self.push_str(" => ");
            self.node(value, level, trailing);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repr::build::*;

    fn narrow(width: usize) -> PrettyOptions {
        PrettyOptions { width, ..PrettyOptions::default() }
    }

    #[test]
    fn leaves_render_as_literals() {
        assert_eq!(render_flat(&int(-3)), "-3");
        assert_eq!(render_flat(&float(1.0)), "1.0");
        assert_eq!(render_flat(&string("a\"b")), r#""a\"b""#);
        assert_eq!(render_flat(&character('c')), "'c'");
        assert_eq!(render_flat(&boolean(false)), "false");
        assert_eq!(render_flat(&opaque("fn", "main")), "<fn main>");
        assert_eq!(render_flat(&opaque("elided", "")), "<elided>");
    }

    #[test]
    fn tuples_and_unit() {
        assert_eq!(render_flat(&unit()), "()");
        assert_eq!(render_flat(&tuple([int(1)])), "(1,)");
        assert_eq!(render_flat(&tuple([int(1), string("x")])), r#"(1, "x")"#);
    }

    #[test]
    fn records_ctors_and_maps() {
        let r = record([("user", string("alice")), ("age", int(30))]);
        assert_eq!(render_flat(&r), r#"{ user: "alice", age: 30 }"#);
        assert_eq!(render_flat(&record(Vec::<(&str, Repr)>::new())), "{}");
        assert_eq!(render_flat(&ctor("None", [])), "None");
        assert_eq!(
            render_flat(&ctor("A", [arg(int(1)), labeled("y", string("hi"))])),
            r#"A(1, y: "hi")"#
        );
        assert_eq!(
            render_flat(&assoc("BTreeMap", [(int(1), string("a"))])),
            r#"BTreeMap { 1 => "a" }"#
        );
        assert_eq!(render_flat(&assoc("HashMap", [])), "HashMap {}");
    }

    #[test]
    fn bare_edges_render_best_effort() {
        assert_eq!(render_flat(&prop("x", int(1))), "x: 1");
        assert_eq!(render_flat(&assoc_prop(int(1), int(2))), "1 => 2");
    }

    #[test]
    fn wide_nodes_break_one_child_per_line() {
        let r = record([
            ("name", string("a fairly long string value")),
            ("nested", ctor("Some", [tuple([int(1), int(2)])])),
        ]);
        let out = render(&r, &narrow(30));
        let expected = [
            "{",
            "  name: \"a fairly long string value\",",
            "  nested: Some((1, 2)),",
            "}",
        ]
        .join("\n");
        assert_eq!(out, expected);
    }

    #[test]
    fn fitting_nodes_stay_on_one_line() {
        let r = tuple([int(1), int(2)]);
        assert_eq!(render(&r, &PrettyOptions::default()), "(1, 2)");
    }

    #[test]
    fn trailing_comma_counts_toward_width() {
        // "  a: (1, 2)" is 11 columns, the comma would make it 12
        let r = record([("a", tuple([int(1), int(2)]))]);
        let out = render(&r, &narrow(11));
        let expected = ["{", "  a: (", "    1,", "    2,", "  ),", "}"].join("\n");
        assert_eq!(out, expected);
        assert!(out.lines().all(|line| line.chars().count() <= 11));

        let out = render(&r, &narrow(12));
        assert_eq!(out, ["{", "  a: (1, 2),", "}"].join("\n"));
    }

    #[test]
    fn nested_breaks_indent_further() {
        let m = assoc("Map", [(string("key"), tuple([int(100), int(200), int(300)]))]);
        let out = render(&m, &narrow(12));
        let expected = [
            "Map {",
            "  \"key\" => (",
            "    100,",
            "    200,",
            "    300,",
            "  ),",
            "}",
        ]
        .join("\n");
        assert_eq!(out, expected);
    }
}
