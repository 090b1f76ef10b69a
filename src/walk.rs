//! Generic algorithms over any [`Repr`] tree.
//!
//! Everything here goes through `children` / `with_children` and the node
//! labels; nothing matches on individual variants.
use regex::Regex;

use crate::error::ReprError;
use crate::path::{Path, Step};
use crate::repr::build::opaque;
use crate::repr::{Kind, Label, Repr};

pub const REDACTED: &str = "<redacted>";
pub const ELIDED: &str = "…";

/// Pre-order, read-only traversal.
pub fn visit(root: &Repr, f: &mut impl FnMut(&Path, &Repr)) {
    fn go(node: &Repr, path: &mut Path, f: &mut impl FnMut(&Path, &Repr)) {
        f(path, node);
        for (i, child) in node.children().iter().enumerate() {
            path.push(Step::for_child(node, i));
            go(child, path, f);
            path.pop();
        }
    }
    go(root, &mut Path::root(), f)
}

/// Bottom-up rewrite: children first, then `f` on the rebuilt node.
///
/// Subtrees `f` leaves alone keep their original handles. Fails when `f`
/// hands back a node its parent cannot hold (e.g. a non-`Prop` inside a
/// `Record`).
pub fn rewrite(
    root: &Repr,
    f: &mut impl FnMut(&Path, Repr) -> Result<Repr, ReprError>,
) -> Result<Repr, ReprError> {
    fn go(
        node: &Repr,
        path: &mut Path,
        f: &mut impl FnMut(&Path, Repr) -> Result<Repr, ReprError>,
    ) -> Result<Repr, ReprError> {
        let mut children = Vec::new();
        for (i, child) in node.children().iter().enumerate() {
            path.push(Step::for_child(node, i));
            let child = go(child, path, f);
            path.pop();
            children.push(child?);
        }
        let rebuilt = node.with_children(children)?;
        f(path, rebuilt)
    }
    go(root, &mut Path::root(), f)
}

/// Hide the value of every field or labeled argument whose name matches.
pub fn redact(root: &Repr, names: &Regex) -> Result<Repr, ReprError> {
    rewrite(root, &mut |_, node| {
        let name = match node.label() {
            Label::Name(name) | Label::Arg(Some(name)) => name,
            _ => return Ok(node),
        };
        if names.is_match(name) {
            node.with_children(vec![opaque("redacted", REDACTED)])
        } else {
            Ok(node)
        }
    })
}

/// Replace every non-empty subtree deeper than `max_depth` with an elision
/// marker. Edge nodes do not count as a level and are never replaced, only
/// their contents.
pub fn prune_depth(root: &Repr, max_depth: usize) -> Result<Repr, ReprError> {
    fn go(node: &Repr, depth: usize, max_depth: usize) -> Result<Repr, ReprError> {
        let children = node.children();
        if children.is_empty() {
            return Ok(node.clone());
        }
        let edge = node.kind().is_edge();
        if !edge && depth >= max_depth {
            return Ok(opaque("elided", ELIDED));
        }
        let next = if edge { depth } else { depth + 1 };
        let children = children
            .iter()
            .map(|c| go(c, next, max_depth))
            .collect::<Result<Vec<_>, _>>()?;
        node.with_children(children)
    }
    go(root, 0, max_depth)
}

/// Check that every `Prop`, `Arg` and `AssocProp` sits directly under a
/// `Record`, `Ctor` and `Assoc` respectively. Reports the first offender.
pub fn validate(root: &Repr) -> Result<(), ReprError> {
    fn go(node: &Repr, parent: Option<Kind>, path: &mut Path) -> Result<(), ReprError> {
        let kind = node.kind();
        if let Some(expected) = kind.required_parent() {
            if parent != Some(expected) {
                return Err(ReprError::MalformedContext { path: path.clone(), node: kind, expected });
            }
        }
        for (i, child) in node.children().iter().enumerate() {
            path.push(Step::for_child(node, i));
            go(child, Some(kind), path)?;
            path.pop();
        }
        Ok(())
    }
    go(root, None, &mut Path::root())
}

/// Number of nodes, edges included.
pub fn size(root: &Repr) -> usize {
    let mut n = 0;
    visit(root, &mut |_, _| n += 1);
    n
}
