//! Structural diff between two [`Repr`] trees, and patching one into the other.
use std::fmt;

use crate::error::ReprError;
use crate::path::{Path, Step};
use crate::repr::Repr;

/// `old` at `path` became `new`.
#[derive(Debug, Clone, PartialEq)]
pub struct Change {
    pub path: Path,
    pub old: Repr,
    pub new: Repr,
}

/// Smallest set of subtree replacements turning `left` into `right`.
///
/// Two nodes are descended into when they share variant, label and child
/// count; anything else is replaced whole.
pub fn diff(left: &Repr, right: &Repr) -> Vec<Change> {
    let mut out = Vec::new();
    diff_at(left, right, &mut Path::root(), &mut out);
    out
}

fn diff_at(left: &Repr, right: &Repr, path: &mut Path, out: &mut Vec<Change>) {
    if left == right {
        return;
    }
    let (lk, rk) = (left.children(), right.children());
    let same_shape = left.kind() == right.kind()
        && left.label() == right.label()
        && !lk.is_empty()
        && lk.len() == rk.len();
    if !same_shape {
        out.push(Change { path: path.clone(), old: left.clone(), new: right.clone() });
        return;
    }
    for (i, (l, r)) in lk.iter().zip(&rk).enumerate() {
        path.push(Step::for_child(left, i));
        diff_at(l, r, path, out);
        path.pop();
    }
}

/// Apply `changes` to `root`. Each change must find its `old` subtree still
/// in place.
pub fn patch(root: &Repr, changes: &[Change]) -> Result<Repr, ReprError> {
    changes.iter().try_fold(root.clone(), |tree, change| {
        replace_at(&tree, change.path.steps(), change, 0)
    })
}

fn replace_at(node: &Repr, steps: &[Step], change: &Change, depth: usize) -> Result<Repr, ReprError> {
    let Some((step, rest)) = steps.split_first() else {
        if node != &change.old {
            return Err(ReprError::PatchConflict { path: change.path.clone() });
        }
        return Ok(change.new.clone());
    };
    let mut children = node.children();
    let missing = || ReprError::MissingPath { path: prefix(&change.path, depth + 1) };
    let child = children.get(step.index()).ok_or_else(missing)?;
    let replaced = replace_at(child, rest, change, depth + 1)?;
    children[step.index()] = replaced;
    node.with_children(children)
}

fn prefix(path: &Path, len: usize) -> Path {
    let mut out = Path::root();
    for step in path.steps().iter().take(len) {
        out.push(step.clone());
    }
    out
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} -> {}", self.path, self.old, self.new)
    }
}
