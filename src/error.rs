use thiserror::Error;

use crate::path::Path;
use crate::repr::Kind;

/// Misuse of the rewrite contract, or a tree that breaks an edge-node rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReprError {
    #[error("{variant} takes {expected} children, got {found}")]
    ShapeMismatch { variant: Kind, expected: usize, found: usize },

    #[error("{variant} child #{index} must be a {expected}, got a {found}")]
    UnexpectedChild { variant: Kind, expected: Kind, index: usize, found: Kind },

    #[error("{node} at {path} is only valid directly under a {expected}")]
    MalformedContext { path: Path, node: Kind, expected: Kind },

    #[error("no node at {path}")]
    MissingPath { path: Path },

    #[error("node at {path} no longer matches the diff it came from")]
    PatchConflict { path: Path },
}
