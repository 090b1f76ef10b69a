//! Structural value tree shared by the printer, the differ and the JSON exporter.
//!
//! Every edge of a tree is itself a [`Repr`]. Labeled aggregates wrap their
//! label into a dedicated edge node (`Prop`, `Arg`, `AssocProp`), so one
//! traversal contract ([`Repr::children`] / [`Repr::with_children`]) covers
//! every shape.
//!
//! [`Node`] is public for pattern-matching. A `Node` only becomes a `Repr`
//! through the builders in [`build`]; the handle's field is private.
pub mod build;

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::error::ReprError;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Node {
    Bool(bool),
    Int(i64),
    UInt(u64),                 // producers use it above i64::MAX
    Float(Float),
    Char(char),
    Str(String),
    /// Positional group; the empty tuple is unit.
    Tuple(Vec<Repr>),
    /// Fields, each one a `Prop` node, in declaration order.
    Record(Vec<Repr>),
    Prop { name: String, value: Repr },
    /// Children may be bare values or `Arg` nodes, mixed freely.
    Ctor { tag: String, args: Vec<Repr> },
    Arg { label: Option<String>, value: Repr },
    /// Entries, each one an `AssocProp` node.
    Assoc { tag: String, props: Vec<Repr> },
    AssocProp { key: Repr, value: Repr },
    /// Fallback for values with no structural decomposition.
    Opaque { label: String, text: String },
}

/// `f64` compared and hashed by bit pattern, with every NaN folded into one.
///
/// `0.0` and `-0.0` are different values: they print and project differently.
#[derive(Debug, Clone, Copy)]
pub struct Float(f64);

/// Immutable, cheaply clonable handle to a [`Node`].
#[derive(Clone, Eq)]
pub struct Repr(Arc<Node>);

/// Fieldless variant name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Bool,
    Int,
    UInt,
    Float,
    Char,
    Str,
    Tuple,
    Record,
    Prop,
    Ctor,
    Arg,
    Assoc,
    AssocProp,
    Opaque,
}

/// The non-child text a printer needs to render a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label<'a> {
    None,
    Tag(&'a str),          // Ctor, Assoc
    Name(&'a str),         // Prop
    Arg(Option<&'a str>),  // Arg
    Opaque(&'a str),       // Opaque
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl Float {
    pub fn new(value: f64) -> Self {
        Self(value)
    }

    pub fn get(self) -> f64 {
        self.0
    }

    fn bits(self) -> u64 {
        if self.0.is_nan() { f64::NAN.to_bits() } else { self.0.to_bits() }
    }
}

impl Repr {
    fn new(node: Node) -> Self {
        Self(Arc::new(node))
    }

    pub fn node(&self) -> &Node {
        &self.0
    }

    pub fn kind(&self) -> Kind {
        match self.node() {
            Node::Bool(_) => Kind::Bool,
            Node::Int(_) => Kind::Int,
            Node::UInt(_) => Kind::UInt,
            Node::Float(_) => Kind::Float,
            Node::Char(_) => Kind::Char,
            Node::Str(_) => Kind::Str,
            Node::Tuple(_) => Kind::Tuple,
            Node::Record(_) => Kind::Record,
            Node::Prop { .. } => Kind::Prop,
            Node::Ctor { .. } => Kind::Ctor,
            Node::Arg { .. } => Kind::Arg,
            Node::Assoc { .. } => Kind::Assoc,
            Node::AssocProp { .. } => Kind::AssocProp,
            Node::Opaque { .. } => Kind::Opaque,
        }
    }

    pub fn label(&self) -> Label<'_> {
        match self.node() {
            Node::Ctor { tag, .. } | Node::Assoc { tag, .. } => Label::Tag(tag),
            Node::Prop { name, .. } => Label::Name(name),
            Node::Arg { label, .. } => Label::Arg(label.as_deref()),
            Node::Opaque { label, .. } => Label::Opaque(label),
            _ => Label::None,
        }
    }

    pub fn is_unit(&self) -> bool {
        matches!(self.node(), Node::Tuple(xs) if xs.is_empty())
    }

    /// Same handle, not just equal contents.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Immediate structural children, in order.
    ///
    /// Records and maps yield their `Prop` / `AssocProp` nodes, not the
    /// unwrapped values.
    pub fn children(&self) -> Vec<Repr> {
        match self.node() {
            Node::Bool(_)
            | Node::Int(_)
            | Node::UInt(_)
            | Node::Float(_)
            | Node::Char(_)
            | Node::Str(_)
            | Node::Opaque { .. } => Vec::new(),
            Node::Tuple(xs) | Node::Record(xs) => xs.clone(),
            Node::Ctor { args, .. } => args.clone(),
            Node::Assoc { props, .. } => props.clone(),
            Node::Prop { value, .. } | Node::Arg { value, .. } => vec![value.clone()],
            Node::AssocProp { key, value } => vec![key.clone(), value.clone()],
        }
    }

    /// Rebuild this node with `children` in place of its own.
    ///
    /// Tag, name and label are kept. Leaves take no children, `Prop` and
    /// `Arg` exactly one, `AssocProp` exactly two. Sequences take any
    /// number, but a `Record` only takes `Prop` nodes and an `Assoc` only
    /// `AssocProp` nodes. `Tuple` and `Ctor` take any node, matching their
    /// builders; edges placed there are reported by `walk::validate`.
    pub fn with_children(&self, children: Vec<Repr>) -> Result<Repr, ReprError> {
        let kind = self.kind();
        if self.has_children(&children) {
            return Ok(self.clone());
        }
        let node = match self.node() {
            Node::Bool(_)
            | Node::Int(_)
            | Node::UInt(_)
            | Node::Float(_)
            | Node::Char(_)
            | Node::Str(_)
            | Node::Opaque { .. } => {
                let [] = exact::<0>(kind, children)?;
                return Ok(self.clone());
            }
            Node::Tuple(_) => Node::Tuple(children),
            Node::Record(_) => {
                all_of(kind, Kind::Prop, &children)?;
                Node::Record(children)
            }
            Node::Prop { name, .. } => {
                let [value] = exact(kind, children)?;
                Node::Prop { name: name.clone(), value }
            }
            Node::Ctor { tag, .. } => Node::Ctor { tag: tag.clone(), args: children },
            Node::Arg { label, .. } => {
                let [value] = exact(kind, children)?;
                Node::Arg { label: label.clone(), value }
            }
            Node::Assoc { tag, .. } => {
                all_of(kind, Kind::AssocProp, &children)?;
                Node::Assoc { tag: tag.clone(), props: children }
            }
            Node::AssocProp { .. } => {
                let [key, value] = exact(kind, children)?;
                Node::AssocProp { key, value }
            }
        };
        Ok(Repr::new(node))
    }

    // every new child is the very handle already in place
    fn has_children(&self, children: &[Repr]) -> bool {
        let current = self.children();
        current.len() == children.len()
            && current.iter().zip(children).all(|(a, b)| a.ptr_eq(b))
    }
}

impl Kind {
    /// Edge nodes are only meaningful directly under one parent variant.
    pub fn required_parent(self) -> Option<Kind> {
        match self {
            Kind::Prop => Some(Kind::Record),
            Kind::Arg => Some(Kind::Ctor),
            Kind::AssocProp => Some(Kind::Assoc),
            _ => None,
        }
    }

    pub fn is_edge(self) -> bool {
        self.required_parent().is_some()
    }

    pub fn is_leaf(self) -> bool {
        matches!(
            self,
            Kind::Bool | Kind::Int | Kind::UInt | Kind::Float | Kind::Char | Kind::Str | Kind::Opaque
        )
    }
}

impl PartialEq for Float {
    fn eq(&self, other: &Self) -> bool {
        self.bits() == other.bits()
    }
}

impl Eq for Float {}

impl Hash for Float {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bits().hash(state)
    }
}

impl PartialEq for Repr {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.0 == other.0
    }
}

impl Hash for Repr {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.node().hash(state)
    }
}

impl fmt::Debug for Repr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.node(), f)
    }
}

impl fmt::Display for Repr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::pretty::render_flat(self))
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn exact<const N: usize>(variant: Kind, children: Vec<Repr>) -> Result<[Repr; N], ReprError> {
    let found = children.len();
    <[Repr; N]>::try_from(children).map_err(|_| ReprError::ShapeMismatch {
        variant,
        expected: N,
        found,
    })
}

fn all_of(variant: Kind, expected: Kind, children: &[Repr]) -> Result<(), ReprError> {
    match children.iter().position(|c| c.kind() != expected) {
        None => Ok(()),
        Some(index) => Err(ReprError::UnexpectedChild {
            variant,
            expected,
            index,
            found: children[index].kind(),
        }),
    }
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————
