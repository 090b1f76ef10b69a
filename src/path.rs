//! Child-index paths, displayed with the labels of the nodes they cross.
use std::fmt;

use crate::repr::{Node, Repr};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Step {
    /// Tuple element, positional constructor argument, map entry.
    Index(usize),
    /// Record field or labeled constructor argument.
    Field(usize, String),
    /// The single child of a `Prop` or `Arg`.
    Inner,
    Key,
    Value,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path(Vec<Step>);

impl Step {
    /// The step from `parent` to its `index`-th child.
    pub fn for_child(parent: &Repr, index: usize) -> Self {
        match parent.node() {
            Node::Prop { .. } | Node::Arg { .. } => Step::Inner,
            Node::AssocProp { .. } if index == 0 => Step::Key,
            Node::AssocProp { .. } => Step::Value,
            Node::Record(props) => field_or_index(props, index),
            Node::Ctor { args, .. } => field_or_index(args, index),
            _ => Step::Index(index),
        }
    }

    /// Position among the parent's `children()`.
    pub fn index(&self) -> usize {
        match self {
            Step::Index(i) | Step::Field(i, _) => *i,
            Step::Inner | Step::Key => 0,
            Step::Value => 1,
        }
    }
}

impl Path {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn steps(&self) -> &[Step] {
        &self.0
    }

    pub fn push(&mut self, step: Step) {
        self.0.push(step);
    }

    pub fn pop(&mut self) -> Option<Step> {
        self.0.pop()
    }

    pub fn child(&self, step: Step) -> Self {
        let mut out = self.clone();
        out.push(step);
        out
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Resolve against `root`, if every step still exists.
    pub fn resolve(&self, root: &Repr) -> Option<Repr> {
        let mut node = root.clone();
        for step in &self.0 {
            node = node.children().get(step.index())?.clone();
        }
        Some(node)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Index(i) => write!(f, "[{i}]"),
            Step::Field(_, name) => write!(f, ".{name}"),
            Step::Inner => Ok(()),
            Step::Key => f.write_str("<key>"),
            Step::Value => f.write_str("<value>"),
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for step in &self.0 {
            write!(f, "{step}")?;
        }
        Ok(())
    }
}

fn field_or_index(siblings: &[Repr], index: usize) -> Step {
    let name = siblings.get(index).and_then(|child| match child.node() {
        Node::Prop { name, .. } => Some(name.clone()),
        Node::Arg { label: Some(label), .. } => Some(label.clone()),
        _ => None,
    });
    match name {
        Some(name) => Step::Field(index, name),
        None => Step::Index(index),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repr::build::*;

    #[test]
    fn steps_are_named_after_the_parent() {
        let r = record([("user", tuple([int(1), int(2)]))]);
        let path = Path::root()
            .child(Step::for_child(&r, 0))
            .child(Step::Inner)
            .child(Step::Index(1));
        assert_eq!(path.to_string(), "$.user[1]");
        assert_eq!(path.resolve(&r), Some(int(2)));
    }

    #[test]
    fn ctor_args_use_label_when_present() {
        let c = ctor("A", [int(1), labeled("y", int(2))]);
        assert_eq!(Step::for_child(&c, 0), Step::Index(0));
        assert_eq!(Step::for_child(&c, 1), Step::Field(1, "y".into()));
    }

    #[test]
    fn assoc_entries_show_key_and_value() {
        let m = assoc("Map", [(string("k"), int(1))]);
        let entry = Step::for_child(&m, 0);
        let entry_node = m.children()[0].clone();
        let path = Path::root().child(entry).child(Step::for_child(&entry_node, 1));
        assert_eq!(path.to_string(), "$[0]<value>");
        assert_eq!(path.resolve(&m), Some(int(1)));
    }

    #[test]
    fn missing_steps_do_not_resolve() {
        let path = Path::root().child(Step::Index(3));
        assert_eq!(path.resolve(&tuple([int(1)])), None);
    }
}
