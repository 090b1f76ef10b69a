//! Builders: the only way to obtain a [`Repr`].
use super::{Float, Node, Repr};

// ------------------------------- Leaves ---------------------------------- //

pub fn boolean(value: bool) -> Repr {
    Repr::new(Node::Bool(value))
}

pub fn int(value: impl Into<i64>) -> Repr {
    Repr::new(Node::Int(value.into()))
}

pub fn uint(value: u64) -> Repr {
    Repr::new(Node::UInt(value))
}

pub fn float(value: f64) -> Repr {
    Repr::new(Node::Float(Float::new(value)))
}

pub fn character(value: char) -> Repr {
    Repr::new(Node::Char(value))
}

pub fn string(value: impl Into<String>) -> Repr {
    Repr::new(Node::Str(value.into()))
}

/// Catch-all leaf for values without a structural decomposition.
pub fn opaque(label: impl Into<String>, text: impl Into<String>) -> Repr {
    Repr::new(Node::Opaque { label: label.into(), text: text.into() })
}

// ----------------------------- Aggregates -------------------------------- //

pub fn tuple(children: impl IntoIterator<Item = Repr>) -> Repr {
    Repr::new(Node::Tuple(children.into_iter().collect()))
}

pub fn unit() -> Repr {
    tuple([])
}

/// One `Prop` per entry, in the order given. Duplicate names are kept.
pub fn record<K: Into<String>>(fields: impl IntoIterator<Item = (K, Repr)>) -> Repr {
    let props = fields.into_iter().map(|(name, value)| prop(name, value)).collect();
    Repr::new(Node::Record(props))
}

pub fn prop(name: impl Into<String>, value: Repr) -> Repr {
    Repr::new(Node::Prop { name: name.into(), value })
}

/// Children are kept verbatim: bare values and `Arg` nodes may be mixed.
pub fn ctor(tag: impl Into<String>, children: impl IntoIterator<Item = Repr>) -> Repr {
    Repr::new(Node::Ctor { tag: tag.into(), args: children.into_iter().collect() })
}

/// Positional constructor argument.
pub fn arg(value: Repr) -> Repr {
    arg_opt(None, value)
}

pub fn labeled(label: impl Into<String>, value: Repr) -> Repr {
    arg_opt(Some(label.into()), value)
}

pub fn arg_opt(label: Option<String>, value: Repr) -> Repr {
    Repr::new(Node::Arg { label, value })
}

/// One `AssocProp` per pair, order and duplicate keys preserved.
pub fn assoc(tag: impl Into<String>, pairs: impl IntoIterator<Item = (Repr, Repr)>) -> Repr {
    let props = pairs.into_iter().map(|(key, value)| assoc_prop(key, value)).collect();
    Repr::new(Node::Assoc { tag: tag.into(), props })
}

pub fn assoc_prop(key: Repr, value: Repr) -> Repr {
    Repr::new(Node::AssocProp { key, value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    #[test]
    fn record_builds_props_in_order() {
        let r = record([("x", int(1)), ("y", string("hi"))]);
        match r.node() {
            Node::Record(props) => {
                assert_eq!(props.len(), 2);
                assert_eq!(props[0].node(), &Node::Prop { name: "x".into(), value: int(1) });
                assert_eq!(props[1].node(), &Node::Prop { name: "y".into(), value: string("hi") });
            }
            other => panic!("expected record, got {other:?}"),
        }
    }

    #[test]
    fn record_keeps_duplicate_names() {
        let r = record([("a", int(1)), ("a", int(2))]);
        assert_eq!(r.children(), vec![prop("a", int(1)), prop("a", int(2))]);
    }

    #[test]
    fn record_accepts_an_ordered_map() {
        let mut fields = IndexMap::new();
        fields.insert("zeta".to_string(), int(1));
        fields.insert("alpha".to_string(), int(2));
        let r = record(fields);
        assert_eq!(r, record([("zeta", int(1)), ("alpha", int(2))]));
    }

    #[test]
    fn unit_is_the_empty_tuple() {
        assert_eq!(tuple([]), unit());
        assert!(unit().is_unit());
        assert_eq!(
            tuple([int(1), string("x")]).node(),
            &Node::Tuple(vec![int(1), string("x")])
        );
    }

    #[test]
    fn ctor_preserves_labeled_and_positional_args() {
        let c = ctor("A", [labeled("x", int(1)), labeled("y", string("hi"))]);
        assert_eq!(
            c.node(),
            &Node::Ctor {
                tag: "A".into(),
                args: vec![
                    arg_opt(Some("x".into()), int(1)),
                    arg_opt(Some("y".into()), string("hi")),
                ],
            }
        );

        let mixed = ctor("B", [arg(int(1)), labeled("y", int(2)), int(3)]);
        let kids = mixed.children();
        assert_eq!(kids[0].node(), &Node::Arg { label: None, value: int(1) });
        assert_eq!(kids[1].node(), &Node::Arg { label: Some("y".into()), value: int(2) });
        assert_eq!(kids[2], int(3));
    }

    #[test]
    fn assoc_keeps_duplicate_keys_in_order() {
        let m = assoc("Map", [(string("k"), int(1)), (string("k"), int(2))]);
        assert_eq!(
            m.children(),
            vec![assoc_prop(string("k"), int(1)), assoc_prop(string("k"), int(2))]
        );
    }
}
