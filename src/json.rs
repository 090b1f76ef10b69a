//! One-way projection of a [`Repr`] tree into `serde_json::Value`.
//!
//! Convention (deterministic, lossy):
//! - `Bool`, `Int`, `UInt`, `Str` map to their JSON scalar; `Char` becomes a
//!   one-character string; a finite `Float` becomes a number, otherwise one of
//!   the strings `"NaN"`, `"inf"`, `"-inf"`.
//! - `Tuple` → array; unit → `[]`.
//! - `Record` → object. On duplicate names the last value wins, at the
//!   position of the first occurrence.
//! - `Ctor` is externally tagged: `"Tag"` with no arguments,
//!   `{"Tag": {label: value, ..}}` when every argument is labeled,
//!   `{"Tag": value}` for a single positional argument, otherwise
//!   `{"Tag": [..]}` where a labeled argument becomes `{label: value}`.
//! - `Assoc` → object when every key is a string or char (last wins),
//!   otherwise an array of `[key, value]` pairs. The tag is dropped.
//! - `Opaque` → its text.
//! - A bare edge node is projected on its own: `Prop` → `{name: value}`,
//!   `Arg` like a constructor item, `AssocProp` → `[key, value]`.
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::repr::{Node, Repr};

pub fn to_json(repr: &Repr) -> Value {
    match repr.node() {
        Node::Bool(b) => Value::Bool(*b),
        Node::Int(i) => Value::from(*i),
        Node::UInt(u) => Value::from(*u),
        Node::Float(f) => float_to_json(f.get()),
        Node::Char(c) => Value::String(c.to_string()),
        Node::Str(s) => Value::String(s.clone()),
        Node::Tuple(xs) => Value::Array(xs.iter().map(to_json).collect()),
        Node::Record(props) => Value::Object(props.iter().filter_map(field_entry).collect()),
        Node::Prop { name, value } => single(name.clone(), to_json(value)),
        Node::Ctor { tag, args } => ctor_to_json(tag, args),
        Node::Arg { .. } => ctor_item(repr),
        Node::Assoc { props, .. } => assoc_to_json(props),
        Node::AssocProp { key, value } => Value::Array(vec![to_json(key), to_json(value)]),
        Node::Opaque { text, .. } => Value::String(text.clone()),
    }
}

impl Serialize for Repr {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        to_json(self).serialize(serializer)
    }
}

// ------------------------------- Helpers --------------------------------- //

fn float_to_json(f: f64) -> Value {
    match serde_json::Number::from_f64(f) {
        Some(n) => Value::Number(n),
        None if f.is_nan() => Value::from("NaN"),
        None if f > 0.0 => Value::from("inf"),
        None => Value::from("-inf"),
    }
}

fn single(key: String, value: Value) -> Value {
    let mut map = Map::new();
    map.insert(key, value);
    Value::Object(map)
}

fn field_entry(child: &Repr) -> Option<(String, Value)> {
    match child.node() {
        Node::Prop { name, value } => Some((name.clone(), to_json(value))),
        _ => None, // `with_children` never lets a non-Prop into a Record
    }
}

fn ctor_to_json(tag: &str, args: &[Repr]) -> Value {
    if args.is_empty() {
        return Value::from(tag);
    }

    // every argument labeled → struct-like body
    let labeled: Option<Vec<(&str, &Repr)>> = args
        .iter()
        .map(|a| match a.node() {
            Node::Arg { label: Some(label), value } => Some((label.as_str(), value)),
            _ => None,
        })
        .collect();

    let body = match labeled {
        Some(fields) => Value::Object(
            fields.into_iter().map(|(label, value)| (label.to_owned(), to_json(value))).collect(),
        ),
        None if args.len() == 1 => ctor_item(&args[0]),
        None => Value::Array(args.iter().map(ctor_item).collect()),
    };
    single(tag.to_owned(), body)
}

fn ctor_item(child: &Repr) -> Value {
    match child.node() {
        Node::Arg { label: Some(label), value } => single(label.clone(), to_json(value)),
        Node::Arg { label: None, value } => to_json(value),
        _ => to_json(child),
    }
}

fn assoc_to_json(props: &[Repr]) -> Value {
    let pairs: Vec<(&Repr, &Repr)> = props
        .iter()
        .filter_map(|p| match p.node() {
            Node::AssocProp { key, value } => Some((key, value)),
            _ => None,
        })
        .collect();

    let string_keys: Option<Vec<String>> = pairs
        .iter()
        .map(|(key, _)| match key.node() {
            Node::Str(s) => Some(s.clone()),
            Node::Char(c) => Some(c.to_string()),
            _ => None,
        })
        .collect();

    match string_keys {
        Some(keys) => Value::Object(
            keys.into_iter().zip(&pairs).map(|(k, (_, v))| (k, to_json(v))).collect(),
        ),
        None => Value::Array(
            pairs
                .iter()
                .map(|(k, v)| Value::Array(vec![to_json(k), to_json(v)]))
                .collect(),
        ),
    }
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repr::build::*;
    use serde_json::json;

    #[test]
    fn record_projects_to_object() {
        let r = record([("user", string("alice")), ("age", int(30))]);
        let v = to_json(&r);
        assert_eq!(v["user"], "alice");
        assert_eq!(v["age"], 30);
        assert!(v["age"].is_number());
        assert_eq!(v, json!({"user": "alice", "age": 30}));
    }

    #[test]
    fn record_keeps_field_order() {
        let v = to_json(&record([("z", int(1)), ("a", int(2))]));
        let keys: Vec<&String> = v.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["z", "a"]);
    }

    #[test]
    fn duplicate_record_fields_last_wins_at_first_position() {
        let v = to_json(&record([("a", int(1)), ("b", int(2)), ("a", int(3))]));
        assert_eq!(serde_json::to_string(&v).unwrap(), r#"{"a":3,"b":2}"#);
    }

    #[test]
    fn scalars_and_tuples() {
        assert_eq!(to_json(&boolean(true)), json!(true));
        assert_eq!(to_json(&uint(u64::MAX)), json!(u64::MAX));
        assert_eq!(to_json(&float(2.5)), json!(2.5));
        assert_eq!(to_json(&float(f64::NAN)), json!("NaN"));
        assert_eq!(to_json(&float(f64::NEG_INFINITY)), json!("-inf"));
        assert_eq!(to_json(&character('x')), json!("x"));
        assert_eq!(to_json(&unit()), json!([]));
        assert_eq!(to_json(&tuple([int(1), string("x")])), json!([1, "x"]));
        assert_eq!(to_json(&opaque("fn", "<closure>")), json!("<closure>"));
    }

    #[test]
    fn ctor_is_externally_tagged() {
        assert_eq!(to_json(&ctor("None", [])), json!("None"));
        assert_eq!(to_json(&ctor("Some", [int(1)])), json!({"Some": 1}));
        assert_eq!(to_json(&ctor("Some", [arg(int(1))])), json!({"Some": 1}));
        assert_eq!(to_json(&ctor("P", [int(1), int(2)])), json!({"P": [1, 2]}));
        assert_eq!(
            to_json(&ctor("A", [labeled("x", int(1)), labeled("y", string("hi"))])),
            json!({"A": {"x": 1, "y": "hi"}})
        );
    }

    #[test]
    fn mixed_ctor_args_keep_order_as_array() {
        let c = ctor("M", [arg(int(1)), labeled("y", int(2)), string("z")]);
        assert_eq!(to_json(&c), json!({"M": [1, {"y": 2}, "z"]}));

        let single_labeled = ctor("L", [labeled("only", int(1))]);
        assert_eq!(to_json(&single_labeled), json!({"L": {"only": 1}}));
    }

    #[test]
    fn assoc_with_string_keys_is_object_otherwise_pairs() {
        let m = assoc("BTreeMap", [(string("a"), int(1)), (character('b'), int(2))]);
        assert_eq!(to_json(&m), json!({"a": 1, "b": 2}));

        let n = assoc("BTreeMap", [(int(1), string("one")), (int(2), string("two"))]);
        assert_eq!(to_json(&n), json!([[1, "one"], [2, "two"]]));

        assert_eq!(to_json(&assoc("HashMap", [])), json!({}));
    }

    #[test]
    fn bare_edges_still_project() {
        assert_eq!(to_json(&prop("x", int(1))), json!({"x": 1}));
        assert_eq!(to_json(&labeled("x", int(1))), json!({"x": 1}));
        assert_eq!(to_json(&arg(int(1))), json!(1));
        assert_eq!(to_json(&assoc_prop(int(1), int(2))), json!([1, 2]));
    }

    #[test]
    fn projection_is_deterministic() {
        let build = || {
            record([
                ("m", assoc("Map", [(int(2), unit()), (int(1), unit())])),
                ("c", ctor("C", [labeled("a", float(0.5)), arg(boolean(false))])),
            ])
        };
        let (a, b) = (build(), build());
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&to_json(&a)).unwrap(),
            serde_json::to_string(&to_json(&b)).unwrap()
        );
    }

    #[test]
    fn trees_that_project_differently_are_not_equal() {
        let (pos, neg) = (float(0.0), float(-0.0));
        assert_ne!(
            serde_json::to_string(&to_json(&pos)).unwrap(),
            serde_json::to_string(&to_json(&neg)).unwrap()
        );
        assert_ne!(pos, neg);
    }

    #[test]
    fn serialize_matches_to_json() {
        let r = record([("k", ctor("Some", [int(1)]))]);
        assert_eq!(serde_json::to_value(&r).unwrap(), to_json(&r));
    }
}
