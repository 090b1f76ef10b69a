//! Producers: turning typed values into [`Repr`] trees.
use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde_json::Value;

use crate::repr::Repr;
use crate::repr::build::{
    assoc, boolean, character, ctor, float, int, record, string, tuple, uint, unit,
};

pub trait ToRepr {
    fn to_repr(&self) -> Repr;
}

// ------------------------------- Scalars --------------------------------- //

macro_rules! int_to_repr {
    ($($t:ty),*) => {
        $(impl ToRepr for $t {
            fn to_repr(&self) -> Repr { int(*self) }
        })*
    };
}

int_to_repr!(i8, i16, i32, i64, u8, u16, u32);

// widths that may not fit an i64
macro_rules! wide_to_repr {
    ($($t:ty),*) => {
        $(impl ToRepr for $t {
            fn to_repr(&self) -> Repr {
                match i64::try_from(*self) {
                    Ok(i) => int(i),
                    Err(_) => uint(*self as u64),
                }
            }
        })*
    };
}

wide_to_repr!(u64, usize);

impl ToRepr for isize {
    fn to_repr(&self) -> Repr {
        int(*self as i64)
    }
}

impl ToRepr for bool {
    fn to_repr(&self) -> Repr {
        boolean(*self)
    }
}

impl ToRepr for f32 {
    fn to_repr(&self) -> Repr {
        float(f64::from(*self))
    }
}

impl ToRepr for f64 {
    fn to_repr(&self) -> Repr {
        float(*self)
    }
}

impl ToRepr for char {
    fn to_repr(&self) -> Repr {
        character(*self)
    }
}

impl ToRepr for str {
    fn to_repr(&self) -> Repr {
        string(self)
    }
}

impl ToRepr for String {
    fn to_repr(&self) -> Repr {
        string(self.as_str())
    }
}

impl ToRepr for () {
    fn to_repr(&self) -> Repr {
        unit()
    }
}

// ------------------------------ Containers ------------------------------- //

impl ToRepr for Repr {
    fn to_repr(&self) -> Repr {
        self.clone()
    }
}

impl<T: ToRepr + ?Sized> ToRepr for &T {
    fn to_repr(&self) -> Repr {
        (**self).to_repr()
    }
}

impl<T: ToRepr + ?Sized> ToRepr for Box<T> {
    fn to_repr(&self) -> Repr {
        (**self).to_repr()
    }
}

impl<T: ToRepr> ToRepr for Option<T> {
    fn to_repr(&self) -> Repr {
        match self {
            None => ctor("None", []),
            Some(x) => ctor("Some", [x.to_repr()]),
        }
    }
}

impl<T: ToRepr, E: ToRepr> ToRepr for Result<T, E> {
    fn to_repr(&self) -> Repr {
        match self {
            Ok(x) => ctor("Ok", [x.to_repr()]),
            Err(e) => ctor("Err", [e.to_repr()]),
        }
    }
}

impl<T: ToRepr> ToRepr for [T] {
    fn to_repr(&self) -> Repr {
        tuple(self.iter().map(ToRepr::to_repr))
    }
}

impl<T: ToRepr> ToRepr for Vec<T> {
    fn to_repr(&self) -> Repr {
        self.as_slice().to_repr()
    }
}

macro_rules! tuple_to_repr {
    ($($name:ident),+) => {
        impl<$($name: ToRepr),+> ToRepr for ($($name,)+) {
            #[allow(non_snake_case)]
            fn to_repr(&self) -> Repr {
                let ($($name,)+) = self;
                tuple([$($name.to_repr()),+])
            }
        }
    };
}

tuple_to_repr!(A);
tuple_to_repr!(A, B);
tuple_to_repr!(A, B, C);
tuple_to_repr!(A, B, C, D);

impl<K: ToRepr, V: ToRepr> ToRepr for BTreeMap<K, V> {
    fn to_repr(&self) -> Repr {
        assoc("BTreeMap", self.iter().map(|(k, v)| (k.to_repr(), v.to_repr())))
    }
}

impl<K: ToRepr, V: ToRepr> ToRepr for IndexMap<K, V> {
    fn to_repr(&self) -> Repr {
        assoc("IndexMap", self.iter().map(|(k, v)| (k.to_repr(), v.to_repr())))
    }
}

// --------------------------------- JSON ---------------------------------- //

/// `null` becomes unit, arrays tuples, objects records.
impl ToRepr for Value {
    fn to_repr(&self) -> Repr {
        match self {
            Value::Null => unit(),
            Value::Bool(b) => boolean(*b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    int(i)
                } else if let Some(u) = n.as_u64() {
                    uint(u)
                } else {
                    float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(s) => string(s.as_str()),
            Value::Array(xs) => tuple(xs.iter().map(ToRepr::to_repr)),
            Value::Object(map) => record(map.iter().map(|(k, v)| (k.as_str(), v.to_repr()))),
        }
    }
}
