//! The value held by a single option slot.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A renderer option value.
///
/// `Null` and `Bool(false)` leave the option off the command line,
/// `Bool(true)` emits a bare flag, `Str` emits the flag followed by the value
/// and `List` repeats the flag once per element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OptionValue {
    #[default]
    Null,
    Bool(bool),
    Str(String),
    List(Vec<String>),
}

impl OptionValue {
    /// An empty list, the default of repeatable options.
    pub fn empty_list() -> Self {
        OptionValue::List(Vec::new())
    }

    /// True when the option contributes nothing to the command line.
    pub fn is_omitted(&self) -> bool {
        matches!(self, OptionValue::Null | OptionValue::Bool(false))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, OptionValue::Null)
    }

}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Null => write!(f, "null"),
            OptionValue::Bool(b) => write!(f, "{b}"),
            OptionValue::Str(s) => write!(f, "{s:?}"),
            OptionValue::List(items) => write!(f, "{items:?}"),
        }
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Bool(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::Str(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::Str(value)
    }
}

impl From<&String> for OptionValue {
    fn from(value: &String) -> Self {
        OptionValue::Str(value.clone())
    }
}

impl From<Vec<String>> for OptionValue {
    fn from(value: Vec<String>) -> Self {
        OptionValue::List(value)
    }
}

impl From<Vec<&str>> for OptionValue {
    fn from(value: Vec<&str>) -> Self {
        OptionValue::List(value.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for OptionValue {
    fn from(value: [&str; N]) -> Self {
        OptionValue::List(value.iter().map(|s| s.to_string()).collect())
    }
}

macro_rules! impl_from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for OptionValue {
                fn from(value: $t) -> Self {
                    OptionValue::Str(value.to_string())
                }
            }
        )*
    };
}

impl_from_integer!(i32, i64, u16, u32, u64, usize);

impl<T: Into<OptionValue>> From<Option<T>> for OptionValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(OptionValue::Null)
    }
}

impl Serialize for OptionValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            OptionValue::Null => serializer.serialize_none(),
            OptionValue::Bool(b) => serializer.serialize_bool(*b),
            OptionValue::Str(s) => serializer.serialize_str(s),
            OptionValue::List(items) => serializer.collect_seq(items),
        }
    }
}

/// Shapes accepted on the wire. Integers are kept as their decimal text.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawValue {
    Bool(bool),
    Int(i64),
    Str(String),
    List(Vec<String>),
}

impl<'de> Deserialize<'de> for OptionValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<RawValue>::deserialize(deserializer)?;
        Ok(match raw {
            None => OptionValue::Null,
            Some(RawValue::Bool(b)) => OptionValue::Bool(b),
            Some(RawValue::Int(i)) => OptionValue::Str(i.to_string()),
            Some(RawValue::Str(s)) => OptionValue::Str(s),
            Some(RawValue::List(items)) => OptionValue::List(items),
        })
    }
}
