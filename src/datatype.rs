// used to print out readable forms of an identifier value
use std::fmt;

/// A value usable as the identifying part of an instance key.
///
/// Key values end up inside hash map keys, so the set of accepted types is
/// closed to those with total equality and a stable hash.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone)]
pub enum KeyValue {
    Text(String),
    Integer(i64),
    Boolean(bool),
}

impl KeyValue {
    pub fn data_type(&self) -> &'static str {
        match self {
            KeyValue::Text(_) => "Text",
            KeyValue::Integer(_) => "Integer",
            KeyValue::Boolean(_) => "Boolean",
        }
    }
}

impl fmt::Display for KeyValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            KeyValue::Text(v) => write!(f, "{}", v),
            KeyValue::Integer(v) => write!(f, "{}", v),
            KeyValue::Boolean(v) => write!(f, "{}", v),
        }
    }
}

impl From<&str> for KeyValue {
    fn from(value: &str) -> Self {
        KeyValue::Text(value.to_owned())
    }
}
impl From<String> for KeyValue {
    fn from(value: String) -> Self {
        KeyValue::Text(value)
    }
}
impl From<i64> for KeyValue {
    fn from(value: i64) -> Self {
        KeyValue::Integer(value)
    }
}
impl From<i32> for KeyValue {
    fn from(value: i32) -> Self {
        KeyValue::Integer(value as i64)
    }
}
impl From<bool> for KeyValue {
    fn from(value: bool) -> Self {
        KeyValue::Boolean(value)
    }
}
