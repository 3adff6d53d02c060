//! Dynamically typed property values.
//!
//! wpa_supplicant hands out `a{sv}` mappings whose values can themselves be
//! mappings (the `Properties` table of a network object). [`PropValue`]
//! represents those payloads uniformly. Unpacking is explicit and fails with
//! [`WpaError::TypeMismatch`] instead of coercing.

use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use zvariant::{OwnedObjectPath, OwnedValue, Signature, Value};

use crate::api::models::WpaError;
use crate::Result;

/// A string-keyed mapping of dynamically typed values.
pub type PropertyMap = HashMap<String, PropValue>;

/// A dynamically typed value read from, or sent to, the daemon.
#[derive(Debug, Clone, PartialEq)]
pub enum PropValue {
    Bool(bool),
    /// Any integer type on the wire, widened.
    Int(i64),
    Str(String),
    /// A byte array (`ay`), e.g. a raw SSID.
    Bytes(Vec<u8>),
    ObjectPath(OwnedObjectPath),
    List(Vec<PropValue>),
    Map(PropertyMap),
}

impl PropValue {
    /// Name of the variant, used in mismatch errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Str(_) => "string",
            Self::Bytes(_) => "bytes",
            Self::ObjectPath(_) => "object path",
            Self::List(_) => "list",
            Self::Map(_) => "map",
        }
    }

    fn mismatch(&self, expected: &'static str) -> WpaError {
        WpaError::TypeMismatch {
            expected,
            found: self.kind().to_string(),
        }
    }

    pub fn as_str(&self) -> Result<&str> {
        match self {
            Self::Str(s) => Ok(s),
            other => Err(other.mismatch("string")),
        }
    }

    pub fn as_bool(&self) -> Result<bool> {
        match self {
            Self::Bool(b) => Ok(*b),
            other => Err(other.mismatch("bool")),
        }
    }

    pub fn as_bytes(&self) -> Result<&[u8]> {
        match self {
            Self::Bytes(b) => Ok(b),
            other => Err(other.mismatch("bytes")),
        }
    }

    pub fn as_object_path(&self) -> Result<&OwnedObjectPath> {
        match self {
            Self::ObjectPath(p) => Ok(p),
            other => Err(other.mismatch("object path")),
        }
    }

    pub fn as_map(&self) -> Result<&PropertyMap> {
        match self {
            Self::Map(m) => Ok(m),
            other => Err(other.mismatch("map")),
        }
    }

    /// Consumes the value, returning the nested mapping.
    pub fn into_map(self) -> Result<PropertyMap> {
        match self {
            Self::Map(m) => Ok(m),
            other => Err(other.mismatch("map")),
        }
    }

    /// Borrows the value as a `zvariant::Value` for use as a call argument.
    pub fn to_value(&self) -> Value<'_> {
        match self {
            Self::Bool(b) => Value::Bool(*b),
            Self::Int(n) => Value::I64(*n),
            Self::Str(s) => Value::from(s.as_str()),
            Self::Bytes(b) => Value::from(b.clone()),
            Self::ObjectPath(p) => Value::from(p.clone()),
            Self::List(items) => {
                Value::from(items.iter().map(PropValue::to_value).collect::<Vec<_>>())
            }
            Self::Map(map) => Value::from(to_value_map(map)),
        }
    }
}

/// Converts a property mapping into the `a{sv}` shape the proxies send.
pub(crate) fn to_value_map(map: &PropertyMap) -> HashMap<String, Value<'_>> {
    map.iter()
        .map(|(k, v)| (k.clone(), v.to_value()))
        .collect()
}

/// Converts an `a{sv}` mapping read from the bus.
pub(crate) fn from_owned_map<'a, I>(entries: I) -> Result<PropertyMap>
where
    I: IntoIterator<Item = (&'a String, &'a OwnedValue)>,
{
    entries
        .into_iter()
        .map(|(k, v)| PropValue::try_from(&**v).map(|pv| (k.clone(), pv)))
        .collect()
}

impl TryFrom<&Value<'_>> for PropValue {
    type Error = WpaError;

    fn try_from(value: &Value<'_>) -> Result<Self> {
        match value {
            Value::Bool(b) => Ok(Self::Bool(*b)),
            Value::U8(n) => Ok(Self::Int(i64::from(*n))),
            Value::I16(n) => Ok(Self::Int(i64::from(*n))),
            Value::U16(n) => Ok(Self::Int(i64::from(*n))),
            Value::I32(n) => Ok(Self::Int(i64::from(*n))),
            Value::U32(n) => Ok(Self::Int(i64::from(*n))),
            Value::I64(n) => Ok(Self::Int(*n)),
            Value::Str(s) => Ok(Self::Str(s.to_string())),
            Value::ObjectPath(p) => Ok(Self::ObjectPath(OwnedObjectPath::from(p.clone()))),
            Value::Value(inner) => Self::try_from(&**inner),
            // only `ay` is a byte string, even when empty
            Value::Array(arr) if matches!(arr.element_signature(), Signature::U8) => arr
                .iter()
                .map(|item| match item {
                    Value::U8(b) => Ok(*b),
                    other => Err(WpaError::TypeMismatch {
                        expected: "byte",
                        found: other.value_signature().to_string(),
                    }),
                })
                .collect::<Result<Vec<u8>>>()
                .map(Self::Bytes),
            Value::Array(arr) => arr
                .iter()
                .map(Self::try_from)
                .collect::<Result<Vec<_>>>()
                .map(Self::List),
            Value::Dict(dict) => {
                let mut map = PropertyMap::new();
                for (k, v) in dict.iter() {
                    let key = match k {
                        Value::Str(s) => s.to_string(),
                        other => {
                            return Err(WpaError::TypeMismatch {
                                expected: "string key",
                                found: other.value_signature().to_string(),
                            });
                        }
                    };
                    map.insert(key, Self::try_from(v)?);
                }
                Ok(Self::Map(map))
            }
            other => Err(WpaError::TypeMismatch {
                expected: "supported property value",
                found: other.value_signature().to_string(),
            }),
        }
    }
}

impl From<&str> for PropValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for PropValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<bool> for PropValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<Vec<u8>> for PropValue {
    fn from(b: Vec<u8>) -> Self {
        Self::Bytes(b)
    }
}

impl From<OwnedObjectPath> for PropValue {
    fn from(p: OwnedObjectPath) -> Self {
        Self::ObjectPath(p)
    }
}

impl From<PropertyMap> for PropValue {
    fn from(m: PropertyMap) -> Self {
        Self::Map(m)
    }
}

impl Display for PropValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Str(s) => write!(f, "{s}"),
            Self::Bytes(b) => write!(f, "{}", String::from_utf8_lossy(b)),
            Self::ObjectPath(p) => write!(f, "{}", p.as_str()),
            Self::List(items) => write!(f, "[{} items]", items.len()),
            Self::Map(m) => write!(f, "{{{} entries}}", m.len()),
        }
    }
}
