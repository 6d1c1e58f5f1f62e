//! # JSON-Cadence Values
//!
//! The value model for transaction arguments and event payloads, and its
//! JSON interchange format.
//!
//! ## Architecture
//!
//! ```text
//! tag.rs     — TypeTag: the `type` discriminant and its wire names
//! number.rs  — Number: the twenty numeric kinds, parsed and range-checked
//! codec.rs   — encode/decode between Value and serde_json::Value
//! error.rs   — CodecError
//! ```
//!
//! [`Value`] is a closed sum type. Every variant knows its [`TypeTag`], so
//! decoding a value and encoding it again yields the same tagged JSON.
//!
//! ## Composite fields
//!
//! Field order inside a struct or event is not stable across chain
//! upgrades. Look fields up by name with [`Composite::get`]; a missing field
//! is `None`, not an error.

pub mod codec;
pub mod error;
pub mod number;
pub mod tag;

pub use codec::{decode, decode_slice, decode_str, encode, encode_to_vec};
pub use error::CodecError;
pub use number::{Number, I256, U256};
pub use tag::TypeTag;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::types::Address;

// ---------------------------------------------------------------------------
// Value
// ---------------------------------------------------------------------------

/// A JSON-Cadence value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Void,
    Optional(Option<Box<Value>>),
    Bool(bool),
    String(String),
    Number(Number),
    Address(Address),
    Path(Path),
    Capability(Capability),
    Array(Vec<Value>),
    /// Entries in wire order. Keys are expected, not enforced, to be unique.
    Dictionary(Vec<(Value, Value)>),
    Composite(Composite),
}

impl Value {
    pub fn type_tag(&self) -> TypeTag {
        match self {
            Value::Void => TypeTag::Void,
            Value::Optional(_) => TypeTag::Optional,
            Value::Bool(_) => TypeTag::Bool,
            Value::String(_) => TypeTag::String,
            Value::Number(n) => n.tag(),
            Value::Address(_) => TypeTag::Address,
            Value::Path(_) => TypeTag::Path,
            Value::Capability(_) => TypeTag::Capability,
            Value::Array(_) => TypeTag::Array,
            Value::Dictionary(_) => TypeTag::Dictionary,
            Value::Composite(c) => c.kind.tag(),
        }
    }

    /// Wraps an optional inner value.
    pub fn optional(inner: Option<Value>) -> Value {
        Value::Optional(inner.map(Box::new))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_address(&self) -> Option<Address> {
        match self {
            Value::Address(a) => Some(*a),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn as_dictionary(&self) -> Option<&[(Value, Value)]> {
        match self {
            Value::Dictionary(entries) => Some(entries.as_slice()),
            _ => None,
        }
    }

    pub fn as_composite(&self) -> Option<&Composite> {
        match self {
            Value::Composite(c) => Some(c),
            _ => None,
        }
    }

    /// Unwraps one level of `Optional`. `Some(None)` means "present but nil";
    /// `None` means this value is not an optional at all.
    pub fn as_optional(&self) -> Option<Option<&Value>> {
        match self {
            Value::Optional(inner) => Some(inner.as_deref()),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl From<Address> for Value {
    fn from(a: Address) -> Self {
        Value::Address(a)
    }
}

impl From<Composite> for Value {
    fn from(c: Composite) -> Self {
        Value::Composite(c)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        encode(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let json = serde_json::Value::deserialize(deserializer)?;
        decode(&json).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Paths and capabilities
// ---------------------------------------------------------------------------

/// A storage path such as `/storage/flowTokenVault`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path {
    pub domain: String,
    pub identifier: String,
}

impl Path {
    pub fn new(domain: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            identifier: identifier.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Capability {
    pub path: Path,
    pub address: Address,
    pub borrow_type: String,
}

// ---------------------------------------------------------------------------
// Composites
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompositeKind {
    Struct,
    Resource,
    Event,
    Contract,
    Enum,
}

impl CompositeKind {
    pub fn tag(self) -> TypeTag {
        match self {
            CompositeKind::Struct => TypeTag::Struct,
            CompositeKind::Resource => TypeTag::Resource,
            CompositeKind::Event => TypeTag::Event,
            CompositeKind::Contract => TypeTag::Contract,
            CompositeKind::Enum => TypeTag::Enum,
        }
    }

    pub fn from_tag(tag: TypeTag) -> Option<Self> {
        match tag {
            TypeTag::Struct => Some(CompositeKind::Struct),
            TypeTag::Resource => Some(CompositeKind::Resource),
            TypeTag::Event => Some(CompositeKind::Event),
            TypeTag::Contract => Some(CompositeKind::Contract),
            TypeTag::Enum => Some(CompositeKind::Enum),
            _ => None,
        }
    }
}

/// One named field of a composite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub value: Value,
}

impl Field {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A struct, resource, event, contract or enum instance.
///
/// `id` is the fully qualified type id, e.g.
/// `A.1654653399040a61.FlowToken.TokensDeposited`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composite {
    pub kind: CompositeKind,
    pub id: String,
    pub fields: Vec<Field>,
}

impl Composite {
    pub fn new(kind: CompositeKind, id: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            kind,
            id: id.into(),
            fields,
        }
    }

    /// The value of the first field called `name`, if any.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| &f.value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.name == name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }
}
