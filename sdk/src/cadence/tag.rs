//! The `type` tag carried by every JSON-Cadence value.
//!
//! Tags are resolved through a fixed table built at compile time. There is
//! no runtime registration: supporting a new type means adding a variant,
//! and the compiler then points at every `match` that must handle it.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    Void,
    Optional,
    Bool,
    String,
    Int,
    UInt,
    Int8,
    Int16,
    Int32,
    Int64,
    Int128,
    Int256,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    UInt128,
    UInt256,
    Word8,
    Word16,
    Word32,
    Word64,
    Fix64,
    UFix64,
    Address,
    Path,
    Capability,
    Array,
    Dictionary,
    Struct,
    Resource,
    Event,
    Contract,
    Enum,
}

/// Wire name for every tag.
const TAG_TABLE: [(&str, TypeTag); 34] = [
    ("Void", TypeTag::Void),
    ("Optional", TypeTag::Optional),
    ("Bool", TypeTag::Bool),
    ("String", TypeTag::String),
    ("Int", TypeTag::Int),
    ("UInt", TypeTag::UInt),
    ("Int8", TypeTag::Int8),
    ("Int16", TypeTag::Int16),
    ("Int32", TypeTag::Int32),
    ("Int64", TypeTag::Int64),
    ("Int128", TypeTag::Int128),
    ("Int256", TypeTag::Int256),
    ("UInt8", TypeTag::UInt8),
    ("UInt16", TypeTag::UInt16),
    ("UInt32", TypeTag::UInt32),
    ("UInt64", TypeTag::UInt64),
    ("UInt128", TypeTag::UInt128),
    ("UInt256", TypeTag::UInt256),
    ("Word8", TypeTag::Word8),
    ("Word16", TypeTag::Word16),
    ("Word32", TypeTag::Word32),
    ("Word64", TypeTag::Word64),
    ("Fix64", TypeTag::Fix64),
    ("UFix64", TypeTag::UFix64),
    ("Address", TypeTag::Address),
    ("Path", TypeTag::Path),
    ("Capability", TypeTag::Capability),
    ("Array", TypeTag::Array),
    ("Dictionary", TypeTag::Dictionary),
    ("Struct", TypeTag::Struct),
    ("Resource", TypeTag::Resource),
    ("Event", TypeTag::Event),
    ("Contract", TypeTag::Contract),
    ("Enum", TypeTag::Enum),
];

impl TypeTag {
    /// Looks a wire name up in the tag table. Matching is case-sensitive.
    pub fn from_name(name: &str) -> Option<TypeTag> {
        TAG_TABLE
            .iter()
            .find(|(wire, _)| *wire == name)
            .map(|(_, tag)| *tag)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TypeTag::Void => "Void",
            TypeTag::Optional => "Optional",
            TypeTag::Bool => "Bool",
            TypeTag::String => "String",
            TypeTag::Int => "Int",
            TypeTag::UInt => "UInt",
            TypeTag::Int8 => "Int8",
            TypeTag::Int16 => "Int16",
            TypeTag::Int32 => "Int32",
            TypeTag::Int64 => "Int64",
            TypeTag::Int128 => "Int128",
            TypeTag::Int256 => "Int256",
            TypeTag::UInt8 => "UInt8",
            TypeTag::UInt16 => "UInt16",
            TypeTag::UInt32 => "UInt32",
            TypeTag::UInt64 => "UInt64",
            TypeTag::UInt128 => "UInt128",
            TypeTag::UInt256 => "UInt256",
            TypeTag::Word8 => "Word8",
            TypeTag::Word16 => "Word16",
            TypeTag::Word32 => "Word32",
            TypeTag::Word64 => "Word64",
            TypeTag::Fix64 => "Fix64",
            TypeTag::UFix64 => "UFix64",
            TypeTag::Address => "Address",
            TypeTag::Path => "Path",
            TypeTag::Capability => "Capability",
            TypeTag::Array => "Array",
            TypeTag::Dictionary => "Dictionary",
            TypeTag::Struct => "Struct",
            TypeTag::Resource => "Resource",
            TypeTag::Event => "Event",
            TypeTag::Contract => "Contract",
            TypeTag::Enum => "Enum",
        }
    }

    /// `true` for the twenty numeric kinds.
    pub fn is_number(self) -> bool {
        matches!(
            self,
            TypeTag::Int
                | TypeTag::UInt
                | TypeTag::Int8
                | TypeTag::Int16
                | TypeTag::Int32
                | TypeTag::Int64
                | TypeTag::Int128
                | TypeTag::Int256
                | TypeTag::UInt8
                | TypeTag::UInt16
                | TypeTag::UInt32
                | TypeTag::UInt64
                | TypeTag::UInt128
                | TypeTag::UInt256
                | TypeTag::Word8
                | TypeTag::Word16
                | TypeTag::Word32
                | TypeTag::Word64
                | TypeTag::Fix64
                | TypeTag::UFix64
        )
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
