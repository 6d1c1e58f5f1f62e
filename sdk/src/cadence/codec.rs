//! Conversion between [`Value`] and its tagged JSON form.
//!
//! Every value is `{"type": <tag>, "value": <payload>}`. The payload shape
//! depends on the tag; see [`encode`] for the full table.

use serde_json::{json, Map, Value as Json};

use super::error::CodecError;
use super::number::Number;
use super::tag::TypeTag;
use super::{Capability, Composite, CompositeKind, Field, Path, Value};
use crate::types::Address;

static NULL: Json = Json::Null;

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

/// Encodes a value as tagged JSON.
///
/// | Tag                   | Payload                                          |
/// |-----------------------|--------------------------------------------------|
/// | Void                  | `null`                                           |
/// | Optional              | `null` or a tagged value                         |
/// | Bool                  | JSON boolean                                     |
/// | String                | JSON string                                      |
/// | numeric kinds         | decimal string (`"12.50000000"` for UFix64)      |
/// | Address               | `"0x"` + 16 hex digits                           |
/// | Path                  | `{domain, identifier}`                           |
/// | Capability            | `{path: <tagged Path>, address, borrowType}`     |
/// | Array                 | array of tagged values                           |
/// | Dictionary            | array of `{key, value}` tagged pairs             |
/// | Struct/Resource/Event/Contract/Enum | `{id, fields: [{name, value}]}`    |
pub fn encode(value: &Value) -> Json {
    let payload = match value {
        Value::Void => Json::Null,
        Value::Optional(inner) => inner.as_deref().map_or(Json::Null, encode),
        Value::Bool(b) => Json::Bool(*b),
        Value::String(s) => Json::String(s.clone()),
        Value::Number(n) => Json::String(n.to_string()),
        Value::Address(a) => Json::String(a.to_string()),
        Value::Path(p) => path_record(p),
        Value::Capability(c) => json!({
            "path": tagged(TypeTag::Path, path_record(&c.path)),
            "address": c.address.to_string(),
            "borrowType": c.borrow_type,
        }),
        Value::Array(items) => Json::Array(items.iter().map(encode).collect()),
        Value::Dictionary(entries) => Json::Array(
            entries
                .iter()
                .map(|(k, v)| json!({ "key": encode(k), "value": encode(v) }))
                .collect(),
        ),
        Value::Composite(c) => json!({
            "id": c.id,
            "fields": c
                .fields
                .iter()
                .map(|f| json!({ "name": f.name, "value": encode(&f.value) }))
                .collect::<Vec<_>>(),
        }),
    };
    tagged(value.type_tag(), payload)
}

/// Encodes a value to compact JSON bytes, the form used for transaction
/// arguments.
pub fn encode_to_vec(value: &Value) -> Result<Vec<u8>, CodecError> {
    Ok(serde_json::to_vec(&encode(value))?)
}

fn tagged(tag: TypeTag, payload: Json) -> Json {
    json!({ "type": tag.as_str(), "value": payload })
}

fn path_record(path: &Path) -> Json {
    json!({ "domain": path.domain, "identifier": path.identifier })
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// Decodes tagged JSON into a value.
///
/// # Errors
///
/// [`CodecError::UnknownValueType`] for a tag outside the known set, and
/// the other [`CodecError`] variants for malformed payloads. Nested errors
/// abort the whole decode.
pub fn decode(json: &Json) -> Result<Value, CodecError> {
    let obj = as_object(json, "value")?;
    let tag_name = obj
        .get("type")
        .ok_or(CodecError::MissingField("type"))?
        .as_str()
        .ok_or(CodecError::InvalidField {
            field: "type",
            expected: "a string",
        })?;
    let tag = TypeTag::from_name(tag_name)
        .ok_or_else(|| CodecError::UnknownValueType(tag_name.to_string()))?;
    let payload = obj.get("value").unwrap_or(&NULL);
    decode_payload(tag, payload)
}

/// Decodes JSON bytes, e.g. a transaction argument or an event payload.
pub fn decode_slice(bytes: &[u8]) -> Result<Value, CodecError> {
    let json: Json = serde_json::from_slice(bytes)?;
    decode(&json)
}

pub fn decode_str(text: &str) -> Result<Value, CodecError> {
    decode_slice(text.as_bytes())
}

fn decode_payload(tag: TypeTag, payload: &Json) -> Result<Value, CodecError> {
    let value = match tag {
        TypeTag::Void => Value::Void,
        TypeTag::Optional => {
            if payload.is_null() {
                Value::Optional(None)
            } else {
                Value::Optional(Some(Box::new(decode(payload)?)))
            }
        }
        TypeTag::Bool => Value::Bool(payload.as_bool().ok_or(CodecError::InvalidField {
            field: "value",
            expected: "a boolean",
        })?),
        TypeTag::String => Value::String(as_str(payload, "value")?.to_string()),
        TypeTag::Address => Value::Address(Address::from_hex(as_str(payload, "value")?)?),
        TypeTag::Path => Value::Path(decode_path(payload)?),
        TypeTag::Capability => Value::Capability(decode_capability(payload)?),
        TypeTag::Array => Value::Array(
            as_array(payload, "value")?
                .iter()
                .map(decode)
                .collect::<Result<_, _>>()?,
        ),
        TypeTag::Dictionary => Value::Dictionary(
            as_array(payload, "value")?
                .iter()
                .map(|entry| -> Result<(Value, Value), CodecError> {
                    let entry = as_object(entry, "value")?;
                    let key = decode(required(entry, "key")?)?;
                    let value = decode(required(entry, "value")?)?;
                    Ok((key, value))
                })
                .collect::<Result<_, CodecError>>()?,
        ),
        _ if tag.is_number() => Value::Number(Number::parse(tag, as_str(payload, "value")?)?),
        _ => {
            let kind = CompositeKind::from_tag(tag).ok_or_else(|| {
                CodecError::UnknownValueType(tag.as_str().to_string())
            })?;
            Value::Composite(decode_composite(kind, payload)?)
        }
    };
    Ok(value)
}

fn decode_path(payload: &Json) -> Result<Path, CodecError> {
    let obj = as_object(payload, "value")?;
    Ok(Path {
        domain: as_str(required(obj, "domain")?, "domain")?.to_string(),
        identifier: as_str(required(obj, "identifier")?, "identifier")?.to_string(),
    })
}

fn decode_capability(payload: &Json) -> Result<Capability, CodecError> {
    let obj = as_object(payload, "value")?;
    // The path normally arrives tagged; a bare `{domain, identifier}` record
    // is accepted as well.
    let path_json = required(obj, "path")?;
    let path = match decode(path_json) {
        Ok(Value::Path(p)) => p,
        Ok(_) => {
            return Err(CodecError::InvalidField {
                field: "path",
                expected: "a Path value",
            })
        }
        Err(CodecError::MissingField("type")) => decode_path(path_json)?,
        Err(e) => return Err(e),
    };
    Ok(Capability {
        path,
        address: Address::from_hex(as_str(required(obj, "address")?, "address")?)?,
        borrow_type: as_str(required(obj, "borrowType")?, "borrowType")?.to_string(),
    })
}

fn decode_composite(kind: CompositeKind, payload: &Json) -> Result<Composite, CodecError> {
    let obj = as_object(payload, "value")?;
    let id = as_str(required(obj, "id")?, "id")?.to_string();
    let fields = as_array(required(obj, "fields")?, "fields")?
        .iter()
        .map(|field| -> Result<Field, CodecError> {
            let field = as_object(field, "fields")?;
            Ok(Field {
                name: as_str(required(field, "name")?, "name")?.to_string(),
                value: decode(required(field, "value")?)?,
            })
        })
        .collect::<Result<_, CodecError>>()?;
    Ok(Composite { kind, id, fields })
}

fn required<'a>(obj: &'a Map<String, Json>, field: &'static str) -> Result<&'a Json, CodecError> {
    obj.get(field).ok_or(CodecError::MissingField(field))
}

fn as_object<'a>(json: &'a Json, field: &'static str) -> Result<&'a Map<String, Json>, CodecError> {
    json.as_object().ok_or(CodecError::InvalidField {
        field,
        expected: "an object",
    })
}

fn as_array<'a>(json: &'a Json, field: &'static str) -> Result<&'a Vec<Json>, CodecError> {
    json.as_array().ok_or(CodecError::InvalidField {
        field,
        expected: "an array",
    })
}

fn as_str<'a>(json: &'a Json, field: &'static str) -> Result<&'a str, CodecError> {
    json.as_str().ok_or(CodecError::InvalidField {
        field,
        expected: "a string",
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
