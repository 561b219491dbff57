//! Codec for the GFA optional-tag mini-language
//!
//! Optional fields on GFA records have the form `NAME:T:payload`, where `T`
//! is a one-letter type code. Each type code has its own payload encoding;
//! this module decodes them to native values and encodes them back so that
//! records round-trip losslessly through parse/mutate/serialize cycles.

use crate::error::{GfaError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

fn malformed(message: impl Into<String>) -> GfaError {
    GfaError::MalformedTag {
        line: 0,
        message: message.into(),
    }
}

/// Width code of a `B`-type integer array (`c`, `C`, `s`, `S`, `i`, `I`).
///
/// The code is preserved through decode so that re-encoding reproduces the
/// declared width, but elements always decode as `i64` and no range check
/// is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntArrayKind {
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
}

impl IntArrayKind {
    fn from_code(c: char) -> Option<Self> {
        match c {
            'c' => Some(IntArrayKind::I8),
            'C' => Some(IntArrayKind::U8),
            's' => Some(IntArrayKind::I16),
            'S' => Some(IntArrayKind::U16),
            'i' => Some(IntArrayKind::I32),
            'I' => Some(IntArrayKind::U32),
            _ => None,
        }
    }

    fn code(self) -> char {
        match self {
            IntArrayKind::I8 => 'c',
            IntArrayKind::U8 => 'C',
            IntArrayKind::I16 => 's',
            IntArrayKind::U16 => 'S',
            IntArrayKind::I32 => 'i',
            IntArrayKind::U32 => 'I',
        }
    }
}

/// Decoded value of one optional tag
///
/// A closed union over the GFA tag types: the discriminant always agrees
/// with the type code the value was decoded from (or will encode to).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TagValue {
    /// `A` — a single printable character
    Char(char),
    /// `i` — signed base-10 integer
    Int(i64),
    /// `f` — decimal float
    Float(f64),
    /// `Z` — printable string
    String(String),
    /// `J` — a self-contained JSON value
    Json(serde_json::Value),
    /// `H` — byte array, hex encoded
    Bytes(Vec<u8>),
    /// `B` with an integer element code — numeric array of integers
    IntArray(IntArrayKind, Vec<i64>),
    /// `B` with element code `f` — numeric array of floats
    FloatArray(Vec<f64>),
}

impl TagValue {
    /// Decode a payload according to its one-letter type code.
    pub fn decode(code: char, payload: &str) -> Result<Self> {
        match code {
            'A' => {
                let mut chars = payload.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii_graphic() => Ok(TagValue::Char(c)),
                    _ => Err(malformed(format!(
                        "type A expects exactly one printable character, got {:?}",
                        payload
                    ))),
                }
            }
            'i' => payload
                .parse::<i64>()
                .map(TagValue::Int)
                .map_err(|e| malformed(format!("bad integer payload {:?}: {}", payload, e))),
            'f' => payload
                .parse::<f64>()
                .map(TagValue::Float)
                .map_err(|e| malformed(format!("bad float payload {:?}: {}", payload, e))),
            'Z' => Ok(TagValue::String(payload.to_string())),
            'J' => serde_json::from_str(payload)
                .map(TagValue::Json)
                .map_err(|e| malformed(format!("bad JSON payload: {}", e))),
            'H' => decode_hex(payload).map(TagValue::Bytes),
            'B' => decode_numeric_array(payload),
            other => Err(malformed(format!(
                "type identifier {:?} is not in the GFA standard",
                other
            ))),
        }
    }

    /// The one-letter type code this value encodes as.
    pub fn type_code(&self) -> char {
        match self {
            TagValue::Char(_) => 'A',
            TagValue::Int(_) => 'i',
            TagValue::Float(_) => 'f',
            TagValue::String(_) => 'Z',
            TagValue::Json(_) => 'J',
            TagValue::Bytes(_) => 'H',
            TagValue::IntArray(..) | TagValue::FloatArray(_) => 'B',
        }
    }

    /// Encode the value back to its payload text.
    ///
    /// For every well-formed payload, `decode` then `encode` reproduces the
    /// input byte for byte, except that float and numeric-array elements may
    /// be reformatted to an equal numeric value.
    pub fn encode(&self) -> String {
        match self {
            TagValue::Char(c) => c.to_string(),
            TagValue::Int(i) => i.to_string(),
            TagValue::Float(x) => x.to_string(),
            TagValue::String(s) => s.clone(),
            // Compact separators, matching the densest JSON form
            TagValue::Json(v) => v.to_string(),
            TagValue::Bytes(bytes) => {
                let mut out = String::with_capacity(bytes.len() * 2);
                for b in bytes {
                    out.push_str(&format!("{:02X}", b));
                }
                out
            }
            TagValue::IntArray(kind, values) => {
                let mut out = kind.code().to_string();
                for v in values {
                    out.push(',');
                    out.push_str(&v.to_string());
                }
                out
            }
            TagValue::FloatArray(values) => {
                let mut out = String::from("f");
                for v in values {
                    out.push(',');
                    out.push_str(&v.to_string());
                }
                out
            }
        }
    }

    /// Integer payload, if this is an `i` tag
    pub fn as_int(&self) -> Option<i64> {
        match self {
            TagValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// String payload, if this is a `Z` tag
    pub fn as_str(&self) -> Option<&str> {
        match self {
            TagValue::String(s) => Some(s),
            _ => None,
        }
    }
}

fn decode_hex(payload: &str) -> Result<Vec<u8>> {
    if payload.len() % 2 != 0 {
        return Err(malformed(format!(
            "hex payload has odd length {}",
            payload.len()
        )));
    }
    let bytes = payload.as_bytes();
    let mut out = Vec::with_capacity(bytes.len() / 2);
    for pair in bytes.chunks(2) {
        let s = std::str::from_utf8(pair).map_err(|_| malformed("non-ASCII hex payload"))?;
        let b = u8::from_str_radix(s, 16)
            .map_err(|_| malformed(format!("invalid hex digits {:?}", s)))?;
        out.push(b);
    }
    Ok(out)
}

fn decode_numeric_array(payload: &str) -> Result<TagValue> {
    let mut chars = payload.chars();
    let kind_char = chars
        .next()
        .ok_or_else(|| malformed("empty numeric array payload"))?;
    let rest = chars.as_str();
    // Zero-length arrays are legal: the payload is just the element code
    let elements: Vec<&str> = if rest.is_empty() {
        Vec::new()
    } else if let Some(stripped) = rest.strip_prefix(',') {
        stripped.split(',').collect()
    } else {
        return Err(malformed(format!(
            "numeric array elements must be comma-led, got {:?}",
            payload
        )));
    };

    if kind_char == 'f' {
        let mut values = Vec::with_capacity(elements.len());
        for e in elements {
            values.push(
                e.parse::<f64>()
                    .map_err(|_| malformed(format!("bad float array element {:?}", e)))?,
            );
        }
        Ok(TagValue::FloatArray(values))
    } else if let Some(kind) = IntArrayKind::from_code(kind_char) {
        let mut values = Vec::with_capacity(elements.len());
        for e in elements {
            values.push(
                e.parse::<i64>()
                    .map_err(|_| malformed(format!("bad integer array element {:?}", e)))?,
            );
        }
        Ok(TagValue::IntArray(kind, values))
    } else {
        Err(malformed(format!(
            "unknown numeric array element code {:?}",
            kind_char
        )))
    }
}

/// One named optional tag on a GFA record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    /// Two-character tag name
    pub name: String,
    /// Decoded payload
    pub value: TagValue,
}

impl Tag {
    pub fn new(name: impl Into<String>, value: TagValue) -> Self {
        Tag {
            name: name.into(),
            value,
        }
    }

    /// Parse one `NAME:T:payload` optional field.
    pub fn parse(field: &str) -> Result<Self> {
        let mut parts = field.splitn(3, ':');
        let (name, code, payload) = match (parts.next(), parts.next(), parts.next()) {
            (Some(n), Some(c), Some(p)) => (n, c, p),
            _ => {
                return Err(malformed(format!(
                    "optional field {:?} is not of the form NAME:TYPE:PAYLOAD",
                    field
                )))
            }
        };
        if !is_valid_tag_name(name) {
            return Err(malformed(format!("invalid tag name {:?}", name)));
        }
        let mut code_chars = code.chars();
        let code_char = match (code_chars.next(), code_chars.next()) {
            (Some(c), None) => c,
            _ => {
                return Err(malformed(format!(
                    "type code {:?} must be a single character",
                    code
                )))
            }
        };
        let value = TagValue::decode(code_char, payload)?;
        Ok(Tag {
            name: name.to_string(),
            value,
        })
    }
}

fn is_valid_tag_name(name: &str) -> bool {
    let bytes = name.as_bytes();
    bytes.len() == 2 && bytes[0].is_ascii_alphabetic() && bytes[1].is_ascii_alphanumeric()
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.name,
            self.value.type_code(),
            self.value.encode()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_char() {
        assert_eq!(TagValue::decode('A', "x").unwrap(), TagValue::Char('x'));
        assert!(TagValue::decode('A', "xy").is_err());
        assert!(TagValue::decode('A', "").is_err());
    }

    #[test]
    fn test_decode_int() {
        assert_eq!(TagValue::decode('i', "-42").unwrap(), TagValue::Int(-42));
        assert!(TagValue::decode('i', "4.2").is_err());
        assert!(TagValue::decode('i', "four").is_err());
    }

    #[test]
    fn test_decode_float() {
        assert_eq!(
            TagValue::decode('f', "1.5e3").unwrap(),
            TagValue::Float(1500.0)
        );
        assert!(TagValue::decode('f', "abc").is_err());
    }

    #[test]
    fn test_decode_json() {
        let v = TagValue::decode('J', r#"{"a":[1,2]}"#).unwrap();
        match v {
            TagValue::Json(j) => assert_eq!(j["a"][1], 2),
            other => panic!("expected JSON, got {:?}", other),
        }
        assert!(TagValue::decode('J', "{broken").is_err());
    }

    #[test]
    fn test_decode_hex() {
        assert_eq!(
            TagValue::decode('H', "00FF10").unwrap(),
            TagValue::Bytes(vec![0x00, 0xFF, 0x10])
        );
        // odd length
        assert!(TagValue::decode('H', "FFF").is_err());
        // non-hex digit
        assert!(TagValue::decode('H', "GG").is_err());
    }

    #[test]
    fn test_decode_numeric_array() {
        assert_eq!(
            TagValue::decode('B', "c,1,-2,3").unwrap(),
            TagValue::IntArray(IntArrayKind::I8, vec![1, -2, 3])
        );
        assert_eq!(
            TagValue::decode('B', "f,0.5,1.5").unwrap(),
            TagValue::FloatArray(vec![0.5, 1.5])
        );
        // empty arrays are legal
        assert_eq!(
            TagValue::decode('B', "I").unwrap(),
            TagValue::IntArray(IntArrayKind::U32, Vec::new())
        );
        // element kind mismatch
        assert!(TagValue::decode('B', "i,1.5").is_err());
        assert!(TagValue::decode('B', "x,1").is_err());
        assert!(TagValue::decode('B', "").is_err());
    }

    #[test]
    fn test_unknown_type_code() {
        assert!(TagValue::decode('Q', "whatever").is_err());
    }

    #[test]
    fn test_roundtrip_normalized_payloads() {
        for (code, payload) in [
            ('A', "c"),
            ('i', "-17"),
            ('Z', "free text without tabs"),
            ('H', "DEADBEEF"),
            ('B', "s,100,-200"),
            ('B', "f"),
            ('J', r#"{"w1":[334,335,"+"]}"#),
        ] {
            let value = TagValue::decode(code, payload).unwrap();
            assert_eq!(value.type_code(), code, "type code for {:?}", payload);
            assert_eq!(value.encode(), payload, "payload for {:?}", payload);
        }
    }

    #[test]
    fn test_parse_tag_field() {
        let tag = Tag::parse("LN:i:4").unwrap();
        assert_eq!(tag.name, "LN");
        assert_eq!(tag.value, TagValue::Int(4));
        assert_eq!(tag.to_string(), "LN:i:4");

        assert!(Tag::parse("LN:i").is_err());
        assert!(Tag::parse("toolong:i:4").is_err());
        assert!(Tag::parse("1N:i:4").is_err());
        assert!(Tag::parse("LN:ii:4").is_err());
    }

    #[test]
    fn test_json_payload_may_contain_colons() {
        let tag = Tag::parse(r#"PO:J:{"w1":[245,247,"-"]}"#).unwrap();
        assert_eq!(tag.value.type_code(), 'J');
        assert_eq!(tag.to_string(), r#"PO:J:{"w1":[245,247,"-"]}"#);
    }
}
