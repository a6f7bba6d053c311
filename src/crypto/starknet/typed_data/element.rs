//! 타입 데이터 메시지 원소
//!
//! JSON 메시지 값을 닫힌 열거형으로 표현합니다. 구조체 필드는 타입 선언 순서로 조회하므로
//! 객체 키 순서는 해시에 영향을 주지 않습니다.

use super::super::felt::felt_to_hex;
use crate::errors::{StarknetError, StarknetResult};
use num_bigint::{BigInt, BigUint, Sign};
use num_traits::ToPrimitive;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use starknet_types_core::felt::Felt;

/// 메시지 원소
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    Object(Vec<(String, Element)>),
    Array(Vec<Element>),
    String(String),
    Decimal(BigUint),
    SignedDecimal(BigInt),
    Felt(Felt),
    Bool(bool),
}

impl Element {
    /// 키-값 쌍으로 객체 생성
    pub fn object<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Element)>,
    {
        Element::Object(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value))
                .collect(),
        )
    }

    /// 객체 필드 조회
    pub fn get(&self, key: &str) -> Option<&Element> {
        match self {
            Element::Object(entries) => entries
                .iter()
                .find(|(name, _)| name == key)
                .map(|(_, value)| value),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&[(String, Element)]> {
        match self {
            Element::Object(entries) => Some(entries),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Element]> {
        match self {
            Element::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Element::String(s) => Some(s),
            _ => None,
        }
    }

    /// 에러 메시지용 원소 종류
    pub fn kind(&self) -> &'static str {
        match self {
            Element::Object(_) => "object",
            Element::Array(_) => "array",
            Element::String(_) => "string",
            Element::Decimal(_) => "decimal",
            Element::SignedDecimal(_) => "signed decimal",
            Element::Felt(_) => "felt",
            Element::Bool(_) => "bool",
        }
    }

    /// JSON 값에서 변환
    ///
    /// 부동소수점 수와 `null` 은 허용되지 않습니다.
    pub fn from_json(value: Value) -> StarknetResult<Self> {
        match value {
            Value::Object(map) => {
                let entries = map
                    .into_iter()
                    .map(|(key, value)| Ok((key, Element::from_json(value)?)))
                    .collect::<StarknetResult<Vec<_>>>()?;
                Ok(Element::Object(entries))
            },
            Value::Array(items) => Ok(Element::Array(
                items
                    .into_iter()
                    .map(Element::from_json)
                    .collect::<StarknetResult<Vec<_>>>()?,
            )),
            Value::String(s) => Ok(Element::String(s)),
            Value::Bool(b) => Ok(Element::Bool(b)),
            Value::Number(number) => {
                if let Some(unsigned) = number.as_u64() {
                    Ok(Element::Decimal(BigUint::from(unsigned)))
                } else if let Some(signed) = number.as_i64() {
                    Ok(Element::SignedDecimal(BigInt::from(signed)))
                } else {
                    Err(StarknetError::InvalidElement {
                        type_name: "number".into(),
                        message: format!("Non-integer numbers are not supported: {number}"),
                    })
                }
            },
            Value::Null => Err(StarknetError::InvalidElement {
                type_name: "null".into(),
                message: "null values are not supported".into(),
            }),
        }
    }

    /// JSON 값으로 변환
    pub fn to_json(&self) -> Value {
        match self {
            Element::Object(entries) => Value::Object(
                entries
                    .iter()
                    .map(|(key, value)| (key.clone(), value.to_json()))
                    .collect(),
            ),
            Element::Array(items) => Value::Array(items.iter().map(Element::to_json).collect()),
            Element::String(s) => Value::String(s.clone()),
            Element::Decimal(value) => match value.to_u64() {
                Some(small) => Value::from(small),
                None => Value::String(value.to_string()),
            },
            Element::SignedDecimal(value) => match value.to_i64() {
                Some(small) => Value::from(small),
                None => Value::String(value.to_string()),
            },
            Element::Felt(felt) => Value::String(felt_to_hex(felt)),
            Element::Bool(b) => Value::Bool(*b),
        }
    }
}

impl From<&str> for Element {
    fn from(value: &str) -> Self {
        Element::String(value.to_string())
    }
}

impl From<String> for Element {
    fn from(value: String) -> Self {
        Element::String(value)
    }
}

impl From<u64> for Element {
    fn from(value: u64) -> Self {
        Element::Decimal(BigUint::from(value))
    }
}

impl From<i64> for Element {
    fn from(value: i64) -> Self {
        let value = BigInt::from(value);
        match value.sign() {
            Sign::Minus => Element::SignedDecimal(value),
            _ => Element::Decimal(value.magnitude().clone()),
        }
    }
}

impl From<bool> for Element {
    fn from(value: bool) -> Self {
        Element::Bool(value)
    }
}

impl From<Felt> for Element {
    fn from(value: Felt) -> Self {
        Element::Felt(value)
    }
}

impl From<Vec<Element>> for Element {
    fn from(items: Vec<Element>) -> Self {
        Element::Array(items)
    }
}

impl Serialize for Element {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Element::Object(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            },
            Element::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            },
            other => other.to_json().serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Element {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Element::from_json(value).map_err(serde::de::Error::custom)
    }
}
