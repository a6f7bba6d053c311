//! 타입별 값 인코딩
//!
//! 메시지 원소를 선언된 타입에 따라 하나의 Felt로 인코딩합니다.
//! 구조체는 구조체 해시로, 배열은 원소 인코딩의 해시로, 열거형과 Merkle 트리는
//! 부모 구조체의 필드 선언(`contains`)을 참고해 인코딩됩니다.

use super::super::felt::{
    felt_from_bigint, felt_from_biguint, felt_from_dec_str, felt_from_hex, felt_to_biguint, pow2,
    short_string_to_felt, ByteArray,
};
use super::super::merkle::MerkleTree;
use super::super::poseidon::prepare_selector;
use super::element::Element;
use super::types::{is_tuple_type, tuple_members, TypeDeclaration, TypedDataRevision};
use super::TypedData;
use crate::errors::{StarknetError, StarknetResult};
use num_bigint::BigInt;
use num_traits::{One, Zero};
use starknet_types_core::felt::Felt;
use tracing::trace;

/// 값이 속한 부모 구조체와 필드 이름
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldContext<'a> {
    pub parent: &'a str,
    pub key: &'a str,
}

impl<'a> FieldContext<'a> {
    pub fn new(parent: &'a str, key: &'a str) -> Self {
        Self { parent, key }
    }
}

fn describe(element: &Element) -> String {
    element.to_json().to_string()
}

fn invalid_element(type_name: &str, element: &Element, expected: &str) -> StarknetError {
    StarknetError::InvalidElement {
        type_name: type_name.to_string(),
        message: format!("Expected {expected}, got {}", element.kind()),
    }
}

fn is_hex_literal(s: &str) -> bool {
    s.starts_with("0x") || s.starts_with("0X")
}

fn is_decimal_literal(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// 문자열 Felt 변환: 16진수, 10진수, 그 외에는 short string
fn string_to_felt(s: &str) -> StarknetResult<Felt> {
    if is_hex_literal(s) {
        felt_from_hex(s)
    } else if is_decimal_literal(s) {
        felt_from_dec_str(s)
    } else {
        short_string_to_felt(s)
    }
}

/// `felt`, `shortstring`, `ContractAddress`, `ClassHash` 및 리비전 0 `string`
pub fn felt_value(element: &Element, type_name: &str) -> StarknetResult<Felt> {
    match element {
        Element::Felt(felt) => Ok(*felt),
        Element::Bool(b) => Ok(if *b { Felt::ONE } else { Felt::ZERO }),
        Element::Decimal(value) => felt_from_biguint(value),
        Element::SignedDecimal(value) => Err(StarknetError::ValueOutOfRange {
            type_name: type_name.to_string(),
            value: value.to_string(),
        }),
        Element::String(s) => string_to_felt(s),
        other => Err(invalid_element(type_name, other, "a scalar")),
    }
}

/// `u128`, `timestamp`: `[0, 2^128)`
pub fn u128_value(element: &Element, type_name: &str) -> StarknetResult<Felt> {
    let felt = felt_value(element, type_name)?;
    if felt_to_biguint(&felt) >= pow2(128) {
        return Err(StarknetError::ValueOutOfRange {
            type_name: type_name.to_string(),
            value: describe(element),
        });
    }
    Ok(felt)
}

fn signed_integer(element: &Element, type_name: &str) -> StarknetResult<BigInt> {
    match element {
        Element::Felt(felt) => Ok(BigInt::from(felt_to_biguint(felt))),
        Element::Decimal(value) => Ok(BigInt::from(value.clone())),
        Element::SignedDecimal(value) => Ok(value.clone()),
        Element::String(s) if is_hex_literal(s) => {
            Ok(BigInt::from(felt_to_biguint(&felt_from_hex(s)?)))
        },
        Element::String(s) => {
            let digits = s.strip_prefix('-').unwrap_or(s);
            if !is_decimal_literal(digits) {
                return Err(invalid_element(type_name, element, "an integer"));
            }
            BigInt::parse_bytes(s.as_bytes(), 10)
                .ok_or_else(|| invalid_element(type_name, element, "an integer"))
        },
        other => Err(invalid_element(type_name, other, "an integer")),
    }
}

/// `i128`: `[-2^127, 2^127)`, 음수는 `P + value`
pub fn i128_value(element: &Element, type_name: &str) -> StarknetResult<Felt> {
    let value = signed_integer(element, type_name)?;
    let bound = BigInt::from(pow2(127));
    if value < -bound.clone() || value >= bound {
        return Err(StarknetError::ValueOutOfRange {
            type_name: type_name.to_string(),
            value: value.to_string(),
        });
    }
    felt_from_bigint(&value)
}

/// `bool`: `true`/`false`, `0`/`1` 만 허용
pub fn bool_value(element: &Element) -> StarknetResult<Felt> {
    let parsed = match element {
        Element::Bool(b) => Some(*b),
        Element::Decimal(value) if value.is_zero() => Some(false),
        Element::Decimal(value) if value.is_one() => Some(true),
        Element::Felt(felt) if *felt == Felt::ZERO => Some(false),
        Element::Felt(felt) if *felt == Felt::ONE => Some(true),
        Element::String(s) => match s.as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    };

    match parsed {
        Some(true) => Ok(Felt::ONE),
        Some(false) => Ok(Felt::ZERO),
        None => Err(StarknetError::InvalidBoolean {
            value: describe(element),
        }),
    }
}

/// `selector`: 16진수 문자열은 그대로, 그 외 문자열은 keccak selector
pub fn selector_value(element: &Element) -> StarknetResult<Felt> {
    match element {
        Element::String(s) => prepare_selector(s),
        other => felt_value(other, "selector"),
    }
}

impl TypedData {
    /// 타입에 따른 원소 인코딩
    ///
    /// `context` 는 `enum` 과 `merkletree` 값을 해석할 때 부모 필드 선언을 찾는 데 쓰입니다.
    pub fn encode_value(
        &self,
        type_name: &str,
        data: &Element,
        context: Option<FieldContext<'_>>,
    ) -> StarknetResult<Felt> {
        if self.resolve_type(type_name).is_some() {
            return self.struct_hash(type_name, data);
        }

        if let Some(base) = type_name.strip_suffix('*') {
            let items = data
                .as_array()
                .ok_or_else(|| invalid_element(type_name, data, "an array"))?;
            let encoded = items
                .iter()
                .map(|item| self.encode_value(base, item, None))
                .collect::<StarknetResult<Vec<_>>>()?;
            return Ok(self.hash_method().hash_on(&encoded));
        }

        let active = self.revision == TypedDataRevision::Active;
        match type_name {
            "enum" if active => self.encode_enum(data, context),
            "merkletree" => self.encode_merkle_tree(data, context),
            "string" if active => self.encode_long_string(data),
            "felt" | "string" => felt_value(data, type_name),
            "shortstring" | "ContractAddress" | "ClassHash" if active => {
                felt_value(data, type_name)
            },
            "u128" | "timestamp" if active => u128_value(data, type_name),
            "i128" if active => i128_value(data, type_name),
            "bool" => bool_value(data),
            "selector" => selector_value(data),
            _ => Err(StarknetError::UnresolvedType {
                type_name: type_name.to_string(),
            }),
        }
    }

    /// 부모 구조체에서 필드 선언 조회
    ///
    /// 부모 타입이나 필드가 없으면 `None`
    fn field_declaration(&self, context: FieldContext<'_>) -> Option<&TypeDeclaration> {
        self.resolve_type(context.parent)
            .and_then(|fields| fields.iter().find(|field| field.name() == context.key))
    }

    fn encode_enum(&self, data: &Element, context: Option<FieldContext<'_>>) -> StarknetResult<Felt> {
        let context = context.ok_or_else(|| StarknetError::MissingFieldContext {
            expected: "enum".into(),
        })?;
        let Some(TypeDeclaration::Enum { contains, .. }) = self.field_declaration(context) else {
            return Err(StarknetError::NotAnEnum {
                type_name: context.parent.to_string(),
                field: context.key.to_string(),
            });
        };

        let variants = self
            .resolve_type(contains)
            .ok_or_else(|| StarknetError::UnresolvedType {
                type_name: contains.clone(),
            })?;

        let (variant_name, variant_data) = match data.as_object() {
            Some([(name, value)]) => (name, value),
            _ => return Err(invalid_element(contains, data, "an object with exactly one variant")),
        };

        let (index, variant) = variants
            .iter()
            .enumerate()
            .find(|(_, variant)| variant.name() == variant_name)
            .ok_or_else(|| StarknetError::InvalidEnumVariant {
                enum_type: contains.clone(),
                variant: variant_name.clone(),
            })?;

        let variant_type = variant.type_name();
        if !is_tuple_type(variant_type) {
            return Err(StarknetError::InvalidElement {
                type_name: contains.clone(),
                message: format!("Variant '{variant_name}' must declare a tuple type, got {variant_type}"),
            });
        }

        let subtypes = tuple_members(variant_type);
        let values = variant_data
            .as_array()
            .ok_or_else(|| invalid_element(contains, variant_data, "an array of variant values"))?;
        if values.len() != subtypes.len() {
            return Err(StarknetError::InvalidElement {
                type_name: contains.clone(),
                message: format!(
                    "Variant '{variant_name}' expects {} values, got {}",
                    subtypes.len(),
                    values.len()
                ),
            });
        }

        let mut encoded = Vec::with_capacity(subtypes.len() + 1);
        encoded.push(Felt::from(index as u64));
        for (subtype, value) in subtypes.iter().zip(values) {
            encoded.push(self.encode_value(subtype, value, None)?);
        }

        trace!(enum_type = %contains, variant = %variant_name, index, "encoded enum variant");
        Ok(self.hash_method().hash_on(&encoded))
    }

    fn encode_merkle_tree(
        &self,
        data: &Element,
        context: Option<FieldContext<'_>>,
    ) -> StarknetResult<Felt> {
        let context = context.ok_or_else(|| StarknetError::MissingFieldContext {
            expected: "merkletree".into(),
        })?;
        let Some(TypeDeclaration::MerkleTree { name, contains }) = self.field_declaration(context)
        else {
            return Err(StarknetError::NotAMerkleTree {
                type_name: context.parent.to_string(),
                field: context.key.to_string(),
            });
        };

        if contains.ends_with('*') {
            return Err(StarknetError::InvalidContainsType {
                field: name.clone(),
                message: format!("Merkle tree contains type must not be an array: {contains}"),
            });
        }

        let items = data
            .as_array()
            .ok_or_else(|| invalid_element("merkletree", data, "an array of leaves"))?;
        let leaves = items
            .iter()
            .map(|item| self.encode_value(contains, item, None))
            .collect::<StarknetResult<Vec<_>>>()?;

        let tree = MerkleTree::new(leaves, self.hash_method())?;
        Ok(tree.root_hash())
    }

    /// 리비전 1 `string`: `ByteArray` 원소들의 해시
    fn encode_long_string(&self, data: &Element) -> StarknetResult<Felt> {
        let text = data
            .as_str()
            .ok_or_else(|| invalid_element("string", data, "a string"))?;
        let elements = ByteArray::from_string(text).to_elements();
        Ok(self.hash_method().hash_on(&elements))
    }
}
