//! StarkNet Typed Data Signing (SNIP-12)
//!
//! StarkNet의 구조화된 데이터 해싱을 제공합니다.
//! EIP-712와 유사하며, 리비전 0은 Pedersen, 리비전 1은 Poseidon 해시를 사용합니다.
//!
//! - 리비전 0: `StarkNetDomain`, 식별자 그대로 인코딩
//! - 리비전 1: `StarknetDomain`, 식별자 인용, `enum`/`merkletree`/`u128`/`i128` 등 확장 타입,
//!   `u256`/`TokenAmount`/`NftId` 프리셋 타입
//!
//! # 참조
//!
//! - [SNIP-12: Off-chain signing](https://github.com/starknet-io/SNIPs/blob/main/SNIPS/snip-12.md)

mod element;
mod encode;
mod types;

pub use element::Element;
pub use encode::{bool_value, felt_value, i128_value, selector_value, u128_value, FieldContext};
pub use types::{
    encode_type, get_dependencies, validate_types, TypeDeclaration, TypeRegistry,
    TypedDataRevision,
};

use super::felt::short_string_to_felt;
use super::poseidon::{starknet_keccak, HashMethod};
use crate::errors::{StarknetError, StarknetResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use starknet_types_core::felt::Felt;
use tracing::debug;

/// 메시지 해시 접두사
pub const STARKNET_MESSAGE_PREFIX: &str = "StarkNet Message";

/// StarkNet 타입 데이터 도메인
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarkNetDomain {
    /// 도메인 이름
    pub name: Element,
    /// 도메인 버전
    pub version: Element,
    /// 체인 ID
    #[serde(rename = "chainId")]
    pub chain_id: Element,
    /// 리비전 (없으면 0)
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub revision: Option<Element>,
}

impl StarkNetDomain {
    /// 새 도메인 생성
    pub fn new(
        name: impl Into<Element>,
        version: impl Into<Element>,
        chain_id: impl Into<Element>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            chain_id: chain_id.into(),
            revision: None,
        }
    }

    /// 리비전 설정
    pub fn with_revision(mut self, revision: impl Into<Element>) -> Self {
        self.revision = Some(revision.into());
        self
    }

    /// 도메인 리비전 해석
    pub fn resolve_revision(&self) -> StarknetResult<TypedDataRevision> {
        let Some(revision) = &self.revision else {
            return Ok(TypedDataRevision::Legacy);
        };

        let normalized = match revision {
            Element::String(s) => s.clone(),
            Element::Decimal(value) => value.to_string(),
            other => other.to_json().to_string(),
        };

        match normalized.as_str() {
            "0" => Ok(TypedDataRevision::Legacy),
            "1" => Ok(TypedDataRevision::Active),
            _ => Err(StarknetError::UnsupportedRevision {
                revision: normalized,
            }),
        }
    }

    /// 구조체 해시용 원소
    pub fn to_element(&self) -> Element {
        let mut entries = vec![
            ("name".to_string(), self.name.clone()),
            ("version".to_string(), self.version.clone()),
            ("chainId".to_string(), self.chain_id.clone()),
        ];
        if let Some(revision) = &self.revision {
            entries.push(("revision".to_string(), revision.clone()));
        }
        Element::Object(entries)
    }
}

/// JSON 형식의 타입 데이터 문서
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawTypedData {
    types: TypeRegistry,
    #[serde(rename = "primaryType")]
    primary_type: String,
    domain: StarkNetDomain,
    message: Element,
}

/// 검증된 StarkNet 타입 데이터
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTypedData", into = "RawTypedData")]
pub struct TypedData {
    types: TypeRegistry,
    primary_type: String,
    domain: StarkNetDomain,
    message: Element,
    revision: TypedDataRevision,
}

impl TryFrom<RawTypedData> for TypedData {
    type Error = StarknetError;

    fn try_from(raw: RawTypedData) -> Result<Self, Self::Error> {
        TypedData::new(raw.types, raw.primary_type, raw.domain, raw.message)
    }
}

impl From<TypedData> for RawTypedData {
    fn from(typed_data: TypedData) -> Self {
        RawTypedData {
            types: typed_data.types,
            primary_type: typed_data.primary_type,
            domain: typed_data.domain,
            message: typed_data.message,
        }
    }
}

impl TypedData {
    /// 타입 데이터 생성 및 검증
    pub fn new(
        types: TypeRegistry,
        primary_type: impl Into<String>,
        domain: StarkNetDomain,
        message: Element,
    ) -> StarknetResult<Self> {
        let primary_type = primary_type.into();
        let revision = domain.resolve_revision()?;
        validate_types(&types, revision, &primary_type)?;

        debug!(
            primary_type = %primary_type,
            ?revision,
            type_count = types.len(),
            "validated typed data"
        );

        Ok(Self {
            types,
            primary_type,
            domain,
            message,
            revision,
        })
    }

    /// JSON 문자열에서 파싱
    pub fn from_json(json: &str) -> StarknetResult<Self> {
        let raw: RawTypedData = serde_json::from_str(json)?;
        Self::try_from(raw)
    }

    /// JSON 값에서 파싱
    pub fn from_value(value: Value) -> StarknetResult<Self> {
        let raw: RawTypedData = serde_json::from_value(value)?;
        Self::try_from(raw)
    }

    /// JSON 값으로 직렬화
    pub fn to_value(&self) -> StarknetResult<Value> {
        Ok(serde_json::to_value(self)?)
    }

    // === Getters ===

    pub fn revision(&self) -> TypedDataRevision {
        self.revision
    }

    pub fn types(&self) -> &TypeRegistry {
        &self.types
    }

    pub fn primary_type(&self) -> &str {
        &self.primary_type
    }

    pub fn domain(&self) -> &StarkNetDomain {
        &self.domain
    }

    pub fn message(&self) -> &Element {
        &self.message
    }

    fn hash_method(&self) -> HashMethod {
        self.revision.hash_method()
    }

    fn resolve_type(&self, type_name: &str) -> Option<&[TypeDeclaration]> {
        types::resolve_type(&self.types, self.revision, type_name)
    }

    /// 타입 의존성 (루트 먼저, 나머지 정렬)
    pub fn dependencies(&self, type_name: &str) -> Vec<String> {
        get_dependencies(&self.types, self.revision, type_name)
    }

    /// 타입 인코딩 문자열
    pub fn encode_type(&self, type_name: &str) -> StarknetResult<String> {
        encode_type(&self.types, self.revision, type_name)
    }

    /// 타입 해시: 인코딩 문자열의 StarkNet Keccak
    pub fn type_hash(&self, type_name: &str) -> StarknetResult<Felt> {
        Ok(starknet_keccak(self.encode_type(type_name)?.as_bytes()))
    }

    /// 구조체 해시: `hash_on([type_hash, ...encoded fields])`
    pub fn struct_hash(&self, type_name: &str, data: &Element) -> StarknetResult<Felt> {
        let fields = self
            .resolve_type(type_name)
            .ok_or_else(|| StarknetError::UnresolvedType {
                type_name: type_name.to_string(),
            })?;

        if data.as_object().is_none() {
            return Err(StarknetError::InvalidElement {
                type_name: type_name.to_string(),
                message: format!("Expected an object, got {}", data.kind()),
            });
        }

        let mut encoded = Vec::with_capacity(fields.len() + 1);
        encoded.push(self.type_hash(type_name)?);

        for field in fields {
            let value = data
                .get(field.name())
                .ok_or_else(|| StarknetError::MissingField {
                    type_name: type_name.to_string(),
                    field: field.name().to_string(),
                })?;
            encoded.push(self.encode_value(
                field.type_name(),
                value,
                Some(FieldContext::new(type_name, field.name())),
            )?);
        }

        Ok(self.hash_method().hash_on(&encoded))
    }

    /// 도메인 구조체 해시
    pub fn domain_hash(&self) -> StarknetResult<Felt> {
        self.struct_hash(self.revision.domain_type(), &self.domain.to_element())
    }

    /// 메시지 구조체 해시
    pub fn message_struct_hash(&self) -> StarknetResult<Felt> {
        self.struct_hash(&self.primary_type, &self.message)
    }

    /// 서명 대상 메시지 해시
    ///
    /// `hash_on(["StarkNet Message", domain_hash, account_address, message_struct_hash])`
    pub fn message_hash(&self, account_address: &Felt) -> StarknetResult<Felt> {
        let elements = [
            short_string_to_felt(STARKNET_MESSAGE_PREFIX)?,
            self.domain_hash()?,
            *account_address,
            self.message_struct_hash()?,
        ];
        Ok(self.hash_method().hash_on(&elements))
    }
}

/// 타입 데이터와 계정 주소로 메시지 해시 계산
pub fn encode_typed_data_hash(
    typed_data: &TypedData,
    account_address: &Felt,
) -> StarknetResult<Felt> {
    typed_data.message_hash(account_address)
}
