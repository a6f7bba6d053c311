//! StarkNet Signing Error Hierarchy
//!
//! Closed taxonomy of every failure the hashing and signing core can surface.
//!
//! - Range errors
//!   - FeltOutOfRange
//!   - ValueOutOfRange
//! - Decoding errors
//!   - InvalidHex
//!   - InvalidShortString
//!   - InvalidBoolean
//!   - InvalidElement
//!   - InvalidEnumVariant
//!   - JsonError
//! - Schema errors
//!   - BasicTypeRedefinition
//!   - PresetTypeRedefinition
//!   - InvalidTypeName
//!   - DanglingType
//!   - MissingDomainType
//!   - UnresolvedType
//!   - MissingField
//!   - NotAMerkleTree
//!   - NotAnEnum
//!   - MissingFieldContext
//!   - InvalidContainsType
//!   - UnsupportedRevision
//! - Cryptographic errors
//!   - ZeroPrivateKey
//!   - NonInvertibleSignature
//!   - SigningFailed
//!   - UnknownSigningError
//!   - InvalidSignature
//! - Structural errors
//!   - EmptyMerkleTree
//!   - MerkleLeafNotFound

use thiserror::Error;

/// StarkNet core error hierarchy
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StarknetError {
    // === Range errors ===
    /// Value does not fit in the field (`v >= P`)
    #[error("Felt out of range: {value}")]
    FeltOutOfRange { value: String },

    /// Typed-data leaf outside the bounds of its declared type
    #[error("Value out of range for {type_name}: {value}")]
    ValueOutOfRange { type_name: String, value: String },

    // === Decoding errors ===
    /// Malformed hexadecimal string
    #[error("Invalid hex: {message}")]
    InvalidHex { message: String },

    /// Non-ASCII or longer than 31 bytes
    #[error("Invalid short string: {value}")]
    InvalidShortString { value: String },

    /// Boolean literal other than 0, 1, true or false
    #[error("Invalid boolean: {value}")]
    InvalidBoolean { value: String },

    /// Typed-data leaf that cannot be decoded as its declared type
    #[error("Invalid element for {type_name}: {message}")]
    InvalidElement { type_name: String, message: String },

    /// Enum value whose key matches no declared variant
    #[error("Invalid enum variant '{variant}' for {enum_type}")]
    InvalidEnumVariant { enum_type: String, variant: String },

    /// JSON parsing error
    #[error("JSON error: {message}")]
    JsonError { message: String },

    // === Schema errors ===
    /// A declared type shadows a basic type
    #[error("Types must not contain basic types: {type_name}")]
    BasicTypeRedefinition { type_name: String },

    /// A declared type shadows a preset type
    #[error("Types must not contain preset types: {type_name}")]
    PresetTypeRedefinition { type_name: String },

    /// Empty, array-shaped, enum-shaped or comma-containing type name
    #[error("Invalid type name: '{type_name}'")]
    InvalidTypeName { type_name: String },

    /// Declared type reachable from neither the primary nor the domain type
    #[error("Dangling types are not allowed: {type_name}")]
    DanglingType { type_name: String },

    /// The revision's domain separator type is not declared
    #[error("Missing domain type: {domain_type}")]
    MissingDomainType { domain_type: String },

    /// Referenced type is neither declared, basic nor preset
    #[error("Unresolved type: {type_name}")]
    UnresolvedType { type_name: String },

    /// Message or domain object lacks a declared field
    #[error("Missing data for '{field}' in {type_name}")]
    MissingField { type_name: String, field: String },

    /// Parent field of a `merkletree` value is missing or of another kind
    #[error("'{field}' is not a merkletree in {type_name}")]
    NotAMerkleTree { type_name: String, field: String },

    /// Parent field of an `enum` value is missing or of another kind
    #[error("'{field}' is not an enum in {type_name}")]
    NotAnEnum { type_name: String, field: String },

    /// `enum`/`merkletree` value encoded without its parent field
    #[error("A {expected} value needs its parent struct and field")]
    MissingFieldContext { expected: String },

    /// `contains` property is missing or array-shaped
    #[error("Invalid contains type for '{field}': {message}")]
    InvalidContainsType { field: String, message: String },

    /// Typed-data revision other than 0 or 1
    #[error("Unsupported revision: {revision}")]
    UnsupportedRevision { revision: String },

    // === Cryptographic errors ===
    /// Public key derivation from a zero private key
    #[error("Private key must not be zero")]
    ZeroPrivateKey,

    /// `s` has no inverse modulo the curve order
    #[error("Signature component is not invertible: {message}")]
    NonInvertibleSignature { message: String },

    /// Curve signing primitive rejected the input
    #[error("Signing failed: {message}")]
    SigningFailed { message: String },

    /// Signing loop ran no attempt at all
    #[error("Signing failed with an unknown error")]
    UnknownSigningError,

    /// Malformed signature encoding
    #[error("Invalid signature: {message}")]
    InvalidSignature { message: String },

    // === Structural errors ===
    /// Merkle tree built over no leaves
    #[error("Cannot build a Merkle tree without leaves")]
    EmptyMerkleTree,

    /// Proof requested for a leaf that is not in the tree
    #[error("Leaf not found in Merkle tree: {leaf}")]
    MerkleLeafNotFound { leaf: String },
}

impl StarknetError {
    /// Returns the error code as a string constant
    pub fn code(&self) -> &'static str {
        match self {
            // Range
            StarknetError::FeltOutOfRange { .. } => "FELT_OUT_OF_RANGE",
            StarknetError::ValueOutOfRange { .. } => "VALUE_OUT_OF_RANGE",
            // Decoding
            StarknetError::InvalidHex { .. } => "INVALID_HEX",
            StarknetError::InvalidShortString { .. } => "INVALID_SHORT_STRING",
            StarknetError::InvalidBoolean { .. } => "INVALID_BOOLEAN",
            StarknetError::InvalidElement { .. } => "INVALID_ELEMENT",
            StarknetError::InvalidEnumVariant { .. } => "INVALID_ENUM_VARIANT",
            StarknetError::JsonError { .. } => "JSON_ERROR",
            // Schema
            StarknetError::BasicTypeRedefinition { .. } => "BASIC_TYPE_REDEFINITION",
            StarknetError::PresetTypeRedefinition { .. } => "PRESET_TYPE_REDEFINITION",
            StarknetError::InvalidTypeName { .. } => "INVALID_TYPE_NAME",
            StarknetError::DanglingType { .. } => "DANGLING_TYPE",
            StarknetError::MissingDomainType { .. } => "MISSING_DOMAIN_TYPE",
            StarknetError::UnresolvedType { .. } => "UNRESOLVED_TYPE",
            StarknetError::MissingField { .. } => "MISSING_FIELD",
            StarknetError::NotAMerkleTree { .. } => "NOT_A_MERKLE_TREE",
            StarknetError::NotAnEnum { .. } => "NOT_AN_ENUM",
            StarknetError::MissingFieldContext { .. } => "MISSING_FIELD_CONTEXT",
            StarknetError::InvalidContainsType { .. } => "INVALID_CONTAINS_TYPE",
            StarknetError::UnsupportedRevision { .. } => "UNSUPPORTED_REVISION",
            // Cryptographic
            StarknetError::ZeroPrivateKey => "ZERO_PRIVATE_KEY",
            StarknetError::NonInvertibleSignature { .. } => "NON_INVERTIBLE_SIGNATURE",
            StarknetError::SigningFailed { .. } => "SIGNING_FAILED",
            StarknetError::UnknownSigningError => "UNKNOWN_SIGNING_ERROR",
            StarknetError::InvalidSignature { .. } => "INVALID_SIGNATURE",
            // Structural
            StarknetError::EmptyMerkleTree => "EMPTY_MERKLE_TREE",
            StarknetError::MerkleLeafNotFound { .. } => "MERKLE_LEAF_NOT_FOUND",
        }
    }

    /// Returns true if a value fell outside its numeric bounds
    pub fn is_range_error(&self) -> bool {
        matches!(
            self,
            StarknetError::FeltOutOfRange { .. } | StarknetError::ValueOutOfRange { .. }
        )
    }

    /// Returns true if an input could not be decoded
    pub fn is_decoding_error(&self) -> bool {
        matches!(
            self,
            StarknetError::InvalidHex { .. }
                | StarknetError::InvalidShortString { .. }
                | StarknetError::InvalidBoolean { .. }
                | StarknetError::InvalidElement { .. }
                | StarknetError::InvalidEnumVariant { .. }
                | StarknetError::JsonError { .. }
        )
    }

    /// Returns true if the typed-data schema is invalid
    pub fn is_schema_error(&self) -> bool {
        matches!(
            self,
            StarknetError::BasicTypeRedefinition { .. }
                | StarknetError::PresetTypeRedefinition { .. }
                | StarknetError::InvalidTypeName { .. }
                | StarknetError::DanglingType { .. }
                | StarknetError::MissingDomainType { .. }
                | StarknetError::UnresolvedType { .. }
                | StarknetError::MissingField { .. }
                | StarknetError::NotAMerkleTree { .. }
                | StarknetError::NotAnEnum { .. }
                | StarknetError::MissingFieldContext { .. }
                | StarknetError::InvalidContainsType { .. }
                | StarknetError::UnsupportedRevision { .. }
        )
    }

    /// Returns true if this is a signing or verification failure
    pub fn is_crypto_error(&self) -> bool {
        matches!(
            self,
            StarknetError::ZeroPrivateKey
                | StarknetError::NonInvertibleSignature { .. }
                | StarknetError::SigningFailed { .. }
                | StarknetError::UnknownSigningError
                | StarknetError::InvalidSignature { .. }
        )
    }

    /// Returns true if a Merkle tree could not be built or queried
    pub fn is_structural_error(&self) -> bool {
        matches!(
            self,
            StarknetError::EmptyMerkleTree | StarknetError::MerkleLeafNotFound { .. }
        )
    }
}

impl From<serde_json::Error> for StarknetError {
    fn from(err: serde_json::Error) -> Self {
        StarknetError::JsonError {
            message: err.to_string(),
        }
    }
}

/// Result type alias
pub type StarknetResult<T> = Result<T, StarknetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = StarknetError::FeltOutOfRange {
            value: "0x800000000000011000000000000000000000000000000000000000000000001".into(),
        };
        assert_eq!(err.code(), "FELT_OUT_OF_RANGE");
        assert!(err.is_range_error());
        assert!(!err.is_schema_error());

        let err = StarknetError::DanglingType {
            type_name: "Orphan".into(),
        };
        assert_eq!(err.code(), "DANGLING_TYPE");
        assert!(err.is_schema_error());

        assert_eq!(StarknetError::EmptyMerkleTree.code(), "EMPTY_MERKLE_TREE");
        assert!(StarknetError::EmptyMerkleTree.is_structural_error());
    }

    #[test]
    fn test_error_families_are_disjoint() {
        let errors = vec![
            StarknetError::InvalidHex {
                message: "zz".into(),
            },
            StarknetError::ZeroPrivateKey,
            StarknetError::UnknownSigningError,
            StarknetError::InvalidEnumVariant {
                enum_type: "Direction".into(),
                variant: "Up".into(),
            },
            StarknetError::MissingDomainType {
                domain_type: "StarknetDomain".into(),
            },
        ];

        for err in errors {
            let families = [
                err.is_range_error(),
                err.is_decoding_error(),
                err.is_schema_error(),
                err.is_crypto_error(),
                err.is_structural_error(),
            ];
            assert_eq!(families.iter().filter(|f| **f).count(), 1, "{err:?}");
        }
    }

    #[test]
    fn test_error_display() {
        let err = StarknetError::MissingField {
            type_name: "Mail".into(),
            field: "contents".into(),
        };
        assert_eq!(err.to_string(), "Missing data for 'contents' in Mail");

        let err = StarknetError::ValueOutOfRange {
            type_name: "u128".into(),
            value: "340282366920938463463374607431768211456".into(),
        };
        assert!(err.to_string().contains("u128"));
    }

    #[test]
    fn test_json_error_conversion() {
        let parse: Result<serde_json::Value, _> = serde_json::from_str("{not json");
        let err: StarknetError = parse.unwrap_err().into();
        assert_eq!(err.code(), "JSON_ERROR");
        assert!(err.is_decoding_error());
    }
}
