//! StarkNet Cryptography Module
//!
//! StarkNet 서명 코어: 필드 원소, 해싱, Merkle 트리, ECDSA 서명,
//! 트랜잭션 해시, 타입 데이터(SNIP-12) 해싱을 제공합니다.
//!
//! # 주요 기능
//!
//! - Felt 변환 및 short string / `ByteArray` 인코딩
//! - Pedersen, Poseidon, StarkNet Keccak 해싱
//! - 정렬 쌍 Merkle 트리와 증명
//! - 재시도 가능한 결정적 nonce STARK 곡선 ECDSA 서명
//! - Invoke / Declare / Deploy / DeployAccount / L1Handler 트랜잭션 해시
//! - 타입 데이터 해싱 (SNIP-12 리비전 0, 1)

pub mod account;
pub mod curve;
pub mod felt;
pub mod merkle;
pub mod poseidon;
pub mod transaction;
pub mod typed_data;

pub use account::{compute_starknet_address, StarkNetAccount};
pub use curve::{
    get_public_key, sign_hash, verify_signature, CurvePrimitives, StarkCurve, StarkNetSignature,
    StarkNetSigner, MAX_SIGN_ATTEMPTS,
};
pub use felt::{
    felt_from_bigint, felt_from_biguint, felt_from_dec_str, felt_from_hex, felt_to_biguint,
    felt_to_hex, felt_to_short_string, short_string_to_felt, ByteArray, FIELD_PRIME,
};
pub use merkle::MerkleTree;
pub use poseidon::{
    get_selector_from_name, pedersen_hash, pedersen_hash_on, poseidon_hash, poseidon_hash_many,
    starknet_keccak, HashMethod,
};
pub use transaction::{
    calculate_contract_address, calculate_transaction_hash, SignedTransaction, Transaction,
    TransactionType,
};
pub use typed_data::{
    encode_typed_data_hash, Element, StarkNetDomain, TypeDeclaration, TypeRegistry, TypedData,
    TypedDataRevision,
};
