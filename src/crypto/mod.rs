//! Cryptographic Utilities
//!
//! # 모듈 구조
//!
//! - `starknet`: StarkNet 체인용 (Pedersen, Poseidon, SNIP-12, STARK 곡선)
//!
//! # 사용 예시
//!
//! ```rust,ignore
//! use starknet_sign_rust::crypto::starknet::{StarkNetAccount, TypedData};
//!
//! let account = StarkNetAccount::from_hex("0x...", "0x...")?;
//! let typed_data = TypedData::from_json(json)?;
//! let signature = account.sign_typed_data(&typed_data)?;
//! ```

pub mod starknet;

pub use starknet::{
    calculate_transaction_hash, encode_typed_data_hash, get_public_key, pedersen_hash,
    poseidon_hash, poseidon_hash_many, sign_hash, verify_signature, MerkleTree, StarkNetAccount,
    StarkNetSignature, TypedData,
};
