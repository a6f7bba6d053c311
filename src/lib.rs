//! StarkNet Sign Rust: StarkNet hashing and signing core
//!
//! 필드 원소, Pedersen/Poseidon 해싱, Merkle 트리, STARK 곡선 서명,
//! 트랜잭션 해시, SNIP-12 타입 데이터 해싱을 제공하는 라이브러리

pub mod config;
pub mod crypto;
pub mod errors;

// Re-exports
pub use config::{SignerConfig, StarknetChainId};
pub use errors::{StarknetError, StarknetResult};
