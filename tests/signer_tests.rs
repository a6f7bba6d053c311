//! Integration tests for STARK curve signing
//!
//! Tests for key derivation, the nonce retry loop, signature encoding and
//! account-level signing of typed data

use serde_json::json;
use starknet_sign_rust::crypto::starknet::{
    felt_from_hex, felt_to_hex, get_public_key, sign_hash, verify_signature, CurvePrimitives,
    StarkCurve, StarkNetAccount, StarkNetSignature, StarkNetSigner, TypedData, MAX_SIGN_ATTEMPTS,
};
use starknet_sign_rust::{SignerConfig, StarknetError, StarknetResult};
use starknet_types_core::felt::Felt;
use std::cell::Cell;
use tracing_subscriber::EnvFilter;

const PRIVATE_KEY: &str = "0x2dccce1da22003777062ee0870e9881b460a8b7eca276870f57c601f182136c";
const ACCOUNT: &str = "0x64b48806902a367c8598f4f95c305e8c1a1acba5f082d294a43793113115691";

fn felt(hex: &str) -> Felt {
    felt_from_hex(hex).unwrap()
}

/// Routes signer logs to the test output, filtered by `RUST_LOG`
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Delegates to the STARK curve but rejects the first `rejections` signing attempts
struct RejectingCurve {
    rejections: usize,
    calls: Cell<usize>,
}

impl CurvePrimitives for RejectingCurve {
    fn public_key(&self, private_key: &Felt) -> Felt {
        StarkCurve.public_key(private_key)
    }

    fn generate_k(&self, message_hash: &Felt, private_key: &Felt, seed: Option<&Felt>) -> Felt {
        StarkCurve.generate_k(message_hash, private_key, seed)
    }

    fn sign_with_k(
        &self,
        private_key: &Felt,
        message_hash: &Felt,
        k: &Felt,
    ) -> StarknetResult<StarkNetSignature> {
        let call = self.calls.get();
        self.calls.set(call + 1);
        if call < self.rejections {
            return Err(StarknetError::SigningFailed {
                message: format!("rejected attempt {call}"),
            });
        }
        StarkCurve.sign_with_k(private_key, message_hash, k)
    }

    fn verify(&self, public_key: &Felt, message_hash: &Felt, r: &Felt, s: &Felt) -> StarknetResult<bool> {
        StarkCurve.verify(public_key, message_hash, r, s)
    }
}

// === Keys ===

#[test]
fn test_public_key_of_one_is_generator() {
    let public_key = get_public_key(&Felt::ONE).unwrap();
    assert_eq!(
        felt_to_hex(&public_key),
        "0x1ef15c18599971b7beced415a40f0c7deacfd9b0d1819e03d723d8bc943cfca"
    );
}

#[test]
fn test_known_public_key() {
    let public_key = get_public_key(&felt(PRIVATE_KEY)).unwrap();
    assert_eq!(
        felt_to_hex(&public_key),
        "0x499f65ae2f71d5298d2d88823b2e5e19596a71aac1984710479e406a002439"
    );
}

#[test]
fn test_zero_private_key() {
    assert_eq!(get_public_key(&Felt::ZERO).unwrap_err(), StarknetError::ZeroPrivateKey);
    assert_eq!(
        sign_hash(&Felt::ZERO, &Felt::ONE).unwrap_err(),
        StarknetError::ZeroPrivateKey
    );
}

// === Signing ===

#[test]
fn test_sign_and_verify() {
    let private_key = felt(PRIVATE_KEY);
    let public_key = get_public_key(&private_key).unwrap();
    let message_hash = felt("0x6fcff244f63e38b9d88b9e3378d44757710d1b244282b435cb472053c8d78d0");

    let signature = sign_hash(&private_key, &message_hash).unwrap();
    assert!(verify_signature(&public_key, &message_hash, &signature).unwrap());
    assert!(!verify_signature(&public_key, &Felt::ONE, &signature).unwrap());

    // Deterministic nonce
    assert_eq!(sign_hash(&private_key, &message_hash).unwrap(), signature);
}

#[test]
fn test_retry_reaches_valid_signature() {
    init_tracing();
    let private_key = felt(PRIVATE_KEY);
    let message_hash = felt("0x1234");
    let signer = StarkNetSigner::new(RejectingCurve {
        rejections: MAX_SIGN_ATTEMPTS - 1,
        calls: Cell::new(0),
    });

    let signature = signer.sign(&private_key, &message_hash).unwrap();
    let public_key = get_public_key(&private_key).unwrap();
    assert!(verify_signature(&public_key, &message_hash, &signature).unwrap());

    // Third attempt (salt = 2) differs from the first-attempt signature
    assert_ne!(signature, sign_hash(&private_key, &message_hash).unwrap());
}

#[test]
fn test_retry_budget_from_config() {
    init_tracing();
    let config = SignerConfig::new().with_max_attempts(1);
    let signer = StarkNetSigner::with_config(
        RejectingCurve {
            rejections: 1,
            calls: Cell::new(0),
        },
        &config,
    );

    let err = signer.sign(&felt(PRIVATE_KEY), &Felt::ONE).unwrap_err();
    assert_eq!(
        err,
        StarknetError::SigningFailed {
            message: "rejected attempt 0".into()
        }
    );
}

#[test]
fn test_zero_s_is_not_invertible() {
    let public_key = get_public_key(&felt(PRIVATE_KEY)).unwrap();
    let signature = StarkNetSignature::new(Felt::ONE, Felt::ZERO);

    let err = verify_signature(&public_key, &Felt::ONE, &signature).unwrap_err();
    assert!(err.is_crypto_error());
}

#[test]
fn test_signature_hex_round_trip() {
    let signature = sign_hash(&felt(PRIVATE_KEY), &felt("0xabc")).unwrap();
    let (r, s) = signature.to_hex();

    assert!(r.starts_with("0x"));
    assert_eq!(StarkNetSignature::from_hex(&r, &s).unwrap(), signature);
    assert_eq!(signature.to_vec(), vec![signature.r, signature.s]);
}

// === Account ===

#[test]
fn test_account_signs_typed_data() {
    let typed_data = TypedData::from_value(json!({
        "types": {
            "StarknetDomain": [
                { "name": "name", "type": "shortstring" },
                { "name": "version", "type": "shortstring" },
                { "name": "chainId", "type": "shortstring" },
                { "name": "revision", "type": "shortstring" }
            ],
            "Session": [
                { "name": "expires", "type": "timestamp" },
                { "name": "policies", "type": "merkletree", "contains": "Policy" }
            ],
            "Policy": [
                { "name": "contract", "type": "ContractAddress" },
                { "name": "selector", "type": "selector" }
            ]
        },
        "primaryType": "Session",
        "domain": { "name": "Dapp", "version": "1", "chainId": "SN_SEPOLIA", "revision": 1 },
        "message": {
            "expires": 1800000000,
            "policies": [
                { "contract": "0x1", "selector": "transfer" },
                { "contract": "0x2", "selector": "approve" }
            ]
        }
    }))
    .unwrap();

    let account = StarkNetAccount::from_hex(PRIVATE_KEY, ACCOUNT).unwrap();
    let signature = account.sign_typed_data(&typed_data).unwrap();
    assert!(account.verify_typed_data(&typed_data, &signature).unwrap());

    let hash = typed_data.message_hash(account.address()).unwrap();
    assert!(verify_signature(account.public_key(), &hash, &signature).unwrap());

    // Not valid for the hash bound to another account
    let other = typed_data.message_hash(&Felt::ONE).unwrap();
    assert!(!verify_signature(account.public_key(), &other, &signature).unwrap());
}
