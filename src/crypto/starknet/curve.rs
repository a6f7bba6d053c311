//! StarkNet Curve Operations
//!
//! StarkNet의 STARK 곡선 (ECDSA) 서명 및 검증을 제공합니다.
//!
//! 곡선 연산 자체는 [`CurvePrimitives`] 트레이트 뒤에 두어, 서명 재시도 로직을
//! 결정적인 가짜 구현으로 테스트할 수 있습니다.
//!
//! # 참조
//!
//! - [StarkNet Signatures](https://docs.starknet.io/architecture-and-concepts/cryptography/#ecdsa)
//! - [RFC 6979](https://www.rfc-editor.org/rfc/rfc6979)

use super::felt::{felt_from_hex, felt_to_hex};
use crate::config::SignerConfig;
use crate::errors::{StarknetError, StarknetResult};
use serde::{Deserialize, Serialize};
use starknet_crypto::{
    get_public_key as stark_get_public_key, rfc6979_generate_k, sign as stark_sign,
    verify as stark_verify, VerifyError,
};
use starknet_types_core::felt::Felt;
use tracing::{debug, warn};

/// 서명 시도 최대 횟수
pub const MAX_SIGN_ATTEMPTS: usize = 3;

/// StarkNet 서명
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarkNetSignature {
    /// r 값
    pub r: Felt,
    /// s 값
    pub s: Felt,
}

impl StarkNetSignature {
    /// 새 서명 생성
    pub fn new(r: Felt, s: Felt) -> Self {
        Self { r, s }
    }

    /// 16진수 문자열로 변환
    pub fn to_hex(&self) -> (String, String) {
        (felt_to_hex(&self.r), felt_to_hex(&self.s))
    }

    /// 16진수 문자열에서 생성
    pub fn from_hex(r_hex: &str, s_hex: &str) -> StarknetResult<Self> {
        let r = felt_from_hex(r_hex)?;
        let s = felt_from_hex(s_hex)?;

        if r == Felt::ZERO || s == Felt::ZERO {
            return Err(StarknetError::InvalidSignature {
                message: "Signature components must be non-zero".into(),
            });
        }

        Ok(Self { r, s })
    }

    /// 트랜잭션 signature 필드 형식 `[r, s]`
    pub fn to_vec(&self) -> Vec<Felt> {
        vec![self.r, self.s]
    }
}

/// 곡선 연산 기본 요소
///
/// 기본 구현은 [`StarkCurve`] 이며, 테스트에서는 결정적인 가짜 구현으로 교체할 수 있습니다.
pub trait CurvePrimitives {
    /// 개인키의 공개키 (스칼라 곱의 x 좌표)
    fn public_key(&self, private_key: &Felt) -> Felt;

    /// RFC6979 방식의 결정적 k 생성
    fn generate_k(&self, message_hash: &Felt, private_key: &Felt, seed: Option<&Felt>) -> Felt;

    /// 주어진 k로 서명 (재시도 없음)
    fn sign_with_k(
        &self,
        private_key: &Felt,
        message_hash: &Felt,
        k: &Felt,
    ) -> StarknetResult<StarkNetSignature>;

    /// 서명 검증
    fn verify(
        &self,
        public_key: &Felt,
        message_hash: &Felt,
        r: &Felt,
        s: &Felt,
    ) -> StarknetResult<bool>;
}

/// `starknet-crypto` 기반 STARK 곡선
#[derive(Debug, Clone, Copy, Default)]
pub struct StarkCurve;

impl CurvePrimitives for StarkCurve {
    fn public_key(&self, private_key: &Felt) -> Felt {
        stark_get_public_key(private_key)
    }

    fn generate_k(&self, message_hash: &Felt, private_key: &Felt, seed: Option<&Felt>) -> Felt {
        rfc6979_generate_k(message_hash, private_key, seed)
    }

    fn sign_with_k(
        &self,
        private_key: &Felt,
        message_hash: &Felt,
        k: &Felt,
    ) -> StarknetResult<StarkNetSignature> {
        let signature =
            stark_sign(private_key, message_hash, k).map_err(|e| StarknetError::SigningFailed {
                message: format!("StarkNet signing failed: {e:?}"),
            })?;

        Ok(StarkNetSignature {
            r: signature.r,
            s: signature.s,
        })
    }

    fn verify(
        &self,
        public_key: &Felt,
        message_hash: &Felt,
        r: &Felt,
        s: &Felt,
    ) -> StarknetResult<bool> {
        match stark_verify(public_key, message_hash, r, s) {
            Ok(valid) => Ok(valid),
            Err(VerifyError::InvalidS) => Err(StarknetError::NonInvertibleSignature {
                message: format!("s = {}", felt_to_hex(s)),
            }),
            // 범위를 벗어난 r, 공개키, 해시는 오류가 아닌 검증 실패
            Err(e) => {
                debug!(error = ?e, "signature rejected by curve verification");
                Ok(false)
            },
        }
    }
}

/// StarkNet 서명자
///
/// 결정적 nonce(k)를 생성하여 서명하고, 유효하지 않은 서명 후보가 나오면
/// salt를 증가시켜 최대 `max_attempts` 번까지 재시도합니다.
#[derive(Debug, Clone)]
pub struct StarkNetSigner<C = StarkCurve> {
    curve: C,
    max_attempts: usize,
}

impl Default for StarkNetSigner<StarkCurve> {
    fn default() -> Self {
        Self::new(StarkCurve)
    }
}

impl<C: CurvePrimitives> StarkNetSigner<C> {
    /// 기본 재시도 횟수로 서명자 생성
    pub fn new(curve: C) -> Self {
        Self {
            curve,
            max_attempts: MAX_SIGN_ATTEMPTS,
        }
    }

    /// 설정으로 서명자 생성
    pub fn with_config(curve: C, config: &SignerConfig) -> Self {
        Self {
            curve,
            max_attempts: config.max_attempts(),
        }
    }

    /// 재시도 횟수
    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// 개인키에서 공개키 파생
    ///
    /// # Arguments
    ///
    /// * `private_key` - 0이 아닌 개인키
    ///
    /// # Returns
    ///
    /// 공개키 (곡선 점의 x 좌표)
    pub fn get_public_key(&self, private_key: &Felt) -> StarknetResult<Felt> {
        if *private_key == Felt::ZERO {
            return Err(StarknetError::ZeroPrivateKey);
        }
        Ok(self.curve.public_key(private_key))
    }

    /// 메시지 해시에 서명
    ///
    /// 각 시도의 k는 `(message_hash, private_key, salt)` 로부터 결정적으로 생성되며,
    /// salt는 0부터 시작해 실패할 때마다 1씩 증가합니다.
    ///
    /// # Arguments
    ///
    /// * `private_key` - 0이 아닌 개인키
    /// * `message_hash` - 서명할 메시지 해시
    ///
    /// # Returns
    ///
    /// `(r, s)` 서명. 모든 시도가 거부되면 마지막 오류
    pub fn sign(&self, private_key: &Felt, message_hash: &Felt) -> StarknetResult<StarkNetSignature> {
        if *private_key == Felt::ZERO {
            return Err(StarknetError::ZeroPrivateKey);
        }

        let mut last_error = None;

        for salt in 0..self.max_attempts {
            let seed = Felt::from(salt as u64);
            let k = self.curve.generate_k(message_hash, private_key, Some(&seed));

            match self.curve.sign_with_k(private_key, message_hash, &k) {
                Ok(signature) => {
                    debug!(attempt = salt + 1, "message hash signed");
                    return Ok(signature);
                },
                Err(err) => {
                    warn!(attempt = salt + 1, error = %err, "signing attempt rejected, retrying with next salt");
                    last_error = Some(err);
                },
            }
        }

        Err(last_error.unwrap_or(StarknetError::UnknownSigningError))
    }

    /// 서명 검증
    ///
    /// `s` 의 역원이 없을 때만 오류를 반환하며, 그 외에는 검증 결과를 돌려줍니다.
    ///
    /// # Arguments
    ///
    /// * `public_key` - 서명자의 공개키
    /// * `message_hash` - 서명된 메시지 해시
    /// * `signature` - 검증할 서명
    ///
    /// # Returns
    ///
    /// 서명이 유효하면 `true`
    pub fn verify(
        &self,
        public_key: &Felt,
        message_hash: &Felt,
        signature: &StarkNetSignature,
    ) -> StarknetResult<bool> {
        if signature.s == Felt::ZERO {
            return Err(StarknetError::NonInvertibleSignature {
                message: "s = 0x0".into(),
            });
        }
        self.curve
            .verify(public_key, message_hash, &signature.r, &signature.s)
    }
}

/// 메시지 해시에 서명 (기본 STARK 곡선)
///
/// # Arguments
///
/// * `private_key` - 0이 아닌 개인키
/// * `message_hash` - 서명할 메시지 해시
pub fn sign_hash(private_key: &Felt, message_hash: &Felt) -> StarknetResult<StarkNetSignature> {
    StarkNetSigner::default().sign(private_key, message_hash)
}

/// 서명 검증 (기본 STARK 곡선)
pub fn verify_signature(
    public_key: &Felt,
    message_hash: &Felt,
    signature: &StarkNetSignature,
) -> StarknetResult<bool> {
    StarkNetSigner::default().verify(public_key, message_hash, signature)
}

/// 개인키에서 공개키 파생 (기본 STARK 곡선)
pub fn get_public_key(private_key: &Felt) -> StarknetResult<Felt> {
    StarkNetSigner::default().get_public_key(private_key)
}
