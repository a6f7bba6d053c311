//! StarkNet Account
//!
//! 개인키와 계정 주소를 묶어 트랜잭션과 타입 데이터에 서명합니다.
//!
//! # 참조
//!
//! - [StarkNet Accounts](https://docs.starknet.io/architecture-and-concepts/accounts/introduction/)

use super::curve::{CurvePrimitives, StarkCurve, StarkNetSignature, StarkNetSigner};
use super::felt::{felt_from_hex, felt_to_hex};
use super::transaction::{calculate_contract_address, SignedTransaction, Transaction};
use super::typed_data::TypedData;
use crate::config::{SignerConfig, StarknetChainId};
use crate::errors::StarknetResult;
use starknet_types_core::felt::Felt;
use std::fmt;
use tracing::debug;

/// StarkNet 계정
#[derive(Clone)]
pub struct StarkNetAccount<C = StarkCurve> {
    private_key: Felt,
    public_key: Felt,
    address: Felt,
    chain_id: StarknetChainId,
    signer: StarkNetSigner<C>,
}

impl fmt::Debug for StarkNetAccount<StarkCurve> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StarkNetAccount")
            .field("public_key", &felt_to_hex(&self.public_key))
            .field("address", &felt_to_hex(&self.address))
            .field("chain_id", &self.chain_id)
            .finish_non_exhaustive()
    }
}

impl StarkNetAccount<StarkCurve> {
    /// 개인키와 주소로 계정 생성 (기본 설정)
    pub fn from_private_key(private_key: Felt, address: Felt) -> StarknetResult<Self> {
        Self::with_config(private_key, address, &SignerConfig::default())
    }

    /// 설정을 지정해 계정 생성
    pub fn with_config(
        private_key: Felt,
        address: Felt,
        config: &SignerConfig,
    ) -> StarknetResult<Self> {
        Self::with_curve(StarkCurve, private_key, address, config)
    }

    /// 16진수 문자열에서 계정 생성
    pub fn from_hex(private_key_hex: &str, address_hex: &str) -> StarknetResult<Self> {
        Self::from_private_key(felt_from_hex(private_key_hex)?, felt_from_hex(address_hex)?)
    }
}

impl<C: CurvePrimitives> StarkNetAccount<C> {
    /// 곡선 구현을 지정해 계정 생성
    pub fn with_curve(
        curve: C,
        private_key: Felt,
        address: Felt,
        config: &SignerConfig,
    ) -> StarknetResult<Self> {
        let signer = StarkNetSigner::with_config(curve, config);
        let public_key = signer.get_public_key(&private_key)?;

        debug!(
            address = %felt_to_hex(&address),
            chain_id = config.chain_id().name(),
            "created starknet account"
        );

        Ok(Self {
            private_key,
            public_key,
            address,
            chain_id: config.chain_id().clone(),
            signer,
        })
    }

    // === Getters ===

    pub fn public_key(&self) -> &Felt {
        &self.public_key
    }

    pub fn address(&self) -> &Felt {
        &self.address
    }

    pub fn chain_id(&self) -> &StarknetChainId {
        &self.chain_id
    }

    pub fn public_key_hex(&self) -> String {
        felt_to_hex(&self.public_key)
    }

    pub fn address_hex(&self) -> String {
        felt_to_hex(&self.address)
    }

    /// 메시지 해시 서명
    pub fn sign_hash(&self, message_hash: &Felt) -> StarknetResult<StarkNetSignature> {
        self.signer.sign(&self.private_key, message_hash)
    }

    /// 트랜잭션 해시 계산 후 서명
    ///
    /// # Arguments
    ///
    /// * `transaction` - 서명할 트랜잭션 (체인 ID는 계정 설정을 따름)
    ///
    /// # Returns
    ///
    /// 트랜잭션, 해시, `[r, s]` 서명을 담은 [`SignedTransaction`]
    pub fn sign_transaction(&self, transaction: Transaction) -> StarknetResult<SignedTransaction> {
        let chain_id = self.chain_id.as_felt()?;
        let transaction_hash = transaction.hash(&chain_id)?;
        let signature = self.sign_hash(&transaction_hash)?;

        debug!(
            transaction_hash = %felt_to_hex(&transaction_hash),
            version = transaction.version(),
            "signed transaction"
        );

        Ok(SignedTransaction {
            transaction,
            transaction_hash,
            signature: signature.to_vec(),
        })
    }

    /// 타입 데이터 서명 (SNIP-12)
    ///
    /// # Arguments
    ///
    /// * `typed_data` - 서명할 타입 데이터. 메시지 해시는 이 계정 주소로 계산
    pub fn sign_typed_data(&self, typed_data: &TypedData) -> StarknetResult<StarkNetSignature> {
        let hash = typed_data.message_hash(&self.address)?;
        self.sign_hash(&hash)
    }

    /// 이 계정이 서명한 타입 데이터인지 검증
    pub fn verify_typed_data(
        &self,
        typed_data: &TypedData,
        signature: &StarkNetSignature,
    ) -> StarknetResult<bool> {
        let hash = typed_data.message_hash(&self.address)?;
        self.signer.verify(&self.public_key, &hash, signature)
    }
}

/// 공개키를 생성자 인자로 쓰는 계정 컨트랙트의 주소 계산 (deployer 없음)
///
/// # Arguments
///
/// * `public_key` - 유일한 생성자 인자로 쓰일 공개키
/// * `class_hash` - 계정 컨트랙트 클래스 해시
/// * `salt` - 주소 salt
///
/// # Returns
///
/// `2^251 - 256` 으로 나눈 나머지 주소
pub fn compute_starknet_address(
    public_key: &Felt,
    class_hash: &Felt,
    salt: &Felt,
) -> StarknetResult<Felt> {
    calculate_contract_address(salt, class_hash, &[*public_key], &Felt::ZERO)
}
