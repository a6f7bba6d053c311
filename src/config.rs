//! Signer configuration

use crate::crypto::starknet::curve::MAX_SIGN_ATTEMPTS;
use crate::crypto::starknet::felt::short_string_to_felt;
use crate::errors::StarknetResult;
use starknet_types_core::felt::Felt;

/// StarkNet 메인넷 체인 ID
pub const SN_MAIN: &str = "SN_MAIN";
/// StarkNet Sepolia 테스트넷 체인 ID
pub const SN_SEPOLIA: &str = "SN_SEPOLIA";

/// StarkNet 체인 식별자
///
/// 체인 ID는 short string으로 인코딩된 Felt 입니다.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StarknetChainId {
    #[default]
    Mainnet,
    Sepolia,
    /// 앱체인 등 사용자 정의 체인 (short string 규칙을 따라야 함)
    Custom(String),
}

impl StarknetChainId {
    /// 체인 이름
    pub fn name(&self) -> &str {
        match self {
            StarknetChainId::Mainnet => SN_MAIN,
            StarknetChainId::Sepolia => SN_SEPOLIA,
            StarknetChainId::Custom(name) => name,
        }
    }

    /// short string으로 인코딩된 체인 ID
    pub fn as_felt(&self) -> StarknetResult<Felt> {
        short_string_to_felt(self.name())
    }
}

impl From<&str> for StarknetChainId {
    fn from(name: &str) -> Self {
        match name {
            SN_MAIN => StarknetChainId::Mainnet,
            SN_SEPOLIA => StarknetChainId::Sepolia,
            other => StarknetChainId::Custom(other.to_string()),
        }
    }
}

/// 서명자 설정
#[derive(Debug, Clone)]
pub struct SignerConfig {
    max_attempts: usize,
    chain_id: StarknetChainId,
}

impl Default for SignerConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl SignerConfig {
    /// 기본 설정 생성 (3회 재시도, 메인넷)
    pub fn new() -> Self {
        Self {
            max_attempts: MAX_SIGN_ATTEMPTS,
            chain_id: StarknetChainId::Mainnet,
        }
    }

    /// 서명 재시도 횟수 설정
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// 체인 ID 설정
    pub fn with_chain_id(mut self, chain_id: impl Into<StarknetChainId>) -> Self {
        self.chain_id = chain_id.into();
        self
    }

    // === Getters ===

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    pub fn chain_id(&self) -> &StarknetChainId {
        &self.chain_id
    }
}
