//! Pedersen / Poseidon Hash Composition
//!
//! StarkNet에서 사용하는 두 해시 함수의 조합 규칙을 제공합니다.
//! 해시 함수 자체는 `starknet-crypto` 구현을 그대로 사용합니다.
//!
//! - `pedersen_hash_on`: 0에서 시작하는 왼쪽 fold 후 원소 개수를 마지막으로 해시
//! - `poseidon_hash_many`: 시퀀스 전체에 대한 sponge 해시
//!
//! # 참조
//!
//! - [StarkNet Hash Functions](https://docs.starknet.io/architecture-and-concepts/cryptography/hash-functions/)

use super::felt::felt_from_hex;
use crate::errors::StarknetResult;
use sha3::{Digest, Keccak256};
use starknet_crypto::{
    pedersen_hash as stark_pedersen_hash, poseidon_hash as stark_poseidon_hash,
    poseidon_hash_many as stark_poseidon_hash_many,
};
use starknet_types_core::felt::Felt;

/// Pedersen 해시 (2개 입력)
///
/// # Arguments
///
/// * `x` - 첫 번째 필드 요소
/// * `y` - 두 번째 필드 요소
///
/// # Returns
///
/// 해시 결과
pub fn pedersen_hash(x: &Felt, y: &Felt) -> Felt {
    stark_pedersen_hash(x, y)
}

/// Poseidon 해시 (2개 입력)
///
/// # Arguments
///
/// * `x` - 첫 번째 필드 요소
/// * `y` - 두 번째 필드 요소
///
/// # Returns
///
/// 해시 결과
pub fn poseidon_hash(x: &Felt, y: &Felt) -> Felt {
    stark_poseidon_hash(*x, *y)
}

/// Poseidon 해시 (여러 입력)
///
/// # Arguments
///
/// * `values` - 해시할 필드 요소들
///
/// # Returns
///
/// 해시 결과
pub fn poseidon_hash_many(values: &[Felt]) -> Felt {
    stark_poseidon_hash_many(values)
}

/// 원소 배열의 Pedersen 해시
///
/// `h(h(h(h(0, a0), a1), ...), n)`: 0에서 시작해 왼쪽부터 fold 한 뒤
/// 원소 개수 `n` 을 마지막 피연산자로 해시합니다.
///
/// # Arguments
///
/// * `values` - 해시할 필드 요소들 (빈 배열 허용)
///
/// # Returns
///
/// 해시 결과
pub fn pedersen_hash_on(values: &[Felt]) -> Felt {
    let folded = values
        .iter()
        .fold(Felt::ZERO, |acc, value| pedersen_hash(&acc, value));
    pedersen_hash(&folded, &Felt::from(values.len() as u64))
}

/// 해시 방식 선택자
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashMethod {
    Pedersen,
    Poseidon,
}

impl HashMethod {
    /// 2개 입력 해시
    pub fn hash(&self, x: &Felt, y: &Felt) -> Felt {
        match self {
            HashMethod::Pedersen => pedersen_hash(x, y),
            HashMethod::Poseidon => poseidon_hash(x, y),
        }
    }

    /// 원소 배열 해시
    pub fn hash_on(&self, values: &[Felt]) -> Felt {
        match self {
            HashMethod::Pedersen => pedersen_hash_on(values),
            HashMethod::Poseidon => poseidon_hash_many(values),
        }
    }
}

/// StarkNet Keccak: Keccak-256 결과의 하위 250비트
pub fn starknet_keccak(data: &[u8]) -> Felt {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    let mut digest: [u8; 32] = hasher.finalize().into();

    // 상위 6비트 마스킹
    digest[0] &= 0x03;
    Felt::from_bytes_be(&digest)
}

/// 함수 이름에서 엔트리포인트 selector 계산
///
/// # Arguments
///
/// * `name` - 엔트리포인트 이름 (예: `transfer`)
///
/// # Returns
///
/// `starknet_keccak(name)`
pub fn get_selector_from_name(name: &str) -> Felt {
    starknet_keccak(name.as_bytes())
}

/// selector 입력 정규화
///
/// `0x` 로 시작하는 16진수 문자열은 값 그대로, 그 외에는 (10진수 숫자열 포함) 이름으로 보고
/// keccak selector를 계산합니다.
///
/// # Arguments
///
/// * `input` - 16진수 selector 또는 엔트리포인트 이름
///
/// # Returns
///
/// selector Felt
pub fn prepare_selector(input: &str) -> StarknetResult<Felt> {
    if input.starts_with("0x") || input.starts_with("0X") {
        felt_from_hex(input)
    } else {
        Ok(get_selector_from_name(input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::starknet::felt::felt_to_hex;

    fn felt(hex: &str) -> Felt {
        felt_from_hex(hex).unwrap()
    }

    #[test]
    fn test_pedersen_known_vector() {
        let a = felt("0x03d937c035c878245caf64531a5756109c53068da139362728feb561405371cb");
        let b = felt("0x0208a0a10250e382e1e4bbe2880906c2791bf6275695e02fbbc6aeff9cd8b31a");
        assert_eq!(
            felt_to_hex(&pedersen_hash(&a, &b)),
            "0x30e480bed5fe53fa909cc0f8c4d99b8f9f2c016be4c41e13a4848797979c662"
        );
    }

    #[test]
    fn test_pedersen_order_sensitive() {
        let a = Felt::from(1u64);
        let b = Felt::from(2u64);
        assert_ne!(pedersen_hash(&a, &b), pedersen_hash(&b, &a));
        assert_eq!(
            felt_to_hex(&pedersen_hash(&a, &b)),
            "0x5bb9440e27889a364bcb678b1f679ecd1347acdedcbf36e83494f857cc58026"
        );
    }

    #[test]
    fn test_pedersen_hash_on_empty() {
        // h(0, 0): 빈 배열은 고정 상수
        assert_eq!(
            pedersen_hash_on(&[]),
            pedersen_hash(&Felt::ZERO, &Felt::ZERO)
        );
    }

    #[test]
    fn test_pedersen_hash_on_left_fold() {
        let a = Felt::from(10u64);
        let b = Felt::from(20u64);
        let c = Felt::from(30u64);

        let expected = pedersen_hash(
            &pedersen_hash(&pedersen_hash(&pedersen_hash(&Felt::ZERO, &a), &b), &c),
            &Felt::from(3u64),
        );
        assert_eq!(pedersen_hash_on(&[a, b, c]), expected);
    }

    #[test]
    fn test_pedersen_hash_on_length_separation() {
        let a = Felt::from(5u64);
        assert_ne!(pedersen_hash_on(&[a]), pedersen_hash(&a, &Felt::ONE));
        assert_ne!(pedersen_hash_on(&[a]), pedersen_hash_on(&[a, Felt::ZERO]));
    }

    #[test]
    fn test_poseidon_many_deterministic() {
        let values = vec![Felt::from(1u64), Felt::from(2u64), Felt::from(3u64)];
        assert_eq!(poseidon_hash_many(&values), poseidon_hash_many(&values));
        assert_ne!(
            poseidon_hash_many(&values),
            poseidon_hash_many(&[Felt::from(3u64), Felt::from(2u64), Felt::from(1u64)])
        );
    }

    #[test]
    fn test_hash_method_dispatch() {
        let values = [Felt::ONE, Felt::TWO];
        assert_eq!(HashMethod::Pedersen.hash_on(&values), pedersen_hash_on(&values));
        assert_eq!(HashMethod::Poseidon.hash_on(&values), poseidon_hash_many(&values));
        assert_eq!(
            HashMethod::Poseidon.hash(&Felt::ONE, &Felt::TWO),
            poseidon_hash(&Felt::ONE, &Felt::TWO)
        );
    }

    #[test]
    fn test_starknet_keccak_masked() {
        let hash = starknet_keccak(b"StarkNetDomain(name:felt,version:felt,chainId:felt)");
        assert!(hash.to_bytes_be()[0] <= 0x03);
        assert_eq!(
            felt_to_hex(&hash),
            "0x1bfc207425a47a5dfa1a50a4f5241203f50624ca5fdf5e18755765416b8e288"
        );
    }

    #[test]
    fn test_selector() {
        assert_eq!(
            felt_to_hex(&get_selector_from_name("transfer")),
            "0x83afd3f4caedc6eebf44246fe54e38c95e3179a5ec9ea81740eca5b482d12e"
        );
        assert_eq!(prepare_selector("0x10").unwrap(), Felt::from(16u64));
        // 10진수 숫자열도 이름으로 해시
        assert_eq!(prepare_selector("16").unwrap(), get_selector_from_name("16"));
        assert_ne!(prepare_selector("16").unwrap(), Felt::from(16u64));
        assert_eq!(
            prepare_selector("transfer").unwrap(),
            get_selector_from_name("transfer")
        );
    }
}
