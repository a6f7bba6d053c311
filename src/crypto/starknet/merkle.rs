//! StarkNet Merkle Tree
//!
//! SNIP-12 `merkletree` 타입에 사용되는 이진 Merkle 트리를 제공합니다.
//!
//! 두 노드를 해시할 때는 항상 작은 값을 먼저 두므로, 트리는 형제 노드의 순서와 무관하게 결정됩니다.
//!
//! # 참조
//!
//! - [SNIP-12: merkletree](https://github.com/starknet-io/SNIPs/blob/main/SNIPS/snip-12.md#merkletree)

use super::felt::felt_to_hex;
use super::poseidon::HashMethod;
use crate::errors::{StarknetError, StarknetResult};
use starknet_types_core::felt::Felt;
use std::cmp::Ordering;

/// 불변 Merkle 트리
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleTree {
    leaves: Vec<Felt>,
    branches: Vec<Vec<Felt>>,
    root: Felt,
    hash_method: HashMethod,
}

impl MerkleTree {
    /// 리프 목록으로 트리 생성
    ///
    /// 리프가 비어 있으면 실패합니다.
    pub fn new(leaves: Vec<Felt>, hash_method: HashMethod) -> StarknetResult<Self> {
        if leaves.is_empty() {
            return Err(StarknetError::EmptyMerkleTree);
        }

        let mut branches = Vec::new();
        let mut layer = leaves.clone();

        while layer.len() > 1 {
            if layer.len() != leaves.len() {
                branches.push(layer.clone());
            }
            layer = layer
                .chunks(2)
                .map(|pair| Self::hash(&pair[0], pair.get(1).unwrap_or(&Felt::ZERO), hash_method))
                .collect();
        }

        Ok(Self {
            leaves,
            branches,
            root: layer[0],
            hash_method,
        })
    }

    /// 정렬된 쌍 해시: 작은 값이 먼저 해시됩니다
    pub fn hash(a: &Felt, b: &Felt, hash_method: HashMethod) -> Felt {
        match compare(a, b) {
            Ordering::Greater => hash_method.hash(b, a),
            _ => hash_method.hash(a, b),
        }
    }

    /// 루트 해시
    pub fn root_hash(&self) -> Felt {
        self.root
    }

    /// 리프 레이어
    pub fn leaves(&self) -> &[Felt] {
        &self.leaves
    }

    /// 중간 레이어 (리프와 루트 제외, 아래에서 위 순서)
    pub fn branches(&self) -> &[Vec<Felt>] {
        &self.branches
    }

    /// 해시 방식
    pub fn hash_method(&self) -> HashMethod {
        self.hash_method
    }

    /// 리프의 포함 증명 (형제 노드 경로)
    pub fn proof(&self, leaf: &Felt) -> StarknetResult<Vec<Felt>> {
        let mut index = self
            .leaves
            .iter()
            .position(|candidate| candidate == leaf)
            .ok_or_else(|| StarknetError::MerkleLeafNotFound {
                leaf: felt_to_hex(leaf),
            })?;

        let mut path = Vec::new();
        let layers = std::iter::once(&self.leaves).chain(self.branches.iter());

        for layer in layers.filter(|layer| layer.len() > 1) {
            let sibling = if index % 2 == 0 {
                layer.get(index + 1).copied().unwrap_or(Felt::ZERO)
            } else {
                layer[index - 1]
            };
            path.push(sibling);
            index /= 2;
        }

        Ok(path)
    }

    /// 증명 경로로 루트를 재계산하여 검증
    pub fn verify_proof(root: &Felt, leaf: &Felt, path: &[Felt], hash_method: HashMethod) -> bool {
        let computed = path
            .iter()
            .fold(*leaf, |node, sibling| Self::hash(&node, sibling, hash_method));
        &computed == root
    }
}

fn compare(a: &Felt, b: &Felt) -> Ordering {
    a.to_bytes_be().cmp(&b.to_bytes_be())
}
