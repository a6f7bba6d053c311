//! StarkNet Transaction Hashing
//!
//! 트랜잭션 종류와 버전에 따라 정규 트랜잭션 해시를 계산합니다.
//!
//! - v0/v1/v2 (deprecated): `pedersen_hash_on([prefix, version, address, selector, h(calldata), max_fee, chain_id, ...])`
//! - v3 (fee market): `poseidon_hash_many([prefix, version, address, h(tip, bounds), h(paymaster_data), chain_id, nonce, da_modes, ...])`
//!
//! # 참조
//!
//! - [StarkNet Transaction Hash](https://docs.starknet.io/architecture-and-concepts/network-architecture/transactions/#transaction_hash)

use super::felt::{felt_from_biguint, felt_to_biguint, felt_to_hex, pow2, short_string_to_felt};
use super::poseidon::{get_selector_from_name, pedersen_hash_on, poseidon_hash_many};
use crate::errors::StarknetResult;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use starknet_types_core::felt::Felt;
use tracing::trace;

/// 컨트랙트 주소 접두사
pub const CONTRACT_ADDRESS_PREFIX: &str = "STARKNET_CONTRACT_ADDRESS";

/// 쿼리 전용 트랜잭션 버전 오프셋 (2^128)
pub const QUERY_VERSION_OFFSET_BITS: usize = 128;

/// 리소스 이름 태그
const L1_GAS_NAME: &str = "L1_GAS";
const L2_GAS_NAME: &str = "L2_GAS";
const L1_DATA_GAS_NAME: &str = "L1_DATA";

/// 트랜잭션 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Invoke,
    Declare,
    Deploy,
    DeployAccount,
    L1Handler,
}

impl TransactionType {
    /// 해시 접두사 (short string)
    pub fn prefix(&self) -> &'static str {
        match self {
            TransactionType::Invoke => "invoke",
            TransactionType::Declare => "declare",
            TransactionType::Deploy => "deploy",
            TransactionType::DeployAccount => "deploy_account",
            TransactionType::L1Handler => "l1_handler",
        }
    }

    fn prefix_felt(&self) -> StarknetResult<Felt> {
        short_string_to_felt(self.prefix())
    }
}

/// 데이터 가용성 모드
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DataAvailabilityMode {
    #[default]
    L1,
    L2,
}

impl DataAvailabilityMode {
    fn as_u64(&self) -> u64 {
        match self {
            DataAvailabilityMode::L1 => 0,
            DataAvailabilityMode::L2 => 1,
        }
    }
}

/// 단일 리소스 한도
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResourceBounds {
    /// 최대 사용량
    #[serde(with = "hex_u64")]
    pub max_amount: u64,
    /// 단위당 최대 가격
    #[serde(with = "hex_u128")]
    pub max_price_per_unit: u128,
}

impl ResourceBounds {
    pub fn new(max_amount: u64, max_price_per_unit: u128) -> Self {
        Self {
            max_amount,
            max_price_per_unit,
        }
    }

    /// `name << 192 | max_amount << 128 | max_price_per_unit`
    fn pack(&self, name: &str) -> StarknetResult<Felt> {
        let name = felt_to_biguint(&short_string_to_felt(name)?);
        let packed = (name << (64 + 128))
            | (BigUint::from(self.max_amount) << 128)
            | BigUint::from(self.max_price_per_unit);
        felt_from_biguint(&packed)
    }
}

/// 리소스별 한도 (L1 가스, L2 가스, L1 데이터 가스)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResourceBoundsMapping {
    pub l1_gas: ResourceBounds,
    pub l2_gas: ResourceBounds,
    pub l1_data_gas: ResourceBounds,
}

/// v3 트랜잭션 공통 수수료 필드
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FeeMarketFields {
    #[serde(with = "hex_u64")]
    pub tip: u64,
    pub resource_bounds: ResourceBoundsMapping,
    pub paymaster_data: Vec<Felt>,
    pub nonce_data_availability_mode: DataAvailabilityMode,
    pub fee_data_availability_mode: DataAvailabilityMode,
}

impl FeeMarketFields {
    /// `poseidon([tip, l1_gas, l2_gas, l1_data_gas])`
    pub fn fee_field_hash(&self) -> StarknetResult<Felt> {
        let bounds = &self.resource_bounds;
        Ok(poseidon_hash_many(&[
            Felt::from(self.tip),
            bounds.l1_gas.pack(L1_GAS_NAME)?,
            bounds.l2_gas.pack(L2_GAS_NAME)?,
            bounds.l1_data_gas.pack(L1_DATA_GAS_NAME)?,
        ]))
    }

    /// `nonce_mode << 32 + fee_mode`
    pub fn data_availability_modes(&self) -> Felt {
        Felt::from(
            (self.nonce_data_availability_mode.as_u64() << 32)
                + self.fee_data_availability_mode.as_u64(),
        )
    }
}

/// Invoke v0 (컨트랙트 직접 호출)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvokeTransactionV0 {
    pub contract_address: Felt,
    pub entry_point_selector: Felt,
    pub calldata: Vec<Felt>,
    pub max_fee: Felt,
}

/// Invoke v1
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvokeTransactionV1 {
    pub sender_address: Felt,
    pub calldata: Vec<Felt>,
    pub max_fee: Felt,
    pub nonce: Felt,
}

/// Invoke v3
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvokeTransactionV3 {
    pub sender_address: Felt,
    pub calldata: Vec<Felt>,
    pub nonce: Felt,
    pub account_deployment_data: Vec<Felt>,
    #[serde(flatten)]
    pub fee: FeeMarketFields,
}

/// Declare v1 (Cairo 0 클래스)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclareTransactionV1 {
    pub sender_address: Felt,
    pub class_hash: Felt,
    pub max_fee: Felt,
    pub nonce: Felt,
}

/// Declare v2 (Sierra 클래스)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclareTransactionV2 {
    pub sender_address: Felt,
    pub class_hash: Felt,
    pub compiled_class_hash: Felt,
    pub max_fee: Felt,
    pub nonce: Felt,
}

/// Declare v3
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclareTransactionV3 {
    pub sender_address: Felt,
    pub class_hash: Felt,
    pub compiled_class_hash: Felt,
    pub nonce: Felt,
    pub account_deployment_data: Vec<Felt>,
    #[serde(flatten)]
    pub fee: FeeMarketFields,
}

/// Deploy (v0/v1, deployer 없이 배포)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployTransaction {
    pub version: u8,
    pub class_hash: Felt,
    pub contract_address_salt: Felt,
    pub constructor_calldata: Vec<Felt>,
}

/// Deploy account v1
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployAccountTransactionV1 {
    pub class_hash: Felt,
    pub contract_address_salt: Felt,
    pub constructor_calldata: Vec<Felt>,
    pub max_fee: Felt,
    pub nonce: Felt,
}

/// Deploy account v3
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployAccountTransactionV3 {
    pub class_hash: Felt,
    pub contract_address_salt: Felt,
    pub constructor_calldata: Vec<Felt>,
    pub nonce: Felt,
    #[serde(flatten)]
    pub fee: FeeMarketFields,
}

/// L1 handler (L1 → L2 메시지)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct L1HandlerTransaction {
    pub contract_address: Felt,
    pub entry_point_selector: Felt,
    pub calldata: Vec<Felt>,
    pub nonce: Felt,
}

/// 트랜잭션 (종류 × 버전)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "variant", rename_all = "snake_case")]
pub enum Transaction {
    InvokeV0(InvokeTransactionV0),
    InvokeV1(InvokeTransactionV1),
    InvokeV3(InvokeTransactionV3),
    DeclareV1(DeclareTransactionV1),
    DeclareV2(DeclareTransactionV2),
    DeclareV3(DeclareTransactionV3),
    Deploy(DeployTransaction),
    DeployAccountV1(DeployAccountTransactionV1),
    DeployAccountV3(DeployAccountTransactionV3),
    L1Handler(L1HandlerTransaction),
}

impl Transaction {
    /// 트랜잭션 종류
    pub fn transaction_type(&self) -> TransactionType {
        match self {
            Transaction::InvokeV0(_) | Transaction::InvokeV1(_) | Transaction::InvokeV3(_) => {
                TransactionType::Invoke
            },
            Transaction::DeclareV1(_) | Transaction::DeclareV2(_) | Transaction::DeclareV3(_) => {
                TransactionType::Declare
            },
            Transaction::Deploy(_) => TransactionType::Deploy,
            Transaction::DeployAccountV1(_) | Transaction::DeployAccountV3(_) => {
                TransactionType::DeployAccount
            },
            Transaction::L1Handler(_) => TransactionType::L1Handler,
        }
    }

    /// 트랜잭션 버전 번호
    pub fn version(&self) -> u64 {
        match self {
            Transaction::InvokeV0(_) | Transaction::L1Handler(_) => 0,
            Transaction::InvokeV1(_)
            | Transaction::DeclareV1(_)
            | Transaction::DeployAccountV1(_) => 1,
            Transaction::DeclareV2(_) => 2,
            Transaction::InvokeV3(_)
            | Transaction::DeclareV3(_)
            | Transaction::DeployAccountV3(_) => 3,
            Transaction::Deploy(tx) => tx.version as u64,
        }
    }

    /// 트랜잭션 해시 계산
    pub fn hash(&self, chain_id: &Felt) -> StarknetResult<Felt> {
        calculate_transaction_hash(self, chain_id, false)
    }

    /// 쿼리(시뮬레이션) 전용 해시: 버전에 2^128 을 더해 계산
    pub fn query_hash(&self, chain_id: &Felt) -> StarknetResult<Felt> {
        calculate_transaction_hash(self, chain_id, true)
    }

    /// 트랜잭션 발신 주소 (deploy 계열은 계산된 주소)
    pub fn sender_address(&self) -> StarknetResult<Felt> {
        match self {
            Transaction::InvokeV0(tx) => Ok(tx.contract_address),
            Transaction::InvokeV1(tx) => Ok(tx.sender_address),
            Transaction::InvokeV3(tx) => Ok(tx.sender_address),
            Transaction::DeclareV1(tx) => Ok(tx.sender_address),
            Transaction::DeclareV2(tx) => Ok(tx.sender_address),
            Transaction::DeclareV3(tx) => Ok(tx.sender_address),
            Transaction::Deploy(tx) => calculate_contract_address(
                &tx.contract_address_salt,
                &tx.class_hash,
                &tx.constructor_calldata,
                &Felt::ZERO,
            ),
            Transaction::DeployAccountV1(tx) => calculate_contract_address(
                &tx.contract_address_salt,
                &tx.class_hash,
                &tx.constructor_calldata,
                &Felt::ZERO,
            ),
            Transaction::DeployAccountV3(tx) => calculate_contract_address(
                &tx.contract_address_salt,
                &tx.class_hash,
                &tx.constructor_calldata,
                &Felt::ZERO,
            ),
            Transaction::L1Handler(tx) => Ok(tx.contract_address),
        }
    }
}

/// 서명이 포함된 트랜잭션
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedTransaction {
    #[serde(flatten)]
    pub transaction: Transaction,
    pub transaction_hash: Felt,
    pub signature: Vec<Felt>,
}

/// 트랜잭션 해시 계산
///
/// `query` 가 참이면 버전에 2^128 을 더한 쿼리 버전으로 계산합니다.
pub fn calculate_transaction_hash(
    tx: &Transaction,
    chain_id: &Felt,
    query: bool,
) -> StarknetResult<Felt> {
    let kind = tx.transaction_type();
    let prefix = kind.prefix_felt()?;
    let version = transaction_version(tx.version(), query)?;

    trace!(
        transaction_type = kind.prefix(),
        version = tx.version(),
        query,
        "computing transaction hash"
    );

    match tx {
        // v0 은 nonce 도입 이전 형식이라 추가 데이터가 없음
        Transaction::InvokeV0(tx) => Ok(deprecated_hash(
            [prefix, version, tx.contract_address, tx.entry_point_selector],
            &tx.calldata,
            tx.max_fee,
            *chain_id,
            &[],
        )),
        Transaction::InvokeV1(tx) => Ok(deprecated_hash(
            [prefix, version, tx.sender_address, Felt::ZERO],
            &tx.calldata,
            tx.max_fee,
            *chain_id,
            &[tx.nonce],
        )),
        Transaction::DeclareV1(tx) => Ok(deprecated_hash(
            [prefix, version, tx.sender_address, Felt::ZERO],
            &[tx.class_hash],
            tx.max_fee,
            *chain_id,
            &[tx.nonce],
        )),
        Transaction::DeclareV2(tx) => Ok(deprecated_hash(
            [prefix, version, tx.sender_address, Felt::ZERO],
            &[tx.class_hash],
            tx.max_fee,
            *chain_id,
            &[tx.nonce, tx.compiled_class_hash],
        )),
        Transaction::Deploy(deploy) => {
            let address = tx.sender_address()?;
            Ok(deprecated_hash(
                [prefix, version, address, get_selector_from_name("constructor")],
                &deploy.constructor_calldata,
                Felt::ZERO,
                *chain_id,
                &[],
            ))
        },
        Transaction::DeployAccountV1(deploy) => {
            let address = tx.sender_address()?;
            let mut calldata = vec![deploy.class_hash, deploy.contract_address_salt];
            calldata.extend_from_slice(&deploy.constructor_calldata);
            Ok(deprecated_hash(
                [prefix, version, address, Felt::ZERO],
                &calldata,
                deploy.max_fee,
                *chain_id,
                &[deploy.nonce],
            ))
        },
        Transaction::L1Handler(tx) => Ok(deprecated_hash(
            [prefix, version, tx.contract_address, tx.entry_point_selector],
            &tx.calldata,
            Felt::ZERO,
            *chain_id,
            &[tx.nonce],
        )),
        Transaction::InvokeV3(invoke) => {
            let mut elements = fee_market_common(
                prefix,
                version,
                invoke.sender_address,
                &invoke.fee,
                *chain_id,
                invoke.nonce,
            )?;
            elements.push(poseidon_hash_many(&invoke.account_deployment_data));
            elements.push(poseidon_hash_many(&invoke.calldata));
            Ok(poseidon_hash_many(&elements))
        },
        Transaction::DeclareV3(declare) => {
            let mut elements = fee_market_common(
                prefix,
                version,
                declare.sender_address,
                &declare.fee,
                *chain_id,
                declare.nonce,
            )?;
            elements.push(poseidon_hash_many(&declare.account_deployment_data));
            elements.push(declare.class_hash);
            elements.push(declare.compiled_class_hash);
            Ok(poseidon_hash_many(&elements))
        },
        Transaction::DeployAccountV3(deploy) => {
            let address = tx.sender_address()?;
            let mut elements =
                fee_market_common(prefix, version, address, &deploy.fee, *chain_id, deploy.nonce)?;
            elements.push(poseidon_hash_many(&deploy.constructor_calldata));
            elements.push(deploy.class_hash);
            elements.push(deploy.contract_address_salt);
            Ok(poseidon_hash_many(&elements))
        },
    }
}

/// 컨트랙트 주소 계산
///
/// `pedersen_hash_on([prefix, deployer, salt, class_hash, h(constructor_calldata)]) mod (2^251 - 256)`
pub fn calculate_contract_address(
    salt: &Felt,
    class_hash: &Felt,
    constructor_calldata: &[Felt],
    deployer_address: &Felt,
) -> StarknetResult<Felt> {
    let hash = pedersen_hash_on(&[
        short_string_to_felt(CONTRACT_ADDRESS_PREFIX)?,
        *deployer_address,
        *salt,
        *class_hash,
        pedersen_hash_on(constructor_calldata),
    ]);

    let bound = pow2(251) - BigUint::from(256u32);
    let address = felt_from_biguint(&(felt_to_biguint(&hash) % bound))?;
    trace!(address = %felt_to_hex(&address), "computed contract address");
    Ok(address)
}

fn transaction_version(version: u64, query: bool) -> StarknetResult<Felt> {
    let mut value = BigUint::from(version);
    if query {
        value += pow2(QUERY_VERSION_OFFSET_BITS);
    }
    felt_from_biguint(&value)
}

/// deprecated 해시: `[prefix, version, address, selector]` 뒤에 calldata 해시, max_fee, chain_id, 추가 데이터
fn deprecated_hash(
    head: [Felt; 4],
    calldata: &[Felt],
    max_fee: Felt,
    chain_id: Felt,
    additional_data: &[Felt],
) -> Felt {
    let mut elements = Vec::with_capacity(7 + additional_data.len());
    elements.extend_from_slice(&head);
    elements.push(pedersen_hash_on(calldata));
    elements.push(max_fee);
    elements.push(chain_id);
    elements.extend_from_slice(additional_data);
    pedersen_hash_on(&elements)
}

fn fee_market_common(
    prefix: Felt,
    version: Felt,
    address: Felt,
    fee: &FeeMarketFields,
    chain_id: Felt,
    nonce: Felt,
) -> StarknetResult<Vec<Felt>> {
    Ok(vec![
        prefix,
        version,
        address,
        fee.fee_field_hash()?,
        poseidon_hash_many(&fee.paymaster_data),
        chain_id,
        nonce,
        fee.data_availability_modes(),
    ])
}

mod hex_u64 {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("{value:#x}"))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        let s = String::deserialize(deserializer)?;
        let digits = s.strip_prefix("0x").unwrap_or(&s);
        u64::from_str_radix(digits, 16).map_err(serde::de::Error::custom)
    }
}

mod hex_u128 {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &u128, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("{value:#x}"))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u128, D::Error> {
        let s = String::deserialize(deserializer)?;
        let digits = s.strip_prefix("0x").unwrap_or(&s);
        u128::from_str_radix(digits, 16).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::starknet::felt::felt_from_hex;

    fn sample_fee() -> FeeMarketFields {
        FeeMarketFields {
            tip: 0,
            resource_bounds: ResourceBoundsMapping {
                l1_gas: ResourceBounds::new(0x186a0, 0x5af3107a4000),
                l2_gas: ResourceBounds::new(0, 0),
                l1_data_gas: ResourceBounds::new(0, 0),
            },
            paymaster_data: vec![],
            nonce_data_availability_mode: DataAvailabilityMode::L1,
            fee_data_availability_mode: DataAvailabilityMode::L1,
        }
    }

    #[test]
    fn test_resource_bound_packing() {
        let packed = ResourceBounds::new(1, 2).pack("L1_GAS").unwrap();
        let expected = (felt_to_biguint(&short_string_to_felt("L1_GAS").unwrap()) << 192)
            + (BigUint::from(1u32) << 128)
            + BigUint::from(2u32);
        assert_eq!(felt_to_biguint(&packed), expected);

        let max = ResourceBounds::new(u64::MAX, u128::MAX).pack("L1_DATA").unwrap();
        assert!(felt_to_biguint(&max) < pow2(251));
    }

    #[test]
    fn test_data_availability_modes() {
        let mut fee = sample_fee();
        assert_eq!(fee.data_availability_modes(), Felt::ZERO);

        fee.nonce_data_availability_mode = DataAvailabilityMode::L2;
        assert_eq!(fee.data_availability_modes(), Felt::from(1u64 << 32));

        fee.fee_data_availability_mode = DataAvailabilityMode::L2;
        assert_eq!(fee.data_availability_modes(), Felt::from((1u64 << 32) + 1));
    }

    #[test]
    fn test_invoke_v1_framing() {
        let chain_id = short_string_to_felt("SN_MAIN").unwrap();
        let tx = InvokeTransactionV1 {
            sender_address: Felt::from(0x1234u64),
            calldata: vec![Felt::ONE, Felt::TWO],
            max_fee: Felt::from(1000u64),
            nonce: Felt::from(5u64),
        };

        let expected = pedersen_hash_on(&[
            short_string_to_felt("invoke").unwrap(),
            Felt::ONE,
            tx.sender_address,
            Felt::ZERO,
            pedersen_hash_on(&tx.calldata),
            tx.max_fee,
            chain_id,
            tx.nonce,
        ]);
        assert_eq!(Transaction::InvokeV1(tx).hash(&chain_id).unwrap(), expected);
    }

    #[test]
    fn test_invoke_v3_framing() {
        let chain_id = short_string_to_felt("SN_SEPOLIA").unwrap();
        let fee = sample_fee();
        let tx = InvokeTransactionV3 {
            sender_address: Felt::from(0xabcu64),
            calldata: vec![Felt::from(7u64)],
            nonce: Felt::from(3u64),
            account_deployment_data: vec![],
            fee: fee.clone(),
        };

        let expected = poseidon_hash_many(&[
            short_string_to_felt("invoke").unwrap(),
            Felt::from(3u64),
            tx.sender_address,
            fee.fee_field_hash().unwrap(),
            poseidon_hash_many(&[]),
            chain_id,
            tx.nonce,
            Felt::ZERO,
            poseidon_hash_many(&[]),
            poseidon_hash_many(&tx.calldata),
        ]);
        assert_eq!(Transaction::InvokeV3(tx).hash(&chain_id).unwrap(), expected);
    }

    #[test]
    fn test_query_version_changes_hash() {
        let chain_id = Felt::ONE;
        let tx = Transaction::InvokeV1(InvokeTransactionV1 {
            sender_address: Felt::ONE,
            calldata: vec![],
            max_fee: Felt::ZERO,
            nonce: Felt::ZERO,
        });
        assert_ne!(tx.hash(&chain_id).unwrap(), tx.query_hash(&chain_id).unwrap());
        assert_eq!(
            transaction_version(1, true).unwrap(),
            felt_from_biguint(&(pow2(128) + BigUint::from(1u32))).unwrap()
        );
    }

    #[test]
    fn test_contract_address_in_bound() {
        let address = calculate_contract_address(
            &Felt::from(42u64),
            &felt_from_hex("0x1a736d6ed154502257f02b1ccdf4d9d1089f80811cd6acad48e6b6a9d1f2003")
                .unwrap(),
            &[Felt::ONE],
            &Felt::ZERO,
        )
        .unwrap();
        assert!(felt_to_biguint(&address) < pow2(251) - BigUint::from(256u32));
    }

    #[test]
    fn test_deploy_account_v1_uses_computed_address() {
        let chain_id = Felt::ONE;
        let deploy = DeployAccountTransactionV1 {
            class_hash: Felt::from(0x99u64),
            contract_address_salt: Felt::from(0x11u64),
            constructor_calldata: vec![Felt::from(0x22u64)],
            max_fee: Felt::from(10u64),
            nonce: Felt::ZERO,
        };
        let address = calculate_contract_address(
            &deploy.contract_address_salt,
            &deploy.class_hash,
            &deploy.constructor_calldata,
            &Felt::ZERO,
        )
        .unwrap();

        let expected = pedersen_hash_on(&[
            short_string_to_felt("deploy_account").unwrap(),
            Felt::ONE,
            address,
            Felt::ZERO,
            pedersen_hash_on(&[deploy.class_hash, deploy.contract_address_salt, Felt::from(0x22u64)]),
            deploy.max_fee,
            chain_id,
            deploy.nonce,
        ]);

        let tx = Transaction::DeployAccountV1(deploy);
        assert_eq!(tx.sender_address().unwrap(), address);
        assert_eq!(tx.hash(&chain_id).unwrap(), expected);
    }

    #[test]
    fn test_transaction_metadata() {
        let tx = Transaction::DeclareV2(DeclareTransactionV2 {
            sender_address: Felt::ONE,
            class_hash: Felt::TWO,
            compiled_class_hash: Felt::from(3u64),
            max_fee: Felt::ZERO,
            nonce: Felt::ZERO,
        });
        assert_eq!(tx.transaction_type(), TransactionType::Declare);
        assert_eq!(tx.version(), 2);
        assert_eq!(TransactionType::DeployAccount.prefix(), "deploy_account");
    }

    #[test]
    fn test_resource_bounds_serde() {
        let bounds = ResourceBounds::new(0x186a0, 0x5af3107a4000);
        let json = serde_json::to_value(bounds).unwrap();
        assert_eq!(json["max_amount"], "0x186a0");
        assert_eq!(json["max_price_per_unit"], "0x5af3107a4000");

        let back: ResourceBounds = serde_json::from_value(json).unwrap();
        assert_eq!(back, bounds);
    }
}
