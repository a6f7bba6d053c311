//! StarkNet Field Element Codec
//!
//! STARK 소수체 원소(Felt)의 생성 및 인코딩을 제공합니다.
//!
//! 모든 Felt 값은 `0 <= v < P`, `P = 2^251 + 17 * 2^192 + 1` 을 만족합니다.
//!
//! # 참조
//!
//! - [StarkNet Cairo felt252](https://docs.starknet.io/architecture-and-concepts/cryptography/)

use crate::errors::{StarknetError, StarknetResult};
use num_bigint::{BigInt, BigUint, Sign};
use num_traits::One;
use once_cell::sync::Lazy;
use starknet_types_core::felt::Felt;

/// 필드 소수 P (16진수)
pub const FIELD_PRIME_HEX: &str =
    "800000000000011000000000000000000000000000000000000000000000001";

/// 필드 소수 P (`Felt::MAX + 1`)
pub static FIELD_PRIME: Lazy<BigUint> =
    Lazy::new(|| BigUint::from_bytes_be(&Felt::MAX.to_bytes_be()) + BigUint::one());

/// short string 최대 길이 (바이트)
pub const SHORT_STRING_MAX_LEN: usize = 31;

/// 부호 없는 큰 정수에서 Felt 생성
///
/// `value >= P` 이면 실패합니다.
pub fn felt_from_biguint(value: &BigUint) -> StarknetResult<Felt> {
    if value >= &*FIELD_PRIME {
        return Err(StarknetError::FeltOutOfRange {
            value: value.to_string(),
        });
    }

    let bytes = value.to_bytes_be();
    let mut padded = [0u8; 32];
    padded[32 - bytes.len()..].copy_from_slice(&bytes);
    Ok(Felt::from_bytes_be(&padded))
}

/// 부호 있는 큰 정수에서 Felt 생성
///
/// 음수는 `P + value` 로 환원됩니다. `|value| >= P` 이면 실패합니다.
pub fn felt_from_bigint(value: &BigInt) -> StarknetResult<Felt> {
    let magnitude = value.magnitude();
    if magnitude >= &*FIELD_PRIME {
        return Err(StarknetError::FeltOutOfRange {
            value: value.to_string(),
        });
    }

    match value.sign() {
        Sign::Minus => felt_from_biguint(&(&*FIELD_PRIME - magnitude)),
        _ => felt_from_biguint(magnitude),
    }
}

/// 포화 변환: `P - 1` 을 넘는 값은 `P - 1` 로 고정
pub fn felt_from_biguint_clamped(value: &BigUint) -> Felt {
    if value >= &*FIELD_PRIME {
        Felt::MAX
    } else {
        felt_from_biguint(value).unwrap_or(Felt::MAX)
    }
}

/// Felt를 부호 없는 큰 정수로 변환
pub fn felt_to_biguint(felt: &Felt) -> BigUint {
    BigUint::from_bytes_be(&felt.to_bytes_be())
}

/// 16진수 문자열을 Felt로 변환
///
/// `0x` 접두사는 선택이며 대소문자를 구분하지 않습니다.
pub fn felt_from_hex(hex_str: &str) -> StarknetResult<Felt> {
    let digits = hex_str
        .strip_prefix("0x")
        .or_else(|| hex_str.strip_prefix("0X"))
        .unwrap_or(hex_str);

    if digits.is_empty() {
        return Err(StarknetError::InvalidHex {
            message: format!("No digits in '{hex_str}'"),
        });
    }

    // 홀수 길이면 앞에 0을 추가
    let digits = if digits.len() % 2 != 0 {
        format!("0{digits}")
    } else {
        digits.to_string()
    };

    let bytes = hex::decode(&digits).map_err(|e| StarknetError::InvalidHex {
        message: format!("{hex_str}: {e}"),
    })?;

    felt_from_biguint(&BigUint::from_bytes_be(&bytes))
}

/// 10진수 문자열을 Felt로 변환
pub fn felt_from_dec_str(dec_str: &str) -> StarknetResult<Felt> {
    if dec_str.is_empty() || !dec_str.bytes().all(|b| b.is_ascii_digit()) {
        return Err(StarknetError::InvalidElement {
            type_name: "felt".into(),
            message: format!("Not a decimal string: '{dec_str}'"),
        });
    }

    let value = BigUint::parse_bytes(dec_str.as_bytes(), 10).ok_or_else(|| {
        StarknetError::InvalidElement {
            type_name: "felt".into(),
            message: format!("Not a decimal string: '{dec_str}'"),
        }
    })?;
    felt_from_biguint(&value)
}

/// Felt를 최소 길이 16진수 문자열로 변환 (`0x` 접두사, 소문자)
///
/// 0은 `0x0` 으로 표현됩니다.
pub fn felt_to_hex(felt: &Felt) -> String {
    let encoded = hex::encode(felt.to_bytes_be());
    let trimmed = encoded.trim_start_matches('0');
    if trimmed.is_empty() {
        "0x0".to_string()
    } else {
        format!("0x{trimmed}")
    }
}

/// Felt를 64자리 고정 길이 16진수 문자열로 변환
pub fn felt_to_fixed_hex(felt: &Felt) -> String {
    format!("0x{}", hex::encode(felt.to_bytes_be()))
}

/// Felt를 32바이트 빅엔디언 배열로 변환
pub fn felt_to_bytes_be(felt: &Felt) -> [u8; 32] {
    felt.to_bytes_be()
}

/// 문자열이 short string 규칙(ASCII, 31바이트 이하)을 만족하는지 확인
pub fn is_short_string(s: &str) -> bool {
    s.is_ascii() && s.len() <= SHORT_STRING_MAX_LEN
}

/// ASCII 문자열을 Felt로 인코딩 (short string encoding)
///
/// 각 바이트가 빅엔디언 정수의 한 바이트가 됩니다.
pub fn short_string_to_felt(s: &str) -> StarknetResult<Felt> {
    if !is_short_string(s) {
        return Err(StarknetError::InvalidShortString {
            value: s.to_string(),
        });
    }

    let bytes = s.as_bytes();
    let mut padded = [0u8; 32];
    padded[32 - bytes.len()..].copy_from_slice(bytes);
    Ok(Felt::from_bytes_be(&padded))
}

/// Felt를 short string으로 디코딩
pub fn felt_to_short_string(felt: &Felt) -> StarknetResult<String> {
    let bytes = felt.to_bytes_be();
    let start = bytes.iter().position(|b| *b != 0).unwrap_or(bytes.len());
    let text = &bytes[start..];

    if text.len() > SHORT_STRING_MAX_LEN || !text.is_ascii() {
        return Err(StarknetError::InvalidShortString {
            value: felt_to_hex(felt),
        });
    }

    Ok(text.iter().map(|b| *b as char).collect())
}

/// Cairo `ByteArray` 표현의 긴 문자열
///
/// 31바이트 단위로 분할한 완전한 워드들과, 남은 바이트를 담은 pending word로 구성됩니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteArray {
    /// 31바이트 워드들
    pub data: Vec<Felt>,
    /// 31바이트 미만의 나머지
    pub pending_word: Felt,
    /// 나머지 길이 (바이트)
    pub pending_word_len: usize,
}

impl ByteArray {
    /// 문자열을 31바이트 워드로 분할
    pub fn from_string(s: &str) -> Self {
        let bytes = s.as_bytes();
        let mut chunks = bytes.chunks(SHORT_STRING_MAX_LEN).peekable();
        let mut data = Vec::with_capacity(bytes.len() / SHORT_STRING_MAX_LEN);
        let mut pending_word = Felt::ZERO;
        let mut pending_word_len = 0;

        while let Some(chunk) = chunks.next() {
            let word = bytes_to_word(chunk);
            if chunks.peek().is_none() && chunk.len() < SHORT_STRING_MAX_LEN {
                pending_word = word;
                pending_word_len = chunk.len();
            } else {
                data.push(word);
            }
        }

        Self {
            data,
            pending_word,
            pending_word_len,
        }
    }

    /// 해싱용 원소 배열: `[len(data), ...data, pending_word, pending_word_len]`
    pub fn to_elements(&self) -> Vec<Felt> {
        let mut elements = Vec::with_capacity(self.data.len() + 3);
        elements.push(Felt::from(self.data.len() as u64));
        elements.extend_from_slice(&self.data);
        elements.push(self.pending_word);
        elements.push(Felt::from(self.pending_word_len as u64));
        elements
    }
}

fn bytes_to_word(chunk: &[u8]) -> Felt {
    let mut padded = [0u8; 32];
    padded[32 - chunk.len()..].copy_from_slice(chunk);
    Felt::from_bytes_be(&padded)
}

/// `2^bits` 를 큰 정수로 반환
pub(crate) fn pow2(bits: usize) -> BigUint {
    BigUint::one() << bits
}
