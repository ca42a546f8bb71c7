//! Raw transaction records and the preview generator.
//!
//! A preview is the candidate transaction shown to the user before it is sent.
//! Every hex field is `0x`-prefixed lowercase hex; integers are not zero padded.

use ethers::types::{Address, U256};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::ops::{Range, RangeInclusive};

/// Sending identity used for every preview
pub const SENDER_ADDRESS: &str = "0x1111111111111111111111111111111111111111";

pub const GAS_LIMIT_RANGE: RangeInclusive<u64> = 21_000..=100_000;
pub const CHAIN_ID_RANGE: RangeInclusive<u64> = 1..=100;
pub const L1_BLOCK_RANGE: Range<u64> = 0..10_000_000;

/// Upper bound for the random calldata length in bytes
pub const MAX_DATA_LEN: usize = 32;

/// 1 gwei .. 100 gwei
const GAS_PRICE_RANGE: RangeInclusive<u64> = 1_000_000_000..=100_000_000_000;

/// Transaction record in the sequencer's wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTransaction {
    pub nonce: String,
    pub from: String,
    pub to: String,
    pub value: String,
    pub data: String,
    pub gas_limit: String,
    pub gas_price: String,
    pub chain_id: u64,
    pub l1_block_number: u64,
    pub submission_fee: String,
}

impl RawTransaction {
    /// Decoded nonce, if the field holds valid hex
    pub fn nonce_value(&self) -> Option<u64> {
        parse_hex_u64(&self.nonce)
    }

    /// Decoded gas limit, if the field holds valid hex
    pub fn gas_limit_value(&self) -> Option<u64> {
        parse_hex_u64(&self.gas_limit)
    }

    /// Number of calldata bytes
    pub fn data_len(&self) -> usize {
        self.data.trim_start_matches("0x").len() / 2
    }
}

/// Encode an integer as `0x`-prefixed lowercase hex
pub fn hex_u64(value: u64) -> String {
    format!("0x{:x}", value)
}

pub fn hex_u256(value: U256) -> String {
    format!("0x{:x}", value)
}

/// Encode an address as `0x` plus 40 lowercase hex digits
pub fn hex_address(address: Address) -> String {
    format!("{:#x}", address)
}

/// Parse `0x`-prefixed hex into a u64
pub fn parse_hex_u64(value: &str) -> Option<u64> {
    let digits = value.strip_prefix("0x")?;
    u64::from_str_radix(digits, 16).ok()
}

/// Check the `0x` + 40 lowercase hex digits address shape
pub fn is_hex_address(value: &str) -> bool {
    value.len() == 42
        && value.starts_with("0x")
        && value[2..].chars().all(|c| matches!(c, '0'..='9' | 'a'..='f'))
}

/// Build a fresh preview for `nonce` from the supplied randomness.
pub fn generate_preview<R: Rng>(nonce: u64, rng: &mut R) -> RawTransaction {
    let to = Address::from(rng.gen::<[u8; 20]>());

    // value up to ~18.4 ETH
    let value = U256::from(rng.gen::<u64>());

    let data_len = rng.gen_range(0..=MAX_DATA_LEN);
    let mut data = vec![0u8; data_len];
    rng.fill(data.as_mut_slice());

    let gas_price = U256::from(rng.gen_range(GAS_PRICE_RANGE));
    let submission_fee = U256::from(rng.gen::<u32>());

    RawTransaction {
        nonce: hex_u64(nonce),
        from: SENDER_ADDRESS.to_string(),
        to: hex_address(to),
        value: hex_u256(value),
        data: format!("0x{}", hex::encode(&data)),
        gas_limit: hex_u64(rng.gen_range(GAS_LIMIT_RANGE)),
        gas_price: hex_u256(gas_price),
        chain_id: rng.gen_range(CHAIN_ID_RANGE),
        l1_block_number: rng.gen_range(L1_BLOCK_RANGE),
        submission_fee: hex_u256(submission_fee),
    }
}
