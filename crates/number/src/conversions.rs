//! Lossless conversions between the 256-bit integers used on the pool
//! boundary and the arbitrary precision integers used for intermediate
//! fixed-point arithmetic.

use {
    anyhow::{Result, ensure},
    num::{BigInt, BigUint, Signed, bigint::Sign},
    primitive_types::U256,
};

pub fn u256_to_big_uint(input: &U256) -> BigUint {
    let mut bytes = [0; 32];
    input.to_big_endian(&mut bytes);
    BigUint::from_bytes_be(&bytes)
}

pub fn u256_to_big_int(input: &U256) -> BigInt {
    BigInt::from_biguint(Sign::Plus, u256_to_big_uint(input))
}

pub fn big_uint_to_u256(input: &BigUint) -> Result<U256> {
    let bytes = input.to_bytes_be();
    ensure!(bytes.len() <= 32, "too large");
    Ok(U256::from_big_endian(&bytes))
}

pub fn big_int_to_u256(input: &BigInt) -> Result<U256> {
    ensure!(!input.is_negative(), "negative");
    big_uint_to_u256(input.magnitude())
}
