//! Deterministic hash functions for generation and tile update randomness.
//!
//! Provides reproducible pseudo-random values based on input parameters, so
//! the same seed and position always produce the same terrain.
//!
//! # Naming Convention
//!
//! `hash{inputs}{outputs}{input_type}{output_type}{bits}`
//!
//! - **inputs**: Number of input parameters
//! - **outputs**: Number of outputs (always 1)
//! - **input_type**: `i` = signed
//! - **output_type**: `u` = unsigned, `f` = float (0..1 range)
//! - **bits**: always `64`

/// FNV-1a style mixing for 64-bit values.
#[inline]
fn mix64(mut h: u64) -> u64 {
  h = h.wrapping_mul(0x517c_c1b7_2722_0a95);
  h ^= h >> 32;
  h = h.wrapping_mul(0x517c_c1b7_2722_0a95);
  h ^= h >> 32;
  h
}

/// Convert u64 to f64 in [0.0, 1.0) range.
#[inline]
fn to_frac64(h: u64) -> f64 {
  (h >> 12) as f64 * (1.0 / (1u64 << 52) as f64)
}

#[inline]
pub fn hash21iu64(a: i64, b: i64) -> u64 {
  mix64((a as u64) ^ (b as u64).rotate_left(32))
}

#[inline]
pub fn hash31iu64(a: i64, b: i64, c: i64) -> u64 {
  mix64((a as u64) ^ (b as u64).rotate_left(21) ^ (c as u64).rotate_left(42))
}

#[inline]
pub fn hash31if64(a: i64, b: i64, c: i64) -> f64 {
  to_frac64(hash31iu64(a, b, c))
}

#[inline]
pub fn hash41iu64(a: i64, b: i64, c: i64, d: i64) -> u64 {
  mix64(
    (a as u64) ^ (b as u64).rotate_left(16) ^ (c as u64).rotate_left(32) ^ (d as u64).rotate_left(48),
  )
}

#[inline]
pub fn hash41if64(a: i64, b: i64, c: i64, d: i64) -> f64 {
  to_frac64(hash41iu64(a, b, c, d))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn hashes_are_deterministic() {
    assert_eq!(hash21iu64(7, -3), hash21iu64(7, -3));
    assert_eq!(hash41iu64(1, 2, 3, 4), hash41iu64(1, 2, 3, 4));
  }

  #[test]
  fn argument_order_matters() {
    assert_ne!(hash21iu64(1, 2), hash21iu64(2, 1));
    assert_ne!(hash31iu64(1, 2, 3), hash31iu64(3, 2, 1));
  }

  #[test]
  fn fractions_stay_in_unit_range() {
    for i in -500..500 {
      let f = hash31if64(i, i * 7, 99);
      assert!((0.0..1.0).contains(&f));
      let g = hash41if64(i, 1, 2, 3);
      assert!((0.0..1.0).contains(&g));
    }
  }
}
