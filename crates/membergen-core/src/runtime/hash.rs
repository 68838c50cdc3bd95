//! Ambient hash functions of the value model.

/// Polynomial hash over UTF-16 code units, `h = 31 * h + c`.
#[must_use]
pub fn text_hash(text: &str) -> i32 {
    text.encode_utf16()
        .fold(0i32, |h, c| h.wrapping_mul(31).wrapping_add(i32::from(c)))
}

/// Folds the high half of a long into the low half.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss
)]
pub const fn long_hash(value: i64) -> i32 {
    let bits = value as u64;

    (bits ^ (bits >> 32)) as i32
}

#[must_use]
pub const fn bool_hash(value: bool) -> i32 {
    if value { 1231 } else { 1237 }
}

/// Stable per-reference hash derived from the allocation id.
#[must_use]
#[allow(clippy::cast_possible_wrap)]
pub const fn identity_hash(id: u32) -> i32 {
    (id.wrapping_mul(0x9E37_79B9) >> 1) as i32
}
