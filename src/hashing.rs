//! Polynomial string hashes over a base-62 digit alphabet.
//!
//! Both hashes treat a key as a polynomial with the first character as the
//! lowest-order term: `sum(digit[i] * z^i)`. The sum is reduced modulo the
//! target range term by term in `u128`, so the result is exact for keys of
//! any length.
//!
//! The secondary hash only recognizes letters; ASCII digits contribute 0 to
//! it while they map to 52..=61 in the primary hash. Keys that differ only in
//! their digits therefore share a probe step. Changing either alphabet changes
//! every probe sequence.

/// Digit value of `c` in the primary alphabet.
#[inline]
pub fn digit(c: char) -> u64 {
    match c {
        'a'..='z' => c as u64 - 'a' as u64,
        'A'..='Z' => c as u64 - 'A' as u64 + 26,
        '0'..='9' => c as u64 - '0' as u64 + 52,
        _ => 0,
    }
}

/// Digit value of `c` in the secondary (letters-only) alphabet.
#[inline]
fn letter_digit(c: char) -> u64 {
    match c {
        'a'..='z' | 'A'..='Z' => digit(c),
        _ => 0,
    }
}

/// `sum(map(key[i]) * z^i) mod m`; `m` must be non-zero.
fn polynomial_mod(key: &str, z: u64, m: u64, map: impl Fn(char) -> u64) -> u64 {
    let m = u128::from(m);
    let z = u128::from(z) % m;
    let mut exp = 1 % m;
    let mut acc = 0u128;
    for c in key.chars() {
        acc = (acc + u128::from(map(c)) * exp) % m;
        exp = exp * z % m;
    }
    acc as u64
}

/// Bucket or initial slot index of `key` in a table of `capacity`.
///
/// `capacity` must be non-zero; table construction guarantees it.
pub fn primary(key: &str, z: u64, capacity: usize) -> usize {
    polynomial_mod(key, z, capacity as u64, digit) as usize
}

/// Probe step for double hashing.
///
/// Computes `c2 - (v mod c2)` and substitutes 1 when that equals `capacity`
/// or 0, so the step is never zero and never a full lap.
pub fn step(key: &str, z2: u64, c2: u64, capacity: usize) -> usize {
    let candidate = c2 - polynomial_mod(key, z2, c2, letter_digit);
    if candidate == capacity as u64 || candidate == 0 {
        1
    } else {
        candidate as usize
    }
}
