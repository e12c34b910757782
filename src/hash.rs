//! Rolling byte hash that drives bucket placement in `ChainMap`.

/// Hashes a byte string with a shift-and-accumulate rolling scheme.
///
/// Each step carries the accumulator's top bit out, shifts left by one,
/// subtracts the carried bit from the current byte, scales by the previous
/// byte (from the second position on), and adds the result back in. All
/// arithmetic wraps modulo 2^64.
///
/// The degenerate inputs fall out of the loop: the empty string hashes to
/// 0 and a single byte hashes to its own value. Deterministic across
/// processes and platforms; not suitable for anything adversarial.
pub fn rolling(bytes: &[u8]) -> u64 {
    let mut acc: u64 = 0;
    for (i, &b) in bytes.iter().enumerate() {
        let carried = acc >> 63;
        acc <<= 1;
        let mut ch = u64::from(b).wrapping_sub(carried);
        if i > 0 {
            ch = ch.wrapping_mul(u64::from(bytes[i - 1]));
        }
        acc = acc.wrapping_add(ch);
    }
    acc
}
