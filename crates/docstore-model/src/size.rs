//! Scalar byte-size estimation used for item-size accounting.

/// Number of bytes `value` occupies when UTF-8 encoded.
#[must_use]
pub fn bytesize(value: &str) -> usize {
    value.len()
}
