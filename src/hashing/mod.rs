/// Computes a 64-bit hash of the input data using BLAKE3, truncated from 256 bits.
///
/// Used for embedding cache keys and stub vector seeds. With 64 bits the
/// birthday bound sits around four billion distinct texts, far beyond any
/// answer sheet; a collision would only reuse a cached vector.
#[inline]
pub fn hash_to_u64(data: &[u8]) -> u64 {
    let hash = blake3::hash(data);
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&hash.as_bytes()[..8]);
    u64::from_le_bytes(bytes)
}

/// Hashes a text exactly as given (no trimming or case folding).
#[inline]
pub fn hash_text(text: &str) -> u64 {
    hash_to_u64(text.as_bytes())
}
