use sha1::{Digest, Sha1};

/// Lower-case hex sha1 of arbitrary bytes.
pub fn fingerprint(bytes: &[u8]) -> String {
    let mut hasher = Sha1::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// Stable small integer in `0..modulus` derived from a key's fingerprint.
pub fn stable_seed(key: &str, modulus: u32) -> u32 {
    let mut hasher = Sha1::new();
    hasher.update(key.as_bytes());
    let digest = hasher.finalize();
    let head = u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]]);
    head % modulus.max(1)
}
