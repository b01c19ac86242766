use sha2::{Digest, Sha256};

/// Number of leading characters kept in clear for log correlation.
pub const KEY_PREFIX_LENGTH: usize = 8;

/// Hashes device API keys for storage and lookup.
///
/// Keys are looked up by digest, so the hash is unsalted SHA-256.
#[derive(Debug, Clone, Default)]
pub struct KeyService;

impl KeyService {
    pub fn new() -> Self {
        Self
    }

    pub fn hash(&self, key: &str) -> String {
        hex::encode(Sha256::digest(key.as_bytes()))
    }

    pub fn prefix<'a>(&self, key: &'a str) -> &'a str {
        let end = key
            .char_indices()
            .nth(KEY_PREFIX_LENGTH)
            .map_or(key.len(), |(index, _)| index);

        &key[..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_stable_hex_digest() {
        let key_service = KeyService::new();
        let hash = key_service.hash("dev_hardware_key");

        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(hash, key_service.hash("dev_hardware_key"));
        assert_ne!(hash, key_service.hash("dev_hardware_kez"));
    }

    #[test]
    fn test_known_digest() {
        assert_eq!(
            KeyService::new().hash("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_prefix() {
        let key_service = KeyService::new();

        assert_eq!(key_service.prefix("dev_hardware_key"), "dev_hard");
        assert_eq!(key_service.prefix("short"), "short");
        assert_eq!(key_service.prefix("ääääääääää"), "ääääääää");
    }
}
