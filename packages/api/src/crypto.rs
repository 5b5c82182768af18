//! # Cryptographic utilities: encrypting Pinterest app secrets at rest
//!
//! Users may register their own Pinterest app in Settings. The app secret is
//! stored in PostgreSQL encrypted with **AES-256-GCM** under a server-managed
//! master key; the app id and redirect URI are stored in clear.
//!
//! ## Master key
//!
//! [`get_master_key`] reads a 32-byte (64 hex-char) key from the `ENCRYPTION_KEY`
//! environment variable. Per-record uniqueness comes from the random 12-byte
//! nonce generated at encryption time and stored next to the ciphertext.
//!
//! | Function | Purpose |
//! |----------|---------|
//! | [`encrypt_secret`] | Encrypts bytes with a fresh nonce. Returns `(ciphertext, nonce)` for the `app_secret_enc` / `encryption_nonce` columns. |
//! | [`decrypt_secret`] | Recovers the plaintext when the Pinterest service is built for that user. |

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use rand::RngCore;

/// Read and validate the 32-byte master encryption key from `ENCRYPTION_KEY` env var.
fn get_master_key() -> Result<[u8; 32], String> {
    dotenvy::dotenv().ok();
    let hex_key =
        std::env::var("ENCRYPTION_KEY").map_err(|_| "ENCRYPTION_KEY env var not set".to_string())?;
    parse_key(&hex_key)
}

fn parse_key(hex_key: &str) -> Result<[u8; 32], String> {
    let bytes = hex::decode(hex_key.trim())
        .map_err(|e| format!("Invalid ENCRYPTION_KEY hex: {}", e))?;
    if bytes.len() != 32 {
        return Err(format!(
            "ENCRYPTION_KEY must be 64 hex chars (32 bytes), got {} bytes",
            bytes.len()
        ));
    }
    let mut key = [0u8; 32];
    key.copy_from_slice(&bytes);
    Ok(key)
}

/// Encrypt a secret under the master key. Returns (ciphertext, nonce).
pub fn encrypt_secret(plaintext: &[u8]) -> Result<(Vec<u8>, Vec<u8>), String> {
    encrypt_with_key(&get_master_key()?, plaintext)
}

/// Decrypt a secret stored by [`encrypt_secret`].
pub fn decrypt_secret(ciphertext: &[u8], nonce: &[u8]) -> Result<Vec<u8>, String> {
    decrypt_with_key(&get_master_key()?, ciphertext, nonce)
}

fn encrypt_with_key(key: &[u8; 32], plaintext: &[u8]) -> Result<(Vec<u8>, Vec<u8>), String> {
    let cipher = Aes256Gcm::new_from_slice(key)
        .map_err(|e| format!("Failed to create cipher: {}", e))?;

    let mut nonce_bytes = [0u8; 12];
    rand::thread_rng().fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    let ciphertext = cipher
        .encrypt(nonce, plaintext)
        .map_err(|e| format!("Encryption failed: {}", e))?;

    Ok((ciphertext, nonce_bytes.to_vec()))
}

fn decrypt_with_key(key: &[u8; 32], ciphertext: &[u8], nonce: &[u8]) -> Result<Vec<u8>, String> {
    if nonce.len() != 12 {
        return Err(format!("Invalid nonce length: {}", nonce.len()));
    }
    let cipher = Aes256Gcm::new_from_slice(key)
        .map_err(|e| format!("Failed to create cipher: {}", e))?;

    cipher
        .decrypt(Nonce::from_slice(nonce), ciphertext)
        .map_err(|e| format!("Decryption failed: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY_HEX: &str = "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f";

    #[test]
    fn test_secret_roundtrip() {
        let key = parse_key(KEY_HEX).unwrap();
        let (ciphertext, nonce) = encrypt_with_key(&key, b"app-secret").unwrap();
        assert_ne!(ciphertext, b"app-secret".to_vec());
        assert_eq!(nonce.len(), 12);

        let plaintext = decrypt_with_key(&key, &ciphertext, &nonce).unwrap();
        assert_eq!(plaintext, b"app-secret".to_vec());
    }

    #[test]
    fn test_fresh_nonce_per_call() {
        let key = parse_key(KEY_HEX).unwrap();
        let (_, first) = encrypt_with_key(&key, b"same").unwrap();
        let (_, second) = encrypt_with_key(&key, b"same").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_wrong_key_fails() {
        let key = parse_key(KEY_HEX).unwrap();
        let (ciphertext, nonce) = encrypt_with_key(&key, b"app-secret").unwrap();

        let mut other = key;
        other[0] ^= 0xff;
        assert!(decrypt_with_key(&other, &ciphertext, &nonce).is_err());
    }

    #[test]
    fn test_key_validation() {
        assert!(parse_key("abcd").unwrap_err().contains("got 2 bytes"));
        assert!(parse_key("zz").is_err());
    }
}
