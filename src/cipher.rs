use crate::error::{EnvaultError, Result};
use aes::{Aes128, Aes192, Aes256};
use cfb_mode::cipher::{AsyncStreamCipher, KeyIvInit};
use cfb_mode::{Decryptor, Encryptor};
use rand::rngs::OsRng;
use rand::RngCore;

type Aes128CfbEnc = Encryptor<Aes128>;
type Aes192CfbEnc = Encryptor<Aes192>;
type Aes256CfbEnc = Encryptor<Aes256>;
type Aes128CfbDec = Decryptor<Aes128>;
type Aes192CfbDec = Decryptor<Aes192>;
type Aes256CfbDec = Decryptor<Aes256>;

/// AES block size; also the IV length prepended to every ciphertext
pub const BLOCK_SIZE: usize = 16;

/// Encrypt content with AES-CFB under the raw secret bytes.
///
/// A fresh random IV of one block is generated per call and prepended to
/// the ciphertext; the whole envelope is returned hex-encoded so it can be
/// stored as text. The secret is used directly as key material and must be
/// exactly 16, 24, or 32 bytes.
pub fn encrypt(plaintext: &[u8], key: &[u8]) -> Result<String> {
    check_key_size(key)?;

    let mut iv = [0u8; BLOCK_SIZE];
    OsRng.fill_bytes(&mut iv);

    let mut buf = plaintext.to_vec();
    match key.len() {
        16 => new_cipher::<Aes128CfbEnc>(key, &iv)?.encrypt(&mut buf),
        24 => new_cipher::<Aes192CfbEnc>(key, &iv)?.encrypt(&mut buf),
        32 => new_cipher::<Aes256CfbEnc>(key, &iv)?.encrypt(&mut buf),
        n => return Err(EnvaultError::InvalidKeySize(n)),
    }

    let mut envelope = Vec::with_capacity(BLOCK_SIZE + buf.len());
    envelope.extend_from_slice(&iv);
    envelope.extend_from_slice(&buf);
    Ok(hex::encode(envelope))
}

/// Decrypt a hex-encoded `IV || ciphertext` envelope.
///
/// Fails when the hex is malformed or the decoded envelope is too short to
/// contain an IV. There is no authentication tag: ciphertext that is merely
/// corrupted decrypts to garbage bytes without error, so success must never
/// be read as proof the content is authentic.
pub fn decrypt(hex_ciphertext: &str, key: &[u8]) -> Result<Vec<u8>> {
    check_key_size(key)?;

    let envelope = hex::decode(hex_ciphertext.trim())
        .map_err(|e| EnvaultError::DecryptionFailed(format!("invalid hex: {}", e)))?;
    if envelope.len() < BLOCK_SIZE {
        return Err(EnvaultError::DecryptionFailed(format!(
            "ciphertext too short: {} bytes, need at least {} for the IV",
            envelope.len(),
            BLOCK_SIZE
        )));
    }

    let (iv, ciphertext) = envelope.split_at(BLOCK_SIZE);
    let mut buf = ciphertext.to_vec();
    match key.len() {
        16 => new_cipher::<Aes128CfbDec>(key, iv)?.decrypt(&mut buf),
        24 => new_cipher::<Aes192CfbDec>(key, iv)?.decrypt(&mut buf),
        32 => new_cipher::<Aes256CfbDec>(key, iv)?.decrypt(&mut buf),
        n => return Err(EnvaultError::InvalidKeySize(n)),
    }
    Ok(buf)
}

/// Validate the secret length against the AES key sizes
pub fn check_key_size(key: &[u8]) -> Result<()> {
    match key.len() {
        16 | 24 | 32 => Ok(()),
        n => Err(EnvaultError::InvalidKeySize(n)),
    }
}

// Key length is matched by the caller; the slice constructor can only fail
// on a key/IV length mismatch
fn new_cipher<C: KeyIvInit>(key: &[u8], iv: &[u8]) -> Result<C> {
    C::new_from_slices(key, iv).map_err(|_| EnvaultError::InvalidKeySize(key.len()))
}
