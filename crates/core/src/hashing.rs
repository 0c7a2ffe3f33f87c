//! Shared SHA-512 hex digest utility.
//!
//! Voucher codes are never stored in plaintext: the database holds the
//! SHA-512 hex digest of each code, and submitted codes are compared by
//! digest only.

use sha2::{Digest, Sha512};

/// Compute a SHA-512 hex digest of the given bytes.
pub fn sha512_hex(data: &[u8]) -> String {
    let hash = Sha512::digest(data);
    format!("{hash:x}")
}

/// Digest a submitted voucher code. Codes are ASCII by construction.
pub fn voucher_code_digest(code: &str) -> String {
    sha512_hex(code.as_bytes())
}
