//! The record-algorithm catalog: static descriptors binding a bulk cipher
//! to an HMAC (or none, for AEAD), a nonce-construction flag, and an
//! encryption budget. Purely declarative -- nothing here decides *which*
//! algorithm a suite uses at runtime; `crate::registry` does that by
//! walking a suite's candidate list against `CipherAvailability`.

/// A bulk symmetric cipher primitive. `is_available()` in
/// `crate::collaborators::CipherAvailability` is keyed on this enum, not on
/// the record algorithm as a whole, because the same cipher can back
/// several HMAC/nonce combinations.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BulkCipher {
  NULL,
  RC4_128,
  TRIPLE_DES_EDE_CBC,
  AES_128_CBC,
  AES_256_CBC,
  /// A cipher+HMAC pair implemented as one AEAD-like primitive by the
  /// underlying library (e.g. AES-NI composite modes), preferred over the
  /// separate-cipher-plus-HMAC form of the same algorithm when available.
  AES_128_CBC_SHA_COMPOSITE,
  AES_256_CBC_SHA_COMPOSITE,
  AES_128_GCM,
  AES_256_GCM,
  CHACHA20_POLY1305,
}

/// The HMAC construction paired with a bulk cipher in CBC-mode suites.
/// `NONE` marks AEAD record algorithms, which authenticate without a
/// separate HMAC. The `SSLv3_*` variants are the legacy SSLv3 MAC pad
/// construction over the same underlying hash, not a different digest.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HmacKind {
  NONE,
  MD5,
  SHA1,
  SHA256,
  SHA384,
  SSLv3_MD5,
  SSLv3_SHA1,
}

/// How a record's per-record nonce is constructed. Surfaced to the record
/// layer because TLS 1.2 GCM, TLS 1.2 ChaCha20-Poly1305, and TLS 1.3 AEADs
/// each build their nonce differently from the fixed IV and sequence
/// number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NonceFlavor {
  NONE,
  Tls12AesGcm,
  Tls12ChaChaPoly,
  Tls13Aead,
}

/// One runnable combination of bulk cipher, HMAC, and nonce construction,
/// together with the record-count ceiling before a rekey is mandatory.
#[derive(Debug, Clone, Copy)]
pub struct RecordAlgorithm {
  pub cipher: BulkCipher,
  pub hmac_kind: HmacKind,
  pub nonce_flavor: NonceFlavor,
  /// Maximum records encryptable under one traffic key before the suite is
  /// considered exhausted. `u64::MAX` is treated as effectively unlimited.
  pub record_limit: u64,
}

impl RecordAlgorithm {
  pub const fn new(
    cipher: BulkCipher,
    hmac_kind: HmacKind,
    nonce_flavor: NonceFlavor,
    record_limit: u64,
  ) -> RecordAlgorithm {
    RecordAlgorithm {
      cipher,
      hmac_kind,
      nonce_flavor,
      record_limit,
    }
  }
}

pub const RECORD_ALG_NULL: RecordAlgorithm =
  RecordAlgorithm::new(BulkCipher::NULL, HmacKind::NONE, NonceFlavor::NONE, u64::MAX);

pub const RECORD_ALG_RC4_SHA: RecordAlgorithm =
  RecordAlgorithm::new(BulkCipher::RC4_128, HmacKind::SHA1, NonceFlavor::NONE, u64::MAX);
pub const RECORD_ALG_RC4_SSLV3_SHA: RecordAlgorithm = RecordAlgorithm::new(
  BulkCipher::RC4_128,
  HmacKind::SSLv3_SHA1,
  NonceFlavor::NONE,
  u64::MAX,
);

pub const RECORD_ALG_3DES_SHA: RecordAlgorithm = RecordAlgorithm::new(
  BulkCipher::TRIPLE_DES_EDE_CBC,
  HmacKind::SHA1,
  NonceFlavor::NONE,
  u64::MAX,
);
pub const RECORD_ALG_3DES_SSLV3_SHA: RecordAlgorithm = RecordAlgorithm::new(
  BulkCipher::TRIPLE_DES_EDE_CBC,
  HmacKind::SSLv3_SHA1,
  NonceFlavor::NONE,
  u64::MAX,
);

/// Hardware-accelerated composite variant, tried before the separate
/// cipher-plus-HMAC form of the same algorithm (see `crate::registry`).
pub const RECORD_ALG_AES128_SHA_COMPOSITE: RecordAlgorithm = RecordAlgorithm::new(
  BulkCipher::AES_128_CBC_SHA_COMPOSITE,
  HmacKind::NONE,
  NonceFlavor::NONE,
  u64::MAX,
);
pub const RECORD_ALG_AES128_SHA: RecordAlgorithm = RecordAlgorithm::new(
  BulkCipher::AES_128_CBC,
  HmacKind::SHA1,
  NonceFlavor::NONE,
  u64::MAX,
);
pub const RECORD_ALG_AES128_SSLV3_SHA: RecordAlgorithm = RecordAlgorithm::new(
  BulkCipher::AES_128_CBC,
  HmacKind::SSLv3_SHA1,
  NonceFlavor::NONE,
  u64::MAX,
);

pub const RECORD_ALG_AES256_SHA_COMPOSITE: RecordAlgorithm = RecordAlgorithm::new(
  BulkCipher::AES_256_CBC_SHA_COMPOSITE,
  HmacKind::NONE,
  NonceFlavor::NONE,
  u64::MAX,
);
pub const RECORD_ALG_AES256_SHA: RecordAlgorithm = RecordAlgorithm::new(
  BulkCipher::AES_256_CBC,
  HmacKind::SHA1,
  NonceFlavor::NONE,
  u64::MAX,
);
pub const RECORD_ALG_AES256_SSLV3_SHA: RecordAlgorithm = RecordAlgorithm::new(
  BulkCipher::AES_256_CBC,
  HmacKind::SSLv3_SHA1,
  NonceFlavor::NONE,
  u64::MAX,
);

pub const RECORD_ALG_AES128_GCM: RecordAlgorithm = RecordAlgorithm::new(
  BulkCipher::AES_128_GCM,
  HmacKind::NONE,
  NonceFlavor::Tls12AesGcm,
  u64::MAX,
);
pub const RECORD_ALG_AES256_GCM: RecordAlgorithm = RecordAlgorithm::new(
  BulkCipher::AES_256_GCM,
  HmacKind::NONE,
  NonceFlavor::Tls12AesGcm,
  u64::MAX,
);
pub const RECORD_ALG_CHACHA20_POLY1305: RecordAlgorithm = RecordAlgorithm::new(
  BulkCipher::CHACHA20_POLY1305,
  HmacKind::NONE,
  NonceFlavor::Tls12ChaChaPoly,
  u64::MAX,
);

/// RFC 8446 §5.5: TLS 1.3 AES-GCM records are limited to 2^24.5 records
/// under one key before a `key_update` is required.
pub const TLS13_AES_GCM_RECORD_LIMIT: u64 = 1 << 24;

pub const RECORD_ALG_TLS13_AES128_GCM: RecordAlgorithm = RecordAlgorithm::new(
  BulkCipher::AES_128_GCM,
  HmacKind::NONE,
  NonceFlavor::Tls13Aead,
  TLS13_AES_GCM_RECORD_LIMIT,
);
pub const RECORD_ALG_TLS13_AES256_GCM: RecordAlgorithm = RecordAlgorithm::new(
  BulkCipher::AES_256_GCM,
  HmacKind::NONE,
  NonceFlavor::Tls13Aead,
  TLS13_AES_GCM_RECORD_LIMIT,
);
pub const RECORD_ALG_TLS13_CHACHA20_POLY1305: RecordAlgorithm = RecordAlgorithm::new(
  BulkCipher::CHACHA20_POLY1305,
  HmacKind::NONE,
  NonceFlavor::Tls13Aead,
  u64::MAX,
);
