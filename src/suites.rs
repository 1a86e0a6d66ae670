//! The cipher-suite catalog: one static descriptor per IANA-assigned suite
//! this crate knows about, plus the two SCSV pseudo-suites consumed by
//! server-side selection. `ALL_CIPHERSUITES` is the single source of truth
//! for every other module -- preference lists are built from references
//! into it, and `crate::registry::Registry::initialize` walks it to decide
//! what's actually usable in this process.

use crate::error::{not_supported, NegotiationError};
use crate::msgs::enums::{AuthMethod, CipherSuite, HashAlgorithm, KeyExchangeAlgorithm, ProtocolVersion};
use crate::record::{self, RecordAlgorithm};

/// A cipher suite supported by this registry.
///
/// All possible instances are provided by the library in `ALL_CIPHERSUITES`,
/// kept sorted ascending by `suite.get_u16()` so `find_by_iana` can binary
/// search it. `key_exchange` is `None` exactly for suites whose
/// `min_tls_version` is TLS 1.3 or later, which negotiate key exchange out
/// of band.
#[derive(Debug)]
pub struct SupportedCipherSuite {
  /// Diagnostic only: never compared against the wire.
  pub name: &'static str,
  pub suite: CipherSuite,
  pub key_exchange: Option<KeyExchangeAlgorithm>,
  pub auth_method: AuthMethod,
  pub prf_hash: HashAlgorithm,
  pub min_tls_version: ProtocolVersion,
  /// Ordered most-preferred-first; `Registry::initialize` selects the first
  /// whose cipher is reported available.
  pub record_alg_candidates: &'static [RecordAlgorithm],
  /// Used only when the negotiated protocol is SSLv3; `None` if this suite
  /// has no distinct SSLv3 record layout.
  pub sslv3_record_alg: Option<RecordAlgorithm>,
}

impl PartialEq for SupportedCipherSuite {
  fn eq(&self, other: &SupportedCipherSuite) -> bool {
    self.suite == other.suite
  }
}

impl SupportedCipherSuite {
  /// True for any ECDHE suite (classical or hybrid) and for every TLS 1.3
  /// suite, which always requires `supported_groups`/`key_share`.
  pub fn requires_ecc_extension(&self) -> bool {
    if self.min_tls_version >= ProtocolVersion::TLSv1_3 {
      return true;
    }
    matches!(
      self.key_exchange,
      Some(KeyExchangeAlgorithm::ECDHE) | Some(KeyExchangeAlgorithm::ECDHE_KYBER_HYBRID)
    )
  }

  /// True when this suite's key exchange embeds a KEM component and is
  /// therefore gated by `PqPolicy`.
  pub fn requires_pq_extension(&self) -> bool {
    self
      .key_exchange
      .map(KeyExchangeAlgorithm::includes_kem)
      .unwrap_or(false)
  }
}

macro_rules! suite(
  ($name:ident, $human:expr, $suite:expr, $kx:expr, $auth:expr, $hash:expr, $min_vers:expr,
   $candidates:expr $(, sslv3: $sslv3:expr)?) => (
    pub static $name: SupportedCipherSuite = SupportedCipherSuite {
      name: $human,
      suite: $suite,
      key_exchange: $kx,
      auth_method: $auth,
      prf_hash: $hash,
      min_tls_version: $min_vers,
      record_alg_candidates: $candidates,
      sslv3_record_alg: suite!(@sslv3 $($sslv3)?),
    };
  );
  (@sslv3) => (None);
  (@sslv3 $sslv3:expr) => (Some($sslv3));
);

// --- TLS 1.3 --------------------------------------------------------------
// No key exchange, no SSLv3 shadow (SSLv3 predates these suites entirely).

suite!(
  TLS13_AES_128_GCM_SHA256,
  "TLS13_AES_128_GCM_SHA256",
  CipherSuite::TLS13_AES_128_GCM_SHA256,
  None,
  AuthMethod::Any,
  HashAlgorithm::SHA256,
  ProtocolVersion::TLSv1_3,
  &[record::RECORD_ALG_TLS13_AES128_GCM]
);

suite!(
  TLS13_AES_256_GCM_SHA384,
  "TLS13_AES_256_GCM_SHA384",
  CipherSuite::TLS13_AES_256_GCM_SHA384,
  None,
  AuthMethod::Any,
  HashAlgorithm::SHA384,
  ProtocolVersion::TLSv1_3,
  &[record::RECORD_ALG_TLS13_AES256_GCM]
);

suite!(
  TLS13_CHACHA20_POLY1305_SHA256,
  "TLS13_CHACHA20_POLY1305_SHA256",
  CipherSuite::TLS13_CHACHA20_POLY1305_SHA256,
  None,
  AuthMethod::Any,
  HashAlgorithm::SHA256,
  ProtocolVersion::TLSv1_3,
  &[record::RECORD_ALG_TLS13_CHACHA20_POLY1305]
);

// --- TLS 1.2 ECDHE AEAD ----------------------------------------------------

suite!(
  TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256,
  "ECDHE-ECDSA-AES128-GCM-SHA256",
  CipherSuite::TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256,
  Some(KeyExchangeAlgorithm::ECDHE),
  AuthMethod::ECDSA,
  HashAlgorithm::SHA256,
  ProtocolVersion::TLSv1_2,
  &[record::RECORD_ALG_AES128_GCM]
);

suite!(
  TLS_ECDHE_ECDSA_WITH_AES_256_GCM_SHA384,
  "ECDHE-ECDSA-AES256-GCM-SHA384",
  CipherSuite::TLS_ECDHE_ECDSA_WITH_AES_256_GCM_SHA384,
  Some(KeyExchangeAlgorithm::ECDHE),
  AuthMethod::ECDSA,
  HashAlgorithm::SHA384,
  ProtocolVersion::TLSv1_2,
  &[record::RECORD_ALG_AES256_GCM]
);

suite!(
  TLS_ECDHE_ECDSA_WITH_CHACHA20_POLY1305_SHA256,
  "ECDHE-ECDSA-CHACHA20-POLY1305-SHA256",
  CipherSuite::TLS_ECDHE_ECDSA_WITH_CHACHA20_POLY1305_SHA256,
  Some(KeyExchangeAlgorithm::ECDHE),
  AuthMethod::ECDSA,
  HashAlgorithm::SHA256,
  ProtocolVersion::TLSv1_2,
  &[record::RECORD_ALG_CHACHA20_POLY1305]
);

suite!(
  TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256,
  "ECDHE-RSA-AES128-GCM-SHA256",
  CipherSuite::TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256,
  Some(KeyExchangeAlgorithm::ECDHE),
  AuthMethod::RSA,
  HashAlgorithm::SHA256,
  ProtocolVersion::TLSv1_2,
  &[record::RECORD_ALG_AES128_GCM]
);

suite!(
  TLS_ECDHE_RSA_WITH_AES_256_GCM_SHA384,
  "ECDHE-RSA-AES256-GCM-SHA384",
  CipherSuite::TLS_ECDHE_RSA_WITH_AES_256_GCM_SHA384,
  Some(KeyExchangeAlgorithm::ECDHE),
  AuthMethod::RSA,
  HashAlgorithm::SHA384,
  ProtocolVersion::TLSv1_2,
  &[record::RECORD_ALG_AES256_GCM]
);

suite!(
  TLS_ECDHE_RSA_WITH_CHACHA20_POLY1305_SHA256,
  "ECDHE-RSA-CHACHA20-POLY1305-SHA256",
  CipherSuite::TLS_ECDHE_RSA_WITH_CHACHA20_POLY1305_SHA256,
  Some(KeyExchangeAlgorithm::ECDHE),
  AuthMethod::RSA,
  HashAlgorithm::SHA256,
  ProtocolVersion::TLSv1_2,
  &[record::RECORD_ALG_CHACHA20_POLY1305]
);

// --- TLS 1.2 ECDHE CBC (legacy; carry an SSLv3 shadow) --------------------
// The composite (hardware-accelerated) record algorithm is tried first,
// ahead of the plain cipher-plus-HMAC fallback.

suite!(
  TLS_ECDHE_ECDSA_WITH_AES_128_CBC_SHA,
  "ECDHE-ECDSA-AES128-SHA",
  CipherSuite::TLS_ECDHE_ECDSA_WITH_AES_128_CBC_SHA,
  Some(KeyExchangeAlgorithm::ECDHE),
  AuthMethod::ECDSA,
  HashAlgorithm::SHA1,
  ProtocolVersion::TLSv1_0,
  &[record::RECORD_ALG_AES128_SHA_COMPOSITE, record::RECORD_ALG_AES128_SHA],
  sslv3: record::RECORD_ALG_AES128_SSLV3_SHA
);

suite!(
  TLS_ECDHE_RSA_WITH_AES_128_CBC_SHA,
  "ECDHE-RSA-AES128-SHA",
  CipherSuite::TLS_ECDHE_RSA_WITH_AES_128_CBC_SHA,
  Some(KeyExchangeAlgorithm::ECDHE),
  AuthMethod::RSA,
  HashAlgorithm::SHA1,
  ProtocolVersion::TLSv1_0,
  &[record::RECORD_ALG_AES128_SHA_COMPOSITE, record::RECORD_ALG_AES128_SHA],
  sslv3: record::RECORD_ALG_AES128_SSLV3_SHA
);

suite!(
  TLS_ECDHE_RSA_WITH_AES_256_CBC_SHA,
  "ECDHE-RSA-AES256-SHA",
  CipherSuite::TLS_ECDHE_RSA_WITH_AES_256_CBC_SHA,
  Some(KeyExchangeAlgorithm::ECDHE),
  AuthMethod::RSA,
  HashAlgorithm::SHA1,
  ProtocolVersion::TLSv1_0,
  &[record::RECORD_ALG_AES256_SHA_COMPOSITE, record::RECORD_ALG_AES256_SHA],
  sslv3: record::RECORD_ALG_AES256_SSLV3_SHA
);

// --- TLS 1.0 RSA legacy (RC4, 3DES, AES-CBC) -------------------------------
// `prf_hash` is pinned to SHA256 for PSK-compatibility purposes even though
// the record MAC itself is SHA1/MD5: the PRF/PSK hash is independent of
// the record HMAC.

suite!(
  TLS_RSA_WITH_RC4_128_SHA,
  "RC4-SHA",
  CipherSuite::TLS_RSA_WITH_RC4_128_SHA,
  Some(KeyExchangeAlgorithm::RSA),
  AuthMethod::RSA,
  HashAlgorithm::SHA256,
  ProtocolVersion::SSLv3,
  &[record::RECORD_ALG_RC4_SHA],
  sslv3: record::RECORD_ALG_RC4_SSLV3_SHA
);

suite!(
  TLS_RSA_WITH_3DES_EDE_CBC_SHA,
  "DES-CBC3-SHA",
  CipherSuite::TLS_RSA_WITH_3DES_EDE_CBC_SHA,
  Some(KeyExchangeAlgorithm::RSA),
  AuthMethod::RSA,
  HashAlgorithm::SHA256,
  ProtocolVersion::SSLv3,
  &[record::RECORD_ALG_3DES_SHA],
  sslv3: record::RECORD_ALG_3DES_SSLV3_SHA
);

suite!(
  TLS_RSA_WITH_AES_128_CBC_SHA,
  "AES128-SHA",
  CipherSuite::TLS_RSA_WITH_AES_128_CBC_SHA,
  Some(KeyExchangeAlgorithm::RSA),
  AuthMethod::RSA,
  HashAlgorithm::SHA256,
  ProtocolVersion::SSLv3,
  &[record::RECORD_ALG_AES128_SHA_COMPOSITE, record::RECORD_ALG_AES128_SHA],
  sslv3: record::RECORD_ALG_AES128_SSLV3_SHA
);

// --- Hybrid post-quantum key exchange --------------------------------------
// draft-campagna-tls-bike-sike-hybrid numbering. Disabled whenever
// `PqPolicy::is_enabled()` reports false (see `crate::registry`).

suite!(
  TLS_ECDHE_KYBER_RSA_WITH_AES_256_GCM_SHA384,
  "ECDHE-KYBER-RSA-AES256-GCM-SHA384",
  CipherSuite::TLS_ECDHE_KYBER_RSA_WITH_AES_256_GCM_SHA384,
  Some(KeyExchangeAlgorithm::ECDHE_KYBER_HYBRID),
  AuthMethod::RSA,
  HashAlgorithm::SHA384,
  ProtocolVersion::TLSv1_2,
  &[record::RECORD_ALG_AES256_GCM]
);

/// Every cipher suite this catalog describes, sorted strictly ascending by
/// `suite.get_u16()`. `find_by_iana` depends on this ordering; a test below
/// checks it holds.
pub static ALL_CIPHERSUITES: &[&SupportedCipherSuite] = &[
  &TLS_RSA_WITH_RC4_128_SHA,                           // 0x0005
  &TLS_RSA_WITH_3DES_EDE_CBC_SHA,                      // 0x000a
  &TLS_RSA_WITH_AES_128_CBC_SHA,                       // 0x002f
  &TLS13_AES_128_GCM_SHA256,                             // 0x1301
  &TLS13_AES_256_GCM_SHA384,                             // 0x1302
  &TLS13_CHACHA20_POLY1305_SHA256,                       // 0x1303
  &TLS_ECDHE_ECDSA_WITH_AES_128_CBC_SHA,                // 0xc009
  &TLS_ECDHE_RSA_WITH_AES_128_CBC_SHA,                  // 0xc013
  &TLS_ECDHE_RSA_WITH_AES_256_CBC_SHA,                  // 0xc014
  &TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256,             // 0xc02b
  &TLS_ECDHE_ECDSA_WITH_AES_256_GCM_SHA384,             // 0xc02c
  &TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256,                // 0xc02f
  &TLS_ECDHE_RSA_WITH_AES_256_GCM_SHA384,                // 0xc030
  &TLS_ECDHE_RSA_WITH_CHACHA20_POLY1305_SHA256,          // 0xcca8
  &TLS_ECDHE_ECDSA_WITH_CHACHA20_POLY1305_SHA256,        // 0xcca9
  &TLS_ECDHE_KYBER_RSA_WITH_AES_256_GCM_SHA384,          // 0xff0c
];

/// Binary search over `ALL_CIPHERSUITES` by IANA code. The catalog's sort
/// order is an invariant checked by the test suite, not at runtime.
pub fn find_by_iana(code: CipherSuite) -> Result<&'static SupportedCipherSuite, NegotiationError> {
  let wire = code.get_u16();
  ALL_CIPHERSUITES
    .binary_search_by_key(&wire, |s| s.suite.get_u16())
    .map(|idx| ALL_CIPHERSUITES[idx])
    .map_err(|_| not_supported(format!("no cipher suite with IANA code {:#06x}", wire)))
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn catalog_is_sorted_ascending_by_iana_code() {
    let mut codes: Vec<u16> = ALL_CIPHERSUITES.iter().map(|s| s.suite.get_u16()).collect();
    let sorted = {
      let mut c = codes.clone();
      c.sort_unstable();
      c
    };
    assert_eq!(codes, sorted, "ALL_CIPHERSUITES must be sorted ascending");
    codes.dedup();
    assert_eq!(codes.len(), ALL_CIPHERSUITES.len(), "IANA codes must be unique");
  }

  #[test]
  fn find_by_iana_is_bijective_on_catalog_codes() {
    for suite in ALL_CIPHERSUITES {
      let found = find_by_iana(suite.suite).expect("catalog entry must resolve");
      assert_eq!(found.suite, suite.suite);
    }
  }

  #[test]
  fn find_by_iana_rejects_unknown_code() {
    assert!(find_by_iana(CipherSuite::TLS_FALLBACK_SCSV).is_err());
  }

  #[test]
  fn tls13_barrier_matches_key_exchange_presence() {
    for suite in ALL_CIPHERSUITES {
      let is_13 = suite.min_tls_version >= ProtocolVersion::TLSv1_3;
      assert_eq!(is_13, suite.key_exchange.is_none(), "{}", suite.name);
    }
  }

  #[test]
  fn requires_ecc_extension_covers_ecdhe_and_tls13() {
    assert!(TLS13_AES_128_GCM_SHA256.requires_ecc_extension());
    assert!(TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256.requires_ecc_extension());
    assert!(!TLS_RSA_WITH_AES_128_CBC_SHA.requires_ecc_extension());
  }

  #[test]
  fn requires_pq_extension_only_for_hybrid_kex() {
    assert!(TLS_ECDHE_KYBER_RSA_WITH_AES_256_GCM_SHA384.requires_pq_extension());
    assert!(!TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256.requires_pq_extension());
  }
}
