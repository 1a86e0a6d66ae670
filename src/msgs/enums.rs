/// TLS protocol versions, ordered so `<`/`>=` comparisons match the
/// wire-format ordering (SSLv2 oldest, TLS1.3 newest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(non_camel_case_types)]
pub enum ProtocolVersion {
  SSLv2,
  SSLv3,
  TLSv1_0,
  TLSv1_1,
  TLSv1_2,
  TLSv1_3,
}

impl ProtocolVersion {
  pub fn get_u16(&self) -> u16 {
    match *self {
      ProtocolVersion::SSLv2 => 0x0200,
      ProtocolVersion::SSLv3 => 0x0300,
      ProtocolVersion::TLSv1_0 => 0x0301,
      ProtocolVersion::TLSv1_1 => 0x0302,
      ProtocolVersion::TLSv1_2 => 0x0303,
      ProtocolVersion::TLSv1_3 => 0x0304,
    }
  }
}

/// Key exchange method named by a cipher suite. `BulkOnly` is used by all
/// TLS 1.3 suites, which negotiate key exchange out-of-band via
/// `key_share`/`supported_groups` rather than the suite itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(non_camel_case_types)]
pub enum KeyExchangeAlgorithm {
  RSA,
  DHE,
  ECDHE,
  /// Hybrid classical/post-quantum key exchange: an ECDHE share combined
  /// with a KEM encapsulation, both required to agree.
  ECDHE_KYBER_HYBRID,
  BulkOnly,
}

impl KeyExchangeAlgorithm {
  /// True for key exchange methods that embed a KEM component and are
  /// therefore gated by the post-quantum policy collaborator.
  pub fn includes_kem(&self) -> bool {
    matches!(self, KeyExchangeAlgorithm::ECDHE_KYBER_HYBRID)
  }

  /// True for key exchange methods that need an explicit `supported_groups`
  /// / `key_share` extension from the peer.
  pub fn requires_ecc_extension(&self) -> bool {
    matches!(
      self,
      KeyExchangeAlgorithm::ECDHE | KeyExchangeAlgorithm::ECDHE_KYBER_HYBRID
    )
  }
}

/// Authentication method required of the certificate a suite is paired
/// with. `Any` is used by TLS 1.3 suites, whose authentication is
/// negotiated separately via `signature_algorithms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthMethod {
  RSA,
  ECDSA,
  Any,
}

/// The hash bound to a suite's PRF (pre-1.3) or transcript/HKDF (1.3).
/// Also the hash a PSK must share with a suite for resumption to be legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(non_camel_case_types)]
pub enum HashAlgorithm {
  MD5,
  SHA1,
  SHA256,
  SHA384,
  SHA512,
}

/// IANA-assigned two-byte cipher suite identifiers. Non-exhaustive of the
/// full IANA registry by design: only suites this catalog actually
/// describes are named here, plus the two SCSV pseudo-suites consumed
/// during server-side selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(non_camel_case_types)]
pub enum CipherSuite {
  // Signaling values: never selectable, only ever matched against the
  // client's wire list.
  TLS_FALLBACK_SCSV,
  TLS_EMPTY_RENEGOTIATION_INFO_SCSV,

  // TLS 1.3
  TLS13_AES_128_GCM_SHA256,
  TLS13_AES_256_GCM_SHA384,
  TLS13_CHACHA20_POLY1305_SHA256,

  // TLS 1.2 ECDHE AEAD
  TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256,
  TLS_ECDHE_ECDSA_WITH_AES_256_GCM_SHA384,
  TLS_ECDHE_ECDSA_WITH_CHACHA20_POLY1305_SHA256,
  TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256,
  TLS_ECDHE_RSA_WITH_AES_256_GCM_SHA384,
  TLS_ECDHE_RSA_WITH_CHACHA20_POLY1305_SHA256,

  // TLS 1.2 ECDHE CBC (legacy, carry an SSLv3 shadow record algorithm)
  TLS_ECDHE_RSA_WITH_AES_128_CBC_SHA,
  TLS_ECDHE_RSA_WITH_AES_256_CBC_SHA,
  TLS_ECDHE_ECDSA_WITH_AES_128_CBC_SHA,

  // TLS 1.0 RSA legacy (RC4, 3DES), each with a distinct SSLv3 record algorithm
  TLS_RSA_WITH_RC4_128_SHA,
  TLS_RSA_WITH_3DES_EDE_CBC_SHA,
  TLS_RSA_WITH_AES_128_CBC_SHA,

  // Hybrid post-quantum key exchange (draft-campagna-tls-bike-sike-hybrid numbering)
  TLS_ECDHE_KYBER_RSA_WITH_AES_256_GCM_SHA384,
}

impl CipherSuite {
  pub fn get_u16(&self) -> u16 {
    match *self {
      CipherSuite::TLS_EMPTY_RENEGOTIATION_INFO_SCSV => 0x00ff,
      CipherSuite::TLS_RSA_WITH_RC4_128_SHA => 0x0005,
      CipherSuite::TLS_RSA_WITH_3DES_EDE_CBC_SHA => 0x000a,
      CipherSuite::TLS_RSA_WITH_AES_128_CBC_SHA => 0x002f,
      CipherSuite::TLS_ECDHE_ECDSA_WITH_AES_128_CBC_SHA => 0xc009,
      CipherSuite::TLS_ECDHE_RSA_WITH_AES_128_CBC_SHA => 0xc013,
      CipherSuite::TLS_ECDHE_RSA_WITH_AES_256_CBC_SHA => 0xc014,
      CipherSuite::TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256 => 0xc02b,
      CipherSuite::TLS_ECDHE_ECDSA_WITH_AES_256_GCM_SHA384 => 0xc02c,
      CipherSuite::TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256 => 0xc02f,
      CipherSuite::TLS_ECDHE_RSA_WITH_AES_256_GCM_SHA384 => 0xc030,
      CipherSuite::TLS_FALLBACK_SCSV => 0x5600,
      CipherSuite::TLS_ECDHE_RSA_WITH_CHACHA20_POLY1305_SHA256 => 0xcca8,
      CipherSuite::TLS_ECDHE_ECDSA_WITH_CHACHA20_POLY1305_SHA256 => 0xcca9,
      CipherSuite::TLS_ECDHE_KYBER_RSA_WITH_AES_256_GCM_SHA384 => 0xff0c,
      CipherSuite::TLS13_AES_128_GCM_SHA256 => 0x1301,
      CipherSuite::TLS13_AES_256_GCM_SHA384 => 0x1302,
      CipherSuite::TLS13_CHACHA20_POLY1305_SHA256 => 0x1303,
    }
  }

  pub fn from_u16(code: u16) -> Option<CipherSuite> {
    ALL_WIRE_CODES
      .iter()
      .find(|(_, c)| *c == code)
      .map(|(suite, _)| *suite)
  }
}

/// Every `CipherSuite` paired with its wire code, used by `from_u16` and by
/// the stride-aware wire scanning helpers in `negotiate`. Not required to
/// be sorted; `suites::ALL_CIPHERSUITES` is the sorted catalog used by
/// `find_by_iana`'s binary search.
static ALL_WIRE_CODES: &[(CipherSuite, u16)] = &[
  (CipherSuite::TLS_EMPTY_RENEGOTIATION_INFO_SCSV, 0x00ff),
  (CipherSuite::TLS_FALLBACK_SCSV, 0x5600),
  (CipherSuite::TLS_RSA_WITH_RC4_128_SHA, 0x0005),
  (CipherSuite::TLS_RSA_WITH_3DES_EDE_CBC_SHA, 0x000a),
  (CipherSuite::TLS_RSA_WITH_AES_128_CBC_SHA, 0x002f),
  (CipherSuite::TLS_ECDHE_ECDSA_WITH_AES_128_CBC_SHA, 0xc009),
  (CipherSuite::TLS_ECDHE_RSA_WITH_AES_128_CBC_SHA, 0xc013),
  (CipherSuite::TLS_ECDHE_RSA_WITH_AES_256_CBC_SHA, 0xc014),
  (CipherSuite::TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256, 0xc02b),
  (CipherSuite::TLS_ECDHE_ECDSA_WITH_AES_256_GCM_SHA384, 0xc02c),
  (CipherSuite::TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256, 0xc02f),
  (CipherSuite::TLS_ECDHE_RSA_WITH_AES_256_GCM_SHA384, 0xc030),
  (
    CipherSuite::TLS_ECDHE_RSA_WITH_CHACHA20_POLY1305_SHA256,
    0xcca8,
  ),
  (
    CipherSuite::TLS_ECDHE_ECDSA_WITH_CHACHA20_POLY1305_SHA256,
    0xcca9,
  ),
  (
    CipherSuite::TLS_ECDHE_KYBER_RSA_WITH_AES_256_GCM_SHA384,
    0xff0c,
  ),
  (CipherSuite::TLS13_AES_128_GCM_SHA256, 0x1301),
  (CipherSuite::TLS13_AES_256_GCM_SHA384, 0x1302),
  (CipherSuite::TLS13_CHACHA20_POLY1305_SHA256, 0x1303),
];

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn wire_codes_round_trip() {
    for (suite, code) in ALL_WIRE_CODES {
      assert_eq!(suite.get_u16(), *code);
      assert_eq!(CipherSuite::from_u16(*code), Some(*suite));
    }
  }

  #[test]
  fn unknown_code_is_none() {
    assert_eq!(CipherSuite::from_u16(0x9999), None);
  }

  #[test]
  fn protocol_version_ordering() {
    assert!(ProtocolVersion::TLSv1_2 < ProtocolVersion::TLSv1_3);
    assert!(ProtocolVersion::SSLv3 < ProtocolVersion::TLSv1_0);
  }
}
