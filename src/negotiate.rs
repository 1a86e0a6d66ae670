//! The negotiator: `confirm_server_choice` (client side) and `select`
//! (server side), plus the `validate_candidate` predicate `select`'s
//! candidate walk uses. `confirm_server_choice` needs a narrower set of
//! checks -- offered, available, PSK hash, HRR pinning -- and performs
//! them directly rather than going through `validate_candidate`.

use crate::collaborators::{AuthSelector, ConnectionState, KeyExchangePolicy};
use crate::error::{illegal_parameter, not_supported, NegotiationError};
use crate::msgs::enums::{CipherSuite, ProtocolVersion};
use crate::preferences::{PreferenceEntry, PreferenceList};
use crate::registry::{Registry, RegistryEntry};

/// A borrowed view over a ClientHello's cipher-suite bytes. `stride` is 3
/// for SSLv2-compatible ClientHello records (whose entries are 3 bytes,
/// with a leading zero byte for TLS codes) and 2 for every other
/// ClientHello; only the trailing 2 bytes of each entry are ever compared.
#[derive(Debug, Clone, Copy)]
pub struct WireList<'a> {
  data: &'a [u8],
  stride: usize,
}

impl<'a> WireList<'a> {
  pub fn new(data: &'a [u8], stride: usize) -> WireList<'a> {
    assert!(stride == 2 || stride == 3, "cipher suite entries are 2 or 3 bytes wide");
    WireList { data, stride }
  }

  pub fn len(&self) -> usize {
    self.data.len() / self.stride
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  fn code_at(&self, index: usize) -> u16 {
    let start = index * self.stride + (self.stride - 2);
    u16::from_be_bytes([self.data[start], self.data[start + 1]])
  }

  /// First index whose trailing 2 bytes equal `code`, if any.
  pub fn first_index_of(&self, code: u16) -> Option<usize> {
    (0..self.len()).find(|&i| self.code_at(i) == code)
  }

  pub fn contains_code(&self, code: u16) -> bool {
    self.first_index_of(code).is_some()
  }
}

/// Whether `entry`'s suite may be used on `conn`, independent of whether
/// the peer actually offered it. Shared by `select`'s candidate walk.
/// Side-effect free: `KeyExchangePolicy::configure` is deliberately not
/// called here (see `crate::collaborators::KeyExchangePolicy`) -- it is
/// the caller's job to invoke `configure` exactly once, after final
/// selection.
pub fn validate_candidate(
  conn: &ConnectionState,
  entry: &RegistryEntry,
  kex: &dyn KeyExchangePolicy,
  auth: &dyn AuthSelector,
) -> bool {
  let suite = entry.resolved.suite;
  let conn_is_13 = conn.protocol_version >= ProtocolVersion::TLSv1_3;
  let suite_is_13 = suite.min_tls_version >= ProtocolVersion::TLSv1_3;
  if conn_is_13 != suite_is_13 {
    return false;
  }

  if !entry.resolved.available {
    return false;
  }

  if !auth.cipher_valid_for_certs(conn, suite.suite) {
    return false;
  }

  if !suite_is_13 && !kex.supported(conn, suite.suite) {
    return false;
  }

  if let Some(psk_hash) = conn.chosen_psk_hash {
    if psk_hash != suite.prf_hash {
      return false;
    }
  }

  true
}

/// Client-side confirmation (§4.5): verify that the single suite the
/// server chose is one this connection's security policy actually
/// offered, and that it is still legal to use. Returns the registry entry
/// so the caller can commit `entry.resolved_for_version(conn.protocol_version)`
/// into its own connection state -- this crate has no connection object of
/// its own to write into.
pub fn confirm_server_choice<'a>(
  conn: &ConnectionState,
  registry: &'a Registry,
  client_prefs: &PreferenceList,
  wire_code: u16,
) -> Result<&'a RegistryEntry, NegotiationError> {
  let suite_enum = CipherSuite::from_u16(wire_code)
    .filter(|s| client_prefs.contains(*s))
    .ok_or_else(|| {
      illegal_parameter(format!(
        "server chose cipher suite {:#06x} which we did not offer",
        wire_code
      ))
    })?;

  let entry = registry
    .find(suite_enum)
    .ok_or_else(|| not_supported(format!("{:?} is not in this registry", suite_enum)))?;

  if !entry.resolved.available {
    return Err(not_supported(format!("{:?} is no longer available", suite_enum)));
  }

  if let Some(psk_hash) = conn.chosen_psk_hash {
    if psk_hash != entry.resolved.suite.prf_hash {
      return Err(not_supported(format!(
        "{:?} is incompatible with the chosen PSK's hash",
        suite_enum
      )));
    }
  }

  if let Some(pinned) = conn.hrr_pinned_suite {
    if pinned != suite_enum {
      return Err(illegal_parameter(
        "ServerHello cipher suite disagrees with the suite pinned at HelloRetryRequest",
      ));
    }
  }

  Ok(entry)
}

fn entry_for_preference<'a>(
  registry: &'a Registry,
  entries: &[PreferenceEntry],
  index: usize,
) -> Option<&'a RegistryEntry> {
  match entries[index] {
    PreferenceEntry::Suite(suite) => registry.find(suite.suite),
    _ => None,
  }
}

/// Server-side selection (§4.6): walk `server_prefs` against the client's
/// wire list, honoring equal-preference groups, and return the winning
/// registry entry. `wire` is the full cipher-suite byte range from the
/// ClientHello (or its SSLv2-compatible equivalent); `conn` is mutated for
/// the SCSV side effects (`closed`, `secure_renegotiation`) regardless of
/// whether a suite is ultimately selected.
pub fn select<'a>(
  conn: &mut ConnectionState,
  registry: &'a Registry,
  server_prefs: &PreferenceList,
  wire: WireList,
  kex: &dyn KeyExchangePolicy,
  auth: &dyn AuthSelector,
) -> Result<&'a RegistryEntry, NegotiationError> {
  // RFC 7507: a client signals TLS_FALLBACK_SCSV only when it previously
  // failed to negotiate a higher version. Seeing it while we're actually
  // capable of more than the client is proposing means someone is forcing
  // a downgrade.
  if conn.protocol_version < conn.server_max_supported_version
    && wire.contains_code(CipherSuite::TLS_FALLBACK_SCSV.get_u16())
  {
    conn.closed = true;
    return Err(NegotiationError::FallbackDetected);
  }

  // RFC 5746 §3.6.
  if wire.contains_code(CipherSuite::TLS_EMPTY_RENEGOTIATION_INFO_SCSV.get_u16()) {
    conn.secure_renegotiation = true;
  }

  let entries = server_prefs.entries();
  let mut in_group = false;
  let mut best_server_idx: Option<usize> = None;
  let mut best_client_idx: usize = wire.len(); // "beyond the list": any real index beats this
  let mut higher_version_idx: Option<usize> = None;

  for (i, pref) in entries.iter().enumerate() {
    match pref {
      PreferenceEntry::GroupStart => {
        in_group = true;
      }
      PreferenceEntry::GroupEnd => {
        in_group = false;
        if let Some(idx) = best_server_idx {
          return entry_for_preference(registry, entries, idx)
            .ok_or_else(|| not_supported("group winner vanished from registry"));
        }
      }
      PreferenceEntry::Suite(suite) => {
        let client_idx = match wire.first_index_of(suite.suite.get_u16()) {
          Some(j) => j,
          None => continue,
        };

        let reg_entry = match registry.find(suite.suite) {
          Some(e) => e,
          None => continue,
        };

        if !validate_candidate(conn, reg_entry, kex, auth) {
          continue;
        }

        if conn.protocol_version < suite.min_tls_version {
          if higher_version_idx.is_none() {
            higher_version_idx = Some(i);
          }
          continue;
        }

        if in_group {
          if client_idx < best_client_idx {
            best_client_idx = client_idx;
            best_server_idx = Some(i);
          }
          // Never break: the rest of the group must still be scanned.
        } else {
          return Ok(reg_entry);
        }
      }
    }
  }

  if let Some(idx) = best_server_idx {
    return entry_for_preference(registry, entries, idx)
      .ok_or_else(|| not_supported("selected suite vanished from registry"));
  }

  if let Some(idx) = higher_version_idx {
    return entry_for_preference(registry, entries, idx)
      .ok_or_else(|| not_supported("fallback suite vanished from registry"));
  }

  Err(not_supported("no cipher suite offered by the client is usable on this connection"))
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::msgs::enums::HashAlgorithm;
  use crate::preferences;
  use crate::record::BulkCipher;
  use crate::registry::Registry;

  struct AllAvailable;
  impl crate::collaborators::CipherAvailability for AllAvailable {
    fn is_available(&self, _cipher: BulkCipher) -> bool {
      true
    }
  }
  struct PqOn;
  impl crate::collaborators::PqPolicy for PqOn {
    fn is_enabled(&self) -> bool {
      true
    }
  }
  struct AlwaysOk;
  impl KeyExchangePolicy for AlwaysOk {
    fn supported(&self, _conn: &ConnectionState, _suite: CipherSuite) -> bool {
      true
    }
    fn configure(
      &self,
      _conn: &mut ConnectionState,
      _suite: CipherSuite,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
      Ok(())
    }
  }
  struct AnyCert;
  impl AuthSelector for AnyCert {
    fn cipher_valid_for_certs(&self, _conn: &ConnectionState, _suite: CipherSuite) -> bool {
      true
    }
  }
  struct RsaOnlyCert;
  impl AuthSelector for RsaOnlyCert {
    fn cipher_valid_for_certs(&self, _conn: &ConnectionState, suite: CipherSuite) -> bool {
      use crate::suites;
      suites::find_by_iana(suite)
        .map(|s| s.auth_method == crate::msgs::enums::AuthMethod::RSA || s.auth_method == crate::msgs::enums::AuthMethod::Any)
        .unwrap_or(false)
    }
  }

  fn registry() -> Registry {
    Registry::builder().initialize(&AllAvailable, &PqOn).unwrap()
  }

  fn wire_bytes(codes: &[u16]) -> Vec<u8> {
    codes.iter().flat_map(|c| c.to_be_bytes()).collect()
  }

  // S1: server order wins outside a group.
  #[test]
  fn s1_server_preference_wins_with_no_group() {
    let reg = registry();
    let prefs = preferences::PreferenceList::flat(&[
      crate::suites::find_by_iana(CipherSuite::TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256).unwrap(),
      crate::suites::find_by_iana(CipherSuite::TLS_ECDHE_RSA_WITH_AES_256_GCM_SHA384).unwrap(),
    ]);
    let wire = wire_bytes(&[
      CipherSuite::TLS_ECDHE_RSA_WITH_AES_256_GCM_SHA384.get_u16(),
      CipherSuite::TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256.get_u16(),
    ]);
    let mut conn = ConnectionState::new(ProtocolVersion::TLSv1_2);
    conn.server_max_supported_version = ProtocolVersion::TLSv1_2;
    let chosen = select(
      &mut conn,
      &reg,
      &prefs,
      WireList::new(&wire, 2),
      &AlwaysOk,
      &RsaOnlyCert,
    )
    .unwrap();
    assert_eq!(chosen.resolved.suite.suite, CipherSuite::TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256);
  }

  // S2: client order wins inside a group.
  #[test]
  fn s2_client_preference_wins_inside_group() {
    let reg = registry();
    let prefs = preferences::PreferenceList::new(vec![
      PreferenceEntry::GroupStart,
      PreferenceEntry::Suite(crate::suites::find_by_iana(CipherSuite::TLS13_AES_128_GCM_SHA256).unwrap()),
      PreferenceEntry::Suite(crate::suites::find_by_iana(CipherSuite::TLS13_AES_256_GCM_SHA384).unwrap()),
      PreferenceEntry::Suite(crate::suites::find_by_iana(CipherSuite::TLS13_CHACHA20_POLY1305_SHA256).unwrap()),
      PreferenceEntry::GroupEnd,
    ])
    .unwrap();
    let wire = wire_bytes(&[
      CipherSuite::TLS13_CHACHA20_POLY1305_SHA256.get_u16(),
      CipherSuite::TLS13_AES_256_GCM_SHA384.get_u16(),
      CipherSuite::TLS13_AES_128_GCM_SHA256.get_u16(),
    ]);
    let mut conn = ConnectionState::new(ProtocolVersion::TLSv1_3);
    conn.server_max_supported_version = ProtocolVersion::TLSv1_3;
    let chosen = select(&mut conn, &reg, &prefs, WireList::new(&wire, 2), &AlwaysOk, &AnyCert).unwrap();
    assert_eq!(chosen.resolved.suite.suite, CipherSuite::TLS13_CHACHA20_POLY1305_SHA256);
  }

  // S3: fallback SCSV while client negotiated below our max closes the connection.
  #[test]
  fn s3_fallback_scsv_detected() {
    let reg = registry();
    let prefs = preferences::all();
    let wire = wire_bytes(&[CipherSuite::TLS_FALLBACK_SCSV.get_u16()]);
    let mut conn = ConnectionState::new(ProtocolVersion::TLSv1_1);
    conn.server_max_supported_version = ProtocolVersion::TLSv1_3;
    let result = select(&mut conn, &reg, &prefs, WireList::new(&wire, 2), &AlwaysOk, &AnyCert);
    assert!(matches!(result, Err(NegotiationError::FallbackDetected)));
    assert!(conn.closed);
  }

  // S4: empty-renegotiation SCSV sets the flag even on overall failure.
  #[test]
  fn s4_empty_renegotiation_scsv_sets_flag_on_failure() {
    let reg = registry();
    let prefs = preferences::all();
    let wire = wire_bytes(&[CipherSuite::TLS_EMPTY_RENEGOTIATION_INFO_SCSV.get_u16()]);
    let mut conn = ConnectionState::new(ProtocolVersion::TLSv1_2);
    conn.server_max_supported_version = ProtocolVersion::TLSv1_2;
    let result = select(&mut conn, &reg, &prefs, WireList::new(&wire, 2), &AlwaysOk, &AnyCert);
    assert!(matches!(result, Err(NegotiationError::CipherNotSupported(_))));
    assert!(conn.secure_renegotiation);
  }

  // S5: the TLS1.3 barrier rejects a cross-era match outright; the
  // higher-version fallback must not rescue it.
  #[test]
  fn s5_tls13_barrier_is_not_rescued_by_version_fallback() {
    let reg = registry();
    let prefs = preferences::PreferenceList::flat(&[
      crate::suites::find_by_iana(CipherSuite::TLS13_AES_128_GCM_SHA256).unwrap(),
    ]);
    let wire = wire_bytes(&[CipherSuite::TLS13_AES_128_GCM_SHA256.get_u16()]);
    let mut conn = ConnectionState::new(ProtocolVersion::TLSv1_2);
    conn.server_max_supported_version = ProtocolVersion::TLSv1_2;
    let result = select(&mut conn, &reg, &prefs, WireList::new(&wire, 2), &AlwaysOk, &AnyCert);
    assert!(matches!(result, Err(NegotiationError::CipherNotSupported(_))));
  }

  // S6: client confirming an unoffered suite is illegal.
  #[test]
  fn s6_confirm_rejects_unoffered_suite() {
    let reg = registry();
    let prefs = preferences::PreferenceList::flat(&[
      crate::suites::find_by_iana(CipherSuite::TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256).unwrap(),
    ]);
    let conn = ConnectionState::new(ProtocolVersion::TLSv1_2);
    let result = confirm_server_choice(
      &conn,
      &reg,
      &prefs,
      CipherSuite::TLS_ECDHE_RSA_WITH_AES_256_GCM_SHA384.get_u16(),
    );
    assert!(matches!(result, Err(NegotiationError::IllegalParameter(_))));
  }

  #[test]
  fn confirm_accepts_an_offered_available_suite() {
    let reg = registry();
    let prefs = preferences::PreferenceList::flat(&[
      crate::suites::find_by_iana(CipherSuite::TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256).unwrap(),
    ]);
    let conn = ConnectionState::new(ProtocolVersion::TLSv1_2);
    let entry = confirm_server_choice(
      &conn,
      &reg,
      &prefs,
      CipherSuite::TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256.get_u16(),
    )
    .unwrap();
    assert_eq!(entry.resolved.suite.suite, CipherSuite::TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256);
  }

  #[test]
  fn confirm_rejects_psk_hash_mismatch() {
    let reg = registry();
    let prefs = preferences::PreferenceList::flat(&[
      crate::suites::find_by_iana(CipherSuite::TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256).unwrap(),
    ]);
    let mut conn = ConnectionState::new(ProtocolVersion::TLSv1_2);
    conn.chosen_psk_hash = Some(HashAlgorithm::SHA384);
    let result = confirm_server_choice(
      &conn,
      &reg,
      &prefs,
      CipherSuite::TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256.get_u16(),
    );
    assert!(matches!(result, Err(NegotiationError::CipherNotSupported(_))));
  }

  #[test]
  fn confirm_rejects_hrr_mismatch() {
    let reg = registry();
    let prefs = preferences::PreferenceList::flat(&[
      crate::suites::find_by_iana(CipherSuite::TLS13_AES_128_GCM_SHA256).unwrap(),
      crate::suites::find_by_iana(CipherSuite::TLS13_AES_256_GCM_SHA384).unwrap(),
    ]);
    let mut conn = ConnectionState::new(ProtocolVersion::TLSv1_3);
    conn.hrr_pinned_suite = Some(CipherSuite::TLS13_AES_128_GCM_SHA256);
    let result = confirm_server_choice(
      &conn,
      &reg,
      &prefs,
      CipherSuite::TLS13_AES_256_GCM_SHA384.get_u16(),
    );
    assert!(matches!(result, Err(NegotiationError::IllegalParameter(_))));
  }

  #[test]
  fn sslv2_stride_compares_trailing_two_bytes_only() {
    let wire: Vec<u8> = vec![0x00, 0xc0, 0x2f]; // SSLv2 entry for 0xc02f with leading 0 byte
    let list = WireList::new(&wire, 3);
    assert_eq!(list.len(), 1);
    assert!(list.contains_code(CipherSuite::TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256.get_u16()));
  }

  #[test]
  fn unavailable_auth_method_skips_the_candidate() {
    // ECDSA-only preference against an RSA-only certificate selector: no
    // suite validates, so selection must fail even though the client
    // offers exactly what the server prefers.
    let reg = registry();
    let prefs = preferences::PreferenceList::flat(&[
      crate::suites::find_by_iana(CipherSuite::TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256).unwrap(),
    ]);
    let wire = wire_bytes(&[CipherSuite::TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256.get_u16()]);
    let mut conn = ConnectionState::new(ProtocolVersion::TLSv1_2);
    conn.server_max_supported_version = ProtocolVersion::TLSv1_2;
    let result = select(&mut conn, &reg, &prefs, WireList::new(&wire, 2), &AlwaysOk, &RsaOnlyCert);
    assert!(matches!(result, Err(NegotiationError::CipherNotSupported(_))));
  }
}
