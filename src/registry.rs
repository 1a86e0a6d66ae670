//! The capability initializer and the `Registry` value it produces.
//!
//! Rather than mutating the catalog's global, link-time descriptors in
//! place behind a process-wide latch, `Registry::builder().initialize(..)`
//! produces an owned `Registry` value: the catalog's static *definitions*
//! (`crate::suites::ALL_CIPHERSUITES`) stay `'static` and immutable, while
//! the per-process *resolved* capability state (`available`,
//! `selected_record_alg`, `sslv3_shadow`) lives in a parallel `Vec` owned
//! by the `Registry`. `disable_crypto_init` is a builder option rather
//! than a free function toggling global mutable state.

use std::sync::atomic::{AtomicBool, Ordering};

#[cfg(feature = "logging")]
use log::debug;

use crate::collaborators::{CipherAvailability, PqPolicy};
use crate::error::NegotiationError;
use crate::msgs::enums::CipherSuite;
use crate::record::RecordAlgorithm;
use crate::suites::{self, SupportedCipherSuite};

/// The resolved, per-process capability state of one catalog entry: which
/// record algorithm (if any) won its candidate walk, and whether the suite
/// is usable at all once PQ gating is applied.
#[derive(Debug, Clone)]
pub struct ResolvedSuite {
  pub suite: &'static SupportedCipherSuite,
  pub available: bool,
  pub selected_record_alg: Option<RecordAlgorithm>,
}

/// One entry in an initialized `Registry`: a suite's ordinary resolved
/// state, plus its SSLv3 shadow. The shadow keeps the shape of a distinct
/// resolved value (rather than a second slot on `ResolvedSuite`) because
/// the registry already owns these values outright -- there is no
/// heap/lifecycle hazard left to simplify away by merging the two.
#[derive(Debug, Clone)]
pub struct RegistryEntry {
  pub resolved: ResolvedSuite,
  /// `None` when this suite has no distinct SSLv3 record algorithm, or
  /// when its SSLv3 candidate's cipher was unavailable; callers should
  /// fall back to `resolved` in that case (the "self-reference" of §4.4).
  pub sslv3_shadow: Option<ResolvedSuite>,
}

impl RegistryEntry {
  /// The resolved suite to use for a connection negotiated at
  /// `protocol_version`: the SSLv3 shadow if one exists and the version is
  /// SSLv3, the ordinary resolution otherwise.
  pub fn resolved_for_version(
    &self,
    protocol_version: crate::msgs::enums::ProtocolVersion,
  ) -> &ResolvedSuite {
    if protocol_version == crate::msgs::enums::ProtocolVersion::SSLv3 {
      if let Some(shadow) = &self.sslv3_shadow {
        return shadow;
      }
    }
    &self.resolved
  }
}

/// Process-wide latch mirroring the source's `should_init_crypto`/
/// `crypto_initialized` pair (§5: "the external crypto library is a
/// process-wide resource guarded by a boolean latch"). `Registry` values
/// are otherwise independent of each other; this is the one piece of
/// state that genuinely is global, because the underlying crypto library
/// only has one process-wide table to load.
static SHOULD_INIT_CRYPTO: AtomicBool = AtomicBool::new(true);
static CRYPTO_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Disable this crate's ownership of external crypto-library startup, so
/// an embedder that already initializes its crypto library elsewhere
/// doesn't pay for it twice. Fails with `AlreadyInitialized` if some
/// `Registry` has already run `initialize` and performed that startup.
pub fn disable_crypto_init() -> Result<(), NegotiationError> {
  if CRYPTO_INITIALIZED.load(Ordering::SeqCst) {
    return Err(NegotiationError::AlreadyInitialized);
  }
  SHOULD_INIT_CRYPTO.store(false, Ordering::SeqCst);
  Ok(())
}

/// Builder for `Registry::initialize`, carrying the one piece of startup
/// configuration this crate exposes.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
  disable_crypto_init: bool,
}

impl RegistryBuilder {
  /// Equivalent to calling the free function `disable_crypto_init`, scoped
  /// to this builder so call sites read as ordinary configuration rather
  /// than a side effect on global state.
  pub fn disable_crypto_init(mut self, disable: bool) -> RegistryBuilder {
    self.disable_crypto_init = disable;
    self
  }

  /// Walk `crate::suites::ALL_CIPHERSUITES` and resolve each entry's
  /// capability state. See §4.4 of the component design this mirrors:
  /// per suite, pick the first available record algorithm candidate, mark
  /// PQ-only suites unavailable when PQ is disabled, and materialize an
  /// SSLv3 shadow where the suite's cipher supports one.
  pub fn initialize(
    self,
    ciphers: &dyn CipherAvailability,
    pq: &dyn PqPolicy,
  ) -> Result<Registry, NegotiationError> {
    if self.disable_crypto_init {
      disable_crypto_init()?;
    }

    let entries: Vec<RegistryEntry> = suites::ALL_CIPHERSUITES
      .iter()
      .map(|&suite| resolve_entry(suite, ciphers, pq))
      .collect();

    if SHOULD_INIT_CRYPTO.load(Ordering::SeqCst) {
      // The external crypto library (ring) self-initializes its algorithm
      // tables lazily; there is no explicit load step to call here. We
      // still flip the latch so a later `disable_crypto_init` call
      // correctly reports `AlreadyInitialized`.
      CRYPTO_INITIALIZED.store(true, Ordering::SeqCst);
    }

    Ok(Registry { entries })
  }
}

fn resolve_entry(
  suite: &'static SupportedCipherSuite,
  ciphers: &dyn CipherAvailability,
  pq: &dyn PqPolicy,
) -> RegistryEntry {
  let mut selected_record_alg = None;
  for candidate in suite.record_alg_candidates {
    if ciphers.is_available(candidate.cipher) {
      selected_record_alg = Some(*candidate);
      break;
    }
  }
  let mut available = selected_record_alg.is_some();

  if suite.requires_pq_extension() && !pq.is_enabled() {
    available = false;
    selected_record_alg = None;
  }

  #[cfg(feature = "logging")]
  debug!(
    "suite {}: available={} record_alg={:?}",
    suite.name, available, selected_record_alg
  );

  let resolved = ResolvedSuite {
    suite,
    available,
    selected_record_alg,
  };

  let sslv3_shadow = suite.sslv3_record_alg.and_then(|sslv3_alg| {
    if ciphers.is_available(sslv3_alg.cipher) {
      Some(ResolvedSuite {
        suite,
        available: true,
        selected_record_alg: Some(sslv3_alg),
      })
    } else {
      None
    }
  });

  RegistryEntry {
    resolved,
    sslv3_shadow,
  }
}

/// The resolved, per-process view of the cipher-suite catalog. Built once
/// by `Registry::builder().initialize(..)` before any negotiation, and
/// consumed read-only by `crate::negotiate` from as many connection
/// threads as the embedder likes (§5: no locking is required for reads).
#[derive(Debug)]
pub struct Registry {
  entries: Vec<RegistryEntry>,
}

impl Registry {
  pub fn builder() -> RegistryBuilder {
    RegistryBuilder::default()
  }

  /// Look up a suite's resolved entry by its wire identity. `None` for
  /// codes this catalog doesn't describe at all (callers needing a
  /// `NegotiationError` should go through `crate::suites::find_by_iana`
  /// first).
  pub fn find(&self, suite: CipherSuite) -> Option<&RegistryEntry> {
    self.entries.iter().find(|e| e.resolved.suite.suite == suite)
  }

  pub fn entries(&self) -> &[RegistryEntry] {
    &self.entries
  }

  /// Reverses `initialize`: drops every resolved entry (and with it every
  /// SSLv3 shadow, since they're owned `Vec` elements rather than heap
  /// allocations reached through a raw pointer) and, if this process owned
  /// external crypto-library startup, resets the startup latch so a
  /// subsequent `initialize` is a clean restart.
  pub fn teardown(self) {
    if CRYPTO_INITIALIZED.load(Ordering::SeqCst) {
      CRYPTO_INITIALIZED.store(false, Ordering::SeqCst);
    }
    SHOULD_INIT_CRYPTO.store(true, Ordering::SeqCst);
  }
}

// These tests share the process-wide crypto-init latch (by design: see
// `SHOULD_INIT_CRYPTO`/`CRYPTO_INITIALIZED` above), so they must run
// single-threaded: `cargo test -- --test-threads=1`.
#[cfg(test)]
mod test {
  use super::*;
  use crate::msgs::enums::ProtocolVersion;
  use crate::record::BulkCipher;

  struct AllAvailable;
  impl CipherAvailability for AllAvailable {
    fn is_available(&self, _cipher: BulkCipher) -> bool {
      true
    }
  }

  struct OnlyAesGcm;
  impl CipherAvailability for OnlyAesGcm {
    fn is_available(&self, cipher: BulkCipher) -> bool {
      matches!(cipher, BulkCipher::AES_128_GCM | BulkCipher::AES_256_GCM)
    }
  }

  struct PqEnabled(bool);
  impl PqPolicy for PqEnabled {
    fn is_enabled(&self) -> bool {
      self.0
    }
  }

  #[test]
  fn available_suites_always_have_a_selected_record_alg() {
    let registry = Registry::builder()
      .initialize(&AllAvailable, &PqEnabled(true))
      .unwrap();
    for entry in registry.entries() {
      if entry.resolved.available {
        assert!(entry.resolved.selected_record_alg.is_some());
      }
    }
    registry.teardown();
  }

  #[test]
  fn pq_disabled_forces_hybrid_kex_suites_unavailable() {
    let registry = Registry::builder()
      .initialize(&AllAvailable, &PqEnabled(false))
      .unwrap();
    let entry = registry
      .find(CipherSuite::TLS_ECDHE_KYBER_RSA_WITH_AES_256_GCM_SHA384)
      .unwrap();
    assert!(!entry.resolved.available);
    assert!(entry.resolved.selected_record_alg.is_none());
    registry.teardown();
  }

  #[test]
  fn unavailable_ciphers_mark_the_whole_suite_unavailable() {
    let registry = Registry::builder()
      .initialize(&OnlyAesGcm, &PqEnabled(true))
      .unwrap();
    let entry = registry
      .find(CipherSuite::TLS_RSA_WITH_RC4_128_SHA)
      .unwrap();
    assert!(!entry.resolved.available);
    let gcm_entry = registry
      .find(CipherSuite::TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256)
      .unwrap();
    assert!(gcm_entry.resolved.available);
    registry.teardown();
  }

  #[test]
  fn sslv3_shadow_uses_the_sslv3_record_algorithm() {
    let registry = Registry::builder()
      .initialize(&AllAvailable, &PqEnabled(true))
      .unwrap();
    let entry = registry
      .find(CipherSuite::TLS_RSA_WITH_RC4_128_SHA)
      .unwrap();
    let shadow = entry.sslv3_shadow.as_ref().expect("suite has an sslv3 record alg");
    assert_eq!(
      shadow.selected_record_alg.unwrap().cipher,
      entry.resolved.suite.sslv3_record_alg.unwrap().cipher
    );
    let for_sslv3 = entry.resolved_for_version(ProtocolVersion::SSLv3);
    assert_eq!(
      for_sslv3.selected_record_alg.unwrap().hmac_kind,
      entry.resolved.suite.sslv3_record_alg.unwrap().hmac_kind
    );
    registry.teardown();
  }

  #[test]
  fn suites_with_no_sslv3_variant_fall_back_to_the_parent_resolution() {
    let registry = Registry::builder()
      .initialize(&AllAvailable, &PqEnabled(true))
      .unwrap();
    let entry = registry
      .find(CipherSuite::TLS13_AES_128_GCM_SHA256)
      .unwrap();
    assert!(entry.sslv3_shadow.is_none());
    let for_sslv3 = entry.resolved_for_version(ProtocolVersion::SSLv3);
    assert_eq!(for_sslv3.suite.suite, CipherSuite::TLS13_AES_128_GCM_SHA256);
    registry.teardown();
  }

  #[test]
  fn disabling_crypto_init_after_initialize_fails() {
    let registry = Registry::builder()
      .initialize(&AllAvailable, &PqEnabled(true))
      .unwrap();
    assert!(matches!(
      disable_crypto_init(),
      Err(NegotiationError::AlreadyInitialized)
    ));
    registry.teardown();
  }
}
