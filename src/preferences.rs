//! Preference lists: named, ordered sequences of references into
//! `crate::suites::ALL_CIPHERSUITES`, optionally carrying equal-preference
//! groups.
//!
//! A group boundary could be represented as two zero-availability
//! pseudo-suites compared by pointer identity, but a suite that
//! accidentally shared a pointer with a sentinel would silently become
//! unselectable, and nothing would stop a sentinel's IANA code from
//! reaching `find_by_iana`. Instead a preference list is a
//! `Vec<PreferenceEntry>`: a sentinel is a distinct enum variant, not a
//! suite, so the confusion is impossible to express, let alone to hit at
//! runtime.

use crate::error::NegotiationError;
use crate::msgs::enums::{AuthMethod, CipherSuite};
use crate::suites::{self, SupportedCipherSuite};

/// One slot in a preference list: an ordinary suite, or one of the two
/// sentinels delimiting an equal-preference group.
#[derive(Debug, Clone, Copy)]
pub enum PreferenceEntry {
  Suite(&'static SupportedCipherSuite),
  GroupStart,
  GroupEnd,
}

/// A well-formed, ordered preference list: sentinels are balanced and
/// non-nested, and no group is empty.
#[derive(Debug, Clone)]
pub struct PreferenceList {
  entries: Vec<PreferenceEntry>,
}

impl PreferenceList {
  pub fn new(entries: Vec<PreferenceEntry>) -> Result<PreferenceList, NegotiationError> {
    let mut in_group = false;
    let mut group_len = 0usize;
    for entry in &entries {
      match entry {
        PreferenceEntry::GroupStart => {
          if in_group {
            return Err(NegotiationError::IllegalParameter(
              "nested GROUP_START in preference list".into(),
            ));
          }
          in_group = true;
          group_len = 0;
        }
        PreferenceEntry::GroupEnd => {
          if !in_group {
            return Err(NegotiationError::IllegalParameter(
              "GROUP_END without matching GROUP_START".into(),
            ));
          }
          if group_len == 0 {
            return Err(NegotiationError::IllegalParameter(
              "empty equal-preference group".into(),
            ));
          }
          in_group = false;
        }
        PreferenceEntry::Suite(_) => {
          if in_group {
            group_len += 1;
          }
        }
      }
    }
    if in_group {
      return Err(NegotiationError::IllegalParameter(
        "GROUP_START without matching GROUP_END".into(),
      ));
    }
    Ok(PreferenceList { entries })
  }

  /// Build a preference list of ordinary suites with no equal-preference
  /// groups, in the given order.
  pub fn flat(suites: &[&'static SupportedCipherSuite]) -> PreferenceList {
    PreferenceList {
      entries: suites.iter().copied().map(PreferenceEntry::Suite).collect(),
    }
  }

  pub fn entries(&self) -> &[PreferenceEntry] {
    &self.entries
  }

  /// True if `suite` appears as an ordinary entry anywhere in this list.
  /// Used by `crate::negotiate::confirm_server_choice` to check that the
  /// server picked something we actually offered.
  pub fn contains(&self, suite: CipherSuite) -> bool {
    self.entries.iter().any(|e| match e {
      PreferenceEntry::Suite(s) => s.suite == suite,
      _ => false,
    })
  }
}

fn flat_from_codes(codes: &[CipherSuite]) -> PreferenceList {
  let suites: Vec<&'static SupportedCipherSuite> = codes
    .iter()
    .map(|c| suites::find_by_iana(*c).expect("fixture references a catalog suite"))
    .collect();
  PreferenceList::flat(&suites)
}

/// Every suite in the catalog, in the catalog's own IANA-ascending order.
pub fn all() -> PreferenceList {
  PreferenceList::flat(suites::ALL_CIPHERSUITES)
}

/// Every pre-TLS-1.3 suite, IANA order.
pub fn all_tls12() -> PreferenceList {
  let suites: Vec<&'static SupportedCipherSuite> = suites::ALL_CIPHERSUITES
    .iter()
    .copied()
    .filter(|s| s.min_tls_version < crate::msgs::enums::ProtocolVersion::TLSv1_3)
    .collect();
  PreferenceList::flat(&suites)
}

/// Every TLS 1.3 suite.
pub fn all_tls13() -> PreferenceList {
  let suites: Vec<&'static SupportedCipherSuite> = suites::ALL_CIPHERSUITES
    .iter()
    .copied()
    .filter(|s| s.min_tls_version >= crate::msgs::enums::ProtocolVersion::TLSv1_3)
    .collect();
  PreferenceList::flat(&suites)
}

/// A FIPS-approved subset: no RC4, no suites whose only integrity
/// protection is a plain (non-composite, non-AEAD) SHA1 MAC below TLS 1.2.
pub fn fips_subset() -> PreferenceList {
  flat_from_codes(&[
    CipherSuite::TLS_RSA_WITH_3DES_EDE_CBC_SHA,
    CipherSuite::TLS_RSA_WITH_AES_128_CBC_SHA,
    CipherSuite::TLS_ECDHE_ECDSA_WITH_AES_128_CBC_SHA,
    CipherSuite::TLS_ECDHE_RSA_WITH_AES_128_CBC_SHA,
    CipherSuite::TLS_ECDHE_RSA_WITH_AES_256_CBC_SHA,
    CipherSuite::TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256,
    CipherSuite::TLS_ECDHE_ECDSA_WITH_AES_256_GCM_SHA384,
    CipherSuite::TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256,
    CipherSuite::TLS_ECDHE_RSA_WITH_AES_256_GCM_SHA384,
    CipherSuite::TLS13_AES_128_GCM_SHA256,
    CipherSuite::TLS13_AES_256_GCM_SHA384,
  ])
}

/// Every suite whose `auth_method` is ECDSA (plus the auth-agnostic TLS 1.3
/// suites).
pub fn all_ecdsa() -> PreferenceList {
  let suites: Vec<&'static SupportedCipherSuite> = suites::ALL_CIPHERSUITES
    .iter()
    .copied()
    .filter(|s| s.auth_method == AuthMethod::ECDSA || s.auth_method == AuthMethod::Any)
    .collect();
  PreferenceList::flat(&suites)
}

/// Every suite whose key exchange is plain RSA (static RSA key transport,
/// no ephemeral exchange).
pub fn all_rsa_kex() -> PreferenceList {
  flat_from_codes(&[
    CipherSuite::TLS_RSA_WITH_RC4_128_SHA,
    CipherSuite::TLS_RSA_WITH_3DES_EDE_CBC_SHA,
    CipherSuite::TLS_RSA_WITH_AES_128_CBC_SHA,
  ])
}

/// ECDSA suites ordered ahead of RSA suites, IANA order within each.
pub fn ecdsa_priority() -> PreferenceList {
  let (ecdsa, rest): (Vec<_>, Vec<_>) = suites::ALL_CIPHERSUITES
    .iter()
    .copied()
    .partition(|s| s.auth_method == AuthMethod::ECDSA);
  let mut ordered = ecdsa;
  ordered.extend(rest);
  PreferenceList::flat(&ordered)
}

/// A group mixing a TLS 1.2 suite, a TLS 1.3 suite, and a legacy suite in
/// one equal-preference group, stress-testing the group algorithm against
/// suites with different `min_tls_version`s and record algorithms.
pub fn arbitrary_equal_preference() -> PreferenceList {
  PreferenceList::new(vec![
    PreferenceEntry::GroupStart,
    PreferenceEntry::Suite(&suites::TLS13_AES_128_GCM_SHA256),
    PreferenceEntry::Suite(&suites::TLS13_AES_256_GCM_SHA384),
    PreferenceEntry::Suite(&suites::TLS_RSA_WITH_AES_128_CBC_SHA),
    PreferenceEntry::GroupEnd,
    PreferenceEntry::Suite(&suites::TLS_ECDHE_RSA_WITH_CHACHA20_POLY1305_SHA256),
  ])
  .expect("fixture is well-formed")
}
