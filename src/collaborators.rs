//! Traits for the subsystems this crate treats as external collaborators:
//! primitive availability, post-quantum policy, key exchange, and
//! certificate/authentication selection. A production embedder implements
//! these against its real crypto and connection machinery; this crate's
//! own tests implement them against small fixtures.

use std::error::Error as StdError;

use crate::msgs::enums::{CipherSuite, HashAlgorithm, ProtocolVersion};
use crate::record::BulkCipher;

/// Reports whether a bulk cipher's implementation is actually runnable in
/// this process: compiled in, permitted under the active FIPS profile, a
/// hardware-accelerated path present, and so on. Queried once per record
/// algorithm candidate during `Registry::initialize`.
pub trait CipherAvailability {
  fn is_available(&self, cipher: BulkCipher) -> bool;
}

/// Reports whether the post-quantum subsystem is enabled for this process.
/// When it is not, every suite whose key exchange includes a KEM
/// component is forced unavailable during initialization.
pub trait PqPolicy {
  fn is_enabled(&self) -> bool;
}

/// Key-exchange feasibility and commit, consumed only by the negotiator.
///
/// `supported` is queried once per candidate inside the selection loop and
/// must be side-effect free. `configure` mutates connection state and is
/// called at most once, after a suite has been finally chosen -- never
/// speculatively while other candidates are still being considered.
pub trait KeyExchangePolicy {
  fn supported(&self, conn: &ConnectionState, suite: CipherSuite) -> bool;

  fn configure(
    &self,
    conn: &mut ConnectionState,
    suite: CipherSuite,
  ) -> Result<(), Box<dyn StdError + Send + Sync>>;
}

/// Certificate/authentication-method compatibility, consumed only by the
/// negotiator.
pub trait AuthSelector {
  fn cipher_valid_for_certs(&self, conn: &ConnectionState, suite: CipherSuite) -> bool;
}

/// The narrow slice of connection state the negotiator reads and writes.
/// A production embedder's own connection object would implement the
/// traits above directly; this struct is the view this crate depends on.
#[derive(Debug, Clone)]
pub struct ConnectionState {
  pub protocol_version: ProtocolVersion,
  pub server_max_supported_version: ProtocolVersion,
  pub chosen_psk_hash: Option<HashAlgorithm>,
  pub hrr_pinned_suite: Option<CipherSuite>,
  pub secure_renegotiation: bool,
  pub closed: bool,
}

impl ConnectionState {
  pub fn new(protocol_version: ProtocolVersion) -> ConnectionState {
    ConnectionState {
      protocol_version,
      server_max_supported_version: protocol_version,
      chosen_psk_hash: None,
      hrr_pinned_suite: None,
      secure_renegotiation: false,
      closed: false,
    }
  }
}
