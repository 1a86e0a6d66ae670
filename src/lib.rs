//! A cipher-suite registry and negotiation core for a TLS endpoint.
//!
//! This crate owns the static catalog of cipher suites and record
//! algorithms (`suites`, `record`), the preference-list representation
//! used to order them (`preferences`), the per-process capability
//! resolution step that decides which are actually usable
//! (`registry`), and the negotiation algorithms a client or server runs
//! against a peer's offer (`negotiate`).
//!
//! It deliberately does not own a TLS connection, record-layer I/O, key
//! schedule, certificate verification, or the handshake state machine
//! that drives messages across the wire. Those are expected to sit on
//! top of this crate, each exchange satisfying the collaborator traits
//! in `collaborators` for the pieces it alone is responsible for:
//! primitive availability, post-quantum policy, key exchange, and
//! certificate/authentication selection.
//!
//! A typical embedder:
//!
//! ```no_run
//! use cipher_suites::collaborators::{CipherAvailability, PqPolicy};
//! use cipher_suites::record::BulkCipher;
//! use cipher_suites::registry::Registry;
//!
//! struct EverythingAvailable;
//! impl CipherAvailability for EverythingAvailable {
//!     fn is_available(&self, _cipher: BulkCipher) -> bool { true }
//! }
//! impl PqPolicy for EverythingAvailable {
//!     fn is_enabled(&self) -> bool { false }
//! }
//!
//! let registry = Registry::builder()
//!     .initialize(&EverythingAvailable, &EverythingAvailable)
//!     .expect("registry initialization");
//! let preferences = cipher_suites::preferences::all();
//! let _ = (registry, preferences);
//! ```

pub mod collaborators;
pub mod error;
pub mod msgs;
pub mod negotiate;
pub mod preferences;
pub mod record;
pub mod registry;
pub mod suites;

pub use collaborators::ConnectionState;
pub use error::{collaborator_failed, NegotiationError};
pub use negotiate::{confirm_server_choice, select, WireList};
pub use preferences::{PreferenceEntry, PreferenceList};
pub use registry::{Registry, RegistryEntry, ResolvedSuite};
pub use suites::{find_by_iana, SupportedCipherSuite, ALL_CIPHERSUITES};
