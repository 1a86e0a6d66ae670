use std::error::Error as StdError;
use std::fmt;

/// Errors produced by cipher-suite lookup, capability initialization, and
/// negotiation.
///
/// This mirrors the flat, descriptive-variant style used elsewhere in the
/// handshake stack: every fallible entry point in this crate returns
/// `Result<_, NegotiationError>` and never panics outside of tests.
#[derive(Debug)]
pub enum NegotiationError {
  /// No cipher suite satisfies the caller's constraints: none are in
  /// common, the only matches are unavailable, or a PSK hash mismatch
  /// ruled out every remaining candidate.
  CipherNotSupported(String),

  /// The peer did something the protocol forbids: a client confirming a
  /// suite the server never offered, or a ServerHello that disagrees with
  /// an earlier HelloRetryRequest.
  IllegalParameter(String),

  /// `TLS_FALLBACK_SCSV` was present while the negotiated version is
  /// lower than the server is capable of; this indicates a downgrade
  /// attack and the connection must be closed.
  FallbackDetected,

  /// `disable_crypto_init` was called after `initialize` already ran.
  AlreadyInitialized,

  /// A collaborator (key exchange, certificate selection, ...) failed
  /// while validating or committing a candidate suite.
  Collaborator(Box<dyn StdError + Send + Sync>),
}

impl fmt::Display for NegotiationError {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      NegotiationError::CipherNotSupported(why) => {
        write!(f, "no ciphersuite in common: {}", why)
      }
      NegotiationError::IllegalParameter(why) => write!(f, "illegal parameter: {}", why),
      NegotiationError::FallbackDetected => {
        write!(f, "inappropriate fallback detected (TLS_FALLBACK_SCSV)")
      }
      NegotiationError::AlreadyInitialized => {
        write!(f, "cipher suite registry already initialized")
      }
      NegotiationError::Collaborator(err) => write!(f, "collaborator error: {}", err),
    }
  }
}

impl StdError for NegotiationError {
  fn source(&self) -> Option<&(dyn StdError + 'static)> {
    match self {
      NegotiationError::Collaborator(err) => Some(err.as_ref()),
      _ => None,
    }
  }
}

pub(crate) fn not_supported<S: Into<String>>(why: S) -> NegotiationError {
  NegotiationError::CipherNotSupported(why.into())
}

pub(crate) fn illegal_parameter<S: Into<String>>(why: S) -> NegotiationError {
  NegotiationError::IllegalParameter(why.into())
}

/// Wrap a failure from `KeyExchangePolicy::configure` (or any other
/// collaborator) so an embedder can propagate it through this crate's own
/// error type instead of threading a second error enum through its
/// handshake driver.
pub fn collaborator_failed<E>(err: E) -> NegotiationError
where
  E: StdError + Send + Sync + 'static,
{
  NegotiationError::Collaborator(Box::new(err))
}
