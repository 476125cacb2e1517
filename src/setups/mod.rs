//! This abstracts server side-effects into "setups".
//!
//! This module defines the trait, submodules define test & production
//! collections of implementations.
use crate::models::session::{Session, SessionRequest, VerificationResult};
use async_trait::async_trait;
use http::StatusCode;

pub mod prod;

/// This trait groups type parameters to the server's `AppState` struct.
///
/// It captures the setup of the server, distinguishing between e.g.
/// unit testing & production setups.
pub trait ServerSetup: Clone + Send + Sync + 'static {
    /// Which implementation to use to talk to the verification provider
    type VerificationClient: VerificationClient;
}

/// Speaks to the age verification provider.
#[async_trait]
pub trait VerificationClient: Clone + std::fmt::Debug + Send + Sync + 'static {
    /// Open a verification session and hand back its identifier.
    async fn create_session(&self, request: &SessionRequest)
        -> Result<Session, ProviderError>;

    /// Fetch the result of a previously opened session.
    async fn fetch_result(&self, session_id: &str)
        -> Result<VerificationResult, ProviderError>;
}

/// Ways talking to the provider can fail.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The provider answered successfully but the expected field was
    /// not in the response body.
    #[error("`{0}` missing from provider response")]
    MissingField(&'static str),
    /// The provider rejected the call outright.
    #[error("provider responded {status}: {body}")]
    UpstreamHttp {
        /// Status code the provider answered with.
        status: StatusCode,
        /// Raw response body text.
        body: String,
    },
    /// The provider could not be reached at all.
    #[error("transport error calling provider: {0}")]
    Transport(#[from] reqwest::Error),
}
