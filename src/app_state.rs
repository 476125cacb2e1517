//! The Axum Application State

use crate::{settings, setups::ServerSetup};
use anyhow::{anyhow, Result};
use std::sync::Arc;

#[derive(Clone)]
/// Global application route state.
pub struct AppState<S: ServerSetup> {
    /// Provider credentials & endpoints loaded from settings
    pub yoti_settings: Arc<settings::Yoti>,
    /// The client used to reach the verification provider
    pub verification_client: S::VerificationClient,
}

/// Builder for [`AppState`]
#[derive(Debug)]
pub struct AppStateBuilder<S: ServerSetup> {
    yoti_settings: Option<settings::Yoti>,
    verification_client: Option<S::VerificationClient>,
}

impl<S: ServerSetup> Default for AppStateBuilder<S> {
    fn default() -> Self {
        Self {
            yoti_settings: None,
            verification_client: None,
        }
    }
}

impl<S: ServerSetup> AppStateBuilder<S> {
    /// Finalize the builder and return the [`AppState`]
    pub fn finalize(self) -> Result<AppState<S>> {
        let yoti_settings = Arc::new(
            self.yoti_settings
                .ok_or_else(|| anyhow!("yoti settings are required"))?,
        );

        let verification_client = self
            .verification_client
            .ok_or_else(|| anyhow!("verification_client is required"))?;

        Ok(AppState {
            yoti_settings,
            verification_client,
        })
    }

    /// Set the provider settings
    pub fn with_yoti_settings(mut self, yoti_settings: settings::Yoti) -> Self {
        self.yoti_settings = Some(yoti_settings);
        self
    }

    /// Set the client used to reach the verification provider
    pub fn with_verification_client(
        mut self,
        verification_client: S::VerificationClient,
    ) -> Self {
        self.verification_client = Some(verification_client);
        self
    }
}

impl<S: ServerSetup> std::fmt::Debug for AppState<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Credentials stay out of debug output.
        f.debug_struct("AppState")
            .field("verification_client", &self.verification_client)
            .finish()
    }
}
