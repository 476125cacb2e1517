//! Helpers for running isolated webserver instances
use crate::{
    app_state::{AppState, AppStateBuilder},
    router::setup_app_router,
    settings,
    setups::test::{TestSetup, TestVerificationClient},
};
use axum::Router;

/// A reference to a running avs server in an isolated test environment
#[derive(Debug)]
pub struct TestContext {
    app: Router,
    app_state: AppState<TestSetup>,
}

impl TestContext {
    /// Create a new test context
    pub async fn new() -> Self {
        Self::new_with_state(|builder| builder).await
    }

    /// Create a test context, customizing the app state before it is
    /// finalized.
    pub async fn new_with_state<F>(f: F) -> Self
    where
        F: FnOnce(AppStateBuilder<TestSetup>) -> AppStateBuilder<TestSetup>,
    {
        let builder = AppStateBuilder::default()
            .with_yoti_settings(test_yoti_settings())
            .with_verification_client(TestVerificationClient::default());

        let app_state = f(builder).finalize().unwrap();

        let app = setup_app_router(app_state.clone());

        Self { app, app_state }
    }

    /// The router under test
    pub fn app(&self) -> Router {
        self.app.clone()
    }

    /// The scripted provider double backing this context
    pub fn verification_client(&self) -> &TestVerificationClient {
        &self.app_state.verification_client
    }
}

fn test_yoti_settings() -> settings::Yoti {
    settings::Yoti {
        client_sdk_id: "test-sdk-id".to_string(),
        bearer_token: "test-bearer-token".to_string(),
        api_url: "https://age.yoti.com/api/v1".to_string(),
        web_url: "https://age.yoti.com".to_string(),
        callback_url: "https://127.0.0.1:3000/yoti-callback".to_string(),
    }
}
