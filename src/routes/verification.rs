//! Age verification routes: session creation and the browser's return
//! trip from the provider-hosted flow.

use crate::{
    app_state::AppState,
    error::{AppError, AppResult},
    models::session::SessionRequest,
    routes::pages,
    setups::{ServerSetup, VerificationClient},
};
use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;
use tracing::{info, warn};

/// Query parameters the provider appends when sending the browser back.
#[derive(Deserialize, Debug)]
pub struct CallbackQuery {
    /// Session id of the finished hosted flow.
    #[serde(rename = "sessionId")]
    session_id: Option<String>,
}

/// POST handler that opens a provider session and redirects the browser
/// into the hosted verification flow.
#[utoipa::path(
    post,
    path = "/start-avs",
    responses(
        (status = 302, description = "Redirect into the provider-hosted verification flow"),
        (status = 500, description = "Provider rejected the session, returned no session id, or could not be reached", body = AppError)
    )
)]
pub async fn start_avs<S: ServerSetup>(
    State(state): State<AppState<S>>,
) -> AppResult<Response> {
    let request = SessionRequest::over_18(&state.yoti_settings.callback_url);
    let session = state.verification_client.create_session(&request).await?;

    let redirect_url = format!(
        "{}?sessionId={}&sdkId={}",
        state.yoti_settings.web_url, session.id, state.yoti_settings.client_sdk_id
    );
    info!(session_id = %session.id, "redirecting into hosted verification flow");

    Ok((StatusCode::FOUND, [(header::LOCATION, redirect_url)]).into_response())
}

/// GET handler the provider sends the browser back to; polls the
/// session result and renders the outcome.
#[utoipa::path(
    get,
    path = "/yoti-callback",
    params(
        ("sessionId" = Option<String>, Query, description = "Session id of the finished hosted flow")
    ),
    responses(
        (status = 200, description = "Verification complete, success page"),
        (status = 400, description = "Session id missing, or verification did not complete", body = AppError),
        (status = 500, description = "Provider error while polling the result", body = AppError)
    )
)]
pub async fn yoti_callback<S: ServerSetup>(
    State(state): State<AppState<S>>,
    Query(query): Query<CallbackQuery>,
) -> AppResult<Html<&'static str>> {
    let session_id = query.session_id.ok_or_else(|| {
        AppError::new(
            StatusCode::BAD_REQUEST,
            Some("sessionId not found in callback URL"),
        )
    })?;

    // The id is trusted as given: nothing ties it back to the request
    // that opened the session, so any caller holding an id can read
    // that session's result.
    let result = state.verification_client.fetch_result(&session_id).await?;

    if result.is_complete() {
        info!(session_id = %session_id, "age verification complete");
        Ok(Html(pages::SUCCESS_HTML))
    } else {
        warn!(session_id = %session_id, status = %result.status, "age verification not complete");
        Err(AppError::new(
            StatusCode::BAD_REQUEST,
            Some(format!(
                "age verification was not successful, the final status was '{}'",
                result.status
            )),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::session::{Session, VerificationResult},
        setups::ProviderError,
        test_utils::{route_builder::RouteBuilder, test_context::TestContext},
    };
    use http::Method;
    use testresult::TestResult;

    fn result_with_status(status: &str) -> VerificationResult {
        VerificationResult {
            status: status.to_string(),
            extra: Default::default(),
        }
    }

    #[test_log::test(tokio::test)]
    async fn test_start_avs_redirects_into_hosted_flow() -> TestResult {
        let ctx = TestContext::new().await;
        ctx.verification_client().push_session(Ok(Session {
            id: "abc123".to_string(),
        }));

        let (status, headers, _body) =
            RouteBuilder::new(ctx.app(), Method::POST, "/start-avs")
                .into_raw_response()
                .await?;

        assert_eq!(status, StatusCode::FOUND);
        let location = headers.get(header::LOCATION).unwrap().to_str()?;
        assert_eq!(
            location,
            "https://age.yoti.com?sessionId=abc123&sdkId=test-sdk-id"
        );

        Ok(())
    }

    #[test_log::test(tokio::test)]
    async fn test_start_avs_sends_the_fixed_over_18_payload() -> TestResult {
        let ctx = TestContext::new().await;
        ctx.verification_client().push_session(Ok(Session {
            id: "abc123".to_string(),
        }));

        RouteBuilder::new(ctx.app(), Method::POST, "/start-avs")
            .into_raw_response()
            .await?;

        let requests = ctx.verification_client().session_requests();
        assert_eq!(requests.len(), 1);

        let request = &requests[0];
        assert_eq!(request.ttl, 900);
        assert_eq!(request.reference_id, "over_18_example");
        assert!(request.age_estimation.allowed);
        assert!(request.digital_id.allowed);
        assert!(request.doc_scan.allowed);
        assert!(!request.credit_card.allowed);
        assert!(!request.mobile.allowed);
        assert_eq!(
            request.callback.url,
            "https://127.0.0.1:3000/yoti-callback"
        );

        Ok(())
    }

    #[test_log::test(tokio::test)]
    async fn test_start_avs_missing_session_id_is_500() -> TestResult {
        let ctx = TestContext::new().await;
        ctx.verification_client()
            .push_session(Err(ProviderError::MissingField("id")));

        let (status, _headers, body) =
            RouteBuilder::new(ctx.app(), Method::POST, "/start-avs")
                .into_raw_response()
                .await?;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let text = String::from_utf8(body.to_vec())?;
        assert!(text.contains("missing from provider response"));

        Ok(())
    }

    #[test_log::test(tokio::test)]
    async fn test_start_avs_keeps_provider_status_and_body() -> TestResult {
        let ctx = TestContext::new().await;
        ctx.verification_client()
            .push_session(Err(ProviderError::UpstreamHttp {
                status: StatusCode::FORBIDDEN,
                body: "sdk id not recognised".to_string(),
            }));

        let (status, _headers, body) =
            RouteBuilder::new(ctx.app(), Method::POST, "/start-avs")
                .into_raw_response()
                .await?;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let text = String::from_utf8(body.to_vec())?;
        assert!(text.contains("403"));
        assert!(text.contains("sdk id not recognised"));

        Ok(())
    }

    #[test_log::test(tokio::test)]
    async fn test_callback_without_session_id_is_400() -> TestResult {
        let ctx = TestContext::new().await;

        let (status, _headers, body) =
            RouteBuilder::new(ctx.app(), Method::GET, "/yoti-callback")
                .into_raw_response()
                .await?;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let text = String::from_utf8(body.to_vec())?;
        assert!(text.contains("sessionId"));

        Ok(())
    }

    #[test_log::test(tokio::test)]
    async fn test_callback_complete_renders_success_page() -> TestResult {
        let ctx = TestContext::new().await;
        ctx.verification_client()
            .push_result(Ok(result_with_status("COMPLETE")));

        let (status, _headers, body) = RouteBuilder::new(
            ctx.app(),
            Method::GET,
            "/yoti-callback?sessionId=abc123",
        )
        .into_raw_response()
        .await?;

        assert_eq!(status, StatusCode::OK);
        let text = String::from_utf8(body.to_vec())?;
        assert!(text.contains("Verification Successful!"));

        assert_eq!(ctx.verification_client().polled_ids(), vec!["abc123"]);

        Ok(())
    }

    #[test_log::test(tokio::test)]
    async fn test_callback_non_complete_status_is_400_and_echoed() -> TestResult {
        let ctx = TestContext::new().await;
        ctx.verification_client()
            .push_result(Ok(result_with_status("PENDING")));

        let (status, _headers, body) = RouteBuilder::new(
            ctx.app(),
            Method::GET,
            "/yoti-callback?sessionId=abc123",
        )
        .into_raw_response()
        .await?;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let text = String::from_utf8(body.to_vec())?;
        assert!(text.contains("PENDING"));

        Ok(())
    }

    #[test_log::test(tokio::test)]
    async fn test_callback_provider_error_is_500_with_diagnostics() -> TestResult {
        let ctx = TestContext::new().await;
        ctx.verification_client()
            .push_result(Err(ProviderError::UpstreamHttp {
                status: StatusCode::BAD_GATEWAY,
                body: "backend exploded".to_string(),
            }));

        let (status, _headers, body) = RouteBuilder::new(
            ctx.app(),
            Method::GET,
            "/yoti-callback?sessionId=abc123",
        )
        .into_raw_response()
        .await?;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let text = String::from_utf8(body.to_vec())?;
        assert!(text.contains("502"));
        assert!(text.contains("backend exploded"));

        Ok(())
    }
}
