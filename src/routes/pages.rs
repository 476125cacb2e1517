//! Static HTML pages.

use axum::response::Html;

/// Home page with the button that kicks off a verification.
pub(crate) const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Age Verification</title>
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            display: flex;
            justify-content: center;
            align-items: center;
            min-height: 100vh;
            margin: 0;
            background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
        }
        .container {
            background: white;
            padding: 40px;
            border-radius: 16px;
            box-shadow: 0 10px 40px rgba(0,0,0,0.2);
            text-align: center;
            max-width: 400px;
        }
        h1 {
            color: #333;
            margin-bottom: 10px;
        }
        p {
            color: #666;
            margin-bottom: 30px;
        }
        .verify-btn {
            background: #5865F2;
            color: white;
            border: none;
            cursor: pointer;
            padding: 15px 30px;
            border-radius: 8px;
            font-weight: 600;
            font-size: 16px;
            transition: background 0.2s;
        }
        .verify-btn:hover {
            background: #4752C4;
        }
    </style>
</head>
<body>
    <div class="container">
        <h1>Verify Your Age</h1>
        <p>You need to prove you are over 18 to continue. You'll be sent to our verification partner and brought back here afterwards.</p>
        <form method="post" action="/start-avs">
            <button type="submit" class="verify-btn">Start verification</button>
        </form>
    </div>
</body>
</html>"#;

/// Confirmation page shown once a session reports `COMPLETE`.
pub(crate) const SUCCESS_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Verification Success</title>
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            display: flex;
            justify-content: center;
            align-items: center;
            min-height: 100vh;
            margin: 0;
            background: linear-gradient(135deg, #11998e 0%, #38ef7d 100%);
        }
        .container {
            background: white;
            padding: 40px;
            border-radius: 16px;
            box-shadow: 0 10px 40px rgba(0,0,0,0.2);
            text-align: center;
            max-width: 400px;
        }
        h1 {
            color: #11998e;
            margin-bottom: 10px;
        }
        .success-icon {
            font-size: 60px;
            margin-bottom: 20px;
        }
    </style>
</head>
<body>
    <div class="container">
        <div class="success-icon">&#10003;</div>
        <h1>Verification Successful!</h1>
        <p>Your age has been verified. You can close this window.</p>
    </div>
</body>
</html>"#;

/// GET handler for the home page.
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Home page")
    )
)]
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// GET handler for the static confirmation page.
#[utoipa::path(
    get,
    path = "/success",
    responses(
        (status = 200, description = "Static confirmation page")
    )
)]
pub async fn success() -> Html<&'static str> {
    Html(SUCCESS_HTML)
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, http::Request};
    use http::StatusCode;
    use tower::ServiceExt;

    use crate::test_utils::test_context::TestContext;

    #[tokio::test]
    async fn test_index_serves_start_form() {
        let ctx = TestContext::new().await;

        let response = ctx
            .app()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = hyper::body::to_bytes(response.into_body()).await.unwrap();
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains(r#"action="/start-avs""#));
    }

    #[tokio::test]
    async fn test_success_page_is_served() {
        let ctx = TestContext::new().await;

        let response = ctx
            .app()
            .oneshot(
                Request::builder()
                    .uri("/success")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = hyper::body::to_bytes(response.into_body()).await.unwrap();
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("Verification Successful!"));
    }
}
