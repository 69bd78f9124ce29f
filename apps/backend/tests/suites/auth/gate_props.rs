//! Arbitrary `Authorization` values against a live app: the gate must answer
//! 401 with one of its two codes and never let a request through.

use actix_web::http::StatusCode;
use actix_web::test;
use proptest::prelude::*;
use serde_json::Value;
use simjur_backend::AuthErrorKind;

use crate::common::proptest_prelude::proptest_prelude_config;
use crate::support::app_builder::test_state_without_db;
use crate::support::auth::test_security;
use crate::support::create_test_app;

fn check_header(header: String) -> Result<(), TestCaseError> {
    let system = actix_web::rt::System::new();
    system.block_on(async move {
        let state = test_state_without_db(test_security())
            .await
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        let app = create_test_app(state)
            .build()
            .await
            .map_err(|e| TestCaseError::fail(e.to_string()))?;

        let req = test::TestRequest::get()
            .uri("/api/roles")
            .insert_header(("Authorization", header.clone()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        prop_assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let body: Value = test::read_body_json(resp).await;
        let code = body["code"].as_str().unwrap_or_default().to_string();
        let error = body["error"].as_str().unwrap_or_default().to_string();
        if header.is_empty() {
            prop_assert_eq!(code, "MISSING_AUTH_HEADER");
            prop_assert_eq!(error, AuthErrorKind::MissingCredential.message());
        } else {
            prop_assert_eq!(code, "INVALID_TOKEN");
            prop_assert_eq!(error, AuthErrorKind::InvalidToken.message());
        }
        Ok(())
    })
}

proptest! {
    #![proptest_config(proptest_prelude_config())]

    #[::core::prelude::v1::test]
    fn printable_headers_are_rejected(header in "[ -~]{0,300}") {
        check_header(header)?;
    }

    #[::core::prelude::v1::test]
    fn bearer_garbage_is_invalid_token(token in "[A-Za-z0-9_.=-]{0,200}") {
        check_header(format!("Bearer {token}"))?;
    }
}
