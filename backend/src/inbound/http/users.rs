//! Sign-up and sign-in form handlers.
//!
//! ```text
//! POST /api/v1/signup  name=Ada&email=ada%40example.com&password=secret1
//! POST /api/v1/login   email=ada%40example.com&password=secret1
//! ```
//!
//! Sign-up returns its feedback payload to the caller (the client performs
//! the navigation); sign-in performs the navigation itself with a
//! `303 See Other` once the session cookie is set.

use actix_web::http::header;
use actix_web::{HttpResponse, post, web};
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{
    Error, FormFeedback, LoginCredentials, LoginOutcome, LoginValidationError, SignupFormInput,
    SignupOutcome,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Sign-in form fields for `POST /api/v1/login`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginFormData {
    /// Email the account was created with.
    pub email: String,
    /// Plaintext password.
    pub password: String,
}

/// Create an account and sign it in.
#[utoipa::path(
    post,
    path = "/api/v1/signup",
    request_body(
        content = SignupFormInput,
        content_type = "application/x-www-form-urlencoded"
    ),
    responses(
        (status = 201, description = "User created and signed in", body = FormFeedback),
        (status = 200, description = "Creation or sign-in failed", body = FormFeedback),
        (status = 422, description = "Validation failed", body = FormFeedback),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "signUp",
    security([])
)]
#[post("/signup")]
pub async fn sign_up(
    session: SessionContext,
    state: web::Data<HttpState>,
    form: web::Form<SignupFormInput>,
) -> ApiResult<HttpResponse> {
    match state.signup.sign_up(&form).await {
        SignupOutcome::Rejected(feedback) => Ok(HttpResponse::UnprocessableEntity().json(feedback)),
        // Creation/sign-in failures are ordinary form state, not error responses.
        SignupOutcome::Failed { message } => {
            Ok(HttpResponse::Ok().json(FormFeedback::from_message(message)))
        }
        SignupOutcome::SignedIn { user_id, feedback } => {
            session.persist_user(&user_id)?;
            Ok(HttpResponse::Created().json(feedback))
        }
    }
}

/// Authenticate credentials and establish a session.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body(
        content = LoginFormData,
        content_type = "application/x-www-form-urlencoded"
    ),
    responses(
        (status = 303, description = "Signed in; redirect to the dashboard",
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = FormFeedback),
        (status = 502, description = "Auth backend failure", body = FormFeedback),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    session: SessionContext,
    state: web::Data<HttpState>,
    form: web::Form<LoginFormData>,
) -> ApiResult<HttpResponse> {
    let credentials = LoginCredentials::try_from_parts(&form.email, &form.password)
        .map_err(map_login_validation_error)?;

    let outcome = state.login.authenticate(&credentials).await?;
    match &outcome {
        LoginOutcome::SignedIn {
            user_id,
            redirect_url,
        } => {
            session.persist_user(user_id)?;
            Ok(HttpResponse::SeeOther()
                .insert_header((header::LOCATION, redirect_url.clone()))
                .finish())
        }
        LoginOutcome::InvalidCredentials => Ok(HttpResponse::Unauthorized().json(
            FormFeedback::from_message(denial(&outcome)),
        )),
        LoginOutcome::Unavailable => Ok(HttpResponse::BadGateway().json(
            FormFeedback::from_message(denial(&outcome)),
        )),
    }
}

fn denial(outcome: &LoginOutcome) -> &'static str {
    outcome
        .denial_message()
        .unwrap_or("Something went wrong.")
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyEmail => Error::invalid_request("email must not be empty")
            .with_details(json!({ "field": "email", "code": "empty_email" })),
        LoginValidationError::EmptyPassword => Error::invalid_request("password must not be empty")
            .with_details(json!({ "field": "password", "code": "empty_password" })),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{App, http::StatusCode, test as actix_test, web};
    use async_trait::async_trait;
    use mockable::DefaultClock;
    use rstest::rstest;
    use serde_json::Value;

    use super::*;
    use crate::domain::ports::{
        AuthError, AuthService, InvoicePersistenceError, InvoiceRepository, SignInOutcome,
        UserPersistenceError, UserRepository, ViewCache, ViewCacheError,
    };
    use crate::domain::user::EmailAddress;
    use crate::domain::{DASHBOARD_PATH, Invoice, InvoiceId, User, UserId};
    use crate::inbound::http::state::HttpStatePorts;

    struct NullInvoiceRepository;

    #[async_trait]
    impl InvoiceRepository for NullInvoiceRepository {
        async fn insert(&self, _invoice: &Invoice) -> Result<(), InvoicePersistenceError> {
            Ok(())
        }

        async fn update(
            &self,
            _id: &InvoiceId,
            _fields: &crate::domain::invoice::InvoiceFields,
        ) -> Result<(), InvoicePersistenceError> {
            Ok(())
        }

        async fn delete(&self, _id: &InvoiceId) -> Result<(), InvoicePersistenceError> {
            Ok(())
        }

        async fn list(&self) -> Result<Vec<Invoice>, InvoicePersistenceError> {
            Ok(Vec::new())
        }
    }

    struct NullUserRepository;

    #[async_trait]
    impl UserRepository for NullUserRepository {
        async fn insert(&self, _user: &User) -> Result<(), UserPersistenceError> {
            Ok(())
        }

        async fn find_by_email(
            &self,
            _email: &EmailAddress,
        ) -> Result<Option<User>, UserPersistenceError> {
            Ok(None)
        }
    }

    struct NullViewCache;

    #[async_trait]
    impl ViewCache for NullViewCache {
        async fn get(&self, _path: &str) -> Result<Option<String>, ViewCacheError> {
            Ok(None)
        }

        async fn put(&self, _path: &str, _body: &str) -> Result<(), ViewCacheError> {
            Ok(())
        }

        async fn invalidate(&self, _path: &str) -> Result<(), ViewCacheError> {
            Ok(())
        }
    }

    struct StubAuthService {
        result: Result<Option<String>, AuthError>,
    }

    #[async_trait]
    impl AuthService for StubAuthService {
        async fn sign_in(
            &self,
            _credentials: &LoginCredentials,
        ) -> Result<SignInOutcome, AuthError> {
            match &self.result {
                Ok(redirect_url) => Ok(SignInOutcome {
                    user_id: UserId::generate(),
                    redirect_url: redirect_url.clone(),
                }),
                Err(err) => Err(err.clone()),
            }
        }
    }

    fn test_state(auth: StubAuthService) -> web::Data<HttpState> {
        web::Data::new(HttpState::new(HttpStatePorts {
            invoices: Arc::new(NullInvoiceRepository),
            users: Arc::new(NullUserRepository),
            auth: Arc::new(auth),
            view_cache: Arc::new(NullViewCache),
            clock: Arc::new(DefaultClock),
        }))
    }

    fn test_app(
        state: web::Data<HttpState>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new().app_data(state).service(
            web::scope("/api/v1")
                .wrap(crate::inbound::http::test_utils::test_session_middleware())
                .service(sign_up)
                .service(login),
        )
    }

    #[actix_web::test]
    async fn login_success_redirects_and_sets_the_session_cookie() {
        let state = test_state(StubAuthService {
            result: Ok(Some(DASHBOARD_PATH.to_owned())),
        });
        let app = actix_test::init_service(test_app(state)).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/login")
                .set_form([("email", "ada@example.com"), ("password", "secret1")])
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let location = response
            .headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok());
        assert_eq!(location, Some("/dashboard"));
        assert!(
            response
                .response()
                .cookies()
                .any(|cookie| cookie.name() == "session"),
            "session cookie must be set"
        );
    }

    #[rstest]
    #[case(AuthError::InvalidCredentials, StatusCode::UNAUTHORIZED, "Invalid credentials.")]
    #[case(
        AuthError::backend("connection refused"),
        StatusCode::BAD_GATEWAY,
        "Something went wrong."
    )]
    #[actix_web::test]
    async fn login_maps_recognised_failures_to_fixed_strings(
        #[case] failure: AuthError,
        #[case] expected_status: StatusCode,
        #[case] expected_message: &str,
    ) {
        let state = test_state(StubAuthService {
            result: Err(failure),
        });
        let app = actix_test::init_service(test_app(state)).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/login")
                .set_form([("email", "ada@example.com"), ("password", "wrong")])
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), expected_status);
        let body = actix_test::read_body(response).await;
        let value: Value = serde_json::from_slice(&body).expect("feedback payload");
        assert_eq!(value["message"], expected_message);
    }

    #[actix_web::test]
    async fn login_propagates_unrecognised_failures_to_the_error_boundary() {
        let state = test_state(StubAuthService {
            result: Err(AuthError::unexpected("stored hash corrupt")),
        });
        let app = actix_test::init_service(test_app(state)).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/login")
                .set_form([("email", "ada@example.com"), ("password", "secret1")])
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = actix_test::read_body(response).await;
        let value: Value = serde_json::from_slice(&body).expect("error payload");
        // The boundary redacts internal detail.
        assert_eq!(value["message"], "Internal server error");
    }

    #[actix_web::test]
    async fn login_rejects_blank_email_with_field_details() {
        let state = test_state(StubAuthService {
            result: Err(AuthError::InvalidCredentials),
        });
        let app = actix_test::init_service(test_app(state)).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/login")
                .set_form([("email", "   "), ("password", "secret1")])
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = actix_test::read_body(response).await;
        let value: Value = serde_json::from_slice(&body).expect("error payload");
        assert_eq!(value["details"]["field"], "email");
        assert_eq!(value["details"]["code"], "empty_email");
    }

    #[actix_web::test]
    async fn signup_success_returns_the_redirect_target() {
        let state = test_state(StubAuthService {
            result: Ok(Some(DASHBOARD_PATH.to_owned())),
        });
        let app = actix_test::init_service(test_app(state)).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/signup")
                .set_form([
                    ("name", "Ada Lovelace"),
                    ("email", "ada@example.com"),
                    ("password", "engine1"),
                ])
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::CREATED);
        assert!(
            response
                .response()
                .cookies()
                .any(|cookie| cookie.name() == "session"),
            "session cookie must be set"
        );
        let body = actix_test::read_body(response).await;
        let value: Value = serde_json::from_slice(&body).expect("feedback payload");
        assert_eq!(value["message"], "User created and signed in successfully");
        assert_eq!(value["redirectUrl"], "/dashboard");
    }

    #[actix_web::test]
    async fn signup_validation_failure_reports_field_errors() {
        let state = test_state(StubAuthService {
            result: Ok(Some(DASHBOARD_PATH.to_owned())),
        });
        let app = actix_test::init_service(test_app(state)).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/signup")
                .set_form([
                    ("name", "Ada"),
                    ("email", "not-an-email"),
                    ("password", "short"),
                ])
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = actix_test::read_body(response).await;
        let value: Value = serde_json::from_slice(&body).expect("feedback payload");
        assert_eq!(value["message"], "Invalid input. Failed to create user.");
        assert_eq!(value["errors"]["email"][0], "Invalid email format.");
        assert_eq!(
            value["errors"]["password"][0],
            "Password must be at least 6 characters long."
        );
    }

    #[actix_web::test]
    async fn signup_sign_in_failure_embeds_the_error_text() {
        let state = test_state(StubAuthService {
            result: Err(AuthError::InvalidCredentials),
        });
        let app = actix_test::init_service(test_app(state)).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/signup")
                .set_form([
                    ("name", "Ada Lovelace"),
                    ("email", "ada@example.com"),
                    ("password", "engine1"),
                ])
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = actix_test::read_body(response).await;
        let value: Value = serde_json::from_slice(&body).expect("feedback payload");
        let message = value["message"].as_str().expect("message string");
        assert!(message.starts_with("Failed to create or sign in user: "));
    }
}
