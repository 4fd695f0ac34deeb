//! Shared doubles and app assembly for HTTP integration tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::{App, web};
use async_trait::async_trait;
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use invoices_backend::domain::invoice::{Invoice, InvoiceFields, InvoiceId};
use invoices_backend::domain::ports::{
    AuthError, AuthService, InvoicePersistenceError, InvoiceRepository, SignInOutcome,
    UserPersistenceError, UserRepository,
};
use invoices_backend::domain::user::EmailAddress;
use invoices_backend::domain::{DASHBOARD_PATH, LoginCredentials, User, UserId};
use invoices_backend::inbound::http::state::{HttpState, HttpStatePorts};
use invoices_backend::inbound::http::{invoices, users};
use invoices_backend::outbound::cache::InMemoryViewCache;

/// Invoice repository double recording every statement it is asked to run.
#[derive(Default)]
pub struct RecordingInvoiceRepository {
    pub inserted: Mutex<Vec<Invoice>>,
    pub updated: Mutex<Vec<(InvoiceId, InvoiceFields)>>,
    pub deleted: Mutex<Vec<InvoiceId>>,
    pub list_calls: AtomicUsize,
    pub fail: bool,
}

impl RecordingInvoiceRepository {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl InvoiceRepository for RecordingInvoiceRepository {
    async fn insert(&self, invoice: &Invoice) -> Result<(), InvoicePersistenceError> {
        if self.fail {
            return Err(InvoicePersistenceError::query("insert failed"));
        }
        self.inserted.lock().expect("lock").push(invoice.clone());
        Ok(())
    }

    async fn update(
        &self,
        id: &InvoiceId,
        fields: &InvoiceFields,
    ) -> Result<(), InvoicePersistenceError> {
        if self.fail {
            return Err(InvoicePersistenceError::query("update failed"));
        }
        self.updated
            .lock()
            .expect("lock")
            .push((*id, fields.clone()));
        Ok(())
    }

    async fn delete(&self, id: &InvoiceId) -> Result<(), InvoicePersistenceError> {
        if self.fail {
            return Err(InvoicePersistenceError::connection("database unavailable"));
        }
        self.deleted.lock().expect("lock").push(*id);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Invoice>, InvoicePersistenceError> {
        self.list_calls.fetch_add(1, Ordering::Relaxed);
        Ok(self.inserted.lock().expect("lock").clone())
    }
}

/// User repository double keeping rows in memory.
#[derive(Default)]
pub struct MemoryUserRepository {
    pub rows: Mutex<Vec<User>>,
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        self.rows.lock().expect("lock").push(user.clone());
        Ok(())
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserPersistenceError> {
        Ok(self
            .rows
            .lock()
            .expect("lock")
            .iter()
            .find(|user| user.email() == email)
            .cloned())
    }
}

/// Auth double that always signs in and offers the dashboard redirect.
pub struct AcceptingAuthService;

#[async_trait]
impl AuthService for AcceptingAuthService {
    async fn sign_in(&self, _credentials: &LoginCredentials) -> Result<SignInOutcome, AuthError> {
        Ok(SignInOutcome {
            user_id: UserId::generate(),
            redirect_url: Some(DASHBOARD_PATH.to_owned()),
        })
    }
}

/// Deterministic clock pinned to 2025-05-12T09:30:00Z.
pub struct FixtureClock;

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 12, 9, 30, 0)
            .single()
            .expect("valid fixture time")
    }
}

/// Handle onto the doubles behind an assembled test state.
pub struct TestPorts {
    pub invoices: Arc<RecordingInvoiceRepository>,
    pub users: Arc<MemoryUserRepository>,
    pub view_cache: Arc<InMemoryViewCache>,
}

/// Build an [`HttpState`] over recording doubles.
pub fn test_state(invoices: Arc<RecordingInvoiceRepository>) -> (web::Data<HttpState>, TestPorts) {
    let users = Arc::new(MemoryUserRepository::default());
    let view_cache = Arc::new(InMemoryViewCache::new());
    let state = HttpState::new(HttpStatePorts {
        invoices: invoices.clone(),
        users: users.clone(),
        auth: Arc::new(AcceptingAuthService),
        view_cache: view_cache.clone(),
        clock: Arc::new(FixtureClock),
    });
    (
        web::Data::new(state),
        TestPorts {
            invoices,
            users,
            view_cache,
        },
    )
}

fn session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Assemble the full form-handling surface under `/api/v1`.
pub fn test_app(
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
            .wrap(session_middleware())
            .service(users::sign_up)
            .service(users::login)
            .service(invoices::create_invoice)
            .service(invoices::list_invoices)
            .service(invoices::update_invoice)
            .service(invoices::delete_invoice),
    )
}
