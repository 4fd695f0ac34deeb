//! Invoice-management backend library modules.
//!
//! Server-side form handling for user sign-up/sign-in and invoice CRUD:
//! validation in `domain`, HTTP adapters in `inbound::http`, PostgreSQL and
//! cache adapters in `outbound`, app assembly in `server`.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
