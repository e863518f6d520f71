//! # Payments Hex
//!
//! Application service layer and HTTP adapter for the payments service.
//!
//! ## Architecture
//!
//! - `service/` - Application service (validation and the processed-state rules)
//! - `inbound/` - HTTP adapter (Axum server)
//! - `openapi/` - OpenAPI document served at `/api-docs/openapi.json`
//!
//! The service is generic over `R: PaymentRepository`, allowing
//! different repository implementations to be injected.

pub mod inbound;
pub mod openapi;
pub mod service;


pub use service::PaymentService;
