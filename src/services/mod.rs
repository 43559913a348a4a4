//! Service façades over the HTTP request layer
//!
//! Thin, stateless wrappers exposing business-named operations plus the
//! verification helpers that keep test bodies declarative. Each façade
//! borrows a shared [`crate::client::ApiClient`] and adds nothing but
//! endpoint knowledge and schema selection.

mod auth;
mod plans;

pub use auth::{AuthApi, LoginRequest};
pub use plans::{PlanFile, PlansApi};
