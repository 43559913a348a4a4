//! Apiprobe - typed API test-harness core

pub mod assertions;
pub mod client;
pub mod config;
pub mod error;
pub mod retry;
pub mod schemas;
pub mod services;
pub mod testdata;

pub use client::{ApiClient, ApiResponse, HttpMethod, RequestOptions, ResponseBody};
pub use config::{Credentials, EnvConfig};
pub use error::{FixSuggestion, ProbeError, Result};
pub use retry::RetryPolicy;
pub use services::{AuthApi, LoginRequest, PlanFile, PlansApi};
