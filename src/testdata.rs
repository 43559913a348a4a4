//! Test data generation
//!
//! Random values and payload builders so individual tests do not collide
//! on uniqueness-constrained fields (plan names, years, emails).

use std::time::{SystemTime, UNIX_EPOCH};

use rand::distributions::Alphanumeric;
use rand::Rng;
use serde_json::{json, Value};

use crate::config::EnvConfig;
use crate::services::LoginRequest;

/// Random alphanumeric string of the given length
pub fn random_string(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Random email on the example.com domain
pub fn random_email() -> String {
    format!("{}@example.com", random_string(8).to_lowercase())
}

/// Unique per-call suffix: epoch millis plus a short random tail
pub fn unique_suffix() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    format!("{}_{}", millis, random_string(6).to_lowercase())
}

/// The configured default user's credentials
pub fn valid_credentials(config: &EnvConfig) -> LoginRequest {
    LoginRequest::new(
        config.credentials.email.clone(),
        config.credentials.password.clone(),
    )
}

/// Randomized credentials guaranteed unknown to the system under test
pub fn invalid_credentials() -> LoginRequest {
    LoginRequest::new(random_email(), random_string(12))
}

/// Plan creation payload with a unique name, number, and year window.
///
/// Plan years are spread over a future 20-year window so parallel runs do
/// not overlap existing plans.
pub fn plan_payload() -> Value {
    let suffix = unique_suffix();
    let mut rng = rand::thread_rng();

    let base_year = 2070u64;
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default();
    let year = base_year + millis % 20;

    json!({
        "employerId": 79,
        "planName": format!("Files API {}", suffix),
        "planNumber": rng.gen_range(100..1000),
        "planStartDate": format!("{}-01-01T12:00:00.000Z", year),
        "planEndDate": format!("{}-12-31T12:00:00.000Z", year),
        "sponsorEin": "99-9999999",
        "sponsorName": "John Doe",
        "sponsorPhone": "(123) 456-7890",
        "sponsorAddress": "123 Main St, City, Country",
        "adminSameAsSponsor": true,
        "adminName": "John Doe",
        "adminPhone": "(123) 456-7890",
        "adminAddress": "123 Main St, City, Country",
        "erisaStatus": "Unknown",
        "acaStatus": "50+ full-time equivalents",
        "cobraStatus": "20+ employees",
        "marketSegment": "100-500 employees",
        "participantsCount": "100+ employee-participants",
        "originalEffectiveDate": "2024-01-01T12:00:00.000Z",
    })
}
