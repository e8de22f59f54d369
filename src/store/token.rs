//! Report identifier generation.

use rand::RngCore;

/// Generate a collision-resistant report identifier.
///
/// Uses the OS secure random generator; when that is unavailable,
/// falls back to a timestamp-based token. The fallback has lower
/// collision resistance, acceptable only because entries are
/// session-scoped and single-user.
pub fn generate_report_id() -> String {
    let mut bytes = [0u8; 16];
    match rand::rngs::OsRng.try_fill_bytes(&mut bytes) {
        Ok(()) => uuid::Builder::from_random_bytes(bytes)
            .into_uuid()
            .to_string(),
        Err(e) => {
            tracing::warn!(error = %e, "Secure random unavailable, using timestamp token");
            timestamp_token()
        }
    }
}

fn timestamp_token() -> String {
    format!("{:x}", chrono::Utc::now().timestamp_nanos_opt().unwrap_or(0))
}
