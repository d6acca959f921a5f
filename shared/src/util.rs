//! Small helpers shared by the server and its tests

use rand::Rng;
use rand::distributions::Alphanumeric;

/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Today's calendar date (UTC)
pub fn today() -> chrono::NaiveDate {
    chrono::Utc::now().date_naive()
}

/// Fresh document key
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Length of the one-time password issued to members created by staff
pub const TEMPORARY_PASSWORD_LEN: usize = 12;

/// Random alphanumeric password, returned once to the caller and stored only
/// as a hash.
pub fn temporary_password() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TEMPORARY_PASSWORD_LEN)
        .map(char::from)
        .collect()
}

/// Membership number in the form `MEM-XXXXXXXX` (uppercase alphanumerics)
pub fn membership_number() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(8)
        .map(|b| char::from(b).to_ascii_uppercase())
        .collect();
    format!("MEM-{suffix}")
}
