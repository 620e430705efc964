//! Id generation for user-created records.

use rand::Rng;

/// Generate a prefixed, collision-resistant id for a user-created record.
/// Timestamp millis keep ids roughly sortable; the random suffix guards
/// against same-millisecond creation.
pub(crate) fn new_id(prefix: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let suffix: u32 = rand::thread_rng().gen();
    format!("{prefix}-{millis:x}-{suffix:08x}")
}
