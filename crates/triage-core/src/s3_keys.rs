//! S3 key/path conventions.
//!
//! Pure string functions with no AWS SDK dependency. These define the canonical
//! layout of objects in the transcript bucket.

/// Key for one transcript snapshot, e.g.
/// `whatsapp:+15551234567/transcript_20250101T093000.125Z.txt`.
///
/// Keys are namespaced by user id and suffixed with the UTC upload time at
/// millisecond resolution, so snapshots taken within the same second get
/// distinct keys.
pub fn transcript(user_id: &str, at: jiff::Timestamp) -> String {
    format!(
        "{user_id}/transcript_{}.{:03}Z.txt",
        at.strftime("%Y%m%dT%H%M%S"),
        at.subsec_millisecond()
    )
}

