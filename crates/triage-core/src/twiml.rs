//! TwiML reply rendering.

use quick_xml::escape::escape;

pub const CONTENT_TYPE: &str = "application/xml";

/// Wrap `reply` in a minimal TwiML document with a single `<Message>`.
///
/// The reply is XML-escaped so model or user text can never break the
/// document.
pub fn render(reply: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<Response>\n    <Message>{}</Message>\n</Response>",
        escape(reply)
    )
}
