//! The relay message payload.

use serde::{Deserialize, Serialize};

/// One contact message, as handed to the email relay.
///
/// The field set mirrors the relay template: who the message is from, a
/// reply address, a subject line, and the body text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Display name of the sender.
    pub from_name: String,
    /// Reply address of the sender.
    pub from_email: String,
    /// Subject line.
    pub subject: String,
    /// Body text.
    pub body: String,
}

impl Message {
    /// Build a message payload.
    pub fn new(
        from_name: impl Into<String>,
        from_email: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            from_name: from_name.into(),
            from_email: from_email.into(),
            subject: subject.into(),
            body: body.into(),
        }
    }
}
