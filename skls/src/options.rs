//! Read-time configuration.

/// How strings that are not valid windows-1251 are handled.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum TextPolicy {
    /// Fail with [`crate::Error::TextDecode`].
    #[default]
    Strict,
    /// Replace invalid bytes with U+FFFD and log a warning.
    Lossy,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct ReadOptions {
    /// Applies to animation, bone and mark names.
    pub text: TextPolicy,
}

impl ReadOptions {
    pub fn lossy() -> Self {
        Self {
            text: TextPolicy::Lossy,
        }
    }
}
