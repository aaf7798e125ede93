//! Keyword-based mapping of provider failure text onto [`ErrorKind`].
//!
//! ```rust
//! use pchat::{ErrorKind, FailureCause, classify};
//!
//! let classification = classify("connection timeout after 30s");
//! assert_eq!(classification.kind, ErrorKind::ApiConnection);
//! assert_eq!(classification.cause, FailureCause::Timeout);
//!
//! assert_eq!(classify("weird custom error").kind, ErrorKind::Unknown);
//! ```

use crate::ErrorKind;

/// Which keyword rule matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureCause {
    Timeout,
    Unauthorized,
    RateLimited,
    ServerError,
    Unrecognized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub kind: ErrorKind,
    pub cause: FailureCause,
}

const RULES: &[(&[&str], FailureCause)] = &[
    (&["timeout"], FailureCause::Timeout),
    (&["401", "unauthorized"], FailureCause::Unauthorized),
    (&["429", "rate limit"], FailureCause::RateLimited),
    (&["500", "502", "503"], FailureCause::ServerError),
];

/// Rules are checked in order and the first match wins. Matching ignores
/// ASCII case. Never fails.
pub fn classify(description: &str) -> Classification {
    let lowered = description.to_ascii_lowercase();

    for (keywords, cause) in RULES {
        if keywords.iter().any(|keyword| lowered.contains(keyword)) {
            return Classification {
                kind: ErrorKind::ApiConnection,
                cause: *cause,
            };
        }
    }

    Classification {
        kind: ErrorKind::Unknown,
        cause: FailureCause::Unrecognized,
    }
}
