//! Pre-flight checks run before any provider call.
//!
//! ```rust
//! use pchat::{ErrorKind, validate};
//! use pprovider::ModelRegistry;
//!
//! let registry = ModelRegistry::new("m1", ["m1"]);
//! assert!(validate("Hi", "m1", &registry).is_ok());
//!
//! let failure = validate("Hi", "m2", &registry).expect_err("m2 is not allowed");
//! assert_eq!(failure.kind, ErrorKind::ModelUnavailable);
//! ```

use pprovider::ModelRegistry;

use crate::ChatFailure;

pub const MAX_MESSAGE_CHARS: usize = 4000;

/// Checks `message` and the already-resolved `model`. Rules run in a fixed
/// order and the first failure is returned.
pub fn validate(message: &str, model: &str, registry: &ModelRegistry) -> Result<(), ChatFailure> {
    if message.trim().is_empty() {
        return Err(ChatFailure::invalid_request("message must not be empty"));
    }

    // Raw length, counted in chars rather than bytes.
    if message.chars().count() > MAX_MESSAGE_CHARS {
        return Err(ChatFailure::invalid_request(format!(
            "message exceeds {MAX_MESSAGE_CHARS} characters"
        )));
    }

    if model.trim().is_empty() {
        return Err(ChatFailure::invalid_request("model must not be empty"));
    }

    if !registry.is_available(model) {
        return Err(ChatFailure::model_unavailable(format!(
            "model '{model}' is not available, allowed: [{}]",
            registry.allowed_models().join(", ")
        )));
    }

    Ok(())
}
