//! Production-friendly observability hooks for the provider retry executor.
//!
//! ```rust
//! use pobserve::{FanoutOperationHooks, MetricsOperationHooks, SafeOperationHooks, TracingOperationHooks};
//!
//! let _hooks = FanoutOperationHooks::new()
//!     .with(SafeOperationHooks::new(TracingOperationHooks))
//!     .with(SafeOperationHooks::new(MetricsOperationHooks));
//! ```

mod fanout_hooks;
mod metrics_hooks;
mod safe_hooks;
mod tracing_hooks;

pub use fanout_hooks::FanoutOperationHooks;
pub use metrics_hooks::MetricsOperationHooks;
pub use safe_hooks::SafeOperationHooks;
pub use tracing_hooks::TracingOperationHooks;

pub mod prelude {
    pub use crate::{
        FanoutOperationHooks, MetricsOperationHooks, SafeOperationHooks, TracingOperationHooks,
    };
}

#[cfg(test)]
mod tests;
