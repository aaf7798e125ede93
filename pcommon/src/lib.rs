//! Shared utilities and strongly-typed common values for workspace crates.
//!
//! ```rust
//! use pcommon::{RequestId, SamplingOptions};
//!
//! let request = RequestId::new("a1b2c3d4");
//! let options = SamplingOptions::default().with_temperature(0.3).with_max_tokens(256);
//!
//! assert_eq!(request.as_str(), "a1b2c3d4");
//! assert_eq!(options.max_tokens, 256);
//! ```

pub mod future {
    //! Shared async future aliases.
    //!
    //! ```rust
    //! use pcommon::BoxFuture;
    //!
    //! fn str_len<'a>(value: &'a str) -> BoxFuture<'a, usize> {
    //!     Box::pin(async move { value.len() })
    //! }
    //!
    //! let _future = str_len("hello");
    //! ```

    use std::future::Future;
    use std::pin::Pin;

    pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
}

pub mod context {
    //! Per-request correlation identifiers.
    //!
    //! ```rust
    //! use pcommon::RequestId;
    //!
    //! let generated = RequestId::generate();
    //! assert_eq!(generated.as_str().len(), 8);
    //!
    //! let fixed = RequestId::from("req-42");
    //! assert_eq!(fixed.to_string(), "req-42");
    //! ```

    use std::fmt::{Display, Formatter};

    const GENERATED_LEN: usize = 8;

    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    pub struct RequestId(String);

    impl RequestId {
        pub fn new(value: impl Into<String>) -> Self {
            Self(value.into())
        }

        /// Short random id, the first eight hex digits of a v4 UUID.
        pub fn generate() -> Self {
            let mut value = uuid::Uuid::new_v4().simple().to_string();
            value.truncate(GENERATED_LEN);
            Self(value)
        }

        pub fn as_str(&self) -> &str {
            self.0.as_str()
        }
    }

    impl Display for RequestId {
        fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
            f.write_str(&self.0)
        }
    }

    impl From<String> for RequestId {
        fn from(value: String) -> Self {
            Self(value)
        }
    }

    impl From<&str> for RequestId {
        fn from(value: &str) -> Self {
            Self(value.to_string())
        }
    }
}

pub mod model {
    //! Sampling settings sent with every completion call.
    //!
    //! ```rust
    //! use pcommon::SamplingOptions;
    //!
    //! let options = SamplingOptions::default();
    //! assert_eq!(options.temperature, 0.7);
    //! assert_eq!(options.max_tokens, 1000);
    //! ```

    pub const DEFAULT_TEMPERATURE: f32 = 0.7;
    pub const DEFAULT_MAX_TOKENS: u32 = 1000;

    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct SamplingOptions {
        pub temperature: f32,
        pub max_tokens: u32,
    }

    impl Default for SamplingOptions {
        fn default() -> Self {
            Self {
                temperature: DEFAULT_TEMPERATURE,
                max_tokens: DEFAULT_MAX_TOKENS,
            }
        }
    }

    impl SamplingOptions {
        pub fn with_temperature(mut self, temperature: f32) -> Self {
            self.temperature = temperature;
            self
        }

        pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
            self.max_tokens = max_tokens;
            self
        }
    }
}

pub use context::RequestId;
pub use future::BoxFuture;
pub use model::SamplingOptions;
