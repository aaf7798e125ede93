//! Single-turn chat orchestration over a completion provider.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use pchat::{ChatGateway, ChatRequest, ErrorKind};
//! use pprovider::{
//!     CompletionProvider, CompletionRequest, ModelRegistry, ProviderError, ProviderFuture,
//!     ProviderId,
//! };
//!
//! struct Echo;
//!
//! impl CompletionProvider for Echo {
//!     fn id(&self) -> ProviderId {
//!         ProviderId::OpenRouter
//!     }
//!
//!     fn complete<'a>(
//!         &'a self,
//!         request: CompletionRequest,
//!     ) -> ProviderFuture<'a, Result<String, ProviderError>> {
//!         Box::pin(async move { Ok(request.prompt) })
//!     }
//! }
//!
//! # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
//! let gateway = ChatGateway::new(Arc::new(Echo), ModelRegistry::new("m1", ["m1"]));
//!
//! let result = gateway.handle(ChatRequest::new("ping")).await;
//! assert_eq!(result.text(), Some("ping"));
//!
//! let rejected = gateway.handle(ChatRequest::new("   ")).await;
//! assert_eq!(rejected.error_kind(), Some(ErrorKind::InvalidRequest));
//! # });
//! ```

mod classify;
mod error;
mod service;
mod types;
mod validate;

pub mod prelude {
    pub use crate::classify::{Classification, FailureCause, classify};
    pub use crate::validate::validate;
    pub use crate::{ChatFailure, ChatGateway, ChatGatewayBuilder, ChatRequest, ChatResult, ErrorKind};
    pub use pcommon::{RequestId, SamplingOptions};
}

pub use classify::{Classification, FailureCause, classify};
pub use error::ChatFailure;
pub use service::{ChatGateway, ChatGatewayBuilder};
pub use types::{ChatRequest, ChatResult, ErrorKind};
pub use validate::{MAX_MESSAGE_CHARS, validate};
pub use pcommon::{RequestId, SamplingOptions};
