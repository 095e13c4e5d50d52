// Domain layer modules
pub mod handler;
pub mod handler_request;
pub mod header_multimap;
pub mod proxy_event;
pub mod response_sink;

#[cfg(test)]
pub(crate) mod test_support;

// Re-exports
pub use handler::{Handler, ResponseWriter, handler_fn};
pub use handler_request::{HandlerRequest, InvocationContext, SYNTHETIC_PROTOCOL};
pub use header_multimap::HeaderMultimap;
pub use proxy_event::{ProxyEvent, ProxyResponse};
pub use response_sink::{IMPLICIT_STATUS, ResponseSink, SealedResponse};
