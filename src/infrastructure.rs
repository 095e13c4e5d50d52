// Infrastructure layer modules
pub mod config;
pub mod diagnostics;
pub mod lambda_adapter;
pub mod logging;

// Re-exports
pub use config::{BridgeConfig, ENV_UNSET_STATUS};
pub use diagnostics::TracingDiagnostics;
pub use lambda_adapter::{handle_lambda_event, invocation_context, run_bridge};
pub use logging::init_logging;
