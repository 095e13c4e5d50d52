// アプリケーション層モジュール
pub mod bridge;
pub mod request_builder;
pub mod response_encoder;

// 再エクスポート
pub use bridge::{InvokeError, LambdaProxyBridge};
pub use request_builder::{BuildError, PathError, RequestBuilder, SYNTHETIC_ORIGIN};
pub use response_encoder::{
    BodyEncoding, CONTENT_LENGTH, NoDiagnostics, ResponseDiagnostics, ResponseEncoder,
    UnsetStatusPolicy,
};
