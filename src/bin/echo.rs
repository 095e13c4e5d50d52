/// エコーLambdaエントリポイント
///
/// API Gatewayプロキシ統合で受け取ったボディに"Hello "を付けて返す。
/// ブリッジの動作確認用。
use lambda_proxy_bridge::application::LambdaProxyBridge;
use lambda_proxy_bridge::domain::{HandlerRequest, ResponseWriter};
use lambda_proxy_bridge::infrastructure::{
    BridgeConfig, TracingDiagnostics, init_logging, run_bridge,
};
use lambda_runtime::Error;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // 構造化ログを初期化
    init_logging();

    info!("echo Lambda関数を初期化");

    let config = BridgeConfig::from_env();
    let bridge =
        LambdaProxyBridge::with_diagnostics(echo, TracingDiagnostics).with_encoder(config.encoder());

    run_bridge(bridge).await
}

/// 受信ボディを"Hello "の後ろに付けて返す
fn echo(response: &mut dyn ResponseWriter, request: &HandlerRequest) {
    let content_type = request
        .headers()
        .get("Content-Type")
        .unwrap_or("text/plain")
        .to_string();
    response.headers().add("Content-Type", content_type);

    response.write_str("Hello ");
    response.write(request.body());
}
