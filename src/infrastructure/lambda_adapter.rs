/// lambda_runtimeとブリッジの接続
///
/// 呼び出しループ自体はlambda_runtimeが持つ。
/// ここでは1イベントごとにブリッジへ委譲するサービスを組み立てる。
use std::time::{Duration, UNIX_EPOCH};

use lambda_runtime::{Context, Error, LambdaEvent, service_fn};
use tracing::{error, info, info_span};

use crate::application::{LambdaProxyBridge, ResponseDiagnostics};
use crate::domain::{Handler, InvocationContext, ProxyEvent, ProxyResponse};

/// Lambdaコンテキストから呼び出しコンテキストを作成
///
/// deadlineが0（未設定）の場合は期限なしとして扱う。
pub fn invocation_context(context: &Context) -> InvocationContext {
    let deadline =
        (context.deadline > 0).then(|| UNIX_EPOCH + Duration::from_millis(context.deadline));
    InvocationContext::new(context.request_id.clone(), deadline)
}

/// 1件のLambdaイベントをブリッジで処理する
///
/// 変換エラーはログ出力した上で呼び出しの失敗として返す。
pub fn handle_lambda_event<H, D>(
    bridge: &LambdaProxyBridge<H, D>,
    event: LambdaEvent<ProxyEvent>,
) -> Result<ProxyResponse, Error>
where
    H: Handler,
    D: ResponseDiagnostics,
{
    let span = info_span!("invocation", request_id = %event.context.request_id);
    let _guard = span.enter();

    info!(
        method = %event.payload.http_method,
        path = %event.payload.path,
        is_base64_encoded = event.payload.is_base64_encoded,
        "プロキシイベント受信"
    );

    let context = invocation_context(&event.context);
    match bridge.handle_event(context, &event.payload) {
        Ok(response) => {
            info!(
                status_code = response.status_code,
                is_base64_encoded = response.is_base64_encoded,
                "プロキシレスポンス送信"
            );
            Ok(response)
        }
        Err(err) => {
            error!(error = %err, "プロキシイベント変換エラー");
            Err(err.into())
        }
    }
}

/// ブリッジをLambda関数として実行する
pub async fn run_bridge<H, D>(bridge: LambdaProxyBridge<H, D>) -> Result<(), Error>
where
    H: Handler,
    D: ResponseDiagnostics,
{
    info!(unset_status = ?bridge.encoder().unset_status(), "ブリッジ起動");

    let bridge = &bridge;
    lambda_runtime::run(service_fn(move |event: LambdaEvent<ProxyEvent>| async move {
        handle_lambda_event(bridge, event)
    }))
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ResponseWriter, handler_fn};
    use crate::infrastructure::logging::init_test_logging;

    fn lambda_event(payload: ProxyEvent) -> LambdaEvent<ProxyEvent> {
        LambdaEvent::new(payload, Context::default())
    }

    #[test]
    fn test_invocation_context_without_deadline() {
        let context = invocation_context(&Context::default());

        assert!(context.deadline().is_none());
        assert!(!context.is_expired());
    }

    #[test]
    fn test_invocation_context_with_deadline() {
        let mut lambda_context = Context::default();
        lambda_context.request_id = "req-123".to_string();
        lambda_context.deadline = 1_428_582_896_000;

        let context = invocation_context(&lambda_context);

        assert_eq!(context.request_id(), "req-123");
        assert_eq!(
            context.deadline(),
            Some(UNIX_EPOCH + Duration::from_millis(1_428_582_896_000))
        );
        assert!(context.is_expired());
    }

    #[tokio::test]
    async fn test_handle_lambda_event_success() {
        init_test_logging();
        let bridge = LambdaProxyBridge::new(handler_fn(|response, request| {
            response.write_str("Hello ");
            response.write(request.body());
        }));
        let payload = ProxyEvent {
            path: "/path/to/resource".to_string(),
            http_method: "POST".to_string(),
            body: "Mali Mirassin".to_string(),
            ..ProxyEvent::default()
        };

        let response = handle_lambda_event(&bridge, lambda_event(payload)).unwrap();

        assert_eq!(response.status_code, 200);
        assert_eq!(response.body, "Hello Mali Mirassin");
    }

    #[tokio::test]
    async fn test_handle_lambda_event_failure() {
        init_test_logging();
        let bridge = LambdaProxyBridge::new(handler_fn(|response, _request| {
            response.set_status(204);
        }));
        let payload = ProxyEvent {
            path: "/".to_string(),
            body: "!!!".to_string(),
            is_base64_encoded: true,
            ..ProxyEvent::default()
        };

        let err = handle_lambda_event(&bridge, lambda_event(payload)).unwrap_err();

        assert!(err.to_string().contains("base64"));
    }
}
