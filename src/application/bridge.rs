/// プロキシ統合ブリッジ
///
/// 1回の呼び出しで以下を順に実行する:
/// 1. イベントJSONをデコード
/// 2. RequestBuilderでハンドラーリクエストを構築
/// 3. ResponseSinkに対してハンドラーを同期実行
/// 4. ResponseEncoderでプロキシレスポンスへ変換
/// 5. レスポンスJSONをエンコード
///
/// 呼び出し間で共有する可変状態は持たない。
use thiserror::Error;

use crate::application::{
    BuildError, NoDiagnostics, RequestBuilder, ResponseDiagnostics, ResponseEncoder,
};
use crate::domain::{Handler, InvocationContext, ProxyEvent, ProxyResponse, ResponseSink};

/// 呼び出しエラー（いずれもその呼び出しにとって致命的）
#[derive(Debug, Error)]
pub enum InvokeError {
    /// イベントJSONのデコード失敗
    #[error("failed to decode proxy event: {0}")]
    EventDecode(#[source] serde_json::Error),

    /// リクエスト構築失敗
    #[error(transparent)]
    Build(#[from] BuildError),

    /// レスポンスJSONのエンコード失敗
    #[error("failed to encode proxy response: {0}")]
    ResponseEncode(#[source] serde_json::Error),
}

/// ハンドラーをプロキシ統合のLambdaとして動かすブリッジ
pub struct LambdaProxyBridge<H, D = NoDiagnostics> {
    handler: H,
    builder: RequestBuilder,
    encoder: ResponseEncoder,
    diagnostics: D,
}

impl<H> LambdaProxyBridge<H>
where
    H: Handler,
{
    /// 診断通知なしでブリッジを作成
    pub fn new(handler: H) -> Self {
        Self::with_diagnostics(handler, NoDiagnostics)
    }
}

impl<H, D> LambdaProxyBridge<H, D>
where
    H: Handler,
    D: ResponseDiagnostics,
{
    /// 診断通知先を指定してブリッジを作成
    pub fn with_diagnostics(handler: H, diagnostics: D) -> Self {
        Self {
            handler,
            builder: RequestBuilder::new(),
            encoder: ResponseEncoder::default(),
            diagnostics,
        }
    }

    /// レスポンスエンコーダーを差し替える
    pub fn with_encoder(mut self, encoder: ResponseEncoder) -> Self {
        self.encoder = encoder;
        self
    }

    pub fn encoder(&self) -> &ResponseEncoder {
        &self.encoder
    }

    /// イベントJSONを処理してレスポンスJSONを返す
    pub fn invoke(
        &self,
        context: InvocationContext,
        payload: &[u8],
    ) -> Result<Vec<u8>, InvokeError> {
        let event: ProxyEvent =
            serde_json::from_slice(payload).map_err(InvokeError::EventDecode)?;

        let response = self.handle_event(context, &event)?;

        serde_json::to_vec(&response).map_err(InvokeError::ResponseEncode)
    }

    /// デコード済みイベントを処理する
    pub fn handle_event(
        &self,
        context: InvocationContext,
        event: &ProxyEvent,
    ) -> Result<ProxyResponse, InvokeError> {
        let request = self.builder.build(event, context)?;

        let mut sink = ResponseSink::new();
        self.handler.serve(&mut sink, &request);
        let sealed = sink.seal();

        Ok(self.encoder.encode(&sealed, &self.diagnostics))
    }
}
