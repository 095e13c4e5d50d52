/// ハンドラーに渡すリクエスト
///
/// プロキシイベントから再構築される、接続を持たない合成リクエスト。
/// 構築後は不変。
use std::time::{Duration, SystemTime};

use url::Url;

use super::HeaderMultimap;

/// 合成リクエストのプロトコルバージョン（固定）
pub const SYNTHETIC_PROTOCOL: &str = "HTTP/1.0";

/// 呼び出しのキャンセル/期限コンテキスト
///
/// ハンドラーは期限を観測して処理を打ち切ってもよい。
/// ブリッジ自身はタイムアウトを強制しない。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvocationContext {
    request_id: String,
    deadline: Option<SystemTime>,
}

impl InvocationContext {
    pub fn new(request_id: impl Into<String>, deadline: Option<SystemTime>) -> Self {
        Self {
            request_id: request_id.into(),
            deadline,
        }
    }

    /// 期限なしのコンテキスト
    pub fn background() -> Self {
        Self::default()
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    pub fn deadline(&self) -> Option<SystemTime> {
        self.deadline
    }

    /// 期限までの残り時間（期限なしならNone、超過済みならゼロ）
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline.map(|deadline| {
            deadline
                .duration_since(SystemTime::now())
                .unwrap_or(Duration::ZERO)
        })
    }

    /// 期限を過ぎているか
    pub fn is_expired(&self) -> bool {
        self.remaining().is_some_and(|remaining| remaining.is_zero())
    }
}

/// ハンドラー互換リクエスト
///
/// `content_length`は常にデコード済みボディのバイト長と一致する。
#[derive(Debug, Clone, PartialEq)]
pub struct HandlerRequest {
    method: String,
    url: Url,
    request_uri: String,
    headers: HeaderMultimap,
    body: Vec<u8>,
    context: InvocationContext,
}

impl HandlerRequest {
    /// リクエストを組み立てる
    ///
    /// 呼び出し側はURL解決とボディのデコードを済ませておく。
    pub(crate) fn new(
        method: String,
        url: Url,
        request_uri: String,
        headers: HeaderMultimap,
        body: Vec<u8>,
        context: InvocationContext,
    ) -> Self {
        Self {
            method,
            url,
            request_uri,
            headers,
            body,
            context,
        }
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    /// 解決済みURL
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// URLのパス部分
    pub fn path(&self) -> &str {
        self.url.path()
    }

    /// イベントに含まれていたパス文字列そのまま
    pub fn request_uri(&self) -> &str {
        &self.request_uri
    }

    pub fn protocol(&self) -> &'static str {
        SYNTHETIC_PROTOCOL
    }

    pub fn headers(&self) -> &HeaderMultimap {
        &self.headers
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn content_length(&self) -> u64 {
        self.body.len() as u64
    }

    pub fn context(&self) -> &InvocationContext {
        &self.context
    }
}
