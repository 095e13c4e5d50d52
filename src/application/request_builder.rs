/// プロキシイベント → ハンドラーリクエスト変換
///
/// パスのURL解決、ヘッダーのコピー、ボディのbase64デコードを行う。
/// どこかで失敗した場合、部分的なリクエストは作らない。
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use thiserror::Error;
use url::Url;

use crate::domain::{HandlerRequest, HeaderMultimap, InvocationContext, ProxyEvent};

/// 相対パスを解決する合成オリジン
pub const SYNTHETIC_ORIGIN: &str = "http://localhost/";

/// pathを不正とみなす理由
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PathError {
    /// 制御文字（0x00-0x1f, 0x7f）を含む
    #[error("invalid control character at byte {offset}")]
    ControlCharacter { offset: usize },

    /// `%`の後に16進数2桁が続かない
    #[error("invalid percent-escape at byte {offset}")]
    InvalidEscape { offset: usize },

    /// `:`で始まる
    #[error("missing protocol scheme")]
    MissingScheme,

    /// スキームなしで最初のセグメントに`:`を含む
    #[error("first path segment cannot contain colon")]
    ColonInFirstSegment,

    /// URLとして解決できない
    #[error(transparent)]
    Url(#[from] url::ParseError),
}

/// リクエスト構築エラー
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BuildError {
    /// pathがURLとして解釈できない
    #[error("malformed path {path:?}: {source}")]
    MalformedPath {
        path: String,
        #[source]
        source: PathError,
    },

    /// isBase64Encodedなのにbodyが正しいbase64でない
    #[error("failed to decode base64 body: {0}")]
    BodyDecode(#[from] base64::DecodeError),
}

/// リクエストビルダー
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestBuilder;

impl RequestBuilder {
    pub fn new() -> Self {
        Self
    }

    /// イベントからハンドラーリクエストを構築
    ///
    /// # 戻り値
    /// * `Ok(HandlerRequest)` - 構築成功
    /// * `Err(BuildError::MalformedPath)` - pathの解析失敗
    /// * `Err(BuildError::BodyDecode)` - base64デコード失敗
    pub fn build(
        &self,
        event: &ProxyEvent,
        context: InvocationContext,
    ) -> Result<HandlerRequest, BuildError> {
        let url = resolve_path(&event.path).map_err(|source| BuildError::MalformedPath {
            path: event.path.clone(),
            source,
        })?;

        // 受信側は1名前1値なので、ここでマージは起きない
        let headers: HeaderMultimap = event
            .headers
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
            .collect();

        let body = if event.is_base64_encoded {
            STANDARD.decode(&event.body)?
        } else {
            event.body.as_bytes().to_vec()
        };

        Ok(HandlerRequest::new(
            event.http_method.clone(),
            url,
            event.path.clone(),
            headers,
            body,
            context,
        ))
    }
}

/// pathを検証し、合成オリジンに対して解決する
///
/// URLパーサーは不正なエスケープや制御文字を黙って書き換えるため、
/// 解決前に明示的に弾く。
fn resolve_path(path: &str) -> Result<Url, PathError> {
    validate_path(path)?;
    Ok(Url::parse(SYNTHETIC_ORIGIN)?.join(path)?)
}

fn validate_path(path: &str) -> Result<(), PathError> {
    if let Some(offset) = path.bytes().position(|byte| byte < 0x20 || byte == 0x7f) {
        return Err(PathError::ControlCharacter { offset });
    }

    // クエリ部分のエスケープは検証しない（フラグメントは検証する）
    let (before_fragment, fragment_start) = match path.find('#') {
        Some(index) => (&path[..index], Some(index + 1)),
        None => (path, None),
    };
    let path_part = before_fragment
        .split_once('?')
        .map_or(before_fragment, |(path_part, _)| path_part);
    validate_escapes(path_part, 0)?;
    if let Some(start) = fragment_start {
        validate_escapes(&path[start..], start)?;
    }

    if path.starts_with(':') {
        return Err(PathError::MissingScheme);
    }
    if !has_scheme(path) {
        let first_segment = path_part.split('/').next().unwrap_or_default();
        if first_segment.contains(':') {
            return Err(PathError::ColonInFirstSegment);
        }
    }

    Ok(())
}

/// `%`の後に16進数2桁が続くことを確認する
fn validate_escapes(part: &str, base_offset: usize) -> Result<(), PathError> {
    let bytes = part.as_bytes();
    for (index, _) in bytes.iter().enumerate().filter(|(_, byte)| **byte == b'%') {
        let valid = bytes
            .get(index + 1..index + 3)
            .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));
        if !valid {
            return Err(PathError::InvalidEscape {
                offset: base_offset + index,
            });
        }
    }
    Ok(())
}

/// `scheme:`で始まるか（英字で始まり、英数字と`+-.`が続く）
fn has_scheme(path: &str) -> bool {
    let Some((scheme, _)) = path.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|first| first.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}
