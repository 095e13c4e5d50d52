/// 捕捉済みレスポンス → プロキシレスポンス変換
///
/// ボディのテキスト/バイナリ判定、複数値ヘッダーの縮約、
/// Content-Lengthの付与を行う。
use std::collections::BTreeMap;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::domain::{HeaderMultimap, ProxyResponse, SealedResponse};

/// 出力ヘッダーに常に付与するContent-Lengthの名前
pub const CONTENT_LENGTH: &str = "Content-Length";

/// テキストとしてそのまま出力できるバイトの範囲（両端含む）
const TEXT_BYTE_MIN: u8 = 32;
const TEXT_BYTE_MAX: u8 = 125;

/// ステータス未設定時の扱い
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnsetStatusPolicy {
    /// 0のまま出力する
    #[default]
    Preserve,
    /// 200として出力する
    DefaultOk,
}

impl UnsetStatusPolicy {
    fn resolve(self) -> u16 {
        match self {
            UnsetStatusPolicy::Preserve => 0,
            UnsetStatusPolicy::DefaultOk => 200,
        }
    }
}

/// 変換中に検出した非致命的な状況の通知先
pub trait ResponseDiagnostics {
    /// 複数値ヘッダーを先頭の値に縮約した
    fn header_collapsed(&self, _name: &str, _kept: &str, _dropped: &[String]) {}

    /// ハンドラーがステータスを一度も設定しなかった
    fn status_unset(&self, _emitted: u16) {}
}

/// 何も通知しない
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDiagnostics;

impl ResponseDiagnostics for NoDiagnostics {}

impl<D: ResponseDiagnostics + ?Sized> ResponseDiagnostics for &D {
    fn header_collapsed(&self, name: &str, kept: &str, dropped: &[String]) {
        (**self).header_collapsed(name, kept, dropped)
    }

    fn status_unset(&self, emitted: u16) {
        (**self).status_unset(emitted)
    }
}

/// ボディの出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyEncoding {
    Text,
    Base64,
}

impl BodyEncoding {
    /// 全バイトが[32, 125]に収まればText、1つでも外れればBase64
    pub fn detect(body: &[u8]) -> Self {
        if body
            .iter()
            .all(|byte| (TEXT_BYTE_MIN..=TEXT_BYTE_MAX).contains(byte))
        {
            BodyEncoding::Text
        } else {
            BodyEncoding::Base64
        }
    }
}

/// レスポンスエンコーダー
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseEncoder {
    unset_status: UnsetStatusPolicy,
}

impl ResponseEncoder {
    pub fn new(unset_status: UnsetStatusPolicy) -> Self {
        Self { unset_status }
    }

    pub fn unset_status(&self) -> UnsetStatusPolicy {
        self.unset_status
    }

    /// 確定済みレスポンスをプロキシレスポンスに変換
    pub fn encode<D>(&self, response: &SealedResponse, diagnostics: &D) -> ProxyResponse
    where
        D: ResponseDiagnostics + ?Sized,
    {
        let status_code = match response.status() {
            Some(code) => code,
            None => {
                let emitted = self.unset_status.resolve();
                diagnostics.status_unset(emitted);
                emitted
            }
        };

        let mut headers = BTreeMap::new();
        for (name, kept, dropped) in collapse_headers(response.headers()) {
            if !dropped.is_empty() {
                diagnostics.header_collapsed(name, kept, &dropped);
            }
            headers.insert(name.to_string(), kept.to_string());
        }
        headers.insert(
            CONTENT_LENGTH.to_string(),
            response.content_length().to_string(),
        );

        let (is_base64_encoded, body) = match BodyEncoding::detect(response.body()) {
            BodyEncoding::Text => (false, String::from_utf8_lossy(response.body()).into_owned()),
            BodyEncoding::Base64 => (true, STANDARD.encode(response.body())),
        };

        ProxyResponse {
            status_code,
            headers,
            is_base64_encoded,
            body,
        }
    }
}

/// 大文字小文字を無視して同名ヘッダーをまとめる
///
/// 最初に追加された綴りと値を残し、残りを`dropped`として返す。
/// Content-Lengthはエンコーダーが実バイト数で付け直すため除外する。
fn collapse_headers(headers: &HeaderMultimap) -> Vec<(&str, &str, Vec<String>)> {
    let mut groups: Vec<(String, &str, &str, Vec<String>)> = Vec::new();
    for (name, values) in headers.iter() {
        if name.eq_ignore_ascii_case(CONTENT_LENGTH) {
            continue;
        }
        let folded = name.to_ascii_lowercase();
        match groups.iter_mut().find(|(key, ..)| *key == folded) {
            Some((_, _, _, dropped)) => dropped.extend(values.iter().cloned()),
            None => {
                let Some((kept, rest)) = values.split_first() else {
                    continue;
                };
                groups.push((folded, name, kept.as_str(), rest.to_vec()));
            }
        }
    }
    groups
        .into_iter()
        .map(|(_, name, kept, dropped)| (name, kept, dropped))
        .collect()
}
