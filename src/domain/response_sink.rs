/// レスポンス捕捉シンク
///
/// 1回の呼び出し中にハンドラーが書き込んだステータス・ヘッダー・ボディを
/// メモリ上に蓄積する。ハンドラーが戻ったら`seal`で読み取り専用に確定する。
use std::io;

use super::{HeaderMultimap, ResponseWriter};

/// ボディ書き込み時にステータス未設定なら採用されるステータス
pub const IMPLICIT_STATUS: u16 = 200;

/// 書き込み中のレスポンス（open phase）
#[derive(Debug, Default)]
pub struct ResponseSink {
    /// 初回アクセスまで作成しない
    headers: Option<HeaderMultimap>,
    status: Option<u16>,
    body: Vec<u8>,
    /// 書き込まれた総バイト数（常にbody.len()と一致）
    written: u64,
    /// 一度でもwriteが呼ばれたらステータスは確定
    committed: bool,
}

impl ResponseSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// 書き込みを締め切り、不変のレスポンスへ変換する
    pub fn seal(self) -> SealedResponse {
        debug_assert_eq!(self.written, self.body.len() as u64);

        SealedResponse {
            status: self.status,
            headers: self.headers.unwrap_or_default(),
            body: self.body,
        }
    }
}

impl ResponseWriter for ResponseSink {
    fn headers(&mut self) -> &mut HeaderMultimap {
        self.headers.get_or_insert_with(HeaderMultimap::new)
    }

    fn write(&mut self, bytes: &[u8]) -> usize {
        if self.status.is_none() {
            self.status = Some(IMPLICIT_STATUS);
        }
        self.committed = true;

        self.body.extend_from_slice(bytes);
        self.written += bytes.len() as u64;
        bytes.len()
    }

    fn set_status(&mut self, code: u16) {
        // ボディ書き込み後はクライアントから見たステータスは変わらない
        if !self.committed {
            self.status = Some(code);
        }
    }
}

impl io::Write for ResponseSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(ResponseWriter::write(self, buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// 確定済みレスポンス（sealed phase）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedResponse {
    status: Option<u16>,
    headers: HeaderMultimap,
    body: Vec<u8>,
}

impl SealedResponse {
    /// ステータス（writeもset_statusも呼ばれなければNone）
    pub fn status(&self) -> Option<u16> {
        self.status
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
}
