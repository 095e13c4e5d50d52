/// 同期HTTPハンドラーの抽象
///
/// ハンドラーはリクエストを受け取り、ResponseWriterへステータス・ヘッダー・
/// ボディを書き込む。戻った時点でレスポンスは確定する。
use super::{HandlerRequest, HeaderMultimap};

/// ハンドラーから見たレスポンス書き込み先
pub trait ResponseWriter {
    /// レスポンスヘッダーへの可変参照（初回アクセス時に作成）
    fn headers(&mut self) -> &mut HeaderMultimap;

    /// ボディにバイト列を追記し、受け付けたバイト数を返す
    ///
    /// ステータス未設定なら200が確定する。
    fn write(&mut self, bytes: &[u8]) -> usize;

    /// ステータスコードを設定
    fn set_status(&mut self, code: u16);

    /// 文字列をボディに追記
    fn write_str(&mut self, text: &str) -> usize {
        self.write(text.as_bytes())
    }
}

/// 同期リクエストハンドラー
pub trait Handler {
    fn serve(&self, response: &mut dyn ResponseWriter, request: &HandlerRequest);
}

impl<F> Handler for F
where
    F: Fn(&mut dyn ResponseWriter, &HandlerRequest),
{
    fn serve(&self, response: &mut dyn ResponseWriter, request: &HandlerRequest) {
        self(response, request)
    }
}

/// クロージャからハンドラーを作成
///
/// 引数の型注釈なしでクロージャを渡せるようにするためのヘルパー。
pub fn handler_fn<F>(f: F) -> F
where
    F: Fn(&mut dyn ResponseWriter, &HandlerRequest),
{
    f
}
