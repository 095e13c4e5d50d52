/// ブリッジ設定
///
/// 環境変数から読み込む。未設定・不正値はデフォルトにフォールバックする。
use tracing::info;

use crate::application::{ResponseEncoder, UnsetStatusPolicy};

/// 環境変数名: ステータス未設定時の扱い（preserve | ok）
pub const ENV_UNSET_STATUS: &str = "BRIDGE_UNSET_STATUS";

/// ブリッジ設定
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BridgeConfig {
    /// ハンドラーがステータスを設定しなかった場合の出力
    pub unset_status: UnsetStatusPolicy,
}

impl BridgeConfig {
    /// 環境変数から設定を読み込み
    ///
    /// # 環境変数
    /// - BRIDGE_UNSET_STATUS: `preserve`（0のまま出力、デフォルト）または`ok`/`200`
    pub fn from_env() -> Self {
        let unset_status = match std::env::var(ENV_UNSET_STATUS) {
            Ok(value) => match parse_unset_status(&value) {
                Some(policy) => {
                    info!(key = ENV_UNSET_STATUS, value = %value, "Environment variable loaded");
                    policy
                }
                None => {
                    info!(
                        key = ENV_UNSET_STATUS,
                        value = %value,
                        "Environment variable parse error, using default"
                    );
                    UnsetStatusPolicy::default()
                }
            },
            Err(_) => UnsetStatusPolicy::default(),
        };

        info!(unset_status = ?unset_status, "BridgeConfig loaded");

        Self { unset_status }
    }

    /// 設定に従ったレスポンスエンコーダー
    pub fn encoder(&self) -> ResponseEncoder {
        ResponseEncoder::new(self.unset_status)
    }
}

fn parse_unset_status(value: &str) -> Option<UnsetStatusPolicy> {
    match value.trim().to_ascii_lowercase().as_str() {
        "preserve" => Some(UnsetStatusPolicy::Preserve),
        "ok" | "200" => Some(UnsetStatusPolicy::DefaultOk),
        _ => None,
    }
}
