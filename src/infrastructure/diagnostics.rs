/// tracingへ転送するレスポンス診断
use tracing::warn;

use crate::application::ResponseDiagnostics;

/// 診断をwarnログとして出力する
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl ResponseDiagnostics for TracingDiagnostics {
    fn header_collapsed(&self, name: &str, kept: &str, dropped: &[String]) {
        warn!(
            header = name,
            kept = kept,
            dropped = ?dropped,
            "Multi-value header encountered, dropping all but first occurrence"
        );
    }

    fn status_unset(&self, emitted: u16) {
        warn!(
            status_code = emitted,
            "Handler returned without setting a status or writing a body"
        );
    }
}
