/// テスト用のリクエスト生成ヘルパー
use url::Url;

use super::{HandlerRequest, HeaderMultimap, InvocationContext};

pub fn sample_request(method: &str, body: &[u8]) -> HandlerRequest {
    HandlerRequest::new(
        method.to_string(),
        Url::parse("http://localhost/").unwrap(),
        "/".to_string(),
        HeaderMultimap::new(),
        body.to_vec(),
        InvocationContext::background(),
    )
}
