/// API Gatewayプロキシ統合のイベント/レスポンス型
///
/// Lambdaに渡されるJSONイベントと、Lambdaが返すJSONレスポンスの形。
/// 未知のフィールドは無視し、`null`は空値として扱う。
use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// 受信プロキシイベント
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProxyEvent {
    /// リソースパターン（例: "/{proxy+}"）
    #[serde(deserialize_with = "null_as_default")]
    pub resource: String,

    /// リクエストパス
    #[serde(deserialize_with = "null_as_default")]
    pub path: String,

    /// HTTPメソッド
    #[serde(deserialize_with = "null_as_default")]
    pub http_method: String,

    /// リクエストヘッダー（1名前につき1値、null値は空文字列）
    #[serde(deserialize_with = "nullable_string_map")]
    pub headers: HashMap<String, String>,

    /// リクエストボディ
    #[serde(deserialize_with = "null_as_default")]
    pub body: String,

    /// bodyがbase64エンコードされているか
    #[serde(deserialize_with = "null_as_default")]
    pub is_base64_encoded: bool,

    // 以下はブリッジでは解釈しない
    pub query_string_parameters: Option<Value>,
    pub path_parameters: Option<Value>,
    pub stage_variables: Option<Value>,
    pub request_context: Option<Value>,
}

/// 返却プロキシレスポンス
///
/// ヘッダーは1名前につき1値のみ。
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub is_base64_encoded: bool,
    pub body: String,
}

/// `null`をデフォルト値として読み込む
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// 値が`null`のエントリを空文字列として読み込む
fn nullable_string_map<'de, D>(deserializer: D) -> Result<HashMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let map: HashMap<String, Option<String>> = null_as_default(deserializer)?;
    Ok(map
        .into_iter()
        .map(|(name, value)| (name, value.unwrap_or_default()))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_full_event() {
        let event: ProxyEvent = serde_json::from_value(json!({
            "body": "Mali Mirassin",
            "resource": "/{proxy+}",
            "path": "/path/to/resource",
            "httpMethod": "POST",
            "isBase64Encoded": false,
            "queryStringParameters": {"foo": "bar"},
            "pathParameters": {"proxy": "/path/to/resource"},
            "stageVariables": {"baz": "qux"},
            "headers": {"Accept-Language": "en-US,en;q=0.8"},
            "requestContext": {"stage": "prod", "requestTimeEpoch": 1428582896000u64}
        }))
        .unwrap();

        assert_eq!(event.path, "/path/to/resource");
        assert_eq!(event.http_method, "POST");
        assert_eq!(event.body, "Mali Mirassin");
        assert!(!event.is_base64_encoded);
        assert_eq!(event.headers["Accept-Language"], "en-US,en;q=0.8");
        assert_eq!(event.stage_variables, Some(json!({"baz": "qux"})));
        assert_eq!(event.request_context.unwrap()["stage"], "prod");
    }

    /// 欠落・nullのフィールドは空値になる
    #[test]
    fn test_deserialize_sparse_event() {
        let event: ProxyEvent = serde_json::from_value(json!({
            "httpMethod": "GET",
            "path": "/",
            "headers": null,
            "body": null,
            "isBase64Encoded": null,
            "stageVariables": null
        }))
        .unwrap();

        assert!(event.headers.is_empty());
        assert_eq!(event.body, "");
        assert!(!event.is_base64_encoded);
        assert!(event.stage_variables.is_none());
        assert_eq!(event.resource, "");
    }

    /// ヘッダー値のnullはイベント全体を失敗させず空文字列になる
    #[test]
    fn test_deserialize_null_header_value() {
        let event: ProxyEvent = serde_json::from_str(
            r#"{"path":"/","httpMethod":"GET","headers":{"X-A":null,"X-B":"b"}}"#,
        )
        .unwrap();

        assert_eq!(event.headers["X-A"], "");
        assert_eq!(event.headers["X-B"], "b");
    }

    #[test]
    fn test_serialize_response_field_names() {
        let response = ProxyResponse {
            status_code: 204,
            headers: BTreeMap::from([("Content-Length".to_string(), "0".to_string())]),
            is_base64_encoded: false,
            body: String::new(),
        };

        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(
            value,
            json!({
                "statusCode": 204,
                "headers": {"Content-Length": "0"},
                "isBase64Encoded": false,
                "body": ""
            })
        );
    }
}
