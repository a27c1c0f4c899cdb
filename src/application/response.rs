/// HTTP形式レスポンスエンベロープ
///
/// すべてのコードパス（エラーパスを含む）はこの単一のエンベロープを返す:
/// `{"statusCode": <int>, "headers": {"Content-Type": "application/json"}, "body": "<JSON文字列>"}`
use serde::Serialize;
use serde_json::{Value, json};

/// レスポンスヘッダー（常にContent-Type: application/jsonのみ）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseHeaders {
    /// レスポンスボディのメディアタイプ
    #[serde(rename = "Content-Type")]
    content_type: &'static str,
}

impl Default for ResponseHeaders {
    fn default() -> Self {
        Self {
            content_type: "application/json",
        }
    }
}

/// API Gatewayプロキシ統合互換のレスポンスオブジェクト
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse {
    /// HTTPステータスコード
    #[serde(rename = "statusCode")]
    pub status_code: u16,

    /// レスポンスヘッダー
    pub headers: ResponseHeaders,

    /// JSONエンコード済みのボディ文字列
    pub body: String,
}

impl ApiResponse {
    /// 任意のシリアライズ可能な値をボディに持つレスポンスを構築
    pub fn json<T: Serialize>(status_code: u16, body: &T) -> Self {
        let body = serde_json::to_string(body).expect("レスポンスボディのシリアライズに失敗");

        Self {
            status_code,
            headers: ResponseHeaders::default(),
            body,
        }
    }

    /// `{"error": <メッセージ>}`ボディを持つエラーレスポンスを構築
    pub fn error(status_code: u16, message: &str) -> Self {
        Self::json(status_code, &json!({ "error": message }))
    }

    /// Lambdaランタイムに返すJSON値へ変換
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).expect("レスポンスのシリアライズに失敗")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // エンベロープが正確な形状でシリアライズされる
    #[test]
    fn test_envelope_shape() {
        let response = ApiResponse::json(200, &json!({"Emp_Id": "E001"}));

        assert_eq!(
            response.to_value(),
            json!({
                "statusCode": 200,
                "headers": {"Content-Type": "application/json"},
                "body": "{\"Emp_Id\":\"E001\"}"
            })
        );
    }

    // エラーレスポンスはerrorキーのボディを持つ
    #[test]
    fn test_error_response() {
        let response = ApiResponse::error(404, "Employee not found");

        assert_eq!(response.status_code, 404);
        assert_eq!(response.body, "{\"error\":\"Employee not found\"}");
    }

    // ボディは二重エンコードされたJSON文字列になる
    #[test]
    fn test_body_is_json_string() {
        let response = ApiResponse::json(201, &json!({"a": 1}));
        let value = response.to_value();

        // bodyフィールド自体は文字列であり、その中身がJSON
        let body = value.get("body").and_then(|b| b.as_str()).unwrap();
        assert_eq!(
            serde_json::from_str::<Value>(body).unwrap(),
            json!({"a": 1})
        );
    }

    // エラーパスでもContent-Typeヘッダーが付く
    #[test]
    fn test_error_response_has_content_type() {
        let value = ApiResponse::error(500, "Failed to create employee").to_value();

        assert_eq!(
            value.pointer("/headers/Content-Type").unwrap(),
            "application/json"
        );
    }
}
