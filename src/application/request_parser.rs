/// 呼び出しイベントパーサー
///
/// 2種類のイベント形状（ローカルテスト用のactionイベント、API Gateway
/// プロキシイベント）をエントリポイントで一度だけ解決し、タグ付きの
/// `EmployeeRequest`に正規化する。以降の処理はフィールド存在の
/// 場当たり的な探査を行わない。
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde_json::Value;
use thiserror::Error;
use url::form_urlencoded;

/// 正規化済みの従業員操作リクエスト
#[derive(Debug, Clone, PartialEq)]
pub enum EmployeeRequest {
    /// 登録リクエスト: 呼び出し元フィールドのマッピング
    Create(Value),

    /// 取得リクエスト: 従業員ID（任意のJSON値、ルックアップ前にテキスト化）
    Fetch(Value),
}

/// イベントパースエラー
///
/// 各バリアントは対応するHTTPステータスコードを持つ。
/// ルーティング不能なリクエストは404、それ以外の不正リクエストは400。
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ParseError {
    /// ローカルイベントのactionが未知または欠落
    #[error("Unknown local action")]
    UnknownAction,

    /// base64フラグ付きボディがデコード不能
    #[error("Invalid base64 body")]
    InvalidBase64Body,

    /// ボディがJSONとしてパース不能
    #[error("Invalid JSON payload")]
    InvalidJsonBody,

    /// 従業員IDが指定されていない
    #[error("emp_id query parameter is required")]
    MissingEmpId,

    /// 未知のパス、または/employeeに対する未対応メソッド
    #[error("Not found")]
    RouteNotFound,
}

impl ParseError {
    /// このエラーに対応するHTTPステータスコード
    pub fn status_code(&self) -> u16 {
        match self {
            ParseError::RouteNotFound => 404,
            _ => 400,
        }
    }
}

/// 呼び出しイベントパーサー
pub struct RequestParser;

impl RequestParser {
    /// 呼び出しイベントをパースしてEmployeeRequestに変換
    ///
    /// `httpMethod`と`requestContext`のいずれも持たないイベントは
    /// ローカル形状、それ以外はゲートウェイ形状として解決する。
    ///
    /// # 引数
    /// * `event` - Lambda呼び出しペイロード
    ///
    /// # 戻り値
    /// * `Ok(EmployeeRequest)` - パース成功時
    /// * `Err(ParseError)` - パース失敗時（400/404に対応）
    pub fn parse(event: &Value) -> Result<EmployeeRequest, ParseError> {
        if Self::is_local_event(event) {
            Self::parse_local(event)
        } else {
            Self::parse_gateway(event)
        }
    }

    /// ローカルテスト形状のイベントかどうかを判定
    fn is_local_event(event: &Value) -> bool {
        event.get("httpMethod").is_none() && event.get("requestContext").is_none()
    }

    /// ローカルイベントをパース
    /// フォーマット: {"action": "create", "body": {...}} または
    ///               {"action": "get", "emp_id": <id>}
    fn parse_local(event: &Value) -> Result<EmployeeRequest, ParseError> {
        match event.get("action").and_then(|v| v.as_str()) {
            Some("create") => {
                // bodyが無い場合は空マッピング（検証で全フィールド欠落になる）
                let body = event
                    .get("body")
                    .cloned()
                    .unwrap_or_else(|| Value::Object(serde_json::Map::new()));
                Ok(EmployeeRequest::Create(body))
            }
            Some("get") => {
                let emp_id = event
                    .get("emp_id")
                    .filter(|id| !id.is_null())
                    .cloned()
                    .ok_or(ParseError::MissingEmpId)?;
                Ok(EmployeeRequest::Fetch(emp_id))
            }
            _ => Err(ParseError::UnknownAction),
        }
    }

    /// API Gatewayプロキシイベントをパース
    ///
    /// メソッドは`httpMethod`（REST API）または
    /// `requestContext.http.method`（HTTP API）から、パスは`path`または
    /// `rawPath`から取得する。パスが`/employee`で終わらない場合、および
    /// POST/GET以外のメソッドはルーティング不能。
    fn parse_gateway(event: &Value) -> Result<EmployeeRequest, ParseError> {
        let method = event
            .get("httpMethod")
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
            .or_else(|| {
                event
                    .pointer("/requestContext/http/method")
                    .and_then(|v| v.as_str())
            })
            .unwrap_or_default();

        let path = event
            .get("path")
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
            .or_else(|| event.get("rawPath").and_then(|v| v.as_str()))
            .unwrap_or_default();

        if !path.ends_with("/employee") {
            return Err(ParseError::RouteNotFound);
        }

        match method {
            "POST" => Self::parse_gateway_body(event).map(EmployeeRequest::Create),
            "GET" => Self::extract_emp_id(event).map(EmployeeRequest::Fetch),
            _ => Err(ParseError::RouteNotFound),
        }
    }

    /// POSTボディをJSONマッピングとしてパース
    ///
    /// ボディはJSON文字列で届く。`isBase64Encoded`がtrueの場合は
    /// 先にbase64デコードする。ボディ欠落・null・空文字列は空マッピング扱い。
    fn parse_gateway_body(event: &Value) -> Result<Value, ParseError> {
        let raw = match event.get("body") {
            None | Some(Value::Null) => "{}".to_string(),
            Some(Value::String(s)) if s.is_empty() => "{}".to_string(),
            Some(Value::String(s)) => s.clone(),
            Some(_) => return Err(ParseError::InvalidJsonBody),
        };

        let decoded = if Self::is_base64_encoded(event) {
            let bytes = BASE64
                .decode(raw.as_bytes())
                .map_err(|_| ParseError::InvalidBase64Body)?;
            String::from_utf8(bytes).map_err(|_| ParseError::InvalidBase64Body)?
        } else {
            raw
        };

        serde_json::from_str(&decoded).map_err(|_| ParseError::InvalidJsonBody)
    }

    /// イベントのbase64エンコードフラグを取得
    fn is_base64_encoded(event: &Value) -> bool {
        event
            .get("isBase64Encoded")
            .and_then(|v| v.as_bool())
            .unwrap_or(false)
    }

    /// GETリクエストから従業員IDを抽出
    ///
    /// `queryStringParameters.emp_id`を優先し、無い場合は
    /// `rawQueryString`を`k=v&k=v`形式としてパースする。
    fn extract_emp_id(event: &Value) -> Result<Value, ParseError> {
        // REST API: queryStringParameters
        let structured = event
            .pointer("/queryStringParameters/emp_id")
            .filter(|id| !id.is_null() && id.as_str() != Some(""));
        if let Some(emp_id) = structured {
            return Ok(emp_id.clone());
        }

        // HTTP API: rawQueryStringフォールバック
        if let Some(raw) = event.get("rawQueryString").and_then(|v| v.as_str()) {
            for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
                if key == "emp_id" {
                    if value.is_empty() {
                        break;
                    }
                    return Ok(Value::String(value.into_owned()));
                }
            }
        }

        Err(ParseError::MissingEmpId)
    }
}
