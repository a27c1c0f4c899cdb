/// 従業員レコードのドメインモデル
///
/// 登録リクエストの必須フィールド検証と、呼び出し元が送信した値の
/// テキスト化、`Created_At`タイムスタンプの生成を担当する。
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// 登録時に必須となるフィールド名（エラーメッセージでの列挙順）
pub const REQUIRED_FIELDS: [&str; 4] = ["Emp_Id", "First_Name", "Last_Name", "Date_Of_Joining"];

/// 従業員レコード検証のエラー型
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// 必須フィールドが欠落（欠落したフィールド名をカンマ区切りで列挙）
    #[error("Missing fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),
}

/// 従業員レコード
///
/// JSONフィールド名は外部ストアおよびAPIレスポンスと共通の
/// `Emp_Id`形式を使用する。`Created_At`は登録時にシステムが付与し、
/// 以降変更されない。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// 従業員ID（主キー、呼び出し元が指定）
    #[serde(rename = "Emp_Id")]
    pub emp_id: String,

    /// 名
    #[serde(rename = "First_Name")]
    pub first_name: String,

    /// 姓
    #[serde(rename = "Last_Name")]
    pub last_name: String,

    /// 入社日（自由形式テキスト、日付形式の検証は行わない）
    #[serde(rename = "Date_Of_Joining")]
    pub date_of_joining: String,

    /// 登録日時（ISO-8601 UTC、システム生成）
    #[serde(rename = "Created_At")]
    pub created_at: String,
}

impl Employee {
    /// リクエストボディから従業員レコードを構築
    ///
    /// 必須フィールドのキー存在を検証し、各値をテキストに変換した上で
    /// `created_at`を付与したレコードを返す。キーが存在すれば値がnullでも
    /// 欠落とはみなさない（値はJSON表現のテキストになる）。
    ///
    /// # 引数
    /// * `body` - 呼び出し元が送信したフィールドのマッピング
    /// * `created_at` - 付与する登録日時（ISO-8601 UTC）
    ///
    /// # 戻り値
    /// * 成功時は`Ok(Employee)`
    /// * 必須フィールド欠落時は`Err(ValidationError::MissingFields)`
    pub fn from_value(body: &Value, created_at: String) -> Result<Self, ValidationError> {
        let missing = Self::missing_fields(body);
        if !missing.is_empty() {
            return Err(ValidationError::MissingFields(
                missing.iter().map(|f| f.to_string()).collect(),
            ));
        }

        // missing_fieldsが空の時点でbodyはオブジェクトで全キーが存在する
        let fields = match body.as_object() {
            Some(fields) => fields,
            None => {
                return Err(ValidationError::MissingFields(
                    REQUIRED_FIELDS.iter().map(|f| f.to_string()).collect(),
                ));
            }
        };

        Ok(Self {
            emp_id: coerce_to_text(&fields["Emp_Id"]),
            first_name: coerce_to_text(&fields["First_Name"]),
            last_name: coerce_to_text(&fields["Last_Name"]),
            date_of_joining: coerce_to_text(&fields["Date_Of_Joining"]),
            created_at,
        })
    }

    /// ボディに欠落している必須フィールド名を列挙順で返す
    ///
    /// ボディがオブジェクトでない場合は全必須フィールドが欠落扱いになる。
    pub fn missing_fields(body: &Value) -> Vec<&'static str> {
        match body.as_object() {
            Some(fields) => REQUIRED_FIELDS
                .iter()
                .filter(|f| !fields.contains_key(**f))
                .copied()
                .collect(),
            None => REQUIRED_FIELDS.to_vec(),
        }
    }

    /// 現在のUTC時刻をISO-8601形式で取得（`Created_At`用）
    pub fn created_at_now() -> String {
        Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
    }
}

/// JSON値をテキストに変換
///
/// 文字列はそのまま、それ以外（数値IDなど）はJSON表現のテキストになる。
pub fn coerce_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
