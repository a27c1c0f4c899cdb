/// 従業員レコードハンドラー
///
/// 正規化済みリクエストを登録/取得操作にディスパッチし、
/// すべてのコードパスをHTTP形式レスポンスに変換する。
/// ハンドラー自体は決して失敗しない（エラーもレスポンスとして返す）。
use serde_json::Value;

use crate::application::request_parser::{EmployeeRequest, RequestParser};
use crate::application::response::ApiResponse;
use crate::domain::{Employee, coerce_to_text};
use crate::infrastructure::EmployeeRepository;

/// 従業員レコードの登録・取得を処理するハンドラー
///
/// リポジトリトレイトに対してジェネリックであり、
/// テストではモックリポジトリを注入できる。
pub struct EmployeeHandler<R>
where
    R: EmployeeRepository,
{
    /// 従業員リポジトリ
    repository: R,
}

impl<R> EmployeeHandler<R>
where
    R: EmployeeRepository,
{
    /// 新しいEmployeeHandlerを作成
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// 呼び出しイベントを処理してレスポンスを返す
    ///
    /// # 処理フロー
    /// 1. イベントをEmployeeRequestに正規化
    /// 2. 登録または取得操作にディスパッチ
    /// 3. パースエラーは対応する400/404レスポンスに変換
    pub async fn handle(&self, event: &Value) -> ApiResponse {
        match RequestParser::parse(event) {
            Ok(EmployeeRequest::Create(body)) => self.create(&body).await,
            Ok(EmployeeRequest::Fetch(emp_id)) => self.fetch(&emp_id).await,
            Err(err) => ApiResponse::error(err.status_code(), &err.to_string()),
        }
    }

    /// 従業員レコードを登録
    ///
    /// 必須フィールドを検証し、`Created_At`を付与したレコードを
    /// ストアに書き込む（既存の同一Emp_Idは上書き）。
    ///
    /// # 戻り値
    /// * 成功時は201と書き込んだレコード全体
    /// * 必須フィールド欠落時は400と欠落フィールドの列挙
    /// * ストア書き込み失敗時は500と汎用エラーボディ（詳細はログのみ）
    pub async fn create(&self, body: &Value) -> ApiResponse {
        let employee = match Employee::from_value(body, Employee::created_at_now()) {
            Ok(employee) => employee,
            Err(err) => return ApiResponse::error(400, &err.to_string()),
        };

        if let Err(err) = self.repository.put(&employee).await {
            tracing::error!(
                error = %err,
                emp_id = %employee.emp_id,
                "従業員レコードの書き込みに失敗"
            );
            return ApiResponse::error(500, "Failed to create employee");
        }

        tracing::info!(emp_id = %employee.emp_id, "従業員レコードを作成");
        ApiResponse::json(201, &employee)
    }

    /// 従業員レコードを取得
    ///
    /// IDをテキスト化してからストアを検索する。
    ///
    /// # 戻り値
    /// * 見つかった場合は200と保存済みレコード
    /// * 見つからなかった場合は404
    /// * ストア読み取り失敗時は500と汎用エラーボディ（詳細はログのみ）
    pub async fn fetch(&self, emp_id: &Value) -> ApiResponse {
        let emp_id = coerce_to_text(emp_id);

        match self.repository.get(&emp_id).await {
            Ok(Some(employee)) => {
                tracing::info!(emp_id = %emp_id, "従業員レコードを取得");
                ApiResponse::json(200, &employee)
            }
            Ok(None) => ApiResponse::error(404, "Employee not found"),
            Err(err) => {
                tracing::error!(
                    error = %err,
                    emp_id = %emp_id,
                    "従業員レコードの読み取りに失敗"
                );
                ApiResponse::error(500, "Failed to fetch employee")
            }
        }
    }
}
