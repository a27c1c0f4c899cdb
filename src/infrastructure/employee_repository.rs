/// DynamoDBで従業員レコードを管理するためのリポジトリ
use async_trait::async_trait;
use aws_sdk_dynamodb::Client as DynamoDbClient;
use aws_sdk_dynamodb::types::AttributeValue;
use std::collections::HashMap;
use thiserror::Error;

use crate::domain::Employee;

/// リポジトリ操作のエラー型
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RepositoryError {
    /// DynamoDBへの書き込みに失敗
    #[error("Write error: {0}")]
    WriteError(String),

    /// DynamoDBからの読み取りに失敗
    #[error("Read error: {0}")]
    ReadError(String),

    /// データのシリアライズ/デシリアライズに失敗
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// 従業員レコード永続化用トレイト
///
/// このトレイトはレコード永続化機能を抽象化し、
/// 異なる実装を可能にします（実際のDynamoDB、テスト用モック）。
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// 従業員レコードを保存（アップサート）
    ///
    /// 同じ`Emp_Id`のレコードが既に存在する場合は無条件に上書きする。
    ///
    /// # 引数
    /// * `employee` - 保存する従業員レコード
    ///
    /// # 戻り値
    /// * 成功時は`Ok(())`
    /// * 失敗時は`Err(RepositoryError)`
    async fn put(&self, employee: &Employee) -> Result<(), RepositoryError>;

    /// 従業員IDでレコードを取得
    ///
    /// # 引数
    /// * `emp_id` - 従業員ID
    ///
    /// # 戻り値
    /// * 見つかった場合は`Ok(Some(Employee))`
    /// * 見つからなかった場合は`Ok(None)`
    /// * 失敗時は`Err(RepositoryError)`
    async fn get(&self, emp_id: &str) -> Result<Option<Employee>, RepositoryError>;
}

/// EmployeeRepositoryのDynamoDB実装
///
/// `Emp_Id`をパーティションキーとするテーブルに対して
/// put_item/get_itemを実行する。全属性は文字列型で保存する。
#[derive(Debug, Clone)]
pub struct DynamoEmployeeRepository {
    /// DynamoDBクライアント
    client: DynamoDbClient,
    /// 従業員テーブル名
    table_name: String,
}

impl DynamoEmployeeRepository {
    /// 新しいDynamoEmployeeRepositoryを作成
    ///
    /// # 引数
    /// * `client` - DynamoDBクライアント
    /// * `table_name` - 従業員テーブルの名前
    pub fn new(client: DynamoDbClient, table_name: String) -> Self {
        Self { client, table_name }
    }

    /// アイテムから文字列属性を抽出
    fn extract_string(
        item: &HashMap<String, AttributeValue>,
        field: &str,
    ) -> Result<String, RepositoryError> {
        item.get(field)
            .and_then(|v| v.as_s().ok())
            .cloned()
            .ok_or_else(|| RepositoryError::SerializationError(format!("Missing {field} field")))
    }
}

#[async_trait]
impl EmployeeRepository for DynamoEmployeeRepository {
    async fn put(&self, employee: &Employee) -> Result<(), RepositoryError> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .item("Emp_Id", AttributeValue::S(employee.emp_id.clone()))
            .item("First_Name", AttributeValue::S(employee.first_name.clone()))
            .item("Last_Name", AttributeValue::S(employee.last_name.clone()))
            .item(
                "Date_Of_Joining",
                AttributeValue::S(employee.date_of_joining.clone()),
            )
            .item("Created_At", AttributeValue::S(employee.created_at.clone()))
            .send()
            .await
            .map_err(|e| RepositoryError::WriteError(e.to_string()))?;

        Ok(())
    }

    async fn get(&self, emp_id: &str) -> Result<Option<Employee>, RepositoryError> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key("Emp_Id", AttributeValue::S(emp_id.to_string()))
            .send()
            .await
            .map_err(|e| RepositoryError::ReadError(e.to_string()))?;

        match result.item {
            Some(item) => {
                let employee = Employee {
                    emp_id: Self::extract_string(&item, "Emp_Id")?,
                    first_name: Self::extract_string(&item, "First_Name")?,
                    last_name: Self::extract_string(&item, "Last_Name")?,
                    date_of_joining: Self::extract_string(&item, "Date_Of_Joining")?,
                    created_at: Self::extract_string(&item, "Created_At")?,
                };
                Ok(Some(employee))
            }
            None => Ok(None),
        }
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    // ==================== エラー型テスト ====================

    #[test]
    fn test_repository_error_write_error_display() {
        let error = RepositoryError::WriteError("provisioned throughput exceeded".to_string());
        assert_eq!(
            error.to_string(),
            "Write error: provisioned throughput exceeded"
        );
    }

    #[test]
    fn test_repository_error_read_error_display() {
        let error = RepositoryError::ReadError("table not found".to_string());
        assert_eq!(error.to_string(), "Read error: table not found");
    }

    #[test]
    fn test_repository_error_serialization_error_display() {
        let error = RepositoryError::SerializationError("Missing Emp_Id field".to_string());
        assert_eq!(
            error.to_string(),
            "Serialization error: Missing Emp_Id field"
        );
    }

    #[test]
    fn test_repository_error_equality() {
        assert_eq!(
            RepositoryError::WriteError("test".to_string()),
            RepositoryError::WriteError("test".to_string())
        );
        assert_ne!(
            RepositoryError::WriteError("test".to_string()),
            RepositoryError::ReadError("test".to_string())
        );
    }

    // ==================== テスト用モックリポジトリ ====================

    /// ユニットテスト用のモックEmployeeRepository
    #[derive(Debug, Clone)]
    pub struct MockEmployeeRepository {
        /// 保存されたレコード: emp_id -> Employee
        records: Arc<Mutex<HashMap<String, Employee>>>,
        /// 次の操作で返すエラー（エラーパスのテスト用）
        next_error: Arc<Mutex<Option<RepositoryError>>>,
    }

    impl MockEmployeeRepository {
        pub fn new() -> Self {
            Self {
                records: Arc::new(Mutex::new(HashMap::new())),
                next_error: Arc::new(Mutex::new(None)),
            }
        }

        pub fn set_next_error(&self, error: RepositoryError) {
            *self.next_error.lock().unwrap() = Some(error);
        }

        pub fn get_record(&self, emp_id: &str) -> Option<Employee> {
            self.records.lock().unwrap().get(emp_id).cloned()
        }

        pub fn record_count(&self) -> usize {
            self.records.lock().unwrap().len()
        }

        fn take_error(&self) -> Option<RepositoryError> {
            self.next_error.lock().unwrap().take()
        }
    }

    #[async_trait]
    impl EmployeeRepository for MockEmployeeRepository {
        async fn put(&self, employee: &Employee) -> Result<(), RepositoryError> {
            if let Some(error) = self.take_error() {
                return Err(error);
            }

            self.records
                .lock()
                .unwrap()
                .insert(employee.emp_id.clone(), employee.clone());

            Ok(())
        }

        async fn get(&self, emp_id: &str) -> Result<Option<Employee>, RepositoryError> {
            if let Some(error) = self.take_error() {
                return Err(error);
            }

            Ok(self.records.lock().unwrap().get(emp_id).cloned())
        }
    }

    /// テスト用の従業員レコードを作成
    fn sample_employee(emp_id: &str) -> Employee {
        Employee {
            emp_id: emp_id.to_string(),
            first_name: "Taro".to_string(),
            last_name: "Yamada".to_string(),
            date_of_joining: "2024-04-01".to_string(),
            created_at: "2024-04-01T09:00:00.000000Z".to_string(),
        }
    }

    // ==================== モックリポジトリテスト ====================

    // 保存成功のテスト
    #[tokio::test]
    async fn test_mock_repo_put_success() {
        let repo = MockEmployeeRepository::new();

        let result = repo.put(&sample_employee("E001")).await;

        assert!(result.is_ok());
        assert_eq!(repo.record_count(), 1);
        assert_eq!(repo.get_record("E001").unwrap().first_name, "Taro");
    }

    // 同一Emp_Idの保存は上書き（アップサート）になる
    #[tokio::test]
    async fn test_mock_repo_put_overwrites() {
        let repo = MockEmployeeRepository::new();

        repo.put(&sample_employee("E001")).await.unwrap();

        let mut updated = sample_employee("E001");
        updated.first_name = "Jiro".to_string();
        repo.put(&updated).await.unwrap();

        assert_eq!(repo.record_count(), 1);
        assert_eq!(repo.get_record("E001").unwrap().first_name, "Jiro");
    }

    // 取得成功のテスト
    #[tokio::test]
    async fn test_mock_repo_get_success() {
        let repo = MockEmployeeRepository::new();
        repo.put(&sample_employee("E001")).await.unwrap();

        let result = repo.get("E001").await.unwrap();

        assert_eq!(result, Some(sample_employee("E001")));
    }

    // 存在しないレコードの取得はNoneになる
    #[tokio::test]
    async fn test_mock_repo_get_non_existent() {
        let repo = MockEmployeeRepository::new();

        let result = repo.get("no-such-id").await.unwrap();

        assert!(result.is_none());
    }

    // 保存エラーのテスト
    #[tokio::test]
    async fn test_mock_repo_put_error() {
        let repo = MockEmployeeRepository::new();
        repo.set_next_error(RepositoryError::WriteError("DynamoDB unavailable".to_string()));

        let result = repo.put(&sample_employee("E001")).await;

        assert_eq!(
            result.unwrap_err(),
            RepositoryError::WriteError("DynamoDB unavailable".to_string())
        );
        assert_eq!(repo.record_count(), 0);
    }

    // 取得エラーのテスト
    #[tokio::test]
    async fn test_mock_repo_get_error() {
        let repo = MockEmployeeRepository::new();
        repo.set_next_error(RepositoryError::ReadError("DynamoDB unavailable".to_string()));

        let result = repo.get("E001").await;

        assert_eq!(
            result.unwrap_err(),
            RepositoryError::ReadError("DynamoDB unavailable".to_string())
        );
    }

    // エラーは一度だけ返り、次の操作は成功する
    #[tokio::test]
    async fn test_mock_repo_error_is_consumed() {
        let repo = MockEmployeeRepository::new();
        repo.set_next_error(RepositoryError::WriteError("transient".to_string()));

        assert!(repo.put(&sample_employee("E001")).await.is_err());
        assert!(repo.put(&sample_employee("E001")).await.is_ok());
    }

    // ==================== 属性抽出テスト ====================

    // 存在する文字列属性を抽出できる
    #[test]
    fn test_extract_string_present() {
        let mut item = HashMap::new();
        item.insert("Emp_Id".to_string(), AttributeValue::S("E001".to_string()));

        let result = DynamoEmployeeRepository::extract_string(&item, "Emp_Id");

        assert_eq!(result.unwrap(), "E001");
    }

    // 欠落した属性はSerializationErrorになる
    #[test]
    fn test_extract_string_missing() {
        let item = HashMap::new();

        let result = DynamoEmployeeRepository::extract_string(&item, "Emp_Id");

        assert_eq!(
            result.unwrap_err(),
            RepositoryError::SerializationError("Missing Emp_Id field".to_string())
        );
    }

    // 文字列以外の属性もSerializationErrorになる
    #[test]
    fn test_extract_string_wrong_type() {
        let mut item = HashMap::new();
        item.insert("Emp_Id".to_string(), AttributeValue::N("1001".to_string()));

        let result = DynamoEmployeeRepository::extract_string(&item, "Emp_Id");

        assert!(result.is_err());
    }
}
