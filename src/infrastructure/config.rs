/// DynamoDB接続設定
use aws_sdk_dynamodb::Client as DynamoDbClient;

/// テーブル名を指定する環境変数
pub const TABLE_NAME_ENV: &str = "EMP_TABLE_NAME";

/// 環境変数未設定時に使用するテーブル名
pub const DEFAULT_TABLE_NAME: &str = "Emp_Master";

/// テーブル名とクライアントを持つDynamoDB設定
///
/// この構造体はコールドスタート時に一度だけ構築され、
/// ハンドラーに注入される（モジュールレベルのシングルトンは持たない）。
/// テーブル名は環境変数`EMP_TABLE_NAME`で設定し、
/// 未設定の場合は`Emp_Master`を使用する。
#[derive(Debug, Clone)]
pub struct EmployeeTableConfig {
    /// DynamoDBクライアントインスタンス
    client: DynamoDbClient,
    /// 従業員テーブル名
    table_name: String,
}

impl EmployeeTableConfig {
    /// 環境からAWS設定を読み込み、環境変数からテーブル名を読み取って新しい設定を作成
    ///
    /// 環境変数:
    /// - AWS認証情報: aws-configにより自動読み込み
    /// - EMP_TABLE_NAME: 従業員テーブル名（デフォルト: Emp_Master）
    pub async fn from_env() -> Self {
        // 環境からAWS設定を読み込み（認証情報、リージョンなど）
        let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;

        // AWS設定からDynamoDBクライアントを作成
        let client = DynamoDbClient::new(&aws_config);

        // テーブル名を環境変数から読み込み（未設定時はデフォルト値）
        let table_name =
            std::env::var(TABLE_NAME_ENV).unwrap_or_else(|_| DEFAULT_TABLE_NAME.to_string());

        Self { client, table_name }
    }

    /// 明示的な値で新しい設定を作成（テスト用）
    pub fn new(client: DynamoDbClient, table_name: String) -> Self {
        Self { client, table_name }
    }

    /// DynamoDBクライアントへの参照を取得
    pub fn client(&self) -> &DynamoDbClient {
        &self.client
    }

    /// 従業員テーブル名を取得
    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}
