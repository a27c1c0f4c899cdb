/// 従業員レコードAPIのLambdaエントリポイント
///
/// ローカルテスト用のactionイベントとAPI Gatewayプロキシイベントの
/// 両方を受け付け、HTTP形式レスポンスを返す。
/// 設定・リポジトリ・ハンドラーはコールドスタート時に一度だけ構築し、
/// 以降の呼び出しで再利用する。
use std::sync::Arc;

use employee_api::application::EmployeeHandler;
use employee_api::infrastructure::{
    DynamoEmployeeRepository, EmployeeTableConfig, init_logging,
};
use lambda_runtime::{Error, LambdaEvent, service_fn};
use serde_json::Value;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // 構造化ログを初期化
    init_logging();

    // DynamoDB設定を環境から読み込み（コールドスタート時に一度だけ）
    let config = EmployeeTableConfig::from_env().await;
    tracing::info!(table_name = config.table_name(), "従業員テーブル設定を読み込み");

    // EmployeeRepositoryを作成してハンドラーに注入
    let repository = DynamoEmployeeRepository::new(
        config.client().clone(),
        config.table_name().to_string(),
    );
    let handler = Arc::new(EmployeeHandler::new(repository));

    // Lambda関数を初期化して実行
    let func = service_fn(move |event: LambdaEvent<Value>| {
        let handler = Arc::clone(&handler);
        async move {
            // ハンドラーは決して失敗せず、常にレスポンスオブジェクトを返す
            let response = handler.handle(&event.payload).await;
            Ok::<Value, Error>(response.to_value())
        }
    });
    lambda_runtime::run(func).await?;
    Ok(())
}
