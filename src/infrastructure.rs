// インフラストラクチャ層モジュール
pub mod config;
pub mod employee_repository;
pub mod logging;

// 再エクスポート
pub use config::EmployeeTableConfig;
pub use employee_repository::{DynamoEmployeeRepository, EmployeeRepository, RepositoryError};
pub use logging::init_logging;
