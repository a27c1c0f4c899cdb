// アプリケーション層モジュール
pub mod employee_handler;
pub mod request_parser;
pub mod response;

// 再エクスポート
pub use employee_handler::EmployeeHandler;
pub use request_parser::{EmployeeRequest, ParseError, RequestParser};
pub use response::ApiResponse;
