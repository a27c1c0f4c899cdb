// ドメイン層モジュール
pub mod employee;

// 再エクスポート
pub use employee::{Employee, REQUIRED_FIELDS, ValidationError, coerce_to_text};
