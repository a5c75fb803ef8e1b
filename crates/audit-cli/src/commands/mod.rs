pub mod dispatch;
pub mod execution;
pub mod login;
pub mod member;
pub mod operate;
pub mod password;
pub mod schema;
pub mod shared;
pub mod transfer;
