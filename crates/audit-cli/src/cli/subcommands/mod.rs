mod execution;
mod list;
mod login;
mod member;
mod operate;
mod password;
mod transfer;

pub use execution::ExecutionCommands;
pub use list::{ListArgs, RecordArgs};
pub use login::LoginCommands;
pub use member::MemberCommands;
pub use operate::OperateCommands;
pub use password::PasswordCommands;
pub use transfer::TransferCommands;
