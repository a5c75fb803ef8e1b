//! ID prefix constants.
//!
//! Every record ID is `{prefix}-{16 hex chars}`, generated by the store.

pub const PREFIX_TRANSFER: &str = "ftl";
pub const PREFIX_OPERATE: &str = "opl";
pub const PREFIX_PASSWORD_CHANGE: &str = "pwc";
pub const PREFIX_LOGIN: &str = "lgn";
pub const PREFIX_COMMAND: &str = "cmd";
pub const PREFIX_COMMAND_HOST: &str = "cmh";

/// All prefixes, for exhaustive tests.
pub const ALL_PREFIXES: &[&str] = &[
    PREFIX_TRANSFER,
    PREFIX_OPERATE,
    PREFIX_PASSWORD_CHANGE,
    PREFIX_LOGIN,
    PREFIX_COMMAND,
    PREFIX_COMMAND_HOST,
];
