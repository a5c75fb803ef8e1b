//! Serde roundtrip and JsonSchema validation tests for all record types.

use chrono::{TimeZone, Utc};
use schemars::schema_for;
use audit_core::entities::*;
use audit_core::enums::*;

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(
                recovered,
                val,
                "serde roundtrip failed for {}",
                stringify!($ty)
            );

            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

roundtrip_and_validate!(
    transfer_roundtrip,
    TransferLogEntry,
    TransferLogEntry {
        id: "ftl-0a1b2c3d4e5f6071".into(),
        org_id: "org-a".into(),
        user: "alice".into(),
        remote_addr: Some("10.1.1.1".into()),
        asset: "web-01".into(),
        account: "root".into(),
        operate: TransferOperation::Upload,
        filename: "/tmp/report.csv".into(),
        is_success: true,
        date_start: Utc.with_ymd_and_hms(2026, 3, 1, 8, 30, 0).unwrap(),
    }
);

roundtrip_and_validate!(
    operate_roundtrip,
    OperateLogEntry,
    OperateLogEntry {
        id: "opl-0a1b2c3d4e5f6071".into(),
        org_id: "org-a".into(),
        user: "alice".into(),
        action: OperateAction::Update,
        resource_type: "Asset".into(),
        resource: "web-01".into(),
        remote_addr: None,
        datetime: Utc.with_ymd_and_hms(2026, 3, 1, 8, 30, 0).unwrap(),
        before: serde_json::json!({"port": 22}),
        after: serde_json::json!({"port": 2222}),
    }
);

roundtrip_and_validate!(
    password_change_roundtrip,
    PasswordChangeLogEntry,
    PasswordChangeLogEntry {
        id: "pwc-0a1b2c3d4e5f6071".into(),
        user: "bob".into(),
        change_by: "admin".into(),
        remote_addr: Some("10.1.1.2".into()),
        datetime: Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap(),
    }
);

roundtrip_and_validate!(
    login_roundtrip,
    UserLoginLogEntry,
    UserLoginLogEntry {
        id: "lgn-0a1b2c3d4e5f6071".into(),
        username: "alice".into(),
        login_type: LoginChannel::Web,
        ip: "203.0.113.7".into(),
        city: Some("tokyo".into()),
        user_agent: Some("Mozilla/5.0".into()),
        mfa: MfaStatus::Enabled,
        reason: String::new(),
        status: true,
        datetime: Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap(),
        backend: "password".into(),
    }
);

roundtrip_and_validate!(
    command_execution_roundtrip,
    CommandExecution,
    CommandExecution {
        id: "cmd-0a1b2c3d4e5f6071".into(),
        org_id: "org-a".into(),
        command: "uptime".into(),
        user_name: "Alice".into(),
        user_username: "alice".into(),
        run_as_name: "ops".into(),
        run_as_username: "ops".into(),
        is_finished: true,
        date_created: Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap(),
        date_start: None,
    }
);

#[test]
fn login_type_serializes_under_type_key() {
    let entry = UserLoginLogEntry {
        id: "lgn-1".into(),
        username: "alice".into(),
        login_type: LoginChannel::Terminal,
        ip: "10.0.0.1".into(),
        city: None,
        user_agent: None,
        mfa: MfaStatus::Unknown,
        reason: "password_failed".into(),
        status: false,
        datetime: Utc::now(),
        backend: String::new(),
    };
    let value = serde_json::to_value(&entry).unwrap();
    assert_eq!(value["type"], "T");
    assert_eq!(value["mfa"], "unknown");
    assert!(value.get("login_type").is_none());
}
