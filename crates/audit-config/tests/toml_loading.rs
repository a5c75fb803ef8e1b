//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for safe, sandboxed file and env var manipulation.

use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use audit_config::AuditConfig;

#[test]
fn loads_index_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[operate_log_index]
url = "http://es.internal:9200"
index = "ops"
index_by_date = true
username = "elastic"
password = "changeme"
ping_timeout_secs = 1
"#,
        )?;

        let config: AuditConfig = Figment::from(Serialized::defaults(AuditConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        let index = &config.operate_log_index;
        assert!(index.is_configured());
        assert_eq!(index.base_url(), "http://es.internal:9200");
        assert_eq!(index.search_target(), "ops-*");
        assert!(index.has_credentials());
        assert_eq!(index.ping_timeout_secs, 1);
        assert_eq!(index.request_timeout_secs, 10);
        Ok(())
    });
}

#[test]
fn loads_display_tables_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[display.resource_types]
Asset = "Asset"
SystemUser = "System user"

[display.backends]
ldap = "LDAP"
"#,
        )?;

        let config: AuditConfig = Figment::from(Serialized::defaults(AuditConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        let catalog = config.display.catalog();
        assert_eq!(catalog.resource_type("SystemUser"), "System user");
        assert_eq!(catalog.backend("ldap"), "LDAP");
        assert_eq!(catalog.backend("radius"), "radius");
        Ok(())
    });
}

#[test]
fn project_local_file_is_picked_up_by_load() {
    Jail::expect_with(|jail| {
        jail.create_dir(".audit")?;
        jail.create_file(
            ".audit/config.toml",
            r#"
[database]
path = "/var/lib/audit/audit.db"

[general]
default_limit = 50
"#,
        )?;

        let config = AuditConfig::load().expect("config loads");
        assert_eq!(config.database.path, "/var/lib/audit/audit.db");
        assert_eq!(config.general.default_limit, 50);
        assert_eq!(config.general.max_limit, 1000);
        Ok(())
    });
}

#[test]
fn inconsistent_limits_fail_to_load() {
    Jail::expect_with(|jail| {
        jail.create_dir(".audit")?;
        jail.create_file(
            ".audit/config.toml",
            r#"
[general]
default_limit = 500
max_limit = 100
"#,
        )?;

        assert!(AuditConfig::load().is_err());
        Ok(())
    });
}
