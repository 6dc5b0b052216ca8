//! Configuration loading, validation, and environment overrides.

use std::sync::Mutex;

use fielddrift_core::config::{ExtractionConfig, FieldDriftConfig, NamingFamily, RulesConfig, SchemaConfig};
use fielddrift_core::errors::{ConfigError, ErrorCode, LocateError, SchemaError};

/// Serializes tests that touch `FIELDDRIFT_*` environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn clear_fielddrift_env_vars() {
    for key in [
        "FIELDDRIFT_PAYLOAD_VARS",
        "FIELDDRIFT_MIN_VARIANTS",
        "FIELDDRIFT_DEFAULT_METHOD",
    ] {
        std::env::remove_var(key);
    }
}

// ---- Defaults ----

#[test]
fn default_sub_configs_are_unset_with_documented_effective_values() {
    let config = FieldDriftConfig::default();

    assert!(config.extraction.payload_vars.is_none());
    assert!(config.rules.min_variants.is_none());
    assert!(config.rules.log_markers.is_none());
    assert!(config.rules.families.is_none());
    assert!(config.schema.default_method.is_none());

    assert_eq!(config.extraction.effective_payload_vars(), vec!["body".to_string()]);
    assert_eq!(config.rules.effective_min_variants(), 2);
    assert_eq!(
        config.rules.effective_log_markers(),
        vec!["print(".to_string(), "console.log(".to_string(), "logger.".to_string()]
    );
    assert_eq!(
        config.rules.effective_families(),
        vec![NamingFamily::date(), NamingFamily::time()]
    );
    assert_eq!(config.schema.effective_default_method(), "post");
    assert_eq!(config.schema.effective_content_type(), "application/json");
    assert!(config.validate().is_ok());
}

#[test]
fn empty_lists_fall_back_to_defaults() {
    let extraction = ExtractionConfig {
        payload_vars: Some(vec![]),
    };
    assert_eq!(extraction.effective_payload_vars(), vec!["body".to_string()]);

    let rules = RulesConfig {
        log_markers: Some(vec![]),
        ..Default::default()
    };
    assert_eq!(rules.effective_log_markers().len(), 3);
}

#[test]
fn default_method_is_lowercased() {
    let schema = SchemaConfig {
        default_method: Some("PATCH".to_string()),
        ..Default::default()
    };
    assert_eq!(schema.effective_default_method(), "patch");
}

#[test]
fn naming_family_membership_is_case_insensitive() {
    let date = NamingFamily::date();
    assert!(date.matches("fechaTurno"));
    assert!(date.matches("FECHA"));
    assert!(!date.matches("horaTurno"));

    let fields = vec!["horaTurno".to_string(), "fecha".to_string(), "fechaTurno".to_string()];
    assert_eq!(date.members(&fields), vec!["fecha".to_string(), "fechaTurno".to_string()]);
}

// ---- TOML ----

#[test]
fn toml_round_trip_preserves_every_section() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_fielddrift_env_vars();

    let input = r#"
[extraction]
payload_vars = ["body", "payload"]

[rules]
min_variants = 3
log_markers = ["log.info("]

[[rules.families]]
label = "patient"
needle = "paciente"
canonical = "pacienteId"
alias = "paciente"

[schema]
default_method = "put"
content_type = "application/vnd.api+json"
"#;

    let config = FieldDriftConfig::from_toml(input).unwrap();
    assert_eq!(
        config.extraction.effective_payload_vars(),
        vec!["body".to_string(), "payload".to_string()]
    );
    assert_eq!(config.rules.effective_min_variants(), 3);
    assert_eq!(config.rules.effective_log_markers(), vec!["log.info(".to_string()]);
    let families = config.rules.effective_families();
    assert_eq!(families.len(), 1);
    assert_eq!(families[0].canonical, "pacienteId");
    assert_eq!(config.schema.effective_default_method(), "put");
    assert_eq!(config.schema.effective_content_type(), "application/vnd.api+json");

    let serialized = config.to_toml().unwrap();
    let reparsed = FieldDriftConfig::from_toml(&serialized).unwrap();
    assert_eq!(config, reparsed);
}

#[test]
fn partial_toml_keeps_other_defaults() {
    let config = FieldDriftConfig::from_toml("[rules]\nmin_variants = 1\n").unwrap();
    assert_eq!(config.rules.effective_min_variants(), 1);
    assert_eq!(config.extraction.effective_payload_vars(), vec!["body".to_string()]);
    assert_eq!(config.rules.effective_families().len(), 2);
}

#[test]
fn empty_toml_is_default() {
    assert_eq!(FieldDriftConfig::from_toml("").unwrap(), FieldDriftConfig::default());
}

#[test]
fn invalid_toml_is_a_parse_error() {
    let err = FieldDriftConfig::from_toml("[rules\nmin_variants = ").unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
    assert_eq!(err.error_code(), "CONFIG_PARSE_ERROR");
}

#[test]
fn wrong_type_is_a_parse_error() {
    let err = FieldDriftConfig::from_toml("[rules]\nmin_variants = \"two\"\n").unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

// ---- Validation ----

#[test]
fn zero_min_variants_is_rejected() {
    let err = FieldDriftConfig::from_toml("[rules]\nmin_variants = 0\n").unwrap_err();
    match err {
        ConfigError::InvalidValue { ref field, .. } => assert_eq!(field, "rules.min_variants"),
        other => panic!("expected InvalidValue, got {other:?}"),
    }
    assert_eq!(err.error_code(), "CONFIG_INVALID_VALUE");
}

#[test]
fn non_identifier_payload_var_is_rejected() {
    let err = FieldDriftConfig::from_toml("[extraction]\npayload_vars = [\"req.body\"]\n").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "extraction.payload_vars"));
}

#[test]
fn empty_family_needle_is_rejected() {
    let input = r#"
[[rules.families]]
label = "date"
needle = " "
canonical = "fechaTurno"
alias = "fecha"
"#;
    let err = FieldDriftConfig::from_toml(input).unwrap_err();
    assert!(err.to_string().contains("rules.families[date].needle"));
}

#[test]
fn blank_log_marker_is_rejected() {
    for input in ["[rules]\nlog_markers = [\"\"]\n", "[rules]\nlog_markers = [\"print(\", \"  \"]\n"] {
        let err = FieldDriftConfig::from_toml(input).unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "rules.log_markers"),
            "{input}"
        );
    }
}

#[test]
fn blank_log_markers_fall_back_to_defaults() {
    let rules = RulesConfig {
        log_markers: Some(vec![String::new(), "logger.".to_string(), " ".to_string()]),
        ..Default::default()
    };
    assert_eq!(rules.effective_log_markers(), vec!["logger.".to_string()]);

    let rules = RulesConfig {
        log_markers: Some(vec![String::new()]),
        ..Default::default()
    };
    assert_eq!(rules.effective_log_markers().len(), 3);
}

#[test]
fn blank_payload_var_is_rejected_and_dropped() {
    let err = FieldDriftConfig::from_toml("[extraction]\npayload_vars = [\"body\", \"\"]\n").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "extraction.payload_vars"));

    let extraction = ExtractionConfig {
        payload_vars: Some(vec!["body".to_string(), String::new(), "req.body".to_string(), "payload".to_string()]),
    };
    assert_eq!(
        extraction.effective_payload_vars(),
        vec!["body".to_string(), "payload".to_string()]
    );
}

#[test]
fn duplicate_family_label_is_rejected() {
    let input = r#"
[[rules.families]]
label = "date"
needle = "fecha"
canonical = "fechaTurno"
alias = "fecha"

[[rules.families]]
label = "date"
needle = "dia"
canonical = "diaTurno"
alias = "dia"
"#;
    let err = FieldDriftConfig::from_toml(input).unwrap_err();
    match err {
        ConfigError::InvalidValue { field, message } => {
            assert_eq!(field, "rules.families");
            assert!(message.contains("'date'"));
        }
        other => panic!("expected InvalidValue, got {other:?}"),
    }
}

// ---- Loading ----

#[test]
fn load_without_file_uses_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_fielddrift_env_vars();

    let dir = tempfile::tempdir().unwrap();
    let config = FieldDriftConfig::load(dir.path()).unwrap();
    assert_eq!(config, FieldDriftConfig::default());
}

#[test]
fn load_reads_config_file() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_fielddrift_env_vars();

    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join(FieldDriftConfig::FILE_NAME),
        "[extraction]\npayload_vars = [\"data\"]\n",
    )
    .unwrap();

    let config = FieldDriftConfig::load(dir.path()).unwrap();
    assert_eq!(config.extraction.effective_payload_vars(), vec!["data".to_string()]);
}

#[test]
fn load_surfaces_invalid_file() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_fielddrift_env_vars();

    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(FieldDriftConfig::FILE_NAME), "not toml at all [").unwrap();

    let err = FieldDriftConfig::load(dir.path()).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

// ---- Environment overrides ----

#[test]
fn env_overrides_apply_on_top_of_file() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_fielddrift_env_vars();

    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join(FieldDriftConfig::FILE_NAME),
        "[rules]\nmin_variants = 3\n",
    )
    .unwrap();

    std::env::set_var("FIELDDRIFT_PAYLOAD_VARS", "body, payload ,");
    std::env::set_var("FIELDDRIFT_MIN_VARIANTS", "1");
    std::env::set_var("FIELDDRIFT_DEFAULT_METHOD", "PUT");

    let config = FieldDriftConfig::load(dir.path());
    clear_fielddrift_env_vars();
    let config = config.unwrap();

    assert_eq!(
        config.extraction.effective_payload_vars(),
        vec!["body".to_string(), "payload".to_string()]
    );
    assert_eq!(config.rules.effective_min_variants(), 1);
    assert_eq!(config.schema.effective_default_method(), "put");
}

#[test]
fn unparseable_min_variants_env_is_invalid_value() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_fielddrift_env_vars();

    std::env::set_var("FIELDDRIFT_MIN_VARIANTS", "many");
    let mut config = FieldDriftConfig::default();
    let result = config.apply_env_overrides();
    clear_fielddrift_env_vars();

    let err = result.unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "FIELDDRIFT_MIN_VARIANTS"));
}

#[test]
fn zero_min_variants_env_fails_validation_on_load() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_fielddrift_env_vars();

    let dir = tempfile::tempdir().unwrap();
    std::env::set_var("FIELDDRIFT_MIN_VARIANTS", "0");
    let result = FieldDriftConfig::load(dir.path());
    clear_fielddrift_env_vars();

    assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
}

// ---- Error codes ----

#[test]
fn error_codes_are_stable() {
    let cases: Vec<(Box<dyn ErrorCode>, &str)> = vec![
        (
            Box::new(ConfigError::ReadFailed {
                path: "x".into(),
                message: "y".into(),
            }),
            "CONFIG_READ_FAILED",
        ),
        (
            Box::new(ConfigError::SerializeError { message: "y".into() }),
            "CONFIG_SERIALIZE_ERROR",
        ),
        (
            Box::new(SchemaError::Parse { message: "y".into() }),
            "SCHEMA_PARSE_ERROR",
        ),
        (
            Box::new(SchemaError::Malformed {
                path: "paths".into(),
                expected: "a mapping",
            }),
            "SCHEMA_MALFORMED_NODE",
        ),
        (
            Box::new(LocateError::HandlerNotFound { name: "F".into() }),
            "LOCATE_HANDLER_NOT_FOUND",
        ),
        (
            Box::new(LocateError::NoInlineSource { name: "F".into() }),
            "LOCATE_NO_INLINE_SOURCE",
        ),
    ];
    for (err, code) in cases {
        assert_eq!(err.error_code(), code);
    }
}

#[test]
fn error_display_names_the_location() {
    let err = SchemaError::Malformed {
        path: "paths[/turnos].post.requestBody".into(),
        expected: "a mapping",
    };
    assert_eq!(
        err.to_string(),
        "Malformed schema node at paths[/turnos].post.requestBody: expected a mapping"
    );
}
