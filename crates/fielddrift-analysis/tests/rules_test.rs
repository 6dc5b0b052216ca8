//! Diagnostic rule evaluation and handler comparison.

use fielddrift_analysis::rules::{
    analyze_handler, compare_handlers, DiagnosticReport, Finding, FindingCategory, RuleEngine, Severity, RULES,
};
use fielddrift_core::config::{FieldDriftConfig, NamingFamily, RulesConfig};

// ---- Helpers ----

const BOTH_FORMATS: &str = r#"
def handler(event, context):
    body = json.loads(event['body'])
    print(f"Received: {body}")

    if 'fechaTurno' in body or 'fecha' in body:
        fecha = body.get('fechaTurno') or body.get('fecha')
        update_expression += ', fechaTurno = :fechaTurno'

    if 'horaTurno' in body or 'hora' in body:
        hora = body.get('horaTurno') or body.get('hora')
        update_expression += ', horaTurno = :horaTurno'

    print(f"UpdateExpression: {update_expression}")
"#;

const MISSING_DATE_TIME: &str = r#"
def handler(event, context):
    body = json.loads(event['body'])
    update_expression = 'SET modifiedAt = :modifiedAt'
    # date and time are never written
    table.update_item(UpdateExpression=update_expression)
"#;

fn ids(report: &DiagnosticReport, severity: Severity) -> Vec<String> {
    report.with_severity(severity).map(|f| f.rule_id.clone()).collect()
}

fn finding(severity: Severity) -> Finding {
    Finding {
        rule_id: "test".to_string(),
        severity,
        category: FindingCategory::Code,
        description: String::new(),
        location: String::new(),
        recommendation: String::new(),
    }
}

// ---- Rule battery ----

#[test]
fn handler_accepting_both_formats_is_clean() {
    let report = analyze_handler("ModifyTurnoFunction", BOTH_FORMATS);

    assert_eq!(report.subject, "ModifyTurnoFunction");
    assert!(report.findings.is_empty(), "{:?}", report.findings);
    assert_eq!(report.summary, "No critical problems found");
    assert!(!report.requires_code_change);
    assert!(!report.requires_config_change);
}

#[test]
fn detects_missing_date_in_update_expression() {
    let report = analyze_handler("TestFunction", MISSING_DATE_TIME);
    assert!(report
        .findings
        .iter()
        .any(|f| f.severity == Severity::Critical && f.description.to_lowercase().contains("fecha")));
}

#[test]
fn detects_missing_time_in_update_expression() {
    let report = analyze_handler("TestFunction", MISSING_DATE_TIME);
    assert!(report
        .findings
        .iter()
        .any(|f| f.severity == Severity::Critical && f.description.to_lowercase().contains("hora")));
}

#[test]
fn bare_handler_is_critical_and_unlogged() {
    let source = "def handler(event, context):\n    return {'statusCode': 200}\n";
    let report = analyze_handler("Bare", source);

    assert!(report.critical_count() >= 2);
    assert!(report.warning_count() >= 1);
    assert!(report.requires_code_change);
    assert!(ids(&report, Severity::Warning).contains(&"no-logging".to_string()));

    let mut critical = ids(&report, Severity::Critical);
    critical.sort();
    assert_eq!(
        critical,
        vec![
            "update-expression-missing-family/date".to_string(),
            "update-expression-missing-family/time".to_string(),
        ]
    );
    assert_eq!(report.summary, format!("Found 2 critical problems and {} warnings", report.warning_count()));
}

#[test]
fn single_variant_warns_per_family() {
    let source = r#"
logger.info("UpdateExpression built")
fecha = body.get('fechaTurno')
hora = body.get('horaTurno') or body.get('hora')
update_expression += ', fechaTurno = :fechaTurno'
update_expression += ', horaTurno = :horaTurno'
"#;
    let report = analyze_handler("F", source);

    assert_eq!(ids(&report, Severity::Warning), vec!["single-family-variant/date".to_string()]);
    assert_eq!(report.critical_count(), 0);
    assert_eq!(report.summary, "Found 1 warning");
    assert!(!report.requires_code_change);
}

#[test]
fn logging_without_update_expression_log_is_info() {
    let source = r#"
console.log("received", body);
const { fechaTurno, fecha, horaTurno, hora } = body;
const params = { UpdateExpression: 'SET fechaTurno = :f, horaTurno = :h' };
"#;
    let report = analyze_handler("F", source);

    assert_eq!(ids(&report, Severity::Info), vec!["update-expression-not-logged".to_string()]);
    assert_eq!(report.warning_count(), 0);
    assert_eq!(report.summary, "No critical problems found");
}

#[test]
fn update_expression_log_must_share_a_line_with_a_marker() {
    let split = "print('about to run')\nupdate_expression = 'SET a = :a'\n";
    assert_eq!(analyze_handler("F", split).info_count(), 1);

    let logged = "print('Update expression:', update_expression)\n";
    assert_eq!(analyze_handler("F", logged).info_count(), 0);
}

#[test]
fn findings_carry_rendered_templates() {
    let report = analyze_handler("F", MISSING_DATE_TIME);
    let date = report
        .findings
        .iter()
        .find(|f| f.rule_id == "update-expression-missing-family/date")
        .unwrap();
    assert_eq!(date.description, "Field fechaTurno not found in update expression");
    assert_eq!(date.category, FindingCategory::Code);
    assert_eq!(date.location, "update expression construction");
    assert!(date.recommendation.contains("fechaTurno"));
}

#[test]
fn rule_table_severities() {
    let table: Vec<(&str, Severity)> = RULES.iter().map(|r| (r.id, r.severity)).collect();
    assert_eq!(
        table,
        vec![
            ("update-expression-missing-family", Severity::Critical),
            ("single-family-variant", Severity::Warning),
            ("no-logging", Severity::Warning),
            ("update-expression-not-logged", Severity::Info),
        ]
    );
}

// ---- Configuration ----

#[test]
fn min_variants_threshold_is_configurable() {
    let source = "logger.info('update expression')\nfecha = body.get('fecha')\nhora = body.get('hora')\n\
                  update_expression += ', fecha = :f'\nupdate_expression += ', hora = :h'\n";

    assert_eq!(analyze_handler("F", source).warning_count(), 2);

    let config = FieldDriftConfig {
        rules: RulesConfig {
            min_variants: Some(1),
            ..Default::default()
        },
        ..Default::default()
    };
    assert_eq!(RuleEngine::new(&config).analyze("F", source).warning_count(), 0);
}

#[test]
fn custom_markers_and_families() {
    let config = FieldDriftConfig {
        rules: RulesConfig {
            log_markers: Some(vec!["log.Printf(".to_string()]),
            families: Some(vec![NamingFamily::new("patient", "paciente", "pacienteId", "paciente")]),
            ..Default::default()
        },
        ..Default::default()
    };
    let engine = RuleEngine::new(&config);
    let source = "log.Printf(\"update expression %s\", expr)\nupdate_expression += ', pacienteId = :p'\n";
    let report = engine.analyze("GoHandler", source);

    assert_eq!(report.critical_count(), 0);
    assert_eq!(ids(&report, Severity::Warning), vec!["single-family-variant/patient".to_string()]);
    assert_eq!(report.info_count(), 0);
}

#[test]
fn blank_log_markers_do_not_silence_logging_rules() {
    let config = FieldDriftConfig {
        rules: RulesConfig {
            log_markers: Some(vec![String::new(), "  ".to_string()]),
            ..Default::default()
        },
        ..Default::default()
    };
    let report = RuleEngine::new(&config).analyze("F", "update_expression = 'SET estado = :e'\n");

    assert!(ids(&report, Severity::Warning).contains(&"no-logging".to_string()));
    assert_eq!(ids(&report, Severity::Info), vec!["update-expression-not-logged".to_string()]);
}

// ---- Report summary ----

#[test]
fn summary_text_follows_counts() {
    let report = DiagnosticReport::from_findings(
        "F",
        vec![finding(Severity::Critical), finding(Severity::Warning), finding(Severity::Warning)],
    );
    assert_eq!(report.summary, "Found 1 critical problem and 2 warnings");
    assert!(report.requires_code_change);

    let report = DiagnosticReport::from_findings("F", vec![finding(Severity::Info)]);
    assert_eq!(report.summary, "No critical problems found");
    assert!(!report.requires_code_change);
}

#[test]
fn summary_text_uses_singular_for_one() {
    let report = DiagnosticReport::from_findings("F", vec![finding(Severity::Critical), finding(Severity::Warning)]);
    assert_eq!(report.summary, "Found 1 critical problem and 1 warning");

    let report = DiagnosticReport::from_findings(
        "F",
        vec![finding(Severity::Critical), finding(Severity::Critical)],
    );
    assert_eq!(report.summary, "Found 2 critical problems and 0 warnings");
}

#[test]
fn severity_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&Severity::Critical).unwrap(), "\"critical\"");
    assert_eq!(serde_json::to_string(&FindingCategory::Configuration).unwrap(), "\"configuration\"");
}

// ---- Comparison ----

#[test]
fn comparison_flags_diverging_families() {
    let create = "fecha = body.get('fechaTurno') or body.get('fecha')\nhora = body.get('horaTurno')\n";
    let comparison = compare_handlers("CreateTurno", create, "ModifyTurno", BOTH_FORMATS);

    assert!(comparison.any_differs());
    let date = comparison.families.iter().find(|f| f.family == "date").unwrap();
    assert!(!date.differs);
    assert_eq!(date.left, vec!["fecha".to_string(), "fechaTurno".to_string()]);

    let time = comparison.families.iter().find(|f| f.family == "time").unwrap();
    assert!(time.differs);
    assert_eq!(time.left, vec!["horaTurno".to_string()]);
    assert_eq!(time.right, vec!["hora".to_string(), "horaTurno".to_string()]);

    assert_eq!(comparison.recommendations.len(), 1);
    assert!(comparison.recommendations[0].contains("CreateTurno and ModifyTurno"));
    assert!(comparison.left_update_fields.is_empty());
}

#[test]
fn identical_handlers_do_not_differ() {
    let comparison = compare_handlers("A", BOTH_FORMATS, "B", BOTH_FORMATS);
    assert!(!comparison.any_differs());
    assert!(comparison.recommendations.is_empty());
    assert_eq!(
        comparison.left_update_fields,
        vec!["fechaTurno".to_string(), "horaTurno".to_string()]
    );
}
