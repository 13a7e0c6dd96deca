#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use reqmeter_core::ReqMeterError;
use reqmeter_gateway::config::{self, CancelPolicy};

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
metrics:
  request_metric_grups: [] # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.kind().as_str(), "CONFIG");
}

#[test]
fn ok_minimal_config() {
    let ok = r#"
version: 1
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.version, 1);
    assert!(cfg.metrics.request_timing);
    assert_eq!(cfg.metrics.on_cancel, CancelPolicy::Count);
    assert!(cfg.metrics.grouping_rules().is_empty());
    assert_eq!(cfg.server.listen, "0.0.0.0:8080");
}

#[test]
fn groups_keep_declared_order() {
    let ok = r#"
version: 1
metrics:
  on_cancel: skip
  request_metric_groups:
    - { name: zeta, pattern: "z.*" }
    - { name: alpha, pattern: ".*" }
    - { name: mid, pattern: "m" }
"#;
    let cfg = config::load_from_str(ok).unwrap();
    assert_eq!(cfg.metrics.on_cancel, CancelPolicy::Skip);
    let rules = cfg.metrics.grouping_rules();
    let names: Vec<&str> = rules.iter().map(|r| r.name()).collect();
    assert_eq!(names, ["zeta", "alpha", "mid"]);
    assert_eq!(rules.first_match("zz"), Some("zeta"));
    assert_eq!(rules.first_match("m"), Some("alpha"));
}

#[test]
fn malformed_regex_fails_at_load() {
    let bad = r#"
version: 1
metrics:
  request_metric_groups:
    - { name: broken, pattern: "users/[0-9" }
"#;
    match config::load_from_str(bad).expect_err("must fail") {
        ReqMeterError::InvalidPattern { group, .. } => assert_eq!(group, "broken"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn default_metrics_section_has_no_groups() {
    let section = config::MetricsSection::default();
    assert!(section.grouping_rules().is_empty());
}

#[test]
fn wrong_version_rejected() {
    let err = config::load_from_str("version: 2\n").expect_err("must fail");
    assert!(matches!(err, ReqMeterError::UnsupportedVersion));
}

#[test]
fn bad_listen_and_cap_rejected() {
    let bad_listen = "version: 1\nserver:\n  listen: \"not-an-addr\"\n";
    assert_eq!(config::load_from_str(bad_listen).unwrap_err().kind().as_str(), "CONFIG");

    let bad_cap = "version: 1\nmetrics:\n  max_names: 0\n";
    assert_eq!(config::load_from_str(bad_cap).unwrap_err().kind().as_str(), "CONFIG");
}

#[test]
fn unknown_cancel_policy_rejected() {
    let bad = "version: 1\nmetrics:\n  on_cancel: sentinel\n";
    assert!(config::load_from_str(bad).is_err());
}

#[test]
fn sample_config_loads() {
    let cfg = config::load_from_file("../../reqmeter.yaml").expect("sample config must load");
    assert_eq!(cfg.metrics.grouping_rules().len(), 2);
}
