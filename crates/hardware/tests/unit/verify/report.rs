//! Test reports and the runnable test registry.

use caravel_periph_core::env::EnvError;
use caravel_periph_core::verify::{CheckError, TestCase, report_test, user_project_test};
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::common::harness::{TestContext, fast_config};

#[test]
fn test_report_for_passing_body() {
    let mut ctx = TestContext::new();
    let report = report_test("user_project", &mut ctx.env, |env| user_project_test(env));
    assert!(report.passed);
    assert_eq!(report.message, None);
    assert_eq!(report.name, "user_project");
    assert_eq!(report.reads, 8);
    assert_eq!(report.writes, 7);
    assert_eq!(report.cycles, ctx.env.cycle());
}

#[test]
fn test_report_for_failing_body() {
    let mut ctx = TestContext::new();
    let report = report_test("custom", &mut ctx.env, |_| {
        Err(CheckError::Mismatch {
            label: "X".into(),
            expected: 1,
            actual: 2,
        })
    });
    assert!(!report.passed);
    assert_eq!(
        report.message.as_deref(),
        Some("X mismatch: expected 0x01, got 0x02")
    );
}

#[test]
fn test_report_json_shape() {
    let mut ctx = TestContext::new();
    let report = report_test("noop", &mut ctx.env, |_| Ok(()));
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["name"], "noop");
    assert_eq!(json["passed"], true);
    assert!(json.get("message").is_none());
    assert!(json["cycles"].as_u64().is_some());
}

#[rstest]
#[case(TestCase::UserProject)]
#[case(TestCase::Smoke)]
fn test_registered_cases_pass_on_defaults(#[case] case: TestCase) {
    crate::common::harness::init_tracing();
    let report = case.execute(&fast_config()).unwrap();
    assert!(report.passed, "{}", report.summary());
    assert_eq!(report.name, case.name());
}

#[test]
fn test_execute_reports_setup_failure() {
    let mut config = fast_config();
    config.env.ready_timeout_cycles = 1;
    assert!(matches!(
        TestCase::Smoke.execute(&config),
        Err(EnvError::FirmwareTimeout { .. })
    ));
}

#[test]
fn test_execute_reports_check_failure() {
    let mut config = fast_config();
    config.peripherals.spi_loopback = false;
    let report = TestCase::Smoke.execute(&config).unwrap();
    assert!(!report.passed);
    assert!(report.summary().starts_with("FAIL smoke"));
}

#[test]
fn test_case_names_parse() {
    assert_eq!("smoke".parse::<TestCase>(), Ok(TestCase::Smoke));
    assert_eq!("user-project".parse::<TestCase>(), Ok(TestCase::UserProject));
    let err = "uart".parse::<TestCase>().unwrap_err();
    assert_eq!(
        err.to_string(),
        "unknown test 'uart' (expected one of: user_project, smoke)"
    );
    assert_eq!(TestCase::ALL.len(), 2);
    assert_eq!(TestCase::UserProject.to_string(), "user_project");
}
