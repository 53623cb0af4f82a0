#![cfg(test)]

use std::cell::Cell;
use std::env;
use std::process::Command;
use std::rc::Rc;

use super::*;
use crate::origin;
use crate::util::sink::SharedSink;

#[test]
fn test_status_names() {
    for code in StatusCode::ALL {
        assert_eq!(
            status_name(code.raw()),
            code.name(),
            "Every enumerated code should translate through its raw value."
        );
        assert_eq!(StatusCode::from_raw(code.raw()), Some(code));
    }

    assert_eq!(status_name(0), "Ok");
    assert_eq!(status_name(6), "Arithmetic Overflow");
    for raw in [-1, 8, 255, i64::MIN, i64::MAX] {
        assert_eq!(
            status_name(raw),
            UNKNOWN_STATUS,
            "Out of range values should have the unknown name."
        );
    }
}

#[test]
fn test_failure_classification() {
    assert!(!StatusCode::Ok.is_failure());
    for code in &StatusCode::ALL[1..] {
        assert!(code.is_failure(), "{code} should be a failure.");
    }

    assert!(StatusCode::PreconditionFailure.is_contract_violation());
    assert!(StatusCode::AssertionFailure.is_contract_violation());
    assert!(!StatusCode::AllocationFailure.is_contract_violation());

    assert_eq!(StatusCode::AssertionFailure.severity(), Severity::Fatal);
    assert_eq!(StatusCode::ArithmeticOverflow.severity(), Severity::Error);
}

#[test]
fn test_error_value_display() {
    let error = ErrorValue::new(
        StatusCode::AllocationFailure,
        "out of memory",
        Origin::new("src/demo.rs", 42, "demo::main"),
    );
    assert_eq!(error.to_string(), "src/demo.rs:42: Allocation Failure: out of memory");
}

#[test]
fn test_error_value_clear() {
    let mut error = ErrorValue::here(StatusCode::GenericError, "oops");
    assert!(!error.is_ok());
    assert_eq!(error.origin.file, file!());

    error.clear();
    assert_eq!(error, ErrorValue::default(), "Clearing should reset to the zero state.");
    assert!(error.is_ok());
}

#[test]
fn test_origin_macro() {
    let origin = origin!();
    assert_eq!(origin.file, file!());
    assert_eq!(origin.line, line!() - 2);
    assert!(
        origin.function.ends_with("test_origin_macro"),
        "The enclosing function should be recorded, got {:?}.",
        origin.function
    );
}

#[test]
fn test_fail_without_handler() {
    let sink = SharedSink::new();
    let ctx = Context::new().with_sink(sink.clone());
    let mut slot = ErrorValue::default();

    let origin = Origin::new("lib.rs", 7, "f");
    let status = ctx.fail(&mut slot, StatusCode::ArithmeticOverflow, "size overflow", origin);

    assert_eq!(status, StatusCode::ArithmeticOverflow);
    assert_eq!(slot.status, StatusCode::ArithmeticOverflow);
    assert_eq!(slot.origin, origin);
    assert_eq!(slot.message(), "size overflow");
    assert_eq!(sink.take(), "lib.rs:7: Arithmetic Overflow: size overflow\n");
}

#[test]
fn test_fail_with_handler() {
    let sink = SharedSink::new();
    let mut ctx = Context::new().with_sink(sink.clone());
    let seen = Rc::new(Cell::new(0));

    let counter = seen.clone();
    let previous = ctx.set_handler(
        StatusCode::GenericError,
        Some(Box::new(move |error: &ErrorValue| {
            counter.set(counter.get() + 1);
            assert_eq!(error.message(), "ignorable");
            StatusCode::Ok
        })),
    );
    assert!(previous.is_none());

    let mut slot = ErrorValue::default();
    let status = ctx.fail(&mut slot, StatusCode::GenericError, "ignorable", origin!());
    assert_eq!(status, StatusCode::Ok, "The handler's status should replace the recorded one.");
    assert_eq!(slot.status, StatusCode::GenericError);
    assert_eq!(seen.get(), 1);
    assert_eq!(sink.take(), "", "A failure remapped to Ok shouldn't be reported.");

    let status = ctx.fail(&mut slot, StatusCode::TestFailure, "unhandled", origin!());
    assert_eq!(status, StatusCode::TestFailure, "Other codes shouldn't reach the handler.");
    assert_eq!(seen.get(), 1);
}

#[test]
fn test_set_handler_returns_previous() {
    let mut ctx = Context::new();
    ctx.set_handler(StatusCode::AllocationFailure, Some(Box::new(|_: &ErrorValue| StatusCode::FatalError)));

    let previous = ctx.set_handler(
        StatusCode::AllocationFailure,
        Some(Box::new(|_: &ErrorValue| StatusCode::GenericError)),
    );
    let error = ErrorValue::here(StatusCode::AllocationFailure, "");
    assert_eq!(previous.map(|handler| handler(&error)), Some(StatusCode::FatalError));
    assert_eq!(
        ctx.handler(StatusCode::AllocationFailure).map(|handler| handler(&error)),
        Some(StatusCode::GenericError),
        "The last handler written should win."
    );

    ctx.set_handler(StatusCode::AllocationFailure, None);
    assert!(ctx.handler(StatusCode::AllocationFailure).is_none());
}

#[test]
fn test_verbosity_gates_reports() {
    let sink = SharedSink::new();
    let mut ctx = Context::new().with_sink(sink.clone()).with_verbosity(Severity::Fatal);
    let mut slot = ErrorValue::default();

    ctx.fail(&mut slot, StatusCode::GenericError, "quiet", origin!());
    assert_eq!(sink.take(), "", "Errors shouldn't be reported at fatal verbosity.");

    ctx.set_verbosity(Severity::Debug);
    ctx.fail(&mut slot, StatusCode::GenericError, "loud", origin!());
    assert!(sink.take().ends_with(": Generic Error: loud\n"));

    ctx.report(&ErrorValue::here(StatusCode::Ok, "fine"));
    assert!(sink.take().contains("Ok: fine"), "Ok is reported at info, within debug verbosity.");
}

#[test]
fn test_disabled_assertions_are_ignored() {
    let sink = SharedSink::new();
    let ctx = Context::new().with_sink(sink.clone()).with_verbosity(Severity::Error);

    ctx.assert(Severity::Debug, false, "never checked", origin!());
    ctx.assert(Severity::Fatal, true, "holds", origin!());
    ctx.require(true, "holds", origin!());
    assert_eq!(sink.take(), "");
}

#[test]
fn test_severity_parsing() {
    assert_eq!("fatal".parse::<Severity>(), Ok(Severity::Fatal));
    assert_eq!(" DEBUG ".parse::<Severity>(), Ok(Severity::Debug));
    assert_eq!("Warn".parse::<Severity>(), Ok(Severity::Warning));
    assert_eq!(
        "loud".parse::<Severity>(),
        Err(UnknownSeverity {
            level: "loud".to_owned()
        })
    );

    assert!(Severity::Fatal < Severity::Error);
    assert!(Severity::Error.passes(Severity::Warning));
    assert!(!Severity::Debug.passes(Severity::Warning));
}

#[test]
fn test_verbosity_from_env() {
    const EXPECTED_VAR: &str = "FOUNDATION_EXPECTED_VERBOSITY";

    // The environment is process wide, so each case runs in a child process.
    if let Ok(expected) = env::var(EXPECTED_VAR) {
        assert_eq!(Some(Context::from_env().verbosity()), expected.parse::<Severity>().ok());
        return;
    }

    let exe = env::current_exe().expect("test binary should have a path");
    for (level, expected) in [(" Debug ", "debug"), ("error", "error"), ("loud", "warning")] {
        let output = Command::new(&exe)
            .args(["--exact", "status::tests::test_verbosity_from_env", "--test-threads=1"])
            .env(VERBOSITY_VAR, level)
            .env(EXPECTED_VAR, expected)
            .output()
            .expect("child test process should start");
        assert!(output.status.success(), "{level:?} should give a verbosity of {expected}.");
    }
}
