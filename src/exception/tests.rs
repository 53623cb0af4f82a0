#![cfg(test)]

use std::cell::Cell;
use std::env;
use std::process::{Command, Output};

use super::*;
use crate::status::{Context, ErrorValue, Origin, Severity, StatusCode};

const CHILD_VAR: &str = "FOUNDATION_ABORT_CHILD";

/// Runs a single test from this binary in a child process, with [`CHILD_VAR`] set so that the test
/// takes its aborting branch.
fn run_child(test: &str) -> Output {
    let exe = env::current_exe().expect("test binary should have a path");
    Command::new(exe)
        .args(["--exact", test, "--nocapture", "--test-threads=1"])
        .env(CHILD_VAR, "1")
        .output()
        .expect("child test process should start")
}

fn is_child() -> bool {
    env::var_os(CHILD_VAR).is_some()
}

fn descend(depth: usize, reached: &Cell<usize>, after: &Cell<usize>) -> Outcome<usize> {
    reached.set(reached.get() + 1);
    if depth == 0 {
        return Err(Thrown::new(ErrorValue::new(
            StatusCode::AllocationFailure,
            "bottom of the stack",
            Origin::new("deep.rs", 99, "descend"),
        )));
    }
    let value = descend(depth - 1, reached, after)?;
    after.set(after.get() + 1);
    Ok(value + 1)
}

#[test]
fn test_throw_and_try_status() {
    let thrown: Outcome<()> = throw(ErrorValue::here(StatusCode::TestFailure, "thrown"));
    assert_eq!(thrown.status(), StatusCode::TestFailure);

    assert_eq!(try_status(StatusCode::Ok, "unused"), Ok(()));

    let line = line!() + 1;
    let thrown = try_status(StatusCode::GenericError, "joined").unwrap_err();
    assert_eq!(thrown.status(), StatusCode::GenericError);
    assert_eq!(thrown.message(), "joined");
    assert_eq!(thrown.origin.file, file!());
    assert_eq!(thrown.origin.line, line, "The caller should be recorded as the origin.");
}

#[test]
fn test_frame_catches_from_deep_nesting() {
    let (reached, after) = (Cell::new(0), Cell::new(0));
    let mut frame = Frame::new();
    assert!(!frame.is_holding());

    let result = frame.arm(|| descend(16, &reached, &after));
    assert_eq!(result, Err(StatusCode::AllocationFailure));
    assert_eq!(reached.get(), 17, "Every level should be entered exactly once.");
    assert_eq!(after.get(), 0, "Nothing after the throw should run on the way back up.");

    let caught = frame.caught().expect("the frame should hold the thrown value");
    assert_eq!(caught.message(), "bottom of the stack");
    assert_eq!(caught.origin, Origin::new("deep.rs", 99, "descend"));
    assert!(frame.is_holding());

    let disposed = frame.dispose();
    assert_eq!(disposed.map(|error| error.status), Some(StatusCode::AllocationFailure));
    assert!(!frame.is_holding());
    assert_eq!(frame.dispose(), None, "A value can only be disposed of once.");
}

#[test]
fn test_frame_passes_values_through() {
    let (reached, after) = (Cell::new(0), Cell::new(0));
    let mut frame = Frame::default();

    let result = frame.arm(|| {
        let value = checked_add(2, 3)?;
        Ok(value * 2)
    });
    assert_eq!(result, Ok(10));
    assert!(!frame.is_holding());

    let result = frame.arm(|| descend(0, &reached, &after).or_else(|_| Ok(7)));
    assert_eq!(result, Ok(7), "A value recovered inside the scope shouldn't reach the frame.");
    assert!(!frame.is_holding());
}

#[test]
fn test_nested_frames_and_rethrow() {
    let mut outer = Frame::new();
    let mut inner_status = StatusCode::Ok;

    let result: Result<(), StatusCode> = outer.arm(|| {
        let mut inner = Frame::new();
        if let Err(status) = inner.arm(|| try_status(StatusCode::ArithmeticOverflow, "inner")) {
            inner_status = status;
            inner.rethrow()?;
        }
        Ok(())
    });

    assert_eq!(inner_status, StatusCode::ArithmeticOverflow);
    assert_eq!(result, Err(StatusCode::ArithmeticOverflow));
    assert_eq!(outer.caught().map(ErrorValue::message), Some("inner"));

    let mut empty = Frame::new();
    assert_eq!(empty.rethrow(), Ok(()), "Rethrowing from an empty frame does nothing.");
}

#[test]
fn test_frame_replaces_held_value() {
    let mut frame = Frame::new();
    let _ = frame.arm(|| try_status(StatusCode::GenericError, "first"));
    let _ = frame.arm(|| try_status(StatusCode::TestFailure, "second"));

    let held = frame.dispose().expect("the frame should be holding a value");
    assert_eq!(held.status, StatusCode::TestFailure);
    assert_eq!(held.message(), "second");
}

#[test]
fn test_checked_arithmetic() {
    assert_eq!(checked_add(1, 2), Ok(3));
    assert_eq!(checked_mul(usize::MAX, 1), Ok(usize::MAX));

    let line = line!() + 1;
    let thrown = checked_add(usize::MAX, 1).unwrap_err();
    assert_eq!(thrown.status(), StatusCode::ArithmeticOverflow);
    assert_eq!(thrown.origin.file, file!(), "The overflow should be blamed on the caller.");
    assert_eq!(thrown.origin.line, line);

    let line = line!() + 1;
    let thrown = checked_mul(usize::MAX / 2 + 1, 2).unwrap_err();
    assert_eq!(thrown.status(), StatusCode::ArithmeticOverflow);
    assert_eq!((thrown.origin.file, thrown.origin.line), (file!(), line));

    let line = line!() + 1;
    let thrown = narrow::<i64, u8>(256).unwrap_err();
    assert_eq!((thrown.origin.file, thrown.origin.line), (file!(), line));
    assert!(
        thrown.to_string().starts_with(&format!("{}:{line}: Arithmetic Overflow: ", file!())),
        "The diagnostic line should point at the call, got {thrown}."
    );

    assert_eq!(narrow::<i64, u8>(255), Ok(255));
    assert_eq!(narrow::<usize, isize>(usize::MAX).status(), StatusCode::ArithmeticOverflow);
    assert_eq!(narrow::<i32, u32>(-1).status(), StatusCode::ArithmeticOverflow);
}

#[test]
fn test_ptr_distance() {
    let values = [0_u64; 8];
    let start = values.as_ptr();
    let end = start.wrapping_add(5);

    assert_eq!(ptr_distance(start, end), Ok(5));
    assert_eq!(ptr_distance(end, start), Ok(-5));
    assert_eq!(ptr_distance(start, start), Ok(0));

    let far = isize::MIN.unsigned_abs() as *const u8;
    let null = std::ptr::null::<u8>();
    assert_eq!(ptr_distance(far, null), Ok(isize::MIN), "isize::MIN itself is representable.");
    assert_eq!(ptr_distance(far.wrapping_add(1), null).status(), StatusCode::ArithmeticOverflow);
    assert_eq!(ptr_distance(null, far).status(), StatusCode::ArithmeticOverflow);

    let line = line!() + 1;
    let thrown = ptr_distance(far.wrapping_add(1), null).unwrap_err();
    assert_eq!((thrown.origin.file, thrown.origin.line), (file!(), line));

    let units = [(); 4];
    let unit = units.as_ptr();
    assert_eq!(ptr_distance(unit, unit.wrapping_add(3)), Ok(0));
}

#[test]
fn test_or_escalate_passes_values() {
    let ctx = Context::new().with_sink(std::io::sink());
    let outcome: Outcome<u8> = Ok(3);
    assert_eq!(outcome.or_escalate(&ctx), 3);
}

#[test]
fn test_unhandled_escalation_aborts() {
    if is_child() {
        let ctx = Context::new();
        let outcome: Outcome<()> = Err(Thrown::new(ErrorValue::new(
            StatusCode::ArithmeticOverflow,
            "nobody caught this",
            Origin::new("escalate.rs", 12, "main"),
        )));
        outcome.or_escalate(&ctx);
        return;
    }

    let output = run_child("exception::tests::test_unhandled_escalation_aborts");
    assert!(!output.status.success(), "An unhandled value should terminate the process.");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("escalate.rs:12: Arithmetic Overflow: nobody caught this\n"),
        "The value should be reported before aborting, got {stderr:?}."
    );
}

#[test]
fn test_failed_assertion_aborts() {
    if is_child() {
        let ctx = Context::new().with_verbosity(Severity::Debug);
        ctx.assert(Severity::Info, 1 + 1 == 3, "arithmetic is broken", Origin::new("a.rs", 3, "f"));
        return;
    }

    let output = run_child("exception::tests::test_failed_assertion_aborts");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("a.rs:3: Assertion Failure: arithmetic is broken\n"),
        "got {stderr:?}"
    );
}

#[test]
fn test_failed_precondition_aborts() {
    if is_child() {
        // Preconditions ignore the verbosity threshold.
        let ctx = Context::new().with_verbosity(Severity::Fatal);
        ctx.require(false, "size must be non-zero", Origin::new("p.rs", 8, "g"));
        return;
    }

    let output = run_child("exception::tests::test_failed_precondition_aborts");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("p.rs:8: Precondition Failure: size must be non-zero\n"),
        "got {stderr:?}"
    );
}
