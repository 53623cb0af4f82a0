use std::borrow::Cow;
use std::cell::RefCell;
use std::env;
use std::fmt::{self, Debug, Formatter};
use std::io::{self, Write};
use std::process;

use super::{ErrorValue, Origin, Severity, StatusCode};

/// The environment variable read by [`Context::from_env`] to set the verbosity threshold.
pub const VERBOSITY_VAR: &str = "FOUNDATION_VERBOSITY";

/// A handler invoked by [`Context::fail`] for a particular status. The status it returns replaces
/// the one that was recorded, allowing severity to be remapped without touching call sites.
pub type Handler = Box<dyn Fn(&ErrorValue) -> StatusCode>;

/// The state shared by everything that reports failures: one optional [`Handler`] per
/// [`StatusCode`], the verbosity threshold and the sink diagnostics are written to.
///
/// A Context is passed explicitly rather than living in a static, so independent Contexts never
/// observe each other's handlers. It is intended for use from a single thread.
pub struct Context {
    handlers: [Option<Handler>; StatusCode::COUNT],
    verbosity: Severity,
    sink: RefCell<Box<dyn Write>>,
}

impl Context {
    /// Creates a Context with no handlers, the default verbosity and diagnostics written to
    /// stderr.
    pub fn new() -> Context {
        Context {
            handlers: [const { None }; StatusCode::COUNT],
            verbosity: Severity::default(),
            sink: RefCell::new(Box::new(io::stderr())),
        }
    }

    /// Creates a Context with the verbosity read from [`VERBOSITY_VAR`]. Missing or unparsable
    /// values leave the default in place.
    pub fn from_env() -> Context {
        let mut ctx = Context::new();
        if let Some(level) = env::var(VERBOSITY_VAR).ok().and_then(|v| v.parse().ok()) {
            ctx.verbosity = level;
        }
        ctx
    }

    /// Replaces the sink that diagnostics are written to.
    pub fn with_sink(mut self, sink: impl Write + 'static) -> Context {
        self.sink = RefCell::new(Box::new(sink));
        self
    }

    pub fn with_verbosity(mut self, verbosity: Severity) -> Context {
        self.verbosity = verbosity;
        self
    }

    pub const fn verbosity(&self) -> Severity {
        self.verbosity
    }

    /// Sets the verbosity threshold, returning the previous one.
    pub fn set_verbosity(&mut self, verbosity: Severity) -> Severity {
        std::mem::replace(&mut self.verbosity, verbosity)
    }

    /// Installs `handler` for `code`, returning whatever was previously installed so that it can
    /// be restored later. Passing [`None`] removes the handler.
    pub fn set_handler(&mut self, code: StatusCode, handler: Option<Handler>) -> Option<Handler> {
        std::mem::replace(&mut self.handlers[code.index()], handler)
    }

    pub fn handler(&self, code: StatusCode) -> Option<&Handler> {
        self.handlers[code.index()].as_ref()
    }

    /// Records a failure into `slot` and returns the effective status. If a handler is registered
    /// for `code`, it is invoked with the recorded value and its result is returned instead.
    ///
    /// When the effective status is a failure that passes the verbosity threshold, one diagnostic
    /// line is written to the sink.
    ///
    /// # Examples
    /// ```
    /// # use foundation::origin;
    /// # use foundation::status::{Context, ErrorValue, StatusCode};
    /// let mut ctx = Context::new().with_sink(std::io::sink());
    /// ctx.set_handler(StatusCode::ArithmeticOverflow, Some(Box::new(|_: &ErrorValue| StatusCode::FatalError)));
    ///
    /// let mut slot = ErrorValue::default();
    /// let status = ctx.fail(&mut slot, StatusCode::ArithmeticOverflow, "too big", origin!());
    /// assert_eq!(status, StatusCode::FatalError);
    /// assert_eq!(slot.status, StatusCode::ArithmeticOverflow);
    /// ```
    pub fn fail(
        &self,
        slot: &mut ErrorValue,
        code: StatusCode,
        message: impl Into<Cow<'static, str>>,
        origin: Origin,
    ) -> StatusCode {
        *slot = ErrorValue::new(code, message, origin);

        let effective = match self.handler(code) {
            Some(handler) => handler(slot),
            None => code,
        };

        if effective.is_failure() && effective.severity().passes(self.verbosity) {
            self.emit(slot);
        }

        effective
    }

    /// Writes `error` to the sink if its severity passes the verbosity threshold.
    pub fn report(&self, error: &ErrorValue) {
        if error.status.severity().passes(self.verbosity) {
            self.emit(error);
        }
    }

    /// Writes `error` to the sink as a single diagnostic line, regardless of verbosity.
    pub fn emit(&self, error: &ErrorValue) {
        let mut sink = self.sink.borrow_mut();
        // Diagnostics are best effort, there is nowhere left to report a failing sink.
        let _ = writeln!(sink, "{error}");
        let _ = sink.flush();
    }

    /// Checks an assertion of the given severity. Checks more verbose than the threshold are
    /// skipped entirely. An enabled check that fails is fatal.
    pub fn assert(
        &self,
        severity: Severity,
        condition: bool,
        message: impl Into<Cow<'static, str>>,
        origin: Origin,
    ) {
        if severity.passes(self.verbosity) && !condition {
            self.fatal(&ErrorValue::new(StatusCode::AssertionFailure, message, origin));
        }
    }

    /// Checks a precondition. Unlike [`Context::assert`], preconditions are checked regardless of
    /// the verbosity threshold.
    pub fn require(
        &self,
        condition: bool,
        message: impl Into<Cow<'static, str>>,
        origin: Origin,
    ) {
        if !condition {
            self.fatal(&ErrorValue::new(StatusCode::PreconditionFailure, message, origin));
        }
    }

    /// Writes `error` to the sink and aborts the process.
    pub fn fatal(&self, error: &ErrorValue) -> ! {
        self.emit(error);
        process::abort()
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for Context {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("handlers", &Installed(&self.handlers))
            .field("verbosity", &self.verbosity)
            .finish_non_exhaustive()
    }
}

/// Lists the codes which currently have a handler installed.
struct Installed<'a>(&'a [Option<Handler>]);

impl Debug for Installed<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(StatusCode::ALL.iter().filter(|code| self.0[code.index()].is_some()))
            .finish()
    }
}
