//! Debug trace channel.
//!
//! When debugging is enabled every sizing decision is described in a
//! human-readable line. Lines go to `tracing` at debug level (target
//! `autofit_grid`) and, if one is attached, to a [`DebugSink`] such as an
//! on-screen log panel. While disabled, lines are never formatted.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// A surface that displays trace lines.
pub trait DebugSink {
    fn append(&mut self, line: &str);

    /// Show or hide the surface. Called by
    /// [`GridSizer::set_debug_mode`](crate::GridSizer::set_debug_mode).
    fn set_visible(&mut self, _visible: bool) {}
}

/// An in-memory [`DebugSink`].
///
/// Clones share the same buffer, so a host can keep one handle and give
/// another to the sizer.
#[derive(Clone, Debug, Default)]
pub struct DebugLog {
    inner: Rc<RefCell<DebugLogState>>,
}

#[derive(Debug, Default)]
struct DebugLogState {
    lines: Vec<String>,
    visible: bool,
}

impl DebugLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every line appended so far.
    pub fn lines(&self) -> Vec<String> {
        self.inner.borrow().lines.clone()
    }

    pub fn is_visible(&self) -> bool {
        self.inner.borrow().visible
    }

    pub fn clear(&self) {
        self.inner.borrow_mut().lines.clear();
    }

    /// True if any line contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.inner.borrow().lines.iter().any(|l| l.contains(needle))
    }
}

impl DebugSink for DebugLog {
    fn append(&mut self, line: &str) {
        self.inner.borrow_mut().lines.push(line.to_string());
    }

    fn set_visible(&mut self, visible: bool) {
        self.inner.borrow_mut().visible = visible;
    }
}

/// Gate and fan-out for trace lines.
pub struct Trace {
    enabled: bool,
    sink: Option<Box<dyn DebugSink>>,
}

impl Default for Trace {
    fn default() -> Self {
        Trace::disabled()
    }
}

impl fmt::Debug for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Trace")
            .field("enabled", &self.enabled)
            .field("has_sink", &self.sink.is_some())
            .finish()
    }
}

impl Trace {
    pub fn new(enabled: bool, sink: Option<Box<dyn DebugSink>>) -> Self {
        let mut trace = Trace { enabled, sink };
        if let Some(sink) = trace.sink.as_mut() {
            sink.set_visible(enabled);
        }
        trace
    }

    pub fn disabled() -> Self {
        Trace {
            enabled: false,
            sink: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if let Some(sink) = self.sink.as_mut() {
            sink.set_visible(enabled);
        }
    }

    /// Emit one line. Prefer the `debug_line!` macro, which skips
    /// formatting entirely while disabled.
    pub fn emit(&mut self, args: fmt::Arguments<'_>) {
        if !self.enabled {
            return;
        }
        let line = args.to_string();
        tracing::debug!(target: "autofit_grid", "{}", line);
        if let Some(sink) = self.sink.as_mut() {
            sink.append(&line);
        }
    }

    /// Blank separator between sizing passes on the sink.
    pub fn separator(&mut self) {
        if !self.enabled {
            return;
        }
        if let Some(sink) = self.sink.as_mut() {
            sink.append("");
        }
    }
}

/// Emit a formatted trace line if tracing is enabled.
macro_rules! debug_line {
    ($trace:expr, $($arg:tt)*) => {
        if $trace.is_enabled() {
            $trace.emit(format_args!($($arg)*));
        }
    };
}

pub(crate) use debug_line;
