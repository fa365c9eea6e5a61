//! Diagnostic trace lines written to the client's optional sink.

use std::cell::RefCell;
use std::fmt;
use std::io::{self, Write};
use std::rc::Rc;

/// Size of the trace buffer; formatted text is capped at two bytes less.
pub const MAX_TRACE: usize = 100;

/// Client translation from a numeric state/event id to display text.
pub type Translator = Rc<dyn Fn(u32) -> String>;

/// Emit a trace line tagged with the caller's source line. Arguments are
/// only evaluated when a sink is configured.
macro_rules! sm_trace {
    ($inner:expr, $($arg:tt)*) => {
        if $inner.tracer.enabled() {
            $inner.trace_line(line!(), format_args!($($arg)*));
        }
    };
}

pub(crate) use sm_trace;

pub(crate) struct Tracer {
    sink: RefCell<Option<Box<dyn Write>>>,
    translator: Translator,
}

impl Tracer {
    pub(crate) fn new(sink: Option<Box<dyn Write>>, translator: Translator) -> Self {
        Self {
            sink: RefCell::new(sink),
            translator,
        }
    }

    pub(crate) fn enabled(&self) -> bool {
        self.sink.borrow().is_some()
    }

    pub(crate) fn name(&self, id: u32) -> String {
        (self.translator)(id)
    }

    /// Write `SM(<line>): <text>` to the sink, if there is one.
    pub(crate) fn write(&self, line: u32, args: fmt::Arguments<'_>) -> io::Result<()> {
        let mut sink = self.sink.borrow_mut();
        let Some(sink) = sink.as_mut() else {
            return Ok(());
        };

        let mut text = fmt::format(args);
        truncate(&mut text, MAX_TRACE - 2);
        writeln!(sink, "SM({}): {}", line, text.trim_end_matches('\n'))
    }

    /// Flush and drop the sink.
    pub(crate) fn release(&self) {
        if let Some(mut sink) = self.sink.borrow_mut().take() {
            let _ = sink.flush();
        }
    }
}

/// Cut `text` to at most `max` bytes without splitting a character.
pub(crate) fn truncate(text: &mut String, max: usize) {
    if text.len() <= max {
        return;
    }
    let mut cut = max;
    while !text.is_char_boundary(cut) {
        cut -= 1;
    }
    text.truncate(cut);
}
