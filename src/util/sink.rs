use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

/// A diagnostic sink that keeps everything written to it, shared with the test that reads it.
#[derive(Debug, Default, Clone)]
pub struct SharedSink(pub Rc<RefCell<String>>);

impl SharedSink {
    /// Creates an empty sink.
    pub fn new() -> SharedSink {
        SharedSink::default()
    }

    /// Returns everything written so far, leaving the sink empty.
    pub fn take(&self) -> String {
        self.0.take()
    }
}

impl Write for SharedSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().push_str(&String::from_utf8_lossy(buf));
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
