//! Debug taps: pass-through operators that report each element as it streams
//! by.
//!
//! Taps are lazy like any other operator. Output happens while a consumer
//! pulls, once per traversal. A failed write is logged and the element still
//! passes through.

use std::fmt::{Debug, Display};
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use tracing::warn;

use crate::sequence::{Element, Sequence};

fn write_text<W: Write>(out: &mut W, text: &str) {
    if let Err(err) = out.write_all(text.as_bytes()).and_then(|()| out.flush()) {
        warn!(%err, "debug tap failed to write");
    }
}

fn to_stdout(text: &str) {
    write_text(&mut io::stdout().lock(), text);
}

impl<T: Element> Sequence<T> {
    /// Runs `action` on each element as it passes through.
    pub fn tap<F>(&self, action: F) -> Sequence<T>
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let action = Arc::new(action);
        self.derive(move |cursor| {
            let action = Arc::clone(&action);
            cursor.inspect(move |item| action(item))
        })
    }

    /// Pretty-prints each element (`{:#?}`) to stdout.
    pub fn dump(&self) -> Sequence<T>
    where
        T: Debug,
    {
        self.tap(|item| to_stdout(&format!("{item:#?}\n")))
    }

    /// Prints each element to stdout with no separator.
    pub fn print(&self) -> Sequence<T>
    where
        T: Display,
    {
        self.tap(|item| to_stdout(&item.to_string()))
    }

    /// Prints each element to stdout through `format`, with no separator.
    pub fn print_with<F>(&self, format: F) -> Sequence<T>
    where
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        self.tap(move |item| to_stdout(&format(item)))
    }

    /// Prints each element to stdout on its own line.
    pub fn print_line(&self) -> Sequence<T>
    where
        T: Display,
    {
        self.tap(|item| to_stdout(&format!("{item}\n")))
    }

    /// Prints each element to stdout through `format`, one per line.
    pub fn print_line_with<F>(&self, format: F) -> Sequence<T>
    where
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        self.tap(move |item| to_stdout(&format!("{}\n", format(item))))
    }

    /// Writes each element through `format` to a shared sink.
    ///
    /// ```
    /// use std::sync::{Arc, Mutex};
    /// use standout_linq::Sequence;
    ///
    /// let log = Arc::new(Mutex::new(Vec::<u8>::new()));
    /// let seq = Sequence::range(1, 3).tap_to(Arc::clone(&log), |n| format!("<{n}>"));
    /// assert_eq!(seq.count(), 3);
    /// assert_eq!(log.lock().unwrap().as_slice(), b"<1><2><3>");
    /// ```
    pub fn tap_to<W, F>(&self, sink: Arc<Mutex<W>>, format: F) -> Sequence<T>
    where
        W: Write + Send + 'static,
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        self.tap(move |item| match sink.lock() {
            Ok(mut out) => write_text(&mut *out, &format(item)),
            Err(_) => warn!("debug tap sink is poisoned"),
        })
    }
}
