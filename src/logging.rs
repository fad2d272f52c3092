//! Tracing and panic-log installation for native hosts.
//!
//! Browser hosts install `tracing-wasm` instead; see `greeter-web`.

use std::io::{self, Write};
use std::panic::{self, PanicHookInfo};
use std::sync::Once;
use std::thread;

use tracing_subscriber::fmt::{self, writer::MakeWriter};
use tracing_subscriber::prelude::*;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const TRACING_PREFIX: &str = "[greeter] ";
const DEFAULT_DIRECTIVE: &str = "info";

static TRACING_INSTALLED: Once = Once::new();
static PANIC_HOOK_INSTALLED: Once = Once::new();

/// Installs a stderr subscriber filtered by `RUST_LOG`, defaulting to `info`.
///
/// Idempotent; only the first call has an effect.
pub fn install_tracing() {
    install_tracing_with(DEFAULT_DIRECTIVE);
}

/// Like [`install_tracing`], with `directive` used when `RUST_LOG` is unset or invalid.
pub fn install_tracing_with(directive: &str) {
    TRACING_INSTALLED.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));

        let console = fmt::layer()
            .with_writer(PrefixedWriter)
            .with_target(true)
            .with_filter(filter);

        if tracing_subscriber::registry().with(console).try_init().is_err() {
            eprintln!("greeter: a global tracing subscriber was already set");
        }
    });
}

/// Routes panics through `tracing::error!` before the previous hook runs.
///
/// Idempotent.
pub fn install_panic_logger() {
    PANIC_HOOK_INSTALLED.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            log_panic(info);
            previous(info);
        }));
    });
}

fn log_panic(info: &PanicHookInfo<'_>) {
    let message = panic_message(info.payload());
    let thread_name = thread::current().name().unwrap_or("unnamed").to_owned();
    let location = info
        .location()
        .map(|loc| format!("{}:{}:{}", loc.file(), loc.line(), loc.column()));

    tracing::error!(
        target: "greeter::panic",
        message = %message,
        thread = %thread_name,
        location = location.as_deref().unwrap_or("unknown"),
    );
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_owned()
    }
}

#[derive(Clone, Copy, Default)]
struct PrefixedWriter;

impl<'a> MakeWriter<'a> for PrefixedWriter {
    type Writer = PrefixedWriterInner<io::Stderr>;

    fn make_writer(&'a self) -> Self::Writer {
        PrefixedWriterInner {
            inner: io::stderr(),
            wrote_prefix: false,
        }
    }
}

struct PrefixedWriterInner<W> {
    inner: W,
    wrote_prefix: bool,
}

impl<W: Write> Write for PrefixedWriterInner<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if !self.wrote_prefix {
            self.inner.write_all(TRACING_PREFIX.as_bytes())?;
            self.wrote_prefix = true;
        }
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_is_written_once_per_event() {
        let mut writer = PrefixedWriterInner {
            inner: Vec::new(),
            wrote_prefix: false,
        };
        writer.write_all(b"INFO hello").unwrap();
        writer.write_all(b" world\n").unwrap();
        assert_eq!(writer.inner, b"[greeter] INFO hello world\n");
    }

    #[test]
    fn panic_messages_are_extracted() {
        let borrowed: Box<dyn std::any::Any + Send> = Box::new("boom");
        let owned: Box<dyn std::any::Any + Send> = Box::new(String::from("bang"));
        let other: Box<dyn std::any::Any + Send> = Box::new(7_u8);
        assert_eq!(panic_message(borrowed.as_ref()), "boom");
        assert_eq!(panic_message(owned.as_ref()), "bang");
        assert_eq!(panic_message(other.as_ref()), "Unknown panic");
    }

    #[test]
    fn installation_is_idempotent() {
        install_tracing();
        install_tracing_with("debug");
        install_panic_logger();
        install_panic_logger();
        tracing::info!("still logging");
    }
}
