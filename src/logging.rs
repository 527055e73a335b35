use tracing::subscriber::DefaultGuard;
use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

pub const DEFAULT_DIRECTIVES: &str = "info";

/// Text subscriber writing `timestamp level target: message` lines to stderr
pub fn subscriber(directives: &str) -> impl Subscriber + Send + Sync + 'static {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(directives))
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish()
}

/// Same format as [`subscriber`], without colors, into any writer
pub fn subscriber_with_writer<W>(directives: &str, writer: W) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(directives))
        .with_target(true)
        .with_ansi(false)
        .with_writer(writer)
        .finish()
}

/// Install the process subscriber; logging stops when the guard drops.
///
/// `RUST_LOG` overrides the default `info` level.
pub fn init() -> DefaultGuard {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV)
        .unwrap_or_else(|_| DEFAULT_DIRECTIVES.to_string());
    tracing::subscriber::set_default(subscriber(&directives))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    /// In-memory log sink shared with other test modules
    #[derive(Clone, Default)]
    pub(crate) struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl Buffer {
        pub(crate) fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl io::Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'w> MakeWriter<'w> for Buffer {
        type Writer = Buffer;

        fn make_writer(&'w self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn test_lines_carry_level_target_and_message() {
        let buffer = Buffer::default();
        tracing::subscriber::with_default(subscriber_with_writer("info", buffer.clone()), || {
            tracing::info!("Loading .env file");
            tracing::debug!("hidden at info");
        });

        let output = buffer.contents();
        assert_eq!(output.lines().count(), 1);
        assert!(output.contains("INFO"));
        assert!(output.contains("concert_agent::logging::tests"));
        assert!(output.contains("Loading .env file"));
        assert!(!output.contains("hidden at info"));
    }

    #[test]
    fn test_debug_directives() {
        let buffer = Buffer::default();
        tracing::subscriber::with_default(subscriber_with_writer("debug", buffer.clone()), || {
            tracing::debug!("Concerts: []");
        });
        assert!(buffer.contents().contains("DEBUG"));
    }
}
