use tracing::{error, info};

/// User-facing notification sink (the toast surface).
///
/// Every user-triggered mutation ends in exactly one `success` or `error`
/// call — that feedback loop is part of the store contract, whatever
/// mechanism ultimately renders it.
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// Sink that forwards notifications to the tracing pipeline. Useful as a
/// default until a real toast surface is wired in.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, message: &str) {
        info!(target: "velora::notify", "{message}");
    }

    fn error(&self, message: &str) {
        error!(target: "velora::notify", "{message}");
    }
}

/// Sink that swallows notifications.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn success(&self, _message: &str) {}

    fn error(&self, _message: &str) {}
}

/// Test support: a sink that records what it was told.
pub mod testing {
    use super::Notifier;
    use std::sync::Mutex;

    /// Records every notification for assertions.
    #[derive(Debug, Default)]
    pub struct RecordingNotifier {
        pub successes: Mutex<Vec<String>>,
        pub errors: Mutex<Vec<String>>,
    }

    impl Notifier for RecordingNotifier {
        fn success(&self, message: &str) {
            self.successes.lock().unwrap().push(message.to_string());
        }

        fn error(&self, message: &str) {
            self.errors.lock().unwrap().push(message.to_string());
        }
    }
}
