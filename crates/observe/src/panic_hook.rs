use std::panic::{self, PanicHookInfo};

/// Installs a panic hook that logs the panic through `tracing` before
/// delegating to the previously installed hook.
///
/// Without this, panic messages bypass the configured log format which makes
/// them easy to miss when logs are collected as JSON.
pub fn install() {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info: &PanicHookInfo| {
        tracing::error!("thread panicked: {info}");
        previous(info);
    }));
}
