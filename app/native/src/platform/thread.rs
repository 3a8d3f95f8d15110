use std::thread::{self, JoinHandle};

/// Spawns a background thread named `noborders-{name}`.
///
/// Spawn failures are logged and reported as `None`; callers that only need
/// fire-and-forget behavior can ignore the handle.
pub fn spawn_named_thread<F>(name: &str, task: F) -> Option<JoinHandle<()>>
where F: FnOnce() + Send + 'static {
    let thread_name = format!("noborders-{name}");

    match thread::Builder::new().name(thread_name.clone()).spawn(task) {
        Ok(handle) => Some(handle),
        Err(err) => {
            tracing::error!(thread = %thread_name, error = %err, "failed to spawn thread");
            None
        }
    }
}
