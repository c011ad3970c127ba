//! Task spawning abstractions for the async runtime.
//! **Note**: at the moment, these are simple functions with baked-in tokio-based
//! implementation.

#[cfg(feature = "tokio")]
pub use impls::{JoinHandle, spawn_blocking};

#[cfg(feature = "tokio")]
mod impls {
    pub type JoinHandle<T> = tokio::task::JoinHandle<T>;

    /// Runs a blocking scan (index build, page read) on the dedicated blocking pool.
    pub fn spawn_blocking<F, R>(f: F) -> JoinHandle<R>
    where
        F: FnOnce() -> R + Send + 'static,
        R: Send + 'static,
    {
        tokio::task::spawn_blocking(f)
    }
}
