//! # Thymos Monitor
//!
//! Message-rate telemetry for the avatar's input topics. Any callback
//! thread may record impulses; a render or diagnostic thread reads
//! windowed frequencies through snapshots. Locks are held only for the
//! few instructions around the deque, never across user code.

pub mod stream;

pub use stream::{MonitorHub, StreamLine, StreamSnapshot};
