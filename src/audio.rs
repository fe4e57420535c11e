//! Audio output through `rodio`.
//!
//! Decoding and output run on a dedicated thread that owns the output stream.
//! [`RodioDevice`] is the handle the transport drives; it talks to the thread
//! over a command channel and the thread answers with
//! [`DeviceEvent`](crate::transport::DeviceEvent)s.

mod device;
mod sink;
mod thread;
mod types;

pub use device::RodioDevice;
