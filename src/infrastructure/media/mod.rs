//! File storage backends for uploaded media.

pub mod local;

pub use local::LocalMediaStorage;
