pub mod service;

pub use service::ProjectService;
