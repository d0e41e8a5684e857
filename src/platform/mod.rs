//! Location service abstraction
//!
//! The platform delivers position fixes, compass headings and permission
//! changes. Everything behind `LocationService` is an external collaborator;
//! the tracker only polls it and tells it when to start or stop.

pub mod service;
pub mod mock;
pub mod error;

pub use service::{LocationService, LocationEvent};
pub use mock::MockLocationService;
pub use error::{ServiceError, ServiceResult};
