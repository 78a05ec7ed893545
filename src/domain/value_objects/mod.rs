//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod hash;
mod porting;
mod service_id;

pub use hash::ContentHash;
pub use porting::{Injection, InjectionShape, PortingConvention};
pub use service_id::ServiceId;
