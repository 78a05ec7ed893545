//! Domain Layer
//!
//! Pure generation logic without I/O dependencies.
//!
//! ## Structure
//!
//! - `entities/` - Row, Artifact, PayloadSet, RowResult
//! - `value_objects/` - ServiceId, PortingConvention, ContentHash
//! - `services/` - Resolver, Validator, Assembler, Composer
//! - `ports/` - Interface definitions for infrastructure
//!
//! ## Design Principles
//!
//! 1. **No I/O** - This layer never touches the file system directly
//! 2. **Pure Functions** - Services are stateless and testable
//! 3. **Ports & Adapters** - All I/O goes through trait-defined ports

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
