//! Domain Services
//!
//! Pure business logic over rows and the service catalog. Nothing in here
//! touches the file system.

pub mod assembler;
pub mod catalog;
pub mod composer;
mod escaping;
pub mod generator;
pub mod python_literal;
pub mod resolver;
pub mod validator;

pub use assembler::{assemble, canonical_json, parse_initial_db, PortingFragment};
pub use catalog::{ServiceCatalog, ServiceSpec};
pub use composer::compose;
pub use escaping::escape_string_literals;
pub use generator::{generate_row, GeneratedRow};
pub use python_literal::{python_str, to_python_literal};
pub use resolver::{resolve, resolve_token, ResolvedServiceSet, MAX_DEPENDENCY_DEPTH};
pub use validator::{required_fields, validate};
