//! Domain Entities
//!
//! - `Row` - one tracker row
//! - `Artifact` - a generated notebook (ordered blocks + render step)
//! - `PayloadSet` - opaque static blocks and porting bodies
//! - `RowResult` / `RunReport` - per-row outcomes

mod artifact;
mod payloads;
mod row;
mod row_result;

pub use artifact::{Artifact, Block, CodeBuilder, Fragment};
pub use payloads::PayloadSet;
pub use row::{Row, SERVICES_COLUMNS};
pub use row_result::{RowOutcome, RowResult, RunReport};
