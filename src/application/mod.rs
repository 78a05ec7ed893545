//! Application Layer
//!
//! Use cases that orchestrate the generation flow. This layer depends on the
//! domain (entities, services, ports) and never on concrete infrastructure.
//!
//! - `RowPipeline` - generate, persist and summarize every row
//! - `CheckUseCase` - preflight without writing anything
//! - `DiffUseCase` - compare regenerated notebooks with stored ones

pub mod check;
pub mod diff;
pub mod pipeline;

pub use check::{CheckItem, CheckResult, CheckStatus, CheckUseCase};
pub use diff::{unified_patch, ChangeType, DiffEntry, DiffResult, DiffUseCase};
pub use pipeline::{PipelineOptions, RowPipeline, DRY_RUN_SCHEME};
