//! Payload Repository Port
//!
//! Named text blobs: static bootstrap blocks and one porting body per service.

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::value_objects::ServiceId;

/// Static bootstrap blocks embedded in every notebook
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StaticBlock {
    /// Downloads API packages and default DBs
    Setup,
    /// Installs dependencies
    PipInstall,
}

impl StaticBlock {
    pub const ALL: [StaticBlock; 2] = [StaticBlock::Setup, StaticBlock::PipInstall];

    pub fn file_name(&self) -> &'static str {
        match self {
            StaticBlock::Setup => "setup_cell.py",
            StaticBlock::PipInstall => "pipinstall_cell.py",
        }
    }

    /// Markdown heading placed above the block
    pub fn heading(&self) -> &'static str {
        match self {
            StaticBlock::Setup => "## Download relevant files",
            StaticBlock::PipInstall => "## Install Dependencies and Clone Repositories",
        }
    }
}

#[derive(Error, Debug)]
pub enum PayloadError {
    #[error("static payload '{name}' not found at {path}")]
    MissingStatic { name: &'static str, path: PathBuf },

    #[error("failed to read payload {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Source of opaque payload text
pub trait PayloadRepository {
    /// A static block; missing static blocks are an error
    fn static_block(&self, block: StaticBlock) -> Result<String, PayloadError>;

    /// The porting body for a service, `None` when not provided
    fn porting_body(&self, service: ServiceId) -> Result<Option<String>, PayloadError>;
}
