//! Document model types.
//!
//! The input side is the block graph returned by the analysis service
//! ([`Block`], [`DocumentGraph`], [`AnalysisResponse`]); the output side is
//! what the reducer produces from it ([`Extraction`], [`FormEntry`],
//! [`Table`]).

mod block;
mod extraction;
mod graph;
mod response;
mod table;

pub use block::{Block, BlockType, EntityType, Relationship, RelationshipType};
pub use extraction::{Extraction, FormEntry};
pub use graph::DocumentGraph;
pub use response::{AnalysisResponse, DocumentMetadata, JobStatus, ResponseDocument, Warning};
pub use table::{Table, TableRow};
