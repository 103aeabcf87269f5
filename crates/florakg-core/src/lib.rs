//! Florakg Core Library
//!
//! Plant records, record stores, and the question answering pipeline for the
//! Jingchu plant-culture knowledge graph.

pub mod completion;
pub mod config;
pub mod error;
pub mod plant;
pub mod qa;
pub mod store;

pub use completion::{CompletionRequest, CompletionService};
pub use config::{AnswerStrategy, AppConfig};
pub use error::{CompletionError, FloraError, FloraResult};
pub use plant::{Plant, PlantDetail, RelationshipKind};
pub use qa::{Answer, QaService, Route};
pub use store::{RecordStore, StoreBackend, TableStore};
