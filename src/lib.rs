//! Chronicler: Historical World-Graph Ingestion Engine
//!
//! Converts a large semi-structured export file (and an optional,
//! sparser supplementary export) into a typed in-memory historical
//! graph, then runs whole-graph resolution passes that derive what the
//! raw format never states: era boundaries, ownership chains, and
//! heuristic actor attribution for collective events.
//!
//! # Core Concepts
//!
//! - **Property tree**: generic decoded form of one export element
//! - **World**: the complete set of materialized records plus derived indices
//! - **Merge coordinator**: lock-step reconciliation of the two streams
//!   keyed only by (section, id)
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! # async fn run() -> chronicler::ParseResult<()> {
//! let world = chronicler::ingest(Path::new("legends.xml"), None).await?;
//! println!("{} historical figures", world.figures.len());
//! # Ok(())
//! # }
//! ```

pub mod parser;
pub mod registry;
pub mod resolve;
pub mod world;

pub use parser::primary::{ingest, Ingestion};
pub use parser::property::Property;
pub use parser::section::Section;
pub use parser::{ParseError, ParseResult};
pub use registry::MaterializerRegistry;
pub use world::{Diagnostic, Diagnostics, World};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
