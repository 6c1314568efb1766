//! Record sinks.
//!
//! # Submodules
//!
//! - [`text`]: one plain-text transcript file per article
//! - [`json`]: every record of a run in a single JSON document
//!
//! # Output Structure
//!
//! ```text
//! result_folder/
//! ├── Episode 1- The Start.txt
//! └── Episode 2.txt
//!
//! transcripts.json           # only with --json-output
//! ```

pub mod json;
pub mod text;
