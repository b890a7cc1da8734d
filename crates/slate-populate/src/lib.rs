//! Reverse population: attach the documents of a related collection that
//! point back at a set of parent documents.
//!
//! Typical document-store populate helpers resolve references stored on the
//! document being fetched. Here the references live on the *other* side:
//! posts carry an `author` id, and we want each author to carry its posts.
//!
//! ```ignore
//! let authors = PopulateBuilder::new()
//!     .model_array(authors)
//!     .store_where("posts")
//!     .array_pop(true)
//!     .model(&posts)
//!     .id_field("author")
//!     .sort(parse_sort("-published_at"))
//!     .run()
//!     .await?;
//! ```
//!
//! One bulk query fetches every related document whose join key is one of
//! the parents' `_id`s; grouping is a single pass over the results against
//! an id-keyed index of the parents.

mod config;
mod error;
mod group;
mod index;
mod options;
mod populate;
mod query;

pub use config::PopulateConfig;
pub use error::PopulateError;
pub use group::{Cardinality, Populated};
pub use options::{PopulateBuilder, PopulateOptions, REQUIRED_OPTIONS};
pub use populate::reverse_populate;
pub use slate_query::{Model, PopulateSpec, Projection, Sort, SortDirection, parse_sort};

/// Field holding a parent document's identifier.
pub const PARENT_ID: &str = "_id";
