mod expression;
mod model;
mod parse_filter;
mod path;
mod projection;
mod query;
mod sort;

pub use expression::Expression;
pub use model::Model;
pub use parse_filter::{FilterParseError, parse_filter};
pub use path::{get_path, id_key};
pub use projection::Projection;
pub use query::{FindQuery, PopulateSpec};
pub use sort::{Sort, SortDirection, parse_sort};
