// Value formatting with SI prefixes
// Pure functions only: the prefix table and the quantity regex are immutable statics

pub mod detector;
pub mod error;
pub mod formatter;
pub mod general;
pub mod precision;
pub mod prefix;
pub mod request;
pub mod types;


pub use detector::{looks_like_quantity, split_quantity};
pub use error::PucError;
pub use formatter::{format, format_verbose, parse_unit, sanitize_filename};
pub use general::format_general;
pub use precision::resolve_precision;
pub use prefix::{get_prefix, SiPrefix, SI_PREFIXES};
pub use request::{format_json, number_to_json, FormatOutput, FormatRequest};
pub use types::{Formatted, Precision, ResolvedPrecision, UnitKind, UnitSpec};
