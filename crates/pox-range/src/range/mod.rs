//! Range expression types

mod operator;
mod version_range;

pub use operator::Operator;
pub use version_range::VersionRange;
