pub mod cli;
pub mod codec;
pub mod column;
pub mod compiler;
pub mod error;
pub mod filter;
pub mod lookup;
pub mod output;
pub mod transform;
pub mod value;

pub use codec::{PreparedOperand, WireValue};
pub use column::DocumentColumn;
pub use compiler::{CompilerOptions, Placeholder, SqlCompiler};
pub use error::LookupError;
pub use filter::Filter;
pub use lookup::{Lookup, LookupKind};
pub use output::{to_json, to_json_pretty};
pub use transform::{KeyPath, KeyTransform, PathSegment, Target, TransformFactory};
pub use value::Document;
