//! Accessor paths for loosely typed CMS content.
//!
//! A path such as `cta.URL` or `Slide[0].image.data.attributes.url` names one
//! location inside a JSON payload. Section resolvers list several candidate
//! paths per logical field and take the first one that holds a present value.

pub mod ast;
pub mod eval;
pub mod functions;
pub mod lexer;
pub mod parser;

pub use ast::{AccessPath, Segment};
pub use eval::get;
pub use functions::{as_bool, as_f64, as_i64, as_list, as_text, is_blank, is_present};
pub use parser::{parse, ParseError};
