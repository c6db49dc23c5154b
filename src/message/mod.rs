//! MI record parsing and reply rendering

pub mod parser;
pub mod render;

pub use parser::parse_line;
pub use render::{render_replies, render_reply};
