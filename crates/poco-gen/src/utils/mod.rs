pub mod text;


pub(crate) use text::{comment_lines, unescape};
