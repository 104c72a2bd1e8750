//! Title layout: explicit breaks, greedy wrapping, vertical centering.

pub mod block;
pub mod wrap;

pub use block::{TextBlock, max_line_width};
pub use wrap::{break_title, wrap_line};
