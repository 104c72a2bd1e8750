pub mod config;
pub mod font;
pub mod image;
pub mod io;
