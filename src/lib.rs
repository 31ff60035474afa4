pub mod config;
pub mod convert;
pub mod filename;
pub mod grouper;
pub mod models;
pub mod parser;
pub mod render;
pub mod writer;
