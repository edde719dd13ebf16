//! Process and filesystem integration: file discovery, the external text
//! extractor, and report delivery

pub mod extractor;
pub mod fileset;
pub mod output;
