//! Tradus - Structure-Preserving File Translation
//!
//! Translates the text of subtitle (`.srt`) and JSON files into a target
//! language while leaving indices, timing cues, keys, numbers and layout
//! untouched. A unit that cannot be translated keeps its source text.

pub mod backend;
pub mod cli;
pub mod config;
pub mod error;
pub mod json;
pub mod languages;
pub mod subtitle;
pub mod translate;
pub mod workflow;
