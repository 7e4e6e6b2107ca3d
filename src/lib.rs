// Kranjska: topics over time in the Carniolan parliamentary corpus
//
// This is the library root. Each module corresponds to a stage of the
// extraction and topic modeling pipeline.

pub mod config;
pub mod corpus;
pub mod lemmas;
pub mod output;
pub mod pipeline;
pub mod speeches;
pub mod topics;
