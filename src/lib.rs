// Clientvoice: text analytics for hiring and client-review reports
//
// This is the library root. Each module corresponds to a stage of the
// report: loading tables, counting keywords, scoring sentiment, and
// extracting complaint topics.

pub mod config;
pub mod corpus;
pub mod error;
pub mod keywords;
pub mod output;
pub mod pipeline;
pub mod sentiment;
pub mod status;
pub mod topics;
