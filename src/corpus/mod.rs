// Document corpora: the in-memory tables every component reads.
//
// Loading is the only I/O in the crate. The analytics modules take a
// `&Corpus` and never touch the filesystem.

pub mod cache;
pub mod loader;
pub mod models;
pub mod stats;
