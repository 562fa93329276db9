// Topic extraction: TF-IDF weighting and NMF over negative reviews.

pub mod extractor;
pub mod matrix;
pub mod model;
pub mod nmf;
pub mod tfidf;
pub mod traits;
