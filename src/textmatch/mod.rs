// Resume matching: TF-IDF weighting and keyword gap analysis.

pub mod preprocess;
pub mod similarity;
