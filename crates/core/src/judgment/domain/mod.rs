pub mod improvement_plan;
pub mod judgment_normalizer;
pub mod judgment_source;
pub mod verdict;
pub mod verdict_heuristic;
