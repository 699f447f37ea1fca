pub mod analysis_snapshot;
pub mod constants;
pub mod model_resolver;
