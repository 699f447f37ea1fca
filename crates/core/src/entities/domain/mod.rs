pub mod entity;
pub mod entity_comparator;
pub mod entity_extractor;
