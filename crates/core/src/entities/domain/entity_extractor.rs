use super::entity::EntitySet;

/// Domain interface for named-entity extraction.
pub trait EntityExtractor: Send {
    fn extract(&self, text: &str) -> Result<EntitySet, Box<dyn std::error::Error>>;
}
