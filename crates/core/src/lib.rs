pub mod entities;
pub mod judgment;
pub mod language;
pub mod pipeline;
pub mod report;
pub mod shared;
pub mod transcription;
