pub mod ollama_judge;
