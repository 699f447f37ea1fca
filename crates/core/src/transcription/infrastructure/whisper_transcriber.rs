use std::path::{Path, PathBuf};

use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

use crate::shared::constants::WHISPER_SAMPLE_RATE;
use crate::transcription::domain::transcriber::Transcriber;
use crate::transcription::infrastructure::ffmpeg_audio_decoder::decode_mono;

/// Transcriber using whisper.cpp via whisper-rs.
///
/// Audio is decoded with ffmpeg to 16 kHz mono before inference. The model
/// is loaded per call; one interview is transcribed per run.
#[derive(Debug)]
pub struct WhisperTranscriber {
    model_path: PathBuf,
    language: String,
}

impl WhisperTranscriber {
    pub fn new(model_path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        if !model_path.exists() {
            return Err(format!("Whisper model not found at: {}", model_path.display()).into());
        }
        Ok(Self {
            model_path: model_path.to_path_buf(),
            language: "en".to_string(),
        })
    }

    pub fn with_language(mut self, language: &str) -> Self {
        self.language = language.to_string();
        self
    }

    pub fn model_path(&self) -> &Path {
        &self.model_path
    }

    fn run_inference(&self, samples: &[f32]) -> Result<String, Box<dyn std::error::Error>> {
        let ctx = WhisperContext::new_with_params(
            self.model_path.to_str().ok_or("Invalid model path")?,
            WhisperContextParameters::default(),
        )
        .map_err(|e| format!("Failed to load Whisper model: {e}"))?;

        let mut state = ctx
            .create_state()
            .map_err(|e| format!("Failed to create Whisper state: {e}"))?;

        let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 1 });
        params.set_language(Some(&self.language));
        params.set_translate(false);
        params.set_print_special(false);
        params.set_print_progress(false);
        params.set_print_realtime(false);
        params.set_print_timestamps(false);
        params.set_n_threads(num_cpus().min(4) as i32);

        state
            .full(params, samples)
            .map_err(|e| format!("Whisper inference failed: {e}"))?;

        let mut text = String::new();
        for seg_idx in 0..state.full_n_segments() {
            let segment = match state.get_segment(seg_idx) {
                Some(s) => s,
                None => continue,
            };
            for tok_idx in 0..segment.n_tokens() {
                let token = match segment.get_token(tok_idx) {
                    Some(t) => t,
                    None => continue,
                };
                let piece = match token.to_str() {
                    Ok(t) => t,
                    Err(_) => continue,
                };
                // [_BEG_], <|endoftext|> and friends
                let trimmed = piece.trim();
                if trimmed.starts_with('[') || trimmed.starts_with('<') {
                    continue;
                }
                text.push_str(piece);
            }
        }

        Ok(text.split_whitespace().collect::<Vec<_>>().join(" "))
    }
}

impl Transcriber for WhisperTranscriber {
    fn transcribe(&self, source: &Path) -> Result<String, Box<dyn std::error::Error>> {
        log::info!("Transcribing {} with {}", source.display(), self.model_path.display());
        let samples = decode_mono(source, WHISPER_SAMPLE_RATE)?;
        if samples.is_empty() {
            return Err(format!("No audio decoded from {}", source.display()).into());
        }
        self.run_inference(&samples)
    }
}

fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}
