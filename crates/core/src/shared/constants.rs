pub const WHISPER_MODEL_FILENAME: &str = "ggml-base.en.bin";
pub const WHISPER_MODEL_URL: &str =
    "https://huggingface.co/ggerganov/whisper.cpp/resolve/main/ggml-base.en.bin";
pub const WHISPER_SAMPLE_RATE: u32 = 16000;

/// Name of the per-user cache directory holding downloaded models.
pub const APP_CACHE_DIR: &str = "Interview Assessor";

/// Extensions treated as ready-made transcripts rather than audio.
pub const TRANSCRIPT_EXTENSIONS: &[&str] = &["txt", "md"];

pub const DEFAULT_REPORT_FILENAME: &str = "final_interview_report.pdf";
pub const DEFAULT_CANDIDATE_NAME: &str = "John Doe";
pub const DEFAULT_POSITION: &str = "Engineer";

/// Seconds to wait for the external judgment source before falling back.
pub const DEFAULT_JUDGE_TIMEOUT_SECS: u64 = 60;
/// Seconds to wait for the grammar checker.
pub const DEFAULT_GRAMMAR_TIMEOUT_SECS: u64 = 120;
