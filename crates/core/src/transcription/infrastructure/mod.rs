#[cfg(feature = "whisper")]
pub mod ffmpeg_audio_decoder;
pub mod plain_text_transcriber;
#[cfg(feature = "whisper")]
pub mod whisper_transcriber;
