use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

use chrono::Local;
use clap::Parser;

use interview_core::entities::infrastructure::gazetteer_extractor::GazetteerExtractor;
use interview_core::judgment::domain::judgment_normalizer::JudgmentNormalizer;
use interview_core::judgment::domain::judgment_source::JudgmentSource;
use interview_core::judgment::infrastructure::ollama_judge::{
    OllamaJudge, DEFAULT_OLLAMA_MODEL, DEFAULT_OLLAMA_URL,
};
use interview_core::language::infrastructure::language_tool_checker::{
    LanguageToolChecker, DEFAULT_LANGUAGE, DEFAULT_LANGUAGETOOL_URL,
};
use interview_core::pipeline::assess_interview_use_case::{
    AssessInterviewUseCase, AssessmentOutcome,
};
use interview_core::pipeline::pipeline_logger::StdoutPipelineLogger;
use interview_core::report::domain::report_header::ReportHeader;
use interview_core::report::infrastructure::pdf_document_writer::PdfDocumentWriter;
use interview_core::shared::constants::{
    DEFAULT_CANDIDATE_NAME, DEFAULT_GRAMMAR_TIMEOUT_SECS, DEFAULT_JUDGE_TIMEOUT_SECS,
    DEFAULT_POSITION, DEFAULT_REPORT_FILENAME, TRANSCRIPT_EXTENSIONS,
};
use interview_core::transcription::domain::transcriber::Transcriber;
use interview_core::transcription::infrastructure::plain_text_transcriber::PlainTextTranscriber;

/// Assess a recorded interview against the candidate's CV and write a PDF
/// report with a HIRE / REJECT / REVIEW verdict.
#[derive(Parser, Debug)]
#[command(name = "interview-assess", version)]
struct Cli {
    /// Interview recording, or a ready-made transcript (.txt / .md).
    audio: PathBuf,

    /// Candidate CV as plain text.
    cv: PathBuf,

    /// Output PDF path.
    #[arg(short, long, default_value = DEFAULT_REPORT_FILENAME)]
    output: PathBuf,

    /// Candidate name shown in the report header.
    #[arg(long, default_value = DEFAULT_CANDIDATE_NAME)]
    candidate: String,

    /// Position the candidate interviewed for.
    #[arg(long, default_value = DEFAULT_POSITION)]
    position: String,

    /// Ollama server used for the qualitative judgment.
    #[arg(long, env = "OLLAMA_HOST", default_value = DEFAULT_OLLAMA_URL)]
    ollama_url: String,

    /// Ollama model name.
    #[arg(long, env = "OLLAMA_MODEL_NAME", default_value = DEFAULT_OLLAMA_MODEL)]
    ollama_model: String,

    /// Skip the external judgment and use the built-in heuristic only.
    #[arg(long)]
    no_llm: bool,

    /// Seconds to wait for the judgment before falling back.
    #[arg(long, default_value_t = DEFAULT_JUDGE_TIMEOUT_SECS)]
    judge_timeout: u64,

    /// LanguageTool server used for grammar checking.
    #[arg(long, env = "LANGUAGETOOL_URL", default_value = DEFAULT_LANGUAGETOOL_URL)]
    languagetool_url: String,

    /// Language code passed to LanguageTool.
    #[arg(long, default_value = DEFAULT_LANGUAGE)]
    language: String,

    /// Extra gazetteer entries (JSON array of {text, label, aliases, exact_case}).
    #[arg(long)]
    gazetteer: Option<PathBuf>,

    /// Whisper model file; downloaded to the cache when omitted.
    #[arg(long)]
    whisper_model: Option<PathBuf>,

    /// Also write a JSON summary of the assessment to this path.
    #[arg(long)]
    summary: Option<PathBuf>,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        log::error!("{e}");
        eprintln!("Error: {}", error_chain(e.as_ref()));
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let transcriber = build_transcriber(&cli)?;
    let grammar_checker = LanguageToolChecker::new(
        &cli.languagetool_url,
        &cli.language,
        Duration::from_secs(DEFAULT_GRAMMAR_TIMEOUT_SECS),
    )?;
    log::info!(
        "Grammar checker: {} ({})",
        cli.languagetool_url,
        grammar_checker.language()
    );
    let extractor = build_extractor(&cli)?;
    let normalizer = JudgmentNormalizer::new(build_judge(&cli)?);

    let mut use_case = AssessInterviewUseCase::new(
        transcriber,
        Box::new(grammar_checker),
        Box::new(extractor),
        normalizer,
        Box::new(PdfDocumentWriter::new()),
        Box::new(StdoutPipelineLogger::new()),
    );

    let header = ReportHeader::new(&cli.candidate, &cli.position, Local::now());
    let outcome = use_case.execute(&cli.audio, &cli.cv, &cli.output, header)?;

    if let Some(path) = &cli.summary {
        write_summary(path, &outcome)?;
    }

    println!("{}", outcome.verdict_line());
    println!("Report saved: {}", outcome.report_path.display());
    Ok(())
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if cli.judge_timeout == 0 {
        return Err("--judge-timeout must be at least 1 second".into());
    }
    if cli.candidate.trim().is_empty() {
        return Err("--candidate must not be empty".into());
    }
    if cli.output.is_dir() {
        return Err(format!("Output path is a directory: {}", cli.output.display()).into());
    }
    Ok(())
}

fn is_transcript(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| TRANSCRIPT_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

fn build_transcriber(cli: &Cli) -> Result<Box<dyn Transcriber>, Box<dyn std::error::Error>> {
    if is_transcript(&cli.audio) {
        log::info!("Using existing transcript {}", cli.audio.display());
        return Ok(Box::new(PlainTextTranscriber));
    }
    build_speech_transcriber(cli)
}

#[cfg(feature = "whisper")]
fn build_speech_transcriber(cli: &Cli) -> Result<Box<dyn Transcriber>, Box<dyn std::error::Error>> {
    use interview_core::shared::constants::{WHISPER_MODEL_FILENAME, WHISPER_MODEL_URL};
    use interview_core::shared::model_resolver;
    use interview_core::transcription::infrastructure::whisper_transcriber::WhisperTranscriber;

    log::info!("Resolving model: {WHISPER_MODEL_FILENAME}");
    let model_path = model_resolver::resolve(
        WHISPER_MODEL_FILENAME,
        WHISPER_MODEL_URL,
        cli.whisper_model.as_deref(),
        Some(Box::new(download_progress)),
    )?;
    eprintln!();

    // LanguageTool codes look like "en-US"; whisper wants "en".
    let language = cli.language.split('-').next().unwrap_or("en").to_lowercase();
    let transcriber = WhisperTranscriber::new(&model_path)?.with_language(&language);
    log::info!("Speech model: {}", transcriber.model_path().display());
    Ok(Box::new(transcriber))
}

#[cfg(not(feature = "whisper"))]
fn build_speech_transcriber(cli: &Cli) -> Result<Box<dyn Transcriber>, Box<dyn std::error::Error>> {
    if cli.whisper_model.is_some() {
        log::warn!("--whisper-model ignored: built without the `whisper` feature");
    }
    Err(format!(
        "Cannot transcribe {}: built without the `whisper` feature. \
         Pass a .txt transcript or rebuild with --features whisper",
        cli.audio.display()
    )
    .into())
}

fn build_extractor(cli: &Cli) -> Result<GazetteerExtractor, Box<dyn std::error::Error>> {
    let mut extractor = GazetteerExtractor::new();
    if let Some(path) = &cli.gazetteer {
        extractor.extend_from_file(path)?;
        log::info!("Loaded gazetteer {} ({} terms)", path.display(), extractor.len());
    }
    Ok(extractor)
}

fn build_judge(cli: &Cli) -> Result<Option<Box<dyn JudgmentSource>>, Box<dyn std::error::Error>> {
    if cli.no_llm {
        log::info!("External judgment disabled, using heuristic");
        return Ok(None);
    }
    let judge = OllamaJudge::new(
        &cli.ollama_url,
        &cli.ollama_model,
        Duration::from_secs(cli.judge_timeout),
    )?;
    log::info!("Judgment model: {} at {}", judge.model(), cli.ollama_url);
    Ok(Some(Box::new(judge)))
}

fn write_summary(path: &Path, outcome: &AssessmentOutcome) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string_pretty(&outcome.snapshot.summary())?;
    std::fs::write(path, json)?;
    log::info!("Summary written to {}", path.display());
    Ok(())
}

/// `outer: inner: root` for an error and its sources.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut parts = vec![err.to_string()];
    let mut source = err.source();
    while let Some(inner) = source {
        parts.push(inner.to_string());
        source = inner.source();
    }
    parts.join(": ")
}

#[cfg(feature = "whisper")]
fn download_progress(downloaded: u64, total: u64) {
    if total > 0 {
        let pct = (downloaded as f64 / total as f64 * 100.0) as u32;
        eprint!("\rDownloading speech model... {pct}%");
    } else {
        eprint!("\rDownloading speech model... {downloaded} bytes");
    }
}
