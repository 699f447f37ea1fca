use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::entities::domain::entity_comparator::EntityComparator;
use crate::entities::domain::entity_extractor::EntityExtractor;
use crate::judgment::domain::judgment_normalizer::JudgmentNormalizer;
use crate::language::domain::grammar_checker::GrammarChecker;
use crate::report::domain::document_writer::DocumentWriter;
use crate::report::domain::report_compiler::ReportCompiler;
use crate::report::domain::report_header::ReportHeader;
use crate::shared::analysis_snapshot::AnalysisSnapshot;
use crate::transcription::domain::transcriber::Transcriber;

use super::assessment_error::AssessmentError;
use super::cv_loader::load_cv;
use super::pipeline_logger::PipelineLogger;

const STAGE_COUNT: usize = 6;

/// What a successful run produced.
#[derive(Debug, Clone)]
pub struct AssessmentOutcome {
    pub snapshot: AnalysisSnapshot,
    pub report_path: PathBuf,
    pub page_count: usize,
}

impl AssessmentOutcome {
    pub fn verdict_line(&self) -> String {
        self.snapshot.verdict_line()
    }
}

/// Runs one interview assessment end to end: transcript, grammar count,
/// entity comparison against the CV, judgment, report.
///
/// Stages run strictly in that order. Only the judgment stage recovers from
/// collaborator failures; everything else aborts the run.
pub struct AssessInterviewUseCase {
    transcriber: Box<dyn Transcriber>,
    grammar_checker: Box<dyn GrammarChecker>,
    extractor: Box<dyn EntityExtractor>,
    normalizer: JudgmentNormalizer,
    writer: Box<dyn DocumentWriter>,
    logger: Box<dyn PipelineLogger>,
}

impl AssessInterviewUseCase {
    pub fn new(
        transcriber: Box<dyn Transcriber>,
        grammar_checker: Box<dyn GrammarChecker>,
        extractor: Box<dyn EntityExtractor>,
        normalizer: JudgmentNormalizer,
        writer: Box<dyn DocumentWriter>,
        logger: Box<dyn PipelineLogger>,
    ) -> Self {
        Self {
            transcriber,
            grammar_checker,
            extractor,
            normalizer,
            writer,
            logger,
        }
    }

    pub fn execute(
        &mut self,
        audio_path: &Path,
        cv_path: &Path,
        output_path: &Path,
        header: ReportHeader,
    ) -> Result<AssessmentOutcome, AssessmentError> {
        if !audio_path.exists() {
            return Err(AssessmentError::AudioNotFound(audio_path.to_path_buf()));
        }
        let cv_text = load_cv(cv_path)?;

        // 1. Transcription
        let start = Instant::now();
        self.logger.stage(1, STAGE_COUNT, "Transcribing interview");
        let transcript = self
            .transcriber
            .transcribe(audio_path)
            .map_err(|source| AssessmentError::Collaborator {
                stage: "Transcription",
                source,
            })?;
        self.logger.timing("transcribe", elapsed_ms(start));
        self.logger.metric("transcript_chars", transcript.chars().count() as f64);

        // 2. Grammar
        let start = Instant::now();
        self.logger.stage(2, STAGE_COUNT, "Checking grammar");
        let grammar_errors = self
            .grammar_checker
            .check(&transcript)
            .map_err(|source| AssessmentError::Collaborator {
                stage: "Grammar check",
                source,
            })?;
        self.logger.timing("grammar", elapsed_ms(start));
        self.logger.metric("grammar_errors", f64::from(grammar_errors));

        // 3. Entities from both texts, then the comparison
        let start = Instant::now();
        self.logger.stage(3, STAGE_COUNT, "Extracting entities");
        let extract = |text: &str| {
            self.extractor
                .extract(text)
                .map_err(|source| AssessmentError::Collaborator {
                    stage: "Entity extraction",
                    source,
                })
        };
        let transcript_entities = extract(&transcript)?;
        let cv_entities = extract(&cv_text)?;
        let comparison = EntityComparator::compare(&transcript_entities, &cv_entities);
        self.logger.timing("entities", elapsed_ms(start));
        self.logger.metric("matched", comparison.matched_count() as f64);
        self.logger.metric("unmentioned", comparison.unmentioned_count() as f64);

        // 4. Judgment
        let start = Instant::now();
        self.logger.stage(4, STAGE_COUNT, "Forming judgment");
        let judgment = self.normalizer.normalize(
            &transcript,
            grammar_errors,
            &comparison.matched,
            &comparison.unmentioned,
        );
        self.logger.timing("judgment", elapsed_ms(start));

        let snapshot = AnalysisSnapshot::new(
            transcript,
            grammar_errors,
            transcript_entities,
            comparison,
            judgment,
        );
        self.logger.info(&format!("Verdict: {}", snapshot.verdict()));

        // 5. Layout
        let start = Instant::now();
        self.logger.stage(5, STAGE_COUNT, "Laying out report");
        let document = ReportCompiler::new(header).compile(&snapshot);
        self.logger.timing("layout", elapsed_ms(start));
        self.logger.metric("pages", document.page_count() as f64);

        // 6. Write
        let start = Instant::now();
        self.logger.stage(6, STAGE_COUNT, "Writing report");
        self.writer
            .write(output_path, &document)
            .map_err(|source| AssessmentError::Layout {
                path: output_path.to_path_buf(),
                source,
            })?;
        verify_artifact(output_path)?;
        self.logger.timing("write", elapsed_ms(start));
        self.logger.summary();

        Ok(AssessmentOutcome {
            snapshot,
            report_path: output_path.to_path_buf(),
            page_count: document.page_count(),
        })
    }
}

/// A write only counts if it left a non-empty file behind.
fn verify_artifact(path: &Path) -> Result<(), AssessmentError> {
    let size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);
    if size == 0 {
        return Err(AssessmentError::Layout {
            path: path.to_path_buf(),
            source: "report file is missing or empty".into(),
        });
    }
    Ok(())
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}
