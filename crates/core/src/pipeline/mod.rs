pub mod assess_interview_use_case;
pub mod assessment_error;
pub mod cv_loader;
pub mod pipeline_logger;
