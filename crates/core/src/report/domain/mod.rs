pub mod document;
pub mod document_writer;
pub mod layout;
pub mod recommendations;
pub mod report_compiler;
pub mod report_header;
