pub mod language_tool_checker;
