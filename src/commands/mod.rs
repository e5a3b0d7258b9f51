pub mod base_commands;
pub mod completions_cmd;
pub mod predict_cmd;
pub mod report_format;
