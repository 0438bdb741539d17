pub mod config_cmd;
pub mod invoke_cmd;
pub mod output;
pub mod query_cmd;
pub mod renderer;
