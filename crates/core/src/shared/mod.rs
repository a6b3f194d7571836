pub mod constants;
pub mod run_paths;
