//! Collaborators around the generator: rendering, reports, seed manifests and logging.

pub mod config_file;
pub mod logging;
pub mod manifest;
pub mod render;
pub mod report;
