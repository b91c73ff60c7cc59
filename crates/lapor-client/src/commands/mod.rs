use std::path::Path;

pub mod config;
pub mod export;
pub mod narrate;
pub mod report;
pub mod reset;
pub mod scan;
pub mod tx;

/// Test seam shared by every command's `*_with_options` variant.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandOptions<'a> {
    pub home_override: Option<&'a Path>,
}
