/// Prompt module
///
/// Builds the instruction text sent to the scene-understanding service,
/// folding in the current sensitivity preference and the latest movement
/// analysis.

pub mod composer;
pub mod templates;

pub use composer::PromptComposer;
