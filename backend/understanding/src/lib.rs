//! Image understanding: the visual-profile prompt and the vision models that answer it.

pub mod gemini;
pub mod mock;
pub mod prompt;

pub use gemini::{GeminiVision, GEMINI_BASE_URL};
pub use mock::MockVision;
pub use prompt::{VISUAL_PROFILE_PROMPT, VISUAL_PROFILE_ROOT, VISUAL_PROFILE_SECTIONS};
