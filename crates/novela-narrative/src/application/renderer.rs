//! Scene renderer.

use novela_core::surface::Surface;

/// Hides and empties every transient control: input area, options container
/// with its order display, and the next control.
pub(crate) fn reset(surface: &mut dyn Surface) {
    surface.show_input(false);
    surface.clear_input();
    surface.clear_options();
    surface.show_next(false);
}

/// Fills the narrative and question regions.
pub(crate) fn show_text(surface: &mut dyn Surface, narrative: &str, question: &str) {
    surface.set_narrative(narrative);
    surface.set_question(question);
}
