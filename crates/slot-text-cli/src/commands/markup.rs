use std::time::Duration;

use anyhow::Result;

use slot_text_core::view::{self, Presentation};
use slot_text_tui::Animator;

/// HTML for the frame `at` into a run started at zero
pub fn render(mut animator: Animator, at: Duration, presentation: &Presentation) -> String {
    animator.start(Duration::ZERO);
    animator.advance(at);
    match &animator {
        Animator::Chars(seq) => view::characters(seq, presentation).to_string(),
        Animator::Words(seq) => view::words_html(seq, presentation),
    }
}

pub fn run(animator: Animator, at: Duration, presentation: &Presentation) -> Result<()> {
    let html = render(animator, at, presentation);
    if !html.is_empty() {
        println!("{}", html);
    }
    Ok(())
}
