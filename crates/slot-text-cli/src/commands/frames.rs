use std::io::{self, Write};
use std::time::Duration;

use anyhow::{bail, Result};
use serde::Serialize;

use slot_text_core::{Clock, ManualClock, Phase};
use slot_text_tui::Animator;

/// One sampled frame of the display buffer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrameRecord {
    pub t_ms: u64,
    pub text: String,
    pub phase: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word: Option<usize>,
}

impl FrameRecord {
    fn capture(animator: &Animator, now: Duration) -> Self {
        Self {
            t_ms: now.as_millis() as u64,
            text: animator.text(),
            phase: phase_name(animator.phase()),
            word: match animator {
                Animator::Chars(_) => None,
                Animator::Words(seq) => Some(seq.cursor()),
            },
        }
    }
}

fn phase_name(phase: Phase) -> &'static str {
    match phase {
        Phase::Writing => "writing",
        Phase::Pausing => "pausing",
        Phase::Erasing => "erasing",
        Phase::Idle => "idle",
    }
}

/// Drive `animator` on a virtual clock and sample it every `step` up to `until`
pub fn collect(mut animator: Animator, step: Duration, until: Duration) -> Result<Vec<FrameRecord>> {
    if step.is_zero() {
        bail!("Frame step must be greater than zero");
    }

    let clock = ManualClock::new();
    animator.start(clock.now());

    let mut frames = Vec::new();
    loop {
        let now = clock.now();
        animator.advance(now);
        frames.push(FrameRecord::capture(&animator, now));
        if now >= until {
            break;
        }
        clock.advance(step);
    }
    Ok(frames)
}

pub fn run(animator: Animator, step: Duration, until: Duration, json: bool) -> Result<()> {
    let frames = collect(animator, step, until)?;
    tracing::debug!(count = frames.len(), "Collected frames");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for frame in &frames {
        if json {
            serde_json::to_writer(&mut out, frame)?;
            writeln!(out)?;
        } else {
            writeln!(out, "{:>6}ms  {:<8} |{}|", frame.t_ms, frame.phase, frame.text)?;
        }
    }
    Ok(())
}
