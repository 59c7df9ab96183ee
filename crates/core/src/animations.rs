//! Light animation builders.
//!
//! Every function returns the single-step animation list a `SetLight`
//! directive expects. Colors go through [`colors::resolve`], so names and
//! `0x`/`#` literals are both accepted.

use color_changer_types::{AnimationFrame, AnimationStep};

use crate::colors;

const BLACK: &str = "000000";

/// Holds one color for `duration_ms`.
pub fn solid(cycles: u32, color: &str, duration_ms: u32) -> Vec<AnimationStep> {
    step(cycles, vec![frame(duration_ms, false, color)])
}

/// Blends from the current color to `color` once.
pub fn fade(color: &str, duration_ms: u32) -> Vec<AnimationStep> {
    step(1, vec![frame(duration_ms, true, color)])
}

pub fn fade_in(cycles: u32, color: &str, duration_ms: u32) -> Vec<AnimationStep> {
    step(
        cycles,
        vec![
            AnimationFrame::new(1, true, BLACK),
            frame(duration_ms, true, color),
        ],
    )
}

pub fn fade_out(cycles: u32, color: &str, duration_ms: u32) -> Vec<AnimationStep> {
    step(
        cycles,
        vec![
            frame(duration_ms, true, color),
            AnimationFrame::new(1, true, BLACK),
        ],
    )
}

pub fn cross_fade(
    cycles: u32,
    first: &str,
    second: &str,
    first_duration_ms: u32,
    second_duration_ms: u32,
) -> Vec<AnimationStep> {
    step(
        cycles,
        vec![
            frame(first_duration_ms, true, first),
            frame(second_duration_ms, true, second),
        ],
    )
}

/// Rises to `color` over `duration_ms`, holds briefly, then falls back to dark.
pub fn breathe(cycles: u32, color: &str, duration_ms: u32) -> Vec<AnimationStep> {
    step(
        cycles,
        vec![
            AnimationFrame::new(1, true, BLACK),
            frame(duration_ms, true, color),
            frame(300, true, color),
            AnimationFrame::new(300, true, BLACK),
        ],
    )
}

pub fn blink(cycles: u32, color: &str) -> Vec<AnimationStep> {
    step(
        cycles,
        vec![frame(500, false, color), AnimationFrame::new(500, false, BLACK)],
    )
}

/// Like [`cross_fade`], without blending.
pub fn flip(
    cycles: u32,
    first: &str,
    second: &str,
    first_duration_ms: u32,
    second_duration_ms: u32,
) -> Vec<AnimationStep> {
    step(
        cycles,
        vec![
            frame(first_duration_ms, false, first),
            frame(second_duration_ms, false, second),
        ],
    )
}

pub fn pulse(cycles: u32, first: &str, second: &str) -> Vec<AnimationStep> {
    step(
        cycles,
        vec![frame(500, true, first), frame(1000, true, second)],
    )
}

fn frame(duration_ms: u32, blend: bool, color: &str) -> AnimationFrame {
    AnimationFrame::new(duration_ms, blend, colors::resolve(color))
}

fn step(cycles: u32, sequence: Vec<AnimationFrame>) -> Vec<AnimationStep> {
    vec![AnimationStep::new(cycles, sequence)]
}
