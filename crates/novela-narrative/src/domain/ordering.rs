//! Ordering puzzle rules.

use novela_core::rng::{DeterministicRng, shuffle};

/// Label of the confirm control.
pub const CONFIRM_LABEL: &str = "Confirmar orden";

/// Shuffled presentation order of `step_count` steps, as original indices.
#[must_use]
pub fn presentation_order(step_count: usize, rng: &mut dyn DeterministicRng) -> Vec<usize> {
    let mut order: Vec<usize> = (0..step_count).collect();
    shuffle(&mut order, rng);
    order
}

/// Exact full-length positional match. No partial credit.
#[must_use]
pub fn is_solved(picked: &[usize], correct_order: &[usize]) -> bool {
    picked == correct_order
}

/// The "current order so far" line.
#[must_use]
pub fn progress_line(steps: &[String], picked: &[usize]) -> String {
    let names: Vec<&str> = picked
        .iter()
        .filter_map(|&i| steps.get(i).map(String::as_str))
        .collect();
    if names.is_empty() {
        "Tu orden: (vacío)".to_owned()
    } else {
        format!("Tu orden: {}", names.join(" → "))
    }
}
