use std::collections::HashMap;

use crate::decoding::logmath::{log_sum_exp, log_sum_exp_pair};
use crate::error::DecodeError;
use crate::types::BeamEntry;

/// Prefix beam search over a `[T, V]` probability matrix.
///
/// `probs` holds one categorical distribution per time step (linear
/// domain, non-negative; zeros are legal and become `NEG_INFINITY` in log
/// space). Returns at most `beam_size` `(prefix, entry)` pairs sorted by
/// descending total log probability; ties sort by prefix lexicographic
/// order, shorter prefix first, so output is reproducible.
///
/// An empty matrix decodes to the single empty prefix with probability 1.
pub fn prefix_beam_search(
    probs: &[Vec<f32>],
    beam_size: usize,
    blank: usize,
) -> Result<Vec<(Vec<usize>, BeamEntry)>, DecodeError> {
    if beam_size == 0 {
        return Err(DecodeError::invalid_input("beam_size must be >= 1"));
    }

    let mut beam: Vec<(Vec<usize>, BeamEntry)> = vec![(Vec::new(), BeamEntry::INITIAL)];
    if probs.is_empty() {
        return Ok(beam);
    }

    let vocab_size = probs[0].len();
    if blank >= vocab_size {
        return Err(DecodeError::invalid_input(format!(
            "blank index {blank} outside vocabulary of size {vocab_size}"
        )));
    }
    if let Some((t, row)) = probs
        .iter()
        .enumerate()
        .find(|(_, row)| row.len() != vocab_size)
    {
        return Err(DecodeError::invalid_input(format!(
            "probability row {t} has {} entries, expected {vocab_size}",
            row.len()
        )));
    }

    for row in probs {
        let log_row: Vec<f32> = row.iter().map(|&p| p.ln()).collect();
        let expanded = expand_step(&beam, &log_row, blank);

        let mut ranked: Vec<(Vec<usize>, BeamEntry)> = expanded.into_iter().collect();
        ranked.sort_by(|(prefix_a, entry_a), (prefix_b, entry_b)| {
            entry_b
                .total()
                .total_cmp(&entry_a.total())
                .then_with(|| prefix_a.cmp(prefix_b))
        });
        ranked.truncate(beam_size);
        beam = ranked;
    }

    Ok(beam)
}

/// Expand every `(prefix, entry)` of the frozen previous beam by every
/// vocabulary symbol of one time step.
///
/// Accumulation goes into a fresh map whose absent keys stand for
/// `(NEG_INFINITY, NEG_INFINITY)`; right-hand sides only ever read the
/// previous-beam entry, so within a step no update can observe another
/// update's partial result.
fn expand_step(
    beam: &[(Vec<usize>, BeamEntry)],
    log_row: &[f32],
    blank: usize,
) -> HashMap<Vec<usize>, BeamEntry> {
    let mut next: HashMap<Vec<usize>, BeamEntry> =
        HashMap::with_capacity(beam.len() * log_row.len());

    for (prefix, entry) in beam {
        for (symbol, &p) in log_row.iter().enumerate() {
            if symbol == blank {
                // Emitting blank extends the alignment but not the prefix;
                // both predecessor states land in "ending in blank".
                let slot = next.entry(prefix.clone()).or_insert(BeamEntry::NONE);
                slot.log_prob_blank = log_sum_exp([
                    slot.log_prob_blank,
                    entry.log_prob_blank + p,
                    entry.log_prob_label + p,
                ]);
                continue;
            }

            let last = prefix.last().copied();
            let mut extended = prefix.clone();
            extended.push(symbol);

            let slot = next.entry(extended).or_insert(BeamEntry::NONE);
            if last != Some(symbol) {
                // A different symbol starts a new emission from either
                // predecessor state.
                slot.log_prob_label = log_sum_exp([
                    slot.log_prob_label,
                    entry.log_prob_blank + p,
                    entry.log_prob_label + p,
                ]);
            } else {
                // A repeat only counts as a new emission when an
                // intervening blank separated it.
                slot.log_prob_label =
                    log_sum_exp_pair(slot.log_prob_label, entry.log_prob_blank + p);

                // Without that blank it continues the already-counted
                // emission, staying on the unchanged prefix.
                let unchanged = next.entry(prefix.clone()).or_insert(BeamEntry::NONE);
                unchanged.log_prob_label =
                    log_sum_exp_pair(unchanged.log_prob_label, entry.log_prob_label + p);
            }
        }
    }

    next
}
