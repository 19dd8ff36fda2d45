use alnq_core::models::GroundedSeq;

///
/// Full-sequence positions not covered by any core of a grounded sequence.
///
/// # Arguments
/// - grounded: grounded sequence
/// - full_len: length of the full sequence it was grounded against
///
/// # Returns
/// - ascending positions in `1..=full_len` absent from `grounded`
pub fn variable_region(grounded: &GroundedSeq, full_len: usize) -> Vec<u32> {
    let mut covered = vec![false; full_len + 1];
    for position in grounded.residues() {
        if let Some(slot) = covered.get_mut(position as usize) {
            *slot = true;
        }
    }

    (1..=full_len as u32)
        .filter(|&p| !covered[p as usize])
        .collect()
}
