//! Match scoring against a target duration.

/// Absolute distance between an achieved duration and the target.
///
/// Lower is better; `0` is a perfect match.
pub fn distance(length: u64, target: u32) -> u64 {
    length.abs_diff(u64::from(target))
}

/// Whether a candidate of `candidate` seconds beats a best-so-far of `best`.
///
/// The comparison is strict so equal-distance candidates keep the one found
/// first.
pub fn is_closer(candidate: u64, best: u64, target: u32) -> bool {
    distance(candidate, target) < distance(best, target)
}
