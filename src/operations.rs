/// Collection operations: uniqueness and removal by identity

use crate::error::ControllerError;
use crate::language_pair::LanguagePair;

pub fn contains_pair(items: &[LanguagePair], pair: &LanguagePair) -> bool {
    items.iter().any(|item| item == pair)
}

/// Append `candidate` keeping insertion order, unless the pair is already saved
pub fn append_unique(
    mut items: Vec<LanguagePair>,
    candidate: LanguagePair,
) -> Result<Vec<LanguagePair>, ControllerError> {
    if contains_pair(&items, &candidate) {
        return Err(ControllerError::DuplicateItem(candidate));
    }

    items.push(candidate);
    Ok(items)
}

/// Drop every entry equal to `target` (keep the rest in order).
/// Returns the filtered collection and how many entries were removed.
pub fn remove_pair(items: Vec<LanguagePair>, target: &LanguagePair) -> (Vec<LanguagePair>, usize) {
    let original_len = items.len();
    let kept: Vec<LanguagePair> = items.into_iter().filter(|item| item != target).collect();
    let removed = original_len - kept.len();

    (kept, removed)
}
