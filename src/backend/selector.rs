//! Backend selection policies

use crate::humanize::Humanizer;

use super::BackendKind;

/// Chooses which backend carries out a step
///
/// `candidates` is never empty.
pub trait BackendSelector: Send {
    fn select(&mut self, candidates: &[BackendKind], humanizer: &mut Humanizer) -> BackendKind;
}

/// Uniform choice among the candidates
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomSelector;

impl BackendSelector for RandomSelector {
    fn select(&mut self, candidates: &[BackendKind], humanizer: &mut Humanizer) -> BackendKind {
        humanizer
            .pick(candidates)
            .unwrap_or(BackendKind::DirectPlacement)
    }
}

/// Always the same backend when it is a candidate, else the first candidate
#[derive(Debug, Clone, Copy)]
pub struct FixedSelector(pub BackendKind);

impl BackendSelector for FixedSelector {
    fn select(&mut self, candidates: &[BackendKind], _humanizer: &mut Humanizer) -> BackendKind {
        if candidates.contains(&self.0) {
            self.0
        } else {
            candidates
                .first()
                .copied()
                .unwrap_or(BackendKind::DirectPlacement)
        }
    }
}
