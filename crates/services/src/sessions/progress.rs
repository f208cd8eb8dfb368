/// Aggregated view of play progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayProgress {
    pub total: usize,
    pub answered: usize,
    pub correct: usize,
    pub remaining: usize,
    pub is_finished: bool,
}
