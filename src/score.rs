/// Running score. Persistence is the session's job; the ledger only does the
/// arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreLedger {
    score: i64,
}

impl ScoreLedger {
    pub fn new(score: i64) -> Self {
        Self { score }
    }

    /// Adds `delta` (which may be negative) and returns the new score.
    pub fn apply(&mut self, delta: i64) -> i64 {
        self.score = self.score.saturating_add(delta);
        self.score
    }

    pub fn can_afford(&self, cost: i64) -> bool {
        self.score >= cost
    }

    pub fn current(&self) -> i64 {
        self.score
    }
}
