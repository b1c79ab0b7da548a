use serde::{Deserialize, Serialize};

pub type Score = u64;

/// Running point total for one game session. There is no way to take points away.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreLedger {
    total: Score,
}

impl ScoreLedger {
    pub fn award(&mut self, points: Score) {
        self.total = self.total.saturating_add(points);
    }

    pub const fn total(&self) -> Score {
        self.total
    }
}
