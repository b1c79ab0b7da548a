use crate::*;
pub use random::*;

mod random;

pub trait BoardGenerator {
    /// Builds a board of `config.size` on which nothing currently matches.
    fn generate(self, config: &GameConfig, draws: &mut impl DrawSource) -> Result<Board>;
}
