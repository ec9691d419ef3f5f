use crate::*;
pub use random::*;

mod random;

pub trait GridGenerator {
    /// Produces a fresh grid for `config`, every cell hidden.
    fn generate(&mut self, config: GameConfig) -> Grid;
}

/// How mines get scattered over the grid. Both strategies are uniform.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Placement {
    /// Draw a random cell per mine, retrying when it already holds one.
    #[default]
    Rejection,
    /// Shuffle every coordinate and take the first `mines` of them.
    Shuffle,
}
