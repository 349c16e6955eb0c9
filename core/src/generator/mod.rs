use crate::*;
pub use random::*;

mod random;

/// Decides where the mines of a new board go.
pub trait LayoutGenerator {
    /// # Panics
    ///
    /// Panics when `config` does not leave room for at least one mine and one safe cell.
    fn generate(self, config: BoardConfig) -> MineLayout;
}
