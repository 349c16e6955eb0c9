use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board must have at least one row and one column")]
    EmptyBoard,
    #[error("Board needs at least one mine")]
    NoMines,
    #[error("Too many mines, at least one cell must stay safe")]
    TooManyMines,
    #[error("Pixel position is outside of the board")]
    OutOfBoard,
}

pub type Result<T> = core::result::Result<T, GameError>;
