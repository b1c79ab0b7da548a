use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Coordinates out of range")]
    OutOfRange,
    #[error("Invalid game configuration")]
    InvalidConfig,
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Tile color outside of the configured palette")]
    InvalidColor,
}

pub type Result<T> = core::result::Result<T, GameError>;
