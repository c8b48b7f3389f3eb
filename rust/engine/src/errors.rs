use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    /// Drawing from an empty deck mid-round. Unreachable under normal
    /// single-deck play, but surfaced as a round-abort rather than ignored.
    #[error("deck exhausted")]
    DeckExhausted,
    /// A forbidden-total retry loop hit its iteration cap.
    #[error("retry limit exceeded after {attempts} attempts")]
    RetryLimitExceeded { attempts: u32 },
    #[error("invalid bet amount: {amount}, minimum: {minimum}")]
    InvalidBetAmount { amount: u32, minimum: u32 },
}
