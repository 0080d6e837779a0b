//! The engine's single error type.
//!
//! Every variant is an invalid action: the caller asked for something the
//! rules or the game's lifecycle do not allow. Messages are meant to be
//! shown to the player as-is. Operations validate before they mutate, so
//! an `Err` always leaves the game untouched.

use thiserror::Error;

/// Raised when an action is invalid.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("Game is full.")]
    GameFull,

    #[error("Game has already started.")]
    AlreadyStarted,

    #[error("Not enough players to start.")]
    NotEnoughPlayers,

    #[error("Game has not started.")]
    NotStarted,

    #[error("Game is over.")]
    GameOver,

    #[error("Invalid player id {0}.")]
    UnknownPlayer(u8),

    #[error("It is not your turn.")]
    NotYourTurn,

    #[error("You do not have that card in your hand.")]
    CardNotInHand,

    #[error("That card can only be played as a response.")]
    ResponseOnly,

    #[error("That card cannot be played as a response.")]
    NotAResponse,

    #[error("No target player.")]
    MissingTargetPlayer,

    #[error("Target player played Barrier.")]
    TargetHasBarrier,

    #[error("You cannot target yourself.")]
    CannotTargetSelf,

    #[error("No target building.")]
    MissingTargetBuilding,

    #[error("The target player does not have that building.")]
    BuildingNotFound,

    #[error("You have reached your attack limit.")]
    AttackLimitReached,

    #[error("No spell tower present.")]
    NoSpellTower,

    #[error("Card is not offensive.")]
    NotOffensive,

    #[error("You do not have a Fort to discard.")]
    NoFort,

    #[error("A Fort can only be discarded as a response.")]
    FortNotResponse,

    #[error("The last card was not an Attack.")]
    NotAnAttack,

    #[error("You did not play the Spy card.")]
    NotSpyPlayer,

    #[error("Could not launch the turn loop: {0}")]
    TurnLoopUnavailable(String),
}
