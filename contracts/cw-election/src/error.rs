use cosmwasm_std::StdError;
use cw_ownable::OwnershipError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error(transparent)]
    Std(#[from] StdError),

    #[error(transparent)]
    Ownable(#[from] OwnershipError),

    #[error("Cannot renounce ownership")]
    CannotRenounceOwnership,

    #[error("Voting: address not valid")]
    InvalidAddress { address: String },

    #[error("Voting: candidate already exist")]
    DuplicateCandidate { candidate: String },

    #[error("Voting: candidate not found")]
    CandidateNotFound { candidate: String },

    #[error("Voting: user has already voted")]
    AlreadyVoted { voter: String },

    #[error("Voting: voting already finished or not yet started")]
    VotingNotOpen {},

    #[error("Voting: voting not yet finished")]
    VotingNotFinished {},

    #[error("Voting: voting not yet started")]
    VotingNotStarted {},

    #[error("Voting: voting already started")]
    VotingAlreadyStarted {},

    #[error("Voting: closure must be greater than zero")]
    InvalidClosure {},

    #[error("Voting: candidates cannot change after voting has closed")]
    CandidatesLocked {},

    #[error("Voting: no candidates registered")]
    NoCandidates {},
}
