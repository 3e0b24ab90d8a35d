use cosmwasm_schema::{cw_serde, QueryResponses};
use cw_ownable::{cw_ownable_execute, cw_ownable_query};

use crate::state::{Candidate, Session};

#[cw_serde]
pub struct InstantiateMsg {
    /// The owner of the election. The owner starts sessions and
    /// manages the candidate list. Defaults to the instantiator.
    pub owner: Option<String>,
}

#[cw_ownable_execute]
#[cw_serde]
pub enum ExecuteMsg {
    /// Opens a new voting session that accepts votes for `closure`
    /// seconds. Only the owner can do this, and only while no session
    /// is open.
    Start {
        /// Length of the voting window in seconds.
        closure: u64,
    },
    /// Registers a candidate. Only the owner can do this.
    AddCandidate {
        /// The candidate's address.
        candidate: String,
        /// Breaks ties between candidates with an equal number of
        /// votes. Higher wins.
        seniority: u64,
    },
    /// Removes a candidate along with the votes it has received. Only
    /// the owner can do this.
    RemoveCandidate { candidate: String },
    /// Casts the sender's vote for a registered candidate. Each
    /// address may vote once per session.
    Vote { candidate: String },
    /// Closes the session once its closure has passed and records the
    /// candidate with the most votes. The winner's address is returned
    /// in the response data.
    Winner {},
}

#[cw_ownable_query]
#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    /// Returns the registered candidates' addresses in registration
    /// order.
    #[returns(Vec<::cosmwasm_std::Addr>)]
    Candidates {},
    /// Returns a single candidate, if registered.
    #[returns(Option<Candidate>)]
    Candidate { address: String },
    /// Returns every registered candidate with its current vote count
    /// in registration order.
    #[returns(Vec<Candidate>)]
    Tally {},
    /// Returns the current voting session.
    #[returns(Session)]
    Session {},
    /// Returns the candidate `voter` voted for in the current session.
    #[returns(Option<::cosmwasm_std::Addr>)]
    Ballot { voter: String },
    /// Returns the winner of the current session once it has been
    /// determined.
    #[returns(Option<::cosmwasm_std::Addr>)]
    Winner {},
    /// Returns contract name and version.
    #[returns(::cw2::ContractVersion)]
    Info {},
}

#[cw_serde]
pub struct MigrateMsg {}
