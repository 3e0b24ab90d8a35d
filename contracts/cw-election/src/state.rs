use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, BlockInfo, Order, StdResult, Storage};
use cw_storage_plus::{Item, Map};
use cw_utils::Expiration;

#[cw_serde]
#[derive(Copy)]
pub enum Status {
    /// No session has been started yet.
    NotStarted,
    /// Votes are accepted until the closure has passed.
    Open,
    /// The winner has been determined.
    Finished,
}

#[cw_serde]
pub struct Session {
    /// Incremented every time a session is started. Zero until the
    /// first start.
    pub id: u64,
    pub status: Status,
    /// When voting stops.
    pub closure: Expiration,
    /// Set once the session finishes.
    pub winner: Option<Addr>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: 0,
            status: Status::NotStarted,
            closure: Expiration::Never {},
            winner: None,
        }
    }

    /// Whether a vote cast in `block` would be counted.
    pub fn accepts_votes(&self, block: &BlockInfo) -> bool {
        self.status == Status::Open && !self.closure.is_expired(block)
    }

    /// Whether voting has closed for this session, freezing the
    /// candidate list until the next start.
    pub fn is_closed(&self, block: &BlockInfo) -> bool {
        match self.status {
            Status::NotStarted => false,
            Status::Open => self.closure.is_expired(block),
            Status::Finished => true,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cw_serde]
pub struct Candidate {
    pub address: Addr,
    pub seniority: u64,
    pub votes: u64,
}

pub const SESSION: Item<Session> = Item::new("session");

/// The number of candidates ever registered. Used as the key of the
/// next registration so that iterating `CANDIDATES` yields
/// registration order.
pub const CANDIDATE_COUNT: Item<u64> = Item::new("candidate_count");

/// Registration number -> candidate.
pub const CANDIDATES: Map<u64, Candidate> = Map::new("candidates");

/// Candidate address -> registration number.
pub const CANDIDATE_IDS: Map<&Addr, u64> = Map::new("candidate_ids");

/// (session, voter) -> candidate voted for.
pub const BALLOTS: Map<(u64, &Addr), Addr> = Map::new("ballots");

pub fn advance_candidate_id(store: &mut dyn Storage) -> StdResult<u64> {
    let id = CANDIDATE_COUNT.may_load(store)?.unwrap_or_default() + 1;
    CANDIDATE_COUNT.save(store, &id)?;
    Ok(id)
}

/// Registered candidates in registration order.
pub fn candidates(store: &dyn Storage) -> StdResult<Vec<(u64, Candidate)>> {
    CANDIDATES
        .range(store, None, None, Order::Ascending)
        .collect()
}

/// Picks the candidate with the most votes. Ties go to the higher
/// seniority, and if that is equal too, to whoever came first.
pub fn select_winner<I>(candidates: I) -> Option<Candidate>
where
    I: IntoIterator<Item = Candidate>,
{
    candidates
        .into_iter()
        .fold(None, |leader: Option<Candidate>, candidate| match leader {
            Some(leader)
                if (leader.votes, leader.seniority) >= (candidate.votes, candidate.seniority) =>
            {
                Some(leader)
            }
            _ => Some(candidate),
        })
}
