#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_json_binary, Addr, Api, Binary, Deps, DepsMut, Env, Event, MessageInfo, Order, Response,
    StdError, StdResult,
};
use cw2::{ensure_from_older_version, set_contract_version};
use cw_utils::Expiration;

use crate::error::ContractError;
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::state::{
    advance_candidate_id, candidates, select_winner, Candidate, Session, Status, BALLOTS,
    CANDIDATES, CANDIDATE_IDS, SESSION,
};

pub(crate) const CONTRACT_NAME: &str = "crates.io:cw-election";
pub(crate) const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let owner = msg.owner.unwrap_or_else(|| info.sender.to_string());
    cw_ownable::initialize_owner(deps.storage, deps.api, Some(&owner))?;

    SESSION.save(deps.storage, &Session::new())?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("owner", owner))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Start { closure } => execute_start(deps, env, info, closure),
        ExecuteMsg::AddCandidate {
            candidate,
            seniority,
        } => execute_add_candidate(deps, env, info, candidate, seniority),
        ExecuteMsg::RemoveCandidate { candidate } => {
            execute_remove_candidate(deps, env, info, candidate)
        }
        ExecuteMsg::Vote { candidate } => execute_vote(deps, env, info, candidate),
        ExecuteMsg::Winner {} => execute_winner(deps, env),
        ExecuteMsg::UpdateOwnership(action) => execute_update_owner(deps, env, info, action),
    }
}

pub fn execute_start(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    closure: u64,
) -> Result<Response, ContractError> {
    cw_ownable::assert_owner(deps.storage, &info.sender)?;

    if closure == 0 {
        return Err(ContractError::InvalidClosure {});
    }

    let previous = SESSION.load(deps.storage)?;
    if previous.status == Status::Open {
        return Err(ContractError::VotingAlreadyStarted {});
    }

    // Votes from the last session don't carry over.
    let voters = BALLOTS
        .prefix(previous.id)
        .keys(deps.storage, None, None, Order::Ascending)
        .collect::<StdResult<Vec<Addr>>>()?;
    for voter in voters {
        BALLOTS.remove(deps.storage, (previous.id, &voter));
    }
    for (id, mut candidate) in candidates(deps.storage)? {
        if candidate.votes != 0 {
            candidate.votes = 0;
            CANDIDATES.save(deps.storage, id, &candidate)?;
        }
    }

    let closes_at = env.block.time.plus_seconds(closure);
    let session = Session {
        id: previous.id + 1,
        status: Status::Open,
        closure: Expiration::AtTime(closes_at),
        winner: None,
    };
    SESSION.save(deps.storage, &session)?;

    Ok(Response::new()
        .add_attribute("action", "start")
        .add_attribute("session", session.id.to_string())
        .add_event(
            Event::new("started")
                .add_attribute("session", session.id.to_string())
                .add_attribute("closure", closes_at.seconds().to_string()),
        ))
}

pub fn execute_add_candidate(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    candidate: String,
    seniority: u64,
) -> Result<Response, ContractError> {
    cw_ownable::assert_owner(deps.storage, &info.sender)?;

    // A closed session with nobody to elect may still be given
    // candidates, otherwise it could never finish.
    let session = SESSION.load(deps.storage)?;
    if session.is_closed(&env.block)
        && (session.status == Status::Finished || !candidates(deps.storage)?.is_empty())
    {
        return Err(ContractError::CandidatesLocked {});
    }

    let address = validate_address(deps.api, &candidate)?;
    if CANDIDATE_IDS.has(deps.storage, &address) {
        return Err(ContractError::DuplicateCandidate { candidate });
    }

    let id = advance_candidate_id(deps.storage)?;
    CANDIDATE_IDS.save(deps.storage, &address, &id)?;
    CANDIDATES.save(
        deps.storage,
        id,
        &Candidate {
            address: address.clone(),
            seniority,
            votes: 0,
        },
    )?;

    Ok(Response::new()
        .add_attribute("action", "add_candidate")
        .add_attribute("candidate", &address)
        .add_event(
            Event::new("candidate_added")
                .add_attribute("candidate", address)
                .add_attribute("seniority", seniority.to_string()),
        ))
}

pub fn execute_remove_candidate(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    candidate: String,
) -> Result<Response, ContractError> {
    cw_ownable::assert_owner(deps.storage, &info.sender)?;

    if SESSION.load(deps.storage)?.is_closed(&env.block) {
        return Err(ContractError::CandidatesLocked {});
    }

    let address = validate_address(deps.api, &candidate)?;
    let id = CANDIDATE_IDS
        .may_load(deps.storage, &address)?
        .ok_or(ContractError::CandidateNotFound { candidate })?;

    CANDIDATE_IDS.remove(deps.storage, &address);
    CANDIDATES.remove(deps.storage, id);

    Ok(Response::new()
        .add_attribute("action", "remove_candidate")
        .add_attribute("candidate", &address)
        .add_event(Event::new("candidate_removed").add_attribute("candidate", address)))
}

pub fn execute_vote(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    candidate: String,
) -> Result<Response, ContractError> {
    let session = SESSION.load(deps.storage)?;
    if !session.accepts_votes(&env.block) {
        return Err(ContractError::VotingNotOpen {});
    }

    if BALLOTS.has(deps.storage, (session.id, &info.sender)) {
        return Err(ContractError::AlreadyVoted {
            voter: info.sender.into_string(),
        });
    }

    let address = validate_address(deps.api, &candidate)?;
    let id = CANDIDATE_IDS
        .may_load(deps.storage, &address)?
        .ok_or(ContractError::CandidateNotFound { candidate })?;

    let mut entry = CANDIDATES.load(deps.storage, id)?;
    entry.votes += 1;
    CANDIDATES.save(deps.storage, id, &entry)?;
    BALLOTS.save(deps.storage, (session.id, &info.sender), &address)?;

    Ok(Response::new()
        .add_attribute("action", "vote")
        .add_attribute("voter", &info.sender)
        .add_attribute("candidate", &address)
        .add_event(
            Event::new("voted")
                .add_attribute("voter", info.sender)
                .add_attribute("candidate", address),
        ))
}

pub fn execute_winner(deps: DepsMut, env: Env) -> Result<Response, ContractError> {
    let mut session = SESSION.load(deps.storage)?;

    match session.status {
        Status::NotStarted => Err(ContractError::VotingNotStarted {}),
        // Already decided. Hand back the same answer without another
        // `finished` event.
        Status::Finished => {
            let winner = session
                .winner
                .ok_or_else(|| StdError::not_found("winner"))?;
            Ok(Response::new()
                .add_attribute("action", "winner")
                .add_attribute("winner", &winner)
                .set_data(to_json_binary(&winner)?))
        }
        Status::Open => {
            if !session.closure.is_expired(&env.block) {
                return Err(ContractError::VotingNotFinished {});
            }

            let winner = select_winner(candidates(deps.storage)?.into_iter().map(|(_, c)| c))
                .ok_or(ContractError::NoCandidates {})?
                .address;

            session.status = Status::Finished;
            session.winner = Some(winner.clone());
            SESSION.save(deps.storage, &session)?;

            Ok(Response::new()
                .add_attribute("action", "winner")
                .add_attribute("session", session.id.to_string())
                .add_attribute("winner", &winner)
                .add_event(Event::new("finished").add_attribute("winner", &winner))
                .set_data(to_json_binary(&winner)?))
        }
    }
}

pub fn execute_update_owner(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    action: cw_ownable::Action,
) -> Result<Response, ContractError> {
    match action {
        // There must be an owner.
        cw_ownable::Action::RenounceOwnership => Err(ContractError::CannotRenounceOwnership),
        _ => {
            let ownership = cw_ownable::update_ownership(deps, &env.block, &info.sender, action)?;
            Ok(Response::default().add_attributes(ownership.into_attributes()))
        }
    }
}

fn validate_address(api: &dyn Api, address: &str) -> Result<Addr, ContractError> {
    api.addr_validate(address)
        .map_err(|_| ContractError::InvalidAddress {
            address: address.to_string(),
        })
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Candidates {} => to_json_binary(&query_candidates(deps)?),
        QueryMsg::Candidate { address } => to_json_binary(&query_candidate(deps, address)?),
        QueryMsg::Tally {} => to_json_binary(&query_tally(deps)?),
        QueryMsg::Session {} => to_json_binary(&SESSION.load(deps.storage)?),
        QueryMsg::Ballot { voter } => to_json_binary(&query_ballot(deps, voter)?),
        QueryMsg::Winner {} => to_json_binary(&SESSION.load(deps.storage)?.winner),
        QueryMsg::Ownership {} => to_json_binary(&cw_ownable::get_ownership(deps.storage)?),
        QueryMsg::Info {} => to_json_binary(&cw2::get_contract_version(deps.storage)?),
    }
}

pub fn query_candidates(deps: Deps) -> StdResult<Vec<Addr>> {
    Ok(candidates(deps.storage)?
        .into_iter()
        .map(|(_, candidate)| candidate.address)
        .collect())
}

pub fn query_candidate(deps: Deps, address: String) -> StdResult<Option<Candidate>> {
    let address = deps.api.addr_validate(&address)?;
    CANDIDATE_IDS
        .may_load(deps.storage, &address)?
        .map(|id| CANDIDATES.load(deps.storage, id))
        .transpose()
}

pub fn query_tally(deps: Deps) -> StdResult<Vec<Candidate>> {
    Ok(candidates(deps.storage)?
        .into_iter()
        .map(|(_, candidate)| candidate)
        .collect())
}

pub fn query_ballot(deps: Deps, voter: String) -> StdResult<Option<Addr>> {
    let voter = deps.api.addr_validate(&voter)?;
    let session = SESSION.load(deps.storage)?;
    BALLOTS.may_load(deps.storage, (session.id, &voter))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    ensure_from_older_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    Ok(Response::new().add_attribute("action", "migrate"))
}
