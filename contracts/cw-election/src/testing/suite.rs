use anyhow::Result as AnyResult;
use cosmwasm_std::{from_json, Addr, Empty};
use cw_multi_test::{App, AppResponse, Contract, ContractWrapper, Executor};

use crate::msg::{ExecuteMsg, InstantiateMsg, QueryMsg};
use crate::state::{Candidate, Session};

pub const OWNER: &str = "owner";

fn election_contract() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        crate::contract::execute,
        crate::contract::instantiate,
        crate::contract::query,
    )
    .with_migrate(crate::contract::migrate);
    Box::new(contract)
}

#[derive(Debug, Default)]
pub struct SuiteBuilder {
    owner: Option<String>,
    candidates: Vec<(String, u64)>,
}

impl SuiteBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_owner(mut self, owner: &str) -> Self {
        self.owner = Some(owner.to_string());
        self
    }

    pub fn with_candidates(mut self, candidates: &[(&str, u64)]) -> Self {
        self.candidates = candidates
            .iter()
            .map(|(addr, seniority)| (addr.to_string(), *seniority))
            .collect();
        self
    }

    #[track_caller]
    pub fn build(self) -> Suite {
        let mut app = App::default();
        let code_id = app.store_code(election_contract());
        let election = app
            .instantiate_contract(
                code_id,
                Addr::unchecked(OWNER),
                &InstantiateMsg {
                    owner: self.owner.clone(),
                },
                &[],
                "election",
                None,
            )
            .unwrap();

        let mut suite = Suite {
            owner: self.owner.unwrap_or_else(|| OWNER.to_string()),
            app,
            election,
        };
        for (candidate, seniority) in self.candidates {
            let owner = suite.owner.clone();
            suite.add_candidate(owner, candidate, seniority).unwrap();
        }
        suite
    }
}

pub struct Suite {
    pub owner: String,
    pub app: App,
    pub election: Addr,
}

impl Suite {
    pub fn advance_time(&mut self, seconds: u64) {
        self.app.update_block(|block| {
            block.time = block.time.plus_seconds(seconds);
            block.height += 1;
        });
    }

    fn execute(&mut self, sender: impl Into<String>, msg: &ExecuteMsg) -> AnyResult<AppResponse> {
        self.app.execute_contract(
            Addr::unchecked(sender),
            self.election.clone(),
            msg,
            &[],
        )
    }

    pub fn start(&mut self, sender: impl Into<String>, closure: u64) -> AnyResult<AppResponse> {
        self.execute(sender, &ExecuteMsg::Start { closure })
    }

    pub fn add_candidate(
        &mut self,
        sender: impl Into<String>,
        candidate: impl Into<String>,
        seniority: u64,
    ) -> AnyResult<AppResponse> {
        self.execute(
            sender,
            &ExecuteMsg::AddCandidate {
                candidate: candidate.into(),
                seniority,
            },
        )
    }

    pub fn remove_candidate(
        &mut self,
        sender: impl Into<String>,
        candidate: impl Into<String>,
    ) -> AnyResult<AppResponse> {
        self.execute(
            sender,
            &ExecuteMsg::RemoveCandidate {
                candidate: candidate.into(),
            },
        )
    }

    pub fn vote(
        &mut self,
        voter: impl Into<String>,
        candidate: impl Into<String>,
    ) -> AnyResult<AppResponse> {
        self.execute(
            voter,
            &ExecuteMsg::Vote {
                candidate: candidate.into(),
            },
        )
    }

    /// Finalizes the session and returns the winner taken from the
    /// response data.
    pub fn winner(&mut self, sender: impl Into<String>) -> AnyResult<(Addr, AppResponse)> {
        let res = self.execute(sender, &ExecuteMsg::Winner {})?;
        let winner = from_json(res.data.clone().unwrap_or_default())?;
        Ok((winner, res))
    }

    pub fn update_ownership(
        &mut self,
        sender: impl Into<String>,
        action: cw_ownable::Action,
    ) -> AnyResult<AppResponse> {
        self.execute(sender, &ExecuteMsg::UpdateOwnership(action))
    }

    pub fn query_candidates(&self) -> AnyResult<Vec<Addr>> {
        Ok(self
            .app
            .wrap()
            .query_wasm_smart(&self.election, &QueryMsg::Candidates {})?)
    }

    pub fn query_tally(&self) -> AnyResult<Vec<Candidate>> {
        Ok(self
            .app
            .wrap()
            .query_wasm_smart(&self.election, &QueryMsg::Tally {})?)
    }

    pub fn query_session(&self) -> AnyResult<Session> {
        Ok(self
            .app
            .wrap()
            .query_wasm_smart(&self.election, &QueryMsg::Session {})?)
    }

    pub fn query_winner(&self) -> AnyResult<Option<Addr>> {
        Ok(self
            .app
            .wrap()
            .query_wasm_smart(&self.election, &QueryMsg::Winner {})?)
    }

    pub fn query_ownership(&self) -> AnyResult<cw_ownable::Ownership<String>> {
        Ok(self
            .app
            .wrap()
            .query_wasm_smart(&self.election, &QueryMsg::Ownership {})?)
    }
}

/// Looks up an attribute of a custom event emitted by the contract.
pub fn event_attribute(res: &AppResponse, event: &str, key: &str) -> Option<String> {
    let ty = format!("wasm-{event}");
    res.events
        .iter()
        .filter(|e| e.ty == ty)
        .flat_map(|e| e.attributes.iter())
        .find(|attr| attr.key == key)
        .map(|attr| attr.value.clone())
}
