//! Events emitted by the keeper.
//!
//! Every state change publishes one event so indexers and the operators can
//! follow job lifecycle, executions and role changes.

use soroban_sdk::{contracttype, symbol_short, Address, BytesN, Env, Symbol};

use crate::types::{JobAction, JobType};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub owner: Address,
    pub governance: Address,
    pub executor: Address,
    pub fee_token: Address,
    pub max_fee: i128,
}

/// Topic `job_new`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct JobCreatedEvent {
    pub job_id: BytesN<32>,
    pub job_type: JobType,
    pub entity: Address,
}

/// Topic `job_del`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct JobCancelledEvent {
    pub job_id: BytesN<32>,
    pub job_type: JobType,
    pub entity: Address,
}

/// Topic `exec`. Published for every settled execution, including the ones
/// whose action failed without reverting.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExecutedEvent {
    pub job_id: BytesN<32>,
    pub action: JobAction,
    pub executor: Address,
    pub fee: i128,
    pub success: bool,
}

/// Topics `harvested` and `tended`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StrategyWorkedEvent {
    pub strategy: Address,
}

/// Topic `gov_prop`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GovernanceProposedEvent {
    pub governance: Address,
    pub pending: Address,
}

/// Topic `gov_acc`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GovernanceAcceptedEvent {
    pub old_governance: Address,
    pub new_governance: Address,
}

/// Topic `sweep`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SweepEvent {
    pub token: Address,
    pub to: Address,
    pub amount: i128,
}

/// New value of a changed setting.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ConfigValue {
    Address(Address),
    Amount(i128),
}

/// Topic `config`, second topic names the setting that changed.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConfigUpdatedEvent {
    pub value: ConfigValue,
    pub caller: Address,
}

pub fn initialized(env: &Env, event: InitializedEvent) {
    env.events().publish((symbol_short!("init"),), event);
}

pub fn job_created(env: &Env, job_id: &BytesN<32>, job_type: JobType, entity: &Address) {
    env.events().publish(
        (symbol_short!("job_new"),),
        JobCreatedEvent {
            job_id: job_id.clone(),
            job_type,
            entity: entity.clone(),
        },
    );
}

pub fn job_cancelled(env: &Env, job_id: &BytesN<32>, job_type: JobType, entity: &Address) {
    env.events().publish(
        (symbol_short!("job_del"),),
        JobCancelledEvent {
            job_id: job_id.clone(),
            job_type,
            entity: entity.clone(),
        },
    );
}

pub fn executed(env: &Env, event: ExecutedEvent) {
    env.events().publish((symbol_short!("exec"),), event);
}

pub fn harvested(env: &Env, strategy: &Address) {
    env.events().publish(
        (symbol_short!("harvested"),),
        StrategyWorkedEvent {
            strategy: strategy.clone(),
        },
    );
}

pub fn tended(env: &Env, strategy: &Address) {
    env.events().publish(
        (symbol_short!("tended"),),
        StrategyWorkedEvent {
            strategy: strategy.clone(),
        },
    );
}

pub fn governance_proposed(env: &Env, governance: &Address, pending: &Address) {
    env.events().publish(
        (symbol_short!("gov_prop"),),
        GovernanceProposedEvent {
            governance: governance.clone(),
            pending: pending.clone(),
        },
    );
}

pub fn governance_accepted(env: &Env, old_governance: Address, new_governance: Address) {
    env.events().publish(
        (symbol_short!("gov_acc"),),
        GovernanceAcceptedEvent {
            old_governance,
            new_governance,
        },
    );
}

pub fn swept(env: &Env, token: &Address, to: &Address, amount: i128) {
    env.events().publish(
        (symbol_short!("sweep"),),
        SweepEvent {
            token: token.clone(),
            to: to.clone(),
            amount,
        },
    );
}

pub fn config_updated(env: &Env, setting: Symbol, value: ConfigValue, caller: &Address) {
    env.events().publish(
        (symbol_short!("config"), setting),
        ConfigUpdatedEvent {
            value,
            caller: caller.clone(),
        },
    );
}
