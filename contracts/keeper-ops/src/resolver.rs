//! Resolver (checker) evaluation.
//!
//! The automation network polls these continuously, so a strategy that is not
//! ready is reported as [`CheckerResult::NotReady`] with a diagnostic, never as
//! an error. Errors are reserved for misconfiguration and rejected callers.

use soroban_sdk::{Address, Env, String};

use crate::error::KeeperError;
use crate::interface::{LensClient, StrategyClient};
use crate::registry;
use crate::storage;
use crate::types::{CheckerResult, JobAction, JobType, StrategyStatus};

pub const NO_NEW_STRATEGIES: &str = "No new strategies to automate";
pub const NEVER_ONBOARDED: &str = "Strategy was never onboarded";
pub const NO_LONGER_AUTOMATED: &str = "Strategy no longer automated by this keeper";
pub const HARVEST_NOT_READY: &str = "Harvest trigger not met";
pub const TEND_NOT_READY: &str = "Tend trigger not met";

/// Whether `strategy` currently names this contract as its keeper.
///
/// An address that does not answer `keeper()` is treated as unbound.
pub fn is_bound(env: &Env, strategy: &Address) -> bool {
    match StrategyClient::new(env, strategy).try_keeper() {
        Ok(Ok(keeper)) => keeper == env.current_contract_address(),
        _ => false,
    }
}

/// First lens strategy that handed its keeper role to us and has no harvest
/// job yet.
pub fn check_new_strategies(env: &Env) -> Result<CheckerResult, KeeperError> {
    let lens = LensClient::new(env, &storage::lens(env)?);
    for strategy in lens.assets_strategies_addresses().iter() {
        if storage::job_id(env, &strategy, JobType::Harvest).is_some() {
            continue;
        }
        if is_bound(env, &strategy) {
            return Ok(CheckerResult::Ready(JobAction::CreateHarvestJob(strategy)));
        }
    }
    Ok(not_ready(env, NO_NEW_STRATEGIES))
}

/// Readiness of a harvest or tend job on `strategy`.
///
/// Precedence: missing job, lost keeper binding, then the strategy's own
/// trigger evaluated at the configured base fee.
pub fn check_strategy(
    env: &Env,
    job_type: JobType,
    strategy: &Address,
) -> Result<CheckerResult, KeeperError> {
    if job_type == JobType::Monitor {
        return Err(KeeperError::InvalidJob);
    }
    if storage::job_id(env, strategy, job_type).is_none() {
        return Ok(not_ready(env, NEVER_ONBOARDED));
    }
    if !is_bound(env, strategy) {
        return Ok(not_ready(env, NO_LONGER_AUTOMATED));
    }

    let base_fee = storage::base_fee(env)?;
    let result = match job_type {
        JobType::Harvest if trigger(env, job_type, strategy, base_fee) => {
            CheckerResult::Ready(JobAction::Harvest(strategy.clone()))
        }
        JobType::Tend if trigger(env, job_type, strategy, base_fee) => {
            CheckerResult::Ready(JobAction::Tend(strategy.clone()))
        }
        JobType::Tend => not_ready(env, TEND_NOT_READY),
        _ => not_ready(env, HARVEST_NOT_READY),
    };
    Ok(result)
}

/// Strategy trigger for `job_type` at `call_cost`. A trigger that traps reads
/// as not met.
fn trigger(env: &Env, job_type: JobType, strategy: &Address, call_cost: i128) -> bool {
    let client = StrategyClient::new(env, strategy);
    let answer = match job_type {
        JobType::Harvest => client.try_harvest_trigger(&call_cost),
        JobType::Tend => client.try_tend_trigger(&call_cost),
        JobType::Monitor => return false,
    };
    matches!(answer, Ok(Ok(true)))
}

pub fn strategy_status(env: &Env, strategy: &Address) -> Result<StrategyStatus, KeeperError> {
    let base_fee = storage::base_fee(env)?;
    let keeper = StrategyClient::new(env, strategy).keeper();
    Ok(StrategyStatus {
        bound: keeper == env.current_contract_address(),
        keeper,
        has_harvest_job: storage::job_id(env, strategy, JobType::Harvest).is_some(),
        has_tend_job: storage::job_id(env, strategy, JobType::Tend).is_some(),
        job_ids: registry::job_ids(env, strategy),
        harvest_trigger: trigger(env, JobType::Harvest, strategy, base_fee),
        tend_trigger: trigger(env, JobType::Tend, strategy, base_fee),
    })
}

fn not_ready(env: &Env, reason: &str) -> CheckerResult {
    CheckerResult::NotReady(String::from_str(env, reason))
}
