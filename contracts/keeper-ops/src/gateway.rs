//! Execution gateway.
//!
//! The automation network's executor calls back through [`exec`] or
//! [`exec_legacy`], whichever matches the configured protocol. Both entry
//! points reduce the request to a job id and share the same pipeline:
//!
//! ```text
//! executor check -> fee bounds -> job lookup -> keeper binding -> action -> fee settlement
//! ```
//!
//! Nothing the resolver answered earlier is trusted; every condition is
//! re-read at execution time.

use soroban_sdk::{log, token, Address, BytesN, Env};

use crate::error::KeeperError;
use crate::events::{self, ExecutedEvent};
use crate::interface::StrategyClient;
use crate::job_id;
use crate::registry;
use crate::resolver;
use crate::roles;
use crate::storage;
use crate::types::{ExecArgs, ExecutorProtocol, JobAction, JobType, LegacyExecArgs};

struct ExecRequest {
    job_id: BytesN<32>,
    action: JobAction,
    fee: i128,
    fee_token: Address,
    revert_on_failure: bool,
}

pub fn exec(env: &Env, caller: &Address, args: ExecArgs) -> Result<bool, KeeperError> {
    require_protocol(env, ExecutorProtocol::Current)?;
    roles::require_executor(env, caller)?;
    check_fee(env, args.fee, args.use_treasury)?;

    let job_id = job_id::compute_job_id(
        env,
        &args.creator,
        &args.target,
        &args.payload.selector(env),
        &args.module_data,
        &args.fee_token,
    );
    run(
        env,
        caller,
        ExecRequest {
            job_id,
            action: args.payload,
            fee: args.fee,
            fee_token: args.fee_token,
            revert_on_failure: args.revert_on_failure,
        },
    )
}

pub fn exec_legacy(env: &Env, caller: &Address, args: LegacyExecArgs) -> Result<bool, KeeperError> {
    require_protocol(env, ExecutorProtocol::Legacy)?;
    roles::require_executor(env, caller)?;
    check_fee(env, args.fee, args.use_treasury)?;

    let job_id = job_id::compute_legacy_job_id(
        env,
        &args.creator,
        &args.target,
        &args.payload.selector(env),
        args.use_treasury,
        &args.fee_token,
        &args.resolver_hash,
    );
    run(
        env,
        caller,
        ExecRequest {
            job_id,
            action: args.payload,
            fee: args.fee,
            fee_token: args.fee_token,
            revert_on_failure: args.revert_on_failure,
        },
    )
}

fn require_protocol(env: &Env, expected: ExecutorProtocol) -> Result<(), KeeperError> {
    if storage::protocol(env)? != expected {
        return Err(KeeperError::IncompatibleProtocol);
    }
    Ok(())
}

fn check_fee(env: &Env, fee: i128, use_treasury: bool) -> Result<(), KeeperError> {
    if fee < 0 {
        return Err(KeeperError::InvalidFee);
    }
    if fee > storage::max_fee(env)? {
        return Err(KeeperError::FeeExceeded);
    }
    // fees always come out of the keeper's own balance
    if use_treasury {
        return Err(KeeperError::TreasuryNotSupported);
    }
    Ok(())
}

fn run(env: &Env, executor: &Address, request: ExecRequest) -> Result<bool, KeeperError> {
    let record = storage::task(env, &request.job_id).ok_or(KeeperError::TaskNotFound)?;
    let action_type = request.action.job_type();
    if record.job_type != action_type {
        return Err(KeeperError::TaskNotFound);
    }
    if action_type != JobType::Monitor && record.entity != *request.action.strategy() {
        return Err(KeeperError::TaskNotFound);
    }
    if *request.action.strategy() == env.current_contract_address() {
        return Err(KeeperError::InvalidJob);
    }

    if !resolver::is_bound(env, request.action.strategy()) {
        return Err(KeeperError::StaleBinding);
    }

    let success = match perform(env, &request.action) {
        Ok(()) => true,
        Err(err) if request.revert_on_failure => {
            log!(env, "job action failed, reverting", err as u32);
            return Err(KeeperError::ActionFailed);
        }
        Err(err) => {
            log!(env, "job action failed", request.job_id.clone(), err as u32);
            false
        }
    };

    pay_fee(env, executor, &request.fee_token, request.fee);

    events::executed(
        env,
        ExecutedEvent {
            job_id: request.job_id,
            action: request.action,
            executor: executor.clone(),
            fee: request.fee,
            success,
        },
    );
    Ok(success)
}

/// Runs the job action. Each arm either fully applies or leaves no state
/// behind: registry writes happen after their checks, and strategy calls run
/// in their own frame.
fn perform(env: &Env, action: &JobAction) -> Result<(), KeeperError> {
    match action {
        JobAction::CreateHarvestJob(strategy) => {
            registry::create_job(env, JobType::Harvest, strategy).map(|_| ())
        }
        JobAction::Harvest(strategy) => match StrategyClient::new(env, strategy).try_harvest() {
            Ok(Ok(())) => {
                events::harvested(env, strategy);
                Ok(())
            }
            _ => Err(KeeperError::ActionFailed),
        },
        JobAction::Tend(strategy) => match StrategyClient::new(env, strategy).try_tend() {
            Ok(Ok(())) => {
                events::tended(env, strategy);
                Ok(())
            }
            _ => Err(KeeperError::ActionFailed),
        },
    }
}

fn pay_fee(env: &Env, executor: &Address, fee_token: &Address, fee: i128) {
    if fee == 0 {
        return;
    }
    token::Client::new(env, fee_token).transfer(&env.current_contract_address(), executor, &fee);
}
