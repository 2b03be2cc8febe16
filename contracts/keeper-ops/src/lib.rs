//! # Yearn Keeper Ops
//!
//! Keeper contract bridging Yearn strategies with an external automation
//! network. The contract registers jobs with the network, answers the
//! network's resolver queries, and is the execution gateway the network's
//! executor calls back into.
//!
//! ## Architecture Overview
//!
//! ```text
//! Onboarding:
//! Strategy management → strategy.set_keeper(keeper_ops)
//! Executor → check_new_strategies() → Ready(CreateHarvestJob(strategy))
//! Executor → exec(CreateHarvestJob) → harvest job registered
//!
//! Harvesting:
//! Executor → check_harvest_trigger(strategy) → Ready(Harvest(strategy))
//! Executor → exec(Harvest) → strategy.harvest()
//!                          ↓
//!                  fee paid to executor from the keeper's balance
//! ```
//!
//! ## Jobs
//!
//! A job is identified by a keccak-256 digest over its defining fields
//! (creator, target, selector, module data, fee token; see [`job_id`]). The
//! registry maps `(entity, job type)` to that id and the id back to its
//! record. Three job types exist:
//! - `Monitor`: one per keeper, discovers strategies that made us their keeper
//! - `Harvest`: one per strategy
//! - `Tend`: one per strategy
//!
//! ## Roles
//!
//! - `owner`: keeper operator, manages jobs and fee settings
//! - `management`: same powers as the owner
//! - `governance`: everything above plus sweeping and role assignment;
//!   handed over in two steps (`set_governance` then `accept_governance`)
//! - `executor`: the automation network's caller, the only account allowed to
//!   `exec` and to query the strategy resolvers
//!
//! ## Storage Layout
//!
//! ### Instance Storage
//! Role table and configuration: `Owner`, `Management`, `Governance`,
//! `PendingGovernance`, `Executor`, `Lens`, `FeeToken`, `MaxFee`, `BaseFee`,
//! `Protocol`.
//!
//! ### Persistent Storage
//! - `Job(entity, job_type)`: job id
//! - `Task(job_id)`: job record
//!
//! # Examples
//!
//! ## Onboard a strategy and harvest it
//! ```ignore
//! keeper.initiate_strategy_monitor(&owner);
//! strategy.set_keeper(&keeper.address);
//! if let CheckerResult::Ready(payload) = keeper.check_new_strategies() {
//!     keeper.exec(&executor, &ExecArgs { payload, ..monitor_args });
//! }
//! ```

#![no_std]

use soroban_sdk::{
    contract, contractimpl, log, symbol_short, token, Address, BytesN, Env, Symbol, Vec,
};

mod error;
mod events;
mod gateway;
mod interface;
pub mod job_id;
mod registry;
mod resolver;
mod roles;
mod storage;
mod types;

pub use error::KeeperError;
pub use events::{
    ConfigUpdatedEvent, ConfigValue, ExecutedEvent, GovernanceAcceptedEvent,
    GovernanceProposedEvent, InitializedEvent, JobCancelledEvent, JobCreatedEvent,
    StrategyWorkedEvent, SweepEvent,
};
pub use interface::{LensClient, LensInterface, StrategyClient, StrategyInterface};
pub use resolver::{
    HARVEST_NOT_READY, NEVER_ONBOARDED, NO_LONGER_AUTOMATED, NO_NEW_STRATEGIES, TEND_NOT_READY,
};
pub use storage::DataKey;
pub use types::{
    CheckerResult, ExecArgs, ExecutorProtocol, JobAction, JobType, KeeperConfig,
    LegacyExecArgs, Module, ModuleData, ResolverCall, StrategyStatus, TaskRecord,
};

// ============================================================================
// CONTRACT
// ============================================================================

/// Keeper job registry and execution gateway.
///
/// # Security Model
///
/// - Every state-changing entry point takes the acting `caller`, requires its
///   signature and matches it against the role table
/// - Only the executor can `exec`; the fee is bounded by `max_fee` and paid
///   in the fee token that is part of the job id
/// - A strategy's keeper binding is re-read on every execution
#[contract]
pub struct YearnKeeperOps;

#[contractimpl]
impl YearnKeeperOps {
    // ==========================================================================
    // INITIALIZATION
    // ==========================================================================

    /// Initializes the keeper with its roles and fee settings.
    ///
    /// Must be called exactly once after deployment. The contract must then be
    /// funded with `fee_token` to pay for executions.
    ///
    /// # Arguments
    /// * `env` - The Soroban environment
    /// * `config` - Roles, collaborators, fee settings and executor protocol
    ///
    /// # Errors
    /// - [`KeeperError::AlreadyInitialized`] if called twice
    /// - [`KeeperError::InvalidFee`] if `max_fee` or `base_fee` is negative
    ///
    /// # Events
    /// Emits `InitializedEvent` under `init`.
    pub fn initialize(env: Env, config: KeeperConfig) -> Result<(), KeeperError> {
        if storage::is_initialized(&env) {
            return Err(KeeperError::AlreadyInitialized);
        }
        if config.max_fee < 0 || config.base_fee < 0 {
            return Err(KeeperError::InvalidFee);
        }

        storage::write_config(&env, &config);
        storage::extend_instance(&env);

        events::initialized(
            &env,
            InitializedEvent {
                owner: config.owner,
                governance: config.governance,
                executor: config.executor,
                fee_token: config.fee_token,
                max_fee: config.max_fee,
            },
        );
        Ok(())
    }

    // ==========================================================================
    // JOB REGISTRY
    // ==========================================================================

    /// Creates the monitor job that discovers newly onboarded strategies.
    ///
    /// # Errors
    /// - [`KeeperError::Unauthorized`] if `caller` is not owner, management or governance
    /// - [`KeeperError::DuplicateJob`] if the monitor job already exists
    pub fn initiate_strategy_monitor(env: Env, caller: Address) -> Result<BytesN<32>, KeeperError> {
        roles::require_authorized(&env, &caller)?;
        storage::extend_instance(&env);
        registry::create_job(&env, JobType::Monitor, &env.current_contract_address())
    }

    /// Registers a job of `job_type` for `entity`.
    ///
    /// `entity` is the keeper itself for monitor jobs and a strategy for
    /// harvest and tend jobs.
    ///
    /// # Returns
    /// The job id, identical to the one the automation network derives.
    ///
    /// # Errors
    /// - [`KeeperError::Unauthorized`] if `caller` is not owner, management or governance
    /// - [`KeeperError::InvalidJob`] if `entity` does not fit `job_type`
    /// - [`KeeperError::DuplicateJob`] if the job already exists
    ///
    /// # Events
    /// Emits `JobCreatedEvent` under `job_new`.
    pub fn create_job(
        env: Env,
        caller: Address,
        job_type: JobType,
        entity: Address,
    ) -> Result<BytesN<32>, KeeperError> {
        roles::require_authorized(&env, &caller)?;
        storage::extend_instance(&env);
        registry::create_job(&env, job_type, &entity)
    }

    /// Cancels the job of `job_type` for `entity`.
    ///
    /// # Errors
    /// - [`KeeperError::Unauthorized`] if `caller` is not owner, management or governance
    /// - [`KeeperError::JobNotFound`] if no such job exists
    /// - [`KeeperError::KeeperStillBound`] if a strategy job is cancelled while
    ///   the strategy's keeper is still this contract
    ///
    /// # Events
    /// Emits `JobCancelledEvent` under `job_del`.
    pub fn cancel_job(
        env: Env,
        caller: Address,
        job_type: JobType,
        entity: Address,
    ) -> Result<BytesN<32>, KeeperError> {
        roles::require_authorized(&env, &caller)?;
        storage::extend_instance(&env);
        registry::cancel_job(&env, job_type, &entity)
    }

    /// Returns the id of the job of `job_type` for `entity`, if any.
    pub fn get_job_id(env: Env, job_type: JobType, entity: Address) -> Option<BytesN<32>> {
        storage::job_id(&env, &entity, job_type)
    }

    /// Returns the active job ids of `entity`, ordered by job type.
    pub fn job_ids(env: Env, entity: Address) -> Vec<BytesN<32>> {
        registry::job_ids(&env, &entity)
    }

    /// Whether `job_id` belongs to a job that is currently registered.
    pub fn is_active_job(env: Env, job_id: BytesN<32>) -> bool {
        storage::task(&env, &job_id).is_some()
    }

    // ==========================================================================
    // JOB IDENTIFIERS
    // ==========================================================================

    /// Function the executor invokes for `job_type`.
    pub fn job_selector(env: Env, job_type: JobType) -> Symbol {
        job_type.selector(&env)
    }

    /// Module data the keeper registers for `job_type` on `entity`.
    pub fn job_module_data(env: Env, job_type: JobType, entity: Address) -> ModuleData {
        let call = job_id::job_resolver_call(&env, job_type, &entity);
        job_id::resolver_module_data(&env, &call)
    }

    /// Resolver hash the legacy protocol keys `job_type` on `entity` with.
    pub fn job_resolver_hash(env: Env, job_type: JobType, entity: Address) -> BytesN<32> {
        let call = job_id::job_resolver_call(&env, job_type, &entity);
        job_id::resolver_hash(&env, &call)
    }

    /// Job id under the current protocol. Pure.
    pub fn compute_job_id(
        env: Env,
        creator: Address,
        target: Address,
        selector: Symbol,
        module_data: ModuleData,
        fee_token: Address,
    ) -> BytesN<32> {
        job_id::compute_job_id(&env, &creator, &target, &selector, &module_data, &fee_token)
    }

    /// Job id under the legacy protocol. Pure.
    pub fn compute_legacy_job_id(
        env: Env,
        creator: Address,
        target: Address,
        selector: Symbol,
        use_treasury: bool,
        fee_token: Address,
        resolver_hash: BytesN<32>,
    ) -> BytesN<32> {
        job_id::compute_legacy_job_id(
            &env,
            &creator,
            &target,
            &selector,
            use_treasury,
            &fee_token,
            &resolver_hash,
        )
    }

    // ==========================================================================
    // RESOLVERS
    // ==========================================================================

    /// Finds a strategy that made this contract its keeper but has no harvest
    /// job yet.
    ///
    /// # Returns
    /// `Ready(CreateHarvestJob(strategy))` for the first such strategy in lens
    /// order, `NotReady` otherwise. Open to any caller.
    pub fn check_new_strategies(env: Env) -> Result<CheckerResult, KeeperError> {
        resolver::check_new_strategies(&env)
    }

    /// Tells the executor whether `strategy` should be harvested now.
    ///
    /// Requires the executor's authorization so that a query from another
    /// account is never mistaken for the authoritative answer.
    ///
    /// # Returns
    /// - `NotReady(NEVER_ONBOARDED)` if the strategy has no harvest job
    /// - `NotReady(NO_LONGER_AUTOMATED)` if its keeper moved elsewhere
    /// - `NotReady(HARVEST_NOT_READY)` if its trigger is false at `base_fee`
    /// - `Ready(Harvest(strategy))` otherwise
    pub fn check_harvest_trigger(env: Env, strategy: Address) -> Result<CheckerResult, KeeperError> {
        storage::executor(&env)?.require_auth();
        resolver::check_strategy(&env, JobType::Harvest, &strategy)
    }

    /// Tend counterpart of [`Self::check_harvest_trigger`].
    pub fn check_tend_trigger(env: Env, strategy: Address) -> Result<CheckerResult, KeeperError> {
        storage::executor(&env)?.require_auth();
        resolver::check_strategy(&env, JobType::Tend, &strategy)
    }

    /// Readiness report for `strategy`: keeper, binding, jobs and triggers.
    pub fn strategy_status(env: Env, strategy: Address) -> Result<StrategyStatus, KeeperError> {
        resolver::strategy_status(&env, &strategy)
    }

    // ==========================================================================
    // EXECUTION GATEWAY
    // ==========================================================================

    /// Executes a job on behalf of the automation network (current protocol).
    ///
    /// # Arguments
    /// * `env` - The Soroban environment
    /// * `caller` - Must be the executor; receives the fee
    /// * `args` - Job identification, payload and fee
    ///
    /// # Returns
    /// Whether the job action succeeded. A failed action only returns `false`
    /// when `revert_on_failure` is unset; the fee is paid in both cases.
    ///
    /// # Errors
    /// - [`KeeperError::IncompatibleProtocol`] if the keeper runs the legacy protocol
    /// - [`KeeperError::Unauthorized`] if `caller` is not the executor
    /// - [`KeeperError::InvalidFee`] / [`KeeperError::FeeExceeded`] if the fee is
    ///   negative or above `max_fee`
    /// - [`KeeperError::TreasuryNotSupported`] if `use_treasury` is set
    /// - [`KeeperError::TaskNotFound`] if no active job matches
    /// - [`KeeperError::StaleBinding`] if the strategy's keeper moved elsewhere
    /// - [`KeeperError::ActionFailed`] if the action failed and `revert_on_failure` is set
    ///
    /// # Events
    /// Emits `ExecutedEvent` under `exec`, plus `harvested` or `tended` when a
    /// strategy was worked.
    pub fn exec(env: Env, caller: Address, args: ExecArgs) -> Result<bool, KeeperError> {
        storage::extend_instance(&env);
        gateway::exec(&env, &caller, args)
    }

    /// Legacy-protocol counterpart of [`Self::exec`].
    pub fn exec_legacy(env: Env, caller: Address, args: LegacyExecArgs) -> Result<bool, KeeperError> {
        storage::extend_instance(&env);
        gateway::exec_legacy(&env, &caller, args)
    }

    // ==========================================================================
    // GOVERNANCE
    // ==========================================================================

    /// Proposes `pending` as the next governance.
    ///
    /// The current governance keeps its powers until `pending` accepts.
    ///
    /// # Errors
    /// - [`KeeperError::NotGovernance`] if `caller` is not governance
    ///
    /// # Events
    /// Emits `GovernanceProposedEvent` under `gov_prop`.
    pub fn set_governance(env: Env, caller: Address, pending: Address) -> Result<(), KeeperError> {
        roles::require_governance(&env, &caller)?;
        storage::write(&env, &DataKey::PendingGovernance, &pending);
        events::governance_proposed(&env, &caller, &pending);
        Ok(())
    }

    /// Completes the governance handoff.
    ///
    /// # Errors
    /// - [`KeeperError::Unauthorized`] if `caller` is not the pending governance
    ///
    /// # Events
    /// Emits `GovernanceAcceptedEvent` under `gov_acc`.
    pub fn accept_governance(env: Env, caller: Address) -> Result<(), KeeperError> {
        roles::require_pending_governance(&env, &caller)?;
        let old_governance = storage::governance(&env)?;
        storage::write(&env, &DataKey::Governance, &caller);
        storage::clear_pending_governance(&env);
        events::governance_accepted(&env, old_governance, caller);
        Ok(())
    }

    /// Replaces the management account.
    ///
    /// # Errors
    /// - [`KeeperError::NotGovernance`] if `caller` is not governance
    ///
    /// # Events
    /// Emits `ConfigUpdatedEvent` under `config` / `mgmt`.
    pub fn set_management(env: Env, caller: Address, management: Address) -> Result<(), KeeperError> {
        roles::require_governance(&env, &caller)?;
        storage::write(&env, &DataKey::Management, &management);
        events::config_updated(
            &env,
            symbol_short!("mgmt"),
            ConfigValue::Address(management),
            &caller,
        );
        Ok(())
    }

    /// Points the gateway at a new automation network caller.
    pub fn set_executor(env: Env, caller: Address, executor: Address) -> Result<(), KeeperError> {
        roles::require_governance(&env, &caller)?;
        storage::write(&env, &DataKey::Executor, &executor);
        events::config_updated(
            &env,
            symbol_short!("executor"),
            ConfigValue::Address(executor),
            &caller,
        );
        Ok(())
    }

    /// Transfers the keeper's whole balance of `token` to governance.
    ///
    /// Works for any token, including ones the keeper never uses. A zero
    /// balance is a no-op.
    ///
    /// # Returns
    /// The amount swept.
    ///
    /// # Errors
    /// - [`KeeperError::NotGovernance`] if `caller` is not governance
    ///
    /// # Events
    /// Emits `SweepEvent` under `sweep` when something was transferred.
    pub fn sweep(env: Env, caller: Address, token: Address) -> Result<i128, KeeperError> {
        roles::require_governance(&env, &caller)?;

        let client = token::Client::new(&env, &token);
        let this = env.current_contract_address();
        let amount = client.balance(&this);
        if amount <= 0 {
            log!(&env, "nothing to sweep", token);
            return Ok(0);
        }

        client.transfer(&this, &caller, &amount);
        events::swept(&env, &token, &caller, amount);
        Ok(amount)
    }

    // ==========================================================================
    // CONFIGURATION
    // ==========================================================================

    /// Hands the owner (keeper operator) role to `keeper`.
    ///
    /// # Errors
    /// - [`KeeperError::Unauthorized`] if `caller` is not owner, management or governance
    pub fn set_keeper(env: Env, caller: Address, keeper: Address) -> Result<(), KeeperError> {
        roles::require_authorized(&env, &caller)?;
        storage::write(&env, &DataKey::Owner, &keeper);
        events::config_updated(
            &env,
            symbol_short!("keeper"),
            ConfigValue::Address(keeper),
            &caller,
        );
        Ok(())
    }

    /// Sets the ceiling on the fee of a single execution.
    ///
    /// # Errors
    /// - [`KeeperError::Unauthorized`] if `caller` is not owner, management or governance
    /// - [`KeeperError::InvalidFee`] if `max_fee` is negative
    pub fn set_max_fee(env: Env, caller: Address, max_fee: i128) -> Result<(), KeeperError> {
        roles::require_authorized(&env, &caller)?;
        if max_fee < 0 {
            return Err(KeeperError::InvalidFee);
        }
        storage::write(&env, &DataKey::MaxFee, &max_fee);
        events::config_updated(
            &env,
            symbol_short!("max_fee"),
            ConfigValue::Amount(max_fee),
            &caller,
        );
        Ok(())
    }

    /// Sets the call cost handed to strategy triggers by the resolvers.
    pub fn set_base_fee(env: Env, caller: Address, base_fee: i128) -> Result<(), KeeperError> {
        roles::require_authorized(&env, &caller)?;
        if base_fee < 0 {
            return Err(KeeperError::InvalidFee);
        }
        storage::write(&env, &DataKey::BaseFee, &base_fee);
        events::config_updated(
            &env,
            symbol_short!("base_fee"),
            ConfigValue::Amount(base_fee),
            &caller,
        );
        Ok(())
    }

    /// Changes the fee token.
    ///
    /// The fee token is part of every job id: jobs created before the change
    /// keep their old id and are no longer found by executions paying in the
    /// new token. Cancel and recreate them afterwards.
    pub fn set_fee_token(env: Env, caller: Address, fee_token: Address) -> Result<(), KeeperError> {
        roles::require_authorized(&env, &caller)?;
        storage::write(&env, &DataKey::FeeToken, &fee_token);
        events::config_updated(
            &env,
            symbol_short!("fee_token"),
            ConfigValue::Address(fee_token),
            &caller,
        );
        Ok(())
    }

    // ==========================================================================
    // READ FUNCTIONS
    // ==========================================================================

    /// Keeper operator.
    pub fn owner(env: Env) -> Result<Address, KeeperError> {
        storage::owner(&env)
    }

    /// Management account.
    pub fn management(env: Env) -> Result<Address, KeeperError> {
        storage::management(&env)
    }

    /// Current governance. A proposed successor has no powers until it accepts.
    pub fn governance(env: Env) -> Result<Address, KeeperError> {
        storage::governance(&env)
    }

    /// Governance proposed through `set_governance`, until accepted.
    pub fn pending_governance(env: Env) -> Option<Address> {
        storage::pending_governance(&env)
    }

    /// Automation network caller allowed to `exec`.
    pub fn executor(env: Env) -> Result<Address, KeeperError> {
        storage::executor(&env)
    }

    /// Contract listing the strategies `check_new_strategies` scans.
    pub fn lens(env: Env) -> Result<Address, KeeperError> {
        storage::lens(&env)
    }

    /// Token execution fees are paid in.
    pub fn fee_token(env: Env) -> Result<Address, KeeperError> {
        storage::fee_token(&env)
    }

    /// Ceiling on the fee of a single execution.
    pub fn max_fee(env: Env) -> Result<i128, KeeperError> {
        storage::max_fee(&env)
    }

    /// Call cost handed to strategy triggers.
    pub fn base_fee(env: Env) -> Result<i128, KeeperError> {
        storage::base_fee(&env)
    }

    /// Executor protocol, selecting between `exec` and `exec_legacy`.
    pub fn protocol(env: Env) -> Result<ExecutorProtocol, KeeperError> {
        storage::protocol(&env)
    }
}

#[cfg(test)]
mod test;
