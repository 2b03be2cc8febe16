//! Storage layout and typed accessors.
//!
//! Instance storage holds the role table and configuration (single values,
//! read on nearly every call). Persistent storage holds the job registry: the
//! forward index `Task(job_id)` and the reverse index `Job(entity, job_type)`.

use core::fmt::Debug;

use soroban_sdk::{contracttype, Address, BytesN, Env, IntoVal, TryFromVal, Val};

use crate::error::KeeperError;
use crate::types::{ExecutorProtocol, JobType, KeeperConfig, TaskRecord};

pub(crate) const DAY_IN_LEDGERS: u32 = 17_280;
pub(crate) const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
pub(crate) const INSTANCE_LIFETIME_THRESHOLD: u32 = INSTANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;
pub(crate) const JOB_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
pub(crate) const JOB_LIFETIME_THRESHOLD: u32 = JOB_BUMP_AMOUNT - DAY_IN_LEDGERS;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Keeper operator
    Owner,
    Management,
    Governance,
    /// Proposed governance awaiting acceptance
    PendingGovernance,
    /// Automation network caller allowed to `exec`
    Executor,
    Lens,
    FeeToken,
    MaxFee,
    BaseFee,
    Protocol,
    /// Reverse index: (entity, job type) -> job id
    Job(Address, JobType),
    /// Active job record keyed by job id
    Task(BytesN<32>),
}

pub fn extend_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Owner)
}

pub fn write_config(env: &Env, config: &KeeperConfig) {
    let instance = env.storage().instance();
    instance.set(&DataKey::Owner, &config.owner);
    instance.set(&DataKey::Management, &config.management);
    instance.set(&DataKey::Governance, &config.governance);
    instance.set(&DataKey::Executor, &config.executor);
    instance.set(&DataKey::Lens, &config.lens);
    instance.set(&DataKey::FeeToken, &config.fee_token);
    instance.set(&DataKey::MaxFee, &config.max_fee);
    instance.set(&DataKey::BaseFee, &config.base_fee);
    instance.set(&DataKey::Protocol, &config.protocol);
}

fn read<V>(env: &Env, key: &DataKey) -> Result<V, KeeperError>
where
    V: TryFromVal<Env, Val>,
    <V as TryFromVal<Env, Val>>::Error: Debug,
{
    env.storage()
        .instance()
        .get(key)
        .ok_or(KeeperError::NotInitialized)
}

pub fn write<V: IntoVal<Env, Val>>(env: &Env, key: &DataKey, value: &V) {
    env.storage().instance().set(key, value);
}

pub fn owner(env: &Env) -> Result<Address, KeeperError> {
    read(env, &DataKey::Owner)
}

pub fn management(env: &Env) -> Result<Address, KeeperError> {
    read(env, &DataKey::Management)
}

pub fn governance(env: &Env) -> Result<Address, KeeperError> {
    read(env, &DataKey::Governance)
}

pub fn pending_governance(env: &Env) -> Option<Address> {
    env.storage().instance().get(&DataKey::PendingGovernance)
}

pub fn clear_pending_governance(env: &Env) {
    env.storage().instance().remove(&DataKey::PendingGovernance);
}

pub fn executor(env: &Env) -> Result<Address, KeeperError> {
    read(env, &DataKey::Executor)
}

pub fn lens(env: &Env) -> Result<Address, KeeperError> {
    read(env, &DataKey::Lens)
}

pub fn fee_token(env: &Env) -> Result<Address, KeeperError> {
    read(env, &DataKey::FeeToken)
}

pub fn max_fee(env: &Env) -> Result<i128, KeeperError> {
    read(env, &DataKey::MaxFee)
}

pub fn base_fee(env: &Env) -> Result<i128, KeeperError> {
    read(env, &DataKey::BaseFee)
}

pub fn protocol(env: &Env) -> Result<ExecutorProtocol, KeeperError> {
    read(env, &DataKey::Protocol)
}

// ----------------------------------------------------------------------------
// Job registry
// ----------------------------------------------------------------------------

pub fn job_id(env: &Env, entity: &Address, job_type: JobType) -> Option<BytesN<32>> {
    let key = DataKey::Job(entity.clone(), job_type);
    let id = env.storage().persistent().get(&key);
    if id.is_some() {
        env.storage()
            .persistent()
            .extend_ttl(&key, JOB_LIFETIME_THRESHOLD, JOB_BUMP_AMOUNT);
    }
    id
}

pub fn task(env: &Env, id: &BytesN<32>) -> Option<TaskRecord> {
    let key = DataKey::Task(id.clone());
    let record = env.storage().persistent().get(&key);
    if record.is_some() {
        env.storage()
            .persistent()
            .extend_ttl(&key, JOB_LIFETIME_THRESHOLD, JOB_BUMP_AMOUNT);
    }
    record
}

pub fn write_job(env: &Env, id: &BytesN<32>, record: &TaskRecord) {
    let persistent = env.storage().persistent();
    let job_key = DataKey::Job(record.entity.clone(), record.job_type);
    let task_key = DataKey::Task(id.clone());
    persistent.set(&job_key, id);
    persistent.set(&task_key, record);
    persistent.extend_ttl(&job_key, JOB_LIFETIME_THRESHOLD, JOB_BUMP_AMOUNT);
    persistent.extend_ttl(&task_key, JOB_LIFETIME_THRESHOLD, JOB_BUMP_AMOUNT);
}

pub fn remove_job(env: &Env, id: &BytesN<32>, record: &TaskRecord) {
    let persistent = env.storage().persistent();
    persistent.remove(&DataKey::Job(record.entity.clone(), record.job_type));
    persistent.remove(&DataKey::Task(id.clone()));
}
