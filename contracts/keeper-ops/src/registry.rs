//! Job registry: create, cancel and look up keeper jobs.

use soroban_sdk::{log, Address, BytesN, Env, Vec};

use crate::error::KeeperError;
use crate::events;
use crate::job_id;
use crate::resolver;
use crate::storage;
use crate::types::{JobType, TaskRecord};

/// Registers `job_type` for `entity` and returns its job id.
///
/// Monitor jobs belong to the keeper itself, harvest and tend jobs to a
/// strategy. The strategy's keeper binding is not checked here; it is re-read
/// whenever the job is resolved or executed.
pub fn create_job(
    env: &Env,
    job_type: JobType,
    entity: &Address,
) -> Result<BytesN<32>, KeeperError> {
    let is_self = *entity == env.current_contract_address();
    match job_type {
        JobType::Monitor if !is_self => return Err(KeeperError::InvalidJob),
        JobType::Harvest | JobType::Tend if is_self => return Err(KeeperError::InvalidJob),
        _ => {}
    }

    if storage::job_id(env, entity, job_type).is_some() {
        return Err(KeeperError::DuplicateJob);
    }

    let id = job_id::derive_job_id(
        env,
        storage::protocol(env)?,
        job_type,
        entity,
        &storage::fee_token(env)?,
    );
    if storage::task(env, &id).is_some() {
        return Err(KeeperError::DuplicateJob);
    }

    let record = TaskRecord {
        job_type,
        entity: entity.clone(),
    };
    storage::write_job(env, &id, &record);

    log!(env, "job created", job_type as u32, entity.clone());
    events::job_created(env, &id, job_type, entity);
    Ok(id)
}

/// Removes `job_type` for `entity`.
///
/// A strategy job can only be cancelled once the strategy has moved its keeper
/// role elsewhere, so a job is never dropped while the strategy still relies
/// on it. An entity that does not answer `keeper()` counts as moved.
pub fn cancel_job(
    env: &Env,
    job_type: JobType,
    entity: &Address,
) -> Result<BytesN<32>, KeeperError> {
    let id = storage::job_id(env, entity, job_type).ok_or(KeeperError::JobNotFound)?;

    if job_type != JobType::Monitor && resolver::is_bound(env, entity) {
        return Err(KeeperError::KeeperStillBound);
    }

    let record = TaskRecord {
        job_type,
        entity: entity.clone(),
    };
    storage::remove_job(env, &id, &record);

    events::job_cancelled(env, &id, job_type, entity);
    Ok(id)
}

/// Active job ids of `entity`, ordered by job type.
pub fn job_ids(env: &Env, entity: &Address) -> Vec<BytesN<32>> {
    let mut ids = Vec::new(env);
    for job_type in JobType::ALL {
        if let Some(id) = storage::job_id(env, entity, job_type) {
            ids.push_back(id);
        }
    }
    ids
}
