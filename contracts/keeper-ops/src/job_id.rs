//! Job identifier derivation.
//!
//! The automation network indexes tasks by a keccak-256 digest over the XDR
//! encoding of the task's defining fields. The keeper derives the same digest
//! locally when it registers a job and again when an executor calls back, so
//! both sides must hash exactly the same tuple.

use soroban_sdk::{vec, xdr::ToXdr, Address, BytesN, Env, IntoVal, Symbol, Val, Vec};

use crate::types::{ExecutorProtocol, JobType, Module, ModuleData, ResolverCall};

/// Job id under the current protocol: `H(creator, target, selector, module_data, fee_token)`.
pub fn compute_job_id(
    env: &Env,
    creator: &Address,
    target: &Address,
    selector: &Symbol,
    module_data: &ModuleData,
    fee_token: &Address,
) -> BytesN<32> {
    let preimage = (
        creator.clone(),
        target.clone(),
        selector.clone(),
        module_data.clone(),
        fee_token.clone(),
    )
        .to_xdr(env);
    env.crypto().keccak256(&preimage).into()
}

/// Job id under the legacy protocol:
/// `H(creator, target, selector, use_treasury, fee_token, resolver_hash)`.
pub fn compute_legacy_job_id(
    env: &Env,
    creator: &Address,
    target: &Address,
    selector: &Symbol,
    use_treasury: bool,
    fee_token: &Address,
    resolver_hash: &BytesN<32>,
) -> BytesN<32> {
    let preimage = (
        creator.clone(),
        target.clone(),
        selector.clone(),
        use_treasury,
        fee_token.clone(),
        resolver_hash.clone(),
    )
        .to_xdr(env);
    env.crypto().keccak256(&preimage).into()
}

pub fn resolver_hash(env: &Env, call: &ResolverCall) -> BytesN<32> {
    env.crypto().keccak256(&call.clone().to_xdr(env)).into()
}

/// Module data consisting of a single resolver module.
pub fn resolver_module_data(env: &Env, call: &ResolverCall) -> ModuleData {
    ModuleData {
        modules: vec![env, Module::Resolver],
        args: vec![env, call.clone().to_xdr(env)],
    }
}

/// Resolver the automation network polls for `job_type` on `entity`.
pub fn job_resolver_call(env: &Env, job_type: JobType, entity: &Address) -> ResolverCall {
    let args: Vec<Val> = match job_type {
        JobType::Monitor => Vec::new(env),
        JobType::Harvest | JobType::Tend => vec![env, entity.into_val(env)],
    };
    ResolverCall {
        resolver: env.current_contract_address(),
        function: job_type.resolver_function(env),
        args,
    }
}

/// Id of the job the keeper registers for `(job_type, entity)`.
///
/// The keeper is both creator and target of every job it registers.
pub fn derive_job_id(
    env: &Env,
    protocol: ExecutorProtocol,
    job_type: JobType,
    entity: &Address,
    fee_token: &Address,
) -> BytesN<32> {
    let this = env.current_contract_address();
    let call = job_resolver_call(env, job_type, entity);
    let selector = job_type.selector(env);
    match protocol {
        ExecutorProtocol::Current => compute_job_id(
            env,
            &this,
            &this,
            &selector,
            &resolver_module_data(env, &call),
            fee_token,
        ),
        ExecutorProtocol::Legacy => compute_legacy_job_id(
            env,
            &this,
            &this,
            &selector,
            false,
            fee_token,
            &resolver_hash(env, &call),
        ),
    }
}
