use soroban_sdk::{testutils::Address as _, vec, Address, Bytes, Env, IntoVal, Symbol};

use super::{create_token, Setup};
use crate::job_id::{compute_job_id, compute_legacy_job_id, resolver_hash, resolver_module_data};
use crate::{ExecutorProtocol, JobType, Module, ModuleData, ResolverCall};

fn resolver_call(env: &Env, resolver: &Address, strategy: &Address) -> ResolverCall {
    ResolverCall {
        resolver: resolver.clone(),
        function: Symbol::new(env, "check_harvest_trigger"),
        args: vec![env, strategy.into_val(env)],
    }
}

#[test]
fn test_job_id_is_deterministic() {
    let env = Env::default();
    let creator = Address::generate(&env);
    let strategy = Address::generate(&env);
    let fee_token = Address::generate(&env);
    let selector = Symbol::new(&env, "harvest_strategy");
    let module_data = resolver_module_data(&env, &resolver_call(&env, &creator, &strategy));

    let first = compute_job_id(&env, &creator, &creator, &selector, &module_data, &fee_token);
    let second = compute_job_id(&env, &creator, &creator, &selector, &module_data, &fee_token);
    assert_eq!(first, second);

    // rebuilt inputs hash the same
    let rebuilt = resolver_module_data(&env, &resolver_call(&env, &creator, &strategy));
    assert_eq!(
        first,
        compute_job_id(&env, &creator, &creator, &selector, &rebuilt, &fee_token)
    );
}

#[test]
fn test_job_id_depends_on_every_field() {
    let env = Env::default();
    let creator = Address::generate(&env);
    let strategy = Address::generate(&env);
    let other = Address::generate(&env);
    let fee_token = Address::generate(&env);
    let selector = Symbol::new(&env, "harvest_strategy");
    let module_data = resolver_module_data(&env, &resolver_call(&env, &creator, &strategy));
    let base = compute_job_id(&env, &creator, &creator, &selector, &module_data, &fee_token);

    assert_ne!(
        base,
        compute_job_id(&env, &other, &creator, &selector, &module_data, &fee_token)
    );
    assert_ne!(
        base,
        compute_job_id(&env, &creator, &other, &selector, &module_data, &fee_token)
    );
    assert_ne!(
        base,
        compute_job_id(
            &env,
            &creator,
            &creator,
            &Symbol::new(&env, "tend_strategy"),
            &module_data,
            &fee_token
        )
    );
    let other_module_data = resolver_module_data(&env, &resolver_call(&env, &creator, &other));
    assert_ne!(
        base,
        compute_job_id(&env, &creator, &creator, &selector, &other_module_data, &fee_token)
    );
    assert_ne!(
        base,
        compute_job_id(&env, &creator, &creator, &selector, &module_data, &other)
    );
}

#[test]
fn test_module_data_is_opaque_but_hashed() {
    let env = Env::default();
    let creator = Address::generate(&env);
    let fee_token = Address::generate(&env);
    let selector = Symbol::new(&env, "harvest_strategy");
    let resolver_only = ModuleData {
        modules: vec![&env, Module::Resolver],
        args: vec![&env, Bytes::from_slice(&env, &[1, 2, 3])],
    };
    let with_proxy = ModuleData {
        modules: vec![&env, Module::Resolver, Module::Proxy],
        args: vec![&env, Bytes::from_slice(&env, &[1, 2, 3]), Bytes::new(&env)],
    };

    assert_ne!(
        compute_job_id(&env, &creator, &creator, &selector, &resolver_only, &fee_token),
        compute_job_id(&env, &creator, &creator, &selector, &with_proxy, &fee_token)
    );
}

#[test]
fn test_legacy_job_id() {
    let env = Env::default();
    let creator = Address::generate(&env);
    let strategy = Address::generate(&env);
    let fee_token = Address::generate(&env);
    let selector = Symbol::new(&env, "harvest_strategy");
    let hash = resolver_hash(&env, &resolver_call(&env, &creator, &strategy));

    let id = compute_legacy_job_id(&env, &creator, &creator, &selector, false, &fee_token, &hash);
    assert_eq!(
        id,
        compute_legacy_job_id(&env, &creator, &creator, &selector, false, &fee_token, &hash)
    );
    assert_ne!(
        id,
        compute_legacy_job_id(&env, &creator, &creator, &selector, true, &fee_token, &hash)
    );

    let module_data = resolver_module_data(&env, &resolver_call(&env, &creator, &strategy));
    assert_ne!(
        id,
        compute_job_id(&env, &creator, &creator, &selector, &module_data, &fee_token)
    );
}

#[test]
fn test_registry_uses_protocol_derivation() {
    let current = Setup::new();
    let strategy = current.strategy();
    let id = current
        .keeper
        .create_job(&current.owner, &JobType::Harvest, &strategy.address);
    assert_eq!(
        id,
        current.keeper.compute_job_id(
            &current.keeper.address,
            &current.keeper.address,
            &current.keeper.job_selector(&JobType::Harvest),
            &current.keeper.job_module_data(&JobType::Harvest, &strategy.address),
            &current.fee_token.address,
        )
    );

    let legacy = Setup::with_protocol(ExecutorProtocol::Legacy);
    let strategy = legacy.strategy();
    let id = legacy
        .keeper
        .create_job(&legacy.owner, &JobType::Harvest, &strategy.address);
    assert_eq!(
        id,
        legacy.keeper.compute_legacy_job_id(
            &legacy.keeper.address,
            &legacy.keeper.address,
            &legacy.keeper.job_selector(&JobType::Harvest),
            &false,
            &legacy.fee_token.address,
            &legacy.keeper.job_resolver_hash(&JobType::Harvest, &strategy.address),
        )
    );
}

#[test]
fn test_resolver_module_points_at_keeper() {
    let s = Setup::new();
    let strategy = s.strategy();
    let (other_token, _) = create_token(&s.env);

    let module_data = s.keeper.job_module_data(&JobType::Harvest, &strategy.address);
    assert_eq!(module_data.modules, vec![&s.env, Module::Resolver]);

    let expected = resolver_module_data(
        &s.env,
        &ResolverCall {
            resolver: s.keeper.address.clone(),
            function: Symbol::new(&s.env, "check_harvest_trigger"),
            args: vec![&s.env, strategy.address.into_val(&s.env)],
        },
    );
    assert_eq!(module_data, expected);

    // same job paid in another token is a different job
    let selector = s.keeper.job_selector(&JobType::Harvest);
    assert_ne!(
        s.keeper.compute_job_id(
            &s.keeper.address,
            &s.keeper.address,
            &selector,
            &module_data,
            &s.fee_token.address
        ),
        s.keeper.compute_job_id(
            &s.keeper.address,
            &s.keeper.address,
            &selector,
            &module_data,
            &other_token.address
        )
    );
}
