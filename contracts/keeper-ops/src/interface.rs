//! Clients for the external contracts the keeper talks to.

use soroban_sdk::{contractclient, Address, Env, Vec};

/// Strategy surface used by the resolvers and the execution gateway.
#[contractclient(name = "StrategyClient")]
pub trait StrategyInterface {
    /// Address allowed to call `harvest` and `tend`.
    fn keeper(env: Env) -> Address;
    /// Whether a harvest is worth `call_cost`.
    fn harvest_trigger(env: Env, call_cost: i128) -> bool;
    fn harvest(env: Env);
    fn tend_trigger(env: Env, call_cost: i128) -> bool;
    fn tend(env: Env);
}

/// Registry of production strategies.
#[contractclient(name = "LensClient")]
pub trait LensInterface {
    fn assets_strategies_addresses(env: Env) -> Vec<Address>;
}
