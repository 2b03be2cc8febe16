//! Role checks.
//!
//! Every state-changing entry point takes the acting `caller` explicitly. The
//! caller must sign for the invocation and is then matched against the role
//! table in instance storage, read fresh on each call.

use soroban_sdk::{Address, Env};

use crate::error::KeeperError;
use crate::storage;

/// Owner, management or governance.
pub fn require_authorized(env: &Env, caller: &Address) -> Result<(), KeeperError> {
    caller.require_auth();
    if *caller == storage::owner(env)?
        || *caller == storage::management(env)?
        || *caller == storage::governance(env)?
    {
        Ok(())
    } else {
        Err(KeeperError::Unauthorized)
    }
}

pub fn require_governance(env: &Env, caller: &Address) -> Result<(), KeeperError> {
    caller.require_auth();
    if *caller == storage::governance(env)? {
        Ok(())
    } else {
        Err(KeeperError::NotGovernance)
    }
}

/// The account proposed through `set_governance`.
pub fn require_pending_governance(env: &Env, caller: &Address) -> Result<(), KeeperError> {
    caller.require_auth();
    match storage::pending_governance(env) {
        Some(pending) if pending == *caller => Ok(()),
        _ => Err(KeeperError::Unauthorized),
    }
}

pub fn require_executor(env: &Env, caller: &Address) -> Result<(), KeeperError> {
    caller.require_auth();
    if *caller == storage::executor(env)? {
        Ok(())
    } else {
        Err(KeeperError::Unauthorized)
    }
}
