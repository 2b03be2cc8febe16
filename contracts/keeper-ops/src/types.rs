use soroban_sdk::{contracttype, Address, Bytes, BytesN, Env, String, Symbol, Val, Vec};

/// Kinds of jobs the keeper registers with the automation network.
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum JobType {
    /// Watches the lens for strategies that handed their keeper role to us
    Monitor = 0,
    /// Harvests a single strategy when its trigger fires
    Harvest = 1,
    /// Tends a single strategy when its trigger fires
    Tend = 2,
}

impl JobType {
    pub const ALL: [JobType; 3] = [JobType::Monitor, JobType::Harvest, JobType::Tend];

    /// Name of the contract function the executor ends up calling for this job.
    pub fn selector(&self, env: &Env) -> Symbol {
        match self {
            JobType::Monitor => Symbol::new(env, "create_harvest_job"),
            JobType::Harvest => Symbol::new(env, "harvest_strategy"),
            JobType::Tend => Symbol::new(env, "tend_strategy"),
        }
    }

    /// Name of the resolver function the automation network polls for this job.
    pub fn resolver_function(&self, env: &Env) -> Symbol {
        match self {
            JobType::Monitor => Symbol::new(env, "check_new_strategies"),
            JobType::Harvest => Symbol::new(env, "check_harvest_trigger"),
            JobType::Tend => Symbol::new(env, "check_tend_trigger"),
        }
    }
}

/// Work the executor asks the gateway to perform. Produced by the resolvers
/// and handed back verbatim as the `exec` payload.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum JobAction {
    /// Register a harvest job for a newly onboarded strategy
    CreateHarvestJob(Address),
    Harvest(Address),
    Tend(Address),
}

impl JobAction {
    pub fn job_type(&self) -> JobType {
        match self {
            JobAction::CreateHarvestJob(_) => JobType::Monitor,
            JobAction::Harvest(_) => JobType::Harvest,
            JobAction::Tend(_) => JobType::Tend,
        }
    }

    pub fn selector(&self, env: &Env) -> Symbol {
        self.job_type().selector(env)
    }

    /// The strategy the action operates on.
    pub fn strategy(&self) -> &Address {
        match self {
            JobAction::CreateHarvestJob(strategy)
            | JobAction::Harvest(strategy)
            | JobAction::Tend(strategy) => strategy,
        }
    }
}

/// Resolver answer. Failures that are not "not ready" are returned as
/// [`crate::error::KeeperError`] instead.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CheckerResult {
    Ready(JobAction),
    NotReady(String),
}

/// Modules a job can be composed of on the automation network.
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Module {
    Resolver = 0,
    Time = 1,
    Proxy = 2,
    SingleExec = 3,
}

/// Module configuration of a job. `args[i]` is the opaque argument blob of
/// `modules[i]`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ModuleData {
    pub modules: Vec<Module>,
    pub args: Vec<Bytes>,
}

/// Resolver call encoded into the resolver module argument.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ResolverCall {
    pub resolver: Address,
    pub function: Symbol,
    pub args: Vec<Val>,
}

/// Calling convention of the automation network the keeper is deployed against.
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ExecutorProtocol {
    /// Resolver-hash based tasks, fee first in the argument list
    Legacy = 0,
    /// Module-data based tasks
    Current = 1,
}

/// Arguments of the current `exec` convention, in the network's argument order.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExecArgs {
    pub creator: Address,
    pub target: Address,
    pub payload: JobAction,
    pub module_data: ModuleData,
    pub fee: i128,
    pub fee_token: Address,
    pub use_treasury: bool,
    pub revert_on_failure: bool,
}

/// Arguments of the legacy `exec` convention, in the network's argument order.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LegacyExecArgs {
    pub fee: i128,
    pub fee_token: Address,
    pub creator: Address,
    pub use_treasury: bool,
    pub revert_on_failure: bool,
    pub resolver_hash: BytesN<32>,
    pub target: Address,
    pub payload: JobAction,
}

/// Registry entry stored under a job id.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TaskRecord {
    pub job_type: JobType,
    pub entity: Address,
}

/// Deployment configuration handed to `initialize`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct KeeperConfig {
    /// Keeper operator; creates and cancels jobs
    pub owner: Address,
    pub governance: Address,
    pub management: Address,
    /// The automation network's designated caller, paid on every execution
    pub executor: Address,
    /// Contract listing every production strategy
    pub lens: Address,
    /// Token fees are paid in; part of every job id
    pub fee_token: Address,
    /// Ceiling on the fee of a single execution
    pub max_fee: i128,
    /// Call cost handed to strategy triggers by the resolvers
    pub base_fee: i128,
    pub protocol: ExecutorProtocol,
}

/// Readiness report for a single strategy.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StrategyStatus {
    pub keeper: Address,
    /// Whether the strategy's keeper is this contract
    pub bound: bool,
    pub has_harvest_job: bool,
    pub has_tend_job: bool,
    /// Active job ids of the strategy, ordered by job type
    pub job_ids: Vec<BytesN<32>>,
    pub harvest_trigger: bool,
    pub tend_trigger: bool,
}
