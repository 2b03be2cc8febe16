extern crate std;

use soroban_sdk::{
    testutils::{Address as _, Events},
    token::{StellarAssetClient, TokenClient},
    Address, Env, Symbol, TryFromVal, Val,
};

use crate::{
    ExecArgs, ExecutorProtocol, JobAction, JobType, KeeperConfig, LegacyExecArgs, YearnKeeperOps,
    YearnKeeperOpsClient,
};


mod job_id;

use mock_lens::{MockLens, MockLensClient};
use mock_strategy::{MockStrategy, MockStrategyClient};

/// One fee token unit (7 decimals).
pub const UNIT: i128 = 10_000_000;
/// Keeper funding at deployment: 50 units.
pub const FUNDING: i128 = 50 * UNIT;
/// Fee ceiling: 0.01 units.
pub const MAX_FEE: i128 = UNIT / 100;
/// Fee charged by the executor in tests: 0.001 units.
pub const EXEC_FEE: i128 = UNIT / 1_000;
/// Call cost handed to strategy triggers.
pub const BASE_FEE: i128 = 1_000;

/// A funded keeper with its roles, lens and fee token.
pub struct Setup<'a> {
    pub env: Env,
    pub keeper: YearnKeeperOpsClient<'a>,
    pub owner: Address,
    pub governance: Address,
    pub management: Address,
    pub executor: Address,
    pub strategy_management: Address,
    pub lens: MockLensClient<'a>,
    pub fee_token: TokenClient<'a>,
    pub fee_token_admin: StellarAssetClient<'a>,
}

impl<'a> Setup<'a> {
    pub fn new() -> Self {
        Self::with_protocol(ExecutorProtocol::Current)
    }

    pub fn with_protocol(protocol: ExecutorProtocol) -> Self {
        let env = Env::default();
        env.mock_all_auths();

        let owner = Address::generate(&env);
        let governance = Address::generate(&env);
        let management = Address::generate(&env);
        let executor = Address::generate(&env);
        let strategy_management = Address::generate(&env);

        let lens = MockLensClient::new(&env, &env.register_contract(None, MockLens));
        let (fee_token, fee_token_admin) = create_token(&env);

        let keeper_id = env.register_contract(None, YearnKeeperOps);
        let keeper = YearnKeeperOpsClient::new(&env, &keeper_id);
        keeper.initialize(&KeeperConfig {
            owner: owner.clone(),
            governance: governance.clone(),
            management: management.clone(),
            executor: executor.clone(),
            lens: lens.address.clone(),
            fee_token: fee_token.address.clone(),
            max_fee: MAX_FEE,
            base_fee: BASE_FEE,
            protocol,
        });

        fee_token_admin.mint(&keeper_id, &FUNDING);

        Setup {
            env,
            keeper,
            owner,
            governance,
            management,
            executor,
            strategy_management,
            lens,
            fee_token,
            fee_token_admin,
        }
    }

    /// Registers a strategy listed by the lens whose keeper is someone else.
    pub fn strategy(&self) -> MockStrategyClient<'a> {
        let strategy = MockStrategyClient::new(
            &self.env,
            &self.env.register_contract(None, MockStrategy),
        );
        strategy.init(&self.strategy_management, &Address::generate(&self.env));
        self.lens.add_strategy(&strategy.address);
        strategy
    }

    /// Makes the keeper contract the strategy's keeper.
    pub fn onboard(&self, strategy: &MockStrategyClient) {
        strategy.set_keeper(&self.keeper.address);
    }

    /// Strategy onboarded with a harvest job in place.
    pub fn automated_strategy(&self) -> MockStrategyClient<'a> {
        let strategy = self.strategy();
        self.onboard(&strategy);
        self.keeper
            .create_job(&self.owner, &JobType::Harvest, &strategy.address);
        strategy
    }

    /// Current-protocol arguments for the job `payload` belongs to.
    pub fn exec_args(&self, payload: JobAction, fee: i128) -> ExecArgs {
        let job_type = payload.job_type();
        let entity = match job_type {
            JobType::Monitor => self.keeper.address.clone(),
            _ => payload.strategy().clone(),
        };
        ExecArgs {
            creator: self.keeper.address.clone(),
            target: self.keeper.address.clone(),
            module_data: self.keeper.job_module_data(&job_type, &entity),
            payload,
            fee,
            fee_token: self.fee_token.address.clone(),
            use_treasury: false,
            revert_on_failure: true,
        }
    }

    /// Legacy-protocol arguments for the job `payload` belongs to.
    pub fn legacy_exec_args(&self, payload: JobAction, fee: i128) -> LegacyExecArgs {
        let job_type = payload.job_type();
        let entity = match job_type {
            JobType::Monitor => self.keeper.address.clone(),
            _ => payload.strategy().clone(),
        };
        LegacyExecArgs {
            fee,
            fee_token: self.fee_token.address.clone(),
            creator: self.keeper.address.clone(),
            use_treasury: false,
            revert_on_failure: true,
            resolver_hash: self.keeper.job_resolver_hash(&job_type, &entity),
            target: self.keeper.address.clone(),
            payload,
        }
    }

    pub fn keeper_balance(&self) -> i128 {
        self.fee_token.balance(&self.keeper.address)
    }
}

pub fn create_token<'a>(env: &Env) -> (TokenClient<'a>, StellarAssetClient<'a>) {
    let admin = Address::generate(env);
    let address = env.register_stellar_asset_contract_v2(admin).address();
    (
        TokenClient::new(env, &address),
        StellarAssetClient::new(env, &address),
    )
}

/// Payloads of the events published under `topic` by the last invocation.
pub fn events_named<T>(env: &Env, topic: Symbol) -> std::vec::Vec<T>
where
    T: TryFromVal<Env, Val>,
{
    let mut found = std::vec::Vec::new();
    for (_contract, topics, data) in env.events().all().iter() {
        let first = topics
            .get(0)
            .and_then(|t| Symbol::try_from_val(env, &t).ok());
        if first == Some(topic.clone()) {
            if let Ok(event) = T::try_from_val(env, &data) {
                found.push(event);
            }
        }
    }
    found
}
