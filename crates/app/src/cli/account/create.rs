use clap::Args;
use storefront_app::{
    auth::{hash_api_token, issue_api_token, parse_api_token},
    database::{self, Db},
    domain::accounts::{
        AccountsService, DEFAULT_WALLET, PgAccountsService, data::NewAccount,
        records::AccountUuid,
    },
};

#[derive(Debug, Args)]
pub(crate) struct CreateAccountArgs {
    /// Unique account name
    #[arg(long)]
    username: String,

    /// Grant the staff capability
    #[arg(long)]
    staff: bool,

    /// Optional pre-issued API token; generated when omitted
    #[arg(long)]
    token: Option<String>,

    /// Starting wallet balance in minor currency units
    #[arg(long, env = "DEFAULT_WALLET", default_value_t = DEFAULT_WALLET)]
    default_wallet: u64,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: CreateAccountArgs) -> Result<(), String> {
    // A supplied token already names the account it belongs to.
    let (uuid, token) = match args.token {
        Some(token) => {
            let parsed =
                parse_api_token(&token).map_err(|error| format!("invalid token: {error}"))?;

            (parsed.account_uuid, token)
        }
        None => {
            let uuid = AccountUuid::new();

            (uuid, issue_api_token(uuid).token)
        }
    };

    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgAccountsService::new(Db::new(pool), args.default_wallet);

    let account = service
        .register(NewAccount {
            uuid,
            username: args.username,
            token_hash: hash_api_token(&token),
            staff: args.staff,
        })
        .await
        .map_err(|error| format!("failed to create account: {error}"))?;

    println!("account_uuid: {}", account.uuid);
    println!("username: {}", account.username);
    println!("staff: {}", account.staff);
    println!("wallet: {}", account.wallet);
    println!("api_token: {token}");
    println!("store this token now; it is only shown once");

    Ok(())
}
