use clap::{ArgAction, Args};
use storefront_app::{
    database::{self, Db},
    domain::accounts::{AccountsService, DEFAULT_WALLET, PgAccountsService},
};

#[derive(Debug, Args)]
pub(crate) struct SetStaffArgs {
    /// Account to change
    #[arg(long)]
    username: String,

    /// `true` grants staff, `false` revokes it
    #[arg(long, action = ArgAction::Set)]
    enabled: bool,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: SetStaffArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let account = PgAccountsService::new(Db::new(pool), DEFAULT_WALLET)
        .set_staff(&args.username, args.enabled)
        .await
        .map_err(|error| format!("failed to update account: {error}"))?;

    println!("account_uuid: {}", account.uuid);
    println!("username: {}", account.username);
    println!("staff: {}", account.staff);

    Ok(())
}
