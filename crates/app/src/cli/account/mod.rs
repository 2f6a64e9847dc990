use clap::{Args, Subcommand};

mod create;
mod staff;

#[derive(Debug, Args)]
pub(crate) struct AccountCommand {
    #[command(subcommand)]
    command: AccountSubcommand,
}

#[derive(Debug, Subcommand)]
enum AccountSubcommand {
    /// Register an account and print its API token
    Create(create::CreateAccountArgs),

    /// Grant or revoke the staff capability
    Staff(staff::SetStaffArgs),
}

pub(crate) async fn run(command: AccountCommand) -> Result<(), String> {
    match command.command {
        AccountSubcommand::Create(args) => create::run(args).await,
        AccountSubcommand::Staff(args) => staff::run(args).await,
    }
}
