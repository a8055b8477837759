mod commands;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "mailboot",
    version,
    about = "Installs the Windows scheduled tasks that autostart the mail-automation server"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the default settings file
    Init,
    /// Register the autostart task(s) with the Windows scheduler
    Install(InstallArgs),
    /// Remove the registered task(s); safe to re-run
    Uninstall,
    /// Show registration state for each configured task
    Status,
    /// Trigger an immediate run of the server task
    Run,
    /// Check prerequisites and registration health
    Doctor,
}

#[derive(Args)]
struct InstallArgs {
    /// Also register a task that launches Outlook at logon
    #[arg(long)]
    with_outlook: bool,
    /// Start the server task immediately, without prompting
    #[arg(long)]
    yes: bool,
    /// Skip the "start now" prompt and don't start the task
    #[arg(long, conflicts_with = "yes")]
    no_start: bool,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init => commands::init::execute(),
        Commands::Install(args) => {
            commands::install::execute(args.with_outlook, args.yes, args.no_start);
        }
        Commands::Uninstall => commands::uninstall::execute(),
        Commands::Status => commands::status::execute(),
        Commands::Run => commands::run::execute(),
        Commands::Doctor => commands::doctor::execute(),
    }
}
