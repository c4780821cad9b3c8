mod commands;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::commands::Context;

#[derive(Parser)]
#[command(name = "elite")]
#[command(about = "Your ELITE dashboard in the terminal: assistant, calendar, prospects, subscriptions and ledger")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Unlock the dashboard with the shared secret
    Connect {
        #[arg(short, long)]
        secret: String,
    },
    /// Lock the dashboard again
    Logout,
    /// Connection state and home page figures
    Status,
    /// Ask the assistant a single question
    Ask {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Chat with the assistant (one message per line, Ctrl-D to quit)
    Chat,
    /// Show the calendar with reminder counts
    Calendar {
        /// Month to display (YYYY-MM); defaults to the selected date's month
        #[arg(short, long)]
        month: Option<String>,

        /// Selected date (YYYY-MM-DD); defaults to today
        #[arg(short, long)]
        select: Option<String>,

        /// Show the whole month instead of the selected week
        #[arg(long)]
        monthly: bool,

        /// Print the day cells as JSON
        #[arg(long)]
        json: bool,
    },
    /// Call reminders
    Remind {
        #[command(subcommand)]
        action: RemindCommand,
    },
    /// Prospects: add, remove, list with filters
    Prospect {
        #[command(subcommand)]
        action: ProspectCommand,
    },
    /// Subscriptions, domains and app projects
    Sub {
        #[command(subcommand)]
        action: SubCommand,
    },
    /// Record or remove expenses
    Expense {
        #[command(subcommand)]
        action: ExpenseCommand,
    },
    /// Record or remove incomes
    Income {
        #[command(subcommand)]
        action: IncomeCommand,
    },
    /// Show the ledger
    Ledger {
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum RemindCommand {
    /// Schedule a call reminder
    Add {
        title: String,

        /// Day of the call (YYYY-MM-DD)
        #[arg(short, long)]
        date: String,

        /// Time of the call (HH:MM)
        #[arg(short, long)]
        time: Option<String>,

        /// Who the call is with
        #[arg(short, long)]
        with: Option<String>,

        /// Duration in minutes
        #[arg(long)]
        duration: Option<u32>,
    },
    /// Active and completed reminders
    List,
    /// Mark a reminder done, or active again
    Done { id: String },
    /// Delete a reminder
    Rm { id: String },
}

#[derive(Subcommand)]
enum ProspectCommand {
    /// Add a prospect dated today
    Add {
        name: String,

        /// hot, cold or in-progress (default hot)
        #[arg(short, long)]
        status: Option<String>,

        /// Where the lead came from (default Direct)
        #[arg(long)]
        source: Option<String>,

        #[arg(short, long)]
        phone: Option<String>,
    },
    /// List prospects, optionally filtered
    List {
        #[arg(short, long)]
        status: Option<String>,

        /// Matches name, source or phone
        #[arg(long)]
        search: Option<String>,
    },
    /// Delete a prospect
    Rm { id: String },
}

#[derive(Subcommand)]
enum SubCommand {
    /// Add a monthly subscription
    Add {
        name: String,
        amount: f64,

        /// Billing day (default 1)
        #[arg(short, long)]
        billing: Option<String>,

        #[arg(short, long)]
        category: Option<String>,
    },
    /// Add a yearly domain
    Domain {
        name: String,

        /// Yearly price (default 12)
        #[arg(short, long)]
        amount: Option<f64>,

        /// Expiration date (YYYY-MM-DD)
        #[arg(short, long)]
        expires: Option<String>,
    },
    /// Add an app project
    App {
        name: String,

        #[arg(short, long)]
        objective: Option<String>,

        /// Estimated monthly revenue
        #[arg(short, long)]
        revenue: Option<f64>,
    },
    /// Totals, subscriptions, domains and apps
    List {
        #[arg(long)]
        json: bool,
    },
    /// Delete a subscription or domain
    Rm { id: String },
}

#[derive(Subcommand)]
enum ExpenseCommand {
    /// Record an expense dated today
    Add {
        label: String,
        amount: f64,

        #[arg(short, long)]
        category: Option<String>,
    },
    /// Delete an expense
    Rm { id: String },
}

#[derive(Subcommand)]
enum IncomeCommand {
    /// Record an income dated today
    Add {
        label: String,
        amount: f64,

        #[arg(short, long)]
        source: Option<String>,

        /// Also add the amount to current savings
        #[arg(long)]
        save: bool,
    },
    /// Delete an income; savings are unchanged
    Rm { id: String },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("ELITE_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let mut ctx = Context::load()?;

    match cli.command {
        Commands::Connect { secret } => commands::auth::connect(&mut ctx, &secret),
        Commands::Logout => commands::auth::logout(&mut ctx),
        Commands::Status => {
            ctx.require_connected()?;
            commands::auth::status(&ctx)
        }
        Commands::Ask { text } => commands::chat::ask(&text.join(" ")),
        Commands::Chat => {
            ctx.require_connected()?;
            commands::chat::run(&ctx).await
        }
        Commands::Calendar {
            month,
            select,
            monthly,
            json,
        } => {
            ctx.require_connected()?;
            commands::calendar::show(&ctx, month.as_deref(), select.as_deref(), monthly, json)
        }
        Commands::Remind { action } => {
            ctx.require_connected()?;
            match action {
                RemindCommand::Add {
                    title,
                    date,
                    time,
                    with,
                    duration,
                } => commands::calendar::remind(
                    &mut ctx,
                    &title,
                    &date,
                    time.as_deref(),
                    with,
                    duration,
                ),
                RemindCommand::List => commands::calendar::list(&ctx),
                RemindCommand::Done { id } => commands::calendar::toggle(&mut ctx, &id),
                RemindCommand::Rm { id } => commands::calendar::remove(&mut ctx, &id),
            }
        }
        Commands::Prospect { action } => {
            ctx.require_connected()?;
            match action {
                ProspectCommand::Add {
                    name,
                    status,
                    source,
                    phone,
                } => commands::prospect::add(
                    &mut ctx,
                    &name,
                    status.as_deref(),
                    source.as_deref(),
                    phone.as_deref(),
                ),
                ProspectCommand::List { status, search } => {
                    commands::prospect::list(&ctx, status.as_deref(), search.as_deref())
                }
                ProspectCommand::Rm { id } => commands::prospect::remove(&mut ctx, &id),
            }
        }
        Commands::Sub { action } => {
            ctx.require_connected()?;
            match action {
                SubCommand::Add {
                    name,
                    amount,
                    billing,
                    category,
                } => commands::subscription::add(
                    &mut ctx,
                    &name,
                    amount,
                    billing.as_deref(),
                    category.as_deref(),
                ),
                SubCommand::Domain {
                    name,
                    amount,
                    expires,
                } => commands::subscription::add_domain(&mut ctx, &name, amount, expires.as_deref()),
                SubCommand::App {
                    name,
                    objective,
                    revenue,
                } => commands::subscription::add_app(&mut ctx, &name, objective.as_deref(), revenue),
                SubCommand::List { json } => commands::subscription::list(&ctx, json),
                SubCommand::Rm { id } => commands::subscription::remove(&mut ctx, &id),
            }
        }
        Commands::Expense { action } => {
            ctx.require_connected()?;
            match action {
                ExpenseCommand::Add {
                    label,
                    amount,
                    category,
                } => commands::ledger::expense(&mut ctx, &label, amount, category.as_deref()),
                ExpenseCommand::Rm { id } => commands::ledger::remove_expense(&mut ctx, &id),
            }
        }
        Commands::Income { action } => {
            ctx.require_connected()?;
            match action {
                IncomeCommand::Add {
                    label,
                    amount,
                    source,
                    save,
                } => commands::ledger::income(&mut ctx, &label, amount, source.as_deref(), save),
                IncomeCommand::Rm { id } => commands::ledger::remove_income(&mut ctx, &id),
            }
        }
        Commands::Ledger { json } => {
            ctx.require_connected()?;
            commands::ledger::show(&ctx, json)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn nested_subcommands_parse() {
        let cli = Cli::try_parse_from(["elite", "remind", "add", "Appel", "-d", "2025-01-15"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Remind {
                action: RemindCommand::Add { ref title, .. }
            } if title == "Appel"
        ));

        let cli = Cli::try_parse_from(["elite", "sub", "domain", "elite.fr", "-e", "2027-01-01"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Sub {
                action: SubCommand::Domain { amount: None, .. }
            }
        ));

        assert!(Cli::try_parse_from(["elite", "expense", "add", "Cafe", "abc"]).is_err());
    }
}
