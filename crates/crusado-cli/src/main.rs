mod cmd;
mod output;

use clap::{Parser, Subcommand};
use crusado_core::config::{self, Config};
use output::OutputFormat;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "crusado",
    about = "Create Azure DevOps user stories, bugs and tasks from templates",
    version,
    propagate_version = true
)]
struct Cli {
    /// Directory holding the Markdown and YAML templates
    #[arg(
        long,
        global = true,
        env = config::TEMPLATES_DIR_ENV,
        default_value = config::DEFAULT_TEMPLATES_DIR
    )]
    templates_dir: PathBuf,

    /// Organization url, e.g. https://dev.azure.com/acme
    #[arg(long, global = true, env = config::ORG_URL_ENV)]
    org_url: Option<String>,

    /// Personal access token with work item read & write scope
    #[arg(long, global = true, env = config::TOKEN_ENV, hide_env_values = true)]
    token: Option<String>,

    /// Project to create work items in
    #[arg(long, global = true, env = config::PROJECT_ENV)]
    project: Option<String>,

    /// Team whose iterations are used (default: the project's default team)
    #[arg(long, global = true, env = config::TEAM_ENV)]
    team: Option<String>,

    /// Output format
    #[arg(long, short = 'o', global = true, value_enum, default_value_t = OutputFormat::Table)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available templates
    List,

    /// Show a single template with all of its tasks
    Show { name: String },

    /// Create the work items described by a template
    Apply {
        name: String,

        /// Only validate the work items, don't create them
        #[arg(long, short = 'd')]
        dry_run: bool,

        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,

        /// Iteration relative to the current one: 1 is the next, -1 the previous
        #[arg(
            long,
            short = 'i',
            default_value_t = 1,
            allow_negative_numbers = true
        )]
        iteration_offset: i64,
    },

    /// Check all templates and report every problem
    Validate,

    /// List the team's iterations and their offsets
    Iterations,
}

impl Cli {
    fn config(&self) -> Config {
        Config {
            organization_url: self.org_url.clone(),
            personal_access_token: self.token.clone(),
            project: self.project.clone(),
            team: self.team.clone(),
            templates_dir: self.templates_dir.clone(),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = cli.config();
    let output = cli.output;

    let result = match cli.command {
        Commands::List => cmd::list::run(&config, output),
        Commands::Show { name } => cmd::show::run(&config, &name, output),
        Commands::Apply {
            name,
            dry_run,
            yes,
            iteration_offset,
        } => cmd::apply::run(
            &config,
            &cmd::apply::ApplyArgs {
                name,
                dry_run,
                auto_approve: yes,
                iteration_offset,
            },
        ),
        Commands::Validate => cmd::validate::run(&config, output),
        Commands::Iterations => cmd::iterations::run(&config, output),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
