//! Campus CMS entry point.

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use campus_cms::{CmsConfig, ContactFields, ContentService, ProgramFilter, SearchScope, Selection};
use campus_cms_server::cli::{contact_cmd, content_cmd, output, programs_cmd, serve};

#[derive(Parser)]
#[command(
    name = "campus-cms",
    about = "Content access and fallback layer for the college website",
    version
)]
struct Cli {
    /// CMS REST base URL. Also reads CMS_API_URL.
    #[arg(long, global = true)]
    cms_url: Option<String>,

    /// Request timeout in seconds (0 disables). Also reads CMS_TIMEOUT_SECS.
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Print results as JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the JSON API over HTTP.
    Serve {
        /// Listen address (host:port).
        #[arg(long, default_value = "127.0.0.1:3000")]
        addr: String,
    },

    /// List programs, optionally filtered.
    Programs {
        /// Free-text search over title, description and body.
        #[arg(short, long)]
        search: Option<String>,

        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        campus: Option<String>,

        #[arg(long)]
        credential: Option<String>,
    },

    /// Show one program.
    Program {
        /// Program slug, e.g. `automotive-technology`.
        slug: String,
    },

    /// List campuses.
    Campuses,

    /// List posts.
    Posts {
        /// Category slug, e.g. `news` or `student-life`.
        #[arg(long)]
        category: Option<String>,

        #[arg(long, default_value_t = campus_cms::DEFAULT_POST_LIMIT)]
        limit: u32,
    },

    /// Search the site.
    Search {
        query: String,

        /// programs, posts or all.
        #[arg(long, default_value = "all")]
        scope: SearchScope,
    },

    /// Submit the contact form.
    Contact {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        phone: String,

        /// Campus key, e.g. `waco`.
        #[arg(long)]
        campus: String,

        /// Program of interest.
        #[arg(long)]
        program: Option<String>,

        #[arg(long)]
        message: String,
    },

    /// Generate shell completion scripts.
    ///
    /// Examples:
    ///   campus-cms completions bash > ~/.local/share/bash-completion/completions/campus-cms
    ///   campus-cms completions zsh > ~/.zfunc/_campus-cms
    Completions {
        /// Shell type (bash, zsh, fish, powershell, elvish).
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    output::init(cli.json);

    if let Commands::Completions { shell } = cli.command {
        let mut cmd = Cli::command();
        clap_complete::generate(shell, &mut cmd, "campus-cms", &mut std::io::stdout());
        return Ok(());
    }

    let config = CmsConfig::resolve(cli.cms_url.as_deref(), cli.timeout_secs);

    if let Err(e) = run(cli.command, &config).await {
        eprintln!("  Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run(command: Commands, config: &CmsConfig) -> anyhow::Result<()> {
    if let Commands::Serve { addr } = &command {
        return serve::run(config, addr).await;
    }

    let service = ContentService::from_config(config)?;

    match command {
        Commands::Programs {
            search,
            category,
            campus,
            credential,
        } => {
            let filter = ProgramFilter {
                search: search.unwrap_or_default(),
                category: Selection::from_option(category.as_deref()),
                campus: Selection::from_option(campus.as_deref()),
                credential: Selection::from_option(credential.as_deref()),
            };
            programs_cmd::list(&service, filter).await
        }

        Commands::Program { slug } => programs_cmd::show(&service, &slug).await,

        Commands::Campuses => content_cmd::campuses(&service).await,

        Commands::Posts { category, limit } => {
            content_cmd::posts(&service, category.as_deref(), limit).await
        }

        Commands::Search { query, scope } => content_cmd::search(&service, &query, scope).await,

        Commands::Contact {
            name,
            email,
            phone,
            campus,
            program,
            message,
        } => {
            let fields = ContactFields {
                name,
                email,
                phone,
                campus,
                program: program.unwrap_or_default(),
                message,
            };
            contact_cmd::run(&service, fields).await
        }

        Commands::Serve { .. } | Commands::Completions { .. } => Ok(()),
    }
}
