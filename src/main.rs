use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use is_terminal::IsTerminal;
use minus::Pager;
use reviewdiff::areas::session::Session;
use reviewdiff::artifacts::core::PagerWriter;
use reviewdiff::artifacts::core::config::{DEFAULT_CONTEXT_LINES, DiffConfig, DiffLimits};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "reviewdiff",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "Side-by-side diffs and interdiffs for code review",
    long_about = "This tool renders the diffs a code review shows: line alignment, \
    intra-line highlighting, collapsed context and interdiffs between two revisions \
    of the same change.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[arg(long, global = true, help = "Do not pipe the output through the pager")]
    no_pager: bool,
    #[arg(short, long, global = true, help = "Log pipeline details to stderr")]
    verbose: bool,
    #[arg(long, global = true, value_name = "N", help = "Maximum lines on either side of a diff")]
    max_lines: Option<usize>,
    #[arg(long, global = true, value_name = "N", help = "Maximum comparisons per matcher run")]
    max_comparisons: Option<u64>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Clone)]
struct DisplayArgs {
    #[arg(
        short = 'U',
        long = "unified",
        value_name = "N",
        default_value_t = DEFAULT_CONTEXT_LINES,
        help = "Unchanged lines kept around each change"
    )]
    context: usize,
    #[arg(long, help = "Show every line, without collapsing unchanged runs")]
    full: bool,
    #[arg(long, help = "Disable intra-line highlighting")]
    no_intraline: bool,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "diff",
        about = "Show a side-by-side diff of two files",
        long_about = "This command aligns the lines of two files, highlights changed words \
        inside replaced lines and hides unchanged runs beyond the context window."
    )]
    Diff {
        #[arg(index = 1, help = "The old version of the file")]
        old: PathBuf,
        #[arg(index = 2, help = "The new version of the file")]
        new: PathBuf,
        #[command(flatten)]
        display: DisplayArgs,
    },
    #[command(
        name = "interdiff",
        about = "Show what changed between two revisions of the same change",
        long_about = "This command diffs two revisions that were both made against ORIGINAL. \
        Regions both revisions changed the same way are shown as unchanged."
    )]
    Interdiff {
        #[arg(index = 1, help = "The file both revisions were made against")]
        original: PathBuf,
        #[arg(index = 2, help = "The revision already reviewed")]
        old: PathBuf,
        #[arg(index = 3, help = "The revision under review")]
        new: PathBuf,
        #[command(flatten)]
        display: DisplayArgs,
    },
    #[command(
        name = "opcodes",
        about = "Print the raw opcode script between two files",
        long_about = "This command prints one equal/insert/delete/replace opcode per line, \
        with half-open line ranges on both sides."
    )]
    Opcodes {
        #[arg(index = 1)]
        old: PathBuf,
        #[arg(index = 2)]
        new: PathBuf,
        #[arg(long, help = "Replay the opcodes over OLD and compare the result with NEW")]
        check: bool,
    },
    #[command(
        name = "batch",
        about = "Summarise the differences between two directory trees",
        long_about = "This command diffs every file present in either tree in parallel \
        and prints one line per file."
    )]
    Batch {
        #[arg(index = 1)]
        old_dir: PathBuf,
        #[arg(index = 2)]
        new_dir: PathBuf,
        #[command(flatten)]
        display: DisplayArgs,
    },
}

impl Cli {
    fn config(&self, display: Option<&DisplayArgs>) -> DiffConfig {
        let defaults = DiffLimits::default();
        let limits = DiffLimits {
            max_lines: self.max_lines.unwrap_or(defaults.max_lines),
            max_comparisons: self.max_comparisons.unwrap_or(defaults.max_comparisons),
            ..defaults
        };
        let config = DiffConfig::default().with_limits(limits);

        match display {
            Some(display) => config
                .with_context_lines((!display.full).then_some(display.context))
                .with_intraline(!display.no_intraline),
            None => config,
        }
    }

    fn use_pager(&self) -> bool {
        !self.no_pager && std::env::var_os("NO_PAGER").is_none() && std::io::stdout().is_terminal()
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let pager = cli.use_pager().then(Pager::new);
    let writer: Box<dyn std::io::Write> = match &pager {
        Some(pager) => Box::new(PagerWriter::new(pager.clone())),
        None => Box::new(std::io::stdout()),
    };

    match &cli.command {
        Commands::Diff { old, new, display } => {
            let session = Session::new(writer, cli.config(Some(display)));
            session.diff(old, new)?
        }
        Commands::Interdiff {
            original,
            old,
            new,
            display,
        } => {
            let session = Session::new(writer, cli.config(Some(display)));
            session.interdiff(original, old, new)?
        }
        Commands::Opcodes { old, new, check } => {
            let session = Session::new(writer, cli.config(None));
            session.opcodes(old, new, *check)?
        }
        Commands::Batch {
            old_dir,
            new_dir,
            display,
        } => {
            let session = Session::new(writer, cli.config(Some(display)));
            session.batch(old_dir, new_dir).await?
        }
    }

    if let Some(pager) = pager {
        minus::page_all(pager)?;
    }

    Ok(())
}
