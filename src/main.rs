use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use spotidal::{
    cli::{self, PlaylistArgs},
    config, error,
    types::{DuplicatePolicy, Service},
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Log in to Spotify or Tidal and cache the token
    Auth(AuthOptions),

    /// Transfer liked songs to the Tidal favorites
    Likes(LikesOptions),

    /// Transfer playlists
    Playlists(PlaylistsOptions),

    /// Transfer playlists, then liked songs
    All(AllOptions),

    /// Preview the first N liked songs without transferring
    Preview(PreviewOptions),

    /// Test the Spotify and Tidal connections
    Test,

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct AuthOptions {
    /// Service to log in to
    #[clap(value_enum)]
    pub service: Service,
}

#[derive(Parser, Debug, Clone)]
pub struct LikesOptions {
    /// Only transfer the first N songs
    #[clap(long, value_name = "N")]
    pub limit: Option<usize>,

    /// Skip the confirmation prompt
    #[clap(long, short)]
    pub yes: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct PlaylistsOptions {
    /// Transfer all playlists without asking
    #[clap(long)]
    pub all: bool,

    /// Limit number of playlists to fetch
    #[clap(long, value_name = "N")]
    pub playlist_limit: Option<usize>,

    /// Create playlists even if one with the same name exists on Tidal
    #[clap(long)]
    pub overwrite: bool,

    /// What to do with playlists that already exist on Tidal
    #[clap(long, value_enum)]
    pub on_duplicate: Option<DuplicatePolicy>,

    /// Skip the confirmation prompt
    #[clap(long, short)]
    pub yes: bool,
}

impl From<PlaylistsOptions> for PlaylistArgs {
    fn from(opt: PlaylistsOptions) -> Self {
        PlaylistArgs {
            all: opt.all,
            playlist_limit: opt.playlist_limit,
            overwrite: opt.overwrite,
            on_duplicate: opt.on_duplicate,
            yes: opt.yes,
        }
    }
}

#[derive(Parser, Debug, Clone)]
pub struct AllOptions {
    #[clap(flatten)]
    pub playlists: PlaylistsOptions,

    /// Only transfer the first N liked songs
    #[clap(long, value_name = "N")]
    pub limit: Option<usize>,
}

#[derive(Parser, Debug, Clone)]
pub struct PreviewOptions {
    /// Number of songs to show
    #[clap(value_name = "N")]
    pub count: usize,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    let code = match cli.command {
        Command::Auth(opt) => {
            cli::auth(opt.service).await;
            cli::EXIT_SUCCESS
        }
        Command::Likes(opt) => cli::likes(opt.limit, opt.yes).await,
        Command::Playlists(opt) => cli::playlists(opt.into()).await,
        Command::All(opt) => cli::all(opt.playlists.into(), opt.limit).await,
        Command::Preview(opt) => cli::preview(opt.count).await,
        Command::Test => cli::test_connections().await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
            cli::EXIT_SUCCESS
        }
    };

    std::process::exit(code);
}
