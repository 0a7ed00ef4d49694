use clap::{Parser, Subcommand, ValueEnum};
use overseerr_client::models::{MediaFilter, MediaKind, RequestFilter, SeasonSelection};
use overseerr_client::{
    ApiResponse, DEFAULT_LANGUAGE, MediaQuery, Overseerr, OverseerrConfig, OverseerrError,
    RequestQuery, UserQuery,
};
use std::fmt::Debug;
use std::process;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "overseerr", about = "Query and submit requests to an Overseerr instance")]
struct Cli {
    /// Host name or address of the instance
    #[arg(long, env = "OVERSEERR_HOST")]
    host: String,

    #[arg(long, env = "OVERSEERR_PORT")]
    port: Option<u16>,

    #[arg(long, env = "OVERSEERR_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Talk plain http instead of https
    #[arg(long, env = "OVERSEERR_NO_TLS")]
    no_tls: bool,

    /// Path prefix when the instance sits behind a reverse proxy
    #[arg(long, env = "OVERSEERR_BASE_PATH", default_value = "")]
    base_path: String,

    /// Request deadline in seconds
    #[arg(long, env = "OVERSEERR_TIMEOUT", default_value_t = 10)]
    timeout: u64,

    /// Print decoded models instead of the JSON the server sent
    #[arg(long)]
    typed: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Server version and update state
    Status,
    /// Configuration volume information
    Appdata,
    /// Search movies, shows and people
    Search {
        query: String,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value = DEFAULT_LANGUAGE)]
        language: String,
    },
    /// Trending movies and shows
    Trending {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value = DEFAULT_LANGUAGE)]
        language: String,
    },
    /// Plex watchlist of the key's user
    Watchlist {
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Media known to the server
    Media {
        #[arg(long, default_value_t = 20)]
        take: u32,
        #[arg(long, default_value_t = 0)]
        skip: u32,
        #[arg(long, value_enum)]
        filter: Option<MediaFilterArg>,
    },
    /// Movie details
    Movie {
        id: u32,
        #[arg(long, default_value = DEFAULT_LANGUAGE)]
        language: String,
    },
    /// TV show details
    Tv {
        id: u32,
        #[arg(long, default_value = DEFAULT_LANGUAGE)]
        language: String,
    },
    /// Existing requests
    Requests {
        #[arg(long, default_value_t = 20)]
        take: u32,
        #[arg(long, default_value_t = 0)]
        skip: u32,
        #[arg(long, value_enum)]
        filter: Option<RequestFilterArg>,
        /// Only requests made by this user id
        #[arg(long)]
        requested_by: Option<u32>,
    },
    /// Request a movie or show
    Request {
        /// Either `movie` or `tv`
        kind: String,
        id: u32,
        #[arg(long, value_enum, default_value = "all")]
        seasons: SeasonsArg,
    },
    /// One user by id, or the user listing
    Users {
        #[arg(long)]
        id: Option<u32>,
        #[arg(long, default_value_t = 20)]
        take: u32,
        #[arg(long, default_value_t = 0)]
        skip: u32,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SeasonsArg {
    All,
    First,
    Latest,
}

impl From<SeasonsArg> for SeasonSelection {
    fn from(value: SeasonsArg) -> Self {
        match value {
            SeasonsArg::All => SeasonSelection::All,
            SeasonsArg::First => SeasonSelection::First,
            SeasonsArg::Latest => SeasonSelection::Latest,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum MediaFilterArg {
    All,
    Available,
    Partial,
    Allavailable,
    Processing,
    Pending,
}

impl From<MediaFilterArg> for MediaFilter {
    fn from(value: MediaFilterArg) -> Self {
        match value {
            MediaFilterArg::All => MediaFilter::All,
            MediaFilterArg::Available => MediaFilter::Available,
            MediaFilterArg::Partial => MediaFilter::Partial,
            MediaFilterArg::Allavailable => MediaFilter::AllAvailable,
            MediaFilterArg::Processing => MediaFilter::Processing,
            MediaFilterArg::Pending => MediaFilter::Pending,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum RequestFilterArg {
    All,
    Approved,
    Available,
    Pending,
    Processing,
    Unavailable,
    Failed,
}

impl From<RequestFilterArg> for RequestFilter {
    fn from(value: RequestFilterArg) -> Self {
        match value {
            RequestFilterArg::All => RequestFilter::All,
            RequestFilterArg::Approved => RequestFilter::Approved,
            RequestFilterArg::Available => RequestFilter::Available,
            RequestFilterArg::Pending => RequestFilter::Pending,
            RequestFilterArg::Processing => RequestFilter::Processing,
            RequestFilterArg::Unavailable => RequestFilter::Unavailable,
            RequestFilterArg::Failed => RequestFilter::Failed,
        }
    }
}

/// Prints raw payloads as indented JSON and typed models in debug form
fn print_response<T: Debug>(response: ApiResponse<T>) {
    match response {
        ApiResponse::Raw(value) => println!("{value:#}"),
        ApiResponse::Typed(model) => println!("{model:#?}"),
    }
}

async fn run(cli: Cli) -> Result<(), OverseerrError> {
    let mut config = OverseerrConfig::new(cli.host, cli.api_key)
        .with_tls(!cli.no_tls)
        .with_base_path(cli.base_path)
        .with_timeout(Duration::from_secs(cli.timeout))
        .with_raw_response(!cli.typed);
    if let Some(port) = cli.port {
        config = config.with_port(port);
    }

    let client = Overseerr::new(config)?;

    match cli.command {
        Command::Status => print_response(client.status().get_status().await?),
        Command::Appdata => print_response(client.status().get_appdata().await?),
        Command::Search {
            query,
            page,
            language,
        } => print_response(client.search().search(&query, page, &language).await?),
        Command::Trending { page, language } => {
            print_response(client.discover().trending(page, &language).await?)
        }
        Command::Watchlist { page } => print_response(client.discover().watchlist(page).await?),
        Command::Media { take, skip, filter } => {
            let query = MediaQuery {
                take,
                skip,
                filter: filter.map(MediaFilter::from),
                ..MediaQuery::default()
            };
            print_response(client.media().list(&query).await?)
        }
        Command::Movie { id, language } => {
            print_response(client.movie().get(id, &language).await?)
        }
        Command::Tv { id, language } => print_response(client.tv().get(id, &language).await?),
        Command::Requests {
            take,
            skip,
            filter,
            requested_by,
        } => {
            let query = RequestQuery {
                take,
                skip,
                filter: filter.map(RequestFilter::from),
                requested_by,
                ..RequestQuery::default()
            };
            print_response(client.request().list(&query).await?)
        }
        Command::Request { kind, id, seasons } => {
            let kind: MediaKind = kind.parse()?;
            print_response(client.request().create(id, kind, seasons.into()).await?)
        }
        Command::Users { id, take, skip } => {
            let query = UserQuery {
                take,
                skip,
                ..UserQuery::default()
            };
            print_response(client.user().lookup(id, &query).await?)
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
