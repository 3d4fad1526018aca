use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use muli_playlists::config::{AppConfig, CliConfig, FileConfig};
use muli_playlists::{DirEntry, EntryKind, PlaylistLibrary, SqliteNamespaceStore};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn parse_path(s: &str) -> Result<PathBuf> {
    let original_path = PathBuf::from(s);
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), "-", env!("GIT_HASH")))]
struct CliArgs {
    /// Path to a TOML config file, its values override the flags below.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// Path to the SQLite playlist store.
    #[clap(long, value_parser = parse_path)]
    pub db_path: Option<PathBuf>,

    /// Directory holding one drop directory per playlist.
    #[clap(long, value_parser = parse_path)]
    pub playlists_root: Option<PathBuf>,

    /// Mount point of the filesystem, anchors relative drop paths.
    #[clap(long, value_parser = parse_path)]
    pub mount_point: Option<PathBuf>,

    /// Number of read connections to the store.
    #[clap(long, default_value_t = muli_playlists::catalog_store::DEFAULT_READ_POOL_SIZE)]
    pub read_pool_size: usize,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Lists all playlists.
    Playlists,

    /// Lists the songs of a playlist, registered and dropped.
    Songs { playlist: String },

    /// Prints the path holding the bytes of a song.
    Resolve { playlist: String, song: String },

    /// Creates a playlist and its drop directory.
    Create { name: String },

    /// Registers a song of a playlist at an external location.
    AddSong {
        playlist: String,
        song: String,
        location: String,
    },
}

fn print_entries(entries: &[DirEntry]) {
    for entry in entries {
        let kind = match entry.kind {
            EntryKind::Directory => 'd',
            EntryKind::File => 'f',
        };
        println!("{} {}", kind, entry.name);
    }
}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    let file_config = cli_args
        .config
        .as_deref()
        .map(FileConfig::load)
        .transpose()?;
    let cli_config = CliConfig {
        db_path: cli_args.db_path.clone(),
        playlists_root: cli_args.playlists_root.clone(),
        mount_point: cli_args.mount_point.clone(),
        read_pool_size: cli_args.read_pool_size,
    };
    let config = AppConfig::resolve(&cli_config, file_config)?;
    debug!("Resolved config: {:?}", config);

    let store = SqliteNamespaceStore::open(&config.db_path, config.read_pool_size)
        .with_context(|| format!("Failed to open playlist store at {:?}", config.db_path))?;
    let library = PlaylistLibrary::new(Arc::new(store), &config.playlists_root);

    match cli_args.command {
        Command::Playlists => print_entries(&library.list_playlists()?),
        Command::Songs { playlist } => print_entries(&library.list_playlist_songs(&playlist)?),
        Command::Resolve { playlist, song } => {
            let path = library.resolve_song_path(&playlist, &song, &config.mount_point)?;
            println!("{}", path.display());
        }
        Command::Create { name } => {
            let name = library.create_playlist(&name)?;
            info!("Playlist {} ready", name);
            println!("{}", name);
        }
        Command::AddSong {
            playlist,
            song,
            location,
        } => library.add_song(&playlist, &song, &location)?,
    }

    Ok(())
}
