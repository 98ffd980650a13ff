use clap::{Parser, Subcommand};
use envault::cli::{
    create_configuration, fetch_and_restore, list_configurations, remove_configuration,
    store_configuration,
};
use envault::secret::resolve_secret;
use envault::store::{Store, StoreConfig};
use std::path::PathBuf;
use std::process::ExitCode;

/// Version info from build.rs
const VERSION: &str = env!("ENVAULT_VERSION");
const BUILD: &str = env!("ENVAULT_BUILD");
const PROFILE: &str = env!("ENVAULT_PROFILE");
const GIT_HASH: &str = env!("ENVAULT_GIT_HASH");

/// Combined version string (compile-time concatenation not possible, so we build at runtime)
fn get_version() -> &'static str {
    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();
    VERSION_STRING.get_or_init(|| format!("{} {} build {} ({})", PROFILE, VERSION, BUILD, GIT_HASH))
}

#[derive(Parser)]
#[command(name = "envault")]
#[command(author, about = "Encrypted at-rest storage for environment configuration files", long_about = None)]
struct Cli {
    /// Print version
    #[arg(short = 'V', long)]
    version: bool,

    /// Storage folder (defaults to .env-manager in the working directory)
    #[arg(long, global = true)]
    folder: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Store an environment file that carries a header block
    #[command(alias = "a")]
    Add {
        /// Environment file to store
        file: PathBuf,
    },

    /// Restore a stored configuration to the working directory
    #[command(alias = "g")]
    Get {
        /// Identifier of the configuration
        identifier: String,
    },

    /// List stored configurations
    #[command(alias = "l")]
    List,

    /// Store a headerless file under an explicit identifier
    #[command(alias = "c")]
    Create {
        /// Source file to store
        file: PathBuf,

        /// Identifier for the configuration
        #[arg(short, long)]
        identifier: String,

        /// Filename to restore the configuration as (default: .env)
        #[arg(short, long)]
        restore_as: Option<String>,
    },

    /// Remove a stored configuration
    #[command(alias = "rm")]
    Remove {
        /// Identifier of the configuration
        identifier: String,
    },
}

fn store_config(folder: Option<PathBuf>) -> StoreConfig {
    match folder {
        Some(folder) => StoreConfig::at(folder),
        None => StoreConfig::default(),
    }
}

fn run(command: Commands, config: StoreConfig) -> envault::Result<()> {
    match command {
        Commands::Add { file } => {
            let secret = resolve_secret()?;
            let mut store = Store::open(config)?;
            let id = store_configuration(&mut store, &file, secret.as_bytes())?;
            println!("Stored {} as '{}'", file.display(), id);
        }

        Commands::Get { identifier } => {
            let secret = resolve_secret()?;
            let store = Store::open(config)?;
            let dest = std::env::current_dir()?;
            let restored = fetch_and_restore(&store, &identifier, &dest, secret.as_bytes())?;
            println!("Restored '{}' as {}", identifier, restored.display());
        }

        Commands::List => {
            let store = Store::open(config)?;
            let entries = list_configurations(&store);
            println!("Found {} configuration(s)", entries.len());
            for entry in entries {
                println!("  {} (from {})", entry.identifier, entry.source);
                if !entry.present {
                    eprintln!(
                        "Warning: ciphertext file for '{}' is missing",
                        entry.identifier
                    );
                }
            }
        }

        Commands::Create {
            file,
            identifier,
            restore_as,
        } => {
            let secret = resolve_secret()?;
            let mut store = Store::open(config)?;
            let id =
                create_configuration(&mut store, &file, &identifier, restore_as, secret.as_bytes())?;
            println!("Created '{}' from {}", id, file.display());
        }

        Commands::Remove { identifier } => {
            let mut store = Store::open(config)?;
            match remove_configuration(&mut store, &identifier)? {
                Some(path) => println!("Removed '{}' ({})", identifier, path.display()),
                None => {
                    println!("Removed '{}'", identifier);
                    eprintln!(
                        "Warning: ciphertext file for '{}' was already gone",
                        identifier
                    );
                }
            }
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Handle --version flag
    if cli.version {
        println!("envault {}", get_version());
        return ExitCode::SUCCESS;
    }

    // Require a command if not showing version
    let command = match cli.command {
        Some(cmd) => cmd,
        None => {
            // Show help when no command provided
            use clap::CommandFactory;
            Cli::command().print_help().unwrap();
            println!();
            return ExitCode::SUCCESS;
        }
    };

    match run(command, store_config(cli.folder)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
