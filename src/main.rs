//! Helium address CLI
//!
//! A command-line interface for inspecting addresses and working with
//! multisig addresses and signatures.

use clap::{Parser, Subcommand};
use helium_address::cli::{self, CliConfig};

#[derive(Parser)]
#[command(name = "helium-address")]
#[command(author = "Darshan")]
#[command(version = "0.1.0")]
#[command(about = "Helium-style addresses and M-of-N multisig signatures", long_about = None)]
struct Cli {
    /// Derive testnet addresses instead of mainnet
    #[arg(long, global = true)]
    testnet: bool,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Address operations
    Address {
        #[command(subcommand)]
        action: AddressCommands,
    },

    /// Key pair operations
    Keypair {
        #[command(subcommand)]
        action: KeypairCommands,
    },

    /// Multisig operations
    Multisig {
        #[command(subcommand)]
        action: MultisigCommands,
    },
}

#[derive(Subcommand)]
enum AddressCommands {
    /// Decode and describe a Base58Check address
    Inspect {
        /// Address to inspect
        address: String,
    },

    /// Check whether an address is valid
    Validate {
        /// Address to validate
        address: String,
    },

    /// Decode a hex-encoded binary address
    FromBin {
        /// Binary address as hex
        bin: String,
    },
}

#[derive(Subcommand)]
enum KeypairCommands {
    /// Generate a new ed25519 key pair
    New {
        /// Import from a 32-byte hex seed instead of generating
        #[arg(short, long)]
        seed: Option<String>,
    },
}

#[derive(Subcommand)]
enum MultisigCommands {
    /// Derive an M-of-N multisig address
    Create {
        /// Required signatures
        #[arg(short, long)]
        m: u8,

        /// Signer addresses (repeat or comma-separate)
        #[arg(short, long = "signer", value_delimiter = ',', required = true)]
        signers: Vec<String>,
    },

    /// Decode and describe a multisig address
    Inspect {
        /// Multisig address to inspect
        address: String,
    },

    /// Sign a message with member keys and emit the multisig signature
    Sign {
        /// Multisig address
        #[arg(short, long)]
        address: String,

        /// All signer addresses of the group
        #[arg(short, long = "signer", value_delimiter = ',', required = true)]
        signers: Vec<String>,

        /// Hex seeds of the members signing now
        #[arg(short, long = "key", value_delimiter = ',', required = true)]
        keys: Vec<String>,

        /// Message as hex
        #[arg(long)]
        message: String,
    },

    /// Verify a serialized multisig signature
    Verify {
        /// Multisig address
        #[arg(short, long)]
        address: String,

        /// Serialized multisig signature as hex
        #[arg(long)]
        signature: String,

        /// Message as hex
        #[arg(long)]
        message: String,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = CliConfig::new(cli.testnet, cli.json);

    match cli.command {
        Commands::Address { action } => match action {
            AddressCommands::Inspect { address } => {
                cli::cmd_address_inspect(&config, &address)?;
            }
            AddressCommands::Validate { address } => {
                if !cli::cmd_address_validate(&config, &address)? {
                    std::process::exit(1);
                }
            }
            AddressCommands::FromBin { bin } => {
                cli::cmd_address_from_bin(&config, &bin)?;
            }
        },

        Commands::Keypair { action } => match action {
            KeypairCommands::New { seed } => {
                cli::cmd_keypair_new(&config, seed.as_deref())?;
            }
        },

        Commands::Multisig { action } => match action {
            MultisigCommands::Create { m, signers } => {
                cli::cmd_multisig_create(&config, &signers, m)?;
            }
            MultisigCommands::Inspect { address } => {
                cli::cmd_multisig_inspect(&config, &address)?;
            }
            MultisigCommands::Sign {
                address,
                signers,
                keys,
                message,
            } => {
                cli::cmd_multisig_sign(&config, &address, &signers, &keys, &message)?;
            }
            MultisigCommands::Verify {
                address,
                signature,
                message,
            } => {
                if !cli::cmd_multisig_verify(&config, &address, &signature, &message)? {
                    std::process::exit(1);
                }
            }
        },
    }

    Ok(())
}
