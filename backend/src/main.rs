//! Mutant Mint CLI - claim mutants with serum and export collection holders
//!
//! # Main Commands
//!
//! ```bash
//! mutant-mint export-holders             # Write holders of the collection to nfts.csv
//! mutant-mint mint --quantity 2          # Approve serum if needed, then claim
//! mutant-mint status                     # Show approval and serum balance
//! mutant-mint serve                      # Start HTTP server (port 3000)
//! ```
//!
//! Configuration is read from the environment and `.env`
//! (`RPC_URL`, `SERUM_ADDRESS`, `WALLET_PRIVATE_KEY`, ...).

use alloy_primitives::Address;
use clap::{Parser, Subcommand};
use mutant_mint::api::init_logging;
use mutant_mint::{
    export_holders, AlloyCollection, AlloySerum, ChainClient, ChainConfig, MintFlow, MintOutcome,
    Notice, Quantity,
};
use mutant_mint_core::constants::DEFAULT_EXPORT_PATH;
use mutant_mint_core::{HolderSource, SerumToken};
use std::num::NonZeroU64;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "mutant-mint")]
#[command(about = "Claim mutants with serum and export collection holders", long_about = None)]
struct Cli {
    /// Show debug logs
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export the holders of a collection to CSV
    ExportHolders {
        /// Collection address (default: configured collection)
        #[arg(short, long)]
        contract: Option<Address>,

        /// Output file, overwritten if present
        #[arg(short, long, default_value = DEFAULT_EXPORT_PATH)]
        output: PathBuf,

        /// Token ids read per page
        #[arg(long)]
        page_size: Option<NonZeroU64>,
    },

    /// Approve the collection to burn serum if needed, then claim
    Mint {
        /// Number of mutants to claim
        #[arg(short, long, default_value = "1")]
        quantity: Quantity,
    },

    /// Show serum approval and balance for a wallet
    Status {
        /// Wallet to inspect (default: configured signer)
        #[arg(short, long)]
        wallet: Option<Address>,
    },

    /// Start HTTP server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_logging(if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    });

    let result = match ChainConfig::from_env() {
        Ok(config) => match cli.command {
            Commands::ExportHolders {
                contract,
                output,
                page_size,
            } => cmd_export_holders(&config, contract, &output, page_size).await,

            Commands::Mint { quantity } => cmd_mint(&config, quantity).await,

            Commands::Status { wallet } => cmd_status(&config, wallet).await,

            Commands::Serve { port } => cmd_serve(&config, port).await,
        },
        Err(e) => Err(e.into()),
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

async fn cmd_export_holders(
    config: &ChainConfig,
    contract: Option<Address>,
    output: &Path,
    page_size: Option<NonZeroU64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let contract = contract.unwrap_or(config.collection);
    let page_size = page_size.unwrap_or(config.page_size);

    let client = ChainClient::connect(config);
    let summary = export_holders(&client, contract, output, page_size).await?;

    eprintln!();
    eprintln!("📊 Export summary");
    eprintln!("   Contract:     {}", summary.contract);
    eprintln!("   Holders:      {}", summary.holders);
    eprintln!("   Tokens held:  {}", summary.tokens_held);
    eprintln!("   Burned:       {}", summary.burned);
    eprintln!("   Output:       {}", summary.output.display());

    Ok(())
}

async fn cmd_mint(config: &ChainConfig, quantity: Quantity) -> Result<(), Box<dyn std::error::Error>> {
    let serum_address = config.require_serum()?;
    let client = ChainClient::connect(config);

    let serum = AlloySerum::new(client.clone(), serum_address, config.serum_token_id);
    let collection = AlloyCollection::new(client.clone(), config.collection);
    // The flow's warn record already prints the notice to stderr
    let flow = MintFlow::new(serum, collection, |_: &Notice| {});

    eprintln!("🧬 Minting {} mutant(s)", quantity);
    match flow.mint(client.signer(), quantity).await? {
        MintOutcome::Claimed { approval, claim } => {
            if let Some(approval) = approval {
                eprintln!("   Approval tx:  {}", approval.tx_hash);
            }
            eprintln!("   Claim tx:     {}", claim.tx_hash);
            if let Some(block) = claim.block_number {
                eprintln!("   Block:        {}", block);
            }
            eprintln!("✅ Claimed {} mutant(s)", quantity);
        }
        MintOutcome::InsufficientBalance { .. } => {
            // Already reported through the notifier
        }
    }

    Ok(())
}

async fn cmd_status(
    config: &ChainConfig,
    wallet: Option<Address>,
) -> Result<(), Box<dyn std::error::Error>> {
    let wallet = wallet
        .or(config.signer_address())
        .ok_or("No wallet given: pass --wallet or set WALLET_PRIVATE_KEY")?;
    let serum_address = config.require_serum()?;

    let client = ChainClient::connect(config);
    let serum = AlloySerum::new(client.clone(), serum_address, config.serum_token_id);
    let collection = AlloyCollection::new(client, config.collection);

    let approved = serum.is_approved_for_all(wallet, config.collection).await?;
    let balance = serum.balance_of(wallet).await?;
    let minted = collection.token_count().await?;

    eprintln!("👛 Wallet {}", wallet);
    eprintln!("   Serum:        {} (token id {})", serum_address, serum.token_id());
    eprintln!("   Approved:     {}", if approved { "yes" } else { "no" });
    eprintln!("   Balance:      {}", balance);
    eprintln!("   Collection:   {} ({} minted)", config.collection, minted);

    Ok(())
}

async fn cmd_serve(config: &ChainConfig, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    mutant_mint::server::start_server(config, port).await?;
    Ok(())
}
