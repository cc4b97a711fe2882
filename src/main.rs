use std::{
    fs,
    path::{Path, PathBuf},
};

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{eyre, Result, WrapErr};
use serde::Serialize;
use tracing::info;

use ledger_client::{
    config::KEY_FILE_ENV, transfer::TransferRequest, transfer::TRANSFER_COMMAND, ClientConfig,
    KeyPair, LedgerClient, Outcome, ReqwestTransport,
};

#[derive(Parser, Debug)]
#[command(name = "ledger", version, about = "Ledger API client (domains, assets, transfers, history)")]
struct Cli {
    /// API base URL (overrides config file and LEDGER_ENDPOINT)
    #[arg(long, global = true)]
    endpoint: Option<String>,
    /// JSON config file with endpoint, timeout_secs, user_agent
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// HTTP timeout in seconds
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,
    /// Hex secret key file (defaults to LEDGER_KEY_FILE)
    #[arg(long, global = true)]
    key_file: Option<PathBuf>,
    /// Debug logging for this crate
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a key pair: sk.hex (secret) and pk.b64 (public)
    Keygen {
        #[arg(long)]
        out_dir: PathBuf,
    },
    RegisterDomain {
        name: String,
    },
    RegisterAsset {
        name: String,
        #[arg(long)]
        domain: String,
    },
    Domains,
    Assets {
        domain: String,
    },
    /// Transfer an amount of an asset to a receiver's public key
    Transfer {
        #[arg(long)]
        asset_uuid: String,
        #[arg(long)]
        receiver: String,
        #[arg(long)]
        amount: String,
        #[arg(long, default_value = TRANSFER_COMMAND)]
        command: String,
    },
    History(HistoryArgs),
    SendMessage {
        body: String,
        #[arg(long)]
        receiver: String,
    },
}

#[derive(Args, Debug)]
#[group(required = true, multiple = true)]
struct HistoryArgs {
    /// History of one user
    #[arg(long, conflicts_with_all = ["domain", "asset"])]
    user: Option<String>,
    #[arg(long, requires = "asset")]
    domain: Option<String>,
    #[arg(long, requires = "domain")]
    asset: Option<String>,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    ledger_client::logging::init(cli.verbose)?;

    if let Commands::Keygen { out_dir } = &cli.command {
        return keygen_cmd(out_dir);
    }

    let config = ClientConfig::resolve(
        cli.config.as_deref(),
        cli.endpoint.as_deref(),
        cli.timeout_secs,
    )?;
    let transport = ReqwestTransport::from_config(&config)?;
    let client = LedgerClient::new(transport);
    let endpoint = config.endpoint.as_str();
    info!(endpoint, "using ledger endpoint");

    match &cli.command {
        Commands::Keygen { .. } => Ok(()),
        Commands::RegisterDomain { name } => {
            let keys = load_keys(cli.key_file.as_deref())?;
            report(client.register_domain(endpoint, name, &keys)?)
        }
        Commands::RegisterAsset { name, domain } => {
            let keys = load_keys(cli.key_file.as_deref())?;
            report(client.register_asset(endpoint, name, domain, &keys)?)
        }
        Commands::Domains => print_json(&client.find_domains(endpoint)?),
        Commands::Assets { domain } => print_json(&client.find_assets(endpoint, domain)?),
        Commands::Transfer {
            asset_uuid,
            receiver,
            amount,
            command,
        } => {
            let request = TransferRequest::parse(receiver, amount)?;
            let keys = load_keys(cli.key_file.as_deref())?;
            report(client.operation(
                endpoint,
                asset_uuid,
                command,
                request.amount,
                &request.receiver,
                &keys,
            )?)
        }
        Commands::History(args) => {
            let outcome = match (&args.user, &args.domain, &args.asset) {
                (Some(user), _, _) => client.history_by_user(endpoint, user)?,
                (None, Some(domain), Some(asset)) => {
                    client.history_by_asset(endpoint, domain, asset)?
                }
                _ => return Err(eyre!("history needs --user or both --domain and --asset")),
            };
            report(outcome)
        }
        Commands::SendMessage { body, receiver } => {
            let keys = load_keys(cli.key_file.as_deref())?;
            report(client.send_message(endpoint, body, receiver, &keys)?)
        }
    }
}

fn keygen_cmd(out_dir: &Path) -> Result<()> {
    fs::create_dir_all(out_dir)
        .wrap_err_with(|| format!("unable to create {}", out_dir.display()))?;
    let keys = KeyPair::generate();
    fs::write(out_dir.join("sk.hex"), keys.secret_hex())?;
    fs::write(out_dir.join("pk.b64"), keys.public_key_base64())?;
    info!(fingerprint = %keys.fingerprint(), "key pair generated");
    println!("keypair written → {}", out_dir.display());
    Ok(())
}

fn load_keys(key_file: Option<&Path>) -> Result<KeyPair> {
    let path = match key_file {
        Some(path) => path.to_path_buf(),
        None => std::env::var_os(KEY_FILE_ENV)
            .map(PathBuf::from)
            .ok_or_else(|| eyre!("no key file: pass --key-file or set {KEY_FILE_ENV}"))?,
    };
    let secret = fs::read_to_string(&path)
        .wrap_err_with(|| format!("unable to read key file {}", path.display()))?;
    let keys = KeyPair::from_secret_hex(&secret)
        .wrap_err_with(|| format!("invalid key file {}", path.display()))?;
    Ok(keys)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print the outcome; anything but success exits with status 1.
fn report<T: Serialize>(outcome: Outcome<T>) -> Result<()> {
    print_json(&outcome)?;
    if !outcome.is_success() {
        std::process::exit(1);
    }
    Ok(())
}
