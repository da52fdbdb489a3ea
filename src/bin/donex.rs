use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use donex_client::config::cfg::Config;
use donex_client::donex::error::DonexError;
use donex_client::donex::DonexClient;

#[derive(Parser, Debug)]
#[command(name = "donex")]
#[command(about = "Submit, query and donate through a Donex contract", long_about = None)]
struct Cli {
    /// Config file, values can be overridden with DONEX_ prefixed env vars
    #[arg(short, long, default_value = "donex.yaml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Link an address to a social identity (contract owner only)
    SubmitSocial {
        #[arg(long)]
        address: String,
        #[arg(long)]
        platform: String,
        #[arg(long)]
        profile_id: String,
    },
    /// List the social identities linked to an address
    Socials {
        #[arg(long)]
        address: String,
    },
    /// List the addresses linked to a social identity
    Addresses {
        #[arg(long)]
        platform: String,
        #[arg(long)]
        profile_id: String,
    },
    /// Donate to an address
    Donate {
        #[arg(long)]
        recipient: String,
        #[arg(long)]
        amount: u64,
        #[arg(long)]
        denom: String,
    },
    /// Donate to the first address linked to a social identity
    DonateToSocial {
        #[arg(long)]
        platform: String,
        #[arg(long)]
        profile_id: String,
        #[arg(long)]
        amount: u64,
        #[arg(long)]
        denom: String,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "donex=info,donex_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        log::error!("{}", err);
        let mut source = std::error::Error::source(&err);
        while let Some(cause) = source {
            log::error!("because: {}", cause);
            source = cause.source();
        }

        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), DonexError> {
    let cfg = Config::from_yaml(&cli.config)?;
    let donex = DonexClient::connect(cfg).await?;

    match cli.command {
        Commands::SubmitSocial {
            address,
            platform,
            profile_id,
        } => {
            let res = donex.submit_social(address, (platform, profile_id)).await?;
            println!("{:#?}", res);
        }
        Commands::Socials { address } => {
            let socials = donex.get_socials_by_address(address).await?;
            println!("{:#?}", socials);
        }
        Commands::Addresses {
            platform,
            profile_id,
        } => {
            let addresses = donex.get_addresses_by_social(platform, profile_id).await?;
            println!("{:#?}", addresses);
        }
        Commands::Donate {
            recipient,
            amount,
            denom,
        } => {
            let res = donex.donate(recipient, amount, denom).await?;
            println!("{:#?}", res);
        }
        Commands::DonateToSocial {
            platform,
            profile_id,
            amount,
            denom,
        } => match donex
            .donate_to_social(platform.clone(), profile_id.clone(), amount, denom)
            .await?
        {
            Some(res) => println!("{:#?}", res),
            None => log::warn!("no address linked to {} {}", platform, profile_id),
        },
    }

    Ok(())
}
