use {
    faucet_sdk::{
        client::{Config, Faucet, Level, Listener, ListenerId, Notification, WalletProvider},
        rpc::{
            domain::Address,
            provider::{
                ProviderError,
                ProviderEventKind,
                RequestArguments,
                WalletMethod,
                CODE_UNSUPPORTED_METHOD,
            },
        },
    },
    serde_json::{json, Value},
    std::cell::Cell,
    structopt::StructOpt,
};

mod log;

#[derive(StructOpt)]
struct Args {
    /// Override the faucet API base URL (defaults to `FAUCET_API_BASE_URL` or
    /// the public faucet).
    #[structopt(short, long)]
    api_base_url: Option<String>,

    /// Log request details from the faucet client.
    #[structopt(short, long)]
    verbose: bool,

    #[structopt(subcommand)]
    command: Command,
}

#[derive(StructOpt)]
enum Command {
    /// Print the network details for adding the testnet by hand.
    Network,

    /// Request a drip for an address.
    Request {
        /// Receiving wallet address.
        address: Address,
    },
}

/// A wallet that has already authorized a single account. There is no
/// extension to talk to on the command line, so it neither prompts nor emits
/// events.
struct LocalWallet {
    address: Address,
    next_id: Cell<u64>,
}

impl LocalWallet {
    fn new(address: Address) -> Self {
        Self {
            address,
            next_id: Cell::new(0),
        }
    }
}

impl WalletProvider for LocalWallet {
    async fn request(&self, args: RequestArguments) -> Result<Value, ProviderError> {
        match args.method {
            WalletMethod::Accounts | WalletMethod::RequestAccounts => {
                Ok(json!([self.address.to_string()]))
            }

            method => Err(ProviderError::new(
                CODE_UNSUPPORTED_METHOD,
                format!("{method} is not supported by the local wallet"),
            )),
        }
    }

    fn on(&self, _event: ProviderEventKind, _listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_id.get());

        self.next_id.set(id.0 + 1);

        id
    }

    fn remove_listener(&self, _event: ProviderEventKind, _id: ListenerId) {}
}

fn print_notifications(notifications: Vec<Notification>) {
    for notification in notifications {
        let prefix = match notification.level {
            Level::Success => "ok",
            Level::Error => "error",
            Level::Info => "info",
        };

        println!("[{prefix}] {}", notification.message);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::from_args();
    let _guard = log::init(args.verbose);

    let mut config = Config::from_env()?;

    if let Some(url) = args.api_base_url {
        config = config.with_api_base_url(url);
    }

    match args.command {
        Command::Network => {
            config.validate()?;
            println!("{}", config.network().manual_instructions());
        }

        Command::Request { address } => {
            let mut faucet = Faucet::new(&config, Some(LocalWallet::new(address)))?;

            faucet.connect().await;
            faucet.request_tokens().await;

            print_notifications(faucet.take_notifications());

            if let Some(outcome) = faucet.outcome() {
                println!("{}", outcome.message());

                if let Some(hash) = outcome.tx_hash() {
                    println!("Transaction hash: {hash}");
                }
            }
        }
    }

    Ok(())
}
