use clap::{Parser, Subcommand};
use starkex_keys::Instance;

#[derive(Parser)]
#[command(name = "starkex-keytool")]
#[command(version)]
#[command(
    about = "Recovers StarkEx key pairs from Ethereum wallet signatures and signs messages with them."
)]
struct Cli {
    #[arg(
        long = "log-format",
        long_help = "Format of the log lines written to stderr. Verbosity is controlled with RUST_LOG.",
        value_enum,
        default_value = "compact",
        env = "STARKEX_LOG_FORMAT",
        global = true
    )]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the wallet request whose signature recovers the keys of an exchange instance.
    Request {
        #[arg(long, value_enum, env = "STARKEX_INSTANCE")]
        instance: InstanceArg,

        #[arg(
            long,
            long_help = "Ethereum address of the wallet which is asked to sign",
            value_name = "ADDRESS",
            env = "STARKEX_ACCOUNT"
        )]
        account: String,
    },
    /// Derive a key pair from a wallet signature, or any other hex data.
    Derive {
        #[arg(
            long,
            long_help = "Exchange instance the signature was requested for. Its suffix is appended to the signature before derivation.",
            value_enum,
            env = "STARKEX_INSTANCE"
        )]
        instance: Option<InstanceArg>,

        #[arg(long, value_name = "HEX", env = "STARKEX_SIGNATURE")]
        signature: String,
    },
    /// Sign hex encoded message bytes.
    Sign {
        #[arg(long, value_name = "HEX", env = "STARKEX_PRIVATE_KEY", hide_env_values = true)]
        private_key: String,

        #[arg(long, value_name = "HEX")]
        message: String,
    },
    /// Verify an rsy signature over hex encoded message bytes.
    Verify {
        #[arg(long, value_name = "HEX", long_help = "Public key x coordinate, the Stark key")]
        stark_key: String,

        #[arg(long, value_name = "HEX")]
        public_key_y: String,

        #[arg(long, value_name = "HEX")]
        message: String,

        #[arg(long, value_name = "HEX")]
        rsy: String,
    },
    /// Sign the registration of a Stark key for an Ethereum address and print the calldata.
    Register {
        #[arg(long, value_name = "HEX", env = "STARKEX_PRIVATE_KEY", hide_env_values = true)]
        private_key: String,

        #[arg(long, value_name = "ADDRESS", env = "STARKEX_ACCOUNT")]
        account: String,
    },
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum InstanceArg {
    #[value(name = "dYdX")]
    Dydx,
    #[value(name = "dYdX-legacy")]
    DydxLegacy,
    #[value(name = "Myria")]
    Myria,
    #[value(name = "ApeX")]
    Apex,
}

impl From<InstanceArg> for Instance {
    fn from(value: InstanceArg) -> Self {
        match value {
            InstanceArg::Dydx => Instance::Dydx,
            InstanceArg::DydxLegacy => Instance::DydxLegacy,
            InstanceArg::Myria => Instance::Myria,
            InstanceArg::Apex => Instance::Apex,
        }
    }
}

#[derive(Debug)]
pub struct Config {
    pub log_format: LogFormat,
    pub action: Action,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Action {
    Request {
        instance: Instance,
        account: String,
    },
    Derive {
        instance: Option<Instance>,
        signature: String,
    },
    Sign {
        private_key: String,
        message: String,
    },
    Verify {
        stark_key: String,
        public_key_y: String,
        message: String,
        rsy: String,
    },
    Register {
        private_key: String,
        account: String,
    },
}

impl Config {
    pub fn parse() -> Self {
        Self::from_cli(Cli::parse())
    }

    #[cfg(test)]
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Cli::try_parse_from(args).map(Self::from_cli)
    }

    fn from_cli(cli: Cli) -> Self {
        let action = match cli.command {
            Command::Request { instance, account } => Action::Request {
                instance: instance.into(),
                account,
            },
            Command::Derive {
                instance,
                signature,
            } => Action::Derive {
                instance: instance.map(Into::into),
                signature,
            },
            Command::Sign {
                private_key,
                message,
            } => Action::Sign {
                private_key,
                message,
            },
            Command::Verify {
                stark_key,
                public_key_y,
                message,
                rsy,
            } => Action::Verify {
                stark_key,
                public_key_y,
                message,
                rsy,
            },
            Command::Register {
                private_key,
                account,
            } => Action::Register {
                private_key,
                account,
            },
        };

        Config {
            log_format: cli.log_format,
            action,
        }
    }
}
