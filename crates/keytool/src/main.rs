#![deny(rust_2018_idioms)]

use anyhow::Context;
use serde_json::json;
use starkex_keys::{
    derivation_input, derive_key_pair, sign_message, sign_registration, verify_message,
    EthereumAddress, StarkKeyPair,
};
use tracing::info;

mod config;

use config::{Action, LogFormat};

fn main() -> anyhow::Result<()> {
    if std::env::var_os("RUST_LOG").is_none() {
        std::env::set_var("RUST_LOG", "info");
    }

    let config = config::Config::parse();

    setup_tracing(config.log_format);

    let output = run(config.action)?;
    let output = serde_json::to_string_pretty(&output).context("Serializing output")?;
    println!("{output}");

    Ok(())
}

/// Logs go to stderr so that stdout only carries the JSON result.
fn setup_tracing(format: LogFormat) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Compact => builder.compact().init(),
        LogFormat::Json => builder.json().init(),
    }
}

fn run(action: Action) -> anyhow::Result<serde_json::Value> {
    let output = match action {
        Action::Request { instance, account } => {
            let account: EthereumAddress = account.parse().context("Parsing account")?;
            let request = instance.variant().wallet_request(&account);
            info!(%instance, method = %request.method, "Sign this request with the wallet");
            serde_json::to_value(request)?
        }
        Action::Derive {
            instance,
            signature,
        } => {
            let input = match instance {
                Some(instance) => derivation_input(&instance.variant(), &signature),
                None => signature,
            };
            let key_pair = derive_key_pair(&input).context("Deriving key pair")?;
            info!(stark_key = %key_pair.stark_key(), "Recovered key pair");
            serde_json::to_value(key_pair)?
        }
        Action::Sign {
            private_key,
            message,
        } => {
            let bundle = sign_message(&private_key, &message).context("Signing message")?;
            serde_json::to_value(bundle)?
        }
        Action::Verify {
            stark_key,
            public_key_y,
            message,
            rsy,
        } => {
            let valid = verify_message(&stark_key, &public_key_y, &message, &rsy)
                .context("Verifying signature")?;
            if !valid {
                tracing::warn!("Signature does not match");
            }
            json!({ "valid": valid })
        }
        Action::Register {
            private_key,
            account,
        } => {
            let key_pair =
                StarkKeyPair::from_private_key(&private_key).context("Parsing private key")?;
            let proof = sign_registration(&account, &key_pair)
                .with_context(|| format!("Signing registration for {account}"))?;
            info!(
                stark_key = %proof.stark_key,
                account = %proof.ethereum_address,
                "Registration signed, submit the calldata to the exchange contract"
            );
            serde_json::to_value(proof)?
        }
    };

    Ok(output)
}

#[cfg(test)]
mod tests {
    use pretty_assertions_sorted::assert_eq;
    use starkex_keys::Instance;

    use super::*;

    const ACCOUNT: &str = "0xdeadbeef12345678deadbeef12345678deadbeef";

    #[test]
    fn request_prints_wallet_rpc() {
        let output = run(Action::Request {
            instance: Instance::Myria,
            account: ACCOUNT.to_owned(),
        })
        .unwrap();
        assert_eq!(
            output,
            json!({
                "method": "personal_sign",
                "params": [ACCOUNT, "Sign-in to your Myria L2 Wallet"],
            })
        );
    }

    #[test]
    fn derive_applies_instance_suffix() {
        let derived = run(Action::Derive {
            instance: Some(Instance::Dydx),
            signature: "0x1234".to_owned(),
        })
        .unwrap();
        let expected = derive_key_pair("0x123400").unwrap();
        assert_eq!(derived, serde_json::to_value(expected).unwrap());

        let raw = run(Action::Derive {
            instance: None,
            signature: "0x12345678".to_owned(),
        })
        .unwrap();
        assert_eq!(
            raw["private_key"],
            "0186532eaed1aa913e4bffc1b64e338cd7ce9c1afe35e395eee28777660dd959"
        );
    }

    #[test]
    fn sign_then_verify() {
        let key_pair = derive_key_pair("0x12345678").unwrap();
        let bundle = run(Action::Sign {
            private_key: key_pair.private_key.clone(),
            message: "0xc0ffee".to_owned(),
        })
        .unwrap();

        let verified = run(Action::Verify {
            stark_key: key_pair.public_key_x.clone(),
            public_key_y: key_pair.public_key_y.clone(),
            message: "0xc0ffee".to_owned(),
            rsy: bundle["rsy"].as_str().unwrap().to_owned(),
        })
        .unwrap();
        assert_eq!(verified, json!({ "valid": true }));
    }

    #[test]
    fn register() {
        let key_pair = derive_key_pair("0x1234").unwrap();
        let proof = run(Action::Register {
            private_key: key_pair.private_key,
            account: ACCOUNT.to_owned(),
        })
        .unwrap();

        assert_eq!(proof["ethereum_address"], ACCOUNT);
        assert!(proof["calldata"].as_str().unwrap().starts_with("0xbea84187"));
        assert_eq!(proof["signature"]["rsy"].as_str().unwrap().len(), 194);
    }

    #[test]
    fn errors_carry_context() {
        let error = run(Action::Sign {
            private_key: "0x0".to_owned(),
            message: "0x".to_owned(),
        })
        .unwrap_err();
        assert_eq!(error.to_string(), "Signing message");
        assert_eq!(error.root_cause().to_string(), "Invalid private key");
    }
}
