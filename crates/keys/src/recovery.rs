use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::registration::EthereumAddress;
use crate::{derive_key_pair, KeyError, StarkKeyPair};

/// Exchange instances whose Stark keys can be recovered from a wallet signature.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Instance {
    #[serde(rename = "dYdX")]
    Dydx,
    #[serde(rename = "dYdX-legacy")]
    DydxLegacy,
    Myria,
    #[serde(rename = "ApeX")]
    Apex,
}

impl Instance {
    pub const ALL: [Instance; 4] = [
        Instance::Dydx,
        Instance::DydxLegacy,
        Instance::Myria,
        Instance::Apex,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Instance::Dydx => "dYdX",
            Instance::DydxLegacy => "dYdX-legacy",
            Instance::Myria => "Myria",
            Instance::Apex => "ApeX",
        }
    }

    /// How keys of this instance are recovered.
    pub fn variant(self) -> RecoveryVariant {
        match self {
            Instance::Dydx => RecoveryVariant {
                instance: self,
                message: DYDX_TYPED_DATA,
                method: SigningMethod::SignTypedDataV4,
                suffix: Some("00"),
            },
            Instance::DydxLegacy => RecoveryVariant {
                instance: self,
                message: DYDX_LEGACY_MESSAGE,
                method: SigningMethod::PersonalSign,
                suffix: Some("03"),
            },
            Instance::Myria => RecoveryVariant {
                instance: self,
                message: MYRIA_MESSAGE,
                method: SigningMethod::PersonalSign,
                suffix: None,
            },
            Instance::Apex => RecoveryVariant {
                instance: self,
                message: APEX_MESSAGE,
                method: SigningMethod::PersonalSign,
                suffix: Some("03"),
            },
        }
    }
}

impl FromStr for Instance {
    type Err = KeyError;

    /// Instance names are matched exactly, including their case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Instance::ALL
            .into_iter()
            .find(|instance| instance.name() == s)
            .ok_or_else(|| KeyError::UnsupportedInstance(s.to_owned()))
    }
}

impl fmt::Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

const DYDX_TYPED_DATA: &str = concat!(
    r#"{"types":{"EIP712Domain":[{"name":"name","type":"string"},"#,
    r#"{"name":"version","type":"string"},{"name":"chainId","type":"uint256"}],"#,
    r#""dYdX":[{"type":"string","name":"action"},{"type":"string","name":"onlySignOn"}]},"#,
    r#""domain":{"name":"dYdX","version":"1.0","chainId":1},"primaryType":"dYdX","#,
    r#""message":{"action":"dYdX STARK Key","onlySignOn":"https://trade.dydx.exchange"}}"#,
);

const DYDX_LEGACY_MESSAGE: &str = "{\n  \"name\": \"dYdX\",\n  \"version\": \"1.0\",\n  \
                                   \"chainId\": 1,\n  \"action\": \"dYdX STARK Key\",\n  \
                                   \"onlySignOn\": \"https://trade.dydx.exchange\"\n}";

const MYRIA_MESSAGE: &str = "Sign-in to your Myria L2 Wallet";

const APEX_MESSAGE: &str = "name: ApeX\nversion: 1.0\nenvId: 1\naction: L2 Key\n\
                            onlySignOn: https://pro.apex.exchange";

/// The wallet RPC method used to sign the recovery message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SigningMethod {
    #[serde(rename = "personal_sign")]
    PersonalSign,
    #[serde(rename = "eth_signTypedData_v4")]
    SignTypedDataV4,
}

impl SigningMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            SigningMethod::PersonalSign => "personal_sign",
            SigningMethod::SignTypedDataV4 => "eth_signTypedData_v4",
        }
    }
}

impl fmt::Display for SigningMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What to ask the wallet for and how to turn its answer into derivation input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecoveryVariant {
    pub instance: Instance,
    /// Message the wallet is asked to sign, verbatim.
    pub message: &'static str,
    pub method: SigningMethod,
    /// Hex digits appended to the wallet signature before derivation.
    pub suffix: Option<&'static str>,
}

impl RecoveryVariant {
    pub fn wallet_request(&self, account: &EthereumAddress) -> WalletRequest {
        WalletRequest {
            method: self.method,
            params: [account.to_string(), self.message.to_owned()],
        }
    }
}

/// A JSON-RPC style request for the wallet provider: `method` with `[account, message]`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletRequest {
    pub method: SigningMethod,
    pub params: [String; 2],
}

/// The boundary to an Ethereum wallet.
///
/// The returned signature is untrusted and validated by key derivation.
pub trait WalletSigner {
    fn request_signature(&self, request: &WalletRequest) -> anyhow::Result<String>;
}

impl<F> WalletSigner for F
where
    F: Fn(&WalletRequest) -> anyhow::Result<String>,
{
    fn request_signature(&self, request: &WalletRequest) -> anyhow::Result<String> {
        self(request)
    }
}

/// Looks up the recovery variant of an instance by its exact name.
pub fn select_variant(instance_name: &str) -> Result<RecoveryVariant, KeyError> {
    instance_name.parse().map(Instance::variant)
}

/// Appends the variant's suffix to a wallet signature.
pub fn derivation_input(variant: &RecoveryVariant, signature: &str) -> String {
    match variant.suffix {
        Some(suffix) => format!("{signature}{suffix}"),
        None => signature.to_owned(),
    }
}

/// Asks `wallet` to sign the recovery message of `instance` and derives the key pair from it.
pub fn recover_key_pair(
    instance: Instance,
    account: &str,
    wallet: &impl WalletSigner,
) -> Result<StarkKeyPair, KeyError> {
    let account: EthereumAddress = account.parse()?;
    let variant = instance.variant();
    let request = variant.wallet_request(&account);

    tracing::debug!(%instance, %account, method = %request.method, "Requesting wallet signature");
    let signature = wallet.request_signature(&request).map_err(KeyError::Wallet)?;

    derive_key_pair(&derivation_input(&variant, &signature))
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use assert_matches::assert_matches;
    use pretty_assertions_sorted::assert_eq;
    use rstest::rstest;

    use super::*;

    const ACCOUNT: &str = "0xdeadbeef12345678deadbeef12345678deadbeef";
    const SIGNATURE: &str = "0x1234";

    #[test]
    fn every_instance_has_a_variant() {
        for instance in Instance::ALL {
            let variant = select_variant(instance.name()).unwrap();
            assert_eq!(variant.instance, instance);
            assert_eq!(instance.name().parse::<Instance>().unwrap(), instance);
            assert!(!variant.message.is_empty());
        }
    }

    #[rstest]
    #[case::dydx("dYdX", SigningMethod::SignTypedDataV4, Some("00"))]
    #[case::dydx_legacy("dYdX-legacy", SigningMethod::PersonalSign, Some("03"))]
    #[case::myria("Myria", SigningMethod::PersonalSign, None)]
    #[case::apex("ApeX", SigningMethod::PersonalSign, Some("03"))]
    fn variants(
        #[case] name: &str,
        #[case] method: SigningMethod,
        #[case] suffix: Option<&str>,
    ) {
        let variant = select_variant(name).unwrap();
        assert_eq!(variant.method, method);
        assert_eq!(variant.suffix, suffix);
        assert_eq!(variant.instance.to_string(), name);
    }

    #[rstest]
    #[case::lowercase("dydx")]
    #[case::unknown("Sorare")]
    #[case::empty("")]
    fn unsupported_instances(#[case] name: &str) {
        assert_matches!(
            select_variant(name),
            Err(KeyError::UnsupportedInstance(n)) => assert_eq!(n, name)
        );
    }

    #[test]
    fn messages() {
        let typed_data: serde_json::Value =
            serde_json::from_str(Instance::Dydx.variant().message).unwrap();
        assert_eq!(typed_data["primaryType"], "dYdX");
        assert_eq!(typed_data["message"]["action"], "dYdX STARK Key");
        assert_eq!(typed_data["domain"]["chainId"], 1);

        let legacy: serde_json::Value =
            serde_json::from_str(Instance::DydxLegacy.variant().message).unwrap();
        assert_eq!(legacy["onlySignOn"], "https://trade.dydx.exchange");
        assert!(Instance::DydxLegacy.variant().message.starts_with("{\n  \"name\""));

        assert_eq!(
            Instance::Apex.variant().message.lines().collect::<Vec<_>>(),
            [
                "name: ApeX",
                "version: 1.0",
                "envId: 1",
                "action: L2 Key",
                "onlySignOn: https://pro.apex.exchange"
            ]
        );
        assert_eq!(
            Instance::Myria.variant().message,
            "Sign-in to your Myria L2 Wallet"
        );
    }

    #[test]
    fn suffix_is_appended() {
        let dydx = Instance::Dydx.variant();
        assert_eq!(derivation_input(&dydx, SIGNATURE), "0x123400");
        let myria = Instance::Myria.variant();
        assert_eq!(derivation_input(&myria, SIGNATURE), SIGNATURE);
    }

    #[test]
    fn wallet_request_json() {
        let account: EthereumAddress = ACCOUNT.parse().unwrap();
        let request = Instance::Myria.variant().wallet_request(&account);
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({
                "method": "personal_sign",
                "params": [ACCOUNT, "Sign-in to your Myria L2 Wallet"],
            })
        );
    }

    #[rstest]
    #[case::dydx(Instance::Dydx, "0x123400")]
    #[case::dydx_legacy(Instance::DydxLegacy, "0x123403")]
    #[case::myria(Instance::Myria, "0x1234")]
    #[case::apex(Instance::Apex, "0x123403")]
    fn recovers_from_wallet_signature(#[case] instance: Instance, #[case] input: &str) {
        let seen = RefCell::new(None);
        let wallet = |request: &WalletRequest| -> anyhow::Result<String> {
            seen.replace(Some(request.clone()));
            Ok(SIGNATURE.to_owned())
        };

        let key_pair = recover_key_pair(instance, ACCOUNT, &wallet).unwrap();
        assert_eq!(key_pair, derive_key_pair(input).unwrap());

        let request = seen.into_inner().unwrap();
        assert_eq!(request.method, instance.variant().method);
        assert_eq!(request.params[0], ACCOUNT);
        assert_eq!(request.params[1], instance.variant().message);
    }

    #[test]
    fn wallet_failures_are_reported() {
        let wallet = |_: &WalletRequest| -> anyhow::Result<String> {
            anyhow::bail!("User rejected the request")
        };
        assert_matches!(
            recover_key_pair(Instance::Myria, ACCOUNT, &wallet),
            Err(KeyError::Wallet(e)) => assert_eq!(e.to_string(), "User rejected the request")
        );
    }

    #[test]
    fn malformed_wallet_output() {
        let wallet =
            |_: &WalletRequest| -> anyhow::Result<String> { Ok("not a signature".to_owned()) };
        assert_matches!(
            recover_key_pair(Instance::Myria, ACCOUNT, &wallet),
            Err(KeyError::InvalidEncoding(_))
        );
        assert_matches!(
            recover_key_pair(Instance::Myria, "0x1234", &wallet),
            Err(KeyError::InvalidEncoding(_))
        );
    }
}
