use crate::{GameError, Result};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Participant identifier: a fixed-width 20-byte address.
///
/// Renders as `0x` followed by 40 lowercase hex characters. The all-zero
/// address is reserved as the "no participant" sentinel on the wire and is
/// never accepted as a real participant.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address([u8; Address::LEN]);

impl Address {
    pub const LEN: usize = 20;

    pub const ZERO: Address = Address([0u8; Address::LEN]);

    pub fn new(bytes: [u8; Address::LEN]) -> Self {
        Self(bytes)
    }

    /// Fresh random address, never the zero sentinel
    pub fn random() -> Self {
        let mut bytes = [0u8; Address::LEN];
        loop {
            rand::thread_rng().fill_bytes(&mut bytes);
            if bytes != [0u8; Address::LEN] {
                return Self(bytes);
            }
        }
    }

    pub fn as_bytes(&self) -> &[u8; Address::LEN] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Wire form of an optional address, with the zero sentinel for `None`
    pub fn or_zero(address: Option<Address>) -> Address {
        address.unwrap_or(Self::ZERO)
    }
}

impl FromStr for Address {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        if digits.len() != Address::LEN * 2 {
            return Err(GameError::InvalidAddress(format!(
                "expected {} hex characters, got {}",
                Address::LEN * 2,
                digits.len()
            )));
        }

        let mut bytes = [0u8; Address::LEN];
        hex::decode_to_slice(digits, &mut bytes)
            .map_err(|e| GameError::InvalidAddress(format!("{}: {}", s, e)))?;

        Ok(Self(bytes))
    }
}

impl TryFrom<String> for Address {
    type Error = GameError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.to_string()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self)
    }
}

/// Serde adapter for `Option<Address>` fields: `None` travels as the zero address
pub mod zero_sentinel {
    use super::Address;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(address: &Option<Address>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        Address::or_zero(*address).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Address>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let address = Address::deserialize(deserializer)?;
        Ok((!address.is_zero()).then_some(address))
    }
}
