//! The combined result of one resolution run.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::network::LocalSelection;
use crate::public::IpLookupResult;

/// Local, transport and public addresses gathered in one run.
///
/// Display renders one labelled line per field; [`to_json`](Self::to_json)
/// gives the machine-readable form.
#[derive(Debug, Serialize)]
pub struct NetworkReport {
    /// Selected local IPv4 address and how it was found.
    pub local_ipv4: LocalSelection,

    /// Transport bind address, if the caller has one.
    pub bind_address: Option<String>,

    /// Public lookup outcome; `None` when the lookup was skipped.
    #[serde(serialize_with = "serialize_public")]
    pub public_ip: Option<IpLookupResult>,
}

impl NetworkReport {
    /// Returns the public address if the lookup succeeded.
    #[must_use]
    pub fn public_address(&self) -> Option<&str> {
        match &self.public_ip {
            Some(Ok(ip)) => Some(ip),
            _ => None,
        }
    }

    /// True when a public lookup ran and failed.
    #[must_use]
    pub const fn public_lookup_failed(&self) -> bool {
        matches!(self.public_ip, Some(Err(_)))
    }

    /// Serializes the report as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for NetworkReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Local IPv4: {}", self.local_ipv4)?;

        match &self.bind_address {
            Some(addr) => writeln!(f, "Transport bind address: {addr}")?,
            None => writeln!(f, "Transport bind address: not configured")?,
        }

        match &self.public_ip {
            None => write!(f, "Public (WAN): skipped"),
            Some(Ok(ip)) => write!(f, "Public (WAN): {ip}"),
            Some(Err(e)) if e.is_network_unavailable() => {
                write!(f, "Public (WAN): unavailable (network unreachable: {e})")
            }
            Some(Err(e)) => write!(f, "Public (WAN): unavailable (service error: {e})"),
        }
    }
}

#[derive(Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum PublicField<'a> {
    Ok { address: &'a str },
    Failed {
        reason: &'static str,
        message: String,
    },
    Skipped,
}

fn serialize_public<S: Serializer>(
    public: &Option<IpLookupResult>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let field = match public {
        None => PublicField::Skipped,
        Some(Ok(address)) => PublicField::Ok { address },
        Some(Err(e)) => PublicField::Failed {
            reason: e.kind(),
            message: e.to_string(),
        },
    };
    field.serialize(serializer)
}
