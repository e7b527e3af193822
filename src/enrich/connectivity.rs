use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use super::ConnectivityProbe;

/// Outcome of the connectivity probe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "reason", rename_all = "snake_case")]
pub enum Connectivity {
    Online,
    Offline(String),
}

impl Connectivity {
    pub fn is_online(&self) -> bool {
        matches!(self, Connectivity::Online)
    }
}

/// Probes a known endpoint with a short timeout
///
/// Any HTTP response counts as reachable; only transport failures count as
/// offline.
pub struct HttpProbe {
    url: String,
    timeout: Duration,
    client: reqwest::blocking::Client,
}

impl HttpProbe {
    pub fn new(url: &str, timeout: Duration, client: reqwest::blocking::Client) -> Self {
        Self {
            url: url.to_string(),
            timeout,
            client,
        }
    }
}

impl ConnectivityProbe for HttpProbe {
    fn probe(&self) -> Connectivity {
        match self.client.get(&self.url).timeout(self.timeout).send() {
            Ok(response) => {
                debug!("Connectivity probe {} answered {}", self.url, response.status());
                Connectivity::Online
            }
            Err(e) => {
                warn!("Connectivity probe {} failed: {}", self.url, e);
                Connectivity::Offline(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unreachable_endpoint_is_offline() {
        let client = reqwest::blocking::Client::new();
        // Port 9 (discard) on loopback is refused on any normal host
        let probe = HttpProbe::new("http://127.0.0.1:9/", Duration::from_secs(1), client);
        assert!(!probe.probe().is_online());
    }

    #[test]
    fn test_connectivity_serialization() {
        let json = serde_json::to_string(&Connectivity::Offline("refused".to_string())).unwrap();
        assert_eq!(json, r#"{"state":"offline","reason":"refused"}"#);
    }
}
