//! HTTP reachability probe
//!
//! Sends a `HEAD` to a well-known URL. Any HTTP answer, whatever its status,
//! proves the internet is reachable. A refused or unroutable connection is a
//! definite "offline"; a timeout says nothing either way.
//!
//! When the connection fails, `is_connected` comes from a route check: a UDP
//! socket is connected to a public address, which only asks the OS for a
//! route and sends no packet. Callers can swap the check with `with_route_check`.

use std::net::UdpSocket;
use std::time::Duration;

use anyhow::Context;
use reqwest::blocking::Client;
use tracing::debug;
use url::Url;

use crate::domain::result::{Error, Result};
use crate::domain::ConnectivitySnapshot;
use crate::ports::ReachabilityProbe;

/// Public address used only to ask the OS for a route. No packet is sent.
const ROUTE_CHECK_ADDR: &str = "1.1.1.1:53";

pub struct HttpReachabilityProbe {
    client: Client,
    url: Url,
    route_check: fn() -> bool,
}

impl HttpReachabilityProbe {
    pub fn new(url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let url = Url::parse(url).with_context(|| format!("Invalid probe URL: {}", url))?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self {
            client,
            url,
            route_check: has_network_route,
        })
    }

    /// Replace the check that decides `is_connected` after a failed connection
    pub fn with_route_check(mut self, route_check: fn() -> bool) -> Self {
        self.route_check = route_check;
        self
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

/// Whether the OS has any route off this machine
fn has_network_route() -> bool {
    UdpSocket::bind("0.0.0.0:0")
        .and_then(|socket| socket.connect(ROUTE_CHECK_ADDR))
        .is_ok()
}

impl ReachabilityProbe for HttpReachabilityProbe {
    fn name(&self) -> &str {
        "http"
    }

    fn probe(&self) -> Result<ConnectivitySnapshot> {
        match self.client.head(self.url.clone()).send() {
            Ok(response) => {
                debug!(status = response.status().as_u16(), "probe answered");
                Ok(ConnectivitySnapshot::ONLINE)
            }
            Err(e) if e.is_timeout() => Err(Error::transport(format!(
                "Reachability probe timed out: {}",
                self.url
            ))),
            Err(e) if e.is_connect() => {
                debug!(error = %e, "probe could not connect");
                Ok(ConnectivitySnapshot::new((self.route_check)(), false))
            }
            Err(e) => Err(Error::transport(format!("Reachability probe failed: {}", e))),
        }
    }
}
