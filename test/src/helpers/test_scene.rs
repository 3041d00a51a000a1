use std::time::Duration;

use meetup_client::{ClientConfig, SceneClient};
use meetup_server::Relay;

use crate::helpers::{mock_asset_source::MockAssetSource, test_clock::TestClock};

/// Routes `log` output through the test harness. Safe to call from every test.
pub fn init_logging() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init()
        .ok();
}

/// A relay, a shared clock and any number of clients connected to it.
pub struct TestScene {
    pub relay: Relay,
    pub clock: TestClock,
    pub clients: Vec<SceneClient>,
}

impl TestScene {
    pub fn new() -> Self {
        Self {
            relay: Relay::new(),
            clock: TestClock::new(),
            clients: Vec::new(),
        }
    }

    /// Connects a client whose assets take `asset_latency` to load. Returns its index.
    pub fn connect(&mut self, name: &str, asset_latency: Duration) -> usize {
        let config = ClientConfig {
            handle_namespace: Some(name.to_string()),
            ..ClientConfig::default()
        };
        self.connect_with(config, MockAssetSource::with_fixtures(asset_latency))
    }

    pub fn connect_with(&mut self, config: ClientConfig, assets: MockAssetSource) -> usize {
        let connection = self
            .relay
            .connect()
            .expect("relay lock should not be poisoned in tests");
        self.clients
            .push(SceneClient::new(config, Box::new(connection), Box::new(assets)));
        self.clients.len() - 1
    }

    pub fn client(&mut self, index: usize) -> &mut SceneClient {
        &mut self.clients[index]
    }

    /// Lets every client drain the relay and resume deferred work at the current time.
    pub fn receive_all(&mut self) {
        let now = self.clock.now();
        for client in self.clients.iter_mut() {
            client.receive(&now);
        }
    }

    /// Advances the clock in `step` increments up to `total`, receiving at each step.
    pub fn run_for(&mut self, total: Duration, step: Duration) {
        let mut elapsed = Duration::ZERO;
        while elapsed < total {
            self.clock.advance(step);
            elapsed += step;
            self.receive_all();
        }
    }
}

impl Default for TestScene {
    fn default() -> Self {
        Self::new()
    }
}
