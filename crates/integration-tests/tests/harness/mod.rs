//! Shared test harness

pub mod mock_llm;

use quill_config::Config;
use quill_llm::Gateway;
use secrecy::SecretString;

use mock_llm::MockLlm;

/// Gateway pointed at the mock server with a dummy credential
pub fn gateway_for(mock: &MockLlm) -> Gateway {
    let config = Config {
        api_key: SecretString::from("test-key"),
        base_url: mock.base_url(),
    };
    Gateway::new(&config)
}
