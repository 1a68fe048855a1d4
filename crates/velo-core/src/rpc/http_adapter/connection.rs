use reqwest::Url;

use crate::error::CoreError;

pub(super) fn parse_connection(connection: &str) -> Result<String, CoreError> {
    let parsed = Url::parse(connection).map_err(|e| {
        CoreError::Config(format!(
            "invalid connection `{connection}`: expected HTTP(S) URL ({e})"
        ))
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(connection.to_owned()),
        other => Err(CoreError::Config(format!(
            "unsupported connection scheme `{other}`; expected http or https"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_connection_https_url() {
        let parsed = parse_connection("https://testnet-passet-hub-eth-rpc.polkadot.io")
            .expect("should parse");
        assert_eq!(parsed, "https://testnet-passet-hub-eth-rpc.polkadot.io");
    }

    #[test]
    fn parse_connection_local_http_url() {
        let parsed = parse_connection("http://127.0.0.1:8545").expect("should parse");
        assert_eq!(parsed, "http://127.0.0.1:8545");
    }

    #[test]
    fn parse_connection_invalid_scheme() {
        let err = parse_connection("ws://example.com").expect_err("must reject ws");
        assert!(err.to_string().contains("unsupported connection scheme"));
    }
}
