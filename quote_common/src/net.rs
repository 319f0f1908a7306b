//! Shared networking constants and helpers used by the service and the requester.

/// Port the quote service listens on.
pub const SERVICE_PORT: u16 = 8080;
/// Path of the only quote service endpoint.
pub const QUOTE_PATH: &str = "/quote";
/// Upstream USD-BRL pricing endpoint.
pub const UPSTREAM_URL: &str = "https://economia.awesomeapi.com.br/json/last/USD-BRL";
/// SQLite database used by the persistence sink.
pub const DATABASE_URL: &str = "sqlite://quotes.db";
/// Text artifact written by the requester.
pub const OUTPUT_FILE: &str = "cotacao.txt";

/// Helper to format an address with a port like "ip:port".
pub fn addr(ip: &str, port: u16) -> String {
    format!("{}:{}", ip, port)
}

/// Full URL of the quote endpoint on `host`.
pub fn quote_url(host: &str, port: u16) -> String {
    format!("http://{}{}", addr(host, port), QUOTE_PATH)
}
