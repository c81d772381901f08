//! Gateway URLs and endpoint paths

/// Production gateway base URL
pub const PRODUCTION_BASE_URL: &str = "https://services.santimpay.com/api/v1/gateway";

/// Test gateway base URL
pub const TEST_BASE_URL: &str = "https://testnet.santimpay.com/api/v1/gateway";

/// Gateway endpoint paths
pub mod endpoints {
    pub const INITIATE_PAYMENT: &str = "/initiate-payment";
    pub const DIRECT_PAYMENT: &str = "/direct-payment";
    pub const PAYOUT_TRANSFER: &str = "/payout-transfer";
    pub const FETCH_TRANSACTION_STATUS: &str = "/fetch-transaction-status";
}
