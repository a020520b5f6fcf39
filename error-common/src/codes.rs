// Error codes for the Configurator Gateway
// Codes are stable across releases; clients and dashboards key on them.

pub mod validation {
    pub const UNKNOWN_CONFIG_TYPE: &str = "VALIDATION_1001";
    pub const MALFORMED_PAYLOAD: &str = "VALIDATION_1002";
    pub const PAYLOAD_REJECTED: &str = "VALIDATION_1003";
}

pub mod argument {
    pub const UNRECOGNIZED_WRITE: &str = "ARGUMENT_2001";
    pub const INVALID_IDENTIFIER: &str = "ARGUMENT_2002";
}

pub mod storage {
    pub const NOT_FOUND: &str = "STORAGE_3001";
    pub const ALREADY_EXISTS: &str = "STORAGE_3002";
    pub const READ_ONLY: &str = "STORAGE_3003";
    pub const TRANSACTION_CLOSED: &str = "STORAGE_3004";
    pub const BACKEND_FAILURE: &str = "STORAGE_3005";
}

pub mod transaction {
    pub const OPEN_FAILED: &str = "TX_4001";
    pub const COMMIT_FAILED: &str = "TX_4002";
}

pub mod config {
    pub const INVALID_CONFIG: &str = "CONFIG_5001";
}
