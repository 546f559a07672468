mod gateway_error;
mod http_gateway;
mod import_result;
mod models;

#[cfg(test)]
pub mod fake;

use std::collections::BTreeMap;

pub use gateway_error::GatewayError;
pub use http_gateway::HttpGateway;
pub use import_result::{ImportResult, RowError};
pub use models::{
    parse_timestamp, Company, Development, NewDevelopment, NewUnit, PaymentCategory,
    PaymentMechanism, PublicationStatus, Unit,
};

/// Query parameters for the development listing, keyed by wire name.
pub type QueryParams = BTreeMap<&'static str, String>;

/// Everything the console asks of the remote API.
///
/// Implementations must be shareable across astra's worker threads; the
/// listing reload calls three methods at once.
pub trait Gateway: Send + Sync {
    fn list_companies(&self) -> Result<Vec<Company>, GatewayError>;

    fn list_units(&self) -> Result<Vec<Unit>, GatewayError>;

    /// An empty map means no constraint.
    fn list_developments(&self, criteria: &QueryParams) -> Result<Vec<Development>, GatewayError>;

    fn publish_development(&self, id: i64) -> Result<(), GatewayError>;

    fn import_spreadsheet(
        &self,
        bytes: Vec<u8>,
        filename: &str,
        media_type: &str,
    ) -> Result<ImportResult, GatewayError>;

    fn create_development(&self, payload: &NewDevelopment) -> Result<(), GatewayError>;

    fn create_unit(&self, payload: &NewUnit) -> Result<(), GatewayError>;
}
