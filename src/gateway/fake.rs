//! In-memory gateway for tests. Behaves like a small API server: listings
//! honour the name and published-only filters, publishing stamps the record.

use crate::gateway::{
    parse_timestamp, Company, Development, Gateway, GatewayError, ImportResult, NewDevelopment,
    NewUnit, PaymentMechanism, QueryParams, Unit,
};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Default)]
pub struct FakeState {
    pub companies: Vec<Company>,
    pub units: Vec<Unit>,
    pub developments: Vec<Development>,
    pub import_response: Option<Result<ImportResult, GatewayError>>,
    pub fail_units: Option<GatewayError>,
    pub fail_developments: Option<GatewayError>,
    pub fail_publish: Option<GatewayError>,
    pub fail_create: Option<GatewayError>,
    pub calls: Vec<String>,
    pub last_query: Option<QueryParams>,
    pub created_developments: Vec<NewDevelopment>,
    pub created_units: Vec<NewUnit>,
    pub uploaded: Vec<(String, String, usize)>,
}

/// Clones share one state, so a test can keep a handle on a gateway it has
/// handed to the app.
#[derive(Clone, Default)]
pub struct FakeGateway {
    state: Arc<Mutex<FakeState>>,
}

impl FakeGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_developments(developments: Vec<Development>) -> Self {
        let gw = Self::new();
        gw.state().developments = developments;
        gw
    }

    pub fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(|p| p.into_inner())
    }

    pub fn calls(&self) -> Vec<String> {
        self.state().calls.clone()
    }

    fn record(&self, call: impl Into<String>) -> MutexGuard<'_, FakeState> {
        let mut st = self.state();
        st.calls.push(call.into());
        st
    }
}

pub fn development(id: i64, name: &str, published: bool) -> Development {
    Development {
        id,
        name: name.to_string(),
        company_name: Some("Construtora Sol".to_string()),
        company_id: None,
        company_label: None,
        address: Some(format!("Quadra {id}")),
        postal_code: Some("72302-004".to_string()),
        note: None,
        created_at: parse_timestamp("2024-03-01T09:00:00"),
        published_at: if published {
            parse_timestamp("2024-03-02T09:00:00")
        } else {
            None
        },
        expires_at: None,
    }
}

pub fn unit(id: i64, development_id: i64, number: &str) -> Unit {
    Unit {
        id,
        development_id,
        development_name: None,
        number: number.to_string(),
        area_m2: Some(42.0),
        sale_price: Some(150_000.0),
        payment: PaymentMechanism::Financing,
    }
}

pub fn company(id: i64, name: &str) -> Company {
    Company {
        id,
        name: name.to_string(),
        tax_id: None,
        phone: None,
    }
}

impl Gateway for FakeGateway {
    fn list_companies(&self) -> Result<Vec<Company>, GatewayError> {
        Ok(self.record("list_companies").companies.clone())
    }

    fn list_units(&self) -> Result<Vec<Unit>, GatewayError> {
        let st = self.record("list_units");
        match st.fail_units.clone() {
            Some(err) => Err(err),
            None => Ok(st.units.clone()),
        }
    }

    fn list_developments(&self, criteria: &QueryParams) -> Result<Vec<Development>, GatewayError> {
        let mut st = self.record("list_developments");
        st.last_query = Some(criteria.clone());
        if let Some(err) = st.fail_developments.clone() {
            return Err(err);
        }

        let name = criteria.get("nome").map(|n| n.to_lowercase());
        let published_only = criteria.contains_key("somente_publicadas");

        Ok(st
            .developments
            .iter()
            .filter(|d| !published_only || d.is_published())
            .filter(|d| match &name {
                Some(n) => d.name.to_lowercase().contains(n),
                None => true,
            })
            .cloned()
            .collect())
    }

    fn publish_development(&self, id: i64) -> Result<(), GatewayError> {
        let mut st = self.record(format!("publish_development:{id}"));
        if let Some(err) = st.fail_publish.clone() {
            return Err(err);
        }
        match st.developments.iter_mut().find(|d| d.id == id) {
            Some(dev) => {
                dev.published_at = parse_timestamp("2024-04-01T12:00:00");
                Ok(())
            }
            None => Err(GatewayError::Api {
                status: 404,
                message: Some("Empreendimento não encontrado".to_string()),
            }),
        }
    }

    fn import_spreadsheet(
        &self,
        bytes: Vec<u8>,
        filename: &str,
        media_type: &str,
    ) -> Result<ImportResult, GatewayError> {
        let mut st = self.record("import_spreadsheet");
        st.uploaded
            .push((filename.to_string(), media_type.to_string(), bytes.len()));
        st.import_response
            .clone()
            .unwrap_or_else(|| Ok(ImportResult::default()))
    }

    fn create_development(&self, payload: &NewDevelopment) -> Result<(), GatewayError> {
        let mut st = self.record("create_development");
        if let Some(err) = st.fail_create.clone() {
            return Err(err);
        }
        st.created_developments.push(payload.clone());
        Ok(())
    }

    fn create_unit(&self, payload: &NewUnit) -> Result<(), GatewayError> {
        let mut st = self.record("create_unit");
        if let Some(err) = st.fail_create.clone() {
            return Err(err);
        }
        st.created_units.push(payload.clone());
        Ok(())
    }
}
