// gateway/http_gateway.rs
use crate::config::{ApiRoutes, ConsoleConfig};
use crate::gateway::{
    Company, Development, Gateway, GatewayError, ImportResult, NewDevelopment, NewUnit,
    QueryParams, Unit,
};
use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

const USER_AGENT: &str = concat!("obras-console/", env!("CARGO_PKG_VERSION"));

/// Blocking client for the collaborator API.
pub struct HttpGateway {
    client: Client,
    base_url: String,
    routes: ApiRoutes,
}

impl HttpGateway {
    pub fn new(cfg: &ConsoleConfig) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(cfg.api_timeout_secs))
            .build()
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: cfg.api_base_url.trim_end_matches('/').to_string(),
            routes: cfg.routes.clone(),
        })
    }

    fn url(&self, path: &str) -> Result<Url, GatewayError> {
        Url::parse(&format!("{}{}", self.base_url, path))
            .map_err(|e| GatewayError::Transport(format!("bad API url for {path}: {e}")))
    }

    fn send(&self, request: RequestBuilder) -> Result<Vec<u8>, GatewayError> {
        let resp = request.send().map_err(|e| {
            warn!(error = %e, "API request failed");
            GatewayError::Transport(e.to_string())
        })?;

        let status = resp.status();
        let body = resp
            .bytes()
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        if !status.is_success() {
            let err = GatewayError::from_failure(status.as_u16(), &body);
            warn!(status = status.as_u16(), error = %err, "API answered with failure");
            return Err(err);
        }

        Ok(body.to_vec())
    }

    fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, GatewayError> {
        debug!(%url, "GET");
        let body = self.send(self.client.get(url.clone()))?;
        serde_json::from_slice(&body).map_err(|e| GatewayError::Decode(format!("{url}: {e}")))
    }

    fn post_json<P: Serialize>(&self, path: &str, payload: &P) -> Result<(), GatewayError> {
        let url = self.url(path)?;
        debug!(%url, "POST");
        self.send(self.client.post(url).json(payload)).map(|_| ())
    }
}

impl Gateway for HttpGateway {
    fn list_companies(&self) -> Result<Vec<Company>, GatewayError> {
        self.get_json(self.url(&self.routes.companies)?)
    }

    fn list_units(&self) -> Result<Vec<Unit>, GatewayError> {
        self.get_json(self.url(&self.routes.units)?)
    }

    fn list_developments(&self, criteria: &QueryParams) -> Result<Vec<Development>, GatewayError> {
        let mut url = self.url(&self.routes.developments)?;
        if !criteria.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(criteria.iter().map(|(k, v)| (*k, v.as_str())));
        }
        self.get_json(url)
    }

    fn publish_development(&self, id: i64) -> Result<(), GatewayError> {
        let url = self.url(&self.routes.publish_path(id))?;
        debug!(%url, id, "POST publish");
        self.send(self.client.post(url)).map(|_| ())
    }

    fn import_spreadsheet(
        &self,
        bytes: Vec<u8>,
        filename: &str,
        media_type: &str,
    ) -> Result<ImportResult, GatewayError> {
        let url = self.url(&self.routes.import)?;
        debug!(%url, filename, size = bytes.len(), "POST import");

        let part = Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str(media_type)
            .map_err(|e| GatewayError::Transport(format!("invalid media type: {e}")))?;
        let form = Form::new().part("file", part);

        let body = self.send(self.client.post(url).multipart(form))?;
        ImportResult::from_json(&body)
    }

    fn create_development(&self, payload: &NewDevelopment) -> Result<(), GatewayError> {
        self.post_json(&self.routes.developments, payload)
    }

    fn create_unit(&self, payload: &NewUnit) -> Result<(), GatewayError> {
        self.post_json(&self.routes.create_unit, payload)
    }
}
