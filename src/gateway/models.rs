use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

// Wire names follow the collaborator API (Portuguese, snake_case):
//
// empreendimento
//  ├── id, nome, nome_empresa
//  ├── construtora_id, construtora_nome
//  ├── endereco, cep, observacao
//  └── created_at, publicado_em, expira_em
//
// unidade
//  ├── id, empreendimento_id, empreendimento_nome
//  ├── numero_unidade, tamanho_m2, preco_venda
//  └── mecanismo_pagamento

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Development {
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "nome_empresa", default)]
    pub company_name: Option<String>,
    #[serde(rename = "construtora_id", default)]
    pub company_id: Option<i64>,
    #[serde(rename = "construtora_nome", default)]
    pub company_label: Option<String>,
    #[serde(rename = "endereco", default)]
    pub address: Option<String>,
    #[serde(rename = "cep", default)]
    pub postal_code: Option<String>,
    #[serde(rename = "observacao", default)]
    pub note: Option<String>,
    #[serde(default, deserialize_with = "de_opt_timestamp")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(rename = "publicado_em", default, deserialize_with = "de_opt_timestamp")]
    pub published_at: Option<NaiveDateTime>,
    #[serde(rename = "expira_em", default, deserialize_with = "de_opt_timestamp")]
    pub expires_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublicationStatus {
    Unpublished,
    Published(NaiveDateTime),
    Expired(NaiveDateTime),
}

impl Development {
    /// Published means a publication timestamp is present, nothing else.
    pub fn is_published(&self) -> bool {
        self.published_at.is_some()
    }

    /// Derived at read time; the expiry is never stored as a separate flag.
    pub fn publication_status(&self, now: NaiveDateTime) -> PublicationStatus {
        match (self.published_at, self.expires_at) {
            (None, _) => PublicationStatus::Unpublished,
            (Some(_), Some(exp)) if exp <= now => PublicationStatus::Expired(exp),
            (Some(at), _) => PublicationStatus::Published(at),
        }
    }

    /// Owning company as shown in the table: registered company name, then
    /// the free-text company, then the bare id.
    pub fn owner_label(&self) -> String {
        [&self.company_label, &self.company_name]
            .into_iter()
            .flatten()
            .find(|s| !s.trim().is_empty())
            .cloned()
            .or_else(|| self.company_id.map(|id| id.to_string()))
            .unwrap_or_else(|| "-".to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Company {
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "cnpj", default)]
    pub tax_id: Option<String>,
    #[serde(rename = "telefone", default)]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Unit {
    pub id: i64,
    #[serde(rename = "empreendimento_id")]
    pub development_id: i64,
    #[serde(rename = "empreendimento_nome", default)]
    pub development_name: Option<String>,
    #[serde(rename = "numero_unidade", deserialize_with = "de_lenient_string")]
    pub number: String,
    #[serde(rename = "tamanho_m2", default)]
    pub area_m2: Option<f64>,
    #[serde(rename = "preco_venda", default)]
    pub sale_price: Option<f64>,
    #[serde(rename = "mecanismo_pagamento")]
    pub payment: PaymentMechanism,
}

/// How a unit is paid for. The API keeps a single text field, so anything
/// outside the known categories comes back as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaymentMechanism {
    Financing,
    Cash,
    Consortium,
    Other(String),
}

/// Category picked in the unit form, before the free text is merged in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentCategory {
    Financing,
    Cash,
    Consortium,
    Other,
}

impl PaymentCategory {
    pub const ALL: [PaymentCategory; 4] = [
        PaymentCategory::Financing,
        PaymentCategory::Cash,
        PaymentCategory::Consortium,
        PaymentCategory::Other,
    ];

    pub fn form_value(self) -> &'static str {
        match self {
            PaymentCategory::Financing => "financiamento",
            PaymentCategory::Cash => "avista",
            PaymentCategory::Consortium => "consorcio",
            PaymentCategory::Other => "outros",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PaymentCategory::Financing => "Financiamento Bancário",
            PaymentCategory::Cash => "À Vista",
            PaymentCategory::Consortium => "Consórcio",
            PaymentCategory::Other => "Outros (especificar)",
        }
    }

    pub fn from_form_value(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.form_value() == value)
    }
}

impl PaymentMechanism {
    /// `None` when the category is "other" and no text was given.
    pub fn from_choice(category: PaymentCategory, other_text: &str) -> Option<Self> {
        match category {
            PaymentCategory::Financing => Some(PaymentMechanism::Financing),
            PaymentCategory::Cash => Some(PaymentMechanism::Cash),
            PaymentCategory::Consortium => Some(PaymentMechanism::Consortium),
            PaymentCategory::Other => {
                let text = other_text.trim();
                (!text.is_empty()).then(|| PaymentMechanism::Other(text.to_string()))
            }
        }
    }

    pub fn category(&self) -> PaymentCategory {
        match self {
            PaymentMechanism::Financing => PaymentCategory::Financing,
            PaymentMechanism::Cash => PaymentCategory::Cash,
            PaymentMechanism::Consortium => PaymentCategory::Consortium,
            PaymentMechanism::Other(_) => PaymentCategory::Other,
        }
    }

    pub fn as_wire(&self) -> &str {
        match self {
            PaymentMechanism::Other(text) => text,
            known => known.category().form_value(),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            PaymentMechanism::Other(text) => text,
            known => known.category().label(),
        }
    }
}

impl From<String> for PaymentMechanism {
    fn from(value: String) -> Self {
        match PaymentCategory::from_form_value(value.trim()) {
            Some(PaymentCategory::Financing) => PaymentMechanism::Financing,
            Some(PaymentCategory::Cash) => PaymentMechanism::Cash,
            Some(PaymentCategory::Consortium) => PaymentMechanism::Consortium,
            _ => PaymentMechanism::Other(value),
        }
    }
}

impl From<PaymentMechanism> for String {
    fn from(value: PaymentMechanism) -> Self {
        value.as_wire().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewDevelopment {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "nome_empresa")]
    pub company_name: String,
    #[serde(rename = "endereco")]
    pub address: String,
    #[serde(rename = "cep")]
    pub postal_code: String,
    #[serde(rename = "observacao")]
    pub note: String,
    #[serde(rename = "construtora_id", skip_serializing_if = "Option::is_none")]
    pub company_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewUnit {
    #[serde(rename = "empreendimento_id")]
    pub development_id: i64,
    #[serde(rename = "numero_unidade")]
    pub number: String,
    #[serde(rename = "tamanho_m2", skip_serializing_if = "Option::is_none")]
    pub area_m2: Option<f64>,
    #[serde(rename = "preco_venda", skip_serializing_if = "Option::is_none")]
    pub sale_price: Option<f64>,
    #[serde(rename = "mecanismo_pagamento")]
    pub payment: PaymentMechanism,
}

/// Accepts RFC 3339, naive ISO 8601 (what the API emits) or a bare date.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = raw.parse::<NaiveDateTime>() {
        return Some(dt);
    }
    raw.parse::<NaiveDate>()
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

fn de_opt_timestamp<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => parse_timestamp(s)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {s}"))),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    Text(String),
    Int(i64),
    Float(f64),
}

impl From<StringOrNumber> for String {
    fn from(value: StringOrNumber) -> Self {
        match value {
            StringOrNumber::Text(s) => s,
            StringOrNumber::Int(n) => n.to_string(),
            StringOrNumber::Float(f) => f.to_string(),
        }
    }
}

/// Spreadsheet-sourced labels sometimes arrive as numbers (`101` vs `"101"`).
pub(crate) fn de_lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    StringOrNumber::deserialize(deserializer).map(String::from)
}

pub(crate) fn de_opt_lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<StringOrNumber>::deserialize(deserializer).map(|v| v.map(String::from))
}
