use crate::gateway::models::{de_lenient_string, de_opt_lenient_string};
use crate::gateway::GatewayError;
use serde::Deserialize;
use serde_json::Value;

/// Outcome of a spreadsheet import, in the one shape the views consume.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ImportResult {
    pub developments_processed: u64,
    pub units_processed: u64,
    pub error_count: u64,
    pub developments: Vec<CreatedDevelopment>,
    pub units: Vec<CreatedUnit>,
    pub errors: Vec<RowError>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreatedDevelopment {
    #[serde(rename = "nome", deserialize_with = "de_lenient_string")]
    pub name: String,
    #[serde(rename = "nome_empresa", default, deserialize_with = "de_opt_lenient_string")]
    pub company_name: Option<String>,
    #[serde(rename = "cep", default, deserialize_with = "de_opt_lenient_string")]
    pub postal_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreatedUnit {
    #[serde(rename = "numero_unidade", deserialize_with = "de_lenient_string")]
    pub number: String,
    #[serde(rename = "tamanho_m2", default)]
    pub area_m2: Option<f64>,
    #[serde(rename = "preco_venda", default)]
    pub sale_price: Option<f64>,
    #[serde(rename = "mecanismo_pagamento", default, deserialize_with = "de_opt_lenient_string")]
    pub payment: Option<String>,
}

/// One rejected spreadsheet row. Plain-text errors from the API carry no
/// row number of their own.
#[derive(Debug, Clone, PartialEq)]
pub struct RowError {
    pub row: Option<u64>,
    pub message: String,
    pub data: Option<Value>,
}

impl RowError {
    pub fn text(message: impl Into<String>) -> Self {
        Self {
            row: None,
            message: message.into(),
            data: None,
        }
    }
}

// The API has answered imports in two layouts:
//
//   flat:   { empreendimentos_processados, unidades_processadas, erros: <n>,
//             detalhes_erros: ["..."], empreendimentos: [..], unidades: [..] }
//   nested: { summary: { total, success, errors }, errors: [{ row, message, data } | "..."] }
//
// Older servers also sent `processados` in place of `empreendimentos_processados`.

#[derive(Debug, Default, Deserialize)]
struct RawImportResponse {
    empreendimentos_processados: Option<u64>,
    processados: Option<u64>,
    unidades_processadas: Option<u64>,
    erros: Option<RawErrorsField>,
    detalhes_erros: Option<Vec<RawRowError>>,
    errors: Option<Vec<RawRowError>>,
    summary: Option<RawSummary>,
    #[serde(default)]
    empreendimentos: Vec<CreatedDevelopment>,
    #[serde(default)]
    unidades: Vec<CreatedUnit>,
}

#[derive(Debug, Default, Deserialize)]
struct RawSummary {
    success: Option<u64>,
    errors: Option<u64>,
    units: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawErrorsField {
    Count(u64),
    List(Vec<RawRowError>),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawRowError {
    Text(String),
    Detailed {
        row: Option<u64>,
        message: Option<String>,
        data: Option<Value>,
    },
}

impl From<RawRowError> for RowError {
    fn from(raw: RawRowError) -> Self {
        match raw {
            RawRowError::Text(message) => RowError::text(message),
            RawRowError::Detailed { row, message, data } => RowError {
                row,
                message: message.unwrap_or_else(|| "Erro sem descrição".to_string()),
                data: data.filter(|d| !d.is_null()),
            },
        }
    }
}

impl From<RawImportResponse> for ImportResult {
    fn from(raw: RawImportResponse) -> Self {
        let summary = raw.summary.unwrap_or_default();

        let (flat_count, flat_list) = match raw.erros {
            Some(RawErrorsField::Count(n)) => (Some(n), None),
            Some(RawErrorsField::List(list)) => (None, Some(list)),
            None => (None, None),
        };

        let errors: Vec<RowError> = raw
            .detalhes_erros
            .or(raw.errors)
            .or(flat_list)
            .unwrap_or_default()
            .into_iter()
            .map(RowError::from)
            .collect();

        let developments_processed = raw
            .empreendimentos_processados
            .or(raw.processados)
            .or(summary.success)
            .unwrap_or(raw.empreendimentos.len() as u64);

        let units_processed = raw
            .unidades_processadas
            .or(summary.units)
            .unwrap_or(raw.unidades.len() as u64);

        let error_count = flat_count
            .or(summary.errors)
            .unwrap_or(errors.len() as u64);

        ImportResult {
            developments_processed,
            units_processed,
            error_count,
            developments: raw.empreendimentos,
            units: raw.unidades,
            errors,
        }
    }
}

impl ImportResult {
    /// Normalize an import response body, whichever layout it uses.
    pub fn from_json(body: &[u8]) -> Result<Self, GatewayError> {
        let raw: RawImportResponse = serde_json::from_slice(body)
            .map_err(|e| GatewayError::Decode(format!("import response: {e}")))?;
        Ok(raw.into())
    }
}
