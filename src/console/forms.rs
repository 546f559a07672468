use crate::gateway::{NewDevelopment, NewUnit, PaymentCategory, PaymentMechanism};
use std::collections::HashMap;
use thiserror::Error;

pub const DEVELOPMENT_CREATE_FAILED: &str = "Erro ao cadastrar empreendimento. Tente novamente.";
pub const UNIT_CREATE_FAILED: &str = "Erro ao cadastrar unidade";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("O campo {0} é obrigatório")]
    Required(&'static str),
    #[error("O campo {0} deve ser numérico")]
    NotNumeric(&'static str),
    #[error("Selecione um mecanismo de pagamento válido")]
    UnknownPayment,
}

/// Raw values of a submitted form, kept so the page can be refilled.
pub type FormValues = HashMap<String, String>;

fn field<'a>(values: &'a FormValues, name: &str) -> &'a str {
    values.get(name).map(|v| v.trim()).unwrap_or("")
}

fn required(values: &FormValues, name: &'static str) -> Result<String, FormError> {
    let v = field(values, name);
    if v.is_empty() {
        return Err(FormError::Required(name));
    }
    Ok(v.to_string())
}

/// Empty means absent. Accepts a decimal comma ("45,5").
fn optional_number(values: &FormValues, name: &'static str) -> Result<Option<f64>, FormError> {
    let v = field(values, name);
    if v.is_empty() {
        return Ok(None);
    }
    v.replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite() && *n >= 0.0)
        .map(Some)
        .ok_or(FormError::NotNumeric(name))
}

fn optional_id(values: &FormValues, name: &'static str) -> Result<Option<i64>, FormError> {
    let v = field(values, name);
    if v.is_empty() {
        return Ok(None);
    }
    v.parse().map(Some).map_err(|_| FormError::NotNumeric(name))
}

pub fn parse_new_development(values: &FormValues) -> Result<NewDevelopment, FormError> {
    Ok(NewDevelopment {
        name: required(values, "nome")?,
        company_name: field(values, "nome_empresa").to_string(),
        address: field(values, "endereco").to_string(),
        postal_code: required(values, "cep")?,
        note: field(values, "observacao").to_string(),
        company_id: optional_id(values, "construtora_id")?,
    })
}

pub fn parse_new_unit(values: &FormValues) -> Result<NewUnit, FormError> {
    let development_id =
        optional_id(values, "empreendimento_id")?.ok_or(FormError::Required("empreendimento_id"))?;
    let number = required(values, "numero_unidade")?;
    let area_m2 = optional_number(values, "tamanho_m2")?;
    let sale_price = optional_number(values, "preco_venda")?;

    let category = PaymentCategory::from_form_value(&required(values, "mecanismo_pagamento")?)
        .ok_or(FormError::UnknownPayment)?;
    let payment = PaymentMechanism::from_choice(category, field(values, "outro_pagamento"))
        .ok_or(FormError::Required("outro_pagamento"))?;

    Ok(NewUnit {
        development_id,
        number,
        area_m2,
        sale_price,
        payment,
    })
}
