use crate::console::forms::FormValues;
use crate::gateway::{Company, Development, PaymentCategory};
use crate::templates::{alert, desktop_layout, AlertKind};
use maud::{html, Markup};

/// Outcome shown above a creation form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

pub struct FormVm<'a, T> {
    pub values: &'a FormValues,
    pub notice: Option<&'a Notice>,
    /// Choices for the parent select, empty when they failed to load.
    pub options: &'a [T],
}

fn value<'a>(values: &'a FormValues, name: &str) -> &'a str {
    values.get(name).map(String::as_str).unwrap_or("")
}

fn notice(n: Option<&Notice>) -> Markup {
    match n {
        Some(Notice::Success(msg)) => html! {
            (alert(AlertKind::Success, msg))
            p { a href="/empreendimentos" { "Ver lista de empreendimentos" } }
        },
        Some(Notice::Error(msg)) => alert(AlertKind::Error, msg),
        None => html! {},
    }
}

fn text_field(values: &FormValues, name: &str, label: &str, required: bool) -> Markup {
    html! {
        label for=(name) { (label) @if required { " *" } }
        input type="text" id=(name) name=(name) value=(value(values, name)) required[required];
    }
}

pub fn development_form_page(vm: &FormVm<Company>) -> Markup {
    let v = vm.values;
    let selected = value(v, "construtora_id");

    desktop_layout(
        "Cadastrar Empreendimento",
        html! {
            main class="container" {
                h1 { "Cadastrar Empreendimento" }
                (notice(vm.notice))

                form class="card" id="development-form" method="post" action="/empreendimentos/cadastrar" {
                    (text_field(v, "nome", "Nome do Empreendimento", true))

                    label for="construtora_id" { "Construtora" }
                    select id="construtora_id" name="construtora_id" {
                        option value="" selected[selected.is_empty()] { "Sem construtora cadastrada" }
                        @for company in vm.options {
                            @let id = company.id.to_string();
                            option value=(id) selected[selected == id] { (company.name) }
                        }
                    }

                    (text_field(v, "nome_empresa", "Nome da Empresa", false))
                    (text_field(v, "endereco", "Endereço", false))
                    (text_field(v, "cep", "CEP", true))

                    label for="observacao" { "Observação" }
                    textarea id="observacao" name="observacao" rows="3" { (value(v, "observacao")) }

                    div { button type="submit" { "Cadastrar" } }
                }
            }
        },
    )
}

pub fn unit_form_page(vm: &FormVm<Development>) -> Markup {
    let v = vm.values;
    let selected_dev = value(v, "empreendimento_id");
    let selected_payment = value(v, "mecanismo_pagamento");

    desktop_layout(
        "Cadastrar Unidade",
        html! {
            main class="container" {
                h1 { "Cadastrar Unidade" }
                (notice(vm.notice))

                form class="card" id="unit-form" method="post" action="/unidades/cadastrar" {
                    label for="empreendimento_id" { "Empreendimento *" }
                    select id="empreendimento_id" name="empreendimento_id" required {
                        option value="" selected[selected_dev.is_empty()] { "Selecione..." }
                        @for dev in vm.options {
                            @let id = dev.id.to_string();
                            option value=(id) selected[selected_dev == id] { (dev.name) }
                        }
                    }

                    (text_field(v, "numero_unidade", "Número da Unidade", true))
                    (text_field(v, "tamanho_m2", "Tamanho (m²)", false))
                    (text_field(v, "preco_venda", "Preço de Venda (R$)", false))

                    label for="mecanismo_pagamento" { "Mecanismo de Pagamento *" }
                    select id="mecanismo_pagamento" name="mecanismo_pagamento" required {
                        @for category in PaymentCategory::ALL {
                            option
                                value=(category.form_value())
                                selected[selected_payment == category.form_value()]
                            { (category.label()) }
                        }
                    }

                    (text_field(v, "outro_pagamento", "Outro mecanismo (quando \"Outros\")", false))

                    div { button type="submit" { "Cadastrar" } }
                }
            }
        },
    )
}
