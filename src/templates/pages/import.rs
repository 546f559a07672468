use crate::console::{capped, ImportState, ImportWorkflow};
use crate::gateway::{ImportResult, RowError};
use crate::spreadsheets::TEMPLATE_COLUMNS;
use crate::templates::format::{area_m2, currency_br, megabytes};
use crate::templates::{alert, card, desktop_layout, AlertKind};
use maud::{html, Markup, PreEscaped};

// Sends the chosen file as the raw request body. The server validates it
// again, so the `accept` filter here is only a convenience.
const PICKER_SCRIPT: &str = r#"
(function () {
  var input = document.getElementById('arquivo');
  var zone = document.getElementById('dropzone');
  if (!input || !zone) return;

  function send(file) {
    if (!file) return;
    fetch('/importar/arquivo', {
      method: 'POST',
      headers: {
        'Content-Type': file.type || 'application/octet-stream',
        'X-File-Name': encodeURIComponent(file.name)
      },
      body: file
    }).then(function () { window.location.assign('/importar'); });
  }

  input.addEventListener('change', function () { send(input.files[0]); });
  zone.addEventListener('dragover', function (e) { e.preventDefault(); });
  zone.addEventListener('drop', function (e) {
    e.preventDefault();
    if (input.disabled) return;
    send(e.dataTransfer.files[0]);
  });
})();
"#;

pub fn import_page(workflow: &ImportWorkflow) -> Markup {
    desktop_layout(
        "Upload de Planilha",
        html! {
            main class="container" {
                h1 { "Upload de Planilha" }
                p { "Envie um arquivo Excel com empreendimentos e unidades para cadastro em lote." }

                @if let Some(message) = workflow.message() {
                    (alert(AlertKind::Error, message))
                }

                @match workflow.state() {
                    ImportState::ResultReady(result) => (result_section(result)),
                    ImportState::Uploading { file_name } => {
                        meta http-equiv="refresh" content="2";
                        section class="card" id="uploading" {
                            p { "Processando " strong { (file_name) } "..." }
                        }
                    },
                    _ => (picker_section(workflow)),
                }

                (format_guide())
            }
        },
    )
}

fn picker_section(workflow: &ImportWorkflow) -> Markup {
    let selected = workflow.selected_file();

    html! {
        section class="card" id="picker" {
            div.dropzone.selected[selected.is_some()] id="dropzone" {
                @match selected {
                    Some(file) => {
                        p class="file-name" { (file.name) }
                        p class="file-size" { "Tamanho: " (megabytes(file.size())) }
                    },
                    None => p { "Arraste o arquivo aqui ou selecione abaixo" },
                }
                input
                    type="file"
                    id="arquivo"
                    name="arquivo"
                    accept=".xlsx,.xls"
                    autocomplete="off"
                    disabled[!workflow.picker_enabled()];
            }

            form method="post" action="/importar/enviar" {
                button type="submit" id="upload" disabled[!workflow.upload_enabled()] {
                    "Fazer Upload"
                }
            }

            @if selected.is_some() {
                form method="post" action="/importar/reset" {
                    button type="submit" id="reset" { "Cancelar" }
                }
            }

            script { (PreEscaped(PICKER_SCRIPT)) }
        }
    }
}

fn result_section(result: &ImportResult) -> Markup {
    let (units, hidden_units) = capped(&result.units);
    let (errors, hidden_errors) = capped(&result.errors);

    html! {
        section class="card" id="import-result" {
            (alert(AlertKind::Success, "Upload realizado com sucesso!"))

            h3 { "Resumo" }
            ul id="import-summary" {
                li data-kind="empreendimentos" {
                    "Empreendimentos processados: " span class="count" { (result.developments_processed) }
                }
                li data-kind="unidades" {
                    "Unidades processadas: " span class="count" { (result.units_processed) }
                }
                li data-kind="erros" {
                    "Erros encontrados: " span class="count" { (result.error_count) }
                }
            }

            @if !result.errors.is_empty() {
                h3 { "Erros" }
                ul id="import-errors" {
                    @for err in errors {
                        (row_error(err))
                    }
                    @if hidden_errors > 0 {
                        li class="overflow" { "... e mais " (hidden_errors) " erros" }
                    }
                }
            }

            @if !result.developments.is_empty() {
                h3 { "Empreendimentos criados" }
                ul id="import-developments" {
                    @for dev in &result.developments {
                        li class="development" {
                            strong { (dev.name) }
                            br;
                            "Empresa: " (dev.company_name.as_deref().unwrap_or("-"))
                            " | CEP: " (dev.postal_code.as_deref().unwrap_or("-"))
                        }
                    }
                }
            }

            @if !result.units.is_empty() {
                h3 { "Unidades criadas" }
                ul id="import-units" {
                    @for unit in units {
                        li class="unit" {
                            strong { "Unidade " (unit.number) }
                            br;
                            (area_m2(unit.area_m2)) " | " (currency_br(unit.sale_price))
                            " | " (unit.payment.as_deref().unwrap_or("-"))
                        }
                    }
                    @if hidden_units > 0 {
                        li class="overflow" { "... e mais " (hidden_units) " unidades" }
                    }
                }
            }

            form method="post" action="/importar/reset" {
                button type="submit" id="reset" { "Fazer Novo Upload" }
            }
        }
    }
}

fn row_error(err: &RowError) -> Markup {
    let data = err
        .data
        .as_ref()
        .and_then(|v| serde_json::to_string_pretty(v).ok());

    html! {
        li class="row-error" {
            span class="message" {
                @if let Some(row) = err.row {
                    "Linha " (row) ": "
                }
                (err.message)
            }
            @if let Some(data) = data {
                pre class="row-data" { (data) }
            }
        }
    }
}

fn format_guide() -> Markup {
    card(
        "Formato da planilha",
        html! {
            p { "A primeira linha deve conter os cabeçalhos abaixo. Cada linha seguinte descreve uma unidade; linhas com o mesmo empreendimento são agrupadas." }
            table id="format-guide" {
                thead { tr { th { "Coluna" } th { "Conteúdo" } th { "Obrigatória" } } }
                tbody {
                    @for (column, description, required) in TEMPLATE_COLUMNS {
                        tr {
                            td { code { (column) } }
                            td { (description) }
                            td { @if required { "Sim" } @else { "Não" } }
                        }
                    }
                }
            }
            p { a href="/importar/modelo.xlsx" { "Baixar planilha modelo" } }
        },
    )
}
