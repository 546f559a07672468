use crate::console::{DrillDataset, DrillDown};
use crate::gateway::{Development, Unit};
use crate::templates::format::{area_m2, currency_br, opt_date_br};
use crate::templates::pages::developments::status_chip;
use chrono::NaiveDateTime;
use maud::{html, Markup};

pub fn drilldown_modal(drilldown: &DrillDown, now: NaiveDateTime) -> Markup {
    let DrillDown::Open { kind, dataset } = drilldown else {
        return html! {};
    };

    html! {
        div class="modal" id="drilldown" data-kind=(kind.slug()) {
            div class="modal-body" {
                h2 { (kind.title()) " (" (dataset.len()) ")" }

                @match dataset {
                    DrillDataset::Developments(rows) => (development_rows(rows, now)),
                    DrillDataset::Units(rows) => (unit_rows(rows)),
                }

                form method="post" action="/empreendimentos/detalhe/fechar" {
                    button type="submit" { "Fechar" }
                }
            }
        }
    }
}

fn development_rows(rows: &[Development], now: NaiveDateTime) -> Markup {
    html! {
        @if rows.is_empty() {
            p { "Nenhum empreendimento." }
        } @else {
            table {
                thead {
                    tr { th { "Nome" } th { "Construtora" } th { "Criado em" } th { "Status" } }
                }
                tbody {
                    @for dev in rows {
                        tr {
                            td { (dev.name) }
                            td { (dev.owner_label()) }
                            td { (opt_date_br(dev.created_at.as_ref())) }
                            td { (status_chip(dev, now)) }
                        }
                    }
                }
            }
        }
    }
}

fn unit_rows(rows: &[Unit]) -> Markup {
    html! {
        @if rows.is_empty() {
            p { "Nenhuma unidade." }
        } @else {
            table {
                thead {
                    tr {
                        th { "Unidade" }
                        th { "Empreendimento" }
                        th { "Área" }
                        th { "Preço" }
                        th { "Pagamento" }
                    }
                }
                tbody {
                    @for unit in rows {
                        tr {
                            td { (unit.number) }
                            td {
                                @match &unit.development_name {
                                    Some(name) => (name),
                                    None => { "#" (unit.development_id) },
                                }
                            }
                            td { (area_m2(unit.area_m2)) }
                            td { (currency_br(unit.sale_price)) }
                            td { (unit.payment.label()) }
                        }
                    }
                }
            }
        }
    }
}
