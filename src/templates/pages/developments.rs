use crate::console::{DrillDown, DrillKind, FilterCriteria, ListingView};
use crate::gateway::{Development, PublicationStatus};
use crate::templates::format::{date_br, opt_date_br};
use crate::templates::pages::drilldown::drilldown_modal;
use crate::templates::{alert, desktop_layout, stat_card, AlertKind};
use chrono::NaiveDateTime;
use maud::{html, Markup};

pub const EMPTY_RESULT: &str = "Nenhum empreendimento encontrado com os filtros aplicados.";

pub struct ListingVm<'a> {
    pub filters: &'a FilterCriteria,
    pub listing: &'a ListingView,
    pub drilldown: &'a DrillDown,
    pub now: NaiveDateTime,
}

pub fn developments_page(vm: &ListingVm) -> Markup {
    let aggregates = vm.listing.aggregates();

    desktop_layout(
        "Empreendimentos",
        html! {
            main class="container" {
                h1 { "Lista de Empreendimentos" }

                div class="stats" {
                    (stat_card(DrillKind::AllDevelopments.slug(), "Total de Empreendimentos", aggregates.total_developments))
                    (stat_card(DrillKind::PublishedDevelopments.slug(), "Empreendimentos Publicados", aggregates.published))
                    (stat_card(DrillKind::AllUnits.slug(), "Total de Unidades", aggregates.total_units))
                }

                (filter_form(vm))

                @if let Some(message) = vm.listing.error() {
                    (alert(AlertKind::Error, message))
                }

                @if vm.listing.is_loading() {
                    p class="loading" { "Carregando..." }
                }

                (developments_table(vm))

                (drilldown_modal(vm.drilldown, vm.now))
            }
        },
    )
}

fn filter_form(vm: &ListingVm) -> Markup {
    let f = vm.filters;
    let loading = vm.listing.is_loading();

    html! {
        section class="card" id="filters" {
            h3 { "Filtros" }
            form method="post" action="/empreendimentos/filtros" {
                label for="construtora_id" { "Construtora" }
                select id="construtora_id" name="construtora_id" {
                    option value="" selected[f.company_id.is_empty()] { "Todas" }
                    @for company in vm.listing.companies() {
                        @let value = company.id.to_string();
                        option value=(value) selected[f.company_id == value] { (company.name) }
                    }
                }

                label for="nome" { "Nome do Empreendimento" }
                input type="text" id="nome" name="nome" value=(f.name);

                label for="dataInicio" { "Data Início" }
                input type="date" id="dataInicio" name="dataInicio" value=(f.start_date);

                label for="dataFim" { "Data Fim" }
                input type="date" id="dataFim" name="dataFim" value=(f.end_date);

                label {
                    input type="checkbox" name="somente_publicadas" value="1" checked[f.published_only];
                    " Apenas publicados"
                }

                div {
                    button type="submit" name="acao" value="buscar" disabled[loading] {
                        @if loading { "Buscando..." } @else { "Buscar" }
                    }
                    " "
                    button type="submit" name="acao" value="limpar" { "Limpar Filtros" }
                }
            }
        }
    }
}

pub fn status_chip(dev: &Development, now: NaiveDateTime) -> Markup {
    match dev.publication_status(now) {
        PublicationStatus::Unpublished => html! {
            span class="chip chip-unpublished" { "Não publicado" }
        },
        PublicationStatus::Published(at) => html! {
            span class="chip chip-published" title={ "Publicado em " (date_br(&at)) } { "Publicado" }
        },
        PublicationStatus::Expired(at) => html! {
            span class="chip chip-expired" title={ "Expirou em " (date_br(&at)) } { "Expirado" }
        },
    }
}

fn developments_table(vm: &ListingVm) -> Markup {
    let rows = vm.listing.developments();
    let publishing = vm.listing.publishing();

    html! {
        section class="card" id="developments" {
            @if rows.is_empty() {
                @if !vm.listing.is_loading() {
                    (alert(AlertKind::Info, EMPTY_RESULT))
                }
            } @else {
                table {
                    thead {
                        tr {
                            th { "Nome" }
                            th { "Construtora" }
                            th { "Endereço" }
                            th { "CEP" }
                            th { "Data Criação" }
                            th { "Status" }
                            th { "Ações" }
                        }
                    }
                    tbody {
                        @for dev in rows {
                            tr data-id=(dev.id) {
                                td { (dev.name) }
                                td { (dev.owner_label()) }
                                td { (dev.address.as_deref().unwrap_or("-")) }
                                td { (dev.postal_code.as_deref().unwrap_or("-")) }
                                td { (opt_date_br(dev.created_at.as_ref())) }
                                td { (status_chip(dev, vm.now)) }
                                td {
                                    @if !dev.is_published() {
                                        form method="post" action={ "/empreendimentos/" (dev.id) "/publicar" } {
                                            button type="submit" class="publish" disabled[publishing.is_some()] {
                                                @if publishing == Some(dev.id) { "Publicando..." } @else { "Publicar" }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
            p class="summary" {
                "Total de empreendimentos encontrados: " strong { (rows.len()) }
            }
        }
    }
}
