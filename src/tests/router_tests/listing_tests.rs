use crate::gateway::fake::{company, development, unit, FakeGateway};
use crate::gateway::GatewayError;
use crate::tests::utils::TestConsole;

fn seeded() -> FakeGateway {
    let fake = FakeGateway::with_developments(vec![
        development(1, "Residencial Aurora", true),
        development(2, "Residencial Boreal", false),
        development(3, "Parque Cerrado", true),
    ]);
    {
        let mut st = fake.state();
        st.companies = vec![company(10, "Construtora Sol"), company(11, "Construtora Lua")];
        st.units = vec![
            unit(1, 1, "101"),
            unit(2, 1, "102"),
            unit(3, 2, "201"),
            unit(4, 3, "301"),
        ];
    }
    fake
}

#[test]
fn home_page_links_every_section() {
    let mut console = TestConsole::new(FakeGateway::new());

    let resp = console.get("/");

    assert_eq!(resp.status, 200);
    let body = resp.text();
    for href in ["/empreendimentos", "/empreendimentos/cadastrar", "/unidades/cadastrar", "/importar"] {
        assert!(body.contains(&format!("href=\"{href}\"")), "missing link to {href}");
    }
    assert!(console.fake.calls().is_empty());
}

#[test]
fn first_visit_sets_the_session_cookie_once() {
    let mut console = TestConsole::new(FakeGateway::new());

    let first = console.get("/");
    let second = console.get("/");

    let cookie = first.set_cookie.expect("cookie on first visit");
    assert!(cookie.starts_with("session="));
    assert!(cookie.contains("HttpOnly"));
    assert!(second.set_cookie.is_none());
}

#[test]
fn listing_shows_cards_rows_and_publish_buttons() {
    let mut console = TestConsole::new(seeded());

    let resp = console.get("/empreendimentos");

    assert_eq!(resp.status, 200);
    assert_eq!(resp.texts("#card-total .count"), vec!["3"]);
    assert_eq!(resp.texts("#card-publicados .count"), vec!["2"]);
    assert_eq!(resp.texts("#card-unidades .count"), vec!["4"]);
    assert_eq!(resp.count("#developments tbody tr"), 3);
    // Only the unpublished row can be published.
    assert_eq!(resp.count("#developments form button.publish"), 1);
    assert_eq!(
        resp.attr("#developments tr[data-id=\"2\"] form", "action").as_deref(),
        Some("/empreendimentos/2/publicar")
    );
    assert_eq!(resp.count("#construtora_id option"), 3);
}

fn calls_to(console: &TestConsole, call: &str) -> usize {
    console.fake.calls().iter().filter(|c| *c == call).count()
}

#[test]
fn entering_the_listing_refetches_every_collection() {
    let mut console = TestConsole::new(seeded());
    console.get("/empreendimentos");

    {
        let mut st = console.fake.state();
        st.units.push(unit(5, 2, "202"));
        st.companies.push(company(12, "Construtora Mar"));
    }
    let resp = console.get("/empreendimentos");

    assert_eq!(resp.texts("#card-unidades .count"), vec!["5"]);
    assert_eq!(resp.count("#construtora_id option"), 4);
    for call in ["list_companies", "list_units", "list_developments"] {
        assert_eq!(calls_to(&console, call), 2, "{call}");
    }
}

#[test]
fn search_and_publish_refresh_the_unit_card() {
    let mut console = TestConsole::new(seeded());
    console.get("/empreendimentos");

    console.fake.state().units.push(unit(5, 2, "202"));
    console.post_form("/empreendimentos/filtros", "acao=buscar");
    let after_search = console.get("/empreendimentos");
    assert_eq!(after_search.texts("#card-unidades .count"), vec!["5"]);

    console.fake.state().units.push(unit(6, 2, "203"));
    console.post_form("/empreendimentos/2/publicar", "");
    let after_publish = console.get("/empreendimentos");
    assert_eq!(after_publish.texts("#card-unidades .count"), vec!["6"]);

    // The views right after each redirect did not fetch again.
    assert_eq!(calls_to(&console, "list_units"), 3);
}

#[test]
fn failed_unit_list_recovers_on_search() {
    let mut console = TestConsole::new(seeded());
    console.fake.state().fail_units = Some(GatewayError::Transport("down".into()));

    let failed = console.get("/empreendimentos");
    assert_eq!(failed.texts(".alert-error"), vec!["Erro ao carregar unidades."]);
    assert_eq!(failed.texts("#card-unidades .count"), vec!["0"]);

    console.fake.state().fail_units = None;
    console.post_form("/empreendimentos/filtros", "acao=buscar");
    let resp = console.get("/empreendimentos");

    assert_eq!(resp.count(".alert-error"), 0);
    assert_eq!(resp.texts("#card-unidades .count"), vec!["4"]);
}

#[test]
fn unit_card_ignores_development_filters() {
    let mut console = TestConsole::new(seeded());
    console.get("/empreendimentos");

    console
        .post_form("/empreendimentos/filtros", "acao=buscar&nome=aurora")
        .assert_redirect("/empreendimentos");
    let resp = console.get("/empreendimentos");

    assert_eq!(resp.count("#developments tbody tr"), 1);
    assert_eq!(resp.texts("#card-total .count"), vec!["1"]);
    assert_eq!(resp.texts("#card-unidades .count"), vec!["4"]);
}

#[test]
fn search_sends_only_the_filters_that_are_set() {
    let mut console = TestConsole::new(seeded());
    console.get("/empreendimentos");

    console.post_form(
        "/empreendimentos/filtros",
        "acao=buscar&construtora_id=10&nome=&dataInicio=2024-01-01&dataFim=",
    );

    let query = console.fake.state().last_query.clone().unwrap();
    let keys: Vec<&str> = query.keys().copied().collect();
    assert_eq!(keys, vec!["construtora_id", "dataInicio"]);
    assert_eq!(query["construtora_id"], "10");

    console.post_form(
        "/empreendimentos/filtros",
        "acao=buscar&somente_publicadas=1",
    );
    let query = console.fake.state().last_query.clone().unwrap();
    assert_eq!(query.get("somente_publicadas").map(String::as_str), Some("1"));
    assert_eq!(query.len(), 1);
}

#[test]
fn clearing_filters_resets_the_form_without_reloading() {
    let mut console = TestConsole::new(seeded());
    console.get("/empreendimentos");
    console.post_form("/empreendimentos/filtros", "acao=buscar&nome=boreal&somente_publicadas=1");
    let loads_before = console.fake.calls().len();

    console
        .post_form("/empreendimentos/filtros", "acao=limpar&nome=boreal")
        .assert_redirect("/empreendimentos");
    let resp = console.get("/empreendimentos");

    assert_eq!(resp.attr("#nome", "value").as_deref(), Some(""));
    assert_eq!(resp.attr("input[name=\"somente_publicadas\"]", "checked"), None);
    assert_eq!(console.fake.calls().len(), loads_before);
}

#[test]
fn empty_result_shows_the_no_match_message() {
    let mut console = TestConsole::new(seeded());
    console.get("/empreendimentos");

    console.post_form("/empreendimentos/filtros", "acao=buscar&nome=inexistente");
    let resp = console.get("/empreendimentos");

    assert_eq!(resp.count("#developments tbody tr"), 0);
    assert!(resp
        .text()
        .contains("Nenhum empreendimento encontrado com os filtros aplicados."));
}

#[test]
fn failed_search_keeps_previous_rows_visible() {
    let mut console = TestConsole::new(seeded());
    console.get("/empreendimentos");
    console.fake.state().fail_developments = Some(GatewayError::Transport("timeout".into()));

    console.post_form("/empreendimentos/filtros", "acao=buscar&nome=aurora");
    let resp = console.get("/empreendimentos");

    assert_eq!(resp.count("#developments tbody tr"), 3);
    assert_eq!(
        resp.texts(".alert-error"),
        vec!["Erro ao buscar empreendimentos. Tente novamente."]
    );
}

#[test]
fn publish_reloads_the_listing() {
    let mut console = TestConsole::new(seeded());
    console.get("/empreendimentos");

    console
        .post_form("/empreendimentos/2/publicar", "")
        .assert_redirect("/empreendimentos");
    let resp = console.get("/empreendimentos");

    assert_eq!(resp.texts("#card-publicados .count"), vec!["3"]);
    assert_eq!(resp.count("#developments form button.publish"), 0);
    assert_eq!(resp.count(".alert-error"), 0);
    let calls = console.fake.calls();
    assert_eq!(calls.iter().filter(|c| *c == "list_developments").count(), 2);
}

#[test]
fn failed_publish_leaves_the_table_and_shows_an_error() {
    let mut console = TestConsole::new(seeded());
    let before = console.get("/empreendimentos");
    console.fake.state().fail_publish = Some(GatewayError::Transport("refused".into()));

    console.post_form("/empreendimentos/2/publicar", "");
    let after = console.get("/empreendimentos");

    assert_eq!(
        after.texts("#developments tbody tr"),
        before.texts("#developments tbody tr")
    );
    assert_eq!(
        after.texts(".alert-error"),
        vec!["Erro ao publicar empreendimento. Tente novamente."]
    );
    let calls = console.fake.calls();
    assert_eq!(calls.iter().filter(|c| *c == "list_developments").count(), 1);
}

#[test]
fn drilldown_reflects_the_collection_at_open_time() {
    let mut console = TestConsole::new(seeded());
    console.get("/empreendimentos");
    let calls_before = console.fake.calls().len();

    console
        .post_form("/empreendimentos/detalhe/publicados", "")
        .assert_redirect("/empreendimentos");
    let first = console.get("/empreendimentos");
    assert_eq!(first.attr("#drilldown", "data-kind").as_deref(), Some("publicados"));
    assert_eq!(first.count("#drilldown tbody tr"), 2);
    // Opening never goes to the API.
    assert_eq!(console.fake.calls().len(), calls_before);

    console.post_form("/empreendimentos/2/publicar", "");
    let stale = console.get("/empreendimentos");
    assert_eq!(stale.count("#drilldown tbody tr"), 2);

    console.post_form("/empreendimentos/detalhe/publicados", "");
    let reopened = console.get("/empreendimentos");
    assert_eq!(reopened.count("#drilldown tbody tr"), 3);

    console
        .post_form("/empreendimentos/detalhe/fechar", "")
        .assert_redirect("/empreendimentos");
    assert_eq!(console.get("/empreendimentos").count("#drilldown"), 0);
}

#[test]
fn unit_drilldown_lists_every_unit() {
    let mut console = TestConsole::new(seeded());
    console.get("/empreendimentos");

    console.post_form("/empreendimentos/detalhe/unidades", "");
    let resp = console.get("/empreendimentos");

    assert_eq!(resp.count("#drilldown tbody tr"), 4);
    assert!(resp.text().contains("Financiamento Bancário"));
}

#[test]
fn unknown_routes_and_bad_ids_are_rejected() {
    let mut console = TestConsole::new(seeded());

    assert_eq!(console.get("/nada").status, 404);
    assert_eq!(console.post_form("/empreendimentos/detalhe/outros", "").status, 404);
    assert_eq!(console.post_form("/empreendimentos/abc/publicar", "").status, 400);
}
