use crate::config::ConsoleConfig;
use crate::gateway::fake::FakeGateway;
use crate::gateway::{GatewayError, ImportResult};
use crate::tests::utils::TestConsole;
use serde_json::json;

const XLSX: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

fn import_response(body: serde_json::Value) -> ImportResult {
    ImportResult::from_json(body.to_string().as_bytes()).unwrap()
}

fn upload(console: &mut TestConsole) {
    console
        .post_file(XLSX, "obras.xlsx", b"PK\x03\x04fake".to_vec())
        .assert_redirect("/importar");
    console.post_form("/importar/enviar", "").assert_redirect("/importar");
}

#[test]
fn idle_page_has_a_disabled_upload_button() {
    let mut console = TestConsole::new(FakeGateway::new());

    let resp = console.get("/importar");

    assert_eq!(resp.status, 200);
    assert!(resp.attr("#upload", "disabled").is_some());
    assert!(resp.attr("#arquivo", "disabled").is_none());
    assert_eq!(resp.attr("#arquivo", "autocomplete").as_deref(), Some("off"));
    assert_eq!(resp.count("#format-guide tbody tr"), 9);
    assert_eq!(
        resp.attr("a[href=\"/importar/modelo.xlsx\"]", "href").as_deref(),
        Some("/importar/modelo.xlsx")
    );
}

#[test]
fn plain_text_file_is_rejected_without_an_api_call() {
    let mut console = TestConsole::new(FakeGateway::new());

    console
        .post_file("text/plain", "notas.txt", b"ola".to_vec())
        .assert_redirect("/importar");
    let resp = console.get("/importar");

    assert_eq!(
        resp.texts(".alert-error"),
        vec!["Por favor, selecione um arquivo Excel (.xlsx ou .xls)"]
    );
    assert!(resp.attr("#upload", "disabled").is_some());

    console.post_form("/importar/enviar", "");
    assert!(console.fake.calls().is_empty());
}

#[test]
fn empty_and_oversized_files_are_rejected() {
    let config = ConsoleConfig {
        max_upload_bytes: 1024,
        ..ConsoleConfig::default()
    };
    let mut console = TestConsole::with_config(FakeGateway::new(), config);

    console.post_file(XLSX, "vazia.xlsx", Vec::new());
    assert_eq!(
        console.get("/importar").texts(".alert-error"),
        vec!["O arquivo selecionado está vazio"]
    );

    console.post_file(XLSX, "grande.xlsx", vec![0u8; 4096]);
    assert_eq!(
        console.get("/importar").texts(".alert-error"),
        vec!["O arquivo excede o limite de 1024 bytes"]
    );
    assert!(console.fake.calls().is_empty());
}

#[test]
fn selected_file_name_and_size_are_shown() {
    let mut console = TestConsole::new(FakeGateway::new());

    console.post_file("application/vnd.ms-excel", "Planilha Março.xls", vec![1u8; 2048]);
    let resp = console.get("/importar");

    assert_eq!(resp.texts(".file-name"), vec!["Planilha Março.xls"]);
    assert_eq!(resp.texts(".file-size"), vec!["Tamanho: 0.00 MB"]);
    assert!(resp.attr("#upload", "disabled").is_none());
    assert_eq!(resp.count(".alert-error"), 0);
}

#[test]
fn upload_sends_the_file_once_and_shows_the_summary() {
    let fake = FakeGateway::new();
    fake.state().import_response = Some(Ok(import_response(json!({
        "empreendimentos_processados": 3,
        "unidades_processadas": 12,
        "erros": 2,
        "detalhes_erros": ["Linha 4: CEP inválido", "Linha 9: preço ausente"],
    }))));
    let mut console = TestConsole::new(fake);

    upload(&mut console);
    let resp = console.get("/importar");

    assert_eq!(resp.texts("#import-summary .count"), vec!["3", "12", "2"]);
    assert_eq!(
        resp.texts("#import-errors li.row-error"),
        vec!["Linha 4: CEP inválido", "Linha 9: preço ausente"]
    );
    assert_eq!(resp.count("#import-errors li.overflow"), 0);

    let uploaded = console.fake.state().uploaded.clone();
    assert_eq!(uploaded, vec![("obras.xlsx".to_string(), XLSX.to_string(), 8)]);
}

#[test]
fn nested_response_errors_show_row_and_data() {
    let fake = FakeGateway::new();
    fake.state().import_response = Some(Ok(import_response(json!({
        "summary": { "total": 2, "success": 1, "errors": 1 },
        "errors": [{ "row": 3, "message": "Empreendimento sem nome", "data": { "cep": "72302-004" } }],
    }))));
    let mut console = TestConsole::new(fake);

    upload(&mut console);
    let resp = console.get("/importar");

    assert_eq!(resp.texts("#import-summary .count"), vec!["1", "0", "1"]);
    assert_eq!(
        resp.texts("#import-errors .message"),
        vec!["Linha 3: Empreendimento sem nome"]
    );
    assert!(resp.texts(".row-data")[0].contains("72302-004"));
}

#[test]
fn long_unit_list_is_capped_at_ten() {
    let units: Vec<_> = (1..=15)
        .map(|n| json!({ "numero_unidade": n, "tamanho_m2": 40.0, "preco_venda": 150000.0, "mecanismo_pagamento": "financiamento" }))
        .collect();
    let errors: Vec<_> = (1..=12).map(|n| format!("Linha {n}: inválida")).collect();
    let fake = FakeGateway::new();
    fake.state().import_response = Some(Ok(import_response(json!({
        "empreendimentos_processados": 1,
        "unidades_processadas": 15,
        "erros": 12,
        "detalhes_erros": errors,
        "empreendimentos": [{ "nome": "Residencial Aurora", "nome_empresa": "Construtora Sol", "cep": "72302-004" }],
        "unidades": units,
    }))));
    let mut console = TestConsole::new(fake);

    upload(&mut console);
    let resp = console.get("/importar");

    assert_eq!(resp.count("#import-units li.unit"), 10);
    assert_eq!(
        resp.texts("#import-units li.overflow"),
        vec!["... e mais 5 unidades"]
    );
    assert_eq!(resp.count("#import-errors li.row-error"), 10);
    assert_eq!(
        resp.texts("#import-errors li.overflow"),
        vec!["... e mais 2 erros"]
    );
    assert_eq!(resp.texts("#import-units li.unit strong")[0], "Unidade 1");
    assert_eq!(resp.count("#import-developments li"), 1);
}

#[test]
fn failed_upload_shows_the_api_message_and_allows_a_new_pick() {
    let fake = FakeGateway::new();
    fake.state().import_response = Some(Err(GatewayError::Api {
        status: 400,
        message: Some("Planilha sem cabeçalho".to_string()),
    }));
    let mut console = TestConsole::new(fake);

    upload(&mut console);
    let resp = console.get("/importar");

    assert_eq!(resp.texts(".alert-error"), vec!["Planilha sem cabeçalho"]);
    assert!(resp.attr("#arquivo", "disabled").is_none());
    assert_eq!(resp.count("#import-result"), 0);
}

#[test]
fn reset_renders_the_same_page_as_a_fresh_visit() {
    let mut console = TestConsole::new(FakeGateway::new());
    let fresh = console.get("/importar").text();

    upload(&mut console);
    assert_eq!(console.get("/importar").count("#import-result"), 1);

    console.post_form("/importar/reset", "").assert_redirect("/importar");
    let after = console.get("/importar").text();

    assert_eq!(after, fresh);
}

#[test]
fn template_download_is_a_workbook() {
    let mut console = TestConsole::new(FakeGateway::new());

    let resp = console.get("/importar/modelo.xlsx");

    assert_eq!(resp.status, 200);
    assert_eq!(resp.content_type.as_deref(), Some(XLSX));
    assert_eq!(&resp.bytes[..2], b"PK");
}
