use crate::errors::ServerError;
use crate::responses::{xlsx_response, ResultResp};
use rust_xlsxwriter::{Format, Workbook};

/// Column header, what goes in it, and whether the API requires it.
pub const TEMPLATE_COLUMNS: [(&str, &str, bool); 9] = [
    ("nome_empreendimento", "Nome do empreendimento", true),
    ("nome_empresa", "Empresa responsável", false),
    ("endereco", "Endereço", false),
    ("cep", "CEP", true),
    ("observacao", "Observações", false),
    ("numero_unidade", "Número da unidade", false),
    ("tamanho_m2", "Área em m²", false),
    ("preco_venda", "Preço de venda", false),
    ("mecanismo_pagamento", "financiamento, avista, consorcio ou texto livre", false),
];

enum Cell {
    Text(&'static str),
    Number(f64),
}

const EXAMPLE_ROWS: [[Cell; 9]; 2] = [
    [
        Cell::Text("Residencial Aurora"),
        Cell::Text("Construtora Exemplo"),
        Cell::Text("QR 401 Conjunto 5"),
        Cell::Text("72302-004"),
        Cell::Text(""),
        Cell::Text("101"),
        Cell::Number(45.5),
        Cell::Number(180000.0),
        Cell::Text("financiamento"),
    ],
    [
        Cell::Text("Residencial Aurora"),
        Cell::Text("Construtora Exemplo"),
        Cell::Text("QR 401 Conjunto 5"),
        Cell::Text("72302-004"),
        Cell::Text(""),
        Cell::Text("102"),
        Cell::Number(52.0),
        Cell::Number(205000.0),
        Cell::Text("avista"),
    ],
];

fn xlsx_err(what: &str) -> impl Fn(rust_xlsxwriter::XlsxError) -> ServerError + '_ {
    move |e| ServerError::XlsxError(format!("Failed to write {what}: {e}"))
}

/// Builds the blank import workbook: header row plus two sample units.
pub fn import_template_buffer() -> Result<Vec<u8>, ServerError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    let bold = Format::new().set_bold();

    for (col, (header, _, _)) in TEMPLATE_COLUMNS.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *header, &bold)
            .map_err(xlsx_err(header))?;
        worksheet
            .set_column_width(col as u16, 22)
            .map_err(xlsx_err("column width"))?;
    }

    for (i, row) in EXAMPLE_ROWS.iter().enumerate() {
        let r = (i + 1) as u32;
        for (col, cell) in row.iter().enumerate() {
            let col = col as u16;
            match cell {
                Cell::Text("") => {}
                Cell::Text(text) => {
                    worksheet
                        .write_string(r, col, *text)
                        .map_err(xlsx_err("example text"))?;
                }
                Cell::Number(n) => {
                    worksheet
                        .write_number(r, col, *n)
                        .map_err(xlsx_err("example number"))?;
                }
            }
        }
    }

    workbook
        .save_to_buffer()
        .map_err(|e| ServerError::XlsxError(format!("Failed to save workbook: {e}")))
}

pub fn import_template_xlsx() -> ResultResp {
    xlsx_response(import_template_buffer()?, "modelo_importacao.xlsx")
}
