use crate::errors::ServerError;
use crate::templates::desktop_layout;
use astra::{Body, Response, ResponseBuilder};
use maud::html;

/// Convert a ServerError into an HTML page with the matching status.
pub fn html_error_response(err: ServerError) -> Response {
    match err {
        ServerError::NotFound => render_error(404, "Página não encontrada"),

        ServerError::BadRequest(msg) => render_error(400, &msg),

        ServerError::XlsxError(msg) => render_error(500, &format!("Erro na planilha: {msg}")),

        ServerError::InternalError => render_error(500, "Erro interno do servidor"),
    }
}

fn render_error(status: u16, message: &str) -> Response {
    let page = desktop_layout(
        "Erro",
        html! {
            main class="container" {
                h1 { "Erro " (status) }
                p { (message) }
                p { a href="/" { "← Voltar ao início" } }
            }
        },
    );

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", "text/html; charset=utf-8")
        .body(Body::from(page.into_string()))
        .unwrap_or_else(|_| Response::new(Body::from("Internal Server Error")))
}
