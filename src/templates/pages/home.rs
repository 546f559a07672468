// templates/pages/home.rs

use crate::templates::{card, desktop_layout};
use maud::{html, Markup};

const SECTIONS: [(&str, &str, &str); 4] = [
    (
        "Empreendimentos",
        "/empreendimentos",
        "Consulte, filtre e publique os empreendimentos cadastrados.",
    ),
    (
        "Cadastrar Empreendimento",
        "/empreendimentos/cadastrar",
        "Registre um novo empreendimento habitacional.",
    ),
    (
        "Cadastrar Unidade",
        "/unidades/cadastrar",
        "Adicione unidades a um empreendimento existente.",
    ),
    (
        "Upload de Planilha",
        "/importar",
        "Importe empreendimentos e unidades em lote a partir de um arquivo Excel.",
    ),
];

pub fn home_page() -> Markup {
    desktop_layout(
        "Início",
        html! {
            main class="container" {
                h1 { "Comercialização de Obras HIS" }
                p { "Painel administrativo de empreendimentos de habitação de interesse social." }

                @for (title, href, blurb) in SECTIONS {
                    (card(title, html! {
                        p { (blurb) }
                        a href=(href) { "Acessar" }
                    }))
                }
            }
        },
    )
}
