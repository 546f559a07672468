use maud::{html, Markup, PreEscaped, DOCTYPE};

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; color: #1f2937; background: #f9fafb; }
header { display: flex; align-items: center; gap: 1rem; padding: 0.75rem 1.5rem; background: #fff; box-shadow: 0 1px 3px rgba(0,0,0,.1); }
header nav ul { display: flex; gap: 1rem; list-style: none; margin: 0; padding: 0; }
header a { color: #1d4ed8; text-decoration: none; }
main.container { max-width: 1200px; margin: 2rem auto; padding: 0 1rem; }
.card { background: #fff; border-radius: 8px; box-shadow: 0 1px 3px rgba(0,0,0,.1); padding: 1.25rem; margin-bottom: 1.5rem; }
.stats { display: grid; grid-template-columns: repeat(3, 1fr); gap: 1rem; margin-bottom: 1.5rem; }
.stat button { width: 100%; text-align: left; background: #fff; border: 1px solid #e5e7eb; border-radius: 8px; padding: 1rem; cursor: pointer; }
.stat .count { display: block; font-size: 1.5rem; font-weight: 600; }
.alert { padding: 0.75rem 1rem; border-radius: 6px; margin-bottom: 1rem; }
.alert-error { background: #fee2e2; color: #991b1b; }
.alert-success { background: #dcfce7; color: #166534; }
.alert-info { background: #dbeafe; color: #1e40af; }
table { width: 100%; border-collapse: collapse; }
th, td { padding: 8px; border-bottom: 1px solid #f3f4f6; text-align: left; }
th { border-bottom: 2px solid #e5e7eb; }
.chip { padding: 2px 8px; border-radius: 999px; font-size: 0.85em; }
.chip-published { background: #dcfce7; color: #166534; }
.chip-expired { background: #fef3c7; color: #92400e; }
.chip-unpublished { background: #fee2e2; color: #991b1b; }
.modal { position: fixed; inset: 0; background: rgba(0,0,0,.4); display: flex; align-items: center; justify-content: center; }
.modal-body { background: #fff; border-radius: 8px; padding: 1.5rem; max-width: 900px; width: 90%; max-height: 80vh; overflow-y: auto; }
.dropzone { border: 2px dashed #d1d5db; border-radius: 8px; padding: 2rem; text-align: center; margin-bottom: 1rem; }
.dropzone.selected { border-color: #16a34a; background: #f0fdf4; }
.overflow { font-style: italic; color: #6b7280; }
label { display: block; margin: 0.5rem 0 0.25rem; }
"#;

pub fn desktop_layout(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="pt-BR" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " | Obras HIS" }
                style { (PreEscaped(STYLE)) }
            }
            body {
                header {
                    svg
                        xmlns="http://www.w3.org/2000/svg"
                        width="24"
                        height="24"
                        viewBox="0 0 24 24"
                        fill="none"
                        stroke="#524ed2"
                        stroke-width="2"
                        stroke-linecap="round"
                        stroke-linejoin="round"
                    {
                        path stroke="none" d="M0 0h24v24H0z" fill="none" {}
                        path d="M5 12l-2 0l9 -9l9 9l-2 0" {}
                        path d="M5 12v7a2 2 0 0 0 2 2h10a2 2 0 0 0 2 -2v-7" {}
                        path d="M9 21v-6a2 2 0 0 1 2 -2h2a2 2 0 0 1 2 2v6" {}
                    }
                    h3 { "Comercialização de Obras HIS" }
                    nav {
                        ul {
                            li { a href="/" { "Início" } }
                            li { a href="/empreendimentos" { "Empreendimentos" } }
                            li { a href="/empreendimentos/cadastrar" { "Cadastrar Empreendimento" } }
                            li { a href="/unidades/cadastrar" { "Cadastrar Unidade" } }
                            li { a href="/importar" { "Upload de Planilha" } }
                        }
                    }
                }
                (content)
            }
        }
    }
}
