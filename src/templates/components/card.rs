use maud::{html, Markup};

pub fn card(title: &str, body: Markup) -> Markup {
    html! {
        section class="card" {
            h2 { (title) }
            div class="card-body" {
                (body)
            }
        }
    }
}

/// Clickable counter. Posting it opens the matching drill-down.
pub fn stat_card(slug: &str, label: &str, count: usize) -> Markup {
    html! {
        form class="stat" id={ "card-" (slug) } method="post" action={ "/empreendimentos/detalhe/" (slug) } {
            button type="submit" {
                span class="count" { (count) }
                span class="label" { (label) }
            }
        }
    }
}
