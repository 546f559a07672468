use crate::app::App;
use crate::console::forms::{
    parse_new_development, parse_new_unit, FormValues, DEVELOPMENT_CREATE_FAILED,
    UNIT_CREATE_FAILED,
};
use crate::console::{
    actions, session_cookie, session_token_from_cookie, Criterion, DrillKind, SelectedFile,
    SessionHandle, COMPANIES_FAILED,
};
use crate::errors::ServerError;
use crate::gateway::QueryParams;
use crate::responses::{html_response, redirect, with_cookie, ResultResp};
use crate::spreadsheets::import_template_xlsx;
use crate::templates::pages::{
    developments_page, development_form_page, home_page, import_page, unit_form_page, FormVm,
    ListingVm, Notice,
};
use astra::{Body, Request};
use std::io::Read;
use tracing::{debug, warn};

const MAX_FORM_BYTES: u64 = 64 * 1024;

const DEVELOPMENT_CREATED: &str = "Empreendimento cadastrado com sucesso!";
const UNIT_CREATED: &str = "Unidade cadastrada com sucesso!";
const DEVELOPMENTS_UNAVAILABLE: &str = "Erro ao carregar empreendimentos.";

pub fn handle(req: Request, app: &App) -> ResultResp {
    let token = header(&req, "Cookie")
        .as_deref()
        .and_then(session_token_from_cookie)
        .map(str::to_owned);
    let session = app.sessions.resolve(token.as_deref())?;

    let resp = route(req, app, &session.handle)?;

    if session.created {
        with_cookie(resp, &session_cookie(&session.token))
    } else {
        Ok(resp)
    }
}

fn route(req: Request, app: &App, session: &SessionHandle) -> ResultResp {
    let method = req.method().as_str().to_owned();
    let path = req.uri().path().to_owned();
    debug!(%method, %path, "request");

    let segments: Vec<&str> = path.trim_matches('/').split('/').collect();

    match (method.as_str(), segments.as_slice()) {
        ("GET", [""]) => html_response(home_page()),

        ("GET", ["empreendimentos"]) => developments(app, session),
        ("POST", ["empreendimentos", "filtros"]) => {
            let form = read_form(req.into_body())?;
            apply_filters(app, session, &form)
        }
        ("POST", ["empreendimentos", "detalhe", "fechar"]) => {
            session.lock()?.drilldown.close();
            back_to_listing(session)
        }
        ("POST", ["empreendimentos", "detalhe", slug]) => {
            let kind = DrillKind::from_slug(slug).ok_or(ServerError::NotFound)?;
            let mut guard = session.lock()?;
            let s = &mut *guard;
            s.drilldown.open(kind, &s.listing);
            drop(guard);
            back_to_listing(session)
        }
        ("GET", ["empreendimentos", "cadastrar"]) => {
            development_form(app, &FormValues::new(), None)
        }
        ("POST", ["empreendimentos", "cadastrar"]) => {
            let form = read_form(req.into_body())?;
            create_development(app, form)
        }
        ("POST", ["empreendimentos", id, "publicar"]) => {
            let id = id
                .parse::<i64>()
                .map_err(|_| ServerError::BadRequest(format!("invalid development id: {id}")))?;
            actions::publish(session, app.gateway(), id)?;
            back_to_listing(session)
        }

        ("GET", ["unidades", "cadastrar"]) => unit_form(app, &FormValues::new(), None),
        ("POST", ["unidades", "cadastrar"]) => {
            let form = read_form(req.into_body())?;
            create_unit(app, form)
        }

        ("GET", ["importar"]) => html_response(import_page(&session.lock()?.import)),
        ("POST", ["importar", "arquivo"]) => {
            let file = read_selected_file(req, app.config.max_upload_bytes)?;
            // Rejections are recorded on the workflow and shown by the page.
            let _ = session.lock()?.import.select_file(file);
            redirect("/importar")
        }
        ("POST", ["importar", "enviar"]) => {
            actions::upload(session, app.gateway())?;
            redirect("/importar")
        }
        ("POST", ["importar", "reset"]) => {
            if let Err(err) = session.lock()?.import.reset() {
                debug!(error = %err, "reset ignored");
            }
            redirect("/importar")
        }
        ("GET", ["importar", "modelo.xlsx"]) => import_template_xlsx(),

        _ => Err(ServerError::NotFound),
    }
}

fn developments(app: &App, session: &SessionHandle) -> ResultResp {
    actions::refresh_on_view(session, app.gateway())?;

    let s = session.lock()?;
    let vm = ListingVm {
        filters: s.filters.criteria(),
        listing: &s.listing,
        drilldown: &s.drilldown,
        now: chrono::Local::now().naive_local(),
    };
    html_response(developments_page(&vm))
}

fn apply_filters(app: &App, session: &SessionHandle, form: &FormValues) -> ResultResp {
    let field = |name: &str| form.get(name).cloned().unwrap_or_default();

    if form.get("acao").map(String::as_str) == Some("limpar") {
        session.lock()?.filters.clear();
        return back_to_listing(session);
    }

    {
        let mut s = session.lock()?;
        s.filters.set_criterion(Criterion::CompanyId(field("construtora_id")));
        s.filters.set_criterion(Criterion::Name(field("nome")));
        s.filters.set_criterion(Criterion::StartDate(field("dataInicio")));
        s.filters.set_criterion(Criterion::EndDate(field("dataFim")));
        // Unchecked boxes are not submitted at all.
        s.filters
            .set_criterion(Criterion::PublishedOnly(form.contains_key("somente_publicadas")));
    }

    actions::search(session, app.gateway())?;
    back_to_listing(session)
}

/// Redirect to the listing showing what the action just left there.
fn back_to_listing(session: &SessionHandle) -> ResultResp {
    session.lock()?.listing.hold_next_view();
    redirect("/empreendimentos")
}

fn development_form(app: &App, values: &FormValues, notice: Option<Notice>) -> ResultResp {
    let (companies, load_notice) = match app.gateway().list_companies() {
        Ok(companies) => (companies, None),
        Err(err) => (
            Vec::new(),
            Some(Notice::Error(err.user_message(COMPANIES_FAILED))),
        ),
    };
    let notice = notice.or(load_notice);

    html_response(development_form_page(&FormVm {
        values,
        notice: notice.as_ref(),
        options: &companies,
    }))
}

fn create_development(app: &App, values: FormValues) -> ResultResp {
    let payload = match parse_new_development(&values) {
        Ok(payload) => payload,
        Err(err) => return development_form(app, &values, Some(Notice::Error(err.to_string()))),
    };

    match app.gateway().create_development(&payload) {
        Ok(()) => development_form(
            app,
            &FormValues::new(),
            Some(Notice::Success(DEVELOPMENT_CREATED.to_string())),
        ),
        Err(err) => development_form(
            app,
            &values,
            Some(Notice::Error(err.user_message(DEVELOPMENT_CREATE_FAILED))),
        ),
    }
}

fn unit_form(app: &App, values: &FormValues, notice: Option<Notice>) -> ResultResp {
    let (developments, load_notice) = match app.gateway().list_developments(&QueryParams::new()) {
        Ok(developments) => (developments, None),
        Err(err) => (
            Vec::new(),
            Some(Notice::Error(err.user_message(DEVELOPMENTS_UNAVAILABLE))),
        ),
    };
    let notice = notice.or(load_notice);

    html_response(unit_form_page(&FormVm {
        values,
        notice: notice.as_ref(),
        options: &developments,
    }))
}

fn create_unit(app: &App, values: FormValues) -> ResultResp {
    let payload = match parse_new_unit(&values) {
        Ok(payload) => payload,
        Err(err) => return unit_form(app, &values, Some(Notice::Error(err.to_string()))),
    };

    match app.gateway().create_unit(&payload) {
        Ok(()) => unit_form(
            app,
            &FormValues::new(),
            Some(Notice::Success(UNIT_CREATED.to_string())),
        ),
        Err(err) => unit_form(
            app,
            &values,
            Some(Notice::Error(err.user_message(UNIT_CREATE_FAILED))),
        ),
    }
}

fn header(req: &Request, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
}

fn read_limited(mut body: Body, limit: u64) -> Result<Vec<u8>, ServerError> {
    let mut buf = Vec::new();
    body.reader()
        .take(limit)
        .read_to_end(&mut buf)
        .map_err(|e| ServerError::BadRequest(format!("could not read request body: {e}")))?;
    Ok(buf)
}

fn read_form(body: Body) -> Result<FormValues, ServerError> {
    let raw = read_limited(body, MAX_FORM_BYTES)?;
    Ok(url::form_urlencoded::parse(&raw).into_owned().collect())
}

/// Raw-body file selection. The name arrives percent-encoded in
/// `X-File-Name`; one byte past the limit is read so oversize files are
/// still recognised as such.
fn read_selected_file(req: Request, max_upload_bytes: usize) -> Result<SelectedFile, ServerError> {
    let media_type = header(&req, "Content-Type").unwrap_or_default();
    let name = header(&req, "X-File-Name")
        .and_then(|raw| {
            url::form_urlencoded::parse(raw.as_bytes())
                .next()
                .map(|(name, _)| name.into_owned())
        })
        .unwrap_or_default();

    let bytes = read_limited(req.into_body(), max_upload_bytes as u64 + 1)?;
    if bytes.len() > max_upload_bytes {
        warn!(file = %name, "upload body over the size limit");
    }

    Ok(SelectedFile {
        name,
        media_type,
        bytes,
    })
}
