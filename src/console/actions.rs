//! Operations that talk to the API on behalf of a session.
//!
//! Each one locks the session to flip its busy flag, releases the lock for
//! the remote call, then locks again to apply the answer. Failures end up
//! as messages in the session, never as `Err`: the only errors returned are
//! lock failures.

use crate::console::listing::LoadTicket;
use crate::console::{ImportError, ListingBusy, SessionHandle};
use crate::errors::ServerError;
use crate::gateway::{Gateway, GatewayError};
use std::thread;
use tracing::{debug, info};

fn joined<T>(result: thread::Result<Result<T, GatewayError>>) -> Result<T, GatewayError> {
    result.unwrap_or_else(|_| Err(GatewayError::Transport("request worker panicked".into())))
}

/// Entering the listing page. Refetches everything unless the view is
/// held for the redirect after one of the listing's own actions.
pub fn refresh_on_view(session: &SessionHandle, gateway: &dyn Gateway) -> Result<(), ServerError> {
    let ticket = {
        let mut guard = session.lock()?;
        if !guard.listing.take_view_refresh() {
            return Ok(());
        }
        let s = &mut *guard;
        s.listing.begin_load(&s.filters)
    };

    reload(session, gateway, ticket)
}

/// Operator-triggered reload with the current filters. Ignored while a
/// load is already running.
pub fn search(session: &SessionHandle, gateway: &dyn Gateway) -> Result<(), ServerError> {
    let ticket = {
        let mut guard = session.lock()?;
        if guard.listing.is_loading() {
            debug!("search ignored, load in flight");
            return Ok(());
        }
        let s = &mut *guard;
        s.listing.begin_load(&s.filters)
    };

    reload(session, gateway, ticket)
}

/// Publish one development, then reload the whole listing with whatever
/// filters are active at that point.
pub fn publish(session: &SessionHandle, gateway: &dyn Gateway, id: i64) -> Result<(), ServerError> {
    if let Err(ListingBusy::Publishing(current)) = session.lock()?.listing.begin_publish(id) {
        debug!(id, current, "publish ignored, another in flight");
        return Ok(());
    }

    let outcome = gateway.publish_development(id);

    let ticket = {
        let mut guard = session.lock()?;
        if !guard.listing.finish_publish(id, outcome) {
            return Ok(());
        }
        info!(id, "development published");
        let s = &mut *guard;
        s.listing.begin_load(&s.filters)
    };

    reload(session, gateway, ticket)
}

/// Companies, units and the filtered developments, fetched side by side.
/// The side lists are only applied with the load they belong to.
fn reload(session: &SessionHandle, gateway: &dyn Gateway, ticket: LoadTicket) -> Result<(), ServerError> {
    debug!(query = ?ticket.query, "reloading listing");
    let (companies, units, developments) = thread::scope(|scope| {
        let companies = scope.spawn(|| gateway.list_companies());
        let units = scope.spawn(|| gateway.list_units());
        let developments = gateway.list_developments(&ticket.query);
        (joined(companies.join()), joined(units.join()), developments)
    });

    let mut s = session.lock()?;
    if s.listing.finish_load(ticket, developments) {
        s.listing.apply_companies(companies);
        s.listing.apply_units(units);
    }
    Ok(())
}

/// Send the selected spreadsheet. Without a selected file this only
/// records the workflow's message.
pub fn upload(session: &SessionHandle, gateway: &dyn Gateway) -> Result<(), ServerError> {
    let file = match session.lock()?.import.begin_upload() {
        Ok(file) => file,
        Err(err @ (ImportError::Busy | ImportError::ResultPending)) => {
            debug!(error = %err, "upload ignored");
            return Ok(());
        }
        Err(_) => return Ok(()),
    };

    info!(file = %file.name, size = file.size(), "uploading spreadsheet");
    let result = gateway.import_spreadsheet(file.bytes, &file.name, &file.media_type);
    session.lock()?.import.finish_upload(result);
    Ok(())
}
