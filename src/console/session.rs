use crate::console::token::generate_token_default;
use crate::console::{DrillDown, FilterState, ImportWorkflow, ListingView};
use crate::errors::ServerError;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};
use tracing::debug;

pub const SESSION_COOKIE: &str = "session";

/// Everything one operator has on screen. Lost when the process restarts,
/// like a browser tab losing its state on reload.
#[derive(Debug, Clone)]
pub struct ConsoleSession {
    pub filters: FilterState,
    pub listing: ListingView,
    pub drilldown: DrillDown,
    pub import: ImportWorkflow,
}

impl ConsoleSession {
    pub fn new(published_only_default: bool, max_upload_bytes: usize) -> Self {
        Self {
            filters: FilterState::new(published_only_default),
            listing: ListingView::new(),
            drilldown: DrillDown::default(),
            import: ImportWorkflow::new(max_upload_bytes),
        }
    }
}

#[derive(Clone)]
pub struct SessionHandle(Arc<Mutex<ConsoleSession>>);

impl SessionHandle {
    /// Never hold the returned guard across a remote call.
    pub fn lock(&self) -> Result<MutexGuard<'_, ConsoleSession>, ServerError> {
        self.0.lock().map_err(|_| ServerError::InternalError)
    }
}

pub struct ResolvedSession {
    pub token: String,
    pub handle: SessionHandle,
    /// The cookie must be (re)sent.
    pub created: bool,
}

struct Entry {
    handle: SessionHandle,
    last_seen: Instant,
}

pub struct SessionStore {
    sessions: Mutex<HashMap<String, Entry>>,
    published_only_default: bool,
    max_upload_bytes: usize,
    ttl: Duration,
    max_sessions: usize,
}

impl SessionStore {
    pub fn new(published_only_default: bool, max_upload_bytes: usize) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            published_only_default,
            max_upload_bytes,
            ttl: Duration::from_secs(2 * 60 * 60),
            max_sessions: 1024,
        }
    }

    /// Idle sessions older than `ttl` are dropped, and at most
    /// `max_sessions` are kept (least recently seen go first).
    pub fn with_limits(mut self, ttl: Duration, max_sessions: usize) -> Self {
        self.ttl = ttl;
        self.max_sessions = max_sessions.max(1);
        self
    }

    /// Session for the cookie token, or a fresh one when the token is
    /// missing, unknown or expired.
    pub fn resolve(&self, token: Option<&str>) -> Result<ResolvedSession, ServerError> {
        self.resolve_at(token, Instant::now())
    }

    fn resolve_at(&self, token: Option<&str>, now: Instant) -> Result<ResolvedSession, ServerError> {
        let mut sessions = self.sessions.lock().map_err(|_| ServerError::InternalError)?;

        let ttl = self.ttl;
        let before = sessions.len();
        sessions.retain(|_, entry| now.saturating_duration_since(entry.last_seen) < ttl);
        if sessions.len() < before {
            debug!(expired = before - sessions.len(), "console sessions expired");
        }

        if let Some(token) = token {
            if let Some(entry) = sessions.get_mut(token) {
                entry.last_seen = now;
                return Ok(ResolvedSession {
                    token: token.to_string(),
                    handle: entry.handle.clone(),
                    created: false,
                });
            }
        }

        while sessions.len() >= self.max_sessions {
            let oldest = sessions
                .iter()
                .min_by_key(|(_, entry)| entry.last_seen)
                .map(|(token, _)| token.clone());
            match oldest {
                Some(token) => {
                    sessions.remove(&token);
                    debug!("session store full, dropped least recently seen session");
                }
                None => break,
            }
        }

        let token = generate_token_default();
        let handle = SessionHandle(Arc::new(Mutex::new(ConsoleSession::new(
            self.published_only_default,
            self.max_upload_bytes,
        ))));
        sessions.insert(
            token.clone(),
            Entry {
                handle: handle.clone(),
                last_seen: now,
            },
        );
        debug!(active = sessions.len(), "console session created");

        Ok(ResolvedSession {
            token,
            handle,
            created: true,
        })
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.sessions.lock().map(|s| s.len()).unwrap_or(0)
    }
}

/// Value of the `session` cookie in a `Cookie` header.
pub fn session_token_from_cookie(header: &str) -> Option<&str> {
    header.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE && !value.is_empty()).then_some(value)
    })
}

pub fn session_cookie(token: &str) -> String {
    format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax")
}
