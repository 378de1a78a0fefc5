use axum::{
    extract::State,
    response::{Html, Json},
    Form,
};
use serde::Serialize;
use std::sync::Arc;

use crate::api::forms::StepForm;
use crate::api::views::{self, FormContext};
use crate::model::{
    sort_by_display_name, ColumnDescriptor, ColumnListing, Credentials, QueryPayload,
    SelectionError,
};
use crate::store::SessionCache;
use crate::upstream::{DataService, UpstreamError};

/// Shared state behind every handler
pub struct Portal<U> {
    pub service: U,
    pub sessions: SessionCache,
    /// `name` sent with every run-query payload
    pub query_name: String,
}

impl<U: DataService> Portal<U> {
    pub fn new(service: U, sessions: SessionCache, query_name: impl Into<String>) -> Self {
        Self {
            service,
            sessions,
            query_name: query_name.into(),
        }
    }

    /// Credentials for a step: a submitted password wins, otherwise the
    /// session token must still be live. A password posted alongside a live
    /// token updates that session instead of opening another one.
    async fn resolve(&self, form: &StepForm) -> Result<ResolvedLogin, String> {
        if let Some(password) = &form.password {
            let credentials = Credentials::new(
                form.username.clone(),
                password.clone(),
                form.primavera_url.clone(),
            );
            let session = match form.session.as_deref() {
                Some(token) if self.sessions.replace(token, credentials.clone()).await => {
                    Some(token.to_string())
                }
                _ => None,
            };
            return Ok(ResolvedLogin {
                credentials,
                session,
            });
        }

        let token = form.session.as_deref().ok_or(SESSION_EXPIRED)?;
        match self.sessions.get(token).await {
            Some(credentials) => Ok(ResolvedLogin {
                credentials,
                session: Some(token.to_string()),
            }),
            None => Err(SESSION_EXPIRED.to_string()),
        }
    }

    /// Hidden-field context for the next page, opening a session on first use
    async fn form_context(&self, login: &ResolvedLogin) -> FormContext {
        let session = match &login.session {
            Some(token) => token.clone(),
            None => self.sessions.create(login.credentials.clone()).await,
        };
        FormContext {
            username: login.credentials.username.clone(),
            primavera_url: login.credentials.service_base_url.clone(),
            session,
        }
    }
}

pub type AppState<U> = Arc<Portal<U>>;

struct ResolvedLogin {
    credentials: Credentials,
    session: Option<String>,
}

const SESSION_EXPIRED: &str = "session expired, please sign in again";
const NO_TABLES_SELECTED: &str = "must select at least one table";

/// Message shown for a failed step; upstream status and body are kept verbatim
fn step_error(err: &UpstreamError) -> String {
    match err {
        UpstreamError::Status { .. } => err.to_string(),
        other => format!("Error: {}", other),
    }
}

/// Simple health check endpoint
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// GET /
pub async fn login_page() -> Html<String> {
    Html(views::login_page(None, "", ""))
}

/// POST /list_of_tables
pub async fn list_tables<U: DataService>(
    State(portal): State<AppState<U>>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Html<String> {
    let form = StepForm::from_pairs(pairs);
    let login = match portal.resolve(&form).await {
        Ok(login) => login,
        Err(message) => {
            return Html(views::login_page(
                Some(&message),
                &form.username,
                &form.primavera_url,
            ))
        }
    };
    let credentials = &login.credentials;

    match portal.service.list_tables(credentials).await {
        Ok(mut tables) => {
            sort_by_display_name(&mut tables);
            log::info!(
                "Listed {} tables from {} for {}",
                tables.len(),
                credentials.service_base_url,
                credentials.username
            );
            let ctx = portal.form_context(&login).await;
            Html(views::tables_page(&ctx, &tables, None))
        }
        Err(e) => {
            log::warn!("Listing tables for {} failed: {}", credentials.username, e);
            Html(views::login_page(
                Some(&step_error(&e)),
                &credentials.username,
                &credentials.service_base_url,
            ))
        }
    }
}

/// POST /columns
pub async fn list_columns<U: DataService>(
    State(portal): State<AppState<U>>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Html<String> {
    let form = StepForm::from_pairs(pairs);
    let login = match portal.resolve(&form).await {
        Ok(login) => login,
        Err(message) => {
            return Html(views::login_page(
                Some(&message),
                &form.username,
                &form.primavera_url,
            ))
        }
    };
    let ctx = portal.form_context(&login).await;

    if form.tables.is_empty() {
        return Html(views::tables_page(&ctx, &[], Some(NO_TABLES_SELECTED)));
    }

    match collect_columns(&portal.service, &login.credentials, &form.tables).await {
        Ok(listing) => Html(views::columns_page(&ctx, &listing, None)),
        Err(e) => {
            log::warn!("Listing columns failed: {}", e);
            let message = format!("Error fetching columns: {}", e);
            Html(views::tables_page(&ctx, &[], Some(&message)))
        }
    }
}

/// One lookup per table, in order. A non-200 answer only affects its own
/// table; any other failure aborts the whole listing.
pub async fn collect_columns<U: DataService + ?Sized>(
    service: &U,
    credentials: &Credentials,
    tables: &[String],
) -> Result<ColumnListing, UpstreamError> {
    let mut listing = ColumnListing::new();

    for table in tables {
        match service.list_columns(credentials, table).await {
            Ok(columns) => listing.insert(table.clone(), columns),
            Err(UpstreamError::Status { status, body }) => {
                log::warn!("Columns for {} unavailable: status {}", table, status);
                listing.insert(
                    table.clone(),
                    vec![ColumnDescriptor::Error(format!("Error {}: {}", status, body))],
                );
            }
            Err(e) => return Err(e),
        }
    }

    Ok(listing)
}

/// POST /data
pub async fn run_query<U: DataService>(
    State(portal): State<AppState<U>>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Html<String> {
    let form = StepForm::from_pairs(pairs);
    let login = match portal.resolve(&form).await {
        Ok(login) => login,
        Err(message) => {
            return Html(views::login_page(
                Some(&message),
                &form.username,
                &form.primavera_url,
            ))
        }
    };
    let ctx = portal.form_context(&login).await;

    let payload = match QueryPayload::from_selections(&portal.query_name, &form.selected_columns)
    {
        Ok(payload) => payload,
        Err(SelectionError::Empty) => {
            return Html(views::columns_page(
                &ctx,
                &ColumnListing::new(),
                Some(&SelectionError::Empty.to_string()),
            ))
        }
        Err(e) => {
            let message = format!("Error: {}", e);
            return Html(views::data_page(&ctx, &[], None, Some(&message)));
        }
    };
    let table_names = payload.table_names();

    match portal.service.run_query(&login.credentials, &payload).await {
        Ok(result) => {
            log::info!("Query over {} table(s) succeeded", table_names.len());
            Html(views::data_page(&ctx, &table_names, Some(&result), None))
        }
        Err(e) => {
            log::warn!("Query failed: {}", e);
            Html(views::data_page(
                &ctx,
                &table_names,
                None,
                Some(&step_error(&e)),
            ))
        }
    }
}
