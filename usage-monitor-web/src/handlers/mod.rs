//! HTTP handlers
//!
//! `/` and `/api/usage` read through the same [`UsageService`](usage_monitor_core::UsageService);
//! only the rendering differs.

use actix_web::cookie::time::Duration;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::http::{StatusCode, header};
use actix_web::{HttpRequest, HttpResponse, web};
use chrono::Utc;
use serde::Deserialize;
use usage_monitor_core::CoreError;
use usage_monitor_core::auth::{SESSION_COOKIE, SESSION_MAX_AGE_SECS};

use crate::error::WebError;
use crate::state::AppState;
use crate::views::{render_dashboard, render_login};


/// `?refresh=1` / `?refresh=true`
#[derive(Debug, Default, Deserialize)]
pub struct RefreshQuery {
    refresh: Option<String>,
}

impl RefreshQuery {
    pub fn force_refresh(&self) -> bool {
        matches!(self.refresh.as_deref(), Some("1" | "true"))
    }
}

#[derive(Deserialize)]
pub struct LoginForm {
    password: String,
}

impl std::fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginForm").finish_non_exhaustive()
    }
}

/// Register all routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/login", web::post().to(login))
        .service(
            web::resource("/logout")
                .route(web::get().to(logout))
                .route(web::post().to(logout)),
        )
        .route("/api/usage", web::get().to(api_usage))
        .route("/healthz", web::get().to(healthz));
}

fn is_authorized(req: &HttpRequest, state: &AppState) -> Result<bool, WebError> {
    let cookie = req.cookie(SESSION_COOKIE);
    Ok(state.auth.is_authorized(cookie.as_ref().map(|c| c.value()))?)
}

fn html(status: StatusCode, body: String) -> HttpResponse {
    HttpResponse::build(status)
        .content_type("text/html; charset=utf-8")
        .body(body)
}

fn session_cookie(value: String, max_age: Duration, secure: bool) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, value)
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .max_age(max_age)
        .finish()
}

fn redirect_home() -> actix_web::HttpResponseBuilder {
    let mut builder = HttpResponse::SeeOther();
    builder.insert_header((header::LOCATION, "/"));
    builder
}

/// GET /
#[tracing_attributes::instrument(skip_all)]
pub async fn index(
    req: HttpRequest,
    state: web::Data<AppState>,
    query: web::Query<RefreshQuery>,
) -> Result<HttpResponse, WebError> {
    if !is_authorized(&req, &state)? {
        return Ok(html(StatusCode::OK, render_login(None)));
    }

    let response = state.usage_service.get_usage(query.force_refresh()).await;
    Ok(html(StatusCode::OK, render_dashboard(&response, Utc::now())))
}

/// POST /login
#[tracing_attributes::instrument(skip_all)]
pub async fn login(
    state: web::Data<AppState>,
    form: web::Form<LoginForm>,
) -> Result<HttpResponse, WebError> {
    match state.auth.login(&form.password) {
        Ok(token) => {
            tracing::info!("login succeeded");
            let max_age = Duration::seconds(SESSION_MAX_AGE_SECS);
            Ok(redirect_home()
                .cookie(session_cookie(token, max_age, state.secure_cookie))
                .finish())
        }
        Err(CoreError::InvalidPassword) => Ok(html(
            StatusCode::UNAUTHORIZED,
            render_login(Some("Incorrect password, please try again.")),
        )),
        Err(e) => Err(e.into()),
    }
}

/// GET|POST /logout
#[tracing_attributes::instrument(skip_all)]
pub async fn logout(state: web::Data<AppState>) -> HttpResponse {
    redirect_home()
        .cookie(session_cookie(
            String::new(),
            Duration::ZERO,
            state.secure_cookie,
        ))
        .finish()
}

/// GET /api/usage
#[tracing_attributes::instrument(skip_all, fields(force_refresh = query.force_refresh()))]
pub async fn api_usage(
    req: HttpRequest,
    state: web::Data<AppState>,
    query: web::Query<RefreshQuery>,
) -> Result<HttpResponse, WebError> {
    if !is_authorized(&req, &state)? {
        return Err(WebError::Unauthorized);
    }

    let response = state.usage_service.get_usage(query.force_refresh()).await;
    Ok(HttpResponse::Ok().json(response))
}

/// GET /healthz
pub async fn healthz() -> &'static str {
    "ok"
}
