//! Request handlers

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Response},
    Form,
};
use serde::Deserialize;
use std::collections::HashSet;

use super::server::SharedState;
use crate::auth::{self, clear_session_cookie, session_cookie, Identity};
use crate::db::pages;
use crate::error::{Error, Result};
use crate::models::{is_valid_page_name, NewPage};
use crate::ui::wikiwords;

const LOGIN_PATH: &str = "/login";

// Request types

/// Login parameters, read from the query string on GET and the body on POST
#[derive(Debug, Default, Deserialize)]
pub struct LoginForm {
    pub login: Option<String>,
    pub password: Option<String>,
    pub next: Option<String>,
    #[serde(rename = "form.submitted")]
    pub submitted: Option<String>,
}

/// Add/edit form fields
#[derive(Debug, Default, Deserialize)]
pub struct PageForm {
    pub body: Option<String>,
    #[serde(rename = "form.submitted")]
    pub submitted: Option<String>,
}

// Responses

/// 302 with a Location header
fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}

/// Send the user to the login form, remembering where they were going
fn login_redirect(uri: &Uri) -> Response {
    let next = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");
    found(&format!("{}?next={}", LOGIN_PATH, urlencoding::encode(next)))
}

fn page_url(name: &str) -> String {
    format!("/{}", urlencoding::encode(name))
}

fn edit_url(name: &str) -> String {
    format!("/{}/edit_page", urlencoding::encode(name))
}

fn add_url(name: &str) -> String {
    format!("/add_page/{}", urlencoding::encode(name))
}

/// Only same-site paths are accepted as login redirect targets.
/// Spaces and non-ASCII characters are percent-encoded.
fn safe_next(next: &str) -> String {
    let next = next.trim();
    if next.is_empty()
        || next.starts_with("//")
        || next.contains("://")
        || next.contains('\\')
        || next.chars().any(char::is_control)
    {
        return "/".to_string();
    }

    let mut target = String::with_capacity(next.len() + 1);
    if !next.starts_with('/') {
        target.push('/');
    }
    for c in next.chars() {
        if c.is_ascii_graphic() {
            target.push(c);
        } else {
            target.push_str(&urlencoding::encode(c.encode_utf8(&mut [0; 4])));
        }
    }
    target
}

/// Path of the Referer header, unless it is the login page itself
fn referer_path(headers: &HeaderMap) -> Option<String> {
    let referer = headers.get(header::REFERER)?.to_str().ok()?;
    let uri: Uri = referer.parse().ok()?;
    let path = uri.path_and_query()?.as_str().to_string();
    if path.starts_with(LOGIN_PATH) {
        None
    } else {
        Some(path)
    }
}

// Pages

/// Root redirects to the front page
pub async fn view_wiki(State(state): State<SharedState>) -> Response {
    found(&page_url(&state.config.wiki.front_page))
}

pub async fn view_page(
    State(state): State<SharedState>,
    identity: Identity,
    uri: Uri,
    Path(pagename): Path<String>,
) -> Result<Response> {
    let page = match pages::resolve(state.db.pool(), &pagename).await {
        Ok(page) => page,
        Err(Error::PageNotFound(_)) => return Ok(state.renderer.not_found(&identity, &pagename)),
        Err(e) => return Err(e),
    };

    if !auth::can_view(identity.user(), &page) {
        return Ok(login_redirect(&uri));
    }

    let words = wikiwords::find_wikiwords(&page.data);
    let existing: HashSet<String> = pages::existing_names(state.db.pool(), &words)
        .await?
        .into_iter()
        .collect();
    let paragraphs = wikiwords::render_paragraphs(&page.data, &existing);

    Ok(state
        .renderer
        .view_page(&identity, &page, &paragraphs)?
        .into_response())
}

pub async fn edit_page(
    State(state): State<SharedState>,
    identity: Identity,
    uri: Uri,
    Path(pagename): Path<String>,
    Form(form): Form<PageForm>,
) -> Result<Response> {
    let mut tx = state.db.begin().await?;

    let Some(page) = pages::find_by_name(&mut *tx, &pagename).await? else {
        return Ok(state.renderer.not_found(&identity, &pagename));
    };

    if !auth::can_edit(identity.user(), &page) {
        tracing::info!(
            "Denied edit of '{}' to {}",
            page.name,
            identity.user().map(|u| u.name.as_str()).unwrap_or("anonymous")
        );
        return Ok(login_redirect(&uri));
    }

    if form.submitted.is_some() {
        let body = form.body.unwrap_or_default();
        pages::update_data(&mut *tx, &page.name, &body).await?;
        tx.commit().await?;
        tracing::info!("Page '{}' edited", page.name);
        return Ok(found(&page_url(&page.name)));
    }

    Ok(state
        .renderer
        .edit_form(&identity, &page.name, &page.data, &edit_url(&page.name))?
        .into_response())
}

pub async fn add_page(
    State(state): State<SharedState>,
    identity: Identity,
    uri: Uri,
    Path(pagename): Path<String>,
    Form(form): Form<PageForm>,
) -> Result<Response> {
    if !is_valid_page_name(&pagename) {
        return Ok(state.renderer.not_found(&identity, &pagename));
    }

    let mut tx = state.db.begin().await?;

    // An existing name is never re-created, whoever asks
    if pages::exists(&mut *tx, &pagename).await? {
        return Ok(found(&edit_url(&pagename)));
    }

    let Some(user) = identity.user().filter(|u| auth::can_add(Some(*u))) else {
        tracing::info!("Denied adding '{}' to anonymous user", pagename);
        return Ok(login_redirect(&uri));
    };

    if form.submitted.is_some() {
        let new_page = NewPage {
            name: pagename.clone(),
            data: form.body.unwrap_or_default(),
            creator_id: user.id,
        };
        match pages::insert(&mut *tx, &new_page).await {
            Ok(_) => {}
            Err(Error::PageAlreadyExists(_)) => return Ok(found(&edit_url(&pagename))),
            Err(e) => return Err(e),
        }
        tx.commit().await?;
        tracing::info!("Page '{}' created by '{}'", pagename, user.name);
        return Ok(found(&page_url(&pagename)));
    }

    Ok(state
        .renderer
        .edit_form(&identity, &pagename, "", &add_url(&pagename))?
        .into_response())
}

// Session

pub async fn login(
    State(state): State<SharedState>,
    identity: Identity,
    headers: HeaderMap,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    let next_url = form
        .next
        .as_deref()
        .filter(|n| !n.trim().is_empty())
        .map(str::to_string)
        .or_else(|| referer_path(&headers))
        .map(|n| safe_next(&n))
        .unwrap_or_else(|| "/".to_string());
    let login = form.login.unwrap_or_default();
    let mut message = None;

    if form.submitted.is_some() {
        let password = form.password.unwrap_or_default();
        match auth::authenticate(
            &state.db,
            &login,
            &password,
            state.config.auth.bcrypt_cost,
        )
        .await {
            Ok(user) => {
                let token = state.tokens.create_token(&user.name)?;
                let cookie = session_cookie(&state.config.auth.cookie_name, &token);
                return Ok((
                    StatusCode::FOUND,
                    [(header::LOCATION, next_url), (header::SET_COOKIE, cookie)],
                )
                    .into_response());
            }
            Err(Error::AuthFailure) => message = Some("Failed login"),
            Err(e) => return Err(e),
        }
    }

    Ok(state
        .renderer
        .login_form(&identity, &login, &next_url, message)?
        .into_response())
}

pub async fn logout(State(state): State<SharedState>, identity: Identity) -> Response {
    if let Some(user) = identity.user() {
        tracing::info!("User '{}' logged out", user.name);
    }
    let cookie = clear_session_cookie(&state.config.auth.cookie_name);
    (
        StatusCode::FOUND,
        [(header::LOCATION, "/".to_string()), (header::SET_COOKIE, cookie)],
    )
        .into_response()
}

pub async fn not_found(State(state): State<SharedState>, identity: Identity, uri: Uri) -> Response {
    let name = uri.path().trim_start_matches('/');
    state.renderer.not_found(&identity, name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_safe_next() {
        assert_eq!(safe_next("FrontPage"), "/FrontPage");
        assert_eq!(safe_next("/BackPage/edit_page"), "/BackPage/edit_page");
        assert_eq!(safe_next("https://evil.example/"), "/");
        assert_eq!(safe_next("//evil.example"), "/");
        assert_eq!(safe_next(""), "/");
        assert_eq!(safe_next("/Front\nPage"), "/");
    }

    #[test]
    fn test_safe_next_encodes_non_ascii() {
        assert_eq!(safe_next("/ÉtéPage"), "/%C3%89t%C3%A9Page");
        assert_eq!(safe_next("ÉtéPage/edit_page"), "/%C3%89t%C3%A9Page/edit_page");
        assert_eq!(safe_next("/Some Page"), "/Some%20Page");
        // Already-encoded targets pass through untouched
        assert_eq!(safe_next("/%C3%89t%C3%A9Page"), "/%C3%89t%C3%A9Page");
    }

    #[test]
    fn test_login_redirect_keeps_target() {
        let uri: Uri = "/FrontPage/edit_page".parse().unwrap();
        let response = login_redirect(&uri);
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers()[header::LOCATION],
            "/login?next=%2FFrontPage%2Fedit_page"
        );
    }

    #[test]
    fn test_referer_path() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::REFERER,
            HeaderValue::from_static("http://localhost/BackPage"),
        );
        assert_eq!(referer_path(&headers).as_deref(), Some("/BackPage"));

        headers.insert(
            header::REFERER,
            HeaderValue::from_static("http://localhost/login?next=%2F"),
        );
        assert!(referer_path(&headers).is_none());
    }

    #[test]
    fn test_page_urls_are_encoded() {
        assert_eq!(page_url("Some Page"), "/Some%20Page");
        assert_eq!(edit_url("FrontPage"), "/FrontPage/edit_page");
        assert_eq!(add_url("NewPage"), "/add_page/NewPage");
    }
}
