//! HTML rendering: embedded templates, page views and static assets

pub mod assets;
pub mod wikiwords;

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use minijinja::{context, Environment, Value};
use rust_embed::RustEmbed;

use crate::auth::Identity;
use crate::error::{Error, Result};
use crate::models::Page;
use wikiwords::Chunk;

#[derive(RustEmbed)]
#[folder = "templates/"]
struct TemplateFiles;

/// Build a template environment from the embedded `templates/` directory
pub fn template_environment() -> Result<Environment<'static>> {
    let mut env = Environment::new();
    for name in TemplateFiles::iter() {
        let Some(file) = TemplateFiles::get(&name) else {
            continue;
        };
        let source = String::from_utf8(file.data.into_owned())
            .map_err(|e| Error::Other(format!("Template {} is not UTF-8: {}", name, e)))?;
        env.add_template_owned(name.into_owned(), source)?;
    }
    Ok(env)
}

/// Renders the wiki's HTML pages
pub struct Renderer {
    env: Environment<'static>,
    front_page: String,
}

impl Renderer {
    pub fn new(front_page: &str) -> Result<Self> {
        Ok(Self {
            env: template_environment()?,
            front_page: front_page.to_string(),
        })
    }

    fn render(&self, template: &str, identity: &Identity, ctx: Value) -> Result<Html<String>> {
        let full = context! {
            username => identity.user().map(|u| u.name.clone()),
            front_page => &self.front_page,
            front_page_url => format!("/{}", urlencoding::encode(&self.front_page)),
            ..ctx
        };
        let html = self.env.get_template(template)?.render(full)?;
        Ok(Html(html))
    }

    pub fn view_page(
        &self,
        identity: &Identity,
        page: &Page,
        paragraphs: &[Vec<Chunk>],
    ) -> Result<Html<String>> {
        self.render(
            "view.html",
            identity,
            context! {
                page => page,
                paragraphs => paragraphs,
                edit_url => format!("/{}/edit_page", urlencoding::encode(&page.name)),
            },
        )
    }

    pub fn edit_form(
        &self,
        identity: &Identity,
        pagename: &str,
        pagedata: &str,
        save_url: &str,
    ) -> Result<Html<String>> {
        self.render(
            "edit.html",
            identity,
            context! { pagename, pagedata, save_url },
        )
    }

    pub fn login_form(
        &self,
        identity: &Identity,
        login: &str,
        next_url: &str,
        message: Option<&str>,
    ) -> Result<Html<String>> {
        self.render(
            "login.html",
            identity,
            context! { login, next_url, message },
        )
    }

    /// 404 page; falls back to the bare error response if rendering fails
    pub fn not_found(&self, identity: &Identity, pagename: &str) -> Response {
        match self.render("404.html", identity, context! { pagename }) {
            Ok(html) => (StatusCode::NOT_FOUND, html).into_response(),
            Err(e) => {
                tracing::error!("Failed to render 404 page: {}", e);
                Error::PageNotFound(pagename.to_string()).into_response()
            }
        }
    }
}
