use askama::Template;
use tn_core::{Article, Error, Result};
use crate::config::Placeholders;
use crate::dom::Fragment;

#[derive(Template)]
#[template(path = "card.html")]
struct CardTemplate<'a> {
    title: &'a str,
    summary: &'a str,
    thumbnail: &'a str,
    link: &'a str,
}

#[derive(Template)]
#[template(path = "empty.html")]
struct EmptyTemplate<'a> {
    message: &'a str,
}

fn render_template<T: Template>(template: &T) -> Result<Fragment> {
    template
        .render()
        .map(Fragment::new)
        .map_err(|e| Error::Render(e.to_string()))
}

/// Build the card shown for one article.
pub fn render_card(article: &Article, placeholders: &Placeholders) -> Result<Fragment> {
    render_template(&CardTemplate {
        title: &article.title,
        summary: article.summary.as_deref().unwrap_or(&placeholders.summary),
        thumbnail: article
            .thumbnail
            .as_deref()
            .unwrap_or(&placeholders.thumbnail),
        link: &article.link,
    })
}

/// The single element shown when the backend has nothing for a ticker.
pub fn render_empty(placeholders: &Placeholders) -> Result<Fragment> {
    render_template(&EmptyTemplate {
        message: &placeholders.empty_message,
    })
}
