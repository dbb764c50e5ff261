//! Renderização do artigo mascarado em HTML (askama escapa todo o texto).

use askama::Template;
use wikiguess_core::{GameView, ViewUnit};

/// Trecho já classificado para o template.
struct Piece<'a> {
    text: &'a str,
    is_break: bool,
    is_word: bool,
    class: &'static str,
}

#[derive(Template)]
#[template(
    source = r#"<div class="article">{% for piece in pieces %}{% if piece.is_break %}<br>{% else if piece.is_word %}<span class="{{ piece.class }}">{{ piece.text }}</span>{% else %}{{ piece.text }}{% endif %}{% endfor %}</div>"#,
    ext = "html"
)]
struct ArticleTemplate<'a> {
    pieces: Vec<Piece<'a>>,
}

fn word_class(revealed: bool, highlighted: bool) -> &'static str {
    match (revealed, highlighted) {
        (_, true) => "word revealed hl",
        (true, false) => "word revealed",
        (false, false) => "word",
    }
}

/// HTML do artigo na ordem do texto; quebras de linha viram `<br>`.
pub fn article_html(view: &GameView) -> Result<String, askama::Error> {
    let pieces = view
        .units
        .iter()
        .map(|unit| match unit {
            ViewUnit::Text { text } => Piece {
                text: text.as_str(),
                is_break: text.as_str() == "\n",
                is_word: false,
                class: "",
            },
            ViewUnit::Word { text, revealed, highlighted, .. } => Piece {
                text: text.as_str(),
                is_break: false,
                is_word: true,
                class: word_class(*revealed, *highlighted),
            },
        })
        .collect();
    ArticleTemplate { pieces }.render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use wikiguess_core::{GameSession, StopWordSet};

    #[test]
    fn test_article_html_masks_and_escapes() {
        let mut game = GameSession::new(
            "t",
            "Кошка <и> пёс\nконец",
            Arc::new(StopWordSet::from_raw(["и"])),
        );
        game.guess("кошка");
        let html = article_html(&game.view()).unwrap();

        assert!(html.starts_with("<div class=\"article\">"));
        assert!(html.contains("<span class=\"word revealed hl\">Кошка</span>"));
        assert!(html.contains("&lt;<span class=\"word revealed\">и</span>&gt;"));
        assert!(html.contains("<span class=\"word\">□□□</span>"));
        assert!(html.contains("<br>"));
        assert!(!html.contains("пёс"));
    }
}
