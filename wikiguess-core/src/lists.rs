//! # Listas Externas — Stop Words e Artigos
//!
//! As duas listas do jogo chegam como CSV de uma coluna (planilha publicada).
//! Este módulo só interpreta o texto; buscar na rede e cachear fica com o
//! servidor web.

use std::sync::LazyLock;

use percent_encoding::percent_decode_str;
use rand::seq::SliceRandom;
use rand::Rng;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Artigo usado quando nenhuma lista está disponível.
pub const FALLBACK_ARTICLE_URL: &str = "https://ru.wikipedia.org/wiki/Шахматы";

static ARTICLE_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^https://ru\.wikipedia\.org/wiki/").expect("regex válida"));

static WIKI_TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)/wiki/([^#?]+)").expect("regex válida"));

/// Interpreta um CSV de uma coluna: remove BOM, linhas vazias e aspas externas.
pub fn parse_csv_list(csv_text: &str) -> Vec<String> {
    let text = csv_text.strip_prefix('\u{FEFF}').unwrap_or(csv_text);
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line).trim())
        .filter(|line| !line.is_empty())
        .map(|line| {
            // uma linha só com `"` vira vazia e cai no filtro abaixo
            let unquoted = if line.starts_with('"') && line.ends_with('"') {
                line.get(1..line.len() - 1).unwrap_or("")
            } else {
                line
            };
            unquoted.trim().to_string()
        })
        .filter(|line| !line.is_empty())
        .collect()
}

/// `true` para URLs `https://ru.wikipedia.org/wiki/...` (sem diferenciar caixa).
pub fn is_article_url(url: &str) -> bool {
    ARTICLE_URL_RE.is_match(url)
}

/// Extrai o título de uma URL da Wikipédia: `/wiki/Кошка_домашняя#x` → `Кошка домашняя`.
pub fn title_from_url(url: &str) -> Option<String> {
    let raw = WIKI_TITLE_RE.captures(url)?.get(1)?.as_str();
    let decoded = percent_decode_str(raw).decode_utf8().ok()?;
    Some(decoded.replace('_', " "))
}

/// Lista de URLs de artigos válidas. Nunca vazia.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleList {
    urls: Vec<String>,
}

impl ArticleList {
    /// Mantém apenas URLs da Wikipédia russa; erro se nada sobrar.
    pub fn from_urls<I, S>(urls: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let urls: Vec<String> = urls
            .into_iter()
            .map(|u| u.as_ref().trim().to_string())
            .filter(|u| is_article_url(u))
            .collect();
        if urls.is_empty() {
            return Err(CoreError::EmptyArticleList);
        }
        Ok(Self { urls })
    }

    /// Interpreta o CSV publicado.
    pub fn from_csv(csv_text: &str) -> Result<Self> {
        Self::from_urls(parse_csv_list(csv_text))
    }

    pub fn fallback() -> Self {
        Self {
            urls: vec![FALLBACK_ARTICLE_URL.to_string()],
        }
    }

    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    /// Escolha uniforme.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        self.urls
            .choose(rng)
            .map(String::as_str)
            .unwrap_or(FALLBACK_ARTICLE_URL)
    }
}
