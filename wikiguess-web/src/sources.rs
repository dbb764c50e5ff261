//! # Fontes Externas — Listas e Artigo
//!
//! Carrega as listas de stop words e de artigos (sempre tenta a rede primeiro,
//! depois o cache, depois a lista embutida) e busca o texto puro do artigo na
//! API da Wikipédia (`prop=extracts&explaintext`), que já vem sem marcação.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::Deserialize;
use tracing::{info, warn};
use wikiguess_core::{parse_csv_list, title_from_url, ArticleList, CoreError, StopWordSet};

use crate::cache::{ListCache, ARTICLES_KEY, STOPWORDS_KEY};
use crate::config::Config;
use crate::error::WebError;

/// Artigo escolhido e seu texto.
#[derive(Debug, Clone)]
pub struct Article {
    pub title: String,
    pub text: String,
}

pub struct Sources {
    client: reqwest::Client,
    cache: ListCache,
    stopwords_url: String,
    articles_url: String,
    wiki_api: String,
}

#[derive(Deserialize)]
struct ExtractResponse {
    query: Option<ExtractQuery>,
}

#[derive(Deserialize)]
struct ExtractQuery {
    #[serde(default)]
    pages: Vec<ExtractPage>,
}

#[derive(Deserialize)]
struct ExtractPage {
    title: String,
    #[serde(default)]
    extract: Option<String>,
}

impl Sources {
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            cache: ListCache::new(config.cache_path.clone()),
            stopwords_url: config.stopwords_url.clone(),
            articles_url: config.articles_url.clone(),
            wiki_api: config.wiki_api.clone(),
        }
    }

    /// Stop words normalizadas: rede → cache → lista embutida.
    pub async fn load_stop_words(&self) -> StopWordSet {
        match self.fetch_csv(&self.stopwords_url, "stop words").await {
            Ok(csv) => {
                let set = StopWordSet::from_raw(parse_csv_list(&csv));
                self.cache.put(STOPWORDS_KEY, &set.to_sorted_vec()).await;
                info!("stop words carregadas da rede: {}", set.len());
                set
            }
            Err(e) => {
                if let Some(cached) = self.cache.get(STOPWORDS_KEY).await {
                    warn!("stop words: usando cache ({})", e);
                    return StopWordSet::from_raw(cached);
                }
                warn!("stop words: usando lista embutida ({})", e);
                StopWordSet::fallback()
            }
        }
    }

    /// Lista de artigos: rede → cache → artigo embutido.
    pub async fn load_articles(&self) -> ArticleList {
        let fetched = match self.fetch_csv(&self.articles_url, "artigos").await {
            Ok(csv) => ArticleList::from_csv(&csv).map_err(WebError::from),
            Err(e) => Err(e),
        };
        match fetched {
            Ok(list) => {
                self.cache.put(ARTICLES_KEY, list.urls()).await;
                info!("artigos carregados da rede: {}", list.len());
                list
            }
            Err(e) => {
                if let Some(list) = self
                    .cache
                    .get(ARTICLES_KEY)
                    .await
                    .and_then(|cached| ArticleList::from_urls(cached).ok())
                {
                    warn!("artigos: usando cache ({})", e);
                    return list;
                }
                warn!("artigos: usando artigo embutido ({})", e);
                ArticleList::fallback()
            }
        }
    }

    /// Carrega as duas listas em paralelo, sorteia um artigo e busca seu texto.
    pub async fn random_article(&self) -> Result<(StopWordSet, Article), WebError> {
        let (stop_words, articles) = tokio::join!(self.load_stop_words(), self.load_articles());

        let url = articles.pick(&mut rand::thread_rng()).to_string();
        let title = title_from_url(&url).ok_or_else(|| CoreError::InvalidArticleUrl(url.clone()))?;
        info!("artigo sorteado: {}", title);

        let article = self.fetch_article(&title).await?;
        Ok((stop_words, article))
    }

    /// Texto puro do artigo (com redirecionamentos resolvidos).
    pub async fn fetch_article(&self, title: &str) -> Result<Article, WebError> {
        let response: ExtractResponse = self
            .client
            .get(&self.wiki_api)
            .query(&[
                ("action", "query"),
                ("prop", "extracts"),
                ("explaintext", "1"),
                ("exsectionformat", "plain"),
                ("redirects", "1"),
                ("format", "json"),
                ("formatversion", "2"),
                ("titles", title),
            ])
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|source| WebError::Fetch { what: "artigo", source })?
            .json()
            .await
            .map_err(|source| WebError::Fetch { what: "artigo", source })?;

        let page = response
            .query
            .and_then(|q| q.pages.into_iter().next())
            .ok_or_else(|| WebError::EmptyArticle(title.to_string()))?;

        match page.extract {
            Some(text) if !text.trim().is_empty() => Ok(Article {
                title: page.title,
                text,
            }),
            _ => Err(WebError::EmptyArticle(title.to_string())),
        }
    }

    async fn fetch_csv(&self, url: &str, what: &'static str) -> Result<String, WebError> {
        self.client
            .get(cache_busted(url))
            .header(reqwest::header::CACHE_CONTROL, "no-store")
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|source| WebError::Fetch { what, source })?
            .text()
            .await
            .map_err(|source| WebError::Fetch { what, source })
    }
}

/// Acrescenta `cb=<millis>` para contornar caches intermediários.
fn cache_busted(url: &str) -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    let sep = if url.contains('?') { '&' } else { '?' };
    format!("{}{}cb={}", url, sep, millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_busted() {
        assert!(cache_busted("https://x/pub?gid=0").starts_with("https://x/pub?gid=0&cb="));
        assert!(cache_busted("https://x/list.csv").starts_with("https://x/list.csv?cb="));
    }

    #[test]
    fn test_extract_response_parsing() {
        let json = r#"{"batchcomplete":true,"query":{"pages":[{"pageid":1,"ns":0,"title":"Шахматы","extract":"Шахматы — игра."}]}}"#;
        let parsed: ExtractResponse = serde_json::from_str(json).unwrap();
        let page = parsed.query.unwrap().pages.into_iter().next().unwrap();
        assert_eq!(page.title, "Шахматы");
        assert_eq!(page.extract.as_deref(), Some("Шахматы — игра."));
    }

    #[test]
    fn test_extract_missing_page() {
        let json = r#"{"query":{"pages":[{"ns":0,"title":"Нет","missing":true}]}}"#;
        let parsed: ExtractResponse = serde_json::from_str(json).unwrap();
        let page = parsed.query.unwrap().pages.into_iter().next().unwrap();
        assert!(page.extract.is_none());
    }

    #[tokio::test]
    async fn test_unreachable_sources_fall_back() {
        let config = Config {
            stopwords_url: "http://127.0.0.1:9/stop.csv".to_string(),
            articles_url: "http://127.0.0.1:9/articles.csv".to_string(),
            cache_path: std::env::temp_dir()
                .join(format!("wikiguess-sources-{}.json", std::process::id())),
            ..Config::default()
        };
        let _ = std::fs::remove_file(&config.cache_path);
        let sources = Sources::new(&config);

        assert_eq!(sources.load_stop_words().await, StopWordSet::fallback());
        assert_eq!(sources.load_articles().await, ArticleList::fallback());
    }
}
