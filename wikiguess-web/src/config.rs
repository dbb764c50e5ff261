//! Configuração do servidor, lida de variáveis de ambiente.
//!
//! | Variável                  | Padrão                         |
//! |---------------------------|--------------------------------|
//! | `WIKIGUESS_BIND`          | `0.0.0.0:3000`                 |
//! | `WIKIGUESS_STOPWORDS_URL` | planilha publicada (aba 0)     |
//! | `WIKIGUESS_ARTICLES_URL`  | planilha publicada (artigos)   |
//! | `WIKIGUESS_WIKI_API`      | `https://ru.wikipedia.org/w/api.php` |
//! | `WIKIGUESS_CACHE`         | `wikiguess-cache.json`         |

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::error::WebError;

pub const DEFAULT_STOPWORDS_CSV_URL: &str = "https://docs.google.com/spreadsheets/d/e/2PACX-1vResCHMBJc_xFz9mR1AhFyMaeGQvdT4KKMu4QkQTJ2S3nJF6GkSAxyZeE7i7n7gYvdnRibjSW2-Xno2/pub?gid=0&single=true&output=csv";
pub const DEFAULT_ARTICLES_CSV_URL: &str = "https://docs.google.com/spreadsheets/d/e/2PACX-1vResCHMBJc_xFz9mR1AhFyMaeGQvdT4KKMu4QkQTJ2S3nJF6GkSAxyZeE7i7n7gYvdnRibjSW2-Xno2/pub?gid=1078052796&single=true&output=csv";
pub const DEFAULT_WIKI_API: &str = "https://ru.wikipedia.org/w/api.php";

#[derive(Debug, Clone)]
pub struct Config {
    pub bind: SocketAddr,
    pub stopwords_url: String,
    pub articles_url: String,
    pub wiki_api: String,
    pub cache_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 3000)),
            stopwords_url: DEFAULT_STOPWORDS_CSV_URL.to_string(),
            articles_url: DEFAULT_ARTICLES_CSV_URL.to_string(),
            wiki_api: DEFAULT_WIKI_API.to_string(),
            cache_path: PathBuf::from("wikiguess-cache.json"),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, WebError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Monta a configuração a partir de uma função de busca (testável sem tocar no ambiente).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, WebError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(bind) = lookup("WIKIGUESS_BIND") {
            config.bind = bind
                .parse()
                .map_err(|_| WebError::Config(format!("WIKIGUESS_BIND inválido: {}", bind)))?;
        }
        if let Some(url) = lookup("WIKIGUESS_STOPWORDS_URL") {
            config.stopwords_url = url;
        }
        if let Some(url) = lookup("WIKIGUESS_ARTICLES_URL") {
            config.articles_url = url;
        }
        if let Some(url) = lookup("WIKIGUESS_WIKI_API") {
            config.wiki_api = url;
        }
        if let Some(path) = lookup("WIKIGUESS_CACHE") {
            config.cache_path = PathBuf::from(path);
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(|_| None).unwrap();
        assert_eq!(config.bind.port(), 3000);
        assert_eq!(config.wiki_api, DEFAULT_WIKI_API);
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("WIKIGUESS_BIND", "127.0.0.1:8080"),
            ("WIKIGUESS_CACHE", "/tmp/c.json"),
        ]
        .into_iter()
        .collect();
        let config = Config::from_lookup(|k| env.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(config.bind.to_string(), "127.0.0.1:8080");
        assert_eq!(config.cache_path, PathBuf::from("/tmp/c.json"));
    }

    #[test]
    fn test_bad_bind() {
        let err = Config::from_lookup(|k| (k == "WIKIGUESS_BIND").then(|| "nope".to_string()));
        assert!(matches!(err, Err(WebError::Config(_))));
    }
}
