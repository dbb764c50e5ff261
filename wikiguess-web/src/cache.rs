//! Cache chave/valor das listas (equivalente ao `localStorage` do navegador).
//!
//! Formato: um objeto JSON `{ "chave": ["item", ...] }` em um único arquivo.
//! Arquivo ausente ou corrompido conta como cache vazio; falhas de escrita
//! só geram aviso no log.

use std::collections::HashMap;
use std::path::PathBuf;

use tokio::sync::Mutex;
use tracing::warn;

pub const STOPWORDS_KEY: &str = "wikigame_stopwords_v2";
pub const ARTICLES_KEY: &str = "wikigame_articles_v1";

pub struct ListCache {
    path: PathBuf,
    // Serializa leituras/escritas concorrentes do arquivo
    lock: Mutex<()>,
}

impl ListCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Lista guardada sob `key`, se existir e não estiver vazia.
    pub async fn get(&self, key: &str) -> Option<Vec<String>> {
        let _guard = self.lock.lock().await;
        self.read_all()
            .await
            .remove(key)
            .filter(|list| !list.is_empty())
    }

    pub async fn put(&self, key: &str, list: &[String]) {
        let _guard = self.lock.lock().await;
        let mut all = self.read_all().await;
        all.insert(key.to_string(), list.to_vec());

        let json = match serde_json::to_vec_pretty(&all) {
            Ok(json) => json,
            Err(e) => {
                warn!("cache: falha ao serializar: {}", e);
                return;
            }
        };
        if let Err(e) = tokio::fs::write(&self.path, json).await {
            warn!("cache: falha ao gravar {}: {}", self.path.display(), e);
        }
    }

    async fn read_all(&self) -> HashMap<String, Vec<String>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_else(|e| {
                warn!("cache: arquivo corrompido {}: {}", self.path.display(), e);
                HashMap::new()
            }),
            Err(_) => HashMap::new(),
        }
    }
}
