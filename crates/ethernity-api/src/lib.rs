/*!
 * Ethernity API
 * 
 * Cliente HTTP para o serviço de dados de blockchain consumido pelo explorer
 */

use async_trait::async_trait;
use ethernity_core::{
    error::{Error, Result},
    traits::ExplorerDataProvider,
    types::{BlockWithTransactions, RawTransaction},
};
use lru::LruCache;
use parking_lot::Mutex;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Variável de ambiente com a URL base do serviço
pub const ENDPOINT_ENV: &str = "ETHERNITY_API_ENDPOINT";

/// Configuração do cliente HTTP
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub endpoint: String,
    pub timeout: Duration,
    /// Retentativas apenas para falhas de conexão ou timeout
    pub max_retries: u32,
    pub retry_delay: Duration,
    pub use_cache: bool,
    pub cache_ttl: Duration,
    pub cache_capacity: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8080/api".to_string(),
            timeout: Duration::from_secs(30),
            max_retries: 3,
            retry_delay: Duration::from_millis(500),
            use_cache: true,
            cache_ttl: Duration::from_secs(60),
            cache_capacity: 1024,
        }
    }
}

impl ApiConfig {
    /// Configuração padrão com o endpoint de `ETHERNITY_API_ENDPOINT`, se definido
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(endpoint) = std::env::var(ENDPOINT_ENV) {
            config.endpoint = endpoint;
        }
        config
    }
}

/// Estatísticas do cache
#[derive(Debug, Clone)]
pub struct CacheStats {
    pub total_entries: usize,
    pub expired_entries: usize,
    pub cache_hit_ratio: f64,
}

/// Cliente do serviço de dados
pub struct EthernityApiClient {
    client: Client,
    config: ApiConfig,
    cache: Mutex<LruCache<String, (Vec<u8>, Instant)>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl EthernityApiClient {
    /// Cria um novo cliente
    pub fn new(config: ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::UpstreamUnavailable(format!("Falha ao criar cliente HTTP: {}", e)))?;
        let capacity = NonZeroUsize::new(config.cache_capacity.max(1)).unwrap_or(NonZeroUsize::MIN);

        Ok(Self {
            client,
            cache: Mutex::new(LruCache::new(capacity)),
            config,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.endpoint.trim_end_matches('/'), path)
    }

    fn cached(&self, key: &str) -> Option<Vec<u8>> {
        if !self.config.use_cache {
            return None;
        }
        let mut cache = self.cache.lock();
        match cache.get(key) {
            Some((data, timestamp)) if timestamp.elapsed() < self.config.cache_ttl => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                debug!(key, "cache hit");
                Some(data.clone())
            }
            _ => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Executa um GET; 404 vira `Ok(None)`
    async fn fetch(&self, path: &str) -> Result<Option<Vec<u8>>> {
        if let Some(data) = self.cached(path) {
            return Ok(Some(data));
        }

        let url = self.url(path);
        let mut attempt = 0;
        let response = loop {
            match self.client.get(&url).send().await {
                Ok(response) => break response,
                Err(e) if (e.is_connect() || e.is_timeout()) && attempt < self.config.max_retries => {
                    attempt += 1;
                    warn!(%url, attempt, error = %e, "falha de conexão, tentando novamente");
                    tokio::time::sleep(self.config.retry_delay).await;
                }
                Err(e) if e.is_timeout() => return Err(Error::TimedOut(url)),
                Err(e) => {
                    return Err(Error::UpstreamUnavailable(format!("Falha ao consultar {}: {}", url, e)))
                }
            }
        };

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = response.error_for_status().map_err(|e| {
            warn!(%url, error = %e, "serviço de dados respondeu com erro");
            Error::UpstreamUnavailable(format!("Resposta inválida de {}: {}", url, e))
        })?;
        let data = response
            .bytes()
            .await
            .map_err(|e| Error::UpstreamUnavailable(format!("Falha ao ler resposta de {}: {}", url, e)))?
            .to_vec();

        if self.config.use_cache {
            self.cache.lock().put(path.to_string(), (data.clone(), Instant::now()));
        }
        Ok(Some(data))
    }

    fn decode<T: DeserializeOwned>(data: &[u8]) -> Result<T> {
        serde_json::from_slice(data)
            .map_err(|e| Error::DecodeError(format!("Falha ao decodificar resposta: {}", e)))
    }

    /// Limpa o cache
    pub fn clear_cache(&self) {
        self.cache.lock().clear();
    }

    /// Obtém estatísticas do cache
    pub fn cache_stats(&self) -> CacheStats {
        let cache = self.cache.lock();
        let expired = cache
            .iter()
            .filter(|(_, (_, timestamp))| timestamp.elapsed() > self.config.cache_ttl)
            .count();
        let hits = self.hits.load(Ordering::Relaxed) as f64;
        let total = hits + self.misses.load(Ordering::Relaxed) as f64;

        CacheStats {
            total_entries: cache.len(),
            expired_entries: expired,
            cache_hit_ratio: if total > 0.0 { hits / total } else { 0.0 },
        }
    }
}

#[async_trait]
impl ExplorerDataProvider for EthernityApiClient {
    async fn get_transaction_by_hash(&self, hash: &str) -> Result<Option<RawTransaction>> {
        match self.fetch(&format!("transactions/{}", hash)).await? {
            Some(data) => Self::decode(&data),
            None => Ok(None),
        }
    }

    async fn get_block_by_number(&self, number: u64) -> Result<Option<BlockWithTransactions>> {
        match self.fetch(&format!("blocks/{}", number)).await? {
            Some(data) => Self::decode(&data),
            None => Ok(None),
        }
    }

    async fn get_transactions_by_address(&self, address: &str) -> Result<Vec<RawTransaction>> {
        match self.fetch(&format!("addresses/{}/transactions", address)).await? {
            Some(data) => Ok(Self::decode::<Option<Vec<RawTransaction>>>(&data)?.unwrap_or_default()),
            None => Ok(Vec::new()),
        }
    }
}
