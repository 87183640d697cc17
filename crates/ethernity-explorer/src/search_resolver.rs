use crate::config::ExplorerConfig;
use crate::list_sorter::page;
use crate::tx_classifier::{classify, classify_all};
use ethernity_core::{
    address::parse_address,
    error::{Error, Result},
    format::is_decimal_integer,
    traits::ExplorerDataProvider,
    types::{parse_or_zero, text, BlockWithTransactions, NormalizedTransaction, RawTransaction},
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Tamanho de um hash de transação com prefixo
pub const TX_HASH_LEN: usize = 66;

/// Prefixo padrão de hashes e endereços
pub const HASH_PREFIX: &str = "0x";

const RESPONSE_CHANNEL_CAPACITY: usize = 64;

/// Classificação do texto digitado na busca
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchClassification {
    Empty,
    Address,
    TxHash,
    BlockNumber(u64),
    /// Texto que não corresponde a nenhuma busca conhecida
    Unrecognized,
}

/// `0x` seguido de 64 dígitos hexadecimais
fn is_tx_hash(input: &str) -> bool {
    input.len() == TX_HASH_LEN
        && input
            .strip_prefix(HASH_PREFIX)
            .map_or(false, |hex| hex.bytes().all(|b| b.is_ascii_hexdigit()))
}

/// Classifica a entrada, nesta ordem: hash de transação, número de bloco, endereço
pub fn classify_input(raw: &str) -> SearchClassification {
    let input = raw.trim();
    if input.is_empty() {
        return SearchClassification::Empty;
    }
    if is_tx_hash(input) {
        return SearchClassification::TxHash;
    }
    if is_decimal_integer(input) {
        if let Ok(number) = input.parse::<u64>() {
            return SearchClassification::BlockNumber(number);
        }
    }
    if parse_address(input).is_some() {
        return SearchClassification::Address;
    }
    SearchClassification::Unrecognized
}

/// Busca corrente, válida apenas durante a sessão da interface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub raw_input: String,
    pub classification: SearchClassification,
    pub generation: u64,
}

/// Consulta a ser executada contra o serviço de dados
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupRequest {
    Transaction { generation: u64, hash: String },
    Block { generation: u64, number: u64 },
}

impl LookupRequest {
    pub fn generation(&self) -> u64 {
        match self {
            LookupRequest::Transaction { generation, .. } | LookupRequest::Block { generation, .. } => {
                *generation
            }
        }
    }
}

/// Resultado bruto de uma consulta
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    Transaction(Option<RawTransaction>),
    Block {
        number: u64,
        payload: Option<BlockWithTransactions>,
    },
    TimedOut,
    Unavailable(String),
}

/// Resposta marcada com a geração capturada no despacho
#[derive(Debug, Clone, PartialEq)]
pub struct LookupResponse {
    pub generation: u64,
    pub outcome: LookupOutcome,
}

/// Cabeçalho de bloco exibido no painel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockSummary {
    pub number: u64,
    pub hash: String,
    pub miner: String,
    pub timestamp: String,
    pub gas_used: String,
    pub transaction_count: usize,
}

/// Painel de bloco com todas as suas transações
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockPanel {
    pub block: BlockSummary,
    pub transactions: Vec<NormalizedTransaction>,
}

impl BlockPanel {
    /// Monta o painel mantendo apenas transações do bloco resolvido
    pub fn new(number: u64, payload: &BlockWithTransactions) -> Self {
        let transactions: Vec<NormalizedTransaction> = classify_all(&payload.transactions)
            .into_iter()
            .filter(|tx| tx.block_number() == number)
            .collect();

        let raw = &payload.block;
        let transaction_count = match raw.transaction_count.as_deref().map(str::trim) {
            Some(count) if is_decimal_integer(count) => parse_or_zero(&raw.transaction_count),
            _ => transactions.len(),
        };

        Self {
            block: BlockSummary {
                number,
                hash: text(&raw.hash),
                miner: text(&raw.miner),
                timestamp: text(&raw.timestamp),
                gas_used: text(&raw.gas_used),
                transaction_count,
            },
            transactions,
        }
    }

    /// Chaves de navegação de cada linha, na ordem do painel
    pub fn detail_keys(&self) -> Vec<&str> {
        self.transactions.iter().map(NormalizedTransaction::detail_key).collect()
    }

    pub fn page(&self, page_number: usize, page_size: usize) -> &[NormalizedTransaction] {
        page(&self.transactions, page_number, page_size)
    }
}

/// Estado visível do componente de busca
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchState {
    Idle,
    Typing,
    ResolvingTx,
    ResolvingBlock,
    ShowTx(NormalizedTransaction),
    ShowBlock(BlockPanel),
    NoMatch,
    /// Serviço de dados falhou; a interface mostra um indicador de erro
    Unavailable(String),
}

impl SearchState {
    pub fn is_resolving(&self) -> bool {
        matches!(self, SearchState::ResolvingTx | SearchState::ResolvingBlock)
    }
}

/// Máquina de estados da busca.
///
/// Cada alteração da entrada incrementa `generation`; somente respostas da
/// geração corrente podem alterar o painel.
#[derive(Debug, Clone)]
pub struct SearchResolver {
    generation: u64,
    query: Option<SearchQuery>,
    state: SearchState,
}

impl Default for SearchResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchResolver {
    pub fn new() -> Self {
        Self {
            generation: 0,
            query: None,
            state: SearchState::Idle,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn query(&self) -> Option<&SearchQuery> {
        self.query.as_ref()
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Registra uma alteração da entrada e limpa o painel
    pub fn input(&mut self, raw: &str) -> SearchClassification {
        self.generation += 1;
        let classification = classify_input(raw);
        if classification == SearchClassification::Empty {
            self.query = None;
            self.state = SearchState::Idle;
        } else {
            self.query = Some(SearchQuery {
                raw_input: raw.to_string(),
                classification,
                generation: self.generation,
            });
            self.state = SearchState::Typing;
        }
        classification
    }

    /// Decide a consulta da entrada atual.
    ///
    /// Apenas um tipo de consulta é emitido por entrada; entradas sem
    /// consulta vão direto para `NoMatch`.
    pub fn dispatch(&mut self) -> Option<LookupRequest> {
        if self.state != SearchState::Typing {
            return None;
        }
        let query = self.query.as_ref()?;
        match query.classification {
            SearchClassification::TxHash => {
                self.state = SearchState::ResolvingTx;
                Some(LookupRequest::Transaction {
                    generation: self.generation,
                    hash: query.raw_input.trim().to_string(),
                })
            }
            SearchClassification::BlockNumber(number) => {
                self.state = SearchState::ResolvingBlock;
                Some(LookupRequest::Block {
                    generation: self.generation,
                    number,
                })
            }
            _ => {
                self.state = SearchState::NoMatch;
                None
            }
        }
    }

    /// `input` seguido de `dispatch`
    pub fn search(&mut self, raw: &str) -> Option<LookupRequest> {
        self.input(raw);
        self.dispatch()
    }

    /// Aplica uma resposta; gerações antigas retornam `StaleResult` sem efeito
    pub fn apply(&mut self, response: LookupResponse) -> Result<()> {
        if response.generation != self.generation || !self.state.is_resolving() {
            debug!(
                response = response.generation,
                current = self.generation,
                "descartando resposta obsoleta"
            );
            return Err(Error::StaleResult {
                response: response.generation,
                current: self.generation,
            });
        }

        self.state = match response.outcome {
            LookupOutcome::Transaction(Some(raw)) => SearchState::ShowTx(classify(&raw)),
            LookupOutcome::Block {
                number,
                payload: Some(payload),
            } => SearchState::ShowBlock(BlockPanel::new(number, &payload)),
            LookupOutcome::Transaction(None) | LookupOutcome::Block { payload: None, .. } => {
                SearchState::NoMatch
            }
            LookupOutcome::TimedOut => SearchState::NoMatch,
            LookupOutcome::Unavailable(message) => SearchState::Unavailable(message),
        };
        Ok(())
    }

    /// Foco perdido ou entrada limpa: volta para `Idle`
    pub fn dismiss(&mut self) {
        self.generation += 1;
        self.query = None;
        self.state = SearchState::Idle;
    }
}

fn failed_outcome(err: Error, request: &str) -> LookupOutcome {
    match err {
        Error::TimedOut(_) => {
            warn!(request, "consulta excedeu o tempo limite");
            LookupOutcome::TimedOut
        }
        other => {
            warn!(request, error = %other, "falha no serviço de dados");
            LookupOutcome::Unavailable(other.to_string())
        }
    }
}

/// Executa uma única consulta com espera limitada.
///
/// Nenhuma consulta é abortada: o descarte de respostas obsoletas acontece
/// em [`SearchResolver::apply`].
pub async fn execute<P>(provider: &P, request: LookupRequest, timeout: Duration) -> LookupResponse
where
    P: ExplorerDataProvider + ?Sized,
{
    let generation = request.generation();
    let outcome = match request {
        LookupRequest::Transaction { hash, .. } => {
            match tokio::time::timeout(timeout, provider.get_transaction_by_hash(&hash)).await {
                Ok(Ok(tx)) => LookupOutcome::Transaction(tx),
                Ok(Err(err)) => failed_outcome(err, "transaction"),
                Err(_) => failed_outcome(Error::TimedOut(hash), "transaction"),
            }
        }
        LookupRequest::Block { number, .. } => {
            match tokio::time::timeout(timeout, provider.get_block_by_number(number)).await {
                Ok(Ok(payload)) => LookupOutcome::Block { number, payload },
                Ok(Err(err)) => failed_outcome(err, "block"),
                Err(_) => failed_outcome(Error::TimedOut(number.to_string()), "block"),
            }
        }
    };
    LookupResponse { generation, outcome }
}

/// Sessão de busca assíncrona.
///
/// Consultas rodam em tarefas independentes e devolvem as respostas por um
/// canal; a sessão aplica cada resposta no resolvedor na ordem de chegada,
/// deixando a comparação de geração decidir o que é exibido.
pub struct SearchSession<P: ?Sized> {
    provider: Arc<P>,
    resolver: SearchResolver,
    timeout: Duration,
    sender: mpsc::Sender<LookupResponse>,
    receiver: mpsc::Receiver<LookupResponse>,
    in_flight: usize,
}

impl<P> SearchSession<P>
where
    P: ExplorerDataProvider + ?Sized + 'static,
{
    pub fn new(provider: Arc<P>, config: &ExplorerConfig) -> Self {
        let (sender, receiver) = mpsc::channel(RESPONSE_CHANNEL_CAPACITY);
        Self {
            provider,
            resolver: SearchResolver::new(),
            timeout: config.lookup_timeout(),
            sender,
            receiver,
            in_flight: 0,
        }
    }

    pub fn resolver(&self) -> &SearchResolver {
        &self.resolver
    }

    pub fn state(&self) -> &SearchState {
        self.resolver.state()
    }

    /// Consultas despachadas cujas respostas ainda não foram recebidas
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Processa uma alteração da entrada, disparando a consulta correspondente
    pub fn on_input(&mut self, raw: &str) -> SearchClassification {
        let classification = self.resolver.input(raw);
        if let Some(request) = self.resolver.dispatch() {
            let provider = Arc::clone(&self.provider);
            let sender = self.sender.clone();
            let timeout = self.timeout;
            let generation = request.generation();
            self.in_flight += 1;
            tokio::spawn(async move {
                let lookup =
                    tokio::spawn(async move { execute(provider.as_ref(), request, timeout).await });
                // toda consulta despachada produz exatamente uma resposta
                let response = match lookup.await {
                    Ok(response) => response,
                    Err(err) => {
                        warn!(generation, error = %err, "consulta interrompida");
                        LookupResponse {
                            generation,
                            outcome: LookupOutcome::Unavailable(err.to_string()),
                        }
                    }
                };
                // a sessão pode ter sido encerrada
                let _ = sender.send(response).await;
            });
        }
        classification
    }

    pub fn dismiss(&mut self) {
        self.resolver.dismiss();
    }

    /// Aguarda a próxima resposta; retorna `true` se ela alterou o painel
    pub async fn next_response(&mut self) -> bool {
        if self.in_flight == 0 {
            return false;
        }
        match self.receiver.recv().await {
            Some(response) => {
                self.in_flight -= 1;
                self.resolver.apply(response).is_ok()
            }
            None => false,
        }
    }

    /// Aguarda todas as consultas pendentes
    pub async fn settle(&mut self) -> &SearchState {
        while self.in_flight > 0 {
            self.next_response().await;
        }
        self.resolver.state()
    }
}
