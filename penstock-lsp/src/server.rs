//! Main language server implementation

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use penstock_analysis::{
    completion_items, record_type, scan_workspace, validate, CompletionCandidate, Finding,
    IdentityIndex, JsonParser, ScanSummary,
};
use penstock_config::{Loader, PenstockConfig, WORKSPACE_CONFIG_FILE};
use penstock_json::{ParseError, SourceLocation};
use tokio::sync::RwLock;
use tower_lsp::async_trait;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::{
    CompletionItem, CompletionOptions, CompletionParams, CompletionResponse, Diagnostic,
    DocumentFormattingParams, InitializeParams, InitializeResult, InitializedParams,
    InsertTextFormat, MessageType, OneOf, Position, Range, ServerCapabilities, ServerInfo,
    TextDocumentItem, TextDocumentSyncCapability, TextDocumentSyncKind, TextEdit, Url,
};
use tower_lsp::Client;

use crate::features::formatting::minimal_edits;

/// Source tag attached to every published diagnostic.
const DIAGNOSTIC_SOURCE: &str = "penstock-lsp";

/// Client-side effects the server produces: published diagnostics and log
/// messages. tower-lsp's [`Client`] is the production implementation; tests
/// substitute a recording one.
#[async_trait]
pub trait LspClient: Send + Sync + 'static {
    async fn publish_diagnostics(
        &self,
        uri: Url,
        diagnostics: Vec<Diagnostic>,
        version: Option<i32>,
    );
    async fn log_message(&self, typ: MessageType, message: String);
}

#[async_trait]
impl LspClient for Client {
    async fn publish_diagnostics(
        &self,
        uri: Url,
        diagnostics: Vec<Diagnostic>,
        version: Option<i32>,
    ) {
        Client::publish_diagnostics(self, uri, diagnostics, version).await;
    }

    async fn log_message(&self, typ: MessageType, message: String) {
        Client::log_message(self, typ, message).await;
    }
}

/// Analysis operations the server dispatches to. The default provider wires
/// the penstock-analysis core with the production JSON parser.
pub trait AnalysisProvider: Send + Sync + 'static {
    fn validate(&self, index: &mut IdentityIndex, uri: &Url, text: &str) -> Vec<Finding>;
    fn scan_workspace(&self, index: &mut IdentityIndex, root: &Path) -> ScanSummary;
    fn completions(
        &self,
        index: &IdentityIndex,
        uri: &Url,
        include_datasets: bool,
    ) -> Vec<CompletionCandidate>;
    fn format(&self, text: &str) -> std::result::Result<String, ParseError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultAnalysisProvider {
    parser: JsonParser,
}

impl AnalysisProvider for DefaultAnalysisProvider {
    fn validate(&self, index: &mut IdentityIndex, uri: &Url, text: &str) -> Vec<Finding> {
        validate(&self.parser, index, uri, text)
    }

    fn scan_workspace(&self, index: &mut IdentityIndex, root: &Path) -> ScanSummary {
        scan_workspace(&self.parser, index, root)
    }

    fn completions(
        &self,
        index: &IdentityIndex,
        uri: &Url,
        include_datasets: bool,
    ) -> Vec<CompletionCandidate> {
        completion_items(index, record_type(uri), include_datasets)
    }

    fn format(&self, text: &str) -> std::result::Result<String, ParseError> {
        penstock_json::format(text)
    }
}

/// Latest full text per open document. Validation reparses on every change,
/// so only the text is cached; formatting and completion read from here.
#[derive(Default)]
struct DocumentStore {
    entries: RwLock<HashMap<Url, Arc<String>>>,
}

impl DocumentStore {
    async fn upsert(&self, uri: Url, text: String) -> Arc<String> {
        let text = Arc::new(text);
        self.entries.write().await.insert(uri, Arc::clone(&text));
        text
    }

    async fn get(&self, uri: &Url) -> Option<Arc<String>> {
        self.entries.read().await.get(uri).cloned()
    }

    async fn remove(&self, uri: &Url) {
        self.entries.write().await.remove(uri);
    }
}

pub struct PenstockLanguageServer<C = Client, P = DefaultAnalysisProvider> {
    client: C,
    analysis: Arc<P>,
    documents: DocumentStore,
    index: RwLock<IdentityIndex>,
    workspace_roots: RwLock<Vec<PathBuf>>,
    config: RwLock<PenstockConfig>,
}

impl PenstockLanguageServer<Client, DefaultAnalysisProvider> {
    pub fn new(client: Client) -> Self {
        Self::with_analysis(client, Arc::new(DefaultAnalysisProvider::default()))
    }
}

impl<C, P> PenstockLanguageServer<C, P>
where
    C: LspClient,
    P: AnalysisProvider,
{
    pub fn with_analysis(client: C, analysis: Arc<P>) -> Self {
        Self {
            client,
            analysis,
            documents: DocumentStore::default(),
            index: RwLock::new(IdentityIndex::new()),
            workspace_roots: RwLock::new(Vec::new()),
            config: RwLock::new(PenstockConfig::default()),
        }
    }

    /// Validate one revision and publish the full replacement set of
    /// diagnostics for its URI.
    async fn run_diagnostics(&self, uri: Url, text: Arc<String>) {
        let findings = {
            let mut index = self.index.write().await;
            self.analysis.validate(&mut index, &uri, &text)
        };
        let diagnostics = to_lsp_diagnostics(&text, findings);
        self.client.publish_diagnostics(uri, diagnostics, None).await;
    }

    async fn scan_workspace_roots(&self) {
        let roots = self.workspace_roots.read().await.clone();
        self.client
            .log_message(MessageType::INFO, "starting initial workspace scan".into())
            .await;
        for root in roots {
            let summary = {
                let mut index = self.index.write().await;
                self.analysis.scan_workspace(&mut index, &root)
            };
            self.client
                .log_message(
                    MessageType::INFO,
                    format!(
                        "indexed {} documents under {} ({} skipped)",
                        summary.indexed,
                        root.display(),
                        summary.skipped
                    ),
                )
                .await;
        }
        self.client
            .log_message(MessageType::INFO, "initial workspace scan completed".into())
            .await;
    }
}

fn to_lsp_range(location: &SourceLocation, span: &std::ops::Range<usize>) -> Range {
    let start = location.byte_to_position(span.start);
    let end = location.byte_to_position(span.end);
    Range {
        start: Position::new(start.line as u32, start.column as u32),
        end: Position::new(end.line as u32, end.column as u32),
    }
}

fn to_lsp_diagnostics(text: &str, findings: Vec<Finding>) -> Vec<Diagnostic> {
    let location = SourceLocation::new(text);
    findings
        .into_iter()
        .map(|finding| Diagnostic {
            range: to_lsp_range(&location, &finding.span),
            severity: Some(finding.severity),
            source: Some(DIAGNOSTIC_SOURCE.to_string()),
            message: finding.message,
            ..Diagnostic::default()
        })
        .collect()
}

fn to_completion_item(candidate: CompletionCandidate) -> CompletionItem {
    let insert_text_format = candidate
        .insert_text
        .as_ref()
        .map(|_| InsertTextFormat::SNIPPET);
    CompletionItem {
        label: candidate.label,
        kind: Some(candidate.kind),
        detail: candidate.detail,
        insert_text: candidate.insert_text,
        insert_text_format,
        ..CompletionItem::default()
    }
}

#[allow(deprecated)]
fn workspace_roots_from(params: &InitializeParams) -> Vec<PathBuf> {
    if let Some(folders) = params.workspace_folders.as_ref() {
        let roots: Vec<PathBuf> = folders
            .iter()
            .filter_map(|folder| folder.uri.to_file_path().ok())
            .collect();
        if !roots.is_empty() {
            return roots;
        }
    }
    params
        .root_uri
        .as_ref()
        .and_then(|uri| uri.to_file_path().ok())
        .into_iter()
        .collect()
}

#[async_trait]
impl<C, P> tower_lsp::LanguageServer for PenstockLanguageServer<C, P>
where
    C: LspClient,
    P: AnalysisProvider,
{
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        *self.workspace_roots.write().await = workspace_roots_from(&params);

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::FULL,
                )),
                completion_provider: Some(CompletionOptions {
                    resolve_provider: Some(false),
                    ..CompletionOptions::default()
                }),
                document_formatting_provider: Some(OneOf::Left(true)),
                ..ServerCapabilities::default()
            },
            server_info: Some(ServerInfo {
                name: "penstock-lsp".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        let roots = self.workspace_roots.read().await.clone();
        if let Some(first) = roots.first() {
            match Loader::new()
                .with_optional_file(first.join(WORKSPACE_CONFIG_FILE))
                .build()
            {
                Ok(config) => *self.config.write().await = config,
                Err(err) => {
                    self.client
                        .log_message(
                            MessageType::WARNING,
                            format!("invalid {WORKSPACE_CONFIG_FILE}, using defaults: {err}"),
                        )
                        .await;
                }
            }
        }
        if self.config.read().await.scan.enabled {
            self.scan_workspace_roots().await;
        }
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    async fn did_open(&self, params: lsp_types::DidOpenTextDocumentParams) {
        let TextDocumentItem { uri, text, .. } = params.text_document;
        let text = self.documents.upsert(uri.clone(), text).await;
        self.run_diagnostics(uri, text).await;
    }

    async fn did_change(&self, params: lsp_types::DidChangeTextDocumentParams) {
        // Full document sync: the last change carries the whole text.
        if let Some(change) = params.content_changes.into_iter().last() {
            let uri = params.text_document.uri;
            let text = self.documents.upsert(uri.clone(), change.text).await;
            self.run_diagnostics(uri, text).await;
        }
    }

    async fn did_close(&self, params: lsp_types::DidCloseTextDocumentParams) {
        // Only the text cache is dropped. The identity index has no
        // delete/rename tracking, so the entry stays until the URI is seen
        // again.
        self.documents.remove(&params.text_document.uri).await;
    }

    async fn completion(&self, params: CompletionParams) -> Result<Option<CompletionResponse>> {
        let completion = self.config.read().await.completion.clone();
        if !completion.enabled {
            return Ok(None);
        }
        let uri = params.text_document_position.text_document.uri;
        let candidates = {
            let index = self.index.read().await;
            self.analysis
                .completions(&index, &uri, completion.dataset_suggestions)
        };
        if candidates.is_empty() {
            return Ok(None);
        }
        Ok(Some(CompletionResponse::Array(
            candidates.into_iter().map(to_completion_item).collect(),
        )))
    }

    async fn formatting(&self, params: DocumentFormattingParams) -> Result<Option<Vec<TextEdit>>> {
        let uri = params.text_document.uri;
        let Some(text) = self.documents.get(&uri).await else {
            return Ok(None);
        };
        let formatted = match self.analysis.format(&text) {
            Ok(formatted) => formatted,
            // Not valid JSON: formatting quietly declines, the same way the
            // validator leaves syntax errors to the dedicated checker.
            Err(_) => return Ok(None),
        };
        let edits = minimal_edits(&text, &formatted);
        if edits.is_empty() {
            return Ok(None);
        }
        let location = SourceLocation::new(&text);
        Ok(Some(
            edits
                .into_iter()
                .map(|edit| TextEdit {
                    range: to_lsp_range(&location, &(edit.start..edit.end)),
                    new_text: edit.new_text,
                })
                .collect(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use tower_lsp::lsp_types::{
        DiagnosticSeverity, DidChangeTextDocumentParams, DidOpenTextDocumentParams,
        PartialResultParams, TextDocumentContentChangeEvent, TextDocumentIdentifier,
        TextDocumentPositionParams, VersionedTextDocumentIdentifier, WorkDoneProgressParams,
        WorkspaceFolder,
    };
    use tower_lsp::LanguageServer;

    #[derive(Default)]
    struct RecordingClient {
        published: Mutex<Vec<(Url, Vec<Diagnostic>)>>,
        messages: Mutex<Vec<(MessageType, String)>>,
    }

    impl RecordingClient {
        fn last_published_for(&self, uri: &Url) -> Option<Vec<Diagnostic>> {
            self.published
                .lock()
                .unwrap()
                .iter()
                .rev()
                .find(|(published, _)| published == uri)
                .map(|(_, diagnostics)| diagnostics.clone())
        }
    }

    #[async_trait]
    impl LspClient for Arc<RecordingClient> {
        async fn publish_diagnostics(
            &self,
            uri: Url,
            diagnostics: Vec<Diagnostic>,
            _version: Option<i32>,
        ) {
            self.published.lock().unwrap().push((uri, diagnostics));
        }

        async fn log_message(&self, typ: MessageType, message: String) {
            self.messages.lock().unwrap().push((typ, message));
        }
    }

    fn server() -> (
        Arc<RecordingClient>,
        PenstockLanguageServer<Arc<RecordingClient>, DefaultAnalysisProvider>,
    ) {
        let client = Arc::new(RecordingClient::default());
        let server = PenstockLanguageServer::with_analysis(
            Arc::clone(&client),
            Arc::new(DefaultAnalysisProvider::default()),
        );
        (client, server)
    }

    fn pipe_uri(name: &str) -> Url {
        Url::parse(&format!("file:///ws/pipes/{name}.json")).unwrap()
    }

    async fn open(
        server: &PenstockLanguageServer<Arc<RecordingClient>, DefaultAnalysisProvider>,
        uri: &Url,
        text: &str,
    ) {
        server
            .did_open(DidOpenTextDocumentParams {
                text_document: TextDocumentItem {
                    uri: uri.clone(),
                    language_id: "json".into(),
                    version: 1,
                    text: text.to_string(),
                },
            })
            .await;
    }

    async fn change(
        server: &PenstockLanguageServer<Arc<RecordingClient>, DefaultAnalysisProvider>,
        uri: &Url,
        text: &str,
    ) {
        server
            .did_change(DidChangeTextDocumentParams {
                text_document: VersionedTextDocumentIdentifier {
                    uri: uri.clone(),
                    version: 2,
                },
                content_changes: vec![TextDocumentContentChangeEvent {
                    range: None,
                    range_length: None,
                    text: text.to_string(),
                }],
            })
            .await;
    }

    #[tokio::test]
    async fn did_open_publishes_structural_diagnostics() {
        let (client, server) = server();
        let uri = pipe_uri("anon");
        let text = r#"{"name": "x"}"#;
        open(&server, &uri, text).await;

        let diagnostics = client.last_published_for(&uri).unwrap();
        assert_eq!(diagnostics.len(), 1);
        let diagnostic = &diagnostics[0];
        assert_eq!(diagnostic.severity, Some(DiagnosticSeverity::WARNING));
        assert_eq!(diagnostic.source.as_deref(), Some("penstock-lsp"));
        assert_eq!(diagnostic.message, "Pipe: missing \"_id\" field.");
        assert_eq!(diagnostic.range.start, Position::new(0, 0));
        assert_eq!(diagnostic.range.end, Position::new(0, text.len() as u32));
    }

    #[tokio::test]
    async fn did_change_replaces_diagnostics_with_a_clean_set() {
        let (client, server) = server();
        let uri = pipe_uri("events");
        open(&server, &uri, r#"{"name": "x"}"#).await;
        assert_eq!(client.last_published_for(&uri).unwrap().len(), 1);

        change(&server, &uri, r#"{"_id": "events"}"#).await;
        assert!(client.last_published_for(&uri).unwrap().is_empty());
    }

    #[tokio::test]
    async fn duplicate_ids_across_documents_point_at_the_id_value() {
        let (client, server) = server();
        let first = pipe_uri("a");
        let second = pipe_uri("b");
        open(&server, &first, r#"{"_id": "x"}"#).await;
        assert!(client.last_published_for(&first).unwrap().is_empty());

        let text = r#"{"_id": "x"}"#;
        open(&server, &second, text).await;
        let diagnostics = client.last_published_for(&second).unwrap();
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains(first.as_str()));
        let value_offset = text.find("\"x\"").unwrap() as u32;
        assert_eq!(diagnostics[0].range.start, Position::new(0, value_offset));
        assert_eq!(diagnostics[0].range.end, Position::new(0, value_offset + 3));
    }

    #[tokio::test]
    async fn diagnostic_positions_are_line_based_in_multiline_documents() {
        let (client, server) = server();
        let uri = pipe_uri("multi");
        let text = "{\n  \"_id\": 5\n}";
        open(&server, &uri, text).await;

        let diagnostics = client.last_published_for(&uri).unwrap();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].message, "Pipe: \"_id\" field must be type string.");
        assert_eq!(diagnostics[0].range.start, Position::new(1, 9));
        assert_eq!(diagnostics[0].range.end, Position::new(1, 10));
    }

    #[tokio::test]
    async fn syntax_errors_publish_an_empty_set() {
        let (client, server) = server();
        let uri = pipe_uri("broken");
        open(&server, &uri, r#"{"_id": }"#).await;
        assert!(client.last_published_for(&uri).unwrap().is_empty());
    }

    #[tokio::test]
    async fn documents_outside_record_directories_are_inert() {
        let (client, server) = server();
        let uri = Url::parse("file:///ws/notes/todo.json").unwrap();
        open(&server, &uri, r#"{"anything": [1, 2]}"#).await;
        assert!(client.last_published_for(&uri).unwrap().is_empty());
    }

    #[tokio::test]
    async fn formatting_returns_minimal_edits_for_open_documents() {
        let (_, server) = server();
        let uri = pipe_uri("fmt");
        open(&server, &uri, r#"{"b":1,"a":2}"#).await;

        let edits = server
            .formatting(DocumentFormattingParams {
                text_document: TextDocumentIdentifier { uri: uri.clone() },
                options: Default::default(),
                work_done_progress_params: WorkDoneProgressParams::default(),
            })
            .await
            .unwrap()
            .unwrap();
        assert!(!edits.is_empty());

        // A canonical document needs no edits at all.
        change(&server, &uri, "{\n  \"a\": 2,\n  \"b\": 1\n}").await;
        let edits = server
            .formatting(DocumentFormattingParams {
                text_document: TextDocumentIdentifier { uri: uri.clone() },
                options: Default::default(),
                work_done_progress_params: WorkDoneProgressParams::default(),
            })
            .await
            .unwrap();
        assert!(edits.is_none());
    }

    #[tokio::test]
    async fn formatting_declines_on_invalid_json_and_unknown_documents() {
        let (_, server) = server();
        let uri = pipe_uri("broken");
        open(&server, &uri, "{").await;

        let edits = server
            .formatting(DocumentFormattingParams {
                text_document: TextDocumentIdentifier { uri: uri.clone() },
                options: Default::default(),
                work_done_progress_params: WorkDoneProgressParams::default(),
            })
            .await
            .unwrap();
        assert!(edits.is_none());

        // Never-opened documents have no cached text to format.
        let edits = server
            .formatting(DocumentFormattingParams {
                text_document: TextDocumentIdentifier {
                    uri: pipe_uri("never-opened"),
                },
                options: Default::default(),
                work_done_progress_params: WorkDoneProgressParams::default(),
            })
            .await
            .unwrap();
        assert!(edits.is_none());
    }

    fn completion_params(uri: &Url) -> CompletionParams {
        CompletionParams {
            text_document_position: TextDocumentPositionParams {
                text_document: TextDocumentIdentifier { uri: uri.clone() },
                position: Position::new(0, 0),
            },
            work_done_progress_params: WorkDoneProgressParams::default(),
            partial_result_params: PartialResultParams::default(),
            context: None,
        }
    }

    #[tokio::test]
    async fn completion_offers_root_keys_and_known_datasets() {
        let (_, server) = server();
        let producer = pipe_uri("producer");
        open(
            &server,
            &producer,
            r#"{"_id": "producer", "sink": {"dataset": "events-final"}}"#,
        )
        .await;

        let response = server
            .completion(completion_params(&pipe_uri("consumer")))
            .await
            .unwrap()
            .unwrap();
        let CompletionResponse::Array(items) = response else {
            panic!("expected a plain completion list");
        };
        let labels: Vec<&str> = items.iter().map(|item| item.label.as_str()).collect();
        assert!(labels.contains(&"\"_id\""));
        assert!(labels.contains(&"\"name\""));
        assert!(labels.contains(&"\"events-final\""));
        assert!(items
            .iter()
            .filter(|item| item.insert_text.is_some())
            .all(|item| item.insert_text_format == Some(InsertTextFormat::SNIPPET)));
    }

    #[tokio::test]
    async fn completion_respects_the_disabled_config() {
        let (_, server) = server();
        server.config.write().await.completion.enabled = false;
        let response = server
            .completion(completion_params(&pipe_uri("any")))
            .await
            .unwrap();
        assert!(response.is_none());
    }

    #[tokio::test]
    async fn initialized_scans_workspace_folders_and_logs() {
        let workspace = tempfile::tempdir().unwrap();
        let pipes = workspace.path().join("pipes");
        std::fs::create_dir(&pipes).unwrap();
        std::fs::write(pipes.join("seeded.json"), r#"{"_id": "seeded"}"#).unwrap();

        let (client, server) = server();
        let folder_uri = Url::from_file_path(workspace.path()).unwrap();
        server
            .initialize(InitializeParams {
                workspace_folders: Some(vec![WorkspaceFolder {
                    uri: folder_uri,
                    name: "ws".into(),
                }]),
                ..InitializeParams::default()
            })
            .await
            .unwrap();
        server.initialized(InitializedParams {}).await;

        let messages = client.messages.lock().unwrap().clone();
        assert!(messages
            .iter()
            .any(|(_, message)| message.contains("indexed 1 documents")));
        assert!(messages
            .iter()
            .any(|(_, message)| message == "initial workspace scan completed"));

        // A live document now conflicts with the scanned one.
        let live = pipe_uri("live");
        open(&server, &live, r#"{"_id": "seeded"}"#).await;
        let diagnostics = client.last_published_for(&live).unwrap();
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("seeded.json"));
    }

    #[tokio::test]
    async fn scan_can_be_disabled_by_workspace_config() {
        let workspace = tempfile::tempdir().unwrap();
        let pipes = workspace.path().join("pipes");
        std::fs::create_dir(&pipes).unwrap();
        std::fs::write(pipes.join("seeded.json"), r#"{"_id": "seeded"}"#).unwrap();
        std::fs::write(
            workspace.path().join(WORKSPACE_CONFIG_FILE),
            "[scan]\nenabled = false\n",
        )
        .unwrap();

        let (client, server) = server();
        server
            .initialize(InitializeParams {
                workspace_folders: Some(vec![WorkspaceFolder {
                    uri: Url::from_file_path(workspace.path()).unwrap(),
                    name: "ws".into(),
                }]),
                ..InitializeParams::default()
            })
            .await
            .unwrap();
        server.initialized(InitializedParams {}).await;

        assert!(client.messages.lock().unwrap().is_empty());
        assert!(server.index.read().await.is_empty());
    }

    #[derive(Default)]
    struct MockAnalysisProvider {
        validate_called: AtomicUsize,
        scan_called: AtomicUsize,
        completions_called: AtomicUsize,
        format_called: AtomicUsize,
    }

    impl AnalysisProvider for MockAnalysisProvider {
        fn validate(&self, _: &mut IdentityIndex, _: &Url, text: &str) -> Vec<Finding> {
            self.validate_called.fetch_add(1, Ordering::SeqCst);
            vec![Finding {
                severity: DiagnosticSeverity::WARNING,
                span: 0..text.len(),
                message: "mock finding".into(),
            }]
        }

        fn scan_workspace(&self, _: &mut IdentityIndex, _: &Path) -> ScanSummary {
            self.scan_called.fetch_add(1, Ordering::SeqCst);
            ScanSummary {
                indexed: 2,
                skipped: 1,
            }
        }

        fn completions(
            &self,
            _: &IdentityIndex,
            _: &Url,
            _: bool,
        ) -> Vec<CompletionCandidate> {
            self.completions_called.fetch_add(1, Ordering::SeqCst);
            Vec::new()
        }

        fn format(&self, text: &str) -> std::result::Result<String, ParseError> {
            self.format_called.fetch_add(1, Ordering::SeqCst);
            Ok(text.to_string())
        }
    }

    #[tokio::test]
    async fn handlers_dispatch_to_the_analysis_provider() {
        let client = Arc::new(RecordingClient::default());
        let provider = Arc::new(MockAnalysisProvider::default());
        let server =
            PenstockLanguageServer::with_analysis(Arc::clone(&client), Arc::clone(&provider));

        let uri = pipe_uri("dispatch");
        open_with_mock(&server, &uri, "{}").await;
        assert_eq!(provider.validate_called.load(Ordering::SeqCst), 1);
        assert_eq!(
            client.last_published_for(&uri).unwrap()[0].message,
            "mock finding"
        );

        server.completion(completion_params(&uri)).await.unwrap();
        assert_eq!(provider.completions_called.load(Ordering::SeqCst), 1);

        server
            .formatting(DocumentFormattingParams {
                text_document: TextDocumentIdentifier { uri: uri.clone() },
                options: Default::default(),
                work_done_progress_params: WorkDoneProgressParams::default(),
            })
            .await
            .unwrap();
        assert_eq!(provider.format_called.load(Ordering::SeqCst), 1);
    }

    async fn open_with_mock(
        server: &PenstockLanguageServer<Arc<RecordingClient>, MockAnalysisProvider>,
        uri: &Url,
        text: &str,
    ) {
        server
            .did_open(DidOpenTextDocumentParams {
                text_document: TextDocumentItem {
                    uri: uri.clone(),
                    language_id: "json".into(),
                    version: 1,
                    text: text.to_string(),
                },
            })
            .await;
    }
}
