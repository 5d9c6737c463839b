use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::client::auth::AuthClient;
use crate::client::caller::{JsonClientCaller, RpcContext};
use crate::client::config::{parse_url, Config, Credentials};
use crate::client::error::Result;
use crate::client::transport::{HttpClient, RpcTransport};
use crate::types::{
    AssemblyContig, AssemblyExternalSourceInfo, AssemblyStats, GetDnaSequenceParams,
    SearchAssemblyOptions, SearchAssemblyResult,
};

// RPC method constants
pub const SEARCH_CONTIGS: &str = "AssemblyAPI.search_contigs";
pub const GET_ASSEMBLY_ID: &str = "AssemblyAPI.get_assembly_id";
pub const GET_GENOME_ANNOTATIONS: &str = "AssemblyAPI.get_genome_annotations";
pub const GET_EXTERNAL_SOURCE_INFO: &str = "AssemblyAPI.get_external_source_info";
pub const GET_STATS: &str = "AssemblyAPI.get_stats";
pub const GET_NUMBER_CONTIGS: &str = "AssemblyAPI.get_number_contigs";
pub const GET_GC_CONTENT: &str = "AssemblyAPI.get_gc_content";
pub const GET_DNA_SIZE: &str = "AssemblyAPI.get_dna_size";
pub const GET_CONTIG_IDS: &str = "AssemblyAPI.get_contig_ids";
pub const GET_CONTIG_LENGTHS: &str = "AssemblyAPI.get_contig_lengths";
pub const GET_CONTIG_GC_CONTENT: &str = "AssemblyAPI.get_contig_gc_content";
pub const GET_CONTIGS: &str = "AssemblyAPI.get_contigs";
pub const GET_DNA_SEQUENCE: &str = "AssemblyAPI.get_dna_sequence";
pub const STATUS: &str = "AssemblyAPI.status";

/// AssemblyApiClient provides typed access to the AssemblyAPI service
#[derive(Clone)]
pub struct AssemblyApiClient {
    caller: JsonClientCaller,
}

impl AssemblyApiClient {
    /// Create a client over HTTP. Supplied credentials are checked with the
    /// identity provider before the client is returned.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let token = resolve_token(&config)?;
        Ok(Self {
            caller: JsonClientCaller::new(config, token, Arc::new(HttpClient::new())),
        })
    }

    /// Create a client over a caller-supplied transport. A token in the
    /// config is used as-is; username/password credentials are ignored.
    pub fn with_transport(config: Config, transport: Arc<dyn RpcTransport>) -> Result<Self> {
        parse_url(&config.url, "service")?;
        let token = match &config.credentials {
            Credentials::Token { token } => Some(token.clone()),
            _ => None,
        };
        Ok(Self {
            caller: JsonClientCaller::new(config, token, transport),
        })
    }

    pub fn url(&self) -> &str {
        &self.caller.config.url
    }

    /// The token sent with requests, if the client holds one.
    pub fn token(&self) -> Option<&str> {
        self.caller.token.as_deref()
    }

    pub fn service_version(&self) -> Option<&str> {
        self.caller.config.service_version.as_deref()
    }

    pub fn set_service_version(&mut self, version: Option<String>) {
        self.caller.config.service_version = version;
    }

    pub fn read_timeout(&self) -> Option<Duration> {
        self.caller.config.read_timeout()
    }

    /// Zero or `None` means no timeout.
    pub fn set_read_timeout_ms(&mut self, milliseconds: Option<u64>) {
        self.caller.config.read_timeout_ms = milliseconds;
    }

    pub fn is_insecure_http_connection_allowed(&self) -> bool {
        self.caller.config.insecure_http_allowed
    }

    pub fn set_insecure_http_connection_allowed(&mut self, allowed: bool) {
        self.caller.config.insecure_http_allowed = allowed;
    }

    pub fn is_all_certificates_trusted(&self) -> bool {
        self.caller.config.all_certificates_trusted
    }

    /// Trust every TLS certificate, including self-signed ones.
    pub fn set_all_certificates_trusted(&mut self, trust_all: bool) {
        self.caller.config.all_certificates_trusted = trust_all;
    }

    pub fn is_streaming_mode_on(&self) -> bool {
        self.caller.config.streaming_mode
    }

    /// Stream request bodies with chunked encoding instead of buffering.
    /// Many servers are not compatible with this.
    pub fn set_streaming_mode(&mut self, streaming: bool) {
        self.caller.config.streaming_mode = streaming;
    }

    /// Make a raw RPC call and decode the single result element.
    pub fn call_method<R: DeserializeOwned>(
        &self,
        method: &str,
        args: Vec<Value>,
        auth_required: bool,
        context: Option<&RpcContext>,
    ) -> Result<R> {
        self.caller.jsonrpc_call(method, args, auth_required, context)
    }

    /// Search the contigs of an assembly with paging and sorting
    pub fn search_contigs(
        &self,
        params: &SearchAssemblyOptions,
        context: Option<&RpcContext>,
    ) -> Result<SearchAssemblyResult> {
        self.call_method(SEARCH_CONTIGS, vec![serde_json::to_value(params)?], false, context)
    }

    /// Get the assembly identifier (object name) for a reference
    pub fn get_assembly_id(&self, object_ref: &str, context: Option<&RpcContext>) -> Result<String> {
        self.call_method(GET_ASSEMBLY_ID, vec![json!(object_ref)], true, context)
    }

    /// Get references to the genome annotations that refer to this assembly
    pub fn get_genome_annotations(
        &self,
        object_ref: &str,
        context: Option<&RpcContext>,
    ) -> Result<Vec<String>> {
        self.call_method(GET_GENOME_ANNOTATIONS, vec![json!(object_ref)], true, context)
    }

    /// Get metadata about where the assembly came from
    pub fn get_external_source_info(
        &self,
        object_ref: &str,
        context: Option<&RpcContext>,
    ) -> Result<AssemblyExternalSourceInfo> {
        self.call_method(GET_EXTERNAL_SOURCE_INFO, vec![json!(object_ref)], true, context)
    }

    /// Get contig count, DNA size and GC content in one call
    pub fn get_stats(&self, object_ref: &str, context: Option<&RpcContext>) -> Result<AssemblyStats> {
        self.call_method(GET_STATS, vec![json!(object_ref)], true, context)
    }

    /// Get the number of contigs
    pub fn get_number_contigs(&self, object_ref: &str, context: Option<&RpcContext>) -> Result<i64> {
        self.call_method(GET_NUMBER_CONTIGS, vec![json!(object_ref)], true, context)
    }

    /// Get the GC proportion of the whole assembly, as reported by the server
    pub fn get_gc_content(&self, object_ref: &str, context: Option<&RpcContext>) -> Result<f64> {
        self.call_method(GET_GC_CONTENT, vec![json!(object_ref)], true, context)
    }

    /// Get the total DNA size
    pub fn get_dna_size(&self, object_ref: &str, context: Option<&RpcContext>) -> Result<i64> {
        self.call_method(GET_DNA_SIZE, vec![json!(object_ref)], true, context)
    }

    /// Get the contig identifiers
    pub fn get_contig_ids(
        &self,
        object_ref: &str,
        context: Option<&RpcContext>,
    ) -> Result<Vec<String>> {
        self.call_method(GET_CONTIG_IDS, vec![json!(object_ref)], true, context)
    }

    /// Get the length of each requested contig
    pub fn get_contig_lengths(
        &self,
        object_ref: &str,
        contig_ids: &[String],
        context: Option<&RpcContext>,
    ) -> Result<HashMap<String, i64>> {
        self.call_method(
            GET_CONTIG_LENGTHS,
            vec![json!(object_ref), json!(contig_ids)],
            true,
            context,
        )
    }

    /// Get the GC proportion of each requested contig
    pub fn get_contig_gc_content(
        &self,
        object_ref: &str,
        contig_ids: &[String],
        context: Option<&RpcContext>,
    ) -> Result<HashMap<String, f64>> {
        self.call_method(
            GET_CONTIG_GC_CONTENT,
            vec![json!(object_ref), json!(contig_ids)],
            true,
            context,
        )
    }

    /// Get full details for each requested contig
    pub fn get_contigs(
        &self,
        object_ref: &str,
        contig_ids: &[String],
        context: Option<&RpcContext>,
    ) -> Result<HashMap<String, AssemblyContig>> {
        self.call_method(
            GET_CONTIGS,
            vec![json!(object_ref), json!(contig_ids)],
            true,
            context,
        )
    }

    /// Extract DNA sequences for the given contig locations
    pub fn get_dna_sequence(
        &self,
        params: &GetDnaSequenceParams,
        context: Option<&RpcContext>,
    ) -> Result<Vec<String>> {
        self.call_method(GET_DNA_SEQUENCE, vec![serde_json::to_value(params)?], true, context)
    }

    /// Get the service's free-form status map (state, version, git info)
    pub fn status(&self, context: Option<&RpcContext>) -> Result<Map<String, Value>> {
        self.call_method(STATUS, vec![], false, context)
    }
}

fn auth_client(config: &Config) -> AuthClient {
    AuthClient::new(&config.auth_service_url)
        .with_all_certificates_trusted(config.all_certificates_trusted)
}

/// Validates or obtains a token according to the configured credentials.
fn resolve_token(config: &Config) -> Result<Option<String>> {
    let auth = || auth_client(config);
    match &config.credentials {
        Credentials::None => Ok(None),
        Credentials::Token { token } => {
            let validated = auth().validate_token(token)?;
            debug!(user = ?validated.user_id, "token validated");
            Ok(Some(validated.token))
        }
        Credentials::UserPassword { username, password } => {
            let issued = auth().login(username, password)?;
            debug!(user = ?issued.user_id, "logged in");
            Ok(Some(issued.token))
        }
    }
}
