use anyhow::{anyhow, Result};
use mockito::{Matcher, Mock, ServerGuard};
use serde_json::{json, Map, Value};
use tracing::debug;

use crate::constants::{
    ASSEMBLY_ID, ASSEMBLY_REF, CONTIG_GC, CONTIG_IDS, CONTIG_LENGTHS, DNA_SIZE, GC_CONTENT,
    GENOME_REFS, METHOD_NOT_FOUND_CODE, NUM_CONTIGS, TEST_PASSWORD, TEST_TOKEN, TEST_USER,
};

/* -------------------------------------------------------------------------- */
/*                              CANNED PAYLOADS                               */
/* -------------------------------------------------------------------------- */
/// Returns the result the canned assembly gives for `method`
/// (`AssemblyAPI.<operation>` or the bare operation name).
pub fn canned_result(method: &str) -> Result<Value> {
    let operation = method.strip_prefix("AssemblyAPI.").unwrap_or(method);
    let value = match operation {
        "get_assembly_id" => json!(ASSEMBLY_ID),
        "get_genome_annotations" => json!(GENOME_REFS),
        "get_external_source_info" => json!({
            "external_source": "NCBI",
            "external_source_id": "GCF_000287295.1",
            "external_source_origination_date": "2012-09-13"
        }),
        "get_stats" => json!({
            "num_contigs": NUM_CONTIGS,
            "dna_size": DNA_SIZE,
            "gc_content": GC_CONTENT
        }),
        "get_number_contigs" => json!(NUM_CONTIGS),
        "get_gc_content" => json!(GC_CONTENT),
        "get_dna_size" => json!(DNA_SIZE),
        "get_contig_ids" => json!(CONTIG_IDS),
        "get_contig_lengths" => Value::Object(zip_contigs(CONTIG_LENGTHS.map(|l| json!(l)))),
        "get_contig_gc_content" => Value::Object(zip_contigs(CONTIG_GC.map(|gc| json!(gc)))),
        "get_contigs" => Value::Object(contigs()),
        "search_contigs" => json!({
            "query": "",
            "start": 0,
            "num_found": CONTIG_IDS.len(),
            "contigs": CONTIG_IDS
                .iter()
                .zip(CONTIG_LENGTHS)
                .map(|(id, length)| json!({"contig_id": id, "description": "", "length": length}))
                .collect::<Vec<_>>()
        }),
        "get_dna_sequence" => json!(["ACGT"]),
        "status" => json!({
            "state": "OK",
            "message": "",
            "version": "0.2.0",
            "git_url": "https://github.com/kbase/assembly_api.git",
            "git_commit_hash": "500a3a58b98a1b60e2f8639c724cf7021400ebc2"
        }),
        _ => return Err(anyhow!("no canned result for method {}", method)),
    };
    Ok(value)
}

fn zip_contigs(values: impl IntoIterator<Item = Value>) -> Map<String, Value> {
    CONTIG_IDS
        .iter()
        .map(|id| id.to_string())
        .zip(values)
        .collect()
}

fn contigs() -> Map<String, Value> {
    let details = CONTIG_IDS
        .iter()
        .zip(CONTIG_LENGTHS)
        .zip(CONTIG_GC)
        .map(|((id, length), gc)| {
            json!({
                "contig_id": id,
                "length": length,
                "gc_content": gc,
                "md5": format!("md5-{}", id),
                "name": id,
                "description": "",
                "is_circular": 0
            })
        });
    zip_contigs(details)
}

/* -------------------------------------------------------------------------- */
/*                              RPC STUB HELPERS                              */
/* -------------------------------------------------------------------------- */
/// Mocks a successful call of `method`. When `params` is given the request's
/// positional params must match it exactly.
pub fn mock_rpc_result(
    server: &mut ServerGuard,
    method: &str,
    params: Option<Value>,
    result: Value,
) -> Mock {
    debug!(method, "mocking RPC result");
    let mut expected = json!({"method": method});
    if let Some(params) = params {
        expected["params"] = params;
    }
    server
        .mock("POST", "/")
        .match_body(Matcher::PartialJson(expected))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"version": "1.1", "result": [result]}).to_string())
        .create()
}

/// Mocks `method` answering from the canned assembly.
pub fn mock_canned(server: &mut ServerGuard, method: &str) -> Result<Mock> {
    Ok(mock_rpc_result(server, method, None, canned_result(method)?))
}

/// Mocks `method` failing with a KBase-style error envelope on HTTP 500.
pub fn mock_rpc_error(server: &mut ServerGuard, method: &str, code: i64, message: &str) -> Mock {
    debug!(method, code, "mocking RPC error");
    server
        .mock("POST", "/")
        .match_body(Matcher::PartialJson(json!({"method": method})))
        .with_status(500)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "version": "1.1",
                "error": {
                    "name": "JSONRPCError",
                    "code": code,
                    "message": message,
                    "error": format!("Traceback (most recent call last):\n  {}", message)
                }
            })
            .to_string(),
        )
        .create()
}

/// Mocks any call answering "Method not found".
pub fn mock_method_not_found(server: &mut ServerGuard) -> Mock {
    server
        .mock("POST", "/")
        .with_status(500)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "error": {
                    "name": "JSONRPCError",
                    "code": METHOD_NOT_FOUND_CODE,
                    "message": "Method not found"
                }
            })
            .to_string(),
        )
        .create()
}

/* -------------------------------------------------------------------------- */
/*                         IDENTITY PROVIDER HELPERS                          */
/* -------------------------------------------------------------------------- */
/// Mocks an identity provider that logs `TEST_USER`/`TEST_PASSWORD` in
/// and issues `TEST_TOKEN`.
pub fn mock_login(server: &mut ServerGuard) -> Mock {
    server
        .mock("POST", "/")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("user_id".into(), TEST_USER.into()),
            Matcher::UrlEncoded("password".into(), TEST_PASSWORD.into()),
        ]))
        .with_status(200)
        .with_body(json!({"user_id": TEST_USER, "token": TEST_TOKEN}).to_string())
        .create()
}

/// Mocks an identity provider that accepts `TEST_TOKEN`.
pub fn mock_token_validation(server: &mut ServerGuard) -> Mock {
    server
        .mock("POST", "/")
        .match_body(Matcher::UrlEncoded("token".into(), TEST_TOKEN.into()))
        .with_status(200)
        .with_body(json!({"user_id": TEST_USER}).to_string())
        .create()
}

/// Mocks an identity provider that rejects every request.
pub fn mock_auth_rejected(server: &mut ServerGuard) -> Mock {
    server
        .mock("POST", "/")
        .with_status(401)
        .with_body(json!({"error_msg": "LoginFailure: Authentication failed."}).to_string())
        .create()
}

/// Request params for a single-reference call on the canned assembly.
pub fn ref_params() -> Value {
    json!([ASSEMBLY_REF])
}
