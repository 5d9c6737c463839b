use assembly_sdk::{
    AssemblyApiClient, AssemblyApiError, ColumnSorting, Config, ContigLocation,
    GetDnaSequenceParams, RpcContext, SearchAssemblyOptions, GET_ASSEMBLY_ID, GET_CONTIGS,
    GET_CONTIG_GC_CONTENT, GET_CONTIG_IDS, GET_CONTIG_LENGTHS, GET_DNA_SEQUENCE, GET_DNA_SIZE,
    GET_EXTERNAL_SOURCE_INFO, GET_GC_CONTENT, GET_GENOME_ANNOTATIONS, GET_NUMBER_CONTIGS,
    GET_STATS, SEARCH_CONTIGS, STATUS,
};
use assembly_test_sdk::constants::{
    ASSEMBLY_ID, ASSEMBLY_REF, CONTIG_GC, CONTIG_IDS, CONTIG_LENGTHS, DNA_SIZE, GC_CONTENT,
    GENOME_REFS, METHOD_NOT_FOUND_CODE, NUM_CONTIGS, TEST_PASSWORD, TEST_TOKEN, TEST_USER,
};
use assembly_test_sdk::{
    init_logging, mock_auth_rejected, mock_canned, mock_login, mock_method_not_found,
    mock_rpc_error, mock_rpc_result, mock_token_validation, ref_params,
};
use mockito::{Matcher, Server, ServerGuard};
use serde_json::json;
use std::io::Write;
use std::time::Duration;

fn contig_ids() -> Vec<String> {
    CONTIG_IDS.iter().map(|id| id.to_string()).collect()
}

/// Client against `server` holding a token validated by `auth`.
fn authenticated_client(server: &ServerGuard, auth: &mut ServerGuard) -> AssemblyApiClient {
    init_logging();
    let validation = mock_token_validation(auth);
    let config = Config::new(server.url())
        .with_token(TEST_TOKEN)
        .with_auth_service_url(auth.url())
        .with_insecure_http_allowed(true);
    let client = AssemblyApiClient::new(config).unwrap();
    validation.assert();
    client
}

#[test]
fn test_get_stats_example() {
    let mut server = Server::new();
    let mut auth = Server::new();
    let mock = mock_rpc_result(
        &mut server,
        GET_STATS,
        Some(json!(["6/1/1"])),
        json!({"num_contigs": 5, "dna_size": 123456, "gc_content": 0.41}),
    );

    let client = authenticated_client(&server, &mut auth);
    let stats = client.get_stats("6/1/1", None).unwrap();

    assert_eq!(stats.num_contigs, Some(5));
    assert_eq!(stats.dna_size, Some(123456));
    assert_eq!(stats.gc_content, Some(0.41));
    mock.assert();
}

#[test]
fn test_scalar_methods() {
    let mut server = Server::new();
    let mut auth = Server::new();
    let mocks = vec![
        mock_canned(&mut server, GET_ASSEMBLY_ID).unwrap(),
        mock_canned(&mut server, GET_NUMBER_CONTIGS).unwrap(),
        mock_canned(&mut server, GET_GC_CONTENT).unwrap(),
        mock_canned(&mut server, GET_DNA_SIZE).unwrap(),
    ];

    let client = authenticated_client(&server, &mut auth);

    assert_eq!(client.get_assembly_id(ASSEMBLY_REF, None).unwrap(), ASSEMBLY_ID);
    assert_eq!(client.get_number_contigs(ASSEMBLY_REF, None).unwrap(), NUM_CONTIGS);
    assert_eq!(client.get_gc_content(ASSEMBLY_REF, None).unwrap(), GC_CONTENT);
    assert_eq!(client.get_dna_size(ASSEMBLY_REF, None).unwrap(), DNA_SIZE);
    for mock in mocks {
        mock.assert();
    }
}

#[test]
fn test_list_methods() {
    let mut server = Server::new();
    let mut auth = Server::new();
    let annotations = mock_canned(&mut server, GET_GENOME_ANNOTATIONS).unwrap();
    let ids = mock_canned(&mut server, GET_CONTIG_IDS).unwrap();

    let client = authenticated_client(&server, &mut auth);

    assert_eq!(
        client.get_genome_annotations(ASSEMBLY_REF, None).unwrap(),
        GENOME_REFS.to_vec()
    );
    assert_eq!(client.get_contig_ids(ASSEMBLY_REF, None).unwrap(), contig_ids());
    annotations.assert();
    ids.assert();
}

#[test]
fn test_external_source_info() {
    let mut server = Server::new();
    let mut auth = Server::new();
    let mock = mock_canned(&mut server, GET_EXTERNAL_SOURCE_INFO).unwrap();

    let client = authenticated_client(&server, &mut auth);
    let info = client.get_external_source_info(ASSEMBLY_REF, None).unwrap();

    assert_eq!(info.external_source.as_deref(), Some("NCBI"));
    assert_eq!(info.external_source_id.as_deref(), Some("GCF_000287295.1"));
    assert_eq!(
        info.external_source_origination_date.as_deref(),
        Some("2012-09-13")
    );
    mock.assert();
}

#[test]
fn test_per_contig_maps() {
    let mut server = Server::new();
    let mut auth = Server::new();
    let mocks = vec![
        mock_canned(&mut server, GET_CONTIG_LENGTHS).unwrap(),
        mock_canned(&mut server, GET_CONTIG_GC_CONTENT).unwrap(),
        mock_canned(&mut server, GET_CONTIGS).unwrap(),
    ];

    let client = authenticated_client(&server, &mut auth);
    let ids = contig_ids();

    let lengths = client.get_contig_lengths(ASSEMBLY_REF, &ids, None).unwrap();
    let gc = client.get_contig_gc_content(ASSEMBLY_REF, &ids, None).unwrap();
    let contigs = client.get_contigs(ASSEMBLY_REF, &ids, None).unwrap();

    for (i, id) in CONTIG_IDS.iter().enumerate() {
        assert_eq!(lengths[*id], CONTIG_LENGTHS[i]);
        assert_eq!(gc[*id], CONTIG_GC[i]);
        let contig = &contigs[*id];
        assert_eq!(contig.contig_id.as_deref(), Some(*id));
        assert_eq!(contig.length, Some(CONTIG_LENGTHS[i]));
        assert_eq!(contig.gc_content, Some(CONTIG_GC[i]));
        assert_eq!(contig.is_circular, Some(0));
        assert_eq!(contig.is_complete, None);
    }
    for mock in mocks {
        mock.assert();
    }
}

#[test]
fn test_empty_contig_list_returns_empty_maps() {
    let mut server = Server::new();
    let mut auth = Server::new();
    let lengths = mock_rpc_result(
        &mut server,
        GET_CONTIG_LENGTHS,
        Some(json!([ASSEMBLY_REF, []])),
        json!({}),
    );
    let gc = mock_rpc_result(
        &mut server,
        GET_CONTIG_GC_CONTENT,
        Some(json!([ASSEMBLY_REF, []])),
        json!({}),
    );

    let client = authenticated_client(&server, &mut auth);

    assert!(client
        .get_contig_lengths(ASSEMBLY_REF, &[], None)
        .unwrap()
        .is_empty());
    assert!(client
        .get_contig_gc_content(ASSEMBLY_REF, &[], None)
        .unwrap()
        .is_empty());
    lengths.assert();
    gc.assert();
}

#[test]
fn test_gc_values_pass_through_unclamped() {
    let mut server = Server::new();
    let mut auth = Server::new();
    let total = mock_rpc_result(&mut server, GET_GC_CONTENT, Some(ref_params()), json!(-0.25));
    let per_contig = mock_rpc_result(
        &mut server,
        GET_CONTIG_GC_CONTENT,
        None,
        json!({"c1": 1.5, "c2": -3.0}),
    );

    let client = authenticated_client(&server, &mut auth);

    assert_eq!(client.get_gc_content(ASSEMBLY_REF, None).unwrap(), -0.25);
    let gc = client
        .get_contig_gc_content(ASSEMBLY_REF, &["c1".to_string(), "c2".to_string()], None)
        .unwrap();
    assert_eq!(gc["c1"], 1.5);
    assert_eq!(gc["c2"], -3.0);
    total.assert();
    per_contig.assert();
}

#[test]
fn test_search_contigs() {
    let mut server = Server::new();
    let options = SearchAssemblyOptions::new(ASSEMBLY_REF)
        .with_sort(ColumnSorting::ascending("length"))
        .with_limit(3);
    let mock = server
        .mock("POST", "/")
        .match_body(Matcher::PartialJson(json!({
            "method": SEARCH_CONTIGS,
            "params": [{"ref": ASSEMBLY_REF, "sort_by": [["length", 1]], "limit": 3}]
        })))
        .with_status(200)
        .with_body(
            json!({"result": [assembly_test_sdk::canned_result(SEARCH_CONTIGS).unwrap()]})
                .to_string(),
        )
        .create();

    // Search does not require authentication.
    let client = AssemblyApiClient::new(Config::new(server.url())).unwrap();
    let result = client.search_contigs(&options, None).unwrap();

    assert_eq!(result.num_found, Some(CONTIG_IDS.len() as i64));
    assert_eq!(result.start, Some(0));
    let contigs = result.contigs.unwrap();
    assert_eq!(contigs.len(), CONTIG_IDS.len());
    assert_eq!(contigs[0].contig_id.as_deref(), Some(CONTIG_IDS[0]));
    mock.assert();
}

#[test]
fn test_get_dna_sequence() {
    let mut server = Server::new();
    let mut auth = Server::new();
    let mock = mock_rpc_result(
        &mut server,
        GET_DNA_SEQUENCE,
        Some(json!([{"ref": ASSEMBLY_REF, "locations": [[CONTIG_IDS[0], 1, "+", 4]]}])),
        json!(["ACGT"]),
    );

    let client = authenticated_client(&server, &mut auth);
    let params = GetDnaSequenceParams::new(ASSEMBLY_REF)
        .with_location(ContigLocation::new(CONTIG_IDS[0], 1, "+", 4));

    assert_eq!(
        client.get_dna_sequence(&params, None).unwrap(),
        vec!["ACGT".to_string()]
    );
    mock.assert();
}

#[test]
fn test_status_returns_server_map() {
    let mut server = Server::new();
    let mock = mock_rpc_result(
        &mut server,
        STATUS,
        Some(json!([])),
        json!({"anything": [1, 2], "nested": {"ok": true}}),
    );

    let client = AssemblyApiClient::new(Config::new(server.url())).unwrap();
    let status = client.status(None).unwrap();

    assert_eq!(status.len(), 2);
    assert_eq!(status["anything"], json!([1, 2]));
    assert_eq!(status["nested"]["ok"], json!(true));
    mock.assert();
}

#[test]
fn test_method_not_found_is_protocol_error() {
    let mut server = Server::new();
    let mut auth = Server::new();
    let mock = mock_method_not_found(&mut server);

    let client = authenticated_client(&server, &mut auth);

    for result in [
        client.get_stats(ASSEMBLY_REF, None).map(|_| ()),
        client.status(None).map(|_| ()),
    ] {
        match result {
            Err(AssemblyApiError::ProtocolError { message, code, .. }) => {
                assert_eq!(message, "Method not found");
                assert_eq!(code, Some(METHOD_NOT_FOUND_CODE));
            }
            other => panic!("Expected ProtocolError, got {:?}", other),
        }
    }
    assert!(mock.matched());
}

#[test]
fn test_server_error_carries_stack_trace() {
    let mut server = Server::new();
    let mut auth = Server::new();
    let mock = mock_rpc_error(&mut server, GET_DNA_SIZE, -32000, "Object 6/1/1 not found");

    let client = authenticated_client(&server, &mut auth);
    let err = client.get_dna_size(ASSEMBLY_REF, None).unwrap_err();

    match err {
        AssemblyApiError::ProtocolError {
            message, name, data, ..
        } => {
            assert_eq!(message, "Object 6/1/1 not found");
            assert_eq!(name.as_deref(), Some("JSONRPCError"));
            assert!(data.unwrap().starts_with("Traceback"));
        }
        other => panic!("Expected ProtocolError, got {:?}", other),
    }
    mock.assert();
}

#[test]
fn test_auth_required_without_credentials() {
    let mut server = Server::new();
    let mock = server.mock("POST", "/").expect(0).create();

    let client = AssemblyApiClient::new(Config::new(server.url())).unwrap();
    let result = client.get_contig_ids(ASSEMBLY_REF, None);

    assert!(matches!(
        result,
        Err(AssemblyApiError::AuthenticationError(_))
    ));
    mock.assert();
}

#[test]
fn test_login_with_password() {
    let mut server = Server::new();
    let mut auth = Server::new();
    let login = mock_login(&mut auth);
    let mock = server
        .mock("POST", "/")
        .match_header("authorization", TEST_TOKEN)
        .with_status(200)
        .with_body(json!({"result": [DNA_SIZE]}).to_string())
        .create();

    let config = Config::new(server.url())
        .with_user_password(TEST_USER, TEST_PASSWORD)
        .with_auth_service_url(auth.url())
        .with_insecure_http_allowed(true);
    let client = AssemblyApiClient::new(config).unwrap();

    assert_eq!(client.token(), Some(TEST_TOKEN));
    assert_eq!(client.get_dna_size(ASSEMBLY_REF, None).unwrap(), DNA_SIZE);
    login.assert();
    mock.assert();
}

#[test]
fn test_rejected_credentials() {
    let mut auth = Server::new();
    let reject = mock_auth_rejected(&mut auth);

    let config = Config::new("https://example.org/services/assembly")
        .with_user_password(TEST_USER, "wrong")
        .with_auth_service_url(auth.url());

    match AssemblyApiClient::new(config) {
        Err(AssemblyApiError::AuthenticationError(message)) => {
            assert!(message.contains("LoginFailure"));
        }
        Err(other) => panic!("Expected AuthenticationError, got {:?}", other),
        Ok(_) => panic!("Expected AuthenticationError, got a client"),
    }
    reject.assert();
}

#[test]
fn test_unreachable_identity_provider_is_transport_error() {
    let config = Config::new("https://example.org/services/assembly")
        .with_token(TEST_TOKEN)
        .with_auth_service_url("http://127.0.0.1:9/login");

    assert!(matches!(
        AssemblyApiClient::new(config),
        Err(AssemblyApiError::TransportError(_))
    ));
}

#[test]
fn test_context_is_forwarded() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/")
        .match_body(Matcher::PartialJson(json!({
            "method": STATUS,
            "context": {
                "service_ver": "dev",
                "provenance": [{"service": "AssemblyAPI"}]
            }
        })))
        .with_status(200)
        .with_body(json!({"result": [{"state": "OK"}]}).to_string())
        .create();

    let client =
        AssemblyApiClient::new(Config::new(server.url()).with_service_version("dev")).unwrap();
    let ctx = RpcContext::new().with_provenance(json!({"service": "AssemblyAPI"}));

    assert_eq!(client.status(Some(&ctx)).unwrap()["state"], "OK");
    mock.assert();
}

#[test]
fn test_read_timeout_is_transport_error() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/")
        .with_status(200)
        .with_chunked_body(|w| {
            std::thread::sleep(Duration::from_millis(1500));
            w.write_all(b"{\"result\": [{}]}")
        })
        .create();

    let client =
        AssemblyApiClient::new(Config::new(server.url()).with_read_timeout_ms(200)).unwrap();

    assert!(matches!(
        client.status(None),
        Err(AssemblyApiError::TransportError(_))
    ));
    drop(mock);
}
