use docgen_core::{
    assemble_document, parse_openapi_document, parse_roster, AppError, AssemblyOptions,
    DocumentModel, InventoryKey, MutationKind, ParamSource, ResolutionNote,
};
use pretty_assertions::assert_eq;
use serde_json::json;

const ARCADE: &str = include_str!("fixtures/arcade.yaml");

fn arcade_model(roster: Option<&str>) -> DocumentModel {
    let doc = parse_openapi_document(ARCADE).unwrap();
    let roster = roster.map(|text| parse_roster(text).unwrap());
    assemble_document(&doc, roster.as_ref(), &AssemblyOptions::default())
}

fn key(spec: &str) -> InventoryKey {
    spec.parse().unwrap()
}

#[test]
fn test_metadata() {
    let model = arcade_model(None);
    assert_eq!(model.info.title, "Arcade API");
    assert_eq!(model.info.version, "2.1.0");
    assert_eq!(model.base_url, "https://arcade.example.com/v2");
    assert_eq!(model.security_schemes.len(), 1);
    assert_eq!(model.security_schemes[0].scheme.as_deref(), Some("bearer"));
}

#[test]
fn test_endpoint_order_and_sections() {
    let model = arcade_model(None);

    let keys: Vec<String> = model.endpoints.iter().map(|e| e.key().to_string()).collect();
    assert_eq!(
        keys,
        vec![
            "GET /games",
            "GET /games/{gameId}/scores",
            "GET /health",
            "POST /games",
        ]
    );

    let tags: Vec<&str> = model.tags.iter().map(|s| s.tag.as_str()).collect();
    assert_eq!(tags, vec!["default", "games", "public"]);
    assert_eq!(
        model.section("games").unwrap().endpoints,
        vec![key("GET /games"), key("POST /games")]
    );
    assert_eq!(
        model.section("public").unwrap().endpoints,
        vec![key("POST /games"), key("GET /games/{gameId}/scores")]
    );
    assert_eq!(model.section("default").unwrap().endpoints, vec![key("GET /health")]);
}

#[test]
fn test_security_flags() {
    let model = arcade_model(None);
    assert!(!model.endpoint(&key("GET /health")).unwrap().requires_auth);
    assert!(model.endpoint(&key("GET /games")).unwrap().requires_auth);
}

#[test]
fn test_parameters() {
    let model = arcade_model(None);

    let list = model.endpoint(&key("GET /games")).unwrap();
    assert_eq!(list.parameters.len(), 1);
    assert_eq!(list.parameters[0].name, "limit");
    assert_eq!(list.parameters[0].location, ParamSource::Query);
    assert!(!list.parameters[0].required);
    assert_eq!(list.parameters[0].example, json!(20));

    let scores = model.endpoint(&key("GET /games/{gameId}/scores")).unwrap();
    assert_eq!(scores.parameters[0].name, "gameId");
    assert!(scores.parameters[0].required);
    assert_eq!(
        scores.parameters[0].example,
        json!("123e4567-e89b-12d3-a456-426614174000")
    );
}

#[test]
fn test_request_payload_and_invalid_variants() {
    let model = arcade_model(None);
    let create = model.endpoint(&key("POST /games")).unwrap();
    let request = create.request.as_ref().unwrap();

    assert_eq!(request.media_type, "application/json");
    assert!(request.required);
    assert_eq!(request.example, json!({"title": "title_sample", "mode": "solo"}));

    let kinds: Vec<MutationKind> = request.invalid_examples.iter().map(|v| v.kind).collect();
    assert_eq!(
        kinds,
        vec![
            MutationKind::MissingRequired,
            MutationKind::TypeCorruption,
            MutationKind::UnexpectedField,
        ]
    );
    assert_eq!(request.invalid_examples[0].value, json!({"mode": "solo"}));
    assert_eq!(
        request.invalid_examples[1].value,
        json!({"title": {"unexpected": "object"}, "mode": "solo"})
    );
    assert_eq!(
        request.invalid_examples[2].value,
        json!({"title": "title_sample", "mode": "solo", "unexpected_field": "unexpected"})
    );
}

#[test]
fn test_responses() {
    let model = arcade_model(None);
    let create = model.endpoint(&key("POST /games")).unwrap();

    let statuses: Vec<&str> = create.responses.iter().map(|r| r.status.as_str()).collect();
    assert_eq!(statuses, vec!["201", "400"]);

    assert_eq!(
        create.responses[0].example,
        Some(json!({
            "title": "title_sample",
            "mode": "solo",
            "id": "123e4567-e89b-12d3-a456-426614174000",
            "createdAt": "2025-01-01T00:00:00Z"
        }))
    );

    let bad_request = &create.responses[1];
    assert_eq!(bad_request.description, "invalid input");
    assert_eq!(bad_request.media_type.as_deref(), Some("application/problem+json"));
    assert_eq!(
        bad_request.example,
        Some(json!({"detail": "detail_sample", "owner": {}}))
    );

    let health = model.endpoint(&key("GET /health")).unwrap();
    assert_eq!(health.responses[0].example, None);

    let list = model.endpoint(&key("GET /games")).unwrap();
    let games = list.responses[0].example.as_ref().unwrap();
    assert_eq!(games.as_array().map(Vec::len), Some(2));
}

#[test]
fn test_cycle_terminates_end_to_end() {
    let model = arcade_model(None);
    let scores = model.endpoint(&key("GET /games/{gameId}/scores")).unwrap();
    let entry = json!({"player": "player_sample", "points": 123, "board": {}});
    assert_eq!(
        scores.responses[0].example,
        Some(json!({"entries": [entry.clone(), entry]}))
    );
}

#[test]
fn test_resolution_notes() {
    let model = arcade_model(None);
    assert_eq!(
        model.notes,
        vec![
            ResolutionNote::UnresolvedReference {
                reference: "#/components/schemas/Missing".to_string()
            },
            ResolutionNote::CycleGuard {
                reference: "#/components/schemas/ScoreBoard".to_string()
            },
            ResolutionNote::CycleGuard {
                reference: "#/components/schemas/ScoreEntry".to_string()
            },
        ]
    );
}

#[test]
fn test_inventory_against_roster() {
    let roster = "\
method,path,operationId,tags,summary
GET,/health,,,Liveness probe
get,/games,listGames,games,
POST,/games,createGame,games|public,
DELETE,/games/{gameId},,,
";
    let model = arcade_model(Some(roster));
    assert_eq!(model.inventory.only_in_a, vec![key("GET /games/{gameId}/scores")]);
    assert_eq!(model.inventory.only_in_b, vec![key("DELETE /games/{gameId}")]);

    let unchecked = arcade_model(None);
    assert_eq!(unchecked.inventory.only_in_a.len(), 4);
    assert!(unchecked.inventory.only_in_b.is_empty());
}

#[test]
fn test_serialized_model_shape() {
    let model = arcade_model(None);
    let value = serde_json::to_value(&model).unwrap();

    assert_eq!(value["baseUrl"], "https://arcade.example.com/v2");
    assert_eq!(value["endpoints"][3]["method"], "POST");
    assert_eq!(
        value["endpoints"][3]["request"]["invalidExamples"][0]["kind"],
        "missingRequired"
    );

    let names: Vec<&str> = value["schemas"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|s| s["name"].as_str())
        .collect();
    assert_eq!(names, vec!["NewGame", "Game", "ScoreBoard", "ScoreEntry", "Problem"]);
    assert_eq!(
        value["schemas"][4]["schema"]["properties"]["owner"]["x-placeholder"],
        "unresolved"
    );
    assert_eq!(value["notes"][1]["kind"], "cycleGuard");
}

#[test]
fn test_assembly_is_deterministic() {
    let first = serde_json::to_string(&arcade_model(None)).unwrap();
    let second = serde_json::to_string(&arcade_model(None)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_malformed_document_is_fatal() {
    let err = parse_openapi_document("openapi: 3.0.0\npaths: not-a-map\n").unwrap_err();
    assert!(matches!(err, AppError::MalformedDocument(_)));
}
