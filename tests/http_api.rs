use actix_web::{web, App, HttpResponse, HttpServer};
use rgenai_studio::{
    GenerationPageController, GenerationRequest, HttpWorkflowApi, ListOutcome, MemoryView,
    SelectOutcome, StudioConfig, StudioError, SubmitOutcome, WorkflowApi, WorkflowDefinition,
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Clone, Default)]
struct Recorded {
    workflow_ids: Arc<Mutex<Vec<String>>>,
    bodies: Arc<Mutex<Vec<Value>>>,
}

fn spawn_server<F>(configure: F) -> String
where
    F: Fn(&mut web::ServiceConfig) + Send + Clone + 'static,
{
    let server = HttpServer::new(move || App::new().configure(configure.clone()))
        .workers(1)
        .bind(("127.0.0.1", 0))
        .expect("bind mock workflow server");
    let port = server.addrs()[0].port();
    actix_web::rt::spawn(server.run());
    format!("http://127.0.0.1:{}", port)
}

fn client(base_url: &str) -> HttpWorkflowApi {
    let config = StudioConfig::new()
        .with_base_url(base_url)
        .with_timeout(Duration::from_secs(5));
    HttpWorkflowApi::new(&config).unwrap()
}

async fn list_workflows() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "workflows": [
            {"id": "sdxl", "name": "SDXL Base"},
            {"id": "flux", "name": "Flux Dev"}
        ]
    }))
}

async fn workflow_detail(id: web::Path<String>, recorded: web::Data<Recorded>) -> HttpResponse {
    let id = id.into_inner();
    recorded.workflow_ids.lock().unwrap().push(id.clone());
    if id == "missing" {
        return HttpResponse::NotFound().json(json!({"error": "Workflow not found"}));
    }
    if id == "disabled" {
        return HttpResponse::Ok().json(json!({"workflow": false}));
    }
    HttpResponse::Ok().json(json!({
        "workflow": {
            "4": {"class_type": "CheckpointLoaderSimple", "inputs": {"ckpt_name": id}}
        }
    }))
}

async fn generate(body: web::Json<Value>, recorded: web::Data<Recorded>) -> HttpResponse {
    recorded.bodies.lock().unwrap().push(body.into_inner());
    HttpResponse::Ok().json(json!({
        "success": true,
        "image_paths": ["/generated/ComfyUI_00001_.png"]
    }))
}

async fn generated_image() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("image/png")
        .body(vec![0x89, b'P', b'N', b'G'])
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({"status": "healthy"}))
}

fn studio_routes(recorded: Recorded) -> impl Fn(&mut web::ServiceConfig) + Send + Clone + 'static {
    move |cfg: &mut web::ServiceConfig| {
        cfg.app_data(web::Data::new(recorded.clone()))
            .route("/api/health", web::get().to(health))
            .route("/api/workflows", web::get().to(list_workflows))
            .route("/api/workflows/{id}", web::get().to(workflow_detail))
            .route("/api/image-generation", web::post().to(generate))
            .route(
                "/generated/ComfyUI_00001_.png",
                web::get().to(generated_image),
            );
    }
}

#[actix_web::test]
async fn lists_workflows_in_server_order() {
    let base = spawn_server(studio_routes(Recorded::default()));

    let workflows = client(&base).list_workflows().await.unwrap();

    let ids: Vec<&str> = workflows.iter().map(|w| w.id.as_str()).collect();
    assert_eq!(ids, vec!["sdxl", "flux"]);
    assert_eq!(workflows[1].name, "Flux Dev");
}

#[actix_web::test]
async fn fetches_workflow_detail_by_id() {
    let recorded = Recorded::default();
    let base = spawn_server(studio_routes(recorded.clone()));

    let definition = client(&base).get_workflow("sdxl base").await.unwrap();

    assert_eq!(
        definition.as_value()["4"]["inputs"]["ckpt_name"],
        json!("sdxl base")
    );
    assert_eq!(
        *recorded.workflow_ids.lock().unwrap(),
        vec!["sdxl base".to_string()]
    );
}

#[actix_web::test]
async fn detail_without_workflow_is_an_error() {
    let base = spawn_server(studio_routes(Recorded::default()));

    let err = client(&base).get_workflow("missing").await.unwrap_err();

    assert!(matches!(err, StudioError::ResponseError(_)));
}

#[actix_web::test]
async fn falsy_workflow_is_treated_as_missing() {
    let base = spawn_server(studio_routes(Recorded::default()));
    let view = Arc::new(MemoryView::new());
    let mut page = GenerationPageController::new(client(&base), view.clone());

    assert_eq!(page.select_workflow("disabled").await, SelectOutcome::Failed);

    let state = view.snapshot();
    assert!(!state.form_visible);
    assert_eq!(
        state.alerts,
        vec!["Error loading workflow details. Please try again.".to_string()]
    );
    assert!(page.workflow().is_none());
}

#[actix_web::test]
async fn null_lists_are_read_as_empty() {
    let base = spawn_server(|cfg: &mut web::ServiceConfig| {
        cfg.route(
            "/api/workflows",
            web::get().to(|| async { HttpResponse::Ok().json(json!({"workflows": null})) }),
        )
        .route(
            "/api/image-generation",
            web::post().to(|| async {
                HttpResponse::Ok().json(json!({
                    "success": false,
                    "error": "ComfyUI is offline",
                    "image_paths": null
                }))
            }),
        );
    });
    let api = client(&base);

    assert!(api.list_workflows().await.unwrap().is_empty());

    let result = api
        .generate(&GenerationRequest {
            workflow: WorkflowDefinition::new(json!({"1": {}})),
        })
        .await
        .unwrap();
    assert!(!result.success);
    assert!(result.image_paths.is_empty());
    assert_eq!(result.error.as_deref(), Some("ComfyUI is offline"));
}

#[actix_web::test]
async fn posts_workflow_as_request_body() {
    let recorded = Recorded::default();
    let base = spawn_server(studio_routes(recorded.clone()));
    let definition = json!({"3": {"class_type": "KSampler", "inputs": {"seed": 7}}});

    let result = client(&base)
        .generate(&GenerationRequest {
            workflow: WorkflowDefinition::new(definition.clone()),
        })
        .await
        .unwrap();

    assert!(result.success);
    assert_eq!(result.first_image(), Some("/generated/ComfyUI_00001_.png"));
    assert_eq!(
        *recorded.bodies.lock().unwrap(),
        vec![json!({ "workflow": definition })]
    );
}

#[actix_web::test]
async fn error_status_with_json_body_is_a_business_failure() {
    let base = spawn_server(|cfg: &mut web::ServiceConfig| {
        cfg.route(
            "/api/image-generation",
            web::post().to(|| async {
                HttpResponse::InternalServerError()
                    .json(json!({"success": false, "error": "ComfyUI is offline"}))
            }),
        );
    });

    let result = client(&base)
        .generate(&GenerationRequest {
            workflow: WorkflowDefinition::new(json!({"1": {}})),
        })
        .await
        .unwrap();

    assert!(!result.success);
    assert_eq!(result.error.as_deref(), Some("ComfyUI is offline"));
}

#[actix_web::test]
async fn non_json_bodies_are_transport_errors() {
    let base = spawn_server(|cfg: &mut web::ServiceConfig| {
        cfg.route(
            "/api/workflows",
            web::get().to(|| async { HttpResponse::Ok().body("<html>maintenance</html>") }),
        )
        .route(
            "/api/image-generation",
            web::post().to(|| async { HttpResponse::BadGateway().body("Bad Gateway") }),
        );
    });
    let api = client(&base);

    let listing = api.list_workflows().await.unwrap_err();
    assert!(matches!(listing, StudioError::SerializationError(_)));

    let generation = api
        .generate(&GenerationRequest {
            workflow: WorkflowDefinition::new(json!({"1": {}})),
        })
        .await
        .unwrap_err();
    assert!(matches!(generation, StudioError::ResponseError(_)));
}

#[actix_web::test]
async fn health_and_image_download() {
    let base = spawn_server(studio_routes(Recorded::default()));
    let api = client(&base);

    assert!(api.health_check().await.unwrap());
    assert_eq!(
        api.fetch_image("/generated/ComfyUI_00001_.png").await.unwrap(),
        vec![0x89, b'P', b'N', b'G']
    );
    assert!(api.fetch_image("/generated/nope.png").await.is_err());
}

#[actix_web::test]
async fn page_flow_against_server() {
    let recorded = Recorded::default();
    let base = spawn_server(studio_routes(recorded.clone()));
    let view = Arc::new(MemoryView::new());
    let mut page = GenerationPageController::new(client(&base), view.clone());

    assert_eq!(page.load_workflows().await, ListOutcome::Loaded(2));
    assert_eq!(page.select_workflow("flux").await, SelectOutcome::Loaded);
    assert_eq!(
        page.submit().await,
        SubmitOutcome::Generated {
            image_path: "/generated/ComfyUI_00001_.png".to_string()
        }
    );
    assert!(page.download());

    let state = view.snapshot();
    assert_eq!(state.options.len(), 3);
    assert!(state.result_visible);
    assert!(state.submit_enabled);
    assert_eq!(
        state.downloads,
        vec![(
            "/generated/ComfyUI_00001_.png".to_string(),
            "ComfyUI_00001_.png".to_string()
        )]
    );
    assert_eq!(
        recorded.bodies.lock().unwrap()[0]["workflow"]["4"]["inputs"]["ckpt_name"],
        json!("flux")
    );
}

#[actix_web::test]
async fn unreachable_server_degrades_selector() {
    // bind and release a port so nothing is listening on it
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let view = Arc::new(MemoryView::new());
    let mut page =
        GenerationPageController::new(client(&format!("http://127.0.0.1:{}", port)), view.clone());

    assert_eq!(page.load_workflows().await, ListOutcome::Failed);
    assert_eq!(view.snapshot().options.len(), 1);
    assert_eq!(view.snapshot().options[0].label, "Error loading workflows");
}
