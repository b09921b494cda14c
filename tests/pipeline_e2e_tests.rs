//! End-to-end pipeline tests over the production file/rocksdb adapters.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use formsmith::config::BaseConfig;
use formsmith::intake::IntakeService;
use serde_json::json;
use tempfile::TempDir;

const TEMPLATE: &str =
    "CONTRATO\nEmpresa: {razaoSocial} ({cnpj})\nCEP: {cep}\nSocio: {nomeSocio}, CPF {cpf}\n";

fn test_config(dir: &TempDir) -> Result<BaseConfig> {
    let root = dir.path();
    std::fs::create_dir_all(root.join("templates"))?;
    std::fs::write(root.join("templates/contract.txt"), TEMPLATE)?;

    Ok(BaseConfig {
        bind_addr: "127.0.0.1:0".to_string(),
        dedup_path: root.join("dedup").to_string_lossy().into_owned(),
        records_path: root.join("records.csv").to_string_lossy().into_owned(),
        template_path: root
            .join("templates/contract.txt")
            .to_string_lossy()
            .into_owned(),
        work_dir: root.join("work").to_string_lossy().into_owned(),
        output_dir: root.join("output").to_string_lossy().into_owned(),
        artifact_upload_url: None,
        artifact_auth_token: String::new(),
        dedup_window_secs: 3600,
        lock_wait_secs: 30,
    })
}

fn body() -> Vec<u8> {
    serde_json::to_vec(&json!({
        "data": {
            "cnpj": "12345678000199",
            "razaoSocial": "Acme",
            "emailEmpresa": "a@a.com",
            "cep": "01310100",
            "cpf": "12345678901",
            "nomeSocio": "Maria"
        }
    }))
    .unwrap()
}

#[tokio::test]
async fn accepted_submission_produces_row_and_artifacts_on_disk() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let config = test_config(&dir)?;
    let service = IntakeService::initialize(&config)?;

    assert_eq!(service.handle(&body()).await, "Sucesso");

    // One record row of 29 values; quoted fields count as one.
    let records = std::fs::read_to_string(&config.records_path)?;
    let lines: Vec<&str> = records.lines().collect();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("Acme,12.345.678/0001-99,"));

    // Both artifacts in the output directory (path separators in the CNPJ
    // are mapped to dashes for file names).
    let docx = dir.path().join("output/Acme - 12.345.678-0001-99.docx");
    let xlsx = dir.path().join("output/Acme - 12.345.678-0001-99.xlsx");
    let doc_body = std::fs::read_to_string(&docx)?;
    assert_eq!(
        doc_body,
        "CONTRATO\nEmpresa: Acme (12.345.678/0001-99)\nCEP: 01.310-100\nSocio: Maria, CPF 123.456.789-01\n"
    );
    let sheet_body = std::fs::read_to_string(&xlsx)?;
    assert!(sheet_body.starts_with("CAMPO,VALOR\n"));
    assert!(sheet_body.contains("cnpj,12.345.678/0001-99\n"));
    assert!(sheet_body.contains("nomeSocio,Maria\n"));

    // No leftover working copies.
    let work_entries: Vec<_> = std::fs::read_dir(dir.path().join("work"))?.collect();
    assert!(work_entries.is_empty(), "work dir not cleaned up");
    Ok(())
}

#[tokio::test]
async fn duplicate_submission_is_ignored() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let config = test_config(&dir)?;
    let service = IntakeService::initialize(&config)?;

    assert_eq!(service.handle(&body()).await, "Sucesso");
    assert_eq!(
        service.handle(&body()).await,
        "Duplicado (Cache 1h) - Ignorado"
    );

    let records = std::fs::read_to_string(&config.records_path)?;
    assert_eq!(records.lines().count(), 1);
    Ok(())
}

#[tokio::test]
async fn dedup_survives_a_service_restart() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let config = test_config(&dir)?;

    {
        let service = IntakeService::initialize(&config)?;
        assert_eq!(service.handle(&body()).await, "Sucesso");
    }

    // New process, same stores: the redelivery is still suppressed.
    let restarted = IntakeService::initialize(&config)?;
    assert_eq!(
        restarted.handle(&body()).await,
        "Duplicado (Cache 1h) - Ignorado"
    );
    Ok(())
}

#[tokio::test]
async fn missing_company_name_falls_back_to_cliente() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let config = test_config(&dir)?;
    let service = IntakeService::initialize(&config)?;

    let anonymous = serde_json::to_vec(&json!({
        "data": {"cnpj": "111", "emailEmpresa": "x@x.com"}
    }))?;
    assert_eq!(service.handle(&anonymous).await, "Sucesso");

    assert!(dir.path().join("output/Cliente - 111.docx").exists());
    assert!(dir.path().join("output/Cliente - 111.xlsx").exists());
    Ok(())
}

#[tokio::test]
async fn missing_template_is_a_pipeline_error() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let mut config = test_config(&dir)?;
    config.template_path = dir
        .path()
        .join("templates/gone.txt")
        .to_string_lossy()
        .into_owned();
    let service = IntakeService::initialize(&config)?;

    let reply = service.handle(&body()).await;
    assert!(reply.starts_with("Erro: "), "unexpected reply: {reply}");

    // The row was already appended when template duplication failed: an
    // orphaned row with no artifacts, per the no-rollback semantics.
    let records = std::fs::read_to_string(&config.records_path)?;
    assert_eq!(records.lines().count(), 1);
    assert!(!dir.path().join("output").exists());
    Ok(())
}

#[tokio::test]
async fn contended_lock_answers_busy() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let config = test_config(&dir)?;
    let inner = IntakeService::initialize(&config)?;
    let service = Arc::new(IntakeService {
        pipeline: inner.pipeline.clone(),
        lock_wait: Duration::from_millis(50),
    });

    let guard = service.pipeline.clone();
    let guard = guard.lock().await;
    assert_eq!(service.handle(&body()).await, "Busy");
    drop(guard);

    assert_eq!(service.handle(&body()).await, "Sucesso");
    Ok(())
}

#[tokio::test]
async fn upload_url_posts_artifacts_with_bearer_token() -> Result<()> {
    use hyper::service::{make_service_fn, service_fn};
    use hyper::{Body, Request, Response, Server};
    use std::sync::Mutex;

    let seen: Arc<Mutex<Vec<(String, String)>>> = Arc::new(Mutex::new(Vec::new()));
    let captured = seen.clone();
    let make_svc = make_service_fn(move |_| {
        let captured = captured.clone();
        async move {
            Ok::<_, hyper::Error>(service_fn(move |req: Request<Body>| {
                let captured = captured.clone();
                async move {
                    let path = req.uri().path().to_string();
                    let auth = req
                        .headers()
                        .get("authorization")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or_default()
                        .to_string();
                    captured.lock().unwrap().push((path, auth));
                    Ok::<_, hyper::Error>(Response::new(Body::empty()))
                }
            }))
        }
    });
    let server = Server::bind(&([127, 0, 0, 1], 0).into()).serve(make_svc);
    let addr = server.local_addr();
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
    tokio::spawn(server.with_graceful_shutdown(async {
        shutdown_rx.await.ok();
    }));

    let dir = TempDir::new()?;
    let mut config = test_config(&dir)?;
    config.artifact_upload_url = Some(format!("http://{addr}/artifacts"));
    config.artifact_auth_token = "s3cret".to_string();
    let service = IntakeService::initialize(&config)?;

    assert_eq!(service.handle(&body()).await, "Sucesso");

    let uploads = seen.lock().unwrap().clone();
    assert_eq!(uploads.len(), 2);
    assert_eq!(
        uploads[0].0,
        "/artifacts/Acme%20-%2012.345.678%2F0001-99.docx"
    );
    assert_eq!(
        uploads[1].0,
        "/artifacts/Acme%20-%2012.345.678%2F0001-99.xlsx"
    );
    assert!(uploads.iter().all(|(_, auth)| auth == "Bearer s3cret"));
    // Nothing lands on disk when uploading remotely.
    assert!(!dir.path().join("output").exists());

    shutdown_tx.send(()).ok();
    Ok(())
}
