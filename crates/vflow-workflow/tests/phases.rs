//! Phase tests against a mock remote service.

use std::time::Duration;

use uuid::Uuid;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use vflow_client::{ServiceCredentials, TrainingClient};
use vflow_dataset::Dataset;
use vflow_models::Tag;
use vflow_workflow::export::export_and_download;
use vflow_workflow::project::resolve_project;
use vflow_workflow::tags::{sync_tags, TagSync};
use vflow_workflow::training::{latest_iteration, publish_iteration, run_training};
use vflow_workflow::upload::upload_dataset;
use vflow_workflow::WorkflowError;

const POLL: Duration = Duration::from_millis(10);

fn client_for(server: &MockServer) -> TrainingClient {
    let credentials = ServiceCredentials::new(server.uri(), "test-key", "resource-1").unwrap();
    TrainingClient::new(credentials)
}

fn tag_json(id: Uuid, name: &str, image_count: u32) -> serde_json::Value {
    serde_json::json!({"id": id, "name": name, "imageCount": image_count})
}

fn iteration_json(id: Uuid, name: &str, status: &str, modified: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": name,
        "status": status,
        "lastModified": modified
    })
}

async fn mount_tags(server: &MockServer, project_id: Uuid, tags: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!(
            "/customvision/v3.4/training/projects/{}/tags",
            project_id
        )))
        .respond_with(ResponseTemplate::new(200).set_body_json(tags))
        .mount(server)
        .await;
}

#[tokio::test]
async fn resolve_project_matches_exact_name() {
    let server = MockServer::start().await;
    let project_id = Uuid::new_v4();
    let domain_id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path("/customvision/v3.4/training/projects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {
                "id": Uuid::new_v4(),
                "name": "Fruit Detector 2",
                "settings": {"domainId": domain_id}
            },
            {
                "id": project_id,
                "name": "Fruit Detector",
                "settings": {"domainId": domain_id}
            }
        ])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!(
            "/customvision/v3.4/training/domains/{}",
            domain_id
        )))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": domain_id,
            "name": "General",
            "type": "ObjectDetection"
        })))
        .mount(&server)
        .await;

    let project = resolve_project(&client_for(&server), "Fruit Detector")
        .await
        .unwrap();
    assert_eq!(project.id, project_id);
}

#[tokio::test]
async fn resolve_project_missing_is_fatal() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/customvision/v3.4/training/projects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let err = resolve_project(&client_for(&server), "Fruit Detector")
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::ProjectNotFound(name) if name == "Fruit Detector"));
}

#[tokio::test]
async fn sync_creates_only_missing_tags() {
    let server = MockServer::start().await;
    let project_id = Uuid::new_v4();
    let apple_id = Uuid::new_v4();

    mount_tags(
        &server,
        project_id,
        serde_json::json!([tag_json(apple_id, "apple", 12)]),
    )
    .await;

    Mock::given(method("POST"))
        .and(path(format!(
            "/customvision/v3.4/training/projects/{}/tags",
            project_id
        )))
        .and(query_param("name", "banana"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(tag_json(Uuid::new_v4(), "banana", 0)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let labels = vec!["apple".to_string(), "banana".to_string()];
    let sync = sync_tags(&client_for(&server), project_id, &labels)
        .await
        .unwrap();

    assert_eq!(sync.created, 1);
    assert_eq!(sync.existing_images, 12);
    // Tags come back in label order.
    assert_eq!(sync.tags[0].name, "apple");
    assert_eq!(sync.tags[0].id, apple_id);
    assert_eq!(sync.tags[1].name, "banana");
}

#[tokio::test]
async fn sync_against_fixed_remote_set_creates_nothing() {
    let server = MockServer::start().await;
    let project_id = Uuid::new_v4();

    mount_tags(
        &server,
        project_id,
        serde_json::json!([
            tag_json(Uuid::new_v4(), "apple", 3),
            tag_json(Uuid::new_v4(), "banana", 4)
        ]),
    )
    .await;

    // No POST mock mounted: any creation attempt would 404 and fail the sync.
    let labels = vec!["apple".to_string(), "banana".to_string()];
    let client = client_for(&server);

    for _ in 0..2 {
        let sync = sync_tags(&client, project_id, &labels).await.unwrap();
        assert_eq!(sync.created, 0);
        assert_eq!(sync.existing_images, 7);
    }
}

#[tokio::test]
async fn rejected_batch_aborts_remaining_uploads() {
    let server = MockServer::start().await;
    let project_id = Uuid::new_v4();
    let tag_id = Uuid::new_v4();

    // 130 images -> 3 batches of 64/64/2.
    let dir = tempfile::tempdir().unwrap();
    let folder = dir.path().join("apple");
    let labels_dir = folder.join("normalizedLabel");
    std::fs::create_dir_all(&labels_dir).unwrap();
    std::fs::write(dir.path().join("tags.txt"), "apple\n").unwrap();
    for i in 0..130 {
        std::fs::write(folder.join(format!("img_{:03}.jpg", i)), [0u8]).unwrap();
        std::fs::write(
            labels_dir.join(format!("img_{:03}.txt", i)),
            "0.1 0.2 0.3 0.4\n",
        )
        .unwrap();
    }

    let upload_path = format!(
        "/customvision/v3.4/training/projects/{}/images/files",
        project_id
    );
    Mock::given(method("POST"))
        .and(path(upload_path.clone()))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "isBatchSuccessful": true,
            "images": []
        })))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(upload_path))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "isBatchSuccessful": false,
            "images": []
        })))
        .expect(1) // the third batch must never be sent
        .mount(&server)
        .await;

    let sync = TagSync {
        tags: vec![Tag {
            id: tag_id,
            name: "apple".to_string(),
            description: None,
            image_count: 0,
        }],
        created: 1,
        existing_images: 0,
    };

    let err = upload_dataset(
        &client_for(&server),
        project_id,
        &Dataset::new(dir.path()),
        &sync,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, WorkflowError::BatchRejected { batch: 1 }));
}

#[tokio::test]
async fn training_polls_until_status_leaves_training() {
    let server = MockServer::start().await;
    let project_id = Uuid::new_v4();
    let iteration_id = Uuid::new_v4();
    let modified = "2024-11-05T12:30:00Z";

    Mock::given(method("POST"))
        .and(path(format!(
            "/customvision/v3.4/training/projects/{}/train",
            project_id
        )))
        .respond_with(ResponseTemplate::new(200).set_body_json(iteration_json(
            iteration_id,
            "Iteration 1",
            "Training",
            modified,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let iteration_path = format!(
        "/customvision/v3.4/training/projects/{}/iterations/{}",
        project_id, iteration_id
    );
    Mock::given(method("GET"))
        .and(path(iteration_path.clone()))
        .respond_with(ResponseTemplate::new(200).set_body_json(iteration_json(
            iteration_id,
            "Iteration 1",
            "Training",
            modified,
        )))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(iteration_path))
        .respond_with(ResponseTemplate::new(200).set_body_json(iteration_json(
            iteration_id,
            "Iteration 1",
            "Completed",
            modified,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let iteration = run_training(&client_for(&server), project_id, POLL)
        .await
        .unwrap();
    assert!(iteration.status.is_completed());
}

#[tokio::test]
async fn publish_failure_is_recovered() {
    let server = MockServer::start().await;
    let project_id = Uuid::new_v4();
    let iteration_id = Uuid::new_v4();

    Mock::given(method("POST"))
        .and(path(format!(
            "/customvision/v3.4/training/projects/{}/iterations/{}/publish",
            project_id, iteration_id
        )))
        .respond_with(
            ResponseTemplate::new(400).set_body_string("Nothing changed since last iteration"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let iteration: vflow_models::Iteration = serde_json::from_value(iteration_json(
        iteration_id,
        "Iteration 1",
        "Completed",
        "2024-11-05T12:30:00Z",
    ))
    .unwrap();

    // Must not panic or return an error; the failure is logged.
    publish_iteration(
        &client_for(&server),
        project_id,
        &iteration,
        "FruitDetectorModel",
    )
    .await;
}

#[tokio::test]
async fn latest_iteration_picks_most_recently_modified() {
    let server = MockServer::start().await;
    let project_id = Uuid::new_v4();
    let newest = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path(format!(
            "/customvision/v3.4/training/projects/{}/iterations",
            project_id
        )))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            iteration_json(Uuid::new_v4(), "Iteration 1", "Completed", "2024-10-01T00:00:00Z"),
            iteration_json(newest, "Iteration 3", "Completed", "2024-11-05T12:30:00Z"),
            iteration_json(Uuid::new_v4(), "Iteration 2", "Failed", "2024-10-20T00:00:00Z"),
        ])))
        .mount(&server)
        .await;

    let iteration = latest_iteration(&client_for(&server), project_id)
        .await
        .unwrap();
    assert_eq!(iteration.id, newest);
}

#[tokio::test]
async fn latest_iteration_empty_list_is_fatal() {
    let server = MockServer::start().await;
    let project_id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path(format!(
            "/customvision/v3.4/training/projects/{}/iterations",
            project_id
        )))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let err = latest_iteration(&client_for(&server), project_id)
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::NoIterations));
}

#[tokio::test]
async fn export_polls_then_downloads_on_done() {
    let server = MockServer::start().await;
    let project_id = Uuid::new_v4();
    let iteration_id = Uuid::new_v4();
    let exports_path = format!(
        "/customvision/v3.4/training/projects/{}/iterations/{}/export",
        project_id, iteration_id
    );
    let artifact_uri = format!("{}/artifacts/model.zip", server.uri());

    // First tick: nothing exported yet, a new export is requested.
    Mock::given(method("GET"))
        .and(path(exports_path.clone()))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(exports_path.clone()))
        .and(query_param("platform", "TensorFlow"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "platform": "TensorFlow",
            "status": "Exporting"
        })))
        .expect(1)
        .mount(&server)
        .await;
    // Second tick: still exporting.
    Mock::given(method("GET"))
        .and(path(exports_path.clone()))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"platform": "TensorFlow", "status": "Exporting"}
        ])))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    // Third tick: done, artifact available.
    Mock::given(method("GET"))
        .and(path(exports_path))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"platform": "TensorFlow", "status": "Done", "downloadUri": artifact_uri}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/artifacts/model.zip"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![1, 2, 3]))
        .expect(1)
        .mount(&server)
        .await;

    let out = tempfile::tempdir().unwrap();
    let dest = export_and_download(
        &client_for(&server),
        project_id,
        iteration_id,
        &vflow_models::ExportPlatform::tensorflow(),
        "FruitDetectorModel",
        out.path(),
        POLL,
    )
    .await
    .unwrap();

    assert_eq!(
        dest.file_name().unwrap().to_str().unwrap(),
        "FruitDetectorModel_TensorFlow.zip"
    );
    assert_eq!(std::fs::read(&dest).unwrap(), vec![1, 2, 3]);
}

#[tokio::test]
async fn failed_export_is_not_downloaded() {
    let server = MockServer::start().await;
    let project_id = Uuid::new_v4();
    let iteration_id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path(format!(
            "/customvision/v3.4/training/projects/{}/iterations/{}/export",
            project_id, iteration_id
        )))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"platform": "CoreML", "status": "Failed"}
        ])))
        .mount(&server)
        .await;

    let out = tempfile::tempdir().unwrap();
    let err = export_and_download(
        &client_for(&server),
        project_id,
        iteration_id,
        &vflow_models::ExportPlatform::coreml(),
        "FruitDetectorModel",
        out.path(),
        POLL,
    )
    .await
    .unwrap_err();

    assert!(matches!(err, WorkflowError::ExportFailed(status) if status == "Failed"));
    // Nothing was written to the output folder.
    assert_eq!(std::fs::read_dir(out.path()).unwrap().count(), 0);
}
