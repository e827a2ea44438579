//! Top-to-bottom workflow orchestration.

use tracing::{info, warn};

use vflow_client::{PredictionClient, TrainingClient};
use vflow_dataset::{list_test_images, Dataset};

use crate::config::WorkflowConfig;
use crate::console::{Console, ExportChoice};
use crate::error::WorkflowResult;
use crate::export::export_and_download;
use crate::predict::{predict_image, print_ranked};
use crate::project::resolve_project;
use crate::tags::sync_tags;
use crate::training::{latest_iteration, publish_iteration, run_training};
use crate::upload::upload_dataset;

/// Run the whole workflow: resolve project, sync tags, upload, train,
/// publish, predict, export. Phases are separated by console gates.
pub async fn run(config: WorkflowConfig) -> WorkflowResult<()> {
    let training = TrainingClient::new(config.credentials.clone());
    let prediction = PredictionClient::new(config.credentials.clone());
    let dataset = Dataset::new(&config.dataset_dir);
    let mut console = Console::new();

    Console::section(&format!(
        "Selecting existing project: {}",
        config.project_name
    ));
    let project = resolve_project(&training, &config.project_name).await?;
    Console::separator();
    console.pause().await?;

    Console::section("Retrieving tags");
    let labels = dataset.labels().await?;
    let sync = sync_tags(&training, project.id, &labels).await?;
    info!(
        tags = sync.tags.len(),
        created = sync.created,
        existing_images = sync.existing_images,
        "Tags synchronized"
    );
    Console::separator();
    console.pause().await?;

    let upload_images = if sync.existing_images > 0 {
        console
            .confirm(&format!(
                "There are {} training images already uploaded. Do you want to upload more?",
                sync.existing_images
            ))
            .await?
    } else {
        true
    };

    let mut trained = None;
    if upload_images {
        Console::section("Accessing images");
        let report = upload_dataset(&training, project.id, &dataset, &sync).await?;
        Console::separator();
        console.pause().await?;

        if report.images > 0 {
            Console::section("Starting the training process");
            match run_training(&training, project.id, config.poll_interval).await {
                Ok(iteration) => {
                    Console::separator();
                    console.pause().await?;

                    Console::section("Starting the publication process");
                    publish_iteration(
                        &training,
                        project.id,
                        &iteration,
                        &config.published_model_name,
                    )
                    .await;
                    trained = Some(iteration);
                }
                Err(e) => {
                    warn!(
                        error = %e,
                        "Training failed (perhaps nothing changed since the last iteration?)"
                    );
                }
            }
            Console::separator();
            console.pause().await?;
        }
    }

    // Without a fresh run, fall back to the newest existing iteration.
    let iteration = match trained {
        Some(iteration) => iteration,
        None => {
            let iteration = latest_iteration(&training, project.id).await?;
            Console::separator();
            console.pause().await?;
            iteration
        }
    };

    Console::section("Making predictions");
    for path in list_test_images(&config.test_images_dir).await? {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        let response = predict_image(
            &prediction,
            project.id,
            &config.published_model_name,
            &path,
        )
        .await?;
        print_ranked(file_name, &response);
        Console::separator();
        console.pause().await?;
    }

    if console.confirm("Do you want to export the model?").await? {
        loop {
            let platform = match console.export_menu().await? {
                ExportChoice::Platform(platform) => platform,
                ExportChoice::End => break,
            };

            match export_and_download(
                &training,
                project.id,
                iteration.id,
                &platform,
                &config.published_model_name,
                &config.export_dir,
                config.poll_interval,
            )
            .await
            {
                Ok(path) => {
                    println!(
                        "Model successfully exported. You can find it here:\n  {}",
                        path.display()
                    );
                }
                // Export problems end this attempt, not the loop.
                Err(e) => warn!(error = %e, "Export failed"),
            }
            Console::separator();
        }
    }

    info!("Workflow complete");
    Ok(())
}
