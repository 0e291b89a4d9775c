//! Simple CLI demo for the task screen.
//!
//! Wires the in-memory document store, the remote repository, and the
//! controller together, then drives the screen the way a rendering layer
//! would: dispatch events, watch snapshots, print notifications.

use anyhow::anyhow;
use std::sync::Arc;
use std::time::Duration;
use taskdeck_core::environment::SystemClock;
use taskdeck_tasks::{
    MemoryDocumentStore, RemoteTaskRepository, Task, TaskScreenController, TaskScreenEvent,
    TaskScreenSideEffect, TaskScreenState,
};

fn print_tasks(state: &TaskScreenState) {
    println!("\nTasks ({}):", state.tasks.len());
    for task in &state.tasks {
        println!("  [{}] {} - {}", task.created_at, task.title, task.body);
    }
}

fn find_task(state: &TaskScreenState, title: &str) -> anyhow::Result<Task> {
    state
        .tasks
        .iter()
        .find(|task| task.title == title)
        .cloned()
        .ok_or_else(|| anyhow!("task not on screen: {title}"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    println!("=== Task Screen Demo ===");

    let repository = RemoteTaskRepository::new(
        Arc::new(MemoryDocumentStore::new()),
        Arc::new(SystemClock),
    );
    let controller = TaskScreenController::new(Arc::new(repository));

    // Print notifications the way a snackbar would show them.
    let mut notices = controller.subscribe_side_effects();
    let printer = tokio::spawn(async move {
        while let Ok(notice) = notices.recv().await {
            let TaskScreenSideEffect::ShowMessage { message } = notice;
            println!("  >> {message}");
        }
    });

    // Let the automatic initial fetch settle before driving the screen.
    tokio::time::sleep(Duration::from_millis(100)).await;

    println!("\nAdding tasks...");
    let mut handle = controller
        .dispatch(TaskScreenEvent::AddTask {
            title: "Buy milk".to_string(),
            body: "2%".to_string(),
        })
        .await?;
    handle.wait().await;

    let mut handle = controller
        .dispatch(TaskScreenEvent::AddTask {
            title: "Write documentation".to_string(),
            body: "runtime crate first".to_string(),
        })
        .await?;
    handle.wait().await;

    print_tasks(&controller.state().await);

    println!("\nEditing 'Buy milk'...");
    let target = find_task(&controller.state().await, "Buy milk")?;
    controller
        .dispatch(TaskScreenEvent::TaskSelected(target))
        .await?;
    controller
        .dispatch(TaskScreenEvent::TitleChanged("Buy oat milk".to_string()))
        .await?;
    controller
        .dispatch(TaskScreenEvent::BodyChanged("the barista one".to_string()))
        .await?;
    let mut handle = controller.dispatch(TaskScreenEvent::UpdateTask).await?;
    handle.wait().await;

    print_tasks(&controller.state().await);

    println!("\nDeleting 'Write documentation'...");
    let doomed = find_task(&controller.state().await, "Write documentation")?;
    let mut handle = controller
        .dispatch(TaskScreenEvent::DeleteTask {
            task_id: doomed.task_id,
        })
        .await?;
    handle.wait().await;

    print_tasks(&controller.state().await);

    controller.shutdown(Duration::from_secs(5)).await?;
    printer.abort();

    println!("\n=== Demo Complete ===");
    Ok(())
}
