//! Scripted demo for the todo list feature.
//!
//! Drives the store through a typical session: compose and add items, run
//! into the empty-input rejection, toggle, edit, save, and delete, rendering
//! the list after each step.

use std::sync::Arc;

use tasklist_app::{TodoAction, TodoEnvironment, TodoReducer, TodoState};
use tasklist_core::environment::UuidGenerator;
use tasklist_runtime::{Store, StoreError};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type TodoStore = Store<TodoState, TodoAction, TodoEnvironment, TodoReducer>;

async fn render(store: &TodoStore) {
    let state = store.state(Clone::clone).await;

    for todo in &state.todos {
        let status = if todo.completed { "✓" } else { " " };
        let marker = if state.is_editing(&todo.id) {
            " (editing)"
        } else {
            ""
        };
        println!("  [{status}] {}{marker}", todo.text);
    }
    println!(
        "  {}/{} completed",
        state.completed_count(),
        state.count()
    );
}

async fn add(
    store: &TodoStore,
    text: &str,
) -> Result<(), StoreError<tasklist_app::TodoError>> {
    store
        .send(TodoAction::SetComposeText {
            text: text.to_string(),
        })
        .await?;
    store.send(TodoAction::AddTodo).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tasklist_app=debug,tasklist_runtime=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== Tasklist ===\n");

    let env = TodoEnvironment::new(Arc::new(UuidGenerator));
    let store = Store::new(TodoState::new(), TodoReducer::new(), env);
    tracing::info!("store ready");

    println!("Adding items...");
    add(&store, "Buy milk").await?;
    add(&store, "Write documentation").await?;
    add(&store, "Water the plants").await?;
    render(&store).await;

    // Adding with an empty compose buffer is rejected; the state is
    // untouched and the session just continues.
    println!("\nTrying to add an empty item...");
    if let Err(error) = store.send(TodoAction::AddTodo).await {
        println!("  {error}");
    }

    let first = store
        .state(|s| s.todos.first().map(|t| t.id.clone()))
        .await
        .ok_or("expected at least one item")?;

    println!("\nCompleting 'Buy milk'...");
    store
        .send(TodoAction::ToggleTodo { id: first.clone() })
        .await?;
    render(&store).await;

    println!("\nEditing 'Buy milk'...");
    store
        .send(TodoAction::BeginEdit { id: first.clone() })
        .await?;
    store
        .send(TodoAction::SetEditText {
            text: "Buy oat milk".to_string(),
        })
        .await?;
    render(&store).await;

    let draft = store
        .state(|s| s.editing.as_ref().map(|d| d.text.clone()))
        .await
        .ok_or("expected an edit draft")?;
    store
        .send(TodoAction::SaveEdit {
            id: first,
            text: draft,
        })
        .await?;
    render(&store).await;

    println!("\nDeleting 'Water the plants'...");
    let last = store
        .state(|s| s.todos.last().map(|t| t.id.clone()))
        .await
        .ok_or("expected a last item")?;
    store.send(TodoAction::DeleteTodo { id: last }).await?;
    render(&store).await;

    println!("\nFinal state:");
    let state = store.state(Clone::clone).await;
    println!("{}", serde_json::to_string_pretty(&state)?);

    Ok(())
}
