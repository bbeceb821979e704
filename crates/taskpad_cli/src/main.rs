//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `taskpad_core` wiring without
//!   a real presentation layer.
//! - Keep output deterministic for quick local sanity checks.

use taskpad_core::db::open_db_in_memory;
use taskpad_core::{
    ChannelConfirmationGate, ChannelExitAnimator, Filter, InteractionController, Priority,
    SqliteSnapshotRepository, TaskStore,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("taskpad_core version={}", taskpad_core::core_version());

    let conn = open_db_in_memory()?;
    let repo = SqliteSnapshotRepository::try_new(&conn)?;
    let store = TaskStore::load(repo)?;

    let (gate, mut prompts) = ChannelConfirmationGate::new();
    let (animator, mut exits) = ChannelExitAnimator::new();

    // Stand-in presentation layer: answer yes to every prompt and finish
    // every exit animation immediately.
    tokio::spawn(async move {
        while let Some(prompt) = prompts.recv().await {
            println!("confirm: {} -> yes", prompt.message());
            prompt.answer(true);
        }
    });
    tokio::spawn(async move {
        while let Some(batch) = exits.recv().await {
            for _ in &batch.ids {
                batch.signal.notify();
            }
        }
    });

    let mut controller = InteractionController::new(store, gate, animator);

    controller.add_task("Buy milk", "2025-01-01", Priority::Low)?;
    controller.add_task("Walk the dog", "2025-01-02", Priority::High)?;
    let oldest = controller.visible()[1].id;
    let toggled = controller.toggle_completion(oldest).await?;
    println!("toggled={toggled}");

    controller.set_filter(Filter::Completed);
    for task in controller.visible() {
        println!(
            "task text={:?} due={} priority={} completed={}",
            task.text, task.due_date, task.priority, task.completed
        );
    }

    controller.set_filter(Filter::All);
    let cleared = controller.clear_completed().await?;
    println!(
        "cleared={cleared} remaining={}",
        controller.store().len()
    );

    Ok(())
}
