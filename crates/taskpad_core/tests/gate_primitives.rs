use std::sync::Arc;
use taskpad_core::{
    ChannelConfirmationGate, ChannelExitAnimator, CompletionBarrier, ConfirmationGate,
    ExitAnimator, GateError,
};
use uuid::Uuid;

#[tokio::test]
async fn channel_gate_delivers_message_and_answer() {
    let (gate, mut prompts) = ChannelConfirmationGate::new();

    let responder = tokio::spawn(async move {
        let prompt = prompts.recv().await.unwrap();
        assert_eq!(prompt.message(), "Are you sure you want to delete this task?");
        prompt.answer(true);

        let prompt = prompts.recv().await.unwrap();
        prompt.answer(false);
    });

    assert!(gate
        .confirm("Are you sure you want to delete this task?")
        .await
        .unwrap());
    assert!(!gate.confirm("second prompt").await.unwrap());
    responder.await.unwrap();
}

#[tokio::test]
async fn second_concurrent_confirm_fails_with_busy() {
    let (gate, mut prompts) = ChannelConfirmationGate::new();
    let gate = Arc::new(gate);

    let pending_gate = Arc::clone(&gate);
    let pending = tokio::spawn(async move { pending_gate.confirm("first").await });

    // Hold the first prompt unanswered so its confirm stays in flight.
    let held_prompt = prompts.recv().await.unwrap();

    let err = gate.confirm("second").await.unwrap_err();
    assert_eq!(err, GateError::Busy);

    held_prompt.answer(true);
    assert!(pending.await.unwrap().unwrap());
}

#[tokio::test]
async fn hung_up_presentation_side_yields_closed() {
    let (gate, prompts) = ChannelConfirmationGate::new();
    drop(prompts);

    let err = gate.confirm("anyone there?").await.unwrap_err();
    assert_eq!(err, GateError::Closed);
}

#[tokio::test]
async fn dropping_an_unanswered_prompt_yields_closed() {
    let (gate, mut prompts) = ChannelConfirmationGate::new();

    let responder = tokio::spawn(async move {
        let prompt = prompts.recv().await.unwrap();
        drop(prompt);
    });

    let err = gate.confirm("dismissed").await.unwrap_err();
    assert_eq!(err, GateError::Closed);
    responder.await.unwrap();
}

#[tokio::test]
async fn barrier_with_zero_expected_signals_releases_immediately() {
    let (barrier, _signal) = CompletionBarrier::new(0);
    barrier.wait().await;
}

#[tokio::test]
async fn barrier_releases_after_every_expected_signal() {
    let (barrier, signal) = CompletionBarrier::new(3);
    assert_eq!(barrier.expected(), 3);

    let notifier = tokio::spawn(async move {
        for _ in 0..3 {
            signal.notify();
        }
    });

    barrier.wait().await;
    notifier.await.unwrap();
}

#[tokio::test]
async fn barrier_unblocks_when_all_signal_handles_are_dropped() {
    let (barrier, signal) = CompletionBarrier::new(2);
    signal.notify();
    drop(signal);

    // One of two signals arrived; the dropped handle must not deadlock us.
    barrier.wait().await;
}

#[tokio::test]
async fn channel_animator_waits_for_one_signal_per_row() {
    let (animator, mut exits) = ChannelExitAnimator::new();

    let presentation = tokio::spawn(async move {
        let batch = exits.recv().await.unwrap();
        assert_eq!(batch.ids.len(), 2);
        for _ in &batch.ids {
            batch.signal.notify();
        }
    });

    animator.animate_exit(&[Uuid::new_v4(), Uuid::new_v4()]).await;
    presentation.await.unwrap();
}

#[tokio::test]
async fn channel_animator_skips_empty_batches() {
    let (animator, mut exits) = ChannelExitAnimator::new();

    animator.animate_exit(&[]).await;

    // Nothing may have been handed to the presentation layer.
    assert!(exits.try_recv().is_err());
}

#[tokio::test]
async fn channel_animator_does_not_block_without_a_presentation_layer() {
    let (animator, exits) = ChannelExitAnimator::new();
    drop(exits);

    animator.animate_exit(&[Uuid::new_v4()]).await;
}
