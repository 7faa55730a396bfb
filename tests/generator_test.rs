mod common;

use common::{harness, sign_in};
use timegrid_lib::error::Error;
use timegrid_lib::models::{GenerationOutcome, TimetableStatus};

#[tokio::test]
async fn zero_variants_is_rejected_locally() {
    let h = harness();
    sign_in(&h, "scheduler@uni.edu").await;
    let before = h.service.call_count();

    let err = h.generator.generate(0).await.unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    assert_eq!(h.service.call_count(), before);
}

#[tokio::test]
async fn anonymous_generation_is_rejected_locally() {
    let h = harness();
    let err = h.generator.generate(3).await.unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    assert_eq!(h.service.call_count(), 0);
}

#[tokio::test]
async fn generation_yields_ordered_drafts_with_first_active() {
    let h = harness();
    sign_in(&h, "scheduler@uni.edu").await;

    let outcome = h.generator.generate(3).await.unwrap();
    let GenerationOutcome::Variants(variants) = outcome else {
        panic!("expected variants");
    };
    assert_eq!(variants.len(), 3);
    assert!(variants
        .iter()
        .all(|v| v.status == TimetableStatus::Draft));
    assert_eq!(
        variants.iter().map(|v| v.version).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );

    let snapshot = h.generator.snapshot();
    assert_eq!(snapshot.active, 0);
    assert_eq!(
        h.generator.active_variant().unwrap().id,
        snapshot.variants[0].id
    );
    assert!(snapshot.infeasibility.is_none());
}

#[tokio::test]
async fn switching_variants_is_a_local_index_change() {
    let h = harness();
    sign_in(&h, "scheduler@uni.edu").await;
    h.generator.generate(3).await.unwrap();

    let before = h.service.call_count();
    h.generator.set_active(2).unwrap();
    assert_eq!(h.service.call_count(), before);

    let snapshot = h.generator.snapshot();
    assert_eq!(snapshot.active, 2);
    assert_eq!(
        h.generator.active_variant().unwrap().id,
        snapshot.variants[2].id
    );

    let err = h.generator.set_active(3).unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    assert_eq!(h.generator.snapshot().active, 2);
}

#[tokio::test]
async fn selected_variant_moves_to_pending_and_leaves_the_draft_list() {
    let h = harness();
    sign_in(&h, "scheduler@uni.edu").await;
    h.generator.generate(3).await.unwrap();
    h.generator.set_active(2).unwrap();

    let chosen = h.generator.active_variant().unwrap();
    let updated = h.workflow.send_for_approval(chosen.id).await.unwrap();
    assert_eq!(updated.id, chosen.id);
    assert_eq!(updated.status, TimetableStatus::Pending);

    let drafts = h
        .workflow
        .refresh(Some(TimetableStatus::Draft))
        .await
        .unwrap();
    assert_eq!(drafts.len(), 2);
    assert!(drafts.iter().all(|t| t.id != chosen.id));

    let pending = h.workflow.refresh(Some(TimetableStatus::Pending)).await.unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, chosen.id);
}

#[tokio::test]
async fn infeasibility_is_an_outcome_not_an_error() {
    let h = harness();
    h.service.mark_infeasible();
    sign_in(&h, "scheduler@uni.edu").await;

    let outcome = h.generator.generate(3).await.unwrap();
    let GenerationOutcome::Infeasible(report) = outcome else {
        panic!("expected infeasibility report");
    };
    assert_eq!(report.error, "No feasible timetable found");
    assert_eq!(report.suggestions.len(), 1);
    assert_eq!(report.suggestions[0].kind, "faculty_overload");

    let snapshot = h.generator.snapshot();
    assert!(snapshot.variants.is_empty());
    assert!(snapshot.infeasibility.is_some());
}

#[tokio::test]
async fn a_feasible_run_clears_an_earlier_report() {
    let h = harness();
    h.service.mark_infeasible();
    sign_in(&h, "scheduler@uni.edu").await;
    h.generator.generate(1).await.unwrap();
    assert!(h.generator.snapshot().infeasibility.is_some());

    h.service.state.lock().unwrap().infeasible = false;
    h.generator.generate(2).await.unwrap();

    let snapshot = h.generator.snapshot();
    assert!(snapshot.infeasibility.is_none());
    assert_eq!(snapshot.variants.len(), 2);
}

#[tokio::test]
async fn clearing_variants_is_never_a_network_call() {
    let h = harness();
    sign_in(&h, "scheduler@uni.edu").await;
    h.generator.generate(2).await.unwrap();

    let before = h.service.call_count();
    h.generator.clear();
    assert_eq!(h.service.call_count(), before);

    let snapshot = h.generator.snapshot();
    assert!(snapshot.variants.is_empty());
    assert!(snapshot.infeasibility.is_none());
    assert!(h.generator.active_variant().is_none());
}

#[tokio::test]
async fn a_readonly_account_cannot_generate() {
    let h = harness();
    sign_in(&h, "student@uni.edu").await;

    let err = h.generator.generate(1).await.unwrap_err();
    assert!(matches!(err, Error::Backend { status: Some(403), .. }));
    assert!(h.generator.snapshot().variants.is_empty());
}
