use tasklist_core::{
    decode_tasks, AlwaysConfirm, EditState, MemoryKvStore, MutationOutcome, NeverConfirm,
    PersistenceAdapter, RejectReason, StoreError, Task, TaskListStore, TaskValidationError,
    CLEAR_ALL_PROMPT, DELETE_TASK_PROMPT, TASKS_STORAGE_KEY,
};

fn empty_store() -> TaskListStore<MemoryKvStore> {
    TaskListStore::open(MemoryKvStore::new()).unwrap()
}

fn store_with_done(flags: &[bool]) -> TaskListStore<MemoryKvStore> {
    let mut store = empty_store();
    for (n, done) in flags.iter().enumerate() {
        store.add_task(&format!("task {n}"), "2024-01-01").unwrap();
        if *done {
            store.toggle_done(n).unwrap();
        }
    }
    store
}

fn done_flags<A: PersistenceAdapter>(store: &TaskListStore<A>) -> Vec<bool> {
    store.tasks().iter().map(|task| task.done).collect()
}

fn persisted(store: &TaskListStore<MemoryKvStore>) -> Vec<Task> {
    let raw = store.adapter().get(TASKS_STORAGE_KEY).unwrap().unwrap();
    decode_tasks(&raw).unwrap()
}

#[test]
fn add_task_appends_trimmed_pending_task() {
    let mut store = store_with_done(&[false]);

    let outcome = store.add_task("  Water plants ", "2024-05-02").unwrap();

    assert_eq!(outcome, MutationOutcome::Applied);
    assert_eq!(store.len(), 2);
    let last = store.tasks().last().unwrap();
    assert_eq!(last, &Task::new("Water plants", "2024-05-02").unwrap());
    assert!(!last.done);
    assert_eq!(persisted(&store), store.tasks());
}

#[test]
fn add_task_with_missing_field_is_silent_noop() {
    let mut store = empty_store();

    let no_text = store.add_task("", "2024-01-01").unwrap();
    let no_date = store.add_task("x", "").unwrap();

    assert_eq!(
        no_text,
        MutationOutcome::Rejected(RejectReason::Invalid(TaskValidationError::EmptyText))
    );
    assert_eq!(
        no_date,
        MutationOutcome::Rejected(RejectReason::Invalid(TaskValidationError::EmptyDate))
    );
    assert!(store.is_empty());
    assert_eq!(store.adapter().write_count(), 0);
}

#[test]
fn duplicate_tasks_are_allowed() {
    let mut store = empty_store();
    store.add_task("same", "2024-01-01").unwrap();
    store.add_task("same", "2024-01-01").unwrap();

    assert_eq!(store.len(), 2);
    assert_eq!(store.tasks()[0], store.tasks()[1]);
}

#[test]
fn toggle_done_flips_only_target_and_is_an_involution() {
    let mut store = store_with_done(&[false, true, false]);

    store.toggle_done(1).unwrap();
    assert_eq!(done_flags(&store), vec![false, false, false]);

    store.toggle_done(1).unwrap();
    assert_eq!(done_flags(&store), vec![false, true, false]);
}

#[test]
fn toggle_done_out_of_range_is_rejected() {
    let mut store = store_with_done(&[false]);
    let writes = store.adapter().write_count();

    let outcome = store.toggle_done(5).unwrap();

    assert_eq!(
        outcome,
        MutationOutcome::Rejected(RejectReason::IndexOutOfRange { index: 5, len: 1 })
    );
    assert_eq!(store.adapter().write_count(), writes);
}

#[test]
fn mark_all_done_sets_one_uniform_value() {
    let mut store = store_with_done(&[true, false]);

    store.mark_all_done().unwrap();
    assert_eq!(done_flags(&store), vec![true, true]);

    store.mark_all_done().unwrap();
    assert_eq!(done_flags(&store), vec![false, false]);

    store.mark_all_done().unwrap();
    assert_eq!(done_flags(&store), vec![true, true]);
    assert_eq!(persisted(&store), store.tasks());
}

#[test]
fn mark_all_done_on_empty_list_still_persists() {
    let mut store = empty_store();

    assert!(store.mark_all_done().unwrap().is_applied());
    assert_eq!(
        store.adapter().get(TASKS_STORAGE_KEY).unwrap().as_deref(),
        Some("[]")
    );
}

#[test]
fn delete_task_removes_only_target_after_confirmation() {
    let mut store = store_with_done(&[false, false, false]);
    let mut asked = Vec::new();

    let outcome = store
        .delete_task(1, &mut |message: &str| {
            asked.push(message.to_string());
            true
        })
        .unwrap();

    assert_eq!(outcome, MutationOutcome::Applied);
    assert_eq!(asked, vec![DELETE_TASK_PROMPT.to_string()]);
    let texts: Vec<&str> = store.tasks().iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, vec!["task 0", "task 2"]);
    assert_eq!(persisted(&store), store.tasks());
}

#[test]
fn delete_task_declined_changes_nothing() {
    let mut store = store_with_done(&[false, true]);
    let before = store.tasks().to_vec();
    let writes = store.adapter().write_count();

    let outcome = store.delete_task(0, &mut NeverConfirm).unwrap();

    assert_eq!(outcome, MutationOutcome::Declined);
    assert_eq!(store.tasks(), before.as_slice());
    assert_eq!(store.adapter().write_count(), writes);
}

#[test]
fn delete_task_out_of_range_does_not_prompt() {
    let mut store = store_with_done(&[false]);
    let mut prompted = false;

    let outcome = store
        .delete_task(1, &mut |_: &str| {
            prompted = true;
            true
        })
        .unwrap();

    assert!(matches!(
        outcome,
        MutationOutcome::Rejected(RejectReason::IndexOutOfRange { index: 1, len: 1 })
    ));
    assert!(!prompted);
    assert_eq!(store.len(), 1);
}

#[test]
fn clear_all_requires_confirmation() {
    let mut store = store_with_done(&[true, false]);

    assert_eq!(
        store.clear_all(&mut NeverConfirm).unwrap(),
        MutationOutcome::Declined
    );
    assert_eq!(store.len(), 2);

    let mut asked = None;
    let outcome = store
        .clear_all(&mut |message: &str| {
            asked = Some(message.to_string());
            true
        })
        .unwrap();

    assert_eq!(outcome, MutationOutcome::Applied);
    assert_eq!(asked.as_deref(), Some(CLEAR_ALL_PROMPT));
    assert!(store.is_empty());
    assert_eq!(
        store.adapter().get(TASKS_STORAGE_KEY).unwrap().as_deref(),
        Some("[]")
    );
}

#[test]
fn clear_all_exits_editing() {
    let mut store = store_with_done(&[false]);
    store.begin_edit(0).unwrap();

    store.clear_all(&mut AlwaysConfirm).unwrap();

    assert_eq!(store.edit_state(), &EditState::Viewing);
}

#[test]
fn edit_flow_seeds_drafts_and_commits_preserving_done() {
    let mut store = store_with_done(&[false, true]);

    store.begin_edit(1).unwrap();
    assert_eq!(
        store.edit_state(),
        &EditState::Editing {
            index: 1,
            draft_text: "task 1".to_string(),
            draft_date: "2024-01-01".to_string(),
        }
    );

    store.set_draft_text(" renamed ").unwrap();
    store.set_draft_date("2024-06-30").unwrap();
    let outcome = store.commit_edit().unwrap();

    assert_eq!(outcome, MutationOutcome::Applied);
    assert_eq!(store.edit_state(), &EditState::Viewing);
    let edited = &store.tasks()[1];
    assert_eq!(edited.text, "renamed");
    assert_eq!(edited.date_string(), "2024-06-30");
    assert!(edited.done);
    assert_eq!(persisted(&store), store.tasks());
}

#[test]
fn invalid_commit_stays_in_editing_without_writing() {
    let mut store = store_with_done(&[false]);
    let writes = store.adapter().write_count();

    store.begin_edit(0).unwrap();
    store.set_draft_text("   ").unwrap();
    let outcome = store.commit_edit().unwrap();

    assert_eq!(
        outcome,
        MutationOutcome::Rejected(RejectReason::Invalid(TaskValidationError::EmptyText))
    );
    assert_eq!(store.edit_state().editing_index(), Some(0));
    assert_eq!(store.tasks()[0].text, "task 0");
    assert_eq!(store.adapter().write_count(), writes);

    store.set_draft_text("fixed").unwrap();
    store.set_draft_date("").unwrap();
    assert!(!store.commit_edit().unwrap().is_applied());

    store.set_draft_date("2024-02-02").unwrap();
    assert!(store.commit_edit().unwrap().is_applied());
    assert_eq!(store.tasks()[0].text, "fixed");
}

#[test]
fn draft_updates_and_commit_require_editing() {
    let mut store = store_with_done(&[false]);

    assert_eq!(store.set_draft_text("x"), Err(RejectReason::NotEditing));
    assert_eq!(store.set_draft_date("2024-01-01"), Err(RejectReason::NotEditing));
    assert_eq!(
        store.commit_edit().unwrap(),
        MutationOutcome::Rejected(RejectReason::NotEditing)
    );
    assert!(matches!(
        store.begin_edit(3),
        Err(RejectReason::IndexOutOfRange { index: 3, len: 1 })
    ));
    assert_eq!(store.edit_state(), &EditState::Viewing);
}

#[test]
fn edit_task_shortcut_commits_in_one_call() {
    let mut store = store_with_done(&[false, false]);

    let outcome = store.edit_task(0, "Call mom", "2024-04-04").unwrap();

    assert!(outcome.is_applied());
    assert_eq!(store.tasks()[0].text, "Call mom");
    assert_eq!(store.tasks()[1].text, "task 1");
    assert_eq!(store.edit_state(), &EditState::Viewing);
}

#[test]
fn every_applied_mutation_writes_once() {
    let mut store = empty_store();

    store.add_task("a", "2024-01-01").unwrap();
    store.add_task("b", "2024-01-02").unwrap();
    store.toggle_done(0).unwrap();
    store.edit_task(1, "bb", "2024-01-03").unwrap();
    store.mark_all_done().unwrap();
    store.delete_task(0, &mut AlwaysConfirm).unwrap();
    store.clear_all(&mut AlwaysConfirm).unwrap();

    assert_eq!(store.adapter().write_count(), 7);
}

#[test]
fn failed_write_is_reported_and_keeps_memory_state() {
    let mut store = empty_store();
    store.adapter().set_fail_writes(true);

    let err = store.add_task("offline", "2024-01-01").unwrap_err();

    assert!(matches!(err, StoreError::Persist(_)));
    assert_eq!(store.len(), 1);
}

#[test]
fn summary_counts_track_done_flags() {
    let store = store_with_done(&[true, false, false]);
    assert_eq!(store.done_count(), 1);
    assert_eq!(store.pending_count(), 2);
}

#[test]
fn buy_milk_pay_rent_scenario() {
    let mut store = empty_store();

    store.add_task("Buy milk", "2024-03-01").unwrap();
    store.add_task("Pay rent", "2024-03-05").unwrap();
    store.toggle_done(0).unwrap();

    let mut expected_first = Task::new("Buy milk", "2024-03-01").unwrap();
    expected_first.done = true;
    let expected = vec![expected_first, Task::new("Pay rent", "2024-03-05").unwrap()];

    assert_eq!(store.tasks(), expected.as_slice());
    assert_eq!(persisted(&store), expected);
}

#[test]
fn edit_task_with_invalid_input_keeps_drafts_and_writes_nothing() {
    let mut store = store_with_done(&[false, true]);
    let writes = store.adapter().write_count();

    let outcome = store.edit_task(1, "  ", "2024-07-07").unwrap();

    assert_eq!(
        outcome,
        MutationOutcome::Rejected(RejectReason::Invalid(TaskValidationError::EmptyText))
    );
    assert_eq!(
        store.edit_state(),
        &EditState::Editing {
            index: 1,
            draft_text: "  ".to_string(),
            draft_date: "2024-07-07".to_string(),
        }
    );
    assert_eq!(store.tasks()[1].text, "task 1");
    assert_eq!(store.adapter().write_count(), writes);
}

#[test]
fn edit_task_out_of_range_is_rejected_and_stays_viewing() {
    let mut store = store_with_done(&[false]);
    let writes = store.adapter().write_count();

    let outcome = store.edit_task(4, "x", "2024-01-01").unwrap();

    assert_eq!(
        outcome,
        MutationOutcome::Rejected(RejectReason::IndexOutOfRange { index: 4, len: 1 })
    );
    assert_eq!(store.edit_state(), &EditState::Viewing);
    assert_eq!(store.adapter().write_count(), writes);
}
