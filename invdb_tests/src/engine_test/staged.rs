use super::*;

#[test]
fn test_insert_statement_quotes_and_numbers_placeholders() {
    assert_eq!(
        insert_statement("GameInventoryItems", &cols(&["GameID", "ContentType", "Condition"])),
        "INSERT INTO \"GameInventoryItems\" (\"GameID\", \"ContentType\", \"Condition\") \
         VALUES (?1, ?2, ?3)"
    );
}

#[test]
fn test_declined_entry_is_discarded() {
    let mut session = catalog_session();
    let schema = introspect(session.connection(), "Regions").unwrap();
    let mut console = scripted(&["n", ""]);

    let decision = insert_staged(&mut session, &mut console, &schema, &region_batch("NA")).unwrap();

    assert_eq!(decision, CommitDecision::RolledBack { rows: 1 });
    assert_eq!(decision.state(), InsertState::RolledBack);
    assert_eq!(rows_in(&session, "Regions"), 0);

    let out = transcript(&console);
    assert!(out.contains("Displaying Regions including uncommitted changes"));
    assert!(out.contains("1        | NA"));
    assert!(out.contains("Previous entry(s) discarded"));
}

#[test]
fn test_committed_entry_persists() {
    let mut session = catalog_session();
    let schema = introspect(session.connection(), "Regions").unwrap();
    let mut console = scripted(&["y", ""]);

    let decision = insert_staged(&mut session, &mut console, &schema, &region_batch("NA")).unwrap();

    assert_eq!(decision, CommitDecision::Committed { rows: 1 });
    assert_eq!(
        query_strings(&session, "SELECT RegionID, Region FROM Regions"),
        vec![vec!["1".to_string(), "NA".to_string()]]
    );
    assert!(transcript(&console).contains("Entry(s) committed."));
}

#[test]
fn test_batch_preview_shows_every_uncommitted_row() {
    let mut session = session_with_game("G1");
    let schema = introspect(session.connection(), "GameInventoryItems").unwrap();
    let batch = inventory_plan().expand(session.connection(), "G1").unwrap();
    let mut console = scripted(&["n", ""]);

    let decision = insert_staged(&mut session, &mut console, &schema, &batch).unwrap();

    assert_eq!(decision, CommitDecision::RolledBack { rows: 12 });
    assert_eq!(transcript(&console).matches("G1").count(), 12);
    assert_eq!(rows_in(&session, "GameInventoryItems"), 0);
}

#[test]
fn test_batch_commit_writes_rows_in_batch_order() {
    let mut session = session_with_game("G1");
    let schema = introspect(session.connection(), "GameInventoryItems").unwrap();
    let batch = inventory_plan().expand(session.connection(), "G1").unwrap();
    let mut console = scripted(&["y", ""]);

    let decision = insert_staged(&mut session, &mut console, &schema, &batch).unwrap();

    assert_eq!(decision, CommitDecision::Committed { rows: 12 });
    assert_eq!(
        query_strings(
            &session,
            "SELECT GameID, ContentType, Condition FROM GameInventoryItems ORDER BY ItemID"
        ),
        expected_rows(&batch)
    );
}

#[test]
fn test_preview_respects_row_limit() {
    let mut session = session_with_game("G1").with_preview_limit(5);
    let schema = introspect(session.connection(), "GameInventoryItems").unwrap();
    let batch = inventory_plan().expand(session.connection(), "G1").unwrap();
    let mut console = scripted(&["n", ""]);

    insert_staged(&mut session, &mut console, &schema, &batch).unwrap();

    assert_eq!(transcript(&console).matches("G1").count(), 5);
}

#[test]
fn test_duplicate_inside_batch_rolls_back_everything() {
    let mut session = session_with_game("G1");
    let schema = introspect(session.connection(), "GameInventoryItems").unwrap();
    let columns = cols(&["GameID", "ContentType", "Condition"]);
    let record: PendingRecord = columns
        .iter()
        .cloned()
        .zip(["G1", "Game", "Good"])
        .collect();
    let batch = StagedBatch::new(
        "GameInventoryItems",
        columns,
        vec![record.clone(), record],
    )
    .unwrap();
    let mut console = scripted(&[""]);

    let decision = insert_staged(&mut session, &mut console, &schema, &batch).unwrap();

    let CommitDecision::Failed(failure) = &decision else {
        panic!("expected failure, got {decision:?}");
    };
    assert_eq!(failure.violation().map(|v| v.kind), Some(ViolationKind::Unique));
    assert_eq!(rows_in(&session, "GameInventoryItems"), 0);
    assert!(transcript(&console).contains("Unique violation"));
}

#[test]
fn test_foreign_key_failure_from_store_is_classified() {
    let mut session = catalog_session();
    let schema = introspect(session.connection(), "GameInventoryItems").unwrap();
    let record: PendingRecord = [("GameID", "G9"), ("ContentType", "Game"), ("Condition", "Good")]
        .into_iter()
        .collect();
    let batch = StagedBatch::single(
        "GameInventoryItems",
        cols(&["GameID", "ContentType", "Condition"]),
        record,
    )
    .unwrap();
    let mut console = scripted(&[""]);

    let decision = insert_staged(&mut session, &mut console, &schema, &batch).unwrap();

    assert_eq!(decision.state(), InsertState::Failed);
    let CommitDecision::Failed(failure) = &decision else {
        unreachable!();
    };
    assert_eq!(
        failure.violation().map(|v| v.kind),
        Some(ViolationKind::ForeignKey)
    );
    assert!(transcript(&console).contains(ViolationKind::ForeignKey.remediation_hint()));
}

#[test]
fn test_empty_value_binds_null() {
    let mut session = catalog_session();
    let schema = introspect(session.connection(), "Regions").unwrap();
    let mut console = scripted(&[""]);

    let decision = insert_staged(&mut session, &mut console, &schema, &region_batch("")).unwrap();

    let CommitDecision::Failed(failure) = &decision else {
        panic!("expected failure, got {decision:?}");
    };
    assert_eq!(failure.violation().map(|v| v.kind), Some(ViolationKind::NotNull));
}

#[test]
fn test_check_failure_is_classified() {
    let mut session = catalog_session();
    seed(&session, "INSERT INTO Regions (Region) VALUES ('NA');");
    let schema = introspect(session.connection(), "GameInfo").unwrap();
    let columns = cols(&["GameID", "Name", "Region", "PriceChartingURL"]);
    let record: PendingRecord = columns
        .iter()
        .cloned()
        .zip(["G1", "One", "NA", "ftp://prices"])
        .collect();
    let batch = StagedBatch::single("GameInfo", columns, record).unwrap();
    let mut console = scripted(&[""]);

    let decision = insert_staged(&mut session, &mut console, &schema, &batch).unwrap();

    let CommitDecision::Failed(failure) = &decision else {
        panic!("expected failure, got {decision:?}");
    };
    assert_eq!(failure.violation().map(|v| v.kind), Some(ViolationKind::Check));
    assert_eq!(rows_in(&session, "GameInfo"), 0);
}

#[test]
fn test_closed_input_at_commit_prompt_rolls_back() {
    let mut session = catalog_session();
    let schema = introspect(session.connection(), "Regions").unwrap();
    let mut console = scripted(&[]);

    let err = insert_staged(&mut session, &mut console, &schema, &region_batch("NA")).unwrap_err();

    assert!(matches!(err, EntryError::InputClosed));
    assert!(session.connection().is_autocommit());
    assert_eq!(rows_in(&session, "Regions"), 0);
}

#[test]
fn test_invalid_commit_reply_reprompts() {
    let mut session = catalog_session();
    let schema = introspect(session.connection(), "Regions").unwrap();
    let mut console = scripted(&["sure", "", "1", ""]);

    let decision = insert_staged(&mut session, &mut console, &schema, &region_batch("NA")).unwrap();

    assert_eq!(decision, CommitDecision::Committed { rows: 1 });
    assert_eq!(transcript(&console).matches("Commit Entry?").count(), 2);
    assert_eq!(rows_in(&session, "Regions"), 1);
}

#[test]
fn test_session_stays_usable_after_failure() {
    let mut session = catalog_session();
    seed(&session, "INSERT INTO Regions (Region) VALUES ('NA');");
    let schema = introspect(session.connection(), "Regions").unwrap();
    let mut console = scripted(&["", "y", ""]);

    let first = insert_staged(&mut session, &mut console, &schema, &region_batch("NA")).unwrap();
    let second =
        insert_staged(&mut session, &mut console, &schema, &region_batch("Europe")).unwrap();

    assert_eq!(first.state(), InsertState::Failed);
    assert_eq!(second, CommitDecision::Committed { rows: 1 });
    assert_eq!(rows_in(&session, "Regions"), 2);
}

#[test]
fn test_preview_includes_newest_rows_of_table_without_key() {
    let mut session = catalog_session().with_preview_limit(5);
    seed(
        &session,
        "CREATE TABLE Notes (Body TEXT DEFAULT 'kept without rowid');",
    );
    for i in 0..30 {
        seed(&session, &format!("INSERT INTO Notes (Body) VALUES ('n{i}');"));
    }
    let schema = introspect(session.connection(), "Notes").unwrap();
    let record: PendingRecord = [("Body", "NEWEST")].into_iter().collect();
    let batch = StagedBatch::single("Notes", cols(&["Body"]), record).unwrap();
    let mut console = scripted(&["n", ""]);

    insert_staged(&mut session, &mut console, &schema, &batch).unwrap();

    let out = transcript(&console);
    assert!(out.contains("NEWEST"));
    assert!(out.contains("n29"));
    assert!(!out.contains("n0 "));
    assert_eq!(rows_in(&session, "Notes"), 30);
}

#[test]
fn test_batch_without_columns_is_rejected() {
    let err = StagedBatch::new("Regions", Vec::new(), vec![PendingRecord::new()]).unwrap_err();
    assert!(matches!(err, EntryError::NoColumns(ref t) if t == "Regions"));
}
