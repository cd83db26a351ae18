use rusqlite::Connection;
use student_record_manager::db::{
    add_course, course_exists, course_name, enroll_student, ensure_schema, fetch_student_details,
    register_student, student_exists, StoreError,
};
use student_record_manager::models::NewStudent;

fn test_conn() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch("PRAGMA foreign_keys = ON").unwrap();
    ensure_schema(&conn).unwrap();
    conn
}

fn student(name: &str) -> NewStudent {
    NewStudent {
        name: name.to_string(),
        dob: "2000-01-01".to_string(),
        gender: "F".to_string(),
        phone: "555-0000".to_string(),
        email: "someone@x.test".to_string(),
        father_name: "Father".to_string(),
        address: "Somewhere".to_string(),
    }
}

fn enrollment_count(conn: &Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM course", [], |row| row.get(0))
        .unwrap()
}

#[test]
fn enrollment_after_prechecks_is_visible_in_the_report() {
    let conn = test_conn();
    let student_id = register_student(&conn, &student("Ada")).unwrap();
    let course = add_course(&conn, "Algorithms").unwrap();

    assert!(student_exists(&conn, student_id).unwrap());
    assert!(course_exists(&conn, course.id).unwrap());
    enroll_student(&conn, student_id, course.id).unwrap();

    let details = fetch_student_details(&conn).unwrap();
    let rows: Vec<_> = details
        .iter()
        .filter(|detail| detail.student.id == student_id)
        .collect();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].course_name.as_deref(), Some("Algorithms"));
    assert_eq!(enrollment_count(&conn), 1);
}

#[test]
fn enrollment_snapshots_the_course_name() {
    let conn = test_conn();
    let student_id = register_student(&conn, &student("Ada")).unwrap();
    let course = add_course(&conn, "Algorithms").unwrap();
    enroll_student(&conn, student_id, course.id).unwrap();

    // A rename after the fact must not rewrite enrollment history.
    conn.execute(
        "UPDATE available_course SET course_name = 'Advanced Algorithms' WHERE course_id = ?1",
        [course.id],
    )
    .unwrap();

    assert_eq!(
        course_name(&conn, course.id).unwrap().as_deref(),
        Some("Advanced Algorithms")
    );
    let details = fetch_student_details(&conn).unwrap();
    assert_eq!(details[0].course_name.as_deref(), Some("Algorithms"));
}

#[test]
fn course_name_lookup_is_none_for_unknown_id() {
    let conn = test_conn();
    assert_eq!(course_name(&conn, 42).unwrap(), None);
}

#[test]
fn storage_rejects_enrollment_for_unknown_student() {
    let conn = test_conn();
    let course = add_course(&conn, "Algorithms").unwrap();

    // Bypassing the front-end pre-check runs into the foreign key.
    let err = enroll_student(&conn, 999, course.id).unwrap_err();
    assert!(matches!(err, StoreError::Constraint(_)));
    assert_eq!(enrollment_count(&conn), 0);
}

#[test]
fn storage_rejects_enrollment_for_unknown_course() {
    let conn = test_conn();
    let student_id = register_student(&conn, &student("Ada")).unwrap();

    let err = enroll_student(&conn, student_id, 999).unwrap_err();
    assert!(matches!(err, StoreError::Constraint(_)));
    assert_eq!(enrollment_count(&conn), 0);
}

#[test]
fn skipped_write_leaves_row_count_unchanged() {
    let conn = test_conn();
    add_course(&conn, "Algorithms").unwrap();

    // The front-end contract: when the pre-check reports not-found the write
    // is never attempted.
    assert!(!student_exists(&conn, 999).unwrap());
    assert_eq!(enrollment_count(&conn), 0);
}
