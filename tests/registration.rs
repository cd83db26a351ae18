use rusqlite::Connection;
use student_record_manager::db::{
    add_course, course_exists, ensure_schema, fetch_student_details, register_student,
    student_exists,
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

#[test]
fn registered_student_exists() {
    let conn = test_conn();
    let id = register_student(&conn, &student("Ada")).unwrap();
    assert!(student_exists(&conn, id).unwrap());
}

#[test]
fn unknown_student_does_not_exist() {
    let conn = test_conn();
    assert!(!student_exists(&conn, 999).unwrap());
}

#[test]
fn student_ids_increase_monotonically() {
    let conn = test_conn();
    let first = register_student(&conn, &student("Ada")).unwrap();
    let second = register_student(&conn, &student("Grace")).unwrap();
    assert!(second > first);
}

#[test]
fn fields_are_stored_verbatim() {
    let conn = test_conn();
    let mut fields = student("Ada");
    // No format validation happens on the way in, not even for the date.
    fields.dob = "tenth of December".to_string();
    let id = register_student(&conn, &fields).unwrap();

    let details = fetch_student_details(&conn).unwrap();
    let row = details
        .iter()
        .find(|detail| detail.student.id == id)
        .expect("registered student should appear in the report");
    assert_eq!(row.student.dob, "tenth of December");
    assert_eq!(row.student.father_name, "Father");
}

#[test]
fn added_course_exists() {
    let conn = test_conn();
    let course = add_course(&conn, "Algorithms").unwrap();
    assert!(course_exists(&conn, course.id).unwrap());
    assert_eq!(course.name, "Algorithms");
}

#[test]
fn unknown_course_does_not_exist() {
    let conn = test_conn();
    assert!(!course_exists(&conn, 1).unwrap());
}
