mod common;
use common::{cdk, init_db_with_data, setup_test_db};
use predicates::prelude::*;

#[test]
fn test_client_list_shows_seeded_clients() {
    let db_path = setup_test_db("client_list");
    init_db_with_data(&db_path);

    cdk()
        .args(["--db", &db_path, "client", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Acme").and(predicate::str::contains("Globex")));
}

#[test]
fn test_client_search_filters_in_memory() {
    let db_path = setup_test_db("client_search");
    init_db_with_data(&db_path);

    cdk()
        .args(["--db", &db_path, "client", "list", "--search", "acme"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Acme").and(predicate::str::contains("Globex").not()));

    // matches on company too
    cdk()
        .args(["--db", &db_path, "client", "list", "--search", "corp"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Acme"));
}

#[test]
fn test_client_add_rejects_implausible_email() {
    let db_path = setup_test_db("client_bad_email");
    init_db_with_data(&db_path);

    cdk()
        .args([
            "--db", &db_path, "client", "add", "Initech", "--email", "not-an-email",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("implausible email"));
}

#[test]
fn test_client_archive_hides_from_default_listing() {
    let db_path = setup_test_db("client_archive");
    init_db_with_data(&db_path);

    cdk()
        .args(["--db", &db_path, "client", "archive", "2"])
        .assert()
        .success();

    cdk()
        .args(["--db", &db_path, "client", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Globex").not());

    cdk()
        .args(["--db", &db_path, "client", "list", "--archived"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Globex"));
}

#[test]
fn test_client_edit_updates_fields() {
    let db_path = setup_test_db("client_edit");
    init_db_with_data(&db_path);

    cdk()
        .args([
            "--db", &db_path, "client", "edit", "1", "--phone", "+39 02 1234567",
        ])
        .assert()
        .success();

    cdk()
        .args(["--db", &db_path, "client", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("+39 02 1234567"));
}

#[test]
fn test_client_show_derived_figures() {
    let db_path = setup_test_db("client_show");
    init_db_with_data(&db_path);

    // Acme has one open task and 3h logged
    cdk()
        .args(["--db", &db_path, "client", "show", "1"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Open tasks:   1")
                .and(predicate::str::contains("03h 00m")),
        );
}

#[test]
fn test_client_delete_leaves_unknown_client_references() {
    let db_path = setup_test_db("client_del_dangling");
    init_db_with_data(&db_path);

    cdk()
        .args(["--db", &db_path, "client", "del", "1"])
        .write_stdin("y\n")
        .assert()
        .success();

    // the task still exists and shows the fallback text
    cdk()
        .args(["--db", &db_path, "task", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Unknown Client"));

    // db --check reports the dangling references
    cdk()
        .args(["--db", &db_path, "db", "--check"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dangling reference"));
}
