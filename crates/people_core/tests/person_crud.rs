use people_core::db::open_db_in_memory;
use people_core::{Person, PersonInput, PersonRepository, RepoError, SqlitePersonRepository};

fn repo() -> SqlitePersonRepository {
    SqlitePersonRepository::new(open_db_in_memory().unwrap())
}

fn input(full_name: &str, hobby: Option<&str>) -> PersonInput {
    PersonInput::new(full_name, 30, "someone@example.com", hobby)
}

#[test]
fn save_and_find_by_id_roundtrip() {
    let repo = repo();

    let saved = PersonInput::new("Ivan Petrov", 30, "ivan@example.com", Some("chess"));
    let id = repo.save(&saved).unwrap();

    let loaded = repo.find_by_id(id).unwrap().unwrap();
    assert_eq!(loaded, Person::from_input(id, saved));
}

#[test]
fn save_assigns_distinct_increasing_ids() {
    let repo = repo();

    let first = repo.save(&input("Ivan Petrov", None)).unwrap();
    let second = repo.save(&input("Anna Ivanova", None)).unwrap();
    assert!(second > first);
}

#[test]
fn find_by_id_missing_returns_none() {
    let repo = repo();
    assert!(repo.find_by_id(9999).unwrap().is_none());
}

#[test]
fn find_all_returns_store_order_and_empty_when_empty() {
    let repo = repo();
    assert!(repo.find_all().unwrap().is_empty());

    let a = repo.save(&input("Ivan Petrov", None)).unwrap();
    let b = repo.save(&input("Anna Ivanova", None)).unwrap();
    let c = repo.save(&input("Boris Smirnov", None)).unwrap();

    let ids = repo
        .find_all()
        .unwrap()
        .into_iter()
        .map(|person| person.id)
        .collect::<Vec<_>>();
    assert_eq!(ids, vec![a, b, c]);
}

#[test]
fn exact_finders_match_whole_values() {
    let repo = repo();
    let ivan = repo.save(&input("Ivan Petrov", Some("chess"))).unwrap();
    repo.save(&input("Ivan Petrovich", Some("chess club"))).unwrap();

    let by_name = repo.find_by_full_name("Ivan Petrov").unwrap();
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].id, ivan);

    let by_hobby = repo.find_by_hobby("chess").unwrap();
    assert_eq!(by_hobby.len(), 1);
    assert_eq!(by_hobby[0].id, ivan);

    assert!(repo.find_by_full_name("ivan petrov").unwrap().is_empty());
}

#[test]
fn prefix_finders_are_left_anchored() {
    let repo = repo();
    let ivan = repo.save(&input("Ivan Petrov", Some("chess"))).unwrap();
    let ivanka = repo.save(&input("Ivanka Petrova", Some("checkers"))).unwrap();
    repo.save(&input("Anna Ivanova", Some("tennis"))).unwrap();

    let names = repo.find_by_full_name_starting_with("Ivan").unwrap();
    assert_eq!(
        names.iter().map(|person| person.id).collect::<Vec<_>>(),
        vec![ivan, ivanka]
    );

    let hobbies = repo.find_by_hobby_starting_with("che").unwrap();
    assert_eq!(hobbies.len(), 2);

    assert!(repo.find_by_full_name_starting_with("ivan").unwrap().is_empty());
    assert!(repo.find_by_hobby_starting_with("ess").unwrap().is_empty());
}

#[test]
fn prefix_finders_treat_wildcards_literally() {
    let repo = repo();
    repo.save(&input("Ivan Petrov", Some("chess"))).unwrap();
    let percent = repo.save(&input("Anna Ivanova", Some("%fun"))).unwrap();

    assert!(repo.find_by_hobby_starting_with("_hess").unwrap().is_empty());
    let literal = repo.find_by_hobby_starting_with("%").unwrap();
    assert_eq!(literal.len(), 1);
    assert_eq!(literal[0].id, percent);
}

#[test]
fn hobby_prefix_skips_people_without_hobby() {
    let repo = repo();
    repo.save(&input("Ivan Petrov", None)).unwrap();
    let with_hobby = repo.save(&input("Anna Ivanova", Some("chess"))).unwrap();

    let matches = repo.find_by_hobby_starting_with("").unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].id, with_hobby);
}

#[test]
fn update_replaces_fields_and_keeps_id() {
    let repo = repo();
    let id = repo.save(&input("Ivan Petrov", Some("chess"))).unwrap();

    let replacement = PersonInput::new("Ivan Petrov", 31, "ivan@example.org", Some("go"));
    repo.update(id, &replacement).unwrap();

    let loaded = repo.find_by_id(id).unwrap().unwrap();
    assert_eq!(loaded, Person::from_input(id, replacement));
}

#[test]
fn update_can_clear_hobby() {
    let repo = repo();
    let id = repo.save(&input("Ivan Petrov", Some("chess"))).unwrap();

    repo.update(id, &input("Ivan Petrov", None)).unwrap();
    assert_eq!(repo.find_by_id(id).unwrap().unwrap().hobby, None);
}

#[test]
fn update_not_found_returns_not_found() {
    let repo = repo();

    let err = repo.update(42, &input("Ivan Petrov", None)).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(42)));
}

#[test]
fn delete_is_idempotent() {
    let repo = repo();
    let id = repo.save(&input("Ivan Petrov", None)).unwrap();

    assert!(repo.delete(id).unwrap());
    assert!(!repo.delete(id).unwrap());
    assert!(repo.find_by_id(id).unwrap().is_none());
}

#[test]
fn validation_failure_blocks_save_and_update() {
    let repo = repo();

    let invalid = PersonInput::new("", 0, "not-an-email", None);
    let save_err = repo.save(&invalid).unwrap_err();
    assert!(matches!(save_err, RepoError::Validation(_)));
    assert!(repo.find_all().unwrap().is_empty());

    let id = repo.save(&input("Ivan Petrov", Some("chess"))).unwrap();
    let update_err = repo.update(id, &invalid).unwrap_err();
    assert!(matches!(update_err, RepoError::Validation(_)));

    let unchanged = repo.find_by_id(id).unwrap().unwrap();
    assert_eq!(unchanged.full_name, "Ivan Petrov");
}
