use personbook_core::{
    IdSequence, InMemoryPersonRepository, Person, PersonRepository, RepoError,
};

#[test]
fn create_assigns_sequential_ids_starting_at_one() {
    let repo = InMemoryPersonRepository::new();

    let mut ana = Person::new("Ana", "Lee").unwrap();
    let mut bo = Person::new("Bo", "Dale").unwrap();

    assert_eq!(repo.create(&mut ana).unwrap(), 1);
    assert_eq!(repo.create(&mut bo).unwrap(), 2);
    assert_eq!(ana.id(), 1);
    assert_eq!(bo.id(), 2);
}

#[test]
fn caller_supplied_sequence_controls_id_allocation() {
    let repo = InMemoryPersonRepository::with_sequence(IdSequence::starting_at(100));

    let mut person = Person::new("Ana", "Lee").unwrap();
    assert_eq!(repo.create(&mut person).unwrap(), 100);
}

#[test]
fn duplicate_name_pair_is_rejected_with_conflict() {
    let repo = InMemoryPersonRepository::new();

    let mut first = Person::new("Ana", "Lee").unwrap();
    repo.create(&mut first).unwrap();

    let mut duplicate = Person::new("Ana", "Lee").unwrap();
    let err = repo.create(&mut duplicate).unwrap_err();
    assert!(matches!(err, RepoError::Conflict { .. }));
    assert_eq!(repo.len(), 1);
}

#[test]
fn find_by_name_matches_first_or_last_name() {
    let repo = InMemoryPersonRepository::new();

    let mut ana_lee = Person::new("Ana", "Lee").unwrap();
    let mut bo_ana = Person::new("Bo", "Ana").unwrap();
    repo.create(&mut ana_lee).unwrap();
    repo.create(&mut bo_ana).unwrap();

    let hits = repo.find_by_name("Ana").unwrap();
    assert_eq!(hits.len(), 2);
    assert!(repo.find_by_name("Zoe").unwrap().is_empty());
}

#[test]
fn update_and_delete_report_not_found_for_missing_ids() {
    let repo = InMemoryPersonRepository::new();

    let ghost = Person::with_id(9, "Bo", "Dale").unwrap();
    assert!(matches!(
        repo.update(&ghost).unwrap_err(),
        RepoError::NotFound(9)
    ));
    assert!(matches!(
        repo.delete(9).unwrap_err(),
        RepoError::NotFound(9)
    ));
}

#[test]
fn update_onto_existing_name_pair_is_a_conflict() {
    let repo = InMemoryPersonRepository::new();

    let mut ana = Person::new("Ana", "Lee").unwrap();
    let mut bo = Person::new("Bo", "Dale").unwrap();
    repo.create(&mut ana).unwrap();
    repo.create(&mut bo).unwrap();

    bo.set_first_name("Ana").unwrap();
    bo.set_last_name("Lee").unwrap();
    let err = repo.update(&bo).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Conflict { first_name, last_name }
            if first_name == "Ana" && last_name == "Lee"
    ));

    // The stored entity is untouched and no duplicate pair exists.
    assert_eq!(repo.find_by_name("Ana").unwrap().len(), 1);
    assert_eq!(
        repo.find_by_id(bo.id()).unwrap().unwrap().first_name(),
        "Bo"
    );
}

#[test]
fn update_keeping_own_name_pair_is_not_a_conflict() {
    let repo = InMemoryPersonRepository::new();

    let mut person = Person::new("Ana", "Lee").unwrap();
    repo.create(&mut person).unwrap();

    // Same names, same id: the uniqueness rule only guards other entities.
    repo.update(&person).unwrap();
    assert_eq!(repo.len(), 1);
}

#[test]
fn update_replaces_stored_entity() {
    let repo = InMemoryPersonRepository::new();

    let mut person = Person::new("Ana", "Lee").unwrap();
    repo.create(&mut person).unwrap();

    person.set_last_name("Leigh").unwrap();
    repo.update(&person).unwrap();

    let loaded = repo.find_by_id(person.id()).unwrap().unwrap();
    assert_eq!(loaded.last_name(), "Leigh");
}

#[test]
fn delete_removes_entity_from_all_reads() {
    let repo = InMemoryPersonRepository::new();

    let mut person = Person::new("Ana", "Lee").unwrap();
    repo.create(&mut person).unwrap();
    repo.delete(person.id()).unwrap();

    assert!(repo.is_empty());
    assert!(repo.find_by_id(person.id()).unwrap().is_none());
    assert!(repo.find_by_name("Ana").unwrap().is_empty());
    assert!(!repo.exists_by_id(person.id()).unwrap());
}

#[test]
fn persist_appends_entity_unchanged() {
    let repo = InMemoryPersonRepository::new();

    let person = Person::with_id(7, "Ana", "Lee").unwrap();
    let returned = repo.persist(person.clone());

    assert_eq!(returned, person);
    assert_eq!(repo.find_by_id(7).unwrap().unwrap(), person);
    // No duplicate rule on the persist path.
    repo.persist(person.clone());
    assert_eq!(repo.len(), 2);
}

#[test]
fn sqlite_and_memory_repositories_share_one_contract() {
    fn exercise(repo: &dyn PersonRepository) -> usize {
        let mut ana = Person::new("Ana", "Lee").unwrap();
        let mut bo = Person::new("Bo", "Ana").unwrap();
        repo.create(&mut ana).unwrap();
        repo.create(&mut bo).unwrap();

        // Renaming onto a taken pair must conflict in every implementation.
        bo.set_first_name("Ana").unwrap();
        bo.set_last_name("Lee").unwrap();
        assert!(matches!(
            repo.update(&bo).unwrap_err(),
            RepoError::Conflict { .. }
        ));

        repo.find_by_name("Ana").unwrap().len()
    }

    let memory = InMemoryPersonRepository::new();
    assert_eq!(exercise(&memory), 2);

    let conn = personbook_core::db::open_db_in_memory().unwrap();
    let sqlite = personbook_core::SqlitePersonRepository::try_new(&conn).unwrap();
    assert_eq!(exercise(&sqlite), 2);
}
