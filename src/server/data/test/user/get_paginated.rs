use super::*;

/// Tests paginating users newest first.
///
/// Expected: second page holds the oldest user, total counts all users
#[tokio::test]
async fn paginates_newest_first() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let oldest = factory::create_learner(db).await?;
    factory::create_learner(db).await?;
    let newest = factory::create_learner(db).await?;

    let repo = UserRepository::new(db);
    let (first_page, total) = repo.get_paginated(&UserFilter::default(), 0, 2).await?;
    let (second_page, _) = repo.get_paginated(&UserFilter::default(), 1, 2).await?;

    assert_eq!(total, 3);
    assert_eq!(first_page.len(), 2);
    assert_eq!(first_page[0].id, newest.id);
    assert_eq!(second_page.len(), 1);
    assert_eq!(second_page[0].id, oldest.id);

    Ok(())
}

/// Tests filtering by role and by name or email search.
///
/// Expected: only matching users are returned
#[tokio::test]
async fn filters_by_role_and_search() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::user::UserFactory::new(db)
        .name("Grace Hopper")
        .email("grace@navy.example")
        .role("instructor")
        .build()
        .await?;
    factory::user::UserFactory::new(db)
        .name("Alan")
        .email("alan@example.com")
        .build()
        .await?;

    let repo = UserRepository::new(db);

    let (instructors, total) = repo
        .get_paginated(
            &UserFilter {
                role: Some(Role::Instructor),
                search: None,
            },
            0,
            10,
        )
        .await?;
    assert_eq!(total, 1);
    assert_eq!(instructors[0].name, "Grace Hopper");

    let (by_email, _) = repo
        .get_paginated(
            &UserFilter {
                role: None,
                search: Some("navy".to_string()),
            },
            0,
            10,
        )
        .await?;
    assert_eq!(by_email.len(), 1);
    assert_eq!(by_email[0].email, "grace@navy.example");

    let (by_name, _) = repo
        .get_paginated(
            &UserFilter {
                role: None,
                search: Some("ALAN".to_string()),
            },
            0,
            10,
        )
        .await?;
    assert_eq!(by_name.len(), 1);

    Ok(())
}
