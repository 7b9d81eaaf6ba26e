//! Integration tests for the Diesel user and painting repositories against
//! embedded PostgreSQL.
//!
//! Each test gets its own database with the embedded migrations applied. The
//! fixture is synchronous and owns a Tokio runtime, so cluster bootstrap never
//! runs inside an async context.

use chrono::{TimeZone, Utc};
use diesel::prelude::*;
use diesel::sql_types::BigInt;
use pg_embedded_setup_unpriv::TemporaryDatabase;
use rstest::{fixture, rstest};
use tokio::runtime::Runtime;

use paintapp::domain::ports::{
    PaintingPersistenceError, PaintingRepository, SeedingResult, UserRepository,
};
use paintapp::domain::{NewPainting, PaintingId, ShapesData, User, UserId, default_users};
use paintapp::outbound::persistence::{
    DbPool, DieselPaintingRepository, DieselUserRepository, PoolConfig, run_pending_migrations,
};

mod support;

use support::{handle_cluster_setup_failure, provision_migrated_database};

struct TestContext {
    runtime: Runtime,
    users: DieselUserRepository,
    paintings: DieselPaintingRepository,
    database_url: String,
    applied_migrations: usize,
    _database: TemporaryDatabase,
}

fn setup_context() -> Result<TestContext, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let (database, applied_migrations) = provision_migrated_database(&runtime)?;
    let database_url = database.url().to_string();

    let config = PoolConfig::new(database_url.as_str())
        .with_max_size(4)
        .with_min_idle(Some(1));
    let pool = runtime
        .block_on(DbPool::new(config))
        .map_err(|err| err.to_string())?;

    Ok(TestContext {
        runtime,
        users: DieselUserRepository::new(pool.clone()),
        paintings: DieselPaintingRepository::new(pool),
        database_url,
        applied_migrations,
        _database: database,
    })
}

#[fixture]
fn db() -> Option<TestContext> {
    match setup_context() {
        Ok(ctx) => Some(ctx),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

fn seeded(ctx: &TestContext) {
    let users = default_users().expect("valid defaults");
    let result = ctx
        .runtime
        .block_on(ctx.users.insert_if_empty(&users))
        .expect("seed");
    assert_eq!(result, SeedingResult::Applied);
}

fn owner(id: i64) -> User {
    User::try_from_parts(id, format!("default{id}"), format!("User{id}")).expect("valid user")
}

fn new_painting(user: User, title: &str, shapes: &str) -> NewPainting {
    NewPainting {
        user,
        title: title.to_owned(),
        shapes_data: ShapesData::new(shapes),
        created_at: Utc
            .with_ymd_and_hms(2025, 3, 14, 9, 26, 53)
            .single()
            .expect("valid timestamp"),
    }
}

#[derive(QueryableByName)]
struct RowCount {
    #[diesel(sql_type = BigInt)]
    count: i64,
}

/// Count painting rows for `user_id` straight from the table.
fn painting_rows_for(url: &str, user_id: i64) -> i64 {
    let mut conn = PgConnection::establish(url).expect("direct connection");
    diesel::sql_query("SELECT COUNT(*) AS count FROM paintings WHERE user_id = $1")
        .bind::<BigInt, _>(user_id)
        .get_result::<RowCount>(&mut conn)
        .expect("count query")
        .count
}

#[rstest]
fn migrations_apply_once(db: Option<TestContext>) {
    let Some(ctx) = db else {
        eprintln!("SKIP-TEST-CLUSTER: migrations_apply_once skipped");
        return;
    };

    assert_eq!(ctx.applied_migrations, 2);
    let rerun = ctx
        .runtime
        .block_on(run_pending_migrations(&ctx.database_url))
        .expect("rerun migrations");
    assert_eq!(rerun, 0);
}

#[rstest]
fn seeding_twice_leaves_three_users(db: Option<TestContext>) {
    let Some(ctx) = db else {
        eprintln!("SKIP-TEST-CLUSTER: seeding_twice_leaves_three_users skipped");
        return;
    };
    let defaults = default_users().expect("valid defaults");

    seeded(&ctx);
    let second = ctx
        .runtime
        .block_on(ctx.users.insert_if_empty(&defaults))
        .expect("second seed");
    let listed = ctx.runtime.block_on(ctx.users.list_all()).expect("list");

    assert_eq!(second, SeedingResult::AlreadySeeded);
    assert_eq!(listed, defaults);
}

#[rstest]
fn seeding_skips_when_a_non_default_user_exists(db: Option<TestContext>) {
    let Some(ctx) = db else {
        eprintln!("SKIP-TEST-CLUSTER: seeding_skips_when_a_non_default_user_exists skipped");
        return;
    };
    let outsider = User::try_from_parts(42, "painter", "Painter").expect("valid user");
    ctx.runtime
        .block_on(ctx.users.insert_if_empty(std::slice::from_ref(&outsider)))
        .expect("insert outsider");

    let result = ctx
        .runtime
        .block_on(ctx.users.insert_if_empty(&default_users().expect("valid defaults")))
        .expect("seed call");
    let listed = ctx.runtime.block_on(ctx.users.list_all()).expect("list");

    assert_eq!(result, SeedingResult::AlreadySeeded);
    assert_eq!(listed, vec![outsider]);
}

#[rstest]
fn find_by_id_reads_a_seeded_user(db: Option<TestContext>) {
    let Some(ctx) = db else {
        eprintln!("SKIP-TEST-CLUSTER: find_by_id_reads_a_seeded_user skipped");
        return;
    };
    seeded(&ctx);

    let found = ctx
        .runtime
        .block_on(ctx.users.find_by_id(&UserId::new(2)))
        .expect("lookup");
    let missing = ctx
        .runtime
        .block_on(ctx.users.find_by_id(&UserId::new(99)))
        .expect("lookup");

    assert_eq!(found, Some(owner(2)));
    assert_eq!(missing, None);
}

#[rstest]
fn saving_twice_leaves_one_row(db: Option<TestContext>) {
    let Some(ctx) = db else {
        eprintln!("SKIP-TEST-CLUSTER: saving_twice_leaves_one_row skipped");
        return;
    };
    seeded(&ctx);

    let first = ctx
        .runtime
        .block_on(ctx.paintings.replace_for_user(new_painting(owner(1), "Draft", "[1]")))
        .expect("first save");
    let second = ctx
        .runtime
        .block_on(ctx.paintings.replace_for_user(new_painting(owner(1), "Final", "[2]")))
        .expect("second save");

    assert_ne!(first.id(), second.id());
    assert_eq!(painting_rows_for(&ctx.database_url, 1), 1);

    let current = ctx
        .runtime
        .block_on(ctx.paintings.find_by_user(&UserId::new(1)))
        .expect("lookup");
    assert_eq!(current, Some(second.clone()));
    assert_eq!(second.title(), "Final");
    assert_eq!(second.shapes_data().as_str(), "[2]");
    assert_eq!(second.user(), &owner(1));

    let stale = ctx
        .runtime
        .block_on(ctx.paintings.find_by_id(&first.id()))
        .expect("lookup");
    assert_eq!(stale, None);
}

#[rstest]
fn concurrent_saves_for_one_user_leave_one_row(db: Option<TestContext>) {
    let Some(ctx) = db else {
        eprintln!("SKIP-TEST-CLUSTER: concurrent_saves_for_one_user_leave_one_row skipped");
        return;
    };
    seeded(&ctx);

    let outcomes = ctx.runtime.block_on(async {
        let tasks: Vec<_> = (0..6)
            .map(|n| {
                let repo = ctx.paintings.clone();
                tokio::spawn(async move {
                    repo.replace_for_user(new_painting(owner(3), &format!("take {n}"), "[]"))
                        .await
                })
            })
            .collect();
        let mut outcomes = Vec::new();
        for task in tasks {
            outcomes.push(task.await.expect("task joins"));
        }
        outcomes
    });

    assert!(outcomes.iter().all(Result::is_ok), "{outcomes:?}");
    assert_eq!(painting_rows_for(&ctx.database_url, 3), 1);
}

#[rstest]
fn saving_for_a_missing_owner_is_a_conflict(db: Option<TestContext>) {
    let Some(ctx) = db else {
        eprintln!("SKIP-TEST-CLUSTER: saving_for_a_missing_owner_is_a_conflict skipped");
        return;
    };
    seeded(&ctx);

    let err = ctx
        .runtime
        .block_on(ctx.paintings.replace_for_user(new_painting(owner(77), "Orphan", "[]")))
        .expect_err("foreign key rejects the row");

    assert!(
        matches!(err, PaintingPersistenceError::Conflict { .. }),
        "unexpected error: {err:?}"
    );
    assert_eq!(painting_rows_for(&ctx.database_url, 77), 0);
}

#[rstest]
fn unknown_painting_id_is_none(db: Option<TestContext>) {
    let Some(ctx) = db else {
        eprintln!("SKIP-TEST-CLUSTER: unknown_painting_id_is_none skipped");
        return;
    };
    seeded(&ctx);

    let found = ctx
        .runtime
        .block_on(ctx.paintings.find_by_id(&PaintingId::new(4242)))
        .expect("lookup");
    let for_user = ctx
        .runtime
        .block_on(ctx.paintings.find_by_user(&UserId::new(2)))
        .expect("lookup");

    assert_eq!(found, None);
    assert_eq!(for_user, None);
}
