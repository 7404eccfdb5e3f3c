use criterion::{criterion_group, criterion_main, Criterion};
use std::sync::Arc;

use models::Collection;
use service::auth::domain::LoginInput;
use service::auth::repository::StaticCredentialRepository;
use service::auth::{AuthConfig, AuthService};
use service::storage::{Filter, FindMany, MockDb};

fn bench_login(c: &mut Criterion) {
    let repo = Arc::new(StaticCredentialRepository::new("bench", "Benchmark1").unwrap());
    let svc = AuthService::new(repo, AuthConfig::new("secret", 8));
    let rt = tokio::runtime::Runtime::new().unwrap();

    c.bench_function("auth_login_verify", |b| {
        b.iter(|| {
            let session = rt
                .block_on(svc.login(LoginInput { username: "bench".into(), password: "Benchmark1".into() }))
                .unwrap();
            svc.authorize_admin(Some(&session.token)).unwrap();
        });
    });
}

fn bench_find_many(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let db = MockDb::seeded();
    let query = FindMany { filter: Some(Filter::eq("category", "wedding")), limit: Some(10), offset: None };

    c.bench_function("mock_db_find_many", |b| {
        b.iter(|| rt.block_on(db.find_many(Collection::GalleryItems, &query)));
    });
}

criterion_group!(benches, bench_login, bench_find_many);
criterion_main!(benches);
