use std::sync::{Arc, Mutex};

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use kv_rs::mvcc::{Connection, Database, IsolationLevel};

fn disjoint_commits(n: u64) {
    let db = Arc::new(Mutex::new(Database::new(IsolationLevel::Serializable)));
    let mut conns: Vec<Connection> = (0..n).map(|_| Connection::new(db.clone())).collect();

    for (i, c) in conns.iter_mut().enumerate() {
        c.begin();
        c.set(format!("key-{i}").into_bytes(), b"value".to_vec());
    }
    for c in conns.iter_mut() {
        black_box(c.commit().unwrap());
    }
}

fn contended_commits(n: u64) {
    let db = Arc::new(Mutex::new(Database::new(IsolationLevel::Snapshot)));
    let mut conns: Vec<Connection> = (0..n).map(|_| Connection::new(db.clone())).collect();

    for c in conns.iter_mut() {
        c.begin();
        c.set(b"hot-key", b"value");
    }
    for c in conns.iter_mut() {
        let _ = black_box(c.commit());
    }
}

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("commit 100 disjoint-key serializable transactions", |b| {
        b.iter(|| disjoint_commits(black_box(100)))
    });
    c.bench_function("commit 100 same-key snapshot transactions", |b| {
        b.iter(|| contended_commits(black_box(100)))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
