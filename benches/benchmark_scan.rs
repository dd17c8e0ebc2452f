use criterion::{criterion_group, criterion_main, Criterion};
use portsweep::{report, scanner, target::ScanTarget};
use std::hint::black_box;
use std::net::TcpListener;
use std::thread;
use std::time::Duration;

/// Binds a listener whose accepted connections are dropped straight away,
/// so its backlog never fills up across iterations.
fn draining_listener() -> u32 {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = u32::from(listener.local_addr().unwrap().port());
    thread::spawn(move || {
        for stream in listener.incoming() {
            drop(stream);
        }
    });
    port
}

fn bench_local_scan(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();

    let mut ports: Vec<u32> = (0..16).map(|_| draining_listener()).collect();
    // Low ports are almost always closed on a development machine.
    ports.extend(1..=500);

    let mut group = c.benchmark_group("localhost scan");
    group.measurement_time(Duration::from_secs(10));
    group.sample_size(20);

    group.bench_function("516 ports", |b| {
        b.iter(|| {
            let mut target = ScanTarget::new("127.0.0.1", black_box(ports.clone()))
                .with_timeout(Duration::from_millis(200));
            runtime.block_on(scanner::scan(&mut target));
            report::format(&target).unwrap()
        });
    });

    group.finish();
}

criterion_group!(benches, bench_local_scan);
criterion_main!(benches);
