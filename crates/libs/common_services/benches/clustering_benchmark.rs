use chrono::{DateTime, Utc};
use common_services::clustering::{PhotoClusterer, group_within_radius, partition_by_seed};
use common_services::geocoding::OfflineGeocoder;
use common_types::PhotoLocation;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

/// A trip's worth of photos spread over a ~20 km area.
fn sample_photos(count: usize) -> Vec<PhotoLocation> {
    let mut rng = fastrand::Rng::with_seed(2024);
    (0..count)
        .map(|i| PhotoLocation {
            id: format!("photo-{i}"),
            latitude: 45.4642 + (rng.f64() - 0.5) * 0.2,
            longitude: 9.19 + (rng.f64() - 0.5) * 0.2,
            timestamp: DateTime::<Utc>::from_timestamp(1_690_000_000 + i as i64 * 60, 0)
                .expect("timestamp"),
            filename: format!("IMG_{i:04}.jpg"),
            mime_type: "image/jpeg".to_string(),
        })
        .collect()
}

fn bench_partition(c: &mut Criterion) {
    let mut group = c.benchmark_group("partition_by_seed");
    for count in [100, 500, 2000] {
        let photos = sample_photos(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &photos, |b, photos| {
            b.iter(|| partition_by_seed(black_box(photos), 1.0));
        });
    }
    group.finish();

    let photos = sample_photos(500);
    c.bench_function("group_within_radius_500", |b| {
        b.iter(|| group_within_radius(black_box(&photos), 1.0));
    });
}

fn bench_cluster(c: &mut Criterion) {
    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("tokio runtime");
    let photos = sample_photos(500);
    let clusterer = PhotoClusterer::with_geocoder(OfflineGeocoder).build();

    c.bench_function("cluster_500_offline", |b| {
        b.to_async(&rt).iter(|| async {
            black_box(clusterer.cluster(&photos).await);
        });
    });
}

criterion_group!(benches, bench_partition, bench_cluster);
criterion_main!(benches);
