use crate::clustering::distance::distance_km;
use common_types::{Coordinates, PhotoLocation};
use std::collections::BTreeMap;

pub const DEFAULT_CLUSTER_RADIUS_KM: f64 = 1.0;

/// Splits photos into groups of indices using a single greedy pass in input order.
///
/// The first unconsumed photo becomes a seed and claims every later unconsumed photo within
/// `radius_km` of *the seed*. Membership is not transitive: two members can be further apart
/// than `radius_km`, and a photo claimed by an earlier seed never moves to a closer later one.
/// Each group lists its seed first, followed by the other members in input order. Groups are
/// returned in seed order.
#[must_use]
pub fn partition_by_seed(photos: &[PhotoLocation], radius_km: f64) -> Vec<Vec<usize>> {
    let mut consumed = vec![false; photos.len()];
    let mut groups = Vec::new();

    for (i, seed) in photos.iter().enumerate() {
        if consumed[i] {
            continue;
        }
        consumed[i] = true;
        let mut members = vec![i];

        for (j, candidate) in photos.iter().enumerate().skip(i + 1) {
            if consumed[j] {
                continue;
            }
            let distance = distance_km(
                seed.latitude,
                seed.longitude,
                candidate.latitude,
                candidate.longitude,
            );
            // NaN (malformed coordinates) never passes this check.
            if distance <= radius_km {
                consumed[j] = true;
                members.push(j);
            }
        }

        groups.push(members);
    }

    groups
}

/// Planar mean of the raw latitude and longitude values.
///
/// Good enough for clusters spanning a few kilometers; not meaningful across the antimeridian.
#[must_use]
pub fn centroid(photos: &[&PhotoLocation]) -> Coordinates {
    let count = photos.len() as f64;
    let latitude = photos.iter().map(|p| p.latitude).sum::<f64>() / count;
    let longitude = photos.iter().map(|p| p.longitude).sum::<f64>() / count;
    Coordinates {
        latitude,
        longitude,
    }
}

/// Key for a photo group, based on its first member's coordinates rounded to 4 decimals.
#[must_use]
pub fn group_key(latitude: f64, longitude: f64) -> String {
    format!("{latitude:.4}_{longitude:.4}")
}

/// Same partition as the clustering engine, without geocoding or sorting.
///
/// Groups are keyed by [`group_key`] of their seed. When two seeds round to the same key (only
/// possible for radii of a few meters) the later group gets a `#2`, `#3`, ... suffix so no photo
/// is lost. Members keep their input order.
#[must_use]
pub fn group_within_radius(
    photos: &[PhotoLocation],
    radius_km: f64,
) -> BTreeMap<String, Vec<PhotoLocation>> {
    let mut groups = BTreeMap::new();

    for members in partition_by_seed(photos, radius_km) {
        let Some(&seed_index) = members.first() else {
            continue;
        };
        let seed = &photos[seed_index];
        let base_key = group_key(seed.latitude, seed.longitude);

        let mut key = base_key.clone();
        let mut suffix = 1;
        while groups.contains_key(&key) {
            suffix += 1;
            key = format!("{base_key}#{suffix}");
        }

        let group: Vec<PhotoLocation> = members.iter().map(|&i| photos[i].clone()).collect();
        groups.insert(key, group);
    }

    groups
}
