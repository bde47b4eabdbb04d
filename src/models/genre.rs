use std::collections::HashMap;

use crate::models::MovieRecord;

/// The fixed TMDB movie genre catalog
///
/// Genre identifiers on a record are only ever interpreted against this table.
pub const GENRES: [(u64, &str); 19] = [
    (28, "Action"),
    (12, "Adventure"),
    (16, "Animation"),
    (35, "Comedy"),
    (80, "Crime"),
    (99, "Documentary"),
    (18, "Drama"),
    (10751, "Family"),
    (14, "Fantasy"),
    (36, "History"),
    (27, "Horror"),
    (10402, "Music"),
    (9648, "Mystery"),
    (10749, "Romance"),
    (878, "Science Fiction"),
    (10770, "TV Movie"),
    (53, "Thriller"),
    (10752, "War"),
    (37, "Western"),
];

/// Look up a genre identifier by name, case-insensitively
pub fn id_for_name(name: &str) -> Option<u64> {
    let needle = name.trim();
    if needle.is_empty() {
        return None;
    }
    GENRES
        .iter()
        .find(|(_, n)| n.eq_ignore_ascii_case(needle))
        .map(|(id, _)| *id)
}

/// Look up the display name for a genre identifier
pub fn name_for_id(id: u64) -> Option<&'static str> {
    GENRES.iter().find(|(gid, _)| *gid == id).map(|(_, n)| *n)
}

/// Most frequent genre identifier across the given records
///
/// Ties are broken towards the lowest genre identifier so repeated calls over
/// the same records always agree.
pub fn dominant_genre(records: &[MovieRecord]) -> Option<u64> {
    let mut counts: HashMap<u64, usize> = HashMap::new();
    for record in records {
        for gid in &record.genre_ids {
            *counts.entry(*gid).or_insert(0) += 1;
        }
    }

    counts
        .into_iter()
        .max_by(|(id_a, count_a), (id_b, count_b)| {
            count_a.cmp(count_b).then_with(|| id_b.cmp(id_a))
        })
        .map(|(id, _)| id)
}
