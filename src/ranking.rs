use crate::entities::movie;

/// Orders `movies` ascending by rating and numbers them so the best rated
/// movie ranks `N` and the worst ranks `1`.
///
/// The sort is stable: movies with equal ratings keep their incoming order.
/// Returns the `(id, ranking)` pairs whose ranking changed.
pub fn rerank(movies: &mut [movie::Model]) -> Vec<(i32, i32)> {
    movies.sort_by(|a, b| a.rating.total_cmp(&b.rating));

    let mut changed = Vec::new();
    for (i, movie) in movies.iter_mut().enumerate() {
        let rank = i as i32 + 1;
        if movie.ranking != Some(rank) {
            movie.ranking = Some(rank);
            changed.push((movie.id, rank));
        }
    }
    changed
}
