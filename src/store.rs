use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use tracing::debug;

use crate::{
    entities::movie,
    error::{AppError, AppResult},
    models::NewMovie,
    ranking,
};

/// The persisted movie list. Every write commits before returning.
#[derive(Clone)]
pub struct MovieStore {
    db: DatabaseConnection,
}

impl MovieStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Returns every movie sorted ascending by rating, after recomputing and
    /// persisting each movie's ranking.
    pub async fn list_all(&self) -> AppResult<Vec<movie::Model>> {
        let txn = self.db.begin().await?;

        let mut movies =
            movie::Entity::find().order_by_asc(movie::Column::Id).all(&txn).await?;
        let changed = ranking::rerank(&mut movies);

        for (id, rank) in &changed {
            let active = movie::ActiveModel {
                id: Set(*id),
                ranking: Set(Some(*rank)),
                ..Default::default()
            };
            movie::Entity::update(active).exec(&txn).await?;
        }

        txn.commit().await?;
        debug!(count = movies.len(), changed = changed.len(), "rankings recomputed");

        Ok(movies)
    }

    pub async fn get(&self, id: i32) -> AppResult<Option<movie::Model>> {
        Ok(movie::Entity::find_by_id(id).one(&self.db).await?)
    }

    /// First stored movie (lowest id) with exactly this title.
    pub async fn find_by_title(&self, title: &str) -> AppResult<Option<movie::Model>> {
        let movie = movie::Entity::find()
            .filter(movie::Column::Title.eq(title))
            .order_by_asc(movie::Column::Id)
            .one(&self.db)
            .await?;
        Ok(movie)
    }

    pub async fn insert(&self, new: NewMovie) -> AppResult<movie::Model> {
        let model = movie::ActiveModel {
            id: Default::default(),
            title: Set(new.title),
            year: Set(new.year),
            release_date: Set(new.release_date),
            description: Set(new.description),
            rating: Set(new.rating),
            ranking: Set(None),
            review: Set(None),
            img_url: Set(new.img_url),
        };

        let movie = model.insert(&self.db).await?;
        debug!(movie_id = movie.id, title = %movie.title, "movie stored");
        Ok(movie)
    }

    pub async fn update_review(
        &self,
        id: i32,
        rating: f64,
        review: String,
    ) -> AppResult<movie::Model> {
        let movie = self.get(id).await?.ok_or_else(|| AppError::movie_not_found(id))?;

        let mut active = movie.into_active_model();
        active.rating = Set(rating);
        active.review = Set(Some(review));

        Ok(active.update(&self.db).await?)
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let res = movie::Entity::delete_by_id(id).exec(&self.db).await?;
        if res.rows_affected == 0 {
            return Err(AppError::movie_not_found(id));
        }
        debug!(movie_id = id, "movie deleted");
        Ok(())
    }
}
