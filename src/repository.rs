use std::collections::HashMap;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    ModelTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, QueryTrait, Set,
    TransactionTrait,
};
use tracing::debug;

use crate::{
    entities::{actor, movie, rating, role},
    error::{AppError, AppResult},
    models::{ActorForm, CastMember, MovieDetails, MovieForm, required},
};

/// All reads and writes against the catalog tables go through here.
#[derive(Clone)]
pub struct MovieRepository {
    db: DatabaseConnection,
}

impl MovieRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Every movie ordered by id, with its rating and cast attached.
    ///
    /// Runs three queries regardless of catalog size: movies joined to
    /// ratings, the roles of those movies, then the actors of those roles.
    pub async fn list_movies_with_relations(&self) -> AppResult<Vec<MovieDetails>> {
        let movies = movie::Entity::find()
            .find_also_related(rating::Entity)
            .order_by_asc(movie::Column::Id)
            .all(&self.db)
            .await?;

        if movies.is_empty() {
            return Ok(Vec::new());
        }

        // No bound id lists here: a catalog can outgrow the store's
        // bind-parameter limit.
        let roles = role::Entity::find()
            .filter(
                role::Column::MovieId.in_subquery(
                    movie::Entity::find()
                        .select_only()
                        .column(movie::Column::Id)
                        .into_query(),
                ),
            )
            .order_by_asc(role::Column::Id)
            .all(&self.db)
            .await?;

        let actors: HashMap<i32, actor::Model> = actor::Entity::find()
            .filter(
                actor::Column::Id.in_subquery(
                    role::Entity::find()
                        .select_only()
                        .column(role::Column::ActorId)
                        .into_query(),
                ),
            )
            .all(&self.db)
            .await?
            .into_iter()
            .map(|a| (a.id, a))
            .collect();

        let mut cast_by_movie: HashMap<i32, Vec<CastMember>> = HashMap::new();
        for role in roles {
            let Some(actor) = actors.get(&role.actor_id).cloned() else {
                return Err(DbErr::RecordNotFound(format!(
                    "actor {} referenced by role {}",
                    role.actor_id, role.id
                ))
                .into());
            };
            cast_by_movie.entry(role.movie_id).or_default().push(CastMember { role, actor });
        }

        debug!(movies = movies.len(), "loaded movies with relations");

        Ok(movies
            .into_iter()
            .map(|(movie, rating)| {
                let cast = cast_by_movie.remove(&movie.id).unwrap_or_default();
                MovieDetails { movie, rating, cast }
            })
            .collect())
    }

    pub async fn count_movies(&self) -> AppResult<u64> {
        Ok(movie::Entity::find().count(&self.db).await?)
    }

    pub async fn create_movie(&self, form: &MovieForm) -> AppResult<i32> {
        let new = form.validate()?;
        let model = movie::ActiveModel {
            id: Default::default(),
            title: Set(new.title),
            primary_director: Set(new.primary_director),
            year_released: Set(new.year_released),
            genre: Set(new.genre),
            rating_id: Set(Some(new.rating_id)),
        };

        let movie_id = movie::Entity::insert(model).exec(&self.db).await?.last_insert_id;
        debug!(movie_id, rating_id = new.rating_id, "created movie");
        Ok(movie_id)
    }

    /// Exact, case-sensitive title match. Duplicate titles resolve to the
    /// lowest id.
    pub async fn find_movie_by_title(&self, title: &str) -> AppResult<Option<movie::Model>> {
        Ok(movie::Entity::find()
            .filter(movie::Column::Title.eq(title))
            .order_by_asc(movie::Column::Id)
            .one(&self.db)
            .await?)
    }

    pub async fn update_movie_title(
        &self,
        movie: &movie::Model,
        new_title: &str,
    ) -> AppResult<movie::Model> {
        let new_title = required("title", new_title)?;
        let mut active = movie.clone().into_active_model();
        active.title = Set(new_title);

        let updated = active.update(&self.db).await?;
        debug!(movie_id = updated.id, "updated movie title");
        Ok(updated)
    }

    /// Roles of the movie go with it through the store's cascade rule.
    pub async fn delete_movie(&self, movie: &movie::Model) -> AppResult<u64> {
        let res = movie::Entity::delete_by_id(movie.id).exec(&self.db).await?;
        debug!(movie_id = movie.id, rows = res.rows_affected, "deleted movie");
        Ok(res.rows_affected)
    }

    pub async fn list_ratings(&self) -> AppResult<Vec<rating::Model>> {
        Ok(rating::Entity::find().order_by_asc(rating::Column::Id).all(&self.db).await?)
    }

    pub async fn create_rating(&self, description: &str) -> AppResult<i32> {
        let model = rating::ActiveModel {
            id: Default::default(),
            description: Set(required("description", description)?),
        };

        let rating_id = rating::Entity::insert(model).exec(&self.db).await?.last_insert_id;
        debug!(rating_id, "created rating");
        Ok(rating_id)
    }

    /// Refuses to remove a rating that any movie still points at. Returns
    /// whether a row was removed.
    pub async fn delete_rating(&self, rating_id: i32) -> AppResult<bool> {
        let txn = self.db.begin().await?;

        let movies = movie::Entity::find()
            .filter(movie::Column::RatingId.eq(rating_id))
            .count(&txn)
            .await?;
        if movies > 0 {
            txn.rollback().await?;
            return Err(AppError::RatingInUse { rating_id, movies });
        }

        let res = rating::Entity::delete_by_id(rating_id).exec(&txn).await?;
        txn.commit().await?;

        debug!(rating_id, rows = res.rows_affected, "deleted rating");
        Ok(res.rows_affected > 0)
    }

    pub async fn create_actor(&self, form: &ActorForm) -> AppResult<i32> {
        let new = form.validate()?;
        let model = actor::ActiveModel {
            id: Default::default(),
            full_name: Set(new.full_name),
            birthday: Set(new.birthday.to_string()),
            screen_actors_guild_member: Set(new.screen_actors_guild_member),
        };

        let actor_id = actor::Entity::insert(model).exec(&self.db).await?.last_insert_id;
        debug!(actor_id, "created actor");
        Ok(actor_id)
    }

    pub async fn delete_actor(&self, actor_id: i32) -> AppResult<u64> {
        let res = actor::Entity::delete_by_id(actor_id).exec(&self.db).await?;
        debug!(actor_id, rows = res.rows_affected, "deleted actor");
        Ok(res.rows_affected)
    }

    pub async fn create_role(
        &self,
        character_name: &str,
        movie_id: i32,
        actor_id: i32,
    ) -> AppResult<i32> {
        let model = role::ActiveModel {
            id: Default::default(),
            character_name: Set(required("character name", character_name)?),
            movie_id: Set(movie_id),
            actor_id: Set(actor_id),
        };

        let role_id = role::Entity::insert(model).exec(&self.db).await?.last_insert_id;
        debug!(role_id, movie_id, actor_id, "created role");
        Ok(role_id)
    }

    pub async fn roles_for_movie(&self, movie_id: i32) -> AppResult<Vec<role::Model>> {
        Ok(role::Entity::find()
            .filter(role::Column::MovieId.eq(movie_id))
            .order_by_asc(role::Column::Id)
            .all(&self.db)
            .await?)
    }

    pub async fn roles_for_actor(&self, actor_id: i32) -> AppResult<Vec<role::Model>> {
        Ok(role::Entity::find()
            .filter(role::Column::ActorId.eq(actor_id))
            .order_by_asc(role::Column::Id)
            .all(&self.db)
            .await?)
    }

    pub async fn resolve_rating(&self, movie: &movie::Model) -> AppResult<Option<rating::Model>> {
        if movie.rating_id.is_none() {
            return Ok(None);
        }
        Ok(movie.find_related(rating::Entity).one(&self.db).await?)
    }

    pub async fn resolve_roles(&self, movie: &movie::Model) -> AppResult<Vec<role::Model>> {
        Ok(movie
            .find_related(role::Entity)
            .order_by_asc(role::Column::Id)
            .all(&self.db)
            .await?)
    }

    pub async fn resolve_actor(&self, role: &role::Model) -> AppResult<Option<actor::Model>> {
        Ok(role.find_related(actor::Entity).one(&self.db).await?)
    }
}
