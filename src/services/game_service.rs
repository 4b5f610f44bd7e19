use crate::entities::game_entity as games;
use crate::error::{AppError, AppResult};
use crate::lottery::{LotteryError, validate_game_number};
use crate::models::{CreateGameRequest, GameResponse};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

#[cfg_attr(not(test), derive(Clone))]
pub struct GameService {
    pool: DatabaseConnection,
}

impl GameService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 新建游戏（激活票本前游戏必须已存在）
    pub async fn create_game(&self, request: CreateGameRequest) -> AppResult<GameResponse> {
        validate_game_number(&request.game_number)?;
        let game_name = request.game_name.trim();
        if game_name.is_empty() {
            return Err(AppError::ValidationError(
                "Game name must not be empty".to_string(),
            ));
        }
        if request.price_cents <= 0 {
            return Err(AppError::ValidationError(
                "Price must be positive".to_string(),
            ));
        }
        if request.tickets_per_book <= 0 {
            return Err(AppError::ValidationError(
                "Tickets per book must be positive".to_string(),
            ));
        }

        let inserted = games::Entity::insert(games::ActiveModel {
            game_number: Set(request.game_number.clone()),
            game_name: Set(game_name.to_string()),
            price_cents: Set(request.price_cents),
            tickets_per_book: Set(request.tickets_per_book),
            is_active: Set(true),
            ..Default::default()
        })
        .on_conflict(
            OnConflict::column(games::Column::GameNumber)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(&self.pool)
        .await?;
        if inserted == 0 {
            return Err(LotteryError::GameAlreadyExists(request.game_number).into());
        }

        let game = Self::find_by_number(&self.pool, &request.game_number).await?;
        log::info!(
            "Lottery game {} ({}) created",
            game.game_number,
            game.game_name
        );
        Ok(game.into())
    }

    /// 所有启用的游戏，按游戏编号排序
    pub async fn list_games(&self) -> AppResult<Vec<GameResponse>> {
        let list = games::Entity::find()
            .filter(games::Column::IsActive.eq(true))
            .order_by_asc(games::Column::GameNumber)
            .all(&self.pool)
            .await?;
        Ok(list.into_iter().map(Into::into).collect())
    }

    pub async fn get_game(&self, game_number: &str) -> AppResult<GameResponse> {
        validate_game_number(game_number)?;
        Ok(Self::find_by_number(&self.pool, game_number).await?.into())
    }

    pub(crate) async fn find_by_number<C: ConnectionTrait>(
        conn: &C,
        game_number: &str,
    ) -> AppResult<games::Model> {
        Self::try_find_by_number(conn, game_number)
            .await?
            .ok_or_else(|| LotteryError::GameNotFound(game_number.to_string()).into())
    }

    pub(crate) async fn try_find_by_number<C: ConnectionTrait>(
        conn: &C,
        game_number: &str,
    ) -> AppResult<Option<games::Model>> {
        let game = games::Entity::find()
            .filter(games::Column::GameNumber.eq(game_number))
            .one(conn)
            .await?;
        Ok(game)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::game;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn request(game_number: &str, price_cents: i64, tickets_per_book: i32) -> CreateGameRequest {
        CreateGameRequest {
            game_number: game_number.to_string(),
            game_name: "Lucky 7s".to_string(),
            price_cents,
            tickets_per_book,
        }
    }

    #[tokio::test]
    async fn test_create_game_validates_input() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let service = GameService::new(db);

        let err = service.create_game(request("12", 100, 150)).await.unwrap_err();
        assert!(matches!(err, AppError::Lottery(LotteryError::InvalidFormat { .. })));

        let err = service.create_game(request("123", 0, 150)).await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));

        let err = service.create_game(request("123", 100, 0)).await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_create_game_conflict() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();
        let service = GameService::new(db);

        let err = service.create_game(request("123", 100, 150)).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Lottery(LotteryError::GameAlreadyExists(ref n)) if n == "123"
        ));
    }

    #[tokio::test]
    async fn test_create_game() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 1,
                rows_affected: 1,
            }])
            .append_query_results([vec![game(1, "123", 100, 150)]])
            .into_connection();
        let service = GameService::new(db);

        let created = service.create_game(request("123", 100, 150)).await.unwrap();
        assert_eq!(created.game_number, "123");
        assert_eq!(created.tickets_per_book, 150);
    }

    #[tokio::test]
    async fn test_get_unknown_game() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<games::Model>::new()])
            .into_connection();
        let service = GameService::new(db);

        let err = service.get_game("999").await.unwrap_err();
        assert!(matches!(err, AppError::Lottery(LotteryError::GameNotFound(_))));
    }
}
