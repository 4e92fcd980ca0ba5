use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Games {
    Table,
    Id,
    Rows,
    Columns,
    MineCount,
    Status,
    CreatedAt,
    UpdatedAt,
    Version,
}

#[derive(Iden)]
enum GameCells {
    Table,
    Id,
    GameId,
    X,
    Y,
    IsMine,
    NeighborMineCount,
    Status,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // games
        manager
            .create_table(
                Table::create()
                    .table(Games::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Games::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Games::Rows).small_integer().not_null())
                    .col(ColumnDef::new(Games::Columns).small_integer().not_null())
                    .col(ColumnDef::new(Games::MineCount).integer().not_null())
                    .col(
                        ColumnDef::new(Games::Status)
                            .string_len(16)
                            .not_null()
                            .default("ACTIVE"),
                    )
                    .col(
                        ColumnDef::new(Games::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Games::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Games::Version)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await?;

        // listing is ordered newest first
        manager
            .create_index(
                Index::create()
                    .name("ix_games_created_at")
                    .table(Games::Table)
                    .col(Games::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // game_cells
        manager
            .create_table(
                Table::create()
                    .table(GameCells::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(GameCells::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(GameCells::GameId).uuid().not_null())
                    .col(ColumnDef::new(GameCells::X).small_integer().not_null())
                    .col(ColumnDef::new(GameCells::Y).small_integer().not_null())
                    .col(
                        ColumnDef::new(GameCells::IsMine)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(GameCells::NeighborMineCount)
                            .small_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(GameCells::Status)
                            .string_len(16)
                            .not_null()
                            .default("HIDDEN"),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_game_cells_game_id")
                            .from(GameCells::Table, GameCells::GameId)
                            .to(Games::Table, Games::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // one cell per (game, x, y)
        manager
            .create_index(
                Index::create()
                    .name("ux_game_cells_game_xy")
                    .table(GameCells::Table)
                    .col(GameCells::GameId)
                    .col(GameCells::X)
                    .col(GameCells::Y)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // drop in reverse order; indexes go with their tables
        manager
            .drop_table(Table::drop().table(GameCells::Table).if_exists().to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Games::Table).if_exists().to_owned())
            .await?;

        Ok(())
    }
}
