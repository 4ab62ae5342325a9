use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create capture_results table
        manager
            .create_table(
                Table::create()
                    .table(CaptureResults::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CaptureResults::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CaptureResults::RunId).uuid().not_null())
                    .col(
                        ColumnDef::new(CaptureResults::Position)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(CaptureResults::PagePath).string().not_null())
                    .col(ColumnDef::new(CaptureResults::PageName).string().not_null())
                    .col(ColumnDef::new(CaptureResults::Viewport).string().not_null())
                    .col(ColumnDef::new(CaptureResults::Status).string().not_null())
                    .col(ColumnDef::new(CaptureResults::ImageUrl).string())
                    .col(ColumnDef::new(CaptureResults::ErrorMessage).string())
                    .col(ColumnDef::new(CaptureResults::CapturedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(CaptureResults::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_capture_results_run_id")
                            .from(CaptureResults::Table, CaptureResults::RunId)
                            .to(Runs::Table, Runs::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create indexes
        manager
            .create_index(
                Index::create()
                    .name("idx_capture_results_run_id")
                    .table(CaptureResults::Table)
                    .col(CaptureResults::RunId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_capture_results_run_position")
                    .table(CaptureResults::Table)
                    .col(CaptureResults::RunId)
                    .col(CaptureResults::Position)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CaptureResults::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum CaptureResults {
    Table,
    Id,
    RunId,
    Position,
    PagePath,
    PageName,
    Viewport,
    Status,
    ImageUrl,
    ErrorMessage,
    CapturedAt,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Runs {
    Table,
    Id,
}
