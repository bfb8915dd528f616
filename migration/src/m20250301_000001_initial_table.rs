use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建 abbreviations 表
        manager
            .create_table(
                Table::create()
                    .table(Abbreviation::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Abbreviation::Id)
                            .string_len(36)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Abbreviation::Abbreviation)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Abbreviation::FullName).text().not_null())
                    // 小写副本，子串搜索只查这两列
                    .col(
                        ColumnDef::new(Abbreviation::AbbreviationSearch)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Abbreviation::FullNameSearch)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Abbreviation::CopyCount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Abbreviation::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Abbreviation::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 简写索引（精确查找 / 排序）
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_abbreviations_abbreviation")
                    .table(Abbreviation::Table)
                    .col(Abbreviation::Abbreviation)
                    .to_owned(),
            )
            .await?;

        // 热词排行
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_abbreviations_copy_count")
                    .table(Abbreviation::Table)
                    .col(Abbreviation::CopyCount)
                    .to_owned(),
            )
            .await?;

        // 分页按创建时间倒序
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_abbreviations_created_at")
                    .table(Abbreviation::Table)
                    .col(Abbreviation::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for name in [
            "idx_abbreviations_created_at",
            "idx_abbreviations_copy_count",
            "idx_abbreviations_abbreviation",
        ] {
            manager
                .drop_index(
                    Index::drop()
                        .name(name)
                        .table(Abbreviation::Table)
                        .to_owned(),
                )
                .await?;
        }

        manager
            .drop_table(Table::drop().table(Abbreviation::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Abbreviation {
    #[sea_orm(iden = "abbreviations")]
    Table,
    Id,
    Abbreviation,
    FullName,
    AbbreviationSearch,
    FullNameSearch,
    CopyCount,
    CreatedAt,
    UpdatedAt,
}
