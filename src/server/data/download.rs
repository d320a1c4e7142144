//! Resource download audit repository.
//!
//! Records are append-only; there is no update operation.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use std::collections::HashMap;

use crate::{
    model::api::MAX_PAGE,
    server::model::{
        download::{ClientInfo, Download, ResourceDownloadCount},
        resource::Resource,
        row_count, LabelCount,
    },
};

pub struct DownloadRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> DownloadRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Records a download, snapshotting the resource's title, type and URL.
    pub async fn create(
        &self,
        user_id: i32,
        resource: &Resource,
        client: ClientInfo,
    ) -> Result<Download, DbErr> {
        let entity = entity::resource_download::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            course_id: ActiveValue::Set(resource.course_id),
            resource_id: ActiveValue::Set(Some(resource.id)),
            resource_title: ActiveValue::Set(resource.title.clone()),
            resource_type: ActiveValue::Set(resource.resource_type.clone()),
            resource_url: ActiveValue::Set(resource.url.clone()),
            ip_address: ActiveValue::Set(client.ip_address),
            user_agent: ActiveValue::Set(client.user_agent),
            downloaded_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Download::from_entity(entity))
    }

    /// Gets a user's downloads with pagination, newest first.
    pub async fn get_by_user_paginated(
        &self,
        user_id: i32,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<Download>, u64), DbErr> {
        let paginator = entity::prelude::ResourceDownload::find()
            .filter(entity::resource_download::Column::UserId.eq(user_id))
            .order_by_desc(entity::resource_download::Column::DownloadedAt)
            .order_by_desc(entity::resource_download::Column::Id)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let downloads = paginator
            .fetch_page(page.min(MAX_PAGE))
            .await?
            .into_iter()
            .map(Download::from_entity)
            .collect();

        Ok((downloads, total))
    }

    /// Gets a course's downloads, newest first.
    pub async fn get_by_course(&self, course_id: i32) -> Result<Vec<Download>, DbErr> {
        let entities = entity::prelude::ResourceDownload::find()
            .filter(entity::resource_download::Column::CourseId.eq(course_id))
            .order_by_desc(entity::resource_download::Column::DownloadedAt)
            .order_by_desc(entity::resource_download::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Download::from_entity).collect())
    }

    /// Download count per course for the given courses. Courses without
    /// downloads are absent.
    pub async fn count_by_courses(&self, course_ids: Vec<i32>) -> Result<HashMap<i32, u64>, DbErr> {
        if course_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows: Vec<(i32, i64)> = entity::prelude::ResourceDownload::find()
            .select_only()
            .column(entity::resource_download::Column::CourseId)
            .column_as(entity::resource_download::Column::Id.count(), "downloads")
            .filter(entity::resource_download::Column::CourseId.is_in(course_ids))
            .group_by(entity::resource_download::Column::CourseId)
            .into_tuple()
            .all(self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(course_id, count)| (course_id, row_count(count)))
            .collect())
    }

    /// Download count per resource type, largest first with ties by type.
    pub async fn count_by_type(&self) -> Result<Vec<LabelCount>, DbErr> {
        let rows: Vec<(String, i64)> = entity::prelude::ResourceDownload::find()
            .select_only()
            .column(entity::resource_download::Column::ResourceType)
            .column_as(entity::resource_download::Column::Id.count(), "downloads")
            .group_by(entity::resource_download::Column::ResourceType)
            .order_by_desc(entity::resource_download::Column::Id.count())
            .order_by_asc(entity::resource_download::Column::ResourceType)
            .into_tuple()
            .all(self.db)
            .await?;

        Ok(rows.into_iter().map(LabelCount::from).collect())
    }

    /// Most downloaded resources, ties broken by title.
    ///
    /// Records are grouped by resource id; records whose resource was deleted
    /// share the `None` group.
    pub async fn most_downloaded(&self, limit: u64) -> Result<Vec<ResourceDownloadCount>, DbErr> {
        let rows: Vec<(Option<i32>, String, i64)> = entity::prelude::ResourceDownload::find()
            .select_only()
            .column(entity::resource_download::Column::ResourceId)
            .column_as(entity::resource_download::Column::ResourceTitle.max(), "title")
            .column_as(entity::resource_download::Column::Id.count(), "downloads")
            .group_by(entity::resource_download::Column::ResourceId)
            .order_by_desc(entity::resource_download::Column::Id.count())
            .order_by_asc(entity::resource_download::Column::ResourceTitle.max())
            .limit(limit)
            .into_tuple()
            .all(self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(resource_id, title, count)| ResourceDownloadCount {
                resource_id,
                title,
                count: row_count(count),
            })
            .collect())
    }

    pub async fn count_by_user(&self, user_id: i32) -> Result<u64, DbErr> {
        entity::prelude::ResourceDownload::find()
            .filter(entity::resource_download::Column::UserId.eq(user_id))
            .count(self.db)
            .await
    }

    pub async fn count_all(&self) -> Result<u64, DbErr> {
        entity::prelude::ResourceDownload::find()
            .count(self.db)
            .await
    }

    pub async fn delete_by_course(&self, course_id: i32) -> Result<(), DbErr> {
        entity::prelude::ResourceDownload::delete_many()
            .filter(entity::resource_download::Column::CourseId.eq(course_id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    pub async fn delete_by_user(&self, user_id: i32) -> Result<(), DbErr> {
        entity::prelude::ResourceDownload::delete_many()
            .filter(entity::resource_download::Column::UserId.eq(user_id))
            .exec(self.db)
            .await?;

        Ok(())
    }
}
