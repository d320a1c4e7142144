//! Append-only resource download records.

use sea_orm::DatabaseConnection;

use crate::{
    model::{api::total_pages, download::DownloadStatsDto},
    server::{
        data::download::DownloadRepository,
        error::AppError,
        model::{
            download::{
                Download, PaginatedDownloads, RecordDownloadParams, ResourceDownloadCount,
            },
            LabelCount,
        },
        service::{course::CourseService, resource::ResourceService},
    },
};

/// Number of resources listed in download statistics.
const TOP_RESOURCES: u64 = 10;

pub struct DownloadService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> DownloadService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records that a user downloaded a course resource.
    ///
    /// # Returns
    /// - `Ok(Download)` - Stored record including the resource URL
    /// - `Err(AppError::NotFound)` - Course missing or resource not part of it
    /// - `Err(AppError::AuthErr(AccessDenied))` - User neither manages nor is enrolled in the course
    pub async fn record(
        &self,
        user: &entity::user::Model,
        params: RecordDownloadParams,
    ) -> Result<Download, AppError> {
        CourseService::new(self.db)
            .get_accessible(params.course_id, user)
            .await?;
        let resource = ResourceService::new(self.db)
            .find(params.course_id, params.resource_id)
            .await?;

        let download = DownloadRepository::new(self.db)
            .create(params.user_id, &resource, params.client)
            .await?;

        tracing::debug!(
            "User {} downloaded resource {} of course {}",
            download.user_id,
            resource.id,
            download.course_id
        );

        Ok(download)
    }

    pub async fn get_by_user(
        &self,
        user_id: i32,
        page: u64,
        per_page: u64,
    ) -> Result<PaginatedDownloads, AppError> {
        let (downloads, total) = DownloadRepository::new(self.db)
            .get_by_user_paginated(user_id, page, per_page)
            .await?;

        Ok(PaginatedDownloads {
            downloads,
            total,
            page,
            per_page,
            total_pages: total_pages(total, per_page),
        })
    }

    /// Gets download records of a course the user manages.
    pub async fn get_by_course(
        &self,
        course_id: i32,
        user: &entity::user::Model,
    ) -> Result<Vec<Download>, AppError> {
        CourseService::new(self.db).get_managed(course_id, user).await?;

        Ok(DownloadRepository::new(self.db)
            .get_by_course(course_id)
            .await?)
    }

    /// Platform-wide download totals, per resource type and the most
    /// downloaded resources.
    pub async fn get_stats(&self) -> Result<DownloadStatsDto, AppError> {
        let repo = DownloadRepository::new(self.db);

        Ok(DownloadStatsDto {
            total: repo.count_all().await?,
            by_type: repo
                .count_by_type()
                .await?
                .into_iter()
                .map(LabelCount::into_dto)
                .collect(),
            top_resources: repo
                .most_downloaded(TOP_RESOURCES)
                .await?
                .into_iter()
                .map(ResourceDownloadCount::into_dto)
                .collect(),
        })
    }
}
